pub mod clahe;
pub mod gamma;
pub mod luma_equalize;

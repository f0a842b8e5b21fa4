pub mod hsv;
pub mod luma;
pub mod ycrcb;

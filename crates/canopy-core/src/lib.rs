pub mod color;
pub mod consts;
pub mod error;
pub mod exposure;
pub mod filters;
pub mod frame;
pub mod growth;
pub mod io;
pub mod pipeline;
pub mod vegetation;

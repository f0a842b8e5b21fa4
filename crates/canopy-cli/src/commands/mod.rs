pub mod analyze;
pub mod config;
pub mod enhance;
pub mod info;
pub mod measure;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CanopyError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image format error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Invalid image: {0}")]
    InvalidImage(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Series analysis needs at least {required} images, got {actual}")]
    InsufficientInput { required: usize, actual: usize },

    #[error("Growth rate from '{from}' to '{to}' is undefined: prior vegetation fraction is 0")]
    DivisionByZeroGrowth { from: String, to: String },
}

pub type Result<T> = std::result::Result<T, CanopyError>;

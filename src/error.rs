use thiserror::Error;

pub type ViewerResult<T> = Result<T, ViewerError>;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("data line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },

    #[error("unknown band: {0}")]
    UnknownBand(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

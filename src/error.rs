use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("fetch failed for `{url}`: {message}")]
    Network { url: String, message: String },

    #[error("malformed row {row}: {message}")]
    Parse { row: usize, message: String },

    #[error("invalid config: {0}")]
    Config(String),
}

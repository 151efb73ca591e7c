use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("No depth frame available from the sensor")]
    SourceUnavailable,

    #[error("Invalid trimmed dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Depth buffer size mismatch: expected {expected} samples, got {actual}")]
    FrameSizeMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, PipelineError>;

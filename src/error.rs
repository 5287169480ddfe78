use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid trigger start `{spec}`: {reason}")]
    InvalidTrigger { spec: String, reason: String },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("chart backend failed for target `{target}`: {reason}")]
    Backend { target: String, reason: String },

    #[error("invalid data: {0}")]
    InvalidData(String),
}

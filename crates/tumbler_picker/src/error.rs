use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PickerError {
    #[error("picker container is required")]
    MissingContainer,

    #[error("picker container `{0}` could not be resolved")]
    UnresolvedContainer(String),

    #[error("min date {min} is after max date {max}")]
    InvalidBounds { min: NaiveDate, max: NaiveDate },

    #[error("visible item count must be odd and at least 1, got {0}")]
    InvalidVisibleItems(usize),

    #[error("item height must be a positive number of pixels, got {0}")]
    InvalidItemHeight(f32),

    #[error("invalid physics: {0}")]
    InvalidPhysics(&'static str),

    #[error("failed to parse picker config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("failed to read picker config: {0}")]
    ConfigIo(#[from] std::io::Error),
}

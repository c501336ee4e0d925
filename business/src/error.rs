use thiserror::Error;

/// Rejected view parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
    #[error("items per page must be at least 1, got {0}")]
    InvalidItemsPerPage(usize),
}

/// Form input that must not be sent to the API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please fill in all fields: `{0}` is empty")]
    MissingField(&'static str),
    #[error("Please enter a valid email address: {0}")]
    InvalidEmail(String),
}

use thiserror::Error;

/// Failures talking to the detection backend.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Network(String),
    #[error("{message}")]
    Remote { status: u16, message: String },
}

impl ApiError {
    /// Builds the remote variant from a status code and an optional
    /// backend-supplied `detail` field.
    pub fn remote(status: u16, detail: Option<String>) -> Self {
        let message = detail
            .filter(|text| !text.trim().is_empty())
            .unwrap_or_else(|| format!("HTTP error, status {}", status));
        ApiError::Remote { status, message }
    }
}

/// Failures of simulation-clock operations, including the derived
/// jump-to-date policy errors.
#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("simulation clock is not initialized")]
    NotInitialized,
    #[error("target date {target} is before the current simulation date {current}; reset first")]
    PastDate { target: String, current: String },
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FareError {
    #[error("No prediction received from API")]
    NoPrediction,

    #[error("API Error: Status {status}")]
    Status { status: u16, body: String },

    #[error("Request timed out. Please try again.")]
    Timeout,

    #[error("Unexpected fare payload: {0}")]
    Malformed(String),

    #[error("Error: {0}")]
    Request(#[from] reqwest::Error),
}

impl FareError {
    /// Sorts a transport failure into timeout vs everything else.
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FareError::Timeout
        } else {
            FareError::Request(err)
        }
    }
}

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("HTTP error {status}: {body_snippet}")]
    Http {
        status: reqwest::StatusCode,
        body_snippet: String,
    },

    #[error("JSON deserialization error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid header value: {0}")]
    Header(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Offer {offer_id} has no rewards")]
    EmptyOffer { offer_id: String },
}

pub type Result<T> = std::result::Result<T, AccountError>;

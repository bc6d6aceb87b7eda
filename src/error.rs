use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON decode error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The geocoder returned no match for the address.
    #[error("no location found for address {0:?}")]
    AddressNotFound(String),

    #[error("address must not be empty")]
    EmptyAddress,

    /// Input was not two whitespace-separated numbers.
    #[error("invalid coordinates {0:?}: expected \"<latitude> <longitude>\"")]
    InvalidCoordinates(String),

    #[error("invalid district {0} (must be 1-12)")]
    InvalidDistrict(u8),
}

pub type Result<T> = std::result::Result<T, Error>;

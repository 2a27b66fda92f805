use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid image {width}x{height}: {reason}")]
    InvalidImage {
        width: u32,
        height: u32,
        reason: &'static str,
    },
    #[error("failed to parse fingerprint: {0}")]
    ParseFingerprint(String),
    #[error("failed to load config {0}")]
    Config(#[from] config::ConfigError),
}

impl Error {
    pub(crate) fn invalid_image(width: u32, height: u32, reason: &'static str) -> Self {
        Error::InvalidImage {
            width,
            height,
            reason,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

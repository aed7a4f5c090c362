use thiserror::Error;

/// Failures of the terminal host itself. Request failures never show up
/// here; the session turns them into display text.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    #[error("invalid configuration: {0}")]
    Validation(String),

    #[error("failed to set up logging: {0}")]
    Logging(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for AppError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

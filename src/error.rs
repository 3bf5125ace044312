use thiserror;

/// The Result type for tui2048.
pub(crate) type Result<T> = std::result::Result<T, Error>;

#[derive(thiserror::Error, Debug)]
pub(crate) enum Error {
    #[error("io error")]
    StdIOError(#[from] std::io::Error),

    #[error("log error")]
    LogError(#[from] log::SetLoggerError),

    #[error("{source}")]
    TuiError {
        #[from]
        source: crate::tui::error::TuiError,
    },
}

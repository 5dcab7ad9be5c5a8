use miette::Diagnostic;
use thiserror::Error;

/// Main error type for pxsvg operations
#[derive(Error, Diagnostic, Debug)]
pub enum PxSvgError {
    #[error("IO error: {0}")]
    #[diagnostic(code(pxsvg::io))]
    IoError(#[from] std::io::Error),

    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(pxsvg::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error: {message}")]
    #[diagnostic(code(pxsvg::parse))]
    Parse {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Invalid sprite: {message}")]
    #[diagnostic(code(pxsvg::sprite))]
    InvalidSprite {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Export error: {message}")]
    #[diagnostic(code(pxsvg::export))]
    Export {
        message: String,
        #[help]
        help: Option<String>,
    },
}

pub type Result<T> = std::result::Result<T, PxSvgError>;

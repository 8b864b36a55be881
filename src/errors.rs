use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum SvcmapError {
    #[error("Cannot read scan root {path}: {message}")]
    #[diagnostic(code(svcmap::root_unreadable))]
    RootUnreadable { path: PathBuf, message: String },

    #[error("Syntax error in {file}: {message}")]
    #[diagnostic(code(svcmap::syntax))]
    SyntaxFailure { file: PathBuf, message: String },

    #[error("Error parsing {file}: {message}")]
    #[diagnostic(code(svcmap::config_parse))]
    ConfigParse { file: PathBuf, message: String },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(svcmap::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(svcmap::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(svcmap::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(svcmap::glob))]
    Glob(#[from] globset::Error),
}

pub type Result<T> = std::result::Result<T, SvcmapError>;

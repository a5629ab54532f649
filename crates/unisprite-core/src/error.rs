use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("No {0} sprite selected")]
    MissingSelection(&'static str),

    #[error("fileID for sprite '{sprite}' not found in {meta_path}")]
    FileIdNotFound { sprite: String, meta_path: String },

    #[error("Invalid meta file {path}: {message}")]
    Meta { path: String, message: String },

    #[error("No guid recorded for {0}")]
    GuidNotFound(String),

    #[error("No active scene; pass a scene name explicitly")]
    NoActiveScene,

    #[error("Invalid sprite reference '{0}'")]
    InvalidSpriteRef(String),
}

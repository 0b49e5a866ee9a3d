use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid memory size \"{0}\" (expected digits with an optional K, M or G suffix)")]
    InvalidSize(String),

    #[error("missing variables: {}", .0.join(", "))]
    MissingSettings(Vec<String>),

    #[error("Invalid profile {}: {message}", .path.display())]
    Profile { path: PathBuf, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

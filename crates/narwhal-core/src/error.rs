pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid view selector: {raw} (expected `all` or a domain index)")]
    InvalidView { raw: String },

    #[error("Unknown actor: {key}")]
    UnknownActor { key: String },

    #[error("Invalid config: {message}")]
    InvalidConfig { message: String },

    #[error("Config JSON error: {0}")]
    ConfigJson(#[from] serde_json::Error),
}

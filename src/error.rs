use thiserror::Error;

#[derive(Debug, Error)]
pub enum HudError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("clipboard unavailable: {0}")]
    Clipboard(#[from] arboard::Error),
    #[error("failed to read config `{path}`: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to start host bridge: {0}")]
    Bridge(#[source] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
    #[error("url: {0}")]
    Url(#[from] url::ParseError),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("decode error: {0}")]
    Decode(String),
    #[error("invalid torrent")]
    InvalidTorrent,
    #[error("authentication failed (status {status}): {excerpt}")]
    AuthenticationFailed { status: u16, excerpt: String },
    #[error("download blocked: site returned an html page instead of a torrent")]
    DownloadBlocked,
    #[error("generic: {0}")]
    Generic(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

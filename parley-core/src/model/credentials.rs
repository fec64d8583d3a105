use serde::Deserialize;

/// `username`/`password` pair taken from the query string of `/ws` and `/turn`.
///
/// Missing parameters decode as empty strings so that they fail
/// authentication instead of being rejected as a malformed request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Credentials {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

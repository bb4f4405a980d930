use std::path::PathBuf;

pub const DEFAULT_USERGUIDE_PATH: &str = "./userguides";
pub const DEFAULT_USERGUIDE_FILENAME: &str = "user-guide.pdf";
pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_STATIC_PATH: &str = "./static";
pub const DEFAULT_AUTH_TOKEN: &str = "valid-oauth-token";

/// Process-wide settings. Built once at startup and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory the protected user guide must live in.
    pub userguide_path: PathBuf,
    /// Untrusted until it passes the filename validator.
    pub userguide_filename: String,
    pub port: u16,
    /// Operator-managed directory behind `/static` and the public download.
    pub static_path: PathBuf,
    /// Expected bearer token for the placeholder verifier.
    pub auth_token: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            userguide_path: PathBuf::from(DEFAULT_USERGUIDE_PATH),
            userguide_filename: DEFAULT_USERGUIDE_FILENAME.to_string(),
            port: DEFAULT_PORT,
            static_path: PathBuf::from(DEFAULT_STATIC_PATH),
            auth_token: DEFAULT_AUTH_TOKEN.to_string(),
        }
    }
}

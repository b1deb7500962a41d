use ladle_core::AppError;

/// Server process configuration, read from environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub fetch_timeout_secs: u64,
    /// When set, a daily-rotating log file sink is added under this directory.
    pub log_dir: Option<String>,
}

impl ServerConfig {
    /// Read configuration from environment variables.
    ///
    /// - `PORT` (optional, defaults to 8000)
    /// - `LADLE_FETCH_TIMEOUT_SECS` (optional, defaults to 30)
    /// - `LADLE_LOG_DIR` (optional)
    pub fn from_env() -> Result<Self, AppError> {
        let port = match std::env::var("PORT") {
            Err(_) => 8000,
            Ok(raw) => raw.parse().map_err(|_| {
                AppError::Config(format!("Invalid PORT '{raw}': must be a port number"))
            })?,
        };

        let fetch_timeout_secs = match std::env::var("LADLE_FETCH_TIMEOUT_SECS") {
            Err(_) => 30,
            Ok(raw) => {
                let parsed: u64 = raw.parse().map_err(|_| {
                    AppError::Config(format!(
                        "Invalid LADLE_FETCH_TIMEOUT_SECS '{raw}': must be a positive integer"
                    ))
                })?;
                if parsed == 0 {
                    return Err(AppError::Config(
                        "LADLE_FETCH_TIMEOUT_SECS must be at least 1".into(),
                    ));
                }
                parsed
            }
        };

        Ok(Self {
            port,
            fetch_timeout_secs,
            log_dir: std::env::var("LADLE_LOG_DIR").ok(),
        })
    }
}

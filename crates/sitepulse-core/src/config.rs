#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub data_dir: String,
    pub auth_mode: AuthMode,
    pub cors_origins: Vec<String>,
    pub duckdb_memory_limit: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AuthMode {
    /// Dashboard endpoints are open. Only sensible for local development.
    None,
    /// Holds the plaintext token read from `SITEPULSE_ADMIN_TOKEN`; dashboard
    /// endpoints require it as a `Bearer` credential.
    Token(String),
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Ok(Self {
            port: std::env::var("SITEPULSE_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|e| format!("invalid port: {e}"))?,
            data_dir: std::env::var("SITEPULSE_DATA_DIR").unwrap_or_else(|_| "./data".to_string()),
            auth_mode: {
                let raw = std::env::var("SITEPULSE_AUTH").unwrap_or_else(|_| "token".to_string());
                match raw.as_str() {
                    "none" => AuthMode::None,
                    _ => {
                        let token = std::env::var("SITEPULSE_ADMIN_TOKEN").map_err(|_| {
                            "SITEPULSE_ADMIN_TOKEN required unless SITEPULSE_AUTH=none".to_string()
                        })?;
                        AuthMode::Token(token)
                    }
                }
            },
            cors_origins: std::env::var("SITEPULSE_CORS_ORIGINS")
                .map(|v| v.split(',').map(str::to_string).collect())
                .unwrap_or_default(),
            duckdb_memory_limit: std::env::var("SITEPULSE_DUCKDB_MEMORY")
                .unwrap_or_else(|_| "1GB".to_string()),
        })
    }
}

use notes::StoreConfig;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

/// Which store backend the server talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[serde(alias = "mongo")]
    Mongodb,
    #[serde(alias = "in_memory", alias = "inmemory")]
    Memory,
}

impl StoreBackend {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreBackend::Mongodb => "mongodb",
            StoreBackend::Memory => "memory",
        }
    }
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Server bind address
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Server port (`PORT` overrides)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Document store connection string (`MONGODB_URI` overrides)
    #[serde(default = "default_mongodb_uri")]
    pub mongodb_uri: String,

    /// Collection holding the notes
    #[serde(default = "default_collection")]
    pub collection: String,

    #[serde(default = "default_store_backend")]
    pub store_backend: StoreBackend,

    /// Origins admitted by the boundary filter. Requests without an
    /// `Origin` header are always admitted.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Maximum request body size in KB
    #[serde(default = "default_max_body_size_kb")]
    pub max_body_size_kb: usize,

    /// Log level / `EnvFilter` directive
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Emit JSON log lines (plain text otherwise)
    #[serde(default = "default_true")]
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
            mongodb_uri: default_mongodb_uri(),
            collection: default_collection(),
            store_backend: default_store_backend(),
            allowed_origins: default_allowed_origins(),
            timeout_secs: default_timeout_secs(),
            max_body_size_kb: default_max_body_size_kb(),
            log_level: default_log_level(),
            log_json: default_true(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from config file, environment variables, and the
    /// plain `PORT` / `MONGODB_URI` variables, in increasing precedence.
    pub fn load() -> anyhow::Result<Self> {
        let builder = config::Config::builder()
            // Load from file if exists
            .add_source(config::File::with_name("notes-server").required(false))
            // Override with prefixed environment variables
            .add_source(
                config::Environment::with_prefix("NOTES_SERVER")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("allowed_origins")
                    .try_parsing(true),
            )
            .set_override_option("port", std::env::var("PORT").ok())?
            .set_override_option("mongodb_uri", std::env::var("MONGODB_URI").ok())?;

        let config: ServerConfig = builder.build()?.try_deserialize()?;
        Ok(config)
    }

    /// Get the socket address to bind to
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr_str = format!("{}:{}", self.bind_addr, self.port);
        Ok(addr_str.parse()?)
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get max body size in bytes
    pub fn max_body_size(&self) -> usize {
        self.max_body_size_kb * 1024
    }

    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }

    pub fn store_config(&self) -> StoreConfig {
        match self.store_backend {
            StoreBackend::Mongodb => StoreConfig::MongoDb {
                uri: self.mongodb_uri.clone(),
                collection: self.collection.clone(),
            },
            StoreBackend::Memory => StoreConfig::InMemory,
        }
    }
}

fn default_bind_addr() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_mongodb_uri() -> String {
    "mongodb://localhost:27017/notesdb".to_string()
}

fn default_collection() -> String {
    "notes".to_string()
}

fn default_store_backend() -> StoreBackend {
    StoreBackend::Mongodb
}

fn default_allowed_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "https://notes-ui.vercel.app".to_string(),
    ]
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_max_body_size_kb() -> usize {
    100
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let cfg = ServerConfig::default();
        assert_eq!(cfg.port, 3000);
        assert_eq!(cfg.mongodb_uri, "mongodb://localhost:27017/notesdb");
        assert_eq!(cfg.store_backend, StoreBackend::Mongodb);
        assert_eq!(cfg.timeout_secs, 30);
        assert_eq!(cfg.max_body_size(), 100 * 1024);
        assert!(cfg.log_json);
    }

    #[test]
    fn test_socket_addr() {
        let cfg = ServerConfig::default();
        let addr = cfg.socket_addr().unwrap();
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_origin_allow_list() {
        let cfg = ServerConfig::default();
        assert!(cfg.is_origin_allowed("http://localhost:3000"));
        assert!(cfg.is_origin_allowed("https://notes-ui.vercel.app"));
        assert!(!cfg.is_origin_allowed("https://evil.example"));
        assert!(!cfg.is_origin_allowed("http://localhost:3000/"));
    }

    #[test]
    fn test_store_config_selection() {
        let mut cfg = ServerConfig::default();
        cfg.mongodb_uri = "mongodb://db:27017/other".to_string();
        match cfg.store_config() {
            StoreConfig::MongoDb { uri, collection } => {
                assert_eq!(uri, "mongodb://db:27017/other");
                assert_eq!(collection, "notes");
            }
            other => panic!("unexpected store config: {other:?}"),
        }

        cfg.store_backend = StoreBackend::Memory;
        assert!(matches!(cfg.store_config(), StoreConfig::InMemory));
    }

    #[test]
    fn test_backend_names() {
        let backend: StoreBackend = serde_json::from_str("\"memory\"").unwrap();
        assert_eq!(backend, StoreBackend::Memory);
        let backend: StoreBackend = serde_json::from_str("\"mongo\"").unwrap();
        assert_eq!(backend, StoreBackend::Mongodb);
    }

    /// `load()` reads process-wide env vars; tests touching them take this.
    static ENV_LOCK: std::sync::Mutex<()> = std::sync::Mutex::new(());

    fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
        let _guard = ENV_LOCK.lock().unwrap_or_else(|e| e.into_inner());
        for (key, value) in vars {
            std::env::set_var(key, value);
        }
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(f));
        for (key, _) in vars {
            std::env::remove_var(key);
        }
        if let Err(panic) = result {
            std::panic::resume_unwind(panic);
        }
    }

    #[test]
    fn test_load_plain_port_and_mongodb_uri() {
        with_env(
            &[
                ("PORT", "8081"),
                ("MONGODB_URI", "mongodb://db.internal:27017/notes_prod"),
                ("NOTES_SERVER__PORT", "9999"),
            ],
            || {
                let cfg = ServerConfig::load().unwrap();
                assert_eq!(cfg.port, 8081);
                assert_eq!(cfg.mongodb_uri, "mongodb://db.internal:27017/notes_prod");
                assert_eq!(cfg.collection, "notes");
            },
        );
    }

    #[test]
    fn test_load_prefixed_env() {
        with_env(
            &[
                (
                    "NOTES_SERVER__ALLOWED_ORIGINS",
                    "https://a.example,https://b.example",
                ),
                ("NOTES_SERVER__STORE_BACKEND", "memory"),
                ("NOTES_SERVER__TIMEOUT_SECS", "5"),
            ],
            || {
                let cfg = ServerConfig::load().unwrap();
                assert_eq!(
                    cfg.allowed_origins,
                    vec!["https://a.example".to_string(), "https://b.example".to_string()]
                );
                assert!(cfg.is_origin_allowed("https://b.example"));
                assert!(!cfg.is_origin_allowed("http://localhost:3000"));
                assert_eq!(cfg.store_backend, StoreBackend::Memory);
                assert_eq!(cfg.timeout_secs, 5);
            },
        );
    }
}

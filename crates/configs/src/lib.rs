use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub seed: SeedConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")] 
    pub max_connections: u32,
    #[serde(default = "default_min_connections")] 
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")] 
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")] 
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")] 
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")] 
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// Startup data seeding.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedConfig {
    /// Insert the sample departments/employees when the department table is empty.
    #[serde(default = "default_sample_data")]
    pub sample_data: bool,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self { sample_data: default_sample_data() }
    }
}

fn default_sample_data() -> bool { true }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default()?;
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Configuration assembled purely from environment variables, used when
    /// no config file is present.
    pub fn from_env() -> Self {
        let mut cfg = AppConfig::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        cfg.server.worker_threads = std::env::var("TOKIO_WORKER_THREADS")
            .ok()
            .and_then(|v| v.parse::<usize>().ok());
        if let Some(flag) = std::env::var("SEED_SAMPLE_DATA").ok().and_then(|v| parse_flag(&v)) {
            cfg.seed.sample_data = flag;
        }
        cfg.database.normalize_from_env();
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        // 归一化 server
        self.server.normalize()?;
        // 归一化 database（支持从环境变量填充 URL）
        self.database.normalize_from_env();
        self.database.validate()?;
        Ok(())
    }
}

fn parse_flag(v: &str) -> Option<bool> {
    match v.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        // 若 TOML 中未提供 URL，则尝试从环境变量填充
        if self.url.trim().is_empty() {
            if let Ok(url) = std::env::var("DATABASE_URL") {
                self.url = url;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://") || lower.starts_with("sqlite:")) {
            return Err(anyhow!("database.url must start with postgres://, postgresql:// or sqlite:"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive seconds"));
        }
        Ok(())
    }
}

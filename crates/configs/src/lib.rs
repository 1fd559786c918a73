use std::collections::HashSet;

use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default = "default_plans")]
    pub plans: Vec<PlanConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            pagination: PaginationConfig::default(),
            plans: default_plans(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
    /// `compact` (default) or `json`
    #[serde(default)]
    pub log_format: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4), log_format: None }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationConfig {
    /// Default page-button budget; odd so the current page sits in the middle
    #[serde(default = "default_max_buttons")]
    pub max_buttons: u32,
    /// Largest budget a request may ask for
    #[serde(default = "default_max_buttons_limit")]
    pub max_buttons_limit: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            max_buttons: default_max_buttons(),
            max_buttons_limit: default_max_buttons_limit(),
            per_page: default_per_page(),
        }
    }
}

/// One subscription tier. Order in the config file defines rank (first = lowest).
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PlanConfig {
    pub id: String,
    pub name: String,
    pub monthly_entitlement: u64,
    pub cost: u64,
}

fn default_max_buttons() -> u32 { 5 }
fn default_max_buttons_limit() -> u32 { 25 }
fn default_per_page() -> u32 { 20 }

fn default_plans() -> Vec<PlanConfig> {
    let plan = |id: &str, name: &str, tokens: u64| PlanConfig {
        id: id.into(),
        name: name.into(),
        monthly_entitlement: tokens,
        cost: tokens,
    };
    vec![
        plan("starter", "Starter", 120),
        plan("pro", "Pro", 350),
        plan("elite", "Elite", 800),
    ]
}

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    from_toml_str(&content)
}

pub fn from_toml_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `CONFIG_PATH` (or `config.toml`) and validate it. A missing file falls back
    /// to defaults with `SERVER_HOST` / `SERVER_PORT` applied from the environment.
    pub fn load_or_env() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_not_found(&e) => AppConfig::default().with_env_overrides(),
            Err(e) => return Err(e),
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.server.port = port;
        }
        self
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.pagination.validate()?;
        check_plan_ids(self.plans.iter().map(|p| p.id.as_str())).map_err(|e| anyhow!("plans: {e}"))?;
        Ok(())
    }
}

fn is_not_found(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
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

impl PaginationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_buttons < 3 || self.max_buttons % 2 == 0 {
            return Err(anyhow!("pagination.max_buttons must be an odd number >= 3"));
        }
        if self.max_buttons > self.max_buttons_limit {
            return Err(anyhow!("pagination.max_buttons must be <= pagination.max_buttons_limit"));
        }
        if !(1..=100).contains(&self.per_page) {
            return Err(anyhow!("pagination.per_page must be within 1..=100"));
        }
        Ok(())
    }
}

/// Plan ids must be non-empty and unique.
pub fn check_plan_ids<'a>(ids: impl IntoIterator<Item = &'a str>) -> std::result::Result<(), String> {
    let mut seen = HashSet::new();
    for id in ids {
        if id.trim().is_empty() {
            return Err("plan id must not be empty".to_string());
        }
        if !seen.insert(id) {
            return Err(format!("duplicate plan id `{id}`"));
        }
    }
    Ok(())
}

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ConsoleError, ConsoleResult};

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
    /// Request timeout. Unset leaves the transport defaults in place.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilesConfig {
    pub default_per_page: u32,
    pub per_page_options: Vec<u32>,
}

impl FilesConfig {
    /// Accepts only the page sizes offered in `per_page_options`.
    pub fn check_per_page(&self, per_page: u32) -> ConsoleResult<u32> {
        if self.per_page_options.contains(&per_page) {
            return Ok(per_page);
        }
        let options: Vec<String> = self.per_page_options.iter().map(|n| n.to_string()).collect();
        Err(ConsoleError::InvalidInput(format!(
            "Page size must be one of {}",
            options.join(", ")
        )))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AdminConfig {
    pub stats_refresh_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub download_dir: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub files: FilesConfig,
    pub admin: AdminConfig,
    pub output: OutputConfig,
}

impl AppConfig {
    pub fn stats_refresh_interval(&self) -> Duration {
        Duration::from_secs(self.admin.stats_refresh_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.api.timeout_secs.map(Duration::from_secs)
    }
}

const EMBEDDED_DEFAULTS: &str = include_str!("../config/default.toml");

fn embedded_defaults() -> ::config::File<::config::FileSourceString, ::config::FileFormat> {
    ::config::File::from_str(EMBEDDED_DEFAULTS, ::config::FileFormat::Toml)
}

/// Built-in settings only: no config file, no environment. Backs `--no-config`.
impl Default for AppConfig {
    fn default() -> Self {
        let parsed = ::config::Config::builder()
            .add_source(embedded_defaults())
            .build()
            .and_then(|cfg| cfg.try_deserialize::<AppConfig>());
        match parsed {
            Ok(app_cfg) => app_cfg,
            Err(e) => panic!("embedded config/default.toml is invalid: {}", e),
        }
    }
}

pub fn load() -> anyhow::Result<AppConfig> {
    let _ = dotenvy::dotenv();

    let mut builder = ::config::Config::builder()
        .add_source(embedded_defaults())
        // ./migration-console.toml, if present
        .add_source(::config::File::with_name("migration-console").required(false));

    if let Ok(custom_path) = std::env::var("MIGRATION_CONSOLE_CONFIG") {
        builder = builder.add_source(::config::File::with_name(&custom_path).required(false));
    }
    // MIGRATION_CONSOLE__SECTION__KEY beats every file
    builder = builder.add_source(
        ::config::Environment::with_prefix("MIGRATION_CONSOLE")
            .separator("__")
            .try_parsing(true),
    );

    let app_cfg: AppConfig = builder.build()?.try_deserialize()?;
    validate(&app_cfg)?;
    Ok(app_cfg)
}

pub fn validate(cfg: &AppConfig) -> anyhow::Result<()> {
    let base = cfg.api.base_url.trim();
    if !(base.starts_with("http://") || base.starts_with("https://")) {
        return Err(anyhow::anyhow!("invalid api.base_url: {}", cfg.api.base_url));
    }
    if let Some(t) = cfg.api.timeout_secs {
        if t == 0 {
            return Err(anyhow::anyhow!("api.timeout_secs must be > 0 when set"));
        }
    }

    if cfg.files.default_per_page == 0 {
        return Err(anyhow::anyhow!("files.default_per_page must be > 0"));
    }
    if cfg.files.per_page_options.iter().any(|n| *n == 0) {
        return Err(anyhow::anyhow!("files.per_page_options must not contain 0"));
    }
    if !cfg.files.per_page_options.contains(&cfg.files.default_per_page) {
        return Err(anyhow::anyhow!(
            "files.default_per_page ({}) must be one of files.per_page_options",
            cfg.files.default_per_page
        ));
    }

    if cfg.admin.stats_refresh_secs == 0 {
        return Err(anyhow::anyhow!("admin.stats_refresh_secs must be > 0"));
    }

    if cfg.output.download_dir.as_os_str().is_empty() {
        return Err(anyhow::anyhow!("output.download_dir must not be empty"));
    }

    Ok(())
}

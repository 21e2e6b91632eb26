use crate::config::toml_config::{
    TomlConfig, DEFAULT_CONCURRENT_REQUESTS, DEFAULT_ENGAGEMENT_METHOD,
};
use crate::core::client::{default_headers, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECONDS};
use crate::core::report::OutputFormat;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "police-engagement")]
#[command(about = "List UK police forces that use a given social engagement method")]
pub struct CliConfig {
    /// Police data API root [default: https://data.police.uk/api]
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// Engagement method to look for [default: facebook]
    #[arg(short = 'm', long)]
    pub engagement_method: Option<String>,

    /// Per-force lookups in flight at once [default: 1]
    #[arg(long)]
    pub concurrent_requests: Option<usize>,

    /// Request timeout [default: 30]
    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    /// Report layout [default: table]
    #[arg(long, value_enum)]
    pub output_format: Option<OutputFormat>,

    /// Extra request header as NAME:VALUE, may be repeated
    #[arg(long = "header", value_parser = parse_header)]
    pub headers: Vec<(String, String)>,

    /// TOML configuration file; any flag above given explicitly wins
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

fn parse_header(raw: &str) -> std::result::Result<(String, String), String> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:VALUE, got '{}'", raw))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("missing header name in '{}'", raw));
    }
    Ok((name.to_string(), value.trim().to_string()))
}

impl CliConfig {
    /// Layer the explicit flags over a file configuration.
    pub fn apply_to(&self, mut file: TomlConfig) -> TomlConfig {
        if let Some(base_url) = &self.api_base_url {
            file.api.base_url = base_url.clone();
        }
        if let Some(timeout_seconds) = self.timeout_seconds {
            file.api.timeout_seconds = Some(timeout_seconds);
        }
        if let Some(concurrent_requests) = self.concurrent_requests {
            file.search.concurrent_requests = Some(concurrent_requests);
        }
        if let Some(method) = &self.engagement_method {
            file.search.engagement_method = method.clone();
        }
        if let Some(format) = self.output_format {
            file.search.output_format = format;
        }
        if !self.headers.is_empty() {
            let headers = file.api.headers.get_or_insert_with(Default::default);
            for (name, value) in &self.headers {
                headers.insert(name.clone(), value.clone());
            }
        }
        if self.monitor {
            file.monitoring = Some(crate::config::toml_config::MonitoringConfig { enabled: true });
        }
        file
    }

    pub fn load_file_config(&self) -> Option<Result<TomlConfig>> {
        self.config
            .as_ref()
            .map(|path| TomlConfig::from_file(path).map(|file| self.apply_to(file)))
    }
}

impl ConfigProvider for CliConfig {
    fn api_base_url(&self) -> &str {
        self.api_base_url.as_deref().unwrap_or(DEFAULT_BASE_URL)
    }

    fn headers(&self) -> Vec<(String, String)> {
        let mut headers = default_headers();
        for (name, value) in &self.headers {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
            headers.push((name.clone(), value.clone()));
        }
        headers
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS))
    }

    fn engagement_method(&self) -> &str {
        self.engagement_method
            .as_deref()
            .unwrap_or(DEFAULT_ENGAGEMENT_METHOD)
    }

    fn concurrent_requests(&self) -> usize {
        self.concurrent_requests
            .unwrap_or(DEFAULT_CONCURRENT_REQUESTS)
    }

    fn output_format(&self) -> OutputFormat {
        self.output_format.unwrap_or_default()
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        crate::config::validate_provider(self)
    }
}

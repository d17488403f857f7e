use anyhow::{bail, Context, Result};
use clap::Parser;
use url::Url;

use crate::models::{query::MAX_PAGE_SIZE, DEFAULT_PAGE_SIZE};

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:8000";

/// Command-line flags. Each one falls back to an environment variable.
#[derive(Debug, Clone, Parser)]
#[command(name = "trpg-sessions", version, about = "Browse and edit TRPG session logs")]
pub struct Cli {
    /// Base URL of the session log API
    #[arg(long, env = "TRPG_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Sessions per page (12, 24, 36 or 60 in the page size picker)
    #[arg(long, env = "TRPG_PAGE_SIZE", default_value_t = DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Disable ANSI colours (also honoured through NO_COLOR)
    #[arg(long)]
    pub no_color: bool,

    /// Verbose logging (also enabled by TRPG_DEBUG=1)
    #[arg(long)]
    pub debug: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base: Url,
    pub page_size: u32,
    pub color: bool,
    pub debug: bool,
}

impl ClientConfig {
    /// Reads flags, environment fallbacks and the `NO_COLOR`/`TRPG_DEBUG` switches.
    pub fn load() -> Result<Self> {
        let mut config = Self::from_cli(Cli::parse())?;
        if std::env::var_os("NO_COLOR").is_some() {
            config.color = false;
        }
        if env_flag("TRPG_DEBUG") {
            config.debug = true;
        }
        Ok(config)
    }

    pub fn from_cli(cli: Cli) -> Result<Self> {
        let api_base = Url::parse(cli.api_base.trim())
            .with_context(|| format!("Invalid API base URL '{}'", cli.api_base))?;
        if !matches!(api_base.scheme(), "http" | "https") {
            bail!("API base URL must use http or https, got '{}'", api_base.scheme());
        }
        if cli.page_size == 0 || cli.page_size > MAX_PAGE_SIZE {
            bail!(
                "page size must be between 1 and {MAX_PAGE_SIZE}, got {}",
                cli.page_size
            );
        }

        Ok(Self {
            api_base,
            page_size: cli.page_size,
            color: !cli.no_color,
            debug: cli.debug,
        })
    }
}

fn env_flag(name: &str) -> bool {
    std::env::var(name)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

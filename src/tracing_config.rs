//! Opt-in tracing for the `gentype` binary.
//!
//! Nothing is installed unless `GENTYPE_LOG` (or `RUST_LOG`) is set. The
//! filter uses `RUST_LOG` syntax; `GENTYPE_LOG_FORMAT` picks the layout:
//!
//! | value  | output                                         |
//! |--------|------------------------------------------------|
//! | `text` | flat `fmt` lines (default)                     |
//! | `tree` | nested relation steps via `tracing-tree`       |
//! | `json` | one JSON object per event                      |
//!
//! ```bash
//! GENTYPE_LOG=trace GENTYPE_LOG_FORMAT=tree gentype subtype 'list[bool]' 'Sequence[int]'
//! GENTYPE_LOG="gentype_solver::registry=debug" gentype check '[1]' 'list[int]'
//! ```
//!
//! Events go to stderr; stdout carries only the verdict.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

const LOG_VAR: &str = "GENTYPE_LOG";
const LOG_FORMAT_VAR: &str = "GENTYPE_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Tree,
    Json,
}

impl LogFormat {
    /// Unrecognised values fall back to `Text`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "tree" => Self::Tree,
            "json" => Self::Json,
            _ => Self::Text,
        }
    }
}

/// Where the filter directives come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterSource {
    /// Directives from `GENTYPE_LOG`.
    Directives(String),
    /// `GENTYPE_LOG` unset but `RUST_LOG` set.
    RustLog,
}

/// Tracing setup resolved from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracingSettings {
    pub filter: FilterSource,
    pub format: LogFormat,
}

impl TracingSettings {
    /// `None` when tracing was not requested.
    pub fn resolve(
        gentype_log: Option<String>,
        rust_log_set: bool,
        format: Option<&str>,
    ) -> Option<Self> {
        let filter = match gentype_log {
            Some(directives) => FilterSource::Directives(directives),
            None if rust_log_set => FilterSource::RustLog,
            None => return None,
        };
        Some(Self {
            filter,
            format: format.map_or(LogFormat::Text, LogFormat::parse),
        })
    }

    pub fn from_env() -> Option<Self> {
        let format = std::env::var(LOG_FORMAT_VAR).ok();
        Self::resolve(
            std::env::var(LOG_VAR).ok(),
            std::env::var_os("RUST_LOG").is_some(),
            format.as_deref(),
        )
    }

    fn env_filter(&self) -> EnvFilter {
        match &self.filter {
            FilterSource::Directives(directives) => EnvFilter::builder().parse_lossy(directives),
            FilterSource::RustLog => EnvFilter::from_default_env(),
        }
    }

    /// Install the global subscriber described by these settings.
    pub fn install(&self) {
        let filter = self.env_filter();
        let registry = Registry::default().with(filter);
        match self.format {
            LogFormat::Text => registry
                .with(fmt::layer().with_writer(std::io::stderr))
                .init(),
            LogFormat::Tree => registry
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_indent_lines(true)
                        .with_targets(true),
                )
                .init(),
            LogFormat::Json => registry
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init(),
        }
    }
}

/// Install tracing if the environment asks for it.
pub fn init_tracing() {
    if let Some(settings) = TracingSettings::from_env() {
        settings.install();
    }
}

//! Opt-in log output for the graph walkers.
//!
//! `QUALGRAPH_LOG` (or `RUST_LOG`) holds an `EnvFilter` directive;
//! `QUALGRAPH_LOG_FORMAT=tree` indents nested spans with `tracing-tree`,
//! anything else prints flat lines.
//!
//! ```bash
//! QUALGRAPH_LOG=qualgraph_solver::subtype=trace QUALGRAPH_LOG_FORMAT=tree cargo test
//! ```
//!
//! Library code never installs a subscriber; tests and hosts call
//! [`init_tracing`].

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

/// Line layout of the installed subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Flat,
    /// One indentation level per entered span, e.g. per subtype rule.
    Tree,
}

impl LogFormat {
    /// `tree` (any case) selects [`LogFormat::Tree`].
    pub fn parse(value: &str) -> Self {
        if value.eq_ignore_ascii_case("tree") {
            Self::Tree
        } else {
            Self::Flat
        }
    }
}

/// Filter directive and format read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    pub directive: String,
    pub format: LogFormat,
}

impl LogSettings {
    /// `None` when neither `QUALGRAPH_LOG` nor `RUST_LOG` is set.
    pub fn from_env() -> Option<Self> {
        let directive = std::env::var("QUALGRAPH_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .ok()?;
        let format = std::env::var("QUALGRAPH_LOG_FORMAT")
            .map(|value| LogFormat::parse(&value))
            .unwrap_or_default();
        Some(Self { directive, format })
    }

    /// Install a global subscriber writing to stderr. Returns `false` if one
    /// was already installed.
    pub fn install(&self) -> bool {
        let filter = EnvFilter::builder().parse_lossy(&self.directive);
        match self.format {
            LogFormat::Tree => {
                let layer = tracing_tree::HierarchicalLayer::new(2)
                    .with_indent_lines(true)
                    .with_targets(true)
                    .with_writer(std::io::stderr);
                Registry::default().with(filter).with(layer).try_init().is_ok()
            }
            LogFormat::Flat => {
                let layer = fmt::layer().with_target(true).with_writer(std::io::stderr);
                Registry::default().with(filter).with(layer).try_init().is_ok()
            }
        }
    }
}

/// Install logging if the environment asks for it. Repeated calls are
/// no-ops, so every test may call this.
pub fn init_tracing() {
    if let Some(settings) = LogSettings::from_env() {
        settings.install();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_format_names() {
        assert_eq!(LogFormat::parse("tree"), LogFormat::Tree);
        assert_eq!(LogFormat::parse("TREE"), LogFormat::Tree);
        assert_eq!(LogFormat::parse("text"), LogFormat::Flat);
        assert_eq!(LogFormat::parse(""), LogFormat::Flat);
    }

    #[test]
    fn default_format_is_flat() {
        assert_eq!(LogFormat::default(), LogFormat::Flat);
    }
}

//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

/// Pick the filter directives: a non-blank `RUST_LOG` wins over the config.
fn directives(config: &LogConfig, from_env: Option<String>) -> String {
    from_env
        .filter(|d| !d.trim().is_empty())
        .unwrap_or_else(|| config.filter.clone())
}

/// Build the filter. An unparsable `RUST_LOG` falls back to the configured directives.
#[must_use]
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    let from_env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    EnvFilter::try_new(directives(config, from_env))
        .unwrap_or_else(|_| EnvFilter::new(&config.filter))
}

/// Install the global subscriber, writing to stderr.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place and return false.
#[must_use]
pub fn init(config: &LogConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    if result.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    result.is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_filter_used_without_env() {
        let config = LogConfig::default();
        assert_eq!(directives(&config, None), "whosin=info");
        assert_eq!(directives(&config, Some("  ".to_string())), "whosin=info");
    }

    #[test]
    fn env_filter_overrides_config() {
        let config = LogConfig {
            filter: "whosin=warn".to_string(),
            json: false,
        };
        assert_eq!(
            directives(&config, Some("whosin=trace".to_string())),
            "whosin=trace"
        );
    }

    #[test]
    fn second_init_keeps_installed_subscriber() {
        let config = LogConfig::default();
        assert!(init(&config));
        assert!(!init(&LogConfig {
            json: true,
            ..config
        }));
    }
}

use crate::config::Config;
use crate::providers::Provider;
use clap::Args;

#[derive(Args, Clone, Default, Debug)]
pub struct CommonParams {
    /// Override the default story map provider
    #[arg(long, help = "Override the default story map provider", value_parser = available_providers_parser)]
    pub provider: Option<Provider>,
}

impl CommonParams {
    /// Provider from the command line, else the configured default
    pub fn resolve_provider(&self, config: &Config) -> Provider {
        self.provider
            .unwrap_or_else(|| config.default_provider())
    }
}

/// Validates that a provider name is available in the system
pub fn available_providers_parser(s: &str) -> Result<Provider, String> {
    s.parse::<Provider>().map_err(|_| {
        format!(
            "Invalid provider '{}'. Available providers: {}",
            s,
            Provider::all_names().join(", ")
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_provider_prefers_command_line() {
        let config = Config {
            default_provider: "gemini".to_string(),
            ..Config::default()
        };

        let common = CommonParams::default();
        assert_eq!(common.resolve_provider(&config), Provider::Gemini);

        let common = CommonParams {
            provider: Some(Provider::DeepSeek),
        };
        assert_eq!(common.resolve_provider(&config), Provider::DeepSeek);
    }

    #[test]
    fn test_available_providers_parser() {
        assert_eq!(available_providers_parser("mock"), Ok(Provider::Mock));
        let err = available_providers_parser("openai").expect_err("openai is not supported");
        assert!(err.contains("deepseek, gemini, mock"));
    }
}

use crate::cli::OutputFormat;
use crate::config::{Config, parse_additional_params};
use crate::export::{StoryMapSummary, render_outline, to_json, write_json};
use crate::orchestrator::StoryMapService;
use crate::providers::Provider;
use crate::ui;
use anyhow::{Result, anyhow};
use colored::Colorize;
use std::path::PathBuf;

/// Generate a story map and print or export it
pub async fn handle_generate_command(
    config: &Config,
    provider: Provider,
    description: &str,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    if description.trim().is_empty() {
        return Err(anyhow!("Product description must not be empty"));
    }

    let service = StoryMapService::new(config);
    if provider.is_live() && !service.is_configured(provider) {
        ui::print_warning(&format!(
            "{} has no API key; using built-in templates. Set {} or run 'story-mapper config --provider {} --api-key <KEY>'.",
            provider.display_name(),
            provider.api_key_env().unwrap_or_default(),
            provider
        ));
    }

    let spinner = ui::create_spinner(&format!(
        "Building story map with {}...",
        provider.display_name()
    ));
    let story_map = service
        .generate_story_map_tree(description, provider)
        .await;
    spinner.finish_and_clear();

    let summary = StoryMapSummary::from(&story_map);

    if let Some(path) = output {
        write_json(&story_map, &path)?;
        ui::print_success(&format!("Story map written to {}", path.display()));
        ui::print_info(&summary.to_string());
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", to_json(&story_map)?),
        OutputFormat::Text if ui::is_quiet_mode() => println!("{}", render_outline(&story_map)),
        OutputFormat::Text => {
            ui::print_bordered_content(&render_outline(&story_map));
            ui::print_info(&summary.to_string());
        }
    }

    Ok(())
}

/// Print every provider with its configuration state
pub fn handle_providers_command(config: &Config) {
    let service = StoryMapService::new(config);
    let default_provider = config.default_provider();

    println!("{}", "Providers".bright_magenta().bold());
    for status in service.list_providers() {
        let state = if status.configured {
            "configured".green()
        } else {
            "not configured".yellow()
        };
        let marker = if status.id == default_provider {
            " (default)".bright_cyan().to_string()
        } else {
            String::new()
        };
        println!(
            "  {:<10} {:<18} {}{}",
            status.id.name().bold(),
            status.display_name,
            state,
            marker
        );
    }
}

/// Requested configuration changes from the command line
#[derive(Debug, Default)]
pub struct ConfigChanges {
    pub provider: Option<Provider>,
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub max_tokens: Option<u32>,
    pub param: Option<Vec<String>>,
    pub mock_delay_ms: Option<u64>,
}

/// Apply changes to the configuration, saving if anything changed
pub fn handle_config_command(mut config: Config, changes: ConfigChanges) -> Result<()> {
    let changes_made = config.update(
        changes.provider,
        changes.api_key,
        changes.model,
        changes.base_url,
        changes.max_tokens,
        changes.param.as_deref().map(parse_additional_params),
        changes.mock_delay_ms,
    )?;

    if changes_made {
        config.save()?;
        ui::print_success("Configuration updated successfully.");
        println!();
    }

    print_configuration(&config);
    Ok(())
}

fn print_configuration(config: &Config) {
    println!("{}", "Current Configuration".bright_magenta().bold());
    println!(
        "  {} {}",
        "Default Provider:".bright_cyan(),
        config.default_provider().to_string().bold()
    );
    println!(
        "  {} {} ms",
        "Mock Delay:".bright_cyan(),
        config.mock_delay_ms
    );

    for provider in Provider::LIVE {
        let provider_config = config.provider_config(*provider);
        let key_state = if provider_config.has_api_key() {
            "set".green()
        } else {
            "not set".yellow()
        };

        println!();
        println!("  {}", provider.display_name().bright_magenta().bold());
        println!("    {} {}", "API Key:".bright_cyan(), key_state);
        println!(
            "    {} {}",
            "Model:".bright_cyan(),
            provider_config.effective_model(*provider)
        );
        println!(
            "    {} {}",
            "Base URL:".bright_cyan(),
            provider_config.effective_base_url(*provider)
        );
        println!(
            "    {} {}",
            "Max Tokens:".bright_cyan(),
            provider_config.effective_max_tokens(*provider)
        );
        if !provider_config.additional_params.is_empty() {
            println!("    {}", "Additional Parameters:".bright_cyan());
            let mut params: Vec<_> = provider_config.additional_params.iter().collect();
            params.sort();
            for (key, value) in params {
                println!("      {key}: {value}");
            }
        }
    }
}

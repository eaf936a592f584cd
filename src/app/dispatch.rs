use crate::app::status::render_status;
use crate::cli::commands::{Cli, Commands};
use anyhow::{Context, Result, bail};
use pitch_cleanup::config::Config;
use pitch_cleanup::pitch::{
    CleanupOutputOptions, CleanupRequest, format_pitch_for_query, load_pitch,
};
use pitch_cleanup::providers::{ProviderOptions, SUPPORTED_PROVIDERS, create_provider};
use std::path::PathBuf;
use tracing::info;

struct CleanupParams {
    input: PathBuf,
    output: Option<PathBuf>,
    markdown: Option<PathBuf>,
    provider: Option<String>,
    model: Option<String>,
    temperature: Option<f64>,
    base_url: Option<String>,
    api_key: Option<String>,
    system_prompt_file: Option<PathBuf>,
    no_metadata: bool,
    with_system_prompt: bool,
    with_user_prompt: bool,
}

/// Run one cleanup:
///
/// 1. Builds the provider from CLI flags, falling back to config.
/// 2. Loads the pitch and renders it as the user prompt.
/// 3. Executes the schema-constrained call.
/// 4. Persists the record and/or Markdown, then prints both.
async fn run_cleanup(config: &Config, params: CleanupParams) -> Result<()> {
    let provider_name = params
        .provider
        .as_deref()
        .unwrap_or(&config.default_provider);
    let temperature = params.temperature.unwrap_or(config.default_temperature);
    if !(0.0..=2.0).contains(&temperature) {
        bail!("Temperature must be between 0.0 and 2.0, got {temperature}");
    }

    let options = ProviderOptions {
        api_key: params.api_key.or_else(|| config.api_key.clone()),
        base_url: params.base_url.or_else(|| config.provider_base_url.clone()),
        model: params
            .model
            .unwrap_or_else(|| config.default_model.clone()),
        temperature,
    };
    let provider = create_provider(provider_name, &options)?;

    let pitch = load_pitch(&params.input)
        .with_context(|| format!("Failed to load pitch from {}", params.input.display()))?;
    let query = format_pitch_for_query(&pitch);

    let mut request = CleanupRequest::new();
    if let Some(path) = &params.system_prompt_file {
        let prompt = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read system prompt {}", path.display()))?;
        request = request.with_system_prompt(prompt);
    }

    info!(
        provider = provider_name,
        model = options.model.as_str(),
        "Cleaning up pitch"
    );
    let result = request.execute(provider.as_ref(), &query).await?;

    if let Some(path) = &params.output {
        result
            .save_raw(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Saved raw response");
    }
    if let Some(path) = &params.markdown {
        result
            .save_markdown(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "Saved final markdown");
    }

    let mut print_options = CleanupOutputOptions::from(&config.output);
    if params.no_metadata {
        print_options.include_metadata = false;
    }
    print_options.include_system_prompt |= params.with_system_prompt;
    print_options.include_user_prompt |= params.with_user_prompt;

    println!("Response:");
    println!("{}", serde_json::to_string_pretty(&result.to_map(print_options))?);
    println!("\n\nMarkdown:\n{}", result.final_markdown());
    Ok(())
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    match cli.command {
        Commands::Cleanup {
            input,
            output,
            markdown,
            provider,
            model,
            temperature,
            base_url,
            api_key,
            system_prompt_file,
            no_metadata,
            with_system_prompt,
            with_user_prompt,
        } => {
            run_cleanup(
                &config,
                CleanupParams {
                    input,
                    output,
                    markdown,
                    provider,
                    model,
                    temperature,
                    base_url,
                    api_key,
                    system_prompt_file,
                    no_metadata,
                    with_system_prompt,
                    with_user_prompt,
                },
            )
            .await
        }

        Commands::Providers => {
            for (name, summary) in SUPPORTED_PROVIDERS {
                println!("{name:<12} {summary}");
            }
            Ok(())
        }

        Commands::Status => {
            println!("{}", render_status(&config));
            Ok(())
        }
    }
}

use pitch_cleanup::config::Config;

pub fn render_status(config: &Config) -> String {
    [
        "◆ pitch-cleanup status".to_string(),
        String::new(),
        format!("Version     {}", env!("CARGO_PKG_VERSION")),
        format!("Config      {}", config.config_path.display()),
        String::new(),
        format!("  Provider      {}", config.default_provider),
        format!("   Model         {}", config.default_model),
        format!("   Temperature   {:.2}", config.default_temperature),
        format!(
            "   Endpoint      {}",
            config.provider_base_url.as_deref().unwrap_or("(provider default)")
        ),
        format!(
            "   API key       {}",
            config.api_key.as_deref().map_or_else(|| "(not set)".to_string(), mask_secret)
        ),
        String::new(),
        format!("  Log level     {}", config.observability.log_level),
        format!(
            "  Stdout keys   metadata={} system_prompt={} user_prompt={}",
            config.output.include_metadata,
            config.output.include_system_prompt,
            config.output.include_user_prompt
        ),
    ]
    .join("\n")
}

fn mask_secret(secret: &str) -> String {
    let visible: String = secret.chars().take(4).collect();
    if secret.chars().count() <= 8 {
        "****".to_string()
    } else {
        format!("{visible}****")
    }
}

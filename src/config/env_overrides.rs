use super::Config;

impl Config {
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|name| std::env::var(name).ok());
    }

    fn apply_overrides_from(&mut self, var: impl Fn(&str) -> Option<String>) {
        let non_empty = |name: &str| var(name).filter(|v| !v.trim().is_empty());

        if let Some(key) = non_empty("PITCH_CLEANUP_API_KEY").or_else(|| non_empty("API_KEY")) {
            self.api_key = Some(key);
        }

        if let Some(provider) = non_empty("PITCH_CLEANUP_PROVIDER") {
            self.default_provider = provider;
        }

        if let Some(model) = non_empty("PITCH_CLEANUP_MODEL") {
            self.default_model = model;
        }

        if let Some(url) = non_empty("PITCH_CLEANUP_BASE_URL") {
            self.provider_base_url = Some(url);
        }

        if let Some(temp) = non_empty("PITCH_CLEANUP_TEMPERATURE")
            .and_then(|s| s.parse::<f64>().ok())
            .filter(|t| (0.0..=2.0).contains(t))
        {
            self.default_temperature = temp;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn apply(vars: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        let mut config = Config::default();
        config.apply_overrides_from(|name| vars.get(name).cloned());
        config
    }

    #[test]
    fn no_vars_leaves_defaults() {
        let config = apply(&[]);
        assert_eq!(config.default_provider, "ollama");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn prefixed_api_key_wins_over_generic() {
        let config = apply(&[("PITCH_CLEANUP_API_KEY", "sk-a"), ("API_KEY", "sk-b")]);
        assert_eq!(config.api_key.as_deref(), Some("sk-a"));
    }

    #[test]
    fn generic_api_key_is_fallback() {
        let config = apply(&[("API_KEY", "sk-b")]);
        assert_eq!(config.api_key.as_deref(), Some("sk-b"));
    }

    #[test]
    fn provider_model_and_url_override() {
        let config = apply(&[
            ("PITCH_CLEANUP_PROVIDER", "groq"),
            ("PITCH_CLEANUP_MODEL", "llama-3.3-70b"),
            ("PITCH_CLEANUP_BASE_URL", "http://proxy:8080/v1"),
        ]);
        assert_eq!(config.default_provider, "groq");
        assert_eq!(config.default_model, "llama-3.3-70b");
        assert_eq!(config.provider_base_url.as_deref(), Some("http://proxy:8080/v1"));
    }

    #[test]
    fn empty_values_are_ignored() {
        let config = apply(&[("PITCH_CLEANUP_PROVIDER", "  ")]);
        assert_eq!(config.default_provider, "ollama");
    }

    #[test]
    fn temperature_out_of_range_is_ignored() {
        let in_range = apply(&[("PITCH_CLEANUP_TEMPERATURE", "1.5")]);
        assert!((in_range.default_temperature - 1.5).abs() < f64::EPSILON);

        let too_hot = apply(&[("PITCH_CLEANUP_TEMPERATURE", "9")]);
        assert!(too_hot.default_temperature.abs() < f64::EPSILON);

        let not_a_number = apply(&[("PITCH_CLEANUP_TEMPERATURE", "hot")]);
        assert!(not_a_number.default_temperature.abs() < f64::EPSILON);
    }
}

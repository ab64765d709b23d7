use sv_config::StackviewConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &StackviewConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &StackviewConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let defaults = StackviewConfig::default();

    let mut warnings = Vec::new();

    if config.api.base_url == defaults.api.base_url && has_single_underscore(&env_keys, "API") {
        warnings.push(
            "API config appears default while STACKVIEW_API_* env vars exist. Use double underscores (example: STACKVIEW_API__BASE_URL)."
                .to_string(),
        );
    }

    if config.general.default_user_id.is_none() && has_single_underscore(&env_keys, "GENERAL") {
        warnings.push(
            "General config appears default while STACKVIEW_GENERAL_* env vars exist. Use double underscores (example: STACKVIEW_GENERAL__DEFAULT_USER_ID)."
                .to_string(),
        );
    }

    warnings
}

/// `STACKVIEW_<SECTION>_X` present without the `__` separator.
fn has_single_underscore(keys: &[String], section: &str) -> bool {
    let prefix = format!("STACKVIEW_{section}_");
    let nested = format!("STACKVIEW_{section}__");
    keys.iter()
        .any(|key| key.starts_with(&prefix) && !key.starts_with(&nested))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env(keys: &[&str]) -> Vec<(String, String)> {
        keys.iter()
            .map(|key| ((*key).to_string(), String::from("x")))
            .collect()
    }

    #[test]
    fn warns_on_single_underscore_api_key() {
        let warnings = collect_unconfigured_warnings(
            &StackviewConfig::default(),
            env(&["STACKVIEW_API_BASE_URL"]),
        );
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("STACKVIEW_API__BASE_URL"));
    }

    #[test]
    fn nested_keys_do_not_warn() {
        let warnings = collect_unconfigured_warnings(
            &StackviewConfig::default(),
            env(&["STACKVIEW_API__BASE_URL", "STACKVIEW_GENERAL__DEFAULT_USER_ID"]),
        );
        assert!(warnings.is_empty());
    }

    #[test]
    fn warns_on_single_underscore_general_key() {
        let warnings = collect_unconfigured_warnings(
            &StackviewConfig::default(),
            env(&["STACKVIEW_GENERAL_DEFAULT_USER_ID"]),
        );
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("General config"));
    }
}

//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;
use sv_config::{ConfigError, StackviewConfig};

#[test]
fn loads_api_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "https://qa.example.com/api/"
timeout_secs = 90
user_agent = "sv-test"
"#,
        )?;

        let config: StackviewConfig = Figment::from(Serialized::defaults(StackviewConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.api.base_url, "https://qa.example.com/api/");
        assert_eq!(config.api.normalized_base_url(), "https://qa.example.com/api");
        assert_eq!(config.api.timeout_secs, 90);
        assert_eq!(config.api.user_agent, "sv-test");
        assert!(config.validate().is_ok());
        Ok(())
    });
}

#[test]
fn loads_general_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
default_user_id = 7
default_limit = 5
demo_user_name = "Guest"
demo_user_email = "guest@example.com"
"#,
        )?;

        let config: StackviewConfig = Figment::from(Serialized::defaults(StackviewConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.general.default_user_id, Some(7));
        assert_eq!(config.general.default_limit, 5);
        assert_eq!(config.general.demo_user_name, "Guest");
        assert_eq!(config.general.demo_user_email, "guest@example.com");
        // Untouched section keeps defaults.
        assert_eq!(config.api.timeout_secs, 30);
        Ok(())
    });
}

#[test]
fn project_file_is_picked_up_by_figment_chain() {
    Jail::expect_with(|jail| {
        jail.create_dir(".stackview")?;
        jail.create_file(
            ".stackview/config.toml",
            r#"
[api]
base_url = "http://10.0.0.5:4000/api"
"#,
        )?;

        let config = StackviewConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, "http://10.0.0.5:4000/api");
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[api]
base_url = "http://from-toml/api"
"#,
        )?;
        jail.set_env("STACKVIEW_API__BASE_URL", "http://from-env/api");

        let config: StackviewConfig = Figment::from(Serialized::defaults(StackviewConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("STACKVIEW_").split("__"))
            .extract()?;

        assert_eq!(config.api.base_url, "http://from-env/api");
        Ok(())
    });
}

#[test]
fn invalid_base_url_fails_validation_on_load() {
    Jail::expect_with(|jail| {
        jail.set_env("STACKVIEW_API__BASE_URL", "localhost:4000");

        let err = StackviewConfig::load().expect_err("should reject");
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "api.base_url"));
        Ok(())
    });
}

#[test]
fn malformed_toml_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.create_dir(".stackview")?;
        jail.create_file(".stackview/config.toml", "[api\nbase_url = ")?;

        let err = StackviewConfig::load().expect_err("should fail");
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}

use figment::Jail;
use sv_config::StackviewConfig;

#[test]
fn nested_env_vars_fill_config_values() {
    Jail::expect_with(|jail| {
        jail.set_env("STACKVIEW_API__TIMEOUT_SECS", "5");
        jail.set_env("STACKVIEW_GENERAL__DEFAULT_USER_ID", "12");

        let config = StackviewConfig::load().expect("config loads");
        assert_eq!(config.api.timeout_secs, 5);
        assert_eq!(config.general.default_user_id, Some(12));
        Ok(())
    });
}

#[test]
fn single_underscore_does_not_nest() {
    Jail::expect_with(|jail| {
        jail.set_env("STACKVIEW_API_BASE_URL", "http://ignored/api");

        let config = StackviewConfig::load().expect("config loads");
        assert_eq!(config.api.base_url, sv_config::DEFAULT_BASE_URL);
        Ok(())
    });
}

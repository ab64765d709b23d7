//! General application configuration.

use serde::{Deserialize, Serialize};

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

fn default_demo_user_name() -> String {
    String::from("Demo User")
}

fn default_demo_user_email() -> String {
    String::from("demo@example.com")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// User searches are attributed to when `--user` is not given.
    /// When unset, the first user on the server is used.
    #[serde(default)]
    pub default_user_id: Option<i64>,

    /// Default result limit for list/search commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Name of the user created when the server has none.
    #[serde(default = "default_demo_user_name")]
    pub demo_user_name: String,

    /// Email of the user created when the server has none.
    #[serde(default = "default_demo_user_email")]
    pub demo_user_email: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_user_id: None,
            default_limit: default_limit(),
            demo_user_name: default_demo_user_name(),
            demo_user_email: default_demo_user_email(),
        }
    }
}

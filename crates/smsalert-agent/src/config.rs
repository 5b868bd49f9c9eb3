use serde::Deserialize;
use smsalert_notify::gateway::GatewaySettings;

#[derive(Debug, Deserialize)]
pub struct AgentConfig {
    /// Registered alarm callback type
    #[serde(default = "default_plugin")]
    pub plugin: String,
    #[serde(default)]
    pub gateway: GatewaySettings,
    /// Raw callback configuration, handed to `initialize` unchanged
    pub alarm: serde_json::Value,
}

fn default_plugin() -> String {
    "clickatell".to_string()
}

impl AgentConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn load_reads_alarm_table_and_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[gateway]
timeout_secs = 10

[alarm]
auth_token = "secret"
recipients = "4191234567, 4191234568"
fields = "<source>, <message>"
max_length = 160
"#
        )
        .unwrap();

        let config = AgentConfig::load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(config.plugin, "clickatell");
        assert_eq!(config.gateway.timeout_secs, 10);
        assert_eq!(config.gateway.send_attempts, 1);
        assert_eq!(config.gateway.base_url, "https://api.clickatell.com/rest");
        assert_eq!(config.alarm["recipients"], "4191234567, 4191234568");
        assert_eq!(config.alarm["max_length"], 160);
    }

    #[test]
    fn load_requires_alarm_table() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "plugin = \"clickatell\"\n").unwrap();
        assert!(AgentConfig::load(file.path().to_str().unwrap()).is_err());
    }
}

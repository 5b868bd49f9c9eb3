use crate::alarm::ClickatellAlarm;
use crate::gateway::clickatell::ClickatellClient;
use crate::gateway::GatewaySettings;
use crate::AlarmCallback;
use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

/// Descriptive data a host shows for an installed plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PluginMetadata {
    pub unique_id: &'static str,
    pub name: &'static str,
    pub author: &'static str,
    pub url: &'static str,
    pub version: &'static str,
    pub description: &'static str,
    /// Minimum host version the plugin runs on
    pub required_version: &'static str,
}

pub const CLICKATELL_METADATA: PluginMetadata = PluginMetadata {
    unique_id: "smsalert.notify.clickatell",
    name: "Clickatell SMS AlarmCallback",
    author: "smsalert contributors",
    url: "https://www.clickatell.com",
    version: "1.0.0",
    description: "Sends short messages (SMS) for triggered alerts via Clickatell",
    required_version: "1.0.0",
};

/// Factory for [`AlarmCallback`] instances.
///
/// Each plugin is registered in the [`PluginRegistry`] by its `name()`.
pub trait AlarmCallbackPlugin: Send + Sync {
    /// Returns the plugin type name (e.g., `"clickatell"`).
    fn name(&self) -> &str;

    fn metadata(&self) -> &PluginMetadata;

    /// Creates an uninitialized callback whose gateway client uses `settings`.
    fn create_callback(&self, settings: &GatewaySettings) -> Result<Box<dyn AlarmCallback>>;
}

pub struct ClickatellPlugin;

impl AlarmCallbackPlugin for ClickatellPlugin {
    fn name(&self) -> &str {
        "clickatell"
    }

    fn metadata(&self) -> &PluginMetadata {
        &CLICKATELL_METADATA
    }

    fn create_callback(&self, settings: &GatewaySettings) -> Result<Box<dyn AlarmCallback>> {
        let client = ClickatellClient::new(settings)
            .map_err(|e| anyhow::anyhow!("Failed to build clickatell client: {e}"))?;
        Ok(Box::new(ClickatellAlarm::new(Arc::new(client), settings.send_attempts)))
    }
}

/// Registry of available [`AlarmCallbackPlugin`]s.
///
/// # Examples
///
/// ```
/// use smsalert_notify::plugin::PluginRegistry;
///
/// let registry = PluginRegistry::default();
/// assert!(registry.has_plugin("clickatell"));
/// assert!(!registry.has_plugin("nonexistent"));
/// ```
pub struct PluginRegistry {
    plugins: HashMap<String, Box<dyn AlarmCallbackPlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self {
            plugins: HashMap::new(),
        }
    }

    pub fn register(&mut self, plugin: Box<dyn AlarmCallbackPlugin>) {
        let name = plugin.name().to_string();
        self.plugins.insert(name, plugin);
    }

    pub fn create_callback(
        &self,
        type_name: &str,
        settings: &GatewaySettings,
    ) -> Result<Box<dyn AlarmCallback>> {
        let plugin = self
            .plugins
            .get(type_name)
            .ok_or_else(|| anyhow::anyhow!("Unknown alarm callback plugin type: {type_name}"))?;
        plugin.create_callback(settings)
    }

    pub fn get_plugin(&self, type_name: &str) -> Option<&dyn AlarmCallbackPlugin> {
        self.plugins.get(type_name).map(|p| p.as_ref())
    }

    pub fn has_plugin(&self, type_name: &str) -> bool {
        self.plugins.contains_key(type_name)
    }

    pub fn plugin_names(&self) -> Vec<&str> {
        self.plugins.keys().map(|s| s.as_str()).collect()
    }
}

impl Default for PluginRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(ClickatellPlugin));
        registry
    }
}

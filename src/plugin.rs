use crate::actions::Action;
use crate::launcher::ActionVerb;
use crate::session::CancelToken;
use crate::settings::Settings;

pub trait Plugin: Send + Sync {
    /// Return actions based on the query string
    fn search(&self, query: &str, cancel: &CancelToken) -> Vec<Action>;
    /// Name of the plugin
    fn name(&self) -> &str;
    /// Short description shown in the plugin list
    fn description(&self) -> &str;
    fn capabilities(&self) -> &[&str];
    /// Entry points registered in the host catalog
    fn commands(&self) -> Vec<Action> {
        Vec::new()
    }
    /// Perform the side effect of a chosen action
    fn execute(&self, action: &Action, verb: ActionVerb) -> anyhow::Result<()>;
    fn default_settings(&self) -> Option<serde_json::Value> {
        None
    }
    fn apply_settings(&mut self, _value: &serde_json::Value) {}
}

/// A manager that holds plugins
pub struct PluginManager {
    plugins: Vec<Box<dyn Plugin>>,
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new()
    }
}

impl PluginManager {
    pub fn new() -> Self {
        Self { plugins: Vec::new() }
    }

    pub fn register(&mut self, plugin: Box<dyn Plugin>) {
        tracing::debug!(plugin = plugin.name(), "registering plugin");
        self.plugins.push(plugin);
    }

    /// Register `plugin` if it is enabled in `settings`, applying its stored
    /// settings first.
    pub fn register_with_settings(&mut self, mut plugin: Box<dyn Plugin>, settings: &Settings) {
        if !settings.plugin_enabled(plugin.name()) {
            tracing::info!(plugin = plugin.name(), "plugin disabled in settings");
            return;
        }
        if let Some(value) = settings.plugin_settings.get(plugin.name()) {
            plugin.apply_settings(value);
        }
        self.register(plugin);
    }

    pub fn plugin_names(&self) -> Vec<String> {
        self.plugins.iter().map(|p| p.name().to_string()).collect()
    }

    /// Catalog entries of every registered plugin.
    pub fn commands(&self) -> Vec<(String, Action)> {
        self.plugins
            .iter()
            .flat_map(|p| {
                let name = p.name().to_string();
                p.commands().into_iter().map(move |a| (name.clone(), a))
            })
            .collect()
    }

    /// Results tagged with the name of the plugin that produced them.
    pub fn search(&self, query: &str, cancel: &CancelToken) -> Vec<(String, Action)> {
        let mut actions = Vec::new();
        for p in &self.plugins {
            if cancel.is_cancelled() {
                break;
            }
            let name = p.name().to_string();
            actions.extend(p.search(query, cancel).into_iter().map(|a| (name.clone(), a)));
        }
        actions
    }

    pub fn execute(&self, plugin: &str, action: &Action, verb: ActionVerb) -> anyhow::Result<()> {
        let Some(p) = self.plugins.iter().find(|p| p.name() == plugin) else {
            anyhow::bail!("unknown plugin '{plugin}'");
        };
        p.execute(action, verb)
    }
}

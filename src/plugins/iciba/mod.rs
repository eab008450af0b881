//! Word lookups against the iciba.com dictionary.
//!
//! Queries of the form `iciba <word>` are sent to the `getWordMean` endpoint
//! and every (pronunciation, part of speech) pair in the answer becomes one
//! result. Results open the word's dictionary page, optionally in a private
//! browser session.

pub mod client;
pub mod error;
pub mod response;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::actions::{Action, ActionKind, ActionTarget};
use crate::common::strip_prefix_ci;
use crate::launcher::{launch_action, ActionVerb, SystemOpener, UrlOpener};
use crate::plugin::Plugin;
use crate::session::CancelToken;

use client::{HttpTransport, IcibaClient, ReqwestTransport};
use response::{parse_word_means, Definition, WordMeans};

pub use error::LookupError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IcibaSettings {
    /// Query prefix that routes input to this plugin.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Base of the per-word dictionary pages.
    #[serde(default = "default_page_url")]
    pub page_url: String,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Delay before a request is issued, giving newer keystrokes a chance to
    /// supersede it.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub browser_cmd: Option<String>,
    #[serde(default = "default_private_browser_cmd")]
    pub private_browser_cmd: Option<String>,
    /// Show an error item when the API answers without any definitions.
    #[serde(default)]
    pub report_missing: bool,
}

fn default_prefix() -> String {
    "iciba".into()
}

fn default_api_url() -> String {
    client::DEFAULT_API_URL.into()
}

fn default_page_url() -> String {
    client::DEFAULT_PAGE_URL.into()
}

fn default_user_agent() -> String {
    client::DEFAULT_USER_AGENT.into()
}

fn default_debounce_ms() -> u64 {
    500
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_private_browser_cmd() -> Option<String> {
    Some("firefox --private-window".into())
}

impl Default for IcibaSettings {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            api_url: default_api_url(),
            page_url: default_page_url(),
            user_agent: default_user_agent(),
            debounce_ms: default_debounce_ms(),
            timeout_secs: default_timeout_secs(),
            browser_cmd: None,
            private_browser_cmd: default_private_browser_cmd(),
            report_missing: false,
        }
    }
}

impl IcibaSettings {
    fn opener(&self) -> SystemOpener {
        SystemOpener {
            browser_cmd: self.browser_cmd.clone(),
            private_browser_cmd: self.private_browser_cmd.clone(),
        }
    }
}

pub struct IcibaPlugin {
    settings: IcibaSettings,
    client: IcibaClient,
    transport: Arc<dyn HttpTransport>,
    opener: Arc<dyn UrlOpener>,
    /// Transport and opener were built from settings and follow them.
    system_io: bool,
}

impl IcibaPlugin {
    /// Plugin talking to the network and opening the desktop browser.
    pub fn new(settings: IcibaSettings) -> anyhow::Result<Self> {
        let transport: Arc<dyn HttpTransport> = Arc::new(ReqwestTransport::new(
            Duration::from_secs(settings.timeout_secs),
        )?);
        let opener: Arc<dyn UrlOpener> = Arc::new(settings.opener());
        let mut plugin = Self::with_io(settings, transport, opener);
        plugin.system_io = true;
        Ok(plugin)
    }

    pub fn with_io(
        settings: IcibaSettings,
        transport: Arc<dyn HttpTransport>,
        opener: Arc<dyn UrlOpener>,
    ) -> Self {
        let client = build_client(&settings, transport.clone());
        Self {
            settings,
            client,
            transport,
            opener,
            system_io: false,
        }
    }

    pub fn settings(&self) -> &IcibaSettings {
        &self.settings
    }

    /// Look up `word` and render the outcome as result items.
    pub fn lookup(&self, word: &str, cancel: &CancelToken) -> Vec<Action> {
        if cancel.wait(Duration::from_millis(self.settings.debounce_ms)) {
            return Vec::new();
        }

        let body = match self.client.fetch(word, cancel) {
            Ok(Some(body)) => body,
            Ok(None) => return Vec::new(),
            Err(e) => {
                tracing::warn!(word, error = %e, "iciba request failed");
                return vec![e.to_action(word)];
            }
        };
        if cancel.is_cancelled() {
            return Vec::new();
        }

        match parse_word_means(&body) {
            Ok(WordMeans::Found(defs)) => defs.iter().map(|d| self.definition_action(word, d)).collect(),
            Ok(WordMeans::NoSymbols) if self.settings.report_missing => {
                vec![Action::error("No definitions found", word)]
            }
            Ok(WordMeans::NoSymbols) => Vec::new(),
            Err(e) => {
                tracing::warn!(word, error = %e, "iciba lookup failed");
                vec![e.to_action(word)]
            }
        }
    }

    fn definition_action(&self, word: &str, def: &Definition) -> Action {
        let label = def.label();
        Action {
            desc: def.description(),
            kind: ActionKind::Definition,
            target: ActionTarget::Url {
                url: self.client.page_url(word),
                label: label.clone(),
            },
            label,
        }
    }
}

fn build_client(settings: &IcibaSettings, transport: Arc<dyn HttpTransport>) -> IcibaClient {
    IcibaClient::new(
        transport,
        settings.api_url.clone(),
        settings.page_url.clone(),
        settings.user_agent.clone(),
    )
}

impl Plugin for IcibaPlugin {
    fn search(&self, query: &str, cancel: &CancelToken) -> Vec<Action> {
        let prefix = format!("{} ", self.settings.prefix);
        let Some(rest) = strip_prefix_ci(query.trim_start(), &prefix) else {
            return Vec::new();
        };
        let word = rest.trim();
        if word.is_empty() {
            return Vec::new();
        }
        self.lookup(word, cancel)
    }

    fn name(&self) -> &str {
        "iciba"
    }

    fn description(&self) -> &str {
        "Look up words on iciba.com (prefix: `iciba`)"
    }

    fn capabilities(&self) -> &[&str] {
        &["search", "browse", "browse_private"]
    }

    fn commands(&self) -> Vec<Action> {
        let prefix = &self.settings.prefix;
        vec![Action::command(
            prefix.as_str(),
            "Lookup on iciba.com",
            format!("{prefix} "),
        )]
    }

    fn execute(&self, action: &Action, verb: ActionVerb) -> anyhow::Result<()> {
        launch_action(action, verb, self.opener.as_ref())
    }

    fn default_settings(&self) -> Option<serde_json::Value> {
        serde_json::to_value(&self.settings).ok()
    }

    fn apply_settings(&mut self, value: &serde_json::Value) {
        let settings = match serde_json::from_value::<IcibaSettings>(value.clone()) {
            Ok(s) => s,
            Err(e) => {
                tracing::error!("invalid iciba settings: {e}");
                return;
            }
        };
        if self.system_io {
            match ReqwestTransport::new(Duration::from_secs(settings.timeout_secs)) {
                Ok(t) => self.transport = Arc::new(t),
                Err(e) => tracing::error!("failed to rebuild http client: {e}"),
            }
            self.opener = Arc::new(settings.opener());
        }
        self.client = build_client(&settings, self.transport.clone());
        self.settings = settings;
    }
}

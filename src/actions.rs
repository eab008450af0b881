use serde::{Deserialize, Serialize};

/// What an [`Action`] represents in the result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    /// Catalog entry point registered by a plugin.
    Command,
    /// A single dictionary definition.
    Definition,
    /// A failure rendered as a result item.
    Error,
}

/// Payload carried by an [`Action`] and interpreted when it is executed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ActionTarget {
    /// Replace the host's query text with `query`.
    Fill { query: String },
    /// A browsable page.
    Url { url: String, label: String },
    None,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Action {
    pub label: String,
    pub desc: String,
    pub kind: ActionKind,
    pub target: ActionTarget,
}

impl Action {
    pub fn command(label: impl Into<String>, desc: impl Into<String>, fill: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            desc: desc.into(),
            kind: ActionKind::Command,
            target: ActionTarget::Fill { query: fill.into() },
        }
    }

    pub fn error(label: impl Into<String>, desc: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            desc: desc.into(),
            kind: ActionKind::Error,
            target: ActionTarget::None,
        }
    }

    /// URL embedded in the target, if any.
    pub fn url(&self) -> Option<&str> {
        match &self.target {
            ActionTarget::Url { url, .. } => Some(url),
            _ => None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == ActionKind::Error
    }
}

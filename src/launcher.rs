use std::process::Command;

use crate::actions::{Action, ActionTarget};

/// Secondary action chosen for a result item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActionVerb {
    /// Open in a normal browser session.
    #[default]
    Browse,
    /// Open in a private / incognito session.
    BrowsePrivate,
}

impl ActionVerb {
    pub fn is_private(self) -> bool {
        matches!(self, ActionVerb::BrowsePrivate)
    }
}

/// Opens URLs on behalf of the launcher.
pub trait UrlOpener: Send + Sync {
    fn open(&self, url: &str, private: bool) -> anyhow::Result<()>;
}

/// Opens URLs with the desktop's browser.
///
/// Normal sessions go through `browser_cmd` when configured and the OS
/// default handler otherwise. Private sessions need an explicit command since
/// there is no portable way to request one.
#[derive(Debug, Clone, Default)]
pub struct SystemOpener {
    pub browser_cmd: Option<String>,
    pub private_browser_cmd: Option<String>,
}

impl UrlOpener for SystemOpener {
    fn open(&self, url: &str, private: bool) -> anyhow::Result<()> {
        let cmd = if private {
            match self.private_browser_cmd.as_deref() {
                Some(c) => Some(c),
                None => anyhow::bail!("no private browser command configured"),
            }
        } else {
            self.browser_cmd.as_deref()
        };
        match cmd {
            Some(spec) => spawn_browser(spec, url),
            None => open::that(url).map_err(|e| e.into()),
        }
    }
}

/// Split a command spec into executable and arguments.
fn parse_command_spec(spec: &str) -> Option<(String, Vec<String>)> {
    let parts = shlex::split(spec)
        .unwrap_or_else(|| spec.split_whitespace().map(|s| s.to_string()).collect());
    let mut iter = parts.into_iter();
    let cmd = iter.next()?;
    Some((cmd, iter.collect()))
}

fn spawn_browser(spec: &str, url: &str) -> anyhow::Result<()> {
    let Some((cmd, args)) = parse_command_spec(spec) else {
        anyhow::bail!("empty browser command");
    };
    tracing::debug!(%cmd, ?args, %url, "spawning browser");
    Command::new(cmd)
        .args(args)
        .arg(url)
        .spawn()
        .map(|_| ())
        .map_err(|e| e.into())
}

/// Launch an [`Action`] with the chosen verb.
///
/// URL targets open the same page for every verb; only the private flag
/// passed to the opener differs. Fill and empty targets have no side effect
/// here since the host handles query filling itself.
pub fn launch_action(action: &Action, verb: ActionVerb, opener: &dyn UrlOpener) -> anyhow::Result<()> {
    match &action.target {
        ActionTarget::Url { url, .. } => {
            tracing::info!(%url, private = verb.is_private(), "opening dictionary page");
            opener.open(url, verb.is_private())
        }
        ActionTarget::Fill { query } => {
            tracing::debug!(%query, "fill action left to host");
            Ok(())
        }
        ActionTarget::None => {
            tracing::debug!(label = %action.label, "action has no target");
            Ok(())
        }
    }
}

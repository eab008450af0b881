use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use iciba_launcher::actions::Action;
use iciba_launcher::launcher::ActionVerb;
use iciba_launcher::logging;
use iciba_launcher::plugin::PluginManager;
use iciba_launcher::plugins::iciba::{IcibaPlugin, IcibaSettings};
use iciba_launcher::session::QuerySession;
use iciba_launcher::settings::Settings;

const SETTINGS_FILE: &str = "settings.json";

fn print_results(results: &[(String, Action)]) {
    if results.is_empty() {
        println!("  (no results)");
    }
    for (i, (_, a)) in results.iter().enumerate() {
        let marker = if a.is_error() { "!" } else { " " };
        println!("{marker}{i:>2}  {}\n      {}", a.label, a.desc);
    }
}

#[derive(Debug, PartialEq, Eq)]
enum HostCommand {
    Execute(ActionVerb, usize),
    /// `:open` / `:private` without a valid result index.
    Usage,
}

fn parse_command(line: &str) -> Option<HostCommand> {
    let (verb, rest) = if let Some(rest) = line.strip_prefix(":private") {
        (ActionVerb::BrowsePrivate, rest)
    } else if let Some(rest) = line.strip_prefix(":open") {
        (ActionVerb::Browse, rest)
    } else {
        return None;
    };
    Some(match rest.trim().parse() {
        Ok(i) => HostCommand::Execute(verb, i),
        Err(_) => HostCommand::Usage,
    })
}

fn main() -> anyhow::Result<()> {
    let settings = Settings::load(SETTINGS_FILE)?;
    logging::init(settings.debug_logging, settings.log_file.as_ref().map(PathBuf::from));

    let mut manager = PluginManager::new();
    manager.register_with_settings(Box::new(IcibaPlugin::new(IcibaSettings::default())?), &settings);
    tracing::info!(plugins = ?manager.plugin_names(), "launcher ready");

    println!("Commands:");
    for (_, cmd) in manager.commands() {
        println!("  {:<8} {}", cmd.label, cmd.desc);
    }
    println!("Type a query, `:open N`, `:private N` or `:quit`.");

    let mut session = QuerySession::new();
    let mut shown: Vec<(String, Action)> = Vec::new();
    let stdin = io::stdin();
    print!("> ");
    io::stdout().flush()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line == ":quit" {
            break;
        }
        if let Some(cmd) = parse_command(line) {
            let HostCommand::Execute(verb, idx) = cmd else {
                println!("  usage: `:open N` or `:private N`");
                print!("> ");
                io::stdout().flush()?;
                continue;
            };
            match shown.get(idx) {
                Some((plugin, action)) => {
                    if let Err(e) = manager.execute(plugin, action, verb) {
                        tracing::error!("failed to launch action: {e}");
                        println!("  error: {e}");
                    }
                }
                None => println!("  no result #{idx}"),
            }
        } else if let Some(token) = session.begin(line) {
            let results = manager.search(line, &token);
            let actions = results.iter().map(|(_, a)| a.clone()).collect();
            if session.finish(&token, actions) {
                shown = results;
                print_results(&shown);
            }
        } else {
            shown.clear();
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}

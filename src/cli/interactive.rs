use std::time::Duration;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::handlers::{open_session, print_back, print_outcome, print_state, runtime};
use crate::config::WizardConfig;
use crate::error::{BooklogError, Result};
use crate::options::{filter_options, Catalog, OptionSource};
use crate::preview::{Preview, PreviewProjector};
use crate::record::FieldPath;
use crate::validate::Step;
use crate::wizard::Wizard;

const HELP: &str = "\
Commands:
  set <path> <value>      Set a field (empty value clears text fields)
  quote add               Append an empty quote
  quote remove <index>    Remove a quote
  submit                  Validate this step and move on
  back                    Previous step
  goto <1-5>              Jump to a step
  options <catalog> [q]   List titles/authors matching q
  pick <catalog> <q>      Pick the first match into title/author
  show                    Print the record
  preview                 Print the preview now
  help                    This text
  quit                    Leave (the record stays saved)";

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ReplCommand {
    Set { path: FieldPath, value: String },
    QuoteAdd,
    QuoteRemove(usize),
    Submit,
    Back,
    Goto(Step),
    Options { catalog: Catalog, query: String },
    Pick { catalog: Catalog, query: String },
    Show,
    Preview,
    Help,
    Quit,
}

impl std::str::FromStr for ReplCommand {
    type Err = BooklogError;

    fn from_str(line: &str) -> std::result::Result<Self, Self::Err> {
        let unknown = || BooklogError::UnknownCommand(line.to_string());
        let (verb, rest) = split_word(line.trim());

        match verb {
            "set" => {
                let (path, value) = split_word(rest);
                if path.is_empty() {
                    return Err(unknown());
                }
                Ok(ReplCommand::Set {
                    path: path.parse()?,
                    value: unquote(value).to_string(),
                })
            }
            "quote" => match split_word(rest) {
                ("add", "") => Ok(ReplCommand::QuoteAdd),
                ("remove", index) => index
                    .parse()
                    .map(ReplCommand::QuoteRemove)
                    .map_err(|_| unknown()),
                _ => Err(unknown()),
            },
            "submit" | "next" => Ok(ReplCommand::Submit),
            "back" | "prev" => Ok(ReplCommand::Back),
            "goto" => Ok(ReplCommand::Goto(rest.parse()?)),
            "options" => {
                let (catalog, query) = split_word(rest);
                Ok(ReplCommand::Options {
                    catalog: catalog.parse()?,
                    query: unquote(query).to_string(),
                })
            }
            "pick" => {
                let (catalog, query) = split_word(rest);
                if query.is_empty() {
                    return Err(unknown());
                }
                Ok(ReplCommand::Pick {
                    catalog: catalog.parse()?,
                    query: unquote(query).to_string(),
                })
            }
            "show" => Ok(ReplCommand::Show),
            "preview" => Ok(ReplCommand::Preview),
            "help" | "?" => Ok(ReplCommand::Help),
            "quit" | "exit" | "q" => Ok(ReplCommand::Quit),
            _ => Err(unknown()),
        }
    }
}

fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

fn unquote(s: &str) -> &str {
    s.strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(s)
}

pub fn handle_interactive() -> Result<()> {
    let (config, wizard) = open_session()?;

    let rt = runtime()?;
    let result = rt.block_on(run(config, wizard));
    // A stdin read may still be parked on the blocking pool.
    rt.shutdown_timeout(Duration::from_millis(100));
    result
}

async fn run(config: WizardConfig, wizard: Wizard) -> Result<()> {
    let projector = PreviewProjector::new(wizard.record(), config.debounce())?;
    let mut feed = projector.feed();
    let mut wizard = wizard.with_preview(projector);

    println!("booklog: {} (type 'help' for commands)", wizard.route());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<ReplCommand>() {
                    Ok(ReplCommand::Quit) => break,
                    Ok(command) => {
                        if let Err(e) = apply(&mut wizard, &config, command).await {
                            println!("Error: {}", e);
                        }
                    }
                    Err(e) => println!("Error: {}", e),
                }
            }
            Some(preview) = feed.next() => print_preview(&preview),
        }
    }

    // Input ended while the preview was still settling; show where it lands.
    if wizard.preview().is_some_and(PreviewProjector::is_pending) {
        if let Some(preview) = feed.next().await {
            print_preview(&preview);
        }
    }
    debug!(route = %wizard.route(), "interactive session ended");
    Ok(())
}

async fn apply(wizard: &mut Wizard, config: &WizardConfig, command: ReplCommand) -> Result<()> {
    match command {
        ReplCommand::Set { path, value } => {
            let parsed = path.parse_input(&value)?;
            wizard.set_field(path, parsed)?;
        }
        ReplCommand::QuoteAdd => {
            wizard.add_quote();
            println!("Added quote {}", wizard.record().quotes.len() - 1);
        }
        ReplCommand::QuoteRemove(index) => {
            wizard.remove_quote(index)?;
            println!("Removed quote {}", index);
        }
        ReplCommand::Submit => print_outcome(&wizard.submit()),
        ReplCommand::Back => print_back(wizard.back()),
        ReplCommand::Goto(step) => {
            wizard.navigate(step);
            println!("Moved -> {}", wizard.route());
        }
        ReplCommand::Options { catalog, query } => {
            let source = catalog.source().with_latency(config.catalog_latency());
            let options = source.fetch_options().await?;
            for option in filter_options(&options, &query) {
                println!("{}\t{}", option.value, option.label);
            }
        }
        ReplCommand::Pick { catalog, query } => {
            let source = catalog.source().with_latency(config.catalog_latency());
            let options = source.fetch_options().await?;
            let option = filter_options(&options, &query)
                .into_iter()
                .next()
                .ok_or(BooklogError::NoMatchingOption(query))?;
            wizard.pick(catalog.bound_field(), option)?;
            println!("{} = {} ({})", catalog.bound_field(), option.value, option.label);
        }
        ReplCommand::Show => print_state(wizard),
        ReplCommand::Preview => print_preview(&Preview::from_record(wizard.record())),
        ReplCommand::Help => println!("{}", HELP),
        ReplCommand::Quit => {}
    }
    Ok(())
}

fn print_preview(preview: &Preview) {
    println!("--- preview ---");
    println!("{}", preview);
    println!("---------------");
}

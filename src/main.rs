use booklog::cli::{
    handle_back, handle_goto, handle_interactive, handle_options, handle_pick, handle_preview,
    handle_quote_add, handle_quote_remove, handle_reset, handle_set, handle_show, handle_submit,
    Cli, Commands, QuoteAction,
};
use clap::Parser;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = booklog::logging::init() {
        eprintln!("Warning: {}", e);
    }

    let result = match cli.command {
        Commands::Show { json } => handle_show(json),
        Commands::Set { path, value } => handle_set(path, value),
        Commands::Quote(quote_cmd) => match quote_cmd.action {
            QuoteAction::Add => handle_quote_add(),
            QuoteAction::Remove { index } => handle_quote_remove(index),
        },
        Commands::Submit => handle_submit(),
        Commands::Back => handle_back(),
        Commands::Goto { step } => handle_goto(step),
        Commands::Preview { json } => handle_preview(json),
        Commands::Options { catalog, query } => handle_options(catalog, query),
        Commands::Pick { catalog, query } => handle_pick(catalog, query),
        Commands::Reset => handle_reset(),
        Commands::Interactive => handle_interactive(),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

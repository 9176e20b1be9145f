use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "booklog")]
#[command(version, about = "Record a book you read, one validated step at a time")]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the current step and the record being edited
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set a field, e.g. `set title "해리포터"` or `set quotes.0.page 42`
    Set {
        /// Field path (title, author, status, publishedDate, startDate, endDate,
        /// recommended, rating, review, quotes, quotes.N.text, quotes.N.page,
        /// totalPages, isPublic)
        path: String,

        /// New value
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Add or remove quotes
    Quote(QuoteCommand),

    /// Validate the current step and move on if it passes
    Submit,

    /// Go back one step without validating
    Back,

    /// Jump to a step (1-5)
    Goto {
        /// Step number or name, e.g. "3" or "step3"
        step: String,
    },

    /// Show the debounced preview of the record
    Preview {
        /// Output the record as JSON
        #[arg(long)]
        json: bool,
    },

    /// List options for the title or author picker
    Options {
        /// Option catalog (titles, authors)
        catalog: String,

        /// Case-insensitive label filter
        query: Option<String>,
    },

    /// Pick the first option matching a query into the bound field
    Pick {
        /// Option catalog (titles, authors)
        catalog: String,

        /// Case-insensitive label filter
        query: String,
    },

    /// Forget the saved record and start over
    Reset,

    /// Edit interactively, with a live preview
    Interactive,
}

#[derive(Args, Debug)]
pub struct QuoteCommand {
    #[command(subcommand)]
    pub action: QuoteAction,
}

#[derive(Subcommand, Debug)]
pub enum QuoteAction {
    /// Append an empty quote
    Add,

    /// Remove a quote by index (the last remaining quote cannot be removed)
    Remove {
        /// Zero-based quote index
        index: usize,
    },
}

mod commands;
mod handlers;
mod interactive;

pub use commands::{Cli, Commands, QuoteAction, QuoteCommand};
pub use handlers::{
    handle_back, handle_goto, handle_options, handle_pick, handle_preview, handle_quote_add,
    handle_quote_remove, handle_reset, handle_set, handle_show, handle_submit,
};
pub use interactive::handle_interactive;

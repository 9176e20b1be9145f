use std::env;
use std::path::PathBuf;

use serde_json::json;

use crate::config::WizardConfig;
use crate::error::{BooklogError, Result};
use crate::options::{filter_options, Catalog, OptionSource, SelectOption};
use crate::preview::PreviewProjector;
use crate::record::FieldPath;
use crate::storage::{FileStorage, Persistence, BOOKLOG_DIR};
use crate::validate::Step;
use crate::wizard::{Route, SubmitOutcome, Wizard};

/// Find the project root by looking for .booklog/, falling back to the
/// current directory.
fn find_project_root() -> PathBuf {
    let cwd = env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    let mut current = cwd.as_path();
    loop {
        if current.join(BOOKLOG_DIR).is_dir() {
            return current.to_path_buf();
        }
        match current.parent() {
            Some(parent) => current = parent,
            None => return cwd,
        }
    }
}

/// Resume the saved session of the current project.
pub(crate) fn open_session() -> Result<(WizardConfig, Wizard)> {
    let storage = FileStorage::in_project(&find_project_root());
    let config = WizardConfig::load(storage.dir())?;
    storage.ensure_distinct(&config.record_key, &config.route_key)?;
    let wizard = Wizard::resume(Persistence::from_config(storage, &config));
    Ok((config, wizard))
}

pub(crate) fn runtime() -> Result<tokio::runtime::Runtime> {
    Ok(tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?)
}

pub(crate) fn print_state(wizard: &Wizard) {
    let record = wizard.record();
    println!("Route: {}", wizard.route());
    println!("  title:         {}", record.title);
    println!("  author:        {}", record.author);
    println!("  status:        {}", record.status);
    println!("  publishedDate: {}", record.published_date);
    println!("  startDate:     {}", record.start_date().unwrap_or_default());
    println!("  endDate:       {}", record.end_date().unwrap_or_default());
    println!("  recommended:   {}", record.recommended);
    println!("  rating:        {}", record.rating);
    println!("  review:        {}", record.review().unwrap_or_default());
    println!("  totalPages:    {}", record.total_pages);
    for (index, quote) in record.quotes.iter().enumerate() {
        let page = quote.page.map(|p| p.to_string()).unwrap_or_default();
        println!("  quotes.{}:      \"{}\" page {}", index, quote.text, page);
    }
    println!("  isPublic:      {}", record.is_public);
}

pub(crate) fn print_outcome(outcome: &SubmitOutcome) {
    match outcome {
        SubmitOutcome::Advanced(Route::Complete) => {
            println!("제출이 완료되었습니다. -> {}", Route::Complete);
        }
        SubmitOutcome::Advanced(route) => println!("Step accepted -> {}", route),
        SubmitOutcome::Rejected {
            step,
            errors,
            focus,
        } => {
            println!("{} has errors:", step);
            for error in errors {
                println!("  {}", error);
            }
            if let Some(focus) = focus {
                println!("Focus: {}", focus);
            }
        }
    }
}

pub(crate) fn print_back(route: Option<Route>) {
    match route {
        Some(route) => println!("Moved back -> {}", route),
        None => println!("There is no previous step"),
    }
}

pub fn handle_show(json: bool) -> Result<()> {
    let (_config, wizard) = open_session()?;

    if json {
        let state = json!({
            "route": wizard.route().to_string(),
            "record": wizard.record(),
        });
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        print_state(&wizard);
    }

    Ok(())
}

pub fn handle_set(path: String, value: String) -> Result<()> {
    let (_config, mut wizard) = open_session()?;

    let path: FieldPath = path.parse()?;
    let parsed = path.parse_input(&value)?;
    wizard.set_field(path, parsed)?;

    println!("Set {}", path);
    Ok(())
}

pub fn handle_quote_add() -> Result<()> {
    let (_config, mut wizard) = open_session()?;
    wizard.add_quote();
    println!("Added quote {}", wizard.record().quotes.len() - 1);
    Ok(())
}

pub fn handle_quote_remove(index: usize) -> Result<()> {
    let (_config, mut wizard) = open_session()?;
    let removed = wizard.remove_quote(index)?;
    println!("Removed quote {} (\"{}\")", index, removed.text);
    Ok(())
}

pub fn handle_submit() -> Result<()> {
    let (_config, mut wizard) = open_session()?;

    let outcome = wizard.submit();
    print_outcome(&outcome);

    match outcome {
        SubmitOutcome::Advanced(_) => Ok(()),
        SubmitOutcome::Rejected { step, errors, .. } => Err(BooklogError::StepIncomplete {
            step: step.number(),
            count: errors.len(),
        }),
    }
}

pub fn handle_back() -> Result<()> {
    let (_config, mut wizard) = open_session()?;
    print_back(wizard.back());
    Ok(())
}

pub fn handle_goto(step: String) -> Result<()> {
    let (_config, mut wizard) = open_session()?;
    let step: Step = step.parse()?;
    wizard.navigate(step);
    println!("Moved -> {}", wizard.route());
    Ok(())
}

pub fn handle_preview(json: bool) -> Result<()> {
    let (config, wizard) = open_session()?;

    let preview = runtime()?.block_on(async {
        let mut projector = PreviewProjector::new(wizard.record(), config.debounce())?;
        let mut feed = projector.feed();
        projector.update(wizard.record());
        Ok::<_, BooklogError>(feed.next().await.unwrap_or_else(|| feed.latest()))
    })?;

    if json {
        println!("{}", preview.to_json_pretty()?);
    } else {
        println!("{}", preview);
    }
    Ok(())
}

fn fetch_catalog(config: &WizardConfig, catalog: Catalog) -> Result<Vec<SelectOption>> {
    let source = catalog.source().with_latency(config.catalog_latency());
    runtime()?.block_on(source.fetch_options())
}

pub fn handle_options(catalog: String, query: Option<String>) -> Result<()> {
    let (config, _wizard) = open_session()?;
    let catalog: Catalog = catalog.parse()?;

    let options = fetch_catalog(&config, catalog)?;
    for option in filter_options(&options, query.as_deref().unwrap_or_default()) {
        println!("{}\t{}", option.value, option.label);
    }
    Ok(())
}

pub fn handle_pick(catalog: String, query: String) -> Result<()> {
    let (config, mut wizard) = open_session()?;
    let catalog: Catalog = catalog.parse()?;

    let options = fetch_catalog(&config, catalog)?;
    let option = filter_options(&options, &query)
        .into_iter()
        .next()
        .ok_or_else(|| BooklogError::NoMatchingOption(query.clone()))?;

    let field = catalog.bound_field();
    wizard.pick(field, option)?;
    println!("{} = {} ({})", field, option.value, option.label);
    Ok(())
}

pub fn handle_reset() -> Result<()> {
    let (_config, mut wizard) = open_session()?;
    wizard.reset();
    println!("Cleared saved record");
    Ok(())
}

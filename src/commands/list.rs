//! List command handler.

use std::process::ExitCode;

use restvault::config::RestvaultConfig;
use restvault::models::EntityKind;
use restvault::storage::{ListOptions, open_store};

/// Arguments of the list command.
pub struct ListArgs {
    /// Entity kind name.
    pub kind: String,
    /// Page size.
    pub limit: usize,
    /// Continuation token.
    pub page_token: Option<String>,
    /// Text filter.
    pub filter: Option<String>,
    /// Reverse order.
    pub descending: bool,
}

/// List command.
///
/// Prints one JSON document per line. The continuation token goes to stderr
/// so stdout stays line-delimited JSON.
pub fn cmd_list(config: &RestvaultConfig, args: ListArgs) -> anyhow::Result<ExitCode> {
    let kind: EntityKind = args.kind.parse()?;
    let store = open_store(config.store.backend, &config.sqlite_path())?;

    let mut options = ListOptions::with_limit(args.limit)
        .page_token(args.page_token)
        .descending(args.descending);
    if let Some(filter) = args.filter {
        options = options.filter(filter);
    }

    let page = store.list(kind, &options)?;
    for item in &page.items {
        println!("{}", serde_json::to_string(item)?);
    }
    if let Some(token) = page.next_page_token {
        eprintln!("next page token: {token}");
    }
    Ok(ExitCode::SUCCESS)
}

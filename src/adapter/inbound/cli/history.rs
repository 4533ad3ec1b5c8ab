//! Handler for the `history` command.

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::HistoryArgs;
use super::{config, output};
use crate::domain::HistoryEntry;
use crate::error::Result;
use crate::infrastructure::bootstrap;

#[derive(Tabled)]
struct HistoryRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Enrollment")]
    eid: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Status")]
    status: String,
}

/// Execute the history command.
pub async fn execute(args: &HistoryArgs) -> Result<()> {
    let config = config::load_or_default(&args.config)?;
    config.validate()?;
    let token = config::resolve_token(args.token.as_deref(), &config)?;
    let api = bootstrap::build_enrollment_api(&config)?;

    let entries = api.fetch_history(&token).await?;
    let shown: Vec<&HistoryEntry> = entries
        .iter()
        .filter(|e| args.include_closed || e.status.is_open())
        .collect();

    if output::is_json() {
        output::json_output(json!({
            "command": "history",
            "entries": shown,
        }));
        return Ok(());
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::section("Enrollment history");

    if shown.is_empty() {
        output::warning("No open enrollments; add the event to your history first");
        return Ok(());
    }

    let rows: Vec<HistoryRow> = shown
        .iter()
        .enumerate()
        .map(|(i, e)| HistoryRow {
            index: i + 1,
            eid: e.eid.to_string(),
            title: e.title.clone(),
            status: e.status.to_string(),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
    output::note("Race them with: enrollrush run --eid <ID>[,<ID>...] or --all");

    Ok(())
}

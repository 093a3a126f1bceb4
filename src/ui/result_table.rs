use comfy_table::Table;

use crate::db::{Outcome, QueryResult, NULL_TEXT};

/// Render up to `limit` rows of a result as a text table. Hidden rows are
/// summarized in a footer line.
pub fn render_table(result: &QueryResult, limit: Option<usize>) -> String {
    let mut table = Table::new();
    table.set_header(result.column_names());

    let shown = limit.unwrap_or(result.rows.len()).min(result.rows.len());
    for row in &result.rows[..shown] {
        table.add_row(row.iter().map(|cell| cell.as_deref().unwrap_or(NULL_TEXT)));
    }

    let mut output = table.to_string();
    let hidden = result.rows.len() - shown;
    if hidden > 0 {
        output.push_str(&format!("\n... {} more rows", hidden));
    }
    output.push_str(&format!("\n[{} rows x {} columns]", result.row_count, result.columns.len()));
    output
}

/// One line naming each column with its database type.
pub fn describe_columns(result: &QueryResult) -> String {
    result
        .columns
        .iter()
        .map(|col| format!("{} ({})", col.name, col.data_type))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Text shown for the value an invocation returned, if any.
pub fn render_outcome(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Nothing | Outcome::Completed => None,
        Outcome::Table { result, limit } => Some(render_table(result, *limit)),
        Outcome::Rows(rows) => Some(serde_json::to_string(rows).unwrap_or_default()),
        Outcome::Iterations(count) => Some(count.to_string()),
    }
}

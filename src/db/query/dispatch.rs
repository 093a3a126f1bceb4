use serde::Serialize;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::db::DbError;

use super::executor::{Executor, QueryExecutor};
use super::sample_data::SAMPLE_DATA_BLOCKS;
use super::types::{
    Chart, ChartKind, InputForm, InvocationConfig, Outcome, PlotMode, QueryResult, StatementKind,
    NULL_TEXT,
};

pub const COMMAND_COMPLETED: &str = "Command completed.";

/// Where user-facing text goes.
pub trait Console {
    /// Status and completion messages; callers skip these in quiet mode.
    fn info(&mut self, text: &str);
    /// Result output such as formatted JSON documents.
    fn print(&mut self, text: &str);
    /// Error messages; never suppressed.
    fn error(&mut self, text: &str);
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ChartError(pub String);

pub trait ChartRenderer {
    fn render(&mut self, chart: &Chart) -> Result<(), ChartError>;
    /// Hand the whole result to an interactive viewer.
    fn view(&mut self, table: &QueryResult);
}

/// What happened across one invocation body.
#[derive(Debug, Clone, PartialEq)]
pub struct DispatchReport {
    pub outcome: Outcome,
    pub executed: usize,
    pub failed: usize,
    pub connection_lost: bool,
}

struct StatementOutcome {
    outcome: Outcome,
    produced_output: bool,
}

pub struct Dispatcher<'a> {
    executor: &'a mut dyn Executor,
    console: &'a mut dyn Console,
    charts: &'a mut dyn ChartRenderer,
    timer_budget: Duration,
}

impl<'a> Dispatcher<'a> {
    pub fn new(
        executor: &'a mut dyn Executor,
        console: &'a mut dyn Console,
        charts: &'a mut dyn ChartRenderer,
    ) -> Self {
        Self {
            executor,
            console,
            charts,
            timer_budget: Duration::from_secs(1),
        }
    }

    pub fn with_timer_budget(mut self, budget: Duration) -> Self {
        self.timer_budget = budget;
        self
    }

    /// Split `text`, run each statement in order and return the outcome of the
    /// last one. A failing statement is reported and the block carries on.
    pub fn dispatch(
        &mut self,
        config: &InvocationConfig,
        text: &str,
        form: InputForm,
        max_rows: Option<usize>,
    ) -> DispatchReport {
        let mut report = DispatchReport {
            outcome: Outcome::Nothing,
            executed: 0,
            failed: 0,
            connection_lost: false,
        };
        let mut produced_output = false;
        let mut succeeded = 0usize;

        for raw in QueryExecutor::split_statements(text, config.delimiter, form) {
            let sql = raw.trim();
            let Some(kind) = QueryExecutor::classify(sql, config.shape) else {
                continue;
            };
            debug!(statement = sql, ?kind, "dispatching statement");
            report.executed += 1;

            match self.run_statement(sql, kind, config, form, max_rows) {
                Ok(done) => {
                    succeeded += 1;
                    produced_output |= done.produced_output;
                    report.outcome = done.outcome;
                }
                Err(err) => {
                    warn!(statement = sql, error = %err, "statement failed");
                    self.console.error(&err.user_message());
                    report.failed += 1;
                    report.connection_lost |= err.is_connection();
                    report.outcome = Outcome::Nothing;
                }
            }
        }

        // Block form acknowledges once for the whole body.
        if form == InputForm::Block && succeeded > 0 && !produced_output {
            self.console.info(COMMAND_COMPLETED);
        }

        report
    }

    fn run_statement(
        &mut self,
        sql: &str,
        kind: StatementKind,
        config: &InvocationConfig,
        form: InputForm,
        max_rows: Option<usize>,
    ) -> Result<StatementOutcome, DbError> {
        if config.timer {
            let count = QueryExecutor::time_statement(
                &mut *self.executor,
                sql,
                kind == StatementKind::Query,
                self.timer_budget,
            )?;
            if !config.quiet {
                self.console.info(&format!(
                    "Total iterations in {} second(s): {}",
                    self.timer_budget.as_secs_f64(),
                    count
                ));
            }
            return Ok(StatementOutcome {
                outcome: Outcome::Iterations(count),
                produced_output: true,
            });
        }

        if config.plot != PlotMode::None {
            let result = self.fetch(sql)?;
            let chart_kind = match config.plot {
                PlotMode::Bar => ChartKind::Bar,
                PlotMode::Pie => ChartKind::Pie,
                PlotMode::Line => ChartKind::Line,
                PlotMode::Interactive | PlotMode::None => {
                    self.charts.view(&result);
                    return Ok(StatementOutcome {
                        outcome: Outcome::Nothing,
                        produced_output: true,
                    });
                }
            };
            let chart = build_chart(chart_kind, &result)?;
            self.charts
                .render(&chart)
                .map_err(|err| DbError::Statement(err.to_string()))?;
            return Ok(StatementOutcome {
                outcome: Outcome::Nothing,
                produced_output: true,
            });
        }

        match kind {
            StatementKind::Query if config.json => {
                let result = self.fetch(sql)?;
                self.print_json_rows(&result)?;
                Ok(StatementOutcome {
                    outcome: Outcome::Nothing,
                    produced_output: true,
                })
            }
            StatementKind::Query if config.as_array => {
                let result = self.fetch(sql)?;
                Ok(StatementOutcome {
                    outcome: Outcome::Rows(result.rows),
                    produced_output: true,
                })
            }
            StatementKind::Query => {
                let result = self.fetch(sql)?;
                let limit = if config.all_rows { None } else { max_rows };
                Ok(StatementOutcome {
                    outcome: Outcome::Table { result, limit },
                    produced_output: true,
                })
            }
            StatementKind::Command => {
                self.executor.run_command(sql)?;
                if form == InputForm::Line && !config.quiet {
                    self.console.info(COMMAND_COMPLETED);
                }
                Ok(StatementOutcome {
                    outcome: Outcome::Completed,
                    produced_output: false,
                })
            }
        }
    }

    fn fetch(&mut self, sql: &str) -> Result<QueryResult, DbError> {
        let result = self.executor.run_query(sql)?;
        debug!(sql = %result.sql, elapsed = ?result.execution_time, "{}", result.message);
        Ok(result)
    }

    fn print_json_rows(&mut self, result: &QueryResult) -> Result<(), DbError> {
        let numbered = result.rows.len() > 1;

        for (idx, row) in result.rows.iter().enumerate() {
            let value = match row.first().and_then(Option::as_deref) {
                Some(raw) => serde_json::from_str(raw).map_err(|err| {
                    DbError::MalformedJson(format!("Row {} is not valid JSON: {}", idx + 1, err))
                })?,
                None => serde_json::Value::Null,
            };

            if idx > 0 {
                self.console.print("");
            }
            if numbered {
                self.console.print(&format!("Row: {}", idx + 1));
            }
            self.console.print(&pretty_json(&value)?);
        }

        Ok(())
    }

    /// Create and fill the demonstration tables when they are missing.
    pub fn bootstrap_sample_data(&mut self) -> bool {
        let mut ok = true;
        for block in SAMPLE_DATA_BLOCKS {
            if let Err(err) = self.executor.run_command(block) {
                self.console.error(&err.user_message());
                ok = false;
            }
        }
        if ok {
            self.console
                .info("Sample tables [EMPLOYEE, DEPARTMENT] created.");
        }
        ok
    }
}

/// Pretty-print with four-space indentation, keeping document key order.
pub fn pretty_json(value: &serde_json::Value) -> Result<String, DbError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value
        .serialize(&mut ser)
        .map_err(|err| DbError::MalformedJson(err.to_string()))?;
    String::from_utf8(buf).map_err(|err| DbError::MalformedJson(err.to_string()))
}

/// Take labels from the first column and values from the second. A single
/// column result is plotted against its row numbers.
pub fn build_chart(kind: ChartKind, result: &QueryResult) -> Result<Chart, DbError> {
    let (label_col, value_col) = match result.columns.len() {
        0 => {
            return Err(DbError::Statement(
                "The query returned no columns to plot".to_string(),
            ))
        }
        1 => (None, 0),
        _ => (Some(0), 1),
    };

    let value_name = result.columns[value_col].name.clone();
    let mut labels = Vec::with_capacity(result.rows.len());
    let mut values = Vec::with_capacity(result.rows.len());

    for (idx, row) in result.rows.iter().enumerate() {
        let label = match label_col {
            Some(col) => match row.get(col) {
                Some(Some(text)) => text.clone(),
                _ => NULL_TEXT.to_string(),
            },
            None => (idx + 1).to_string(),
        };
        let value = match row.get(value_col).and_then(Option::as_deref) {
            None => 0.0,
            Some(raw) => raw.trim().parse::<f64>().map_err(|_| {
                DbError::Statement(format!(
                    "Column {} contains non-numeric value `{}`",
                    value_name, raw
                ))
            })?,
        };
        labels.push(label);
        values.push(value);
    }

    Ok(Chart {
        kind,
        x_label: label_col
            .map(|col| result.columns[col].name.clone())
            .unwrap_or_default(),
        y_label: value_name,
        labels,
        values,
    })
}

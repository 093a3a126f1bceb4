use oracle::{Connection, Row};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::db::DbError;

use super::types::{ColumnInfo, QueryResult};

/// Namespace for the statement-level helpers (splitting, classification,
/// timing) that do not need a live session.
pub struct QueryExecutor;

/// A live database session able to run one statement at a time.
pub trait Executor {
    /// Execute `sql` and fetch every row of its result set.
    fn run_query(&mut self, sql: &str) -> Result<QueryResult, DbError>;

    /// Execute `sql` without fetching a result set.
    fn run_command(&mut self, sql: &str) -> Result<(), DbError>;
}

impl QueryExecutor {
    /// Run `sql` repeatedly until `budget` elapses and return how many
    /// executions completed. The first error ends the loop.
    pub fn time_statement(
        executor: &mut dyn Executor,
        sql: &str,
        fetch: bool,
        budget: Duration,
    ) -> Result<u64, DbError> {
        let deadline = Instant::now() + budget;
        let mut count = 0u64;

        while Instant::now() < deadline {
            if fetch {
                executor.run_query(sql)?;
            } else {
                executor.run_command(sql)?;
            }
            count += 1;
        }

        debug!(count, ?budget, "timed statement finished");
        Ok(count)
    }
}

pub struct OracleExecutor {
    conn: Connection,
}

impl OracleExecutor {
    pub fn new(conn: Connection) -> Self {
        Self { conn }
    }
}

impl Executor for OracleExecutor {
    fn run_query(&mut self, sql: &str) -> Result<QueryResult, DbError> {
        let start = Instant::now();
        let mut stmt = self.conn.statement(sql).build()?;
        let result_set = stmt.query(&[])?;

        let column_info: Vec<ColumnInfo> = result_set
            .column_info()
            .iter()
            .map(|col| ColumnInfo::new(col.name(), &col.oracle_type().to_string()))
            .collect();

        let mut rows: Vec<Vec<Option<String>>> = Vec::new();

        for row_result in result_set {
            let row: Row = row_result?;
            let mut row_data = Vec::with_capacity(column_info.len());

            for i in 0..column_info.len() {
                let value: Option<String> = row.get(i)?;
                row_data.push(value);
            }

            rows.push(row_data);
        }

        Ok(QueryResult::new_select(
            sql,
            column_info,
            rows,
            start.elapsed(),
        ))
    }

    fn run_command(&mut self, sql: &str) -> Result<(), DbError> {
        self.conn.execute(sql, &[])?;
        Ok(())
    }
}

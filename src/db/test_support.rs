//! In-memory stand-ins for the database, settings store, prompts and sinks.
//! Every fake is `Clone` and clones share state, so a test keeps one copy
//! for assertions and hands the other to the code under test.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use crate::db::{
    Chart, ChartError, ChartRenderer, ColumnInfo, Connector, Console, DbError, Executor,
    PromptProvider, QueryResult, SessionSettings,
};
use crate::utils::{SettingsError, SettingsStore};

#[derive(Default)]
struct FakeDbState {
    tables: HashMap<String, QueryResult>,
    failures: HashMap<String, DbError>,
    queries: Vec<String>,
    commands: Vec<String>,
    latency: Duration,
}

#[derive(Clone, Default)]
pub struct FakeExecutor {
    state: Rc<RefCell<FakeDbState>>,
}

impl FakeExecutor {
    /// Answer `sql` with the given columns and rows.
    pub fn add_table(&self, sql: &str, columns: &[&str], rows: &[&[&str]]) {
        self.add_table_with_nulls(
            sql,
            columns,
            rows.iter()
                .map(|row| row.iter().map(|v| Some(*v)).collect())
                .collect(),
        );
    }

    /// Like `add_table`, with `None` standing for SQL NULL.
    pub fn add_table_with_nulls(&self, sql: &str, columns: &[&str], rows: Vec<Vec<Option<&str>>>) {
        let result = QueryResult::new_select(
            sql,
            columns
                .iter()
                .map(|name| ColumnInfo::new(name, "Varchar2"))
                .collect(),
            rows.into_iter()
                .map(|row| row.into_iter().map(|v| v.map(str::to_string)).collect())
                .collect(),
            Duration::ZERO,
        );
        self.state.borrow_mut().tables.insert(sql.to_string(), result);
    }

    /// Make every statement take at least `latency`.
    pub fn with_latency(self, latency: Duration) -> Self {
        self.state.borrow_mut().latency = latency;
        self
    }

    pub fn fail_on(&self, sql: &str, err: DbError) {
        self.state
            .borrow_mut()
            .failures
            .insert(sql.to_string(), err);
    }

    pub fn queries(&self) -> Vec<String> {
        self.state.borrow().queries.clone()
    }

    pub fn commands(&self) -> Vec<String> {
        self.state.borrow().commands.clone()
    }
}

impl Executor for FakeExecutor {
    fn run_query(&mut self, sql: &str) -> Result<QueryResult, DbError> {
        let mut state = self.state.borrow_mut();
        std::thread::sleep(state.latency);
        state.queries.push(sql.to_string());
        if let Some(err) = state.failures.get(sql) {
            return Err(err.clone());
        }
        Ok(state
            .tables
            .get(sql)
            .cloned()
            .unwrap_or_else(|| QueryResult::new_select(sql, Vec::new(), Vec::new(), Duration::ZERO)))
    }

    fn run_command(&mut self, sql: &str) -> Result<(), DbError> {
        let mut state = self.state.borrow_mut();
        std::thread::sleep(state.latency);
        state.commands.push(sql.to_string());
        match state.failures.get(sql) {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

#[derive(Clone)]
pub struct FakeConnector {
    db: FakeExecutor,
    failure: Option<DbError>,
    attempts: Rc<RefCell<Vec<SessionSettings>>>,
}

impl FakeConnector {
    pub fn new(db: FakeExecutor) -> Self {
        Self {
            db,
            failure: None,
            attempts: Rc::default(),
        }
    }

    pub fn failing_with(mut self, err: DbError) -> Self {
        self.failure = Some(err);
        self
    }

    pub fn db(&self) -> FakeExecutor {
        self.db.clone()
    }

    /// Settings of every connection attempt, in order.
    pub fn attempts(&self) -> Vec<SessionSettings> {
        self.attempts.borrow().clone()
    }
}

impl Connector for FakeConnector {
    fn connect(&self, settings: &SessionSettings) -> Result<Box<dyn Executor>, DbError> {
        self.attempts.borrow_mut().push(settings.clone());
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(Box::new(self.db.clone())),
        }
    }
}

#[derive(Clone, Default)]
pub struct FakeStore {
    saved: Rc<RefCell<Option<SessionSettings>>>,
    saves: Rc<Cell<usize>>,
    clears: Rc<Cell<usize>>,
    fail_saves: bool,
}

impl FakeStore {
    pub fn with_saved(saved: Option<SessionSettings>) -> Self {
        Self {
            saved: Rc::new(RefCell::new(saved)),
            ..Self::default()
        }
    }

    pub fn failing_saves(mut self) -> Self {
        self.fail_saves = true;
        self
    }

    pub fn saved(&self) -> Option<SessionSettings> {
        self.saved.borrow().clone()
    }

    pub fn save_count(&self) -> usize {
        self.saves.get()
    }

    pub fn clear_count(&self) -> usize {
        self.clears.get()
    }
}

impl SettingsStore for FakeStore {
    fn load(&self) -> Result<Option<SessionSettings>, SettingsError> {
        Ok(self.saved.borrow().clone())
    }

    fn save(&self, settings: &SessionSettings) -> Result<(), SettingsError> {
        if self.fail_saves {
            return Err(SettingsError::NoConfigDir);
        }
        self.saves.set(self.saves.get() + 1);
        *self.saved.borrow_mut() = Some(settings.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SettingsError> {
        self.clears.set(self.clears.get() + 1);
        *self.saved.borrow_mut() = None;
        Ok(())
    }
}

/// Replays canned answers; an exhausted script answers with empty input.
#[derive(Clone, Default)]
pub struct ScriptedPrompt {
    answers: Rc<RefCell<VecDeque<String>>>,
    passwords: Rc<RefCell<VecDeque<String>>>,
    asked: Rc<RefCell<Vec<String>>>,
    asked_passwords: Rc<RefCell<Vec<String>>>,
}

impl ScriptedPrompt {
    pub fn new(answers: &[&str], passwords: &[&str]) -> Self {
        Self {
            answers: Rc::new(RefCell::new(
                answers.iter().map(|a| a.to_string()).collect(),
            )),
            passwords: Rc::new(RefCell::new(
                passwords.iter().map(|p| p.to_string()).collect(),
            )),
            ..Self::default()
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    pub fn password_prompts(&self) -> Vec<String> {
        self.asked_passwords.borrow().clone()
    }
}

impl PromptProvider for ScriptedPrompt {
    fn prompt(&mut self, message: &str) -> String {
        self.asked.borrow_mut().push(message.to_string());
        self.answers.borrow_mut().pop_front().unwrap_or_default()
    }

    fn prompt_password(&mut self, message: &str) -> String {
        self.asked_passwords.borrow_mut().push(message.to_string());
        self.passwords.borrow_mut().pop_front().unwrap_or_default()
    }
}

#[derive(Clone, Default)]
pub struct RecordingConsole {
    infos: Rc<RefCell<Vec<String>>>,
    prints: Rc<RefCell<Vec<String>>>,
    errors: Rc<RefCell<Vec<String>>>,
}

impl RecordingConsole {
    pub fn infos(&self) -> Vec<String> {
        self.infos.borrow().clone()
    }

    pub fn prints(&self) -> Vec<String> {
        self.prints.borrow().clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.errors.borrow().clone()
    }
}

impl Console for RecordingConsole {
    fn info(&mut self, text: &str) {
        self.infos.borrow_mut().push(text.to_string());
    }

    fn print(&mut self, text: &str) {
        self.prints.borrow_mut().push(text.to_string());
    }

    fn error(&mut self, text: &str) {
        self.errors.borrow_mut().push(text.to_string());
    }
}

#[derive(Clone, Default)]
pub struct RecordingCharts {
    charts: Rc<RefCell<Vec<Chart>>>,
    views: Rc<RefCell<Vec<QueryResult>>>,
}

impl RecordingCharts {
    pub fn charts(&self) -> Vec<Chart> {
        self.charts.borrow().clone()
    }

    pub fn views(&self) -> Vec<QueryResult> {
        self.views.borrow().clone()
    }
}

impl ChartRenderer for RecordingCharts {
    fn render(&mut self, chart: &Chart) -> Result<(), ChartError> {
        self.charts.borrow_mut().push(chart.clone());
        Ok(())
    }

    fn view(&mut self, table: &QueryResult) {
        self.views.borrow_mut().push(table.clone());
    }
}

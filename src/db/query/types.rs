use std::time::Duration;

/// How a NULL cell is shown in tables and chart labels.
pub const NULL_TEXT: &str = "NULL";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    pub data_type: String,
}

impl ColumnInfo {
    pub fn new(name: &str, data_type: &str) -> Self {
        Self {
            name: name.to_string(),
            data_type: data_type.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub sql: String,
    pub columns: Vec<ColumnInfo>,
    /// Cell text per row; `None` is SQL NULL.
    pub rows: Vec<Vec<Option<String>>>,
    pub row_count: usize,
    pub execution_time: Duration,
    pub message: String,
}

impl QueryResult {
    pub fn new_select(
        sql: &str,
        columns: Vec<ColumnInfo>,
        rows: Vec<Vec<Option<String>>>,
        execution_time: Duration,
    ) -> Self {
        let row_count = rows.len();
        Self {
            sql: sql.to_string(),
            columns,
            rows,
            row_count,
            execution_time,
            message: format!("{} rows fetched", row_count),
        }
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }
}

/// Which execution path a statement takes when no mode flag overrides it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResultShape {
    #[default]
    Auto,
    ForceQuery,
    ForceCommand,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlotMode {
    #[default]
    None,
    Bar,
    Pie,
    Line,
    Interactive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Query,
    Command,
}

/// Line form runs the remainder of the line as one statement; block form
/// splits a multi-line body on the delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputForm {
    Line,
    Block,
}

/// Per-invocation settings derived from the leading flags. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationConfig {
    pub delimiter: char,
    pub quiet: bool,
    pub shape: ResultShape,
    pub json: bool,
    pub as_array: bool,
    pub all_rows: bool,
    pub timer: bool,
    pub plot: PlotMode,
    pub sample_data: bool,
}

impl Default for InvocationConfig {
    fn default() -> Self {
        Self {
            delimiter: ';',
            quiet: false,
            shape: ResultShape::Auto,
            json: false,
            as_array: false,
            all_rows: false,
            timer: false,
            plot: PlotMode::None,
            sample_data: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpTopic {
    Options,
    Connect,
}

/// What the leading line of an invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    Help(HelpTopic),
    Connect {
        config: InvocationConfig,
        directive: String,
    },
    Statements {
        config: InvocationConfig,
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasswordInput {
    Literal(String),
    /// `USING ?`: ask for the password with masked input.
    Prompt,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectParams {
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<PasswordInput>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl ConnectParams {
    pub fn is_empty(&self) -> bool {
        self.database.is_none()
            && self.user.is_none()
            && self.password.is_none()
            && self.host.is_none()
            && self.port.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectDirective {
    Reset,
    Connect(ConnectParams),
}

/// The value an invocation hands back to its caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Nothing,
    /// Labeled rows for display; `limit` is the number of rows to show.
    Table {
        result: QueryResult,
        limit: Option<usize>,
    },
    Rows(Vec<Vec<Option<String>>>),
    Iterations(u64),
    Completed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Bar,
    Pie,
    Line,
}

/// One labeled numeric series drawn from the first one or two result columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

use chrono::{DateTime, Local};
use oracle::Connection;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::db::query::{
    ConnectDirective, ConnectParams, Console, Executor, OracleExecutor, PasswordInput,
    QueryExecutor,
};
use crate::db::session::Session;
use crate::db::DbError;
use crate::utils::help::CONNECT_HELP;
use crate::utils::SettingsStore;

pub const DEFAULT_DATABASE: &str = "ORCL";
pub const DEFAULT_HOST: &str = "localhost";
pub const DEFAULT_PORT: u16 = 1521;
pub const DEFAULT_PROTOCOL: &str = "tcp";
pub const DEFAULT_USER: &str = "SYSTEM";
pub const DEFAULT_PASSWORD: &str = "password";
pub const DEFAULT_MAX_ROWS: i32 = 10;

/// Subnet used by the `#x` host shorthand in prompts.
const CONTAINER_SUBNET: &str = "172.17.0.";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub database: String,
    pub host: String,
    pub port: u16,
    pub protocol: String,
    pub uid: String,
    #[serde(skip_serializing, default)]
    pub password: String,
    /// Rows shown for a tabular result; zero or negative shows everything.
    pub max_rows: i32,
    pub last_connected: Option<DateTime<Local>>,
}

impl SessionSettings {
    pub fn connection_string(&self) -> String {
        if self.protocol.eq_ignore_ascii_case(DEFAULT_PROTOCOL) || self.protocol.is_empty() {
            format!("//{}:{}/{}", self.host, self.port, self.database)
        } else {
            format!(
                "{}://{}:{}/{}",
                self.protocol.to_lowercase(),
                self.host,
                self.port,
                self.database
            )
        }
    }

    pub fn display_string(&self) -> String {
        format!("{}@{}:{}/{}", self.uid, self.host, self.port, self.database)
    }

    /// Key under which the password is kept in the OS keyring.
    pub fn credential_key(&self) -> String {
        self.display_string()
    }

    fn apply(&mut self, params: ConnectParams, password: Option<String>) {
        if let Some(database) = params.database {
            self.database = database;
        }
        if let Some(user) = params.user {
            self.uid = user;
        }
        if let Some(host) = params.host {
            self.host = host;
        }
        if let Some(port) = params.port {
            self.port = port;
        }
        if let Some(password) = password {
            self.password = password;
        }
    }
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            database: String::new(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            protocol: DEFAULT_PROTOCOL.to_string(),
            uid: DEFAULT_USER.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            max_rows: DEFAULT_MAX_ROWS,
            last_connected: None,
        }
    }
}

/// Opens database sessions.
pub trait Connector {
    fn connect(&self, settings: &SessionSettings) -> Result<Box<dyn Executor>, DbError>;
}

/// Asks the user for connection fields. Empty input means "use the default".
pub trait PromptProvider {
    fn prompt(&mut self, message: &str) -> String;
    fn prompt_password(&mut self, message: &str) -> String;
}

pub struct OracleConnector {
    auto_commit: bool,
}

impl OracleConnector {
    pub fn new(auto_commit: bool) -> Self {
        Self { auto_commit }
    }
}

impl Connector for OracleConnector {
    fn connect(&self, settings: &SessionSettings) -> Result<Box<dyn Executor>, DbError> {
        let conn_str = settings.connection_string();
        let mut connection = Connection::connect(&settings.uid, &settings.password, &conn_str)
            .map_err(|err| DbError::Connection(err.to_string()))?;
        connection.set_autocommit(self.auto_commit);
        debug!(connection = %settings.display_string(), "connected");
        Ok(Box::new(OracleExecutor::new(connection)))
    }
}

/// Owns the live handle and the Disconnected/Connected transitions.
pub struct ConnectionManager {
    connector: Box<dyn Connector>,
    store: Box<dyn SettingsStore>,
    prompter: Box<dyn PromptProvider>,
    handle: Option<Box<dyn Executor>>,
}

impl ConnectionManager {
    pub fn new(
        connector: Box<dyn Connector>,
        store: Box<dyn SettingsStore>,
        prompter: Box<dyn PromptProvider>,
    ) -> Self {
        Self {
            connector,
            store,
            prompter,
            handle: None,
        }
    }

    /// Replace the session parameters with the last persisted ones, if any.
    pub fn load_settings(&mut self, session: &mut Session) {
        match self.store.load() {
            Ok(Some(settings)) => session.settings = settings,
            Ok(None) => {}
            Err(err) => warn!(error = %err, "could not load saved connection settings"),
        }
    }

    pub fn executor(&mut self) -> Option<&mut dyn Executor> {
        match &mut self.handle {
            Some(handle) => Some(handle.as_mut()),
            None => None,
        }
    }

    /// Run a CONNECT directive. A malformed directive leaves everything as it was.
    pub fn handle_directive(
        &mut self,
        session: &mut Session,
        text: &str,
        quiet: bool,
        console: &mut dyn Console,
    ) -> bool {
        let directive = match QueryExecutor::parse_connect_directive(text) {
            Ok(directive) => directive,
            Err(err) => {
                console.error(&err.user_message());
                return false;
            }
        };

        match directive {
            ConnectDirective::Reset => {
                self.reset(session, quiet, console);
                false
            }
            ConnectDirective::Connect(params) => {
                if params.is_empty() {
                    debug!("CONNECT without parameters, using current settings");
                }
                self.handle = None;
                session.mark_disconnected();

                let password = match params.password {
                    Some(PasswordInput::Prompt) => Some(self.ask_password()),
                    Some(PasswordInput::Literal(ref value)) => Some(value.clone()),
                    None => None,
                };
                let mut candidate = session.settings.clone();
                candidate.apply(params, password);
                self.connect(session, candidate, quiet, console)
            }
        }
    }

    /// Connect with the current parameters unless a live handle already exists.
    pub fn ensure_connected(
        &mut self,
        session: &mut Session,
        quiet: bool,
        console: &mut dyn Console,
    ) -> bool {
        if session.is_connected() && self.handle.is_some() {
            return true;
        }
        let candidate = session.settings.clone();
        self.connect(session, candidate, quiet, console)
    }

    /// Drop the handle and forget every stored parameter.
    pub fn reset(&mut self, session: &mut Session, quiet: bool, console: &mut dyn Console) {
        self.handle = None;
        session.reset();
        if let Err(err) = self.store.clear() {
            console.error(&format!("Failed to remove saved connection settings: {}", err));
        }
        if !quiet {
            console.info("Connection reset.");
        }
    }

    /// Forget a handle whose session was lost; the next statement reconnects.
    pub fn invalidate(&mut self, session: &mut Session) {
        warn!("database session lost; a new connection will be opened on next use");
        self.handle = None;
        session.mark_disconnected();
    }

    fn connect(
        &mut self,
        session: &mut Session,
        mut candidate: SessionSettings,
        quiet: bool,
        console: &mut dyn Console,
    ) -> bool {
        if candidate.database.is_empty() {
            console.print(CONNECT_HELP);
            candidate = self.prompt_for_settings(candidate);
        } else if candidate.password.is_empty() {
            // Reloaded settings carry no password when the keyring is off.
            candidate.password = self.ask_password();
        }

        match self.connector.connect(&candidate) {
            Ok(handle) => {
                self.handle = Some(handle);
                candidate.last_connected = Some(Local::now());
                session.settings = candidate;
                session.mark_connected();
                if let Err(err) = self.store.save(&session.settings) {
                    console.error(&format!(
                        "Failed trying to write connection settings: {}",
                        err
                    ));
                }
                if !quiet {
                    console.info("Connection successful.");
                }
                true
            }
            Err(err) => {
                console.error(&err.user_message());
                self.handle = None;
                session.mark_disconnected();
                session.settings.database.clear();
                false
            }
        }
    }

    fn ask_password(&mut self) -> String {
        let password = self
            .prompter
            .prompt_password(&format!("Password [{}]: ", DEFAULT_PASSWORD));
        or_default(password, DEFAULT_PASSWORD)
    }

    fn prompt_for_settings(&mut self, mut settings: SessionSettings) -> SessionSettings {
        let database = self
            .prompter
            .prompt(&format!("Enter the database name [{}]: ", DEFAULT_DATABASE));
        settings.database = or_default(database, DEFAULT_DATABASE).to_uppercase();

        let default_host_port = format!("{}:{}", DEFAULT_HOST, DEFAULT_PORT);
        let host_port = self.prompter.prompt(&format!(
            "Enter the HOST IP address and PORT in the form ip:port or #x:port [{}]: ",
            default_host_port
        ));
        let (host, port) = split_host_port(&or_default(host_port, &default_host_port));
        settings.host = host;
        settings.port = port.unwrap_or(DEFAULT_PORT);

        let uid = self
            .prompter
            .prompt(&format!("Enter Userid on the database system [{}]: ", DEFAULT_USER));
        settings.uid = or_default(uid, DEFAULT_USER).to_uppercase();

        settings.password = self.ask_password();

        let max_rows = self
            .prompter
            .prompt(&format!("Maximum rows displayed [{}]: ", DEFAULT_MAX_ROWS));
        settings.max_rows = max_rows.trim().parse().unwrap_or(DEFAULT_MAX_ROWS);

        settings
    }
}

fn or_default(value: String, default: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Split `ip:port` input. `#x` expands to the container subnet address
/// ending in `x`. A missing or non-numeric port yields `None`.
pub fn split_host_port(input: &str) -> (String, Option<u16>) {
    let (host, port) = match input.split_once(':') {
        Some((host, port)) => (host.trim(), port.trim().parse::<u16>().ok()),
        None => (input.trim(), None),
    };
    let host = match host.strip_prefix('#') {
        Some(suffix) => format!("{}{}", CONTAINER_SUBNET, suffix),
        None => host.to_string(),
    };
    (host, port)
}

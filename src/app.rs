use tracing::debug;

use crate::db::{
    parse_invocation_line, ChartRenderer, ConnectionManager, Console, Dispatcher, HelpTopic,
    InputForm, Outcome, ParsedLine, Session, SessionSettings,
};
use crate::utils::help::{build_options_help, CONNECT_HELP};
use crate::utils::AppConfig;

/// The SQL front-end: one session, one connection manager, and the sinks
/// results are reported to.
pub struct App {
    config: AppConfig,
    session: Session,
    connections: ConnectionManager,
    console: Box<dyn Console>,
    charts: Box<dyn ChartRenderer>,
}

impl App {
    pub fn new(
        config: AppConfig,
        mut connections: ConnectionManager,
        console: Box<dyn Console>,
        charts: Box<dyn ChartRenderer>,
    ) -> Self {
        let mut session = Session::new(SessionSettings {
            max_rows: config.default_max_rows,
            ..SessionSettings::default()
        });
        connections.load_settings(&mut session);
        Self {
            config,
            session,
            connections,
            console,
            charts,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Run one invocation: the leading `line` with its flags and, in block
    /// form, the multi-line `block` body.
    pub fn invoke(&mut self, line: &str, block: Option<&str>) -> Outcome {
        let has_block = block.is_some_and(|body| !body.trim().is_empty());

        let (config, text) = match parse_invocation_line(line, has_block) {
            ParsedLine::Help(HelpTopic::Options) => {
                self.console.print(&build_options_help());
                return Outcome::Nothing;
            }
            ParsedLine::Help(HelpTopic::Connect) => {
                self.console.print(CONNECT_HELP);
                return Outcome::Nothing;
            }
            ParsedLine::Connect { config, directive } => {
                self.connections.handle_directive(
                    &mut self.session,
                    &directive,
                    config.quiet,
                    self.console.as_mut(),
                );
                return Outcome::Nothing;
            }
            ParsedLine::Statements { config, text } => (config, text),
        };

        if !self
            .connections
            .ensure_connected(&mut self.session, config.quiet, self.console.as_mut())
        {
            return Outcome::Nothing;
        }

        let (body, form) = match block {
            Some(body) if has_block => (body, InputForm::Block),
            _ => (text.as_str(), InputForm::Line),
        };
        let max_rows = self.session.display_limit();
        let timer_budget = self.config.timer_budget();

        let Some(executor) = self.connections.executor() else {
            return Outcome::Nothing;
        };
        let mut dispatcher = Dispatcher::new(executor, self.console.as_mut(), self.charts.as_mut())
            .with_timer_budget(timer_budget);

        if config.sample_data {
            dispatcher.bootstrap_sample_data();
            return Outcome::Nothing;
        }

        let report = dispatcher.dispatch(&config, body, form, max_rows);
        debug!(
            executed = report.executed,
            failed = report.failed,
            "invocation finished"
        );
        if report.connection_lost {
            self.connections.invalidate(&mut self.session);
        }
        report.outcome
    }
}

use pretty_assertions::assert_eq;

use crate::db::test_support::*;
use crate::db::{split_host_port, ConnectionManager, DbError, Session, SessionSettings};

struct Fixture {
    manager: ConnectionManager,
    session: Session,
    connector: FakeConnector,
    store: FakeStore,
    prompt: ScriptedPrompt,
    console: RecordingConsole,
}

impl Fixture {
    fn build(
        settings: SessionSettings,
        connector: FakeConnector,
        store: FakeStore,
        prompt: ScriptedPrompt,
    ) -> Self {
        let manager = ConnectionManager::new(
            Box::new(connector.clone()),
            Box::new(store.clone()),
            Box::new(prompt.clone()),
        );
        Self {
            manager,
            session: Session::new(settings),
            connector,
            store,
            prompt,
            console: RecordingConsole::default(),
        }
    }

    fn with_settings(settings: SessionSettings) -> Self {
        Self::build(
            settings,
            FakeConnector::new(FakeExecutor::default()),
            FakeStore::default(),
            ScriptedPrompt::default(),
        )
    }

    fn directive(&mut self, text: &str) -> bool {
        self.manager
            .handle_directive(&mut self.session, text, false, &mut self.console)
    }

    fn ensure(&mut self) -> bool {
        self.manager
            .ensure_connected(&mut self.session, false, &mut self.console)
    }
}

fn known_settings() -> SessionSettings {
    SessionSettings {
        database: "ORCL".to_string(),
        host: "db1".to_string(),
        port: 1522,
        uid: "SCOTT".to_string(),
        password: "tiger".to_string(),
        max_rows: 25,
        ..SessionSettings::default()
    }
}

#[test]
fn connect_directive_applies_parameters_and_persists() {
    let mut f = Fixture::with_settings(SessionSettings::default());

    assert!(f.directive("connect to sales user hr using Secret host 10.0.0.5 port 1530"));

    let attempt = f.connector.attempts().remove(0);
    assert_eq!(attempt.database, "SALES");
    assert_eq!(attempt.uid, "HR");
    assert_eq!(attempt.password, "Secret");
    assert_eq!(attempt.host, "10.0.0.5");
    assert_eq!(attempt.port, 1530);
    assert!(f.session.is_connected());
    assert!(f.session.settings.last_connected.is_some());
    assert_eq!(f.store.saved().map(|s| s.database), Some("SALES".to_string()));
    assert_eq!(f.console.infos(), vec!["Connection successful."]);
}

#[test]
fn omitted_parameters_keep_current_values() {
    let mut f = Fixture::with_settings(known_settings());
    assert!(f.directive("CONNECT USER HR"));

    let attempt = f.connector.attempts().remove(0);
    assert_eq!(attempt.uid, "HR");
    assert_eq!(attempt.database, "ORCL");
    assert_eq!(attempt.host, "db1");
    assert_eq!(attempt.password, "tiger");
    assert!(f.prompt.prompts().is_empty());
}

#[test]
fn quiet_connect_suppresses_success_message() {
    let mut f = Fixture::with_settings(known_settings());
    assert!(f
        .manager
        .handle_directive(&mut f.session, "CONNECT", true, &mut f.console));
    assert!(f.console.infos().is_empty());
}

#[test]
fn reset_clears_every_parameter_and_the_store() {
    let mut f = Fixture::with_settings(known_settings());
    assert!(f.ensure());

    assert!(!f.directive("CONNECT RESET"));

    assert!(!f.session.is_connected());
    assert_eq!(f.session.settings, SessionSettings::default());
    assert_eq!(f.store.clear_count(), 1);
    assert_eq!(f.store.saved(), None);
    assert_eq!(
        f.console.infos(),
        vec!["Connection successful.", "Connection reset."]
    );
}

#[test]
fn reset_from_disconnected_state_still_clears() {
    let mut f = Fixture::with_settings(known_settings());
    f.directive("connect reset");
    assert_eq!(f.session.settings.database, "");
    assert_eq!(f.store.clear_count(), 1);
    assert!(f.connector.attempts().is_empty());
}

#[test]
fn using_question_mark_prompts_for_masked_password() {
    let prompt = ScriptedPrompt::new(&[], &["s3cret"]);
    let mut f = Fixture::build(
        known_settings(),
        FakeConnector::new(FakeExecutor::default()),
        FakeStore::default(),
        prompt,
    );

    assert!(f.directive("CONNECT TO ORCL USER SCOTT USING ?"));

    assert_eq!(f.prompt.password_prompts(), vec!["Password [password]: "]);
    assert!(f.prompt.prompts().is_empty());
    assert_eq!(f.connector.attempts()[0].password, "s3cret");
}

#[test]
fn empty_password_answer_uses_default_never_question_mark() {
    let mut f = Fixture::with_settings(known_settings());
    f.directive("CONNECT USING ?");
    assert_eq!(f.connector.attempts()[0].password, "password");
}

#[test]
fn failed_connect_clears_database_and_keeps_previous_parameters() {
    let connector = FakeConnector::new(FakeExecutor::default())
        .failing_with(DbError::Connection(
            "ORA-01017: invalid username/password; logon denied".to_string(),
        ));
    let mut f = Fixture::build(
        known_settings(),
        connector,
        FakeStore::default(),
        ScriptedPrompt::default(),
    );

    assert!(!f.directive("CONNECT TO SALES USER HR USING wrong"));

    assert!(!f.session.is_connected());
    assert_eq!(f.session.settings.database, "");
    assert_eq!(f.session.settings.uid, "SCOTT");
    assert_eq!(f.session.settings.host, "db1");
    assert_eq!(f.store.save_count(), 0);
    assert_eq!(
        f.console.errors(),
        vec!["invalid username/password; logon denied"]
    );
}

#[test]
fn missing_value_is_a_configuration_error_without_mutation() {
    let mut f = Fixture::with_settings(known_settings());
    assert!(f.ensure());

    assert!(!f.directive("CONNECT TO ORCL USER"));

    assert_eq!(
        f.console.errors(),
        vec!["No userid specified in the CONNECT statement"]
    );
    assert_eq!(f.connector.attempts().len(), 1);
    assert!(f.session.is_connected());
    assert_eq!(f.session.settings.uid, "SCOTT");
    assert_eq!(f.store.clear_count(), 0);
}

#[test]
fn bare_connect_without_database_prompts_with_defaults() {
    let mut f = Fixture::with_settings(SessionSettings::default());

    assert!(f.directive("CONNECT"));

    assert_eq!(
        f.prompt.prompts(),
        vec![
            "Enter the database name [ORCL]: ",
            "Enter the HOST IP address and PORT in the form ip:port or #x:port [localhost:1521]: ",
            "Enter Userid on the database system [SYSTEM]: ",
            "Maximum rows displayed [10]: ",
        ]
    );
    assert_eq!(f.prompt.password_prompts(), vec!["Password [password]: "]);
    let attempt = f.connector.attempts().remove(0);
    assert_eq!(attempt.database, "ORCL");
    assert_eq!(attempt.host, "localhost");
    assert_eq!(attempt.port, 1521);
    assert_eq!(attempt.uid, "SYSTEM");
    assert_eq!(attempt.password, "password");
    assert_eq!(attempt.max_rows, 10);
    assert!(f.console.prints()[0].contains("CONNECT TO"));
}

#[test]
fn prompt_answers_expand_container_shorthand() {
    let prompt = ScriptedPrompt::new(&["sales", "#2:50000", "hr", "7"], &["pw"]);
    let mut f = Fixture::build(
        SessionSettings::default(),
        FakeConnector::new(FakeExecutor::default()),
        FakeStore::default(),
        prompt,
    );

    assert!(f.ensure());

    let attempt = f.connector.attempts().remove(0);
    assert_eq!(attempt.database, "SALES");
    assert_eq!(attempt.host, "172.17.0.2");
    assert_eq!(attempt.port, 50000);
    assert_eq!(attempt.uid, "HR");
    assert_eq!(attempt.password, "pw");
    assert_eq!(attempt.max_rows, 7);
}

#[test]
fn save_failure_is_reported_but_connection_stands() {
    let mut f = Fixture::build(
        known_settings(),
        FakeConnector::new(FakeExecutor::default()),
        FakeStore::default().failing_saves(),
        ScriptedPrompt::default(),
    );

    assert!(f.ensure());

    assert!(f.session.is_connected());
    assert!(f.manager.executor().is_some());
    let errors = f.console.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Failed trying to write connection settings"));
}

#[test]
fn ensure_connected_reuses_live_handle() {
    let mut f = Fixture::with_settings(known_settings());
    assert!(f.ensure());
    assert!(f.ensure());
    assert_eq!(f.connector.attempts().len(), 1);
}

#[test]
fn invalidate_forces_a_fresh_connection() {
    let mut f = Fixture::with_settings(known_settings());
    assert!(f.ensure());

    f.manager.invalidate(&mut f.session);
    assert!(!f.session.is_connected());
    assert!(f.manager.executor().is_none());
    assert_eq!(f.session.settings.database, "ORCL");

    assert!(f.ensure());
    assert_eq!(f.connector.attempts().len(), 2);
}

#[test]
fn load_settings_replaces_defaults_with_saved_ones() {
    let mut f = Fixture::build(
        SessionSettings::default(),
        FakeConnector::new(FakeExecutor::default()),
        FakeStore::with_saved(Some(known_settings())),
        ScriptedPrompt::default(),
    );
    f.manager.load_settings(&mut f.session);
    assert_eq!(f.session.settings, known_settings());
    assert!(!f.session.is_connected());
}

#[test]
fn reloaded_settings_without_password_prompt_before_connecting() {
    let saved = SessionSettings {
        password: String::new(),
        ..known_settings()
    };
    let mut f = Fixture::build(
        SessionSettings::default(),
        FakeConnector::new(FakeExecutor::default()),
        FakeStore::with_saved(Some(saved)),
        ScriptedPrompt::new(&[], &["tiger"]),
    );
    f.manager.load_settings(&mut f.session);
    assert!(f.ensure());
    assert_eq!(f.prompt.password_prompts(), vec!["Password [password]: "]);
    assert!(f.prompt.prompts().is_empty());
    assert_eq!(f.connector.attempts().remove(0).password, "tiger");
    assert_eq!(f.session.settings.password, "tiger");
}

#[test]
fn reloaded_settings_with_password_connect_without_prompting() {
    let mut f = Fixture::build(
        SessionSettings::default(),
        FakeConnector::new(FakeExecutor::default()),
        FakeStore::with_saved(Some(known_settings())),
        ScriptedPrompt::default(),
    );
    f.manager.load_settings(&mut f.session);
    assert!(f.ensure());
    assert!(f.prompt.password_prompts().is_empty());
    assert_eq!(f.connector.attempts().remove(0).password, "tiger");
}

#[test]
fn host_port_split() {
    assert_eq!(split_host_port("10.1.1.1:50000"), ("10.1.1.1".to_string(), Some(50000)));
    assert_eq!(split_host_port("#5:1521"), ("172.17.0.5".to_string(), Some(1521)));
    assert_eq!(split_host_port("dbhost"), ("dbhost".to_string(), None));
    assert_eq!(split_host_port("dbhost:abc"), ("dbhost".to_string(), None));
}

#[test]
fn connection_string_uses_easy_connect_form() {
    let settings = known_settings();
    assert_eq!(settings.connection_string(), "//db1:1522/ORCL");
    assert_eq!(settings.display_string(), "SCOTT@db1:1522/ORCL");

    let tcps = SessionSettings {
        protocol: "TCPS".to_string(),
        ..known_settings()
    };
    assert_eq!(tcps.connection_string(), "tcps://db1:1522/ORCL");
}

use std::ops::RangeInclusive;
use thiserror::Error;

/// ORA codes raised when the server side of the session is gone.
const LOST_SESSION_ORA_CODES: [i32; 3] = [
    3113, // end-of-file on communication channel
    3114, // not connected to ORACLE
    3135, // connection lost contact
];

/// TNS errors: the listener or network path is unusable.
const TNS_ORA_CODES: RangeInclusive<i32> = 12150..=12699;

const LOST_SESSION_DPI_CODES: [i32; 2] = [
    1010, // not connected
    1080, // connection was closed
];

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DbError {
    #[error("{0}")]
    Connection(String),
    #[error("{0}")]
    Statement(String),
    #[error("{0}")]
    MalformedJson(String),
    #[error("{0}")]
    Configuration(String),
}

impl DbError {
    pub fn is_connection(&self) -> bool {
        matches!(self, DbError::Connection(_))
    }

    /// The text shown to the user, with driver noise removed.
    pub fn user_message(&self) -> String {
        format_db_error(&self.to_string())
    }

    /// Classify raw driver error text by the `ORA-`/`DPI-` codes it carries.
    pub fn from_driver_message(message: &str) -> Self {
        if driver_codes(message).any(|(prefix, code)| is_session_loss(prefix, code)) {
            DbError::Connection(message.to_string())
        } else {
            DbError::Statement(message.to_string())
        }
    }
}

impl From<oracle::Error> for DbError {
    fn from(err: oracle::Error) -> Self {
        let message = err.to_string();
        let lost = matches!(
            (err.kind(), err.db_error()),
            (oracle::ErrorKind::OciError, Some(db)) if is_session_loss("ORA", db.code())
        );
        if lost {
            DbError::Connection(message)
        } else {
            DbError::from_driver_message(&message)
        }
    }
}

fn is_session_loss(prefix: &str, code: i32) -> bool {
    match prefix {
        "ORA" => LOST_SESSION_ORA_CODES.contains(&code) || TNS_ORA_CODES.contains(&code),
        "DPI" => LOST_SESSION_DPI_CODES.contains(&code),
        _ => false,
    }
}

/// Every `ORA-nnnnn` / `DPI-nnnn` token in `message`, as prefix and number.
fn driver_codes(message: &str) -> impl Iterator<Item = (&str, i32)> {
    message
        .split(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
        .filter_map(|token| {
            let (prefix, number) = token.split_once('-')?;
            if prefix != "ORA" && prefix != "DPI" {
                return None;
            }
            Some((prefix, number.parse().ok()?))
        })
}

/// Strip bracketed driver prefixes and leading `CODE-NNNNN:` error codes.
///
/// `[IBM][CLI Driver] SQL0204N "T" is undefined` becomes `SQL0204N "T" is undefined`,
/// `ORA-00942: table or view does not exist` becomes `table or view does not exist`.
pub fn format_db_error(message: &str) -> String {
    let flattened = message.replace('\r', " ");
    let after_brackets = match flattened.rfind(']') {
        Some(pos) => &flattened[pos + 1..],
        None => flattened.as_str(),
    };
    let trimmed = after_brackets.trim();

    match trimmed.split_once(':') {
        Some((code, rest)) if is_driver_code(code) => rest.trim().to_string(),
        _ => trimmed.to_string(),
    }
}

fn is_driver_code(token: &str) -> bool {
    let Some((prefix, number)) = token.split_once('-') else {
        return false;
    };
    !prefix.is_empty()
        && prefix.chars().all(|c| c.is_ascii_uppercase())
        && !number.is_empty()
        && number.chars().all(|c| c.is_ascii_digit())
}

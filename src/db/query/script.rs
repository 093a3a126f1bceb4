use once_cell::sync::Lazy;
use std::collections::HashSet;

use crate::db::DbError;

use super::executor::QueryExecutor;
use super::types::{
    ConnectDirective, ConnectParams, InputForm, PasswordInput, ResultShape, StatementKind,
};

/// Leading keywords of statements that produce a result set.
const QUERY_KEYWORDS: &[&str] = &["SELECT", "WITH", "VALUES"];

static QUERY_KEYWORD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| QUERY_KEYWORDS.iter().copied().collect());

/// What a character of SQL text belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CharClass {
    /// Plain SQL; delimiters and comment markers count here.
    Code,
    /// Inside a string literal, quoted identifier, q-quote or `/* */` comment.
    Literal,
    /// A `--` comment, up to but not including the line break.
    LineComment,
}

#[derive(Clone, Copy)]
enum ScanState {
    Code,
    Single,
    Double,
    QQuote(char),
    BlockComment,
    LineComment,
}

/// Closing character of an Oracle `q'<open>...<close>'` literal.
fn q_quote_close(open: char) -> char {
    match open {
        '[' => ']',
        '{' => '}',
        '(' => ')',
        '<' => '>',
        other => other,
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$' || c == '#'
}

/// `q'` opens a q-quote when the `q` starts a word, or follows a lone
/// `n`/`N` national-charset prefix.
fn opens_q_quote(chars: &[char], idx: usize) -> bool {
    if !matches!(chars[idx], 'q' | 'Q') || chars.get(idx + 1) != Some(&'\'') {
        return false;
    }
    let before = |n: usize| idx.checked_sub(n).map(|i| chars[i]);
    match before(1) {
        None => true,
        Some('n' | 'N') => !before(2).is_some_and(is_word_char),
        Some(prev) => !is_word_char(prev),
    }
}

/// Label every character of `chars`.
fn classify_chars(chars: &[char]) -> Vec<CharClass> {
    let mut classes = vec![CharClass::Literal; chars.len()];
    let mut state = ScanState::Code;
    let mut idx = 0;

    while idx < chars.len() {
        let c = chars[idx];
        let next = chars.get(idx + 1).copied();
        match state {
            ScanState::Code => {
                classes[idx] = CharClass::Code;
                match (c, next) {
                    ('-', Some('-')) => {
                        classes[idx] = CharClass::LineComment;
                        state = ScanState::LineComment;
                    }
                    ('/', Some('*')) => {
                        classes[idx] = CharClass::Literal;
                        state = ScanState::BlockComment;
                        idx += 1;
                    }
                    ('\'', _) => state = ScanState::Single,
                    ('"', _) => state = ScanState::Double,
                    _ if opens_q_quote(chars, idx) => {
                        if let Some(&open) = chars.get(idx + 2) {
                            state = ScanState::QQuote(q_quote_close(open));
                            idx += 2;
                        }
                    }
                    _ => {}
                }
            }
            ScanState::LineComment => {
                if c == '\n' {
                    classes[idx] = CharClass::Code;
                    state = ScanState::Code;
                } else {
                    classes[idx] = CharClass::LineComment;
                }
            }
            ScanState::BlockComment => {
                if c == '*' && next == Some('/') {
                    state = ScanState::Code;
                    idx += 1;
                }
            }
            ScanState::Single => {
                if c == '\'' {
                    state = ScanState::Code;
                }
            }
            ScanState::Double => {
                if c == '"' {
                    state = ScanState::Code;
                }
            }
            ScanState::QQuote(close) => {
                if c == close && next == Some('\'') {
                    state = ScanState::Code;
                    idx += 1;
                }
            }
        }
        idx += 1;
    }

    classes
}

impl QueryExecutor {
    /// Remove `--` comments up to the end of each line. Markers inside
    /// literals and `/* */` comments are kept.
    pub fn strip_line_comments(sql: &str) -> String {
        let chars: Vec<char> = sql.chars().collect();
        let classes = classify_chars(&chars);
        chars
            .iter()
            .zip(classes)
            .filter(|(_, class)| *class != CharClass::LineComment)
            .map(|(c, _)| *c)
            .collect()
    }

    /// Break an invocation body into raw statement fragments, in order.
    ///
    /// Line form yields the text as a single statement. Block form strips
    /// line comments, flattens newlines to spaces and splits on `delimiter`
    /// wherever it appears outside literals and `/* */` comments. Empty
    /// fragments are kept here and skipped by the classifier.
    pub fn split_statements(sql: &str, delimiter: char, form: InputForm) -> Vec<String> {
        if form == InputForm::Line {
            return vec![sql.to_string()];
        }

        let flattened = Self::strip_line_comments(sql)
            .replace("\r\n", " ")
            .replace(['\n', '\r'], " ");

        let chars: Vec<char> = flattened.chars().collect();
        let classes = classify_chars(&chars);

        let mut statements = Vec::new();
        let mut current = String::new();
        for (c, class) in chars.into_iter().zip(classes) {
            if c == delimiter && class == CharClass::Code {
                statements.push(std::mem::take(&mut current));
            } else {
                current.push(c);
            }
        }
        statements.push(current);

        statements
    }

    pub fn leading_keyword(sql: &str) -> Option<String> {
        sql.split_whitespace()
            .next()
            .map(|token| token.to_uppercase())
    }

    pub fn is_select_statement(sql: &str) -> bool {
        Self::leading_keyword(sql)
            .is_some_and(|keyword| QUERY_KEYWORD_SET.contains(keyword.as_str()))
    }

    /// Decide how a statement runs. `None` means the fragment has no keyword
    /// and is skipped.
    pub fn classify(sql: &str, shape: ResultShape) -> Option<StatementKind> {
        Self::leading_keyword(sql)?;
        let kind = match shape {
            ResultShape::ForceQuery => StatementKind::Query,
            ResultShape::ForceCommand => StatementKind::Command,
            ResultShape::Auto if Self::is_select_statement(sql) => StatementKind::Query,
            ResultShape::Auto => StatementKind::Command,
        };
        Some(kind)
    }

    /// Parse `CONNECT [TO db] [USER uid] [USING pwd|?] [HOST host] [PORT n] | RESET`.
    ///
    /// Keywords are case-insensitive and may come in any order; unknown tokens
    /// are skipped. A keyword without a value is a configuration error.
    pub fn parse_connect_directive(text: &str) -> Result<ConnectDirective, DbError> {
        let tokens: Vec<&str> = text.split_whitespace().collect();
        let mut params = ConnectParams::default();
        let mut idx = 0;

        if tokens
            .first()
            .is_some_and(|first| first.eq_ignore_ascii_case("CONNECT"))
        {
            idx = 1;
        }

        while idx < tokens.len() {
            let keyword = tokens[idx].to_uppercase();
            let value = tokens.get(idx + 1).copied();
            match keyword.as_str() {
                "RESET" => return Ok(ConnectDirective::Reset),
                "TO" => {
                    params.database = Some(Self::required(value, "database")?.to_uppercase());
                    idx += 1;
                }
                "USER" => {
                    params.user = Some(Self::required(value, "userid")?.to_uppercase());
                    idx += 1;
                }
                "USING" => {
                    let password = Self::required(value, "password")?;
                    params.password = Some(if password == "?" {
                        PasswordInput::Prompt
                    } else {
                        PasswordInput::Literal(password.to_string())
                    });
                    idx += 1;
                }
                "HOST" => {
                    params.host = Some(Self::required(value, "hostname")?.to_string());
                    idx += 1;
                }
                "PORT" => {
                    let raw = Self::required(value, "port")?;
                    let port = raw.parse::<u16>().map_err(|_| {
                        DbError::Configuration(format!(
                            "Invalid port number `{}` in the CONNECT statement",
                            raw
                        ))
                    })?;
                    params.port = Some(port);
                    idx += 1;
                }
                _ => {}
            }
            idx += 1;
        }

        Ok(ConnectDirective::Connect(params))
    }

    fn required<'a>(value: Option<&'a str>, what: &str) -> Result<&'a str, DbError> {
        value.ok_or_else(|| {
            DbError::Configuration(format!("No {} specified in the CONNECT statement", what))
        })
    }
}

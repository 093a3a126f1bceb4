use once_cell::sync::Lazy;
use std::collections::HashMap;

use super::types::{HelpTopic, InvocationConfig, ParsedLine, PlotMode, ResultShape};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flag {
    Delimiter,
    Quiet,
    ForceCommand,
    ForceQuery,
    AsArray,
    AllRows,
    Json,
    Timer,
    Plot(PlotMode),
    SampleData,
}

const FLAGS: &[(&str, Flag)] = &[
    ("-d", Flag::Delimiter),
    ("-q", Flag::Quiet),
    ("-n", Flag::ForceCommand),
    ("-s", Flag::ForceQuery),
    ("-r", Flag::AsArray),
    ("-a", Flag::AllRows),
    ("-j", Flag::Json),
    ("-t", Flag::Timer),
    ("-pb", Flag::Plot(PlotMode::Bar)),
    ("-pp", Flag::Plot(PlotMode::Pie)),
    ("-pl", Flag::Plot(PlotMode::Line)),
    ("-i", Flag::Plot(PlotMode::Interactive)),
    ("-sampledata", Flag::SampleData),
];

static FLAG_TABLE: Lazy<HashMap<&'static str, Flag>> =
    Lazy::new(|| FLAGS.iter().copied().collect());

impl InvocationConfig {
    fn apply(&mut self, flag: Flag) {
        match flag {
            Flag::Delimiter => self.delimiter = '@',
            Flag::Quiet => self.quiet = true,
            // -s takes precedence over -n whatever order they appear in.
            Flag::ForceCommand => {
                if self.shape != ResultShape::ForceQuery {
                    self.shape = ResultShape::ForceCommand;
                }
            }
            Flag::ForceQuery => self.shape = ResultShape::ForceQuery,
            Flag::AsArray => self.as_array = true,
            Flag::AllRows => self.all_rows = true,
            Flag::Json => self.json = true,
            Flag::Timer => self.timer = true,
            Flag::Plot(mode) => self.plot = mode,
            Flag::SampleData => self.sample_data = true,
        }
    }
}

/// Consume the flag tokens at the front of `line`.
///
/// Scanning stops at the first whitespace-delimited token that is not in the
/// flag table; that token and everything after it is returned untouched.
pub fn strip_flags(line: &str) -> (InvocationConfig, &str) {
    let mut config = InvocationConfig::default();
    let mut rest = line.trim_start();

    loop {
        let token_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        let token = &rest[..token_end];
        match FLAG_TABLE.get(token) {
            Some(flag) if !token.is_empty() => {
                config.apply(*flag);
                rest = rest[token_end..].trim_start();
            }
            _ => break,
        }
    }

    (config, rest)
}

/// Interpret the leading line of an invocation.
///
/// `has_block` is true when a non-blank multi-line body accompanies the line.
pub fn parse_invocation_line(line: &str, has_block: bool) -> ParsedLine {
    let trimmed = line.trim();
    if trimmed.is_empty() && !has_block {
        return ParsedLine::Help(HelpTopic::Options);
    }
    if trimmed == "?" {
        return ParsedLine::Help(HelpTopic::Options);
    }
    let words: Vec<String> = trimmed
        .split_whitespace()
        .map(|w| w.to_uppercase())
        .collect();
    if words.len() == 2 && words[0] == "?" && words[1] == "CONNECT" {
        return ParsedLine::Help(HelpTopic::Connect);
    }

    let (config, rest) = strip_flags(line);
    let is_connect = rest
        .split_whitespace()
        .next()
        .is_some_and(|first| first.eq_ignore_ascii_case("CONNECT"));

    if is_connect {
        ParsedLine::Connect {
            config,
            directive: rest.to_string(),
        }
    } else {
        ParsedLine::Statements {
            config,
            text: rest.to_string(),
        }
    }
}

use std::io::{self, BufRead, Write};

use crate::db::{Console, PromptProvider};

/// Writes results to stdout and errors to stderr.
#[derive(Default)]
pub struct TerminalConsole;

impl Console for TerminalConsole {
    fn info(&mut self, text: &str) {
        println!("{}", text);
    }

    fn print(&mut self, text: &str) {
        println!("{}", text);
    }

    fn error(&mut self, text: &str) {
        eprintln!("Error: {}", text);
    }
}

/// Reads connection fields from stdin; passwords are read without echo.
#[derive(Default)]
pub struct TerminalPrompt;

impl PromptProvider for TerminalPrompt {
    fn prompt(&mut self, message: &str) -> String {
        print!("{}", message);
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => line.trim_end_matches(['\r', '\n']).to_string(),
            Err(_) => String::new(),
        }
    }

    fn prompt_password(&mut self, message: &str) -> String {
        rpassword::prompt_password(message).unwrap_or_default()
    }
}

use asana_progress::credentials::TokenPrompt;
use asana_progress::error::Result;
use console::Term;
use std::io::{BufRead, IsTerminal};

pub const TOKEN_PROMPT: &str = "Enter your Asana personal access token: ";

/// Reads the token from the terminal without echo, or a single line from stdin when
/// input is piped.
pub struct ConsolePrompt;

impl TokenPrompt for ConsolePrompt {
    fn prompt_token(&mut self) -> Result<String> {
        if std::io::stdin().is_terminal() {
            let term = Term::stderr();
            term.write_str(TOKEN_PROMPT)?;
            return Ok(term.read_secure_line()?);
        }

        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line)?;
        Ok(line)
    }
}

//! Line-oriented command dispatch.

use crate::commands::{default_handlers, CommandHandler};
use crate::session::{Notice, Session};
use tracing::debug;

/// What the read loop should do after a line.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue(Vec<Notice>),
    Exit,
}

/// Interactive shell over a session.
pub struct Shell {
    session: Session,
    handlers: Vec<Box<dyn CommandHandler>>,
}

impl Shell {
    pub fn new(session: Session) -> Self {
        Self {
            session,
            handlers: default_handlers(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Prompt showing the current SIM, if any.
    pub fn prompt(&self) -> String {
        match &self.session.current {
            Some(imsi) => format!("sim[{}]> ", imsi),
            None => "sim> ".into(),
        }
    }

    /// Run one input line to completion.
    pub fn handle_line(&mut self, line: &str) -> Flow {
        let line = line.trim();
        if line.is_empty() {
            return Flow::Continue(Vec::new());
        }

        let (word, args) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        if word.eq_ignore_ascii_case("quit") || word.eq_ignore_ascii_case("exit") {
            return Flow::Exit;
        }

        let Some(handler) = self.handlers.iter().find(|h| h.matches(word)) else {
            return Flow::Continue(vec![Notice::error(format!(
                "Unknown command '{}'. Type 'help' for a list.",
                word
            ))]);
        };

        debug!("Dispatching '{}' to {}", word, handler.trigger());
        match handler.execute(&mut self.session, args) {
            Ok(notices) => Flow::Continue(notices),
            Err(e) => Flow::Continue(vec![Notice::error(e.to_string())]),
        }
    }
}

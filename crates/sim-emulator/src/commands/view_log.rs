//! Log command - prints the communication log.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use crate::session::{Notice, Session};

pub struct LogHandler;

impl CommandHandler for LogHandler {
    fn trigger(&self) -> &str {
        "log"
    }

    fn usage(&self) -> &str {
        "log                      show the communication log"
    }

    fn execute(&self, session: &mut Session, _args: &str) -> AppResult<Vec<Notice>> {
        match session.network.view_log() {
            Ok(log) if log.is_empty() => Ok(vec![Notice::info("Communication log is empty.")]),
            Ok(log) => Ok(vec![Notice::info(log.trim_end())]),
            Err(e) => Ok(vec![Notice::error(format!("Log Error: {}", e))]),
        }
    }
}

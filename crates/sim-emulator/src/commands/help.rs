//! Help command - lists available commands.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use crate::session::{Notice, Session};

pub struct HelpHandler {
    usages: Vec<String>,
}

impl HelpHandler {
    pub fn new(usages: Vec<String>) -> Self {
        Self { usages }
    }
}

impl CommandHandler for HelpHandler {
    fn trigger(&self) -> &str {
        "help"
    }

    fn aliases(&self) -> &[&str] {
        &["?"]
    }

    fn usage(&self) -> &str {
        "help                     show this list"
    }

    fn execute(&self, _session: &mut Session, _args: &str) -> AppResult<Vec<Notice>> {
        let mut text = String::from("Commands:\n");
        for usage in &self.usages {
            text.push_str(&format!("  {}\n", usage));
        }
        text.push_str(&format!("  {}\n", self.usage()));
        text.push_str("  quit                     leave the emulator");
        Ok(vec![Notice::info(text)])
    }
}

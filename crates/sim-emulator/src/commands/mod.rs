//! Shell command handlers.

mod call;
mod help;
mod register;
mod sms;
mod status;
mod view_log;

pub use call::CallHandler;
pub use help::HelpHandler;
pub use register::RegisterHandler;
pub use sms::SmsHandler;
pub use status::{StatusHandler, SubscribersHandler};
pub use view_log::LogHandler;

use crate::error::AppResult;
use crate::session::{Notice, Session};
use sim_core::{LogError, Outcome};

/// Command handler trait.
pub trait CommandHandler {
    /// Command word (e.g. "register").
    fn trigger(&self) -> &str;

    /// Other words accepted for the same command.
    fn aliases(&self) -> &[&str] {
        &[]
    }

    /// One-line usage shown by `help`.
    fn usage(&self) -> &str;

    /// Check if this handler owns the command word.
    fn matches(&self, word: &str) -> bool {
        word.eq_ignore_ascii_case(self.trigger())
            || self.aliases().iter().any(|a| word.eq_ignore_ascii_case(a))
    }

    /// Execute the command with everything after the command word.
    fn execute(&self, session: &mut Session, args: &str) -> AppResult<Vec<Notice>>;
}

/// Handlers in the order `help` lists them.
pub fn default_handlers() -> Vec<Box<dyn CommandHandler>> {
    let mut handlers: Vec<Box<dyn CommandHandler>> = vec![
        Box::new(RegisterHandler),
        Box::new(CallHandler),
        Box::new(SmsHandler),
        Box::new(LogHandler),
        Box::new(StatusHandler),
        Box::new(SubscribersHandler),
    ];
    let usages = handlers.iter().map(|h| h.usage().to_string()).collect();
    handlers.push(Box::new(HelpHandler::new(usages)));
    handlers
}

/// Append one warning per failed log write.
fn push_log_warnings<T>(notices: &mut Vec<Notice>, outcome: &Outcome<T>) {
    notices.extend(outcome.warnings.iter().map(log_warning));
}

fn log_warning(e: &LogError) -> Notice {
    Notice::warning(format!("File Error: {}", e))
}

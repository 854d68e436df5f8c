//! Register command - attaches a SIM to the network.

use crate::commands::{push_log_warnings, CommandHandler};
use crate::error::AppResult;
use crate::session::{Notice, Session};

pub struct RegisterHandler;

impl CommandHandler for RegisterHandler {
    fn trigger(&self) -> &str {
        "register"
    }

    fn aliases(&self) -> &[&str] {
        &["reg"]
    }

    fn usage(&self) -> &str {
        "register <imsi>          authenticate a SIM and make it current"
    }

    fn execute(&self, session: &mut Session, args: &str) -> AppResult<Vec<Notice>> {
        let outcome = session.network.register(args)?;
        let registration = &outcome.value;

        let mut notices = Vec::new();
        if let Some(previous) = &registration.previous_tmsi {
            notices.push(Notice::info(format!(
                "SIM {} re-registered, TMSI {} released",
                registration.imsi, previous
            )));
        }
        notices.push(Notice::info(format!("Registered: TMSI = {}", registration.tmsi)));
        push_log_warnings(&mut notices, &outcome);

        session.current = Some(outcome.value.imsi);
        Ok(notices)
    }
}

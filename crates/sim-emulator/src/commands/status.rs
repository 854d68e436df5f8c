//! Status commands - current SIM and known subscribers.

use crate::commands::CommandHandler;
use crate::error::AppResult;
use crate::session::{Notice, Session};

pub struct StatusHandler;

impl CommandHandler for StatusHandler {
    fn trigger(&self) -> &str {
        "status"
    }

    fn usage(&self) -> &str {
        "status                   show the current SIM's registration"
    }

    fn execute(&self, session: &mut Session, _args: &str) -> AppResult<Vec<Notice>> {
        Ok(vec![Notice::info(session.status_line())])
    }
}

pub struct SubscribersHandler;

impl CommandHandler for SubscribersHandler {
    fn trigger(&self) -> &str {
        "subscribers"
    }

    fn aliases(&self) -> &[&str] {
        &["sims"]
    }

    fn usage(&self) -> &str {
        "subscribers              list provisioned IMSIs and their TMSIs"
    }

    fn execute(&self, session: &mut Session, _args: &str) -> AppResult<Vec<Notice>> {
        let network = &session.network;
        let lines: Vec<String> = network
            .directory()
            .imsis()
            .into_iter()
            .map(|imsi| match network.registry().tmsi(imsi.as_str()) {
                Some(tmsi) => format!("{}  TMSI {}", imsi, tmsi),
                None => format!("{}  -", imsi),
            })
            .collect();

        Ok(vec![Notice::info(lines.join("\n"))])
    }
}

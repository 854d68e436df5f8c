//! Call command - places a call from the current SIM.

use crate::commands::{push_log_warnings, CommandHandler};
use crate::error::AppResult;
use crate::session::{Notice, Session};
use sim_core::{CallStatus, SimError};

pub struct CallHandler;

impl CommandHandler for CallHandler {
    fn trigger(&self) -> &str {
        "call"
    }

    fn usage(&self) -> &str {
        "call <imsi>              call another registered SIM"
    }

    fn execute(&self, session: &mut Session, args: &str) -> AppResult<Vec<Notice>> {
        let Some(caller) = &session.current else {
            return Err(SimError::NotRegistered.into());
        };

        let target = args.trim();
        let outcome = session.network.place_call(caller.as_str(), target);

        let mut notices = vec![match &outcome.value {
            CallStatus::Connected => Notice::info(format!("Call to {} connected!", target)),
            CallStatus::Rejected(SimError::CalleeUnregistered(callee)) => {
                Notice::warning(format!("Call failed. {} is not registered.", callee))
            }
            CallStatus::Rejected(e) => Notice::error(e.to_string()),
        }];
        push_log_warnings(&mut notices, &outcome);
        Ok(notices)
    }
}

//! SMS command - sends a text from the current SIM.

use crate::commands::{push_log_warnings, CommandHandler};
use crate::error::AppResult;
use crate::session::{Notice, Session};
use sim_core::{SimError, SmsStatus};

pub struct SmsHandler;

impl CommandHandler for SmsHandler {
    fn trigger(&self) -> &str {
        "sms"
    }

    fn aliases(&self) -> &[&str] {
        &["text"]
    }

    fn usage(&self) -> &str {
        "sms <imsi> <message>     send an SMS to another registered SIM"
    }

    fn execute(&self, session: &mut Session, args: &str) -> AppResult<Vec<Notice>> {
        let Some(caller) = &session.current else {
            return Err(SimError::NotRegistered.into());
        };

        let args = args.trim();
        let (target, body) = args
            .split_once(char::is_whitespace)
            .unwrap_or((args, ""));

        let outcome = session.network.send_sms(caller.as_str(), target, body);

        let mut notices = vec![match &outcome.value {
            SmsStatus::Sent => Notice::info(format!("Message sent to {}", target)),
            SmsStatus::Rejected(SimError::CalleeUnregistered(callee)) => {
                Notice::warning(format!("SMS failed. {} not registered.", callee))
            }
            SmsStatus::Rejected(e) => Notice::error(e.to_string()),
        }];
        push_log_warnings(&mut notices, &outcome);
        Ok(notices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::RegisterHandler;
    use sim_core::{LogBook, LogChannel};

    #[test]
    fn test_sms_splits_target_and_body() {
        let mut session = Session::in_memory();
        RegisterHandler
            .execute(&mut session, "123456789012345")
            .unwrap();

        let notices = SmsHandler
            .execute(&mut session, "123456789012345   running late, sorry ")
            .unwrap();
        assert_eq!(notices, vec![Notice::info("Message sent to 123456789012345")]);

        let sms = session.network.logbook().read(LogChannel::Sms).unwrap();
        assert!(sms.trim_end().ends_with("123456789012345: running late, sorry"));
    }

    #[test]
    fn test_sms_to_unregistered_target() {
        let mut session = Session::in_memory();
        RegisterHandler
            .execute(&mut session, "123456789012345")
            .unwrap();

        let notices = SmsHandler
            .execute(&mut session, "987654321098765 hi")
            .unwrap();
        assert_eq!(
            notices,
            vec![Notice::warning("SMS failed. 987654321098765 not registered.")]
        );
    }
}

//! The simulated network: directory, registry, authenticator and log book
//! bundled into one context object.

use crate::auth::{Authenticator, Challenge, Tmsi};
use crate::directory::{Directory, Imsi};
use crate::error::{LogError, SimError, SimResult};
use crate::logbook::{LogBook, LogChannel};
use crate::registry::SessionRegistry;
use tracing::{info, instrument, warn};

/// Primary result of an operation plus any log writes that failed on the way.
#[derive(Debug)]
pub struct Outcome<T> {
    pub value: T,
    pub warnings: Vec<LogError>,
}

impl<T> Outcome<T> {
    fn new(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }
}

/// A completed registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub imsi: Imsi,
    pub tmsi: Tmsi,
    pub challenge: Challenge,
    /// TMSI replaced by this registration, if the SIM was already attached
    pub previous_tmsi: Option<Tmsi>,
}

/// Result of a call attempt.
#[derive(Debug)]
pub enum CallStatus {
    Connected,
    Rejected(SimError),
}

impl CallStatus {
    pub fn is_connected(&self) -> bool {
        matches!(self, CallStatus::Connected)
    }
}

/// Result of an SMS attempt.
#[derive(Debug)]
pub enum SmsStatus {
    Sent,
    Rejected(SimError),
}

impl SmsStatus {
    pub fn is_sent(&self) -> bool {
        matches!(self, SmsStatus::Sent)
    }
}

/// Single-threaded network context. All state lives here; nothing is global.
pub struct Network<A, L> {
    directory: Directory,
    registry: SessionRegistry,
    authenticator: A,
    logbook: L,
}

impl<A: Authenticator, L: LogBook> Network<A, L> {
    pub fn new(directory: Directory, authenticator: A, logbook: L) -> Self {
        Self {
            directory,
            registry: SessionRegistry::new(),
            authenticator,
            logbook,
        }
    }

    pub fn directory(&self) -> &Directory {
        &self.directory
    }

    pub fn registry(&self) -> &SessionRegistry {
        &self.registry
    }

    pub fn logbook(&self) -> &L {
        &self.logbook
    }

    pub fn is_registered(&self, imsi: &str) -> bool {
        self.registry.is_registered(imsi)
    }

    /// Attach a SIM: look up its Ki, run one authentication round and
    /// assign a fresh TMSI.
    ///
    /// Unknown identities are rejected before any challenge is drawn and
    /// leave the registry untouched.
    #[instrument(skip(self))]
    pub fn register(&mut self, identity: &str) -> SimResult<Outcome<Registration>> {
        let (imsi, ki) = self.directory.lookup(identity).map_err(|e| {
            warn!("Registration rejected: {}", e);
            e
        })?;

        let auth = self.authenticator.authenticate(&imsi, ki).map_err(|e| {
            warn!("Registration rejected: {}", e);
            e
        })?;

        let previous = self.registry.assign(imsi.clone(), auth.tmsi.clone());
        info!(imsi = %imsi, tmsi = %auth.tmsi, "SIM registered");

        let mut outcome = Outcome::new(Registration {
            imsi,
            tmsi: auth.tmsi,
            challenge: auth.challenge,
            previous_tmsi: previous.map(|r| r.tmsi),
        });

        let line = format!(
            "SIM {} authenticated successfully. Assigned TMSI {}",
            outcome.value.imsi, outcome.value.tmsi
        );
        self.log(&mut outcome, LogChannel::Communication, &line);
        Ok(outcome)
    }

    /// Place a call from a registered caller.
    ///
    /// Calls to an unattached callee are still logged as failed; calls from
    /// an unregistered caller are not logged at all.
    #[instrument(skip(self))]
    pub fn place_call(&self, caller: &str, callee: &str) -> Outcome<CallStatus> {
        let caller = match self.registered_caller(caller) {
            Ok(caller) => caller,
            Err(e) => return Outcome::new(CallStatus::Rejected(e)),
        };
        let callee = callee.trim();

        if self.registry.is_registered(callee) {
            let mut outcome = Outcome::new(CallStatus::Connected);
            let line = format!("Call: {} ➝ {} (Connected)", caller, callee);
            self.log(&mut outcome, LogChannel::Communication, &line);
            info!("Call {} -> {} connected", caller, callee);
            outcome
        } else {
            let mut outcome =
                Outcome::new(CallStatus::Rejected(SimError::CalleeUnregistered(callee.into())));
            let line = format!("Call: {} ➝ {} (Failed - Not Registered)", caller, callee);
            self.log(&mut outcome, LogChannel::Communication, &line);
            warn!("Call {} -> {} failed, callee not registered", caller, callee);
            outcome
        }
    }

    /// Send an SMS from a registered caller.
    ///
    /// A delivered message is written to both the communication and the SMS
    /// log; a rejected one is not logged.
    #[instrument(skip(self, body))]
    pub fn send_sms(&self, caller: &str, callee: &str, body: &str) -> Outcome<SmsStatus> {
        let caller = match self.registered_caller(caller) {
            Ok(caller) => caller,
            Err(e) => return Outcome::new(SmsStatus::Rejected(e)),
        };
        let callee = callee.trim();

        if !self.registry.is_registered(callee) {
            warn!("SMS {} -> {} failed, callee not registered", caller, callee);
            return Outcome::new(SmsStatus::Rejected(SimError::CalleeUnregistered(
                callee.into(),
            )));
        }

        let body = body.trim();
        let mut outcome = Outcome::new(SmsStatus::Sent);
        let summary = format!("SMS: {} ➝ {}: {}", caller, callee, body);
        self.log(&mut outcome, LogChannel::Communication, &summary);
        let record = format!("From {} ➝ {}: {}", caller, callee, body);
        self.log(&mut outcome, LogChannel::Sms, &record);
        info!("SMS {} -> {} sent", caller, callee);
        outcome
    }

    /// Full contents of the communication log.
    pub fn view_log(&self) -> Result<String, LogError> {
        self.logbook.read(LogChannel::Communication)
    }

    fn registered_caller(&self, caller: &str) -> SimResult<Imsi> {
        match Imsi::parse(caller) {
            Ok(imsi) if self.registry.is_registered(imsi.as_str()) => Ok(imsi),
            _ => Err(SimError::NotRegistered),
        }
    }

    fn log<T>(&self, outcome: &mut Outcome<T>, channel: LogChannel, line: &str) {
        if let Err(e) = self.logbook.append(channel, line) {
            warn!("{}", e);
            outcome.warnings.push(e);
        }
    }
}

//! Handset session: the network plus the SIM currently inserted.

use sim_core::{Directory, Imsi, LogStore, LoopbackAuthenticator, Network};
use std::fmt;

/// Network type the emulator runs.
pub type EmulatorNetwork = Network<LoopbackAuthenticator, LogStore>;

/// State shared by all commands.
pub struct Session {
    pub network: EmulatorNetwork,

    /// SIM that last registered successfully; calls and SMS originate here
    pub current: Option<Imsi>,
}

impl Session {
    pub fn new(network: EmulatorNetwork) -> Self {
        Self {
            network,
            current: None,
        }
    }

    /// In-memory session over the sample directory.
    pub fn in_memory() -> Self {
        Self::new(Network::new(
            Directory::sample(),
            LoopbackAuthenticator::new(),
            LogStore::memory(),
        ))
    }

    /// One-line registration status of the current SIM.
    pub fn status_line(&self) -> String {
        match self
            .current
            .as_ref()
            .and_then(|imsi| self.network.registry().tmsi(imsi.as_str()))
        {
            Some(tmsi) => format!("Registered: TMSI = {}", tmsi),
            None => "Status: Not Registered".into(),
        }
    }
}

/// Severity of a message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warning,
    Error,
}

/// A message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: Level,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: Level::Info,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            level: Level::Warning,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            text: text.into(),
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.level {
            Level::Info => write!(f, "{}", self.text),
            Level::Warning => write!(f, "Warning: {}", self.text),
            Level::Error => write!(f, "Error: {}", self.text),
        }
    }
}

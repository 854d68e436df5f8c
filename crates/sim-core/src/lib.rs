//! SIM card communication emulator core.
//!
//! A toy mobile network that:
//! - Looks up a subscriber's Ki by IMSI
//! - Runs a SHA-256 challenge-response round and assigns a TMSI
//! - Lets registered SIMs place calls and send SMS to each other
//! - Appends every event to plain-text communication logs

pub mod auth;
pub mod directory;
pub mod error;
pub mod logbook;
pub mod network;
pub mod registry;

pub use auth::{Authentication, Authenticator, Challenge, LoopbackAuthenticator, Tmsi};
pub use directory::{Directory, Imsi, Ki};
pub use error::{LogError, SimError, SimResult};
pub use logbook::{FileLogBook, LogBook, LogChannel, LogStore, MemoryLogBook};
pub use network::{CallStatus, Network, Outcome, Registration, SmsStatus};
pub use registry::{RegistrationRecord, SessionRegistry};

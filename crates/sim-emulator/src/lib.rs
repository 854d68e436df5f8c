//! SIM card communication emulator - interactive shell.

pub mod commands;
pub mod config;
pub mod error;
pub mod session;
pub mod shell;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use session::{Level, Notice, Session};
pub use shell::{Flow, Shell};

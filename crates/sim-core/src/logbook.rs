//! Append-only, human-readable event logs.
//!
//! Each line is `[YYYY-MM-DD HH:MM:SS] text` in local time. The file-backed
//! log book opens, appends and closes the file for every line; there is no
//! rotation and no locking between writers.

use crate::error::LogError;
use chrono::Local;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Timestamp prefix format, brackets included.
pub const TIMESTAMP_FORMAT: &str = "[%Y-%m-%d %H:%M:%S]";

/// The log a line is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogChannel {
    /// Registration, call and SMS summary events
    Communication,
    /// SMS bodies only
    Sms,
}

impl LogChannel {
    pub fn file_name(&self) -> &'static str {
        match self {
            LogChannel::Communication => "communication_log.txt",
            LogChannel::Sms => "sms_log.txt",
        }
    }
}

impl fmt::Display for LogChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogChannel::Communication => f.write_str("communication"),
            LogChannel::Sms => f.write_str("sms"),
        }
    }
}

/// Format a log line with the current local time.
///
/// Line breaks inside `text` become spaces so one call always yields exactly
/// one line.
pub fn format_line(text: &str) -> String {
    let text = text.replace(['\r', '\n'], " ");
    format!("{} {}\n", Local::now().format(TIMESTAMP_FORMAT), text)
}

/// Destination for communication events.
#[cfg_attr(test, mockall::automock)]
pub trait LogBook {
    /// Append one timestamped line.
    fn append(&self, channel: LogChannel, text: &str) -> Result<(), LogError>;

    /// Read the whole log. A log that was never written is `LogError::Read`.
    fn read(&self, channel: LogChannel) -> Result<String, LogError>;
}

/// Log book writing plain UTF-8 files into a directory.
#[derive(Debug, Clone)]
pub struct FileLogBook {
    dir: PathBuf,
}

impl FileLogBook {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self, channel: LogChannel) -> PathBuf {
        self.dir.join(channel.file_name())
    }
}

impl LogBook for FileLogBook {
    fn append(&self, channel: LogChannel, text: &str) -> Result<(), LogError> {
        let path = self.path(channel);
        let write_err = |source: std::io::Error| LogError::Write {
            channel,
            path: path.clone(),
            source,
        };

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(write_err)?;
        file.write_all(format_line(text).as_bytes())
            .map_err(write_err)?;

        debug!("Appended to {:?}", path);
        Ok(())
    }

    fn read(&self, channel: LogChannel) -> Result<String, LogError> {
        let path = self.path(channel);
        std::fs::read_to_string(&path).map_err(|source| LogError::Read {
            channel,
            path,
            source,
        })
    }
}

/// Log book kept in memory (no persistence).
#[derive(Debug, Default)]
pub struct MemoryLogBook {
    lines: RefCell<HashMap<LogChannel, Vec<String>>>,
}

impl MemoryLogBook {
    /// Create an empty log book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines written to a channel so far, timestamps included.
    pub fn lines(&self, channel: LogChannel) -> Vec<String> {
        self.lines
            .borrow()
            .get(&channel)
            .cloned()
            .unwrap_or_default()
    }

    /// Total number of lines across all channels.
    pub fn total_lines(&self) -> usize {
        self.lines.borrow().values().map(Vec::len).sum()
    }
}

impl LogBook for MemoryLogBook {
    fn append(&self, channel: LogChannel, text: &str) -> Result<(), LogError> {
        let line = format_line(text);
        self.lines
            .borrow_mut()
            .entry(channel)
            .or_default()
            .push(line.trim_end_matches('\n').to_string());
        Ok(())
    }

    fn read(&self, channel: LogChannel) -> Result<String, LogError> {
        let channels = self.lines.borrow();
        let Some(lines) = channels.get(&channel) else {
            return Err(LogError::Read {
                channel,
                path: PathBuf::from(channel.file_name()),
                source: io::Error::new(io::ErrorKind::NotFound, "nothing logged yet"),
            });
        };
        let log = lines.iter().map(|line| format!("{}\n", line)).collect();
        Ok(log)
    }
}

/// Log storage selected at startup.
#[derive(Debug)]
pub enum LogStore {
    /// Files under a directory
    File(FileLogBook),
    /// In-memory only
    Memory(MemoryLogBook),
}

impl LogStore {
    pub fn file(dir: impl Into<PathBuf>) -> Self {
        let book = FileLogBook::new(dir);
        info!("Writing communication logs to {:?}", book.dir());
        LogStore::File(book)
    }

    pub fn memory() -> Self {
        info!("Log persistence disabled, keeping logs in memory");
        LogStore::Memory(MemoryLogBook::new())
    }
}

impl LogBook for LogStore {
    fn append(&self, channel: LogChannel, text: &str) -> Result<(), LogError> {
        match self {
            LogStore::File(b) => b.append(channel, text),
            LogStore::Memory(b) => b.append(channel, text),
        }
    }

    fn read(&self, channel: LogChannel) -> Result<String, LogError> {
        match self {
            LogStore::File(b) => b.read(channel),
            LogStore::Memory(b) => b.read(channel),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn assert_timestamped(line: &str, text: &str) {
        let (stamp, rest) = line.split_at(21);
        assert!(
            NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).is_ok(),
            "bad timestamp in {:?}",
            line
        );
        assert_eq!(rest, format!(" {}", text));
    }

    #[test]
    fn test_format_line() {
        let line = format_line("hello");
        assert!(line.ends_with('\n'));
        assert_timestamped(line.trim_end_matches('\n'), "hello");
    }

    #[test]
    fn test_channel_file_names() {
        assert_eq!(LogChannel::Communication.file_name(), "communication_log.txt");
        assert_eq!(LogChannel::Sms.file_name(), "sms_log.txt");
    }

    #[test]
    fn test_file_log_book_appends() {
        let dir = tempfile::tempdir().unwrap();
        let book = FileLogBook::new(dir.path());

        book.append(LogChannel::Communication, "first").unwrap();
        book.append(LogChannel::Communication, "second").unwrap();
        book.append(LogChannel::Sms, "body").unwrap();

        let comm = book.read(LogChannel::Communication).unwrap();
        let lines: Vec<_> = comm.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_timestamped(lines[0], "first");
        assert_timestamped(lines[1], "second");

        let sms = std::fs::read_to_string(dir.path().join("sms_log.txt")).unwrap();
        assert_eq!(sms.lines().count(), 1);
    }

    #[test]
    fn test_file_log_book_keeps_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("communication_log.txt");
        std::fs::write(&path, "[2024-01-01 00:00:00] earlier\n").unwrap();

        let book = FileLogBook::new(dir.path());
        book.append(LogChannel::Communication, "later").unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("[2024-01-01 00:00:00] earlier\n"));
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_file_log_book_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let book = FileLogBook::new(dir.path().join("missing").join("nested"));

        let err = book.append(LogChannel::Sms, "lost").unwrap_err();
        assert!(matches!(err, LogError::Write { channel: LogChannel::Sms, .. }));
    }

    #[test]
    fn test_file_log_book_read_missing() {
        let dir = tempfile::tempdir().unwrap();
        let book = FileLogBook::new(dir.path());

        let err = book.read(LogChannel::Communication).unwrap_err();
        assert!(matches!(err, LogError::Read { .. }));
    }

    #[test]
    fn test_memory_log_book() {
        let book = MemoryLogBook::new();
        book.append(LogChannel::Communication, "one").unwrap();
        book.append(LogChannel::Sms, "two").unwrap();

        assert_eq!(book.total_lines(), 2);
        assert_timestamped(&book.lines(LogChannel::Sms)[0], "two");
        assert_eq!(book.read(LogChannel::Communication).unwrap().lines().count(), 1);
        assert_eq!(book.lines(LogChannel::Sms).len(), 1);
    }

    #[test]
    fn test_format_line_flattens_line_breaks() {
        let line = format_line("hi\n[2024-01-01 00:00:00] forged\r\nentry");
        assert_eq!(line.matches('\n').count(), 1);
        assert_timestamped(
            line.trim_end_matches('\n'),
            "hi [2024-01-01 00:00:00] forged  entry",
        );
    }

    #[test]
    fn test_memory_log_book_read_unwritten() {
        let book = MemoryLogBook::new();
        book.append(LogChannel::Sms, "only sms").unwrap();

        let err = book.read(LogChannel::Communication).unwrap_err();
        assert!(matches!(
            err,
            LogError::Read { channel: LogChannel::Communication, ref source, .. }
                if source.kind() == io::ErrorKind::NotFound
        ));
    }

    #[test]
    fn test_log_store_dispatch() {
        let store = LogStore::memory();
        store.append(LogChannel::Communication, "event").unwrap();
        assert!(store
            .read(LogChannel::Communication)
            .unwrap()
            .ends_with(" event\n"));
    }
}

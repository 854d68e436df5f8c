//! Session registry of attached subscribers.

use crate::auth::Tmsi;
use crate::directory::Imsi;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A subscriber that completed registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationRecord {
    pub imsi: Imsi,

    /// Temporary identity assigned on the last successful registration
    pub tmsi: Tmsi,

    /// When the current TMSI was assigned
    pub registered_at: DateTime<Utc>,
}

impl RegistrationRecord {
    /// Create a record stamped with the current time.
    pub fn new(imsi: Imsi, tmsi: Tmsi) -> Self {
        Self {
            imsi,
            tmsi,
            registered_at: Utc::now(),
        }
    }
}

/// In-memory IMSI → TMSI registry, kept for the lifetime of the process.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionRegistry {
    /// Records indexed by IMSI
    records: HashMap<Imsi, RegistrationRecord>,
}

impl SessionRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            records: HashMap::new(),
        }
    }

    /// Insert or overwrite the TMSI for a subscriber.
    ///
    /// Returns the record that was replaced, if any.
    pub fn assign(&mut self, imsi: Imsi, tmsi: Tmsi) -> Option<RegistrationRecord> {
        let record = RegistrationRecord::new(imsi.clone(), tmsi);
        self.records.insert(imsi, record)
    }

    /// Get a record by IMSI.
    pub fn get(&self, imsi: &str) -> Option<&RegistrationRecord> {
        let imsi = Imsi::parse(imsi).ok()?;
        self.records.get(&imsi)
    }

    /// Get the current TMSI of a subscriber.
    pub fn tmsi(&self, imsi: &str) -> Option<&Tmsi> {
        self.get(imsi).map(|r| &r.tmsi)
    }

    /// Check if a subscriber holds a TMSI.
    pub fn is_registered(&self, imsi: &str) -> bool {
        self.get(imsi).is_some()
    }

    /// All records, sorted by IMSI.
    pub fn list(&self) -> Vec<&RegistrationRecord> {
        let mut records: Vec<_> = self.records.values().collect();
        records.sort_by(|a, b| a.imsi.cmp(&b.imsi));
        records
    }

    /// Get the number of registered subscribers.
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

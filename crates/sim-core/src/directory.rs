//! Subscriber directory: the network's IMSI → Ki table.

use crate::error::{SimError, SimResult};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// International Mobile Subscriber Identity.
///
/// Always stored trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Imsi(String);

impl Imsi {
    /// Parse user input into an IMSI, trimming surrounding whitespace.
    pub fn parse(input: &str) -> SimResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(SimError::InvalidIdentity);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Imsi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Imsi {
    type Error = SimError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Imsi::parse(&value)
    }
}

impl From<Imsi> for String {
    fn from(imsi: Imsi) -> Self {
        imsi.0
    }
}

/// Subscriber authentication key.
///
/// Held as a `SecretString` so it never shows up in debug output or logs.
#[derive(Clone)]
pub struct Ki(SecretString);

impl Ki {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(SecretString::new(secret.into()))
    }

    /// Borrow the raw key. Only authenticators should need this.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl fmt::Debug for Ki {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Ki([REDACTED])")
    }
}

/// Immutable IMSI → Ki table established at startup.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    entries: HashMap<Imsi, Ki>,
}

impl Directory {
    /// Build a directory from `(imsi, ki)` pairs.
    ///
    /// Two entries naming the same IMSI after trimming are rejected.
    pub fn from_entries<I, S, K>(entries: I) -> SimResult<Self>
    where
        I: IntoIterator<Item = (S, K)>,
        S: AsRef<str>,
        K: Into<String>,
    {
        let mut map = HashMap::new();
        for (imsi, ki) in entries {
            let imsi = Imsi::parse(imsi.as_ref()).map_err(|_| {
                SimError::Directory("subscriber entry with an empty IMSI".into())
            })?;
            if map.contains_key(&imsi) {
                return Err(SimError::Directory(format!(
                    "duplicate subscriber entry for IMSI {}",
                    imsi
                )));
            }
            map.insert(imsi, Ki::new(ki));
        }
        Ok(Self { entries: map })
    }

    /// The three subscribers provisioned out of the box.
    pub fn sample() -> Self {
        let entries = [
            ("123456789012345", "secretkey1"),
            ("987654321098765", "secretkey2"),
            ("111122223333444", "secretkey3"),
        ]
        .into_iter()
        .map(|(imsi, ki)| (Imsi(imsi.to_string()), Ki::new(ki)))
        .collect();

        Self { entries }
    }

    /// Load a directory from a JSON object of `"imsi": "ki"` pairs.
    pub fn from_json_str(json: &str) -> SimResult<Self> {
        let raw: HashMap<String, String> = serde_json::from_str(json)?;
        Self::from_entries(raw)
    }

    /// Load a directory from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| SimError::Directory(format!("failed to read {:?}: {}", path, e)))?;
        Self::from_json_str(&json)
    }

    /// Look up the Ki for an identity.
    ///
    /// The identity is trimmed first; blank input is `InvalidIdentity`,
    /// an unknown one is `IdentityNotFound`.
    pub fn lookup(&self, identity: &str) -> SimResult<(Imsi, &Ki)> {
        let imsi = Imsi::parse(identity)?;
        match self.entries.get(&imsi) {
            Some(ki) => Ok((imsi, ki)),
            None => Err(SimError::IdentityNotFound(imsi.0)),
        }
    }

    /// Check if an identity is provisioned.
    pub fn contains(&self, identity: &str) -> bool {
        self.lookup(identity).is_ok()
    }

    /// Get the number of provisioned subscribers.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no subscriber is provisioned.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Known identities, sorted.
    pub fn imsis(&self) -> Vec<&Imsi> {
        let mut imsis: Vec<_> = self.entries.keys().collect();
        imsis.sort();
        imsis
    }
}

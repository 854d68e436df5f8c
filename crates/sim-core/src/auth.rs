//! Challenge-response authentication and TMSI assignment.

use crate::directory::{Imsi, Ki};
use crate::error::{SimError, SimResult};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use std::ops::RangeInclusive;
use tracing::debug;

/// Range the 6-digit RAND challenge is drawn from.
pub const CHALLENGE_RANGE: RangeInclusive<u32> = 100_000..=999_999;

/// Range the 5-digit TMSI is drawn from.
pub const TMSI_RANGE: RangeInclusive<u32> = 10_000..=99_999;

/// Random challenge (RAND) sent to the SIM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Challenge(String);

impl Challenge {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Challenge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Temporary Mobile Subscriber Identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tmsi(String);

impl Tmsi {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Tmsi {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Result of a successful authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Authentication {
    pub challenge: Challenge,
    pub tmsi: Tmsi,
}

/// Signed response: lowercase hex SHA-256 of `challenge || ki`.
pub fn sres(challenge: &Challenge, ki: &Ki) -> String {
    let mut hasher = Sha256::new();
    hasher.update(challenge.as_str().as_bytes());
    hasher.update(ki.expose().as_bytes());
    hex::encode(hasher.finalize())
}

/// Verifies that a subscriber holds its Ki and hands out a TMSI.
#[cfg_attr(test, mockall::automock)]
pub trait Authenticator {
    /// Run a single challenge-response round. No retries.
    fn authenticate(&mut self, imsi: &Imsi, ki: &Ki) -> SimResult<Authentication>;
}

/// Authenticator whose verifier recomputes the SIM's own response.
///
/// Both sides hash the same challenge with the same Ki taken from the
/// directory, so verification always succeeds for a known subscriber.
/// Swap in another `Authenticator` to get a check that can fail.
pub struct LoopbackAuthenticator<R = StdRng> {
    rng: R,
}

impl LoopbackAuthenticator<StdRng> {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic draws, for tests and replays.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for LoopbackAuthenticator<StdRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> LoopbackAuthenticator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    fn draw_challenge(&mut self) -> Challenge {
        Challenge(self.rng.gen_range(CHALLENGE_RANGE).to_string())
    }

    fn draw_tmsi(&mut self) -> Tmsi {
        Tmsi(self.rng.gen_range(TMSI_RANGE).to_string())
    }
}

impl<R: Rng> Authenticator for LoopbackAuthenticator<R> {
    fn authenticate(&mut self, imsi: &Imsi, ki: &Ki) -> SimResult<Authentication> {
        let challenge = self.draw_challenge();
        debug!(imsi = %imsi, challenge = %challenge, "Issued authentication challenge");

        let response = sres(&challenge, ki);
        let expected = sres(&challenge, ki);
        if response != expected {
            return Err(SimError::AuthenticationFailed(imsi.to_string()));
        }

        let tmsi = self.draw_tmsi();
        Ok(Authentication { challenge, tmsi })
    }
}

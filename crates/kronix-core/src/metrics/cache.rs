//! Memoized dashboard derivation.
//!
//! The dashboard is a pure function of the three collections, the date and
//! the sleep target. The cache keys it by a SHA-256 digest of exactly those
//! inputs and recomputes only when the digest changes.

use std::sync::Arc;

use chrono::{NaiveDate, TimeZone};
use sha2::{Digest, Sha256};

use super::{Dashboard, DEFAULT_SLEEP_TARGET_HOURS};
use crate::store::Snapshot;

pub struct DerivationCache<Tz: TimeZone> {
    tz: Tz,
    sleep_target_hours: f64,
    cached: Option<(String, Arc<Dashboard>)>,
    computations: u64,
}

impl<Tz: TimeZone> DerivationCache<Tz> {
    pub fn new(tz: Tz) -> Self {
        Self::with_sleep_target(tz, DEFAULT_SLEEP_TARGET_HOURS)
    }

    pub fn with_sleep_target(tz: Tz, sleep_target_hours: f64) -> Self {
        Self {
            tz,
            sleep_target_hours,
            cached: None,
            computations: 0,
        }
    }

    /// How many times the dashboard was actually computed.
    pub fn computations(&self) -> u64 {
        self.computations
    }

    /// Digest of every input the dashboard depends on.
    pub fn input_key(&self, snapshot: &Snapshot, today: NaiveDate) -> String {
        let mut hasher = Sha256::new();
        for part in [
            serde_json::to_vec(&*snapshot.tasks),
            serde_json::to_vec(&*snapshot.habits),
            serde_json::to_vec(&*snapshot.sleep),
        ] {
            // Plain records always serialize.
            hasher.update(part.unwrap_or_default());
            hasher.update([0u8]);
        }
        hasher.update(today.to_string().as_bytes());
        hasher.update(self.sleep_target_hours.to_le_bytes());
        hex::encode(hasher.finalize())
    }

    pub fn dashboard(&mut self, snapshot: &Snapshot, today: NaiveDate) -> Arc<Dashboard> {
        let key = self.input_key(snapshot, today);
        if let Some((cached_key, dashboard)) = &self.cached {
            if *cached_key == key {
                return Arc::clone(dashboard);
            }
        }

        let dashboard = Arc::new(Dashboard::compute(
            snapshot,
            today,
            &self.tz,
            self.sleep_target_hours,
        ));
        self.computations += 1;
        tracing::debug!(key = %&key[..12], computations = self.computations, "recomputed dashboard");
        self.cached = Some((key, Arc::clone(&dashboard)));
        dashboard
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

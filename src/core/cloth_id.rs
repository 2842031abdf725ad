//! Cloth identifier generation
//!
//! Identifiers have the shape `LUX-<CODE>-<epochMillis>-<NNN>`:
//!
//! - `CODE` is the category's three-letter code (EVG, CDR, FDR)
//! - `epochMillis` is the generation instant in milliseconds, unpadded
//! - `NNN` is a uniform random number in `[0, 999]`, zero-padded
//!
//! Uniqueness is best-effort. No check is made against the store; two
//! intakes in the same millisecond collide with probability 1/1000.

use crate::core::category::ClothCategory;
use chrono::{DateTime, TimeZone, Utc};
use rand::Rng;
use std::fmt;
use std::sync::Arc;

/// Prefix shared by every generated id
pub const CLOTH_ID_PREFIX: &str = "LUX";

/// Upper bound (exclusive) of the random suffix
const SUFFIX_RANGE: u16 = 1000;

/// Source of the instant and random suffix used for a new id
///
/// The default [`SystemIdSource`] reads the wall clock and a thread-local RNG.
/// Tests inject a fixed source to pin both.
pub trait IdSource: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;

    /// Random suffix in `0..1000`
    fn suffix(&self) -> u16;
}

/// Wall clock and `rand::thread_rng`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemIdSource;

impl IdSource for SystemIdSource {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn suffix(&self) -> u16 {
        rand::thread_rng().gen_range(0..SUFFIX_RANGE)
    }
}

/// Deterministic source for tests and replays
#[derive(Debug, Clone, Copy)]
pub struct FixedIdSource {
    pub millis: i64,
    pub suffix: u16,
}

impl IdSource for FixedIdSource {
    fn now(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.millis)
            .single()
            .unwrap_or_else(Utc::now)
    }

    fn suffix(&self) -> u16 {
        self.suffix % SUFFIX_RANGE
    }
}

/// A structured cloth id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClothId {
    pub category: ClothCategory,
    pub millis: i64,
    pub suffix: u16,
}

impl ClothId {
    /// Split a stored id back into its parts
    ///
    /// Returns `None` for anything that does not follow the generated shape,
    /// including ids written with an unknown category code.
    pub fn parse(raw: &str) -> Option<Self> {
        let mut parts = raw.split('-');
        if parts.next()? != CLOTH_ID_PREFIX {
            return None;
        }
        let category = ClothCategory::from_code(parts.next()?)?;

        let millis_part = parts.next()?;
        if millis_part.is_empty() || !millis_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let millis = millis_part.parse().ok()?;

        let suffix_part = parts.next()?;
        if suffix_part.len() != 3 || !suffix_part.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        let suffix = suffix_part.parse().ok()?;

        if parts.next().is_some() {
            return None;
        }

        Some(Self {
            category,
            millis,
            suffix,
        })
    }
}

impl fmt::Display for ClothId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}-{:03}",
            CLOTH_ID_PREFIX,
            self.category.code(),
            self.millis,
            self.suffix
        )
    }
}

/// Generates cloth ids from an [`IdSource`]
#[derive(Clone)]
pub struct ClothIdGenerator {
    source: Arc<dyn IdSource>,
}

impl ClothIdGenerator {
    pub fn new(source: impl IdSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }

    /// Generate an id and return it with the instant it was stamped at
    ///
    /// Intake uses the same instant for `date` and `createdAt`.
    pub fn generate_at(&self, category: ClothCategory) -> (ClothId, DateTime<Utc>) {
        let now = self.source.now();
        let id = ClothId {
            category,
            millis: now.timestamp_millis(),
            suffix: self.source.suffix(),
        };
        (id, now)
    }

    pub fn generate(&self, category: ClothCategory) -> ClothId {
        self.generate_at(category).0
    }
}

impl Default for ClothIdGenerator {
    fn default() -> Self {
        Self::new(SystemIdSource)
    }
}

impl fmt::Debug for ClothIdGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClothIdGenerator").finish_non_exhaustive()
    }
}

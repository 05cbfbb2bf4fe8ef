//! Age cutoff for prune-by-age
//!
//! The builder accepts a Unix timestamp, a date or date-time, or a relative
//! duration. Values are checked here before anything is run and passed on
//! unchanged.

use crate::error::{CacheTreeError, CacheTreeResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};
use std::fmt;
use std::str::FromStr;

/// Interpreted form of a cutoff
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutoffKind {
    /// Absolute point in time
    At(DateTime<Utc>),
    /// Relative to now
    Age(TimeDelta),
}

/// A validated `--until` value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cutoff {
    raw: String,
    kind: CutoffKind,
}

impl Cutoff {
    /// Value exactly as given, for the builder's `until` filter
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    #[cfg(test)]
    pub fn kind(&self) -> CutoffKind {
        self.kind
    }

    /// Absolute instant the cutoff refers to, relative to `now`.
    ///
    /// `None` when the age reaches past the earliest representable time.
    pub fn instant(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self.kind {
            CutoffKind::At(at) => Some(at),
            CutoffKind::Age(age) => now.checked_sub_signed(age),
        }
    }
}

impl fmt::Display for Cutoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Cutoff {
    type Err = CacheTreeError;

    fn from_str(s: &str) -> CacheTreeResult<Self> {
        let raw = s.trim();
        if raw.is_empty() {
            return Err(CacheTreeError::InvalidCutoff("empty value".to_string()));
        }

        let kind = parse_timestamp(raw)
            .or_else(|| parse_date(raw))
            .or_else(|| parse_duration(raw).map(CutoffKind::Age))
            .ok_or_else(|| CacheTreeError::InvalidCutoff(raw.to_string()))?;

        let cutoff = Self {
            raw: raw.to_string(),
            kind,
        };
        if cutoff.instant(Utc::now()).is_none() {
            return Err(CacheTreeError::InvalidCutoff(format!(
                "{} reaches before the earliest supported time",
                raw
            )));
        }
        Ok(cutoff)
    }
}

fn parse_timestamp(s: &str) -> Option<CutoffKind> {
    if !s.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let secs: i64 = s.parse().ok()?;
    DateTime::from_timestamp(secs, 0).map(CutoffKind::At)
}

fn parse_date(s: &str) -> Option<CutoffKind> {
    if let Ok(at) = DateTime::parse_from_rfc3339(s) {
        return Some(CutoffKind::At(at.with_timezone(&Utc)));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(at) = NaiveDateTime::parse_from_str(s, format) {
            return Some(CutoffKind::At(at.and_utc()));
        }
    }
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()?;
    Some(CutoffKind::At(date.and_hms_opt(0, 0, 0)?.and_utc()))
}

/// `<number><unit>` groups with units `h`, `m`, `s`, e.g. `1h30m`
fn parse_duration(s: &str) -> Option<TimeDelta> {
    let mut total = TimeDelta::zero();
    let mut digits = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
            continue;
        }
        if digits.is_empty() {
            return None;
        }
        let n: i64 = digits.parse().ok()?;
        digits.clear();
        let part = match c {
            'h' => TimeDelta::try_hours(n)?,
            'm' => TimeDelta::try_minutes(n)?,
            's' => TimeDelta::try_seconds(n)?,
            _ => return None,
        };
        total = total.checked_add(&part)?;
    }

    // Trailing number without unit
    if !digits.is_empty() {
        return None;
    }
    Some(total)
}

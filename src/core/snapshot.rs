//! Exchange rate snapshot as returned by the rate service and kept in the cache file.

use super::error::{Error, Result};
use chrono::{DateTime, TimeDelta, Utc};
use serde::Deserialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RateSnapshot {
    /// Human readable UTC time of the last rate update.
    #[serde(rename = "time_last_update_utc")]
    pub timestamp: String,
    #[serde(rename = "time_next_update_utc", default)]
    pub next_update: Option<String>,
    #[serde(default)]
    pub base_code: Option<String>,
    /// Multipliers relative to the base currency, keyed by currency code.
    pub rates: BTreeMap<String, f64>,
}

impl RateSnapshot {
    /// Decodes a snapshot from a JSON document.
    ///
    /// Currency codes are upper-cased. A table with no rates, with a rate that is not
    /// a positive finite number, or with two codes differing only by case is rejected.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let mut snapshot: RateSnapshot = serde_json::from_slice(bytes)?;

        if snapshot.rates.is_empty() {
            return Err(Error::Decode("rate table is empty".to_string()));
        }

        let mut rates = BTreeMap::new();
        for (code, rate) in snapshot.rates {
            if !(rate.is_finite() && rate > 0.0) {
                return Err(Error::Decode(format!("rate for {code} is not usable: {rate}")));
            }
            let code = code.to_ascii_uppercase();
            if rates.insert(code.clone(), rate).is_some() {
                return Err(Error::Decode(format!("duplicate currency code {code}")));
            }
        }
        snapshot.rates = rates;
        snapshot.base_code = snapshot.base_code.map(|c| c.to_ascii_uppercase());

        Ok(snapshot)
    }

    /// Currency codes present in the snapshot, sorted.
    pub fn supported_currencies(&self) -> Vec<String> {
        self.rates.keys().cloned().collect()
    }

    /// Report header: the update time, then the base currency and next update when known.
    pub fn header(&self) -> String {
        let details: Vec<String> = [
            self.base_code.as_ref().map(|b| format!("Base currency: {b}")),
            self.next_update.as_ref().map(|n| format!("Next update: {n}")),
        ]
        .into_iter()
        .flatten()
        .collect();

        if details.is_empty() {
            self.timestamp.clone()
        } else {
            format!("{}\n{}", self.timestamp, details.join(", "))
        }
    }

    pub fn rate(&self, code: &str) -> Option<f64> {
        self.rates.get(code).copied()
    }

    /// Time elapsed between the last rate update and `now`, if the timestamp is RFC 2822.
    pub fn age(&self, now: DateTime<Utc>) -> Option<TimeDelta> {
        let updated = DateTime::parse_from_rfc2822(&self.timestamp).ok()?;
        Some(now.signed_duration_since(updated.with_timezone(&Utc)))
    }
}

/// Renders an age as a short phrase such as "3 hours".
pub fn describe_age(age: TimeDelta) -> String {
    let plural = |n: i64, unit: &str| {
        if n == 1 {
            format!("1 {unit}")
        } else {
            format!("{n} {unit}s")
        }
    };

    if age.num_days() > 0 {
        plural(age.num_days(), "day")
    } else if age.num_hours() > 0 {
        plural(age.num_hours(), "hour")
    } else {
        plural(age.num_minutes().max(0), "minute")
    }
}

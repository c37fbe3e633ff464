use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

/// One exposed data point. Labels are kept sorted by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub name: String,
    pub help: String,
    pub labels: BTreeMap<String, String>,
    pub value: f64,
}

impl Sample {
    pub fn new(
        name: impl Into<String>,
        help: impl Into<String>,
        labels: BTreeMap<String, String>,
        value: f64,
    ) -> Self {
        Sample {
            name: name.into(),
            help: help.into(),
            labels,
            value,
        }
    }
}

/// The complete output of one successful refresh cycle.
///
/// Snapshots are never modified after creation; a newer cycle replaces the
/// whole value.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub samples: Vec<Sample>,
    /// Number of monitors the samples were computed from.
    pub monitors: usize,
    pub produced_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(samples: Vec<Sample>, monitors: usize) -> Self {
        Snapshot {
            samples,
            monitors,
            produced_at: Utc::now(),
        }
    }
}

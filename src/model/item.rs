// File: ./src/model/item.rs
use crate::model::time::hhmm;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A raw record as delivered by the events endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: u64,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    /// Minutes.
    pub duration: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub id: u64,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    pub duration: u32,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
}

/// An event ready for absolute positioning inside its overlap group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedEvent {
    pub id: u64,
    #[serde(with = "hhmm")]
    pub start: NaiveTime,
    pub duration: u32,
    #[serde(with = "hhmm")]
    pub end: NaiveTime,
    pub column: usize,
    pub total_columns: usize,
}

impl Event {
    pub fn new(id: u64, start: NaiveTime, duration: u32) -> Self {
        Self {
            id,
            start,
            duration,
        }
    }
}

impl TimedEvent {
    /// Overlap test used by the grouper, with `self` the event already in a group
    /// and `other` the candidate. Not symmetric for every edge case.
    pub fn overlaps_with(&self, other: &TimedEvent) -> bool {
        (self.start <= other.start && self.end > other.start)
            || (self.start < other.end && self.end >= other.end)
            || (self.start >= other.start && self.end <= other.end)
    }

    pub fn place(self, column: usize, total_columns: usize) -> PlacedEvent {
        PlacedEvent {
            id: self.id,
            start: self.start,
            duration: self.duration,
            end: self.end,
            column,
            total_columns,
        }
    }
}

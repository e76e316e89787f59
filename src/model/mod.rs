// File: ./src/model/mod.rs
// Aggregates the split model files
pub mod item;
pub mod time;

pub use item::{Event, PlacedEvent, TimedEvent};
pub use time::{format_hhmm, parse_hhmm};

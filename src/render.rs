// File: ./src/render.rs
// Percentage geometry for the day view, independent of any drawing backend
use crate::model::PlacedEvent;
use crate::model::time::minutes_since_midnight;
use serde::{Deserialize, Serialize};

/// The visible slice of the day and how it is sliced into rows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DayWindow {
    pub start_hour: u32,
    pub end_hour: u32,
    pub slot_minutes: u32,
    /// Horizontal gap between columns, in percent.
    pub margin_percent: f64,
}

impl Default for DayWindow {
    fn default() -> Self {
        Self {
            start_hour: 9,
            end_hour: 21,
            slot_minutes: 30,
            margin_percent: 2.0,
        }
    }
}

/// Position and size of an event rectangle, all in percent of the calendar area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EventBox {
    pub top: f64,
    pub height: f64,
    pub left: f64,
    pub width: f64,
}

/// Same rectangle in whole terminal cells, relative to the area origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

impl DayWindow {
    pub fn total_minutes(&self) -> u32 {
        self.end_hour.saturating_sub(self.start_hour) * 60
    }

    /// Row labels from `start_hour:00` through the last slot of `end_hour`.
    pub fn slot_labels(&self) -> Vec<String> {
        let step = self.slot_minutes.clamp(1, 60) as usize;
        let mut labels = Vec::new();
        for hour in self.start_hour..=self.end_hour {
            for minute in (0..60).step_by(step) {
                labels.push(format!("{:02}:{:02}", hour, minute));
            }
        }
        labels
    }

    pub fn event_box(&self, event: &PlacedEvent) -> EventBox {
        let origin = i64::from(self.start_hour) * 60;
        let total = f64::from(self.total_minutes().max(1));
        let start = i64::from(minutes_since_midnight(event.start)) - origin;
        let mut end = i64::from(minutes_since_midnight(event.end)) - origin;
        if end < start {
            // Wrapped past midnight: draw down to the bottom of the window.
            end = i64::from(self.total_minutes());
        }

        let columns = event.total_columns.max(1) as f64;
        let width = 100.0 / columns - self.margin_percent;
        let left = event.column as f64 * (width + self.margin_percent);

        EventBox {
            top: start as f64 / total * 100.0,
            height: (end - start) as f64 / total * 100.0,
            left,
            width,
        }
    }
}

impl EventBox {
    /// Maps to cells, clipping to the area. `None` when nothing remains visible.
    pub fn to_cells(&self, area_width: u16, area_height: u16) -> Option<CellRect> {
        if self.top >= 100.0 || self.top + self.height <= 0.0 {
            return None;
        }
        let w = f64::from(area_width);
        let h = f64::from(area_height);

        let x0 = (self.left / 100.0 * w).round().clamp(0.0, w);
        let x1 = ((self.left + self.width) / 100.0 * w).round().clamp(0.0, w);
        let y0 = (self.top / 100.0 * h).round().clamp(0.0, h);
        let y1 = ((self.top + self.height) / 100.0 * h).round().clamp(0.0, h);

        // Short events still get one row and one column.
        let width = (x1 - x0).max(1.0).min(w - x0);
        let height = (y1 - y0).max(1.0).min(h - y0);
        if width < 1.0 || height < 1.0 {
            return None;
        }

        Some(CellRect {
            x: x0 as u16,
            y: y0 as u16,
            width: width as u16,
            height: height as u16,
        })
    }
}

pub fn label(event: &PlacedEvent) -> String {
    format!("ID: {}", event.id)
}

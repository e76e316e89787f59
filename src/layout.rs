// File: ./src/layout.rs
// Turns raw events into column-packed events: end times -> overlap groups -> columns
use crate::model::time::{add_minutes, format_hhmm};
use crate::model::{Event, PlacedEvent, TimedEvent};
use tracing::{debug, warn};

/// Derives each event's end time from its start and duration.
pub fn calculate_end_times(events: Vec<Event>) -> Vec<TimedEvent> {
    events
        .into_iter()
        .map(|event| {
            let (end, wrapped) = add_minutes(event.start, event.duration);
            if wrapped {
                warn!(
                    id = event.id,
                    start = %format_hhmm(event.start),
                    end = %format_hhmm(end),
                    "event runs past midnight, end time wraps"
                );
            }
            TimedEvent {
                id: event.id,
                start: event.start,
                duration: event.duration,
                end,
            }
        })
        .collect()
}

/// Greedy single pass: each event joins the first existing group holding any
/// member it overlaps, otherwise it opens a new group. Groups are never merged
/// afterwards, so an event bridging two earlier groups only joins the first.
pub fn find_overlapping_groups(events: Vec<TimedEvent>) -> Vec<Vec<TimedEvent>> {
    let mut groups: Vec<Vec<TimedEvent>> = Vec::new();

    for current in events {
        let found = groups
            .iter_mut()
            .find(|group| group.iter().any(|member| member.overlaps_with(&current)));

        match found {
            Some(group) => group.push(current),
            None => groups.push(vec![current]),
        }
    }

    groups
}

/// Numbers events within each group by start time. Output stays grouped, in grouper order.
pub fn assign_columns(groups: Vec<Vec<TimedEvent>>) -> Vec<PlacedEvent> {
    let mut placed = Vec::with_capacity(groups.iter().map(Vec::len).sum());

    for mut group in groups {
        // sort_by_key is stable: equal starts keep input order
        group.sort_by_key(|event| event.start);
        let total = group.len();
        placed.extend(
            group
                .into_iter()
                .enumerate()
                .map(|(column, event)| event.place(column, total)),
        );
    }

    placed
}

pub fn layout_events(events: Vec<Event>) -> Vec<PlacedEvent> {
    let count = events.len();
    let timed = calculate_end_times(events);
    let groups = find_overlapping_groups(timed);
    debug!(events = count, groups = groups.len(), "grouped overlapping events");
    assign_columns(groups)
}

use chrono::NaiveTime;
use daycal::layout::{assign_columns, calculate_end_times, find_overlapping_groups, layout_events};
use daycal::model::{Event, PlacedEvent, parse_hhmm};
use std::collections::HashMap;

fn ev(id: u64, start: &str, duration: u32) -> Event {
    Event::new(id, parse_hhmm(start).unwrap(), duration)
}

fn t(s: &str) -> NaiveTime {
    parse_hhmm(s).unwrap()
}

fn by_id(placed: &[PlacedEvent]) -> HashMap<u64, (usize, usize)> {
    placed
        .iter()
        .map(|p| (p.id, (p.column, p.total_columns)))
        .collect()
}

#[test]
fn test_end_time_is_start_plus_duration() {
    let timed = calculate_end_times(vec![ev(1, "09:00", 30), ev(2, "10:45", 90), ev(3, "13:10", 0)]);
    assert_eq!(timed[0].end, t("09:30"));
    assert_eq!(timed[1].end, t("12:15"));
    assert_eq!(timed[2].end, t("13:10"));
    assert_eq!(
        timed.iter().map(|e| e.id).collect::<Vec<_>>(),
        vec![1, 2, 3],
        "Order must be preserved"
    );
}

#[test]
fn test_end_time_wraps_past_midnight() {
    let timed = calculate_end_times(vec![ev(1, "23:30", 60)]);
    assert_eq!(timed[0].end, t("00:30"));
}

#[test]
fn test_two_overlapping_events_share_a_group() {
    let placed = layout_events(vec![ev(1, "09:00", 30), ev(2, "09:15", 30)]);
    let cols = by_id(&placed);
    assert_eq!(cols[&1], (0, 2));
    assert_eq!(cols[&2], (1, 2));
}

#[test]
fn test_disjoint_events_get_singleton_groups() {
    let placed = layout_events(vec![ev(1, "09:00", 30), ev(2, "10:00", 30)]);
    assert_eq!(placed.len(), 2);
    for p in &placed {
        assert_eq!((p.column, p.total_columns), (0, 1));
    }
}

#[test]
fn test_chain_of_overlaps_lands_in_one_group() {
    // 1 overlaps 2, 2 overlaps 3, 1 and 3 are apart
    let events = vec![ev(1, "09:00", 60), ev(2, "09:30", 60), ev(3, "10:15", 45)];
    let timed = calculate_end_times(events.clone());
    assert!(!timed[0].overlaps_with(&timed[2]));
    assert!(!timed[2].overlaps_with(&timed[0]));

    let groups = find_overlapping_groups(timed);
    assert_eq!(groups.len(), 1);

    let cols = by_id(&layout_events(events));
    assert_eq!(cols[&1], (0, 3));
    assert_eq!(cols[&2], (1, 3));
    assert_eq!(cols[&3], (2, 3));
}

#[test]
fn test_empty_input_yields_empty_output() {
    assert!(find_overlapping_groups(vec![]).is_empty());
    assert!(assign_columns(vec![]).is_empty());
    assert!(layout_events(vec![]).is_empty());
}

#[test]
fn test_back_to_back_events_do_not_overlap() {
    let placed = layout_events(vec![ev(1, "09:00", 30), ev(2, "09:30", 30)]);
    let cols = by_id(&placed);
    assert_eq!(cols[&1], (0, 1));
    assert_eq!(cols[&2], (0, 1));
}

#[test]
fn test_containing_event_joins_group() {
    let timed = calculate_end_times(vec![ev(1, "10:00", 15), ev(2, "09:00", 120)]);
    assert!(timed[0].overlaps_with(&timed[1]));
    let groups = find_overlapping_groups(timed);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].len(), 2);
}

#[test]
fn test_greedy_grouping_never_merges_earlier_groups() {
    // 1 and 2 are apart; 3 bridges both but only joins the first group it matches.
    let events = vec![ev(1, "09:00", 30), ev(2, "10:00", 30), ev(3, "09:15", 60)];
    let groups = find_overlapping_groups(calculate_end_times(events));
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].iter().map(|e| e.id).collect::<Vec<_>>(), vec![1, 3]);
    assert_eq!(groups[1].iter().map(|e| e.id).collect::<Vec<_>>(), vec![2]);
}

#[test]
fn test_columns_sorted_by_start_with_stable_ties() {
    let placed = layout_events(vec![
        ev(1, "09:30", 60),
        ev(2, "09:00", 60),
        ev(3, "09:00", 45),
    ]);
    let order: Vec<u64> = placed.iter().map(|p| p.id).collect();
    assert_eq!(order, vec![2, 3, 1]);
    let cols = by_id(&placed);
    assert_eq!(cols[&2], (0, 3));
    assert_eq!(cols[&3], (1, 3));
    assert_eq!(cols[&1], (2, 3));
}

#[test]
fn test_output_is_grouped_in_grouper_order() {
    let placed = layout_events(vec![
        ev(1, "14:00", 30),
        ev(2, "09:00", 30),
        ev(3, "14:15", 30),
    ]);
    let order: Vec<u64> = placed.iter().map(|p| p.id).collect();
    assert_eq!(order, vec![1, 3, 2], "Groups are not re-sorted globally");
}

#[test]
fn test_columns_form_a_permutation_per_group() {
    let events = vec![
        ev(1, "09:00", 120),
        ev(2, "09:30", 30),
        ev(3, "10:00", 30),
        ev(4, "10:30", 30),
        ev(5, "13:00", 60),
        ev(6, "13:30", 15),
        ev(7, "18:00", 30),
    ];
    let groups = find_overlapping_groups(calculate_end_times(events));
    for group in groups {
        let size = group.len();
        let mut cols: Vec<usize> = assign_columns(vec![group])
            .into_iter()
            .inspect(|p| assert_eq!(p.total_columns, size))
            .map(|p| p.column)
            .collect();
        cols.sort_unstable();
        assert_eq!(cols, (0..size).collect::<Vec<_>>());
    }
}

#[test]
fn test_layout_is_idempotent() {
    let events = vec![
        ev(1, "09:00", 45),
        ev(2, "09:15", 30),
        ev(3, "11:00", 30),
        ev(4, "09:15", 90),
    ];
    assert_eq!(layout_events(events.clone()), layout_events(events));
}

#[test]
fn test_event_wire_format() {
    let events: Vec<Event> =
        serde_json::from_str(r#"[{"id":7,"start":"08:05","duration":25}]"#).unwrap();
    assert_eq!(events, vec![ev(7, "08:05", 25)]);

    let placed = layout_events(events);
    let json = serde_json::to_value(&placed[0]).unwrap();
    assert_eq!(json["end"], "08:30");
    assert_eq!(json["totalColumns"], 1);
    assert_eq!(json["column"], 0);
}

#[test]
fn test_malformed_start_is_rejected() {
    let res: Result<Vec<Event>, _> =
        serde_json::from_str(r#"[{"id":1,"start":"9am","duration":30}]"#);
    assert!(res.is_err());
    let res: Result<Vec<Event>, _> =
        serde_json::from_str(r#"[{"id":1,"start":"09:00","duration":-5}]"#);
    assert!(res.is_err());
}

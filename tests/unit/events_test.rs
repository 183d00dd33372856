//! Tests for event sinks

use cafe_seating::core::{
    build_event, share_sink, EventSink, InMemoryEventSink, SeatingEventKind, TracingEventSink,
};

#[test]
fn test_in_memory_event_sink() {
    let mut sink = InMemoryEventSink::new(10);

    let event = build_event(
        SeatingEventKind::Seated,
        Some("Maria"),
        Some(1),
        Some("first guest".to_string()),
    );

    sink.record(event.clone());
    assert_eq!(sink.events().len(), 1);

    let events = sink.events();
    assert_eq!(events[0].event_id, event.event_id);
    assert_eq!(events[0].guest.as_deref(), Some("Maria"));
    assert_eq!(events[0].table, Some(1));
    assert_eq!(events[0].detail.as_deref(), Some("first guest"));
    assert!(events[0].created_at_ms > 0);
}

#[test]
fn test_shared_sink_records_through_handle() {
    let sink = InMemoryEventSink::new(10);
    let shared = share_sink(sink.clone());

    shared.lock().record(build_event(SeatingEventKind::Queued, Some("Oleg"), None, None));
    shared.lock().record(build_event(SeatingEventKind::Closed, None, None, None));

    let kinds: Vec<_> = sink.events().iter().map(|e| e.kind).collect();
    assert_eq!(kinds, vec![SeatingEventKind::Queued, SeatingEventKind::Closed]);
}

#[test]
fn test_tracing_sink_accepts_events() {
    let mut sink = TracingEventSink;
    sink.record(build_event(SeatingEventKind::Departed, Some("Ilya"), Some(4), None));
}

#[test]
fn test_event_serializes_kind_in_snake_case() {
    let event = build_event(SeatingEventKind::Departed, Some("Ilya"), Some(4), None);
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["kind"], "departed");
    assert_eq!(json["table"], 4);
}

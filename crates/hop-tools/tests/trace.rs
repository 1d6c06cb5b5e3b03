use hop_core::{map, Goal, State};
use hop_tools::{
    render_goal, render_methods, render_operators, render_state, NullTraceSink, TraceEvent,
    TraceLog, TraceSink, VecTraceSink,
};

#[test]
fn vec_sink_collects_in_order() {
    let mut sink = VecTraceSink::default();
    sink.emit(TraceEvent::new(0, "seek").with_subject("[(get a)]"));
    sink.emit(TraceEvent::new(1, "method.failed").with_detail("get_by_pickup"));
    sink.emit(TraceEvent::new(1, "method.applied").with_detail("get_by_unstack"));

    assert_eq!(sink.events.len(), 3);
    let methods: Vec<&str> = sink
        .tagged("method.applied")
        .map(|e| e.detail.as_str())
        .collect();
    assert_eq!(methods, vec!["get_by_unstack"]);
}

#[test]
fn sinks_compose_through_references() {
    fn emit_twice(mut sink: impl TraceSink) {
        sink.emit(TraceEvent::new(2, "seek"));
        sink.emit(TraceEvent::new(5, "seek"));
    }

    let mut log = TraceLog::default();
    emit_twice(&mut log);
    assert_eq!(log.events.len(), 2);
    assert_eq!(log.max_depth(), 5);

    let mut boxed: Box<dyn TraceSink> = Box::new(NullTraceSink);
    emit_twice(&mut boxed);
}

#[test]
fn renders_state_lines() {
    let s = State::new("state1")
        .with("holding", false)
        .with("pos", map! { "a" => "table" });
    assert_eq!(
        render_state(&s, 4),
        "    state1.holding = false\n    state1.pos = {a: table}\n"
    );
}

#[test]
fn renders_goal_without_indent() {
    let g = Goal::new("goal1b").with("pos", map! { "b" => "a", "c" => "b" });
    assert_eq!(render_goal(&g, 0), "goal1b.pos = {b: a, c: b}\n");
}

#[test]
fn renders_registry_tables() {
    assert_eq!(
        render_operators(["pickup", "putdown"]),
        "OPERATORS: pickup, putdown"
    );
    let table = render_methods([("get", vec!["get_by_pickup", "get_by_unstack"])]);
    assert_eq!(
        table,
        "TASK:         METHODS:\nget           get_by_pickup, get_by_unstack\n"
    );
}

#[cfg(feature = "serde")]
#[test]
fn trace_log_serializes() {
    let mut log = TraceLog::default();
    log.push(TraceEvent::new(0, "success").with_detail("2"));
    let json = serde_json::to_string(&log).unwrap();
    let back: TraceLog = serde_json::from_str(&json).unwrap();
    assert_eq!(back, log);
}

use hop_core::{map, task, Goal, Plan, State, Task, Value};

fn blocks() -> State {
    State::new("state1")
        .with("pos", map! { "a" => "b", "b" => "table" })
        .with("clear", map! { "a" => true, "b" => false })
        .with("holding", false)
}

#[test]
fn state_get_set_in_roundtrip() {
    let mut s = blocks();
    assert_eq!(s.get_in("pos", "a"), Some(&Value::from("b")));
    assert_eq!(s.get_in("pos", "z"), None);
    assert_eq!(s.get_in("missing", "a"), None);

    assert!(s.set_in("pos", "a", "hand"));
    assert_eq!(s.get_in("pos", "a").and_then(Value::as_str), Some("hand"));

    assert!(s.set_in("owe", "me", 0));
    assert_eq!(s.get_in("owe", "me"), Some(&Value::Int(0)));
}

#[test]
fn set_in_refuses_non_map_variables() {
    let mut s = blocks();
    assert!(!s.set_in("holding", "a", true));
    assert_eq!(s.get("holding"), Some(&Value::Bool(false)));
}

#[test]
fn equality_ignores_state_name() {
    let a = blocks();
    let mut b = a.clone();
    assert_eq!(a, b);

    let renamed = {
        let mut r = State::new("other");
        for (k, v) in a.variables() {
            r.set(k, v.clone());
        }
        r
    };
    assert_eq!(a, renamed);

    b.set("holding", "a");
    assert_ne!(a, b);
}

#[test]
fn clone_is_a_deep_copy() {
    let original = blocks();
    let mut copy = original.clone();
    copy.set_in("clear", "b", true);
    assert_eq!(original.get_in("clear", "b"), Some(&Value::Bool(false)));
}

#[test]
fn goal_is_partial() {
    let goal = Goal::new("goal1b").with("pos", map! { "a" => "b" });
    assert_eq!(goal.wants("pos", "a").and_then(Value::as_str), Some("b"));
    assert_eq!(goal.wants("pos", "b"), None);
    assert!(goal.is_satisfied_by(&blocks()));

    let unmet = Goal::new("g").with("holding", "a");
    assert!(!unmet.is_satisfied_by(&blocks()));
}

#[test]
fn goals_travel_as_task_arguments() {
    let goal = Goal::new("g").with("pos", map! { "a" => "table" });
    let t = task!("move_blocks", goal.clone());
    let carried = t.arg(0).and_then(Value::as_goal).unwrap();
    assert_eq!(carried, &goal);
    assert_eq!(t.to_string(), "(move_blocks <goal g>)");
}

#[test]
fn plan_display_and_iteration() {
    let plan: Plan = vec![task!("pickup", "a"), task!("stack", "a", "b")].into();
    assert_eq!(plan.len(), 2);
    assert_eq!(plan.to_string(), "[(pickup a), (stack a b)]");

    let names: Vec<&str> = plan.iter().map(Task::name).collect();
    assert_eq!(names, vec!["pickup", "stack"]);
    assert!(Plan::<Value>::default().is_empty());
}

#[cfg(feature = "serde")]
#[test]
fn state_deserializes_from_json() {
    let s: State = serde_json::from_str(
        r#"{"name":"s","vars":{"pos":{"a":"table"},"cash":{"me":20},"rate":1.5,"holding":false}}"#,
    )
    .unwrap();
    assert_eq!(s.name(), "s");
    assert_eq!(s.get_in("cash", "me"), Some(&Value::Int(20)));
    assert_eq!(s.get("rate"), Some(&Value::Float(1.5)));
    assert_eq!(s.get("holding"), Some(&Value::Bool(false)));
}

#[cfg(feature = "serde")]
#[test]
fn plan_round_trips_through_json() {
    let plan: Plan = vec![task!("unstack", "a", 12), task!("putdown", "a")].into();
    let json = serde_json::to_string(&plan).unwrap();
    let back: Plan = serde_json::from_str(&json).unwrap();
    assert_eq!(back, plan);

    let bare: Task = serde_json::from_str(r#"{"name":"putdown"}"#).unwrap();
    assert_eq!(bare, Task::new("putdown"));
}

#![cfg(feature = "full")]

use hop::core::{State, Value};
use hop::domains::travel;
use hop::planner::{Planner, TraceRecorder};
use hop::tools::VecTraceSink;
use hop::{map, task};

#[test]
fn plans_through_reexports() {
    let state = State::new("s")
        .with("loc", map! { "me" => "home" })
        .with("cash", map! { "me" => 3 })
        .with("owe", map! { "me" => 0 })
        .with("dist", map! { "home" => map! { "shop" => 2 } });

    let mut recorder = TraceRecorder::new(VecTraceSink::default());
    let plan = Planner::new(travel::domain())
        .plan_with(&state, &[task!("travel", "me", "home", "shop")], &mut recorder)
        .unwrap()
        .unwrap();

    assert_eq!(plan.to_string(), "[(walk me home shop)]");
    assert!(!recorder.sink().events.is_empty());
    assert_eq!(plan.steps[0].arg(2), Some(&Value::from("shop")));
}

#[cfg(feature = "serde")]
#[test]
fn plans_serialize_as_json() {
    let plan = hop::core::Plan::new(vec![task!("pickup", "a"), task!("stack", "a", "b")]);
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["steps"][1]["name"], "stack");
    assert_eq!(json["steps"][1]["args"][1], "b");
}

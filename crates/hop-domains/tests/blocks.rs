use std::collections::BTreeMap;

use hop_core::{map, task, Goal, State, Task, Value};
use hop_domains::blocks;
use hop_planner::observer::tags;
use hop_planner::{Planner, TraceRecorder};
use hop_tools::VecTraceSink;

fn state1() -> State {
    State::new("state1")
        .with("pos", map! { "a" => "b", "b" => "table", "c" => "table" })
        .with("clear", map! { "c" => true, "b" => false, "a" => true })
        .with("holding", false)
}

fn state2() -> State {
    State::new("state2")
        .with("pos", map! { "a" => "c", "b" => "d", "c" => "table", "d" => "table" })
        .with("clear", map! { "a" => true, "c" => false, "b" => true, "d" => false })
        .with("holding", false)
}

fn plan_of(steps: &[Task]) -> Vec<String> {
    steps.iter().map(ToString::to_string).collect()
}

#[test]
fn single_operators_and_small_tasks() {
    let planner = Planner::new(blocks::domain());
    let s = state1();
    let plan = |t: Task| planner.plan(&s, &[t]).unwrap();

    assert!(plan(task!("pickup", "a")).is_none());
    assert!(plan(task!("pickup", "b")).is_none());
    assert_eq!(plan(task!("pickup", "c")).unwrap().steps, vec![task!("pickup", "c")]);
    assert_eq!(
        plan(task!("unstack", "a", "b")).unwrap().steps,
        vec![task!("unstack", "a", "b")]
    );
    assert_eq!(plan(task!("get", "a")).unwrap().steps, vec![task!("unstack", "a", "b")]);
    assert!(plan(task!("get", "b")).is_none());
    assert_eq!(plan(task!("get", "c")).unwrap().steps, vec![task!("pickup", "c")]);
}

#[test]
fn full_and_partial_goals_produce_the_same_plan() {
    let planner = Planner::new(blocks::domain());
    let goal1a = Goal::new("goal1a")
        .with("pos", map! { "c" => "b", "b" => "a", "a" => "table" })
        .with("clear", map! { "c" => true, "b" => false, "a" => false })
        .with("holding", false);
    let goal1b = Goal::new("goal1b").with("pos", map! { "c" => "b", "b" => "a" });

    let expected = vec![
        "(unstack a b)",
        "(putdown a)",
        "(pickup b)",
        "(stack b a)",
        "(pickup c)",
        "(stack c b)",
    ];
    for goal in [goal1a.clone(), goal1b] {
        let plan = planner
            .plan(&state1(), &[task!("move_blocks", goal)])
            .unwrap()
            .unwrap();
        assert_eq!(plan_of(plan.steps()), expected);

        let end = planner.domain().execute(&state1(), &plan).unwrap().unwrap();
        assert!(goal1a.is_satisfied_by(&end));
    }
}

#[test]
fn second_problem_parks_a_then_restacks() {
    let planner = Planner::new(blocks::domain());
    let goal2b = Goal::new("goal2b").with("pos", map! { "b" => "c", "a" => "d" });

    let plan = planner
        .plan(&state2(), &[task!("move_blocks", goal2b.clone())])
        .unwrap()
        .unwrap();
    assert_eq!(
        plan_of(plan.steps()),
        vec![
            "(unstack a c)",
            "(putdown a)",
            "(unstack b d)",
            "(stack b c)",
            "(pickup a)",
            "(stack a d)",
        ]
    );
    let end = planner.domain().execute(&state2(), &plan).unwrap().unwrap();
    assert!(goal2b.is_satisfied_by(&end));
}

#[test]
fn large_problem_with_numbered_blocks() {
    let pos = map! {
        1 => 12, 12 => 13, 13 => "table", 11 => 10, 10 => 5, 5 => 4, 4 => 14, 14 => 15,
        15 => "table", 9 => 8, 8 => 7, 7 => 6, 6 => "table", 19 => 18, 18 => 17, 17 => 16,
        16 => 3, 3 => 2, 2 => "table",
    };
    let clear: BTreeMap<String, Value> = (1..20)
        .map(|b| (b.to_string(), Value::from(matches!(b, 1 | 11 | 9 | 19))))
        .collect();
    let state3 = State::new("state3")
        .with("pos", pos)
        .with("clear", clear)
        .with("holding", false);
    let goal3 = Goal::new("goal3")
        .with(
            "pos",
            map! {
                15 => 13, 13 => 8, 8 => 9, 9 => 4, 4 => "table", 12 => 2, 2 => 3, 3 => 16,
                16 => 11, 11 => 7, 7 => 6, 6 => "table",
            },
        )
        .with("clear", map! { 17 => true, 15 => true, 12 => true });

    let planner = Planner::new(blocks::domain());
    let plan = planner
        .plan(&state3, &[task!("move_blocks", goal3.clone())])
        .unwrap()
        .expect("bw_large_d is solvable");

    assert!(!plan.is_empty());
    assert_eq!(plan.len() % 2, 0, "every move is a get followed by a put");
    let end = planner.domain().execute(&state3, &plan).unwrap().unwrap();
    assert!(goal3.is_satisfied_by(&end));
    assert_eq!(end.get("holding"), Some(&Value::Bool(false)));
}

#[test]
fn backtracking_get_tries_pickup_before_unstack() {
    let planner = Planner::new(blocks::backtracking_domain());
    let mut recorder = TraceRecorder::new(VecTraceSink::default());

    let plan = planner
        .plan_with(&state1(), &[task!("get", "a")], &mut recorder)
        .unwrap()
        .unwrap();
    assert_eq!(plan.steps, vec![task!("unstack", "a", "b")]);

    let sink = recorder.sink();
    let methods: Vec<&str> = sink
        .tagged(tags::METHOD_APPLIED)
        .map(|e| e.detail.as_str())
        .collect();
    assert_eq!(
        methods,
        vec!["get_by_pickup", "pickup_m", "get_by_unstack", "unstack_m"]
    );
    let failed_ops: Vec<&str> = sink
        .tagged(tags::OPERATOR_FAILED)
        .map(|e| e.subject.as_str())
        .collect();
    assert_eq!(failed_ops, vec!["(pickup a)"]);

    // Every attempt is reported before its outcome.
    let attempted: Vec<&str> = sink
        .tagged(tags::OPERATOR_ATTEMPT)
        .map(|e| e.subject.as_str())
        .collect();
    assert_eq!(attempted, vec!["(pickup a)", "(unstack a b)"]);
    let position = |tag: &str, subject: &str| {
        sink.events
            .iter()
            .position(|e| e.is(tag) && e.subject == subject)
            .unwrap()
    };
    assert!(
        position(tags::OPERATOR_ATTEMPT, "(pickup a)")
            < position(tags::OPERATOR_FAILED, "(pickup a)")
    );
    assert!(
        position(tags::OPERATOR_ATTEMPT, "(unstack a b)")
            < position(tags::OPERATOR_APPLIED, "(unstack a b)")
    );
    let expanded: Vec<&str> = sink
        .tagged(tags::METHODS_ATTEMPT)
        .map(|e| e.subject.as_str())
        .collect();
    assert_eq!(expanded, vec!["(get a)", "(pickup_task a)", "(unstack_task a)"]);
    assert!(
        position(tags::METHODS_ATTEMPT, "(get a)") < position(tags::SEEK, "[(pickup_task a)]")
    );

    // Depth goes up, comes back down, and goes up again.
    let depths: Vec<usize> = sink.tagged(tags::SEEK).map(|e| e.depth).collect();
    assert_eq!(depths, vec![0, 1, 2, 1, 2, 3]);
}

#[test]
fn backtracking_domain_without_backtracking_or_success() {
    let planner = Planner::new(blocks::backtracking_domain());

    let mut recorder = TraceRecorder::new(VecTraceSink::default());
    let plan = planner
        .plan_with(&state1(), &[task!("get", "c")], &mut recorder)
        .unwrap()
        .unwrap();
    assert_eq!(plan.steps, vec![task!("pickup", "c")]);
    assert_eq!(recorder.sink().tagged(tags::FAILURE).count(), 0);

    assert!(planner.plan(&state1(), &[task!("get", "b")]).unwrap().is_none());
}

#[test]
fn backtracking_domain_replaces_get_methods() {
    let d = blocks::backtracking_domain();
    let names: Vec<&str> = d.methods_for("get").unwrap().iter().map(|m| m.name()).collect();
    assert_eq!(names, vec!["get_by_pickup", "get_by_unstack"]);
    assert!(d.has_methods("pickup_task"));
    assert!(!blocks::domain().has_methods("pickup_task"));
}

#[test]
fn planner_is_shareable_across_threads() {
    let planner = std::sync::Arc::new(Planner::new(blocks::domain()));
    let handles: Vec<_> = ["a", "c"]
        .into_iter()
        .map(|b| {
            let planner = std::sync::Arc::clone(&planner);
            std::thread::spawn(move || {
                planner
                    .plan(&state1(), &[task!("get", b)])
                    .unwrap()
                    .map(|p| p.len())
            })
        })
        .collect();
    for h in handles {
        assert_eq!(h.join().unwrap(), Some(1));
    }
}

//! Travel from home to the park, on foot or by taxi.
//!
//! State variables: `loc[who]` (including `loc["taxi"]`), `cash[who]`, `owe[who]` and the
//! distance table `dist[x][y]`.

use hop_core::{State, Task, Value};
use hop_planner::{Domain, Method, Operator};

/// Longest distance anyone is willing to walk.
pub const MAX_WALK: f64 = 2.0;

pub fn taxi_rate(dist: f64) -> f64 {
    1.5 + 0.5 * dist
}

fn distance(s: &State, from: &Value, to: &Value) -> Option<f64> {
    s.get_in("dist", &from.as_key()?)?
        .get(&to.as_key()?)?
        .as_float()
}

fn is_at(s: &State, who: &str, place: &Value) -> bool {
    match (s.get_in("loc", who).and_then(Value::as_key), place.as_key()) {
        (Some(here), Some(there)) => here == there,
        _ => false,
    }
}

fn walk(mut s: State, args: &[Value]) -> Option<State> {
    let [who, from, to] = args else { return None };
    let who = who.as_key()?;
    if !is_at(&s, &who, from) {
        return None;
    }
    s.set_in("loc", &*who, to.clone());
    Some(s)
}

fn call_taxi(mut s: State, args: &[Value]) -> Option<State> {
    let [_who, at] = args else { return None };
    s.set_in("loc", "taxi", at.clone());
    Some(s)
}

fn ride_taxi(mut s: State, args: &[Value]) -> Option<State> {
    let [who, from, to] = args else { return None };
    let who = who.as_key()?;
    if !(is_at(&s, "taxi", from) && is_at(&s, &who, from)) {
        return None;
    }
    let fare = taxi_rate(distance(&s, from, to)?);
    s.set_in("loc", "taxi", to.clone());
    s.set_in("loc", &*who, to.clone());
    s.set_in("owe", &*who, fare);
    Some(s)
}

fn pay_driver(mut s: State, args: &[Value]) -> Option<State> {
    let who = args.first()?.as_key()?;
    let cash = s.get_in("cash", &who)?.as_float()?;
    let owe = s.get_in("owe", &who)?.as_float()?;
    if cash < owe {
        return None;
    }
    s.set_in("cash", &*who, cash - owe);
    s.set_in("owe", &*who, 0);
    Some(s)
}

pub fn operators() -> [Operator; 4] {
    [
        Operator::new("walk", walk),
        Operator::new("call_taxi", call_taxi),
        Operator::new("ride_taxi", ride_taxi),
        Operator::new("pay_driver", pay_driver),
    ]
}

fn travel_by_foot(s: &State, args: &[Value]) -> Option<Vec<Task>> {
    let [_who, from, to] = args else { return None };
    if distance(s, from, to)? > MAX_WALK {
        return None;
    }
    Some(vec![Task::new("walk").with_args(args.to_vec())])
}

fn travel_by_taxi(s: &State, args: &[Value]) -> Option<Vec<Task>> {
    let [who, from, to] = args else { return None };
    let cash = s.get_in("cash", &who.as_key()?)?.as_float()?;
    if cash < taxi_rate(distance(s, from, to)?) {
        return None;
    }
    Some(vec![
        Task::new("call_taxi").with_args([who.clone(), from.clone()]),
        Task::new("ride_taxi").with_args(args.to_vec()),
        Task::new("pay_driver").with_arg(who.clone()),
    ])
}

pub fn domain() -> Domain {
    Domain::new().with_operators(operators()).with_methods(
        "travel",
        [
            Method::new("travel_by_foot", travel_by_foot),
            Method::new("travel_by_taxi", travel_by_taxi),
        ],
    )
}

use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Value;

macro_rules! bindings {
    ($ty:ident) => {
        impl $ty {
            pub fn new(name: impl Into<String>) -> Self {
                Self {
                    name: name.into(),
                    vars: BTreeMap::new(),
                }
            }

            /// Builder form of [`Self::set`].
            pub fn with(mut self, var: impl Into<String>, value: impl Into<Value>) -> Self {
                self.set(var, value);
                self
            }

            pub fn name(&self) -> &str {
                &self.name
            }

            pub fn get(&self, var: &str) -> Option<&Value> {
                self.vars.get(var)
            }

            pub fn set(&mut self, var: impl Into<String>, value: impl Into<Value>) {
                self.vars.insert(var.into(), value.into());
            }

            /// `self.var[key]` for map-valued variables.
            pub fn get_in(&self, var: &str, key: &str) -> Option<&Value> {
                self.vars.get(var)?.get(key)
            }

            /// Set `self.var[key]`, creating the map if `var` is unbound.
            ///
            /// Returns `false` (and changes nothing) if `var` is bound to something other than a map.
            pub fn set_in(
                &mut self,
                var: impl Into<String>,
                key: impl Into<String>,
                value: impl Into<Value>,
            ) -> bool {
                let slot = self
                    .vars
                    .entry(var.into())
                    .or_insert_with(|| Value::Map(BTreeMap::new()));
                match slot.as_map_mut() {
                    Some(map) => {
                        map.insert(key.into(), value.into());
                        true
                    }
                    None => false,
                }
            }

            pub fn contains(&self, var: &str) -> bool {
                self.vars.contains_key(var)
            }

            pub fn variables(&self) -> impl Iterator<Item = (&str, &Value)> {
                self.vars.iter().map(|(k, v)| (k.as_str(), v))
            }

            pub fn len(&self) -> usize {
                self.vars.len()
            }

            pub fn is_empty(&self) -> bool {
                self.vars.is_empty()
            }
        }

        // The name only labels diagnostics; two states with the same bindings are the same state.
        impl PartialEq for $ty {
            fn eq(&self, other: &Self) -> bool {
                self.vars == other.vars
            }
        }
    };
}

/// A world state: a named collection of independent state-variable bindings.
///
/// Operators receive their own clone of the state, so `Clone` is the deep copy that keeps
/// backtracked branches isolated from each other.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct State {
    #[cfg_attr(feature = "serde", serde(default))]
    name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    vars: BTreeMap<String, Value>,
}

bindings!(State);

/// A partial state: desired values for just the variables the caller cares about.
///
/// The planner never interprets goals. They travel as task arguments and only domain methods read
/// them.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Goal {
    #[cfg_attr(feature = "serde", serde(default))]
    name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    vars: BTreeMap<String, Value>,
}

bindings!(Goal);

impl Goal {
    /// The desired value of `var[key]`, if the goal constrains it.
    pub fn wants(&self, var: &str, key: &str) -> Option<&Value> {
        self.get_in(var, key)
    }

    /// `true` when every binding in this goal holds in `state`.
    ///
    /// Map-valued goal variables are checked entry by entry, so a goal only needs to mention the
    /// keys it constrains.
    pub fn is_satisfied_by(&self, state: &State) -> bool {
        self.vars.iter().all(|(var, want)| match (want, state.get(var)) {
            (Value::Map(want), Some(Value::Map(have))) => {
                want.iter().all(|(k, v)| have.get(k) == Some(v))
            }
            (want, Some(have)) => want == have,
            (_, None) => false,
        })
    }
}

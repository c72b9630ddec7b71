//! Worker lifecycle states.

use std::fmt;

use serde::Serialize;

// == Lifecycle State ==
/// Where the worker is in the install → activate sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LifecycleState {
    /// Constructed, no lifecycle event delivered yet
    Parsed,
    /// Install in progress
    Installing,
    /// Static assets cached, waiting for activate
    Installed,
    /// Stale regions being pruned
    Activating,
    /// Controlling clients, intercepting fetches
    Activated,
    /// Install failed; this version never controls anything
    Redundant,
}

impl LifecycleState {
    /// Only an activated worker intercepts fetches.
    pub fn can_intercept_fetch(&self) -> bool {
        matches!(self, LifecycleState::Activated)
    }

    /// Install may run from any state that is not mid-transition.
    pub fn can_install(&self) -> bool {
        !matches!(self, LifecycleState::Installing | LifecycleState::Activating)
    }

    /// Activate requires a completed install.
    pub fn can_activate(&self) -> bool {
        matches!(self, LifecycleState::Installed | LifecycleState::Activated)
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleState::Parsed => "parsed",
            LifecycleState::Installing => "installing",
            LifecycleState::Installed => "installed",
            LifecycleState::Activating => "activating",
            LifecycleState::Activated => "activated",
            LifecycleState::Redundant => "redundant",
        };
        f.write_str(name)
    }
}

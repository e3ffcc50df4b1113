//! Capability requirements attached to guarded views.

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::warn;

use pharmacy_entity::permission::Capability;

use crate::rbac::PermissionEvaluator;

/// What a guarded view demands of the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Requirement {
    /// Any authenticated user passes.
    #[default]
    None,
    /// A single capability, checked with `has_permission`.
    One {
        /// The capability.
        capability: Capability,
    },
    /// A list, checked with `has_all_permissions` or `has_any_permission`.
    Many {
        /// The capabilities.
        capabilities: Vec<Capability>,
        /// `true` for all-of, `false` for any-of.
        require_all: bool,
    },
}

impl Requirement {
    /// No capability needed.
    pub fn none() -> Self {
        Self::None
    }

    /// A single capability.
    pub fn one(capability: impl Into<Capability>) -> Self {
        Self::One {
            capability: capability.into(),
        }
    }

    /// Every listed capability.
    pub fn all<I, C>(capabilities: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Capability>,
    {
        Self::Many {
            capabilities: capabilities.into_iter().map(Into::into).collect(),
            require_all: true,
        }
    }

    /// At least one listed capability.
    pub fn any<I, C>(capabilities: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Capability>,
    {
        Self::Many {
            capabilities: capabilities.into_iter().map(Into::into).collect(),
            require_all: false,
        }
    }

    /// Whether the evaluated user meets this requirement.
    ///
    /// Does not check authentication; callers handle the no-user case first.
    pub fn is_satisfied_by(&self, evaluator: &PermissionEvaluator<'_>) -> bool {
        match self {
            Self::None => true,
            Self::One { capability } => evaluator.has_permission(capability),
            Self::Many {
                capabilities,
                require_all: true,
            } => {
                if capabilities.is_empty() {
                    // Passes any signed-in user; usually a misconfigured route.
                    warn!("Guard evaluated an empty all-of requirement");
                }
                evaluator.has_all_permissions(capabilities.as_slice())
            }
            Self::Many {
                capabilities,
                require_all: false,
            } => evaluator.has_any_permission(capabilities.as_slice()),
        }
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => write!(f, "none"),
            Self::One { capability } => write!(f, "{capability}"),
            Self::Many {
                capabilities,
                require_all,
            } => {
                let joiner = if *require_all { " & " } else { " | " };
                let names: Vec<&str> = capabilities.iter().map(Capability::as_str).collect();
                write!(f, "({})", names.join(joiner))
            }
        }
    }
}

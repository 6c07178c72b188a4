//! Safety ceilings for cloning untrusted graphs.
//!
//! Both ceilings default to unbounded. A configuration document looks like
//! `{ "max_nodes": 100000, "max_depth": 4096 }`; either field may be omitted.

use serde::{Deserialize, Serialize};

use crate::error::{Bound, CloneError, LimitsError};

/// Node-count ceiling of [`CloneLimits::untrusted`].
pub const UNTRUSTED_MAX_NODES: usize = 1 << 20;
/// Depth ceiling of [`CloneLimits::untrusted`].
pub const UNTRUSTED_MAX_DEPTH: usize = 1 << 16;

/// Optional ceilings on a single clone operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CloneLimits {
    /// Maximum number of distinct nodes the clone may allocate.
    pub max_nodes: Option<usize>,
    /// Maximum depth of the explicit DFS stack.
    pub max_depth: Option<usize>,
}

impl CloneLimits {
    /// No ceilings: clone whatever is reachable.
    pub const fn unbounded() -> Self {
        Self {
            max_nodes: None,
            max_depth: None,
        }
    }

    /// Conservative ceilings for graphs from outside the process.
    pub const fn untrusted() -> Self {
        Self {
            max_nodes: Some(UNTRUSTED_MAX_NODES),
            max_depth: Some(UNTRUSTED_MAX_DEPTH),
        }
    }

    /// Sets the node-count ceiling.
    #[must_use]
    pub fn max_nodes(mut self, limit: usize) -> Self {
        self.max_nodes = Some(limit);
        self
    }

    /// Sets the depth ceiling.
    #[must_use]
    pub fn max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    /// `true` if neither ceiling is set.
    pub fn is_unbounded(&self) -> bool {
        self.max_nodes.is_none() && self.max_depth.is_none()
    }

    /// Rejects zero ceilings.
    ///
    /// # Errors
    /// [`LimitsError::Zero`] naming the first zero field.
    pub fn validate(&self) -> Result<(), LimitsError> {
        if self.max_nodes == Some(0) {
            return Err(LimitsError::Zero { field: "max_nodes" });
        }
        if self.max_depth == Some(0) {
            return Err(LimitsError::Zero { field: "max_depth" });
        }
        Ok(())
    }

    /// Parses and validates limits from a JSON document.
    ///
    /// # Errors
    /// [`LimitsError::Parse`] for malformed JSON or unknown fields, otherwise
    /// whatever [`CloneLimits::validate`] reports.
    pub fn from_json(document: &str) -> Result<Self, LimitsError> {
        let limits: Self = serde_json::from_str(document)?;
        limits.validate()?;
        Ok(limits)
    }
}

/// Running counters of one clone operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CloneStats {
    /// Distinct nodes cloned.
    pub nodes: usize,
    /// Edges copied, counting duplicates.
    pub edges: usize,
    /// Deepest DFS stack observed.
    pub max_depth: usize,
}

/// Enforces [`CloneLimits`] while accumulating [`CloneStats`].
pub(crate) struct Budget {
    limits: CloneLimits,
    stats: CloneStats,
}

impl Budget {
    pub(crate) fn new(limits: CloneLimits) -> Self {
        Self {
            limits,
            stats: CloneStats::default(),
        }
    }

    /// Accounts for one more cloned node; call before allocating it.
    pub(crate) fn admit_node(&mut self) -> Result<(), CloneError> {
        if let Some(limit) = self.limits.max_nodes {
            if self.stats.nodes >= limit {
                return Err(exceeded(Bound::Nodes, limit));
            }
        }
        self.stats.nodes += 1;
        Ok(())
    }

    /// Accounts for the DFS stack having grown to `depth` frames.
    pub(crate) fn enter(&mut self, depth: usize) -> Result<(), CloneError> {
        if let Some(limit) = self.limits.max_depth {
            if depth > limit {
                return Err(exceeded(Bound::Depth, limit));
            }
        }
        self.stats.max_depth = self.stats.max_depth.max(depth);
        Ok(())
    }

    pub(crate) fn copied_edge(&mut self) {
        self.stats.edges += 1;
    }

    pub(crate) fn finish(self) -> CloneStats {
        tracing::debug!(
            nodes = self.stats.nodes,
            edges = self.stats.edges,
            max_depth = self.stats.max_depth,
            "graph clone complete"
        );
        self.stats
    }
}

fn exceeded(bound: Bound, limit: usize) -> CloneError {
    tracing::warn!(%bound, limit, "graph clone aborted: safety ceiling exceeded");
    CloneError::CycleDepthExceeded { bound, limit }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_fields_are_optional() {
        let limits = CloneLimits::from_json(r#"{ "max_depth": 32 }"#).unwrap();
        assert_eq!(limits, CloneLimits::unbounded().max_depth(32));
        assert!(CloneLimits::from_json("{}").unwrap().is_unbounded());
    }

    #[test]
    fn json_rejects_zero_and_unknown_fields() {
        let err = CloneLimits::from_json(r#"{ "max_nodes": 0 }"#).unwrap_err();
        assert!(matches!(err, LimitsError::Zero { field: "max_nodes" }));

        let err = CloneLimits::from_json(r#"{ "max_edges": 5 }"#).unwrap_err();
        assert!(matches!(err, LimitsError::Parse(_)));
    }

    #[test]
    fn budget_trips_on_the_limit_plus_one() {
        let mut budget = Budget::new(CloneLimits::unbounded().max_nodes(2).max_depth(2));
        assert!(budget.admit_node().is_ok());
        assert!(budget.admit_node().is_ok());
        assert_eq!(
            budget.admit_node(),
            Err(CloneError::CycleDepthExceeded {
                bound: Bound::Nodes,
                limit: 2
            })
        );

        assert!(budget.enter(2).is_ok());
        assert_eq!(
            budget.enter(3),
            Err(CloneError::CycleDepthExceeded {
                bound: Bound::Depth,
                limit: 2
            })
        );
    }

    #[test]
    fn untrusted_preset_is_valid() {
        assert!(CloneLimits::untrusted().validate().is_ok());
        assert!(!CloneLimits::untrusted().is_unbounded());
    }
}

//! Concrete Nodes shipped with the library, plus the authoring-side
//! [`NodeDefinition`] that tree data files deserialize into.

pub mod proximity_attack_stop;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types;
pub use proximity_attack_stop::{CheckProximityAttackStopNode, CheckProximityAttackStopTask};

/// A Node as written down by a designer, tagged by its type name, e.g.:
///
/// ```json
/// { "type": "CheckProximityAttackStop", "max_distance": 20.0 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
pub enum NodeDefinition {
    CheckProximityAttackStop(CheckProximityAttackStopNode),
}

impl NodeDefinition {
    /// Turns the definition into a live Node.
    pub fn to_node(&self) -> types::BoxedNode {
        match self {
            Self::CheckProximityAttackStop(node) => Box::new(*node),
        }
    }

    /// Shorthand for `to_node().create_task()`.
    pub fn create_task(&self) -> types::BoxedTask {
        match self {
            Self::CheckProximityAttackStop(node) => Box::new(node.create_task()),
        }
    }
}

impl From<CheckProximityAttackStopNode> for NodeDefinition {
    fn from(value: CheckProximityAttackStopNode) -> Self {
        Self::CheckProximityAttackStop(value)
    }
}

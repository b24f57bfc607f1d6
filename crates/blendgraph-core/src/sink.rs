//! The graph sink seam between the generator and the host asset system.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::params::{ClipId, ParamKind};

/// Handle to a layer owned by the sink.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct LayerId(pub u32);

/// Handle to a blend node within a layer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct NodeId {
    pub layer: LayerId,
    pub index: u32,
}

/// Handle to a state within a layer's state machine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct StateId {
    pub layer: LayerId,
    pub index: u32,
}

/// Handle to a transition within a layer's state machine.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TransitionId {
    pub layer: LayerId,
    pub index: u32,
}

/// Comparison applied to a boolean parameter by a transition guard.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CondOp {
    IsTrue,
    IsFalse,
}

/// One guard on a transition: `param` must satisfy `op`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Condition {
    pub op: CondOp,
    pub param: String,
}

impl Condition {
    pub fn is_true(param: impl Into<String>) -> Self {
        Self {
            op: CondOp::IsTrue,
            param: param.into(),
        }
    }

    pub fn is_false(param: impl Into<String>) -> Self {
        Self {
            op: CondOp::IsFalse,
            param: param.into(),
        }
    }
}

/// Receiver for generated parameters, layers, states, and transitions.
///
/// Implemented by the host asset system and by the in-memory
/// [`GraphDocument`](crate::GraphDocument). Construction is append-only:
/// nothing is removed or edited once added, only guarded against duplicate
/// parameter declaration. A build call takes `&mut` access for its full
/// duration; concurrent builds against one sink are not supported.
pub trait GraphSink {
    /// Declare a synchronized parameter. Idempotent: returns `Ok(true)` when
    /// newly added, `Ok(false)` when already present with the same kind, and
    /// [`ConfigError::ParameterKindConflict`] when the name exists with a
    /// different kind.
    fn declare_parameter(&mut self, name: &str, kind: ParamKind) -> Result<bool, ConfigError>;

    /// Append a new layer with default weight 1.
    fn new_layer(&mut self, name: &str) -> LayerId;

    /// Add a 1-D simple blend node to `layer`, crossfading its children along
    /// `axis_param`. Thresholds are always explicit, never inferred.
    fn add_blend_node(&mut self, layer: LayerId, axis_param: &str, name: &str) -> NodeId;

    /// Attach `clip` as a child of `node` at the given blend threshold.
    fn add_child(&mut self, node: NodeId, clip: ClipId, threshold: f32);

    /// Wrap `node` in a state of `layer`'s state machine.
    fn add_state(&mut self, layer: LayerId, node: NodeId, name: &str) -> StateId;

    /// Mark `state` as the layer's default/entry state.
    fn set_default_state(&mut self, layer: LayerId, state: StateId);

    /// Add a transition from the "any state" pseudo-node to `target`,
    /// instantaneous and evaluated continuously. Guards are attached
    /// afterwards via [`add_condition`](Self::add_condition).
    fn add_any_state_transition(&mut self, layer: LayerId, target: StateId) -> TransitionId;

    /// Append one guard condition to `transition`.
    fn add_condition(&mut self, transition: TransitionId, op: CondOp, param: &str);
}

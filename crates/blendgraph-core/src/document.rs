//! In-memory, serializable implementation of [`GraphSink`].

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::params::{ClipId, ParamKind};
use crate::sink::{CondOp, Condition, GraphSink, LayerId, NodeId, StateId, TransitionId};

/// One child of a blend node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendChild {
    pub clip: ClipId,
    pub threshold: f32,
}

/// A 1-D simple blend node: crossfades among `children` as the live value of
/// `axis_param` moves across their thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlendNode {
    pub name: String,
    pub axis_param: String,
    pub children: Vec<BlendChild>,
}

/// A state wrapping one blend node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub name: String,
    pub node: NodeId,
}

/// An any-state transition: no exit time, guarded solely by `conditions`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub target: StateId,
    pub conditions: Vec<Condition>,
}

/// One layer: a flat node arena plus a state machine rooted at the implicit
/// "any state" pseudo-node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub default_weight: f32,
    pub nodes: Vec<BlendNode>,
    pub states: Vec<State>,
    pub transitions: Vec<Transition>,
    pub default_state: Option<StateId>,
}

/// Append-only graph document.
///
/// This is the reference sink: generation writes into it and the host decides
/// how to persist it (the whole document round-trips through serde). It also
/// doubles as the recording sink for tests — every emitted parameter, state,
/// and guard stays inspectable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphDocument {
    pub parameters: HashMap<String, ParamKind>,
    pub layers: Vec<Layer>,
}

impl GraphDocument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn layer(&self, id: LayerId) -> &Layer {
        &self.layers[id.0 as usize]
    }

    fn layer_mut(&mut self, id: LayerId) -> &mut Layer {
        &mut self.layers[id.0 as usize]
    }
}

impl GraphSink for GraphDocument {
    fn declare_parameter(&mut self, name: &str, kind: ParamKind) -> Result<bool, ConfigError> {
        if let Some(&existing) = self.parameters.get(name) {
            if existing != kind {
                return Err(ConfigError::ParameterKindConflict {
                    name: name.to_string(),
                    existing,
                    requested: kind,
                });
            }
            return Ok(false);
        }
        self.parameters.insert(name.to_string(), kind);
        Ok(true)
    }

    fn new_layer(&mut self, name: &str) -> LayerId {
        let id = LayerId(self.layers.len() as u32);
        self.layers.push(Layer {
            name: name.to_string(),
            default_weight: 1.0,
            nodes: Vec::new(),
            states: Vec::new(),
            transitions: Vec::new(),
            default_state: None,
        });
        id
    }

    fn add_blend_node(&mut self, layer: LayerId, axis_param: &str, name: &str) -> NodeId {
        let nodes = &mut self.layer_mut(layer).nodes;
        let id = NodeId {
            layer,
            index: nodes.len() as u32,
        };
        nodes.push(BlendNode {
            name: name.to_string(),
            axis_param: axis_param.to_string(),
            children: Vec::new(),
        });
        id
    }

    fn add_child(&mut self, node: NodeId, clip: ClipId, threshold: f32) {
        self.layer_mut(node.layer).nodes[node.index as usize]
            .children
            .push(BlendChild { clip, threshold });
    }

    fn add_state(&mut self, layer: LayerId, node: NodeId, name: &str) -> StateId {
        let states = &mut self.layer_mut(layer).states;
        let id = StateId {
            layer,
            index: states.len() as u32,
        };
        states.push(State {
            name: name.to_string(),
            node,
        });
        id
    }

    fn set_default_state(&mut self, layer: LayerId, state: StateId) {
        self.layer_mut(layer).default_state = Some(state);
    }

    fn add_any_state_transition(&mut self, layer: LayerId, target: StateId) -> TransitionId {
        let transitions = &mut self.layer_mut(layer).transitions;
        let id = TransitionId {
            layer,
            index: transitions.len() as u32,
        };
        transitions.push(Transition {
            target,
            conditions: Vec::new(),
        });
        id
    }

    fn add_condition(&mut self, transition: TransitionId, op: CondOp, param: &str) {
        self.layer_mut(transition.layer).transitions[transition.index as usize]
            .conditions
            .push(Condition {
                op,
                param: param.to_string(),
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declare_parameter_is_idempotent() {
        let mut doc = GraphDocument::new();
        assert!(doc.declare_parameter("JawOpen", ParamKind::Float).unwrap());
        assert!(!doc.declare_parameter("JawOpen", ParamKind::Float).unwrap());
        assert_eq!(doc.parameters.len(), 1);
    }

    #[test]
    fn declare_parameter_rejects_kind_clash() {
        let mut doc = GraphDocument::new();
        doc.declare_parameter("JawOpen", ParamKind::Float).unwrap();
        let err = doc.declare_parameter("JawOpen", ParamKind::Bool).unwrap_err();
        assert_eq!(
            err,
            ConfigError::ParameterKindConflict {
                name: "JawOpen".to_string(),
                existing: ParamKind::Float,
                requested: ParamKind::Bool,
            }
        );
    }

    #[test]
    fn layers_are_append_only_with_unit_weight() {
        let mut doc = GraphDocument::new();
        let a = doc.new_layer("A");
        let b = doc.new_layer("B");
        assert_eq!((a, b), (LayerId(0), LayerId(1)));
        assert_eq!(doc.layer(a).default_weight, 1.0);
        assert!(doc.layer(a).default_state.is_none());
    }
}

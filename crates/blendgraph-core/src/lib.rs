//! Blendgraph core (engine-agnostic)
//!
//! Generates animation state-machine layers that represent one continuous
//! control signal either as a single 1-D blend node, or as a binary-encoded
//! ensemble of discrete blend states reachable via boolean-guarded any-state
//! transitions. Binary encoding trades one tightly budgeted synchronized
//! float for a handful of cheap boolean flags.
//!
//! The crate defines the parameter model ([`ParameterSpec`]), the generation
//! algorithm ([`LayerBuilder`]), the sink seam the host implements
//! ([`GraphSink`]), and an in-memory serializable sink ([`GraphDocument`]).

pub mod builder;
pub mod document;
pub mod error;
pub mod params;
pub mod sink;

// Re-exports for consumers (host adapters)
pub use builder::{
    bit_conditions, bit_param, required_bits, sign_param, LayerBuilder, BINARY_BLEND_PARAM,
};
pub use document::{BlendChild, BlendNode, GraphDocument, Layer, State, Transition};
pub use error::ConfigError;
pub use params::{ClipId, ParamKind, ParameterSpec, StepKey};
pub use sink::{CondOp, Condition, GraphSink, LayerId, NodeId, StateId, TransitionId};

//! Layer generation: one continuous blend layer, or a binary-encoded
//! ensemble of discrete blend states behind boolean guards.

use log::debug;

use crate::error::ConfigError;
use crate::params::{ClipId, ParamKind, ParameterSpec};
use crate::sink::{CondOp, Condition, GraphSink, LayerId};

/// Shared float axis every binary-encoded state blends along. Driven
/// externally (by animation), not by the generated layer itself.
pub const BINARY_BLEND_PARAM: &str = "BinaryBlend";

/// Name of the sign flag spawned for parameters with negative steps.
pub fn sign_param(name: &str) -> String {
    format!("{name}Negative")
}

/// Name of the boolean parameter carrying one bit weight.
pub fn bit_param(name: &str, weight: u32) -> String {
    format!("{name}{weight}")
}

/// Bit weights `1, 2, 4, …` needed to address `binary_res` levels. The zero
/// level needs no bit, so weights stop at `binary_res - 1`.
pub fn required_bits(binary_res: u32) -> Vec<u32> {
    let mut bits = Vec::new();
    let mut weight = 1;
    // weight <= binary_res - 1, written without the underflow at 0
    while weight < binary_res {
        bits.push(weight);
        weight *= 2;
    }
    bits
}

/// Guard conditions encoding `|i|` over the given bit weights. States `i` and
/// `-i` share identical bit conditions and are disambiguated only by the sign
/// flag, which the caller appends separately.
pub fn bit_conditions(name: &str, i: i32, required_bits: &[u32]) -> Vec<Condition> {
    required_bits
        .iter()
        .enumerate()
        .map(|(shift, &weight)| {
            let bit_set = (i.unsigned_abs() >> shift) & 1 == 1;
            let param = bit_param(name, weight);
            if bit_set {
                Condition::is_true(param)
            } else {
                Condition::is_false(param)
            }
        })
        .collect()
}

/// Generates animator layers for one [`ParameterSpec`] into a [`GraphSink`].
///
/// Generation is a single synchronous pass; all sink mutation is additive, so
/// a failed build leaves the sink partially populated and the caller should
/// discard it.
pub struct LayerBuilder<'a> {
    spec: &'a ParameterSpec,
}

impl<'a> LayerBuilder<'a> {
    pub fn new(spec: &'a ParameterSpec) -> Self {
        Self { spec }
    }

    fn primary_clip(&self, step_index: usize) -> ClipId {
        // Callers check is_complete() first, so index 0 exists.
        self.spec.step_content(step_index)[0].clone()
    }

    fn ensure_complete(&self) -> Result<(), ConfigError> {
        if self.spec.is_complete() {
            Ok(())
        } else {
            Err(ConfigError::IncompleteSpec {
                name: self.spec.name().to_string(),
            })
        }
    }

    /// Build a continuous layer: one always-active state whose blend node
    /// crossfades among the step contents as the live Float parameter moves.
    ///
    /// Pass `declare_param = false` when the parameter already exists
    /// upstream. Thresholds equal the step values exactly; nothing is
    /// recomputed or inferred.
    pub fn build_continuous(
        &self,
        sink: &mut impl GraphSink,
        declare_param: bool,
    ) -> Result<LayerId, ConfigError> {
        self.ensure_complete()?;
        let name = self.spec.name();

        if declare_param {
            sink.declare_parameter(name, ParamKind::Float)?;
        }

        let layer = sink.new_layer(name);
        let tree = sink.add_blend_node(layer, name, "FloatBlendTree");
        for (index, step) in self.spec.steps().iter().enumerate() {
            sink.add_child(tree, self.primary_clip(index), step.value);
        }

        let state = sink.add_state(layer, tree, "FloatBlendState");
        sink.set_default_state(layer, state);

        debug!(
            "built continuous layer '{name}' with {} blend children",
            self.spec.steps().len()
        );
        Ok(layer)
    }

    /// Build a binary-encoded layer: `binary_res` discrete levels addressed
    /// by `required_bits(binary_res)` boolean parameters (plus a sign flag
    /// when any step is negative), each level a state entered through an
    /// any-state transition guarded by the bit pattern of its index.
    ///
    /// Pass `declare_param = false` when the bit/sign/blend parameters were
    /// already declared upstream.
    pub fn build_binary(
        &self,
        sink: &mut impl GraphSink,
        binary_res: u32,
        declare_param: bool,
    ) -> Result<LayerId, ConfigError> {
        if binary_res < 2 {
            return Err(ConfigError::InvalidResolution { binary_res });
        }
        self.ensure_complete()?;

        let name = self.spec.name();
        let signed = self.spec.has_negative_steps();
        let bits = required_bits(binary_res);

        if declare_param {
            sink.declare_parameter(BINARY_BLEND_PARAM, ParamKind::Float)?;
            if signed {
                sink.declare_parameter(&sign_param(name), ParamKind::Bool)?;
            }
            for &weight in &bits {
                sink.declare_parameter(&bit_param(name, weight), ParamKind::Bool)?;
            }
        }

        let layer = sink.new_layer(name);
        let max_thresh = (binary_res - 1) as i32;
        let start = if signed { -max_thresh } else { 0 };

        for i in start..binary_res as i32 {
            let state_name = format!("{name}{i}");
            let tree = sink.add_blend_node(layer, BINARY_BLEND_PARAM, &state_name);

            // Each state's blend node only carries the steps relevant to its
            // discretized bucket, placed so BinaryBlend sweeping the local
            // range crossfades among them at max_thresh scale.
            for (index, step) in self.spec.steps().iter().enumerate() {
                let scaled = step.value * max_thresh as f32;
                let threshold = if i == 0 {
                    (i as f32 - scaled).abs()
                } else if i < 0 {
                    if step.value > 0.0 {
                        continue;
                    }
                    i as f32 - scaled
                } else {
                    if step.value < 0.0 {
                        continue;
                    }
                    scaled - i as f32
                };
                sink.add_child(tree, self.primary_clip(index), threshold);
            }

            let state = sink.add_state(layer, tree, &state_name);
            if i == 0 {
                sink.set_default_state(layer, state);
            }

            let transition = sink.add_any_state_transition(layer, state);
            for cond in bit_conditions(name, i, &bits) {
                sink.add_condition(transition, cond.op, &cond.param);
            }
            // State 0 carries no sign guard: with all bits clear it wins
            // whichever way the sign flag points.
            if signed && i < 0 {
                sink.add_condition(transition, CondOp::IsTrue, &sign_param(name));
            } else if signed && i > 0 {
                sink.add_condition(transition, CondOp::IsFalse, &sign_param(name));
            }
        }

        debug!(
            "built binary layer '{name}' res={binary_res} bits={} signed={signed}",
            bits.len()
        );
        Ok(layer)
    }
}

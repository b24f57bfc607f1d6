//! Parameter specifications: declared steps, per-step content, default lookup.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Opaque handle to a piece of animated content (a clip). The container
/// format is the host's business; the generator only places handles into
/// blend nodes.
pub type ClipId = String;

/// Runtime type of a synchronized parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Float,
    Bool,
    Int,
}

/// One discrete labeled position of a parameter.
///
/// Values are assumed to range over a bounded interval (in practice roughly
/// [-1, 1]); the generation algorithm is agnostic to absolute scale and only
/// inspects sign and relative magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepKey {
    pub label: String,
    pub value: f32,
}

impl StepKey {
    pub fn new(label: impl Into<String>, value: f32) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// A named parameter's declared steps, per-step content, and default step.
///
/// Content lists hold one handle per animated target (e.g. one per renderer)
/// and sit parallel to `steps`. The spec is filled by an upstream collection
/// pass via [`set_step_content`](Self::set_step_content) and is read-only
/// input to [`LayerBuilder`](crate::LayerBuilder).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSpec {
    name: String,
    kind: ParamKind,
    steps: Vec<StepKey>,
    default_step: usize,
    content: Vec<Vec<ClipId>>,
}

impl ParameterSpec {
    /// Build a spec from declared steps. Every step starts with an empty
    /// content list; the step whose value equals `default_value` exactly
    /// receives `default_content`. Exact match is intentional: default
    /// values come from the same enumerated step set, so no epsilon applies.
    pub fn new(
        name: impl Into<String>,
        kind: ParamKind,
        steps: Vec<StepKey>,
        default_content: Vec<ClipId>,
        default_value: f32,
    ) -> Result<Self, ConfigError> {
        let name = name.into();
        let default_step = steps
            .iter()
            .position(|s| s.value == default_value)
            .ok_or(ConfigError::NoDefaultStep {
                name: name.clone(),
                default_value,
            })?;

        let mut content: Vec<Vec<ClipId>> = vec![Vec::new(); steps.len()];
        content[default_step] = default_content;

        Ok(Self {
            name,
            kind,
            steps,
            default_step,
            content,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> ParamKind {
        self.kind
    }

    pub fn steps(&self) -> &[StepKey] {
        &self.steps
    }

    /// The step matching the construction-time default value.
    pub fn default_step(&self) -> &StepKey {
        &self.steps[self.default_step]
    }

    /// Assign the content list of the step whose value equals `value` exactly.
    pub fn set_step_content(&mut self, value: f32, clips: Vec<ClipId>) -> Result<(), ConfigError> {
        let index = self
            .steps
            .iter()
            .position(|s| s.value == value)
            .ok_or(ConfigError::StepNotFound {
                name: self.name.clone(),
                value,
            })?;
        self.content[index] = clips;
        Ok(())
    }

    /// Content list of the step at `index` (parallel to [`steps`](Self::steps)).
    pub fn step_content(&self, index: usize) -> &[ClipId] {
        &self.content[index]
    }

    /// True when every step has at least one content handle assigned.
    pub fn is_complete(&self) -> bool {
        self.content.iter().all(|c| !c.is_empty())
    }

    /// Content list of the default step.
    pub fn default_content(&self) -> &[ClipId] {
        &self.content[self.default_step]
    }

    /// True when any declared step sits below zero; such parameters need a
    /// sign flag in binary-encoded mode.
    pub fn has_negative_steps(&self) -> bool {
        self.steps.iter().any(|s| s.value < 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three_steps() -> Vec<StepKey> {
        vec![
            StepKey::new("min", -1.0),
            StepKey::new("neutral", 0.0),
            StepKey::new("max", 1.0),
        ]
    }

    #[test]
    fn default_step_is_matched_exactly() {
        let spec = ParameterSpec::new(
            "JawOpen",
            ParamKind::Float,
            three_steps(),
            vec!["neutral.clip".to_string()],
            0.0,
        )
        .unwrap();
        assert_eq!(spec.default_step().label, "neutral");
        assert_eq!(spec.default_content(), ["neutral.clip".to_string()]);
    }

    #[test]
    fn missing_default_fails_construction() {
        let err = ParameterSpec::new("JawOpen", ParamKind::Float, three_steps(), vec![], 0.5)
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::NoDefaultStep {
                name: "JawOpen".to_string(),
                default_value: 0.5,
            }
        );
    }

    #[test]
    fn completeness_tracks_every_step() {
        let mut spec = ParameterSpec::new(
            "JawOpen",
            ParamKind::Float,
            three_steps(),
            vec!["neutral.clip".to_string()],
            0.0,
        )
        .unwrap();
        assert!(!spec.is_complete());
        spec.set_step_content(-1.0, vec!["min.clip".to_string()]).unwrap();
        spec.set_step_content(1.0, vec!["max.clip".to_string()]).unwrap();
        assert!(spec.is_complete());
    }

    #[test]
    fn unknown_step_value_is_rejected() {
        let mut spec = ParameterSpec::new(
            "JawOpen",
            ParamKind::Float,
            three_steps(),
            vec!["neutral.clip".to_string()],
            0.0,
        )
        .unwrap();
        let err = spec
            .set_step_content(0.25, vec!["odd.clip".to_string()])
            .unwrap_err();
        assert!(matches!(err, ConfigError::StepNotFound { .. }));
    }
}

//! JSON round-trip of a generated document.

use blendgraph_core::{GraphDocument, LayerBuilder, ParamKind, ParameterSpec, StepKey};

#[test]
fn generated_document_roundtrips_through_json() {
    let steps = vec![
        StepKey::new("min", -1.0),
        StepKey::new("neutral", 0.0),
        StepKey::new("max", 1.0),
    ];
    let mut spec = ParameterSpec::new(
        "Smile",
        ParamKind::Bool,
        steps,
        vec!["neutral.clip".to_string()],
        0.0,
    )
    .unwrap();
    spec.set_step_content(-1.0, vec!["frown.clip".to_string()]).unwrap();
    spec.set_step_content(1.0, vec!["smile.clip".to_string()]).unwrap();

    let mut doc = GraphDocument::new();
    let builder = LayerBuilder::new(&spec);
    builder.build_binary(&mut doc, 4, true).unwrap();
    builder.build_continuous(&mut doc, false).unwrap();

    let json = serde_json::to_string(&doc).expect("serialize");
    let back: GraphDocument = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(doc, back);
}

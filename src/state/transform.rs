// CSS rendering of a TransformState. Pure: output depends on the state only.
use crate::model::{TransformState, UnitPoint};

const ANIMATED_PROPERTIES: [&str; 2] = ["transform", "transform-origin"];

/// Translate by the offset, then scale by `1 + scale` around the transform origin.
/// CSS applies the right-most function first.
pub fn css_transform(state: &TransformState) -> String {
    format!(
        "scale({}) translate({}px, {}px)",
        1.0 + state.scale,
        state.offset.x,
        state.offset.y
    )
}

/// Unset anchors render at the top-left corner.
pub fn css_transform_origin(state: &TransformState) -> String {
    let anchor = state.anchor.unwrap_or(UnitPoint::TOP_LEADING);
    format!("{}% {}%", anchor.x * 100.0, anchor.y * 100.0)
}

pub fn css_transition(state: &TransformState) -> String {
    match &state.transition {
        Some(spec) => spec.css(&ANIMATED_PROPERTIES),
        None => "none".to_string(),
    }
}

/// Inline style fragment carrying the full transform.
pub fn transform_style(state: &TransformState) -> String {
    format!(
        "transform:{}; transform-origin:{}; transition:{};",
        css_transform(state),
        css_transform_origin(state),
        css_transition(state)
    )
}

// Animation requests handed to the browser's CSS transition engine.
use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Easing {
    Linear,
    EaseIn,
    EaseOut,
    #[default]
    EaseInOut,
}

impl Easing {
    pub fn css(self) -> &'static str {
        match self {
            Easing::Linear => "linear",
            Easing::EaseIn => "ease-in",
            Easing::EaseOut => "ease-out",
            Easing::EaseInOut => "ease-in-out",
        }
    }
}

/// "Animate to the new values over `duration_secs` with `easing`."
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct AnimationSpec {
    pub duration_secs: f64,
    #[serde(default)]
    pub easing: Easing,
}

impl AnimationSpec {
    pub const RESET_DURATION_SECS: f64 = 0.35;

    pub fn ease_in_out(duration_secs: f64) -> Self {
        Self { duration_secs, easing: Easing::EaseInOut }
    }

    /// CSS `transition` value applying this spec to each listed property.
    pub fn css(&self, properties: &[&str]) -> String {
        properties
            .iter()
            .map(|p| format!("{} {}s {}", p, self.duration_secs, self.easing.css()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::ease_in_out(Self::RESET_DURATION_SECS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_reset_is_ease_in_out_over_035s() {
        let spec = AnimationSpec::default();
        assert_eq!(spec.duration_secs, 0.35);
        assert_eq!(spec.easing, Easing::EaseInOut);
    }

    #[test]
    fn css_lists_every_property() {
        let spec = AnimationSpec::ease_in_out(0.35);
        assert_eq!(
            spec.css(&["transform", "transform-origin"]),
            "transform 0.35s ease-in-out, transform-origin 0.35s ease-in-out"
        );
    }

    #[test]
    fn easing_parses_kebab_case() {
        let spec: AnimationSpec =
            serde_json::from_str(r#"{"duration_secs":0.2,"easing":"ease-out"}"#).unwrap();
        assert_eq!(spec.easing, Easing::EaseOut);
        let spec: AnimationSpec = serde_json::from_str(r#"{"duration_secs":0.2}"#).unwrap();
        assert_eq!(spec.easing, Easing::EaseInOut);
    }
}

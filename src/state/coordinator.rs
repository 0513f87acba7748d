// Gesture coordinator: pinch/pan recognizer samples -> transform state.
use crate::config::{PanPolicy, ZoomConfig};
use crate::model::{GesturePhase, PanEvent, PinchEvent, TransformState, UnitPoint, Vector2};
use crate::util::clog;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GestureKind {
    Pinch,
    Pan,
}

/// Decides whether two recognizers may track the same touches at once.
pub trait SimultaneousRecognition {
    fn should_recognize_simultaneously(&self, gesture: GestureKind, other: GestureKind) -> bool;
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct GestureCoordinator {
    config: ZoomConfig,
}

impl GestureCoordinator {
    pub fn new(config: ZoomConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    pub fn on_pinch_event(&self, state: &mut TransformState, event: PinchEvent) {
        if event.phase.is_active() {
            if event.magnitude.is_finite() {
                // magnitude is centered at 1.0; never zoom out past 1x
                state.scale = (event.magnitude - 1.0).max(0.0);
            }
            if state.anchor.is_none() {
                state.anchor = UnitPoint::normalize(event.location, event.view_size);
                if let Some(a) = state.anchor {
                    clog(&format!("pinch anchor latched at ({:.3}, {:.3})", a.x, a.y));
                }
            }
            state.transition = None;
        } else {
            clog(&format!("pinch {:?}, resetting zoom", event.phase));
            state.scale = 0.0;
            state.anchor = None;
            state.transition = Some(self.config.pinch_reset);
        }
    }

    pub fn on_pan_event(&self, state: &mut TransformState, event: PanEvent, current_scale: f64) {
        let zoomed = current_scale > 0.0;
        let applies = match self.config.pan_policy {
            PanPolicy::RequireZoom => event.phase.is_active() && zoomed,
            PanPolicy::ReferenceParity => {
                event.phase == GesturePhase::Began || (event.phase == GesturePhase::Changed && zoomed)
            }
        };
        if applies {
            if event.translation.is_finite() {
                state.offset = event.translation;
            }
            state.transition = None;
        } else {
            if event.phase == GesturePhase::Ended || event.phase == GesturePhase::Cancelled {
                clog(&format!("pan {:?}, resetting offset", event.phase));
            }
            state.offset = Vector2::ZERO;
            state.anchor = None;
            state.transition = Some(self.config.pan_reset);
        }
    }
}

impl SimultaneousRecognition for GestureCoordinator {
    fn should_recognize_simultaneously(&self, _gesture: GestureKind, _other: GestureKind) -> bool {
        true
    }
}

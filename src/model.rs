//! Core data model for the zoomable view.
//! Geometry values, the transform state, gesture events and the reducer that
//! routes gesture events through the coordinator.

use std::rc::Rc;
use yew::Reducible;

use crate::config::ZoomConfig;
use crate::state::{AnimationSpec, GestureCoordinator};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Vector2 = Vector2 { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn length(&self) -> f64 {
        self.x.hypot(self.y)
    }
}

/// A position in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Point2 {
    pub x: f64,
    pub y: f64,
}

impl Point2 {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn minus(&self, other: Point2) -> Vector2 {
        Vector2::new(self.x - other.x, self.y - other.y)
    }

    pub fn plus(&self, v: Vector2) -> Point2 {
        Point2::new(self.x + v.x, self.y + v.y)
    }

    pub fn distance(&self, other: Point2) -> f64 {
        self.minus(other).length()
    }

    pub fn midpoint(&self, other: Point2) -> Point2 {
        Point2::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }
}

/// Untransformed layout size of a view, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewSize {
    pub width: f64,
    pub height: f64,
}

impl ViewSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Zero, negative or non-finite extent on either axis.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }
}

/// On-screen bounds of an element as reported by the browser, transform included.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ClientRect {
    fn ratios(&self, layout: ViewSize) -> (f64, f64) {
        let rx = if self.width > 0.0 && layout.width > 0.0 { layout.width / self.width } else { 1.0 };
        let ry = if self.height > 0.0 && layout.height > 0.0 { layout.height / self.height } else { 1.0 };
        (rx, ry)
    }

    /// Map a client-space point into the element's own layout pixels.
    pub fn to_local(&self, client: Point2, layout: ViewSize) -> Point2 {
        let (rx, ry) = self.ratios(layout);
        Point2::new((client.x - self.left) * rx, (client.y - self.top) * ry)
    }

    /// Map a client-space displacement into the element's layout pixels.
    pub fn delta_to_local(&self, delta: Vector2, layout: ViewSize) -> Vector2 {
        let (rx, ry) = self.ratios(layout);
        Vector2::new(delta.x * rx, delta.y * ry)
    }
}

/// A point expressed as a fraction (0..=1) of a view's width and height.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UnitPoint {
    pub x: f64,
    pub y: f64,
}

impl UnitPoint {
    pub const TOP_LEADING: UnitPoint = UnitPoint { x: 0.0, y: 0.0 };

    /// Normalize a view-local location against the view size, clamped to the unit square.
    /// Returns `None` when the size or location cannot produce a finite result.
    pub fn normalize(location: Point2, size: ViewSize) -> Option<UnitPoint> {
        if size.is_degenerate() {
            return None;
        }
        let x = location.x / size.width;
        let y = location.y / size.height;
        if !(x.is_finite() && y.is_finite()) {
            return None;
        }
        Some(UnitPoint { x: x.clamp(0.0, 1.0), y: y.clamp(0.0, 1.0) })
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GesturePhase {
    Began,
    Changed,
    Ended,
    Cancelled,
}

impl GesturePhase {
    /// Began or changed: the gesture is still driving the view.
    pub fn is_active(self) -> bool {
        matches!(self, GesturePhase::Began | GesturePhase::Changed)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchEvent {
    pub phase: GesturePhase,
    /// Running scale factor of the recognizer, 1.0 = no zoom.
    pub magnitude: f64,
    /// Pinch centroid in view-local pixels.
    pub location: Point2,
    pub view_size: ViewSize,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanEvent {
    pub phase: GesturePhase,
    /// Cumulative drag since the pan session began, view-local pixels.
    pub translation: Vector2,
}

/// Transform applied to the zoomable view.
///
/// `scale` is the zoom above 1x (0 = identity). `anchor` is latched by the first
/// pinch sample of a session and cleared when the session ends. `transition`
/// is set when the last write was a reset the host should animate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformState {
    pub offset: Vector2,
    pub scale: f64,
    pub anchor: Option<UnitPoint>,
    pub transition: Option<AnimationSpec>,
}

impl TransformState {
    pub fn identity() -> Self {
        Self::default()
    }
}

#[derive(Clone, Debug)]
pub enum ZoomAction {
    Pinch(PinchEvent),
    Pan(PanEvent),
    Configure(ZoomConfig),
}

/// Reducer state: the transform plus the coordinator that owns the update rules.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ZoomModel {
    pub transform: TransformState,
    pub coordinator: GestureCoordinator,
}

impl ZoomModel {
    pub fn new(config: ZoomConfig) -> Self {
        Self { transform: TransformState::identity(), coordinator: GestureCoordinator::new(config) }
    }
}

impl Reducible for ZoomModel {
    type Action = ZoomAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut new = (*self).clone();
        match action {
            ZoomAction::Pinch(event) => new.coordinator.on_pinch_event(&mut new.transform, event),
            ZoomAction::Pan(event) => {
                let scale = new.transform.scale;
                new.coordinator.on_pan_event(&mut new.transform, event, scale);
            }
            ZoomAction::Configure(config) => new.coordinator = GestureCoordinator::new(config),
        }
        Rc::new(new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_center() {
        let a = UnitPoint::normalize(Point2::new(150.0, 150.0), ViewSize::new(300.0, 300.0));
        assert_eq!(a, Some(UnitPoint { x: 0.5, y: 0.5 }));
    }

    #[test]
    fn normalize_clamps_outside_points() {
        let size = ViewSize::new(300.0, 200.0);
        let a = UnitPoint::normalize(Point2::new(-40.0, 900.0), size).unwrap();
        assert_eq!(a, UnitPoint { x: 0.0, y: 1.0 });
        let b = UnitPoint::normalize(Point2::new(450.0, -1.0), size).unwrap();
        assert_eq!(b, UnitPoint { x: 1.0, y: 0.0 });
    }

    #[test]
    fn normalize_degenerate_size_is_none() {
        let p = Point2::new(10.0, 10.0);
        assert_eq!(UnitPoint::normalize(p, ViewSize::new(0.0, 300.0)), None);
        assert_eq!(UnitPoint::normalize(p, ViewSize::new(300.0, 0.0)), None);
        assert_eq!(UnitPoint::normalize(p, ViewSize::new(f64::NAN, 10.0)), None);
        assert_eq!(UnitPoint::normalize(Point2::new(f64::INFINITY, 0.0), ViewSize::new(1.0, 1.0)), None);
    }

    #[test]
    fn top_left_anchor_is_a_real_anchor() {
        let a = UnitPoint::normalize(Point2::new(0.0, 0.0), ViewSize::new(300.0, 300.0));
        assert_eq!(a, Some(UnitPoint::TOP_LEADING));
    }

    #[test]
    fn client_rect_undoes_visual_scale() {
        // 300px layout box rendered at 2x, shifted to (100, 50).
        let rect = ClientRect { left: 100.0, top: 50.0, width: 600.0, height: 600.0 };
        let layout = ViewSize::new(300.0, 300.0);
        assert_eq!(rect.to_local(Point2::new(400.0, 350.0), layout), Point2::new(150.0, 150.0));
        assert_eq!(rect.delta_to_local(Vector2::new(20.0, -10.0), layout), Vector2::new(10.0, -5.0));
    }

    #[test]
    fn client_rect_with_zero_extent_does_not_divide() {
        let rect = ClientRect { left: 10.0, top: 10.0, width: 0.0, height: 0.0 };
        let p = rect.to_local(Point2::new(15.0, 20.0), ViewSize::new(0.0, 0.0));
        assert_eq!(p, Point2::new(5.0, 10.0));
    }

    #[test]
    fn reducer_routes_pinch_then_pan() {
        let model = Rc::new(ZoomModel::new(ZoomConfig::default()));
        let model = model.reduce(ZoomAction::Pinch(PinchEvent {
            phase: GesturePhase::Began,
            magnitude: 2.0,
            location: Point2::new(30.0, 60.0),
            view_size: ViewSize::new(300.0, 300.0),
        }));
        assert_eq!(model.transform.scale, 1.0);
        let model = model.reduce(ZoomAction::Pan(PanEvent {
            phase: GesturePhase::Changed,
            translation: Vector2::new(12.0, -4.0),
        }));
        assert_eq!(model.transform.offset, Vector2::new(12.0, -4.0));
        assert_eq!(model.transform.anchor, Some(UnitPoint { x: 0.1, y: 0.2 }));
    }

    #[test]
    fn reducer_configure_swaps_policy_and_keeps_transform() {
        let model = Rc::new(ZoomModel::new(ZoomConfig::default()));
        let model = model.reduce(ZoomAction::Pinch(PinchEvent {
            phase: GesturePhase::Changed,
            magnitude: 1.5,
            location: Point2::new(150.0, 150.0),
            view_size: ViewSize::new(300.0, 300.0),
        }));
        let cfg = ZoomConfig { pan_policy: crate::config::PanPolicy::ReferenceParity, ..ZoomConfig::default() };
        let model = model.reduce(ZoomAction::Configure(cfg.clone()));
        assert_eq!(model.coordinator.config(), &cfg);
        assert_eq!(model.transform.scale, 0.5);
    }
}

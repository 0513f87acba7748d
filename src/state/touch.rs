// Touch list -> pinch/pan recognizer samples.
// Coordinates here are client pixels; conversion into the view happens at the call site.
use crate::config::ZoomConfig;
use crate::model::{GesturePhase, Point2, Vector2};

use super::coordinator::{GestureKind, SimultaneousRecognition};

/// Below this finger spread (px) a pinch cannot start.
const MIN_PINCH_SPAN: f64 = 1.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn position(&self) -> Point2 {
        Point2::new(self.x, self.y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchSample {
    pub phase: GesturePhase,
    pub scale: f64,
    pub centroid: Point2,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanSample {
    pub phase: GesturePhase,
    pub translation: Vector2,
}

#[derive(Default, Debug, Clone)]
pub struct PinchRecognizer {
    start_span: Option<f64>,
    last_count: usize,
    last_scale: f64,
    last_centroid: Point2,
}

impl PinchRecognizer {
    pub fn is_active(&self) -> bool {
        self.start_span.is_some()
    }

    /// Spread is the mean distance of every touch from their centroid.
    pub fn update(&mut self, touches: &[TouchPoint]) -> Option<PinchSample> {
        if touches.len() < 2 {
            return self.finish(GesturePhase::Ended);
        }
        let centroid = centroid(touches);
        let span = touches.iter().map(|t| t.position().distance(centroid)).sum::<f64>()
            / touches.len() as f64;
        let Some(start) = self.start_span else {
            if span < MIN_PINCH_SPAN {
                return None;
            }
            self.start_span = Some(span);
            self.last_count = touches.len();
            self.last_scale = 1.0;
            self.last_centroid = centroid;
            return Some(PinchSample { phase: GesturePhase::Began, scale: 1.0, centroid });
        };
        if touches.len() != self.last_count {
            // finger added or lifted: rebase so the reported scale holds steady
            self.last_count = touches.len();
            if span >= MIN_PINCH_SPAN {
                self.start_span = Some(span / self.last_scale);
            }
        } else {
            self.last_scale = span / start;
        }
        self.last_centroid = centroid;
        Some(PinchSample { phase: GesturePhase::Changed, scale: self.last_scale, centroid })
    }

    pub fn cancel(&mut self) -> Option<PinchSample> {
        self.finish(GesturePhase::Cancelled)
    }

    fn finish(&mut self, phase: GesturePhase) -> Option<PinchSample> {
        self.start_span.take()?;
        self.last_count = 0;
        Some(PinchSample { phase, scale: self.last_scale, centroid: self.last_centroid })
    }
}

#[derive(Debug, Clone)]
pub struct PanRecognizer {
    max_touches: usize,
    slop: f64,
    origin: Option<Point2>,
    last_centroid: Point2,
    last_count: usize,
    last_translation: Vector2,
    began: bool,
    // set after a cancel, cleared when every finger is up
    blocked: bool,
}

impl PanRecognizer {
    pub fn new(max_touches: usize, slop: f64) -> Self {
        Self {
            max_touches: max_touches.max(1),
            slop: slop.max(0.0),
            origin: None,
            last_centroid: Point2::default(),
            last_count: 0,
            last_translation: Vector2::ZERO,
            began: false,
            blocked: false,
        }
    }

    pub fn update(&mut self, touches: &[TouchPoint]) -> Option<PanSample> {
        let count = touches.len().min(self.max_touches);
        if count == 0 {
            self.blocked = false;
            return self.finish(GesturePhase::Ended);
        }
        if self.blocked {
            return None;
        }
        let centroid = centroid(&touches[..count]);
        let Some(origin) = self.origin else {
            self.origin = Some(centroid);
            self.last_centroid = centroid;
            self.last_count = count;
            return None;
        };
        if count != self.last_count {
            // finger added or lifted: shift the origin so the translation does not jump
            self.origin = Some(origin.plus(centroid.minus(self.last_centroid)));
            self.last_centroid = centroid;
            self.last_count = count;
            return None;
        }
        self.last_centroid = centroid;
        let translation = centroid.minus(origin);
        self.last_translation = translation;
        if self.began {
            return Some(PanSample { phase: GesturePhase::Changed, translation });
        }
        if translation.length() >= self.slop {
            self.began = true;
            return Some(PanSample { phase: GesturePhase::Began, translation });
        }
        None
    }

    /// Cancel the session; the recognizer stays idle until all touches lift.
    pub fn cancel(&mut self) -> Option<PanSample> {
        self.blocked = true;
        self.finish(GesturePhase::Cancelled)
    }

    fn finish(&mut self, phase: GesturePhase) -> Option<PanSample> {
        self.origin = None;
        self.last_count = 0;
        let began = std::mem::replace(&mut self.began, false);
        let translation = std::mem::replace(&mut self.last_translation, Vector2::ZERO);
        began.then_some(PanSample { phase, translation })
    }
}

fn centroid(touches: &[TouchPoint]) -> Point2 {
    let n = touches.len() as f64;
    let (sx, sy) = touches.iter().fold((0.0, 0.0), |(sx, sy), t| (sx + t.x, sy + t.y));
    Point2::new(sx / n, sy / n)
}

/// Samples produced by one touch event, pinch first.
#[derive(Default, Debug, Clone, PartialEq)]
pub struct GestureSamples {
    pub pinch: Option<PinchSample>,
    pub pan: Option<PanSample>,
}

// Touch/pinch gesture state for one zoomable view
#[derive(Debug, Clone)]
pub struct TouchState {
    pub pinch: PinchRecognizer,
    pub pan: PanRecognizer,
}

impl TouchState {
    pub fn new(config: &ZoomConfig) -> Self {
        Self {
            pinch: PinchRecognizer::default(),
            pan: PanRecognizer::new(config.max_pan_touches as usize, config.pan_slop_px),
        }
    }

    /// Feed the current touch list (after touchstart/touchmove/touchend).
    pub fn touches_changed(
        &mut self,
        touches: &[TouchPoint],
        delegate: &dyn SimultaneousRecognition,
    ) -> GestureSamples {
        let pinch = self.pinch.update(touches);
        let exclusive = !delegate.should_recognize_simultaneously(GestureKind::Pinch, GestureKind::Pan);
        let pan = if exclusive && self.pinch.is_active() {
            self.pan.cancel()
        } else {
            self.pan.update(touches)
        };
        GestureSamples { pinch, pan }
    }

    /// The browser interrupted the touch sequence.
    pub fn touches_cancelled(&mut self) -> GestureSamples {
        let pinch = self.pinch.cancel();
        let pan = self.pan.cancel();
        self.pan.blocked = false;
        GestureSamples { pinch, pan }
    }
}

impl Default for TouchState {
    fn default() -> Self {
        Self::new(&ZoomConfig::default())
    }
}

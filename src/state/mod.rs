pub mod animation;
pub mod coordinator;
pub mod touch;
pub mod transform;

pub use animation::AnimationSpec;
pub use coordinator::GestureCoordinator;
pub use touch::{GestureSamples, TouchPoint, TouchState};
pub use transform::transform_style;

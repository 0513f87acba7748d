pub mod app;
pub mod pinch_zoom;

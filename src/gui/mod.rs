pub mod app;
pub mod theme;
pub mod view;
pub mod window;

pub const FRAME_WIDTH: f64 = 10.0;
pub const RING_WIDTH: f64 = 5.0;
pub const FALLBACK_SCREEN: (f64, f64) = (1920.0, 1080.0);

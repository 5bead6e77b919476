use std::time::Duration;

pub const RENDER_WIDTH: i32 = 1920;           // Width of the reference canvas
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the reference canvas
pub const FPS: u32 = 60;                      // Frames per second
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Time per frame (seconds)

pub const AUTOPLAY_INTERVAL: Duration = Duration::from_millis(5000); // Time between autoplay advances

pub const HEADER_HEIGHT: f32 = 64.0;          // Preview header bar height (pixels)
pub const CONTROL_WIDTH: f32 = 56.0;          // Preview prev/next hit area width (pixels)

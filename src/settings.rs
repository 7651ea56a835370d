pub const DEFAULT_ROUNDS: u32 = 5;
pub const DEFAULT_CANVAS_SIZE: u32 = 300;
pub const MIN_CANVAS_SIZE: u32 = 2;
pub const WHEEL_LIGHTNESS: f64 = 0.5;
pub const TARGET_SATURATION: f64 = 1.0;
pub const TARGET_LIGHTNESS: f64 = 0.5;
pub const DEFAULT_PLAYER_ONE: &str = "Player 1";
pub const DEFAULT_PLAYER_TWO: &str = "Player 2";
pub const PPM_BACKGROUND: crate::color::Rgb = crate::color::Rgb::new(255, 255, 255);
pub const MAX_CANVAS_SIZE: u32 = 4096;

#[cfg(feature = "gui")]
pub const WIDTH: i32 = 900;
#[cfg(feature = "gui")]
pub const HEIGHT: i32 = 600;
#[cfg(feature = "gui")]
pub const MARGIN: i32 = 20;

use std::f64::consts::PI;

pub const TWO_PI: f64 = PI * 2.0;

pub fn normalize_abs_angle(angle: f64) -> f64 {
    if angle < 0.0 {
        angle + TWO_PI
    } else {
        angle
    }
}

pub fn to_degrees(radians: f64) -> f64 {
    radians * 180.0 / PI
}

pub fn to_radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

pub fn round_to_hundredths(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn norm(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    /// Angle from the positive x axis with y pointing down, in [0, 2pi).
    pub fn angle(&self) -> f64 {
        normalize_abs_angle(self.y.atan2(self.x))
    }
}

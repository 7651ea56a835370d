use core::fmt;

use crate::color::Rgb;
use crate::math_utils;

/// Euclidean distance in RGB space, rounded to two decimals. Lower is better.
pub fn distance(a: &Rgb, b: &Rgb) -> f64 {
    let sq = a
        .channels()
        .iter()
        .zip(b.channels().iter())
        .map(|(x, y)| {
            let d = *x as f64 - *y as f64;
            d * d
        })
        .sum::<f64>();
    math_utils::round_to_hundredths(sq.sqrt())
}

/// One line of the scoreboard.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub round: u32,
    pub name: String,
    pub target: Rgb,
    pub guess: Rgb,
    pub score: f64,
}

impl fmt::Display for ScoreRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "round {} | {} | target {} | guess {} | score {:.2}",
            self.round, self.name, self.target, self.guess, self.score
        )
    }
}

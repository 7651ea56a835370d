use core::fmt;

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::color::Hsl;
use crate::math_utils::Point;
use crate::player::{Player, Slot};
use crate::score::{self, ScoreRow};
use crate::settings::*;
use crate::wheel::Wheel;

pub trait Targets {
    fn next_target(&mut self) -> Hsl;
}

/// Fully saturated targets of uniformly random hue.
pub struct RandomTargets<R: Rng> {
    rng: R,
}

impl RandomTargets<StdRng> {
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> Targets for RandomTargets<R> {
    fn next_target(&mut self) -> Hsl {
        Hsl::new(
            self.rng.gen_range(0.0..360.0),
            TARGET_SATURATION,
            TARGET_LIGHTNESS,
        )
    }
}

/// Lenient round-count parsing, in the manner of a form's integer field:
/// leading whitespace and an optional sign are skipped, then the leading
/// digits are used. Counts beyond `u32::MAX` saturate. A negative count
/// plays a single round, since the game is over after the first round's
/// second guess. Missing input, no digits and zero fall back to the default.
pub fn parse_round_count(input: Option<&str>) -> u32 {
    let trimmed = input.unwrap_or_default().trim_start();
    let (negative, unsigned) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };
    let digits = unsigned.bytes().take_while(u8::is_ascii_digit);
    let mut seen = false;
    let mut count: u32 = 0;
    for d in digits {
        seen = true;
        count = count.saturating_mul(10).saturating_add((d - b'0') as u32);
    }
    match (seen, negative, count) {
        (false, _, _) | (_, _, 0) => DEFAULT_ROUNDS,
        (true, true, _) => 1,
        (true, false, n) => n,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameSetup {
    pub player_one: String,
    pub player_two: String,
    pub rounds: u32,
}

impl Default for GameSetup {
    fn default() -> Self {
        Self {
            player_one: String::new(),
            player_two: String::new(),
            rounds: DEFAULT_ROUNDS,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Winner(Slot),
    Draw,
}

/// Lower cumulative total wins.
pub fn decide_outcome(one: f64, two: f64) -> Outcome {
    if one < two {
        Outcome::Winner(Slot::One)
    } else if two < one {
        Outcome::Winner(Slot::Two)
    } else {
        Outcome::Draw
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    NotStarted,
    Awaiting(Slot),
    Finished(Outcome),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    NextPlayer,
    NextRound(u32),
    GameOver,
}

/// What follows a guess by `slot` in `round` of a game of `rounds` rounds.
pub fn advance(slot: Slot, round: u32, rounds: u32) -> Transition {
    match slot {
        Slot::One => Transition::NextPlayer,
        Slot::Two if round >= rounds => Transition::GameOver,
        Slot::Two => Transition::NextRound(round + 1),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuessReport {
    pub row: ScoreRow,
    pub guess: Hsl,
    pub target: Hsl,
    pub transition: Transition,
}

/// End-of-game message, shown once.
#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    pub outcome: Outcome,
    pub names: String,
    pub score: f64,
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Game Over!")?;
        match self.outcome {
            Outcome::Winner(_) => writeln!(f, "Winner: {}", self.names)?,
            Outcome::Draw => writeln!(f, "Draw: {}", self.names)?,
        }
        write!(f, "Score: {:.2}", self.score)
    }
}

pub struct Game {
    wheel: Wheel,
    targets: Box<dyn Targets>,
    players: [Player; 2],
    rounds: u32,
    round: u32,
    phase: Phase,
    target: Option<Hsl>,
    rows: Vec<ScoreRow>,
}

impl Game {
    pub fn new(wheel: Wheel, targets: Box<dyn Targets>) -> Self {
        Self {
            wheel,
            targets,
            players: Self::fresh_players(&GameSetup::default()),
            rounds: 0,
            round: 0,
            phase: Phase::NotStarted,
            target: None,
            rows: vec![],
        }
    }

    fn fresh_players(setup: &GameSetup) -> [Player; 2] {
        [
            Player::new(Slot::One, &setup.player_one),
            Player::new(Slot::Two, &setup.player_two),
        ]
    }

    /// Starts a new game, discarding everything from a previous one.
    pub fn start(&mut self, setup: &GameSetup) {
        self.players = Self::fresh_players(setup);
        self.rounds = setup.rounds.max(1);
        self.round = 1;
        self.rows.clear();
        self.phase = Phase::Awaiting(Slot::One);
        self.target = Some(self.targets.next_target());
        log::info!(
            "game started: {} vs {}, {} rounds",
            self.players[0].name,
            self.players[1].name,
            self.rounds
        );
    }

    pub fn reset(&mut self) {
        self.players = Self::fresh_players(&GameSetup::default());
        self.rounds = 0;
        self.round = 0;
        self.rows.clear();
        self.phase = Phase::NotStarted;
        self.target = None;
        log::debug!("game reset");
    }

    /// Handles a click on the canvas. Returns `None` when the click is
    /// ignored: no game running, or outside the wheel.
    pub fn click(&mut self, at: Point) -> Option<GuessReport> {
        let Phase::Awaiting(slot) = self.phase else {
            log::trace!("click ignored, no game running");
            return None;
        };
        let target = self.target?;
        let Some(guess) = self.wheel.guess_at(at) else {
            log::trace!("click at ({:.1}, {:.1}) is off the wheel", at.x, at.y);
            return None;
        };

        let guess_rgb = guess.to_rgb();
        let target_rgb = target.to_rgb();
        let score = score::distance(&guess_rgb, &target_rgb);
        let player = &mut self.players[slot.index()];
        player.add_score(score);
        let row = ScoreRow {
            round: self.round,
            name: player.name.clone(),
            target: target_rgb,
            guess: guess_rgb,
            score,
        };
        log::debug!("{row}");
        self.rows.push(row.clone());

        let transition = advance(slot, self.round, self.rounds);
        match transition {
            Transition::NextPlayer => {
                self.phase = Phase::Awaiting(slot.other());
                self.target = Some(self.targets.next_target());
            }
            Transition::NextRound(n) => {
                self.round = n;
                self.phase = Phase::Awaiting(slot.other());
                self.target = Some(self.targets.next_target());
            }
            Transition::GameOver => {
                let outcome = decide_outcome(self.players[0].total, self.players[1].total);
                self.phase = Phase::Finished(outcome);
                log::info!("game over: {outcome:?}");
            }
        }
        Some(GuessReport {
            row,
            guess,
            target,
            transition,
        })
    }

    pub fn announcement(&self) -> Option<Announcement> {
        let Phase::Finished(outcome) = self.phase else {
            return None;
        };
        let [one, two] = &self.players;
        Some(match outcome {
            Outcome::Winner(slot) => {
                let winner = &self.players[slot.index()];
                Announcement {
                    outcome,
                    names: winner.name.clone(),
                    score: winner.total,
                }
            }
            Outcome::Draw => Announcement {
                outcome,
                names: format!("{} and {}", one.name, two.name),
                score: one.total,
            },
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn rounds(&self) -> u32 {
        self.rounds
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    pub fn rows(&self) -> &[ScoreRow] {
        &self.rows
    }

    pub fn target(&self) -> Option<Hsl> {
        self.target
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }
}

#[cfg(test)]
mod tests {
    use float_eq::assert_float_eq;

    use super::*;
    use crate::color::Rgb;

    struct FixedTargets {
        hues: Vec<f64>,
        next: usize,
    }

    impl Targets for FixedTargets {
        fn next_target(&mut self) -> Hsl {
            let hue = self.hues[self.next % self.hues.len()];
            self.next += 1;
            Hsl::new(hue, 1.0, 0.5)
        }
    }

    fn game_with_targets(hues: &[f64]) -> Game {
        Game::new(
            Wheel::new(300),
            Box::new(FixedTargets {
                hues: hues.to_vec(),
                next: 0,
            }),
        )
    }

    fn setup(rounds: u32) -> GameSetup {
        GameSetup {
            player_one: "Ada".to_string(),
            player_two: "Bo".to_string(),
            rounds,
        }
    }

    const CENTER: Point = Point { x: 150.0, y: 150.0 };
    const RED_RIM: Point = Point { x: 300.0, y: 150.0 };

    mod parse_round_count {
        use super::*;

        #[test]
        fn plain_numbers() {
            assert_eq!(parse_round_count(Some("3")), 3);
            assert_eq!(parse_round_count(Some("  12")), 12);
        }

        #[test]
        fn leading_digits_are_used() {
            assert_eq!(parse_round_count(Some("7 rounds")), 7);
            assert_eq!(parse_round_count(Some("3.9")), 3);
        }

        #[test]
        fn explicit_plus_sign_is_accepted() {
            assert_eq!(parse_round_count(Some("+7")), 7);
            assert_eq!(parse_round_count(Some(" +12")), 12);
        }

        #[test]
        fn huge_counts_saturate() {
            assert_eq!(parse_round_count(Some("99999999999")), u32::MAX);
            assert_eq!(parse_round_count(Some("4294967295")), u32::MAX);
            assert_eq!(parse_round_count(Some("4294967294")), u32::MAX - 1);
        }

        #[test]
        fn negative_counts_play_one_round() {
            assert_eq!(parse_round_count(Some("-3")), 1);
            assert_eq!(parse_round_count(Some("-99999999999")), 1);
        }

        #[test]
        fn falls_back_to_default() {
            assert_eq!(parse_round_count(None), DEFAULT_ROUNDS);
            assert_eq!(parse_round_count(Some("")), DEFAULT_ROUNDS);
            assert_eq!(parse_round_count(Some("abc")), DEFAULT_ROUNDS);
            assert_eq!(parse_round_count(Some("0")), DEFAULT_ROUNDS);
            assert_eq!(parse_round_count(Some("-0")), DEFAULT_ROUNDS);
            assert_eq!(parse_round_count(Some("+")), DEFAULT_ROUNDS);
            assert_eq!(parse_round_count(Some("- 3")), DEFAULT_ROUNDS);
        }
    }

    mod advance {
        use super::*;

        #[test]
        fn player_one_hands_over() {
            assert_eq!(advance(Slot::One, 1, 1), Transition::NextPlayer);
            assert_eq!(advance(Slot::One, 3, 5), Transition::NextPlayer);
        }

        #[test]
        fn player_two_advances_the_round() {
            assert_eq!(advance(Slot::Two, 1, 5), Transition::NextRound(2));
            assert_eq!(advance(Slot::Two, 4, 5), Transition::NextRound(5));
        }

        #[test]
        fn player_two_ends_the_last_round() {
            assert_eq!(advance(Slot::Two, 5, 5), Transition::GameOver);
            assert_eq!(advance(Slot::Two, 1, 1), Transition::GameOver);
        }
    }

    mod decide_outcome {
        use super::*;

        #[test]
        fn lower_total_wins() {
            assert_eq!(decide_outcome(10.0, 20.0), Outcome::Winner(Slot::One));
            assert_eq!(decide_outcome(20.0, 10.0), Outcome::Winner(Slot::Two));
        }

        #[test]
        fn exact_tie_is_a_draw() {
            assert_eq!(decide_outcome(42.5, 42.5), Outcome::Draw);
        }
    }

    mod click {
        use super::*;

        #[test]
        fn ignored_before_start() {
            let mut game = game_with_targets(&[0.0]);
            assert_eq!(game.click(CENTER), None);
            assert_eq!(game.phase(), Phase::NotStarted);
        }

        #[test]
        fn off_wheel_click_changes_nothing() {
            let mut game = game_with_targets(&[0.0]);
            game.start(&setup(3));
            assert_eq!(game.click(Point::new(0.0, 0.0)), None);
            assert_eq!(game.click(Point::new(150.0, 301.0)), None);
            assert!(game.rows().is_empty());
            assert_eq!(game.phase(), Phase::Awaiting(Slot::One));
            assert_eq!(game.round(), 1);
        }

        #[test]
        fn center_click_scores_gray_against_the_target() {
            let mut game = game_with_targets(&[0.0]);
            game.start(&setup(3));
            let report = game.click(CENTER).unwrap();
            assert_eq!(report.row.guess, Rgb::new(128, 128, 128));
            assert_eq!(report.row.target, Rgb::new(255, 0, 0));
            assert_float_eq!(report.row.score, 221.13, abs <= 1e-9);
            assert_eq!(report.row.name, "Ada");
            assert_eq!(report.transition, Transition::NextPlayer);
            assert_eq!(game.phase(), Phase::Awaiting(Slot::Two));
        }

        #[test]
        fn perfect_guess_scores_zero() {
            let mut game = game_with_targets(&[0.0]);
            game.start(&setup(3));
            let report = game.click(RED_RIM).unwrap();
            assert_float_eq!(report.row.score, 0.0, abs <= 1e-12);
        }

        #[test]
        fn new_target_after_each_guess() {
            let mut game = game_with_targets(&[0.0, 120.0, 240.0]);
            game.start(&setup(3));
            assert_eq!(game.target().unwrap().hue, 0.0);
            game.click(CENTER);
            assert_eq!(game.target().unwrap().hue, 120.0);
            game.click(CENTER);
            assert_eq!(game.target().unwrap().hue, 240.0);
        }

        #[test]
        fn rounds_advance_after_player_two() {
            let mut game = game_with_targets(&[0.0]);
            game.start(&setup(2));
            game.click(CENTER);
            assert_eq!(game.round(), 1);
            let report = game.click(CENTER).unwrap();
            assert_eq!(report.transition, Transition::NextRound(2));
            assert_eq!(game.round(), 2);
            assert_eq!(game.phase(), Phase::Awaiting(Slot::One));
            let rounds: Vec<u32> = game.rows().iter().map(|r| r.round).collect();
            assert_eq!(rounds, vec![1, 1]);
        }
    }

    mod full_game {
        use super::*;

        #[test]
        fn single_round_ends_after_two_guesses_with_one_announcement() {
            let mut game = game_with_targets(&[0.0]);
            game.start(&setup(1));
            let transitions: Vec<Transition> = [RED_RIM, CENTER]
                .iter()
                .filter_map(|p| game.click(*p))
                .map(|r| r.transition)
                .collect();
            assert_eq!(transitions, vec![Transition::NextPlayer, Transition::GameOver]);
            assert_eq!(game.phase(), Phase::Finished(Outcome::Winner(Slot::One)));

            let announcement = game.announcement().unwrap();
            assert_eq!(announcement.names, "Ada");
            assert_float_eq!(announcement.score, 0.0, abs <= 1e-12);
            assert_eq!(
                announcement.to_string(),
                "Game Over!\nWinner: Ada\nScore: 0.00"
            );

            // finished games ignore further clicks
            assert_eq!(game.click(CENTER), None);
            assert_eq!(game.rows().len(), 2);
        }

        #[test]
        fn totals_accumulate_over_rounds() {
            let mut game = game_with_targets(&[0.0]);
            game.start(&setup(2));
            for p in [CENTER, RED_RIM, CENTER, RED_RIM] {
                game.click(p);
            }
            let [one, two] = game.players();
            assert_float_eq!(one.total, 442.26, abs <= 1e-9);
            assert_float_eq!(two.total, 0.0, abs <= 1e-12);
            assert_eq!(game.phase(), Phase::Finished(Outcome::Winner(Slot::Two)));
            assert_eq!(game.announcement().unwrap().names, "Bo");
        }

        #[test]
        fn tie_is_announced_as_draw() {
            let mut game = game_with_targets(&[0.0]);
            game.start(&setup(1));
            game.click(CENTER);
            game.click(CENTER);
            assert_eq!(game.phase(), Phase::Finished(Outcome::Draw));
            assert_eq!(
                game.announcement().unwrap().to_string(),
                "Game Over!\nDraw: Ada and Bo\nScore: 221.13"
            );
        }

        #[test]
        fn restart_discards_previous_state() {
            let mut game = game_with_targets(&[0.0]);
            game.start(&setup(1));
            game.click(CENTER);
            game.click(CENTER);
            game.start(&GameSetup::default());
            assert!(game.rows().is_empty());
            assert_eq!(game.rounds(), DEFAULT_ROUNDS);
            assert_eq!(game.phase(), Phase::Awaiting(Slot::One));
            assert_eq!(game.players()[0].name, "Player 1");
            assert_eq!(game.players()[1].total, 0.0);
            assert_eq!(game.announcement(), None);
        }

        #[test]
        fn reset_returns_to_not_started() {
            let mut game = game_with_targets(&[0.0]);
            game.start(&setup(3));
            game.click(CENTER);
            game.reset();
            assert_eq!(game.phase(), Phase::NotStarted);
            assert_eq!(game.target(), None);
            assert_eq!(game.click(CENTER), None);
        }
    }

    #[test]
    fn random_targets_are_saturated_and_in_range() {
        let mut targets = RandomTargets::seeded(7);
        for _ in 0..100 {
            let t = targets.next_target();
            assert!((0.0..360.0).contains(&t.hue));
            assert_eq!(t.saturation, 1.0);
            assert_eq!(t.lightness, 0.5);
        }
    }
}

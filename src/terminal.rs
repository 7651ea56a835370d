use std::io::{self, BufRead, Write};

use crate::game::{Announcement, Game, GameSetup, Phase, Transition};
use crate::math_utils::Point;

pub const TUTORIAL: &str = "\
How to play
  A target color is picked at random for every turn.
  Players take turns clicking the point of the color wheel they think
  matches it. Hue runs around the wheel, saturation grows from the gray
  center to the rim.
  Each guess scores the distance between the two colors in RGB space,
  so lower is better. After the last round the lower total wins.

In the terminal, enter clicks as `x y` canvas coordinates, measured in
pixels from the top-left corner of the wheel image (see --wheel-out).
Commands: `new` starts over, `reset` clears the board, `scores` prints
the score table and `quit` leaves.";

fn parse_click(line: &str) -> Option<Point> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty());
    let x = parts.next()?.parse::<f64>().ok()?;
    let y = parts.next()?.parse::<f64>().ok()?;
    if parts.next().is_some() || !x.is_finite() || !y.is_finite() {
        return None;
    }
    Some(Point::new(x, y))
}

fn prompt<W: Write>(game: &Game, out: &mut W) -> io::Result<()> {
    let (Phase::Awaiting(slot), Some(target)) = (game.phase(), game.target()) else {
        return Ok(());
    };
    writeln!(
        out,
        "Round {}/{}: {}, find {}",
        game.round(),
        game.rounds(),
        game.players()[slot.index()].name,
        target.to_rgb()
    )
}

fn totals<W: Write>(game: &Game, out: &mut W) -> io::Result<()> {
    let [one, two] = game.players();
    writeln!(out, "{one} | {two}")
}

fn scoreboard<W: Write>(game: &Game, out: &mut W) -> io::Result<()> {
    if game.rows().is_empty() {
        return writeln!(out, "no guesses yet");
    }
    for row in game.rows() {
        writeln!(out, "{row}")?;
    }
    totals(game, out)
}

fn begin<W: Write>(game: &mut Game, setup: &GameSetup, out: &mut W) -> io::Result<()> {
    game.start(setup);
    totals(game, out)?;
    prompt(game, out)
}

/// Plays games reading commands and clicks from `input`. Returns the
/// announcement if the current game was played to the end.
pub fn run_session<R: BufRead, W: Write>(
    game: &mut Game,
    setup: &GameSetup,
    input: R,
    out: &mut W,
) -> io::Result<Option<Announcement>> {
    let size = game.wheel().size();
    writeln!(out, "Wheel is {size}x{size}, center at ({0}, {0})", game.wheel().radius())?;
    begin(game, setup, out)?;
    let mut announcement = None;

    for line in input.lines() {
        let line = line?;
        let line = line.trim();
        match line.to_ascii_lowercase().as_str() {
            "" => continue,
            "quit" => {
                log::info!("session quit");
                break;
            }
            "new" => {
                announcement = None;
                begin(game, setup, out)?;
                out.flush()?;
                continue;
            }
            "reset" => {
                announcement = None;
                game.reset();
                writeln!(out, "game reset, type `new` to play again")?;
                out.flush()?;
                continue;
            }
            "scores" => {
                scoreboard(game, out)?;
                out.flush()?;
                continue;
            }
            _ => {}
        }
        let Some(click) = parse_click(line) else {
            writeln!(out, "could not read '{line}', expected: x y")?;
            continue;
        };
        if !matches!(game.phase(), Phase::Awaiting(_)) {
            writeln!(out, "no game running, type `new` to start one")?;
            continue;
        }
        let Some(report) = game.click(click) else {
            writeln!(out, "ignored: ({}, {}) is outside the wheel", click.x, click.y)?;
            continue;
        };
        writeln!(out, "{}", report.row)?;
        let at = game
            .wheel()
            .pixel_for(report.target.hue, report.target.saturation);
        writeln!(out, "the target sat at ({:.0}, {:.0})", at.x, at.y)?;
        totals(game, out)?;
        if report.transition == Transition::GameOver {
            announcement = game.announcement();
            if let Some(a) = &announcement {
                writeln!(out, "{a}")?;
            }
            writeln!(out, "type `new` for another game or `quit` to leave")?;
        } else {
            prompt(game, out)?;
        }
        out.flush()?;
    }
    Ok(announcement)
}

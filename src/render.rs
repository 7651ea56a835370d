use raylib::prelude::*;

use crate::color::Rgb;
use crate::game::{Game, GameSetup, GuessReport, Outcome, Phase, Transition};
use crate::math_utils::Point;
use crate::settings::*;
use crate::wheel::WheelImage;

const ROWS_SHOWN: usize = 12;

fn to_raylib_color(color: &Rgb) -> Color {
    Color {
        r: color.red,
        g: color.green,
        b: color.blue,
        a: 255,
    }
}

fn wheel_texture(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    wheel: &WheelImage,
) -> Result<Texture2D, String> {
    let size = wheel.size() as i32;
    let mut image = Image::gen_image_color(size, size, Color::BLANK);
    for row in 0..wheel.size() {
        for col in 0..wheel.size() {
            let [r, g, b, a] = wheel.rgba_at(col, row);
            if a != 0 {
                image.draw_pixel(col as i32, row as i32, Color { r, g, b, a });
            }
        }
    }
    rl.load_texture_from_image(thread, &image)
        .map_err(|e| e.to_string())
}

fn swatch(d: &mut RaylibDrawHandle, x: i32, y: i32, size: i32, color: &Rgb) {
    d.draw_rectangle(x, y, size, size, to_raylib_color(color));
    d.draw_rectangle_lines(x, y, size, size, Color::DARKGRAY);
}

fn marker(d: &mut RaylibDrawHandle, game: &Game, hue: f64, saturation: f64, color: Color) {
    let at = game.wheel().pixel_for(hue, saturation);
    d.draw_circle_lines(
        MARGIN + at.x.round() as i32,
        MARGIN + at.y.round() as i32,
        6.0,
        color,
    );
}

fn scoreboard(d: &mut RaylibDrawHandle, game: &Game, x: i32, y: i32) {
    let [one, two] = game.players();
    d.draw_text(&one.to_string(), x, y, 20, Color::BLACK);
    d.draw_text(&two.to_string(), x, y + 24, 20, Color::BLACK);
    let rows = game.rows();
    let skip = rows.len().saturating_sub(ROWS_SHOWN);
    for (i, row) in rows.iter().skip(skip).enumerate() {
        let line_y = y + 60 + i as i32 * 22;
        d.draw_text(&format!("{}", row.round), x, line_y, 16, Color::DARKGRAY);
        d.draw_text(&row.name, x + 30, line_y, 16, Color::DARKGRAY);
        swatch(d, x + 150, line_y, 16, &row.target);
        swatch(d, x + 174, line_y, 16, &row.guess);
        d.draw_text(&format!("{:.2}", row.score), x + 200, line_y, 16, Color::DARKGRAY);
    }
}

fn dialog(d: &mut RaylibDrawHandle, game: &Game) {
    let Some(announcement) = game.announcement() else {
        return;
    };
    d.draw_rectangle(0, 0, WIDTH, HEIGHT, Color::new(0, 0, 0, 120));
    let (w, h) = (360, 180);
    let (x, y) = ((WIDTH - w) / 2, (HEIGHT - h) / 2);
    d.draw_rectangle(x, y, w, h, Color::RAYWHITE);
    d.draw_text("Game Over!", x + 20, y + 20, 30, Color::BLACK);
    let headline = match announcement.outcome {
        Outcome::Winner(_) => format!("Winner: {}", announcement.names),
        Outcome::Draw => format!("Draw: {}", announcement.names),
    };
    d.draw_text(&headline, x + 20, y + 70, 20, Color::BLACK);
    d.draw_text(
        &format!("Score: {:.2}", announcement.score),
        x + 20,
        y + 98,
        20,
        Color::BLACK,
    );
    d.draw_text("OK (enter)", x + 20, y + 140, 16, Color::DARKGRAY);
}

/// Opens the game window and runs until it is closed.
pub fn run(game: &mut Game, setup: &GameSetup) -> Result<(), String> {
    let (mut rl, thread) = raylib::init()
        .size(WIDTH, HEIGHT)
        .title("hueguess")
        .msaa_4x()
        .build();
    rl.set_target_fps(60);

    let texture = wheel_texture(&mut rl, &thread, &game.wheel().render())?;
    let size = game.wheel().size() as i32;
    let panel_x = MARGIN * 2 + size;
    let mut dialog_open = false;
    let mut last_guess: Option<GuessReport> = None;

    while !rl.window_should_close() {
        if rl.is_key_pressed(KeyboardKey::KEY_ENTER) {
            match game.phase() {
                Phase::Finished(_) if dialog_open => dialog_open = false,
                Phase::NotStarted | Phase::Finished(_) => {
                    last_guess = None;
                    game.start(setup);
                }
                Phase::Awaiting(_) => {}
            }
        }
        if rl.is_key_pressed(KeyboardKey::KEY_R) {
            dialog_open = false;
            last_guess = None;
            game.reset();
        }
        if !dialog_open && rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            let mouse = rl.get_mouse_position();
            let click = Point::new(
                (mouse.x - MARGIN as f32) as f64,
                (mouse.y - MARGIN as f32) as f64,
            );
            if let Some(report) = game.click(click) {
                dialog_open = report.transition == Transition::GameOver;
                last_guess = Some(report);
            }
        }

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::RAYWHITE);
        d.draw_texture(&texture, MARGIN, MARGIN, Color::WHITE);
        if let Some(report) = &last_guess {
            marker(&mut d, game, report.guess.hue, report.guess.saturation, Color::BLACK);
            marker(&mut d, game, report.target.hue, report.target.saturation, Color::WHITE);
        }

        match (game.phase(), game.target()) {
            (Phase::Awaiting(slot), Some(target)) => {
                d.draw_text(
                    &format!(
                        "Round {}/{}: {}",
                        game.round(),
                        game.rounds(),
                        game.players()[slot.index()].name
                    ),
                    panel_x,
                    MARGIN,
                    20,
                    Color::BLACK,
                );
                swatch(&mut d, panel_x + 300, MARGIN, 40, &target.to_rgb());
            }
            (Phase::NotStarted, _) => {
                d.draw_text("Press enter to start", panel_x, MARGIN, 20, Color::BLACK);
            }
            _ => {
                d.draw_text("Enter: new game, R: reset", panel_x, MARGIN, 20, Color::BLACK);
            }
        }
        scoreboard(&mut d, game, panel_x, MARGIN + 60);
        if dialog_open {
            dialog(&mut d, game);
        }
    }
    Ok(())
}

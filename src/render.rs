use macroquad::{color::*, shapes::*, text::*, window::*};
use ultraviolet::DVec2;

use crate::{
    simulation::Simulation,
    view::{Camera, Readout, TimeControl, Trails},
};

const FONT_SIZE: u16 = 30;
const BACKGROUND: Color = Color::new(0.08, 0.08, 0.08, 1.0);

fn screen_center() -> DVec2 {
    DVec2::new(screen_width() as f64, screen_height() as f64) * 0.5
}

/// Whether a disc at `pos` of radius `r` touches the window.
fn visible(pos: DVec2, r: f64) -> bool {
    pos.x + r >= 0.0
        && pos.y + r >= 0.0
        && pos.x - r <= screen_width() as f64
        && pos.y - r <= screen_height() as f64
}

pub fn render(simulation: &Simulation, camera: &Camera, time: &TimeControl, trails: &Trails) {
    clear_background(BACKGROUND);

    let center = screen_center();
    let origin = camera.origin(simulation.bodies());

    // Trails under the bodies, already relative to the origin
    for (trail, body) in trails.iter().zip(simulation.bodies()) {
        let color = body.color();
        let mut last: Option<DVec2> = None;

        for (pos, alpha) in trail.faded() {
            let point = camera.project(pos, DVec2::zero(), center);

            if let Some(prev) = last {
                draw_line(
                    prev.x as f32,
                    prev.y as f32,
                    point.x as f32,
                    point.y as f32,
                    1.0,
                    Color {
                        a: alpha * 0.6,
                        ..color
                    },
                );
            }

            last = Some(point);
        }
    }

    for body in simulation.bodies() {
        let pos = camera.project(body.pos(), origin, center);
        let r = body.radius() * camera.scale;

        if !visible(pos, r) {
            continue;
        }

        // Keep tiny bodies visible when zoomed out
        draw_circle(pos.x as f32, pos.y as f32, r.max(1.0) as f32, body.color());
    }

    render_hud(simulation, camera, time);
}

fn centered_line(text: &str, y: f32, color: Color) {
    let size = measure_text(text, None, FONT_SIZE, 1.0);
    let x = screen_width() * 0.5 - size.width * 0.5;

    draw_rectangle(x, y, size.width, size.height, BLACK);
    draw_text(text, x, y + size.offset_y, FONT_SIZE as f32, color);
}

fn render_hud(simulation: &Simulation, camera: &Camera, time: &TimeControl) {
    match Readout::of(camera, simulation) {
        Some(readout) => {
            let color = camera
                .focused()
                .and_then(|i| simulation.body(i))
                .map_or(WHITE, |body| body.color());

            centered_line(&readout.name, 10.0, color);
            centered_line(&readout.speed_line(), 40.0, color);
            centered_line(&readout.altitude_line(), 70.0, color);
        }
        None => centered_line("Space", 10.0, WHITE),
    }

    draw_text(
        &format!("x{}  t={:.2}", time.speed, simulation.time()),
        10.0,
        screen_height() - 10.0,
        20.0,
        GRAY,
    );
}

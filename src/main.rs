use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use macroquad::prelude::*;

use grav::{
    render::render,
    scenario::ScenarioConfig,
    simulation::Simulation,
    view::{Camera, TimeControl, Trails},
};

const CANVAS_W: i32 = 1920;
const CANVAS_H: i32 = 1080;

#[derive(Parser, Debug)]
#[command(name = "grav")]
#[command(about = "Real-time two-body gravity viewer")]
struct Args {
    /// Scenario YAML file; the built-in star and planet when omitted
    #[arg(long)]
    scenario: Option<PathBuf>,

    /// Initial time multiplier, negative runs backwards
    #[arg(long, default_value = "1.0", allow_hyphen_values = true)]
    speed: f64,

    /// Initial zoom
    #[arg(long, default_value = "1.0")]
    scale: f64,

    /// Positions kept per trail, overrides the scenario
    #[arg(long)]
    trail: Option<usize>,
}

fn window_conf() -> Conf {
    Conf {
        window_title: "grav".to_string(),
        window_width: CANVAS_W,
        window_height: CANVAS_H,
        window_resizable: true,
        sample_count: 4,
        icon: None,
        high_dpi: true,
        ..Default::default()
    }
}

struct App {
    simulation: Simulation,
    camera: Camera,
    time: TimeControl,
    trails: Trails,
    logged: u32,
}

impl App {
    fn load(args: &Args) -> Result<Self> {
        let scenario = match &args.scenario {
            Some(path) => ScenarioConfig::from_path(path)?,
            None => ScenarioConfig::default(),
        };

        let simulation = scenario.build()?;

        log::info!(
            "{} bodies, G={}, energy={:.3}",
            simulation.len(),
            simulation.gravity(),
            simulation.total_energy()
        );

        Ok(Self {
            simulation,
            camera: Camera::new(args.scale),
            time: TimeControl::new(args.speed),
            trails: Trails::new(args.trail.unwrap_or(scenario.trail_length)),
            logged: 0,
        })
    }

    fn handle_input(&mut self) {
        let len = self.simulation.len();

        if is_key_pressed(KeyCode::Left) {
            self.camera.focus_prev(len);
            self.trails.clear();
        }
        if is_key_pressed(KeyCode::Right) {
            self.camera.focus_next(len);
            self.trails.clear();
        }
        if is_key_pressed(KeyCode::Down) {
            self.camera.zoom_out();
        }
        if is_key_pressed(KeyCode::Up) {
            self.camera.zoom_in();
        }
        if is_key_pressed(KeyCode::Comma) {
            self.time.slower();
            log::info!("speed x{}", self.time.speed);
        }
        if is_key_pressed(KeyCode::Period) {
            self.time.faster();
            log::info!("speed x{}", self.time.speed);
        }
        if is_key_pressed(KeyCode::Slash) {
            self.time.reverse();
            log::info!("speed x{}", self.time.speed);
        }
    }

    fn update(&mut self) {
        let dt = self.time.dt(get_frame_time() as f64);

        self.simulation.step(dt);
        let origin = self.camera.origin(self.simulation.bodies());
        self.trails.record(&self.simulation, origin);

        // Report drift about once a second
        let time = get_time() as u32;

        if time > self.logged {
            self.logged = time;
            log::debug!(
                "t={:.3} energy={:.6} momentum=({:.6}, {:.6})",
                self.simulation.time(),
                self.simulation.total_energy(),
                self.simulation.momentum().x,
                self.simulation.momentum().y
            );
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut app = match App::load(&args) {
        Ok(app) => app,
        Err(err) => {
            log::error!("{:#}", err);
            std::process::exit(1);
        }
    };

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        app.handle_input();
        app.update();

        render(&app.simulation, &app.camera, &app.time, &app.trails);

        next_frame().await
    }
}

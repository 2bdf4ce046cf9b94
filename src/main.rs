//! Gnome Runner entry point
//!
//! Sets up logging, opens the macroquad window and drives the session one
//! frame at a time.

use gnome_runner::GameConfig;
use gnome_runner::platform::desktop::DesktopPlatform;
use gnome_runner::session::Session;
use gnome_runner::sim::FrameOutcome;
use macroquad::window::{Conf, next_frame};

fn window_conf() -> Conf {
    let config = GameConfig::default();
    Conf {
        window_title: config.title,
        window_width: config.window_width as i32,
        window_height: config.window_height as i32,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Gnome Runner starting...");

    let seed = rand::random::<u64>();
    let mut session = match Session::start(GameConfig::default(), seed, DesktopPlatform::new()) {
        Ok(session) => session,
        Err(err) => {
            log::error!("{}", err);
            std::process::exit(1);
        }
    };

    while session.run_frame() == FrameOutcome::Continue {
        next_frame().await;
    }

    let report = session.finish();
    log::info!(
        "Done: {} frames, {:?}, seed {}",
        report.frames,
        report.phase,
        report.seed
    );
}

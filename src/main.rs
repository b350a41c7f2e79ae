//! Astrocrash entry point
//!
//! Sets up the terminal, wires the terminal collaborators into a
//! [`GameSession`] and restores the terminal on the way out.

use std::io::{BufWriter, stdout};

use astrocrash::audio::TerminalAudio;
use astrocrash::platform::{PlatformError, TerminalGuard, TerminalInput};
use astrocrash::renderer::TerminalRenderer;
use astrocrash::{FileScoreStore, GameSession, Settings};

fn main() -> Result<(), PlatformError> {
    env_logger::init();
    let settings = Settings::load();
    log::info!("Astrocrash starting ({} fps)", settings.fps);

    let result = play(settings);
    if let Err(e) = &result {
        log::error!("Game stopped: {e}");
    }
    result
}

fn play(settings: Settings) -> Result<(), PlatformError> {
    // Dropped last, after the session has stopped drawing
    let _terminal = TerminalGuard::enter(stdout())?;

    let renderer = TerminalRenderer::new(BufWriter::new(stdout()), &settings.tuning);
    let input = TerminalInput::spawn();
    let audio = TerminalAudio::new(stdout(), &settings);
    let store = FileScoreStore::new(settings.high_score_path.clone());

    let mut session = GameSession::new(settings, renderer, input, audio, store);
    session.run()
}

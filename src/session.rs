//! Top-level game flow
//!
//! [`GameSession`] cycles Menu → Playing → GameOver → Menu. It owns the round
//! state and talks to the outside world only through the collaborator traits
//! it was built with.

use std::thread;
use std::time::{Duration, Instant};

use crate::audio::{AudioSink, SoundEffect};
use crate::highscores::ScoreStore;
use crate::platform::{InputEvent, InputSource, KeyState, PlatformError};
use crate::renderer::{Renderer, draw_game_over, draw_menu, draw_round};
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};

/// Which screen is active
#[derive(Debug)]
pub enum Screen {
    /// Title screen showing the best score read on entry
    Menu { high_score: u64 },
    /// A round in progress
    Playing(Box<GameState>),
    /// Result of the round that just ended
    GameOver { score: u64 },
}

/// Whether the process should keep running after a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

impl From<KeyState> for TickInput {
    fn from(keys: KeyState) -> Self {
        Self {
            rotate_left: keys.rotate_left,
            rotate_right: keys.rotate_right,
            thrust: keys.thrust,
            fire: keys.fire,
        }
    }
}

/// The game: settings, collaborators and the active screen
pub struct GameSession<R, I, A, S> {
    settings: Settings,
    renderer: R,
    input: I,
    audio: A,
    store: S,
    screen: Screen,
    /// Rounds started so far
    rounds: u64,
}

impl<R, I, A, S> GameSession<R, I, A, S>
where
    R: Renderer,
    I: InputSource,
    A: AudioSink,
    S: ScoreStore,
{
    /// Start at the menu; the music loop starts here, once per process
    pub fn new(settings: Settings, renderer: R, input: I, mut audio: A, store: S) -> Self {
        audio.start_music();
        let high_score = store.best();
        Self {
            settings,
            renderer,
            input,
            audio,
            store,
            screen: Screen::Menu { high_score },
            rounds: 0,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Run one frame: handle input, advance the active screen, draw it
    pub fn step(&mut self, dt: Duration) -> Result<Flow, PlatformError> {
        let events = self.input.poll_events();

        let flow = match self.screen {
            Screen::Menu { .. } => self.step_menu(&events),
            Screen::Playing(_) => self.step_playing(&events, dt),
            Screen::GameOver { .. } => self.step_game_over(&events),
        };

        if flow == Flow::Continue {
            self.render()?;
        }
        Ok(flow)
    }

    /// Fixed-rate frame loop until the player quits
    pub fn run(&mut self) -> Result<(), PlatformError> {
        let frame = Duration::from_secs_f64(1.0 / self.settings.fps.max(1) as f64);
        let mut last = Instant::now();

        loop {
            let frame_start = Instant::now();
            let dt = frame_start.duration_since(last);
            last = frame_start;

            if self.step(dt)? == Flow::Exit {
                log::info!("Exiting after {} round(s)", self.rounds);
                return Ok(());
            }

            let elapsed = frame_start.elapsed();
            if elapsed < frame {
                thread::sleep(frame - elapsed);
            }
        }
    }

    fn step_menu(&mut self, events: &[InputEvent]) -> Flow {
        for event in events {
            match event {
                InputEvent::Quit | InputEvent::Cancel => return Flow::Exit,
                InputEvent::Confirm => {
                    self.start_round();
                    return Flow::Continue;
                }
            }
        }
        Flow::Continue
    }

    fn step_playing(&mut self, events: &[InputEvent], dt: Duration) -> Flow {
        if events
            .iter()
            .any(|e| matches!(e, InputEvent::Quit | InputEvent::Cancel))
        {
            log::info!("Round abandoned");
            self.finish_round();
            return Flow::Continue;
        }

        let input = TickInput::from(self.input.key_state());
        let Screen::Playing(state) = &mut self.screen else {
            return Flow::Continue;
        };

        tick(state, &input, dt);
        for event in state.drain_events() {
            match event {
                GameEvent::ProjectileFired => self.audio.play(SoundEffect::Laser),
                GameEvent::ObstacleDestroyed { .. } => self.audio.play(SoundEffect::Explosion),
            }
        }

        if state.is_time_up() {
            self.finish_round();
        }
        Flow::Continue
    }

    fn step_game_over(&mut self, events: &[InputEvent]) -> Flow {
        for event in events {
            match event {
                InputEvent::Quit => return Flow::Exit,
                InputEvent::Confirm => {
                    self.screen = Screen::Menu {
                        high_score: self.store.best(),
                    };
                    return Flow::Continue;
                }
                InputEvent::Cancel => {}
            }
        }
        Flow::Continue
    }

    fn start_round(&mut self) {
        let seed = match self.settings.seed {
            Some(seed) => seed.wrapping_add(self.rounds),
            None => rand::random(),
        };
        self.rounds += 1;
        log::info!("Round {} starting (seed {})", self.rounds, seed);
        let state = GameState::new(seed, self.settings.tuning.clone());
        self.screen = Screen::Playing(Box::new(state));
    }

    /// Leave Playing: the only place a round's score is submitted
    fn finish_round(&mut self) {
        let Screen::Playing(state) = &self.screen else {
            return;
        };
        let score = state.score;

        match self.store.save(score) {
            Ok(true) => {}
            Ok(false) => log::debug!("Score {score} did not beat the high score"),
            Err(e) => log::warn!("Could not save high score: {e}"),
        }
        log::info!("Round over, score {score}");
        self.screen = Screen::GameOver { score };
    }

    fn render(&mut self) -> Result<(), PlatformError> {
        let field = self.settings.tuning.field_size();
        match &self.screen {
            Screen::Menu { high_score } => draw_menu(&mut self.renderer, field, *high_score),
            Screen::Playing(state) => draw_round(&mut self.renderer, state),
            Screen::GameOver { score } => draw_game_over(&mut self.renderer, field, *score),
        }
        self.renderer.present()
    }
}

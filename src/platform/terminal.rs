//! Keyboard input from a terminal
//!
//! A dedicated thread does the blocking `event::read()` calls and forwards
//! events over a channel, so the frame loop never blocks on input.
//!
//! Held keys: terminals with keyboard enhancement send press / repeat /
//! release; classic terminals only send presses (OS key repeat shows up as
//! repeated presses). Either way a key counts as held while its last press or
//! repeat arrived within [`HOLD_WINDOW`]; a release drops it immediately.

use std::collections::HashMap;
use std::io::Write;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{ExecutableCommand, cursor, terminal};

use super::{InputEvent, InputSource, KeyState, PlatformError};

/// How long after its last press/repeat a key still counts as held.
/// OS key repeat runs at 15 Hz or faster, so this is refreshed before expiry.
pub const HOLD_WINDOW: Duration = Duration::from_millis(133);

/// Tracks held keys and turns presses into one-shot events
#[derive(Debug, Default)]
pub struct KeyTracker {
    last_seen: HashMap<KeyCode, Instant>,
}

impl KeyTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one terminal event; returns the one-shot event it maps to, if any
    pub fn handle(&mut self, event: &Event, now: Instant) -> Option<InputEvent> {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event
        else {
            return None;
        };

        match kind {
            KeyEventKind::Press => {
                self.last_seen.insert(normalize(*code), now);
                match code {
                    KeyCode::Enter => Some(InputEvent::Confirm),
                    KeyCode::Esc => Some(InputEvent::Cancel),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        Some(InputEvent::Quit)
                    }
                    KeyCode::Char('q') | KeyCode::Char('Q') => Some(InputEvent::Quit),
                    _ => None,
                }
            }
            KeyEventKind::Repeat => {
                self.last_seen.insert(normalize(*code), now);
                None
            }
            KeyEventKind::Release => {
                self.last_seen.remove(&normalize(*code));
                None
            }
        }
    }

    fn is_held(&self, key: KeyCode, now: Instant) -> bool {
        self.last_seen
            .get(&key)
            .map(|&last| now.saturating_duration_since(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    }

    /// Held keys as of `now`
    pub fn state(&self, now: Instant) -> KeyState {
        KeyState {
            rotate_left: self.is_held(KeyCode::Left, now) || self.is_held(KeyCode::Char('a'), now),
            rotate_right: self.is_held(KeyCode::Right, now)
                || self.is_held(KeyCode::Char('d'), now),
            thrust: self.is_held(KeyCode::Up, now) || self.is_held(KeyCode::Char('w'), now),
            fire: self.is_held(KeyCode::Char(' '), now),
        }
    }
}

/// Fold letter case so A and a are the same key
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}

/// Terminal keyboard as an [`InputSource`]
pub struct TerminalInput {
    rx: Receiver<Event>,
    keys: KeyTracker,
    closed: bool,
}

impl TerminalInput {
    /// Start the reader thread
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::channel::<Event>();
        thread::spawn(move || {
            loop {
                match event::read() {
                    Ok(ev) => {
                        if tx.send(ev).is_err() {
                            break; // receiver dropped: game is exiting
                        }
                    }
                    Err(e) => {
                        log::warn!("Input reader stopped: {e}");
                        break;
                    }
                }
            }
        });
        Self {
            rx,
            keys: KeyTracker::new(),
            closed: false,
        }
    }
}

impl InputSource for TerminalInput {
    fn key_state(&mut self) -> KeyState {
        self.keys.state(Instant::now())
    }

    fn poll_events(&mut self) -> Vec<InputEvent> {
        let mut events = Vec::new();
        loop {
            match self.rx.try_recv() {
                Ok(ev) => {
                    if let Some(e) = self.keys.handle(&ev, Instant::now()) {
                        events.push(e);
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // Without input there is no way to leave; treat as a quit once
                    if !self.closed {
                        self.closed = true;
                        events.push(InputEvent::Quit);
                    }
                    break;
                }
            }
        }
        events
    }
}

/// Terminal in game mode: raw input, alternate screen, hidden cursor
///
/// Dropping the guard puts the terminal back, including when setup fails
/// halfway or the game panics.
pub struct TerminalGuard<W: Write> {
    out: W,
    raw_mode: bool,
    keyboard_enhanced: bool,
}

impl<W: Write> TerminalGuard<W> {
    pub fn enter(out: W) -> Result<Self, PlatformError> {
        terminal::enable_raw_mode()?;
        let mut guard = Self {
            out,
            raw_mode: true,
            keyboard_enhanced: false,
        };
        guard.setup()?;
        Ok(guard)
    }

    fn setup(&mut self) -> Result<(), PlatformError> {
        self.out.execute(terminal::EnterAlternateScreen)?;
        self.out.execute(cursor::Hide)?;
        // Key release events where supported; elsewhere the hold window applies
        self.keyboard_enhanced = self
            .out
            .execute(PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::REPORT_EVENT_TYPES,
            ))
            .is_ok();
        Ok(())
    }
}

impl<W: Write> Drop for TerminalGuard<W> {
    fn drop(&mut self) {
        if self.keyboard_enhanced {
            let _ = self.out.execute(PopKeyboardEnhancementFlags);
        }
        let _ = self.out.execute(cursor::Show);
        let _ = self.out.execute(terminal::LeaveAlternateScreen);
        let _ = self.out.flush();
        if self.raw_mode {
            let _ = terminal::disable_raw_mode();
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    use super::*;

    const HIDE_CURSOR: &str = "\x1b[?25l";
    const SHOW_CURSOR: &str = "\x1b[?25h";
    const LEAVE_ALT_SCREEN: &str = "\x1b[?1049l";

    /// Terminal output that can refuse to hide the cursor
    #[derive(Clone, Default)]
    struct FakeTty {
        written: Rc<RefCell<Vec<u8>>>,
        refuse_hide: bool,
    }

    impl FakeTty {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.written.borrow()).to_string()
        }
    }

    impl Write for FakeTty {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.refuse_hide && buf.windows(6).any(|w| w == HIDE_CURSOR.as_bytes()) {
                return Err(io::Error::other("cursor locked"));
            }
            self.written.borrow_mut().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn guard_over(tty: &FakeTty) -> TerminalGuard<FakeTty> {
        TerminalGuard {
            out: tty.clone(),
            raw_mode: false,
            keyboard_enhanced: false,
        }
    }

    fn press(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn release(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new_with_kind(
            code,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ))
    }

    #[test]
    fn test_one_shot_events() {
        let mut keys = KeyTracker::new();
        let now = Instant::now();
        assert_eq!(
            keys.handle(&press(KeyCode::Enter), now),
            Some(InputEvent::Confirm)
        );
        assert_eq!(
            keys.handle(&press(KeyCode::Esc), now),
            Some(InputEvent::Cancel)
        );
        assert_eq!(
            keys.handle(&press(KeyCode::Char('Q')), now),
            Some(InputEvent::Quit)
        );
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(keys.handle(&ctrl_c, now), Some(InputEvent::Quit));
        assert_eq!(keys.handle(&press(KeyCode::Char(' ')), now), None);
    }

    #[test]
    fn test_held_keys_expire() {
        let mut keys = KeyTracker::new();
        let start = Instant::now();
        keys.handle(&press(KeyCode::Left), start);
        keys.handle(&press(KeyCode::Char(' ')), start);

        let state = keys.state(start + Duration::from_millis(50));
        assert!(state.rotate_left);
        assert!(state.fire);
        assert!(!state.thrust);

        let later = keys.state(start + HOLD_WINDOW + Duration::from_millis(1));
        assert_eq!(later, KeyState::default());
    }

    #[test]
    fn test_release_drops_key() {
        let mut keys = KeyTracker::new();
        let now = Instant::now();
        keys.handle(&press(KeyCode::Up), now);
        assert!(keys.state(now).thrust);
        keys.handle(&release(KeyCode::Up), now);
        assert!(!keys.state(now).thrust);
    }

    #[test]
    fn test_letter_keys_ignore_case() {
        let mut keys = KeyTracker::new();
        let now = Instant::now();
        keys.handle(&press(KeyCode::Char('D')), now);
        keys.handle(&press(KeyCode::Char('W')), now);
        let state = keys.state(now);
        assert!(state.rotate_right);
        assert!(state.thrust);
    }

    #[test]
    fn test_non_key_events_ignored() {
        let mut keys = KeyTracker::new();
        assert_eq!(keys.handle(&Event::Resize(80, 24), Instant::now()), None);
        assert_eq!(keys.state(Instant::now()), KeyState::default());
    }

    #[test]
    fn test_guard_restores_on_drop() {
        let tty = FakeTty::default();
        let mut guard = guard_over(&tty);
        guard.setup().unwrap();
        assert!(tty.text().contains(HIDE_CURSOR));
        drop(guard);

        let text = tty.text();
        assert!(text.contains(SHOW_CURSOR));
        assert!(text.ends_with(LEAVE_ALT_SCREEN));
    }

    #[test]
    fn test_guard_restores_after_failed_setup() {
        let tty = FakeTty {
            refuse_hide: true,
            ..Default::default()
        };
        let mut guard = guard_over(&tty);
        assert!(guard.setup().is_err());
        assert!(!tty.text().contains(SHOW_CURSOR));
        drop(guard);

        let text = tty.text();
        assert!(text.contains(SHOW_CURSOR));
        assert!(text.contains(LEAVE_ALT_SCREEN));
    }
}

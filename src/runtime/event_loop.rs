use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::audio::AudioEvent;
use crate::config;
use crate::controller::{PlaybackController, PlaybackOutput};
use crate::error::Result;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::{MprisSnapshot, snapshot, update_mpris};
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
    /// What was last published to MPRIS.
    pub last_mpris: MprisSnapshot,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` seeded from `controller`.
    pub fn new<O: PlaybackOutput>(controller: &PlaybackController<O>) -> Self {
        Self {
            pending_gg: false,
            last_mpris: snapshot(controller),
        }
    }
}

/// Main terminal event loop: draws the UI, applies audio events, MPRIS
/// commands and key presses. Returns `Ok(())` when shutdown is requested.
#[allow(clippy::too_many_arguments)]
pub fn run<O: PlaybackOutput>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    app: &mut App,
    controller: &mut PlaybackController<O>,
    audio_events: &mpsc::Receiver<AudioEvent>,
    mpris: &MprisHandle,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<()> {
    loop {
        while let Ok(ev) = audio_events.try_recv() {
            controller.on_audio_event(ev);
        }

        let current = snapshot(controller);
        if current != state.last_mpris {
            update_mpris(mpris, controller);
            state.last_mpris = current;
        }

        terminal.draw(|f| ui::draw(f, &*app, &*controller, &settings.ui))?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, app, controller) {
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, app, controller, state) {
                    return Ok(());
                }
            }
        }
    }
}

/// Select the catalog entry at `idx` and move the cursor onto it.
fn select_row<O: PlaybackOutput>(app: &mut App, controller: &mut PlaybackController<O>, idx: usize) {
    let Some(id) = controller.catalog().tracks().get(idx).map(|t| t.id.clone()) else {
        return;
    };
    app.set_selected(idx);
    controller.select(&id);
}

/// Put the cursor on whatever is playing.
fn follow_active<O: PlaybackOutput>(app: &mut App, controller: &PlaybackController<O>) {
    if let Some(pos) = controller
        .active_track_id()
        .and_then(|id| controller.catalog().position(id))
    {
        app.set_selected(pos);
    }
}

/// Row next to `current`, wrapping around a list of `len` rows.
fn adjacent(current: usize, len: usize, forward: bool) -> usize {
    if len == 0 {
        return 0;
    }
    if forward {
        (current + 1) % len
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

/// Apply an MPRIS command. Returns `true` when the app should quit.
fn handle_control_cmd<O: PlaybackOutput>(
    cmd: ControlCmd,
    app: &mut App,
    controller: &mut PlaybackController<O>,
) -> bool {
    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => {
            if controller.active_track_id().is_none() {
                let idx = app.selected;
                select_row(app, controller, idx);
            }
        }
        ControlCmd::Pause | ControlCmd::Stop => controller.stop(),
        ControlCmd::PlayPause => {
            if controller.active_track_id().is_some() {
                controller.stop();
            } else {
                let idx = app.selected;
                select_row(app, controller, idx);
            }
        }
        ControlCmd::Next | ControlCmd::Prev => {
            let len = controller.catalog().len();
            if len > 0 {
                let from = controller
                    .active_track_id()
                    .and_then(|id| controller.catalog().position(id))
                    .unwrap_or(app.selected);
                let to = adjacent(from, len, cmd == ControlCmd::Next);
                // A lone active entry is its own neighbour; selecting it would stop it.
                if to != from || controller.active_track_id().is_none() {
                    select_row(app, controller, to);
                }
            }
        }
    }
    false
}

/// Apply a key press. Returns `true` when the app should quit.
fn handle_key_event<O: PlaybackOutput>(
    key: KeyEvent,
    app: &mut App,
    controller: &mut PlaybackController<O>,
    state: &mut EventLoopState,
) -> bool {
    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('j') | KeyCode::Down => app.next(),
        KeyCode::Char('k') | KeyCode::Up => app.prev(),
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.first();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => app.last(),
        KeyCode::Enter | KeyCode::Char(' ') => {
            if app.has_rows() {
                let idx = app.selected;
                select_row(app, controller, idx);
            }
        }
        KeyCode::Char(c @ '1'..='9') => {
            if let Some(n) = c.to_digit(10) {
                select_row(app, controller, n as usize - 1);
            }
        }
        KeyCode::Char('r') => {
            controller.select_random();
            follow_active(app, controller);
        }
        KeyCode::Char('s') => controller.stop(),
        _ => {}
    }

    false
}

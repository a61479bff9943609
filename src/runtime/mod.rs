use std::env;
use std::sync::mpsc;
use std::time::Duration;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::app::App;
use crate::config;
use crate::error::Result;
use crate::mpris::ControlCmd;

mod event_loop;
mod mpris_sync;
mod settings;
mod startup;

pub fn run() -> Result<()> {
    let arg = env::args().nth(1);
    if arg.as_deref() == Some("--default-config") {
        print!("{}", toml::to_string_pretty(&config::Settings::default())?);
        return Ok(());
    }

    let mut settings = settings::load_settings();
    startup::apply_args(&mut settings, arg);
    startup::init_logging(&settings);

    let (mut controller, audio_events) = startup::build_controller(&settings)?;
    let mut app = App::new(controller.catalog().len());

    let (control_tx, control_rx) = mpsc::channel::<ControlCmd>();
    let mpris = crate::mpris::spawn_mpris(control_tx);
    mpris_sync::update_mpris(&mpris, &controller);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<()> = (|| {
        let mut state = event_loop::EventLoopState::new(&controller);
        event_loop::run(
            &mut terminal,
            &settings,
            &mut app,
            &mut controller,
            &audio_events,
            &mpris,
            &control_rx,
            &mut state,
        )
    })();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    controller
        .output()
        .quit_softly(Duration::from_millis(settings.audio.quit_fade_out_ms));
    controller.stop();
    mpris_sync::update_mpris(&mpris, &controller);
    tracing::info!("hush exiting");

    run_result
}

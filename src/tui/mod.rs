pub mod state;
pub mod view;

use crate::client::EventClient;
use crate::config::Config;
use crate::logging;
use crate::pipeline::{DayView, MountedView};
use crate::tui::state::AppState;
use crate::tui::view::draw;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::{env, io, time::Duration};
use tracing::{info, warn};

type Term = Terminal<CrosstermBackend<io::Stdout>>;

pub async fn run() -> Result<()> {
    let log_path = logging::init();

    // --- CONFIGURATION LOGIC ---
    // Load from file, fallback to defaults; a URL argument wins over both
    let mut config = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!(error = %e, "using default configuration");
            Config::default()
        }
    };
    if let Some(url) = env::args().nth(1) {
        config.url = url;
    }
    config.validate()?;
    if let Ok(path) = &log_path {
        info!(log = %path.display(), url = %config.url, "starting daycal");
    }

    let client = EventClient::new(&config.url, config.allow_insecure_certs)?;

    // Panic Hook: give the terminal back before printing the panic
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        default_hook(info);
    }));

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mounted = DayView::new(client).mount();
    let mut state = AppState::new(config.window(), config.url.clone());

    let result = event_loop(&mut terminal, &mounted, &mut state).await;

    mounted.unmount().await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(terminal: &mut Term, mounted: &MountedView, state: &mut AppState) -> Result<()> {
    let mut updates = mounted.updates();

    loop {
        if updates.has_changed().unwrap_or(false) {
            let events = updates.borrow_and_update().clone();
            state.apply_events(events);
        }
        let view = mounted.view();
        state.apply_status(view.stage(), view.last_error());

        terminal.draw(|f| draw(f, state))?;

        if !event::poll(Duration::from_millis(50))? {
            continue;
        }
        match event::read()? {
            Event::Resize(width, height) => {
                state.recomputes += 1;
                mounted.resize(width, height).await;
            }
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => break,
                KeyCode::Char('r') => {
                    state.recomputes += 1;
                    mounted.recompute().await;
                }
                _ => {}
            },
            _ => {}
        }
    }

    Ok(())
}

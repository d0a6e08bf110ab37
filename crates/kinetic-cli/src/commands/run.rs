use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Terminal,
};

use kinetic_core::AppConfig;
use kinetic_tui::{
    event::{AppEvent, EventHandler},
    input::{handle_key_event, handle_mouse_event, Action, PointerInput},
    widgets::{PageIndicatorWidget, PagerWidget, StatusBarWidget},
    App, Theme,
};

pub async fn run(config: Arc<AppConfig>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        EnableFocusChange,
        SetTitle("Kinetic")
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(config.clone(), Theme::default());
    let event_handler =
        EventHandler::with_animation_fps(config.tui.tick_rate_ms, config.tui.animation_fps);

    tracing::debug!(pages = app.pages, mode = ?config.scroll.mode, "Starting pager");

    let result = main_loop(&mut terminal, &mut app, &event_handler);

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        DisableFocusChange
    )?;
    terminal.show_cursor()?;

    result
}

fn main_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    // Checked at the end of each iteration to pick the next poll interval
    let mut needs_fast_update = false;

    loop {
        app.tick(Instant::now());

        terminal.draw(|frame| {
            let size = frame.area();

            // Pager, page dots, status bar
            let layout = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .split(size);

            app.resize(layout[0].width);

            PagerWidget::render(frame, layout[0], app);
            PageIndicatorWidget::render(frame, layout[1], app);
            StatusBarWidget::render(frame, layout[2], app);
        })?;

        let event = if needs_fast_update {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };

        if let Some(event) = event {
            match event {
                AppEvent::Key(key) => {
                    let action = handle_key_event(key);
                    if action != Action::None {
                        app.clear_status();
                    }
                    app.handle_action(action);
                }
                AppEvent::Mouse(mouse) => {
                    if let Some(input) = handle_mouse_event(mouse, app.cell_scale()) {
                        app.handle_pointer(input, Instant::now());
                    }
                }
                AppEvent::Resize(width, _) => app.resize(width),
                AppEvent::FocusLost => app.handle_pointer(PointerInput::Cancel, Instant::now()),
                AppEvent::Tick => {}
            }
        }

        needs_fast_update = app.needs_fast_update();

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

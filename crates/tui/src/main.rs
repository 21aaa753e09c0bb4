mod app;
mod config;
mod logging;

use crate::app::handlers::{handle_key, handle_mouse, KeyOutcome};
use crate::app::host::TerminalHost;
use crate::app::screen::{HomeScreen, MockProductService};
use crate::app::state::LogKind;
use crate::app::view::draw_ui;
use crate::app::AppState;
use crate::config::DemoConfig;
use crate::logging::init_logging;
use crossterm::cursor::Show;
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::cell::RefCell;
use std::io::Stdout;
use std::rc::Rc;
use std::time::{Duration, Instant};
use ui_facade::export::XlsxWriter;
use ui_facade::i18n::TextBundle;
use ui_facade::storage::{FileStore, KeyValueStore, MemoryStore};
use ui_facade::Facade;

const FRAME_INTERVAL: Duration = Duration::from_millis(50);
const MAX_EVENTS_PER_TICK: usize = 64;

const BANNER_LINES: [&str; 3] = [
    "┌──────────────────────────────┐",
    "│   UI Facade interaction demo │",
    "└──────────────────────────────┘",
];

struct TerminalRestoreGuard;

impl Drop for TerminalRestoreGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut stdout = std::io::stdout();
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
        let _ = stdout.execute(Show);
    }
}

fn load_texts(config: &DemoConfig) -> TextBundle {
    let Some(path) = config.i18n_path.as_deref() else {
        return TextBundle::default();
    };
    match TextBundle::load(path) {
        Ok(bundle) => bundle,
        Err(error) => {
            tracing::warn!(path = %path.display(), %error, "text bundle unreadable; using defaults");
            TextBundle::default()
        }
    }
}

fn open_storage(config: &DemoConfig) -> Rc<dyn KeyValueStore> {
    match FileStore::open(&config.storage_path) {
        Ok(store) => Rc::new(store),
        Err(error) => {
            tracing::warn!(
                path = %config.storage_path.display(),
                %error,
                "storage file unusable; keeping values in memory"
            );
            Rc::new(MemoryStore::default())
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = DemoConfig::from_env();
    let _log_guard = init_logging(&config.log_file)?;
    tracing::info!(?config, "starting demo");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, run(config))
}

async fn run(config: DemoConfig) -> Result<(), Box<dyn std::error::Error>> {
    let texts = load_texts(&config);
    let storage = open_storage(&config);

    let mut stdout = std::io::stdout();
    let _restore_guard = TerminalRestoreGuard;
    stdout.execute(EnterAlternateScreen)?;
    enable_raw_mode()?;
    if config.mouse_capture {
        stdout.execute(EnableMouseCapture)?;
    }
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let state = Rc::new(RefCell::new(AppState {
        mouse_capture_enabled: config.mouse_capture,
        ..AppState::default()
    }));
    {
        let mut app = state.borrow_mut();
        for line in BANNER_LINES {
            app.push_line(LogKind::System, line);
        }
        app.push_line(LogKind::Space, "");
        app.push_line(
            LogKind::System,
            "Pick an interaction on the left and press Enter. ? toggles help.",
        );
        if !config.mouse_capture {
            app.push_line(
                LogKind::Warning,
                "Mouse capture is off; the signature pad is unavailable.",
            );
        }
        app.push_line(LogKind::Space, "");
    }

    let host = Rc::new(TerminalHost::new(state.clone(), texts));
    let facade = Facade::new(host.clone())
        .with_router(host)
        .with_data_service(Rc::new(MockProductService))
        .with_storage(storage)
        .with_exporter(Rc::new(XlsxWriter::new(config.export_dir.clone())));
    let screen = HomeScreen::new(Rc::new(facade), state.clone());

    let result = event_loop(&mut terminal, &state, &screen).await;
    state.borrow_mut().close_all_surfaces();
    tracing::info!("demo finished");
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    state: &Rc<RefCell<AppState>>,
    screen: &Rc<HomeScreen>,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        let mut handled = 0;
        while handled < MAX_EVENTS_PER_TICK && event::poll(Duration::ZERO)? {
            handled += 1;
            let event = event::read()?;
            let mut app = state.borrow_mut();
            match event {
                Event::Key(key) => match handle_key(&mut app, key) {
                    KeyOutcome::Run(action) => {
                        tracing::debug!(?action, "running menu action");
                        app.needs_redraw = true;
                        tokio::task::spawn_local(screen.clone().run(action));
                    }
                    KeyOutcome::Quit => app.should_quit = true,
                    KeyOutcome::Redraw => app.needs_redraw = true,
                    KeyOutcome::Ignored => {}
                },
                Event::Mouse(mouse) => {
                    if handle_mouse(&mut app, mouse) {
                        app.needs_redraw = true;
                    }
                }
                Event::Resize(_, _) => app.needs_redraw = true,
                _ => {}
            }
        }

        {
            let mut app = state.borrow_mut();
            if app.should_quit {
                return Ok(());
            }
            if app.update_spinner(Instant::now()) {
                app.needs_redraw = true;
            }
            if app.needs_redraw {
                terminal.draw(|f| draw_ui(f, &mut app))?;
                app.needs_redraw = false;
            }
        }
        tokio::time::sleep(FRAME_INTERVAL).await;
    }
}

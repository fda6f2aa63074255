use std::sync::Arc;

use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use futures::StreamExt;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tvshell::adapters::mock::MockEngineSession;
use tvshell::config::AppConfig;
use tvshell::hint::OverlayHintModel;
use tvshell::input::{RemoteKey, RemoteKeyEvent};
use tvshell::screen::ScreenController;
use tvshell::session::{SessionEvent, SessionRepo};
use tvshell::settings::SettingsScreen;
use tvshell::surfaces::{SurfaceHost, SurfaceId, SurfaceOp, SurfaceTransaction};
use tvshell::turbo::TurboMode;
use tvshell::url_tools::DefaultUrlClassifier;

/// Surface host for the demo: prints what a platform toolkit would do.
struct LoggingSurfaceHost {
    mounted: Vec<SurfaceId>,
}

impl LoggingSurfaceHost {
    fn new() -> Self {
        Self {
            mounted: Vec::new(),
        }
    }
}

impl SurfaceHost for LoggingSurfaceHost {
    fn apply(&mut self, txn: SurfaceTransaction) {
        for op in txn.into_ordered_ops() {
            info!(?op, "surface op");
            match op {
                SurfaceOp::Add(id) => {
                    if !self.mounted.contains(&id) {
                        self.mounted.push(id);
                    }
                }
                SurfaceOp::Remove(id) => {
                    self.mounted.retain(|s| *s != id);
                }
                _ => {}
            }
        }
    }

    fn dispatch_key(&mut self, surface: SurfaceId, event: RemoteKeyEvent) -> bool {
        info!(?surface, ?event, "key routed to surface");
        false
    }

    fn is_mounted(&self, surface: SurfaceId) -> bool {
        self.mounted.contains(&surface)
    }
}

fn remote_key_for(code: KeyCode) -> Option<RemoteKey> {
    match code {
        KeyCode::Char('m') => Some(RemoteKey::Menu),
        KeyCode::Up => Some(RemoteKey::DpadUp),
        KeyCode::Down => Some(RemoteKey::DpadDown),
        KeyCode::Left => Some(RemoteKey::DpadLeft),
        KeyCode::Right => Some(RemoteKey::DpadRight),
        KeyCode::Enter => Some(RemoteKey::Center),
        KeyCode::Char(' ') => Some(RemoteKey::MediaPlayPause),
        _ => None,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match AppConfig::default_path() {
        Some(path) => AppConfig::load(&path)?,
        None => AppConfig::default(),
    };

    let engine = Arc::new(MockEngineSession::new(config.home_url.clone()));
    let turbo = TurboMode::new(config.turbo_mode_default);
    let session_repo = Arc::new(SessionRepo::new(engine.clone(), turbo));
    session_repo.update();

    let classifier = Arc::new(DefaultUrlClassifier::new(config.search_url_template.clone()));
    let controller = ScreenController::new(session_repo.clone(), classifier);

    let mut surfaces = LoggingSurfaceHost::new();
    controller.set_up_initial_surfaces(&mut surfaces);

    // Log screen changes and one-shot session events in the background.
    let mut screen_rx = controller.current_active_screen();
    tokio::spawn(async move {
        while screen_rx.changed().await.is_ok() {
            info!(screen = ?*screen_rx.borrow_and_update(), "active screen");
        }
    });
    let mut events_rx = session_repo.events();
    tokio::spawn(async move {
        while let Ok(event) = events_rx.recv().await {
            match event {
                SessionEvent::YouTubeBack => info!("YouTube in-page back requested"),
                SessionEvent::ExitYouTube => info!("YouTube exit requested"),
            }
        }
    });
    let _hint = OverlayHintModel::spawn(session_repo.state());

    info!("demo shell: m=menu esc=back g=load page y=youtube-tv s=settings q=quit");

    enable_raw_mode()?;
    let run = run_key_loop(&controller, session_repo.as_ref(), &mut surfaces).await;
    disable_raw_mode()?;
    run
}

async fn run_key_loop(
    controller: &ScreenController,
    session_repo: &SessionRepo,
    surfaces: &mut LoggingSurfaceHost,
) -> Result<()> {
    let mut events = EventStream::new();

    while let Some(event) = events.next().await {
        let Event::Key(key) = event? else { continue };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match key.code {
            KeyCode::Char('q') => break,
            KeyCode::Esc => {
                if !controller.handle_back_press(surfaces) {
                    info!("back on overlay: exiting");
                    break;
                }
                session_repo.update();
            }
            KeyCode::Char('g') => {
                controller.show_browser_for_url(surfaces, "https://example.com/");
                session_repo.update();
            }
            KeyCode::Char('y') => {
                controller.show_browser_for_url(surfaces, "https://www.youtube.com/tv");
                session_repo.update();
            }
            KeyCode::Char('s') => {
                controller.show_settings(surfaces, SettingsScreen::DataCollection);
            }
            code => {
                if let Some(remote_key) = remote_key_for(code) {
                    // A terminal press stands in for a full down/up pair.
                    controller.dispatch_key_event(surfaces, RemoteKeyEvent::down(remote_key));
                    controller.dispatch_key_event(surfaces, RemoteKeyEvent::up(remote_key));
                }
            }
        }
    }

    Ok(())
}

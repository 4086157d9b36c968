pub mod widgets;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use crate::error::GalleryError;
use crate::gallery::loader::FetchRequest;
use crate::gallery::source::PageSource;
use crate::gallery::view::GalleryView;
use crate::gallery::Page;

use widgets::GalleryWidget;

const TICK: Duration = Duration::from_millis(50);
const WHEEL_STEP: isize = 3;

type FetchResult = Result<Page, GalleryError>;

/// State for the interactive gallery.
pub struct GalleryApp {
    view: GalleryView,
    source: Arc<dyn PageSource>,
    runtime: Handle,
    results_tx: UnboundedSender<FetchResult>,
    results_rx: UnboundedReceiver<FetchResult>,
    should_quit: bool,
}

impl GalleryApp {
    pub fn new(source: Arc<dyn PageSource>, runtime: Handle) -> Self {
        let (results_tx, results_rx) = mpsc::unbounded_channel();
        Self {
            view: GalleryView::new(0),
            source,
            runtime,
            results_tx,
            results_rx,
            should_quit: false,
        }
    }

    /// Run a fetch on the runtime; the result comes back through the channel.
    fn dispatch(&self, request: Option<FetchRequest>) {
        let Some(FetchRequest { cursor }) = request else {
            return;
        };
        debug!(%cursor, "dispatching fetch");
        let source = Arc::clone(&self.source);
        let tx = self.results_tx.clone();
        self.runtime.spawn(async move {
            let result = source.fetch_page(cursor).await;
            // The receiver is gone only after the app quit.
            let _ = tx.send(result);
        });
    }

    fn drain_results(&mut self) {
        while let Ok(result) = self.results_rx.try_recv() {
            self.view.complete(result);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('j') | KeyCode::Down => self.view.scroll_by(1),
            KeyCode::Char('k') | KeyCode::Up => self.view.scroll_by(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => self.view.page(true),
            KeyCode::PageUp => self.view.page(false),
            KeyCode::Char('g') | KeyCode::Home => self.view.scroll_to_top(),
            KeyCode::Char('G') | KeyCode::End => self.view.scroll_to_bottom(),
            KeyCode::Char('r') => {
                let request = self.view.retry();
                self.dispatch(request);
            }
            _ => {}
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::ScrollDown => self.view.scroll_by(WHEEL_STEP),
                MouseEventKind::ScrollUp => self.view.scroll_by(-WHEEL_STEP),
                _ => {}
            },
            _ => {}
        }
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
        let request = self.view.start();
        self.dispatch(request);

        while !self.should_quit {
            self.drain_results();

            let size = terminal.size()?;
            let area = Rect::new(0, 0, size.width, size.height);
            self.view.resize(widgets::list_height(&self.view, area) as usize);

            let request = self.view.refresh();
            self.dispatch(request);

            terminal.draw(|frame| {
                frame.render_widget(GalleryWidget::new(&self.view), frame.area());
            })?;

            if event::poll(TICK)? {
                self.handle_event(event::read()?);
            }
        }
        Ok(())
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Restore terminal state. Safe to call more than once.
pub fn restore_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
}

/// Launch the gallery and block until the user quits.
pub fn run(mut app: GalleryApp) -> Result<()> {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        restore_terminal();
        original_hook(panic_info);
    }));

    let mut terminal = match setup_terminal() {
        Ok(terminal) => terminal,
        Err(err) => {
            restore_terminal();
            return Err(err);
        }
    };
    info!("gallery started");

    let result = app.event_loop(&mut terminal);

    restore_terminal();
    terminal.show_cursor().ok();
    info!(
        palettes = app.view.loader().records().len(),
        pages = app.view.loader().pages_loaded(),
        "gallery closed"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::gallery::source::MemorySource;
    use crate::gallery::PaletteRecord;
    use crossterm::event::{KeyEventState, KeyModifiers, MouseEvent};

    fn records(n: usize) -> Vec<PaletteRecord> {
        (0..n)
            .map(|i| PaletteRecord::new(vec![Color::new(i as u8, 10, 20), Color::new(200, 100, 0)]))
            .collect()
    }

    async fn settle(app: &mut GalleryApp) {
        let result = app.results_rx.recv().await.unwrap();
        app.view.complete(result);
    }

    fn press(app: &mut GalleryApp, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[tokio::test]
    async fn keys_scroll_and_pages_arrive_in_order() {
        let source = Arc::new(MemorySource::new(records(30), 10));
        let mut app = GalleryApp::new(source, Handle::current());
        app.view.resize(9);

        let request = app.view.start();
        app.dispatch(request);
        settle(&mut app).await;
        assert_eq!(app.view.loader().records(), &records(30)[..10]);
        assert!(app.view.refresh().is_none());

        press(&mut app, KeyCode::Char('G'));
        assert_eq!(app.view.scroll_offset(), 30 - 9);

        let request = app.view.refresh();
        assert!(request.is_some());
        app.dispatch(request);
        settle(&mut app).await;
        assert_eq!(app.view.loader().records(), &records(30)[..20]);

        press(&mut app, KeyCode::Char('g'));
        assert_eq!(app.view.scroll_offset(), 0);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }

    #[tokio::test]
    async fn mouse_wheel_scrolls_and_releases_are_ignored() {
        let source = Arc::new(MemorySource::new(records(10), 10));
        let mut app = GalleryApp::new(source, Handle::current());
        app.view.resize(6);
        let request = app.view.start();
        app.dispatch(request);
        settle(&mut app).await;

        app.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::ScrollDown,
            column: 0,
            row: 0,
            modifiers: KeyModifiers::NONE,
        }));
        assert_eq!(app.view.scroll_offset(), WHEEL_STEP as usize);

        app.handle_key(KeyEvent {
            code: KeyCode::Char('q'),
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Release,
            state: KeyEventState::NONE,
        });
        assert!(!app.should_quit);
    }
}

//! Interactive search screen
//!
//! Drives a [`SearchController`] from terminal input. Key and mouse events
//! are read on a blocking thread and forwarded over a channel; the async
//! loop multiplexes them with the controller's own timer and service events.

use super::events::{AppAction, apply_edit, map_event};
use super::state::{DropdownHitArea, DropdownState, LastLayout, MessageLevel, StatusMessage};
use super::theme::Theme;
use super::widgets::{HelpBar, KeyHint, ResultList, ScopeSelector, SearchBar, StatusBar};
use crate::search::grouping::row_of;
use crate::search::{Dropdown, NavKey, ResultItem, SearchController, SearchService};
use crate::ui::error::{Result, UiError};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Position, Rect},
};
use std::io::{self, Stdout};
use std::thread;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver};
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Prompt shown in the search bar
const PROMPT: &str = "›";

/// Width of the scope selector box
const SCOPE_WIDTH: u16 = 18;

/// How long status messages stay visible
const MESSAGE_TTL: Duration = Duration::from_secs(4);

/// How often the input thread checks whether the app is gone
const INPUT_POLL: Duration = Duration::from_millis(100);

/// Redraw interval while idle, so status messages expire
const TICK: Duration = Duration::from_millis(250);

/// Rows needed to show `content` lines inside a border
fn dropdown_height(content: usize) -> u16 {
    u16::try_from(content).unwrap_or(u16::MAX).saturating_add(2)
}

/// Search screen state around a controller
pub struct SearchApp<S> {
    controller: SearchController<S>,
    theme: Theme,
    hints: Vec<KeyHint>,
    dropdown_state: DropdownState,
    layout: LastLayout,
    message: Option<StatusMessage>,
    picks_rx: UnboundedReceiver<ResultItem>,
    picked: Vec<ResultItem>,
    should_quit: bool,
}

impl<S> SearchApp<S>
where
    S: SearchService + 'static,
{
    /// Wrap a controller; its selection consumer is replaced
    #[must_use]
    pub fn new(mut controller: SearchController<S>, theme: Theme) -> Self {
        let (picks_tx, picks_rx) = mpsc::unbounded_channel();
        controller.set_consumer(move |item: &ResultItem| {
            let _ = picks_tx.send(item.clone());
        });

        Self {
            controller,
            theme,
            hints: HelpBar::default_hints(),
            dropdown_state: DropdownState::default(),
            layout: LastLayout::default(),
            message: None,
            picks_rx,
            picked: Vec::new(),
            should_quit: false,
        }
    }

    /// The wrapped controller
    #[must_use]
    pub const fn controller(&self) -> &SearchController<S> {
        &self.controller
    }

    /// Results picked so far, oldest first
    #[must_use]
    pub fn picked(&self) -> &[ResultItem] {
        &self.picked
    }

    /// Whether the app asked to exit
    #[must_use]
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Apply one action
    pub fn handle_action(&mut self, action: AppAction) {
        match action {
            AppAction::Nav(key) => {
                let outcome = self.controller.on_key_down(key);
                // Escape with nothing to close leaves the app
                if !outcome.prevents_default() && key == NavKey::Escape {
                    self.should_quit = true;
                }
            }
            AppAction::Edit(edit) => {
                let mut query = self.controller.query().to_string();
                if apply_edit(&mut query, edit) {
                    self.controller.on_input_change(query);
                    self.dropdown_state.reset();
                }
            }
            AppAction::CycleScope => {
                let scope = self.controller.scope().next();
                self.controller.on_scope_change(scope);
                self.dropdown_state.reset();
                self.message = Some(StatusMessage::new(
                    MessageLevel::Info,
                    format!("Scope: {}", scope.label()),
                ));
            }
            AppAction::Quit => self.should_quit = true,
            AppAction::PointerDown { column, row } => {
                let pos = Position::new(column, row);
                if self.layout.is_outside(pos) {
                    self.controller.on_outside_interaction();
                } else if let Some(index) = self.target_at(pos) {
                    self.controller.select_at(index);
                }
            }
            AppAction::PointerMove { column, row } => {
                if let Some(index) = self.target_at(Position::new(column, row)) {
                    self.controller.hover(index);
                }
            }
            AppAction::None => {}
        }

        self.collect_picks();
    }

    /// Wait for the next controller event and apply it
    pub async fn process_next(&mut self) -> bool {
        let applied = self.controller.process_next().await;
        self.collect_picks();
        if let Some(err) = self.controller.take_error() {
            warn!(error = %err, "Search failed");
            self.message = Some(StatusMessage::new(MessageLevel::Error, format!("Search failed: {err}")));
        }
        applied
    }

    fn target_at(&self, pos: Position) -> Option<usize> {
        self.layout.dropdown.as_ref().and_then(|hit| hit.target_at(pos))
    }

    fn collect_picks(&mut self) {
        while let Ok(item) = self.picks_rx.try_recv() {
            self.message = Some(StatusMessage::new(
                MessageLevel::Success,
                format!("Opened {} ({})", item.title, item.kind),
            ));
            self.picked.push(item);
        }
    }

    /// Draw the screen and remember where things landed
    pub fn render(&mut self, frame: &mut Frame) {
        let area = frame.area();

        if self
            .message
            .as_ref()
            .is_some_and(|message| message.is_expired(MESSAGE_TTL))
        {
            self.message = None;
        }

        let dropdown = self.controller.dropdown();
        let wanted = if dropdown.is_visible() {
            dropdown_height(ResultList::content_height(&dropdown))
        } else {
            0
        };

        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),      // Scope + search bar
                Constraint::Length(wanted), // Dropdown
                Constraint::Min(0),         // Spacer
                Constraint::Length(1),      // Status bar
                Constraint::Length(1),      // Help bar
            ])
            .split(area);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SCOPE_WIDTH), Constraint::Min(10)])
            .split(main_layout[0]);

        frame.render_widget(ScopeSelector::new(self.controller.scope(), &self.theme), top[0]);
        let search_bar = SearchBar::new(self.controller.query(), PROMPT, &self.theme)
            .focused(true)
            .pending(self.controller.pending_deadline().is_some());
        frame.render_widget(search_bar, top[1]);

        let dropdown_area = Rect {
            x: top[1].x,
            width: top[1].width,
            ..main_layout[1]
        };
        self.layout = LastLayout {
            component: main_layout[0],
            dropdown: None,
        };

        if dropdown.is_visible() && dropdown_area.height > 0 {
            let inner_height = usize::from(dropdown_area.height.saturating_sub(2));
            let inner = Rect {
                x: dropdown_area.x + 1,
                y: dropdown_area.y + 1,
                width: dropdown_area.width.saturating_sub(2),
                height: dropdown_area.height.saturating_sub(2),
            };

            if let Dropdown::Results(rows) = &dropdown {
                let cursor_row = self.controller.cursor().and_then(|index| row_of(rows, index));
                self.dropdown_state.follow(cursor_row, inner_height);
                self.layout.dropdown =
                    Some(DropdownHitArea::new(inner, self.dropdown_state.scroll_offset, rows));
            } else {
                self.dropdown_state.reset();
            }

            let list = ResultList::new(&dropdown, &self.theme)
                .cursor(self.controller.cursor())
                .scroll_offset(self.dropdown_state.scroll_offset);
            frame.render_widget(list, dropdown_area);
            self.layout.component = main_layout[0].union(dropdown_area);
        }

        let status = StatusBar::new(self.controller.phase(), self.message.as_ref(), &self.theme);
        frame.render_widget(status, main_layout[3]);
        frame.render_widget(HelpBar::new(&self.hints, &self.theme), main_layout[4]);
    }
}

/// Setup terminal for TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

/// Cleanup terminal after TUI
fn cleanup_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), DisableMouseCapture, LeaveAlternateScreen)?;
    Ok(())
}

/// Forward terminal events until the receiver goes away
fn spawn_input_thread() -> Result<UnboundedReceiver<io::Result<Event>>> {
    let (tx, rx) = mpsc::unbounded_channel();

    thread::Builder::new()
        .name("chartsearch-input".to_string())
        .spawn(move || {
            while !tx.is_closed() {
                match event::poll(INPUT_POLL) {
                    Ok(true) => {
                        if tx.send(event::read()).is_err() {
                            break;
                        }
                    }
                    Ok(false) => {}
                    Err(e) => {
                        let _ = tx.send(Err(e));
                        break;
                    }
                }
            }
        })
        .map_err(|e| UiError::TerminalError(format!("Failed to start input thread: {e}")))?;

    Ok(rx)
}

async fn run_loop<S>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut SearchApp<S>,
) -> Result<()>
where
    S: SearchService + 'static,
{
    let mut input = spawn_input_thread()?;
    let mut tick = tokio::time::interval(TICK);
    tick.set_missed_tick_behavior(MissedTickBehavior::Skip);

    while !app.should_quit() {
        terminal.draw(|frame| app.render(frame))?;

        let outstanding = app.controller.has_outstanding_work();
        tokio::select! {
            received = input.recv() => match received {
                Some(Ok(event)) => app.handle_action(map_event(&event)),
                Some(Err(e)) => return Err(e.into()),
                None => {
                    warn!("Input thread stopped");
                    break;
                }
            },
            _ = app.process_next(), if outstanding => {}
            _ = tick.tick() => {}
        }
    }

    Ok(())
}

/// Run the search screen until the user quits
///
/// Returns every result picked during the session.
///
/// # Errors
///
/// Returns an error if the terminal cannot be set up, drawn to or read from.
pub async fn run<S>(controller: SearchController<S>, theme: Theme) -> Result<Vec<ResultItem>>
where
    S: SearchService + 'static,
{
    let mut app = SearchApp::new(controller, theme);
    let mut terminal = setup_terminal()?;
    info!("Search screen started");

    let result = run_loop(&mut terminal, &mut app).await;

    if let Err(e) = cleanup_terminal() {
        eprintln!("Warning: terminal cleanup failed: {e}");
    }

    app.controller.shutdown();
    debug!(picked = app.picked.len(), "Search screen closed");
    result.map(|()| app.picked)
}

//! Main Application
//!
//! The App runs the TUI event loop as a thin display client:
//! - converts key events into care actions on the simulator
//! - redraws when the simulator signals a refresh (coalesced), on input,
//!   and on a slow clock tick so displayed times stay fresh
//! - renders one section at a time plus a bottom keybinding bar
//!
//! All game rules live in `simulator-core`; the App never mutates pet
//! state directly.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use crossterm::event::{Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, List, ListState, Paragraph, Wrap};
use ratatui::Terminal;

use simulator_core::Simulator;

use crate::pages::{self, Page};
use crate::theme;

/// Bottom info bar content.
const INFO_BAR: &str = "Ctrl+S: Status | Ctrl+F: Feed | Ctrl+P: Play | Ctrl+L: Sleep | Ctrl+E: Events | Ctrl+H: Help | Ctrl+R: Restart | Ctrl+C: Quit";

/// The visible section of the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Section {
    /// Pet stats and identity.
    Status,
    /// Food catalog.
    Feed,
    /// Game catalog.
    Play,
    /// Sleep catalog.
    Sleep,
    /// Recent game events, newest first.
    Events,
    /// Help text.
    Help,
}

/// Buttons of the restart confirmation modal, in display order.
const MODAL_BUTTONS: [&str; 2] = ["Cancel", "Restart"];

/// Main application state.
pub struct App {
    /// The shared simulation engine.
    sim: Arc<Simulator>,
    /// Is the app still running?
    running: bool,
    /// Currently visible section.
    section: Section,
    /// List cursor for the visible section.
    list_state: ListState,
    /// Row count of the last rendered page (scroll bounds).
    item_count: usize,
    /// Actionable range of the last rendered page.
    action_range: Option<(usize, usize)>,
    /// Focused restart-modal button, when the modal is open.
    modal_focus: Option<usize>,
}

impl App {
    /// Create an App over a shared simulator, starting on the status page.
    #[must_use]
    pub fn new(sim: Arc<Simulator>) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            sim,
            running: true,
            section: Section::Status,
            list_state,
            item_count: 0,
            action_range: None,
            modal_focus: None,
        }
    }

    /// Main event loop. Returns when the user quits.
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        let mut events = EventStream::new();

        // Slow redraw so clocks and "time alive" stay current even when
        // nothing else happens between simulation ticks.
        let mut clock = tokio::time::interval(Duration::from_millis(500));
        clock.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

        // First draw happens before waiting; any refresh requested during
        // startup (e.g. offline catch-up) is held by the signal and
        // flushed on the next loop turn.
        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            let sim = Arc::clone(&self.sim);
            tokio::select! {
                maybe_event = events.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match event {
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                self.handle_key(key.code, key.modifiers);
                            }
                            Event::Resize(_, _) => {}
                            _ => {}
                        }
                    }
                }
                () = sim.refreshed() => {}
                _ = clock.tick() => {}
            }

            terminal.draw(|frame| self.render(frame))?;
        }

        Ok(())
    }

    /// Handle one key press.
    fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        if self.modal_focus.is_some() {
            self.handle_modal_key(code);
            return;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            match code {
                KeyCode::Char('c') => self.running = false,
                KeyCode::Char('s') => self.switch_to(Section::Status),
                KeyCode::Char('f') => self.switch_to(Section::Feed),
                KeyCode::Char('p') => self.switch_to(Section::Play),
                KeyCode::Char('l') => self.switch_to(Section::Sleep),
                KeyCode::Char('e') => self.switch_to(Section::Events),
                KeyCode::Char('h') => self.switch_to(Section::Help),
                KeyCode::Char('r') => self.modal_focus = Some(0),
                _ => {}
            }
            return;
        }

        match code {
            KeyCode::Up => self.move_selection(-1),
            KeyCode::Down => self.move_selection(1),
            KeyCode::Enter => self.activate_selected(),
            _ => {}
        }
    }

    /// Handle a key press while the restart modal is open.
    fn handle_modal_key(&mut self, code: KeyCode) {
        let Some(focus) = self.modal_focus else { return };
        match code {
            KeyCode::Left | KeyCode::Right | KeyCode::Tab => {
                self.modal_focus = Some((focus + 1) % MODAL_BUTTONS.len());
            }
            KeyCode::Enter => {
                self.modal_focus = None;
                if MODAL_BUTTONS[focus] == "Restart" {
                    self.sim.restart();
                    self.switch_to(Section::Status);
                }
            }
            KeyCode::Esc => self.modal_focus = None,
            _ => {}
        }
    }

    fn switch_to(&mut self, section: Section) {
        if self.section != section {
            self.section = section;
            self.list_state.select(Some(0));
        }
    }

    fn move_selection(&mut self, delta: i64) {
        if self.item_count == 0 {
            return;
        }
        let current = self.list_state.selected().unwrap_or(0) as i64;
        let next = (current + delta).clamp(0, self.item_count as i64 - 1);
        self.list_state.select(Some(next as usize));
    }

    /// Dispatch the selected row as a care action, when it maps to one.
    ///
    /// Declines (dead pet, low energy) are the simulator's call; the page
    /// itself surfaces the condition.
    fn activate_selected(&mut self) {
        let Some(selected) = self.list_state.selected() else { return };
        let Some((first, len)) = self.action_range else { return };
        if selected < first || selected >= first + len {
            return;
        }
        let index = selected - first;

        match self.section {
            Section::Feed => {
                self.sim.feed(index);
            }
            Section::Play => {
                self.sim.play(index);
            }
            Section::Sleep => {
                self.sim.sleep(index);
            }
            _ => {}
        }
    }

    /// Build the current section's page from fresh snapshots.
    fn current_page(&self) -> Page {
        let pet = self.sim.snapshot();
        let tables = self.sim.tables();
        match self.section {
            Section::Status => pages::status_page(&pet),
            Section::Feed => pages::feed_page(&pet, &tables.foods),
            Section::Play => pages::play_page(&pet, &tables.games),
            Section::Sleep => pages::sleep_page(&pet, &tables.sleeps),
            Section::Events => pages::events_page(&self.sim.events()),
            Section::Help => pages::help_page(),
        }
    }

    /// Render the full frame.
    fn render(&mut self, frame: &mut ratatui::Frame<'_>) {
        let [page_area, bar_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        let page = self.current_page();
        self.item_count = page.items.len();
        self.action_range = page.action_range;

        // Keep the cursor inside the rebuilt page.
        if let Some(selected) = self.list_state.selected() {
            if selected >= self.item_count && self.item_count > 0 {
                self.list_state.select(Some(self.item_count - 1));
            }
        }

        let list = List::new(page.items)
            .block(Block::bordered().title("Termagotchi"))
            .highlight_style(theme::SELECTED);
        frame.render_stateful_widget(list, page_area, &mut self.list_state);

        frame.render_widget(Paragraph::new(INFO_BAR).style(theme::DIM), bar_area);

        if let Some(focus) = self.modal_focus {
            self.render_restart_modal(frame, focus);
        }
    }

    /// Draw the centered restart confirmation modal over the page.
    fn render_restart_modal(&self, frame: &mut ratatui::Frame<'_>, focus: usize) {
        let area = centered_rect(frame.area(), 46, 9);
        frame.render_widget(Clear, area);

        let mut buttons: Vec<Span<'static>> = Vec::new();
        for (i, label) in MODAL_BUTTONS.iter().enumerate() {
            if i > 0 {
                buttons.push(Span::raw("    "));
            }
            let style = if i == focus {
                theme::MODAL_FOCUSED
            } else {
                theme::MODAL_BUTTON
            };
            buttons.push(Span::styled(format!("[ {label} ]"), style));
        }

        let body = vec![
            Line::raw("Are you sure you want to restart?"),
            Line::raw(""),
            Line::raw("This will reset your tamagotchi to a new egg."),
            Line::raw("All progress will be lost!"),
            Line::raw(""),
            Line::from(buttons).centered(),
        ];

        let modal = Paragraph::new(body)
            .style(theme::MODAL_TEXT)
            .wrap(Wrap { trim: false })
            .block(Block::bordered().title("Restart"));
        frame.render_widget(modal, area);
    }
}

/// A rect of at most `width` x `height`, centered in `area`.
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use simulator_core::{ActionTables, Pet};

    fn app() -> App {
        let sim = Arc::new(Simulator::new(
            Pet::hatch("Testy", Utc::now()),
            ActionTables::default(),
        ));
        App::new(sim)
    }

    #[test]
    fn test_section_switch_resets_cursor() {
        let mut app = app();
        app.item_count = 10;
        app.list_state.select(Some(7));

        app.handle_key(KeyCode::Char('f'), KeyModifiers::CONTROL);
        assert_eq!(app.section, Section::Feed);
        assert_eq!(app.list_state.selected(), Some(0));
    }

    #[test]
    fn test_selection_clamped_to_page() {
        let mut app = app();
        app.item_count = 3;

        app.handle_key(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(app.list_state.selected(), Some(0));

        for _ in 0..10 {
            app.handle_key(KeyCode::Down, KeyModifiers::NONE);
        }
        assert_eq!(app.list_state.selected(), Some(2));
    }

    #[test]
    fn test_enter_feeds_selected_food() {
        let mut app = app();
        app.switch_to(Section::Feed);
        app.item_count = 12;
        app.action_range = Some((2, 8));
        app.list_state.select(Some(2));

        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        // Apple: hunger 50 - 20.
        assert_eq!(app.sim.snapshot().hunger, 30);
        assert_eq!(app.sim.events().len(), 1);
    }

    #[test]
    fn test_enter_on_header_row_does_nothing() {
        let mut app = app();
        app.switch_to(Section::Feed);
        app.item_count = 12;
        app.action_range = Some((2, 8));
        app.list_state.select(Some(0));

        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.sim.snapshot().hunger, 50);
        assert!(app.sim.events().is_empty());
    }

    #[test]
    fn test_modal_cancel_keeps_pet() {
        let mut app = app();
        let name_before = app.sim.snapshot().name;

        app.handle_key(KeyCode::Char('r'), KeyModifiers::CONTROL);
        assert_eq!(app.modal_focus, Some(0));

        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.modal_focus, None);
        assert_eq!(app.sim.snapshot().name, name_before);
    }

    #[test]
    fn test_modal_restart_hatches_new_egg() {
        let mut app = app();
        app.sim.feed(0);

        app.handle_key(KeyCode::Char('r'), KeyModifiers::CONTROL);
        app.handle_key(KeyCode::Right, KeyModifiers::NONE);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);

        assert_eq!(app.modal_focus, None);
        assert_eq!(app.section, Section::Status);
        let pet = app.sim.snapshot();
        assert_eq!(pet.hunger, 50);
        assert!(pet.alive);
    }

    #[test]
    fn test_modal_escape_cancels() {
        let mut app = app();
        app.handle_key(KeyCode::Char('r'), KeyModifiers::CONTROL);
        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        assert_eq!(app.modal_focus, None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let mut app = app();
        app.handle_key(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(!app.running);
    }
}

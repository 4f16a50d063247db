use crate::fetcher::FetchError;
use crate::key_handlers::{browse_action, filter_input, Action, FilterInput};
use crate::models::Page;
use crate::pagination::{FetchTicket, Navigation, Paginator, ViewWindow};
use crate::reconciler::{reconcile, RenderList, Slot};
use crossterm::event::KeyEvent;
use log::{debug, info, warn};
use std::num::NonZeroUsize;

/// Everything the UI loop reacts to.
#[derive(Debug)]
pub enum Message {
    Key(KeyEvent),
    Resize(u16, u16),
    Fetched {
        ticket: FetchTicket,
        result: Result<Page, FetchError>,
    },
}

/// Work the UI loop must carry out on behalf of the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Fetch(FetchTicket),
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    Unfiltered,
    /// Keys are captured as filter text.
    Filtering,
    Applied,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Idle,
    Loading,
    Failed { attempts: u32 },
}

#[derive(Debug)]
pub struct App {
    paginator: Paginator,
    list: RenderList,
    pub status: FetchStatus,
    pub filter_state: FilterState,
    pub filter: String,
    pub selected: usize,
    pub show_help: bool,
    pub show_title: bool,
    pub show_status: bool,
    pub size: (u16, u16),
}

impl App {
    pub fn new(limit: NonZeroUsize) -> App {
        App {
            paginator: Paginator::new(limit),
            list: RenderList::new(),
            status: FetchStatus::Idle,
            filter_state: FilterState::Unfiltered,
            filter: String::new(),
            selected: 0,
            show_help: false,
            show_title: true,
            show_status: true,
            size: (0, 0),
        }
    }

    /// The fetch issued when the client starts.
    pub fn init(&mut self) -> FetchTicket {
        self.status = FetchStatus::Loading;
        self.paginator.initial()
    }

    pub fn window(&self) -> ViewWindow {
        self.paginator.window()
    }

    pub fn list(&self) -> &RenderList {
        &self.list
    }

    pub fn update(&mut self, msg: Message) -> Option<Command> {
        match msg {
            Message::Resize(width, height) => {
                self.size = (width, height);
                None
            }
            Message::Key(key) => match self.filter_state {
                FilterState::Filtering => self.handle_filter_key(key),
                FilterState::Unfiltered | FilterState::Applied => self.handle_browse_key(key),
            },
            Message::Fetched { ticket, result } => {
                self.handle_fetched(ticket, result);
                None
            }
        }
    }

    fn handle_browse_key(&mut self, key: KeyEvent) -> Option<Command> {
        let action = browse_action(key)?;
        match action {
            Action::NextPage => {
                let nav = self.paginator.advance();
                return self.navigate(nav);
            }
            Action::PrevPage => {
                let nav = self.paginator.retreat();
                return self.navigate(nav);
            }
            Action::CursorUp => self.selected = self.selected.saturating_sub(1),
            Action::CursorDown => self.move_cursor_to(self.selected + 1),
            Action::ScreenUp => self.selected = self.selected.saturating_sub(self.screen_rows()),
            Action::ScreenDown => self.move_cursor_to(self.selected + self.screen_rows()),
            Action::Top => self.selected = 0,
            Action::Bottom => self.move_cursor_to(usize::MAX),
            Action::StartFilter => {
                self.filter_state = FilterState::Filtering;
                self.selected = 0;
            }
            Action::ClearFilter => self.reset_filter(),
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::ToggleTitleBar => self.show_title = !self.show_title,
            Action::ToggleStatusBar => self.show_status = !self.show_status,
            Action::Quit => return Some(Command::Quit),
        }
        None
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> Option<Command> {
        match filter_input(key)? {
            FilterInput::Push(c) => {
                self.filter.push(c);
                self.selected = 0;
            }
            FilterInput::Pop => {
                self.filter.pop();
                self.selected = 0;
            }
            FilterInput::Apply => {
                self.filter_state = if self.filter.is_empty() {
                    FilterState::Unfiltered
                } else {
                    FilterState::Applied
                };
                self.clamp_selection();
            }
            FilterInput::Cancel => self.reset_filter(),
            FilterInput::Quit => return Some(Command::Quit),
        }
        None
    }

    fn navigate(&mut self, nav: Navigation) -> Option<Command> {
        match nav {
            Navigation::Fetch(ticket) => {
                info!(
                    "requesting logs at offset {} (limit {})",
                    ticket.window.offset, ticket.window.limit
                );
                self.status = FetchStatus::Loading;
                Some(Command::Fetch(ticket))
            }
            Navigation::NoOp => {
                debug!("already at the first page");
                None
            }
        }
    }

    fn handle_fetched(&mut self, ticket: FetchTicket, result: Result<Page, FetchError>) {
        if !self.paginator.accept(&ticket) {
            return;
        }

        let current = std::mem::take(&mut self.list);
        match result {
            Ok(page) => {
                let offset = page.offset();
                self.list = reconcile(current, Ok(page));
                self.status = FetchStatus::Idle;
                if self.filter_state == FilterState::Unfiltered {
                    self.selected = offset;
                }
                self.clamp_selection();
            }
            Err(err) => {
                warn!("fetch for offset {} failed: {}", ticket.window.offset, err);
                self.status = match err {
                    FetchError::ExhaustedRetries { attempts } => FetchStatus::Failed { attempts },
                };
                self.list = reconcile(current, Err(&err));
                self.selected = 0;
            }
        }
    }

    fn reset_filter(&mut self) {
        self.filter.clear();
        self.filter_state = FilterState::Unfiltered;
        self.clamp_selection();
    }

    /// Rows currently shown, paired with their slot index. Empty slots are
    /// hidden while a filter is active.
    pub fn visible(&self) -> Vec<(usize, &Slot)> {
        let needle = self.filter.to_lowercase();
        let filtering = self.filter_state != FilterState::Unfiltered && !needle.is_empty();

        self.list
            .slots()
            .iter()
            .enumerate()
            .filter(|(_, slot)| {
                if !filtering {
                    return true;
                }
                slot.entry()
                    .map(|e| e.filter_value().to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
            .collect()
    }

    fn move_cursor_to(&mut self, index: usize) {
        self.selected = index;
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        let count = self.visible().len();
        self.selected = self.selected.min(count.saturating_sub(1));
    }

    /// Rows that fit on one screen; each row is two lines tall.
    fn screen_rows(&self) -> usize {
        let height = self.size.1 as usize;
        (height.saturating_sub(6) / 2).max(1)
    }
}

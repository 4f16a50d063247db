// src/pagination.rs

use crate::constants::MAX_PAGE_LIMIT;
use log::debug;
use std::num::NonZeroUsize;

/// The `(offset, limit)` pair identifying which page is being requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewWindow {
    pub offset: usize,
    pub limit: NonZeroUsize,
}

impl ViewWindow {
    pub fn new(offset: usize, limit: NonZeroUsize) -> Self {
        Self { offset, limit }
    }
}

/// Parses a page size, accepting `1..=MAX_PAGE_LIMIT`.
pub fn parse_page_limit(s: &str) -> Result<NonZeroUsize, String> {
    let limit: usize = s
        .trim()
        .parse()
        .map_err(|e| format!("invalid page limit {:?}: {}", s, e))?;
    match NonZeroUsize::new(limit) {
        Some(limit) if limit.get() <= MAX_PAGE_LIMIT => Ok(limit),
        _ => Err(format!("page limit must be between 1 and {}", MAX_PAGE_LIMIT)),
    }
}

/// A dispatched fetch. Ids grow monotonically per controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    pub id: u64,
    pub window: ViewWindow,
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Fetch(FetchTicket),
    /// Retreat requested while already at offset 0.
    NoOp,
}

#[derive(Debug)]
pub struct Paginator {
    window: ViewWindow,
    next_id: u64,
    latest: Option<FetchTicket>,
}

impl Paginator {
    pub fn new(limit: NonZeroUsize) -> Self {
        Self {
            window: ViewWindow::new(0, limit),
            next_id: 0,
            latest: None,
        }
    }

    pub fn window(&self) -> ViewWindow {
        self.window
    }

    /// Ticket of the most recently dispatched fetch, if any.
    pub fn latest(&self) -> Option<FetchTicket> {
        self.latest
    }

    /// Schedules the fetch for the current window without moving it.
    pub fn initial(&mut self) -> FetchTicket {
        self.dispatch()
    }

    pub fn advance(&mut self) -> Navigation {
        self.window.offset += self.window.limit.get();
        Navigation::Fetch(self.dispatch())
    }

    pub fn retreat(&mut self) -> Navigation {
        if self.window.offset == 0 {
            return Navigation::NoOp;
        }
        self.window.offset = self.window.offset.saturating_sub(self.window.limit.get());
        Navigation::Fetch(self.dispatch())
    }

    /// Returns true when `ticket` is the latest dispatched fetch. Results of
    /// superseded fetches must not be reconciled.
    pub fn accept(&self, ticket: &FetchTicket) -> bool {
        match self.latest {
            Some(latest) if latest.id == ticket.id => true,
            _ => {
                debug!(
                    "discarding superseded fetch #{} for offset {}",
                    ticket.id, ticket.window.offset
                );
                false
            }
        }
    }

    fn dispatch(&mut self) -> FetchTicket {
        let ticket = FetchTicket {
            id: self.next_id,
            window: self.window,
        };
        self.next_id += 1;
        self.latest = Some(ticket);
        ticket
    }
}

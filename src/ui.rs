// src/ui.rs

mod footer;
mod header;
mod log_list;

use crate::app::{App, Command, FilterState, Message};
use crate::fetcher::LogFetcher;
use crate::pagination::FetchTicket;
use crate::theme::Theme;
use crossterm::{
    event::{Event as CEvent, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use log::{debug, info};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use tokio::sync::mpsc;

/// Runs the terminal client until the user quits.
pub async fn run_ui(app: App, fetcher: LogFetcher, theme: &Theme) -> anyhow::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app, fetcher, theme).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Main loop: one message at a time, in arrival order.
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    mut app: App,
    fetcher: LogFetcher,
    theme: &Theme,
) -> anyhow::Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel::<Message>();
    let mut events = EventStream::new();

    let size = terminal.size()?;
    app.update(Message::Resize(size.width, size.height));
    spawn_fetch(&fetcher, app.init(), &tx);

    loop {
        terminal.draw(|f| draw(f, &app, theme))?;

        let msg = tokio::select! {
            event = events.next() => match event {
                Some(Ok(CEvent::Key(key))) if key.kind == KeyEventKind::Press => Message::Key(key),
                Some(Ok(CEvent::Resize(width, height))) => Message::Resize(width, height),
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            Some(msg) = rx.recv() => msg,
        };

        match app.update(msg) {
            Some(Command::Fetch(ticket)) => spawn_fetch(&fetcher, ticket, &tx),
            Some(Command::Quit) => {
                info!("quitting");
                break;
            }
            None => {}
        }
    }

    Ok(())
}

/// Runs a fetch off the UI loop; its result comes back as a single message.
fn spawn_fetch(fetcher: &LogFetcher, ticket: FetchTicket, tx: &mpsc::UnboundedSender<Message>) {
    let fetcher = fetcher.clone();
    let tx = tx.clone();
    tokio::spawn(async move {
        let result = fetcher.fetch(ticket.window).await;
        if tx.send(Message::Fetched { ticket, result }).is_err() {
            debug!("ui loop gone, dropping fetch #{}", ticket.id);
        }
    });
}

/// Renders the UI components.
pub fn draw(f: &mut Frame<'_>, app: &App, theme: &Theme) {
    let area = f.area();
    let title_height = if app.show_title || app.filter_state != FilterState::Unfiltered {
        2
    } else {
        0
    };
    let status_height = if app.show_status { 2 } else { 0 };
    let footer_height = footer::footer_height(app, area.width.saturating_sub(4));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(2)
        .vertical_margin(1)
        .constraints([
            Constraint::Length(title_height),
            Constraint::Min(1),
            Constraint::Length(status_height),
            Constraint::Length(footer_height),
        ])
        .split(area);

    if title_height > 0 {
        header::draw_header(f, chunks[0], app, theme);
    }
    log_list::draw_log_list(f, chunks[1], app, theme);
    if status_height > 0 {
        footer::draw_status(f, chunks[2], app, theme);
    }
    footer::draw_footer(f, chunks[3], app, theme);
}

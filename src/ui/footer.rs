use crate::app::{App, FetchStatus};
use crate::key_handlers::{FULL_HELP, SHORT_HELP};
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

/// Window position, row count and the state of the latest fetch.
pub fn draw_status(f: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let window = app.window();
    let mut spans = vec![Span::styled(
        format!(
            "offset {} · limit {} · {} rows",
            window.offset,
            window.limit,
            app.list().populated()
        ),
        theme.status(),
    )];

    match app.status {
        FetchStatus::Idle => {}
        FetchStatus::Loading => {
            spans.push(Span::raw("  "));
            spans.push(Span::styled("loading…", theme.loading()));
        }
        FetchStatus::Failed { attempts } => {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("fetch failed after {} attempts", attempts),
                theme.error(),
            ));
        }
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Draws the key help, short or full depending on the help toggle.
pub fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let bindings = if app.show_help { FULL_HELP } else { SHORT_HELP };
    let text = bindings
        .iter()
        .map(|(key, help)| format!("{} {}", key, help))
        .collect::<Vec<_>>()
        .join(" • ");

    let footer = Paragraph::new(text)
        .style(theme.help())
        .wrap(Wrap { trim: true });

    f.render_widget(footer, area);
}

/// Lines the footer needs at `width` columns.
pub fn footer_height(app: &App, width: u16) -> u16 {
    if !app.show_help {
        return 1;
    }
    let len: usize = FULL_HELP
        .iter()
        .map(|(key, help)| key.chars().count() + help.chars().count() + 4)
        .sum();
    let width = usize::from(width.max(1));
    len.div_ceil(width).max(1) as u16
}

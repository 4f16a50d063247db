use crate::app::{App, FetchStatus};
use crate::constants::PLACEHOLDER_TEXT;
use crate::reconciler::Slot;
use crate::theme::Theme;
use crate::utils::{first_line, truncate_to_width};
use ratatui::{
    layout::{Alignment, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

/// Each row is a title line plus a description line.
const ROW_HEIGHT: usize = 2;

pub fn draw_log_list(f: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::RIGHT)
        .border_style(theme.border());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = app.visible();
    if rows.is_empty() {
        draw_empty_state(f, inner, app, theme);
        return;
    }

    let capacity = (usize::from(inner.height) / ROW_HEIGHT).max(1);
    let selected = app.selected.min(rows.len() - 1);
    let start = (selected + 1).saturating_sub(capacity);
    let width = usize::from(inner.width.saturating_sub(2));

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(start)
        .take(capacity)
        .map(|(i, (_, slot))| slot_item(slot, i == selected, width, theme))
        .collect();

    let mut state = ListState::default();
    state.select(Some(selected - start));

    let list = List::new(items).highlight_symbol("│ ");
    f.render_stateful_widget(list, inner, &mut state);
}

fn slot_item(slot: &Slot, selected: bool, width: usize, theme: &Theme) -> ListItem<'static> {
    let (title_style, desc_style) = if selected {
        (theme.selected_title(), theme.selected_description())
    } else {
        (theme.item_title(), theme.item_description())
    };

    match slot {
        Slot::Entry(entry) => ListItem::new(Text::from(vec![
            Line::from(Span::styled(
                truncate_to_width(&entry.title(), width),
                title_style,
            )),
            Line::from(Span::styled(
                truncate_to_width(first_line(entry.description()), width),
                desc_style,
            )),
        ])),
        Slot::Empty => ListItem::new(Text::from(vec![
            Line::from(Span::styled(PLACEHOLDER_TEXT, theme.placeholder())),
            Line::from(""),
        ])),
    }
}

fn draw_empty_state(f: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let (text, style) = match app.status {
        FetchStatus::Failed { attempts } => (
            format!(
                "No logs to show: fetching failed after {} attempts.\nPress n or p to try another page.",
                attempts
            ),
            theme.error(),
        ),
        FetchStatus::Loading => ("Loading logs…".to_string(), theme.loading()),
        FetchStatus::Idle if !app.filter.is_empty() => {
            ("Nothing matches the filter.".to_string(), theme.help())
        }
        FetchStatus::Idle => ("No logs yet.".to_string(), theme.help()),
    };

    let paragraph = Paragraph::new(text)
        .style(style)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, area);
}

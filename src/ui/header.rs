use crate::app::{App, FilterState};
use crate::constants::APP_TITLE;
use crate::theme::Theme;
use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Title bar, or the filter prompt while one is being typed or applied.
pub fn draw_header(f: &mut Frame<'_>, area: Rect, app: &App, theme: &Theme) {
    let line = match app.filter_state {
        FilterState::Filtering => Line::from(vec![
            Span::styled("Filter: ", theme.filter()),
            Span::styled(app.filter.as_str(), theme.item_title()),
            Span::styled("█", theme.filter()),
        ]),
        FilterState::Applied => Line::from(vec![
            Span::styled(format!(" {} ", APP_TITLE), theme.title_bar()),
            Span::raw(" "),
            Span::styled(format!("“{}”", app.filter), theme.filter()),
        ]),
        FilterState::Unfiltered => {
            Line::from(Span::styled(format!(" {} ", APP_TITLE), theme.title_bar()))
        }
    };

    f.render_widget(Paragraph::new(line), area);
}

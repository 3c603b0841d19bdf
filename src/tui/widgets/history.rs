// src/tui/widgets/history.rs — Past analyses, one card per result.

use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use super::Props;
use crate::controller::view::HistoryView;
use crate::tui::forms::Control;
use crate::tui::theme::Theme;

pub fn render(f: &mut Frame, area: Rect, props: &Props, state: &mut ListState) {
    let focused = props.focused(Control::HistoryList);
    let block = Block::default()
        .title(" Analysis history ")
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::border_focus()
        } else {
            Theme::border()
        });

    let history = &props.view.history;
    if let Some(placeholder) = history.placeholder() {
        let p = Paragraph::new(Line::from(Span::styled(placeholder, Theme::text_dim())))
            .block(block);
        f.render_widget(p, area);
        return;
    }
    if matches!(history, HistoryView::NotLoaded) {
        let p = Paragraph::new(Line::from(Span::styled("Loading...", Theme::text_dim())))
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let items: Vec<ListItem> = history
        .cards()
        .iter()
        .map(|card| {
            ListItem::new(vec![
                Line::from(Span::styled(card.job_title.clone(), Theme::header())),
                Line::from(vec![
                    Span::styled("CV: ", Theme::text_dim()),
                    Span::styled(card.cv_name.clone(), Theme::text()),
                    Span::styled("   Score: ", Theme::text_dim()),
                    Span::styled(card.score_label.clone(), Theme::info()),
                ]),
                Line::from(vec![
                    Span::styled("Date: ", Theme::text_dim()),
                    Span::styled(card.date_label.clone(), Theme::text_dim()),
                    Span::styled("   [Enter] View Result", Theme::key_hint()),
                ]),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Theme::list_selected())
        .highlight_symbol("\u{25b8} ");
    f.render_stateful_widget(list, area, state);
}

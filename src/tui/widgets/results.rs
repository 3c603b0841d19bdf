// src/tui/widgets/results.rs — Score, feedback, suggestions and improved CV.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs, Wrap},
    Frame,
};

use super::{render_button, Props};
use crate::controller::tabs::{FEEDBACK_TAB, IMPROVED_CV_TAB, RESULT_TABS, SUGGESTIONS_TAB};
use crate::controller::view::ResultsView;
use crate::tui::forms::Control;
use crate::tui::theme::Theme;

pub fn render(f: &mut Frame, area: Rect, props: &Props, scroll: u16) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(5),
            Constraint::Length(1),
        ])
        .split(area);

    let results = &props.view.results;
    render_score(f, chunks[0], results);

    let group = props.view.tabs.get(RESULT_TABS);
    let active = group.and_then(|g| g.active_tab()).unwrap_or(FEEDBACK_TAB);

    let titles: Vec<Line> = group
        .map(|g| g.tabs().to_vec())
        .unwrap_or_default()
        .into_iter()
        .map(|tab| {
            let style = if tab == active {
                Theme::nav_active()
            } else {
                Theme::nav_inactive()
            };
            Line::from(Span::styled(format!(" {} ", tab_label(&tab)), style))
        })
        .collect();
    let focused = props.focused(Control::ResultTabs);
    let tabs = Tabs::new(titles)
        .select(group.and_then(|g| g.active_index()).unwrap_or(0))
        .highlight_style(if focused {
            Theme::button_focus()
        } else {
            Theme::nav_active()
        })
        .divider(Span::styled("|", Theme::text_dim()));
    f.render_widget(tabs, chunks[1]);

    render_pane(f, chunks[2], results, active, scroll);

    render_button(
        f,
        chunks[3],
        "Download improved CV",
        props.focused(Control::DownloadButton),
        props.session.selected_result_id.is_none(),
    );
}

fn tab_label(tab: &str) -> &'static str {
    match tab {
        FEEDBACK_TAB => "Feedback",
        SUGGESTIONS_TAB => "Suggestions",
        IMPROVED_CV_TAB => "Improved CV",
        _ => "?",
    }
}

fn render_score(f: &mut Frame, area: Rect, results: &ResultsView) {
    let block = Block::default()
        .title(" Match score ")
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let score: f64 = results.score.parse().unwrap_or(0.0);
    let mut spans = vec![Span::styled(
        format!("{}%", results.score_or_dash()),
        Theme::score(score),
    )];
    if let Some(sub) = &results.subtitle {
        spans.push(Span::styled(format!("   {sub}"), Theme::text_dim()));
    }
    f.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn render_pane(f: &mut Frame, area: Rect, results: &ResultsView, active: &str, scroll: u16) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let lines: Vec<Line> = match active {
        SUGGESTIONS_TAB => results
            .suggestions
            .iter()
            .enumerate()
            .map(|(i, s)| {
                Line::from(vec![
                    Span::styled(format!("{:>2}. ", i + 1), Theme::key_hint()),
                    Span::styled(s.clone(), Theme::text()),
                ])
            })
            .collect(),
        IMPROVED_CV_TAB => results
            .improved_cv_lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Theme::text())))
            .collect(),
        _ => results
            .feedback
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Theme::text())))
            .collect(),
    };

    let p = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(p, area);
}

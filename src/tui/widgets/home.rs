// src/tui/widgets/home.rs — Landing section.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::{render_button, Props};
use crate::tui::forms::Control;
use crate::tui::theme::Theme;

pub fn render(f: &mut Frame, area: Rect, props: &Props) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(1)])
        .split(area);

    let block = Block::default()
        .title(" Welcome ")
        .borders(Borders::ALL)
        .border_style(Theme::border());

    let who = match &props.session.user {
        Some(user) => Span::styled(user.email.clone(), Theme::success()),
        None => Span::styled("not logged in", Theme::text_dim()),
    };

    let server = match props.view.server_status.as_deref() {
        Some("unreachable") => Span::styled("unreachable", Theme::error()),
        Some(status) => Span::styled(status.to_string(), Theme::success()),
        None => Span::styled("unknown", Theme::text_dim()),
    };

    let lines = vec![
        Line::from(Span::styled(
            "Match your CV against a job posting.",
            Theme::header(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "1. Upload your CV (PDF or Word).",
            Theme::text(),
        )),
        Line::from(Span::styled(
            "2. Paste the job description and run the analysis.",
            Theme::text(),
        )),
        Line::from(Span::styled(
            "3. Review the score, feedback and suggestions, then download the improved CV.",
            Theme::text(),
        )),
        Line::from(""),
        Line::from(vec![Span::styled("Account:  ", Theme::text_dim()), who]),
        Line::from(vec![Span::styled("Server:   ", Theme::text_dim()), server]),
    ];

    let p = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
    f.render_widget(p, chunks[0]);

    render_button(
        f,
        chunks[1],
        "Get Started",
        props.focused(Control::GetStarted),
        false,
    );
}

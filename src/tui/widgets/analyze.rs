// src/tui/widgets/analyze.rs — CV picker, job description and analyze button.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{render_button, render_input, Props};
use crate::tui::forms::Control;
use crate::tui::theme::Theme;

pub fn render(f: &mut Frame, area: Rect, props: &Props) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(6),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    render_cv_select(f, chunks[0], props);

    render_input(
        f,
        chunks[1],
        "Job description",
        &props.forms.job_description,
        props.focused(Control::JobDescription),
    );

    let loading = props.view.analysis_loading;
    render_button(
        f,
        chunks[2],
        "Analyze",
        props.focused(Control::AnalyzeButton),
        loading,
    );

    if loading {
        let p = Paragraph::new(Line::from(Span::styled(
            "Analyzing your CV, this can take a minute...",
            Theme::warning(),
        )));
        f.render_widget(p, chunks[3]);
    }
}

fn render_cv_select(f: &mut Frame, area: Rect, props: &Props) {
    let select = &props.view.cv_select;
    let focused = props.focused(Control::CvSelect);

    let title = format!(" Your CV ({} available) ", select.options().len());
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if focused {
            Theme::border_focus()
        } else {
            Theme::border()
        });

    let label_style = if select.selected_id().is_some() {
        Theme::text()
    } else {
        Theme::text_dim()
    };

    let line = Line::from(vec![
        Span::styled("\u{25c2} ", Theme::key_hint()),
        Span::styled(select.selected_label().to_string(), label_style),
        Span::styled(" \u{25b8}", Theme::key_hint()),
    ]);
    f.render_widget(Paragraph::new(line).block(block), area);
}

// src/tui/widgets/upload.rs — CV upload form and confirmation panel.

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
    if props.view.upload.form_visible {
        render_form(f, area, props);
    } else {
        render_confirmation(f, area, props);
    }
}

fn render_form(f: &mut Frame, area: Rect, props: &Props) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let help = Paragraph::new(Line::from(Span::styled(
        "Path to your CV file (.pdf, .docx or .doc), then press Enter.",
        Theme::text_dim(),
    )));
    f.render_widget(help, chunks[0]);

    render_input(
        f,
        chunks[1],
        "CV file",
        &props.forms.cv_path,
        props.focused(Control::CvPath),
    );

    let button = &props.view.upload.button;
    render_button(
        f,
        chunks[2],
        button.label,
        props.focused(Control::UploadButton),
        button.disabled,
    );
}

fn render_confirmation(f: &mut Frame, area: Rect, props: &Props) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let cv_line = match props.session.selected_cv_id {
        Some(id) => format!("Stored as CV #{id}."),
        None => "Stored on the server.".to_string(),
    };

    let block = Block::default()
        .title(" Upload complete ")
        .borders(Borders::ALL)
        .border_style(Theme::border_focus());
    let p = Paragraph::new(vec![
        Line::from(Span::styled("Your CV has been uploaded.", Theme::success())),
        Line::from(Span::styled(cv_line, Theme::text_dim())),
    ])
    .block(block);
    f.render_widget(p, chunks[0]);

    render_button(
        f,
        chunks[1],
        "Analyze it now",
        props.focused(Control::GoToAnalyze),
        false,
    );
    render_button(
        f,
        chunks[2],
        "Upload another",
        props.focused(Control::UploadAnother),
        false,
    );
}

// src/tui/widgets/mod.rs — One renderer per section, plus shared pieces.

pub mod account;
pub mod analyze;
pub mod history;
pub mod home;
pub mod results;
pub mod upload;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::controller::ViewModel;
use crate::infra::session::Session;
use crate::tui::forms::{Control, Forms, TextInput};
use crate::tui::theme::Theme;

/// Everything a section renderer may read.
pub struct Props<'a> {
    pub view: &'a ViewModel,
    pub session: &'a Session,
    pub forms: &'a Forms,
    pub focus: Option<Control>,
}

impl Props<'_> {
    pub fn focused(&self, control: Control) -> bool {
        self.focus == Some(control)
    }
}

pub fn render_button(f: &mut Frame, area: Rect, label: &str, focused: bool, disabled: bool) {
    let style = if disabled {
        Theme::button_disabled()
    } else if focused {
        Theme::button_focus()
    } else {
        Theme::button()
    };
    let p = Paragraph::new(Line::from(Span::styled(format!(" {label} "), style)))
        .alignment(Alignment::Center);
    f.render_widget(p, area);
}

pub fn render_input(f: &mut Frame, area: Rect, title: &str, input: &TextInput, focused: bool) {
    let border = if focused {
        Theme::border_focus()
    } else {
        Theme::border()
    };
    let block = Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(border);

    let mut text = input.display();
    if focused {
        text.push('\u{2581}');
    }
    let lines: Vec<Line> = text
        .split('\n')
        .map(|l| Line::from(Span::styled(l.to_string(), Theme::text())))
        .collect();

    // Keep the cursor line in view for long multi-line input.
    let inner_height = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(inner_height) as u16;

    let p = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(p, area);
}

/// Centered sub-rectangle taking the given percentages of `area`.
pub fn centered(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

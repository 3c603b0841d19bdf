// src/tui/widgets/account.rs — Login / register forms behind a tab switch.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::Tabs,
    Frame,
};

use super::{render_button, render_input, Props};
use crate::controller::tabs::{AUTH_TABS, REGISTER_FORM_TAB};
use crate::tui::forms::Control;
use crate::tui::theme::Theme;

pub fn render(f: &mut Frame, area: Rect, props: &Props) {
    let registering = props.view.tabs.active_tab(AUTH_TABS) == Some(REGISTER_FORM_TAB);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(area);

    let titles = vec![
        Line::from(Span::styled(" Login ", Theme::nav_inactive())),
        Line::from(Span::styled(" Register ", Theme::nav_inactive())),
    ];
    let tabs = Tabs::new(titles)
        .select(usize::from(registering))
        .highlight_style(if props.focused(Control::AuthTabs) {
            Theme::button_focus()
        } else {
            Theme::nav_active()
        })
        .divider(Span::styled("|", Theme::text_dim()));
    f.render_widget(tabs, chunks[0]);

    let forms = props.forms;
    if registering {
        render_input(
            f,
            chunks[1],
            "Email",
            &forms.register_email,
            props.focused(Control::RegisterEmail),
        );
        render_input(
            f,
            chunks[2],
            "Password",
            &forms.register_password,
            props.focused(Control::RegisterPassword),
        );
        render_input(
            f,
            chunks[3],
            "Confirm password",
            &forms.register_confirm,
            props.focused(Control::RegisterConfirm),
        );
        render_button(
            f,
            chunks[4],
            "Register",
            props.focused(Control::RegisterSubmit),
            false,
        );
    } else {
        render_input(
            f,
            chunks[1],
            "Email",
            &forms.login_email,
            props.focused(Control::LoginEmail),
        );
        render_input(
            f,
            chunks[2],
            "Password",
            &forms.login_password,
            props.focused(Control::LoginPassword),
        );
        render_button(
            f,
            chunks[4],
            "Login",
            props.focused(Control::LoginSubmit),
            false,
        );
    }
}

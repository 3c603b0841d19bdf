// src/tui/forms.rs — Form inputs and keyboard focus for the terminal UI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::controller::tabs::{AUTH_TABS, REGISTER_FORM_TAB};
use crate::controller::{Section, ViewModel};

/// A single editable text field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    value: String,
    masked: bool,
    multiline: bool,
}

impl TextInput {
    pub fn masked() -> Self {
        Self {
            masked: true,
            ..Self::default()
        }
    }

    pub fn multiline() -> Self {
        Self {
            multiline: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_multiline(&self) -> bool {
        self.multiline
    }

    /// Text as it should be drawn (passwords become bullets).
    pub fn display(&self) -> String {
        if self.masked {
            "\u{2022}".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }

    /// Apply an editing key. Returns false if the key isn't an edit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.value.push(c);
                true
            }
            KeyCode::Backspace => {
                self.value.pop();
                true
            }
            KeyCode::Enter if self.multiline => {
                self.value.push('\n');
                true
            }
            _ => false,
        }
    }
}

/// Every focusable element in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    GetStarted,
    CvPath,
    UploadButton,
    GoToAnalyze,
    UploadAnother,
    CvSelect,
    JobDescription,
    AnalyzeButton,
    ResultTabs,
    DownloadButton,
    HistoryList,
    AuthTabs,
    LoginEmail,
    LoginPassword,
    LoginSubmit,
    RegisterEmail,
    RegisterPassword,
    RegisterConfirm,
    RegisterSubmit,
}

impl Control {
    pub fn is_text(&self) -> bool {
        matches!(
            self,
            Control::CvPath
                | Control::JobDescription
                | Control::LoginEmail
                | Control::LoginPassword
                | Control::RegisterEmail
                | Control::RegisterPassword
                | Control::RegisterConfirm
        )
    }
}

/// Focus order of the visible section, given what the view currently shows.
pub fn controls(section: Section, view: &ViewModel) -> Vec<Control> {
    match section {
        Section::Home => vec![Control::GetStarted],
        Section::Upload => {
            if view.upload.form_visible {
                vec![Control::CvPath, Control::UploadButton]
            } else {
                vec![Control::GoToAnalyze, Control::UploadAnother]
            }
        }
        Section::Analyze => vec![
            Control::CvSelect,
            Control::JobDescription,
            Control::AnalyzeButton,
        ],
        Section::Results => vec![Control::ResultTabs, Control::DownloadButton],
        Section::History => vec![Control::HistoryList],
        Section::Login => {
            if view.tabs.active_tab(AUTH_TABS) == Some(REGISTER_FORM_TAB) {
                vec![
                    Control::AuthTabs,
                    Control::RegisterEmail,
                    Control::RegisterPassword,
                    Control::RegisterConfirm,
                    Control::RegisterSubmit,
                ]
            } else {
                vec![
                    Control::AuthTabs,
                    Control::LoginEmail,
                    Control::LoginPassword,
                    Control::LoginSubmit,
                ]
            }
        }
    }
}

/// Values typed into the page's forms.
#[derive(Debug, Clone)]
pub struct Forms {
    pub cv_path: TextInput,
    pub job_description: TextInput,
    pub login_email: TextInput,
    pub login_password: TextInput,
    pub register_email: TextInput,
    pub register_password: TextInput,
    pub register_confirm: TextInput,
}

impl Default for Forms {
    fn default() -> Self {
        Self {
            cv_path: TextInput::default(),
            job_description: TextInput::multiline(),
            login_email: TextInput::default(),
            login_password: TextInput::masked(),
            register_email: TextInput::default(),
            register_password: TextInput::masked(),
            register_confirm: TextInput::masked(),
        }
    }
}

impl Forms {
    pub fn input_mut(&mut self, control: Control) -> Option<&mut TextInput> {
        match control {
            Control::CvPath => Some(&mut self.cv_path),
            Control::JobDescription => Some(&mut self.job_description),
            Control::LoginEmail => Some(&mut self.login_email),
            Control::LoginPassword => Some(&mut self.login_password),
            Control::RegisterEmail => Some(&mut self.register_email),
            Control::RegisterPassword => Some(&mut self.register_password),
            Control::RegisterConfirm => Some(&mut self.register_confirm),
            _ => None,
        }
    }

    /// Passwords are not kept around after a submit.
    pub fn clear_passwords(&mut self) {
        self.login_password.clear();
        self.register_password.clear();
        self.register_confirm.clear();
    }
}

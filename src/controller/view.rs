// src/controller/view.rs — Display-ready view model.
//
// These structs are what the front ends draw. The controller is the only
// writer; widgets and the CLI printer only read them.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::api::types::{Analysis, AnalysisResult, CvSummary, HistoryEntry};
use crate::controller::tabs::TabGroups;

pub const CV_SELECT_PLACEHOLDER: &str = "-- Select your CV --";
pub const HISTORY_PLACEHOLDER: &str = "No analysis history found.";

pub const LOGIN_LABEL: &str = "Login";
pub const LOGOUT_LABEL: &str = "Logout";
pub const UPLOAD_LABEL: &str = "Upload";
pub const UPLOADING_LABEL: &str = "Uploading...";

// ── Alerts ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Error,
}

/// A blocking message the user has to acknowledge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alert {
    pub level: AlertLevel,
    pub message: String,
}

impl Alert {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: AlertLevel::Error,
            message: message.into(),
        }
    }
}

// ── CV selection list ────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvOption {
    pub id: i64,
    pub label: String,
}

/// Drop-down of the user's CVs. `None` selected means the placeholder entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CvSelect {
    options: Vec<CvOption>,
    selected: Option<usize>,
}

impl CvSelect {
    /// Replace all options, keeping `preselect` selected if it is listed.
    pub fn replace(&mut self, cvs: &[CvSummary], preselect: Option<i64>) {
        self.options = cvs
            .iter()
            .map(|cv| CvOption {
                id: cv.id,
                label: cv.file_name.clone(),
            })
            .collect();
        self.selected = preselect.and_then(|id| self.options.iter().position(|o| o.id == id));
    }

    pub fn options(&self) -> &[CvOption] {
        &self.options
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_id(&self) -> Option<i64> {
        self.selected.map(|i| self.options[i].id)
    }

    pub fn selected_label(&self) -> &str {
        self.selected
            .map(|i| self.options[i].label.as_str())
            .unwrap_or(CV_SELECT_PLACEHOLDER)
    }

    /// Select the option with this id. Returns false if it isn't listed.
    pub fn select_id(&mut self, id: i64) -> bool {
        match self.options.iter().position(|o| o.id == id) {
            Some(i) => {
                self.selected = Some(i);
                true
            }
            None => false,
        }
    }

    /// Back to the placeholder entry.
    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Move down the list: placeholder → first → ... → last → placeholder.
    pub fn select_next(&mut self) {
        self.selected = match self.selected {
            None if !self.options.is_empty() => Some(0),
            Some(i) if i + 1 < self.options.len() => Some(i + 1),
            _ => None,
        };
    }

    pub fn select_prev(&mut self) {
        self.selected = match self.selected {
            None => self.options.len().checked_sub(1),
            Some(0) => None,
            Some(i) => Some(i - 1),
        };
    }
}

// ── History ──────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryCard {
    pub result_id: i64,
    pub job_title: String,
    pub cv_name: String,
    pub score_label: String,
    pub date_label: String,
}

impl From<&HistoryEntry> for HistoryCard {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            result_id: entry.id,
            job_title: entry.job_title.clone(),
            cv_name: entry.cv_name.clone(),
            score_label: format!("{}%", format_score(entry.score)),
            date_label: format_timestamp(&entry.created_at),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HistoryView {
    #[default]
    NotLoaded,
    Empty,
    Cards(Vec<HistoryCard>),
}

impl HistoryView {
    pub fn from_entries(entries: &[HistoryEntry]) -> Self {
        if entries.is_empty() {
            HistoryView::Empty
        } else {
            HistoryView::Cards(entries.iter().map(HistoryCard::from).collect())
        }
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        match self {
            HistoryView::Empty => Some(HISTORY_PLACEHOLDER),
            _ => None,
        }
    }

    pub fn cards(&self) -> &[HistoryCard] {
        match self {
            HistoryView::Cards(cards) => cards,
            _ => &[],
        }
    }

    /// Result ids behind the "view result" buttons, in card order.
    pub fn view_actions(&self) -> Vec<i64> {
        self.cards().iter().map(|c| c.result_id).collect()
    }
}

// ── Results ──────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultsView {
    pub score: String,
    pub feedback: String,
    pub suggestions: Vec<String>,
    pub improved_cv: String,
    /// "job title / cv name" when the server told us.
    pub subtitle: Option<String>,
}

impl ResultsView {
    pub fn from_analysis(analysis: &Analysis) -> Self {
        Self {
            score: format_score(analysis.score),
            feedback: analysis.feedback.clone(),
            suggestions: analysis.suggestions.clone(),
            improved_cv: analysis.improved_cv.clone(),
            subtitle: None,
        }
    }

    pub fn from_result(result: &AnalysisResult) -> Self {
        let subtitle = match (&result.job_title, &result.cv_name) {
            (Some(job), Some(cv)) => Some(format!("{job} / {cv}")),
            (Some(job), None) => Some(job.clone()),
            (None, Some(cv)) => Some(cv.clone()),
            (None, None) => None,
        };
        Self {
            subtitle,
            ..Self::from_analysis(&result.analysis)
        }
    }

    pub fn improved_cv_lines(&self) -> impl Iterator<Item = &str> {
        self.improved_cv.lines()
    }

    /// Score text, or "-" before any result has been shown.
    pub fn score_or_dash(&self) -> &str {
        if self.score.is_empty() {
            "-"
        } else {
            &self.score
        }
    }
}

// ── Upload panel ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub label: &'static str,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadPanel {
    pub form_visible: bool,
    pub confirmation_visible: bool,
    pub button: ButtonState,
}

impl Default for UploadPanel {
    fn default() -> Self {
        Self {
            form_visible: true,
            confirmation_visible: false,
            button: ButtonState {
                label: UPLOAD_LABEL,
                disabled: false,
            },
        }
    }
}

// ── Whole page ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub login_label: &'static str,
    pub cv_select: CvSelect,
    pub history: HistoryView,
    pub results: ResultsView,
    pub upload: UploadPanel,
    pub analysis_loading: bool,
    pub tabs: TabGroups,
    pub server_status: Option<String>,
    pub job_descriptions: Vec<crate::api::types::JobDescriptionSummary>,
}

impl Default for ViewModel {
    fn default() -> Self {
        Self {
            login_label: LOGIN_LABEL,
            cv_select: CvSelect::default(),
            history: HistoryView::default(),
            results: ResultsView::default(),
            upload: UploadPanel::default(),
            analysis_loading: false,
            tabs: TabGroups::default(),
            server_status: None,
            job_descriptions: Vec::new(),
        }
    }
}

// ── Formatting ───────────────────────────────────────────────────

/// 85.0 → "85", 66.5 → "66.5".
pub fn format_score(score: f64) -> String {
    if score.fract() == 0.0 {
        format!("{}", score as i64)
    } else {
        format!("{:.1}", score)
    }
}

/// Render a server timestamp as "M/D/YYYY, h:mm:ss AM".
///
/// Accepts SQLite's "YYYY-MM-DD HH:MM:SS" (shown as-is, no zone shift) and
/// RFC 3339 (converted to local time). Anything else is returned unchanged.
pub fn format_timestamp(raw: &str) -> String {
    const DISPLAY: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw.trim(), "%Y-%m-%d %H:%M:%S") {
        return naive.format(DISPLAY).to_string();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw.trim()) {
        return dt.with_timezone(&Local).format(DISPLAY).to_string();
    }
    raw.to_string()
}

/// Title given to job descriptions submitted from the analyze form.
pub fn job_posting_title(date: NaiveDate) -> String {
    format!("Job Posting {}", date.format("%-m/%-d/%Y"))
}

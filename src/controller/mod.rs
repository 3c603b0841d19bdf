// src/controller/mod.rs — View controller.
//
// Owns the session, the visible section and the view model, and turns user
// actions into API calls. Front ends (TUI, one-shot CLI) call these methods
// and draw `view()`; they never talk to the API themselves.

pub mod section;
pub mod tabs;
pub mod view;

use std::collections::VecDeque;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::api::types::{AnalyzeRequest, Credentials, CvUpload, ExportFormat, JobDescriptionRequest};
use crate::api::CvApi;
use crate::infra::config::ExportConfig;
use crate::infra::errors::CvScanError;
use crate::infra::session::Session;

pub use section::{NavTarget, Section};
pub use view::{Alert, AlertLevel, ViewModel};

use view::{HistoryView, ResultsView, LOGIN_LABEL, LOGOUT_LABEL, UPLOADING_LABEL, UPLOAD_LABEL};

/// Settings the controller needs beyond the API handle.
#[derive(Debug, Clone)]
pub struct ControllerOptions {
    pub download_dir: PathBuf,
    pub export_format: ExportFormat,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            download_dir: crate::infra::paths::download_dir(),
            export_format: ExportFormat::Txt,
        }
    }
}

impl ControllerOptions {
    pub fn from_config(config: &ExportConfig) -> Result<Self, CvScanError> {
        Ok(Self {
            download_dir: config.download_dir(),
            export_format: config.format.parse()?,
        })
    }
}

/// An upload that passed local checks and is about to be sent.
#[derive(Debug)]
pub struct PendingUpload {
    upload: CvUpload,
}

/// An analysis that passed local checks and is about to be sent.
#[derive(Debug)]
pub struct PendingAnalysis {
    cv_id: i64,
    job_description: String,
}

pub struct Controller<A: CvApi> {
    api: A,
    options: ControllerOptions,
    session: Session,
    section: Section,
    view: ViewModel,
    alerts: VecDeque<Alert>,
}

impl<A: CvApi> Controller<A> {
    pub fn new(api: A, options: ControllerOptions) -> Self {
        Self {
            api,
            options,
            session: Session::new(),
            section: Section::Home,
            view: ViewModel::default(),
            alerts: VecDeque::new(),
        }
    }

    // ── Accessors ────────────────────────────────────────────────

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Replace the session wholesale (one-shot commands start from flags).
    pub fn set_session(&mut self, session: Session) {
        self.session = session;
    }

    pub fn view(&self) -> &ViewModel {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ViewModel {
        &mut self.view
    }

    pub fn section(&self) -> Section {
        self.section
    }

    pub fn is_visible(&self, section: Section) -> bool {
        self.section == section
    }

    /// Oldest unacknowledged alert.
    pub fn current_alert(&self) -> Option<&Alert> {
        self.alerts.front()
    }

    /// Acknowledge the oldest alert.
    pub fn dismiss_alert(&mut self) -> Option<Alert> {
        self.alerts.pop_front()
    }

    pub fn take_alerts(&mut self) -> Vec<Alert> {
        self.alerts.drain(..).collect()
    }

    fn alert(&mut self, alert: Alert) {
        self.alerts.push_back(alert);
    }

    /// Log and surface a failed operation.
    fn fail(&mut self, prefix: &str, err: CvScanError) {
        if err.is_application() {
            tracing::warn!(error = %err, "{prefix}");
        } else {
            tracing::error!(error = %err, "{prefix}");
        }
        let text = err.alert_text(prefix);
        self.alert(Alert::error(text));
    }

    // ── Navigation ───────────────────────────────────────────────

    /// Make `section` the only visible section.
    pub fn show_section(&mut self, section: Section) {
        tracing::debug!(section = section.element_id(), "Showing section");
        self.section = section;
    }

    /// Follow a navigation control. Analyze and history refresh their data
    /// before becoming visible; the login control logs out first when a user
    /// is logged in.
    pub async fn navigate(&mut self, target: NavTarget) {
        match target {
            NavTarget::Analyze | NavTarget::GoToAnalyze => {
                self.load_user_cvs().await;
            }
            NavTarget::History => {
                self.load_history().await;
            }
            NavTarget::LoginControl => {
                if self.session.is_logged_in() {
                    self.logout();
                    return;
                }
            }
            NavTarget::Home | NavTarget::Upload | NavTarget::GetStarted => {}
        }
        self.show_section(target.destination());
    }

    pub fn activate_tab(&mut self, container: &str, tab: &str) -> Result<(), CvScanError> {
        self.view.tabs.activate(container, tab)
    }

    // ── Data refresh ─────────────────────────────────────────────

    /// Refresh the CV drop-down. On failure the previous options stay.
    pub async fn load_user_cvs(&mut self) {
        let user_id = self.session.user_id();
        match self.api.list_cvs(user_id).await {
            Ok(cvs) => {
                tracing::debug!(user_id, count = cvs.len(), "Loaded CVs");
                let preselect = self
                    .view
                    .cv_select
                    .selected_id()
                    .or(self.session.selected_cv_id);
                self.view.cv_select.replace(&cvs, preselect);
            }
            Err(e) => self.fail("Failed to load CVs", e),
        }
    }

    /// Refresh the history cards. On failure the previous cards stay.
    pub async fn load_history(&mut self) {
        let user_id = self.session.user_id();
        match self.api.analysis_history(user_id).await {
            Ok(entries) => {
                tracing::debug!(user_id, count = entries.len(), "Loaded analysis history");
                self.view.history = HistoryView::from_entries(&entries);
            }
            Err(e) => self.fail("Failed to load history", e),
        }
    }

    pub async fn load_job_descriptions(&mut self) {
        let user_id = self.session.user_id();
        match self.api.list_job_descriptions(user_id).await {
            Ok(list) => self.view.job_descriptions = list,
            Err(e) => self.fail("Failed to load job descriptions", e),
        }
    }

    /// Fetch one stored result into the results view. Returns true on success.
    pub async fn load_analysis_result(&mut self, result_id: i64) -> bool {
        match self.api.analysis_result(result_id).await {
            Ok(result) => {
                self.session = self.session.with_result(result.id);
                self.view.results = ResultsView::from_result(&result);
                true
            }
            Err(e) => {
                self.fail("Failed to load result", e);
                false
            }
        }
    }

    /// "View result" on a history card.
    pub async fn view_result(&mut self, result_id: i64) {
        if self.load_analysis_result(result_id).await {
            self.show_section(Section::Results);
        }
    }

    pub async fn check_health(&mut self) {
        match self.api.health().await {
            Ok(health) => {
                let status = match health.version {
                    Some(v) => format!("{} (v{})", health.status, v),
                    None => health.status,
                };
                self.view.server_status = Some(status);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Health check failed");
                self.view.server_status = Some("unreachable".into());
            }
        }
    }

    // ── Upload ───────────────────────────────────────────────────

    /// Validate and read the file, then mark the upload as in flight.
    ///
    /// Returns `None` (after alerting) when there is nothing to send.
    pub async fn prepare_upload(&mut self, path: Option<&Path>) -> Option<PendingUpload> {
        let path = match path {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => {
                self.alert(Alert::error("Please select a file to upload"));
                return None;
            }
        };

        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                self.fail("Upload failed", CvScanError::Io(e));
                return None;
            }
        };

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "cv".into());

        self.view.upload.button.label = UPLOADING_LABEL;
        self.view.upload.button.disabled = true;

        Some(PendingUpload {
            upload: CvUpload {
                file_name,
                bytes,
                user_id: self.session.user_id(),
            },
        })
    }

    pub async fn send_upload(&mut self, pending: PendingUpload) {
        let result = self.api.upload_cv(pending.upload).await;

        self.view.upload.button.label = UPLOAD_LABEL;
        self.view.upload.button.disabled = false;

        match result {
            Ok(cv_id) => {
                match cv_id {
                    Some(id) => {
                        // The next refresh preselects the new CV, not an older pick.
                        self.session = self.session.with_cv(id);
                        self.view.cv_select.clear_selection();
                    }
                    None => tracing::warn!("Upload succeeded without a cv_id"),
                }
                self.view.upload.form_visible = false;
                self.view.upload.confirmation_visible = true;
                self.alert(Alert::info("CV uploaded successfully"));
            }
            Err(e) => self.fail("Upload failed", e),
        }
    }

    pub async fn upload_cv(&mut self, path: Option<&Path>) {
        if let Some(pending) = self.prepare_upload(path).await {
            self.send_upload(pending).await;
        }
    }

    /// Show the upload form again after a successful upload.
    pub fn reset_upload_form(&mut self) {
        self.view.upload.form_visible = true;
        self.view.upload.confirmation_visible = false;
    }

    // ── Analyze ──────────────────────────────────────────────────

    /// Check the selection and job text, then switch the loading indicator on.
    pub fn prepare_analysis(
        &mut self,
        cv_id: Option<i64>,
        job_description: &str,
    ) -> Option<PendingAnalysis> {
        let Some(cv_id) = cv_id else {
            self.alert(Alert::error("Please select a CV"));
            return None;
        };
        if job_description.trim().is_empty() {
            self.alert(Alert::error("Please enter a job description"));
            return None;
        }

        self.view.analysis_loading = true;
        Some(PendingAnalysis {
            cv_id,
            job_description: job_description.to_string(),
        })
    }

    /// Save the job description, then analyze the CV against it.
    pub async fn run_analysis(&mut self, pending: PendingAnalysis) {
        let user_id = self.session.user_id();
        let request = JobDescriptionRequest {
            title: view::job_posting_title(Local::now().date_naive()),
            content: pending.job_description,
            user_id,
        };

        let job_description_id = match self.api.save_job_description(request).await {
            Ok(id) => id,
            Err(e) => {
                self.view.analysis_loading = false;
                self.fail("Failed to save job description", e);
                return;
            }
        };

        let outcome = self
            .api
            .analyze(AnalyzeRequest {
                cv_id: pending.cv_id,
                job_description_id,
                user_id,
            })
            .await;

        self.view.analysis_loading = false;

        match outcome {
            Ok(outcome) => {
                tracing::info!(
                    result_id = outcome.result_id,
                    score = outcome.analysis.score,
                    "Analysis complete"
                );
                self.session = self.session.with_result(outcome.result_id);
                self.view.results = ResultsView::from_analysis(&outcome.analysis);
                self.show_section(Section::Results);
            }
            Err(e) => self.fail("Analysis failed", e),
        }
    }

    /// Analyze with an explicit CV id.
    pub async fn analyze_with(&mut self, cv_id: Option<i64>, job_description: &str) {
        if let Some(pending) = self.prepare_analysis(cv_id, job_description) {
            self.run_analysis(pending).await;
        }
    }

    /// Analyze the CV currently chosen in the drop-down.
    pub async fn analyze(&mut self, job_description: &str) {
        let cv_id = self.view.cv_select.selected_id();
        self.analyze_with(cv_id, job_description).await;
    }

    // ── Export ───────────────────────────────────────────────────

    /// Download the improved CV of the current result into the download dir.
    pub async fn download_improved_cv(&mut self) -> Option<PathBuf> {
        let Some(result_id) = self.session.selected_result_id else {
            self.alert(Alert::error("No analysis result available"));
            return None;
        };

        let format = self.options.export_format;
        match self.export_to(result_id, format).await {
            Ok(path) => {
                tracing::info!(result_id, path = %path.display(), "Improved CV saved");
                self.alert(Alert::info(format!("Improved CV saved to {}", path.display())));
                Some(path)
            }
            Err(e) => {
                self.fail("Download failed", e);
                None
            }
        }
    }

    async fn export_to(&self, result_id: i64, format: ExportFormat) -> Result<PathBuf, CvScanError> {
        let url = self.api.export_url(result_id, format)?;
        tracing::debug!(%url, "Exporting CV");
        let file = self.api.export_cv(result_id, format).await?;

        let name = file
            .file_name
            .as_deref()
            .and_then(|n| Path::new(n).file_name())
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| format!("improved_cv_{result_id}.{}", format.as_str()));

        tokio::fs::create_dir_all(&self.options.download_dir).await?;
        let path = self.options.download_dir.join(name);
        tokio::fs::write(&path, &file.bytes).await?;
        Ok(path)
    }

    // ── Account ──────────────────────────────────────────────────

    pub async fn login(&mut self, email: &str, password: &str) {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        match self.api.login(credentials).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, email = %user.email, "Logged in");
                self.session = self.session.with_user(user);
                self.view.login_label = LOGOUT_LABEL;
                self.show_section(Section::Home);
            }
            Err(e) => self.fail("Login failed", e),
        }
    }

    /// Register, then log in as the new user. Mismatched passwords never
    /// reach the server.
    pub async fn register(&mut self, email: &str, password: &str, confirm: &str) {
        if password != confirm {
            self.alert(Alert::error("Passwords do not match"));
            return;
        }

        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };
        match self.api.register(credentials).await {
            Ok(user) => {
                tracing::info!(user_id = user.id, email = %user.email, "Registered");
                self.session = self.session.with_user(user);
                self.view.login_label = LOGOUT_LABEL;
                self.show_section(Section::Home);
            }
            Err(e) => self.fail("Registration failed", e),
        }
    }

    pub fn logout(&mut self) {
        if let Some(user) = &self.session.user {
            tracing::info!(user_id = user.id, "Logged out");
        }
        self.session = self.session.without_user();
        self.view.login_label = LOGIN_LABEL;
        self.show_section(Section::Login);
    }
}

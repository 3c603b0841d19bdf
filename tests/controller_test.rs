// tests/controller_test.rs — Controller flows against a recording fake API

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use pretty_assertions::assert_eq;

use cvscan::api::types::*;
use cvscan::api::CvApi;
use cvscan::controller::tabs::{RESULT_TABS, SUGGESTIONS_TAB};
use cvscan::controller::view::{HistoryView, UPLOAD_LABEL};
use cvscan::controller::{Alert, Controller, ControllerOptions, NavTarget, Section};
use cvscan::infra::errors::CvScanError;
use cvscan::infra::session::User;

// ---------- Recording fake ----------

/// Records every call and answers from canned data. Setting `fail` makes
/// every call return that error message as a server-reported failure.
#[derive(Default)]
struct RecordingApi {
    calls: Mutex<Vec<String>>,
    cvs: Mutex<Vec<CvSummary>>,
    history: Mutex<Vec<HistoryEntry>>,
    upload_cv_id: Mutex<Option<i64>>,
    analysis: Mutex<Analysis>,
    fail: Mutex<Option<String>>,
    garbled: Mutex<bool>,
}

impl RecordingApi {
    fn record(&self, call: String) -> Result<(), CvScanError> {
        self.calls.lock().unwrap().push(call);
        if *self.garbled.lock().unwrap() {
            return Err(CvScanError::InvalidResponse {
                endpoint: "/fake".into(),
                message: "expected value at line 1 column 1".into(),
            });
        }
        match self.fail.lock().unwrap().clone() {
            Some(msg) => Err(CvScanError::api(Some(msg))),
            None => Ok(()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn fail_with(&self, msg: &str) {
        *self.fail.lock().unwrap() = Some(msg.to_string());
    }

    fn recover(&self) {
        *self.fail.lock().unwrap() = None;
    }
}

#[async_trait]
impl CvApi for RecordingApi {
    async fn list_cvs(&self, user_id: i64) -> Result<Vec<CvSummary>, CvScanError> {
        self.record(format!("list_cvs user={user_id}"))?;
        Ok(self.cvs.lock().unwrap().clone())
    }

    async fn list_job_descriptions(
        &self,
        user_id: i64,
    ) -> Result<Vec<JobDescriptionSummary>, CvScanError> {
        self.record(format!("list_job_descriptions user={user_id}"))?;
        Ok(vec![])
    }

    async fn analysis_history(&self, user_id: i64) -> Result<Vec<HistoryEntry>, CvScanError> {
        self.record(format!("history user={user_id}"))?;
        Ok(self.history.lock().unwrap().clone())
    }

    async fn analysis_result(&self, result_id: i64) -> Result<AnalysisResult, CvScanError> {
        self.record(format!("result id={result_id}"))?;
        Ok(AnalysisResult {
            id: result_id,
            analysis: self.analysis.lock().unwrap().clone(),
            cv_name: Some("cv.pdf".into()),
            job_title: Some("Job Posting 1/2/2026".into()),
            created_at: None,
        })
    }

    async fn upload_cv(&self, upload: CvUpload) -> Result<Option<i64>, CvScanError> {
        self.record(format!(
            "upload file={} bytes={} user={}",
            upload.file_name,
            upload.bytes.len(),
            upload.user_id
        ))?;
        Ok(*self.upload_cv_id.lock().unwrap())
    }

    async fn save_job_description(
        &self,
        request: JobDescriptionRequest,
    ) -> Result<i64, CvScanError> {
        self.record(format!("save_jd user={}", request.user_id))?;
        Ok(7)
    }

    async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalysisOutcome, CvScanError> {
        self.record(format!(
            "analyze cv={} jd={} user={}",
            request.cv_id, request.job_description_id, request.user_id
        ))?;
        Ok(AnalysisOutcome {
            result_id: 99,
            analysis: self.analysis.lock().unwrap().clone(),
        })
    }

    fn export_url(&self, result_id: i64, format: ExportFormat) -> Result<String, CvScanError> {
        Ok(format!(
            "http://fake/api/export-cv/{result_id}?format={}",
            format.as_str()
        ))
    }

    async fn export_cv(
        &self,
        result_id: i64,
        format: ExportFormat,
    ) -> Result<ExportedFile, CvScanError> {
        self.record(format!("export id={result_id} format={}", format.as_str()))?;
        Ok(ExportedFile {
            file_name: None,
            bytes: b"IMPROVED CV".to_vec(),
        })
    }

    async fn login(&self, credentials: Credentials) -> Result<User, CvScanError> {
        self.record(format!("login {}", credentials.email))?;
        Ok(User {
            id: 5,
            email: credentials.email,
        })
    }

    async fn register(&self, credentials: Credentials) -> Result<User, CvScanError> {
        self.record(format!("register {}", credentials.email))?;
        Ok(User {
            id: 6,
            email: credentials.email,
        })
    }

    async fn health(&self) -> Result<Health, CvScanError> {
        self.record("health".into())?;
        Ok(Health {
            status: "ok".into(),
            version: Some("1.0".into()),
        })
    }
}

// ---------- Helpers ----------

fn controller(api: RecordingApi) -> Controller<RecordingApi> {
    Controller::new(
        api,
        ControllerOptions {
            download_dir: std::env::temp_dir(),
            export_format: ExportFormat::Txt,
        },
    )
}

fn cv(id: i64, name: &str) -> CvSummary {
    CvSummary {
        id,
        file_name: name.into(),
        created_at: None,
    }
}

fn sample_analysis() -> Analysis {
    Analysis {
        score: 85.0,
        feedback: "Solid backend experience.".into(),
        suggestions: vec!["Add metrics".into(), "Mention Kubernetes".into()],
        improved_cv: "Jane Doe\nSenior Engineer".into(),
    }
}

fn cv_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".pdf")
        .tempfile()
        .unwrap();
    file.write_all(b"%PDF-1.4 fake").unwrap();
    file
}

fn visible_count(c: &Controller<RecordingApi>) -> usize {
    Section::ALL.iter().filter(|s| c.is_visible(**s)).count()
}

// ---------- Navigation ----------

#[tokio::test]
async fn test_exactly_one_section_visible() {
    let mut c = controller(RecordingApi::default());
    assert_eq!(visible_count(&c), 1);

    let targets = [
        NavTarget::Upload,
        NavTarget::Analyze,
        NavTarget::History,
        NavTarget::GetStarted,
        NavTarget::GoToAnalyze,
        NavTarget::LoginControl,
        NavTarget::Home,
    ];
    for target in targets {
        c.navigate(target).await;
        assert_eq!(visible_count(&c), 1, "after {target:?}");
        assert!(c.is_visible(target.destination()));
    }
}

#[tokio::test]
async fn test_analyze_and_history_refresh_on_navigate() {
    let mut c = controller(RecordingApi::default());
    c.navigate(NavTarget::Upload).await;
    assert!(c.api().calls().is_empty());

    c.navigate(NavTarget::Analyze).await;
    c.navigate(NavTarget::History).await;
    c.navigate(NavTarget::GoToAnalyze).await;

    assert_eq!(
        c.api().calls(),
        vec!["list_cvs user=0", "history user=0", "list_cvs user=0"]
    );
}

// ---------- Upload → analyze ----------

#[tokio::test]
async fn test_uploaded_cv_is_preselected_and_analyzed() {
    let api = RecordingApi::default();
    *api.upload_cv_id.lock().unwrap() = Some(42);
    *api.cvs.lock().unwrap() = vec![cv(41, "old.pdf"), cv(42, "new.pdf")];
    *api.analysis.lock().unwrap() = sample_analysis();

    let mut c = controller(api);
    c.navigate(NavTarget::Upload).await;

    let file = cv_file();
    c.upload_cv(Some(file.path())).await;

    assert_eq!(c.session().selected_cv_id, Some(42));
    assert!(!c.view().upload.form_visible);
    assert!(c.view().upload.confirmation_visible);
    assert_eq!(c.take_alerts(), vec![Alert::info("CV uploaded successfully")]);

    c.navigate(NavTarget::GoToAnalyze).await;
    assert_eq!(c.view().cv_select.selected_id(), Some(42));
    assert_eq!(c.view().cv_select.selected_label(), "new.pdf");

    c.analyze("Rust engineer, 5 years").await;

    let calls = c.api().calls();
    assert!(calls.contains(&"save_jd user=0".to_string()));
    assert_eq!(calls.last().unwrap(), "analyze cv=42 jd=7 user=0");
    assert!(c.is_visible(Section::Results));
    assert_eq!(c.session().selected_result_id, Some(99));
}

#[tokio::test]
async fn test_new_upload_replaces_earlier_cv_choice() {
    let api = RecordingApi::default();
    *api.upload_cv_id.lock().unwrap() = Some(42);
    *api.cvs.lock().unwrap() = vec![cv(41, "old.pdf"), cv(42, "new.pdf")];
    *api.analysis.lock().unwrap() = sample_analysis();

    let mut c = controller(api);
    c.navigate(NavTarget::Analyze).await;
    assert!(c.view_mut().cv_select.select_id(41));

    c.navigate(NavTarget::Upload).await;
    let file = cv_file();
    c.upload_cv(Some(file.path())).await;
    c.navigate(NavTarget::GoToAnalyze).await;
    assert_eq!(c.view().cv_select.selected_id(), Some(42));

    // A later manual pick survives the next refresh.
    assert!(c.view_mut().cv_select.select_id(41));
    c.navigate(NavTarget::Analyze).await;
    assert_eq!(c.view().cv_select.selected_id(), Some(41));

    assert!(c.view_mut().cv_select.select_id(42));
    c.analyze("Rust engineer, 5 years").await;
    assert_eq!(c.api().calls().last().unwrap(), "analyze cv=42 jd=7 user=0");
}

#[tokio::test]
async fn test_upload_without_cv_id_still_confirms() {
    let mut c = controller(RecordingApi::default());
    let file = cv_file();
    c.upload_cv(Some(file.path())).await;

    assert!(c.session().selected_cv_id.is_none());
    assert!(c.view().upload.confirmation_visible);
    assert_eq!(c.take_alerts(), vec![Alert::info("CV uploaded successfully")]);
}

#[tokio::test]
async fn test_upload_without_file_sends_nothing() {
    let mut c = controller(RecordingApi::default());
    c.upload_cv(None).await;

    assert!(c.api().calls().is_empty());
    assert_eq!(
        c.take_alerts(),
        vec![Alert::error("Please select a file to upload")]
    );
}

#[tokio::test]
async fn test_upload_button_restored_after_failure() {
    let api = RecordingApi::default();
    api.fail_with("Invalid file type");
    let mut c = controller(api);

    let file = cv_file();
    let pending = c.prepare_upload(Some(file.path())).await.unwrap();
    assert_eq!(c.view().upload.button.label, "Uploading...");
    assert!(c.view().upload.button.disabled);

    c.send_upload(pending).await;

    assert_eq!(c.view().upload.button.label, UPLOAD_LABEL);
    assert!(!c.view().upload.button.disabled);
    assert!(c.view().upload.form_visible);
    assert_eq!(
        c.take_alerts(),
        vec![Alert::error("Upload failed: Invalid file type")]
    );
}

// ---------- Analysis ----------

#[tokio::test]
async fn test_suggestions_rendered_in_order() {
    let api = RecordingApi::default();
    *api.analysis.lock().unwrap() = sample_analysis();
    let mut c = controller(api);

    c.analyze_with(Some(1), "job text").await;

    assert_eq!(
        c.view().results.suggestions,
        vec!["Add metrics".to_string(), "Mention Kubernetes".to_string()]
    );
    assert_eq!(c.view().results.score, "85");

    c.activate_tab(RESULT_TABS, SUGGESTIONS_TAB).unwrap();
    assert_eq!(
        c.view().tabs.active_tab(RESULT_TABS),
        Some(SUGGESTIONS_TAB)
    );
}

#[tokio::test]
async fn test_loading_hidden_after_analysis_failure() {
    let api = RecordingApi::default();
    api.fail_with("CV not found");
    let mut c = controller(api);
    c.navigate(NavTarget::Upload).await;

    let pending = c.prepare_analysis(Some(3), "job").unwrap();
    assert!(c.view().analysis_loading);
    c.run_analysis(pending).await;

    assert!(!c.view().analysis_loading);
    assert!(c.is_visible(Section::Upload));
    assert_eq!(
        c.take_alerts(),
        vec![Alert::error("Failed to save job description: CV not found")]
    );
}

// ---------- History ----------

#[tokio::test]
async fn test_empty_history_shows_placeholder() {
    let mut c = controller(RecordingApi::default());
    c.navigate(NavTarget::History).await;

    assert_eq!(c.view().history, HistoryView::Empty);
    assert_eq!(
        c.view().history.placeholder(),
        Some("No analysis history found.")
    );
    assert!(c.view().history.view_actions().is_empty());
}

#[tokio::test]
async fn test_history_card_opens_result() {
    let api = RecordingApi::default();
    *api.history.lock().unwrap() = vec![HistoryEntry {
        id: 12,
        job_title: "Platform engineer".into(),
        cv_name: "cv.pdf".into(),
        score: 70.0,
        created_at: "2026-01-02 09:30:00".into(),
    }];
    *api.analysis.lock().unwrap() = sample_analysis();
    let mut c = controller(api);

    c.navigate(NavTarget::History).await;
    let cards = c.view().history.cards().to_vec();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].score_label, "70%");

    c.view_result(cards[0].result_id).await;
    assert!(c.is_visible(Section::Results));
    assert_eq!(c.session().selected_result_id, Some(12));
    assert_eq!(
        c.view().results.subtitle.as_deref(),
        Some("Job Posting 1/2/2026 / cv.pdf")
    );
}

// ---------- Errors ----------

#[tokio::test]
async fn test_server_error_message_surfaced_verbatim() {
    let api = RecordingApi::default();
    api.fail_with("Email already registered");
    let mut c = controller(api);

    c.register("a@b.c", "pw", "pw").await;
    assert_eq!(
        c.take_alerts(),
        vec![Alert::error("Registration failed: Email already registered")]
    );
    assert!(c.session().user.is_none());
}

#[tokio::test]
async fn test_transport_failure_uses_generic_alert() {
    let api = RecordingApi::default();
    *api.cvs.lock().unwrap() = vec![cv(1, "a.pdf")];
    let mut c = controller(api);
    c.load_user_cvs().await;

    *c.api().garbled.lock().unwrap() = true;
    c.load_user_cvs().await;

    assert_eq!(c.view().cv_select.options().len(), 1);
    assert_eq!(
        c.take_alerts(),
        vec![Alert::error("Failed to load CVs. Please try again later.")]
    );
}

// ---------- Session ----------

#[tokio::test]
async fn test_requests_use_user_zero_until_login() {
    let mut c = controller(RecordingApi::default());
    c.load_history().await;
    c.login("ana@example.com", "pw").await;
    c.load_history().await;
    c.navigate(NavTarget::LoginControl).await;
    c.load_history().await;

    assert_eq!(
        c.api().calls(),
        vec![
            "history user=0",
            "login ana@example.com",
            "history user=5",
            "history user=0",
        ]
    );
}

#[tokio::test]
async fn test_login_failure_then_success() {
    let api = RecordingApi::default();
    api.fail_with("Invalid credentials");
    let mut c = controller(api);

    c.navigate(NavTarget::LoginControl).await;
    c.login("x@y.z", "bad").await;
    assert!(c.is_visible(Section::Login));
    assert_eq!(
        c.take_alerts(),
        vec![Alert::error("Login failed: Invalid credentials")]
    );

    c.api().recover();
    c.login("x@y.z", "good").await;
    assert!(c.is_visible(Section::Home));
    assert_eq!(c.view().login_label, "Logout");
}

// ---------- Download ----------

#[tokio::test]
async fn test_download_writes_into_download_dir() {
    let dir = tempfile::tempdir().unwrap();
    let api = RecordingApi::default();
    *api.analysis.lock().unwrap() = sample_analysis();
    let mut c = Controller::new(
        api,
        ControllerOptions {
            download_dir: dir.path().join("downloads"),
            export_format: ExportFormat::Txt,
        },
    );

    c.analyze_with(Some(1), "job").await;
    let path = c.download_improved_cv().await.unwrap();

    assert_eq!(path, dir.path().join("downloads").join("improved_cv_99.txt"));
    assert_eq!(std::fs::read(&path).unwrap(), b"IMPROVED CV");
    assert_eq!(
        c.api().calls().last().unwrap(),
        "export id=99 format=txt"
    );
    assert_eq!(
        c.take_alerts(),
        vec![Alert::info(format!("Improved CV saved to {}", path.display()))]
    );
}

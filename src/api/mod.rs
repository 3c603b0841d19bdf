// src/api/mod.rs — Client side of the CV analysis HTTP API

pub mod http;
pub mod types;

use async_trait::async_trait;

use crate::infra::errors::CvScanError;
use crate::infra::session::User;
pub use http::HttpCvApi;
pub use types::*;

/// Every remote operation the controller can issue.
///
/// One request per call: no retries, no cancellation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CvApi: Send + Sync {
    async fn list_cvs(&self, user_id: i64) -> Result<Vec<CvSummary>, CvScanError>;

    async fn list_job_descriptions(
        &self,
        user_id: i64,
    ) -> Result<Vec<JobDescriptionSummary>, CvScanError>;

    async fn analysis_history(&self, user_id: i64) -> Result<Vec<HistoryEntry>, CvScanError>;

    async fn analysis_result(&self, result_id: i64) -> Result<AnalysisResult, CvScanError>;

    /// Returns the new CV id when the server reports one.
    async fn upload_cv(&self, upload: CvUpload) -> Result<Option<i64>, CvScanError>;

    async fn save_job_description(
        &self,
        request: JobDescriptionRequest,
    ) -> Result<i64, CvScanError>;

    async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalysisOutcome, CvScanError>;

    /// Location the export is served from.
    fn export_url(&self, result_id: i64, format: ExportFormat) -> Result<String, CvScanError>;

    async fn export_cv(
        &self,
        result_id: i64,
        format: ExportFormat,
    ) -> Result<ExportedFile, CvScanError>;

    async fn login(&self, credentials: Credentials) -> Result<User, CvScanError>;

    async fn register(&self, credentials: Credentials) -> Result<User, CvScanError>;

    async fn health(&self) -> Result<Health, CvScanError>;
}

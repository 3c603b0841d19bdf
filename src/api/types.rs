// src/api/types.rs — Request / response shapes for the CV analysis API.
//
// Every JSON reply carries `success` and an optional `error`. The server
// answers failures as a bare `{"error": "..."}` with no `success` field, so
// a missing flag is read as failure.

use serde::{Deserialize, Deserializer, Serialize};

use crate::infra::errors::CvScanError;

// ── Envelope ─────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(flatten)]
    pub body: T,
}

impl<T> Envelope<T> {
    /// Split the envelope into the payload or an application error.
    pub fn into_result(self) -> Result<T, CvScanError> {
        if self.success {
            Ok(self.body)
        } else {
            Err(CvScanError::api(self.error))
        }
    }
}

// ── Requests ─────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobDescriptionRequest {
    pub title: String,
    pub content: String,
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzeRequest {
    pub cv_id: i64,
    pub job_description_id: i64,
    pub user_id: i64,
}

/// A CV file to send as multipart form data.
#[derive(Debug, Clone, PartialEq)]
pub struct CvUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub user_id: i64,
}

impl CvUpload {
    /// MIME type guessed from the file extension.
    pub fn mime_type(&self) -> &'static str {
        let ext = self
            .file_name
            .rsplit_once('.')
            .map(|(_, e)| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "pdf" => "application/pdf",
            "docx" => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            "doc" => "application/msword",
            "txt" => "text/plain",
            _ => "application/octet-stream",
        }
    }
}

/// Export formats understood by `/export-cv`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Txt,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Txt => "txt",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = CvScanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "txt" | "text" => Ok(ExportFormat::Txt),
            other => Err(CvScanError::Config(format!(
                "Export format '{other}' not supported. Options: txt"
            ))),
        }
    }
}

// ── Response bodies ──────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CvSummary {
    pub id: i64,
    pub file_name: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CvList {
    #[serde(default)]
    pub cvs: Vec<CvSummary>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct JobDescriptionSummary {
    pub id: i64,
    #[serde(default, deserialize_with = "de_or_default")]
    pub title: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JobDescriptionList {
    #[serde(default)]
    pub job_descriptions: Vec<JobDescriptionSummary>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct HistoryEntry {
    pub id: i64,
    #[serde(default, deserialize_with = "de_or_default")]
    pub job_title: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub cv_name: String,
    #[serde(default, deserialize_with = "de_score")]
    pub score: f64,
    #[serde(default, deserialize_with = "de_or_default")]
    pub created_at: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct HistoryList {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// The scored comparison of one CV against one job description.
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct Analysis {
    #[serde(default, deserialize_with = "de_score")]
    pub score: f64,
    #[serde(default, deserialize_with = "de_or_default")]
    pub feedback: String,
    #[serde(default, deserialize_with = "de_or_default")]
    pub suggestions: Vec<String>,
    #[serde(default, deserialize_with = "de_or_default")]
    pub improved_cv: String,
}

/// A stored analysis, as returned by `/analysis-result/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AnalysisResult {
    pub id: i64,
    #[serde(flatten)]
    pub analysis: Analysis,
    #[serde(default)]
    pub cv_name: Option<String>,
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResultBody {
    #[serde(default)]
    pub result: Option<AnalysisResult>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UploadBody {
    #[serde(default)]
    pub cv_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct JobDescriptionBody {
    #[serde(default)]
    pub job_description_id: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeBody {
    #[serde(default)]
    pub result_id: Option<i64>,
    #[serde(default)]
    pub analysis: Option<Analysis>,
}

/// Result of a successful `/analyze` call.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub result_id: i64,
    pub analysis: Analysis,
}

#[derive(Debug, Default, Deserialize)]
pub struct AuthBody {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Health {
    pub status: String,
    #[serde(default)]
    pub version: Option<String>,
}

/// A downloaded export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedFile {
    /// Name suggested by the server's Content-Disposition header.
    pub file_name: Option<String>,
    pub bytes: Vec<u8>,
}

/// Scores arrive as integers, floats, numeric strings or null depending on
/// how the model answered. Anything unreadable becomes 0.
fn de_score<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => n.as_f64().unwrap_or(0.0),
        serde_json::Value::String(s) => s.trim().trim_end_matches('%').parse().unwrap_or(0.0),
        _ => 0.0,
    })
}

/// Stored rows can hold NULL text columns; treat them like missing fields.
fn de_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

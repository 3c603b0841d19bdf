// src/api/http.rs — reqwest implementation of CvApi

use async_trait::async_trait;
use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::types::*;
use super::CvApi;
use crate::infra::errors::CvScanError;
use crate::infra::session::User;

pub struct HttpCvApi {
    base_url: String,
    client: reqwest::Client,
}

impl HttpCvApi {
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> Result<Self, CvScanError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CvScanError::Config(format!("Cannot build HTTP client: {e}")))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CvScanError> {
        let response = self
            .client
            .get(self.url(path))
            .query(query)
            .send()
            .await
            .map_err(|e| transport(path, e))?;

        read_envelope(path, response).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CvScanError> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| transport(path, e))?;

        read_envelope(path, response).await
    }

    async fn authenticate(
        &self,
        path: &str,
        credentials: Credentials,
    ) -> Result<User, CvScanError> {
        let body: AuthBody = self.post_json(path, &credentials).await?;
        let id = body.user_id.ok_or(CvScanError::MissingField {
            endpoint: path.into(),
            field: "user_id",
        })?;
        Ok(User {
            id,
            email: body.email.unwrap_or(credentials.email),
        })
    }
}

fn transport(endpoint: &str, source: reqwest::Error) -> CvScanError {
    CvScanError::Transport {
        endpoint: endpoint.into(),
        source,
    }
}

/// Read the body as text and decode the `{success, error, ...}` envelope.
///
/// The status code is only used for diagnostics: the server reports failures
/// in the body, and a non-JSON body is a transport-level problem regardless
/// of status.
async fn read_envelope<T: DeserializeOwned>(
    endpoint: &str,
    response: reqwest::Response,
) -> Result<T, CvScanError> {
    let status = response.status();
    let text = response
        .text()
        .await
        .map_err(|e| transport(endpoint, e))?;

    tracing::debug!(endpoint, %status, bytes = text.len(), "API response");

    let envelope: Envelope<T> =
        serde_json::from_str(&text).map_err(|e| CvScanError::InvalidResponse {
            endpoint: endpoint.into(),
            message: if status.is_success() {
                format!("Server returned invalid JSON: {e}")
            } else {
                format!("HTTP {status}: {e}")
            },
        })?;

    envelope.into_result()
}

/// Pull `filename` out of a Content-Disposition header value.
pub fn disposition_file_name(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

/// `{base}/export-cv/{id}?format={fmt}`
pub fn build_export_url(
    base_url: &str,
    result_id: i64,
    format: ExportFormat,
) -> Result<String, CvScanError> {
    let mut url = url::Url::parse(&format!(
        "{}/export-cv/{}",
        base_url.trim_end_matches('/'),
        result_id
    ))
    .map_err(|e| CvScanError::Config(format!("Invalid API base URL '{base_url}': {e}")))?;
    url.query_pairs_mut().append_pair("format", format.as_str());
    Ok(url.to_string())
}

#[async_trait]
impl CvApi for HttpCvApi {
    async fn list_cvs(&self, user_id: i64) -> Result<Vec<CvSummary>, CvScanError> {
        let body: CvList = self
            .get_json("/user-cvs", &[("user_id", user_id.to_string())])
            .await?;
        Ok(body.cvs)
    }

    async fn list_job_descriptions(
        &self,
        user_id: i64,
    ) -> Result<Vec<JobDescriptionSummary>, CvScanError> {
        let body: JobDescriptionList = self
            .get_json("/user-job-descriptions", &[("user_id", user_id.to_string())])
            .await?;
        Ok(body.job_descriptions)
    }

    async fn analysis_history(&self, user_id: i64) -> Result<Vec<HistoryEntry>, CvScanError> {
        let body: HistoryList = self
            .get_json("/analysis-history", &[("user_id", user_id.to_string())])
            .await?;
        Ok(body.history)
    }

    async fn analysis_result(&self, result_id: i64) -> Result<AnalysisResult, CvScanError> {
        let path = format!("/analysis-result/{result_id}");
        let body: ResultBody = self.get_json(&path, &[]).await?;
        body.result.ok_or(CvScanError::MissingField {
            endpoint: path,
            field: "result",
        })
    }

    async fn upload_cv(&self, upload: CvUpload) -> Result<Option<i64>, CvScanError> {
        let path = "/upload-cv";
        let part = Part::bytes(upload.bytes.clone())
            .file_name(upload.file_name.clone())
            .mime_str(upload.mime_type())
            .map_err(|e| transport(path, e))?;
        let form = Form::new()
            .part("cv", part)
            .text("user_id", upload.user_id.to_string());

        tracing::info!(file = %upload.file_name, user_id = upload.user_id, "Uploading CV");

        let response = self
            .client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .map_err(|e| transport(path, e))?;

        let body: UploadBody = read_envelope(path, response).await?;
        Ok(body.cv_id)
    }

    async fn save_job_description(
        &self,
        request: JobDescriptionRequest,
    ) -> Result<i64, CvScanError> {
        let path = "/job-description";
        let body: JobDescriptionBody = self.post_json(path, &request).await?;
        body.job_description_id.ok_or(CvScanError::MissingField {
            endpoint: path.into(),
            field: "job_description_id",
        })
    }

    async fn analyze(&self, request: AnalyzeRequest) -> Result<AnalysisOutcome, CvScanError> {
        let path = "/analyze";
        let body: AnalyzeBody = self.post_json(path, &request).await?;
        let result_id = body.result_id.ok_or(CvScanError::MissingField {
            endpoint: path.into(),
            field: "result_id",
        })?;
        let analysis = body.analysis.ok_or(CvScanError::MissingField {
            endpoint: path.into(),
            field: "analysis",
        })?;
        Ok(AnalysisOutcome {
            result_id,
            analysis,
        })
    }

    fn export_url(&self, result_id: i64, format: ExportFormat) -> Result<String, CvScanError> {
        build_export_url(&self.base_url, result_id, format)
    }

    async fn export_cv(
        &self,
        result_id: i64,
        format: ExportFormat,
    ) -> Result<ExportedFile, CvScanError> {
        let url = self.export_url(result_id, format)?;
        let path = "/export-cv";

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| transport(path, e))?;

        if !response.status().is_success() {
            // Failures come back as the usual JSON error envelope.
            return match read_envelope::<serde_json::Value>(path, response).await {
                Ok(_) => Err(CvScanError::api(None)),
                Err(e) => Err(e),
            };
        }

        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(disposition_file_name);

        let bytes = response
            .bytes()
            .await
            .map_err(|e| transport(path, e))?
            .to_vec();

        Ok(ExportedFile { file_name, bytes })
    }

    async fn login(&self, credentials: Credentials) -> Result<User, CvScanError> {
        self.authenticate("/login", credentials).await
    }

    async fn register(&self, credentials: Credentials) -> Result<User, CvScanError> {
        self.authenticate("/register", credentials).await
    }

    async fn health(&self) -> Result<Health, CvScanError> {
        let path = "/health";
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(|e| transport(path, e))?;
        response
            .json::<Health>()
            .await
            .map_err(|e| CvScanError::InvalidResponse {
                endpoint: path.into(),
                message: e.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_url() {
        let url = build_export_url("http://127.0.0.1:5000/api", 17, ExportFormat::Txt).unwrap();
        assert_eq!(url, "http://127.0.0.1:5000/api/export-cv/17?format=txt");
    }

    #[test]
    fn test_export_url_trailing_slash() {
        let url = build_export_url("http://host/api/", 3, ExportFormat::Txt).unwrap();
        assert_eq!(url, "http://host/api/export-cv/3?format=txt");
    }

    #[test]
    fn test_export_url_bad_base() {
        assert!(build_export_url("not a url", 3, ExportFormat::Txt).is_err());
    }

    #[test]
    fn test_disposition_file_name() {
        assert_eq!(
            disposition_file_name("attachment; filename=resume_improved.txt"),
            Some("resume_improved.txt".into())
        );
        assert_eq!(
            disposition_file_name(r#"attachment; filename="my cv_improved.txt""#),
            Some("my cv_improved.txt".into())
        );
        assert_eq!(disposition_file_name("inline"), None);
    }

    #[test]
    fn test_base_url_trimmed() {
        let api = HttpCvApi::new("http://localhost:5000/api/", None).unwrap();
        assert_eq!(api.base_url(), "http://localhost:5000/api");
        assert_eq!(api.url("/login"), "http://localhost:5000/api/login");
    }
}

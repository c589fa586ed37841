use super::types::{UploadJob, UploadOutcome};
use crate::config::AppConfig;
use crate::Result;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info};

/// Sends a batch to the ingestion endpoint as one multipart POST.
#[derive(Clone, Debug)]
pub struct UploadClient {
    http: reqwest::Client,
    url: String,
    field_name: String,
}

impl UploadClient {
    pub fn new(config: &AppConfig) -> Result<Self> {
        // Uploads run on short-lived worker runtimes; idle connections must not outlive them.
        let mut builder = reqwest::Client::builder().pool_max_idle_per_host(0);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            http: builder.build()?,
            url: config.upload_url(),
            field_name: config.field_name.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// One part per file, all under the same field name.
    pub fn build_form(&self, job: &UploadJob) -> Result<Form> {
        let mut form = Form::new();
        for part in &job.parts {
            let file_part = Part::bytes(part.bytes.to_vec())
                .file_name(part.file_name.clone())
                .mime_str(&part.mime)?;
            form = form.part(self.field_name.clone(), file_part);
        }
        Ok(form)
    }

    pub async fn send(&self, job: &UploadJob) -> UploadOutcome {
        let form = match self.build_form(job) {
            Ok(form) => form,
            Err(e) => return UploadOutcome::TransportError(e.to_string()),
        };

        info!("POST {} with {} file(s)", self.url, job.len());

        let response = match self.http.post(&self.url).multipart(form).send().await {
            Ok(response) => response,
            Err(e) => {
                return UploadOutcome::TransportError(format!("Failed to send request: {}", e))
            }
        };

        let status = response.status();
        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return UploadOutcome::TransportError(format!("Failed to read response: {}", e))
            }
        };

        match serde_json::from_str::<serde_json::Value>(&body) {
            Ok(json) => debug!("Upload response ({}): {}", status, json),
            Err(_) => debug!("Upload response ({}) was not JSON: {:?}", status, body),
        }

        if status.is_success() {
            UploadOutcome::Success {
                status: status.as_u16(),
            }
        } else {
            UploadOutcome::ServerError {
                status: status.as_u16(),
            }
        }
    }
}

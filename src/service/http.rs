//! Blocking HTTP client for the text-to-diagram service.

use reqwest::blocking::multipart::{Form, Part};
use reqwest::blocking::Client;

use super::input::ServiceInput;
use super::payload::{self, ServiceResult};
use super::DiagramService;
use crate::config::ServiceConfig;
use crate::error::ServiceError;

pub struct HttpService {
    client: Client,
    config: ServiceConfig,
}

impl HttpService {
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    fn classify(&self, err: reqwest::Error) -> ServiceError {
        if err.is_timeout() {
            ServiceError::Timeout {
                seconds: self.config.timeout.as_secs(),
            }
        } else {
            ServiceError::Http(err)
        }
    }
}

impl DiagramService for HttpService {
    fn transform(&self, input: &ServiceInput) -> Result<ServiceResult, ServiceError> {
        let endpoint = self.config.endpoint.as_str();
        let request = match input {
            ServiceInput::Text(text) => {
                tracing::info!(endpoint, chars = text.len(), "sending PRD text");
                self.client
                    .post(endpoint)
                    .json(&serde_json::json!({ "text": text }))
            }
            ServiceInput::File { name, bytes } => {
                tracing::info!(endpoint, file = %name, bytes = bytes.len(), "uploading PRD");
                let part = Part::bytes(bytes.clone()).file_name(name.clone());
                self.client
                    .post(endpoint)
                    .multipart(Form::new().part("file", part))
            }
        };

        let response = request.send().map_err(|e| self.classify(e))?;
        let status = response.status();
        let body = response.text().map_err(|e| self.classify(e))?;

        if !status.is_success() {
            // Error responses still carry `{success: false, error}` when the
            // service itself produced them.
            return Err(match payload::parse(&body) {
                Err(rejected @ ServiceError::Rejected { .. }) => rejected,
                _ => ServiceError::Status {
                    status: status.as_u16(),
                    body,
                },
            });
        }

        let result = payload::parse(&body)?;
        tracing::info!(
            nodes = result.diagram.nodes.len(),
            connections = result.diagram.connections.len(),
            gaps = result.gaps_detected.len(),
            "diagram received"
        );
        Ok(result)
    }
}

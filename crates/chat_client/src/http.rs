use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use url::Url;

use crate::{ClientError, ClientSettings, DocumentUpload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestBody {
    Empty,
    Json(Vec<u8>),
    /// Every document goes under the same repeated field name.
    Multipart {
        field: &'static str,
        documents: Vec<DocumentUpload>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn get(url: Url) -> Self {
        Self {
            method: Method::GET,
            url,
            body: RequestBody::Empty,
        }
    }

    pub fn post(url: Url, body: RequestBody) -> Self {
        Self {
            method: Method::POST,
            url,
            body,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: StatusCode,
    pub body: bytes::Bytes,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Fails with `RequestFailed` unless the status is 2xx.
    pub fn error_for_status(self) -> Result<Self, ClientError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ClientError::RequestFailed {
                status: self.status.as_u16(),
                body: self.text().trim().to_string(),
            })
        }
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_slice(&self.body)
            .map_err(|err| ClientError::InvalidResponse(err.to_string()))
    }
}

/// Single-attempt HTTP calls bounded by a deadline.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    max_response_bytes: u64,
}

impl HttpClient {
    pub fn new(settings: &ClientSettings) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .connect_timeout(settings.connect_timeout)
            .cookie_store(true)
            .build()
            .map_err(|err| ClientError::NetworkFailure(err.to_string()))?;
        Ok(Self {
            client,
            max_response_bytes: settings.max_response_bytes,
        })
    }

    /// Performs one exchange. Dropping the in-flight future when the deadline
    /// elapses aborts the connection.
    pub async fn call(
        &self,
        request: HttpRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, ClientError> {
        match tokio::time::timeout(timeout, self.exchange(request, timeout)).await {
            Ok(result) => result,
            Err(_elapsed) => Err(ClientError::Timeout { after: timeout }),
        }
    }

    async fn exchange(
        &self,
        request: HttpRequest,
        timeout: Duration,
    ) -> Result<HttpResponse, ClientError> {
        let mut builder = self.client.request(request.method, request.url);
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(bytes) => builder
                .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
                .body(bytes),
            RequestBody::Multipart { field, documents } => {
                let form = documents.into_iter().fold(Form::new(), |form, doc| {
                    form.part(field, Part::bytes(doc.bytes).file_name(doc.file_name))
                });
                builder.multipart(form)
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|err| ClientError::from_reqwest(err, timeout))?;
        let status = response.status();
        // Error bodies are diagnostics only: keep the first `max_response_bytes`
        // so the status still surfaces as `RequestFailed`.
        let truncate = !status.is_success();

        if let Some(content_len) = response.content_length() {
            if content_len > self.max_response_bytes && !truncate {
                return Err(ClientError::ResponseTooLarge {
                    max_bytes: self.max_response_bytes,
                });
            }
        }

        let limit = usize::try_from(self.max_response_bytes).unwrap_or(usize::MAX);
        let mut body = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| ClientError::from_reqwest(err, timeout))?;
            if body.len().saturating_add(chunk.len()) > limit {
                if truncate {
                    body.extend_from_slice(&chunk[..limit - body.len()]);
                    break;
                }
                return Err(ClientError::ResponseTooLarge {
                    max_bytes: self.max_response_bytes,
                });
            }
            body.extend_from_slice(&chunk);
        }

        Ok(HttpResponse {
            status,
            body: bytes::Bytes::from(body),
        })
    }
}

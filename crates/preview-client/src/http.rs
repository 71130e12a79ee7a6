//! HTTP transport backed by `reqwest::blocking`.

use crate::{PreviewConfig, PreviewError, PreviewTransport};

/// Fetches rendered previews over HTTP.
///
/// The markup is posted as the raw request body; the service returns the
/// rendered label as PNG bytes.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// Build a transport using the configured request timeout.
    pub fn new(config: &PreviewConfig) -> Result<Self, PreviewError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(PreviewError::ClientBuild)?;
        Ok(Self { client })
    }
}

impl PreviewTransport for HttpTransport {
    fn fetch(&self, url: &str, markup: &str) -> Result<Vec<u8>, PreviewError> {
        let request_failed = |source| PreviewError::RequestFailed {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .post(url)
            .header(reqwest::header::ACCEPT, "image/png")
            .body(markup.to_string())
            .send()
            .map_err(request_failed)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PreviewError::Endpoint {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }

        Ok(response.bytes().map_err(request_failed)?.to_vec())
    }
}

use crate::ports::outbound::FileStorage;
use crate::shared::error::NoticeError;
use crate::shared::security::validate_storage_path;
use crate::shared::Result;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use std::collections::BTreeMap;
use std::time::Duration;

/// HttpFileStorage adapter for a blob store speaking plain HTTP GET and PUT
///
/// A blob lives at `<url>/<path>`. `404 Not Found` means nothing is stored;
/// any other non-success status is an error. The server is expected to make
/// a PUT visible atomically.
pub struct HttpFileStorage {
    client: reqwest::Client,
    url: String,
}

impl HttpFileStorage {
    /// Creates a storage rooted at `url`, sending `headers` with every request
    ///
    /// # Errors
    /// Returns a configuration error for header names or values HTTP does not allow
    pub fn new(url: impl Into<String>, headers: &BTreeMap<String, String>) -> Result<Self> {
        let mut header_map = HeaderMap::new();
        for (name, value) in headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                NoticeError::Configuration {
                    message: format!("invalid HTTP header name '{}': {}", name, e),
                    hint: "Header names may only contain visible ASCII characters".to_string(),
                }
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| NoticeError::Configuration {
                message: format!("invalid value for HTTP header '{}': {}", name, e),
                hint: "Header values may only contain visible ASCII characters".to_string(),
            })?;
            header_map.insert(name, value);
        }

        let user_agent = format!("notice-kit/{}", env!("CARGO_PKG_VERSION"));
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .user_agent(user_agent)
            .default_headers(header_map)
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    fn url_for(&self, path: &str) -> Result<String> {
        validate_storage_path(path)?;
        Ok(format!("{}/{}", self.url.trim_end_matches('/'), path))
    }
}

#[async_trait]
impl FileStorage for HttpFileStorage {
    async fn read(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let url = self.url_for(path)?;
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| NoticeError::storage("read", &url, e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => {
                let bytes = response
                    .bytes()
                    .await
                    .map_err(|e| NoticeError::storage("read", &url, e))?;
                Ok(Some(bytes.to_vec()))
            }
            status => Err(NoticeError::storage(
                "read",
                &url,
                format!("server responded with status code {}", status),
            )
            .into()),
        }
    }

    async fn write(&self, path: &str, content: Vec<u8>) -> Result<()> {
        let url = self.url_for(path)?;
        let response = self
            .client
            .put(&url)
            .body(content)
            .send()
            .await
            .map_err(|e| NoticeError::storage("write", &url, e))?;

        if !response.status().is_success() {
            return Err(NoticeError::storage(
                "write",
                &url,
                format!("server responded with status code {}", response.status()),
            )
            .into());
        }

        log::debug!("Uploaded {}", url);
        Ok(())
    }

    fn location(&self) -> String {
        self.url.clone()
    }
}

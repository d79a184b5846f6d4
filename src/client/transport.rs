use crate::config::ClientConfig;
use crate::error::{ChargerError, Result};
use crate::logging::{LogContext, StructuredLogger, get_logger_with_context};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};

/// Path of the status endpoint
pub const STATUS_PATH: &str = "/api/status";
/// Path of the parameter endpoint
pub const SET_PATH: &str = "/api/set";

/// One call against the charger API
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceRequest {
    /// `GET /api/status`
    Status,
    /// `GET /api/set?<key>=<value>`
    Set { key: &'static str, value: String },
}

impl DeviceRequest {
    pub fn path(&self) -> &'static str {
        match self {
            DeviceRequest::Status => STATUS_PATH,
            DeviceRequest::Set { .. } => SET_PATH,
        }
    }

    pub fn query(&self) -> Option<(&'static str, &str)> {
        match self {
            DeviceRequest::Status => None,
            DeviceRequest::Set { key, value } => Some((*key, value.as_str())),
        }
    }
}

/// Carries a [`DeviceRequest`] to the charger and returns the response body
///
/// Implementations must report refused connections and timeouts as
/// [`ChargerError::Unreachable`]; the client turns exactly those into the
/// unreachable sentinel. HTTP status codes are not errors: the firmware
/// describes failures in the body.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn fetch(&self, request: &DeviceRequest) -> Result<String>;
}

/// reqwest-backed transport
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    authorization: String,
    logger: StructuredLogger,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ChargerError::config(format!("Failed to build HTTP client: {}", e)))?;
        let base_url = config.base_url().to_string();
        let logger = get_logger_with_context(LogContext::new("http").with_host(&base_url));
        Ok(Self {
            client,
            base_url,
            authorization: format!("Basic {}", config.token),
            logger,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, request: &DeviceRequest) -> Result<String> {
        let url = format!("{}{}", self.base_url, request.path());
        let mut builder = self
            .client
            .get(&url)
            .header(AUTHORIZATION, &self.authorization)
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, concat!("goecharger/", env!("CARGO_PKG_VERSION")));
        if let Some((key, value)) = request.query() {
            builder = builder.query(&[(key, value)]);
        }

        self.logger.trace(&format!("GET {} {:?}", url, request.query()));
        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            self.logger
                .debug(&format!("Charger answered {} for {}", status, url));
        }
        Ok(body)
    }
}

//! Client for the charger's local HTTP API
//!
//! Status is read from `GET /api/status`; parameters are written one at a
//! time through `GET /api/set?<key>=<value>`. Both answers go through the
//! status mapper. With `wait` enabled every write the charger answered is
//! read back, first inline and then on a background task (see
//! [`Verification`]); writes that end in a [`Sentinel`] are not verified.
//!
//! Writes to one charger from concurrent callers are not coordinated: a
//! pending verification may observe another caller's value.

pub mod params;
pub mod response;
pub mod transport;
pub mod verify;

pub use params::{MAX_CURRENT, MIN_CURRENT, Parameter, ParameterWrite};
pub use response::{ChargerResponse, OUTDATED_REASON, Sentinel};
pub use transport::{DeviceRequest, HttpTransport, Transport};
pub use verify::{PendingVerification, Verification};

use crate::config::ClientConfig;
use crate::error::Result;
use crate::logging::{LogContext, StructuredLogger, get_logger_with_context};
use crate::status::NormalizedStatus;
use response::{interpret, parse_body};
use std::sync::Arc;
use std::time::Duration;
use verify::Verifier;

/// Answer to a parameter write
#[derive(Debug)]
pub struct WriteOutcome {
    /// Mapped body of the `/api/set` call
    pub response: ChargerResponse,
    pub verification: Verification,
}

impl WriteOutcome {
    pub fn status(&self) -> Option<&NormalizedStatus> {
        self.response.status()
    }
}

/// Handle to one charger
pub struct ChargerClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
    verifier: Verifier,
    logger: StructuredLogger,
}

impl ChargerClient {
    /// Client talking HTTP to `config.host`
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let transport = Arc::new(HttpTransport::new(&config)?);
        Ok(Self::assemble(config, transport))
    }

    pub fn from_parts(host: &str, token: &str, timeout: Duration, wait: bool) -> Result<Self> {
        Self::new(
            ClientConfig::new(host, token)
                .with_timeout(timeout)
                .with_wait(wait),
        )
    }

    /// Client over a caller-supplied transport
    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        Ok(Self::assemble(config, transport))
    }

    fn assemble(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        let logger =
            get_logger_with_context(LogContext::new("client").with_host(config.base_url()));
        let verifier = Verifier::new(
            Arc::clone(&transport),
            config.verify_retries,
            config.verify_delay(),
            logger.child("verify"),
        );
        Self {
            config,
            transport,
            verifier,
            logger,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Read and map the current status
    pub async fn request_status(&self) -> Result<ChargerResponse> {
        self.logger.debug("Requesting status");
        self.call(DeviceRequest::Status).await
    }

    /// Set the maximum charging current in amperes
    ///
    /// Values outside `MIN_CURRENT..=MAX_CURRENT` are clamped and sent,
    /// unlike the other setters which reject out-of-range input.
    pub async fn set_max_current(&self, amps: i64) -> Result<WriteOutcome> {
        let write = ParameterWrite::max_current(amps);
        if write.value != Some(amps) {
            self.logger.debug(&format!(
                "Clamped max current {} to {}",
                amps,
                write.wire_value()
            ));
        }
        self.write(write).await
    }

    /// Force charging on (`true`) or off (`false`)
    pub async fn set_force_charging(&self, enabled: bool) -> Result<WriteOutcome> {
        self.write(ParameterWrite::force_charging(enabled)).await
    }

    /// 0 auto, 1 single phase, 2 three phases
    pub async fn set_phase(&self, phase: i64) -> Result<WriteOutcome> {
        self.write(ParameterWrite::phase(phase)?).await
    }

    /// 0 open, 1 wait for authentication
    pub async fn set_access_control(&self, status: i64) -> Result<WriteOutcome> {
        self.write(ParameterWrite::access_control(status)?).await
    }

    /// `None` ends the transaction, `Some(0)` authenticates all users
    pub async fn set_transaction(&self, status: Option<i64>) -> Result<WriteOutcome> {
        self.write(ParameterWrite::transaction(status)?).await
    }

    async fn write(&self, write: ParameterWrite) -> Result<WriteOutcome> {
        self.logger.debug(&format!(
            "Setting {}={}",
            write.parameter,
            write.wire_value()
        ));
        let response = self.call(write.to_request()).await?;

        // Nothing to read back from a charger that did not take the write
        let verification = if self.config.wait && response.is_status() {
            self.verifier.verify(write).await?
        } else {
            Verification::Skipped
        };

        Ok(WriteOutcome {
            response,
            verification,
        })
    }

    async fn call(&self, request: DeviceRequest) -> Result<ChargerResponse> {
        let body = match self.transport.fetch(&request).await {
            Ok(body) => body,
            Err(e) if e.is_unreachable() => {
                self.logger
                    .warn(&format!("{} ({})", Sentinel::Unreachable, e));
                return Ok(Sentinel::Unreachable.into());
            }
            Err(e) => return Err(e),
        };

        let payload = parse_body(&body);
        if payload.is_none() {
            self.logger.warn(&format!(
                "Response from {} is not JSON, mapping defaults",
                request.path()
            ));
        }

        let response = interpret(payload)?;
        if let Some(sentinel) = response.sentinel() {
            self.logger.warn(sentinel.msg());
        }
        Ok(response)
    }
}

use super::params::{Parameter, ParameterWrite};
use super::response::parse_body;
use super::transport::{DeviceRequest, Transport};
use crate::error::{ChargerError, Result};
use crate::logging::StructuredLogger;
use crate::status::RawStatus;
use crate::status::raw::as_int;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

/// Outcome of the verification step of a write
#[derive(Debug)]
pub enum Verification {
    /// Wait mode is off
    Skipped,
    /// The inline read-back matched
    Confirmed,
    /// Retries continue on a background task
    Pending(PendingVerification),
}

impl Verification {
    /// Resolve the verification, awaiting the background task if any
    pub async fn wait(self) -> Result<()> {
        match self {
            Verification::Skipped | Verification::Confirmed => Ok(()),
            Verification::Pending(pending) => pending.wait().await,
        }
    }
}

/// Handle to a background verification
///
/// Dropping the handle detaches the task; its outcome is then only logged.
#[derive(Debug)]
pub struct PendingVerification {
    parameter: Parameter,
    expected: Option<i64>,
    handle: JoinHandle<Result<()>>,
}

impl PendingVerification {
    pub fn parameter(&self) -> Parameter {
        self.parameter
    }

    pub fn expected(&self) -> Option<i64> {
        self.expected
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Wait for the retries to finish
    pub async fn wait(self) -> Result<()> {
        match self.handle.await {
            Ok(result) => result,
            Err(e) => Err(ChargerError::generic(format!(
                "Verification task for {} failed: {}",
                self.parameter, e
            ))),
        }
    }
}

/// Reads back written parameters
#[derive(Clone)]
pub(crate) struct Verifier {
    transport: Arc<dyn Transport>,
    retries: u32,
    delay: Duration,
    logger: StructuredLogger,
}

impl Verifier {
    pub(crate) fn new(
        transport: Arc<dyn Transport>,
        retries: u32,
        delay: Duration,
        logger: StructuredLogger,
    ) -> Self {
        Self {
            transport,
            retries,
            delay,
            logger,
        }
    }

    /// Check the write once inline, then hand remaining retries to a task
    pub(crate) async fn verify(&self, write: ParameterWrite) -> Result<Verification> {
        let actual = self.read_back(write.parameter).await;
        if confirms(&actual, write.value) {
            self.logger
                .debug(&format!("Verified {}={}", write.parameter, write.wire_value()));
            return Ok(Verification::Confirmed);
        }

        if self.retries == 0 {
            let err = mismatch(write, &actual);
            self.logger.error(&err.to_string());
            return Err(err);
        }

        self.logger.debug(&format!(
            "{} not applied yet, re-checking up to {} times every {:?}",
            write.parameter, self.retries, self.delay
        ));
        let verifier = self.clone();
        let handle = tokio::spawn(async move { verifier.retry(write).await });
        Ok(Verification::Pending(PendingVerification {
            parameter: write.parameter,
            expected: write.value,
            handle,
        }))
    }

    async fn retry(&self, write: ParameterWrite) -> Result<()> {
        let mut actual = Err(ChargerError::generic("not read"));
        for attempt in 1..=self.retries {
            tokio::time::sleep(self.delay).await;
            actual = self.read_back(write.parameter).await;
            if confirms(&actual, write.value) {
                self.logger.debug(&format!(
                    "Verified {}={} after {} retries",
                    write.parameter,
                    write.wire_value(),
                    attempt
                ));
                return Ok(());
            }
        }

        let err = mismatch(write, &actual);
        self.logger.error(&err.to_string());
        Err(err)
    }

    /// Current raw value of `parameter`; `Ok(None)` when the firmware
    /// reports it as null, an error when the key is missing
    async fn read_back(&self, parameter: Parameter) -> Result<Option<i64>> {
        let body = self.transport.fetch(&DeviceRequest::Status).await?;
        let raw = match parse_body(&body) {
            Some(value @ Value::Object(_)) => RawStatus::from_value(value),
            _ => return Err(ChargerError::device(body)),
        };
        match raw.get(parameter.key()) {
            Some(value) => Ok(as_int(value)),
            None => Err(ChargerError::device(format!(
                "{} missing from status",
                parameter.key()
            ))),
        }
    }
}

/// A failed read never confirms, not even an expected null
fn confirms(actual: &Result<Option<i64>>, expected: Option<i64>) -> bool {
    matches!(actual, Ok(value) if *value == expected)
}

fn mismatch(write: ParameterWrite, actual: &Result<Option<i64>>) -> ChargerError {
    let received = match actual {
        Ok(Some(v)) => v.to_string(),
        _ => "null".to_string(),
    };
    ChargerError::verification(write.parameter.key().to_string(), write.wire_value(), received)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirms() {
        assert!(confirms(&Ok(Some(14)), Some(14)));
        assert!(!confirms(&Ok(Some(13)), Some(14)));
        assert!(confirms(&Ok(None), None));
        assert!(!confirms(&Err(ChargerError::unreachable("down")), None));
    }

    #[test]
    fn test_mismatch_message() {
        let write = ParameterWrite::max_current(14);
        let err = mismatch(write, &Ok(Some(10)));
        assert_eq!(
            err.to_string(),
            "Couldn't verify amp, expected value=14, received value=10"
        );

        let write = ParameterWrite::transaction(Some(0)).unwrap();
        let err = mismatch(write, &Err(ChargerError::unreachable("down")));
        assert_eq!(
            err.to_string(),
            "Couldn't verify trx, expected value=0, received value=null"
        );
    }
}

//! Single-identifier lookup with bounded retry on rate limiting.
//!
//! Response policy:
//! - 200 with an `erro` key: semantic failure, not retried
//! - 200 otherwise: parsed into a [`CompanyRecord`]
//! - 429: wait per [`RateLimitPolicy`] and try again, up to `max_attempts`
//! - any other status, or a transport failure: not retried

use std::sync::Arc;

use serde_json::Value;

use crate::cnpj::is_valid;
use crate::error::LookupError;
use crate::policy::{RateLimitPolicy, Sleeper, TokioSleeper};
use crate::record::{CompanyRecord, RegistryResponse};
use crate::report::{StatusEvent, StatusSink, TracingSink};
use crate::transport::RegistryTransport;

/// Queries the registry for one CNPJ at a time.
pub struct LookupClient<T> {
    transport: T,
    policy: RateLimitPolicy,
    sleeper: Arc<dyn Sleeper>,
    sink: Arc<dyn StatusSink>,
}

impl<T: RegistryTransport> LookupClient<T> {
    /// Default policy, real sleeps, events forwarded to `tracing`.
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            policy: RateLimitPolicy::default(),
            sleeper: Arc::new(TokioSleeper),
            sink: Arc::new(TracingSink),
        }
    }

    pub fn with_policy(mut self, policy: RateLimitPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    pub fn with_sink(mut self, sink: Arc<dyn StatusSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn policy(&self) -> &RateLimitPolicy {
        &self.policy
    }

    pub(crate) fn sleeper(&self) -> &dyn Sleeper {
        self.sleeper.as_ref()
    }

    pub(crate) fn sink(&self) -> &dyn StatusSink {
        self.sink.as_ref()
    }

    /// Look up `cnpj`, reporting every outcome to the sink.
    ///
    /// Returns `None` on any failure; the reason has already been emitted.
    pub async fn lookup(&self, cnpj: &str) -> Option<CompanyRecord> {
        match self.try_lookup(cnpj).await {
            Ok(record) => {
                self.sink.emit(StatusEvent::Found { cnpj: cnpj.to_string() });
                Some(record)
            }
            Err(e) => {
                self.sink.emit(StatusEvent::from(&e));
                None
            }
        }
    }

    /// Look up `cnpj` and return the failure instead of reporting it.
    ///
    /// Rate-limit warnings are still emitted as they happen.
    pub async fn try_lookup(&self, cnpj: &str) -> Result<CompanyRecord, LookupError> {
        if !is_valid(cnpj) {
            return Err(LookupError::InvalidIdentifier { cnpj: cnpj.to_string() });
        }

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            let resp = self.transport.get(cnpj).await?;
            match resp.status {
                200 => return parse_body(cnpj, &resp.body),
                429 => match self.policy.next_delay(attempt) {
                    Some(wait) => {
                        tracing::warn!(
                            cnpj,
                            attempt,
                            wait_ms = wait.as_millis() as u64,
                            url = %self.transport.url(),
                            "rate limited, backing off"
                        );
                        self.sink.emit(StatusEvent::RateLimited {
                            cnpj: cnpj.to_string(),
                            attempt,
                            max_attempts: self.policy.max_attempts,
                            wait,
                        });
                        self.sleeper.sleep(wait).await;
                    }
                    None => {
                        tracing::error!(cnpj, attempt, "rate limit retries exhausted");
                        return Err(LookupError::RateLimited {
                            cnpj: cnpj.to_string(),
                            attempts: attempt,
                        });
                    }
                },
                status => {
                    return Err(LookupError::Http { cnpj: cnpj.to_string(), status });
                }
            }
        }
    }
}

fn parse_body(cnpj: &str, body: &str) -> Result<CompanyRecord, LookupError> {
    let decode = |e: serde_json::Error| LookupError::Decode {
        cnpj: cnpj.to_string(),
        reason: e.to_string(),
    };

    let value: Value = serde_json::from_str(body).map_err(decode)?;
    if let Some(erro) = value.get("erro") {
        let message = match erro {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        return Err(LookupError::ApiReported { cnpj: cnpj.to_string(), message });
    }

    let resp: RegistryResponse = serde_json::from_value(value).map_err(decode)?;
    Ok(resp.into())
}

//! JSON management protocol client.

use std::time::Duration;

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

use crate::Address;
use crate::time::{Sleeper, TokioSleeper};
use crate::values::{AttributeValue, ValueSet};

use super::{Administration, HttpClient, HttpRequest, ManagementSession, SessionError};

#[cfg(test)]
#[path = "management_tests.rs"]
mod tests;

/// Failure code the server uses for an add against an existing node.
const DUPLICATE_RESOURCE: &str = "WFLYCTL0212";

/// Failure codes meaning "no such resource" / "no such attribute".
const NOT_FOUND_CODES: [&str; 2] = ["WFLYCTL0216", "WFLYCTL0201"];

const STATE_RUNNING: &str = "running";
const STATE_RELOAD_REQUIRED: &str = "reload-required";

/// How long to wait for a server to come back after a reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReloadPolicy {
    /// Give up after this long.
    pub timeout: Duration,
    /// Pause between `server-state` reads.
    pub poll_interval: Duration,
}

impl ReloadPolicy {
    /// Default reload timeout (60 seconds).
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

    /// Default poll interval (1 second).
    pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

    /// Creates a policy with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Self::DEFAULT_TIMEOUT,
            poll_interval: Self::DEFAULT_POLL_INTERVAL,
        }
    }

    /// Sets the reload timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the poll interval.
    #[must_use]
    pub const fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Number of `server-state` reads that fit into the timeout (at least one).
    #[must_use]
    pub fn max_polls(&self) -> u32 {
        let polls = self.timeout.as_millis() / self.poll_interval.as_millis().max(1);
        u32::try_from(polls).unwrap_or(u32::MAX).max(1)
    }
}

impl Default for ReloadPolicy {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the JSON management endpoint of a running server.
///
/// Every call POSTs one operation, e.g.
/// `{"operation": "add", "address": [{"subsystem": "elytron"}, ...], "oid": "2.5.4.3"}`,
/// and decodes `{"outcome": "success" | "failed", "result": ..., "failure-description": ...}`.
/// Failed operations are reported by the server in the body of a non-2xx
/// response, so the status code is not consulted.
///
/// # Type Parameters
///
/// - `H`: The HTTP client implementation
/// - `S`: The sleeper used while polling a reload (defaults to [`TokioSleeper`])
#[derive(Debug)]
pub struct HttpManagementClient<H, S = TokioSleeper> {
    client: H,
    sleeper: S,
    url: url::Url,
    headers: http::HeaderMap,
    reload: ReloadPolicy,
}

impl<H> HttpManagementClient<H, TokioSleeper> {
    /// Creates a client for the given endpoint, e.g. `http://localhost:9990/management`.
    #[must_use]
    pub fn new(client: H, url: url::Url) -> Self {
        Self {
            client,
            sleeper: TokioSleeper,
            url,
            headers: http::HeaderMap::new(),
            reload: ReloadPolicy::default(),
        }
    }
}

impl<H, S> HttpManagementClient<H, S> {
    /// Sets a custom sleeper for reload polling.
    #[must_use]
    pub fn with_sleeper<S2>(self, sleeper: S2) -> HttpManagementClient<H, S2> {
        HttpManagementClient {
            client: self.client,
            sleeper,
            url: self.url,
            headers: self.headers,
            reload: self.reload,
        }
    }

    /// Sets headers sent with every operation (e.g. `Authorization`).
    #[must_use]
    pub fn with_headers(mut self, headers: http::HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the reload policy.
    #[must_use]
    pub const fn with_reload_policy(mut self, policy: ReloadPolicy) -> Self {
        self.reload = policy;
        self
    }

    /// Returns the endpoint URL.
    #[must_use]
    pub const fn url(&self) -> &url::Url {
        &self.url
    }

    /// Returns the reload policy.
    #[must_use]
    pub const fn reload_policy(&self) -> &ReloadPolicy {
        &self.reload
    }
}

/// One management operation on the wire.
#[derive(Debug, Serialize)]
struct Operation<'a> {
    operation: &'a str,
    #[serde(serialize_with = "serialize_target")]
    address: Option<&'a Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
    #[serde(rename = "child-type", skip_serializing_if = "Option::is_none")]
    child_type: Option<&'a str>,
    #[serde(flatten)]
    attributes: Option<&'a ValueSet>,
}

impl<'a> Operation<'a> {
    const fn new(operation: &'a str, address: Option<&'a Address>) -> Self {
        Self {
            operation,
            address,
            name: None,
            child_type: None,
            attributes: None,
        }
    }

    const fn name(mut self, name: &'a str) -> Self {
        self.name = Some(name);
        self
    }

    const fn child_type(mut self, child_type: &'a str) -> Self {
        self.child_type = Some(child_type);
        self
    }

    const fn attributes(mut self, values: &'a ValueSet) -> Self {
        self.attributes = Some(values);
        self
    }

    fn target(&self) -> String {
        self.address.map_or_else(|| "/".to_string(), ToString::to_string)
    }
}

#[allow(clippy::ref_option)] // signature dictated by serde's serialize_with
fn serialize_target<S: Serializer>(
    address: &Option<&Address>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match address {
        Some(address) => address.serialize(serializer),
        None => serializer.serialize_seq(Some(0))?.end(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct OperationResponse {
    outcome: String,
    #[serde(default)]
    result: serde_json::Value,
    #[serde(default)]
    failure_description: serde_json::Value,
    #[serde(default)]
    response_headers: ResponseHeaders,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
struct ResponseHeaders {
    #[serde(default)]
    operation_requires_reload: bool,
}

impl OperationResponse {
    fn is_success(&self) -> bool {
        self.outcome == "success"
    }

    fn failure(&self) -> String {
        match &self.failure_description {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Null => format!("outcome '{}'", self.outcome),
            other => other.to_string(),
        }
    }
}

impl<H: HttpClient, S: Sleeper> HttpManagementClient<H, S> {
    async fn execute(&self, op: &Operation<'_>) -> Result<OperationResponse, SessionError> {
        let body = serde_json::to_vec(op).map_err(|e| SessionError::Protocol(e.to_string()))?;

        let request = HttpRequest::post_json(self.url.clone(), body).with_headers(&self.headers);

        tracing::debug!(
            operation = op.operation,
            target = %op.target(),
            "Sending management operation"
        );
        let response = self.client.request(request).await?;

        serde_json::from_slice(&response.body).map_err(|e| {
            SessionError::Protocol(format!("HTTP {} with undecodable body: {e}", response.status))
        })
    }

    fn failed(op: &Operation<'_>, response: &OperationResponse) -> SessionError {
        SessionError::Failed {
            operation: op.operation.to_string(),
            target: op.target(),
            detail: response.failure(),
        }
    }

    async fn server_state(&self) -> Result<String, SessionError> {
        let op = Operation::new("read-attribute", None).name("server-state");
        let response = self.execute(&op).await?;
        if !response.is_success() {
            return Err(Self::failed(&op, &response));
        }
        response
            .result
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| SessionError::Protocol("server-state is not a string".to_string()))
    }

    async fn wait_until_running(&self) -> Result<(), SessionError> {
        for poll in 1..=self.reload.max_polls() {
            self.sleeper.sleep(self.reload.poll_interval).await;
            match self.server_state().await {
                Ok(state) if state == STATE_RUNNING => {
                    tracing::info!("Server is running again after {poll} poll(s)");
                    return Ok(());
                }
                Ok(state) => {
                    tracing::debug!(state = %state, "Waiting for server to finish reloading");
                }
                // The endpoint is unreachable or half-up while the server restarts.
                Err(SessionError::Transport(_) | SessionError::Protocol(_)) => {
                    tracing::debug!("Management endpoint not answering yet");
                }
                Err(e) => return Err(e),
            }
        }
        Err(SessionError::ReloadTimeout(self.reload.timeout))
    }
}

impl<H: HttpClient, S: Sleeper> ManagementSession for HttpManagementClient<H, S> {
    async fn exists(&self, address: &Address) -> Result<bool, SessionError> {
        let parent = address.parent();
        let leaf = address.leaf();
        let op = Operation::new("read-children-names", parent.as_ref()).child_type(leaf.kind());

        let response = self.execute(&op).await?;
        if !response.is_success() {
            // A missing parent means a missing child; anything else is a real failure
            if is_not_found(&response.failure()) {
                return Ok(false);
            }
            return Err(Self::failed(&op, &response));
        }

        let names = response.result.as_array().ok_or_else(|| {
            SessionError::Protocol("read-children-names did not return a list".to_string())
        })?;
        Ok(names.iter().any(|n| n.as_str() == Some(leaf.name())))
    }

    async fn add(&self, address: &Address, values: &ValueSet) -> Result<(), SessionError> {
        let op = Operation::new("add", Some(address)).attributes(values);
        let response = self.execute(&op).await?;

        if response.is_success() {
            if response.response_headers.operation_requires_reload {
                tracing::warn!(%address, "Added resource takes effect after reload");
            }
            return Ok(());
        }

        let detail = response.failure();
        if detail.contains(DUPLICATE_RESOURCE) {
            return Err(SessionError::DuplicateResource {
                address: address.clone(),
            });
        }
        Err(SessionError::InvalidAttributes {
            address: address.clone(),
            detail,
        })
    }

    async fn remove_if_exists(&self, address: &Address) -> Result<bool, SessionError> {
        if !self.exists(address).await? {
            return Ok(false);
        }

        let op = Operation::new("remove", Some(address));
        let response = self.execute(&op).await?;
        if !response.is_success() {
            return Err(Self::failed(&op, &response));
        }
        Ok(true)
    }

    async fn query(
        &self,
        address: &Address,
        attribute: &str,
    ) -> Result<AttributeValue, SessionError> {
        let op = Operation::new("read-attribute", Some(address)).name(attribute);
        let response = self.execute(&op).await?;

        let not_found = || SessionError::NotFound {
            address: address.clone(),
            attribute: attribute.to_string(),
        };

        if !response.is_success() {
            let detail = response.failure();
            if is_not_found(&detail) {
                return Err(not_found());
            }
            return Err(Self::failed(&op, &response));
        }

        AttributeValue::from_json(response.result).ok_or_else(not_found)
    }
}

impl<H: HttpClient, S: Sleeper> Administration for HttpManagementClient<H, S> {
    async fn reload_if_required(&self) -> Result<bool, SessionError> {
        let state = self.server_state().await?;
        if state != STATE_RELOAD_REQUIRED {
            tracing::debug!(state = %state, "No reload required");
            return Ok(false);
        }

        tracing::warn!("Server requires reload, reloading now");
        self.reload().await?;
        Ok(true)
    }

    async fn reload(&self) -> Result<(), SessionError> {
        let op = Operation::new("reload", None);
        match self.execute(&op).await {
            Ok(response) if !response.is_success() => return Err(Self::failed(&op, &response)),
            Ok(_) => {}
            // The server may drop the connection as it goes down.
            Err(SessionError::Transport(e)) => {
                tracing::debug!("Connection closed during reload: {e}");
            }
            Err(e) => return Err(e),
        }
        self.wait_until_running().await
    }
}

fn is_not_found(detail: &str) -> bool {
    NOT_FOUND_CODES.iter().any(|code| detail.contains(code))
}

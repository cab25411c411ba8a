// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::api::models::{ApiErrorResponse, Package};
use crate::api::query::PackageQuery;
use crate::error::{JdkWatchError, Result};
use attohttpc::{RequestBuilder, Session};
use log::{debug, trace};
use retry::{OperationResult, delay::Exponential, retry_with_index};
use std::thread;
use std::time::Duration;

pub const FOOJAY_API_BASE: &str = "https://api.foojay.io/disco";
const API_VERSION: &str = "v3.0";
const USER_AGENT: &str = concat!("jdkwatch/", env!("CARGO_PKG_VERSION"));
const DEFAULT_TIMEOUT: u64 = 30;
const DEFAULT_MAX_ATTEMPTS: usize = 1;
const INITIAL_BACKOFF_MS: u64 = 1000;

/// HTTP session with the user agent, timeout and proxy settings every
/// outgoing request shares.
pub fn new_session(timeout: Duration) -> Session {
    let mut session = Session::new();
    session.header("User-Agent", USER_AGENT);
    session.timeout(timeout);
    session.proxy_settings(attohttpc::ProxySettings::from_env());
    session
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    pub(crate) session: Session,
    pub(crate) base_url: String,
    pub(crate) max_attempts: usize,
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            session: new_session(Duration::from_secs(DEFAULT_TIMEOUT)),
            base_url: FOOJAY_API_BASE.to_string(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }

    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.session.timeout(timeout);
        self
    }

    /// Number of attempts for network failures and rate limiting, at least one.
    pub fn with_max_attempts(mut self, max_attempts: usize) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn get_packages(&self, query: &PackageQuery) -> Result<Vec<Package>> {
        let url = format!("{}/{API_VERSION}/packages", self.base_url);
        let params = query.params();
        debug!("Querying packages: {params:?}");

        self.execute_with_retry(move || {
            let mut request = self.session.get(&url);
            for (key, value) in &params {
                request = request.param(key, value);
            }
            request
        })
    }

    fn execute_with_retry<T, F>(&self, request_builder: F) -> Result<T>
    where
        T: for<'de> serde::Deserialize<'de>,
        F: Fn() -> RequestBuilder,
    {
        let max_attempts = self.max_attempts as u64;
        let delays = Exponential::from_millis(INITIAL_BACKOFF_MS).take(self.max_attempts - 1);

        let result = retry_with_index(delays, |current_try| {
            let response = match request_builder().send() {
                Ok(resp) => resp,
                Err(e) => {
                    return OperationResult::Retry(JdkWatchError::NetworkError(format!(
                        "Failed to reach foojay.io API {API_VERSION}: {e}"
                    )));
                }
            };

            let status = response.status();
            if status == attohttpc::StatusCode::TOO_MANY_REQUESTS {
                if current_try < max_attempts
                    && let Some(seconds) = response
                        .headers()
                        .get("Retry-After")
                        .and_then(|value| value.to_str().ok())
                        .and_then(|value| value.trim().parse::<u64>().ok())
                {
                    thread::sleep(Duration::from_secs(seconds));
                }
                return OperationResult::Retry(JdkWatchError::MetadataFetch(
                    "Too many requests to foojay.io".to_string(),
                ));
            }

            if !response.is_success() {
                let reason = status.canonical_reason().unwrap_or("Unknown error");
                let message = match status.as_u16() {
                    400 => match response
                        .text()
                        .ok()
                        .and_then(|body| serde_json::from_str::<ApiErrorResponse>(&body).ok())
                    {
                        Some(error) => format!("Bad request: {}", error.message),
                        None => format!("HTTP error (400) from foojay.io: {reason}"),
                    },
                    404 => format!(
                        "The requested resource was not found on foojay.io API {API_VERSION}"
                    ),
                    500..=599 => format!("Server error ({}) from foojay.io", status.as_u16()),
                    code => format!("HTTP error ({code}) from foojay.io: {reason}"),
                };
                return OperationResult::Err(JdkWatchError::MetadataFetch(message));
            }

            match response.text() {
                Ok(body) => match parse_result_envelope(&body) {
                    Ok(data) => OperationResult::Ok(data),
                    Err(e) => OperationResult::Err(e),
                },
                Err(e) => OperationResult::Err(JdkWatchError::MetadataFetch(format!(
                    "Failed to read response body: {e}"
                ))),
            }
        });

        result.map_err(|e| e.error)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// API v3.0 wraps every payload in a `result` field.
pub(crate) fn parse_result_envelope<T>(body: &str) -> Result<T>
where
    T: for<'de> serde::Deserialize<'de>,
{
    let json_value: serde_json::Value = serde_json::from_str(body).map_err(|e| {
        debug!("Failed to parse as JSON: {e}");
        JdkWatchError::InvalidMetadata(format!("Invalid JSON response from foojay.io: {e}"))
    })?;

    let Some(result) = json_value.get("result") else {
        return Err(JdkWatchError::InvalidMetadata(format!(
            "Invalid API {API_VERSION} response: missing 'result' field"
        )));
    };

    serde_json::from_value::<T>(result.clone()).map_err(|e| {
        debug!("Failed to parse 'result' field: {e}");
        trace!("Result field: {result:?}");
        JdkWatchError::InvalidMetadata(format!("Failed to parse API {API_VERSION} response: {e}"))
    })
}

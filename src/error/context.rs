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

use crate::error::JdkWatchError;
use std::fmt;

pub struct ErrorContext<'a> {
    pub error: &'a JdkWatchError,
    pub suggestion: Option<String>,
    pub details: Option<String>,
}

impl<'a> ErrorContext<'a> {
    pub fn new(error: &'a JdkWatchError) -> Self {
        let (suggestion, details) = match error {
            JdkWatchError::InvalidVersionFormat(msg) => {
                let suggestion = Some(
                    "Java versions look like '17', '17.0.2', '21-ea+35' or '1.8.0_312'."
                        .to_string(),
                );
                let details = Some(format!("Invalid format: {msg}"));
                (suggestion, details)
            }
            JdkWatchError::ConfigError(msg) | JdkWatchError::InvalidConfig(msg) => {
                let suggestion = Some(
                    "Check config.toml in your jdkwatch home (JDKWATCH_HOME, default \
                     ~/.jdkwatch) or run 'jdkwatch config-init' to write a fresh one."
                        .to_string(),
                );
                let details = Some(msg.clone());
                (suggestion, details)
            }
            JdkWatchError::Config(config_err) => {
                let suggestion = Some(
                    "Fix the offending key in config.toml or the matching JDKWATCH_* \
                     environment variable."
                        .to_string(),
                );
                let details = Some(format!("Configuration error: {config_err}"));
                (suggestion, details)
            }
            JdkWatchError::MetadataFetch(msg) | JdkWatchError::NetworkError(msg) => {
                let suggestion = Some(
                    "Check your internet connection and proxy settings. The foojay API can be \
                     overridden with JDKWATCH_API__BASE_URL."
                        .to_string(),
                );
                let details = Some(format!("Network issue: {msg}"));
                (suggestion, details)
            }
            JdkWatchError::Http(http_err) => {
                let error_string = http_err.to_string();
                let suggestion = if error_string.contains("timeout")
                    || error_string.contains("Timeout")
                {
                    Some(
                        "Try increasing the API timeout (JDKWATCH_API__TIMEOUT_SECS)."
                            .to_string(),
                    )
                } else if error_string.contains("429") {
                    Some(
                        "API rate limit exceeded. Please wait a few minutes and try again."
                            .to_string(),
                    )
                } else {
                    Some("Check your internet connection and try again.".to_string())
                };
                let details = Some(format!("HTTP error: {http_err}"));
                (suggestion, details)
            }
            JdkWatchError::Io(io_err) => {
                let suggestion = match io_err.kind() {
                    std::io::ErrorKind::PermissionDenied => {
                        Some("Check file permissions of the search paths.".to_string())
                    }
                    std::io::ErrorKind::NotFound => Some(
                        "Ensure the file or directory exists and the path is correct.".to_string(),
                    ),
                    _ => None,
                };
                let details = Some(format!("I/O error: {io_err}"));
                (suggestion, details)
            }
            _ => (None, None),
        };

        ErrorContext {
            error,
            suggestion,
            details,
        }
    }
}

impl<'a> fmt::Display for ErrorContext<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error: {}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\n\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\n\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

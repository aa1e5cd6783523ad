//! Queue endpoint parsing and region derivation.

use crate::error::EndpointError;

/// A resolved queue endpoint: the queue URL and the region it belongs to.
///
/// Queue URLs embed the region in the host, e.g.
/// `https://sqs.eu-west-2.amazonaws.com/111111111111/jobs`. Parsing
/// happens before any network client is constructed, so a malformed
/// address never reaches the transport layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEndpoint {
    url: String,
    region: String,
}

impl QueueEndpoint {
    /// Parse a queue URL and derive its region.
    ///
    /// The URL must have at least 3 slash-separated segments (scheme
    /// prefix, empty segment, host) and the host must consist of exactly
    /// 4 dot-separated labels (`service.region.provider.tld`); the region
    /// is the second label.
    pub fn parse(url: &str) -> Result<Self, EndpointError> {
        let segments: Vec<&str> = url.split('/').collect();
        if segments.len() < 3 {
            return Err(EndpointError::TooFewSegments {
                url: url.to_string(),
            });
        }

        let labels: Vec<&str> = segments[2].split('.').collect();
        if labels.len() != 4 {
            return Err(EndpointError::MalformedHost {
                url: url.to_string(),
            });
        }

        Ok(Self {
            url: url.to_string(),
            region: labels[1].to_string(),
        })
    }

    /// Get the full queue URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Get the region token derived from the host
    pub fn region(&self) -> &str {
        &self.region
    }
}

impl std::fmt::Display for QueueEndpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.url)
    }
}

#[cfg(test)]
#[path = "endpoint_tests.rs"]
mod tests;

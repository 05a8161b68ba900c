//! # Skywatch environment state
//!
//! This module defines [`SkywatchEnv`], the shared environment object used across the
//! `skywatch` library. It owns the persistent **HTTP client** every network-facing
//! component goes through (star catalog download, Wikipedia summaries, IP geolocation).
//!
//! The object is cheaply cloneable and passed to the providers that need external data.
//! All requests run with a bounded global timeout; callers receive a `Result` and decide
//! how to degrade.
use std::fmt;
use std::time::Duration;

use ureq::Agent;

use crate::skywatch_errors::SkywatchError;

/// Timeout applied to every outbound request.
const HTTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct SkywatchEnv {
    pub http_client: Agent,
}

impl fmt::Debug for SkywatchEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SkywatchEnv").finish_non_exhaustive()
    }
}

impl Default for SkywatchEnv {
    fn default() -> Self {
        Self::new()
    }
}

impl SkywatchEnv {
    /// Create a new environment with a default HTTP agent.
    ///
    /// Return
    /// ------
    /// * A new [`SkywatchEnv`] whose agent carries a global request timeout.
    pub fn new() -> Self {
        let agent = ureq::builder().timeout(HTTP_TIMEOUT).build();

        SkywatchEnv { http_client: agent }
    }

    /// Perform a GET request and return the response body as text.
    ///
    /// Arguments
    /// ---------
    /// * `url`: the resource to fetch.
    ///
    /// Return
    /// ------
    /// * The body as a `String`, or a [`SkywatchError`] on transport or read failure.
    pub(crate) fn get_from_url(&self, url: &str) -> Result<String, SkywatchError> {
        let body = self.http_client.get(url).call()?.into_string()?;
        Ok(body)
    }
}

//! # Ephemeris access
//!
//! The visibility engine consumes ephemerides through the
//! [`EphemerisProvider`] trait: a provider knows a set of canonical body keys
//! (`"mars"`, `"jupiter barycenter"`, …) and can answer, for any of them, the
//! apparent topocentric direction seen from a site at an instant. Keeping the
//! seam at this level lets tests swap in fixture providers and keeps every
//! frame conversion on the provider side of the boundary.
//!
//! [`KeplerianEphemeris`] is the built-in, offline implementation.

pub mod keplerian;
pub mod moon;

pub use keplerian::KeplerianEphemeris;

use hifitime::Epoch;

use crate::observers::Observer;
use crate::skywatch_errors::SkywatchError;
use crate::topocentric::Horizontal;

/// Source of apparent topocentric body positions.
pub trait EphemerisProvider {
    /// Canonical keys of every body this provider can observe.
    ///
    /// The observer's own body (`"earth"`) is included for completeness;
    /// callers iterating the sky are expected to skip it.
    fn bodies(&self) -> Vec<String>;

    /// Apparent topocentric direction of `body` from `observer` at `epoch`.
    ///
    /// Errors
    /// ------
    /// * [`SkywatchError::UnknownBody`] when the key has no ephemeris data.
    fn observe(
        &self,
        body: &str,
        observer: &Observer,
        epoch: &Epoch,
    ) -> Result<Horizontal, SkywatchError>;
}

/// Derive the display name of a canonical body key.
///
/// Strips the `" barycenter"` suffix used by planetary-system keys and
/// capitalizes the first letter: `"jupiter barycenter"` → `"Jupiter"`.
pub fn display_name(body_key: &str) -> String {
    let stripped = body_key.strip_suffix(" barycenter").unwrap_or(body_key);
    let mut chars = stripped.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

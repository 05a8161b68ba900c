//! # Name and description resolution
//!
//! The external encyclopedia indexes astronomical objects under
//! inconsistent article titles: `"Mars"` is a disambiguation page while
//! `"Mars (planet)"` is the planet, most stars live under their proper name,
//! some under `"<name> (star)"`, and faint ones only under their catalog
//! designation. This module carries the best-effort machinery around that:
//!
//! - the [`NameResolver`] trait (total: failures degrade to `None`);
//! - the [`WikipediaResolver`] REST implementation;
//! - the common-name extraction heuristic used when the catalog has no
//!   proper name;
//! - the per-kind candidate chain ([`lookup_candidates`]) and its walker
//!   ([`resolve_description`]).

use once_cell::sync::Lazy;
use regex::Regex;
use smallvec::SmallVec;

use crate::env_state::SkywatchEnv;
use crate::visibility::{ObjectKind, VisibleObject};

/// Candidate article titles tried for one object, in order.
pub type LookupCandidates = SmallVec<[String; 5]>;

/// Source of human-readable object descriptions.
///
/// Implementations must be total: any failure (network, not-found, parse)
/// returns `None` and is never surfaced as an error.
pub trait NameResolver {
    fn describe(&self, designation: &str) -> Option<String>;
}

/// Resolver that knows nothing. Used when the caller opts out of name
/// resolution entirely.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullResolver;

impl NameResolver for NullResolver {
    fn describe(&self, _designation: &str) -> Option<String> {
        None
    }
}

/// Wikipedia REST summary client.
#[derive(Debug, Clone)]
pub struct WikipediaResolver {
    env: SkywatchEnv,
}

impl WikipediaResolver {
    pub fn new(env: SkywatchEnv) -> Self {
        WikipediaResolver { env }
    }

    fn summary(&self, title: &str) -> Option<serde_json::Value> {
        let url = format!(
            "https://en.wikipedia.org/api/rest_v1/page/summary/{}",
            title.replace(' ', "%20")
        );
        let body = self.env.get_from_url(&url).ok()?;
        serde_json::from_str(&body).ok()
    }

    /// Thumbnail image URL for an article title, when one exists.
    pub fn thumbnail_url(&self, title: &str) -> Option<String> {
        let summary = self.summary(title)?;
        summary
            .get("thumbnail")?
            .get("source")?
            .as_str()
            .map(str::to_string)
    }
}

impl NameResolver for WikipediaResolver {
    fn describe(&self, designation: &str) -> Option<String> {
        let summary = self.summary(designation)?;
        summary.get("extract")?.as_str().map(str::to_string)
    }
}

static LEADING_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([A-Z][A-Za-z0-9\-]*)[ ,]").expect("leading-name regex"));

static SECONDARY_DESIGNATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"designation ([A-Za-z0-9+\-]+)").expect("designation regex"));

/// Extract a candidate common name from a description: the first capitalized
/// word, terminated by a space or comma.
///
/// `"Sirius is the brightest star..."` → `Some("Sirius")`;
/// `"a faint star in Orion"` → `None`.
pub fn extract_common_name(description: &str) -> Option<String> {
    LEADING_NAME
        .captures(description)
        .map(|caps| caps[1].to_string())
}

/// Mine a secondary catalog designation out of a description text, via the
/// pattern `designation <TOKEN>`.
pub fn extract_designation(description: &str) -> Option<String> {
    SECONDARY_DESIGNATION
        .captures(description)
        .map(|caps| caps[1].to_string())
}

/// Recover the resolved common name from a star's composite display name.
///
/// The engine encodes star names as
/// `"Common Name: {name} | Name: HIP {id}"` with an explicit `None` marker;
/// this parses the name back out.
pub fn star_common_name(object: &VisibleObject) -> Option<&str> {
    let rest = object.name.strip_prefix("Common Name: ")?;
    let (common, _) = rest.split_once(" | ")?;
    match common {
        "None" => None,
        name => Some(name),
    }
}

/// Candidate lookup keys for one visible object, in priority order.
///
/// The chain exists because the encyclopedia's article titles are
/// inconsistent; it is a disambiguation strategy, not a guarantee.
pub fn lookup_candidates(object: &VisibleObject) -> LookupCandidates {
    let mut candidates = LookupCandidates::new();

    match &object.kind {
        ObjectKind::Star => {
            candidates.push(object.raw_identifier.clone());
            if let Some(common) = star_common_name(object) {
                candidates.push(format!("{common} (star)"));
                candidates.push(format!("{common} (astronomy)"));
                candidates.push(common.to_string());
            }
            candidates.push(object.raw_identifier.clone());
        }
        ObjectKind::Planet => {
            candidates.push(format!("{} (planet)", object.name));
        }
        ObjectKind::Sun | ObjectKind::Moon | ObjectKind::Other(_) => {
            candidates.push(object.name.clone());
        }
    }

    candidates
}

/// Walk the candidate chain against a resolver, stopping at first success.
///
/// Arguments
/// ---------
/// * `resolver`: the description source.
/// * `object`: the visible object to document.
/// * `hint`: description text already in hand (for stars, typically the
///   text obtained while resolving the common name), mined for a secondary
///   designation when every candidate misses.
///
/// Return
/// ------
/// * The first description found, or `None`. Never an error.
pub fn resolve_description<R: NameResolver>(
    resolver: &R,
    object: &VisibleObject,
    hint: Option<&str>,
) -> Option<String> {
    for candidate in lookup_candidates(object) {
        if let Some(description) = resolver.describe(&candidate) {
            return Some(description);
        }
    }

    // Last resort: retry with a secondary designation mined from a
    // previously resolved text.
    let token = hint.and_then(extract_designation)?;
    resolver.describe(&token)
}

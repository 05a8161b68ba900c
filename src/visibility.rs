//! # Visibility engine
//!
//! The core of the crate: given an observer and an instant, query every
//! ephemeris body and every bright catalog star, keep what stands above the
//! local horizon, resolve star names, and return one deduplicated list
//! ranked by altitude.
//!
//! The engine owns no I/O of its own — ephemerides, the star catalog and
//! name resolution are injected through their traits, which is what makes
//! the whole computation testable against fixtures.
//!
//! ## Failure policy
//!
//! * A single body the provider cannot observe is skipped (logged, never
//!   fatal).
//! * A star-name lookup that fails degrades that one star to its catalog
//!   designation.
//! * A star-catalog load failure is the only error that can escape, and
//!   only under the default [`CatalogPolicy::Propagate`]; with
//!   [`CatalogPolicy::DegradeToBodies`] the report carries the reason
//!   instead.
//! * An empty sky is an empty report, not an error.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;

use ahash::RandomState;
use hifitime::Epoch;
use itertools::Itertools;

use crate::catalog::{StarCatalogProvider, StarRecord};
use crate::constants::{Degree, DEFAULT_MAGNITUDE_LIMIT, PLANET_NAMES};
use crate::ephemeris::{display_name, EphemerisProvider};
use crate::observers::Observer;
use crate::resolver::{extract_common_name, NameResolver, NullResolver};
use crate::skywatch_errors::SkywatchError;
use crate::time::resolve_instant;
use crate::topocentric::{star_horizontal, Horizontal};

/// Category of a visible object.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Planet,
    Moon,
    Sun,
    Star,
    /// Anything else the ephemeris provider knows (asteroids, probes…),
    /// labeled by its title-cased display name.
    Other(String),
}

impl ObjectKind {
    /// Derive the kind from a body's display name.
    pub fn from_display_name(name: &str) -> ObjectKind {
        if PLANET_NAMES.contains(&name) {
            return ObjectKind::Planet;
        }
        match name {
            "Moon" => ObjectKind::Moon,
            "Sun" => ObjectKind::Sun,
            other => ObjectKind::Other(title_case(other)),
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ObjectKind::Planet => write!(f, "Planet"),
            ObjectKind::Moon => write!(f, "Moon"),
            ObjectKind::Sun => write!(f, "Sun"),
            ObjectKind::Star => write!(f, "Star"),
            ObjectKind::Other(label) => write!(f, "{label}"),
        }
    }
}

fn title_case(text: &str) -> String {
    text.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .join(" ")
}

/// One object above the horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleObject {
    /// Display name. For stars this is the composite
    /// `"Common Name: {name-or-None} | Name: HIP {id}"`.
    pub name: String,

    /// Object category.
    pub kind: ObjectKind,

    /// Altitude above the horizon in degrees; strictly positive.
    pub altitude: Degree,

    /// Azimuth from north in degrees, in [0, 360).
    pub azimuth: Degree,

    /// The provider's canonical key (bodies) or catalog designation (stars),
    /// for downstream lookups.
    pub raw_identifier: String,

    /// Constellation code, stars only.
    pub constellation: Option<String>,
}

/// Result of one visibility computation.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SkyReport {
    /// Visible objects, altitude-descending, deduplicated on `(name, kind)`.
    pub objects: Vec<VisibleObject>,

    /// Set when the star catalog could not be loaded and the engine ran in
    /// bodies-only mode; carries the failure reason.
    pub star_catalog_degraded: Option<String>,
}

impl SkyReport {
    /// True when nothing is above the horizon. A valid outcome, not an error.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

/// What to do when the star catalog cannot be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogPolicy {
    /// Fail the whole computation with [`SkywatchError::CatalogUnavailable`].
    #[default]
    Propagate,
    /// Return planet/Sun/Moon results alone, flagging the degradation in
    /// [`SkyReport::star_catalog_degraded`].
    DegradeToBodies,
}

/// The visibility engine, generic over its three providers.
#[derive(Debug, Clone)]
pub struct VisibilityEngine<E, C, R = NullResolver> {
    ephemeris: E,
    catalog: C,
    resolver: R,
    magnitude_limit: f64,
    catalog_policy: CatalogPolicy,
}

impl<E, C> VisibilityEngine<E, C, NullResolver>
where
    E: EphemerisProvider,
    C: StarCatalogProvider,
{
    /// Build an engine without a name resolver; stars without a catalog
    /// proper name stay unnamed.
    pub fn new(ephemeris: E, catalog: C) -> Self {
        VisibilityEngine {
            ephemeris,
            catalog,
            resolver: NullResolver,
            magnitude_limit: DEFAULT_MAGNITUDE_LIMIT,
            catalog_policy: CatalogPolicy::default(),
        }
    }
}

impl<E, C, R> VisibilityEngine<E, C, R>
where
    E: EphemerisProvider,
    C: StarCatalogProvider,
    R: NameResolver,
{
    /// Attach a name resolver for the star-naming fallback chain.
    pub fn with_resolver<R2: NameResolver>(self, resolver: R2) -> VisibilityEngine<E, C, R2> {
        VisibilityEngine {
            ephemeris: self.ephemeris,
            catalog: self.catalog,
            resolver,
            magnitude_limit: self.magnitude_limit,
            catalog_policy: self.catalog_policy,
        }
    }

    /// Override the star brightness threshold (magnitude strictly below the
    /// limit passes).
    pub fn with_magnitude_limit(mut self, limit: f64) -> Self {
        self.magnitude_limit = limit;
        self
    }

    /// Switch the catalog-failure policy to bodies-only degradation.
    pub fn degraded_stars(mut self) -> Self {
        self.catalog_policy = CatalogPolicy::DegradeToBodies;
        self
    }

    /// Compute everything above the horizon for `observer` at `instant`
    /// (`None` = now).
    ///
    /// Return
    /// ------
    /// * A [`SkyReport`] sorted by altitude descending, deduplicated on
    ///   `(name, kind)` keeping the highest entry, azimuths normalized to
    ///   [0, 360).
    ///
    /// Errors
    /// ------
    /// * [`SkywatchError::CatalogUnavailable`] under
    ///   [`CatalogPolicy::Propagate`] when the star catalog cannot load.
    pub fn compute_visible(
        &self,
        observer: &Observer,
        instant: Option<Epoch>,
    ) -> Result<SkyReport, SkywatchError> {
        let epoch = resolve_instant(instant);

        let mut visible: Vec<VisibleObject> = Vec::new();

        // Solar-system bodies. A failed lookup skips that body only.
        for body in self.ephemeris.bodies() {
            if body == "earth" {
                continue;
            }
            match self.ephemeris.observe(&body, observer, &epoch) {
                Ok(horizontal) if horizontal.altitude > 0.0 => {
                    let name = display_name(&body);
                    let kind = ObjectKind::from_display_name(&name);
                    visible.push(VisibleObject {
                        name,
                        kind,
                        altitude: horizontal.altitude,
                        // Providers are expected to normalize, but the
                        // output invariant does not depend on them.
                        azimuth: horizontal.azimuth.rem_euclid(360.0),
                        raw_identifier: body,
                        constellation: None,
                    });
                }
                Ok(_) => {}
                Err(err) => {
                    log::warn!("skipping body {body}: {err}");
                }
            }
        }

        // Bright stars.
        let mut degraded = None;
        match self.catalog.load() {
            Ok(records) => {
                for record in records
                    .iter()
                    .filter(|r| r.magnitude < self.magnitude_limit)
                {
                    let horizontal =
                        star_horizontal(observer, &epoch, record.ra_rad(), record.dec_rad());
                    if horizontal.altitude > 0.0 {
                        visible.push(self.star_object(record, horizontal));
                    }
                }
            }
            Err(err) => {
                let err = err.into_catalog_unavailable();
                match self.catalog_policy {
                    CatalogPolicy::Propagate => return Err(err),
                    CatalogPolicy::DegradeToBodies => {
                        let reason = err.to_string();
                        log::warn!("returning bodies only: {reason}");
                        degraded = Some(reason);
                    }
                }
            }
        }

        // Rank by altitude (stable sort keeps encounter order on ties), then
        // keep the first occurrence of every (name, kind) key.
        let state = RandomState::new();
        let mut seen: HashSet<(String, ObjectKind), RandomState> = HashSet::with_hasher(state);
        let objects = visible
            .into_iter()
            .sorted_by(|a, b| b.altitude.partial_cmp(&a.altitude).unwrap_or(Ordering::Equal))
            .filter(|object| seen.insert((object.name.clone(), object.kind.clone())))
            .collect();

        Ok(SkyReport {
            objects,
            star_catalog_degraded: degraded,
        })
    }

    /// Build the output record for one visible star, resolving its common
    /// name: catalog proper name first, then the resolver heuristic, then
    /// the explicit `None` marker.
    fn star_object(&self, record: &StarRecord, horizontal: Horizontal) -> VisibleObject {
        let designation = record.designation();

        let common_name = record
            .proper
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_string)
            .or_else(|| {
                self.resolver
                    .describe(&designation)
                    .as_deref()
                    .and_then(extract_common_name)
            });

        let name = match &common_name {
            Some(common) => format!("Common Name: {common} | Name: {designation}"),
            None => format!("Common Name: None | Name: {designation}"),
        };

        VisibleObject {
            name,
            kind: ObjectKind::Star,
            altitude: horizontal.altitude,
            azimuth: horizontal.azimuth,
            raw_identifier: designation,
            constellation: record.constellation.clone(),
        }
    }
}

#[cfg(test)]
mod visibility_test {
    use super::*;

    #[test]
    fn test_kind_from_display_name() {
        assert_eq!(ObjectKind::from_display_name("Mars"), ObjectKind::Planet);
        assert_eq!(ObjectKind::from_display_name("Pluto"), ObjectKind::Planet);
        assert_eq!(ObjectKind::from_display_name("Moon"), ObjectKind::Moon);
        assert_eq!(ObjectKind::from_display_name("Sun"), ObjectKind::Sun);
        assert_eq!(
            ObjectKind::from_display_name("Ceres"),
            ObjectKind::Other("Ceres".to_string())
        );
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("ceres"), "Ceres");
        assert_eq!(title_case("halley comet"), "Halley Comet");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(ObjectKind::Planet.to_string(), "Planet");
        assert_eq!(ObjectKind::Other("Asteroid".into()).to_string(), "Asteroid");
    }
}

//! Fixture providers for engine integration tests.
#![allow(dead_code)]

use std::collections::HashMap;

use hifitime::Epoch;

use skywatch::catalog::{StarCatalogProvider, StarRecord};
use skywatch::constants::{HipId, RADH};
use skywatch::ephemeris::EphemerisProvider;
use skywatch::observers::Observer;
use skywatch::resolver::NameResolver;
use skywatch::skywatch_errors::SkywatchError;
use skywatch::time::gast;
use skywatch::topocentric::Horizontal;

/// Ephemeris fixture: scripted alt/az per body key, in insertion order.
#[derive(Debug, Clone, Default)]
pub struct FixtureEphemeris {
    entries: Vec<(String, Option<Horizontal>)>,
}

impl FixtureEphemeris {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a body at a fixed altitude/azimuth.
    pub fn with_body(mut self, key: &str, altitude: f64, azimuth: f64) -> Self {
        self.entries
            .push((key.to_string(), Some(Horizontal { altitude, azimuth })));
        self
    }

    /// Script a body whose lookup fails with `UnknownBody`.
    pub fn with_failing_body(mut self, key: &str) -> Self {
        self.entries.push((key.to_string(), None));
        self
    }
}

impl EphemerisProvider for FixtureEphemeris {
    fn bodies(&self) -> Vec<String> {
        self.entries.iter().map(|(key, _)| key.clone()).collect()
    }

    fn observe(
        &self,
        body: &str,
        _observer: &Observer,
        _epoch: &Epoch,
    ) -> Result<Horizontal, SkywatchError> {
        match self.entries.iter().find(|(key, _)| key == body) {
            Some((_, Some(horizontal))) => Ok(*horizontal),
            _ => Err(SkywatchError::UnknownBody(body.to_string())),
        }
    }
}

/// Catalog fixture: a fixed record list, or a scripted load failure.
#[derive(Debug, Clone, Default)]
pub struct FixtureCatalog {
    records: Vec<StarRecord>,
    failure: Option<String>,
}

impl FixtureCatalog {
    pub fn new(records: Vec<StarRecord>) -> Self {
        FixtureCatalog {
            records,
            failure: None,
        }
    }

    pub fn failing(reason: &str) -> Self {
        FixtureCatalog {
            records: Vec::new(),
            failure: Some(reason.to_string()),
        }
    }
}

impl StarCatalogProvider for FixtureCatalog {
    fn load(&self) -> Result<&[StarRecord], SkywatchError> {
        match &self.failure {
            Some(reason) => Err(SkywatchError::CatalogUnavailable(reason.clone())),
            None => Ok(&self.records),
        }
    }
}

/// Resolver fixture: scripted designation → description.
#[derive(Debug, Clone, Default)]
pub struct FixtureResolver {
    descriptions: HashMap<String, String>,
}

impl FixtureResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, designation: &str, text: &str) -> Self {
        self.descriptions
            .insert(designation.to_string(), text.to_string());
        self
    }
}

impl NameResolver for FixtureResolver {
    fn describe(&self, designation: &str) -> Option<String> {
        self.descriptions.get(designation).cloned()
    }
}

/// A catalog record with the given brightness and coordinates.
pub fn star(hip: HipId, ra_hours: f64, dec_deg: f64, magnitude: f64, proper: Option<&str>) -> StarRecord {
    StarRecord {
        hip,
        ra_hours,
        dec_deg,
        magnitude,
        proper: proper.map(str::to_string),
        constellation: None,
    }
}

/// The fixed epoch every scenario runs at.
pub fn fixture_epoch() -> Epoch {
    Epoch::from_mjd_utc(60000.0)
}

/// Right ascension (hours) that culminates at the zenith of a (0°, 0°)
/// observer at the fixture epoch.
pub fn zenith_ra_hours(epoch: &Epoch) -> f64 {
    gast(epoch) / RADH
}

/// The (0°, 0°) observer used across scenarios.
pub fn equator_observer() -> Observer {
    Observer::new(0.0, 0.0, 0.0, None).unwrap()
}

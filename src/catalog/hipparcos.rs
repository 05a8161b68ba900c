//! Hipparcos main catalog provider.
//!
//! Downloads `hip_main.dat` from CDS once into the platform cache directory,
//! parses the pipe-delimited record lines, and enriches the bright entries
//! with IAU proper names and constellation codes from an embedded table.
//! The parsed catalog is kept process-wide in a [`OnceCell`]; it depends on
//! neither observer nor instant.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use directories::BaseDirs;
use once_cell::sync::OnceCell;

use crate::constants::HipId;
use crate::env_state::SkywatchEnv;
use crate::skywatch_errors::SkywatchError;

use super::{StarCatalogProvider, StarRecord};

/// CDS mirror of the Hipparcos main catalog.
const HIPPARCOS_URL: &str = "https://cdsarc.u-strasbg.fr/ftp/cats/I/239/hip_main.dat";

/// IAU proper names and constellation codes for the bright stars the default
/// magnitude threshold can retain. Sorted by HIP number for binary search.
#[rustfmt::skip]
const BRIGHT_STAR_NAMES: [(HipId, &str, &str); 51] = [
    (7588, "Achernar", "Eri"),
    (9884, "Hamal", "Ari"),
    (11767, "Polaris", "UMi"),
    (15863, "Mirfak", "Per"),
    (21421, "Aldebaran", "Tau"),
    (24436, "Rigel", "Ori"),
    (24608, "Capella", "Aur"),
    (25336, "Bellatrix", "Ori"),
    (25428, "Elnath", "Tau"),
    (26311, "Alnilam", "Ori"),
    (26727, "Alnitak", "Ori"),
    (27989, "Betelgeuse", "Ori"),
    (28360, "Menkalinan", "Aur"),
    (30324, "Mirzam", "CMa"),
    (30438, "Canopus", "Car"),
    (31681, "Alhena", "Gem"),
    (32349, "Sirius", "CMa"),
    (33579, "Adhara", "CMa"),
    (34444, "Wezen", "CMa"),
    (36850, "Castor", "Gem"),
    (37279, "Procyon", "CMi"),
    (37826, "Pollux", "Gem"),
    (41037, "Avior", "Car"),
    (42913, "Alsephina", "Vel"),
    (45238, "Miaplacidus", "Car"),
    (46390, "Alphard", "Hya"),
    (49669, "Regulus", "Leo"),
    (54061, "Dubhe", "UMa"),
    (57632, "Denebola", "Leo"),
    (60718, "Acrux", "Cru"),
    (61084, "Gacrux", "Cru"),
    (62434, "Mimosa", "Cru"),
    (62956, "Alioth", "UMa"),
    (65474, "Spica", "Vir"),
    (67301, "Alkaid", "UMa"),
    (68702, "Hadar", "Cen"),
    (69673, "Arcturus", "Boo"),
    (71683, "Rigil Kentaurus", "Cen"),
    (80763, "Antares", "Sco"),
    (82273, "Atria", "TrA"),
    (85927, "Shaula", "Sco"),
    (86228, "Sargas", "Sco"),
    (90185, "Kaus Australis", "Sgr"),
    (91262, "Vega", "Lyr"),
    (97649, "Altair", "Aql"),
    (100751, "Peacock", "Pav"),
    (102098, "Deneb", "Cyg"),
    (109268, "Alnair", "Gru"),
    (113368, "Fomalhaut", "PsA"),
    (113881, "Scheat", "Peg"),
    (113963, "Markab", "Peg"),
];

fn bright_star_name(hip: HipId) -> Option<(&'static str, &'static str)> {
    BRIGHT_STAR_NAMES
        .binary_search_by_key(&hip, |entry| entry.0)
        .ok()
        .map(|idx| (BRIGHT_STAR_NAMES[idx].1, BRIGHT_STAR_NAMES[idx].2))
}

/// Star catalog provider backed by the Hipparcos main catalog.
#[derive(Debug)]
pub struct HipparcosCatalog {
    env: SkywatchEnv,
    url: String,
    cache: OnceCell<Vec<StarRecord>>,
}

impl HipparcosCatalog {
    pub fn new(env: SkywatchEnv) -> Self {
        Self::with_url(env, HIPPARCOS_URL)
    }

    /// Point the provider at an alternative catalog location (mirror or
    /// pre-downloaded copy served over HTTP).
    pub fn with_url(env: SkywatchEnv, url: impl Into<String>) -> Self {
        HipparcosCatalog {
            env,
            url: url.into(),
            cache: OnceCell::new(),
        }
    }

    /// Local cache file for the raw catalog.
    fn cache_path() -> Result<Utf8PathBuf, SkywatchError> {
        let base = BaseDirs::new().ok_or_else(|| {
            SkywatchError::CacheDirUnavailable("no home directory available".into())
        })?;
        let cache_dir = Utf8Path::from_path(base.cache_dir()).ok_or_else(|| {
            SkywatchError::CacheDirUnavailable("cache path is not valid UTF-8".into())
        })?;
        Ok(cache_dir.join("skywatch").join("hip_main.dat"))
    }

    /// Raw catalog text: the local cache when present, otherwise a download
    /// that is written through to the cache for next time.
    fn fetch_raw(&self) -> Result<String, SkywatchError> {
        let path = Self::cache_path()?;
        if path.exists() {
            log::debug!("hipparcos: using cached catalog at {path}");
            return Ok(fs::read_to_string(&path)?);
        }

        log::debug!("hipparcos: downloading catalog from {}", self.url);
        let body = self.env.get_from_url(&self.url)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &body)?;

        Ok(body)
    }

    /// Parse one pipe-delimited `hip_main.dat` record.
    ///
    /// Fields of interest: 1 = HIP number, 5 = Vmag, 8 = RA in degrees,
    /// 9 = Dec in degrees. Entries with blank astrometry or photometry are
    /// dropped.
    fn parse_line(line: &str) -> Option<StarRecord> {
        let fields: Vec<&str> = line.split('|').collect();
        if fields.len() < 10 {
            return None;
        }

        let hip: HipId = fields[1].trim().parse().ok()?;
        let magnitude: f64 = fields[5].trim().parse().ok()?;
        let ra_deg: f64 = fields[8].trim().parse().ok()?;
        let dec_deg: f64 = fields[9].trim().parse().ok()?;

        let (proper, constellation) = match bright_star_name(hip) {
            Some((name, con)) => (Some(name.to_string()), Some(con.to_string())),
            None => (None, None),
        };

        Some(StarRecord {
            hip,
            ra_hours: ra_deg / 15.0,
            dec_deg,
            magnitude,
            proper,
            constellation,
        })
    }

    fn parse(text: &str) -> Vec<StarRecord> {
        text.lines().filter_map(Self::parse_line).collect()
    }
}

impl StarCatalogProvider for HipparcosCatalog {
    fn load(&self) -> Result<&[StarRecord], SkywatchError> {
        self.cache
            .get_or_try_init(|| {
                let raw = self.fetch_raw().map_err(|e| e.into_catalog_unavailable())?;
                let records = Self::parse(&raw);
                if records.is_empty() {
                    return Err(SkywatchError::CatalogUnavailable(
                        "no parseable records in catalog file".into(),
                    ));
                }
                Ok(records)
            })
            .map(Vec::as_slice)
    }
}

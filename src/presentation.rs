//! Console presentation and enrichment glue.
//!
//! Renders a [`SkyReport`] the way the original console tool printed it,
//! persists a plain-text listing, and fetches per-object descriptions and
//! image URLs through the name-resolution fallback chain. Nothing here is
//! part of the engine contract; it all sits downstream of the ordered
//! report.

use std::fmt;
use std::fs;

use camino::Utf8Path;

use crate::resolver::{resolve_description, WikipediaResolver};
use crate::skywatch_errors::SkywatchError;
use crate::visibility::{SkyReport, VisibleObject};

/// Borrowing display adaptor for one visible object.
///
/// Renders the original listing block:
///
/// ```text
/// Name: Mars
///   Type: Planet
///   Altitude: 45.12°
///   Azimuth: 180.00°
/// ```
pub struct ObjectDisplay<'a>(pub &'a VisibleObject);

impl fmt::Display for ObjectDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let object = self.0;
        writeln!(f, "Name: {}", object.name)?;
        writeln!(f, "  Type: {}", object.kind)?;
        writeln!(f, "  Altitude: {:.2}°", object.altitude)?;
        write!(f, "  Azimuth: {:.2}°", object.azimuth)?;
        if let Some(constellation) = &object.constellation {
            if !constellation.is_empty() {
                write!(f, "\n  Constellation: {constellation}")?;
            }
        }
        Ok(())
    }
}

/// Borrowing display adaptor for a whole report.
pub struct ReportDisplay<'a>(pub &'a SkyReport);

impl fmt::Display for ReportDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(reason) = &self.0.star_catalog_degraded {
            writeln!(f, "(star catalog unavailable, showing bodies only: {reason})")?;
        }
        if self.0.is_empty() {
            return write!(f, "No objects are currently visible from your location.");
        }
        for object in &self.0.objects {
            writeln!(f, "{}", ObjectDisplay(object))?;
            writeln!(f, "{}", "-".repeat(40))?;
        }
        Ok(())
    }
}

/// Persist a report as a plain-text listing.
pub fn save_listing(report: &SkyReport, path: &Utf8Path) -> Result<(), SkywatchError> {
    fs::write(path, format!("{}\n", ReportDisplay(report)))?;
    Ok(())
}

/// Description and image URL for one object, resolved through the
/// fallback chain. Both are best-effort.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enrichment {
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// Fetch the description and thumbnail for one visible object.
///
/// The image is looked up under the same candidate titles as the
/// description; the first title that yields a description is preferred for
/// the thumbnail as well.
pub fn enrich(resolver: &WikipediaResolver, object: &VisibleObject) -> Enrichment {
    let description = resolve_description(resolver, object, None);

    let image_url = crate::resolver::lookup_candidates(object)
        .iter()
        .find_map(|candidate| resolver.thumbnail_url(candidate));

    Enrichment {
        description,
        image_url,
    }
}

//! # Skywatch: environment, default providers, and the wired engine
//!
//! This module defines the [`Skywatch`] struct, the central façade that wires
//! together:
//!
//! 1. **Environment state** ([`SkywatchEnv`](crate::env_state::SkywatchEnv)) — the shared HTTP client.
//! 2. **Ephemeris access** — the offline [`KeplerianEphemeris`] provider.
//! 3. **Star catalog** — a [`HipparcosCatalog`] whose parsed records are
//!    cached process-wide after the first load.
//! 4. **Name resolution** — a [`WikipediaResolver`] for common names,
//!    descriptions and image URLs.
//!
//! The design emphasizes *lazy initialization* and *idempotent caching*: the
//! catalog is fetched and parsed on first use and reused by every later
//! computation, while the engine itself is cheap to construct per call.
//!
//! ## Typical usage
//!
//! ```rust,no_run
//! use skywatch::skywatch::Skywatch;
//!
//! let sky = Skywatch::new();
//! let report = sky.whats_up(28.61, 77.23, None)?;
//! for object in &report.objects {
//!     println!("{} at {:.2}°", object.name, object.altitude);
//! }
//! # Ok::<(), skywatch::skywatch_errors::SkywatchError>(())
//! ```

use hifitime::Epoch;

use crate::catalog::HipparcosCatalog;
use crate::constants::Degree;
use crate::env_state::SkywatchEnv;
use crate::ephemeris::KeplerianEphemeris;
use crate::observers::Observer;
use crate::resolver::WikipediaResolver;
use crate::skywatch_errors::SkywatchError;
use crate::visibility::{SkyReport, VisibilityEngine};

#[derive(Debug)]
pub struct Skywatch {
    env: SkywatchEnv,
    ephemeris: KeplerianEphemeris,
    catalog: HipparcosCatalog,
    resolver: WikipediaResolver,
}

impl Default for Skywatch {
    fn default() -> Self {
        Self::new()
    }
}

impl Skywatch {
    /// Construct the default wiring: analytic ephemeris, Hipparcos catalog,
    /// Wikipedia name resolver, all sharing one HTTP agent.
    pub fn new() -> Self {
        let env = SkywatchEnv::new();
        Skywatch {
            ephemeris: KeplerianEphemeris::new(),
            catalog: HipparcosCatalog::new(env.clone()),
            resolver: WikipediaResolver::new(env.clone()),
            env,
        }
    }

    /// Shared environment (HTTP client).
    pub fn env(&self) -> &SkywatchEnv {
        &self.env
    }

    /// The name/description resolver, for per-object enrichment.
    pub fn resolver(&self) -> &WikipediaResolver {
        &self.resolver
    }

    /// A visibility engine over the default providers.
    ///
    /// The catalog is borrowed so its parsed records survive across engine
    /// instances; everything else is cheap to copy.
    pub fn engine(
        &self,
    ) -> VisibilityEngine<KeplerianEphemeris, &HipparcosCatalog, WikipediaResolver> {
        VisibilityEngine::new(self.ephemeris, &self.catalog).with_resolver(self.resolver.clone())
    }

    /// One-call convenience: everything above the horizon at a site.
    ///
    /// Arguments
    /// ---------
    /// * `latitude`: geodetic latitude in degrees.
    /// * `longitude`: geodetic longitude in degrees, east positive.
    /// * `instant`: the observation time, or `None` for now.
    ///
    /// Return
    /// ------
    /// * The ranked [`SkyReport`], or the error the engine propagated.
    pub fn whats_up(
        &self,
        latitude: Degree,
        longitude: Degree,
        instant: Option<Epoch>,
    ) -> Result<SkyReport, SkywatchError> {
        let observer = Observer::new(latitude, longitude, 0.0, None)?;
        self.engine().compute_visible(&observer, instant)
    }
}

//! Synthetic input for the ratings engine.
//!
//! Generates rider activity histories, planned routes and race result sheets
//! from a seed, for manual verification and property tests.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let dataset = Dataset::generate(&GenerateConfig {
//!     rider_count: 50,
//!     skill_distribution: SkillDistribution::power_law(),
//!     ..Default::default()
//! });
//! let ratings = RatingEngine::default().rate_riders(&dataset.activity_batches());
//! ```

pub mod config;
pub mod dataset;
pub mod generators;
pub mod gpx;
pub mod profiles;
pub mod terrain;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{BoundingBox, GenerateConfig, Region, SkillDistribution};
    pub use crate::dataset::Dataset;
    pub use crate::generators::{
        GeneratedRace, GeneratedRider, GeneratedRoute, RaceGenConfig, RaceGenerator,
        RideGenConfig, RideGenerator, RidePlan, RiderArchetype, RiderGenerator, RouteGenerator,
    };
    pub use crate::gpx::route_gpx;
    pub use crate::profiles::{
        AthleteProfile, CyclistProfile, RunnerProfile, sample_variance, speed_at_grade,
    };
    pub use crate::terrain::ElevationGenerator;
    pub use ratings::{ActivityRecord, RatingEngine};
}

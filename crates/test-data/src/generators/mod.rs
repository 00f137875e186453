//! Entity generators for synthetic ratings input.
//!
//! - [`RideGenerator`]: activity summaries from an athlete profile
//! - [`RiderGenerator`]: a population of riders with activity histories
//! - [`RouteGenerator`]: planned routes over noise terrain
//! - [`RaceGenerator`]: result sheets mixing registered riders and ghosts

pub mod race;
pub mod ride;
pub mod rider;
pub mod route;

pub use race::{GeneratedRace, RaceGenConfig, RaceGenerator};
pub use ride::{RideGenConfig, RideGenerator, RidePlan};
pub use rider::{GeneratedRider, RiderArchetype, RiderGenerator};
pub use route::{GeneratedRoute, RouteGenerator};

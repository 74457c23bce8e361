// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod scoring;

pub use distance::haversine_distance;
pub use filters::items_within_radius;
pub use matcher::{MatchError, Matcher};
pub use scoring::score_pair;

// Model exports
pub mod domain;
pub mod results;

pub use domain::{ConditionBucket, Item, ItemCondition, ScoringWeights, UserTradeStats};
pub use results::{MatchFactor, MatchResult, Reasons};

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// One independent contribution to the match score
///
/// Variant order is evaluation order, which is also the order reasons
/// are rendered in by downstream consumers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchFactor {
    Category,
    Tags,
    Value,
    Location,
    Condition,
    Popularity,
    Age,
    Preference,
}

impl MatchFactor {
    /// Wire name for the factor, as rendered in the reasons map
    pub fn as_str(self) -> &'static str {
        match self {
            MatchFactor::Category => "category",
            MatchFactor::Tags => "tags",
            MatchFactor::Value => "value",
            MatchFactor::Location => "location",
            MatchFactor::Condition => "condition",
            MatchFactor::Popularity => "popularity",
            MatchFactor::Age => "age",
            MatchFactor::Preference => "preference",
        }
    }
}

/// Ordered factor → explanation map
///
/// Preserves insertion order (the scorer's evaluation order) so clients
/// can render reasons in a stable sequence. Factors that contributed
/// nothing perceptible are absent, not present with empty text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reasons {
    entries: Vec<(MatchFactor, String)>,
}

impl Reasons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, factor: MatchFactor, text: impl Into<String>) {
        self.entries.push((factor, text.into()));
    }

    pub fn get(&self, factor: MatchFactor) -> Option<&str> {
        self.entries
            .iter()
            .find(|(f, _)| *f == factor)
            .map(|(_, text)| text.as_str())
    }

    pub fn contains(&self, factor: MatchFactor) -> bool {
        self.entries.iter().any(|(f, _)| *f == factor)
    }

    pub fn iter(&self) -> impl Iterator<Item = (MatchFactor, &str)> {
        self.entries.iter().map(|(f, text)| (*f, text.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for Reasons {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (factor, text) in &self.entries {
            map.serialize_entry(factor.as_str(), text)?;
        }
        map.end()
    }
}

/// One scored candidate, with denormalized display fields
///
/// Display fields are copied from the candidate at scoring time so the
/// mobile client can render a match card without a second lookup.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    #[serde(rename = "matchedItemId")]
    pub matched_item_id: String,
    #[serde(rename = "matchScore")]
    pub match_score: f64,
    #[serde(rename = "distanceKm", skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    #[serde(rename = "itemTitle")]
    pub item_title: Option<String>,
    #[serde(rename = "ownerName")]
    pub owner_name: Option<String>,
    #[serde(rename = "estimatedValue")]
    pub estimated_value: Option<f64>,
    pub reasons: Reasons,
}

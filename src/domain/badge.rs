use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

#[derive(Debug, Clone, PartialEq)]
pub struct Criterion {
    pub name: String,
    pub threshold: f64,
}

impl Criterion {
    pub fn new(name: &str, threshold: f64) -> Self {
        Self {
            name: name.to_string(),
            threshold,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BadgeDefinition {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub description: String,
    /// Declaration order is kept; serialized as a `{name: threshold}` object.
    #[serde(serialize_with = "criteria_as_map")]
    pub criteria: Vec<Criterion>,
}

fn criteria_as_map<S: Serializer>(criteria: &[Criterion], serializer: S) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(criteria.len()))?;
    for c in criteria {
        map.serialize_entry(&c.name, &c.threshold)?;
    }
    map.end()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EarnedBadge {
    #[serde(flatten)]
    pub badge: BadgeDefinition,
    pub confidence_score: f64,
    pub earned_at: DateTime<Utc>,
}

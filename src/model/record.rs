use serde::Deserialize;

use super::interval::TemporalInterval;

// One person record per input line, the shape of the register's JSON export.
#[derive(Debug, Deserialize)]
pub struct PersonRecord {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub events: Vec<LifeEvent>,
    #[serde(default)]
    pub addresses: Vec<AddressTenure>,
    #[serde(default)]
    pub jobs: Vec<OccupationTenure>,
}

#[derive(Debug, Deserialize)]
pub struct LifeEvent {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub date: Option<String>,
    pub place: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddressTenure {
    pub street: String,
    pub from: Option<String>,
    pub to: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct OccupationTenure {
    pub details: String,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// One dated statement about a person: a subject identifier, a human label,
/// and the normalized interval carrying the seven timestamp fields.
#[derive(Debug, PartialEq)]
pub struct TimedStatement {
    pub subject: String,
    pub label: String,
    pub interval: TemporalInterval,
}

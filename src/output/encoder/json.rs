use chrono::NaiveDate;
use serde::Serialize;
use serde_json;

use super::encoder::Encoder;
use crate::error::Result;
use crate::model::TimedStatement;

// One JSON object per statement, absent properties omitted:
// {
//   "subject": "urn:archival:person/42/event/1",
//   "label": "doop (Jan de Vries)",
//   "hasTimeStamp": "1734-06-12",
//   ...
// }
#[derive(Serialize)]
struct SemStatement<'a> {
    subject: String,
    label: &'a str,
    #[serde(rename = "hasTimeStamp", skip_serializing_if = "Option::is_none")]
    timestamp: Option<String>,
    #[serde(rename = "hasBeginTimeStamp", skip_serializing_if = "Option::is_none")]
    begin_timestamp: Option<String>,
    #[serde(rename = "hasEndTimeStamp", skip_serializing_if = "Option::is_none")]
    end_timestamp: Option<String>,
    #[serde(
        rename = "hasEarliestBeginTimeStamp",
        skip_serializing_if = "Option::is_none"
    )]
    earliest_begin: Option<String>,
    #[serde(
        rename = "hasLatestBeginTimeStamp",
        skip_serializing_if = "Option::is_none"
    )]
    latest_begin: Option<String>,
    #[serde(
        rename = "hasEarliestEndTimeStamp",
        skip_serializing_if = "Option::is_none"
    )]
    earliest_end: Option<String>,
    #[serde(
        rename = "hasLatestEndTimeStamp",
        skip_serializing_if = "Option::is_none"
    )]
    latest_end: Option<String>,
}

pub struct SemJsonEncoder {
    base_uri: String,
}

impl SemJsonEncoder {
    pub fn new(base_uri: &str) -> Self {
        Self {
            base_uri: base_uri.to_owned(),
        }
    }
}

impl Encoder for SemJsonEncoder {
    fn encode(&self, statement: &TimedStatement) -> Result<Vec<u8>> {
        let interval = &statement.interval;
        Ok(serde_json::to_vec(&SemStatement {
            subject: format!("{}{}", self.base_uri, statement.subject),
            label: &statement.label,
            timestamp: date_string(interval.timestamp()),
            begin_timestamp: date_string(interval.begin_timestamp()),
            end_timestamp: date_string(interval.end_timestamp()),
            earliest_begin: date_string(interval.earliest_begin()),
            latest_begin: date_string(interval.latest_begin()),
            earliest_end: date_string(interval.earliest_end()),
            latest_end: date_string(interval.latest_end()),
        })
        .map_err(|e| ("JSON serialization failed", e))?)
    }
}

fn date_string(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

use chrono::NaiveDate;

use super::encoder::Encoder;
use crate::error::Result;
use crate::model::{TemporalInterval, TimedStatement};

const SEM: &str = "http://semanticweb.cs.vu.nl/2009/11/sem/";
const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
const XSD_DATE: &str = "http://www.w3.org/2001/XMLSchema#date";

// N-Triples, one triple per line: the statement's label plus one triple per
// present timestamp property.
pub struct TriplesEncoder {
    base_uri: String,
}

impl TriplesEncoder {
    pub fn new(base_uri: &str) -> Self {
        Self {
            base_uri: base_uri.to_owned(),
        }
    }
}

impl Encoder for TriplesEncoder {
    fn encode(&self, statement: &TimedStatement) -> Result<Vec<u8>> {
        let subject = format!("{}{}", self.base_uri, statement.subject);

        let mut lines = vec![format!(
            "<{}> <{}> \"{}\" .",
            subject,
            RDFS_LABEL,
            escape_literal(&statement.label)
        )];

        for (property, date) in timestamp_properties(&statement.interval) {
            lines.push(format!(
                "<{}> <{}{}> \"{}\"^^<{}> .",
                subject,
                SEM,
                property,
                date.format("%Y-%m-%d"),
                XSD_DATE
            ));
        }

        Ok(lines.join("\n").into_bytes())
    }
}

// The fixed one-to-one mapping from interval fields to sem: property names.
fn timestamp_properties(interval: &TemporalInterval) -> Vec<(&'static str, NaiveDate)> {
    let fields = [
        ("hasTimeStamp", interval.timestamp()),
        ("hasBeginTimeStamp", interval.begin_timestamp()),
        ("hasEndTimeStamp", interval.end_timestamp()),
        ("hasEarliestBeginTimeStamp", interval.earliest_begin()),
        ("hasLatestBeginTimeStamp", interval.latest_begin()),
        ("hasEarliestEndTimeStamp", interval.earliest_end()),
        ("hasLatestEndTimeStamp", interval.latest_end()),
    ];

    fields
        .iter()
        .filter_map(|(property, date)| date.map(|date| (*property, date)))
        .collect()
}

fn escape_literal(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

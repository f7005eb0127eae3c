use chrono::NaiveDate;

use crate::error::Result;

// Calendar-day precision. Archival sources never carry a time of day.
pub type DayWindow = (NaiveDate, NaiveDate);

// Far-future year used for the "no bound resolved" anchor pair. Every
// accepted date expression carries an explicit year, so this year can only
// show up in output if something upstream is broken.
pub const SENTINEL_YEAR: i32 = 2100;

/// Per-field anchor pair the caller supplies to complete partial dates:
/// `begin` fills missing components for the lower bound, `end` for the
/// upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Defaults {
    begin: NaiveDate,
    end: NaiveDate,
}

impl Defaults {
    pub fn new(begin: NaiveDate, end: NaiveDate) -> Result<Self> {
        if begin > end {
            return Err("end anchor is before begin anchor".into());
        }
        Ok(Self { begin, end })
    }

    /// The far-future sentinel pair: first and last day of the sentinel year.
    pub fn sentinel() -> Self {
        Self {
            begin: NaiveDate::from_ymd_opt(SENTINEL_YEAR, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(SENTINEL_YEAR, 12, 31).unwrap(),
        }
    }

    #[inline]
    pub fn begin(&self) -> NaiveDate {
        self.begin
    }

    #[inline]
    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// A time interval with an uncertainty envelope: the begin bound is known to
/// fall inside `[earliest_begin, latest_begin]`, the end bound inside
/// `[earliest_end, latest_end]`. The point fields are derived, never stored
/// independently: `begin_timestamp` is present iff the begin window has
/// collapsed to a single day, same for `end_timestamp`, and `timestamp` iff
/// both collapsed onto the same day. A value is built once from its bound
/// windows and read through accessors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TemporalInterval {
    timestamp: Option<NaiveDate>,
    begin_timestamp: Option<NaiveDate>,
    end_timestamp: Option<NaiveDate>,
    earliest_begin: Option<NaiveDate>,
    latest_begin: Option<NaiveDate>,
    earliest_end: Option<NaiveDate>,
    latest_end: Option<NaiveDate>,
}

impl TemporalInterval {
    /// No temporal information at all: every field absent.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_bounds(begin: Option<DayWindow>, end: Option<DayWindow>) -> Self {
        let begin_timestamp = match begin {
            Some((lo, hi)) if lo == hi => Some(lo),
            _ => None,
        };
        let end_timestamp = match end {
            Some((lo, hi)) if lo == hi => Some(lo),
            _ => None,
        };
        let timestamp = match (begin_timestamp, end_timestamp) {
            (Some(b), Some(e)) if b == e => Some(b),
            _ => None,
        };

        Self {
            timestamp,
            begin_timestamp,
            end_timestamp,
            earliest_begin: begin.map(|(lo, _)| lo),
            latest_begin: begin.map(|(_, hi)| hi),
            earliest_end: end.map(|(lo, _)| lo),
            latest_end: end.map(|(_, hi)| hi),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.earliest_begin.is_none() && self.earliest_end.is_none()
    }

    // End bound resolved strictly before the begin bound. Overlapping
    // windows (e.g. both halves of a range naming the same year) are fine.
    pub fn is_inverted(&self) -> bool {
        match (self.earliest_begin, self.latest_end) {
            (Some(begin), Some(end)) => end < begin,
            _ => false,
        }
    }

    #[inline]
    pub fn timestamp(&self) -> Option<NaiveDate> {
        self.timestamp
    }

    #[inline]
    pub fn begin_timestamp(&self) -> Option<NaiveDate> {
        self.begin_timestamp
    }

    #[inline]
    pub fn end_timestamp(&self) -> Option<NaiveDate> {
        self.end_timestamp
    }

    #[inline]
    pub fn earliest_begin(&self) -> Option<NaiveDate> {
        self.earliest_begin
    }

    #[inline]
    pub fn latest_begin(&self) -> Option<NaiveDate> {
        self.latest_begin
    }

    #[inline]
    pub fn earliest_end(&self) -> Option<NaiveDate> {
        self.earliest_end
    }

    #[inline]
    pub fn latest_end(&self) -> Option<NaiveDate> {
        self.latest_end
    }
}

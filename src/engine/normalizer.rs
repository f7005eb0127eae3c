use chrono::Duration;
use tracing::warn;

use crate::error::{Error, Result};
use crate::model::{DayWindow, Defaults, TemporalInterval};
use crate::parser::{classify, Expr};

/// Symmetric uncertainty radius, in days, applied to `ca.` expressions.
pub const DEFAULT_FUZZ_DAYS: i64 = 365;

/// Resolves date expressions against a per-field anchor pair into
/// `TemporalInterval` values. Pure: no shared state, safe to share across
/// threads.
pub struct Normalizer {
    defaults: Defaults,
    fuzz_days: i64,
}

impl Normalizer {
    pub fn new(defaults: Defaults, fuzz_days: i64) -> Result<Self> {
        if fuzz_days <= 0 {
            return Err("fuzz radius must be greater than 0 days".into());
        }
        Ok(Self {
            defaults,
            fuzz_days,
        })
    }

    /// Resolve a single date expression into an interval. An absent or
    /// unknown expression yields the empty interval; a malformed one is an
    /// error for the caller to log and drop, never a reason to abort a
    /// batch.
    pub fn resolve_interval(&self, expr: Option<&str>) -> Result<TemporalInterval> {
        let raw = match expr {
            Some(raw) => raw,
            None => return Ok(TemporalInterval::empty()),
        };

        let interval = match classify(raw)? {
            Expr::Range(lhs, rhs) => {
                let begin = self.resolve_point(lhs, None)?;
                let end = self.resolve_point(rhs, None)?;
                TemporalInterval::from_bounds(begin, end)
            }
            // A single expression contributes the same window to both
            // bounds: the instant is known to fall inside it.
            _ => {
                let window = self.resolve_point(raw, None)?;
                TemporalInterval::from_bounds(window, window)
            }
        };

        if interval.is_inverted() {
            warn!(
                expression = raw,
                "interval resolves its end bound before its begin bound"
            );
        }
        Ok(interval)
    }

    /// Resolve a tenure-style pair of expressions: `from` feeds the begin
    /// bound, `to` the end bound. Either side may be absent or unknown
    /// independently, leaving that bound's fields unset.
    pub fn resolve_span(&self, from: Option<&str>, to: Option<&str>) -> Result<TemporalInterval> {
        let begin = match from {
            Some(raw) => self.resolve_point(raw, None)?,
            None => None,
        };
        let end = match to {
            Some(raw) => self.resolve_point(raw, None)?,
            None => None,
        };

        let interval = TemporalInterval::from_bounds(begin, end);
        if interval.is_inverted() {
            warn!(
                from = from.unwrap_or(""),
                to = to.unwrap_or(""),
                "tenure resolves its end bound before its begin bound"
            );
        }
        Ok(interval)
    }

    // Recursive pair mode: one expression reduced to the window its instant
    // is known to fall in, or None for an unknown expression.
    fn resolve_point(&self, raw: &str, fuzz: Option<i64>) -> Result<Option<DayWindow>> {
        match classify(raw)? {
            Expr::Empty => Ok(None),
            Expr::Range(lhs, rhs) => {
                // A nested range collapses to its outermost bounds; only the
                // widened window travels up to the parent.
                let (lo, _) = self.resolve_point(lhs, None)?.ok_or_else(|| {
                    Error::from(format!("unknown begin inside nested range '{}'", raw))
                })?;
                let (_, hi) = self.resolve_point(rhs, None)?.ok_or_else(|| {
                    Error::from(format!("unknown end inside nested range '{}'", raw))
                })?;
                Ok(Some(fuzzed((lo, hi), fuzz)))
            }
            Expr::Circa(rest) => {
                if fuzz.is_some() {
                    return Err(Error::from(format!("nested circa marker in '{}'", raw)));
                }
                self.resolve_point(rest, Some(self.fuzz_days))
            }
            Expr::Exact(partial) => {
                let lo = partial.fill(self.defaults.begin())?;
                let hi = partial.fill(self.defaults.end())?;
                Ok(Some(fuzzed((lo, hi), fuzz)))
            }
        }
    }
}

fn fuzzed((lo, hi): DayWindow, fuzz: Option<i64>) -> DayWindow {
    match fuzz {
        Some(days) => (lo - Duration::days(days), hi + Duration::days(days)),
        None => (lo, hi),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, NaiveDate};

    use super::*;
    use crate::model::SENTINEL_YEAR;

    fn d(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn normalizer() -> Normalizer {
        Normalizer::new(Defaults::sentinel(), DEFAULT_FUZZ_DAYS).unwrap()
    }

    #[test]
    fn test_exact_day_is_a_point() {
        let interval = normalizer().resolve_interval(Some("1734-06-12")).unwrap();
        let day = d(1734, 6, 12);

        assert_eq!(interval.timestamp(), Some(day));
        assert_eq!(interval.begin_timestamp(), Some(day));
        assert_eq!(interval.end_timestamp(), Some(day));
        assert_eq!(interval.earliest_begin(), Some(day));
        assert_eq!(interval.latest_begin(), Some(day));
        assert_eq!(interval.earliest_end(), Some(day));
        assert_eq!(interval.latest_end(), Some(day));
    }

    #[test]
    fn test_year_precision_is_a_window() {
        let interval = normalizer().resolve_interval(Some("1734")).unwrap();

        assert_eq!(interval.timestamp(), None);
        assert_eq!(interval.begin_timestamp(), None);
        assert_eq!(interval.end_timestamp(), None);
        assert_eq!(interval.earliest_begin(), Some(d(1734, 1, 1)));
        assert_eq!(interval.latest_end(), Some(d(1734, 12, 31)));
    }

    #[test]
    fn test_month_precision_ends_on_the_true_last_day() {
        #[rustfmt::skip]
        let tests = [
            ("1900-02", d(1900, 2, 1), d(1900, 2, 28)),
            ("1904-02", d(1904, 2, 1), d(1904, 2, 29)),
            ("1734-06", d(1734, 6, 1), d(1734, 6, 30)),
            ("1734-06-00", d(1734, 6, 1), d(1734, 6, 30)),
        ];

        for (input, begin, end) in &tests {
            let interval = normalizer().resolve_interval(Some(*input)).unwrap();
            assert_eq!(
                interval.earliest_begin(),
                Some(*begin),
                "begin of {}",
                input
            );
            assert_eq!(interval.latest_end(), Some(*end), "end of {}", input);
            assert_eq!(interval.timestamp(), None, "timestamp of {}", input);
        }
    }

    #[test]
    fn test_explicit_range() {
        let interval = normalizer().resolve_interval(Some("1700/1720")).unwrap();

        assert_eq!(interval.earliest_begin(), Some(d(1700, 1, 1)));
        assert_eq!(interval.latest_begin(), Some(d(1700, 12, 31)));
        assert_eq!(interval.earliest_end(), Some(d(1720, 1, 1)));
        assert_eq!(interval.latest_end(), Some(d(1720, 12, 31)));
        assert_eq!(interval.begin_timestamp(), None);
        assert_eq!(interval.end_timestamp(), None);
        assert_eq!(interval.timestamp(), None);
    }

    #[test]
    fn test_implicit_hyphen_range() {
        let interval = normalizer().resolve_interval(Some("1700-1720")).unwrap();

        assert_eq!(interval.earliest_begin(), Some(d(1700, 1, 1)));
        assert_eq!(interval.latest_end(), Some(d(1720, 12, 31)));
    }

    #[test]
    fn test_range_with_point_end() {
        let interval = normalizer()
            .resolve_interval(Some("1700/1720-06-12"))
            .unwrap();

        assert_eq!(interval.begin_timestamp(), None);
        assert_eq!(interval.end_timestamp(), Some(d(1720, 6, 12)));
        assert_eq!(interval.timestamp(), None);
    }

    #[test]
    fn test_circa_widens_by_the_fuzz_radius() {
        let interval = normalizer().resolve_interval(Some("ca. 1700")).unwrap();

        assert_eq!(
            interval.earliest_begin(),
            Some(d(1700, 1, 1) - Duration::days(DEFAULT_FUZZ_DAYS))
        );
        assert_eq!(
            interval.latest_end(),
            Some(d(1700, 12, 31) + Duration::days(DEFAULT_FUZZ_DAYS))
        );
        assert_eq!(interval.timestamp(), None);
        assert_eq!(interval.begin_timestamp(), None);
        assert_eq!(interval.end_timestamp(), None);
    }

    #[test]
    fn test_circa_on_an_exact_day_is_still_a_window() {
        let normalizer = Normalizer::new(Defaults::sentinel(), 10).unwrap();
        let interval = normalizer.resolve_interval(Some("ca. 1734-06-12")).unwrap();

        assert_eq!(interval.earliest_begin(), Some(d(1734, 6, 2)));
        assert_eq!(interval.latest_end(), Some(d(1734, 6, 22)));
        assert_eq!(interval.timestamp(), None);
    }

    #[test]
    fn test_circa_inside_a_range_fuzzes_only_its_half() {
        let interval = normalizer().resolve_interval(Some("ca. 1700/1720")).unwrap();

        assert_eq!(
            interval.earliest_begin(),
            Some(d(1700, 1, 1) - Duration::days(DEFAULT_FUZZ_DAYS))
        );
        assert_eq!(
            interval.latest_begin(),
            Some(d(1700, 12, 31) + Duration::days(DEFAULT_FUZZ_DAYS))
        );
        assert_eq!(interval.earliest_end(), Some(d(1720, 1, 1)));
        assert_eq!(interval.latest_end(), Some(d(1720, 12, 31)));
    }

    #[test]
    fn test_nested_range_widens_the_parent_bound() {
        let interval = normalizer()
            .resolve_interval(Some("1700-1710/1720"))
            .unwrap();

        assert_eq!(interval.earliest_begin(), Some(d(1700, 1, 1)));
        assert_eq!(interval.latest_begin(), Some(d(1710, 12, 31)));
        assert_eq!(interval.earliest_end(), Some(d(1720, 1, 1)));
        assert_eq!(interval.latest_end(), Some(d(1720, 12, 31)));

        // Same through a second slash.
        let interval = normalizer()
            .resolve_interval(Some("1700/1710/1720"))
            .unwrap();
        assert_eq!(interval.earliest_end(), Some(d(1710, 1, 1)));
        assert_eq!(interval.latest_end(), Some(d(1720, 12, 31)));
    }

    #[test]
    fn test_unknown_expressions_yield_the_empty_interval() {
        for expr in &[None, Some("s.d."), Some("?"), Some("0000"), Some("0000-00-00")] {
            let interval = normalizer().resolve_interval(*expr).unwrap();
            assert!(interval.is_empty(), "while resolving {:?}", expr);
        }
    }

    #[test]
    fn test_malformed_expressions_fail_without_panicking() {
        #[rustfmt::skip]
        let tests = [
            "not-a-date",
            "17th century",
            "1734-13",
            "1734-02-30",
            "ca. ca. 1700",
            "ca. gibberish",
        ];

        for input in &tests {
            let ret = normalizer().resolve_interval(Some(*input));
            assert!(
                ret.is_err(),
                "Expected error, got {:?} while resolving {}",
                ret,
                input
            );
        }
    }

    #[test]
    fn test_point_round_trips_through_its_string_form() {
        let interval = normalizer().resolve_interval(Some("1734-06-12")).unwrap();
        let rendered = interval.timestamp().unwrap().format("%Y-%m-%d").to_string();

        let round_tripped = normalizer().resolve_interval(Some(rendered.as_str())).unwrap();
        assert_eq!(interval, round_tripped);
    }

    #[test]
    fn test_coinciding_anchors_collapse_partial_dates_to_points() {
        let anchor = d(SENTINEL_YEAR, 6, 15);
        let normalizer =
            Normalizer::new(Defaults::new(anchor, anchor).unwrap(), DEFAULT_FUZZ_DAYS).unwrap();

        let interval = normalizer.resolve_interval(Some("1734")).unwrap();
        assert_eq!(interval.timestamp(), Some(d(1734, 6, 15)));
        assert_eq!(interval.begin_timestamp(), Some(d(1734, 6, 15)));
        assert_eq!(interval.end_timestamp(), Some(d(1734, 6, 15)));
    }

    #[test]
    fn test_span_with_both_bounds() {
        let interval = normalizer()
            .resolve_span(Some("1734"), Some("1736"))
            .unwrap();

        assert_eq!(interval.earliest_begin(), Some(d(1734, 1, 1)));
        assert_eq!(interval.latest_begin(), Some(d(1734, 12, 31)));
        assert_eq!(interval.earliest_end(), Some(d(1736, 1, 1)));
        assert_eq!(interval.latest_end(), Some(d(1736, 12, 31)));
    }

    #[test]
    fn test_span_with_one_bound() {
        let interval = normalizer().resolve_span(Some("1734"), None).unwrap();
        assert_eq!(interval.earliest_begin(), Some(d(1734, 1, 1)));
        assert_eq!(interval.earliest_end(), None);
        assert_eq!(interval.latest_end(), None);

        let interval = normalizer().resolve_span(None, Some("1736")).unwrap();
        assert_eq!(interval.earliest_begin(), None);
        assert_eq!(interval.latest_end(), Some(d(1736, 12, 31)));

        let interval = normalizer().resolve_span(None, None).unwrap();
        assert!(interval.is_empty());
    }

    #[test]
    fn test_range_with_unknown_end_leaves_the_bound_unset() {
        let interval = normalizer().resolve_interval(Some("1700/s.d.")).unwrap();

        assert_eq!(interval.earliest_begin(), Some(d(1700, 1, 1)));
        assert_eq!(interval.latest_begin(), Some(d(1700, 12, 31)));
        assert_eq!(interval.earliest_end(), None);
        assert_eq!(interval.latest_end(), None);
    }

    #[test]
    fn test_inverted_range_is_returned_as_parsed() {
        let interval = normalizer().resolve_interval(Some("1720/1700")).unwrap();

        assert!(interval.is_inverted());
        assert_eq!(interval.earliest_begin(), Some(d(1720, 1, 1)));
        assert_eq!(interval.latest_end(), Some(d(1700, 12, 31)));
    }

    #[test]
    fn test_sentinel_year_never_leaks() {
        let exprs = [
            Some("1734"),
            Some("1734-06"),
            Some("ca. 1700"),
            Some("1700/1720"),
            Some("1700/s.d."),
            None,
        ];

        for expr in &exprs {
            let interval = normalizer().resolve_interval(*expr).unwrap();
            let fields = [
                interval.timestamp(),
                interval.begin_timestamp(),
                interval.end_timestamp(),
                interval.earliest_begin(),
                interval.latest_begin(),
                interval.earliest_end(),
                interval.latest_end(),
            ];
            for field in &fields {
                if let Some(date) = field {
                    assert_ne!(
                        date.year(),
                        SENTINEL_YEAR,
                        "sentinel leaked while resolving {:?}",
                        expr
                    );
                }
            }
        }
    }

    #[test]
    fn test_fuzz_radius_must_be_positive() {
        assert!(Normalizer::new(Defaults::sentinel(), 0).is_err());
        assert!(Normalizer::new(Defaults::sentinel(), -5).is_err());
    }
}

use tracing::warn;

use crate::engine::Normalizer;
use crate::model::{PersonRecord, TemporalInterval, TimedStatement};

/// Turns one person record into its dated statements: one per life event,
/// one role per address tenure and per occupation tenure, with a single
/// role counter spanning both. A statement whose date fails to parse keeps
/// its subject and label; the interval stays empty and the failure is
/// logged.
pub struct RecordMapper {
    normalizer: Normalizer,
}

impl RecordMapper {
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    pub fn map(&self, record: &PersonRecord) -> Vec<TimedStatement> {
        let mut statements = Vec::new();

        for (n, event) in record.events.iter().enumerate() {
            let label = match &event.kind {
                Some(kind) => format!("{} ({})", kind, record.name),
                None => record.name.clone(),
            };
            statements.push(TimedStatement {
                subject: format!("person/{}/event/{}", record.id, n + 1),
                label,
                interval: self.interval_or_empty(record.id, event.date.as_deref()),
            });
        }

        let mut role = 0;
        for address in &record.addresses {
            role += 1;
            statements.push(TimedStatement {
                subject: format!("person/{}/role/{}", record.id, role),
                label: address.street.clone(),
                interval: self.span_or_empty(
                    record.id,
                    address.from.as_deref(),
                    address.to.as_deref(),
                ),
            });
        }
        for job in &record.jobs {
            role += 1;
            statements.push(TimedStatement {
                subject: format!("person/{}/role/{}", record.id, role),
                label: job.details.clone(),
                interval: self.span_or_empty(record.id, job.from.as_deref(), job.to.as_deref()),
            });
        }

        statements
    }

    fn interval_or_empty(&self, record: u64, expr: Option<&str>) -> TemporalInterval {
        match self.normalizer.resolve_interval(expr) {
            Ok(interval) => interval,
            Err(err) => {
                warn!(
                    record,
                    date = expr.unwrap_or(""),
                    error = %err,
                    "unparsable date expression, field skipped"
                );
                TemporalInterval::empty()
            }
        }
    }

    fn span_or_empty(&self, record: u64, from: Option<&str>, to: Option<&str>) -> TemporalInterval {
        match self.normalizer.resolve_span(from, to) {
            Ok(interval) => interval,
            Err(err) => {
                warn!(
                    record,
                    from = from.unwrap_or(""),
                    to = to.unwrap_or(""),
                    error = %err,
                    "unparsable tenure dates, field skipped"
                );
                TemporalInterval::empty()
            }
        }
    }
}

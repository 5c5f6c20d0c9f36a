use crate::aggregate::normalize::normalize;
use crate::aggregate::types::{
    AggregateOutcome, DailyRecord, Diagnostic, SunField, WeeklySummary,
};

/// Number of daily slots per reporting week. Windows are positional, keyed
/// off the record index, not calendar-week-aligned.
const WINDOW_LEN: usize = 7;

/// Aggregates an ordered daily sequence into weekly summaries.
///
/// Each consecutive run of 7 input slots forms one window (the final window
/// may be shorter). Absent days are excluded from their window; a window with
/// no present days produces no summary but still occupies its week number, so
/// later weeks keep their positional numbering. A window is emitted only when
/// both sunrise and sunset have at least one valid contributor; otherwise it
/// is dropped whole. Data-quality problems never abort the pass, they are
/// returned as diagnostics.
pub fn aggregate<I>(days: I) -> AggregateOutcome
where
    I: IntoIterator<Item = Option<DailyRecord>>,
{
    let mut acc = WeekAccumulator::new();
    for day in days {
        acc.push(day);
    }
    acc.finish()
}

/// Incremental form of [`aggregate`] for streaming inputs.
///
/// Buffers at most one partial window; a window is finalized once its 7th
/// record arrives or at [`WeekAccumulator::finish`], with the same numbering
/// and drop rules as the batch pass.
#[derive(Debug, Default)]
pub struct WeekAccumulator {
    window: Vec<Option<DailyRecord>>,
    days_seen: usize,
    outcome: AggregateOutcome,
}

impl WeekAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, day: Option<DailyRecord>) {
        self.window.push(day);
        self.days_seen += 1;
        if self.window.len() == WINDOW_LEN {
            self.finalize_window();
        }
    }

    pub fn finish(mut self) -> AggregateOutcome {
        if !self.window.is_empty() {
            self.finalize_window();
        }
        self.outcome
    }

    fn finalize_window(&mut self) {
        // Week number comes from the window's position in the original
        // sequence, so skipped windows leave a gap rather than renumbering.
        let week = ((self.days_seen - self.window.len()) / WINDOW_LEN + 1) as u32;
        let present: Vec<DailyRecord> = self.window.drain(..).flatten().collect();
        if present.is_empty() {
            return;
        }

        let avg_sunrise = self.field_average(week, SunField::Sunrise, &present);
        let avg_sunset = self.field_average(week, SunField::Sunset, &present);

        if let (Some(avg_sunrise), Some(avg_sunset)) = (avg_sunrise, avg_sunset) {
            self.outcome.weeks.push(WeeklySummary {
                week,
                avg_sunrise,
                avg_sunset,
            });
        }
    }

    /// Mean of the valid contributors for one field, as `"HH:MM"`.
    ///
    /// Invalid times are reported and excluded; the divisor is the count of
    /// valid contributors, not the window size. `None` (with an EmptyAverage
    /// diagnostic) when nothing valid remains.
    fn field_average(
        &mut self,
        week: u32,
        field: SunField,
        records: &[DailyRecord],
    ) -> Option<String> {
        let mut total_ms = 0i64;
        let mut count = 0i64;

        for record in records {
            let raw = match field {
                SunField::Sunrise => record.sunrise.as_deref(),
                SunField::Sunset => record.sunset.as_deref(),
            };
            match normalize(raw) {
                Some(t) => {
                    total_ms += t.millis_from_midnight();
                    count += 1;
                }
                None => self.outcome.diagnostics.push(Diagnostic::InvalidTimeFormat {
                    week,
                    field,
                    raw: raw.map(str::to_owned),
                }),
            }
        }

        if count == 0 {
            self.outcome
                .diagnostics
                .push(Diagnostic::EmptyAverage { week, field });
            return None;
        }

        Some(minute_label(total_ms / count))
    }
}

/// Renders a milliseconds-from-midnight mean as `"HH:MM"`, truncating the
/// seconds rather than rounding.
fn minute_label(avg_ms: i64) -> String {
    let secs = avg_ms / 1000;
    format!("{:02}:{:02}", secs / 3600, (secs % 3600) / 60)
}

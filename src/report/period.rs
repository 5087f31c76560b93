use chrono::{
    DateTime, Datelike, Days, Duration, FixedOffset, Months, NaiveDate,
    TimeZone, Utc,
};

use crate::{error::Error, helpers::Period};

const THAI_MONTHS: [&str; 12] = [
    "ม.ค.", "ก.พ.", "มี.ค.", "เม.ย.", "พ.ค.", "มิ.ย.", "ก.ค.", "ส.ค.", "ก.ย.",
    "ต.ค.", "พ.ย.", "ธ.ค.",
];

/// Start dates of every day (or calendar month) touched by `[start, end]`.
/// A reversed range has no periods.
pub fn period_starts(
    start: NaiveDate,
    end: NaiveDate,
    period: Period,
) -> Vec<NaiveDate> {
    if start > end {
        return vec![];
    }

    match period {
        Period::Daily => {
            start.iter_days().take_while(|day| *day <= end).collect()
        },
        Period::Monthly => {
            let mut months = vec![];
            let mut month = start.with_day(1);

            while let Some(current) = month {
                if current > end {
                    break;
                }
                months.push(current);
                month = current.checked_add_months(Months::new(1));
            }

            months
        },
    }
}

/// Inclusive time window of one bucket, in UTC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodWindow {
    pub date: NaiveDate,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl PeriodWindow {
    pub fn new(
        date: NaiveDate,
        period: Period,
        offset: &FixedOffset,
    ) -> Result<PeriodWindow, Error> {
        let (date, next) = match period {
            Period::Daily => (date, date.checked_add_days(Days::new(1))),
            Period::Monthly => {
                let first = date.with_day(1).ok_or_else(|| {
                    Error::DecodeDateTimeError(date.to_string())
                })?;
                (first, first.checked_add_months(Months::new(1)))
            },
        };

        let next = next
            .ok_or_else(|| Error::DecodeDateTimeError(date.to_string()))?;

        let from = local_midnight(date, offset)?;
        let to = local_midnight(next, offset)? - Duration::milliseconds(1);

        Ok(PeriodWindow { date, from, to })
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        self.from <= *timestamp && *timestamp <= self.to
    }

    pub fn label(&self, period: Period) -> String {
        match period {
            Period::Daily => self.date.format("%d").to_string(),
            Period::Monthly => THAI_MONTHS[self.date.month0() as usize].to_owned(),
        }
    }
}

fn local_midnight(
    date: NaiveDate,
    offset: &FixedOffset,
) -> Result<DateTime<Utc>, Error> {
    date.and_hms_opt(0, 0, 0)
        .and_then(|midnight| offset.from_local_datetime(&midnight).single())
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| Error::DecodeDateTimeError(date.to_string()))
}

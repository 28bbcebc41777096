use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Shift 1 runs from 05:00 until 14:30; every other minute of the day
/// belongs to shift 2 of the same calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Shift {
    First,
    Second,
}

impl Shift {
    pub const ALL: [Shift; 2] = [Shift::First, Shift::Second];

    pub fn at(time: NaiveTime) -> Self {
        let minutes = time.hour() * 60 + time.minute();
        if (5 * 60..14 * 60 + 30).contains(&minutes) {
            Shift::First
        } else {
            Shift::Second
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Shift::First => "1SH",
            Shift::Second => "2SH",
        }
    }
}

/// `DD-MM 1SH` / `DD-MM 2SH`: the partition a waste quantity is stored under.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BucketKey(String);

impl BucketKey {
    pub fn new(date: NaiveDate, shift: Shift) -> Self {
        Self(format!("{} {}", date.format("%d-%m"), shift.label()))
    }

    pub fn at(moment: NaiveDateTime) -> Self {
        Self::new(moment.date(), Shift::at(moment.time()))
    }

    pub fn parse(raw: &str) -> Option<Self> {
        let (day_month, shift) = raw.split_once(' ')?;
        if !Shift::ALL.iter().any(|s| s.label() == shift) {
            return None;
        }
        let (day, month) = day_month.split_once('-')?;
        let day: u32 = two_digits(day)?;
        let month: u32 = two_digits(month)?;
        // 2024 is a leap year, so 29-02 stays valid.
        NaiveDate::from_ymd_opt(2024, month, day)?;
        Some(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn two_digits(part: &str) -> Option<u32> {
    if part.len() != 2 || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl fmt::Display for BucketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for BucketKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value).ok_or_else(|| format!("'{value}' is not a bucket key"))
    }
}

impl From<BucketKey> for String {
    fn from(key: BucketKey) -> Self {
        key.0
    }
}

/// Buckets of the last `days` calendar days, newest day first, shift 1
/// before shift 2 within a day.
pub fn recent_buckets(today: NaiveDate, days: u32) -> Vec<BucketKey> {
    (0..days)
        .flat_map(|offset| {
            let date = today - Duration::days(i64::from(offset));
            Shift::ALL.map(|shift| BucketKey::new(date, shift))
        })
        .collect()
}

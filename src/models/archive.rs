//! Archive periods.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A `{year}/{month}` archive page of the source blog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ArchivePeriod {
    pub year: u16,
    pub month: u8,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PeriodParseError {
    #[error("expected YYYY/MM, got '{0}'")]
    Format(String),
    #[error("month must be 1-12, got {0}")]
    Month(u8),
}

impl ArchivePeriod {
    pub fn new(year: u16, month: u8) -> Result<Self, PeriodParseError> {
        if !(1..=12).contains(&month) {
            return Err(PeriodParseError::Month(month));
        }
        Ok(Self { year, month })
    }

    /// Archive page URL under `base_url`, e.g. `https://x.blogspot.com/2025/01/`.
    pub fn archive_url(&self, base_url: &str) -> String {
        format!("{}/{}/", base_url.trim_end_matches('/'), self)
    }

    /// The period immediately before this one.
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year.saturating_sub(1),
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// `count` consecutive periods going back from (and including) `self`,
    /// newest first.
    pub fn descending(self, count: usize) -> Vec<Self> {
        std::iter::successors(Some(self), |p| Some(p.previous()))
            .take(count)
            .collect()
    }
}

impl fmt::Display for ArchivePeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}", self.year, self.month)
    }
}

impl FromStr for ArchivePeriod {
    type Err = PeriodParseError;

    /// Accepts `YYYY/MM` and `YYYY-MM`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().trim_matches('/');
        let (year, month) = s
            .split_once(['/', '-'])
            .ok_or_else(|| PeriodParseError::Format(s.to_string()))?;

        if year.len() != 4 || month.is_empty() || month.len() > 2 {
            return Err(PeriodParseError::Format(s.to_string()));
        }
        let year: u16 = year
            .parse()
            .map_err(|_| PeriodParseError::Format(s.to_string()))?;
        let month: u8 = month
            .parse()
            .map_err(|_| PeriodParseError::Format(s.to_string()))?;

        Self::new(year, month)
    }
}

impl TryFrom<String> for ArchivePeriod {
    type Error = PeriodParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ArchivePeriod> for String {
    fn from(period: ArchivePeriod) -> Self {
        period.to_string()
    }
}

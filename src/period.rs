use std::str::FromStr;

use chrono::{Datelike, Local};

/// Named month-range presets for reporting periods within one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeriodPreset {
    FullYear,
    /// January through the current month (for the current year); for any
    /// other year this is the full year.
    YearToDate,
    Quarter(u32),
    Month(u32),
}

impl FromStr for PeriodPreset {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full_year" => Ok(Self::FullYear),
            "ytd" => Ok(Self::YearToDate),
            "q1" => Ok(Self::Quarter(1)),
            "q2" => Ok(Self::Quarter(2)),
            "q3" => Ok(Self::Quarter(3)),
            "q4" => Ok(Self::Quarter(4)),
            _ => match s.strip_prefix('m').and_then(|m| m.parse::<u32>().ok()) {
                Some(m) if (1..=12).contains(&m) => Ok(Self::Month(m)),
                _ => Err(()),
            },
        }
    }
}

/// An inclusive month range within a single reporting year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthRange {
    pub year: i32,
    pub from_month: u32,
    pub to_month: u32,
}

impl MonthRange {
    pub fn full_year(year: i32) -> Self {
        Self {
            year,
            from_month: 1,
            to_month: 12,
        }
    }

    pub fn from_preset(year: i32, preset: PeriodPreset) -> Self {
        match preset {
            PeriodPreset::FullYear => Self::full_year(year),
            PeriodPreset::YearToDate => {
                let today = Local::now().date_naive();
                if year == today.year() {
                    Self {
                        year,
                        from_month: 1,
                        to_month: today.month(),
                    }
                } else {
                    Self::full_year(year)
                }
            }
            PeriodPreset::Quarter(q) => {
                let from_month = (q - 1) * 3 + 1;
                Self {
                    year,
                    from_month,
                    to_month: from_month + 2,
                }
            }
            PeriodPreset::Month(m) => Self {
                year,
                from_month: m,
                to_month: m,
            },
        }
    }

    pub fn from_months(year: i32, from_month: u32, to_month: u32) -> Result<Self, String> {
        if !(1..=12).contains(&from_month) || !(1..=12).contains(&to_month) {
            return Err(format!(
                "months must be in 1..=12, got {}..{}",
                from_month, to_month
            ));
        }
        if from_month > to_month {
            return Err(format!(
                "empty period: from_month {} is after to_month {}",
                from_month, to_month
            ));
        }
        Ok(Self {
            year,
            from_month,
            to_month,
        })
    }

    /// Same month range, one year earlier.
    pub fn prev(&self) -> Self {
        Self {
            year: self.year - 1,
            ..*self
        }
    }

    /// Same month range, one year later.
    pub fn next(&self) -> Self {
        Self {
            year: self.year + 1,
            ..*self
        }
    }

    /// Human-readable label, e.g. "2025", "Q2 2025", "May 2025" or
    /// "Feb–Sep 2025".
    pub fn label(&self) -> String {
        if self.from_month == 1 && self.to_month == 12 {
            return self.year.to_string();
        }
        if self.from_month == self.to_month {
            return format!("{} {}", month_name(self.from_month), self.year);
        }
        if self.from_month % 3 == 1 && self.to_month == self.from_month + 2 {
            let q = (self.from_month - 1) / 3 + 1;
            return format!("Q{} {}", q, self.year);
        }
        format!(
            "{}–{} {}",
            month_name(self.from_month),
            month_name(self.to_month),
            self.year
        )
    }
}

/// Resolve query parameters into a month range. Explicit `from_month` and
/// `to_month` override the preset; `nav` shifts the result by one year.
pub fn resolve_range(
    year: i32,
    preset: Option<&str>,
    from_month: Option<u32>,
    to_month: Option<u32>,
    nav: Option<&str>,
) -> Result<MonthRange, String> {
    if !(1970..=2100).contains(&year) {
        return Err(format!("year {} out of range", year));
    }

    let base = match (from_month, to_month) {
        (Some(from), Some(to)) => MonthRange::from_months(year, from, to)?,
        (Some(from), None) => MonthRange::from_months(year, from, 12)?,
        (None, Some(to)) => MonthRange::from_months(year, 1, to)?,
        (None, None) => {
            let preset = match preset {
                Some(s) => s
                    .parse::<PeriodPreset>()
                    .map_err(|_| format!("unknown period preset: {}", s))?,
                None => PeriodPreset::FullYear,
            };
            MonthRange::from_preset(year, preset)
        }
    };

    Ok(match nav {
        Some("prev") => base.prev(),
        Some("next") => base.next(),
        _ => base,
    })
}

fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    }
}

use time::{Date, Duration, OffsetDateTime};

/// Reporting window selected by the `periode` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Period {
    Day,
    Week,
    Month,
    Year,
}

impl Period {
    /// Anything unrecognized counts as a month, so a mistyped value never
    /// widens the window to all time.
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("hari") => Self::Day,
            Some("minggu") => Self::Week,
            Some("tahun") => Self::Year,
            _ => Self::Month,
        }
    }

    /// Token echoed back to the page so the active window survives a reload.
    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "hari",
            Self::Week => "minggu",
            Self::Month => "bulan",
            Self::Year => "tahun",
        }
    }

    pub fn resolve(self, today: Date) -> DateFilter {
        match self {
            Self::Day => DateFilter::On(today),
            Self::Week => DateFilter::From(week_start(today)),
            Self::Month => DateFilter::YearMonth(iso_month(today)),
            Self::Year => DateFilter::Year(iso_year(today)),
        }
    }
}

/// Window over `submission_date`. The clause text is fixed here; only the
/// bound value varies per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateFilter {
    On(Date),
    From(Date),
    YearMonth(String),
    Year(String),
}

impl DateFilter {
    pub fn clause(&self) -> &'static str {
        match self {
            Self::On(_) => "submission_date = ?",
            Self::From(_) => "submission_date >= ?",
            Self::YearMonth(_) => "strftime('%Y-%m', submission_date) = ?",
            Self::Year(_) => "strftime('%Y', submission_date) = ?",
        }
    }

    pub fn value(&self) -> String {
        match self {
            Self::On(date) | Self::From(date) => iso_date(*date),
            Self::YearMonth(value) | Self::Year(value) => value.clone(),
        }
    }
}

pub fn today_utc() -> Date {
    OffsetDateTime::now_utc().date()
}

/// Weeks start on Sunday. The window is open-ended upward, matching how the
/// rolling counter reads mid-week.
pub fn week_start(today: Date) -> Date {
    today - Duration::days(i64::from(today.weekday().number_days_from_sunday()))
}

pub fn iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

pub fn iso_month(date: Date) -> String {
    format!("{:04}-{:02}", date.year(), u8::from(date.month()))
}

pub fn iso_year(date: Date) -> String {
    format!("{:04}", date.year())
}

use chrono::{Local, NaiveDate};

/// Format of every date in the ledger.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parses a `YYYY-MM-DD` ledger date.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// A trait for sources of the current calendar date.
///
/// Supply decisions hinge on "today", so tests and replays pin it with
/// [`FixedDate`] while production uses [`LocalCalendar`].
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use dialin::{DateSource, FixedDate};
///
/// let day = NaiveDate::from_ymd_opt(2025, 7, 31).unwrap();
/// assert_eq!(FixedDate(day).today(), day);
/// ```
pub trait DateSource {
    /// Returns the current date.
    fn today(&self) -> NaiveDate;
}

impl<C> DateSource for &C
where
    C: DateSource + ?Sized,
{
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

impl<C> DateSource for Box<C>
where
    C: DateSource + ?Sized,
{
    fn today(&self) -> NaiveDate {
        (**self).today()
    }
}

/// The local wall-clock date.
#[derive(Default, Clone, Copy, Debug)]
pub struct LocalCalendar;

impl DateSource for LocalCalendar {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A date source pinned to one day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedDate(pub NaiveDate);

impl DateSource for FixedDate {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

use chrono::{Datelike, Months, NaiveDate};
use snafu::OptionExt;
use std::fmt;
use std::path::Path;

use crate::error;
use crate::util::Result;

/// The calendar month a raster covers, derived from its `YYYY-MM` or `YYYY-MM-DD` file name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RasterMonth {
    first_day: NaiveDate,
}

impl RasterMonth {
    pub fn new(year: i32, month: u32) -> Result<Self> {
        let first_day =
            NaiveDate::from_ymd_opt(year, month, 1).context(error::InvalidRasterMonth {
                name: format!("{year:04}-{month:02}"),
            })?;

        Ok(Self { first_day })
    }

    /// Parses the month from the leading `YYYY-MM` of a file name.
    ///
    /// # Examples
    ///
    /// ```
    /// use haze_datatypes::primitives::RasterMonth;
    ///
    /// let month = RasterMonth::from_file_name("/data/era5/2024-02-17.grib").unwrap();
    ///
    /// assert_eq!(month.year(), 2024);
    /// assert_eq!(month.month(), 2);
    /// assert_eq!(month.days_in_month(), 29);
    /// ```
    ///
    pub fn from_file_name<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();

        let first_day = name
            .get(..7)
            .and_then(|year_month| {
                NaiveDate::parse_from_str(&format!("{year_month}-01"), "%Y-%m-%d").ok()
            })
            .context(error::InvalidRasterMonth {
                name: path.display().to_string(),
            })?;

        Ok(Self { first_day })
    }

    pub fn year(&self) -> i32 {
        self.first_day.year()
    }

    pub fn month(&self) -> u32 {
        self.first_day.month()
    }

    pub fn days_in_month(&self) -> u32 {
        self.first_day
            .checked_add_months(Months::new(1))
            .map_or(31, |next| (next - self.first_day).num_days() as u32)
    }

    /// The date of `day` within this month, `None` if the month is shorter
    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        self.first_day.with_day(day)
    }
}

impl fmt::Display for RasterMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first_day.format("%Y-%m"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn days_in_month() {
        assert_eq!(RasterMonth::new(2023, 1).unwrap().days_in_month(), 31);
        assert_eq!(RasterMonth::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(RasterMonth::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(RasterMonth::new(1900, 2).unwrap().days_in_month(), 28);
        assert_eq!(RasterMonth::new(2000, 2).unwrap().days_in_month(), 29);
        assert_eq!(RasterMonth::new(2023, 4).unwrap().days_in_month(), 30);
        assert_eq!(RasterMonth::new(2023, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn parses_monthly_and_daily_file_names() {
        let monthly = RasterMonth::from_file_name("2023-11.grib").unwrap();
        let daily = RasterMonth::from_file_name("out/2023-11-30.grib").unwrap();

        assert_eq!(monthly, daily);
        assert_eq!(monthly.to_string(), "2023-11");
    }

    #[test]
    fn rejects_unparsable_names() {
        assert!(RasterMonth::from_file_name("era5.grib").is_err());
        assert!(RasterMonth::from_file_name("2023-13.grib").is_err());
        assert!(RasterMonth::from_file_name("").is_err());
        assert!(RasterMonth::new(2023, 0).is_err());
    }

    #[test]
    fn dates_within_month() {
        let month = RasterMonth::new(2023, 2).unwrap();

        assert_eq!(month.date(28), NaiveDate::from_ymd_opt(2023, 2, 28));
        assert_eq!(month.date(29), None);
        assert_eq!(month.date(0), None);
    }
}

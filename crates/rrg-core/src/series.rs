//! Dated value series for derived metrics.

use chrono::NaiveDate;

/// A date-indexed series of values, typically produced by a metric stage.
///
/// Dates are strictly increasing and `dates.len() == values.len()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DatedSeries<T> {
    dates: Vec<NaiveDate>,
    values: Vec<T>,
}

impl<T> DatedSeries<T> {
    /// Creates a new empty series.
    pub fn new() -> Self {
        Self {
            dates: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Appends a value. The date must be later than the current last date.
    pub fn push(&mut self, date: NaiveDate, value: T) {
        debug_assert!(self.dates.last().is_none_or(|last| *last < date));
        self.dates.push(date);
        self.values.push(value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Gets the value on `date`, or on the latest date before it.
    pub fn as_of(&self, date: NaiveDate) -> Option<(NaiveDate, &T)> {
        let idx = match self.dates.binary_search(&date) {
            Ok(idx) => idx,
            Err(0) => return None,
            Err(insert_at) => insert_at - 1,
        };
        Some((self.dates[idx], &self.values[idx]))
    }

    /// Returns an iterator over (date, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, &T)> {
        self.dates.iter().copied().zip(self.values.iter())
    }
}

impl<T> FromIterator<(NaiveDate, T)> for DatedSeries<T> {
    fn from_iter<I: IntoIterator<Item = (NaiveDate, T)>>(iter: I) -> Self {
        let mut series = Self::new();
        for (date, value) in iter {
            series.push(date, value);
        }
        series
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, d).unwrap()
    }

    fn sample() -> DatedSeries<f64> {
        [(day(1), 1.0), (day(8), 2.0), (day(15), 3.0)]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_as_of_lookup() {
        let series = sample();
        assert_eq!(series.as_of(day(10)), Some((day(8), &2.0)));
        assert_eq!(series.as_of(day(15)), Some((day(15), &3.0)));
        assert_eq!(series.as_of(day(31)), Some((day(15), &3.0)));
        // Before the first date there is nothing to fall back to
        assert!(series.as_of(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()).is_none());
    }
}

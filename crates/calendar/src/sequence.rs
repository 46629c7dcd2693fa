//! Date sequence generation for the no-leap calendar.

use crate::date::NoLeapDate;

/// Generates a contiguous sequence of no-leap dates.
///
/// Starting from `start`, produces exactly `n_days` consecutive dates. Year
/// boundaries are handled automatically (Dec 31 wraps to Jan 1 of the
/// following year).
pub fn noleap_sequence(start: NoLeapDate, n_days: usize) -> Vec<NoLeapDate> {
    std::iter::successors(Some(start), |d| Some(d.next()))
        .take(n_days)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty() {
        let start = NoLeapDate::new(2000, 1, 1).unwrap();
        assert!(noleap_sequence(start, 0).is_empty());
    }

    #[test]
    fn year_transition() {
        let start = NoLeapDate::new(2000, 12, 30).unwrap();
        let dates = noleap_sequence(start, 4);
        assert_eq!(dates.len(), 4);
        assert_eq!(dates[1], NoLeapDate::new(2000, 12, 31).unwrap());
        assert_eq!(dates[2], NoLeapDate::new(2001, 1, 1).unwrap());
        assert_eq!(dates[3], NoLeapDate::new(2001, 1, 2).unwrap());
    }

    #[test]
    fn full_year_ends_dec_31() {
        let start = NoLeapDate::new(2000, 1, 1).unwrap();
        let dates = noleap_sequence(start, 365);
        let last = dates.last().unwrap();
        assert_eq!((last.year(), last.month(), last.day()), (2000, 12, 31));
    }
}

//! Centered, wrap-around day-of-year windows.

use crate::doy::{DAYS_PER_YEAR, Doy};
use crate::error::CalendarError;

/// The set of days within `radius` days of a center day, wrapping across the
/// year boundary.
///
/// Built as `W(d) = { ((d - radius - 1 + k) mod 365) + 1 : k = 0..=2*radius }`
/// with a Euclidean modulo, so the same expression covers windows that spill
/// into the previous year, the next year, or neither.
#[derive(Debug, Clone)]
pub struct DoyWindow {
    center: Doy,
    days: Vec<Doy>,
    mask: [bool; DAYS_PER_YEAR as usize],
}

impl DoyWindow {
    /// Largest radius for which every window member is distinct.
    pub const MAX_RADIUS: u16 = (DAYS_PER_YEAR - 1) / 2;

    /// Builds the window of `2 * radius + 1` days centered on `center`.
    ///
    /// # Errors
    ///
    /// Returns [`CalendarError::InvalidRadius`] if `2 * radius + 1 > 365`.
    pub fn new(center: Doy, radius: u16) -> Result<Self, CalendarError> {
        if radius > Self::MAX_RADIUS {
            return Err(CalendarError::InvalidRadius { radius });
        }
        let d = i64::from(center.get());
        let r = i64::from(radius);
        let mut mask = [false; DAYS_PER_YEAR as usize];
        let days: Vec<Doy> = (0..=2 * r)
            .map(|k| Doy::from_index_wrapping(d - r - 1 + k))
            .inspect(|doy| mask[doy.index()] = true)
            .collect();
        Ok(Self { center, days, mask })
    }

    /// The center day.
    pub fn center(&self) -> Doy {
        self.center
    }

    /// Window members in order from `center - radius` to `center + radius`.
    pub fn days(&self) -> &[Doy] {
        &self.days
    }

    /// Number of days in the window (`2 * radius + 1`).
    pub fn len(&self) -> usize {
        self.days.len()
    }

    /// Always `false`; a window holds at least its center.
    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Whether `doy` falls inside the window.
    pub fn contains(&self, doy: Doy) -> bool {
        self.mask[doy.index()]
    }
}

use hwmid_calendar::{
    CalendarDate, CalendarError, CalendarKind, NoLeapDate, TimeAxis, TimeUnits, noleap_sequence,
};

#[test]
fn gregorian_leap_year_drops_feb_29_only() {
    let axis = TimeAxis::daily(CalendarDate::new(2000, 1, 1), 366, CalendarKind::Gregorian);
    let values: Vec<f64> = (0..366).map(f64::from).collect();
    let series = axis.normalize(&values).unwrap();

    assert_eq!(series.len(), 365);
    assert_eq!(series.start(), NoLeapDate::new(2000, 1, 1).unwrap());
    // Feb 28 is index 58; Feb 29 (value 59) is gone so Mar 1 carries 60.
    assert_eq!(series.values()[58], 58.0);
    assert_eq!(series.values()[59], 60.0);
    assert!(series.values().iter().all(|&v| v != 59.0));
}

#[test]
fn noleap_axis_is_unchanged() {
    let units = TimeUnits::parse("days since 1850-01-01 00:00:00").unwrap();
    let offsets: Vec<f64> = (0..730).map(f64::from).collect();
    let axis = TimeAxis::from_offsets(&offsets, &units, CalendarKind::parse("noleap"));
    let series = axis.normalize(&offsets).unwrap();

    assert_eq!(series.values(), offsets.as_slice());
    let expected = noleap_sequence(NoLeapDate::new(1850, 1, 1).unwrap(), 730);
    let got: Vec<NoLeapDate> = series.iter().map(|(d, _)| d).collect();
    assert_eq!(got, expected);
}

#[test]
fn every_normalized_year_has_365_slots() {
    let axis = TimeAxis::daily(CalendarDate::new(1999, 1, 1), 365 + 366 + 365, CalendarKind::Gregorian);
    let values = vec![1.0; axis.len()];
    let series = axis.normalize(&values).unwrap();
    let lens: Vec<(i32, usize)> = series.year_chunks().map(|(y, c)| (y, c.len())).collect();
    assert_eq!(lens, vec![(1999, 365), (2000, 365), (2001, 365)]);
}

#[test]
fn all_leap_calendar_drops_feb_29_every_year() {
    let axis = TimeAxis::daily(CalendarDate::new(2001, 1, 1), 366 * 2, CalendarKind::AllLeap);
    let series = axis.normalize(&vec![0.0; 366 * 2]).unwrap();
    assert_eq!(series.len(), 730);
}

#[test]
fn gap_in_axis_is_alignment_error() {
    let units = TimeUnits::parse("days since 2000-01-01").unwrap();
    let axis = TimeAxis::from_offsets(&[0.0, 1.0, 3.0], &units, CalendarKind::Gregorian);
    let err = axis.normalize(&[1.0, 2.0, 3.0]).unwrap_err();
    assert!(matches!(err, CalendarError::InputAlignment { position: 2, .. }));
}

#[test]
fn value_length_mismatch_reported() {
    let axis = TimeAxis::daily(CalendarDate::new(2000, 1, 1), 3, CalendarKind::NoLeap);
    assert_eq!(
        axis.normalize(&[1.0, 2.0]).unwrap_err(),
        CalendarError::LengthMismatch { dates: 3, values: 2 }
    );
}

#[test]
fn missing_values_survive_normalization() {
    let axis = TimeAxis::daily(CalendarDate::new(2000, 2, 27), 4, CalendarKind::Gregorian);
    let series = axis.normalize(&[1.0, f64::NAN, 99.0, 4.0]).unwrap();
    assert_eq!(series.len(), 3);
    assert!(series.values()[1].is_nan());
    assert_eq!(series.values()[2], 4.0);
}

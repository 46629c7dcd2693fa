use hwmid_calendar::{Doy, DoyWindow};

fn members(center: u16, radius: u16) -> Vec<u16> {
    DoyWindow::new(Doy::new(center).unwrap(), radius)
        .unwrap()
        .days()
        .iter()
        .map(|d| d.get())
        .collect()
}

#[test]
fn every_window_has_31_distinct_days() {
    for doy in Doy::all() {
        let w = DoyWindow::new(doy, 15).unwrap();
        assert_eq!(w.len(), 31, "doy {}", doy.get());
        let mut sorted: Vec<u16> = w.days().iter().map(|d| d.get()).collect();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 31, "repeated member for doy {}", doy.get());
        assert!(w.contains(doy));
    }
}

#[test]
fn window_of_day_one_reaches_into_december() {
    let mut expected: Vec<u16> = (351..=365).collect();
    expected.extend(1..=16);
    assert_eq!(members(1, 15), expected);
}

#[test]
fn window_of_last_day_wraps_into_january() {
    let mut expected: Vec<u16> = (350..=365).collect();
    expected.extend(1..=15);
    assert_eq!(members(365, 15), expected);
}

#[test]
fn each_day_belongs_to_exactly_2r_plus_1_windows() {
    let windows: Vec<DoyWindow> = Doy::all()
        .map(|d| DoyWindow::new(d, 15).unwrap())
        .collect();
    for doy in Doy::all() {
        let n = windows.iter().filter(|w| w.contains(doy)).count();
        assert_eq!(n, 31, "doy {}", doy.get());
    }
}

#[test]
fn membership_is_symmetric_distance() {
    let w = DoyWindow::new(Doy::new(10).unwrap(), 15).unwrap();
    assert!(w.contains(Doy::new(360).unwrap()));
    assert!(w.contains(Doy::new(25).unwrap()));
    assert!(!w.contains(Doy::new(359).unwrap()));
    assert!(!w.contains(Doy::new(26).unwrap()));
}

#![allow(clippy::unwrap_used)]

use calendrical::{
    CalendarDate, CalendarError, DateInterval, Duration, Interval, Weekday, ordinal,
};

fn date(year: i32, month: u8, day: u8) -> CalendarDate {
    CalendarDate::new(year, month, day).unwrap()
}

#[test]
fn ordinal_round_trip() {
    for n in (-1_000_000..=4_000_000).step_by(997) {
        let (y, m, d) = ordinal::from_ordinal(n);
        assert_eq!(ordinal::to_ordinal(y, m, d), n);
        assert_eq!(CalendarDate::from_ordinal(n).unwrap().as_ordinal().unwrap(), n);
    }
}

#[test]
fn ordinal_matches_proleptic_reference() {
    assert_eq!(ordinal::to_ordinal(1, 1, 1), 1);
    assert_eq!(date(2013, 1, 1).as_ordinal().unwrap(), 734_869);
}

#[test]
fn weekday_and_display() {
    let d = date(2013, 1, 15);
    assert_eq!(d.weekday().unwrap(), Weekday::Tuesday);
    assert_eq!(d.to_string(), "15-Jan-2013");
    assert_eq!(CalendarDate::month_value(2013, 1).unwrap().to_string(), "Jan-2013");
}

#[test]
fn invalid_dates_are_rejected() {
    assert!(matches!(
        CalendarDate::new(2013, 2, 29),
        Err(CalendarError::InvalidDate { .. })
    ));
    assert!(CalendarDate::new(2012, 2, 29).is_ok());
}

#[test]
fn month_length_table() {
    assert_eq!(ordinal::days_in_month(1900, 2), 28);
    assert_eq!(ordinal::days_in_month(2000, 2), 29);
    assert_eq!(ordinal::days_in_month(2004, 2), 29);
}

#[test]
fn duration_normalization() {
    let d = Duration::new(0, 15, 0);
    assert_eq!(d.total_months(), 15);
    assert_eq!((d.year_part(), d.month_part()), (1, 3));
}

#[test]
fn calendar_addition_clamps_and_day_offsets_do_not() {
    assert_eq!(date(2012, 12, 31).apply(Duration::new(0, 2, 0)).unwrap(), date(2013, 2, 28));
    assert_eq!(date(2013, 1, 31).add_days(1).unwrap(), date(2013, 2, 1));
}

#[test]
fn interval_durations() {
    let interval = date(2013, 1, 1).until(date(2015, 4, 16));
    assert_eq!(interval.duration().unwrap(), Duration::new(2, 3, 15));
    assert_eq!(interval.length().unwrap(), 835);
    assert_eq!(interval.duration().unwrap().to_string(), "2 years 3 months 15 days");

    let borrow = date(2013, 2, 28).until(date(2013, 3, 1));
    assert_eq!(borrow.length().unwrap(), 1);
    assert_eq!(borrow.duration().unwrap(), Duration::new(0, 0, 1));
}

#[test]
fn interval_intersection() {
    let march = Interval::bounded(date(2012, 3, 1), date(2012, 3, 31));
    let year = Interval::bounded(date(2012, 1, 1), date(2012, 12, 31));
    assert_eq!(march & year, Some(march));

    let april = Interval::bounded(date(2012, 4, 1), date(2012, 5, 1));
    assert_eq!(march & april, None);
}

#[test]
fn open_interval_containment() {
    let until = DateInterval::new(None, Some(date(2013, 1, 1)));
    assert!(until.contains(Some(&date(2013, 1, 1))));
    assert!(!until.contains(Some(&date(2013, 1, 2))));

    let all = Interval::<CalendarDate>::unbounded();
    assert!(all.contains(None));
    assert!(!all.contains(Some(&date(2013, 1, 1))));
}

#[test]
fn week_around_a_tuesday() {
    let week = date(2013, 1, 15).week().unwrap();
    assert_eq!(week.start(), Some(&date(2013, 1, 13)));
    assert_eq!(week.end(), Some(&date(2013, 1, 19)));
    assert_eq!(week.start().unwrap().weekday().unwrap(), Weekday::Sunday);
    assert_eq!(week.end().unwrap().weekday().unwrap(), Weekday::Saturday);

    for day in 13..=19 {
        assert!(week.contains(Some(&date(2013, 1, day))));
    }
    assert!(!week.contains(Some(&date(2013, 1, 12))));
    assert!(!week.contains(Some(&date(2013, 1, 20))));
}

#[test]
fn dates_and_intervals_are_shareable_across_threads() {
    let interval = std::sync::Arc::new(date(1963, 12, 7).until(date(2013, 1, 1)));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let interval = std::sync::Arc::clone(&interval);
            std::thread::spawn(move || interval.duration().unwrap())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), Duration::new(49, 0, 25));
    }
}

#[test]
fn strftime_style_formatting() {
    let d = date(2013, 3, 1);
    assert_eq!(d.format("%d%m%y:6").unwrap(), "010313");
    assert_eq!(d.format("%Y%m%d:8").unwrap(), "20130301");
}

use crate::calendars::Calendar;
use chrono::NaiveDate;
use proptest::prelude::*;
use std::sync::LazyLock;

static ANBIMA: LazyLock<Calendar> = LazyLock::new(|| Calendar::load("ANBIMA").unwrap());

// keep clear of both ends of the calendar so that rolls and offsets stay in range
fn date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2002i32..2077i32, 1u32..13u32, 1u32..29u32).prop_filter_map(
        "valid date",
        |(year, month, day)| NaiveDate::from_ymd_opt(year, month, day),
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn following_is_a_fixed_point(date in date_strategy()) {
        let cal = &*ANBIMA;
        let next = cal.following(&date).unwrap();
        prop_assert!(cal.isbizday(&next).unwrap());
        prop_assert!(next >= date);
        prop_assert_eq!(cal.following(&next).unwrap(), next);
        prop_assert_eq!(cal.preceding(&next).unwrap(), next);
    }

    #[test]
    fn modified_rolls_stay_in_month(date in date_strategy()) {
        let cal = &*ANBIMA;
        use chrono::Datelike;
        prop_assert_eq!(cal.modified_following(&date).unwrap().month(), date.month());
        prop_assert_eq!(cal.modified_preceding(&date).unwrap().month(), date.month());
    }

    #[test]
    fn offset_is_reversible(date in date_strategy(), n in -40i32..40) {
        let cal = &*ANBIMA;
        let start = cal.following(&date).unwrap();
        let moved = cal.offset(&start, n).unwrap();
        prop_assert_eq!(cal.offset(&moved, -n).unwrap(), start);
        prop_assert_eq!(cal.bizdays(&start, &moved).unwrap(), n);
    }

    #[test]
    fn bizdays_of_same_date_is_zero(date in date_strategy()) {
        prop_assert_eq!(ANBIMA.bizdays(&date, &date).unwrap(), 0);
    }

    #[test]
    fn bizdays_is_antisymmetric(a in date_strategy(), b in date_strategy()) {
        let cal = &*ANBIMA;
        prop_assert_eq!(cal.bizdays(&a, &b).unwrap(), -cal.bizdays(&b, &a).unwrap());
    }

    #[test]
    fn seq_matches_inclusive_count(a in date_strategy(), days in 0i64..400) {
        let mut cal = ANBIMA.clone();
        cal.set_financial(false);
        let b = a + chrono::Days::new(days as u64);
        let dates: Vec<NaiveDate> = cal.seq(&a, &b).unwrap().collect();
        prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(dates.iter().all(|d| cal.isbizday(d).unwrap()));
        prop_assert_eq!(dates.len() as i32, cal.bizdays(&a, &b).unwrap());
    }
}

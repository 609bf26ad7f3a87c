//! Property tests for price table loading

use chrono::{Duration, NaiveDate};
use dasl_trading::loader::{build_history, read_prices, BALANCE};
use proptest::prelude::*;
use std::collections::BTreeSet;

fn table(days: &BTreeSet<u32>, price: f64) -> String {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    let mut out = String::from("\"Date\",\"Price\"\n");
    // newest first, as exported
    for offset in days.iter().rev() {
        let date = start + Duration::days(i64::from(*offset));
        out.push_str(&format!(
            "\"{}\",\"{:.4}\"\n",
            date.format("%b %d, %Y"),
            price + f64::from(*offset) / 10_000.0
        ));
    }
    out
}

proptest! {
    #[test]
    fn history_is_ascending_with_one_balance(
        days in prop::collection::btree_set(0u32..3650, 1..60),
        price in 0.5f64..2.0,
        balance in 1.0f64..1_000_000.0,
    ) {
        let records = read_prices(table(&days, price).as_bytes()).unwrap();
        let history = build_history(&records, balance).unwrap();

        prop_assert_eq!(history.len(), days.len());
        prop_assert!(history
            .events
            .windows(2)
            .all(|w| w[0].time_stamp < w[1].time_stamp));

        let balances: Vec<usize> = history
            .events
            .iter()
            .enumerate()
            .filter(|(_, s)| s.values.iter().any(|v| v.name == BALANCE))
            .map(|(i, _)| i)
            .collect();
        prop_assert_eq!(balances, vec![0]);
        prop_assert_eq!(history.events[0].values[1].central(), Some(balance));
    }

    #[test]
    fn garbage_dates_are_rejected(text in "[a-z]{3,10}") {
        let table = format!("Date,Price\n{},1.25\n", text);
        let records = read_prices(table.as_bytes()).unwrap();
        prop_assert!(build_history(&records, 10_000.0).is_err());
    }
}

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::models::{Finance, FinanceDayTotal};

/// Date-keyed values driving the calendar cells: completion ratios for tasks,
/// summed amounts for finances. Always rebuilt from a full response.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DailyAggregate(BTreeMap<NaiveDate, f64>);

impl DailyAggregate {
    pub fn get(&self, date: NaiveDate) -> f64 {
        self.0.get(&date).copied().unwrap_or(0.0)
    }

    pub fn total(&self) -> f64 {
        self.0.values().sum()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sums values landing on the same day.
    pub fn sum_by_day(values: impl IntoIterator<Item = (NaiveDate, f64)>) -> Self {
        let mut map = BTreeMap::new();
        for (date, value) in values {
            *map.entry(date).or_insert(0.0) += value;
        }
        DailyAggregate(map)
    }

    pub fn from_day_totals(rows: &[FinanceDayTotal]) -> Self {
        Self::sum_by_day(rows.iter().map(|row| (row.date, row.total)))
    }

    /// Entries whose `created_at` is not a date are skipped.
    pub fn from_finances(entries: &[Finance]) -> Self {
        Self::sum_by_day(
            entries
                .iter()
                .filter_map(|entry| entry.created_date().map(|date| (date, entry.value))),
        )
    }

    /// Validates the `{ "YYYY-MM-DD": ratio }` progress map.
    pub fn from_progress(raw: HashMap<String, f64>) -> Result<Self, String> {
        let mut map = BTreeMap::new();
        for (key, ratio) in raw {
            let date = NaiveDate::parse_from_str(&key, "%Y-%m-%d")
                .map_err(|_| format!("progress key {:?} is not a date", key))?;
            if !(0.0..=1.0).contains(&ratio) {
                return Err(format!("progress for {} out of range: {}", key, ratio));
            }
            map.insert(date, ratio);
        }
        Ok(DailyAggregate(map))
    }
}

const INCOMPLETE_RGB: [f64; 3] = [255.0, 167.0, 38.0];
const COMPLETE_RGB: [f64; 3] = [102.0, 187.0, 106.0];

/// Orange at 0, green at 1, linear in between.
pub fn progress_color(ratio: f64) -> (u8, u8, u8) {
    let ratio = ratio.clamp(0.0, 1.0);
    let channel = |i: usize| {
        (INCOMPLETE_RGB[i] + (COMPLETE_RGB[i] - INCOMPLETE_RGB[i]) * ratio).round() as u8
    };
    (channel(0), channel(1), channel(2))
}

pub fn progress_css(ratio: f64) -> String {
    let (r, g, b) = progress_color(ratio);
    format!("rgb({},{},{})", r, g, b)
}

pub fn percent(ratio: f64) -> i64 {
    (ratio.clamp(0.0, 1.0) * 100.0).round() as i64
}

pub fn format_money(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn same_day_entries_are_summed() {
        let entries: Vec<Finance> = serde_json::from_str(
            r#"[
                {"id":1,"description":"Coffee","value":10,"tags":"","created_at":"2024-05-01"},
                {"id":2,"description":"Snack","value":5,"tags":"","created_at":"2024-05-01"}
            ]"#,
        )
        .unwrap();

        let aggregate = DailyAggregate::from_finances(&entries);
        assert_eq!(format_money(aggregate.get(d(2024, 5, 1))), "15.00");
        assert_eq!(aggregate.total(), 15.0);
    }

    #[test]
    fn day_totals_fold_into_map_and_total() {
        let rows: Vec<FinanceDayTotal> = serde_json::from_str(
            r#"[
                {"created_at__date":"2024-05-01","total":"15.00"},
                {"created_at__date":"2024-05-03","total":"4.50"}
            ]"#,
        )
        .unwrap();

        let aggregate = DailyAggregate::from_day_totals(&rows);
        assert_eq!(aggregate.get(d(2024, 5, 3)), 4.5);
        assert_eq!(aggregate.get(d(2024, 5, 2)), 0.0);
        assert_eq!(format_money(aggregate.total()), "19.50");
    }

    #[test]
    fn progress_map_is_validated() {
        let mut raw = HashMap::new();
        raw.insert("2024-05-01".to_string(), 0.5);
        assert_eq!(
            DailyAggregate::from_progress(raw).unwrap().get(d(2024, 5, 1)),
            0.5
        );

        let mut bad_key = HashMap::new();
        bad_key.insert("yesterday".to_string(), 0.5);
        assert!(DailyAggregate::from_progress(bad_key).is_err());

        let mut bad_ratio = HashMap::new();
        bad_ratio.insert("2024-05-01".to_string(), 1.5);
        assert!(DailyAggregate::from_progress(bad_ratio).is_err());
    }

    #[test]
    fn color_runs_from_orange_to_green() {
        assert_eq!(progress_color(0.0), (255, 167, 38));
        assert_eq!(progress_color(1.0), (102, 187, 106));
        assert_eq!(progress_color(0.5), (179, 177, 72));
        assert_eq!(progress_css(2.0), "rgb(102,187,106)");
    }

    #[test]
    fn percent_rounds() {
        assert_eq!(percent(0.666), 67);
        assert_eq!(percent(0.0), 0);
    }
}

use chrono::{Datelike, Duration, Months, NaiveDate};

/// Calendar granularity shared by the task and finance panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Day,
    Week,
    Month,
}

impl View {
    pub const ALL: [View; 3] = [View::Day, View::Week, View::Month];

    pub fn as_param(self) -> &'static str {
        match self {
            View::Day => "day",
            View::Week => "week",
            View::Month => "month",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Day => "Daily",
            View::Week => "Weekly",
            View::Month => "Monthly",
        }
    }

    /// The `date` sent to list endpoints: month views are anchored on the
    /// first of the month.
    pub fn anchor(self, date: NaiveDate) -> NaiveDate {
        match self {
            View::Month => month_start(date),
            View::Day | View::Week => date,
        }
    }

    /// Moves `date` one period forward or back.
    pub fn step(self, date: NaiveDate, forward: bool) -> NaiveDate {
        match (self, forward) {
            (View::Day, true) => date + Duration::days(1),
            (View::Day, false) => date - Duration::days(1),
            (View::Week, true) => date + Duration::days(7),
            (View::Week, false) => date - Duration::days(7),
            (View::Month, true) => date
                .checked_add_months(Months::new(1))
                .unwrap_or(date),
            (View::Month, false) => date
                .checked_sub_months(Months::new(1))
                .unwrap_or(date),
        }
    }
}

/// Span a finance total is computed over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Span {
    Week,
    Month,
}

impl Span {
    pub fn range(self, date: NaiveDate) -> (NaiveDate, NaiveDate) {
        match self {
            Span::Week => (week_start(date), week_end(date)),
            Span::Month => (month_start(date), month_end(date)),
        }
    }
}

pub fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_add_months(Months::new(1))
        .map(|next| next - Duration::days(1))
        .unwrap_or(date)
}

/// Weeks run Sunday to Saturday.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

pub fn week_end(date: NaiveDate) -> NaiveDate {
    week_start(date) + Duration::days(6)
}

pub fn month_days(date: NaiveDate) -> Vec<NaiveDate> {
    let end = month_end(date);
    month_start(date)
        .iter_days()
        .take_while(|day| *day <= end)
        .collect()
}

pub fn week_days(date: NaiveDate) -> Vec<NaiveDate> {
    week_start(date).iter_days().take(7).collect()
}

pub fn days_for(view: View, date: NaiveDate) -> Vec<NaiveDate> {
    match view {
        View::Day => vec![date],
        View::Week => week_days(date),
        View::Month => month_days(date),
    }
}

/// First days of the last `count` months ending with `today`'s, oldest first.
pub fn recent_months(today: NaiveDate, count: u32) -> Vec<NaiveDate> {
    let current = month_start(today);
    (0..count)
        .rev()
        .filter_map(|back| current.checked_sub_months(Months::new(back)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn month_bounds_handle_leap_february() {
        assert_eq!(month_start(d(2024, 2, 17)), d(2024, 2, 1));
        assert_eq!(month_end(d(2024, 2, 17)), d(2024, 2, 29));
        assert_eq!(month_end(d(2023, 12, 5)), d(2023, 12, 31));
        assert_eq!(month_days(d(2024, 2, 3)).len(), 29);
    }

    #[test]
    fn weeks_start_on_sunday() {
        // 2024-05-01 is a Wednesday.
        assert_eq!(week_start(d(2024, 5, 1)), d(2024, 4, 28));
        assert_eq!(week_end(d(2024, 5, 1)), d(2024, 5, 4));
        assert_eq!(week_start(d(2024, 4, 28)), d(2024, 4, 28));

        let days = week_days(d(2024, 5, 1));
        assert_eq!(days.first(), Some(&d(2024, 4, 28)));
        assert_eq!(days.last(), Some(&d(2024, 5, 4)));
    }

    #[test]
    fn month_view_anchors_on_first_day() {
        assert_eq!(View::Month.anchor(d(2024, 5, 20)), d(2024, 5, 1));
        assert_eq!(View::Week.anchor(d(2024, 5, 20)), d(2024, 5, 20));
    }

    #[test]
    fn stepping_a_month_clamps_day() {
        assert_eq!(View::Month.step(d(2024, 1, 31), true), d(2024, 2, 29));
        assert_eq!(View::Month.step(d(2024, 3, 31), false), d(2024, 2, 29));
        assert_eq!(View::Week.step(d(2024, 5, 1), false), d(2024, 4, 24));
    }

    #[test]
    fn recent_months_are_oldest_first() {
        let months = recent_months(d(2024, 3, 15), 3);
        assert_eq!(months, vec![d(2024, 1, 1), d(2024, 2, 1), d(2024, 3, 1)]);
        assert_eq!(recent_months(d(2024, 3, 15), 24).len(), 24);
    }

    #[test]
    fn span_ranges() {
        assert_eq!(
            Span::Week.range(d(2024, 5, 1)),
            (d(2024, 4, 28), d(2024, 5, 4))
        );
        assert_eq!(
            Span::Month.range(d(2024, 5, 1)),
            (d(2024, 5, 1), d(2024, 5, 31))
        );
    }
}

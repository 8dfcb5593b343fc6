//! Read hooks feeding the calendars. Each re-fetches when its reference date
//! or refresh counter changes, blanks its value on failure, and ignores
//! responses that a newer request has superseded.

use std::future::Future;

use chrono::NaiveDate;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::aggregate::DailyAggregate;
use crate::api::{finances, tasks};
use crate::client::ApiClient;
use crate::config::AppConfig;
use crate::error::ApiError;
use crate::guard::{RequestGuard, Ticket};
use crate::period::{month_end, month_start, Span};

/// Awaits `fetch` and publishes through `set` only if `ticket` is still the
/// newest. Failures publish the empty value.
pub async fn load_latest<T, F>(ticket: Ticket, what: &'static str, fetch: F, set: impl FnOnce(T)) -> bool
where
    T: Default,
    F: Future<Output = Result<T, ApiError>>,
{
    let value = match fetch.await {
        Ok(value) => value,
        Err(err) => {
            log::warn!("loading {} failed: {}", what, err);
            T::default()
        }
    };
    ticket.apply(value, set)
}

#[hook]
pub fn use_api_client() -> ApiClient {
    use_context::<ApiClient>().unwrap_or_else(|| ApiClient::browser(AppConfig::from_env()))
}

#[hook]
pub fn use_request_guard() -> RequestGuard {
    (*use_memo(|_| RequestGuard::new(), ())).clone()
}

#[hook]
pub fn use_task_progress_by_day(month: NaiveDate, refresh: u32) -> DailyAggregate {
    let client = use_api_client();
    let guard = use_request_guard();
    let progress = use_state(DailyAggregate::default);

    {
        let progress = progress.clone();
        use_effect_with_deps(
            move |(month, _)| {
                let ticket = guard.begin();
                let month = month_start(*month);
                spawn_local(async move {
                    load_latest(
                        ticket,
                        "task progress",
                        tasks::progress_by_day(&client, month),
                        |value| progress.set(value),
                    )
                    .await;
                });
                move || guard.invalidate()
            },
            (month_start(month), refresh),
        );
    }

    (*progress).clone()
}

#[hook]
pub fn use_finance_by_day(month: NaiveDate, refresh: u32) -> DailyAggregate {
    let client = use_api_client();
    let guard = use_request_guard();
    let by_day = use_state(DailyAggregate::default);

    {
        let by_day = by_day.clone();
        use_effect_with_deps(
            move |(month, _)| {
                let ticket = guard.begin();
                let (start, end) = (month_start(*month), month_end(*month));
                spawn_local(async move {
                    load_latest(
                        ticket,
                        "finances by day",
                        finances::finance_by_day(&client, start, end),
                        |value| by_day.set(value),
                    )
                    .await;
                });
                move || guard.invalidate()
            },
            (month_start(month), refresh),
        );
    }

    (*by_day).clone()
}

#[hook]
pub fn use_finance_total(span: Span, date: NaiveDate, refresh: u32) -> f64 {
    let client = use_api_client();
    let guard = use_request_guard();
    let total = use_state(|| 0.0_f64);

    {
        let total = total.clone();
        use_effect_with_deps(
            move |(span, date, _)| {
                let ticket = guard.begin();
                let (span, date) = (*span, *date);
                spawn_local(async move {
                    load_latest(
                        ticket,
                        "finance total",
                        finances::finance_total(&client, span, date),
                        |value| total.set(value),
                    )
                    .await;
                });
                move || guard.invalidate()
            },
            (span, date, refresh),
        );
    }

    *total
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use futures::channel::oneshot;
    use futures::executor::LocalPool;
    use futures::task::LocalSpawnExt;

    use super::*;
    use crate::error::TransportError;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn aggregate_for(date: NaiveDate, value: f64) -> DailyAggregate {
        DailyAggregate::sum_by_day([(date, value)])
    }

    #[test]
    fn stale_response_does_not_overwrite_newer_selection() {
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        let guard = RequestGuard::new();
        let shown = Rc::new(RefCell::new(DailyAggregate::default()));

        let (may, reply_may) = oneshot::channel::<Result<DailyAggregate, ApiError>>();
        let (june, reply_june) = oneshot::channel::<Result<DailyAggregate, ApiError>>();

        // Selecting May, then June before May's response arrives.
        for receiver in [reply_may, reply_june] {
            let ticket = guard.begin();
            let shown = shown.clone();
            spawner
                .spawn_local(async move {
                    let fetch = async move {
                        receiver
                            .await
                            .unwrap_or_else(|_| Err(ApiError::Decode("dropped".into())))
                    };
                    load_latest(ticket, "test", fetch, |value| *shown.borrow_mut() = value)
                        .await;
                })
                .unwrap();
        }

        june.send(Ok(aggregate_for(d(2024, 6, 3), 1.0))).unwrap();
        pool.run_until_stalled();
        may.send(Ok(aggregate_for(d(2024, 5, 3), 0.5))).unwrap();
        pool.run_until_stalled();

        assert_eq!(*shown.borrow(), aggregate_for(d(2024, 6, 3), 1.0));
    }

    #[test]
    fn failure_blanks_previous_value() {
        let guard = RequestGuard::new();
        let shown = RefCell::new(aggregate_for(d(2024, 5, 3), 0.5));

        let applied = futures::executor::block_on(load_latest(
            guard.begin(),
            "test",
            async { Err::<DailyAggregate, _>(ApiError::from(TransportError("offline".into()))) },
            |value| *shown.borrow_mut() = value,
        ));

        assert!(applied);
        assert!(shown.borrow().is_empty());
    }

    #[test]
    fn superseded_failure_is_ignored_too() {
        let guard = RequestGuard::new();
        let stale = guard.begin();
        let _current = guard.begin();
        let total = RefCell::new(42.0);

        let applied = futures::executor::block_on(load_latest(
            stale,
            "test",
            async { Err::<f64, _>(ApiError::Unauthorized) },
            |value| *total.borrow_mut() = value,
        ));

        assert!(!applied);
        assert_eq!(*total.borrow(), 42.0);
    }
}

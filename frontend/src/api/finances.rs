use chrono::NaiveDate;

use super::{json_request, send_empty, send_json, with_query};
use crate::aggregate::DailyAggregate;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{Finance, FinanceDayTotal, FinancePatch, NewFinance};
use crate::period::{iso, Span, View};
use crate::transport::ApiRequest;

const FINANCES_PATH: &str = "/api/finances/";
const BY_DAY_PATH: &str = "/api/finances/by_day/";

#[derive(Clone, Debug, PartialEq)]
pub struct FinanceQuery {
    pub view: View,
    pub date: NaiveDate,
    pub tag: Option<String>,
}

impl FinanceQuery {
    /// The server matches entries on the exact `date`, whatever the view, so
    /// the selected day goes out unchanged.
    pub fn url(&self) -> String {
        let mut params = vec![
            ("view", self.view.as_param().to_string()),
            ("date", iso(self.date)),
        ];
        if let Some(tag) = self.tag.as_ref().filter(|tag| !tag.is_empty()) {
            params.push(("tag", tag.clone()));
        }
        with_query(FINANCES_PATH, &params)
    }
}

fn finance_path(id: i64) -> String {
    format!("{}{}/", FINANCES_PATH, id)
}

pub async fn list_finances(client: &ApiClient, query: &FinanceQuery) -> Result<Vec<Finance>, ApiError> {
    send_json(client, ApiRequest::get(query.url())).await
}

pub async fn create_finance(client: &ApiClient, entry: &NewFinance) -> Result<Finance, ApiError> {
    let request = json_request(ApiRequest::post(FINANCES_PATH), entry)?;
    send_json(client, request).await
}

pub async fn update_finance(
    client: &ApiClient,
    id: i64,
    patch: &FinancePatch,
) -> Result<Finance, ApiError> {
    let request = json_request(ApiRequest::patch(finance_path(id)), patch)?;
    send_json(client, request).await
}

pub async fn delete_finance(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    send_empty(client, ApiRequest::delete(finance_path(id))).await
}

/// Spending per day between `start` and `end`, inclusive.
pub async fn finance_by_day(
    client: &ApiClient,
    start: NaiveDate,
    end: NaiveDate,
) -> Result<DailyAggregate, ApiError> {
    let url = with_query(BY_DAY_PATH, &[("start", iso(start)), ("end", iso(end))]);
    let rows: Vec<FinanceDayTotal> = send_json(client, ApiRequest::get(url)).await?;
    Ok(DailyAggregate::from_day_totals(&rows))
}

/// Total spent over the week or month containing `date`.
pub async fn finance_total(client: &ApiClient, span: Span, date: NaiveDate) -> Result<f64, ApiError> {
    let (start, end) = span.range(date);
    Ok(finance_by_day(client, start, end).await?.total())
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::api::test_support::client_with;
    use crate::transport::testing::ScriptedTransport;
    use crate::transport::Method;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn list_query_carries_tag() {
        let query = FinanceQuery {
            view: View::Day,
            date: d(2024, 5, 1),
            tag: Some("food".into()),
        };
        assert_eq!(query.url(), "/api/finances/?view=day&date=2024-05-01&tag=food");
    }

    #[test]
    fn month_view_keeps_selected_day() {
        let query = FinanceQuery {
            view: View::Month,
            date: d(2024, 5, 17),
            tag: None,
        };
        assert_eq!(query.url(), "/api/finances/?view=month&date=2024-05-17");
    }

    #[test]
    fn week_total_sums_rows() {
        let (client, transport) = client_with(ScriptedTransport::default().reply(
            200,
            r#"[{"created_at__date":"2024-04-29","total":"10.00"},{"created_at__date":"2024-05-01","total":"5.25"}]"#,
        ));

        let total = block_on(finance_total(&client, Span::Week, d(2024, 5, 1))).unwrap();

        assert_eq!(total, 15.25);
        assert_eq!(
            transport.last_request().unwrap().url,
            "/api/finances/by_day/?start=2024-04-28&end=2024-05-04"
        );
    }

    #[test]
    fn by_day_rejects_mapping_shape() {
        let (client, _) = client_with(ScriptedTransport::default().reply(200, r#"{"2024-05-01":3}"#));
        let err = block_on(finance_by_day(&client, d(2024, 5, 1), d(2024, 5, 31))).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn create_posts_entry() {
        let (client, transport) = client_with(ScriptedTransport::default().reply(
            201,
            r#"{"id":4,"description":"Market","value":"32.10","tags":"food","created_at":"2024-05-01T09:00:00-03:00"}"#,
        ));
        let entry = NewFinance {
            description: "Market".into(),
            value: 32.1,
            tags: "food".into(),
            created_at: d(2024, 5, 1),
        };

        let created = block_on(create_finance(&client, &entry)).unwrap();

        assert_eq!(created.id, 4);
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::Post);
        assert_eq!(sent.url, "/api/finances/");
    }

    #[test]
    fn update_failure_surfaces_status() {
        let (client, _) = client_with(ScriptedTransport::default().reply(500, "oops"));
        let patch = FinancePatch {
            value: Some(3.0),
            ..FinancePatch::default()
        };
        let err = block_on(update_finance(&client, 4, &patch)).unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                status: 500,
                body: "oops".into()
            }
        );
    }

    #[test]
    fn unauthorized_delete() {
        let (client, _) = client_with(ScriptedTransport::default().reply(401, ""));
        assert_eq!(
            block_on(delete_finance(&client, 4)).unwrap_err(),
            ApiError::Unauthorized
        );
    }
}

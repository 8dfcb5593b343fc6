use std::collections::HashMap;

use chrono::NaiveDate;

use super::{json_request, send_empty, send_json, with_query};
use crate::aggregate::DailyAggregate;
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::models::{NewTask, Task, TaskPatch};
use crate::period::{iso, month_end, month_start, View};
use crate::transport::ApiRequest;

const TASKS_PATH: &str = "/api/tasks/";

#[derive(Clone, Debug, PartialEq)]
pub enum TaskQuery {
    /// Tasks created in the period around `date`, optionally narrowed to a tag.
    Period {
        view: View,
        date: NaiveDate,
        tag: Option<String>,
    },
    /// Every task regardless of date.
    Undated,
}

impl TaskQuery {
    pub fn url(&self) -> String {
        match self {
            TaskQuery::Period { view, date, tag } => {
                let mut params = vec![
                    ("view", view.as_param().to_string()),
                    ("date", iso(view.anchor(*date))),
                ];
                if let Some(tag) = tag.as_ref().filter(|tag| !tag.is_empty()) {
                    params.push(("tag", tag.clone()));
                }
                with_query(TASKS_PATH, &params)
            }
            TaskQuery::Undated => with_query(TASKS_PATH, &[("no_date", "1".to_string())]),
        }
    }
}

fn task_path(id: i64) -> String {
    format!("{}{}/", TASKS_PATH, id)
}

pub async fn list_tasks(client: &ApiClient, query: &TaskQuery) -> Result<Vec<Task>, ApiError> {
    send_json(client, ApiRequest::get(query.url())).await
}

pub async fn create_task(client: &ApiClient, task: &NewTask) -> Result<Task, ApiError> {
    let request = json_request(ApiRequest::post(TASKS_PATH), task)?;
    send_json(client, request).await
}

pub async fn update_task(client: &ApiClient, id: i64, patch: &TaskPatch) -> Result<Task, ApiError> {
    let request = json_request(ApiRequest::patch(task_path(id)), patch)?;
    send_json(client, request).await
}

pub async fn delete_task(client: &ApiClient, id: i64) -> Result<(), ApiError> {
    send_empty(client, ApiRequest::delete(task_path(id))).await
}

/// Flips completion. Completing stamps `completed_at` with `now`, reopening
/// clears it.
pub async fn toggle_task(client: &ApiClient, task: &Task, now: &str) -> Result<Task, ApiError> {
    let completing = !task.is_completed;
    let patch = TaskPatch {
        is_completed: Some(completing),
        completed_at: Some(completing.then(|| now.to_string())),
        ..TaskPatch::default()
    };
    update_task(client, task.id, &patch).await
}

/// Completion ratio per day for the month containing `month`.
pub async fn progress_by_day(client: &ApiClient, month: NaiveDate) -> Result<DailyAggregate, ApiError> {
    let url = with_query(
        TASKS_PATH,
        &[
            ("progress_by_day", "1".to_string()),
            ("start", iso(month_start(month))),
            ("end", iso(month_end(month))),
        ],
    );
    let raw: HashMap<String, f64> = send_json(client, ApiRequest::get(url)).await?;
    DailyAggregate::from_progress(raw).map_err(ApiError::Decode)
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

    const TASK_JSON: &str = r#"{"id":3,"title":"Read","description":"","tags":"home","is_completed":true,"created_at":"2024-05-02T10:00:00-03:00","completed_at":"2024-05-02T18:00:00Z"}"#;

    #[test]
    fn period_query_shapes() {
        let month = TaskQuery::Period {
            view: View::Month,
            date: d(2024, 5, 20),
            tag: Some("work".into()),
        };
        assert_eq!(month.url(), "/api/tasks/?view=month&date=2024-05-01&tag=work");

        let day = TaskQuery::Period {
            view: View::Day,
            date: d(2024, 5, 20),
            tag: Some(String::new()),
        };
        assert_eq!(day.url(), "/api/tasks/?view=day&date=2024-05-20");

        assert_eq!(TaskQuery::Undated.url(), "/api/tasks/?no_date=1");
    }

    #[test]
    fn list_parses_tasks() {
        let (client, transport) =
            client_with(ScriptedTransport::default().reply(200, &format!("[{}]", TASK_JSON)));
        let tasks = block_on(list_tasks(&client, &TaskQuery::Undated)).unwrap();

        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Read");
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.header_value("Authorization"), Some("Bearer abc"));
    }

    #[test]
    fn toggle_sends_completion_patch() {
        let (client, transport) = client_with(ScriptedTransport::default().reply(200, TASK_JSON));
        let open: Task = serde_json::from_str(TASK_JSON)
            .map(|task: Task| Task {
                is_completed: false,
                completed_at: None,
                ..task
            })
            .unwrap();

        let updated = block_on(toggle_task(&client, &open, "2024-05-02T18:00:00Z")).unwrap();
        assert!(updated.is_completed);

        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::Patch);
        assert_eq!(sent.url, "/api/tasks/3/");
        let body: serde_json::Value = serde_json::from_str(sent.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "is_completed": true, "completed_at": "2024-05-02T18:00:00Z" })
        );
    }

    #[test]
    fn reopening_clears_completion_time() {
        let (client, transport) = client_with(ScriptedTransport::default().reply(200, TASK_JSON));
        let done: Task = serde_json::from_str(TASK_JSON).unwrap();

        block_on(toggle_task(&client, &done, "ignored")).unwrap();
        let body: serde_json::Value =
            serde_json::from_str(transport.last_request().unwrap().body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "is_completed": false, "completed_at": null })
        );
    }

    #[test]
    fn failed_mutation_is_typed() {
        let (client, _) = client_with(ScriptedTransport::default().reply(400, r#"{"title":["required"]}"#));
        let task = NewTask {
            title: String::new(),
            description: String::new(),
            tags: String::new(),
            created_at: d(2024, 5, 2),
        };
        let err = block_on(create_task(&client, &task)).unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 400, .. }));
    }

    #[test]
    fn delete_accepts_no_content() {
        let (client, transport) = client_with(ScriptedTransport::default().reply(204, ""));
        block_on(delete_task(&client, 9)).unwrap();
        let sent = transport.last_request().unwrap();
        assert_eq!(sent.method, Method::Delete);
        assert_eq!(sent.url, "/api/tasks/9/");
    }

    #[test]
    fn progress_covers_whole_month() {
        let (client, transport) = client_with(
            ScriptedTransport::default().reply(200, r#"{"2024-05-02":0.5,"2024-05-09":1.0}"#),
        );
        let progress = block_on(progress_by_day(&client, d(2024, 5, 14))).unwrap();

        assert_eq!(progress.get(d(2024, 5, 2)), 0.5);
        assert_eq!(
            transport.last_request().unwrap().url,
            "/api/tasks/?progress_by_day=1&start=2024-05-01&end=2024-05-31"
        );
    }

    #[test]
    fn progress_with_wrong_shape_is_a_decode_error() {
        let (client, _) = client_with(
            ScriptedTransport::default().reply(200, r#"[{"created_at__date":"2024-05-02","total":"1"}]"#),
        );
        let err = block_on(progress_by_day(&client, d(2024, 5, 14))).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }
}

use chrono::{NaiveDate, Utc};
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::icons::{icon_calendar, icon_tag};
use super::list_state::{ListAction, ListState};
use super::task_form::EditTaskModal;
use crate::api::tasks::{self, TaskQuery};
use crate::hooks::{load_latest, use_api_client, use_request_guard};
use crate::models::{date_prefix, Task};
use crate::period::View;
use crate::tags::split_tags;

/// `DD/MM/YYYY`, or the raw value when it does not start with a date.
pub fn display_date(raw: &str) -> String {
    date_prefix(raw)
        .map(|date| date.format("%d/%m/%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

#[derive(Properties, PartialEq)]
pub struct TaskListProps {
    pub view: View,
    pub date: NaiveDate,
    pub tag: String,
    pub refresh: u32,
    /// Fired after any successful mutation so dependents can re-fetch.
    pub on_changed: Callback<()>,
}

#[function_component(TaskList)]
pub fn task_list(props: &TaskListProps) -> Html {
    let client = use_api_client();
    let guard = use_request_guard();
    let items = use_reducer(ListState::<Task>::default);
    let any_date = use_state(|| false);
    let editing = use_state(|| None::<Task>);
    let error = use_state(|| None::<String>);

    let query = if *any_date {
        TaskQuery::Undated
    } else {
        TaskQuery::Period {
            view: props.view,
            date: props.date,
            tag: Some(props.tag.clone()),
        }
    };

    {
        let items = items.clone();
        let client = client.clone();
        use_effect_with_deps(
            move |(query, _)| {
                let ticket = guard.begin();
                let query = query.clone();
                spawn_local(async move {
                    let fetch = async move { tasks::list_tasks(&client, &query).await };
                    load_latest(ticket, "tasks", fetch, |value| {
                        items.dispatch(ListAction::Loaded(value))
                    })
                    .await;
                });
                move || guard.invalidate()
            },
            (query, props.refresh),
        );
    }

    let on_any_date = {
        let any_date = any_date.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            any_date.set(input.checked());
        })
    };

    let on_toggle = {
        let client = client.clone();
        let items = items.clone();
        let error = error.clone();
        let on_changed = props.on_changed.clone();
        Callback::from(move |task: Task| {
            let client = client.clone();
            let items = items.clone();
            let error = error.clone();
            let on_changed = on_changed.clone();
            spawn_local(async move {
                let now = Utc::now().to_rfc3339();
                match tasks::toggle_task(&client, &task, &now).await {
                    Ok(updated) => {
                        error.set(None);
                        items.dispatch(ListAction::Replace(updated));
                        on_changed.emit(());
                    }
                    Err(err) => {
                        log::error!("toggling task {} failed: {}", task.id, err);
                        error.set(Some(err.user_message()));
                    }
                }
            });
        })
    };

    let on_delete = {
        let client = client.clone();
        let items = items.clone();
        let error = error.clone();
        let on_changed = props.on_changed.clone();
        Callback::from(move |id: i64| {
            let client = client.clone();
            let items = items.clone();
            let error = error.clone();
            let on_changed = on_changed.clone();
            spawn_local(async move {
                match tasks::delete_task(&client, id).await {
                    Ok(()) => {
                        error.set(None);
                        items.dispatch(ListAction::Remove(id));
                        on_changed.emit(());
                    }
                    Err(err) => {
                        log::error!("deleting task {} failed: {}", id, err);
                        error.set(Some(err.user_message()));
                    }
                }
            });
        })
    };

    let on_edited = {
        let items = items.clone();
        let editing = editing.clone();
        let on_changed = props.on_changed.clone();
        Callback::from(move |updated: Task| {
            items.dispatch(ListAction::Replace(updated));
            editing.set(None);
            on_changed.emit(());
        })
    };

    let close_edit = {
        let editing = editing.clone();
        Callback::from(move |_: ()| editing.set(None))
    };

    html! {
        <div class="space-y-2">
            <label class="flex items-center gap-2 text-sm text-slate-300">
                <input type="checkbox" checked={*any_date} onchange={on_any_date} />
                {"Any date"}
            </label>
            if let Some(msg) = &*error {
                <p class="text-sm text-red-500">{ msg.clone() }</p>
            }
            if items.is_empty() {
                <p class="text-center text-slate-400 py-4">{"No tasks found"}</p>
            }
            <ul class="space-y-2">
                { for items.iter().map(|task| {
                    let toggle = {
                        let on_toggle = on_toggle.clone();
                        let task = task.clone();
                        Callback::from(move |_| on_toggle.emit(task.clone()))
                    };
                    let delete = {
                        let on_delete = on_delete.clone();
                        let id = task.id;
                        Callback::from(move |_| on_delete.emit(id))
                    };
                    let edit = {
                        let editing = editing.clone();
                        let task = task.clone();
                        Callback::from(move |_| editing.set(Some(task.clone())))
                    };
                    let title_class = if task.is_completed {
                        "font-semibold line-through text-slate-500"
                    } else {
                        "font-semibold text-white"
                    };
                    html! {
                        <li key={task.id} class="flex items-start gap-3 bg-[#23272f] border border-[#333] rounded-lg p-3">
                            <input type="checkbox" class="mt-1" checked={task.is_completed} onchange={toggle} />
                            <div class="flex-1">
                                <p class={title_class}>{ task.title.clone() }</p>
                                if !task.description.is_empty() {
                                    <p class="text-sm text-slate-400">{ task.description.clone() }</p>
                                }
                                <div class="flex flex-wrap items-center gap-2 mt-1 text-xs text-slate-400">
                                    <span class="flex items-center gap-1">{ icon_calendar() }{ display_date(&task.created_at) }</span>
                                    { for split_tags(&task.tags).into_iter().map(|tag| html! {
                                        <span class="flex items-center gap-1 px-2 py-0.5 rounded-full bg-[#2c313c] text-slate-200">{ icon_tag() }{ tag }</span>
                                    }) }
                                </div>
                            </div>
                            <button type="button" class="text-sm text-[#90caf9] hover:underline" onclick={edit}>{"Edit"}</button>
                            <button type="button" class="text-sm text-red-400 hover:underline" onclick={delete}>{"Delete"}</button>
                        </li>
                    }
                }) }
            </ul>
            if let Some(task) = (*editing).clone() {
                <EditTaskModal task={task} fallback_date={props.date} on_close={close_edit} on_edited={on_edited} />
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_render_day_first() {
        assert_eq!(display_date("2024-05-02T10:00:00-03:00"), "02/05/2024");
        assert_eq!(display_date("2024-12-31"), "31/12/2024");
        assert_eq!(display_date("soon"), "soon");
    }
}

use chrono::NaiveDate;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::modal::Modal;
use crate::api::tasks;
use crate::hooks::use_api_client;
use crate::models::{NewTask, Task, TaskPatch};
use crate::period::iso;
use crate::tags::{join_tags, split_tags};

/// Editable state of the task form.
#[derive(Clone, Debug, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub tags: Vec<String>,
    pub date: NaiveDate,
}

impl TaskDraft {
    pub fn empty(date: NaiveDate) -> Self {
        TaskDraft {
            title: String::new(),
            description: String::new(),
            tags: Vec::new(),
            date,
        }
    }

    /// Pre-fills from `task`; `fallback` stands in for an unparseable date.
    pub fn from_task(task: &Task, fallback: NaiveDate) -> Self {
        TaskDraft {
            title: task.title.clone(),
            description: task.description.clone(),
            tags: split_tags(&task.tags),
            date: task.created_date().unwrap_or(fallback),
        }
    }

    /// Adds a trimmed, non-duplicate tag. Returns whether it was added.
    pub fn add_tag(&mut self, input: &str) -> bool {
        let tag = input.trim();
        if tag.is_empty() || tag.contains(',') || self.tags.iter().any(|t| t == tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    pub fn remove_tag(&mut self, tag: &str) {
        self.tags.retain(|t| t != tag);
    }

    pub fn is_valid(&self) -> bool {
        !self.title.trim().is_empty()
    }

    pub fn to_new_task(&self) -> NewTask {
        NewTask {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            tags: join_tags(&self.tags),
            created_at: self.date,
        }
    }

    pub fn to_patch(&self) -> TaskPatch {
        TaskPatch {
            title: Some(self.title.trim().to_string()),
            description: Some(self.description.trim().to_string()),
            tags: Some(join_tags(&self.tags)),
            created_at: Some(self.date),
            ..TaskPatch::default()
        }
    }
}

#[derive(Properties, PartialEq)]
pub struct TaskFormProps {
    pub date: NaiveDate,
    /// Present when editing.
    #[prop_or_default]
    pub task: Option<Task>,
    pub on_saved: Callback<Task>,
}

#[function_component(TaskForm)]
pub fn task_form(props: &TaskFormProps) -> Html {
    let client = use_api_client();
    let draft = {
        let task = props.task.clone();
        let date = props.date;
        use_state(move || match &task {
            Some(task) => TaskDraft::from_task(task, date),
            None => TaskDraft::empty(date),
        })
    };
    let tag_input = use_state(String::new);
    let saving = use_state(|| false);
    let error = use_state(|| None::<String>);
    let editing = props.task.as_ref().map(|task| task.id);

    let update = |apply: fn(&mut TaskDraft, String)| {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            if let Some(input) = e.target_dyn_into::<HtmlInputElement>() {
                let mut next = (*draft).clone();
                apply(&mut next, input.value());
                draft.set(next);
            }
        })
    };
    let on_title = update(|d, v| d.title = v);
    let on_description = update(|d, v| d.description = v);
    let on_date = update(|d, v| {
        if let Ok(date) = NaiveDate::parse_from_str(&v, "%Y-%m-%d") {
            d.date = date;
        }
    });

    let add_tag = {
        let draft = draft.clone();
        let tag_input = tag_input.clone();
        Callback::from(move |_: ()| {
            let mut next = (*draft).clone();
            next.add_tag(&tag_input);
            draft.set(next);
            tag_input.set(String::new());
        })
    };

    let on_tag_input = {
        let tag_input = tag_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            tag_input.set(input.value());
        })
    };

    let on_tag_key = {
        let add_tag = add_tag.clone();
        Callback::from(move |e: KeyboardEvent| {
            if e.key() == "Enter" {
                e.prevent_default();
                add_tag.emit(());
            }
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let saving = saving.clone();
        let error = error.clone();
        let on_saved = props.on_saved.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if !draft.is_valid() || *saving {
                return;
            }
            let current = (*draft).clone();
            let client = client.clone();
            let saving = saving.clone();
            let error = error.clone();
            let draft = draft.clone();
            let on_saved = on_saved.clone();
            saving.set(true);
            error.set(None);
            spawn_local(async move {
                let result = match editing {
                    Some(id) => tasks::update_task(&client, id, &current.to_patch()).await,
                    None => tasks::create_task(&client, &current.to_new_task()).await,
                };
                saving.set(false);
                match result {
                    Ok(task) => {
                        if editing.is_none() {
                            draft.set(TaskDraft::empty(current.date));
                        }
                        on_saved.emit(task);
                    }
                    Err(err) => {
                        log::error!("saving task failed: {}", err);
                        error.set(Some(err.user_message()));
                    }
                }
            });
        })
    };

    let submit_label = match (editing.is_some(), *saving) {
        (true, true) => "Saving...",
        (true, false) => "Save changes",
        (false, true) => "Adding...",
        (false, false) => "Add task",
    };

    html! {
        <form class="space-y-3" onsubmit={on_submit}>
            <div>
                <label class="block text-sm font-medium text-[#90caf9] mb-1">{"Task date"}</label>
                <input type="date" class="w-full p-2 rounded bg-[#181a20] border border-[#333] text-white" value={iso(draft.date)} oninput={on_date} />
            </div>
            <div class="flex gap-2">
                <input placeholder="Title" required={true} class="flex-1 p-2 rounded bg-[#181a20] border border-[#333] text-white" value={draft.title.clone()} oninput={on_title} />
                <input placeholder="Description" class="flex-1 p-2 rounded bg-[#181a20] border border-[#333] text-white" value={draft.description.clone()} oninput={on_description} />
            </div>
            <div class="flex flex-wrap items-center gap-2">
                <input placeholder="Add tag" class="p-1 rounded bg-[#181a20] border border-[#333] text-white text-sm" value={(*tag_input).clone()} oninput={on_tag_input} onkeydown={on_tag_key} />
                <button type="button" class="px-2 py-1 text-sm border border-[#90caf9] text-[#90caf9] rounded" onclick={add_tag.reform(|_: MouseEvent| ())}>{"Add"}</button>
                { for draft.tags.iter().map(|tag| {
                    let draft = draft.clone();
                    let tag = tag.clone();
                    let label = tag.clone();
                    html! {
                        <span class="flex items-center gap-1 px-2 py-0.5 rounded-full bg-[#2c313c] text-sm text-slate-200">
                            { label }
                            <button type="button" class="text-slate-400 hover:text-white" onclick={Callback::from(move |_| {
                                let mut next = (*draft).clone();
                                next.remove_tag(&tag);
                                draft.set(next);
                            })}>{"×"}</button>
                        </span>
                    }
                }) }
            </div>
            if let Some(msg) = &*error {
                <p class="text-sm text-red-500">{ msg.clone() }</p>
            }
            <button type="submit" class="w-full bg-[#90caf9] text-[#181a20] font-semibold py-2 rounded disabled:opacity-50" disabled={*saving || !draft.is_valid()}>
                { submit_label }
            </button>
        </form>
    }
}

#[derive(Properties, PartialEq)]
pub struct EditTaskModalProps {
    pub task: Task,
    pub fallback_date: NaiveDate,
    pub on_close: Callback<()>,
    pub on_edited: Callback<Task>,
}

#[function_component(EditTaskModal)]
pub fn edit_task_modal(props: &EditTaskModalProps) -> Html {
    html! {
        <Modal title="Edit task" on_close={props.on_close.clone()}>
            // Keyed so reopening on another task starts from a fresh draft.
            <TaskForm
                key={props.task.id.to_string()}
                date={props.fallback_date}
                task={Some(props.task.clone())}
                on_saved={props.on_edited.clone()}
            />
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn tags_are_trimmed_and_unique() {
        let mut draft = TaskDraft::empty(d(2024, 5, 1));
        assert!(draft.add_tag(" work "));
        assert!(!draft.add_tag("work"));
        assert!(!draft.add_tag("   "));
        assert!(!draft.add_tag("a,b"));
        assert!(draft.add_tag("home"));
        assert_eq!(draft.to_new_task().tags, "work,home");

        draft.remove_tag("work");
        assert_eq!(draft.tags, vec!["home"]);
    }

    #[test]
    fn draft_from_task_splits_tags_and_keeps_date() {
        let task: Task = serde_json::from_str(
            r#"{"id":1,"title":"Run","description":"5k","tags":"health, sport","is_completed":false,"created_at":"2024-04-30T07:00:00-03:00"}"#,
        )
        .unwrap();
        let draft = TaskDraft::from_task(&task, d(2024, 5, 1));
        assert_eq!(draft.tags, vec!["health", "sport"]);
        assert_eq!(draft.date, d(2024, 4, 30));

        let patch = draft.to_patch();
        assert_eq!(patch.tags.as_deref(), Some("health,sport"));
        assert_eq!(patch.is_completed, None);
    }

    #[test]
    fn blank_title_is_invalid() {
        let mut draft = TaskDraft::empty(d(2024, 5, 1));
        draft.title = "   ".into();
        assert!(!draft.is_valid());
        draft.title = "Call mom".into();
        assert!(draft.is_valid());
    }
}

use chrono::NaiveDate;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::api::finances::{self, FinanceQuery};
use crate::api::tasks::{self, TaskQuery};
use crate::error::ApiError;
use crate::hooks::{load_latest, use_api_client, use_request_guard};
use crate::period::View;
use crate::tags::distinct_tags;

/// Which collection the chips are derived from.
#[derive(Clone, Copy, PartialEq)]
pub enum TagSource {
    Tasks,
    Finances,
}

#[derive(Properties, PartialEq)]
pub struct TagFilterProps {
    pub source: TagSource,
    pub view: View,
    pub date: NaiveDate,
    pub selected: String,
    pub on_change: Callback<String>,
    #[prop_or_default]
    pub refresh: u32,
}

#[function_component(TagFilter)]
pub fn tag_filter(props: &TagFilterProps) -> Html {
    let client = use_api_client();
    let guard = use_request_guard();
    let tags = use_state(Vec::<String>::new);

    {
        let tags = tags.clone();
        let guard = guard.clone();
        use_effect_with_deps(
            move |(source, view, date, _)| {
                let ticket = guard.begin();
                let (source, view, date) = (*source, *view, *date);
                spawn_local(async move {
                    let fetch = async move {
                        let fields: Vec<String> = match source {
                            TagSource::Tasks => {
                                let query = TaskQuery::Period { view, date, tag: None };
                                tasks::list_tasks(&client, &query)
                                    .await?
                                    .into_iter()
                                    .map(|task| task.tags)
                                    .collect()
                            }
                            TagSource::Finances => {
                                let query = FinanceQuery { view, date, tag: None };
                                finances::list_finances(&client, &query)
                                    .await?
                                    .into_iter()
                                    .map(|entry| entry.tags)
                                    .collect()
                            }
                        };
                        Ok::<_, ApiError>(distinct_tags(fields.iter().map(String::as_str)))
                    };
                    load_latest(ticket, "tags", fetch, |value| tags.set(value)).await;
                });
                move || guard.invalidate()
            },
            (props.source, props.view, props.date, props.refresh),
        );
    }

    let chip = |label: String, value: String, active: bool| {
        let on_change = props.on_change.clone();
        let class_name = if active {
            "px-3 py-1 rounded-full text-sm font-semibold bg-[#90caf9] text-[#181a20]"
        } else {
            "px-3 py-1 rounded-full text-sm bg-[#2c313c] text-slate-200 hover:bg-[#363c48]"
        };
        html! {
            <button type="button" class={class_name} onclick={Callback::from(move |_| on_change.emit(value.clone()))}>
                { label }
            </button>
        }
    };

    html! {
        <div class="my-4 text-center">
            <p class="text-xs text-slate-400 mb-2">{"Filter by tag:"}</p>
            <div class="flex flex-wrap gap-2 justify-center">
                { chip("All".to_string(), String::new(), props.selected.is_empty()) }
                if tags.is_empty() {
                    <span class="px-3 py-1 rounded-full text-sm bg-[#2c313c] text-slate-500">{"No tags found"}</span>
                }
                { for tags.iter().map(|tag| chip(tag.clone(), tag.clone(), props.selected == *tag)) }
            </div>
        </div>
    }
}

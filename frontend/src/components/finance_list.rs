use chrono::NaiveDate;
use wasm_bindgen_futures::spawn_local;
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::icons::{icon_more, icon_plus, icon_tag};
use super::list_state::{ListAction, ListState};
use super::modal::Modal;
use crate::aggregate::{format_money, DailyAggregate};
use crate::api::finances::{self, FinanceQuery};
use crate::hooks::{load_latest, use_api_client, use_request_guard};
use crate::models::{Finance, FinancePatch, NewFinance};
use crate::period::View;
use crate::tags::{join_tags, split_tags};

/// Raw form fields of the add/edit dialog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FinanceDraft {
    pub description: String,
    pub value: String,
    pub tags: String,
}

impl FinanceDraft {
    pub fn from_entry(entry: &Finance) -> Self {
        FinanceDraft {
            description: entry.description.clone(),
            value: format!("{:.2}", entry.value),
            tags: entry.tags.clone(),
        }
    }

    /// Accepts `12.5` as well as `12,5`.
    pub fn parsed_value(&self) -> Result<f64, String> {
        let value = self
            .value
            .trim()
            .replace(',', ".")
            .parse::<f64>()
            .map_err(|_| "Enter a valid amount".to_string())?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err("Enter a valid amount".to_string())
        }
    }

    fn validated(&self) -> Result<(String, f64, String), String> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err("Description is required".to_string());
        }
        let value = self.parsed_value()?;
        Ok((description.to_string(), value, join_tags(&split_tags(&self.tags))))
    }

    pub fn to_new_finance(&self, date: NaiveDate) -> Result<NewFinance, String> {
        let (description, value, tags) = self.validated()?;
        Ok(NewFinance {
            description,
            value,
            tags,
            created_at: date,
        })
    }

    pub fn to_patch(&self) -> Result<FinancePatch, String> {
        let (description, value, tags) = self.validated()?;
        Ok(FinancePatch {
            description: Some(description),
            value: Some(value),
            tags: Some(tags),
        })
    }
}

enum PendingSave {
    Create(NewFinance),
    Update(i64, FinancePatch),
}

#[derive(Properties, PartialEq)]
struct FinanceDialogProps {
    title: AttrValue,
    date: NaiveDate,
    #[prop_or_default]
    entry: Option<Finance>,
    on_close: Callback<()>,
    on_saved: Callback<Finance>,
}

#[function_component(FinanceDialog)]
fn finance_dialog(props: &FinanceDialogProps) -> Html {
    let client = use_api_client();
    let draft = {
        let entry = props.entry.clone();
        use_state(move || entry.as_ref().map(FinanceDraft::from_entry).unwrap_or_default())
    };
    let saving = use_state(|| false);
    let error = use_state(|| None::<String>);

    let field = |apply: fn(&mut FinanceDraft, String)| {
        let draft = draft.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = (*draft).clone();
            apply(&mut next, input.value());
            draft.set(next);
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let saving = saving.clone();
        let error = error.clone();
        let on_saved = props.on_saved.clone();
        let date = props.date;
        let editing = props.entry.as_ref().map(|entry| entry.id);
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if *saving {
                return;
            }
            let client = client.clone();
            let saving = saving.clone();
            let error = error.clone();
            let on_saved = on_saved.clone();
            let current = (*draft).clone();
            let pending = match editing {
                Some(id) => current.to_patch().map(|patch| PendingSave::Update(id, patch)),
                None => current.to_new_finance(date).map(PendingSave::Create),
            };
            let pending = match pending {
                Ok(pending) => pending,
                Err(msg) => {
                    error.set(Some(msg));
                    return;
                }
            };
            saving.set(true);
            error.set(None);
            spawn_local(async move {
                let result = match pending {
                    PendingSave::Update(id, patch) => finances::update_finance(&client, id, &patch).await,
                    PendingSave::Create(entry) => finances::create_finance(&client, &entry).await,
                };
                saving.set(false);
                match result {
                    Ok(saved) => on_saved.emit(saved),
                    Err(err) => {
                        log::error!("saving finance entry failed: {}", err);
                        error.set(Some(err.user_message()));
                    }
                }
            });
        })
    };

    html! {
        <Modal title={props.title.clone()} on_close={props.on_close.clone()}>
            <form class="space-y-3" onsubmit={on_submit}>
                <input placeholder="Description" class="w-full p-2 rounded bg-[#181a20] border border-[#333] text-white"
                    value={draft.description.clone()} oninput={field(|d, v| d.description = v)} />
                <input type="number" step="0.01" placeholder="0.00" class="w-full p-2 rounded bg-[#181a20] border border-[#333] text-white"
                    value={draft.value.clone()} oninput={field(|d, v| d.value = v)} />
                <input placeholder="Tags (comma separated)" class="w-full p-2 rounded bg-[#181a20] border border-[#333] text-white"
                    value={draft.tags.clone()} oninput={field(|d, v| d.tags = v)} />
                if let Some(msg) = &*error {
                    <p class="text-sm text-red-500">{ msg.clone() }</p>
                }
                <button type="submit" class="w-full bg-[#00e676] text-[#181a20] font-semibold py-2 rounded disabled:opacity-50" disabled={*saving}>
                    { if *saving { "Saving..." } else { "Save" } }
                </button>
            </form>
        </Modal>
    }
}

#[derive(Clone, PartialEq)]
enum Dialog {
    Closed,
    Adding,
    Editing(Finance),
}

#[derive(Properties, PartialEq)]
pub struct FinanceListProps {
    pub view: View,
    pub date: NaiveDate,
    pub tag: String,
    pub refresh: u32,
    pub on_changed: Callback<()>,
}

#[function_component(FinanceList)]
pub fn finance_list(props: &FinanceListProps) -> Html {
    let client = use_api_client();
    let guard = use_request_guard();
    let entries = use_reducer(ListState::<Finance>::default);
    let dialog = use_state(|| Dialog::Closed);
    let menu = use_state(|| None::<i64>);
    let error = use_state(|| None::<String>);

    let query = FinanceQuery {
        view: props.view,
        date: props.date,
        tag: Some(props.tag.clone()),
    };

    {
        let entries = entries.clone();
        let client = client.clone();
        use_effect_with_deps(
            move |(query, _)| {
                let ticket = guard.begin();
                let query = query.clone();
                spawn_local(async move {
                    let fetch = async move { finances::list_finances(&client, &query).await };
                    load_latest(ticket, "finances", fetch, |value| {
                        entries.dispatch(ListAction::Loaded(value))
                    })
                    .await;
                });
                move || guard.invalidate()
            },
            (query, props.refresh),
        );
    }

    let on_delete = {
        let client = client.clone();
        let entries = entries.clone();
        let error = error.clone();
        let menu = menu.clone();
        let on_changed = props.on_changed.clone();
        Callback::from(move |id: i64| {
            let client = client.clone();
            let entries = entries.clone();
            let error = error.clone();
            let on_changed = on_changed.clone();
            menu.set(None);
            spawn_local(async move {
                match finances::delete_finance(&client, id).await {
                    Ok(()) => {
                        error.set(None);
                        entries.dispatch(ListAction::Remove(id));
                        on_changed.emit(());
                    }
                    Err(err) => {
                        log::error!("deleting finance entry {} failed: {}", id, err);
                        error.set(Some(err.user_message()));
                    }
                }
            });
        })
    };

    let close_dialog = {
        let dialog = dialog.clone();
        Callback::from(move |_: ()| dialog.set(Dialog::Closed))
    };

    // New entries show up once the parent's refresh bump refetches the list.
    let on_saved = {
        let dialog = dialog.clone();
        let entries = entries.clone();
        let on_changed = props.on_changed.clone();
        Callback::from(move |saved: Finance| {
            entries.dispatch(ListAction::Replace(saved));
            dialog.set(Dialog::Closed);
            on_changed.emit(());
        })
    };

    let open_add = {
        let dialog = dialog.clone();
        Callback::from(move |_| dialog.set(Dialog::Adding))
    };

    html! {
        <div class="space-y-2">
            <div class="flex justify-end">
                <button type="button" class="flex items-center gap-2 border border-[#888] text-white font-bold rounded-lg px-4 py-1 hover:border-[#00e676]" onclick={open_add}>
                    { icon_plus() }{"New entry"}
                </button>
            </div>
            if let Some(msg) = &*error {
                <p class="text-sm text-red-500">{ msg.clone() }</p>
            }
            if entries.is_empty() {
                <p class="text-center text-slate-400 py-4">{"No entries found"}</p>
            }
            <ul class="space-y-2">
                { for entries.iter().map(|entry| {
                    let id = entry.id;
                    let toggle_menu = {
                        let menu = menu.clone();
                        Callback::from(move |_| menu.set(if *menu == Some(id) { None } else { Some(id) }))
                    };
                    let edit = {
                        let dialog = dialog.clone();
                        let menu = menu.clone();
                        let entry = entry.clone();
                        Callback::from(move |_| {
                            menu.set(None);
                            dialog.set(Dialog::Editing(entry.clone()));
                        })
                    };
                    let delete = {
                        let on_delete = on_delete.clone();
                        Callback::from(move |_| on_delete.emit(id))
                    };
                    html! {
                        <li key={id} class="relative flex items-center gap-3 bg-[#23272f] border border-[#333] rounded-lg p-3">
                            <div class="flex-1">
                                <p class="font-semibold text-white">{ entry.description.clone() }</p>
                                <div class="flex flex-wrap gap-2 mt-1 text-xs">
                                    { for split_tags(&entry.tags).into_iter().map(|tag| html! {
                                        <span class="flex items-center gap-1 px-2 py-0.5 rounded-full bg-[#2c313c] text-slate-200">{ icon_tag() }{ tag }</span>
                                    }) }
                                </div>
                            </div>
                            <span class="font-black text-[#00e676]">{ format!("$ {}", format_money(entry.value)) }</span>
                            <button type="button" class="p-1 text-slate-300 hover:text-white" aria-label="Actions" onclick={toggle_menu}>{ icon_more() }</button>
                            if *menu == Some(id) {
                                <div class="absolute right-2 top-10 z-10 bg-[#181a20] border border-[#333] rounded-lg shadow-lg text-sm">
                                    <button type="button" class="block w-full text-left px-4 py-2 text-[#90caf9] hover:bg-white/5" onclick={edit}>{"Edit"}</button>
                                    <button type="button" class="block w-full text-left px-4 py-2 text-red-400 hover:bg-white/5" onclick={delete}>{"Delete"}</button>
                                </div>
                            }
                        </li>
                    }
                }) }
            </ul>
            if !entries.is_empty() {
                <p class="text-right text-sm text-slate-400">
                    {"Listed total: "}
                    <span class="font-black text-[#00e676]">{ format!("$ {}", format_money(DailyAggregate::from_finances(&entries).total())) }</span>
                </p>
            }
            {
                match &*dialog {
                    Dialog::Closed => html! {},
                    Dialog::Adding => html! {
                        <FinanceDialog title="New entry" date={props.date} on_close={close_dialog.clone()} on_saved={on_saved.clone()} />
                    },
                    Dialog::Editing(entry) => html! {
                        <FinanceDialog key={entry.id} title="Edit entry" date={props.date} entry={Some(entry.clone())} on_close={close_dialog.clone()} on_saved={on_saved.clone()} />
                    },
                }
            }
        </div>
    }
}

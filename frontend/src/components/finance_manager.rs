use chrono::NaiveDate;
use web_sys::HtmlSelectElement;
use yew::prelude::*;

use super::calendar::{CalendarKind, CalendarView};
use super::finance_list::FinanceList;
use super::tag_filter::{TagFilter, TagSource};
use crate::aggregate::format_money;
use crate::hooks::{use_finance_by_day, use_finance_total};
use crate::period::{iso, month_start, recent_months, Span, View};

const PICKER_MONTHS: u32 = 24;

pub fn month_option_label(month: NaiveDate) -> String {
    month.format("%B %Y").to_string()
}

#[derive(Properties, PartialEq)]
pub struct FinanceManagerProps {
    pub today: NaiveDate,
}

#[function_component(FinanceManager)]
pub fn finance_manager(props: &FinanceManagerProps) -> Html {
    let view = use_state(|| View::Day);
    let date = use_state(|| props.today);
    let tag = use_state(String::new);
    let refresh = use_state(|| 0_u32);

    let by_day = use_finance_by_day(*date, *refresh);
    let week_total = use_finance_total(Span::Week, *date, *refresh);
    let month_total = use_finance_total(Span::Month, *date, *refresh);

    let on_view = {
        let view = view.clone();
        Callback::from(move |next: View| view.set(next))
    };
    let on_date = {
        let date = date.clone();
        Callback::from(move |next: NaiveDate| date.set(next))
    };
    let on_tag = {
        let tag = tag.clone();
        Callback::from(move |next: String| tag.set(next))
    };
    let on_changed = {
        let refresh = refresh.clone();
        Callback::from(move |_: ()| refresh.set(refresh.wrapping_add(1)))
    };
    let on_month = {
        let date = date.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            match NaiveDate::parse_from_str(&select.value(), "%Y-%m-%d") {
                Ok(month) => date.set(month),
                Err(err) => log::warn!("ignoring month {:?}: {}", select.value(), err),
            }
        })
    };

    let selected_month = month_start(*date);

    html! {
        <section class="bg-[#181a20] border border-[#333] rounded-2xl p-4">
            <h2 class="text-xl font-bold text-[#00e676] mb-4">{"Finances"}</h2>

            <div class="grid grid-cols-2 gap-3 mb-4">
                <div class="bg-[#23272f] rounded-lg p-3 text-center">
                    <p class="text-xs text-slate-400">{"Week total"}</p>
                    <p class="text-lg font-black text-[#00e676]">{ format!("$ {}", format_money(week_total)) }</p>
                </div>
                <div class="bg-[#23272f] rounded-lg p-3 text-center">
                    <p class="text-xs text-slate-400">{"Month total"}</p>
                    <p class="text-lg font-black text-[#00e676]">{ format!("$ {}", format_money(month_total)) }</p>
                </div>
            </div>

            if *view == View::Month {
                <div class="flex justify-end mb-2">
                    <select class="bg-[#23272f] border border-[#333] rounded-lg px-3 py-1 text-sm text-white" onchange={on_month}>
                        { for recent_months(props.today, PICKER_MONTHS).into_iter().map(|month| html! {
                            <option value={iso(month)} selected={month == selected_month}>{ month_option_label(month) }</option>
                        }) }
                    </select>
                </div>
            }

            <CalendarView
                kind={CalendarKind::Finance}
                view={*view}
                date={*date}
                today={props.today}
                values={by_day}
                on_view={on_view}
                on_date={on_date}
            />

            <TagFilter
                source={TagSource::Finances}
                view={*view}
                date={*date}
                selected={(*tag).clone()}
                on_change={on_tag}
                refresh={*refresh}
            />

            <FinanceList view={*view} date={*date} tag={(*tag).clone()} refresh={*refresh} on_changed={on_changed} />
        </section>
    }
}

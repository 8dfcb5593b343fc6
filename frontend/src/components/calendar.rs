use chrono::{Datelike, NaiveDate};
use yew::prelude::*;

use super::icons::{icon_chevron_left, icon_chevron_right, icon_dollar, icon_plus};
use crate::aggregate::{format_money, percent, progress_css, DailyAggregate};
use crate::period::{days_for, iso, View};

#[derive(Clone, Copy, PartialEq)]
pub enum CalendarKind {
    Progress,
    Finance,
}

pub fn circle_size(view: View) -> u32 {
    match view {
        View::Day => 90,
        View::Week => 60,
        View::Month => 38,
    }
}

/// Label under a calendar cell: weekday name and `DD/MM` in day view, a
/// two-letter weekday in week view, the day number in month view.
pub fn day_label(view: View, date: NaiveDate) -> Vec<String> {
    match view {
        View::Day => vec![
            date.format("%A").to_string(),
            date.format("%d/%m").to_string(),
        ],
        View::Week => vec![date.format("%a").to_string().chars().take(2).collect()],
        View::Month => vec![date.day().to_string()],
    }
}

#[derive(Properties, PartialEq)]
pub struct DayProgressProps {
    pub value: f64,
    pub size: u32,
    pub show_percent: bool,
}

#[function_component(DayProgress)]
pub fn day_progress(props: &DayProgressProps) -> Html {
    let stroke = 4.0;
    let size = props.size as f64;
    let radius = (size - stroke) / 2.0;
    let circumference = 2.0 * std::f64::consts::PI * radius;
    let filled = circumference * props.value.clamp(0.0, 1.0);
    let center = size / 2.0;

    html! {
        <div class="relative inline-flex items-center justify-center" style={format!("width: {}px; height: {}px", props.size, props.size)}>
            <svg width={props.size.to_string()} height={props.size.to_string()} class="-rotate-90">
                <circle cx={center.to_string()} cy={center.to_string()} r={radius.to_string()} fill="none" stroke="#333" stroke-width={stroke.to_string()} />
                <circle
                    cx={center.to_string()}
                    cy={center.to_string()}
                    r={radius.to_string()}
                    fill="none"
                    stroke={progress_css(props.value)}
                    stroke-width={stroke.to_string()}
                    stroke-dasharray={format!("{} {}", filled, circumference)}
                />
            </svg>
            if props.show_percent {
                <span class="absolute font-semibold text-white" style={format!("font-size: {}px", (size * 0.35) as u32)}>
                    { format!("{}%", percent(props.value)) }
                </span>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct DayFinanceProps {
    pub value: f64,
    pub view: View,
}

#[function_component(DayFinance)]
pub fn day_finance(props: &DayFinanceProps) -> Html {
    let font_size = match props.view {
        View::Day => 28,
        View::Week => 16,
        View::Month => 13,
    };
    html! {
        <div class="flex items-center justify-center font-black text-[#00e676]" style={format!("height: {}px; font-size: {}px", circle_size(props.view), font_size)}>
            { icon_dollar() }
            <span>{ format_money(props.value) }</span>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CalendarViewProps {
    pub kind: CalendarKind,
    pub view: View,
    pub date: NaiveDate,
    pub today: NaiveDate,
    pub values: DailyAggregate,
    pub on_view: Callback<View>,
    pub on_date: Callback<NaiveDate>,
    #[prop_or_default]
    pub on_add: Option<Callback<()>>,
}

#[function_component(CalendarView)]
pub fn calendar_view(props: &CalendarViewProps) -> Html {
    let view = props.view;
    let size = circle_size(view);
    let days = days_for(view, props.date);

    let on_prev = {
        let on_date = props.on_date.clone();
        let date = props.date;
        Callback::from(move |_| on_date.emit(view.step(date, false)))
    };
    let on_next = {
        let on_date = props.on_date.clone();
        let date = props.date;
        Callback::from(move |_| on_date.emit(view.step(date, true)))
    };

    let grid_class = if view == View::Month {
        "flex flex-wrap gap-1 justify-start flex-1"
    } else {
        "flex flex-wrap gap-2 justify-center flex-1"
    };

    html! {
        <div class="mb-6 border-2 border-[#333] rounded-xl p-4 bg-[#23272f] min-h-[220px] flex flex-col">
            <div class="flex items-center justify-between mb-4">
                <button class="p-1 text-slate-300 hover:text-white" aria-label="Previous" onclick={on_prev}>{ icon_chevron_left() }</button>
                <div class="inline-flex rounded-lg overflow-hidden border border-[#90caf9]">
                    { for View::ALL.iter().map(|option| {
                        let option = *option;
                        let on_view = props.on_view.clone();
                        let class_name = if option == view {
                            "px-3 py-1 text-sm font-semibold bg-[#90caf9] text-[#181a20]"
                        } else {
                            "px-3 py-1 text-sm text-[#90caf9] hover:bg-white/5"
                        };
                        html! {
                            <button type="button" class={class_name} onclick={Callback::from(move |_| on_view.emit(option))}>
                                { option.label() }
                            </button>
                        }
                    }) }
                </div>
                <button class="p-1 text-slate-300 hover:text-white" aria-label="Next" onclick={on_next}>{ icon_chevron_right() }</button>
            </div>

            <div class={grid_class}>
                { for days.into_iter().map(|day| {
                    let value = props.values.get(day);
                    let on_date = props.on_date.clone();
                    let label_class = if day == props.today {
                        "mt-1 text-center leading-tight text-[#90caf9] font-bold"
                    } else {
                        "mt-1 text-center leading-tight text-[#90caf9]"
                    };
                    html! {
                        <button
                            key={iso(day)}
                            type="button"
                            class="flex flex-col items-center"
                            style={format!("width: {}px", size + 8)}
                            onclick={Callback::from(move |_| on_date.emit(day))}
                        >
                            {
                                match props.kind {
                                    CalendarKind::Progress => html! {
                                        <DayProgress value={value} size={size} show_percent={view == View::Day} />
                                    },
                                    CalendarKind::Finance => html! { <DayFinance value={value} view={view} /> },
                                }
                            }
                            <span class={label_class} style={format!("font-size: {}px", if view == View::Day { 13 } else { 11 })}>
                                { for day_label(view, day).into_iter().map(|line| html! { <span class="block">{ line }</span> }) }
                            </span>
                        </button>
                    }
                }) }
            </div>

            {
                if let Some(on_add) = props.on_add.clone() {
                    html! {
                        <div class="flex justify-center mt-4">
                            <button
                                class="flex items-center gap-2 border border-[#888] text-white font-bold rounded-lg px-4 py-1 hover:border-[#90caf9]"
                                onclick={Callback::from(move |_| on_add.emit(()))}
                            >
                                { icon_plus() }
                                {"New task"}
                            </button>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn labels_per_view() {
        let date = d(2024, 5, 1);
        assert_eq!(day_label(View::Day, date), vec!["Wednesday", "01/05"]);
        assert_eq!(day_label(View::Week, date), vec!["We"]);
        assert_eq!(day_label(View::Month, date), vec!["1"]);
    }

    #[test]
    fn circles_shrink_with_wider_views() {
        assert!(circle_size(View::Day) > circle_size(View::Week));
        assert!(circle_size(View::Week) > circle_size(View::Month));
    }
}

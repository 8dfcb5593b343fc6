use chrono::{Local, NaiveDate};
use yew::prelude::*;

use super::calendar::{CalendarKind, CalendarView};
use super::finance_manager::FinanceManager;
use super::icons::icon_log_out;
use super::login::LoginForm;
use super::modal::Modal;
use super::tag_filter::{TagFilter, TagSource};
use super::task_form::TaskForm;
use super::task_list::TaskList;
use crate::api::auth;
use crate::client::ApiClient;
use crate::config::AppConfig;
use crate::hooks::{use_api_client, use_task_progress_by_day};
use crate::models::Task;
use crate::period::View;
use crate::session::SessionState;

#[function_component(App)]
pub fn app() -> Html {
    let client = (*use_memo(|_| ApiClient::browser(AppConfig::from_env()), ())).clone();
    let session_state = {
        let session = client.session().clone();
        use_state(move || session.state())
    };

    {
        let session = client.session().clone();
        let session_state = session_state.clone();
        use_effect_with_deps(
            move |_| {
                let subscription = session.subscribe(move |state| session_state.set(state));
                move || drop(subscription)
            },
            (),
        );
    }

    let content = match *session_state {
        SessionState::Unauthenticated => html! { <LoginForm /> },
        SessionState::Authenticated => html! { <Dashboard /> },
    };

    html! {
        <ContextProvider<ApiClient> context={client}>
            { content }
        </ContextProvider<ApiClient>>
    }
}

#[function_component(Dashboard)]
fn dashboard() -> Html {
    let client = use_api_client();
    let today = *use_state(|| Local::now().date_naive());

    let on_logout = Callback::from(move |_| {
        auth::logout(&client);
    });

    html! {
        <div class="min-h-screen bg-[#181a20] text-white">
            <header class="flex items-center justify-between px-6 py-4 border-b border-[#333]">
                <h1 class="text-2xl font-bold text-[#90caf9]">{"Daily Task Manager"}</h1>
                <button class="flex items-center gap-2 text-sm text-slate-300 hover:text-white" onclick={on_logout}>
                    { icon_log_out() }{"Logout"}
                </button>
            </header>
            <main class="grid grid-cols-1 lg:grid-cols-2 gap-6 p-6">
                <TaskPanel today={today} />
                <FinanceManager today={today} />
            </main>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TaskPanelProps {
    today: NaiveDate,
}

#[function_component(TaskPanel)]
fn task_panel(props: &TaskPanelProps) -> Html {
    let view = use_state(|| View::Day);
    let date = use_state(|| props.today);
    let tag = use_state(String::new);
    let refresh = use_state(|| 0_u32);
    let adding = use_state(|| false);

    let progress = use_task_progress_by_day(*date, *refresh);

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
    let open_add = {
        let adding = adding.clone();
        Callback::from(move |_: ()| adding.set(true))
    };
    let close_add = {
        let adding = adding.clone();
        Callback::from(move |_: ()| adding.set(false))
    };
    let on_created = {
        let adding = adding.clone();
        let on_changed = on_changed.clone();
        Callback::from(move |_: Task| {
            adding.set(false);
            on_changed.emit(());
        })
    };

    html! {
        <section class="bg-[#181a20] border border-[#333] rounded-2xl p-4">
            <h2 class="text-xl font-bold text-[#90caf9] mb-4">{"Tasks"}</h2>
            <CalendarView
                kind={CalendarKind::Progress}
                view={*view}
                date={*date}
                today={props.today}
                values={progress}
                on_view={on_view}
                on_date={on_date}
                on_add={Some(open_add)}
            />
            <TagFilter
                source={TagSource::Tasks}
                view={*view}
                date={*date}
                selected={(*tag).clone()}
                on_change={on_tag}
                refresh={*refresh}
            />
            <TaskList view={*view} date={*date} tag={(*tag).clone()} refresh={*refresh} on_changed={on_changed} />
            if *adding {
                <Modal title="New task" on_close={close_add}>
                    <TaskForm date={*date} on_saved={on_created} />
                </Modal>
            }
        </section>
    }
}

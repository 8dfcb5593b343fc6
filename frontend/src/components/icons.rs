use yew::prelude::*;

fn icon_base(path: &'static str) -> Html {
    html! {
        <svg width="18" height="18" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round">
            <path d={path}></path>
        </svg>
    }
}

pub fn icon_plus() -> Html {
    icon_base("M12 5v14M5 12h14")
}
pub fn icon_more() -> Html {
    icon_base("M12 5h.01M12 12h.01M12 19h.01")
}
pub fn icon_tag() -> Html {
    icon_base("M20.59 13.41l-7.17 7.17a2 2 0 01-2.83 0L2 12V2h10l8.59 8.59a2 2 0 010 2.82zM7 7h.01")
}
pub fn icon_calendar() -> Html {
    icon_base("M3 4h18v18H3zM16 2v4M8 2v4M3 10h18")
}
pub fn icon_chevron_left() -> Html {
    icon_base("M15 18l-6-6 6-6")
}
pub fn icon_chevron_right() -> Html {
    icon_base("M9 18l6-6-6-6")
}
pub fn icon_log_out() -> Html {
    icon_base("M9 21H5a2 2 0 01-2-2V5a2 2 0 012-2h4M16 17l5-5-5-5M21 12H9")
}
pub fn icon_dollar() -> Html {
    icon_base("M12 1v22M17 5H9.5a3.5 3.5 0 000 7h5a3.5 3.5 0 010 7H6")
}

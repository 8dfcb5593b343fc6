pub mod app;
pub mod calendar;
pub mod finance_list;
pub mod finance_manager;
pub mod icons;
pub mod list_state;
pub mod login;
pub mod modal;
pub mod tag_filter;
pub mod task_form;
pub mod task_list;

pub use app::App;

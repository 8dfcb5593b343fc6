mod aggregate;
mod api;
mod client;
mod components;
mod config;
mod error;
mod guard;
mod hooks;
mod logger;
mod models;
mod period;
mod session;
mod storage;
mod tags;
mod transport;

use components::App;
use config::AppConfig;

fn main() {
    console_error_panic_hook::set_once();
    let config = AppConfig::from_env();
    logger::init(config.log_level);
    log::info!(
        "starting, api base {}",
        config.api_base_url.as_deref().unwrap_or("(same origin)")
    );
    yew::Renderer::<App>::new().render();
}

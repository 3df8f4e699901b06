use yew::prelude::*;

pub mod api_client;
pub mod common;
pub mod components;
pub mod context;
pub mod hooks;
pub mod settings;
pub mod storage;

use crate::common::toast::ToastProvider;
use crate::components::layout::{ActivePage, Content, Navbar, Sidebar};
use crate::context::BusinessInfoProvider;

#[function_component(Shell)]
fn shell() -> Html {
    let active = use_state(ActivePage::default);

    let on_select = {
        let active = active.clone();
        Callback::from(move |page: ActivePage| {
            log::debug!("Switching to {:?}", page);
            active.set(page);
        })
    };

    html! {
        <div class="drawer lg:drawer-open">
            <input id="main-drawer" type="checkbox" class="drawer-toggle" />
            <div class="drawer-content flex flex-col min-h-screen bg-base-200 transition-all duration-300">
                <Navbar title={active.label()} />
                <Content active={*active} on_navigate={on_select.clone()} />
            </div>
            <Sidebar active={*active} {on_select} />
        </div>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <ToastProvider>
            <BusinessInfoProvider>
                <Shell />
            </BusinessInfoProvider>
        </ToastProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    settings::init_settings();

    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== SupplyChain Frontend Application Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("API base URL: {}", settings.api_base_url());
    log::debug!("Debug mode: {}", settings.debug_mode);

    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}

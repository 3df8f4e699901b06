use yew::prelude::*;

use super::ActivePage;
use crate::components::dashboard::Dashboard;
use crate::components::forecast::DemandForecasting;
use crate::components::inventory::InventoryManagement;
use crate::components::logistics::Logistics;
use crate::components::reports::Reports;
use crate::components::scenarios::WhatIfScenarios;
use crate::components::settings::Settings;
use crate::context::BusinessInfoContext;

#[derive(Properties, PartialEq)]
pub struct ContentProps {
    pub active: ActivePage,
    pub on_navigate: Callback<ActivePage>,
}

#[function_component(Content)]
pub fn content(props: &ContentProps) -> Html {
    let business = use_context::<BusinessInfoContext>().unwrap_or_default();
    log::trace!("Rendering {:?}", props.active);

    let profile_notice = (props.active.needs_profile() && !business.profile.is_complete()).then(|| {
        let on_navigate = props.on_navigate.clone();
        let onclick = Callback::from(move |_: MouseEvent| on_navigate.emit(ActivePage::Settings));
        html! {
            <div role="alert" class="alert alert-info mb-4">
                <i class="fas fa-info-circle"></i>
                <span>{"Complete your business profile to get tailored results."}</span>
                <button class="btn btn-sm" {onclick}>{"Open settings"}</button>
            </div>
        }
    });

    let page = match props.active {
        ActivePage::Dashboard => html! { <Dashboard /> },
        ActivePage::DemandForecasting => html! { <DemandForecasting /> },
        ActivePage::Inventory => html! { <InventoryManagement /> },
        ActivePage::Logistics => html! { <Logistics /> },
        ActivePage::Scenarios => html! { <WhatIfScenarios /> },
        ActivePage::Reports => html! { <Reports /> },
        ActivePage::Settings => html! { <Settings /> },
    };

    html! {
        <main class="flex-1 p-6 overflow-y-auto">
            {profile_notice.unwrap_or_default()}
            {page}
        </main>
    }
}

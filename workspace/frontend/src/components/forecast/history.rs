use common::forecast::ForecastHistoryEntry;
use yew::prelude::*;

use crate::common::fetch_render::FetchRender;
use crate::hooks::FetchState;

#[derive(Properties, PartialEq)]
pub struct ForecastHistoryProps {
    pub state: FetchState<Vec<ForecastHistoryEntry>>,
    /// Id of the forecast on screen, highlighted in the list.
    pub current: Option<i32>,
    pub on_open: Callback<i32>,
    pub on_retry: Callback<()>,
}

/// Previously generated forecasts, newest first. Clicking one reloads it.
#[function_component(ForecastHistory)]
pub fn forecast_history(props: &ForecastHistoryProps) -> Html {
    let render = {
        let on_open = props.on_open.clone();
        let current = props.current;
        Callback::from(move |entries: Vec<ForecastHistoryEntry>| {
            if entries.is_empty() {
                return html! { <p class="text-sm opacity-60">{"No forecasts yet."}</p> };
            }
            html! {
                <ul class="menu menu-sm p-0">
                    {for entries.iter().map(|entry| {
                        let id = entry.id;
                        let on_open = on_open.clone();
                        let onclick = Callback::from(move |_: MouseEvent| on_open.emit(id));
                        let title = entry
                            .business_name
                            .clone()
                            .unwrap_or_else(|| entry.business_type.clone());
                        html! {
                            <li key={id}>
                                <a class={classes!((current == Some(id)).then_some("active"))} {onclick}>
                                    <div class="flex flex-col">
                                        <span class="font-medium">{format!("#{} {}", id, title)}</span>
                                        <span class="text-xs opacity-70">
                                            {format!("{} · {} months · from {}", entry.location, entry.forecast_period, entry.forecast_start)}
                                        </span>
                                        if let Some(peak) = &entry.peak_festival {
                                            <span class="text-xs opacity-70">{format!("Peak: {}", peak)}</span>
                                        }
                                    </div>
                                </a>
                            </li>
                        }
                    })}
                </ul>
            }
        })
    };

    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body p-4">
                <h3 class="card-title text-base">{"History"}</h3>
                <FetchRender<Vec<ForecastHistoryEntry>> state={props.state.clone()} {render}
                    on_retry={props.on_retry.clone()} />
            </div>
        </div>
    }
}

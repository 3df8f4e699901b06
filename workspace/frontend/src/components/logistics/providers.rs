use common::logistics::{LocationPair, ProviderComparison as Comparison};
use yew::prelude::*;

use crate::api_client::logistics;
use crate::common::fetch_hook::use_fetch;
use crate::common::fetch_render::FetchRender;
use crate::components::form::format_inr;

fn render_comparison(comparison: Comparison) -> Html {
    let tag = |provider: &str| {
        let cheapest = comparison.cheapest.as_deref() == Some(provider);
        let fastest = comparison.fastest.as_deref() == Some(provider);
        html! {
            <>
                if cheapest { <span class="badge badge-success badge-sm ml-1">{"cheapest"}</span> }
                if fastest { <span class="badge badge-info badge-sm ml-1">{"fastest"}</span> }
            </>
        }
    };

    html! {
        <div class="space-y-2">
            <p class="text-sm opacity-70">
                {format!("{} → {}, {:.0} km", comparison.origin, comparison.destination, comparison.distance_km)}
            </p>
            <table class="table table-sm">
                <thead>
                    <tr><th>{"Provider"}</th><th>{"Mode"}</th><th class="text-right">{"Hours"}</th><th class="text-right">{"Cost"}</th><th>{"Notes"}</th></tr>
                </thead>
                <tbody>
                    {for comparison.providers.iter().map(|quote| html! {
                        <tr>
                            <td class="font-medium">{&quote.provider}{tag(&quote.provider)}</td>
                            <td>{quote.mode.as_str()}</td>
                            <td class="text-right">{format!("{:.1}", quote.estimated_time_hours)}</td>
                            <td class="text-right">{format_inr(quote.estimated_cost)}</td>
                            <td class="text-xs opacity-70">{&quote.notes}</td>
                        </tr>
                    })}
                </tbody>
            </table>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct ProviderComparisonProps {
    pub route: LocationPair,
}

#[function_component(ProviderComparison)]
pub fn provider_comparison(props: &ProviderComparisonProps) -> Html {
    let (comparison, retry) = use_fetch(props.route.clone(), |route| async move {
        logistics::compare_providers(&route).await
    });
    html! {
        <FetchRender<Comparison> state={(*comparison).clone()} render={Callback::from(render_comparison)}
            on_retry={retry} loading_text="Collecting quotes..." />
    }
}

use common::inventory::InventoryAnalytics;
use common::logistics::LogisticsAnalytics;
use common::reports::ExecutiveSummary;
use yew::prelude::*;

use super::form::format_inr;
use crate::api_client::{inventory, logistics, reports};
use crate::common::fetch_hook::use_fetch;
use crate::common::fetch_render::FetchRender;
use crate::context::BusinessInfoContext;

#[derive(Properties, PartialEq)]
struct StatProps {
    title: AttrValue,
    value: String,
    #[prop_or_default]
    desc: Option<String>,
    #[prop_or_default]
    class: Classes,
}

#[function_component(Stat)]
fn stat(props: &StatProps) -> Html {
    html! {
        <div class="stats shadow bg-base-100">
            <div class="stat">
                <div class="stat-title">{&props.title}</div>
                <div class={classes!("stat-value", "text-2xl", props.class.clone())}>{&props.value}</div>
                if let Some(desc) = &props.desc {
                    <div class="stat-desc">{desc}</div>
                }
            </div>
        </div>
    }
}

fn bullet_list(title: &str, icon: &str, items: &[String]) -> Html {
    if items.is_empty() {
        return html! {};
    }
    html! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <h3 class="card-title text-base"><i class={icon}></i>{" "}{title}</h3>
                <ul class="list-disc list-inside text-sm space-y-1">
                    {for items.iter().map(|item| html! { <li>{item}</li> })}
                </ul>
            </div>
        </div>
    }
}

fn render_summary(summary: ExecutiveSummary) -> Html {
    let growth_class = if summary.growth_rate >= 0.0 { "text-success" } else { "text-error" };
    html! {
        <>
            <div class="grid grid-cols-1 md:grid-cols-4 gap-4">
                <Stat title="Total sales" value={format_inr(summary.total_sales)} desc={Some(summary.period.clone())} />
                <Stat title="Growth" value={format!("{:+.1}%", summary.growth_rate)} class={classes!(growth_class)} />
                <Stat title="Forecast accuracy" value={format!("{:.1}%", summary.forecast_accuracy)} />
                <Stat title="Inventory turnover" value={format!("{:.1}x", summary.inventory_turnover)} />
            </div>
            <div class="grid grid-cols-1 lg:grid-cols-3 gap-4 mt-4">
                {bullet_list("Key insights", "fas fa-lightbulb", &summary.key_insights)}
                {bullet_list("Recommendations", "fas fa-check", &summary.recommendations)}
                {bullet_list("Alerts", "fas fa-bell", &summary.alerts)}
            </div>
        </>
    }
}

fn render_inventory(analytics: InventoryAnalytics) -> Html {
    let alert_class = if analytics.reorder_alerts > 0 { "text-warning" } else { "text-success" };
    html! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            <Stat title="Stock value" value={format_inr(analytics.total_value)}
                desc={Some(format!("{} items", analytics.total_items))} />
            <Stat title="Reorder alerts" value={analytics.reorder_alerts.to_string()} class={classes!(alert_class)} />
            <Stat title="Turnover rate" value={format!("{:.1}", analytics.turnover_rate)}
                desc={Some(format!("Carrying cost {}", format_inr(analytics.carrying_cost)))} />
        </div>
    }
}

fn render_logistics(analytics: LogisticsAnalytics) -> Html {
    html! {
        <div class="grid grid-cols-1 md:grid-cols-3 gap-4">
            <Stat title="Shipments" value={analytics.total_shipments.to_string()} />
            <Stat title="On-time delivery" value={format!("{:.1}%", analytics.on_time_delivery_rate)}
                desc={Some(format!("Avg {:.1} days", analytics.average_delivery_time_days))} />
            <Stat title="Shipping cost" value={format_inr(analytics.total_shipping_cost)}
                desc={Some(format!("{} per shipment", format_inr(analytics.average_cost_per_shipment)))} />
        </div>
    }
}

#[function_component(Dashboard)]
pub fn dashboard() -> Html {
    let business = use_context::<BusinessInfoContext>().unwrap_or_default();

    let (summary, retry_summary) = use_fetch((), |_| reports::get_executive_summary());
    let (stock, retry_stock) = use_fetch((), |_| inventory::get_inventory_analytics());
    let (shipping, retry_shipping) = use_fetch((), |_| logistics::get_analytics());

    let greeting = if business.profile.is_complete() {
        format!("{} in {}", business.profile.business_type, business.profile.location)
    } else {
        "Complete your business profile in Settings to personalise forecasts.".to_string()
    };

    html! {
        <div class="space-y-8">
            <p class="text-base-content/70">{greeting}</p>

            <section>
                <h2 class="text-lg font-semibold mb-3">{"Executive summary"}</h2>
                <FetchRender<ExecutiveSummary> state={(*summary).clone()}
                    render={Callback::from(render_summary)} on_retry={retry_summary} />
            </section>

            <section>
                <h2 class="text-lg font-semibold mb-3">{"Inventory"}</h2>
                <FetchRender<InventoryAnalytics> state={(*stock).clone()}
                    render={Callback::from(render_inventory)} on_retry={retry_stock} />
            </section>

            <section>
                <h2 class="text-lg font-semibold mb-3">{"Logistics"}</h2>
                <FetchRender<LogisticsAnalytics> state={(*shipping).clone()}
                    render={Callback::from(render_logistics)} on_retry={retry_shipping} />
            </section>
        </div>
    }
}

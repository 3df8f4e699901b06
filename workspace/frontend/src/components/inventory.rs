use chrono::Local;
use common::export::inventory_to_csv;
use common::inventory::{InventoryItem, InventoryQuery, StockStatus};
use yew::prelude::*;

use super::form::{format_inr, input_value, select_value};
use crate::api_client::inventory;
use crate::common::download::{download_text, export_file_name, ExportFormat};
use crate::common::fetch_hook::use_fetch;
use crate::common::fetch_render::FetchRender;
use crate::common::toast::ToastContext;

const STATUSES: [StockStatus; 4] = [
    StockStatus::Critical,
    StockStatus::Low,
    StockStatus::Healthy,
    StockStatus::Overstock,
];

const CATEGORIES: [&str; 6] =
    ["Grocery", "Electronics", "Clothing", "Medical", "Cosmetics", "Food & Beverage"];

pub fn status_badge_class(status: StockStatus) -> &'static str {
    match status {
        StockStatus::Critical => "badge-error",
        StockStatus::Low => "badge-warning",
        StockStatus::Healthy => "badge-success",
        StockStatus::Overstock => "badge-info",
    }
}

fn non_empty(value: String) -> Option<String> {
    let value = value.trim().to_string();
    (!value.is_empty()).then_some(value)
}

fn render_table(items: Vec<InventoryItem>) -> Html {
    if items.is_empty() {
        return html! {
            <div class="alert alert-info">
                <i class="fas fa-info-circle"></i>
                <span>{"No items match these filters."}</span>
            </div>
        };
    }

    html! {
        <div class="overflow-x-auto bg-base-100 rounded-box shadow">
            <table class="table table-zebra">
                <thead>
                    <tr>
                        <th>{"Item"}</th>
                        <th>{"Category"}</th>
                        <th class="text-right">{"Stock"}</th>
                        <th class="text-right">{"Min / Max"}</th>
                        <th class="text-right">{"Value"}</th>
                        <th>{"Status"}</th>
                    </tr>
                </thead>
                <tbody>
                    {for items.iter().map(|item| {
                        let row_class = item.status.needs_reorder().then_some("bg-warning/10");
                        html! {
                            <tr key={item.id} class={classes!(row_class)}>
                                <td>
                                    <div class="font-medium">{&item.name}</div>
                                    <div class="text-xs opacity-60">{item.sku.clone().unwrap_or_default()}</div>
                                </td>
                                <td>{&item.category}</td>
                                <td class="text-right">{item.current_stock}</td>
                                <td class="text-right">{format!("{} / {}", item.min_stock_level, item.max_stock_level)}</td>
                                <td class="text-right">{format_inr(item.stock_value())}</td>
                                <td>
                                    <span class={classes!("badge", status_badge_class(item.status))}>
                                        {item.status.as_str()}
                                    </span>
                                </td>
                            </tr>
                        }
                    })}
                </tbody>
            </table>
        </div>
    }
}

#[function_component(InventoryManagement)]
pub fn inventory_management() -> Html {
    let toast = use_context::<ToastContext>();
    let query = use_state(InventoryQuery::default);

    let (items, retry) = use_fetch((*query).clone(), |query| async move {
        inventory::get_inventory(&query).await
    });
    let (low_stock, _) = use_fetch((), |_| inventory::get_low_stock());

    let set_filter = |apply: fn(&mut InventoryQuery, Option<String>), read: fn(&Event) -> String| {
        let query = query.clone();
        Callback::from(move |e: Event| {
            let mut next = (*query).clone();
            apply(&mut next, non_empty(read(&e)));
            query.set(next);
        })
    };

    let on_export = {
        let items = items.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(rows) = items.data() else {
                return;
            };
            let result = inventory_to_csv(rows).map_err(|e| e.to_string()).and_then(|csv| {
                let today = Local::now().date_naive();
                let name = export_file_name("inventory", "", today, ExportFormat::Csv);
                download_text(&name, ExportFormat::Csv, &csv)
            });
            if let (Err(e), Some(toast)) = (result, &toast) {
                toast.show_error(format!("Export failed: {}", e));
            }
        })
    };

    let low_stock_banner = low_stock
        .data()
        .filter(|items| !items.is_empty())
        .map(|items| {
            let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
            html! {
                <div class="alert alert-warning">
                    <i class="fas fa-exclamation-triangle"></i>
                    <span>{format!("{} items need reordering: {}", items.len(), names.join(", "))}</span>
                </div>
            }
        });

    html! {
        <div class="space-y-4">
            {low_stock_banner.unwrap_or_default()}

            <div class="flex flex-wrap gap-2 items-end">
                <input type="search" class="input input-bordered input-sm w-64" placeholder="Search name or SKU"
                    value={query.search.clone().unwrap_or_default()}
                    onchange={set_filter(|q, v| q.search = v, input_value)} />
                <select class="select select-bordered select-sm" onchange={set_filter(|q, v| q.category = v, select_value)}>
                    <option value="" selected={query.category.is_none()}>{"All categories"}</option>
                    {for CATEGORIES.iter().map(|c| html! {
                        <option value={*c} selected={query.category.as_deref() == Some(*c)}>{*c}</option>
                    })}
                </select>
                <select class="select select-bordered select-sm" onchange={set_filter(|q, v| q.status = v, select_value)}>
                    <option value="" selected={query.status.is_none()}>{"Any status"}</option>
                    {for STATUSES.iter().map(|s| html! {
                        <option value={s.as_str()} selected={query.status.as_deref() == Some(s.as_str())}>{s.as_str()}</option>
                    })}
                </select>
                <div class="flex-1"></div>
                <button class="btn btn-sm btn-outline" onclick={on_export} disabled={items.data().is_none()}>
                    <i class="fas fa-file-csv"></i>{" Export CSV"}
                </button>
            </div>

            <FetchRender<Vec<InventoryItem>> state={(*items).clone()}
                render={Callback::from(render_table)} on_retry={retry} loading_text="Loading inventory..." />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reorder_statuses_use_warning_colours() {
        assert_eq!(status_badge_class(StockStatus::Critical), "badge-error");
        assert_eq!(status_badge_class(StockStatus::Low), "badge-warning");
        assert_eq!(status_badge_class(StockStatus::Healthy), "badge-success");
    }

    #[test]
    fn test_blank_filter_is_none() {
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty(" Medical ".to_string()), Some("Medical".to_string()));
    }
}

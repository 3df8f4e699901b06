use chrono::NaiveDate;
use common::reports::{GenerateReportRequest, ReportKind, ReportReceipt};
use serde_json::Value;
use yew::prelude::*;

use super::form::{input_value, select_value};
use crate::api_client::reports;
use crate::common::fetch_hook::use_fetch;
use crate::common::fetch_render::FetchRender;
use crate::common::loading::Loading;
use crate::common::toast::ToastContext;

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()
}

/// Checks the optional range before it is sent.
pub fn build_request(
    kind: ReportKind,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Result<GenerateReportRequest, String> {
    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err("The start date must not be after the end date".to_string());
        }
    }
    Ok(GenerateReportRequest {
        report_type: kind.slug().to_string(),
        start_date: start,
        end_date: end,
    })
}

fn render_json(report: Value) -> Html {
    let pretty = serde_json::to_string_pretty(&report).unwrap_or_else(|_| report.to_string());
    html! {
        <pre class="bg-base-200 rounded-box p-4 text-xs overflow-x-auto max-h-[32rem]">{pretty}</pre>
    }
}

fn render_receipt(receipt: &ReportReceipt) -> Html {
    html! {
        <div class="alert alert-success">
            <i class="fas fa-file-pdf"></i>
            <div class="flex flex-col text-sm">
                <span class="font-semibold">{format!("{} ({})", receipt.file_name, receipt.status)}</span>
                <span>{format!("{} pages, report id {}", receipt.pages, receipt.report_id)}</span>
                <span class="opacity-70">{&receipt.download_url}</span>
            </div>
        </div>
    }
}

#[function_component(Reports)]
pub fn reports_page() -> Html {
    let toast = use_context::<ToastContext>();
    let kind = use_state(|| ReportKind::ExecutiveSummary);
    let start = use_state(|| None::<NaiveDate>);
    let end = use_state(|| None::<NaiveDate>);
    let generating = use_state(|| false);
    let receipt = use_state(|| None::<ReportReceipt>);
    let form_error = use_state(|| None::<String>);

    let (report, retry) = use_fetch(*kind, reports::get_report);

    let on_kind = {
        let kind = kind.clone();
        let receipt = receipt.clone();
        Callback::from(move |e: Event| {
            match select_value(&e).parse::<ReportKind>() {
                Ok(next) => {
                    kind.set(next);
                    receipt.set(None);
                }
                Err(err) => log::warn!("Ignoring report selection: {}", err),
            }
        })
    };

    let on_start = {
        let start = start.clone();
        Callback::from(move |e: Event| start.set(parse_date(&input_value(&e))))
    };
    let on_end = {
        let end = end.clone();
        Callback::from(move |e: Event| end.set(parse_date(&input_value(&e))))
    };

    let on_generate = {
        let kind = kind.clone();
        let start = start.clone();
        let end = end.clone();
        let generating = generating.clone();
        let receipt = receipt.clone();
        let form_error = form_error.clone();
        Callback::from(move |_: MouseEvent| {
            if *generating {
                return;
            }
            let request = match build_request(*kind, *start, *end) {
                Ok(request) => request,
                Err(e) => {
                    form_error.set(Some(e));
                    return;
                }
            };
            form_error.set(None);
            generating.set(true);

            let generating = generating.clone();
            let receipt = receipt.clone();
            let toast = toast.clone();
            wasm_bindgen_futures::spawn_local(async move {
                match reports::generate_report(&request).await {
                    Ok(done) => {
                        if let Some(toast) = &toast {
                            toast.show_success(format!("{} generated", done.file_name));
                        }
                        receipt.set(Some(done));
                    }
                    Err(e) => {
                        if let Some(toast) = &toast {
                            toast.show_error(e);
                        }
                    }
                }
                generating.set(false);
            });
        })
    };

    html! {
        <div class="space-y-4">
            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <div class="flex flex-wrap gap-4 items-end">
                        <label class="form-control">
                            <span class="label-text">{"Report"}</span>
                            <select class="select select-bordered select-sm" onchange={on_kind}>
                                {for ReportKind::ALL.iter().map(|k| html! {
                                    <option value={k.slug()} selected={*k == *kind}>{k.title()}</option>
                                })}
                            </select>
                        </label>
                        <label class="form-control">
                            <span class="label-text">{"From"}</span>
                            <input type="date" class="input input-bordered input-sm" onchange={on_start} />
                        </label>
                        <label class="form-control">
                            <span class="label-text">{"To"}</span>
                            <input type="date" class="input input-bordered input-sm" onchange={on_end} />
                        </label>
                        <button class="btn btn-primary btn-sm" onclick={on_generate} disabled={*generating}>
                            if *generating {
                                <Loading inline=true />
                            } else {
                                <i class="fas fa-file-export"></i>
                            }
                            {" Generate document"}
                        </button>
                    </div>
                    if let Some(message) = &*form_error {
                        <p class="text-error text-sm">{message}</p>
                    }
                    if let Some(done) = &*receipt {
                        {render_receipt(done)}
                    }
                </div>
            </div>

            <div class="card bg-base-100 shadow">
                <div class="card-body">
                    <h2 class="card-title">{kind.title()}</h2>
                    <FetchRender<Value> state={(*report).clone()}
                        render={Callback::from(render_json)} on_retry={retry} />
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_rejects_reversed_range() {
        let start = parse_date("2025-09-30");
        let end = parse_date("2025-09-01");
        assert!(build_request(ReportKind::Sales, start, end).is_err());

        let request = build_request(ReportKind::Inventory, end, start).unwrap();
        assert_eq!(request.report_type, "inventory");
        assert_eq!(request.start_date, parse_date("2025-09-01"));
    }

    #[test]
    fn test_parse_date_ignores_blank() {
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("14/09/2025"), None);
    }
}

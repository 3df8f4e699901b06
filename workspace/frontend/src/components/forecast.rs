mod history;
mod results;

use std::future::Future;

use chrono::Local;
use common::export::{forecast_report, forecast_to_csv, to_json_pretty};
use common::forecast::ForecastRecord;
use common::BusinessProfile;
use yew::prelude::*;

use self::history::ForecastHistory;
use self::results::ForecastResults;
use super::form::missing_message;
use crate::api_client::demand;
use crate::common::download::{download_text, export_file_name, ExportFormat};
use crate::common::fetch_hook::use_fetch;
use crate::common::loading::Loading;
use crate::common::toast::ToastContext;
use crate::context::{remember_forecast_id, remembered_forecast_id, BusinessInfoContext};
use crate::hooks::{FetchState, RequestSequence};
use crate::settings;

pub const FORECAST_PERIODS: [u32; 3] = [3, 6, 12];
pub const DEFAULT_PERIOD: u32 = 6;

/// Runs one forecast request and applies its answer only if no newer
/// request was started in the meantime.
fn load_forecast<F>(
    sequence: &RequestSequence,
    state: UseStateHandle<FetchState<ForecastRecord>>,
    on_loaded: Callback<ForecastRecord>,
    request: F,
) where
    F: Future<Output = Result<ForecastRecord, String>> + 'static,
{
    let ticket = sequence.next();
    let sequence = sequence.clone();
    state.set(FetchState::Loading);

    wasm_bindgen_futures::spawn_local(async move {
        let result = request.await;
        if !sequence.is_latest(ticket) {
            log::debug!("Discarding forecast response #{}, a newer request is pending", ticket);
            return;
        }
        match result {
            Ok(record) => {
                remember_forecast_id(record.id);
                state.set(FetchState::Success(record.clone()));
                on_loaded.emit(record);
            }
            Err(e) => state.set(FetchState::Error(e)),
        }
    });
}

/// The document offered for one export button.
/// Renders a stored forecast. The report header names the business the
/// forecast was run for, not the profile currently being edited.
pub fn export_document(format: ExportFormat, record: &ForecastRecord) -> Result<String, String> {
    match format {
        ExportFormat::Csv => forecast_to_csv(&record.forecast).map_err(|e| e.to_string()),
        ExportFormat::Json => to_json_pretty(record).map_err(|e| e.to_string()),
        ExportFormat::Report => {
            let profile = BusinessProfile::from(&record.request);
            Ok(forecast_report(&profile, &record.forecast))
        }
    }
}

#[function_component(DemandForecasting)]
pub fn demand_forecasting() -> Html {
    let business = use_context::<BusinessInfoContext>().unwrap_or_default();
    let toast = use_context::<ToastContext>();

    let period = use_state(|| DEFAULT_PERIOD);
    let record = use_state(|| FetchState::<ForecastRecord>::NotStarted);
    let form_error = use_state(|| None::<String>);
    let history_version = use_state(|| 0u32);
    let sequence = use_memo((), |_| RequestSequence::default());

    let (history, retry_history) = use_fetch(
        (business.profile.business_type.clone(), *history_version),
        |(business_type, _)| {
            let business_type = (!business_type.trim().is_empty()).then_some(business_type);
            demand::get_forecast_history(business_type, settings::get_settings().history_limit)
        },
    );

    let on_loaded = {
        let history_version = history_version.clone();
        Callback::from(move |_: ForecastRecord| history_version.set(*history_version + 1))
    };

    // Restore the forecast viewed last in this tab.
    {
        let sequence = sequence.clone();
        let record = record.clone();
        use_effect_with((), move |_| {
            if let Some(id) = remembered_forecast_id() {
                log::debug!("Restoring forecast {}", id);
                load_forecast(&sequence, record, Callback::noop(), demand::get_forecast(id));
            }
            || ()
        });
    }

    let on_period = |months: u32| {
        let period = period.clone();
        Callback::from(move |_: MouseEvent| period.set(months))
    };

    let on_generate = {
        let sequence = sequence.clone();
        let record = record.clone();
        let form_error = form_error.clone();
        let profile = business.profile.clone();
        let period = *period;
        let on_loaded = on_loaded.clone();
        Callback::from(move |_: MouseEvent| {
            if let Some(message) = missing_message(&profile.missing_fields()) {
                form_error.set(Some(format!("{} (in Settings)", message)));
                return;
            }
            form_error.set(None);
            let request = profile.to_forecast_request(period);
            load_forecast(&sequence, record.clone(), on_loaded.clone(), async move {
                demand::create_forecast(&request).await
            });
        })
    };

    let on_open = {
        let sequence = sequence.clone();
        let record = record.clone();
        Callback::from(move |id: i32| {
            load_forecast(&sequence, record.clone(), Callback::noop(), demand::get_forecast(id));
        })
    };

    let on_export = |format: ExportFormat| {
        let record = record.clone();
        let toast = toast.clone();
        Callback::from(move |_: MouseEvent| {
            let Some(current) = record.data() else {
                return;
            };
            let subject = current.request.business_type.clone();
            let name = export_file_name("forecast", &subject, Local::now().date_naive(), format);
            let result = export_document(format, current)
                .and_then(|contents| download_text(&name, format, &contents));
            if let (Err(e), Some(toast)) = (result, &toast) {
                toast.show_error(format!("Export failed: {}", e));
            }
        })
    };

    let current_id = record.data().map(|r| r.id);
    let has_record = current_id.is_some();

    let body = match &*record {
        FetchState::NotStarted => html! {
            <div class="card bg-base-100 shadow">
                <div class="card-body items-center text-center opacity-70">
                    <i class="fas fa-chart-line text-4xl"></i>
                    <p>{"Pick a period and generate a forecast for your business."}</p>
                </div>
            </div>
        },
        FetchState::Loading => html! { <Loading text="Generating forecast..." /> },
        FetchState::Error(e) => html! {
            <div class="alert alert-error">
                <i class="fas fa-exclamation-circle"></i>
                <span>{e}</span>
            </div>
        },
        FetchState::Success(done) => html! {
            <ForecastResults key={done.id} id={done.id} forecast={done.forecast.clone()} />
        },
    };

    html! {
        <div class="grid grid-cols-1 xl:grid-cols-4 gap-6">
            <div class="xl:col-span-3 space-y-4">
                <div class="flex flex-wrap gap-2 items-center">
                    <div class="join">
                        {for FORECAST_PERIODS.iter().map(|months| html! {
                            <button class={classes!("btn", "btn-sm", "join-item", (*months == *period).then_some("btn-active"))}
                                onclick={on_period(*months)}>
                                {format!("{} months", months)}
                            </button>
                        })}
                    </div>
                    <button class="btn btn-primary btn-sm" onclick={on_generate} disabled={record.is_loading()}>
                        <i class="fas fa-magic"></i>{" Generate forecast"}
                    </button>
                    <div class="flex-1"></div>
                    <div class="join">
                        <button class="btn btn-sm btn-outline join-item" disabled={!has_record} onclick={on_export(ExportFormat::Csv)}>{"CSV"}</button>
                        <button class="btn btn-sm btn-outline join-item" disabled={!has_record} onclick={on_export(ExportFormat::Json)}>{"JSON"}</button>
                        <button class="btn btn-sm btn-outline join-item" disabled={!has_record} onclick={on_export(ExportFormat::Report)}>{"Report"}</button>
                    </div>
                </div>
                if let Some(message) = &*form_error {
                    <div class="alert alert-warning">
                        <i class="fas fa-exclamation-triangle"></i>
                        <span>{message}</span>
                    </div>
                }
                {body}
            </div>
            <ForecastHistory state={(*history).clone()} current={current_id} {on_open} on_retry={retry_history} />
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use common::forecast::{FestivalPoint, Forecast, ForecastRequest};

    fn record() -> ForecastRecord {
        let mut forecast = Forecast {
            forecast_start: NaiveDate::from_ymd_opt(2025, 9, 14),
            forecast_end: NaiveDate::from_ymd_opt(2026, 3, 14),
            confidence_score: 0.75,
            ..Default::default()
        };
        forecast.festival_demands.chart.push(FestivalPoint {
            festival: "Diwali, Dhanteras".to_string(),
            demand_increase: 150.0,
            ..Default::default()
        });
        ForecastRecord {
            id: 7,
            created_at: NaiveDate::from_ymd_opt(2025, 9, 14)
                .unwrap()
                .and_hms_opt(10, 0, 0)
                .unwrap(),
            request: ForecastRequest {
                business_name: None,
                business_type: "Electronics Store".to_string(),
                business_scale: "Small".to_string(),
                location: "Karnataka".to_string(),
                current_sales: 50000.0,
                forecast_period: Some(6),
            },
            forecast,
        }
    }

    #[test]
    fn test_export_documents() {
        let record = record();

        let csv = export_document(ExportFormat::Csv, &record).unwrap();
        assert!(csv.contains("\"Diwali, Dhanteras\""));

        let json = export_document(ExportFormat::Json, &record).unwrap();
        assert!(json.contains("\"id\": 7"));

        let report = export_document(ExportFormat::Report, &record).unwrap();
        assert!(report.starts_with("DEMAND FORECAST REPORT"));
    }

    #[test]
    fn test_report_names_the_forecast_business() {
        let mut record = record();
        record.request.business_name = Some("Bengaluru Gadgets".to_string());

        let report = export_document(ExportFormat::Report, &record).unwrap();
        assert!(report.contains("Business: Bengaluru Gadgets"));
        assert!(report.contains("Type: Electronics Store (Small)"));
        assert!(report.contains("Location: Karnataka\n"));
    }

    #[test]
    fn test_default_period_is_offered() {
        assert!(FORECAST_PERIODS.contains(&DEFAULT_PERIOD));
    }
}

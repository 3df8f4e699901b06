//! Plotly charts for the forecast page.
//!
//! The builders are plain functions producing a [`ChartSpec`] so they can be
//! checked without a browser. [`PlotlyChart`] hands a spec to `Plotly.newPlot`.

use common::chart_data::{LabeledSeries, WeeklyIntensity};
use plotly::common::{Mode, Title};
use plotly::layout::Axis;
use plotly::{Bar, Layout, Scatter};
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;
use yew::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = Plotly)]
    fn newPlot(div_id: &str, data: JsValue, layout: JsValue);
}

/// Traces and layout as Plotly JSON.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartSpec {
    pub traces: Vec<Value>,
    pub layout: Value,
}

pub fn festival_bar_chart(series: &LabeledSeries) -> Result<ChartSpec, serde_json::Error> {
    let trace = Bar::new(series.labels.clone(), series.values.clone())
        .name("Demand increase (%)")
        .marker(plotly::common::Marker::new().color("rgb(249, 115, 22)"));
    let layout = Layout::new()
        .title(Title::with_text("Festival demand uplift"))
        .y_axis(Axis::new().title(Title::with_text("Increase (%)")))
        .height(360);

    Ok(ChartSpec {
        traces: vec![serde_json::to_value(&trace)?],
        layout: serde_json::to_value(&layout)?,
    })
}

pub fn seasonal_pie_chart(series: &LabeledSeries) -> Result<ChartSpec, serde_json::Error> {
    // plotly 0.9 has no pie trace type
    let trace = json!({
        "type": "pie",
        "labels": series.labels,
        "values": series.values,
        "hole": 0.4,
        "textinfo": "label+percent",
    });
    let layout = Layout::new().title(Title::with_text("Seasonal surge share")).height(360);

    Ok(ChartSpec {
        traces: vec![trace],
        layout: serde_json::to_value(&layout)?,
    })
}

pub fn weekly_intensity_chart(weekly: &WeeklyIntensity) -> Result<ChartSpec, serde_json::Error> {
    let weeks: Vec<String> =
        weekly.week_starts.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect();

    let seasonal = Scatter::new(weeks.clone(), weekly.seasonal.clone())
        .mode(Mode::LinesMarkers)
        .name("Seasonal intensity")
        .line(plotly::common::Line::new().color("rgb(59, 130, 246)").width(2.0));
    let festival = Scatter::new(weeks, weekly.festival.clone())
        .mode(Mode::LinesMarkers)
        .name("Festival intensity")
        .line(plotly::common::Line::new().color("rgb(249, 115, 22)").width(2.0));

    let layout = Layout::new()
        .title(Title::with_text("Weekly demand intensity"))
        .x_axis(Axis::new().title(Title::with_text("Week starting")))
        .y_axis(Axis::new().title(Title::with_text("Index")).range(vec![0.0, 100.0]))
        .height(400);

    Ok(ChartSpec {
        traces: vec![serde_json::to_value(&seasonal)?, serde_json::to_value(&festival)?],
        layout: serde_json::to_value(&layout)?,
    })
}

fn render_plot(div_id: &str, spec: &ChartSpec) -> Result<(), String> {
    let data = serde_json::to_string(&spec.traces).map_err(|e| e.to_string())?;
    let layout = serde_json::to_string(&spec.layout).map_err(|e| e.to_string())?;
    let data = js_sys::JSON::parse(&data).map_err(|e| format!("{:?}", e))?;
    let layout = js_sys::JSON::parse(&layout).map_err(|e| format!("{:?}", e))?;
    newPlot(div_id, data, layout);
    Ok(())
}

#[derive(Properties, PartialEq)]
pub struct PlotlyChartProps {
    pub id: AttrValue,
    pub spec: Result<ChartSpec, String>,
    #[prop_or(AttrValue::Static("width:100%; height:400px;"))]
    pub style: AttrValue,
}

#[function_component(PlotlyChart)]
pub fn plotly_chart(props: &PlotlyChartProps) -> Html {
    let container_ref = use_node_ref();
    let failed = use_state(|| None::<String>);

    {
        let failed = failed.clone();
        use_effect_with(
            (container_ref.clone(), props.id.clone(), props.spec.clone()),
            move |(container_ref, id, spec)| {
                if let (Some(element), Ok(spec)) = (container_ref.cast::<HtmlElement>(), spec) {
                    element.set_id(id);
                    if let Err(e) = render_plot(id, spec) {
                        log::error!("Failed to draw chart {}: {}", id, e);
                        failed.set(Some(e));
                    }
                }
                || ()
            },
        );
    }

    let error = match (&props.spec, &*failed) {
        (Err(e), _) | (Ok(_), Some(e)) => Some(e.clone()),
        _ => None,
    };
    if let Some(error) = error {
        return html! {
            <div class="alert alert-warning">
                <i class="fas fa-chart-bar"></i>
                <span>{format!("Chart unavailable: {}", error)}</span>
            </div>
        };
    }

    html! { <div ref={container_ref} style={props.style.clone()}></div> }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_festival_series_builds_empty_bar() {
        let spec = festival_bar_chart(&LabeledSeries::default()).unwrap();
        assert_eq!(spec.traces.len(), 1);
        assert_eq!(spec.traces[0]["type"], "bar");
        assert_eq!(spec.traces[0]["x"], json!([]));
    }

    #[test]
    fn test_pie_keeps_label_order() {
        let series = LabeledSeries {
            labels: vec!["Monsoon".to_string(), "Winter".to_string()],
            values: vec![25.0, 40.0],
        };
        let spec = seasonal_pie_chart(&series).unwrap();
        assert_eq!(spec.traces[0]["labels"], json!(["Monsoon", "Winter"]));
        assert_eq!(spec.traces[0]["values"], json!([25.0, 40.0]));
    }

    #[test]
    fn test_weekly_chart_has_two_lines() {
        let weekly = WeeklyIntensity {
            week_starts: vec![NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()],
            seasonal_raw: vec![80.0],
            festival_raw: vec![0.0],
            seasonal: vec![80.0],
            festival: vec![0.0],
            coordination: vec![0.0],
        };
        let spec = weekly_intensity_chart(&weekly).unwrap();
        assert_eq!(spec.traces.len(), 2);
        assert_eq!(spec.traces[0]["x"], json!(["2025-01-01"]));
        assert_eq!(spec.traces[1]["name"], "Festival intensity");
    }
}

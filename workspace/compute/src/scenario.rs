//! What-if analysis of price, marketing, seasonal and competitor changes.

use common::calendar::BusinessPattern;
use common::round1;
use common::scenario::{
    CompetitorAction, CompetitorLandscape, ImpactRange, ScenarioBreakdown, ScenarioComparison,
    ScenarioInsights, ScenarioParameters, ScenarioRequest, ScenarioResult, ScenarioTemplate,
};
use tracing::{debug, instrument};

use crate::calendar::business_pattern;
use crate::error::{ComputeError, Result};

pub const MIN_COMPARED: usize = 2;
pub const MAX_COMPARED: usize = 5;

/// A price rise loses 1.8% of sales per point, a cut wins 1.2% per point.
pub fn price_impact(price_change: f64) -> f64 {
    if price_change > 0.0 {
        price_change * -1.8
    } else {
        price_change.abs() * 1.2
    }
}

/// Marketing return with diminishing slope as spend grows relative to sales.
pub fn marketing_impact(marketing_spend: f64, base_sales: f64) -> f64 {
    if marketing_spend == 0.0 || base_sales <= 0.0 {
        return 0.0;
    }
    let ratio = marketing_spend / base_sales;
    if ratio < 0.05 {
        ratio * 200.0
    } else if ratio < 0.10 {
        10.0 + (ratio - 0.05) * 150.0
    } else {
        17.5 + (ratio - 0.10) * 50.0
    }
}

pub fn seasonal_impact(seasonal_factor: f64) -> f64 {
    (seasonal_factor - 1.0) * 100.0
}

pub fn recommendation(total_impact: f64) -> &'static str {
    if total_impact > 20.0 {
        "Excellent strategy! This scenario shows strong growth potential. \
         Consider implementing gradually to manage supply chain capacity."
    } else if total_impact > 10.0 {
        "Good strategy with positive returns. \
         Monitor competitor response and be prepared to adjust pricing or marketing spend."
    } else if total_impact > 0.0 {
        "Moderate positive impact. Consider optimizing marketing efficiency \
         or exploring regional customization opportunities."
    } else if total_impact > -10.0 {
        "Marginal negative impact. \
         Review pricing strategy and consider value-added services to offset competitive pressure."
    } else {
        "High risk scenario. Recommend reassessing strategy, focus on differentiation, \
         or consider market positioning changes."
    }
}

/// Projects sales for one scenario.
///
/// Every impact is in percent of the base sales. The projection uses the
/// unrounded total; the reported impacts are rounded to one decimal.
#[instrument(skip(request), fields(base_sales = request.base_sales))]
pub fn analyze(request: &ScenarioRequest) -> ScenarioResult {
    let price = price_impact(request.price_change);
    let marketing = marketing_impact(request.marketing_spend, request.base_sales);
    let seasonal = seasonal_impact(request.seasonal_factor);
    let competitor = request.competitor().impact();

    let total = price + marketing + seasonal + competitor;
    let projected = request.base_sales * (1.0 + total / 100.0);
    debug!("Scenario total impact {:.2}% projects {:.2}", total, projected);

    ScenarioResult {
        baseline: request.base_sales,
        projected,
        total_impact: round1(total),
        breakdown: ScenarioBreakdown {
            price: round1(price),
            marketing: round1(marketing),
            seasonal: round1(seasonal),
            competitor: round1(competitor),
        },
        recommendation: recommendation(total).to_string(),
        scenario_name: None,
    }
}

fn template(
    name: &str,
    description: &str,
    price_change: f64,
    marketing_spend: f64,
    seasonal_factor: f64,
    competitor_action: CompetitorAction,
) -> ScenarioTemplate {
    ScenarioTemplate {
        name: name.to_string(),
        description: description.to_string(),
        parameters: ScenarioParameters {
            price_change,
            marketing_spend,
            seasonal_factor,
            competitor_action,
        },
    }
}

pub fn templates() -> Vec<ScenarioTemplate> {
    vec![
        template(
            "Festival Season Boost",
            "Model festival season demand with increased marketing",
            5.0,
            50_000.0,
            1.8,
            CompetitorAction::Passive,
        ),
        template(
            "Competitive Price War",
            "Response to aggressive competitor pricing",
            -15.0,
            75_000.0,
            1.0,
            CompetitorAction::Aggressive,
        ),
        template(
            "Premium Positioning",
            "Test premium pricing with quality marketing",
            20.0,
            100_000.0,
            1.0,
            CompetitorAction::None,
        ),
        template(
            "Economic Downturn",
            "Model performance during economic slowdown",
            -10.0,
            25_000.0,
            0.7,
            CompetitorAction::Aggressive,
        ),
        template(
            "Market Expansion",
            "Aggressive growth strategy scenario",
            0.0,
            150_000.0,
            1.2,
            CompetitorAction::Passive,
        ),
    ]
}

/// Analyses 2 to 5 scenarios side by side. Scenarios are named by position
/// and the first one wins ties for best and worst.
#[instrument(skip(requests), fields(count = requests.len()))]
pub fn compare(requests: &[ScenarioRequest]) -> Result<ScenarioComparison> {
    if !(MIN_COMPARED..=MAX_COMPARED).contains(&requests.len()) {
        return Err(ComputeError::Validation(format!(
            "Between {} and {} scenarios are required",
            MIN_COMPARED, MAX_COMPARED
        )));
    }

    let scenarios: Vec<ScenarioResult> = requests
        .iter()
        .enumerate()
        .map(|(i, request)| ScenarioResult {
            scenario_name: Some(format!("Scenario {}", i + 1)),
            ..analyze(request)
        })
        .collect();

    let mut best = &scenarios[0];
    let mut worst = &scenarios[0];
    for scenario in &scenarios[1..] {
        if scenario.total_impact > best.total_impact {
            best = scenario;
        }
        if scenario.total_impact < worst.total_impact {
            worst = scenario;
        }
    }

    Ok(ScenarioComparison {
        best_scenario: best.scenario_name.clone().unwrap_or_default(),
        worst_scenario: worst.scenario_name.clone().unwrap_or_default(),
        impact_range: ImpactRange { best: best.total_impact, worst: worst.total_impact },
        scenarios,
    })
}

fn price_sensitivity(business_type: &str) -> &'static str {
    match business_type {
        "Grocery Store" | "Food & Beverage" => "High",
        "Medical Store" => "Low",
        _ => "Medium",
    }
}

fn marketing_effectiveness(business_type: &str) -> &'static str {
    match business_type {
        "Grocery Store" => "High - Local community focus",
        "Electronics Store" => "Medium - Feature-based marketing",
        "Clothing Store" => "High - Visual and social media",
        "Medical Store" => "Low - Trust and reliability based",
        "Cosmetics Store" => "High - Influencer and digital marketing",
        "Food & Beverage" => "Medium - Experience-based marketing",
        _ => "Medium",
    }
}

fn competitor_landscape() -> CompetitorLandscape {
    let list = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
    CompetitorLandscape {
        intensity: "Moderate to High".to_string(),
        key_competitors: list(&["Organized retail", "E-commerce platforms", "Local businesses"]),
        competitive_advantages: list(&[
            "Local presence",
            "Personal service",
            "Regional preferences",
        ]),
        threats: list(&["Price wars", "Digital disruption", "Supply chain efficiency"]),
    }
}

pub fn insights(business_type: &str, location: &str) -> ScenarioInsights {
    let seasonal_patterns: BusinessPattern = business_pattern(business_type);
    ScenarioInsights {
        business_type: business_type.to_string(),
        location: location.to_string(),
        price_sensitivity: price_sensitivity(business_type).to_string(),
        marketing_effectiveness: marketing_effectiveness(business_type).to_string(),
        seasonal_patterns,
        competitor_landscape: competitor_landscape(),
        recommendations: vec![
            format!("Leverage {} regional preferences and cultural patterns", location),
            format!("Optimize {} inventory for local demand patterns", business_type),
            "Implement dynamic pricing for festival and peak seasons".to_string(),
            "Build strong supplier relationships for consistent availability".to_string(),
            "Invest in customer loyalty programs for repeat business".to_string(),
        ],
    }
}

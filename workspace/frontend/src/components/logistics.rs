mod map_selector;
mod new_shipment;
mod providers;
mod route_optimizer;
mod shipments;
mod tracking;
mod weather;

use common::logistics::{LocationPair, Shipment};
use yew::prelude::*;

use self::map_selector::MapSelector;
use self::new_shipment::NewShipmentForm;
use self::providers::ProviderComparison;
use self::route_optimizer::RouteOptimizer;
use self::shipments::ShipmentsTable;
use self::tracking::ShipmentTracking;
use self::weather::{CityWeather, RouteSamples, RouteWeatherPanel};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum LogisticsTab {
    #[default]
    Shipments,
    Tracking,
    Routes,
    Weather,
    Providers,
    NewShipment,
}

impl LogisticsTab {
    pub const ALL: [LogisticsTab; 6] = [
        LogisticsTab::Shipments,
        LogisticsTab::Tracking,
        LogisticsTab::Routes,
        LogisticsTab::Weather,
        LogisticsTab::Providers,
        LogisticsTab::NewShipment,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            LogisticsTab::Shipments => "Shipments",
            LogisticsTab::Tracking => "Tracking",
            LogisticsTab::Routes => "Routes",
            LogisticsTab::Weather => "Weather",
            LogisticsTab::Providers => "Providers",
            LogisticsTab::NewShipment => "New shipment",
        }
    }

    /// Tabs working on the origin/destination pair picked above them.
    pub fn uses_route(&self) -> bool {
        matches!(self, LogisticsTab::Routes | LogisticsTab::Weather | LogisticsTab::Providers)
    }
}

fn default_route() -> LocationPair {
    LocationPair {
        origin: "Bangalore".to_string(),
        destination: "Chennai".to_string(),
    }
}

#[function_component(Logistics)]
pub fn logistics_page() -> Html {
    let tab = use_state(LogisticsTab::default);
    let route = use_state(default_route);
    let tracked = use_state(|| None::<String>);
    let shipments_version = use_state(|| 0u32);

    let on_track = {
        let tab = tab.clone();
        let tracked = tracked.clone();
        Callback::from(move |id: String| {
            tracked.set(Some(id));
            tab.set(LogisticsTab::Tracking);
        })
    };

    let on_created = {
        let tab = tab.clone();
        let shipments_version = shipments_version.clone();
        Callback::from(move |shipment: Shipment| {
            log::info!("Shipment {} created, showing list", shipment.id);
            shipments_version.set(*shipments_version + 1);
            tab.set(LogisticsTab::Shipments);
        })
    };

    let on_origin = {
        let route = route.clone();
        Callback::from(move |city: String| {
            route.set(LocationPair { origin: city, ..(*route).clone() });
        })
    };
    let on_destination = {
        let route = route.clone();
        Callback::from(move |city: String| {
            route.set(LocationPair { destination: city, ..(*route).clone() });
        })
    };

    let tabs = LogisticsTab::ALL.iter().map(|t| {
        let target = *t;
        let onclick = {
            let tab = tab.clone();
            Callback::from(move |_: MouseEvent| tab.set(target))
        };
        html! {
            <a role="tab" class={classes!("tab", (target == *tab).then_some("tab-active"))} {onclick}>
                {target.label()}
            </a>
        }
    });

    let route_picker = tab.uses_route().then(|| html! {
        <div class="flex flex-wrap gap-4 items-end">
            <MapSelector label="Origin" value={route.origin.clone()} on_change={on_origin} />
            <MapSelector label="Destination" value={route.destination.clone()} on_change={on_destination} />
        </div>
    });

    let body = match *tab {
        LogisticsTab::Shipments => html! { <ShipmentsTable version={*shipments_version} {on_track} /> },
        LogisticsTab::Tracking => html! {
            <ShipmentTracking shipment_id={(*tracked).clone()} on_select={on_track} />
        },
        LogisticsTab::Routes => html! { <RouteOptimizer route={(*route).clone()} /> },
        LogisticsTab::Weather => html! {
            <div class="space-y-4">
                <div class="flex flex-wrap gap-4">
                    <CityWeather key={route.origin.clone()} city={route.origin.clone()} />
                    <CityWeather key={route.destination.clone()} city={route.destination.clone()} />
                </div>
                <RouteWeatherPanel route={(*route).clone()} />
                <RouteSamples route={(*route).clone()} />
            </div>
        },
        LogisticsTab::Providers => html! { <ProviderComparison route={(*route).clone()} /> },
        LogisticsTab::NewShipment => html! { <NewShipmentForm {on_created} /> },
    };

    html! {
        <div class="space-y-4">
            <div role="tablist" class="tabs tabs-boxed">{for tabs}</div>
            {route_picker.unwrap_or_default()}
            {body}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_tabs() {
        let with_route: Vec<&str> =
            LogisticsTab::ALL.iter().filter(|t| t.uses_route()).map(|t| t.label()).collect();
        assert_eq!(with_route, vec!["Routes", "Weather", "Providers"]);
        assert_eq!(LogisticsTab::default(), LogisticsTab::Shipments);
    }
}

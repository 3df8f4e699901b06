use common::BusinessProfile;
use yew::prelude::*;

use crate::components::layout::ErrorPanel;
use crate::storage::{
    load_json, save_json, BrowserLocalStore, BrowserSessionStore, KeyValueStore, StorageError,
};

pub const PROFILE_KEY: &str = "supplychain.businessInfo";
pub const LAST_FORECAST_KEY: &str = "supplychain.lastForecastId";

/// The business profile shared by every page.
///
/// Only the Settings page calls `update`. Everyone else reads `profile`.
#[derive(Clone, PartialEq, Default)]
pub struct BusinessInfoContext {
    pub profile: BusinessProfile,
    pub update: Callback<BusinessProfile>,
}

/// An unset profile loads as the empty default.
pub fn load_profile(store: &dyn KeyValueStore) -> Result<BusinessProfile, StorageError> {
    Ok(load_json(store, PROFILE_KEY)?.unwrap_or_default())
}

pub fn save_profile(
    store: &dyn KeyValueStore,
    profile: &BusinessProfile,
) -> Result<(), StorageError> {
    save_json(store, PROFILE_KEY, profile)
}

pub fn load_last_forecast_id(store: &dyn KeyValueStore) -> Option<i32> {
    match store.get(LAST_FORECAST_KEY) {
        Ok(value) => value.and_then(|id| id.trim().parse().ok()),
        Err(e) => {
            log::warn!("Could not read last forecast id: {}", e);
            None
        }
    }
}

pub fn save_last_forecast_id(store: &dyn KeyValueStore, id: i32) {
    if let Err(e) = store.set(LAST_FORECAST_KEY, &id.to_string()) {
        log::warn!("Could not remember forecast {}: {}", id, e);
    }
}

pub fn remembered_forecast_id() -> Option<i32> {
    load_last_forecast_id(&BrowserSessionStore)
}

pub fn remember_forecast_id(id: i32) {
    save_last_forecast_id(&BrowserSessionStore, id);
}

#[derive(Properties, PartialEq)]
pub struct BusinessInfoProviderProps {
    pub children: Children,
}

/// Loads the profile from localStorage once and provides it to the tree.
///
/// When the stored profile cannot be read the children are replaced by an
/// error panel that offers to reset the profile.
#[function_component(BusinessInfoProvider)]
pub fn business_info_provider(props: &BusinessInfoProviderProps) -> Html {
    let loaded = use_state(|| load_profile(&BrowserLocalStore));

    let update = {
        let loaded = loaded.clone();
        Callback::from(move |profile: BusinessProfile| {
            if let Err(e) = save_profile(&BrowserLocalStore, &profile) {
                log::error!("Failed to persist business profile: {}", e);
            } else {
                log::info!("Business profile saved for {}", profile.business_type);
            }
            loaded.set(Ok(profile));
        })
    };

    let on_reset = {
        let loaded = loaded.clone();
        Callback::from(move |_: MouseEvent| {
            if let Err(e) = BrowserLocalStore.remove(PROFILE_KEY) {
                log::error!("Failed to clear business profile: {}", e);
            }
            loaded.set(Ok(BusinessProfile::default()));
        })
    };

    match &*loaded {
        Ok(profile) => {
            let context = BusinessInfoContext {
                profile: profile.clone(),
                update,
            };
            html! {
                <ContextProvider<BusinessInfoContext> context={context}>
                    { props.children.clone() }
                </ContextProvider<BusinessInfoContext>>
            }
        }
        Err(e) => {
            log::error!("Business profile unreadable: {}", e);
            html! {
                <ErrorPanel
                    title="Your saved business profile could not be loaded"
                    message={e.to_string()}
                    action_label="Reset profile"
                    on_action={on_reset}
                />
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn profile() -> BusinessProfile {
        BusinessProfile {
            business_name: "Sharma Traders, Pune".to_string(),
            business_type: "Grocery Store".to_string(),
            business_scale: "Small".to_string(),
            state: "Maharashtra".to_string(),
            location: "Pune".to_string(),
            current_sales: 250000.0,
        }
    }

    #[test]
    fn test_profile_round_trip() {
        let store = MemoryStore::new();
        save_profile(&store, &profile()).unwrap();
        assert_eq!(load_profile(&store).unwrap(), profile());

        let raw = store.get(PROFILE_KEY).unwrap().unwrap();
        assert!(raw.contains("\"businessType\":\"Grocery Store\""));
    }

    #[test]
    fn test_missing_profile_is_default() {
        assert_eq!(load_profile(&MemoryStore::new()).unwrap(), BusinessProfile::default());
    }

    #[test]
    fn test_corrupt_profile_is_an_error() {
        let store = MemoryStore::new();
        store.set(PROFILE_KEY, "[1,2").unwrap();
        assert!(matches!(load_profile(&store), Err(StorageError::Corrupt { .. })));
    }

    #[test]
    fn test_last_forecast_id() {
        let store = MemoryStore::new();
        assert_eq!(load_last_forecast_id(&store), None);
        save_last_forecast_id(&store, 42);
        assert_eq!(load_last_forecast_id(&store), Some(42));
        store.set(LAST_FORECAST_KEY, "forty-two").unwrap();
        assert_eq!(load_last_forecast_id(&store), None);
    }
}

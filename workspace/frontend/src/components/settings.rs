use common::BusinessProfile;
use yew::prelude::*;

use super::form::{input_value, missing_message, parse_number, select_value};
use crate::api_client::demand;
use crate::common::fetch_hook::use_fetch;
use crate::common::toast::ToastContext;
use crate::context::BusinessInfoContext;

fn options(values: &[String], selected: &str, placeholder: &str) -> Html {
    html! {
        <>
            <option value="" selected={selected.is_empty()} disabled=true>{placeholder}</option>
            {for values.iter().map(|v| html! {
                <option value={v.clone()} selected={v.as_str() == selected}>{v}</option>
            })}
        </>
    }
}

/// The business profile form. Saving writes the shared context, which
/// persists it to local storage.
#[function_component(Settings)]
pub fn settings() -> Html {
    let business = use_context::<BusinessInfoContext>().unwrap_or_default();
    let toast = use_context::<ToastContext>();
    // the built-in lists stand in until the backend catalog arrives
    let (catalog, _) = use_fetch((), |_| demand::get_business_types());
    let catalog = catalog.data().cloned().unwrap_or_default();

    let draft = use_state(|| business.profile.clone());
    let error = use_state(|| None::<String>);

    let on_text = |apply: fn(&mut BusinessProfile, String)| {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let mut next = (*draft).clone();
            apply(&mut next, input_value(&e));
            draft.set(next);
        })
    };
    let on_select = |apply: fn(&mut BusinessProfile, String)| {
        let draft = draft.clone();
        Callback::from(move |e: Event| {
            let mut next = (*draft).clone();
            apply(&mut next, select_value(&e));
            draft.set(next);
        })
    };

    let on_submit = {
        let draft = draft.clone();
        let error = error.clone();
        let update = business.update.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let profile = (*draft).clone();
            if let Some(message) = missing_message(&profile.missing_fields()) {
                log::debug!("Profile form incomplete: {:?}", profile.missing_fields());
                error.set(Some(message));
                return;
            }
            error.set(None);
            update.emit(profile);
            if let Some(toast) = &toast {
                toast.show_success("Business profile saved");
            }
        })
    };

    let on_reset = {
        let draft = draft.clone();
        let error = error.clone();
        let saved = business.profile.clone();
        Callback::from(move |_: MouseEvent| {
            draft.set(saved.clone());
            error.set(None);
        })
    };

    let sales = if draft.current_sales > 0.0 {
        draft.current_sales.to_string()
    } else {
        String::new()
    };

    html! {
        <div class="card bg-base-100 shadow max-w-3xl">
            <form class="card-body" onsubmit={on_submit}>
                <h2 class="card-title">{"Business profile"}</h2>
                <p class="text-sm text-base-content/60">
                    {format!("Used by demand forecasts, scenarios and reports. Classification: {}", catalog.classification)}
                </p>

                if let Some(message) = &*error {
                    <div class="alert alert-warning">
                        <i class="fas fa-exclamation-triangle"></i>
                        <span>{message}</span>
                    </div>
                }

                <div class="grid grid-cols-1 md:grid-cols-2 gap-4 mt-2">
                    <label class="form-control w-full">
                        <span class="label-text">{"Business name"}</span>
                        <input type="text" class="input input-bordered" placeholder="Optional"
                            value={draft.business_name.clone()}
                            onchange={on_text(|p, v| p.business_name = v)} />
                    </label>
                    <label class="form-control w-full">
                        <span class="label-text">{"Business type *"}</span>
                        <select class="select select-bordered" onchange={on_select(|p, v| p.business_type = v)}>
                            {options(&catalog.business_types, &draft.business_type, "Select a type")}
                        </select>
                    </label>
                    <label class="form-control w-full">
                        <span class="label-text">{"Business scale *"}</span>
                        <select class="select select-bordered" onchange={on_select(|p, v| p.business_scale = v)}>
                            {options(&catalog.business_scales, &draft.business_scale, "Select a scale")}
                        </select>
                    </label>
                    <label class="form-control w-full">
                        <span class="label-text">{"State *"}</span>
                        <select class="select select-bordered" onchange={on_select(|p, v| p.state = v)}>
                            {options(&catalog.locations, &draft.state, "Select a state")}
                        </select>
                    </label>
                    <label class="form-control w-full">
                        <span class="label-text">{"City / location *"}</span>
                        <input type="text" class="input input-bordered" placeholder="e.g. Pune"
                            value={draft.location.clone()}
                            onchange={on_text(|p, v| p.location = v)} />
                    </label>
                    <label class="form-control w-full">
                        <span class="label-text">{"Current monthly sales (₹) *"}</span>
                        <input type="number" min="0" step="1000" class="input input-bordered"
                            value={sales}
                            onchange={on_text(|p, v| p.current_sales = parse_number(&v).unwrap_or(0.0))} />
                    </label>
                </div>

                <div class="card-actions justify-end mt-4">
                    <button type="button" class="btn btn-ghost" onclick={on_reset}>{"Discard changes"}</button>
                    <button type="submit" class="btn btn-primary">
                        <i class="fas fa-save"></i>{" Save profile"}
                    </button>
                </div>
            </form>
        </div>
    }
}

use std::future::Future;

use yew::prelude::*;

use crate::common::toast::ToastContext;
use crate::hooks::{FetchState, RequestSequence};

/// Runs `fetch(deps)` on mount and again whenever `deps` changes.
///
/// Returns the state and a callback that repeats the last fetch. Errors
/// also raise a toast. A response that arrives after a newer request was
/// started is dropped.
#[hook]
pub fn use_fetch<T, D, F, Fut>(deps: D, fetch: F) -> (UseStateHandle<FetchState<T>>, Callback<()>)
where
    T: 'static,
    D: PartialEq + Clone + 'static,
    F: FnOnce(D) -> Fut + 'static,
    Fut: Future<Output = Result<T, String>> + 'static,
{
    let state = use_state(|| FetchState::Loading);
    let toast = use_context::<ToastContext>();
    let sequence = use_memo((), |_| RequestSequence::default());
    let attempt = use_state(|| 0u32);

    {
        let state = state.clone();
        use_effect_with((deps, *attempt), move |(deps, _)| {
            let ticket = sequence.next();
            state.set(FetchState::Loading);
            let pending = fetch(deps.clone());

            wasm_bindgen_futures::spawn_local(async move {
                let result = pending.await;
                if !sequence.is_latest(ticket) {
                    log::debug!("Dropping superseded response #{}", ticket);
                    return;
                }
                match result {
                    Ok(data) => state.set(FetchState::Success(data)),
                    Err(err) => {
                        if let Some(toast) = &toast {
                            toast.show_error(err.clone());
                        }
                        state.set(FetchState::Error(err));
                    }
                }
            });
            || ()
        });
    }

    let refetch = Callback::from(move |_| attempt.set(*attempt + 1));

    (state, refetch)
}

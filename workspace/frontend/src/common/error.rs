use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorDisplayProps {
    pub message: String,
    #[prop_or_default]
    pub title: Option<String>,
    #[prop_or_default]
    pub on_retry: Option<Callback<()>>,
}

/// Inline alert for a failed backend call, with an optional "Retry" button.
#[function_component(ErrorDisplay)]
pub fn error_display(props: &ErrorDisplayProps) -> Html {
    log::warn!("Showing error: {}", props.message);

    let retry = props.on_retry.clone().map(|on_retry| {
        let onclick = Callback::from(move |_: MouseEvent| {
            log::debug!("Retry requested");
            on_retry.emit(());
        });
        html! {
            <button class="btn btn-sm btn-outline" {onclick}>
                <i class="fas fa-redo"></i>
                {" Retry"}
            </button>
        }
    });

    html! {
        <div class="alert alert-error my-4">
            <i class="fas fa-exclamation-circle text-xl"></i>
            <div class="flex flex-col">
                <span class="font-semibold">
                    {props.title.clone().unwrap_or_else(|| "Could not load data".to_string())}
                </span>
                <span class="text-sm">{&props.message}</span>
            </div>
            {retry.unwrap_or_default()}
        </div>
    }
}

use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ErrorPanelProps {
    pub title: AttrValue,
    pub message: AttrValue,
    #[prop_or_default]
    pub action_label: Option<AttrValue>,
    #[prop_or_default]
    pub on_action: Option<Callback<MouseEvent>>,
}

/// Full-page replacement shown when the app cannot start normally.
#[function_component(ErrorPanel)]
pub fn error_panel(props: &ErrorPanelProps) -> Html {
    let action = match (&props.action_label, &props.on_action) {
        (Some(label), Some(on_action)) => html! {
            <div class="card-actions justify-end">
                <button class="btn btn-primary" onclick={on_action.clone()}>{label}</button>
            </div>
        },
        _ => html! {},
    };

    html! {
        <div class="min-h-screen flex items-center justify-center bg-base-200 p-6">
            <div class="card bg-base-100 shadow-xl max-w-lg w-full">
                <div class="card-body">
                    <h2 class="card-title text-error">
                        <i class="fas fa-exclamation-triangle"></i>
                        {&props.title}
                    </h2>
                    <p class="text-sm text-base-content/70 break-words">{&props.message}</p>
                    {action}
                </div>
            </div>
        </div>
    }
}

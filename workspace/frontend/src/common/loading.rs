use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct LoadingProps {
    #[prop_or_default]
    pub text: Option<String>,
    /// Renders a small inline spinner instead of a padded block.
    #[prop_or_default]
    pub inline: bool,
}

#[function_component(Loading)]
pub fn loading(props: &LoadingProps) -> Html {
    if props.inline {
        return html! { <span class="loading loading-spinner loading-sm"></span> };
    }

    html! {
        <div class="flex flex-col justify-center items-center py-12 gap-4">
            <span class="loading loading-spinner loading-lg"></span>
            if let Some(text) = &props.text {
                <p class="text-sm text-base-content/60">{text}</p>
            }
        </div>
    }
}

use yew::prelude::*;

use crate::context::BusinessInfoContext;

#[derive(Properties, PartialEq)]
pub struct NavbarProps {
    pub title: AttrValue,
}

/// Page title plus the business the dashboard is currently set up for.
#[function_component(Navbar)]
pub fn navbar(props: &NavbarProps) -> Html {
    let business = use_context::<BusinessInfoContext>();
    let badge = business
        .map(|ctx| ctx.profile)
        .filter(|profile| profile.is_complete())
        .map(|profile| {
            let name = if profile.business_name.trim().is_empty() {
                profile.business_type.clone()
            } else {
                profile.business_name.clone()
            };
            html! {
                <div class="badge badge-outline gap-2 hidden md:flex">
                    <i class="fas fa-store"></i>
                    {format!("{} · {}", name, profile.location)}
                </div>
            }
        });

    html! {
        <div class="navbar bg-base-100 shadow-sm z-40 sticky top-0">
            <div class="flex-none lg:hidden">
                <label aria-label="open sidebar" class="btn btn-square btn-ghost" for="main-drawer">
                    <i class="fas fa-bars text-xl"></i>
                </label>
            </div>
            <div class="flex-1 px-4">
                <h1 class="text-xl font-bold">{&props.title}</h1>
            </div>
            <div class="flex-none px-4">
                {badge.unwrap_or_default()}
            </div>
        </div>
    }
}

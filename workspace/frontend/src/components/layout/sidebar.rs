use yew::prelude::*;

use super::ActivePage;

#[derive(Properties, PartialEq)]
pub struct SidebarProps {
    pub active: ActivePage,
    pub on_select: Callback<ActivePage>,
}

#[function_component(Sidebar)]
pub fn sidebar(props: &SidebarProps) -> Html {
    let item = |page: ActivePage| {
        let on_select = props.on_select.clone();
        let onclick = Callback::from(move |e: MouseEvent| {
            e.prevent_default();
            log::debug!("Sidebar selected {:?}", page);
            on_select.emit(page);
        });
        let class = classes!("nav-link", (page == props.active).then_some("active"));
        html! {
            <li key={page.label()}>
                <a href="#" {class} {onclick}>
                    <i class={classes!(page.icon(), "w-5")}></i>
                    {" "}{page.label()}
                </a>
            </li>
        }
    };

    html! {
        <div class="drawer-side z-50">
            <label aria-label="close sidebar" class="drawer-overlay" for="main-drawer"></label>
            <ul class="menu p-4 w-72 min-h-full bg-base-100 text-base-content border-r border-base-300">
                <li class="mb-4">
                    <div class="flex items-center gap-3 px-2">
                        <div class="w-10 h-10 rounded-lg bg-primary flex items-center justify-center text-primary-content text-xl">
                            <i class="fas fa-industry"></i>
                        </div>
                        <span class="text-xl font-bold tracking-tight">{"SupplyChain"}</span>
                    </div>
                </li>
                {for ActivePage::ALL.iter().filter(|p| **p != ActivePage::Settings).map(|p| item(*p))}
                <div class="divider"></div>
                {item(ActivePage::Settings)}
            </ul>
        </div>
    }
}

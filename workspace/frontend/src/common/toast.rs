use std::cell::RefCell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use yew::prelude::*;

use crate::settings;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ToastLevel {
    Info,
    Success,
    Warning,
    Error,
}

impl ToastLevel {
    fn alert_class(&self) -> &'static str {
        match self {
            ToastLevel::Info => "alert-info",
            ToastLevel::Success => "alert-success",
            ToastLevel::Warning => "alert-warning",
            ToastLevel::Error => "alert-error",
        }
    }

    fn icon(&self) -> &'static str {
        match self {
            ToastLevel::Info => "fas fa-info-circle",
            ToastLevel::Success => "fas fa-check-circle",
            ToastLevel::Warning => "fas fa-exclamation-triangle",
            ToastLevel::Error => "fas fa-exclamation-circle",
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub id: usize,
    pub level: ToastLevel,
    pub message: String,
}

pub enum ToastAction {
    Push(Toast),
    Dismiss(usize),
}

/// Toasts currently on screen, oldest first.
#[derive(Default, PartialEq)]
pub struct ToastList {
    pub toasts: Vec<Toast>,
}

impl Reducible for ToastList {
    type Action = ToastAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match action {
            ToastAction::Push(toast) => toasts.push(toast),
            ToastAction::Dismiss(id) => toasts.retain(|t| t.id != id),
        }
        Rc::new(ToastList { toasts })
    }
}

#[derive(Clone, PartialEq)]
pub struct ToastContext {
    push: Callback<(ToastLevel, String)>,
}

impl ToastContext {
    pub fn show_info(&self, message: impl Into<String>) {
        self.push.emit((ToastLevel::Info, message.into()));
    }

    pub fn show_success(&self, message: impl Into<String>) {
        self.push.emit((ToastLevel::Success, message.into()));
    }

    pub fn show_warning(&self, message: impl Into<String>) {
        self.push.emit((ToastLevel::Warning, message.into()));
    }

    pub fn show_error(&self, message: impl Into<String>) {
        self.push.emit((ToastLevel::Error, message.into()));
    }
}

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

/// Stacks toasts in the top-right corner. Each one is dismissed after
/// `toast_duration_ms` or when its close button is clicked.
#[function_component(ToastProvider)]
pub fn toast_provider(props: &ToastProviderProps) -> Html {
    let list = use_reducer(ToastList::default);
    let next_id: Rc<RefCell<usize>> = use_mut_ref(|| 0);

    let push = {
        let dispatcher = list.dispatcher();
        Callback::from(move |(level, message): (ToastLevel, String)| {
            let id = {
                let mut next = next_id.borrow_mut();
                *next += 1;
                *next
            };
            dispatcher.dispatch(ToastAction::Push(Toast { id, level, message }));

            let dispatcher = dispatcher.clone();
            Timeout::new(settings::get_settings().toast_duration_ms, move || {
                dispatcher.dispatch(ToastAction::Dismiss(id));
            })
            .forget();
        })
    };

    let context = ToastContext { push };

    html! {
        <ContextProvider<ToastContext> {context}>
            {props.children.clone()}
            <div class="toast toast-top toast-end z-50">
                {for list.toasts.iter().map(|toast| {
                    let id = toast.id;
                    let on_close = {
                        let dispatcher = list.dispatcher();
                        Callback::from(move |_: MouseEvent| {
                            dispatcher.dispatch(ToastAction::Dismiss(id))
                        })
                    };
                    html! {
                        <div key={id} class={classes!("alert", toast.level.alert_class(), "shadow-lg")}>
                            <i class={toast.level.icon()}></i>
                            <span>{&toast.message}</span>
                            <button class="btn btn-sm btn-ghost btn-circle" onclick={on_close}>
                                <i class="fas fa-times"></i>
                            </button>
                        </div>
                    }
                })}
            </div>
        </ContextProvider<ToastContext>>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn toast(id: usize) -> Toast {
        Toast {
            id,
            level: ToastLevel::Info,
            message: format!("toast {}", id),
        }
    }

    #[test]
    fn test_reducer_pushes_and_dismisses() {
        let list = Rc::new(ToastList::default());
        let list = list.reduce(ToastAction::Push(toast(1)));
        let list = list.reduce(ToastAction::Push(toast(2)));
        assert_eq!(list.toasts.len(), 2);

        let list = list.reduce(ToastAction::Dismiss(1));
        assert_eq!(list.toasts, vec![toast(2)]);

        let list = list.reduce(ToastAction::Dismiss(7));
        assert_eq!(list.toasts.len(), 1);
    }
}

//! Transient operator notifications.
//!
//! Every mutation call site reports its outcome here; nothing in the app
//! surfaces errors any other way. Toasts auto-dismiss after a few seconds
//! but can be closed early.

use leptos::prelude::*;
use leptos::task::spawn_local;
use uuid::Uuid;

const AUTO_DISMISS_MS: u32 = 5000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Clone, Debug)]
pub struct Notification {
    pub id: Uuid,
    pub kind: NotificationKind,
    pub text: String,
}

#[derive(Clone, Copy)]
pub struct NotificationService {
    items: RwSignal<Vec<Notification>>,
}

impl NotificationService {
    pub fn new() -> Self {
        Self {
            items: RwSignal::new(Vec::new()),
        }
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(NotificationKind::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NotificationKind::Error, text.into());
    }

    pub fn dismiss(&self, id: Uuid) {
        self.items.update(|items| items.retain(|n| n.id != id));
    }

    fn push(&self, kind: NotificationKind, text: String) {
        let id = Uuid::new_v4();
        if kind == NotificationKind::Error {
            log::warn!("notification: {}", text);
        }
        self.items.update(|items| {
            items.push(Notification { id, kind, text });
        });
        let service = *self;
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(AUTO_DISMISS_MS).await;
            service.dismiss(id);
        });
    }
}

impl Default for NotificationService {
    fn default() -> Self {
        Self::new()
    }
}

pub fn use_notifications() -> NotificationService {
    use_context::<NotificationService>().expect("NotificationService not provided in context")
}

#[component]
pub fn NotificationTray() -> impl IntoView {
    let service = use_notifications();

    view! {
        <div class="notification-tray">
            {move || {
                service.items.get().into_iter().map(|n| {
                    let class = match n.kind {
                        NotificationKind::Success => "toast toast--success",
                        NotificationKind::Error => "toast toast--error",
                    };
                    let id = n.id;
                    view! {
                        <div class=class>
                            <span class="toast__text">{n.text.clone()}</span>
                            <button
                                class="toast__close"
                                on:click=move |_| service.dismiss(id)
                            >
                                "×"
                            </button>
                        </div>
                    }
                }).collect_view()
            }}
        </div>
    }
}

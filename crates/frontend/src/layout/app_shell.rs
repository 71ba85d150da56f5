use crate::layout::notifications::NotificationTray;
use crate::layout::sidebar::Sidebar;
use crate::shared::icons::icon;
use crate::system::auth::context::use_auth;
use crate::system::auth::storage;
use leptos::prelude::*;

/// Application frame: header with the signed-in operator, navigation
/// sidebar, routed content area, notification tray.
#[component]
pub fn Shell(children: ChildrenFn) -> impl IntoView {
    let (auth_state, set_auth_state) = use_auth();

    let operator = move || {
        auth_state
            .get()
            .user_info
            .map(|u| format!("{} ({})", u.display_name, u.role))
            .unwrap_or_default()
    };

    let logout = move |_| {
        storage::clear_tokens();
        set_auth_state.set(Default::default());
    };

    view! {
        <div class="app-shell">
            <header class="app-header">
                <span class="app-header__title">"Servicing Admin"</span>
                <div class="app-header__user">
                    <span>{operator}</span>
                    <button class="app-header__logout" on:click=logout title="Sign out">
                        {icon("logout")}
                    </button>
                </div>
            </header>
            <div class="app-body">
                <Sidebar />
                <main class="app-content">
                    {children()}
                </main>
            </div>
            <NotificationTray />
        </div>
    }
}

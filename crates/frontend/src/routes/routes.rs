use crate::domain::invoices::ui::list::InvoicesList;
use crate::domain::loans::ui::list::LoansList;
use crate::domain::repair_orders::ui::list::RepairOrdersList;
use crate::domain::repayments::ui::list::RepaymentsList;
use crate::domain::telemarketers::ui::list::TelemarketersList;
use crate::layout::Shell;
use crate::system::auth::context::use_auth;
use crate::system::pages::login::LoginPage;
use leptos::prelude::*;
use leptos_router::components::{Outlet, ParentRoute, Route, Router, Routes};
use leptos_router::path;

#[component]
fn MainLayout() -> impl IntoView {
    view! {
        <Shell>
            <Outlet />
        </Shell>
    }
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().access_token.is_some()
            fallback=|| view! { <LoginPage /> }
        >
            <Router>
                <Routes fallback=|| view! { <p>"Not found"</p> }>
                    <ParentRoute path=path!("") view=MainLayout>
                        <Route path=path!("") view=LoansList />
                        <Route path=path!("loans") view=LoansList />
                        <Route path=path!("invoices") view=InvoicesList />
                        <Route path=path!("repayments") view=RepaymentsList />
                        <Route path=path!("telemarketers") view=TelemarketersList />
                        <Route path=path!("repair-orders") view=RepairOrdersList />
                    </ParentRoute>
                </Routes>
            </Router>
        </Show>
    }
}

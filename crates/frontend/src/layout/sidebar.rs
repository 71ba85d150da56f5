use crate::shared::icons::icon;
use leptos::prelude::*;
use leptos_router::components::A;

struct NavItem {
    href: &'static str,
    icon: &'static str,
    label: &'static str,
}

const NAV_ITEMS: &[NavItem] = &[
    NavItem {
        href: "/loans",
        icon: "loans",
        label: "Loans",
    },
    NavItem {
        href: "/invoices",
        icon: "invoices",
        label: "Invoices",
    },
    NavItem {
        href: "/repayments",
        icon: "repayments",
        label: "Repayments",
    },
    NavItem {
        href: "/telemarketers",
        icon: "telesales",
        label: "Telesales",
    },
    NavItem {
        href: "/repair-orders",
        icon: "repairs",
        label: "Repair Orders",
    },
];

#[component]
pub fn Sidebar() -> impl IntoView {
    view! {
        <nav class="sidebar">
            <ul class="sidebar__list">
                {NAV_ITEMS.iter().map(|item| {
                    view! {
                        <li class="sidebar__item">
                            <A href=item.href>
                                {icon(item.icon)}
                                <span class="sidebar__label">{item.label}</span>
                            </A>
                        </li>
                    }
                }).collect_view()}
            </ul>
        </nav>
    }
}

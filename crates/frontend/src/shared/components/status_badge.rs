use leptos::prelude::*;

/// Colored pill for a row's status value.
///
/// The variant is derived from the canonical (lower-cased) status key, so
/// every view gets consistent coloring without per-view mapping tables.
#[component]
pub fn StatusBadge(#[prop(into)] status: Signal<String>) -> impl IntoView {
    let badge_class = move || {
        let status = status.get().to_lowercase();
        let variant = match status.as_str() {
            "active" | "paid" | "confirmed" | "disbursed" | "closed" | "released" => {
                "badge--success"
            }
            "pending" | "unpaid" | "in_repair" | "awaiting_parts" => "badge--warning",
            "overdue" | "defaulted" | "failed" | "locked" | "written_off" => "badge--error",
            _ => "badge--neutral",
        };
        format!("badge badge--status {}", variant)
    };

    view! {
        <span class=badge_class>
            {move || status.get()}
        </span>
    }
}

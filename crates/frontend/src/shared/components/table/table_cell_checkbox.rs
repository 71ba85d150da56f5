//! Row checkbox for bulk-action selection
//!
//! Rows outside the eligible set render the checkbox disabled; the selection
//! reconciler guarantees they are never checked.

use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;

#[component]
pub fn TableCellCheckbox(
    #[prop(into)] item_id: String,

    #[prop(into)] selected: Signal<HashSet<String>>,

    /// Whether this row qualifies for the bulk action. Defaults to eligible.
    #[prop(optional, into)]
    eligible: MaybeProp<bool>,

    /// Callback with (item_id, checked).
    on_change: Callback<(String, bool)>,
) -> impl IntoView {
    let item_id_for_checked = item_id.clone();
    let item_id_for_change = item_id.clone();

    view! {
        <TableCell class="fixed-checkbox-column" on:click=|e| e.stop_propagation()>
            <input
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || selected.get().contains(&item_id_for_checked)
                disabled=move || !eligible.get().unwrap_or(true)
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    on_change.run((item_id_for_change.clone(), checked));
                }
            />
        </TableCell>
    }
}

//! Select-all checkbox for the table header
//!
//! Three states (unchecked / checked / indeterminate) computed against the
//! *eligible* id set, not all rows: select-all only ever selects rows that
//! qualify for the bulk action.

use leptos::prelude::*;
use std::collections::HashSet;
use thaw::*;
use wasm_bindgen::JsCast;

#[component]
pub fn TableHeaderCheckbox(
    /// Ids of the rows currently eligible for the bulk action.
    #[prop(into)]
    eligible: Signal<HashSet<String>>,

    #[prop(into)] selected: Signal<HashSet<String>>,

    /// Callback with true = select all eligible, false = clear.
    on_change: Callback<bool>,
) -> impl IntoView {
    let checkbox_state = Signal::derive(move || {
        let eligible = eligible.get();
        let sel = selected.get();

        if eligible.is_empty() {
            return CheckboxState::Unchecked;
        }

        let selected_count = eligible.iter().filter(|id| sel.contains(*id)).count();
        if selected_count == 0 {
            CheckboxState::Unchecked
        } else if selected_count == eligible.len() {
            CheckboxState::Checked
        } else {
            CheckboxState::Indeterminate
        }
    });

    let checkbox_ref = NodeRef::<leptos::html::Input>::new();

    // The indeterminate state only exists as a DOM property.
    Effect::new(move |_| {
        if let Some(input) = checkbox_ref.get() {
            if let Some(input_el) = input.dyn_ref::<web_sys::HtmlInputElement>() {
                let is_indeterminate =
                    matches!(checkbox_state.get(), CheckboxState::Indeterminate);
                input_el.set_indeterminate(is_indeterminate);
            }
        }
    });

    view! {
        <TableHeaderCell class="fixed-checkbox-column">
            <input
                node_ref=checkbox_ref
                type="checkbox"
                class="table__checkbox"
                prop:checked=move || matches!(checkbox_state.get(), CheckboxState::Checked)
                disabled=move || eligible.get().is_empty()
                on:change=move |ev| {
                    let checked = event_target_checked(&ev);
                    on_change.run(checked);
                }
            />
        </TableHeaderCell>
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum CheckboxState {
    Unchecked,
    Checked,
    Indeterminate,
}

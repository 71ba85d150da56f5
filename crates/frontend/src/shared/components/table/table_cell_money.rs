//! Table cell for currency values
//!
//! Right-aligned, thousands separators, em dash for missing amounts.

use super::number_format::format_money;
use leptos::prelude::*;
use thaw::*;

#[component]
pub fn TableCellMoney(
    #[prop(into)] value: Signal<Option<f64>>,

    /// Currency prefix, e.g. "KES".
    #[prop(optional, default = "")]
    currency: &'static str,

    #[prop(optional, default = false)] bold: bool,
) -> impl IntoView {
    let formatted_text = move || match value.get() {
        Some(v) => {
            let formatted = format_money(v);
            if currency.is_empty() {
                formatted
            } else {
                format!("{} {}", currency, formatted)
            }
        }
        None => "—".to_string(),
    };

    let cell_style = move || {
        let mut styles = vec!["text-align: right", "font-variant-numeric: tabular-nums"];
        if bold {
            styles.push("font-weight: 600");
        }
        styles.join("; ")
    };

    view! {
        <TableCell>
            <div style=cell_style>
                {formatted_text}
            </div>
        </TableCell>
    }
}

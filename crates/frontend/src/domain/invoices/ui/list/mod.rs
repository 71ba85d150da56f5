pub mod state;

use crate::domain::invoices::api;
use crate::domain::invoices::model::{normalize_invoices, InvoiceRow};
use crate::layout::notifications::use_notifications;
use crate::shared::components::table::number_format::format_money;
use crate::shared::components::table::{SortableHeaderCell, TableCellMoney};
use crate::shared::components::{FilterPanel, PaginationControls, StatusBadge};
use crate::shared::date_utils::format_date;
use crate::shared::export::{export_filename, export_to_excel, ExportOptions};
use crate::shared::icons::icon;
use crate::shared::list_utils::{sort_list, SearchInput};
use crate::shared::query::{self, ListQuery};
use crate::shared::table_state::{
    apply_filters, visible_rows, MissingDatePolicy, PaginationMode,
};
use leptos::prelude::*;
use leptos::task::spawn_local;
use state::{create_state, STATUS_OPTIONS};
use thaw::*;

/// Invoice register. The due-date range filter excludes undated invoices:
/// a "due in period" report must not include rows that have no due date.
const DATE_POLICY: MissingDatePolicy = MissingDatePolicy::Exclude;

#[component]
pub fn InvoicesList() -> impl IntoView {
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let filter_expanded = RwSignal::new(true);

    let notifications = use_notifications();

    state.update(|s| query::read_from_location().apply_to(&mut s.list));
    Effect::new(move |_| {
        let q = state.with(|s| ListQuery::from_state(&s.list));
        query::write_to_location(&q);
    });

    let load = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match api::fetch_invoices().await {
                Ok(raw) => {
                    let (rows, _report) = normalize_invoices(&raw);
                    state.update(|s| {
                        s.invoices = rows;
                        s.is_loaded = true;
                    });
                    set_loading.set(false);
                }
                Err(e) => {
                    set_error.set(Some(e));
                    set_loading.set(false);
                }
            }
        });
    };

    load();

    let filtered = Memo::new(move |_| {
        state.with(|s| {
            let mut rows = apply_filters(&s.invoices, &s.list.filter, DATE_POLICY);
            sort_list(&mut rows, &s.list.sort_field, s.list.sort_ascending);
            rows
        })
    });

    let visible = Memo::new(move |_| {
        state.with(|s| visible_rows(&s.invoices, &s.list, PaginationMode::Client, DATE_POLICY))
    });

    let toggle_sort = Callback::new(move |field: String| {
        state.update(|s| s.list.toggle_sort(&field));
    });

    let export = move |_| {
        let rows = filtered.get_untracked();
        let opts = ExportOptions {
            include_status: option_env!("EXPORT_STATUS_COLUMN").is_some(),
        };
        match export_to_excel(&rows, &export_filename("invoices"), opts) {
            Ok(()) => notifications.success("Export ready"),
            Err(e) => notifications.error(format!("Export failed: {}", e)),
        }
    };

    let sort_field_signal = Signal::derive(move || state.with(|s| s.list.sort_field.clone()));
    let sort_ascending_signal = Signal::derive(move || state.with(|s| s.list.sort_ascending));

    view! {
        <div class="invoices-list">
            <div class="page-header">
                <h2>"Invoices"</h2>
                <button class="btn" on:click=move |_| load() disabled=move || loading.get()>
                    {icon("refresh")}
                    {move || if loading.get() { " Loading..." } else { " Refresh" }}
                </button>
                <button
                    class="btn"
                    on:click=export
                    disabled=move || loading.get() || filtered.get().is_empty()
                >
                    {icon("download")}
                    " Export to Excel"
                </button>
                {move || {
                    let rows = filtered.get();
                    let due: f64 = rows.iter().map(|i| i.amount).sum();
                    view! {
                        <span class="totals-strip">
                            {format!("Total: {} invoices | Due: {}", rows.len(), format_money(due))}
                        </span>
                    }
                }}
            </div>

            <FilterPanel
                is_expanded=filter_expanded
                active_filters_count=Signal::derive(move || {
                    state.with(|s| s.list.filter.active_count())
                })
                pagination_controls=move || view! {
                    <PaginationControls
                        current_page=Signal::derive(move || visible.get().page)
                        total_pages=Signal::derive(move || visible.get().total_pages)
                        total_count=Signal::derive(move || visible.get().total_count)
                        page_size=Signal::derive(move || state.with(|s| s.list.page_size))
                        on_page_change=Callback::new(move |page| {
                            state.update(|s| s.list.set_page(page));
                        })
                        on_page_size_change=Callback::new(move |size| {
                            state.update(|s| s.list.set_page_size(size));
                        })
                    />
                }
                filter_content=move || view! {
                    <div class="filter-fields">
                        <SearchInput
                            value=Signal::derive(move || {
                                state.with(|s| s.list.filter.search_text.clone())
                            })
                            on_change=Callback::new(move |text| {
                                state.update(|s| s.list.set_search(text));
                            })
                            placeholder="Invoice №, customer, loan ID..."
                        />
                        <div class="filter-statuses">
                            {STATUS_OPTIONS.iter().map(|&status| {
                                view! {
                                    <label class="filter-checkbox">
                                        <input
                                            type="checkbox"
                                            prop:checked=move || {
                                                state.with(|s| s.list.filter.statuses.contains(status))
                                            }
                                            on:change=move |_| {
                                                state.update(|s| s.list.toggle_status(status));
                                            }
                                        />
                                        {status}
                                    </label>
                                }
                            }).collect_view()}
                        </div>
                        <label>"Due from"</label>
                        <input
                            type="date"
                            prop:value=move || {
                                state.with(|s| s.list.filter.date_from.clone().unwrap_or_default())
                            }
                            on:input=move |ev| {
                                let from = event_target_value(&ev);
                                state.update(|s| {
                                    let to = s.list.filter.date_to.clone();
                                    s.list.set_date_range(Some(from.clone()), to);
                                });
                            }
                        />
                        <label>"to"</label>
                        <input
                            type="date"
                            prop:value=move || {
                                state.with(|s| s.list.filter.date_to.clone().unwrap_or_default())
                            }
                            on:input=move |ev| {
                                let to = event_target_value(&ev);
                                state.update(|s| {
                                    let from = s.list.filter.date_from.clone();
                                    s.list.set_date_range(from, Some(to.clone()));
                                });
                            }
                        />
                    </div>
                }
            />

            {move || {
                if let Some(err) = error.get() {
                    view! {
                        <div class="error-banner">
                            <p>{format!("Failed to load invoices: {}", err)}</p>
                            <button class="btn" on:click=move |_| load()>"Retry"</button>
                        </div>
                    }.into_any()
                } else if loading.get() {
                    view! { <p class="loading-placeholder">"Loading..."</p> }.into_any()
                } else {
                    view! {
                        <Table>
                            <TableHeader>
                                <TableRow>
                                    <SortableHeaderCell
                                        label="Invoice №"
                                        sort_field="invoice_no"
                                        current_sort_field=sort_field_signal
                                        sort_ascending=sort_ascending_signal
                                        on_sort=toggle_sort
                                    />
                                    <TableHeaderCell min_width=120.0>"Loan"</TableHeaderCell>
                                    <SortableHeaderCell
                                        label="Customer"
                                        sort_field="customer"
                                        current_sort_field=sort_field_signal
                                        sort_ascending=sort_ascending_signal
                                        on_sort=toggle_sort
                                        min_width=160.0
                                    />
                                    <SortableHeaderCell
                                        label="Amount"
                                        sort_field="amount"
                                        align="right"
                                        current_sort_field=sort_field_signal
                                        sort_ascending=sort_ascending_signal
                                        on_sort=toggle_sort
                                    />
                                    <SortableHeaderCell
                                        label="Due"
                                        sort_field="due_date"
                                        current_sort_field=sort_field_signal
                                        sort_ascending=sort_ascending_signal
                                        on_sort=toggle_sort
                                    />
                                    <SortableHeaderCell
                                        label="Status"
                                        sort_field="status"
                                        current_sort_field=sort_field_signal
                                        sort_ascending=sort_ascending_signal
                                        on_sort=toggle_sort
                                    />
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {move || visible.get().rows.into_iter().map(|invoice: InvoiceRow| {
                                    let due = invoice.due_date
                                        .as_deref()
                                        .map(format_date)
                                        .unwrap_or_else(|| "—".to_string());
                                    view! {
                                        <TableRow>
                                            <TableCell>{invoice.invoice_no.clone()}</TableCell>
                                            <TableCell>
                                                <code>{invoice.loan_id.clone()}</code>
                                            </TableCell>
                                            <TableCell>{invoice.customer.clone()}</TableCell>
                                            <TableCellMoney value=Some(invoice.amount) />
                                            <TableCell>{due}</TableCell>
                                            <TableCell>
                                                <StatusBadge status=invoice.status.clone() />
                                            </TableCell>
                                        </TableRow>
                                    }
                                }).collect_view()}
                            </TableBody>
                        </Table>
                    }.into_any()
                }
            }}
        </div>
    }
}

pub mod state;

use crate::domain::repayments::api;
use crate::domain::repayments::model::{normalize_repayments, RepaymentRow};
use crate::layout::notifications::use_notifications;
use crate::shared::components::table::number_format::format_money;
use crate::shared::components::table::{SortableHeaderCell, TableCellMoney};
use crate::shared::components::{FilterPanel, PaginationControls, StatusBadge};
use crate::shared::date_utils::format_datetime;
use crate::shared::export::{export_filename, export_to_excel, ExportOptions};
use crate::shared::icons::icon;
use crate::shared::list_utils::SearchInput;
use crate::shared::table_state::{visible_rows, MissingDatePolicy, PaginationMode};
use crate::system::auth::guard::use_permission;
use leptos::prelude::*;
use leptos::task::spawn_local;
use state::{create_state, STATUS_OPTIONS};
use thaw::*;

/// Repayments register. The endpoint pages server-side, so every filter or
/// page change goes back to the backend; the pipeline only sorts the
/// received page and takes its page math from the envelope total.
#[component]
pub fn RepaymentsList() -> impl IntoView {
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let filter_expanded = RwSignal::new(true);

    let notifications = use_notifications();
    let can_update_status = use_permission("repayments.update_status");

    let load = move || {
        let list = state.with_untracked(|s| s.list.clone());
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match api::fetch_repayments(&list).await {
                Ok(envelope) => {
                    let (rows, _report) = normalize_repayments(&envelope.items);
                    state.update(|s| {
                        s.repayments = rows;
                        s.server_total = envelope.pagination.as_ref().map(|p| p.total);
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

    let visible = Memo::new(move |_| {
        state.with(|s| {
            let mode = match s.server_total {
                Some(total) => PaginationMode::Server { total },
                None => PaginationMode::Client,
            };
            visible_rows(&s.repayments, &s.list, mode, MissingDatePolicy::Include)
        })
    });

    let toggle_sort = Callback::new(move |field: String| {
        state.update(|s| s.list.toggle_sort(&field));
    });

    let change_status = move |id: String, status: String| {
        spawn_local(async move {
            match api::update_status(&id, &status).await {
                Ok(()) => {
                    notifications.success(format!("Repayment marked {}", status));
                    load();
                }
                Err(e) => {
                    notifications.error(format!("Status change failed: {}", e));
                }
            }
        });
    };

    let export = move |_| {
        let rows = visible.get_untracked().rows;
        let opts = ExportOptions {
            include_status: option_env!("EXPORT_STATUS_COLUMN").is_some(),
        };
        match export_to_excel(&rows, &export_filename("repayments"), opts) {
            Ok(()) => notifications.success("Export ready"),
            Err(e) => notifications.error(format!("Export failed: {}", e)),
        }
    };

    let sort_field_signal = Signal::derive(move || state.with(|s| s.list.sort_field.clone()));
    let sort_ascending_signal = Signal::derive(move || state.with(|s| s.list.sort_ascending));

    view! {
        <div class="repayments-list">
            <div class="page-header">
                <h2>"Repayments"</h2>
                <button class="btn" on:click=move |_| load() disabled=move || loading.get()>
                    {icon("refresh")}
                    {move || if loading.get() { " Loading..." } else { " Refresh" }}
                </button>
                <button
                    class="btn"
                    on:click=export
                    disabled=move || loading.get() || visible.get().rows.is_empty()
                >
                    {icon("download")}
                    " Export to Excel"
                </button>
                {move || {
                    let page = visible.get();
                    let amount: f64 = page.rows.iter().map(|r| r.amount).sum();
                    view! {
                        <span class="totals-strip">
                            {format!(
                                "Page: {} repayments of {} | Amount on page: {}",
                                page.rows.len(),
                                page.total_count,
                                format_money(amount),
                            )}
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
                            load();
                        })
                        on_page_size_change=Callback::new(move |size| {
                            state.update(|s| s.list.set_page_size(size));
                            load();
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
                                load();
                            })
                            placeholder="Reference, payer..."
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
                                                load();
                                            }
                                        />
                                        {status}
                                    </label>
                                }
                            }).collect_view()}
                        </div>
                        <label>"Paid from"</label>
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
                                load();
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
                                load();
                            }
                        />
                    </div>
                }
            />

            {move || {
                if let Some(err) = error.get() {
                    view! {
                        <div class="error-banner">
                            <p>{format!("Failed to load repayments: {}", err)}</p>
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
                                        label="Reference"
                                        sort_field="reference"
                                        current_sort_field=sort_field_signal
                                        sort_ascending=sort_ascending_signal
                                        on_sort=toggle_sort
                                    />
                                    <SortableHeaderCell
                                        label="Payer"
                                        sort_field="payer"
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
                                        label="Channel"
                                        sort_field="channel"
                                        current_sort_field=sort_field_signal
                                        sort_ascending=sort_ascending_signal
                                        on_sort=toggle_sort
                                    />
                                    <SortableHeaderCell
                                        label="Paid At"
                                        sort_field="paid_at"
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
                                    <Show when=move || can_update_status.get()>
                                        <TableHeaderCell min_width=140.0>"Actions"</TableHeaderCell>
                                    </Show>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {move || visible.get().rows.into_iter().map(|repayment: RepaymentRow| {
                                    let paid_at = repayment.paid_at
                                        .as_deref()
                                        .map(format_datetime)
                                        .unwrap_or_else(|| "—".to_string());
                                    let id_for_action = repayment.id.clone();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <code>{repayment.reference.clone()}</code>
                                            </TableCell>
                                            <TableCell>{repayment.payer.clone()}</TableCell>
                                            <TableCellMoney value=Some(repayment.amount) />
                                            <TableCell>{repayment.channel.clone()}</TableCell>
                                            <TableCell>{paid_at}</TableCell>
                                            <TableCell>
                                                <StatusBadge status=repayment.status.clone() />
                                            </TableCell>
                                            <Show when=move || can_update_status.get()>
                                                {
                                                    let id_for_action = id_for_action.clone();
                                                    view! {
                                                        <TableCell>
                                                            <select
                                                                class="status-select"
                                                                on:change=move |ev| {
                                                                    let status = event_target_value(&ev);
                                                                    if !status.is_empty() {
                                                                        change_status(id_for_action.clone(), status);
                                                                    }
                                                                }
                                                            >
                                                                <option value="">"Set status..."</option>
                                                                {STATUS_OPTIONS.iter().map(|&s| {
                                                                    view! { <option value=s>{s}</option> }
                                                                }).collect_view()}
                                                            </select>
                                                        </TableCell>
                                                    }
                                                }
                                            </Show>
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

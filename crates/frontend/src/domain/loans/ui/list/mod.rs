pub mod state;

use super::details::LoanDetails;
use crate::domain::loans::api;
use crate::domain::loans::model::{normalize_loans, LoanRow};
use crate::layout::modal_service::{Modal, ModalService};
use crate::layout::notifications::use_notifications;
use crate::shared::components::table::{
    SortableHeaderCell, TableCellCheckbox, TableCellMoney, TableHeaderCheckbox,
};
use crate::shared::components::{FilterPanel, FilterTag, PaginationControls, StatusBadge};
use crate::shared::date_utils::format_date;
use crate::shared::export::{export_filename, export_to_excel, ExportOptions};
use crate::shared::icons::icon;
use crate::shared::list_utils::{sort_list, SearchInput};
use crate::shared::components::table::number_format::format_money;
use crate::shared::query::{self, ListQuery};
use crate::shared::selection;
use crate::shared::table_state::{
    apply_filters, visible_rows, MissingDatePolicy, PaginationMode,
};
use crate::system::auth::guard::use_permission;
use leptos::prelude::*;
use leptos::task::spawn_local;
use state::{create_state, STATUS_OPTIONS};
use std::collections::HashSet;
use thaw::*;

#[component]
pub fn LoansList() -> impl IntoView {
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let (detail_id, set_detail_id) = signal::<Option<String>>(None);
    let filter_expanded = RwSignal::new(true);

    let notifications = use_notifications();
    let modal = use_context::<ModalService>().expect("ModalService not provided in context");
    let can_disburse = use_permission("loans.disburse");

    // Shareable links: seed the filter state from the URL once, mirror it
    // back on every change.
    state.update(|s| query::read_from_location().apply_to(&mut s.list));
    Effect::new(move |_| {
        let q = state.with(|s| ListQuery::from_state(&s.list));
        query::write_to_location(&q);
    });

    let load = move || {
        wasm_bindgen_futures::spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match api::fetch_loans().await {
                Ok(raw) => {
                    let (rows, _report) = normalize_loans(&raw);
                    state.update(|s| {
                        s.loans = rows;
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

    // Filtered (pre-pagination) set: feeds totals, export and eligibility.
    let filtered = Memo::new(move |_| {
        state.with(|s| {
            let mut rows = apply_filters(&s.loans, &s.list.filter, MissingDatePolicy::Include);
            sort_list(&mut rows, &s.list.sort_field, s.list.sort_ascending);
            rows
        })
    });

    let visible = Memo::new(move |_| {
        state.with(|s| {
            visible_rows(
                &s.loans,
                &s.list,
                PaginationMode::Client,
                MissingDatePolicy::Include,
            )
        })
    });

    // Only loans with an unpaid invoice can be bulk-disbursed.
    let eligible_ids = Memo::new(move |_| {
        filtered
            .get()
            .iter()
            .filter(|l| l.has_unpaid_invoice)
            .map(|l| l.id.clone())
            .collect::<HashSet<String>>()
    });

    // Keep the selection a subset of the eligible set whenever a filter
    // changes what qualifies.
    Effect::new(move |_| {
        let eligible = eligible_ids.get();
        let mut reconciled = state.with_untracked(|s| s.selected_ids.clone());
        if selection::reconcile(&mut reconciled, &eligible) {
            state.update(|s| s.selected_ids = reconciled);
        }
    });

    let selected = Signal::derive(move || state.with(|s| s.selected_ids.clone()));
    let selected_count = move || state.with(|s| s.selected_ids.len());

    let toggle_row = Callback::new(move |(id, checked): (String, bool)| {
        state.update(|s| selection::toggle(&mut s.selected_ids, &id, checked));
    });

    let toggle_all = Callback::new(move |_checked: bool| {
        let eligible = eligible_ids.get_untracked();
        state.update(|s| selection::toggle_all(&mut s.selected_ids, &eligible));
    });

    let toggle_sort = Callback::new(move |field: String| {
        state.update(|s| s.list.toggle_sort(&field));
    });

    let export = move |_| {
        let rows = filtered.get_untracked();
        let opts = ExportOptions {
            include_status: option_env!("EXPORT_STATUS_COLUMN").is_some(),
        };
        match export_to_excel(&rows, &export_filename("loans"), opts) {
            Ok(()) => notifications.success("Export ready"),
            Err(e) => notifications.error(format!("Export failed: {}", e)),
        }
    };

    let run_bulk_disbursement = move |_| {
        modal.hide();
        let ids: Vec<String> = state.with_untracked(|s| s.selected_ids.iter().cloned().collect());
        if ids.is_empty() {
            return;
        }
        spawn_local(async move {
            match api::trigger_bulk_disbursement(ids).await {
                Ok(resp) => {
                    if resp.is_full_failure() {
                        // Selection stays put so the operator can retry.
                        notifications.error(format!("Bulk disbursement failed: {}", resp.summary()));
                    } else {
                        notifications.success(format!("Bulk disbursement: {}", resp.summary()));
                        state.update(|s| s.selected_ids.clear());
                        load();
                    }
                }
                Err(e) => {
                    notifications.error(format!("Bulk disbursement failed: {}", e));
                }
            }
        });
    };

    let totals = move || {
        let rows = filtered.get();
        let amount: f64 = rows.iter().map(|l| l.amount).sum();
        let paid: f64 = rows.iter().map(|l| l.amount_paid).sum();
        (rows.len(), amount, paid)
    };

    view! {
        <div class="loans-list">
            {move || {
                if let Some(id) = detail_id.get() {
                    view! {
                        <div class="modal-overlay" style="align-items: flex-start; padding-top: 40px;">
                            <div class="modal-content" style="max-width: 900px; margin: 0;">
                                <LoanDetails
                                    id=id
                                    on_close=move || set_detail_id.set(None)
                                />
                            </div>
                        </div>
                    }.into_any()
                } else {
                    view! { <></> }.into_any()
                }
            }}

            <div class="page-header">
                <h2>"Loans"</h2>
                <button
                    class="btn"
                    on:click=move |_| load()
                    disabled=move || loading.get()
                >
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
                <Show when=move || can_disburse.get()>
                    <button
                        class="btn btn--primary"
                        on:click=move |_| modal.show()
                        disabled=move || selected_count() == 0
                    >
                        {move || format!("Disburse selected ({})", selected_count())}
                    </button>
                </Show>
                {move || {
                    let (count, amount, paid) = totals();
                    view! {
                        <span class="totals-strip">
                            {format!(
                                "Total: {} loans | Amount: {} | Paid: {}",
                                count,
                                format_money(amount),
                                format_money(paid),
                            )}
                        </span>
                    }
                }}
            </div>

            <Modal>
                <div class="confirm-dialog">
                    <h3>"Confirm bulk disbursement"</h3>
                    <p>
                        {move || format!(
                            "Trigger disbursement for {} selected loans?",
                            selected_count()
                        )}
                    </p>
                    <div class="confirm-dialog__actions">
                        <button class="btn" on:click=move |_| modal.hide()>"Cancel"</button>
                        <button class="btn btn--primary" on:click=run_bulk_disbursement>
                            "Disburse"
                        </button>
                    </div>
                </div>
            </Modal>

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
                }.into_any()
                filter_content=move || view! {
                    <div class="filter-fields">
                        <SearchInput
                            value=Signal::derive(move || {
                                state.with(|s| s.list.filter.search_text.clone())
                            })
                            on_change=Callback::new(move |text| {
                                state.update(|s| s.list.set_search(text));
                            })
                            placeholder="Borrower, phone, loan ID..."
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
                        <label>"Applied from"</label>
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
                }.into_any()
                filter_tags=move || view! {
                    {move || {
                        state.with(|s| s.list.filter.statuses.clone())
                            .into_iter()
                            .map(|status| {
                                let status_for_remove = status.clone();
                                view! {
                                    <FilterTag
                                        label=format!("status: {}", status)
                                        on_remove=Callback::new(move |_| {
                                            state.update(|s| {
                                                s.list.toggle_status(&status_for_remove);
                                            });
                                        })
                                    />
                                }
                            })
                            .collect_view()
                    }}
                }.into_any()
            />

            {move || {
                if let Some(err) = error.get() {
                    view! {
                        <div class="error-banner">
                            <p>{format!("Failed to load loans: {}", err)}</p>
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
                                    <TableHeaderCheckbox
                                        eligible=eligible_ids
                                        selected=selected
                                        on_change=toggle_all
                                    />
                                    <SortableHeaderCell
                                        label="Borrower"
                                        sort_field="borrower_name"
                                        current_sort_field=Signal::derive(move || {
                                            state.with(|s| s.list.sort_field.clone())
                                        })
                                        sort_ascending=Signal::derive(move || {
                                            state.with(|s| s.list.sort_ascending)
                                        })
                                        on_sort=toggle_sort
                                        min_width=160.0
                                    />
                                    <TableHeaderCell min_width=120.0>"Phone"</TableHeaderCell>
                                    <SortableHeaderCell
                                        label="Product"
                                        sort_field="product"
                                        current_sort_field=Signal::derive(move || {
                                            state.with(|s| s.list.sort_field.clone())
                                        })
                                        sort_ascending=Signal::derive(move || {
                                            state.with(|s| s.list.sort_ascending)
                                        })
                                        on_sort=toggle_sort
                                    />
                                    <SortableHeaderCell
                                        label="Amount"
                                        sort_field="amount"
                                        align="right"
                                        current_sort_field=Signal::derive(move || {
                                            state.with(|s| s.list.sort_field.clone())
                                        })
                                        sort_ascending=Signal::derive(move || {
                                            state.with(|s| s.list.sort_ascending)
                                        })
                                        on_sort=toggle_sort
                                    />
                                    <SortableHeaderCell
                                        label="Paid"
                                        sort_field="amount_paid"
                                        align="right"
                                        current_sort_field=Signal::derive(move || {
                                            state.with(|s| s.list.sort_field.clone())
                                        })
                                        sort_ascending=Signal::derive(move || {
                                            state.with(|s| s.list.sort_ascending)
                                        })
                                        on_sort=toggle_sort
                                    />
                                    <SortableHeaderCell
                                        label="Agent"
                                        sort_field="agent"
                                        current_sort_field=Signal::derive(move || {
                                            state.with(|s| s.list.sort_field.clone())
                                        })
                                        sort_ascending=Signal::derive(move || {
                                            state.with(|s| s.list.sort_ascending)
                                        })
                                        on_sort=toggle_sort
                                    />
                                    <SortableHeaderCell
                                        label="Applied"
                                        sort_field="date_applied"
                                        current_sort_field=Signal::derive(move || {
                                            state.with(|s| s.list.sort_field.clone())
                                        })
                                        sort_ascending=Signal::derive(move || {
                                            state.with(|s| s.list.sort_ascending)
                                        })
                                        on_sort=toggle_sort
                                    />
                                    <SortableHeaderCell
                                        label="Status"
                                        sort_field="status"
                                        current_sort_field=Signal::derive(move || {
                                            state.with(|s| s.list.sort_field.clone())
                                        })
                                        sort_ascending=Signal::derive(move || {
                                            state.with(|s| s.list.sort_ascending)
                                        })
                                        on_sort=toggle_sort
                                    />
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {move || visible.get().rows.into_iter().map(|loan: LoanRow| {
                                    let row_id = loan.id.clone();
                                    let id_for_click = loan.id.clone();
                                    let eligible_row = loan.has_unpaid_invoice;
                                    let applied = loan.date_applied
                                        .as_deref()
                                        .map(format_date)
                                        .unwrap_or_else(|| "—".to_string());
                                    view! {
                                        <TableRow>
                                            <TableCellCheckbox
                                                item_id=row_id
                                                selected=selected
                                                eligible=eligible_row
                                                on_change=toggle_row
                                            />
                                            <TableCell>
                                                <span
                                                    class="table__link"
                                                    on:click=move |_| {
                                                        set_detail_id.set(Some(id_for_click.clone()));
                                                    }
                                                >
                                                    {loan.borrower_name.clone()}
                                                </span>
                                            </TableCell>
                                            <TableCell>{loan.phone.clone()}</TableCell>
                                            <TableCell>{loan.product.clone()}</TableCell>
                                            <TableCellMoney value=Some(loan.amount) />
                                            <TableCellMoney value=Some(loan.amount_paid) />
                                            <TableCell>{loan.agent.clone()}</TableCell>
                                            <TableCell>{applied}</TableCell>
                                            <TableCell>
                                                <StatusBadge status=loan.status.clone() />
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

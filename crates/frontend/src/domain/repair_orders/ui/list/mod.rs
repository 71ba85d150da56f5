pub mod state;

use crate::domain::repair_orders::api;
use crate::domain::repair_orders::model::{normalize_repair_orders, RepairOrderRow};
use crate::layout::notifications::use_notifications;
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::components::{FilterPanel, PaginationControls, StatusBadge};
use crate::shared::date_utils::format_date;
use crate::shared::export::{export_filename, export_to_excel, ExportOptions};
use crate::shared::icons::icon;
use crate::shared::list_utils::{sort_list, SearchInput};
use crate::shared::table_state::{
    apply_filters, visible_rows, MissingDatePolicy, PaginationMode,
};
use crate::system::auth::guard::use_permission;
use contracts::domain::repair_orders::DeviceAction;
use leptos::prelude::*;
use leptos::task::spawn_local;
use state::{create_state, STATUS_OPTIONS};
use thaw::*;

#[component]
pub fn RepairOrdersList() -> impl IntoView {
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let filter_expanded = RwSignal::new(true);

    let notifications = use_notifications();
    let can_device_action = use_permission("repair_orders.device_action");

    let load = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match api::fetch_repair_orders().await {
                Ok(raw) => {
                    let (rows, _report) = normalize_repair_orders(&raw);
                    state.update(|s| {
                        s.orders = rows;
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
            let mut rows = apply_filters(&s.orders, &s.list.filter, MissingDatePolicy::Include);
            sort_list(&mut rows, &s.list.sort_field, s.list.sort_ascending);
            rows
        })
    });

    let visible = Memo::new(move |_| {
        state.with(|s| {
            visible_rows(
                &s.orders,
                &s.list,
                PaginationMode::Client,
                MissingDatePolicy::Include,
            )
        })
    });

    let toggle_sort = Callback::new(move |field: String| {
        state.update(|s| s.list.toggle_sort(&field));
    });

    let run_device_action = move |id: String, action: DeviceAction| {
        spawn_local(async move {
            match api::device_action(&id, action).await {
                Ok(()) => {
                    notifications.success(format!("{} requested", action.label()));
                    load();
                }
                Err(e) => {
                    notifications.error(format!("{} failed: {}", action.label(), e));
                }
            }
        });
    };

    let export = move |_| {
        let rows = filtered.get_untracked();
        let opts = ExportOptions {
            include_status: option_env!("EXPORT_STATUS_COLUMN").is_some(),
        };
        match export_to_excel(&rows, &export_filename("repair_orders"), opts) {
            Ok(()) => notifications.success("Export ready"),
            Err(e) => notifications.error(format!("Export failed: {}", e)),
        }
    };

    let sort_field_signal = Signal::derive(move || state.with(|s| s.list.sort_field.clone()));
    let sort_ascending_signal = Signal::derive(move || state.with(|s| s.list.sort_ascending));

    view! {
        <div class="repair-orders-list">
            <div class="page-header">
                <h2>"Repair Orders"</h2>
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
                    let locked = rows.iter().filter(|o| o.device_locked).count();
                    view! {
                        <span class="totals-strip">
                            {format!("Total: {} tickets | Locked devices: {}", rows.len(), locked)}
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
                            placeholder="Ticket №, IMEI, customer..."
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
                        <label>"Opened from"</label>
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
                            <p>{format!("Failed to load repair orders: {}", err)}</p>
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
                                        label="Ticket №"
                                        sort_field="ticket_no"
                                        current_sort_field=sort_field_signal
                                        sort_ascending=sort_ascending_signal
                                        on_sort=toggle_sort
                                    />
                                    <TableHeaderCell min_width=140.0>"IMEI"</TableHeaderCell>
                                    <SortableHeaderCell
                                        label="Customer"
                                        sort_field="customer"
                                        current_sort_field=sort_field_signal
                                        sort_ascending=sort_ascending_signal
                                        on_sort=toggle_sort
                                        min_width=160.0
                                    />
                                    <TableHeaderCell min_width=180.0>"Fault"</TableHeaderCell>
                                    <SortableHeaderCell
                                        label="Opened"
                                        sort_field="opened_at"
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
                                    <Show when=move || can_device_action.get()>
                                        <TableHeaderCell min_width=120.0>"Device"</TableHeaderCell>
                                    </Show>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {move || visible.get().rows.into_iter().map(|order: RepairOrderRow| {
                                    let opened = order.opened_at
                                        .as_deref()
                                        .map(format_date)
                                        .unwrap_or_else(|| "—".to_string());
                                    let id_for_action = order.id.clone();
                                    let locked = order.device_locked;
                                    view! {
                                        <TableRow>
                                            <TableCell>{order.ticket_no.clone()}</TableCell>
                                            <TableCell>
                                                <code>{order.imei.clone()}</code>
                                            </TableCell>
                                            <TableCell>{order.customer.clone()}</TableCell>
                                            <TableCell>{order.fault.clone()}</TableCell>
                                            <TableCell>{opened}</TableCell>
                                            <TableCell>
                                                <StatusBadge status=order.status.clone() />
                                            </TableCell>
                                            <Show when=move || can_device_action.get()>
                                                {
                                                    let id_for_action = id_for_action.clone();
                                                    let action = if locked {
                                                        DeviceAction::Release
                                                    } else {
                                                        DeviceAction::Lock
                                                    };
                                                    view! {
                                                        <TableCell>
                                                            <button
                                                                class="btn"
                                                                title=action.label()
                                                                on:click=move |_| {
                                                                    run_device_action(id_for_action.clone(), action);
                                                                }
                                                            >
                                                                {icon(if locked { "unlock" } else { "lock" })}
                                                            </button>
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

pub mod state;

use crate::domain::telemarketers::api;
use crate::domain::telemarketers::model::{normalize_telemarketers, TelemarketerRow};
use crate::layout::notifications::use_notifications;
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::components::{FilterPanel, PaginationControls, StatusBadge};
use crate::shared::export::{export_filename, export_to_excel, ExportOptions};
use crate::shared::icons::icon;
use crate::shared::list_utils::{sort_list, SearchInput};
use crate::shared::table_state::{
    apply_filters, visible_rows, MissingDatePolicy, PaginationMode,
};
use crate::system::auth::guard::use_permission;
use leptos::prelude::*;
use leptos::task::spawn_local;
use state::{create_state, STATUS_OPTIONS};
use thaw::*;

#[component]
pub fn TelemarketersList() -> impl IntoView {
    let state = create_state();
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal::<Option<String>>(None);
    let filter_expanded = RwSignal::new(false);

    let notifications = use_notifications();
    let can_delete = use_permission("telemarketers.delete");

    let load = move || {
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match api::fetch_telemarketers().await {
                Ok(raw) => {
                    let (rows, report) = normalize_telemarketers(&raw);
                    if report.missing_id > 0 {
                        notifications.error(format!(
                            "{} roster records arrived without an id",
                            report.missing_id
                        ));
                    }
                    state.update(|s| {
                        s.telemarketers = rows;
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
            let mut rows =
                apply_filters(&s.telemarketers, &s.list.filter, MissingDatePolicy::Include);
            sort_list(&mut rows, &s.list.sort_field, s.list.sort_ascending);
            rows
        })
    });

    let visible = Memo::new(move |_| {
        state.with(|s| {
            visible_rows(
                &s.telemarketers,
                &s.list,
                PaginationMode::Client,
                MissingDatePolicy::Include,
            )
        })
    });

    let toggle_sort = Callback::new(move |field: String| {
        state.update(|s| s.list.toggle_sort(&field));
    });

    let remove = move |id: String| {
        spawn_local(async move {
            match api::delete_telemarketer(&id).await {
                Ok(()) => {
                    notifications.success("Telemarketer removed");
                    load();
                }
                Err(e) => {
                    notifications.error(format!("Delete failed: {}", e));
                }
            }
        });
    };

    let export = move |_| {
        let rows = filtered.get_untracked();
        let opts = ExportOptions {
            include_status: option_env!("EXPORT_STATUS_COLUMN").is_some(),
        };
        match export_to_excel(&rows, &export_filename("telemarketers"), opts) {
            Ok(()) => notifications.success("Export ready"),
            Err(e) => notifications.error(format!("Export failed: {}", e)),
        }
    };

    let sort_field_signal = Signal::derive(move || state.with(|s| s.list.sort_field.clone()));
    let sort_ascending_signal = Signal::derive(move || state.with(|s| s.list.sort_ascending));

    view! {
        <div class="telemarketers-list">
            <div class="page-header">
                <h2>"Telesales"</h2>
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
                    let leads: u64 = rows.iter().map(|t| t.leads_assigned).sum();
                    let closed: u64 = rows.iter().map(|t| t.sales_closed).sum();
                    view! {
                        <span class="totals-strip">
                            {format!(
                                "Total: {} agents | Leads: {} | Closed: {}",
                                rows.len(), leads, closed,
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
                            placeholder="Name, phone, region..."
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
                    </div>
                }
            />

            {move || {
                if let Some(err) = error.get() {
                    view! {
                        <div class="error-banner">
                            <p>{format!("Failed to load telemarketers: {}", err)}</p>
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
                                        label="Name"
                                        sort_field="name"
                                        current_sort_field=sort_field_signal
                                        sort_ascending=sort_ascending_signal
                                        on_sort=toggle_sort
                                        min_width=160.0
                                    />
                                    <TableHeaderCell min_width=120.0>"Phone"</TableHeaderCell>
                                    <SortableHeaderCell
                                        label="Region"
                                        sort_field="region"
                                        current_sort_field=sort_field_signal
                                        sort_ascending=sort_ascending_signal
                                        on_sort=toggle_sort
                                    />
                                    <SortableHeaderCell
                                        label="Leads"
                                        sort_field="leads_assigned"
                                        align="right"
                                        current_sort_field=sort_field_signal
                                        sort_ascending=sort_ascending_signal
                                        on_sort=toggle_sort
                                    />
                                    <SortableHeaderCell
                                        label="Closed"
                                        sort_field="sales_closed"
                                        align="right"
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
                                    <Show when=move || can_delete.get()>
                                        <TableHeaderCell min_width=100.0>"Actions"</TableHeaderCell>
                                    </Show>
                                </TableRow>
                            </TableHeader>
                            <TableBody>
                                {move || visible.get().rows.into_iter().map(|agent: TelemarketerRow| {
                                    let id_for_delete = agent.id.clone();
                                    let deletable = !agent.synthetic;
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                {agent.name.clone()}
                                                {agent.synthetic.then(|| view! {
                                                    <span class="badge badge--warning" title="Record arrived without an id">
                                                        "no id"
                                                    </span>
                                                })}
                                            </TableCell>
                                            <TableCell>{agent.phone.clone()}</TableCell>
                                            <TableCell>{agent.region.clone()}</TableCell>
                                            <TableCell>
                                                <div style="text-align: right;">
                                                    {agent.leads_assigned.to_string()}
                                                </div>
                                            </TableCell>
                                            <TableCell>
                                                <div style="text-align: right;">
                                                    {agent.sales_closed.to_string()}
                                                </div>
                                            </TableCell>
                                            <TableCell>
                                                <StatusBadge status=agent.status.clone() />
                                            </TableCell>
                                            <Show when=move || can_delete.get()>
                                                {
                                                    let id_for_delete = id_for_delete.clone();
                                                    view! {
                                                        <TableCell>
                                                            <button
                                                                class="btn btn--danger"
                                                                disabled=!deletable
                                                                on:click=move |_| remove(id_for_delete.clone())
                                                            >
                                                                "Remove"
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

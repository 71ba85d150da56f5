use crate::domain::loans::api;
use crate::domain::loans::model::LoanRow;
use crate::layout::notifications::use_notifications;
use crate::shared::components::table::number_format::format_money;
use crate::shared::components::StatusBadge;
use crate::shared::date_utils::format_date;
use crate::system::auth::guard::use_permission;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// Loan detail card, opened from the list as a modal.
#[component]
pub fn LoanDetails(
    #[prop(into)] id: String,
    #[prop(into)] on_close: Callback<()>,
) -> impl IntoView {
    let (loan, set_loan) = signal::<Option<LoanRow>>(None);
    let (loading, set_loading) = signal(true);
    let (error, set_error) = signal::<Option<String>>(None);
    let (disbursing, set_disbursing) = signal(false);

    let notifications = use_notifications();
    let can_disburse = use_permission("loans.disburse");

    let loan_id = id.clone();
    let load = move || {
        let loan_id = loan_id.clone();
        spawn_local(async move {
            set_loading.set(true);
            set_error.set(None);
            match api::fetch_loan(&loan_id).await {
                Ok(raw) => {
                    let (resolved_id, row) = LoanRow::from_value(&raw);
                    if resolved_id.is_empty() {
                        set_error.set(Some("Record has no identifier".to_string()));
                    } else {
                        set_loan.set(Some(row));
                    }
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

    let disburse_id = id.clone();
    let disburse = move |_| {
        let disburse_id = disburse_id.clone();
        let load = load.clone();
        set_disbursing.set(true);
        spawn_local(async move {
            match api::trigger_disbursement(&disburse_id).await {
                Ok(()) => {
                    notifications.success("Disbursement triggered");
                    load();
                }
                Err(e) => {
                    notifications.error(format!("Disbursement failed: {}", e));
                }
            }
            set_disbursing.set(false);
        });
    };

    view! {
        <div class="loan-details">
            <div class="loan-details__header">
                <h3>{format!("Loan {}", id)}</h3>
                <button class="btn" on:click=move |_| on_close.run(())>"Close"</button>
            </div>

            {move || {
                if loading.get() {
                    view! { <p class="loading-placeholder">"Loading..."</p> }.into_any()
                } else if let Some(err) = error.get() {
                    view! { <p class="error-message">{err}</p> }.into_any()
                } else if let Some(loan) = loan.get() {
                    let disburse = disburse.clone();
                    let outstanding = loan.amount - loan.amount_paid;
                    view! {
                        <div class="loan-details__body">
                            <dl class="detail-grid">
                                <dt>"Borrower"</dt>
                                <dd>{loan.borrower_name.clone()}</dd>
                                <dt>"Phone"</dt>
                                <dd>{loan.phone.clone()}</dd>
                                <dt>"Product"</dt>
                                <dd>{loan.product.clone()}</dd>
                                <dt>"Amount"</dt>
                                <dd>{format_money(loan.amount)}</dd>
                                <dt>"Paid"</dt>
                                <dd>{format_money(loan.amount_paid)}</dd>
                                <dt>"Outstanding"</dt>
                                <dd>{format_money(outstanding)}</dd>
                                <dt>"Agent"</dt>
                                <dd>{loan.agent.clone()}</dd>
                                <dt>"Applied"</dt>
                                <dd>
                                    {loan.date_applied
                                        .as_deref()
                                        .map(format_date)
                                        .unwrap_or_else(|| "—".to_string())}
                                </dd>
                                <dt>"Status"</dt>
                                <dd><StatusBadge status=loan.status.clone() /></dd>
                            </dl>

                            <Show when=move || can_disburse.get()>
                                <button
                                    class="btn btn--primary"
                                    on:click=disburse.clone()
                                    disabled=move || disbursing.get()
                                >
                                    {move || if disbursing.get() {
                                        "Disbursing..."
                                    } else {
                                        "Trigger disbursement"
                                    }}
                                </button>
                            </Show>
                        </div>
                    }.into_any()
                } else {
                    view! { <p>"No data"</p> }.into_any()
                }
            }}
        </div>
    }
}

use contracts::system::auth::UserInfo;
use leptos::prelude::*;

use super::context::use_auth;

/// Role-based permission lookup. Admin can do everything; the other roles
/// are scoped to their own desk.
pub fn has_permission(user: Option<&UserInfo>, action: &str) -> bool {
    let Some(user) = user else {
        return false;
    };
    if user.role == "admin" {
        return true;
    }
    match action {
        "loans.disburse" => user.role == "loan_officer",
        "repayments.update_status" => user.role == "loan_officer",
        "telemarketers.delete" => user.role == "telesales_lead",
        "repair_orders.device_action" => user.role == "repair_manager",
        _ => false,
    }
}

/// Reactive permission check for the signed-in operator.
pub fn use_permission(action: &'static str) -> Signal<bool> {
    let (auth_state, _) = use_auth();
    Signal::derive(move || has_permission(auth_state.get().user_info.as_ref(), action))
}

/// Renders children only when the session is present.
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let (auth_state, _) = use_auth();

    view! {
        <Show
            when=move || auth_state.get().access_token.is_some()
            fallback=|| view! { <div>"Not authenticated. Please login."</div> }
        >
            {children()}
        </Show>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: &str) -> UserInfo {
        UserInfo {
            username: "op".to_string(),
            display_name: "Operator".to_string(),
            role: role.to_string(),
            last_login: None,
        }
    }

    #[test]
    fn test_admin_can_everything() {
        let admin = user("admin");
        assert!(has_permission(Some(&admin), "loans.disburse"));
        assert!(has_permission(Some(&admin), "telemarketers.delete"));
    }

    #[test]
    fn test_roles_scoped_to_desk() {
        let officer = user("loan_officer");
        assert!(has_permission(Some(&officer), "loans.disburse"));
        assert!(!has_permission(Some(&officer), "repair_orders.device_action"));

        let repair = user("repair_manager");
        assert!(has_permission(Some(&repair), "repair_orders.device_action"));
        assert!(!has_permission(Some(&repair), "loans.disburse"));
    }

    #[test]
    fn test_anonymous_denied() {
        assert!(!has_permission(None, "loans.disburse"));
    }

    #[test]
    fn test_unknown_action_denied() {
        let officer = user("loan_officer");
        assert!(!has_permission(Some(&officer), "loans.write_off"));
    }
}

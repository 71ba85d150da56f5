/// List traits and helpers shared by every table view (search, sort, header UI)
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::cmp::Ordering;

/// Rows that can be matched against the free-text search box.
pub trait Searchable {
    /// Case-insensitive substring match against the row's searchable fields.
    /// `filter` arrives already trimmed and lower-cased.
    fn matches_filter(&self, filter: &str) -> bool;

    /// Value of a named field, for single-field search.
    fn get_field_value(&self, field: &str) -> Option<String>;
}

/// Rows that can be ordered by a column key.
pub trait Sortable {
    fn compare_by_field(&self, other: &Self, field: &str) -> Ordering;
}

/// Lower-cased string comparison for text columns.
pub fn cmp_str(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Numeric comparison that treats NaN as equal instead of panicking.
pub fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Missing values sort after present ones.
pub fn cmp_opt_str(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp_str(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

pub fn cmp_opt_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => cmp_f64(a, b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Sort a list in place by the given field. `sort_by` is stable, so rows with
/// equal keys keep their incoming order.
pub fn sort_list<T: Sortable>(items: &mut [T], field: &str, ascending: bool) {
    items.sort_by(|a, b| {
        let cmp = a.compare_by_field(b, field);
        if ascending {
            cmp
        } else {
            cmp.reverse()
        }
    });
}

/// Arrow suffix for a sortable column header.
pub fn get_sort_indicator(current_field: &str, field: &str, ascending: bool) -> &'static str {
    if current_field == field {
        if ascending {
            " ▲"
        } else {
            " ▼"
        }
    } else {
        " ⇅"
    }
}

pub fn get_sort_class(current_field: &str, field: &str) -> &'static str {
    if current_field == field {
        "table__sort-indicator table__sort-indicator--active"
    } else {
        "table__sort-indicator"
    }
}

const SEARCH_DEBOUNCE_MS: u32 = 300;

/// Search box with debounce and a clear button.
#[component]
pub fn SearchInput(
    /// Current filter value, used to seed the input on mount.
    #[prop(into)]
    value: Signal<String>,
    /// Fires after the debounce window closes.
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)] placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Search...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());

    // Generation counter: only the latest pending edit fires the callback.
    let generation = StoredValue::new(0u64);

    let handle_input = move |new_value: String| {
        set_input_value.set(new_value.clone());
        let my_gen = generation.get_value() + 1;
        generation.set_value(my_gen);
        spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(SEARCH_DEBOUNCE_MS).await;
            if generation.get_value() == my_gen {
                on_change.run(new_value);
            }
        });
    };

    let clear = move |_| {
        set_input_value.set(String::new());
        generation.update_value(|g| *g += 1);
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class="search-input__field"
                placeholder=placeholder
                prop:value=input_value
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            {move || {
                if input_value.get().is_empty() {
                    view! { <></> }.into_any()
                } else {
                    view! {
                        <button class="search-input__clear" on:click=clear title="Clear">
                            "×"
                        </button>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_indicator() {
        assert_eq!(get_sort_indicator("amount", "amount", true), " ▲");
        assert_eq!(get_sort_indicator("amount", "amount", false), " ▼");
        assert_eq!(get_sort_indicator("amount", "name", true), " ⇅");
    }

    #[test]
    fn test_cmp_helpers() {
        assert_eq!(cmp_str("Beta", "alpha"), Ordering::Greater);
        assert_eq!(cmp_f64(1.0, f64::NAN), Ordering::Equal);
        assert_eq!(cmp_opt_f64(Some(1.0), None), Ordering::Less);
        assert_eq!(cmp_opt_str(None, Some("x")), Ordering::Greater);
    }
}

use dioxus::prelude::*;

/// One row in a [`SearchSelect`] list.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectOption {
    pub key: i64,
    pub label: String,
}

/// Text input with a filterable drop-down list underneath.
///
/// The caller owns the query, the open state and filtering; this component
/// only renders and reports events.
#[component]
pub fn SearchSelect(
    label: String,
    placeholder: String,
    value: String,
    options: Vec<SelectOption>,
    open: bool,
    disabled: bool,
    loading: bool,
    loading_text: String,
    error: Option<String>,
    onsearch: EventHandler<String>,
    onopen: EventHandler<()>,
    onpick: EventHandler<i64>,
) -> Element {
    rsx! {
        div { class: "field",
            label { "{label}" }
            input {
                r#type: "text",
                value: "{value}",
                placeholder: "{placeholder}",
                disabled: disabled,
                oninput: move |evt: FormEvent| {
                    onsearch.call(evt.value());
                    onopen.call(());
                },
                onfocus: move |_| onopen.call(()),
            }
            if open && !loading && !disabled {
                div { class: "dropdown",
                    if options.is_empty() {
                        div { class: "empty", "Tidak ada hasil." }
                    }
                    for option in options {
                        OptionRow { key: "{option.key}", option, onpick }
                    }
                }
            }
            if loading {
                p { class: "hint", "{loading_text}" }
            }
            if let Some(message) = error {
                p { class: "hint error", "{message}. Silakan coba lagi." }
            }
        }
    }
}

#[component]
fn OptionRow(option: SelectOption, onpick: EventHandler<i64>) -> Element {
    let key = option.key;
    rsx! {
        div {
            class: "option",
            onclick: move |_| onpick.call(key),
            "{option.label}"
        }
    }
}

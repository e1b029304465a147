use dioxus::prelude::*;

use port_goods_quote::util::version::{version_label, APP_NAME};

#[component]
pub fn Shell(children: Element) -> Element {
    rsx! {
        div { class: "page",
            main { class: "quote-card",
                {children}
            }
            footer { class: "footer", "{APP_NAME} {version_label()}" }
        }
    }
}

use dioxus::prelude::*;

use port_goods_quote::{
    domain::{
        filter_countries, filter_items, filter_ports, format_rupiah, parse_discount_input,
        parse_price_input, PageView, SelectionState,
    },
    infra::DataClient,
};

use crate::{
    app::{choose_country, choose_item, choose_port, load_countries},
    ui::components::search_select::{SearchSelect, SelectOption},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Field {
    Country,
    Port,
    Item,
}

#[component]
pub fn QuotePage() -> Element {
    let state = use_context::<Signal<SelectionState>>();
    let client = use_context::<DataClient>();

    match state.with(|st| st.page_view()) {
        PageView::LoadingCountries => rsx! {
            div { class: "spinner" }
        },
        PageView::CountriesUnavailable(message) => rsx! {
            div { class: "notice error",
                p { "{message}. Silakan coba lagi." }
                button { onclick: move |_| load_countries(client.clone(), state), "Muat ulang" }
            }
        },
        PageView::NoCountries => rsx! {
            p { class: "notice", "Tidak ada negara yang tersedia." }
        },
        PageView::Form => rsx! { QuoteForm {} },
    }
}

#[component]
fn QuoteForm() -> Element {
    let mut state = use_context::<Signal<SelectionState>>();
    let client = use_context::<DataClient>();

    let mut open = use_signal(|| None::<Field>);
    let mut country_query = use_signal(String::new);
    let mut port_query = use_signal(String::new);
    let mut item_query = use_signal(String::new);

    let snapshot = state.read().clone();

    let country_value = snapshot
        .selected_country()
        .map(|country| country.label())
        .unwrap_or_else(|| country_query());
    let port_value = snapshot
        .selected_port()
        .map(|port| port.label())
        .unwrap_or_else(|| port_query());
    let item_value = snapshot
        .selected_item()
        .map(|item| item.label())
        .unwrap_or_else(|| item_query());
    let description = snapshot
        .selected_item()
        .map(|item| item.description.clone())
        .unwrap_or_default();

    let country_options: Vec<SelectOption> =
        filter_countries(snapshot.countries().options(), &country_query())
            .into_iter()
            .map(|country| SelectOption {
                key: country.id,
                label: country.label(),
            })
            .collect();
    let port_options: Vec<SelectOption> = filter_ports(snapshot.ports().options(), &port_query())
        .into_iter()
        .map(|port| SelectOption {
            key: port.id,
            label: port.label(),
        })
        .collect();
    let item_options: Vec<SelectOption> = filter_items(snapshot.items().options(), &item_query())
        .into_iter()
        .map(|item| SelectOption {
            key: item.id,
            label: item.label(),
        })
        .collect();

    let discount_display = snapshot.discount_percent().to_string();
    let price_display = format_rupiah(snapshot.unit_price() as f64);
    let total_display = format_rupiah(snapshot.total());

    let on_pick_country = {
        let client = client.clone();
        move |id: i64| {
            let country = state.with(|st| {
                st.countries()
                    .options()
                    .iter()
                    .find(|country| country.id == id)
                    .cloned()
            });
            if let Some(country) = country {
                choose_country(client.clone(), state, country);
            }
            country_query.set(String::new());
            open.set(None);
        }
    };

    let on_pick_port = {
        let client = client.clone();
        move |id: i64| {
            let port = state.with(|st| {
                st.ports()
                    .options()
                    .iter()
                    .find(|port| port.id == id)
                    .cloned()
            });
            if let Some(port) = port {
                choose_port(client.clone(), state, port);
            }
            port_query.set(String::new());
            open.set(None);
        }
    };

    let on_pick_item = move |id: i64| {
        let item = state.with(|st| {
            st.items()
                .options()
                .iter()
                .find(|item| item.id == id)
                .cloned()
        });
        if let Some(item) = item {
            choose_item(state, item);
        }
        item_query.set(String::new());
        open.set(None);
    };

    rsx! {
        SearchSelect {
            label: "Negara",
            placeholder: "Pilih negara...",
            value: country_value,
            options: country_options,
            open: open() == Some(Field::Country),
            disabled: false,
            loading: false,
            loading_text: "",
            onsearch: move |query: String| country_query.set(query),
            onopen: move |_| open.set(Some(Field::Country)),
            onpick: on_pick_country,
        }
        SearchSelect {
            label: "Pelabuhan",
            placeholder: "Pilih pelabuhan...",
            value: port_value,
            options: port_options,
            open: open() == Some(Field::Port),
            disabled: !snapshot.port_selector_enabled(),
            loading: snapshot.ports().is_loading(),
            loading_text: "Memuat data pelabuhan...",
            error: snapshot.ports().error().map(str::to_string),
            onsearch: move |query: String| port_query.set(query),
            onopen: move |_| open.set(Some(Field::Port)),
            onpick: on_pick_port,
        }
        SearchSelect {
            label: "Barang",
            placeholder: "Pilih barang...",
            value: item_value,
            options: item_options,
            open: open() == Some(Field::Item),
            disabled: !snapshot.item_selector_enabled(),
            loading: snapshot.items().is_loading(),
            loading_text: "Memuat data barang...",
            error: snapshot.items().error().map(str::to_string),
            onsearch: move |query: String| item_query.set(query),
            onopen: move |_| open.set(Some(Field::Item)),
            onpick: on_pick_item,
        }
        div { class: "field",
            label { "Deskripsi Barang" }
            textarea {
                rows: "4",
                readonly: true,
                value: "{description}",
                placeholder: "Deskripsi barang akan muncul setelah memilih barang...",
            }
        }
        div { class: "field",
            label { "Diskon (%)" }
            input {
                r#type: "number",
                min: "0",
                max: "100",
                value: "{discount_display}",
                placeholder: "0",
                onfocus: move |_| open.set(None),
                oninput: move |evt: FormEvent| {
                    let discount = parse_discount_input(&evt.value());
                    state.with_mut(|st| st.edit_discount(discount));
                },
            }
        }
        div { class: "field",
            label { "Harga" }
            input {
                r#type: "text",
                value: "{price_display}",
                placeholder: "Rp0",
                onfocus: move |_| open.set(None),
                oninput: move |evt: FormEvent| {
                    let price = parse_price_input(&evt.value());
                    state.with_mut(|st| st.edit_price(price));
                },
            }
        }
        div { class: "field",
            label { "Total" }
            input {
                class: "total",
                r#type: "text",
                readonly: true,
                value: "{total_display}",
            }
        }
    }
}

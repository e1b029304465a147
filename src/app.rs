use dioxus::{prelude::*, signals::Signal};

use port_goods_quote::{
    domain::{Country, Item, Port, SelectionState},
    infra::DataClient,
    util::assets,
};

use crate::ui::{pages::QuotePage, shell::Shell};

#[derive(Routable, Clone, PartialEq)]
pub enum Route {
    #[route("/")]
    Quote {},
}

#[component]
pub fn App() -> Element {
    let client = use_context::<DataClient>();
    let state = use_signal(SelectionState::default);
    use_context_provider(|| state);

    // The full country list is loaded once per session.
    use_hook(move || load_countries(client.clone(), state));

    rsx! {
        document::Style { "{assets::main_css()}" }
        Router::<Route> {}
    }
}

#[component]
pub fn Quote() -> Element {
    rsx! { Shell { QuotePage {} } }
}

pub fn load_countries(client: DataClient, mut state: Signal<SelectionState>) {
    let ticket = state.with_mut(|st| st.begin_country_load());
    spawn(async move {
        let result = client.list_countries().await;
        if let Ok(countries) = &result {
            tracing::info!(count = countries.len(), "countries loaded");
        }
        state.with_mut(|st| {
            st.resolve_countries(ticket, result);
        });
    });
}

pub fn choose_country(client: DataClient, mut state: Signal<SelectionState>, country: Country) {
    let country_id = country.id;
    let ticket = state.with_mut(|st| st.select_country(country));
    spawn(async move {
        let result = client.list_ports(country_id).await;
        state.with_mut(|st| {
            st.resolve_ports(ticket, result);
        });
    });
}

/// Picking a port from the list also resets the discount to 0.
pub fn choose_port(client: DataClient, mut state: Signal<SelectionState>, port: Port) {
    let port_id = port.id;
    let selected = state.with_mut(|st| {
        let ticket = st.select_port(port)?;
        st.edit_discount(0.0);
        Ok::<_, port_goods_quote::domain::SelectionError>(ticket)
    });
    let ticket = match selected {
        Ok(ticket) => ticket,
        Err(error) => {
            tracing::warn!(port_id, %error, "port rejected");
            return;
        }
    };
    spawn(async move {
        let result = client.list_items(port_id).await;
        state.with_mut(|st| {
            st.resolve_items(ticket, result);
        });
    });
}

pub fn choose_item(mut state: Signal<SelectionState>, item: Item) {
    let item_id = item.id;
    if let Err(error) = state.with_mut(|st| st.select_item(item)) {
        tracing::warn!(item_id, %error, "item rejected");
    }
}

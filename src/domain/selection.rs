//! Cascading country → port → item selection.
//!
//! Every fetch started through [`SelectionState`] hands back a
//! [`FetchTicket`]. Results are applied only when their ticket is still the
//! latest one issued for that level, so a slow response for a previous
//! country can never overwrite the ports of the current one.

use std::fmt::Display;

use thiserror::Error;

use super::entities::{Country, Item, Port, Resource};
use super::pricing;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Failed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    resource: Resource,
    generation: u64,
}

impl FetchTicket {
    pub fn resource(&self) -> Resource {
        self.resource
    }
}

/// Options and load status for one level of the cascade.
#[derive(Clone, Debug, PartialEq)]
pub struct Level<T> {
    resource: Resource,
    options: Vec<T>,
    status: LoadStatus,
    generation: u64,
}

impl<T> Level<T> {
    fn new(resource: Resource) -> Self {
        Self {
            resource,
            options: Vec::new(),
            status: LoadStatus::Idle,
            generation: 0,
        }
    }

    pub fn options(&self) -> &[T] {
        &self.options
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            LoadStatus::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    fn begin(&mut self) -> FetchTicket {
        self.generation += 1;
        self.options.clear();
        self.status = LoadStatus::Loading;
        FetchTicket {
            resource: self.resource,
            generation: self.generation,
        }
    }

    /// Empties the level and orphans any fetch still in flight.
    fn reset(&mut self) {
        self.generation += 1;
        self.options.clear();
        self.status = LoadStatus::Idle;
    }

    fn resolve<E: Display>(&mut self, ticket: FetchTicket, result: Result<Vec<T>, E>) -> bool {
        if ticket.resource != self.resource || ticket.generation != self.generation {
            tracing::debug!(
                resource = %self.resource,
                ticket = ticket.generation,
                latest = self.generation,
                "discarding stale response"
            );
            return false;
        }
        match result {
            Ok(options) => {
                self.options = options;
                self.status = LoadStatus::Idle;
            }
            Err(error) => {
                self.options.clear();
                self.status = LoadStatus::Failed(error.to_string());
            }
        }
        true
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("select a country before choosing a port")]
    NoCountry,
    #[error("port {port} does not belong to country {country}")]
    PortOutsideCountry { port: i64, country: i64 },
    #[error("select a port before choosing an item")]
    NoPort,
    #[error("item {item} is not sold at port {port}")]
    ItemOutsidePort { item: i64, port: i64 },
}

/// What the page should render as a whole.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PageView {
    LoadingCountries,
    CountriesUnavailable(String),
    NoCountries,
    Form,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SelectionState {
    countries: Level<Country>,
    ports: Level<Port>,
    items: Level<Item>,
    selected_country: Option<Country>,
    selected_port: Option<Port>,
    selected_item: Option<Item>,
    discount_percent: f64,
    unit_price: u64,
    total: f64,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self {
            countries: Level::new(Resource::Countries),
            ports: Level::new(Resource::Ports),
            items: Level::new(Resource::Items),
            selected_country: None,
            selected_port: None,
            selected_item: None,
            discount_percent: 0.0,
            unit_price: 0,
            total: 0.0,
        }
    }
}

impl SelectionState {
    pub fn countries(&self) -> &Level<Country> {
        &self.countries
    }

    pub fn ports(&self) -> &Level<Port> {
        &self.ports
    }

    pub fn items(&self) -> &Level<Item> {
        &self.items
    }

    pub fn selected_country(&self) -> Option<&Country> {
        self.selected_country.as_ref()
    }

    pub fn selected_port(&self) -> Option<&Port> {
        self.selected_port.as_ref()
    }

    pub fn selected_item(&self) -> Option<&Item> {
        self.selected_item.as_ref()
    }

    pub fn discount_percent(&self) -> f64 {
        self.discount_percent
    }

    pub fn unit_price(&self) -> u64 {
        self.unit_price
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn port_selector_enabled(&self) -> bool {
        self.selected_country.is_some()
    }

    pub fn item_selector_enabled(&self) -> bool {
        self.selected_port.is_some()
    }

    pub fn page_view(&self) -> PageView {
        match self.countries.status() {
            LoadStatus::Loading => PageView::LoadingCountries,
            LoadStatus::Failed(message) => PageView::CountriesUnavailable(message.clone()),
            LoadStatus::Idle if self.countries.options().is_empty() => PageView::NoCountries,
            LoadStatus::Idle => PageView::Form,
        }
    }

    pub fn begin_country_load(&mut self) -> FetchTicket {
        self.countries.begin()
    }

    pub fn resolve_countries<E: Display>(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Country>, E>,
    ) -> bool {
        self.countries.resolve(ticket, result)
    }

    /// Chooses a country, clears everything downstream and starts the ports
    /// fetch. Choosing the same country again retries that fetch.
    pub fn select_country(&mut self, country: Country) -> FetchTicket {
        tracing::debug!(country = country.id, "country selected");
        self.selected_country = Some(country);
        self.selected_port = None;
        self.selected_item = None;
        self.items.reset();
        self.unit_price = 0;
        self.total = 0.0;
        self.discount_percent = 0.0;
        self.ports.begin()
    }

    pub fn resolve_ports<E: Display>(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Port>, E>,
    ) -> bool {
        self.ports.resolve(ticket, result)
    }

    /// Chooses a port and starts the items fetch. The discount is left as is.
    pub fn select_port(&mut self, port: Port) -> Result<FetchTicket, SelectionError> {
        let country = self
            .selected_country
            .as_ref()
            .ok_or(SelectionError::NoCountry)?;
        if port.country_id != country.id {
            return Err(SelectionError::PortOutsideCountry {
                port: port.id,
                country: country.id,
            });
        }
        tracing::debug!(port = port.id, "port selected");
        self.selected_port = Some(port);
        self.selected_item = None;
        self.unit_price = 0;
        self.total = 0.0;
        Ok(self.items.begin())
    }

    pub fn resolve_items<E: Display>(
        &mut self,
        ticket: FetchTicket,
        result: Result<Vec<Item>, E>,
    ) -> bool {
        self.items.resolve(ticket, result)
    }

    /// Chooses an item and seeds discount, unit price and total from it.
    pub fn select_item(&mut self, item: Item) -> Result<(), SelectionError> {
        let port = self.selected_port.as_ref().ok_or(SelectionError::NoPort)?;
        if item.port_id != port.id {
            return Err(SelectionError::ItemOutsidePort {
                item: item.id,
                port: port.id,
            });
        }
        tracing::debug!(item = item.id, "item selected");
        self.discount_percent = pricing::clamp_discount(item.discount_percent.unwrap_or(0.0));
        self.unit_price = item.price;
        self.selected_item = Some(item);
        self.recompute_total();
        Ok(())
    }

    pub fn edit_discount(&mut self, value: f64) {
        self.discount_percent = pricing::clamp_discount(value);
        if self.selected_item.is_some() {
            self.recompute_total();
        }
    }

    pub fn edit_price(&mut self, value: u64) {
        self.unit_price = value;
        if self.selected_item.is_some() {
            self.recompute_total();
        }
    }

    fn recompute_total(&mut self) {
        self.total = pricing::total(self.unit_price, self.discount_percent);
    }
}

//! Catalogue entities, pricing and the selection state machine.

pub mod entities;
pub mod pricing;
pub mod search;
pub mod selection;

pub use entities::{Country, CountryId, Item, ItemId, Port, PortId, Resource};
pub use pricing::{
    clamp_discount, format_rupiah, parse_discount_input, parse_price_input, total,
};
pub use search::{filter_countries, filter_items, filter_ports};
pub use selection::{
    FetchTicket, Level, LoadStatus, PageView, SelectionError, SelectionState,
};

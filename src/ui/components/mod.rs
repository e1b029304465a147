pub mod search_select;

pub mod contact_table;
pub mod filter_bar;
pub mod force_graph;

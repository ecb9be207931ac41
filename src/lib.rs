pub mod api;
pub mod client;
pub mod config;
pub mod data_models;
pub mod page_state;
pub mod pages;
pub mod query_params;

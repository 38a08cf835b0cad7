pub mod client_config;
pub mod pages;
pub mod responses;

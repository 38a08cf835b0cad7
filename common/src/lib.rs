pub mod form;
pub mod model;
pub mod registry;
pub mod requests;
pub mod store;

pub mod fields;
pub mod form_builder_loader;
pub mod message_list;

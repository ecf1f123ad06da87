pub mod api;
pub mod contacts;
pub mod notify;
pub mod settings;
pub mod utils;

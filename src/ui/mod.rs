pub mod connect;
pub mod contact_table;
pub mod editor_dialog;
pub mod main_window;
pub mod toast_notifier;

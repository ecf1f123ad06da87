mod app;
mod ui;

use adw::prelude::*;
use adw::Application;

fn main() {
    crate::app::init_logging();
    let app = Application::builder()
        .application_id("com.example.ContactosGtk")
        .build();
    app.connect_activate(|app| {
        crate::app::build_ui(app);
    });
    app.run();
}

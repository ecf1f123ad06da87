use adw::Application;
use contactos_gtk::settings::Settings;
use tracing_subscriber::EnvFilter;

pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("contactos_gtk=info"));
    // also installs the bridge for `log` records
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

pub fn build_ui(app: &Application) {
    let settings = Settings::load();
    if !settings.is_configured() {
        crate::ui::connect::show_connect_window(app, settings);
        return;
    }
    if let Err(e) = crate::ui::main_window::show_main_window(app, &settings) {
        log::error!("cannot open contact list: {e}");
        crate::ui::connect::show_connect_window(app, settings);
    }
}

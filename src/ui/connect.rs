use adw::prelude::*;
use adw::Application;
use contactos_gtk::api::client::ApiClient;
use contactos_gtk::settings::Settings;
use gtk4 as gtk;
use std::rc::Rc;
use std::time::Duration;

/// First-run window asking where the contact API lives.
pub fn show_connect_window(app: &Application, settings: Settings) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Contactos")
        .default_width(420)
        .default_height(220)
        .resizable(false)
        .build();

    let toast_overlay = adw::ToastOverlay::new();

    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_margin_top(24);
    root.set_margin_bottom(24);
    root.set_margin_start(24);
    root.set_margin_end(24);

    let title = gtk::Label::new(Some("Conectar con el servidor"));
    title.add_css_class("title-2");
    title.set_halign(gtk::Align::Start);
    root.append(&title);

    let server_entry = gtk::Entry::new();
    server_entry.set_placeholder_text(Some("URL de la API (p. ej. http://localhost:8080)"));
    server_entry.set_hexpand(true);
    server_entry.set_text(&settings.api_url);
    root.append(&server_entry);

    let status = gtk::Label::new(None);
    status.add_css_class("dim-label");
    status.set_halign(gtk::Align::Start);
    root.append(&status);

    let connect_btn = gtk::Button::with_label("Conectar");
    connect_btn.add_css_class("suggested-action");
    connect_btn.set_halign(gtk::Align::End);
    root.append(&connect_btn);

    toast_overlay.set_child(Some(&root));
    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let header_title = gtk::Label::new(Some("Contactos"));
    header.set_title_widget(Some(&header_title));
    container.append(&header);
    container.append(&toast_overlay);
    window.set_content(Some(&container));

    let on_connect = {
        let app = app.clone();
        let window = window.clone();
        let overlay = toast_overlay.clone();
        let server_entry = server_entry.clone();
        move || {
            let mut candidate = settings.clone();
            candidate.api_url = contactos_gtk::utils::normalize_url(&server_entry.text());
            let base_url = match candidate.api_url() {
                Ok(url) => url,
                Err(e) => {
                    log::warn!("rejected API URL: {e}");
                    overlay.add_toast(adw::Toast::new("Ingrese una URL válida."));
                    return;
                }
            };
            let client = match ApiClient::new(&base_url, &candidate.contacts_path, Duration::from_secs(5)) {
                Ok(client) => client,
                Err(e) => {
                    overlay.add_toast(adw::Toast::new(&format!("No se pudo crear el cliente: {e}")));
                    return;
                }
            };

            status.set_label("Conectando…");
            let status = status.clone();
            let app = app.clone();
            let window = window.clone();
            let overlay = overlay.clone();
            glib::MainContext::default().spawn_local(async move {
                // The URL is kept even when the server is down; the list window reports load errors.
                let message = match client.ping().await {
                    Ok(code) => {
                        log::info!("server check: {} -> HTTP {code}", client.base_url());
                        "Conectado".to_string()
                    }
                    Err(e) => {
                        log::warn!("server check failed: {e}");
                        "Guardado (servidor inaccesible)".to_string()
                    }
                };
                status.set_label(&message);
                if let Err(e) = candidate.save() {
                    overlay.add_toast(adw::Toast::new(&format!("No se pudo guardar la configuración: {e}")));
                }
                match crate::ui::main_window::show_main_window(&app, &candidate) {
                    Ok(()) => window.close(),
                    Err(e) => overlay.add_toast(adw::Toast::new(&format!("Error: {e}"))),
                }
            });
        }
    };

    let on_connect: Rc<dyn Fn()> = Rc::new(on_connect);
    {
        let on_connect = on_connect.clone();
        connect_btn.connect_clicked(move |_| (on_connect)());
    }
    {
        let on_connect = on_connect.clone();
        server_entry.connect_activate(move |_| (on_connect)());
    }

    window.present();
}

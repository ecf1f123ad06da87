use std::rc::Rc;

use adw::prelude::*;
use adw::Application;
use contactos_gtk::api::client::ApiClient;
use contactos_gtk::api::models::ContactRecord;
use contactos_gtk::contacts::ListView;
use contactos_gtk::settings::Settings;

use crate::ui::contact_table::ContactTable;
use crate::ui::editor_dialog::show_editor_dialog;
use crate::ui::toast_notifier::ToastNotifier;

pub type Contacts = ListView<ApiClient, ToastNotifier>;

pub fn show_main_window(app: &Application, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let base_url = settings.api_url()?;
    let client = ApiClient::new(&base_url, &settings.contacts_path, settings.timeout())?;
    log::info!("using contact API at {}", client.base_url());

    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title("Contactos")
        .default_width(960)
        .default_height(640)
        .build();

    let overlay = adw::ToastOverlay::new();
    let notifier = Rc::new(ToastNotifier::new(&overlay, &window));
    let list: Rc<Contacts> = Rc::new(
        ListView::new(Rc::new(client), notifier).with_reload_on_cancel(settings.reload_on_cancel),
    );

    let on_edit: Rc<dyn Fn(ContactRecord)> = {
        let window = window.clone();
        let list = list.clone();
        Rc::new(move |record| show_editor_dialog(&window, list.clone(), Some(record)))
    };
    let on_delete: Rc<dyn Fn(i64)> = {
        let list = list.clone();
        Rc::new(move |id| {
            let list = list.clone();
            glib::MainContext::default().spawn_local(async move {
                list.request_delete(id).await;
            });
        })
    };
    let table = Rc::new(ContactTable::new(on_edit, on_delete));
    {
        let table = table.clone();
        list.connect_records_changed(move |records| table.set_items(records));
    }

    let scroller = gtk4::ScrolledWindow::builder()
        .vexpand(true)
        .hexpand(true)
        .child(&table.widget())
        .build();
    overlay.set_child(Some(&scroller));

    let container = gtk4::Box::new(gtk4::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk4::Label::new(Some("Contactos"));
    header.set_title_widget(Some(&title));

    let add_btn = gtk4::Button::with_label("Agregar");
    add_btn.add_css_class("suggested-action");
    header.pack_end(&add_btn);
    let reload_btn = gtk4::Button::from_icon_name("view-refresh-symbolic");
    reload_btn.set_tooltip_text(Some("Recargar"));
    header.pack_start(&reload_btn);
    container.append(&header);
    container.append(&overlay);
    window.set_content(Some(&container));

    {
        let window = window.clone();
        let list = list.clone();
        add_btn.connect_clicked(move |_| show_editor_dialog(&window, list.clone(), None));
    }
    {
        let list = list.clone();
        reload_btn.connect_clicked(move |_| {
            let list = list.clone();
            glib::MainContext::default().spawn_local(async move {
                let _ = list.load().await;
            });
        });
    }

    window.present();

    glib::MainContext::default().spawn_local(async move {
        let _ = list.load().await;
    });
    Ok(())
}

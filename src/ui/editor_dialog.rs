use std::cell::Cell;
use std::rc::Rc;

use contactos_gtk::api::models::ContactRecord;
use contactos_gtk::contacts::{EditorOutcome, Field, FieldError, FieldErrors};
use gtk4::prelude::*;
use gtk4 as gtk;

use crate::ui::main_window::Contacts;

struct Inputs {
    name: gtk::Entry,
    email: gtk::Entry,
    message: gtk::TextView,
    name_error: gtk::Label,
    email_error: gtk::Label,
    message_error: gtk::Label,
}

impl Inputs {
    fn message_text(&self) -> String {
        let buf = self.message.buffer();
        buf.text(&buf.start_iter(), &buf.end_iter(), false).to_string()
    }

    fn show_errors(&self, errors: &FieldErrors) {
        show_error(&self.name_error, errors.get(Field::Name));
        show_error(&self.email_error, errors.get(Field::Email));
        show_error(&self.message_error, errors.get(Field::Message));
    }
}

/// Open the modal create/edit dialog on top of `parent`.
pub fn show_editor_dialog(parent: &adw::ApplicationWindow, list: Rc<Contacts>, record: Option<ContactRecord>) {
    let form = Rc::new(list.open_editor(record));

    let dialog = gtk::Window::builder()
        .title(form.title())
        .transient_for(parent)
        .modal(true)
        .default_width(420)
        .resizable(false)
        .build();

    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_margin_top(24);
    root.set_margin_bottom(24);
    root.set_margin_start(24);
    root.set_margin_end(24);

    let title = gtk::Label::new(Some(form.title()));
    title.add_css_class("title-3");
    title.set_halign(gtk::Align::Start);
    root.append(&title);

    let name = gtk::Entry::new();
    name.set_hexpand(true);
    name.set_text(&form.value(Field::Name));
    let email = gtk::Entry::new();
    email.set_hexpand(true);
    email.set_input_purpose(gtk::InputPurpose::Email);
    email.set_text(&form.value(Field::Email));
    let message = gtk::TextView::new();
    message.set_wrap_mode(gtk::WrapMode::WordChar);
    message.buffer().set_text(&form.value(Field::Message));
    let message_scroller = gtk::ScrolledWindow::builder()
        .min_content_height(96)
        .child(&message)
        .build();
    message_scroller.add_css_class("card");

    let inputs = Rc::new(Inputs {
        name: name.clone(),
        email: email.clone(),
        message: message.clone(),
        name_error: error_label(),
        email_error: error_label(),
        message_error: error_label(),
    });

    root.append(&field_label("Nombre:"));
    root.append(&name);
    root.append(&inputs.name_error);
    root.append(&field_label("Correo electrónico:"));
    root.append(&email);
    root.append(&inputs.email_error);
    root.append(&field_label("Mensaje:"));
    root.append(&message_scroller);
    root.append(&inputs.message_error);

    let buttons = gtk::Box::new(gtk::Orientation::Horizontal, 8);
    buttons.set_halign(gtk::Align::End);
    let cancel_btn = gtk::Button::with_label("Cancelar");
    cancel_btn.add_css_class("destructive-action");
    let submit_btn = gtk::Button::with_label(form.submit_label());
    submit_btn.add_css_class("suggested-action");
    buttons.append(&cancel_btn);
    buttons.append(&submit_btn);
    root.append(&buttons);

    dialog.set_child(Some(&root));

    // The list is told exactly once per session, whichever way it ends.
    let finished = Rc::new(Cell::new(false));
    let finish = {
        let finished = finished.clone();
        let list = list.clone();
        move |outcome: EditorOutcome| {
            if finished.replace(true) {
                return;
            }
            let list = list.clone();
            glib::MainContext::default().spawn_local(async move {
                list.close_editor(outcome).await;
            });
        }
    };
    let finish: Rc<dyn Fn(EditorOutcome)> = Rc::new(finish);
    {
        let finish = finish.clone();
        let dialog = dialog.downgrade();
        form.connect_close(move |outcome| {
            (finish)(outcome);
            if let Some(dialog) = dialog.upgrade() {
                dialog.close();
            }
        });
    }
    {
        let finish = finish.clone();
        dialog.connect_close_request(move |_| {
            (finish)(EditorOutcome::Cancelled);
            glib::Propagation::Proceed
        });
    }

    {
        let form = form.clone();
        cancel_btn.connect_clicked(move |_| form.cancel());
    }

    let on_submit: Rc<dyn Fn()> = {
        let form = form.clone();
        let inputs = inputs.clone();
        Rc::new(move || {
            form.set(Field::Name, &inputs.name.text());
            form.set(Field::Email, &inputs.email.text());
            form.set(Field::Message, &inputs.message_text());
            let form = form.clone();
            let inputs = inputs.clone();
            glib::MainContext::default().spawn_local(async move {
                let status = form.submit().await;
                log::debug!("editor submit: {status:?}");
                inputs.show_errors(&form.errors());
            });
        })
    };
    {
        let on_submit = on_submit.clone();
        submit_btn.connect_clicked(move |_| (on_submit)());
    }
    // Enter in a single-line field submits
    {
        let on_submit = on_submit.clone();
        name.connect_activate(move |_| (on_submit)());
    }
    {
        let on_submit = on_submit.clone();
        email.connect_activate(move |_| (on_submit)());
    }

    dialog.present();
}

fn field_label(text: &str) -> gtk::Label {
    let lbl = gtk::Label::new(Some(text));
    lbl.set_halign(gtk::Align::Start);
    lbl
}

fn error_label() -> gtk::Label {
    let lbl = gtk::Label::new(None);
    lbl.add_css_class("error");
    lbl.set_halign(gtk::Align::Start);
    lbl.set_visible(false);
    lbl
}

fn show_error(label: &gtk::Label, error: Option<FieldError>) {
    match error {
        Some(err) => {
            label.set_label(&err.to_string());
            label.set_visible(true);
        }
        None => {
            label.set_label("");
            label.set_visible(false);
        }
    }
}

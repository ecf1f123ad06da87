use std::rc::Rc;

use contactos_gtk::api::models::ContactRecord;
use contactos_gtk::contacts::format_date;
use gtk4::prelude::*;
use gtk4 as gtk;

const COLUMNS: [(&str, i32); 6] = [
    ("ID", 5),
    ("Nombre", 16),
    ("Correo", 22),
    ("Mensaje", 30),
    ("Fecha", 10),
    ("Acciones", 8),
];

pub struct ContactTable {
    root: gtk::Box,
    list: gtk::ListBox,
    on_edit: Rc<dyn Fn(ContactRecord)>,
    on_delete: Rc<dyn Fn(i64)>,
}

impl ContactTable {
    pub fn new(on_edit: Rc<dyn Fn(ContactRecord)>, on_delete: Rc<dyn Fn(i64)>) -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let title = gtk::Label::new(Some("Contactos"));
        title.add_css_class("title-2");
        title.set_halign(gtk::Align::Start);
        root.append(&title);

        let header = gtk::Box::new(gtk::Orientation::Horizontal, 12);
        header.set_margin_start(8);
        header.set_margin_end(8);
        for (name, width) in COLUMNS {
            let lbl = cell(name, width);
            lbl.add_css_class("heading");
            header.append(&lbl);
        }
        root.append(&header);

        let list = gtk::ListBox::new();
        list.set_selection_mode(gtk::SelectionMode::None);
        list.add_css_class("boxed-list");
        list.set_placeholder(Some(&gtk::Label::new(Some("No hay contactos"))));
        root.append(&list);

        Self {
            root,
            list,
            on_edit,
            on_delete,
        }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn set_items(&self, items: &[ContactRecord]) {
        while let Some(row) = self.list.row_at_index(0) {
            self.list.remove(&row);
        }
        for record in items {
            let row = gtk::ListBoxRow::new();
            let line = gtk::Box::new(gtk::Orientation::Horizontal, 12);
            line.set_margin_top(8);
            line.set_margin_bottom(8);
            line.set_margin_start(8);
            line.set_margin_end(8);

            let values = [
                record.id.to_string(),
                record.name.clone(),
                record.email.clone(),
                record.message.clone(),
                format_date(&record.created_at),
            ];
            for (value, (_, width)) in values.iter().zip(COLUMNS) {
                line.append(&cell(value, width));
            }

            let actions = gtk::Box::new(gtk::Orientation::Horizontal, 4);
            let edit_btn = gtk::Button::from_icon_name("document-edit-symbolic");
            edit_btn.set_tooltip_text(Some("Editar"));
            edit_btn.add_css_class("flat");
            let delete_btn = gtk::Button::from_icon_name("user-trash-symbolic");
            delete_btn.set_tooltip_text(Some("Eliminar"));
            delete_btn.add_css_class("flat");
            delete_btn.add_css_class("error");
            {
                let on_edit = self.on_edit.clone();
                let record = record.clone();
                edit_btn.connect_clicked(move |_| (on_edit)(record.clone()));
            }
            {
                let on_delete = self.on_delete.clone();
                let id = record.id;
                delete_btn.connect_clicked(move |_| (on_delete)(id));
            }
            actions.append(&edit_btn);
            actions.append(&delete_btn);
            line.append(&actions);

            row.set_child(Some(&line));
            self.list.append(&row);
        }
    }
}

fn cell(text: &str, width: i32) -> gtk::Label {
    let lbl = gtk::Label::new(Some(text));
    lbl.set_halign(gtk::Align::Start);
    lbl.set_xalign(0.0);
    lbl.set_width_chars(width);
    lbl.set_max_width_chars(width);
    lbl.set_ellipsize(gtk::pango::EllipsizeMode::End);
    lbl.set_tooltip_text(Some(text));
    lbl
}

use super::contact_list::ContactList;
use crate::contacts::{ContactFields, ContactStore};
use adw::Application;
use adw::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;

const TITLE: &str = "Phone Book App";

pub struct PhonebookWindow {
    window: adw::ApplicationWindow,
    overlay: adw::ToastOverlay,
    list: ContactList,
    contacts: RefCell<ContactStore>,
}

impl PhonebookWindow {
    pub fn present(app: &Application, contacts: ContactStore) -> Rc<Self> {
        let window = adw::ApplicationWindow::builder()
            .application(app)
            .title(TITLE)
            .default_width(560)
            .default_height(420)
            .build();

        let overlay = adw::ToastOverlay::new();
        overlay.set_vexpand(true);

        let body = gtk::Box::new(gtk::Orientation::Horizontal, 12);
        let list = ContactList::new();
        body.append(&list.widget());

        let actions = gtk::Box::new(gtk::Orientation::Vertical, 8);
        actions.set_margin_top(8);
        actions.set_margin_end(12);
        actions.set_valign(gtk::Align::Start);
        let add_btn = gtk::Button::with_label("Add Contact");
        add_btn.add_css_class("suggested-action");
        let edit_btn = gtk::Button::with_label("Edit Contact");
        let remove_btn = gtk::Button::with_label("Remove Contact");
        remove_btn.add_css_class("destructive-action");
        let show_btn = gtk::Button::with_label("Show Contact");
        for btn in [&add_btn, &edit_btn, &remove_btn, &show_btn] {
            actions.append(btn);
        }
        body.append(&actions);

        overlay.set_child(Some(&body));
        window.set_content(Some(&super::with_header(TITLE, &overlay)));

        let this = Rc::new(Self {
            window,
            overlay,
            list,
            contacts: RefCell::new(contacts),
        });
        this.refresh();

        {
            let this = this.clone();
            add_btn.connect_clicked(move |_| this.add_contact());
        }
        {
            let this = this.clone();
            edit_btn.connect_clicked(move |_| this.edit_contact());
        }
        {
            let this = this.clone();
            remove_btn.connect_clicked(move |_| this.remove_contact());
        }
        {
            let this = this.clone();
            show_btn.connect_clicked(move |_| this.show_selected());
        }
        {
            let weak = Rc::downgrade(&this);
            this.list.connect_activated(move |name| {
                if let Some(this) = weak.upgrade() {
                    this.show_contact(&name);
                }
            });
        }

        this.window.present();
        this
    }

    fn toast(&self, message: &str) {
        self.overlay.add_toast(adw::Toast::new(message));
    }

    fn refresh(&self) {
        self.list.set_items(self.contacts.borrow().list());
    }

    /// The selected name, or a toast naming `action` when nothing is selected.
    fn require_selection(&self, action: &str) -> Option<String> {
        let selected = self.list.selected();
        if selected.is_none() {
            self.toast(&format!("Please select a contact to {action}."));
        }
        selected
    }

    fn add_contact(self: &Rc<Self>) {
        let this = self.clone();
        super::contact_form::show_contact_dialog(&self.window, "Add Contact", None, move |fields| {
            this.contacts.borrow_mut().add(fields)?;
            this.refresh();
            Ok(())
        });
    }

    fn edit_contact(self: &Rc<Self>) {
        let Some(key) = self.require_selection("edit") else {
            return;
        };
        let Some(initial) = self.contacts.borrow().get(&key).map(ContactFields::from) else {
            self.refresh();
            return;
        };
        let this = self.clone();
        super::contact_form::show_contact_dialog(&self.window, "Edit Contact", Some(initial), move |fields| {
            this.contacts.borrow_mut().edit(&key, fields)?;
            this.refresh();
            Ok(())
        });
    }

    fn remove_contact(&self) {
        let Some(key) = self.require_selection("remove") else {
            return;
        };
        let result = self.contacts.borrow_mut().remove(&key);
        match result {
            Ok(_) => {
                self.refresh();
                self.toast(&format!("Removed {key}"));
            }
            Err(err) => self.toast(&err.to_string()),
        }
    }

    fn show_selected(&self) {
        if let Some(key) = self.require_selection("show") {
            self.show_contact(&key);
        }
    }

    fn show_contact(&self, key: &str) {
        let contact = self.contacts.borrow().get(key).cloned();
        match contact {
            Some(contact) => super::contact_view::show_contact_window(&self.window, &contact),
            None => self.refresh(),
        }
    }
}

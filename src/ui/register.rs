use super::accounts::AccountsWindow;
use crate::accounts::{PROFILE_FIELDS, Profile};
use adw::prelude::*;
use gtk4 as gtk;
use log::warn;
use std::rc::Rc;

/// Collects the profile for `username` and registers it on confirm.
pub fn show_register_dialog(parent: &Rc<AccountsWindow>, username: String, password: String) {
    let dialog = gtk::Dialog::builder()
        .title("User Information")
        .transient_for(parent.window())
        .modal(true)
        .build();

    let content = gtk::Box::new(gtk::Orientation::Vertical, 6);
    content.set_margin_top(12);
    content.set_margin_bottom(12);
    content.set_margin_start(12);
    content.set_margin_end(12);

    let heading = gtk::Label::new(Some(format!("Profile for {username}").as_str()));
    heading.add_css_class("heading");
    heading.set_halign(gtk::Align::Start);
    content.append(&heading);

    let grid = gtk::Grid::builder().row_spacing(6).column_spacing(12).build();
    let entries: Vec<(&'static str, gtk::Entry)> = PROFILE_FIELDS
        .iter()
        .zip(0..)
        .map(|(field, row)| {
            let label = gtk::Label::new(Some(format!("{field}:").as_str()));
            label.set_halign(gtk::Align::End);
            let entry = gtk::Entry::new();
            entry.set_hexpand(true);
            grid.attach(&label, 0, row, 1, 1);
            grid.attach(&entry, 1, row, 1, 1);
            (*field, entry)
        })
        .collect();
    content.append(&grid);

    let error_label = gtk::Label::new(None);
    error_label.add_css_class("error");
    error_label.set_halign(gtk::Align::Start);
    content.append(&error_label);

    dialog.content_area().append(&content);
    let _ = dialog.add_button("Cancel", gtk::ResponseType::Cancel);
    let ok_btn = dialog.add_button("Register", gtk::ResponseType::Ok);
    ok_btn.add_css_class("suggested-action");
    dialog.set_default_response(gtk::ResponseType::Ok);

    let parent = parent.clone();
    dialog.connect_response(move |dlg, resp| {
        if resp != gtk::ResponseType::Ok {
            dlg.close();
            return;
        }
        let info: Profile = entries
            .iter()
            .map(|(field, entry)| (field.to_string(), entry.text().to_string()))
            .collect();
        match parent.register(&username, &password, info) {
            Ok(()) => {
                parent.toast("Account registered successfully");
                dlg.close();
            }
            Err(err) => {
                warn!("registration failed: {err}");
                error_label.set_label(&err.to_string());
            }
        }
    });

    dialog.present();
}

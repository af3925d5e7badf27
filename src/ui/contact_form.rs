use crate::contacts::ContactFields;
use crate::error::ContactError;
use adw::prelude::*;
use gtk4 as gtk;
use log::warn;
use std::cell::RefCell;
use std::rc::Rc;

/// Add/edit form. `on_save` decides whether the dialog may close; its error
/// is shown inline.
pub fn show_contact_dialog<F>(parent: &impl IsA<gtk::Window>, title: &str, initial: Option<ContactFields>, on_save: F)
where
    F: Fn(ContactFields) -> Result<(), ContactError> + 'static,
{
    let dialog = gtk::Dialog::builder()
        .title(title)
        .transient_for(parent)
        .modal(true)
        .default_width(380)
        .build();

    let content = gtk::Box::new(gtk::Orientation::Vertical, 8);
    content.set_margin_top(12);
    content.set_margin_bottom(12);
    content.set_margin_start(12);
    content.set_margin_end(12);

    let grid = gtk::Grid::builder().row_spacing(6).column_spacing(12).build();
    let name_entry = form_row(&grid, 0, "Name:");
    let phone_entry = form_row(&grid, 1, "Phone:");
    let address_entry = form_row(&grid, 2, "Address:");
    let photo_entry = form_row(&grid, 3, "Photo:");
    let browse_btn = gtk::Button::with_label("Browse");
    grid.attach(&browse_btn, 2, 3, 1, 1);
    content.append(&grid);

    if let Some(initial) = &initial {
        name_entry.set_text(&initial.name);
        phone_entry.set_text(&initial.phone);
        address_entry.set_text(&initial.address);
        photo_entry.set_text(initial.photo.as_deref().unwrap_or_default());
    }

    let error_label = gtk::Label::new(None);
    error_label.add_css_class("error");
    error_label.set_halign(gtk::Align::Start);
    content.append(&error_label);

    dialog.content_area().append(&content);
    let _ = dialog.add_button("Cancel", gtk::ResponseType::Cancel);
    let save_btn = dialog.add_button(if initial.is_some() { "Save" } else { "Add" }, gtk::ResponseType::Ok);
    save_btn.add_css_class("suggested-action");
    dialog.set_default_response(gtk::ResponseType::Ok);

    // The native chooser must outlive `show()`, so the form keeps it.
    let chooser: Rc<RefCell<Option<gtk::FileChooserNative>>> = Rc::new(RefCell::new(None));
    {
        let dialog = dialog.clone();
        let photo_entry = photo_entry.clone();
        let chooser = chooser.clone();
        browse_btn.connect_clicked(move |_| {
            let native = browse_photo(&dialog, &photo_entry);
            *chooser.borrow_mut() = Some(native);
        });
    }

    dialog.connect_response(move |dlg, resp| {
        if resp != gtk::ResponseType::Ok {
            chooser.borrow_mut().take();
            dlg.close();
            return;
        }
        let photo = photo_entry.text().to_string();
        let fields = ContactFields {
            name: name_entry.text().to_string(),
            phone: phone_entry.text().to_string(),
            address: address_entry.text().to_string(),
            photo: (!photo.is_empty()).then_some(photo),
        };
        match on_save(fields) {
            Ok(()) => {
                chooser.borrow_mut().take();
                dlg.close();
            }
            Err(err) => {
                warn!("contact not saved: {err}");
                error_label.set_label(&err.to_string());
            }
        }
    });

    dialog.present();
}

fn form_row(grid: &gtk::Grid, row: i32, label: &str) -> gtk::Entry {
    let label = gtk::Label::new(Some(label));
    label.set_halign(gtk::Align::End);
    let entry = gtk::Entry::new();
    entry.set_hexpand(true);
    grid.attach(&label, 0, row, 1, 1);
    grid.attach(&entry, 1, row, 1, 1);
    entry
}

fn browse_photo(parent: &gtk::Dialog, target: &gtk::Entry) -> gtk::FileChooserNative {
    let filter = gtk::FileFilter::new();
    filter.set_name(Some("Image files"));
    for pattern in ["*.png", "*.jpg", "*.jpeg"] {
        filter.add_pattern(pattern);
    }

    let native = gtk::FileChooserNative::new(
        Some("Select Photo"),
        Some(parent),
        gtk::FileChooserAction::Open,
        Some("Open"),
        Some("Cancel"),
    );
    native.add_filter(&filter);

    let target = target.clone();
    native.connect_response(move |native, resp| {
        if resp == gtk::ResponseType::Accept {
            if let Some(path) = native.file().and_then(|file| file.path()) {
                target.set_text(&path.to_string_lossy());
            }
        }
        native.hide();
    });
    native.show();
    native
}

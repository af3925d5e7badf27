use crate::contacts::{Contact, PhotoStatus};
use adw::prelude::*;
use gtk4 as gtk;
use gtk4::{gdk, gdk_pixbuf, glib};
use log::{debug, warn};
use std::path::Path;

const PHOTO_SIZE: i32 = 150;

/// Read-only detail window. A photo that fails to load is reported and the
/// rest of the contact still renders.
pub fn show_contact_window(parent: &impl IsA<gtk::Window>, contact: &Contact) {
    let window = adw::Window::builder()
        .title("Contact Information")
        .transient_for(parent)
        .default_width(320)
        .build();

    let overlay = adw::ToastOverlay::new();
    let root = super::page_box();
    root.append(&super::title_label(&contact.name));

    for line in [
        format!("Name: {}", contact.name),
        format!("Phone: {}", contact.phone),
        format!("Address: {}", contact.address),
    ] {
        let label = gtk::Label::new(Some(line.as_str()));
        label.set_halign(gtk::Align::Start);
        label.set_selectable(true);
        root.append(&label);
    }

    match contact.photo_status() {
        PhotoStatus::Available(path) => match load_photo(path) {
            Ok(picture) => root.append(&picture),
            Err(err) => {
                warn!("could not load {}: {err}", path.display());
                overlay.add_toast(adw::Toast::new(&format!("Error loading photo: {err}")));
            }
        },
        PhotoStatus::Missing(path) => {
            debug!("photo {} does not exist", path.display());
            root.append(&no_photo_label());
        }
        PhotoStatus::Unset => root.append(&no_photo_label()),
    }

    overlay.set_child(Some(&root));
    window.set_content(Some(&super::with_header("Contact Information", &overlay)));
    window.present();
}

fn no_photo_label() -> gtk::Label {
    let label = gtk::Label::new(Some("No Photo Available"));
    label.add_css_class("dim-label");
    label
}

/// Decodes the image already scaled to fit a `PHOTO_SIZE` square.
fn load_photo(path: &Path) -> Result<gtk::Box, glib::Error> {
    let pixbuf = gdk_pixbuf::Pixbuf::from_file_at_scale(path, PHOTO_SIZE, PHOTO_SIZE, true)?;
    let texture = gdk::Texture::for_pixbuf(&pixbuf);
    let picture = gtk::Picture::new();
    picture.set_paintable(Some(&texture));
    picture.set_can_shrink(false);
    picture.set_halign(gtk::Align::Center);
    picture.set_valign(gtk::Align::Center);

    let frame = gtk::Box::new(gtk::Orientation::Vertical, 0);
    frame.set_size_request(PHOTO_SIZE, PHOTO_SIZE);
    frame.set_halign(gtk::Align::Center);
    frame.append(&picture);
    Ok(frame)
}

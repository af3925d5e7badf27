pub mod accounts;
pub mod contact_form;
pub mod contact_list;
pub mod contact_view;
pub mod phonebook;
pub mod register;

use adw::Application;
use adw::prelude::*;
use gtk4 as gtk;

/// Vertical page with the padding every form uses.
pub(crate) fn page_box() -> gtk::Box {
    let root = gtk::Box::new(gtk::Orientation::Vertical, 12);
    root.set_margin_top(24);
    root.set_margin_bottom(24);
    root.set_margin_start(24);
    root.set_margin_end(24);
    root
}

pub(crate) fn title_label(text: &str) -> gtk::Label {
    let title = gtk::Label::new(Some(text));
    title.add_css_class("title-2");
    title.set_halign(gtk::Align::Start);
    title
}

/// Header bar stacked above `child`, for windows without decorations of their own.
pub(crate) fn with_header(title: &str, child: &impl IsA<gtk::Widget>) -> gtk::Box {
    let container = gtk::Box::new(gtk::Orientation::Vertical, 0);
    let header = adw::HeaderBar::new();
    let title = gtk::Label::new(Some(title));
    header.set_title_widget(Some(&title));
    container.append(&header);
    container.append(child);
    container
}

/// Shown instead of the forms when a store cannot be opened.
pub fn show_error_window(app: &Application, title: &str, message: &str) {
    let window = adw::ApplicationWindow::builder()
        .application(app)
        .title(title)
        .default_width(480)
        .default_height(320)
        .build();

    let status = adw::StatusPage::builder()
        .icon_name("dialog-error-symbolic")
        .title("Could not open records")
        .description(message)
        .vexpand(true)
        .build();

    window.set_content(Some(&with_header(title, &status)));
    window.present();
}

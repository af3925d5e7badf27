use gtk4 as gtk;
use gtk4::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Sorted contact names in a single-selection list.
pub struct ContactList {
    root: gtk::Box,
    list: gtk::ListBox,
    names: Rc<RefCell<Vec<String>>>,
}

impl ContactList {
    pub fn new() -> Self {
        let root = gtk::Box::new(gtk::Orientation::Vertical, 6);
        root.set_margin_top(8);
        root.set_margin_bottom(8);
        root.set_margin_start(8);
        root.set_margin_end(8);

        let title = gtk::Label::new(Some("Contacts"));
        title.add_css_class("heading");
        title.set_halign(gtk::Align::Start);
        root.append(&title);

        let list = gtk::ListBox::new();
        list.set_selection_mode(gtk::SelectionMode::Single);
        list.add_css_class("boxed-list");

        let scroller = gtk::ScrolledWindow::builder()
            .vexpand(true)
            .hexpand(true)
            .min_content_width(220)
            .build();
        scroller.set_child(Some(&list));
        root.append(&scroller);

        Self {
            root,
            list,
            names: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn widget(&self) -> gtk::Widget {
        self.root.clone().upcast()
    }

    pub fn set_items(&self, names: Vec<String>) {
        while let Some(child) = self.list.first_child() {
            self.list.remove(&child);
        }
        for name in &names {
            let row = gtk::ListBoxRow::new();
            let label = gtk::Label::new(Some(name.as_str()));
            label.set_margin_top(8);
            label.set_margin_bottom(8);
            label.set_margin_start(8);
            label.set_margin_end(8);
            label.set_halign(gtk::Align::Start);
            row.set_child(Some(&label));
            self.list.append(&row);
        }
        *self.names.borrow_mut() = names;
    }

    pub fn selected(&self) -> Option<String> {
        let row = self.list.selected_row()?;
        let index = usize::try_from(row.index()).ok()?;
        self.names.borrow().get(index).cloned()
    }

    /// Calls `f` with the name of a row activated by double click or Enter.
    pub fn connect_activated<F: Fn(String) + 'static>(&self, f: F) {
        let names = self.names.clone();
        self.list.connect_row_activated(move |_, row| {
            let name = usize::try_from(row.index())
                .ok()
                .and_then(|index| names.borrow().get(index).cloned());
            if let Some(name) = name {
                f(name);
            }
        });
    }
}

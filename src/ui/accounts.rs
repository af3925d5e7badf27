use crate::accounts::{AccountStore, Profile, Session, profile_lines};
use crate::error::AccountError;
use adw::Application;
use adw::prelude::*;
use gtk4 as gtk;
use std::cell::RefCell;
use std::rc::Rc;

const TITLE: &str = "Account Management System";

/// The single accounts window. Pages replace each other inside the toast overlay.
pub struct AccountsWindow {
    window: adw::ApplicationWindow,
    overlay: adw::ToastOverlay,
    accounts: RefCell<AccountStore>,
    session: RefCell<Session>,
}

impl AccountsWindow {
    pub fn present(app: &Application, accounts: AccountStore) -> Rc<Self> {
        let window = adw::ApplicationWindow::builder()
            .application(app)
            .title(TITLE)
            .default_width(420)
            .default_height(360)
            .build();

        let overlay = adw::ToastOverlay::new();
        overlay.set_vexpand(true);
        window.set_content(Some(&super::with_header(TITLE, &overlay)));

        let this = Rc::new(Self {
            window,
            overlay,
            accounts: RefCell::new(accounts),
            session: RefCell::new(Session::new()),
        });
        this.show_login();
        this.window.present();
        this
    }

    pub(crate) fn window(&self) -> &adw::ApplicationWindow {
        &self.window
    }

    pub(crate) fn toast(&self, message: &str) {
        self.overlay.add_toast(adw::Toast::new(message));
    }

    pub(crate) fn register(&self, username: &str, password: &str, info: Profile) -> Result<(), AccountError> {
        self.accounts.borrow_mut().register(username, password, info)
    }

    fn show_login(self: &Rc<Self>) {
        let root = super::page_box();
        root.append(&super::title_label("Sign in"));

        let user_entry = gtk::Entry::new();
        user_entry.set_placeholder_text(Some("Username"));
        user_entry.set_hexpand(true);

        let pass_entry = gtk::PasswordEntry::new();
        pass_entry.set_placeholder_text(Some("Password"));
        pass_entry.set_hexpand(true);

        let form = gtk::Box::new(gtk::Orientation::Vertical, 8);
        form.append(&user_entry);
        form.append(&pass_entry);
        root.append(&form);

        let buttons = gtk::Box::new(gtk::Orientation::Horizontal, 8);
        buttons.set_halign(gtk::Align::End);
        let register_btn = gtk::Button::with_label("Register");
        let login_btn = gtk::Button::with_label("Login");
        login_btn.add_css_class("suggested-action");
        buttons.append(&register_btn);
        buttons.append(&login_btn);
        root.append(&buttons);

        let on_login: Rc<dyn Fn()> = {
            let this = self.clone();
            let user_entry = user_entry.clone();
            let pass_entry = pass_entry.clone();
            Rc::new(move || {
                let username = user_entry.text().to_string();
                let password = pass_entry.text().to_string();
                let result = {
                    let accounts = this.accounts.borrow();
                    this.session.borrow_mut().login(&accounts, &username, &password)
                };
                match result {
                    Ok(()) => this.show_home(),
                    Err(err) => {
                        this.toast(&err.to_string());
                        user_entry.set_text("");
                        pass_entry.set_text("");
                    }
                }
            })
        };

        {
            let on_login = on_login.clone();
            login_btn.connect_clicked(move |_| (on_login)());
        }
        {
            let on_login = on_login.clone();
            user_entry.connect_activate(move |_| (on_login)());
        }
        {
            let on_login = on_login.clone();
            pass_entry.connect_activate(move |_| (on_login)());
        }

        {
            let this = self.clone();
            let user_entry = user_entry.clone();
            let pass_entry = pass_entry.clone();
            register_btn.connect_clicked(move |_| {
                let username = user_entry.text().to_string();
                let password = pass_entry.text().to_string();
                if username.is_empty() || password.is_empty() {
                    this.toast(&AccountError::MissingCredentials.to_string());
                    return;
                }
                super::register::show_register_dialog(&this, username, password);
            });
        }

        self.overlay.set_child(Some(&root));
    }

    fn show_home(self: &Rc<Self>) {
        let Some(user) = self.session.borrow().current_user().map(str::to_string) else {
            self.show_login();
            return;
        };

        let root = super::page_box();
        root.append(&super::title_label(&format!("Welcome, {user}!")));

        let info_btn = gtk::Button::with_label("View Personal Information");
        let logout_btn = gtk::Button::with_label("Logout");
        root.append(&info_btn);
        root.append(&logout_btn);

        {
            let this = self.clone();
            info_btn.connect_clicked(move |_| this.view_personal_info());
        }
        {
            let this = self.clone();
            logout_btn.connect_clicked(move |_| {
                this.session.borrow_mut().logout();
                this.show_login();
            });
        }

        self.overlay.set_child(Some(&root));
    }

    fn view_personal_info(self: &Rc<Self>) {
        let lines = {
            let accounts = self.accounts.borrow();
            let session = self.session.borrow();
            session.require_profile(&accounts).map(profile_lines)
        };
        match lines {
            Ok(lines) => self.show_personal_info(&lines),
            Err(err) => self.toast(&err.to_string()),
        }
    }

    fn show_personal_info(self: &Rc<Self>, lines: &[String]) {
        let root = super::page_box();
        root.append(&super::title_label("Personal Information"));

        for line in lines {
            let label = gtk::Label::new(Some(line.as_str()));
            label.set_halign(gtk::Align::Start);
            label.set_selectable(true);
            root.append(&label);
        }

        let back_btn = gtk::Button::with_label("Back");
        back_btn.set_halign(gtk::Align::End);
        root.append(&back_btn);
        {
            let this = self.clone();
            back_btn.connect_clicked(move |_| this.show_home());
        }

        self.overlay.set_child(Some(&root));
    }
}

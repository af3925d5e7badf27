use crate::accounts::AccountStore;
use crate::contacts::ContactStore;
use crate::settings::Settings;
use crate::ui;
use adw::Application;
use log::{error, info};

pub fn build_accounts_ui(app: &Application) {
    let path = Settings::load().accounts_path();
    info!("opening accounts at {}", path.display());
    match AccountStore::open(&path) {
        Ok(accounts) => {
            ui::accounts::AccountsWindow::present(app, accounts);
        }
        Err(err) => {
            error!("{err}");
            ui::show_error_window(app, "Account Management System", &err.to_string());
        }
    }
}

pub fn build_phonebook_ui(app: &Application) {
    let path = Settings::load().phonebook_path();
    info!("opening phone book at {}", path.display());
    match ContactStore::open(&path) {
        Ok(contacts) => {
            ui::phonebook::PhonebookWindow::present(app, contacts);
        }
        Err(err) => {
            error!("{err}");
            ui::show_error_window(app, "Phone Book App", &err.to_string());
        }
    }
}

//! Account manager and phone book, each keeping its records in one JSON file.
//!
//! The stores in [`accounts`] and [`contacts`] hold the logic; [`ui`] puts
//! GTK forms on top of them.

pub mod accounts;
pub mod app;
pub mod contacts;
pub mod error;
pub mod settings;
pub mod storage;
pub mod ui;

pub use accounts::{Account, AccountStore, Profile, Session};
pub use contacts::{Contact, ContactFields, ContactStore, PhotoStatus};
pub use error::{AccountError, ContactError, StoreError};

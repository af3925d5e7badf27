//! Phone-book contacts keyed by the name they were created with.

use crate::error::{ContactError, StoreError};
use crate::storage::JsonStore;
use log::info;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Phone")]
    pub phone: String,
    #[serde(rename = "Address", default)]
    pub address: String,
    /// Empty when the contact has no photo. Always written, as `""` if unset.
    #[serde(rename = "Photo", default)]
    pub photo: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoStatus<'a> {
    Unset,
    Missing(&'a Path),
    Available(&'a Path),
}

impl Contact {
    /// Checks the photo path against the filesystem at call time.
    pub fn photo_status(&self) -> PhotoStatus<'_> {
        if self.photo.is_empty() {
            return PhotoStatus::Unset;
        }
        let path = Path::new(&self.photo);
        if path.exists() {
            PhotoStatus::Available(path)
        } else {
            PhotoStatus::Missing(path)
        }
    }
}

/// Form input for adding or editing a contact.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub phone: String,
    pub address: String,
    pub photo: Option<String>,
}

impl ContactFields {
    fn validate(&self) -> Result<(), ContactError> {
        if self.name.is_empty() || self.phone.is_empty() {
            return Err(ContactError::MissingRequired);
        }
        Ok(())
    }

    fn photo_path(&self) -> Option<String> {
        self.photo.clone().filter(|path| !path.is_empty())
    }
}

impl From<&Contact> for ContactFields {
    fn from(contact: &Contact) -> Self {
        Self {
            name: contact.name.clone(),
            phone: contact.phone.clone(),
            address: contact.address.clone(),
            photo: (!contact.photo.is_empty()).then(|| contact.photo.clone()),
        }
    }
}

#[derive(Debug)]
pub struct ContactStore {
    store: JsonStore<Contact>,
}

impl ContactStore {
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        Ok(Self {
            store: JsonStore::open(path)?,
        })
    }

    /// Adds a contact under its name, replacing any contact with that name.
    pub fn add(&mut self, fields: ContactFields) -> Result<(), ContactError> {
        fields.validate()?;
        let photo = fields.photo_path().unwrap_or_default();
        let contact = Contact {
            name: fields.name,
            phone: fields.phone,
            address: fields.address,
            photo,
        };
        let key = contact.name.clone();
        self.store.insert(key.as_str(), contact)?;
        info!("added contact {key}");
        Ok(())
    }

    /// Overwrites the record under `key`. The entry keeps its key even when
    /// the name changes, and an empty photo path keeps the stored photo.
    pub fn edit(&mut self, key: &str, fields: ContactFields) -> Result<(), ContactError> {
        fields.validate()?;
        let existing = self
            .store
            .get(key)
            .ok_or_else(|| ContactError::NotFound(key.to_string()))?;
        let photo = fields.photo_path().unwrap_or_else(|| existing.photo.clone());
        let contact = Contact {
            name: fields.name,
            phone: fields.phone,
            address: fields.address,
            photo,
        };
        self.store.insert(key, contact)?;
        info!("edited contact {key}");
        Ok(())
    }

    pub fn remove(&mut self, key: &str) -> Result<Contact, ContactError> {
        let removed = self
            .store
            .remove(key)?
            .ok_or_else(|| ContactError::NotFound(key.to_string()))?;
        info!("removed contact {key}");
        Ok(removed)
    }

    pub fn get(&self, key: &str) -> Option<&Contact> {
        self.store.get(key)
    }

    /// Contact keys in lexicographic order.
    pub fn list(&self) -> Vec<String> {
        self.store.keys().map(str::to_string).collect()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

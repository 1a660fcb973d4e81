// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use leadbook_app::{
    Category, CategoryId, CategoryRepository, Contact, ContactId, ContactRepository,
    ContactUpdate, NewCategory, NewContact,
};
use leadbook_db::Store;
use std::path::Path;
use tracing::info;

use crate::config::{BackendKind, Config};

/// The storage backend picked at startup; the TUI only sees the two
/// repository traits.
pub enum DbRuntime {
    Local(Store),
    Remote(leadbook_remote::Client),
}

impl DbRuntime {
    pub fn open_local(db_path: &Path, demo: bool) -> Result<Self> {
        let mut store = if demo {
            Store::open_memory()?
        } else {
            Store::open(db_path).with_context(|| {
                format!(
                    "open database {} -- if this path is wrong, set [storage].db_path or LEADBOOK_DB_PATH",
                    db_path.display()
                )
            })?
        };
        store.bootstrap()?;
        if demo {
            store.seed_demo_data()?;
        }
        info!(path = %db_path.display(), demo, "using sqlite backend");
        Ok(Self::Local(store))
    }

    pub fn open_remote(config: &Config, config_path: &Path) -> Result<Self> {
        let url = config.remote_url().with_context(|| {
            format!("remote.url is not set in {}", config_path.display())
        })?;
        let api_key = config.remote_api_key().with_context(|| {
            format!(
                "remote.api_key is not set in {} and LEADBOOK_API_KEY is empty",
                config_path.display()
            )
        })?;
        let client = leadbook_remote::Client::new(url, api_key, config.remote_timeout()?)
            .with_context(|| {
                format!(
                    "invalid [remote] config in {}; fix url/api_key/timeout values",
                    config_path.display()
                )
            })?;
        info!(url = client.base_url(), "using remote backend");
        Ok(Self::Remote(client))
    }

    pub fn open(config: &Config, config_path: &Path, db_path: &Path, demo: bool) -> Result<Self> {
        if demo {
            return Self::open_local(db_path, true);
        }
        match config.backend() {
            BackendKind::Sqlite => Self::open_local(db_path, false),
            BackendKind::Remote => Self::open_remote(config, config_path),
        }
    }

    /// Proves the backend answers. SQLite was already bootstrapped on open.
    pub fn check(&self) -> Result<()> {
        match self {
            Self::Local(store) => store.table_names().map(|_| ()),
            Self::Remote(client) => client.ping(),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Local(_) => BackendKind::Sqlite.as_str(),
            Self::Remote(_) => BackendKind::Remote.as_str(),
        }
    }
}

impl CategoryRepository for DbRuntime {
    fn list_categories(&mut self) -> Result<Vec<Category>> {
        match self {
            Self::Local(store) => store.list_categories(),
            Self::Remote(client) => client.list_categories(),
        }
    }

    fn insert_category(&mut self, category: &NewCategory) -> Result<Category> {
        match self {
            Self::Local(store) => store.insert_category(category),
            Self::Remote(client) => client.insert_category(category),
        }
    }

    fn delete_category(&mut self, id: &CategoryId) -> Result<()> {
        match self {
            Self::Local(store) => store.delete_category(id),
            Self::Remote(client) => client.delete_category(id),
        }
    }
}

impl ContactRepository for DbRuntime {
    fn list_contacts(&mut self, category_id: &CategoryId) -> Result<Vec<Contact>> {
        match self {
            Self::Local(store) => store.list_contacts(category_id),
            Self::Remote(client) => client.list_contacts(category_id),
        }
    }

    fn insert_contact(&mut self, contact: &NewContact) -> Result<Contact> {
        match self {
            Self::Local(store) => store.insert_contact(contact),
            Self::Remote(client) => client.insert_contact(contact),
        }
    }

    fn update_contact(&mut self, id: &ContactId, update: &ContactUpdate) -> Result<()> {
        match self {
            Self::Local(store) => store.update_contact(id, update),
            Self::Remote(client) => client.update_contact(id, update),
        }
    }

    fn delete_contact(&mut self, id: &ContactId) -> Result<()> {
        match self {
            Self::Local(store) => store.delete_contact(id),
            Self::Remote(client) => client.delete_contact(id),
        }
    }
}

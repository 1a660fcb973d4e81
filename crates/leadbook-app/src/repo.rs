// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;

use crate::{Category, CategoryId, Contact, ContactId, ContactUpdate, NewCategory, NewContact};

/// Persistence for contact categories, newest first.
pub trait CategoryRepository {
    fn list_categories(&mut self) -> Result<Vec<Category>>;
    fn insert_category(&mut self, category: &NewCategory) -> Result<Category>;
    fn delete_category(&mut self, id: &CategoryId) -> Result<()>;
}

/// Persistence for contacts. Listing is always scoped to one category and
/// ordered by creation time, newest first.
pub trait ContactRepository {
    fn list_contacts(&mut self, category_id: &CategoryId) -> Result<Vec<Contact>>;
    fn insert_contact(&mut self, contact: &NewContact) -> Result<Contact>;
    fn update_contact(&mut self, id: &ContactId, update: &ContactUpdate) -> Result<()>;
    fn delete_contact(&mut self, id: &ContactId) -> Result<()>;
}

pub trait Backend: CategoryRepository + ContactRepository {}

impl<T: CategoryRepository + ContactRepository> Backend for T {}

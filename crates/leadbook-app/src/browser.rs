// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use tracing::warn;

use crate::forms::category_from_input;
use crate::repo::CategoryRepository;
use crate::{Category, CategoryId};

/// Category list view state plus the selection that scopes the contact view.
///
/// Category writes never notify the user: failures are logged and the cached
/// list is left exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBrowser {
    categories: Vec<Category>,
    loading: bool,
    pub new_category_name: String,
    selected: Option<CategoryId>,
    adding_contact: bool,
}

impl Default for CategoryBrowser {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            loading: true,
            new_category_name: String::new(),
            selected: None,
            adding_contact: false,
        }
    }
}

impl CategoryBrowser {
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    pub const fn is_adding_contact(&self) -> bool {
        self.adding_contact
    }

    pub fn selected_id(&self) -> Option<&CategoryId> {
        self.selected.as_ref()
    }

    pub fn selected_category(&self) -> Option<&Category> {
        let id = self.selected.as_ref()?;
        self.categories.iter().find(|category| &category.id == id)
    }

    pub fn load_categories<R: CategoryRepository + ?Sized>(&mut self, repo: &mut R) -> bool {
        self.loading = true;
        let loaded = match repo.list_categories() {
            Ok(categories) => {
                self.categories = categories;
                true
            }
            Err(error) => {
                warn!(error = format!("{error:#}"), "load categories failed");
                false
            }
        };
        self.loading = false;
        loaded
    }

    /// Adds the category typed into the input line. Returns the new id, or
    /// `None` when the input was blank or the insert failed.
    pub fn add_category<R: CategoryRepository + ?Sized>(
        &mut self,
        repo: &mut R,
    ) -> Option<CategoryId> {
        let new_category = category_from_input(&self.new_category_name)?;
        match repo.insert_category(&new_category) {
            Ok(category) => {
                let id = category.id.clone();
                self.categories.insert(0, category);
                self.new_category_name.clear();
                Some(id)
            }
            Err(error) => {
                warn!(
                    name = %new_category.name,
                    error = format!("{error:#}"),
                    "add category failed"
                );
                None
            }
        }
    }

    pub fn delete_category<R: CategoryRepository + ?Sized>(
        &mut self,
        repo: &mut R,
        id: &CategoryId,
    ) -> bool {
        if let Err(error) = repo.delete_category(id) {
            warn!(category = %id, error = format!("{error:#}"), "delete category failed");
            return false;
        }
        self.categories.retain(|category| &category.id != id);
        if self.selected.as_ref() == Some(id) {
            self.select_category(None);
        }
        true
    }

    pub fn select_category(&mut self, id: Option<CategoryId>) {
        if id.is_none() {
            self.adding_contact = false;
        }
        self.selected = id;
    }

    pub fn set_adding_contact(&mut self, adding: bool) {
        self.adding_contact = adding && self.selected.is_some();
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use leadbook_app::{
    Category, CategoryId, CategoryRepository, Contact, ContactId, ContactRepository,
    ContactStatus, ContactUpdate, NewCategory, NewContact,
};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;
use time::{Duration, OffsetDateTime, macros::datetime};

const CATEGORY_NAMES: [&str; 10] = [
    "Dental Clinics",
    "Barbershops",
    "Bakeries",
    "Auto Repair",
    "Yoga Studios",
    "Florists",
    "Law Offices",
    "Pet Groomers",
    "Coffee Shops",
    "Gyms",
];

const BUSINESS_PREFIXES: [&str; 12] = [
    "Bright", "Summit", "Harbor", "Maple", "Golden", "Prime", "Riverside", "Oak", "Sunset",
    "Northside", "Elm Street", "Lakeview",
];

const BUSINESS_SUFFIXES: [&str; 6] = ["Studio", "Center", "Co", "Group", "Shop", "Partners"];

const NOTES: [&str; 6] = [
    "asked to call back next week",
    "owner out until Monday",
    "interested, send pricing",
    "wrong number on website",
    "left voicemail",
    "prefers email",
];

/// Repository operations, used to inject failures and count requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Operation {
    ListCategories,
    InsertCategory,
    DeleteCategory,
    ListContacts,
    InsertContact,
    UpdateContact,
    DeleteContact,
}

/// In-memory backend that behaves like a store: it mints ids and timestamps,
/// orders listings newest first, and cascades category deletes.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    categories: Vec<Category>,
    contacts: Vec<Contact>,
    next_id: u64,
    clock: OffsetDateTime,
    failing: BTreeSet<Operation>,
    calls: BTreeMap<Operation, usize>,
    inserted_contacts: Vec<NewContact>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            contacts: Vec::new(),
            next_id: 1,
            clock: reference_now(),
            failing: BTreeSet::new(),
            calls: BTreeMap::new(),
            inserted_contacts: Vec::new(),
        }
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&mut self, operation: Operation) {
        self.failing.insert(operation);
    }

    pub fn recover(&mut self, operation: Operation) {
        self.failing.remove(&operation);
    }

    pub fn calls(&self, operation: Operation) -> usize {
        self.calls.get(&operation).copied().unwrap_or(0)
    }

    /// Every insert request that reached the store, in order.
    pub fn inserted_contacts(&self) -> &[NewContact] {
        &self.inserted_contacts
    }

    pub fn stored_contact(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|contact| &contact.id == id)
    }

    pub fn stored_category_count(&self) -> usize {
        self.categories.len()
    }

    pub fn stored_contact_count(&self) -> usize {
        self.contacts.len()
    }

    fn begin(&mut self, operation: Operation) -> Result<()> {
        *self.calls.entry(operation).or_default() += 1;
        if self.failing.contains(&operation) {
            bail!("injected failure for {operation:?}");
        }
        Ok(())
    }

    fn mint_id(&mut self, prefix: &str) -> String {
        let id = format!("{prefix}-{:04}", self.next_id);
        self.next_id += 1;
        id
    }

    fn tick(&mut self) -> OffsetDateTime {
        self.clock += Duration::seconds(1);
        self.clock
    }
}

impl CategoryRepository for MemoryStore {
    fn list_categories(&mut self) -> Result<Vec<Category>> {
        self.begin(Operation::ListCategories)?;
        let mut categories = self.categories.clone();
        categories.reverse();
        Ok(categories)
    }

    fn insert_category(&mut self, category: &NewCategory) -> Result<Category> {
        self.begin(Operation::InsertCategory)?;
        let stored = Category {
            id: CategoryId::new(self.mint_id("cat")),
            name: category.name.clone(),
            created_at: self.tick(),
        };
        self.categories.push(stored.clone());
        Ok(stored)
    }

    fn delete_category(&mut self, id: &CategoryId) -> Result<()> {
        self.begin(Operation::DeleteCategory)?;
        let before = self.categories.len();
        self.categories.retain(|category| &category.id != id);
        if self.categories.len() == before {
            bail!("category {id} not found");
        }
        self.contacts.retain(|contact| &contact.category_id != id);
        Ok(())
    }
}

impl ContactRepository for MemoryStore {
    fn list_contacts(&mut self, category_id: &CategoryId) -> Result<Vec<Contact>> {
        self.begin(Operation::ListContacts)?;
        Ok(self
            .contacts
            .iter()
            .rev()
            .filter(|contact| &contact.category_id == category_id)
            .cloned()
            .collect())
    }

    fn insert_contact(&mut self, contact: &NewContact) -> Result<Contact> {
        self.begin(Operation::InsertContact)?;
        self.inserted_contacts.push(contact.clone());
        if !self
            .categories
            .iter()
            .any(|category| category.id == contact.category_id)
        {
            bail!("category {} not found", contact.category_id);
        }
        let now = self.tick();
        let stored = Contact {
            id: ContactId::new(self.mint_id("contact")),
            category_id: contact.category_id.clone(),
            business_name: contact.business_name.clone(),
            email: contact.email.clone(),
            mobile_number: contact.mobile_number.clone(),
            status: contact.status.clone(),
            notes: contact.notes.clone(),
            created_at: now,
            updated_at: now,
        };
        self.contacts.push(stored.clone());
        Ok(stored)
    }

    fn update_contact(&mut self, id: &ContactId, update: &ContactUpdate) -> Result<()> {
        self.begin(Operation::UpdateContact)?;
        let now = self.tick();
        let contact = self
            .contacts
            .iter_mut()
            .find(|contact| &contact.id == id)
            .ok_or_else(|| anyhow!("contact {id} not found"))?;
        contact.apply(update);
        contact.updated_at = now;
        Ok(())
    }

    fn delete_contact(&mut self, id: &ContactId) -> Result<()> {
        self.begin(Operation::DeleteContact)?;
        let before = self.contacts.len();
        self.contacts.retain(|contact| &contact.id != id);
        if self.contacts.len() == before {
            bail!("contact {id} not found");
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }

    fn bool(&mut self) -> bool {
        (self.next_u64() & 1) == 1
    }
}

/// Seeded generator of plausible lead lists.
#[derive(Debug, Clone)]
pub struct LeadFaker {
    rng: DeterministicRng,
}

impl LeadFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
        }
    }

    pub fn category_name(&mut self) -> String {
        self.pick(&CATEGORY_NAMES).to_owned()
    }

    pub fn business_name(&mut self) -> String {
        format!(
            "{} {}",
            self.pick(&BUSINESS_PREFIXES),
            self.pick(&BUSINESS_SUFFIXES)
        )
    }

    pub fn contact(&mut self, category_id: &CategoryId) -> NewContact {
        let business_name = self.business_name();
        let email = self.rng.bool().then(|| {
            let slug: String = business_name
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
                .to_ascii_lowercase();
            format!("hello@{slug}.example")
        });
        let mobile_number = self
            .rng
            .bool()
            .then(|| format!("555-{:04}", self.rng.int_n(10_000)));
        let status = ContactStatus::CHOICES[self.rng.int_n(ContactStatus::CHOICES.len())].clone();
        let notes = self.rng.bool().then(|| self.pick(&NOTES).to_owned());
        NewContact {
            category_id: category_id.clone(),
            business_name,
            email,
            mobile_number,
            status,
            notes,
        }
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }
}

pub fn temp_db_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let db_path = dir.path().join("leadbook.db");
    Ok((dir, db_path))
}

fn reference_now() -> OffsetDateTime {
    datetime!(2026-02-19 12:34:56 UTC)
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};

use crate::{CategoryId, Contact, ContactStatus, ContactUpdate, NewCategory, NewContact};

pub const BUSINESS_NAME_REQUIRED: &str = "Business name is required";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    BusinessName,
    Email,
    MobileNumber,
    Status,
    Notes,
}

impl DraftField {
    pub const ALL: [Self; 5] = [
        Self::BusinessName,
        Self::Email,
        Self::MobileNumber,
        Self::Status,
        Self::Notes,
    ];

    pub const fn placeholder(self) -> &'static str {
        match self {
            Self::BusinessName => "Business name",
            Self::Email => "Email",
            Self::MobileNumber => "Mobile",
            Self::Status => "",
            Self::Notes => "Notes / Feedback",
        }
    }

    pub fn step(self, delta: isize) -> Self {
        let len = Self::ALL.len() as isize;
        let current = Self::ALL
            .iter()
            .position(|field| *field == self)
            .unwrap_or(0) as isize;
        Self::ALL[(current + delta).rem_euclid(len) as usize]
    }
}

/// Unsaved field values for the inline add row or the row being edited.
///
/// Optional columns are held as plain strings so the editor can show an
/// empty input; they are normalized back to `None` when the draft is
/// turned into a write.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub business_name: String,
    pub email: String,
    pub mobile_number: String,
    pub status: ContactStatus,
    pub notes: String,
}

impl ContactDraft {
    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            business_name: contact.business_name.clone(),
            email: contact.email.clone().unwrap_or_default(),
            mobile_number: contact.mobile_number.clone().unwrap_or_default(),
            status: contact.status.clone(),
            notes: contact.notes.clone().unwrap_or_default(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.business_name.trim().is_empty() {
            bail!(BUSINESS_NAME_REQUIRED);
        }
        Ok(())
    }

    pub fn to_new_contact(&self, category_id: &CategoryId) -> Result<NewContact> {
        self.validate()?;
        Ok(NewContact {
            category_id: category_id.clone(),
            business_name: self.business_name.trim().to_owned(),
            email: normalize_optional(&self.email),
            mobile_number: normalize_optional(&self.mobile_number),
            status: self.status.clone(),
            notes: normalize_optional(&self.notes),
        })
    }

    pub fn to_update(&self) -> Result<ContactUpdate> {
        self.validate()?;
        Ok(ContactUpdate {
            business_name: self.business_name.trim().to_owned(),
            email: normalize_optional(&self.email),
            mobile_number: normalize_optional(&self.mobile_number),
            status: self.status.clone(),
            notes: normalize_optional(&self.notes),
        })
    }

    /// Text buffer behind `field`; status is chosen, not typed.
    pub fn text_mut(&mut self, field: DraftField) -> Option<&mut String> {
        match field {
            DraftField::BusinessName => Some(&mut self.business_name),
            DraftField::Email => Some(&mut self.email),
            DraftField::MobileNumber => Some(&mut self.mobile_number),
            DraftField::Notes => Some(&mut self.notes),
            DraftField::Status => None,
        }
    }

    pub fn text(&self, field: DraftField) -> &str {
        match field {
            DraftField::BusinessName => &self.business_name,
            DraftField::Email => &self.email,
            DraftField::MobileNumber => &self.mobile_number,
            DraftField::Notes => &self.notes,
            DraftField::Status => self.status.as_str(),
        }
    }
}

pub fn normalize_optional(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Blank names are ignored rather than reported.
pub fn category_from_input(raw: &str) -> Option<NewCategory> {
    normalize_optional(raw).map(|name| NewCategory { name })
}

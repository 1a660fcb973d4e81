// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Contact, ContactId, StatusTone};

pub const MISSING_VALUE: &str = "-";
pub const CONTACT_COLUMNS: [&str; 5] = [
    "Business Name",
    "Email",
    "Mobile Number",
    "Status",
    "Notes",
];

pub fn display_optional(value: Option<&str>) -> &str {
    match value {
        Some(value) if !value.is_empty() => value,
        _ => MISSING_VALUE,
    }
}

/// Read-only table row for a stored contact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactRow {
    pub id: ContactId,
    pub cells: [String; 5],
    pub tone: Option<StatusTone>,
}

impl ContactRow {
    pub const STATUS_COLUMN: usize = 3;

    pub fn from_contact(contact: &Contact) -> Self {
        Self {
            id: contact.id.clone(),
            cells: [
                contact.business_name.clone(),
                display_optional(contact.email.as_deref()).to_owned(),
                display_optional(contact.mobile_number.as_deref()).to_owned(),
                contact.status.as_str().to_owned(),
                display_optional(contact.notes.as_deref()).to_owned(),
            ],
            tone: contact.status.tone(),
        }
    }
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::ids::*;

pub const CATEGORIES_TABLE: &str = "contact_categories";
pub const CONTACTS_TABLE: &str = "contacts";

/// Call outcome recorded against a contact.
///
/// Stores only ever write the three known values, but rows written by other
/// clients are decoded as `Unrecognized` instead of failing the whole list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ContactStatus {
    #[default]
    Pending,
    AlreadyCalled,
    Busy,
    Unrecognized(String),
}

impl ContactStatus {
    pub const CHOICES: [Self; 3] = [Self::Pending, Self::AlreadyCalled, Self::Busy];

    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::AlreadyCalled => "Already Called",
            Self::Busy => "Busy",
            Self::Unrecognized(raw) => raw,
        }
    }

    pub fn parse(value: &str) -> Self {
        match value {
            "Pending" => Self::Pending,
            "Already Called" => Self::AlreadyCalled,
            "Busy" => Self::Busy,
            other => Self::Unrecognized(other.to_owned()),
        }
    }

    pub fn tone(&self) -> Option<StatusTone> {
        match self {
            Self::Pending => Some(StatusTone::Yellow),
            Self::AlreadyCalled => Some(StatusTone::Green),
            Self::Busy => Some(StatusTone::Red),
            Self::Unrecognized(_) => None,
        }
    }

    pub fn cycle(&self, delta: isize) -> Self {
        let Some(current) = Self::CHOICES.iter().position(|choice| choice == self) else {
            return if delta >= 0 { Self::Pending } else { Self::Busy };
        };
        let len = Self::CHOICES.len() as isize;
        let next = (current as isize + delta).rem_euclid(len) as usize;
        Self::CHOICES[next].clone()
    }
}

impl From<String> for ContactStatus {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ContactStatus> for String {
    fn from(value: ContactStatus) -> Self {
        match value {
            ContactStatus::Unrecognized(raw) => raw,
            known => known.as_str().to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Green,
    Yellow,
    Red,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    pub category_id: CategoryId,
    pub business_name: String,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub status: ContactStatus,
    pub notes: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl Contact {
    pub fn apply(&mut self, update: &ContactUpdate) {
        self.business_name = update.business_name.clone();
        self.email = update.email.clone();
        self.mobile_number = update.mobile_number.clone();
        self.status = update.status.clone();
        self.notes = update.notes.clone();
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewCategory {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewContact {
    pub category_id: CategoryId,
    pub business_name: String,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub status: ContactStatus,
    pub notes: Option<String>,
}

/// Every user-editable contact column, written together in one request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactUpdate {
    pub business_name: String,
    pub email: Option<String>,
    pub mobile_number: Option<String>,
    pub status: ContactStatus,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FormKind {
    Category,
    NewContact,
    EditContact,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppMode {
    Nav,
    Form(FormKind),
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use leadbook_app::{
    CATEGORIES_TABLE, CONTACTS_TABLE, Category, CategoryId, CategoryRepository, Contact,
    ContactId, ContactRepository, ContactStatus, ContactUpdate, NewCategory, NewContact,
};
use rusqlite::{Connection, Row, params};
use std::collections::BTreeSet;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{OffsetDateTime, PrimitiveDateTime};
use tracing::{debug, info};

pub const APP_NAME: &str = "leadbook";

const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    (CATEGORIES_TABLE, &["id", "name", "created_at"]),
    (
        CONTACTS_TABLE,
        &[
            "id",
            "category_id",
            "business_name",
            "email",
            "mobile_number",
            "status",
            "notes",
            "created_at",
            "updated_at",
        ],
    ),
];

struct RequiredIndex {
    name: &'static str,
    create_sql: &'static str,
}

const REQUIRED_INDEXES: &[RequiredIndex] = &[
    RequiredIndex {
        name: "idx_contact_categories_created_at",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_contact_categories_created_at ON contact_categories (created_at);",
    },
    RequiredIndex {
        name: "idx_contacts_category_created_at",
        create_sql: "CREATE INDEX IF NOT EXISTS idx_contacts_category_created_at ON contacts (category_id, created_at);",
    },
];

const CONTACT_COLUMNS: &str = "id, category_id, business_name, email, mobile_number, status, notes, created_at, updated_at";

const DEMO_DATA: &[(&str, &[(&str, Option<&str>, Option<&str>, &str, Option<&str>)])] = &[
    (
        "Dental Clinics",
        &[
            (
                "Bright Smiles Dental",
                Some("front@brightsmiles.example"),
                Some("555-0142"),
                "Pending",
                None,
            ),
            (
                "Harbor Family Dentistry",
                None,
                Some("555-0187"),
                "Already Called",
                Some("interested, send pricing"),
            ),
        ],
    ),
    (
        "Barbershops",
        &[
            (
                "Elm Street Cuts",
                None,
                Some("555-0110"),
                "Busy",
                Some("owner out until Monday"),
            ),
            ("Summit Barber Co", Some("hello@summitbarber.example"), None, "Pending", None),
        ],
    ),
    ("Bakeries", &[]),
];

pub struct Store {
    conn: Connection,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let printable = path.to_string_lossy().to_string();
        validate_db_path(&printable)?;
        let conn = Connection::open(path)
            .with_context(|| format!("open database at {}", path.display()))?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory database")?;
        configure_connection(&conn)?;
        Ok(Self { conn })
    }

    pub fn raw_connection(&self) -> &Connection {
        &self.conn
    }

    pub fn bootstrap(&self) -> Result<()> {
        if has_user_tables(&self.conn)? {
            validate_schema(&self.conn)?;
        } else {
            self.conn
                .execute_batch(include_str!("sql/schema.sql"))
                .context("create schema")?;
            info!("created leadbook schema");
        }

        ensure_required_indexes(&self.conn)?;
        Ok(())
    }

    /// Fills an empty database with a few categories and contacts. A store
    /// that already holds categories is left alone.
    pub fn seed_demo_data(&mut self) -> Result<()> {
        let existing: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM contact_categories", [], |row| {
                row.get(0)
            })
            .context("count categories")?;
        if existing > 0 {
            return Ok(());
        }

        // Reverse so the first entry is listed first.
        for (category_name, contacts) in DEMO_DATA.iter().rev() {
            let category = self.insert_category(&NewCategory {
                name: (*category_name).to_owned(),
            })?;
            for (business_name, email, mobile_number, status, notes) in contacts.iter().rev() {
                self.insert_contact(&NewContact {
                    category_id: category.id.clone(),
                    business_name: (*business_name).to_owned(),
                    email: email.map(str::to_owned),
                    mobile_number: mobile_number.map(str::to_owned),
                    status: ContactStatus::parse(status),
                    notes: notes.map(str::to_owned),
                })?;
            }
        }
        info!(categories = DEMO_DATA.len(), "seeded demo data");
        Ok(())
    }

    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(
                "
                SELECT name
                FROM sqlite_master
                WHERE type = 'table'
                  AND name NOT LIKE 'sqlite_%'
                ORDER BY name ASC
                ",
            )
            .context("prepare table names query")?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .context("query table names")?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .context("collect table names")
    }
}

impl CategoryRepository for Store {
    fn list_categories(&mut self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare(
                "
                SELECT id, name, created_at
                FROM contact_categories
                ORDER BY created_at DESC, rowid DESC
                ",
            )
            .context("prepare categories query")?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                ))
            })
            .context("query categories")?;

        let mut categories = Vec::new();
        for row in rows {
            let (id, name, created_at) = row.context("decode category row")?;
            categories.push(Category {
                id: CategoryId::new(id),
                name,
                created_at: parse_datetime(&created_at)?,
            });
        }
        Ok(categories)
    }

    fn insert_category(&mut self, category: &NewCategory) -> Result<Category> {
        let name = category.name.trim();
        if name.is_empty() {
            bail!("category name is required -- enter a name and retry");
        }
        let now = now_timestamp()?;
        let (id, name, created_at) = self
            .conn
            .query_row(
                "
                INSERT INTO contact_categories (name, created_at)
                VALUES (?, ?)
                RETURNING id, name, created_at
                ",
                params![name, now],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                    ))
                },
            )
            .context("insert category")?;
        debug!(category = %id, "inserted category");
        Ok(Category {
            id: CategoryId::new(id),
            name,
            created_at: parse_datetime(&created_at)?,
        })
    }

    fn delete_category(&mut self, id: &CategoryId) -> Result<()> {
        let deleted = self
            .conn
            .execute(
                "DELETE FROM contact_categories WHERE id = ?",
                params![id.as_str()],
            )
            .with_context(|| format!("delete category {id}"))?;
        if deleted == 0 {
            bail!("category {id} not found");
        }
        Ok(())
    }
}

impl ContactRepository for Store {
    fn list_contacts(&mut self, category_id: &CategoryId) -> Result<Vec<Contact>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "
                SELECT {CONTACT_COLUMNS}
                FROM contacts
                WHERE category_id = ?
                ORDER BY created_at DESC, rowid DESC
                "
            ))
            .context("prepare contacts query")?;
        let rows = stmt
            .query_map(params![category_id.as_str()], RawContact::from_row)
            .context("query contacts")?;

        let mut contacts = Vec::new();
        for row in rows {
            contacts.push(row.context("decode contact row")?.into_contact()?);
        }
        Ok(contacts)
    }

    fn insert_contact(&mut self, contact: &NewContact) -> Result<Contact> {
        let business_name = contact.business_name.trim();
        if business_name.is_empty() {
            bail!("business name is required -- enter a business name and retry");
        }
        let now = now_timestamp()?;
        let raw = self
            .conn
            .query_row(
                &format!(
                    "
                    INSERT INTO contacts (
                      category_id, business_name, email, mobile_number, status, notes,
                      created_at, updated_at
                    )
                    VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                    RETURNING {CONTACT_COLUMNS}
                    "
                ),
                params![
                    contact.category_id.as_str(),
                    business_name,
                    contact.email,
                    contact.mobile_number,
                    contact.status.as_str(),
                    contact.notes,
                    now,
                    now,
                ],
                RawContact::from_row,
            )
            .with_context(|| format!("insert contact into category {}", contact.category_id))?;
        let stored = raw.into_contact()?;
        debug!(contact = %stored.id, "inserted contact");
        Ok(stored)
    }

    fn update_contact(&mut self, id: &ContactId, update: &ContactUpdate) -> Result<()> {
        let business_name = update.business_name.trim();
        if business_name.is_empty() {
            bail!("business name is required -- enter a business name and retry");
        }
        let now = now_timestamp()?;
        let updated = self
            .conn
            .execute(
                "
                UPDATE contacts
                SET business_name = ?, email = ?, mobile_number = ?, status = ?, notes = ?,
                    updated_at = ?
                WHERE id = ?
                ",
                params![
                    business_name,
                    update.email,
                    update.mobile_number,
                    update.status.as_str(),
                    update.notes,
                    now,
                    id.as_str(),
                ],
            )
            .with_context(|| format!("update contact {id}"))?;
        if updated == 0 {
            bail!("contact {id} not found");
        }
        Ok(())
    }

    fn delete_contact(&mut self, id: &ContactId) -> Result<()> {
        let deleted = self
            .conn
            .execute("DELETE FROM contacts WHERE id = ?", params![id.as_str()])
            .with_context(|| format!("delete contact {id}"))?;
        if deleted == 0 {
            bail!("contact {id} not found");
        }
        Ok(())
    }
}

struct RawContact {
    id: String,
    category_id: String,
    business_name: String,
    email: Option<String>,
    mobile_number: Option<String>,
    status: String,
    notes: Option<String>,
    created_at: String,
    updated_at: String,
}

impl RawContact {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            category_id: row.get(1)?,
            business_name: row.get(2)?,
            email: row.get(3)?,
            mobile_number: row.get(4)?,
            status: row.get(5)?,
            notes: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    fn into_contact(self) -> Result<Contact> {
        Ok(Contact {
            id: ContactId::new(self.id),
            category_id: CategoryId::new(self.category_id),
            business_name: self.business_name,
            email: self.email,
            mobile_number: self.mobile_number,
            status: ContactStatus::parse(&self.status),
            notes: self.notes,
            created_at: parse_datetime(&self.created_at)?,
            updated_at: parse_datetime(&self.updated_at)?,
        })
    }
}

pub fn default_db_path() -> Result<PathBuf> {
    if let Some(override_path) = env::var_os("LEADBOOK_DB_PATH") {
        return Ok(PathBuf::from(override_path));
    }

    let data_root = dirs::data_local_dir().ok_or_else(|| {
        anyhow!("cannot resolve data directory; set LEADBOOK_DB_PATH to a writable database path")
    })?;

    let app_dir = data_root.join(APP_NAME);
    fs::create_dir_all(&app_dir)
        .with_context(|| format!("create data directory {}", app_dir.display()))?;
    Ok(app_dir.join("leadbook.db"))
}

pub fn validate_db_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("database path must not be empty");
    }
    if path == ":memory:" {
        return Ok(());
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "database path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("database path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    if path.contains('?') {
        bail!(
            "database path {path:?} contains '?'; remove query parameters and use a plain file path"
        );
    }

    Ok(())
}

fn has_user_tables(conn: &Connection) -> Result<bool> {
    let count: i64 = conn
        .query_row(
            "
            SELECT COUNT(*)
            FROM sqlite_master
            WHERE type = 'table'
              AND name NOT LIKE 'sqlite_%'
            ",
            [],
            |row| row.get(0),
        )
        .context("count user tables")?;
    Ok(count > 0)
}

fn validate_schema(conn: &Connection) -> Result<()> {
    for (table, required_columns) in REQUIRED_SCHEMA {
        if !table_exists(conn, table)? {
            bail!(
                "database is missing required table `{table}`; use a leadbook database or migrate first"
            );
        }

        let columns = table_columns(conn, table)?;
        let missing: Vec<&str> = required_columns
            .iter()
            .copied()
            .filter(|column| !columns.contains(*column))
            .collect();

        if !missing.is_empty() {
            bail!(
                "table `{table}` is missing required columns: {}; run migration before launching",
                missing.join(", ")
            );
        }
    }

    Ok(())
}

fn ensure_required_indexes(conn: &Connection) -> Result<()> {
    for index in REQUIRED_INDEXES {
        conn.execute_batch(index.create_sql)
            .with_context(|| format!("ensure required index `{}`", index.name))?;
    }

    let existing_indexes = index_names(conn)?;
    let missing = REQUIRED_INDEXES
        .iter()
        .filter(|index| !existing_indexes.contains(index.name))
        .map(|index| index.name)
        .collect::<Vec<_>>();
    if !missing.is_empty() {
        bail!(
            "database is missing required indexes: {}; run migration before launching",
            missing.join(", ")
        );
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> Result<bool> {
    let exists = conn
        .query_row(
            "
            SELECT EXISTS(
              SELECT 1
              FROM sqlite_master
              WHERE type = 'table' AND name = ?
            )
            ",
            params![table],
            |row| row.get::<_, i64>(0),
        )
        .with_context(|| format!("check table existence for {table}"))?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table})"))
        .with_context(|| format!("inspect columns for {table}"))?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .with_context(|| format!("query column info for {table}"))?;

    rows.collect::<rusqlite::Result<BTreeSet<_>>>()
        .with_context(|| format!("collect columns for {table}"))
}

fn index_names(conn: &Connection) -> Result<BTreeSet<String>> {
    let mut stmt = conn
        .prepare(
            "
            SELECT name
            FROM sqlite_master
            WHERE type = 'index'
              AND name NOT LIKE 'sqlite_%'
            ",
        )
        .context("prepare index names query")?;
    let rows = stmt
        .query_map([], |row| row.get::<_, String>(0))
        .context("query index names")?;
    rows.collect::<rusqlite::Result<BTreeSet<_>>>()
        .context("collect index names")
}

fn configure_connection(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "
        PRAGMA foreign_keys = ON;
        PRAGMA journal_mode = WAL;
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        ",
    )
    .context("configure sqlite pragmas")
}

// Fixed width so that ordering by the text column is chronological.
fn now_timestamp() -> Result<String> {
    OffsetDateTime::now_utc()
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:6]Z"
        ))
        .context("format current timestamp")
}

fn parse_datetime(raw: &str) -> Result<OffsetDateTime> {
    if let Ok(value) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(value);
    }

    if let Ok(value) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day] [hour]:[minute]:[second].[subsecond]"),
    ) {
        return Ok(value.assume_utc());
    }

    if let Ok(value) = PrimitiveDateTime::parse(
        raw,
        &format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    ) {
        return Ok(value.assume_utc());
    }

    bail!("unsupported timestamp {raw:?}")
}

// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use leadbook_app::{
    CATEGORIES_TABLE, CONTACTS_TABLE, Category, CategoryId, CategoryRepository, Contact,
    ContactId, ContactRepository, ContactUpdate, NewCategory, NewContact, SortDirection,
};
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_RANGE, HeaderMap, HeaderValue};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;
use url::Url;

const REST_PATH: &str = "rest/v1";
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";
const PREFER: &str = "Prefer";

/// Blocking client for a hosted PostgREST-style tabular API.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, api_key: &str, timeout: Duration) -> Result<Self> {
        let trimmed = base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            bail!("remote.url must not be empty");
        }
        if api_key.trim().is_empty() {
            bail!("remote.api_key must not be empty -- set it in the config or LEADBOOK_API_KEY");
        }
        let base_url = Url::parse(&format!("{trimmed}/"))
            .with_context(|| format!("parse remote.url {trimmed:?}"))?;
        if !matches!(base_url.scheme(), "http" | "https") {
            bail!(
                "remote.url {trimmed:?} must use http or https, got {}",
                base_url.scheme()
            );
        }

        let mut headers = HeaderMap::new();
        let key = HeaderValue::from_str(api_key.trim()).context("encode api key header")?;
        let bearer = HeaderValue::from_str(&format!("Bearer {}", api_key.trim()))
            .context("encode authorization header")?;
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);

        let http = HttpClient::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()
            .context("build HTTP client")?;

        Ok(Self { base_url, http })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    pub fn from(&self, table: &str) -> TableRequest<'_> {
        TableRequest {
            client: self,
            table: table.to_owned(),
            columns: "*".to_owned(),
            filters: Vec::new(),
            order: None,
            limit: None,
        }
    }

    /// Confirms the store is reachable and the key can read categories.
    pub fn ping(&self) -> Result<()> {
        self.from(CATEGORIES_TABLE)
            .select("id")
            .limit(1)
            .fetch::<serde_json::Value>()
            .map(|_| ())
    }

    fn table_url(&self, table: &str) -> Result<Url> {
        self.base_url
            .join(&format!("{REST_PATH}/{table}"))
            .with_context(|| format!("build url for table {table}"))
    }

    fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .map_err(|error| connection_error(self.base_url(), error))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }
        Ok(response)
    }
}

/// One table query: `select`/`eq`/`order`/`limit` narrow it, then exactly one
/// of `fetch`, `insert`, `update` or `delete` sends it.
#[derive(Debug, Clone)]
pub struct TableRequest<'a> {
    client: &'a Client,
    table: String,
    columns: String,
    filters: Vec<(String, String)>,
    order: Option<(String, SortDirection)>,
    limit: Option<usize>,
}

impl TableRequest<'_> {
    pub fn select(mut self, columns: &str) -> Self {
        self.columns = columns.to_owned();
        self
    }

    pub fn eq(mut self, column: &str, value: &str) -> Self {
        self.filters
            .push((column.to_owned(), format!("eq.{value}")));
        self
    }

    pub fn order(mut self, column: &str, direction: SortDirection) -> Self {
        self.order = Some((column.to_owned(), direction));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn fetch<T: DeserializeOwned>(self) -> Result<Vec<T>> {
        let url = self.url(true)?;
        debug!(method = "GET", table = %self.table, "remote request");
        let response = self.client.send(self.client.http.get(url))?;
        response
            .json()
            .with_context(|| format!("decode {} rows", self.table))
    }

    /// Inserts one row and returns it as stored.
    pub fn insert<B: Serialize + ?Sized, T: DeserializeOwned>(self, row: &B) -> Result<T> {
        let url = self.url(true)?;
        debug!(method = "POST", table = %self.table, "remote request");
        let request = self
            .client
            .http
            .post(url)
            .header(PREFER, "return=representation")
            .header(ACCEPT, SINGLE_OBJECT)
            .json(row);
        let response = self.client.send(request)?;
        response
            .json()
            .with_context(|| format!("decode inserted {} row", self.table))
    }

    pub fn update<B: Serialize + ?Sized>(self, patch: &B) -> Result<()> {
        self.require_filter("update")?;
        let url = self.url(false)?;
        debug!(method = "PATCH", table = %self.table, "remote request");
        let request = self
            .client
            .http
            .patch(url)
            .header(PREFER, "return=minimal, count=exact")
            .json(patch);
        let response = self.client.send(request)?;
        self.require_match(&response)
    }

    pub fn delete(self) -> Result<()> {
        self.require_filter("delete")?;
        let url = self.url(false)?;
        debug!(method = "DELETE", table = %self.table, "remote request");
        let request = self
            .client
            .http
            .delete(url)
            .header(PREFER, "return=minimal, count=exact");
        let response = self.client.send(request)?;
        self.require_match(&response)
    }

    fn require_filter(&self, action: &str) -> Result<()> {
        if self.filters.is_empty() {
            bail!(
                "refusing to {action} every row of {} -- add an eq filter",
                self.table
            );
        }
        Ok(())
    }

    // The store reports affected rows as `Content-Range: */<count>`.
    fn require_match(&self, response: &Response) -> Result<()> {
        let total = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(|range| range.rsplit('/').next())
            .and_then(|count| count.parse::<u64>().ok());
        if total == Some(0) {
            bail!("no {} row matched {}", self.table, self.describe_filters());
        }
        Ok(())
    }

    fn describe_filters(&self) -> String {
        self.filters
            .iter()
            .map(|(column, value)| format!("{column}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    fn url(&self, with_select: bool) -> Result<Url> {
        let mut url = self.client.table_url(&self.table)?;
        {
            let mut query = url.query_pairs_mut();
            if with_select {
                query.append_pair("select", &self.columns);
            }
            for (column, value) in &self.filters {
                query.append_pair(column, value);
            }
            if let Some((column, direction)) = &self.order {
                query.append_pair("order", &format!("{column}.{}", direction.as_str()));
            }
            if let Some(limit) = self.limit {
                query.append_pair("limit", &limit.to_string());
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        Ok(url)
    }
}

impl CategoryRepository for Client {
    fn list_categories(&mut self) -> Result<Vec<Category>> {
        self.from(CATEGORIES_TABLE)
            .select("*")
            .order("created_at", SortDirection::Desc)
            .fetch()
    }

    fn insert_category(&mut self, category: &NewCategory) -> Result<Category> {
        self.from(CATEGORIES_TABLE).insert(category)
    }

    fn delete_category(&mut self, id: &CategoryId) -> Result<()> {
        self.from(CATEGORIES_TABLE).eq("id", id.as_str()).delete()
    }
}

impl ContactRepository for Client {
    fn list_contacts(&mut self, category_id: &CategoryId) -> Result<Vec<Contact>> {
        self.from(CONTACTS_TABLE)
            .select("*")
            .eq("category_id", category_id.as_str())
            .order("created_at", SortDirection::Desc)
            .fetch()
    }

    fn insert_contact(&mut self, contact: &NewContact) -> Result<Contact> {
        self.from(CONTACTS_TABLE).insert(contact)
    }

    fn update_contact(&mut self, id: &ContactId, update: &ContactUpdate) -> Result<()> {
        self.from(CONTACTS_TABLE).eq("id", id.as_str()).update(update)
    }

    fn delete_contact(&mut self, id: &ContactId) -> Result<()> {
        self.from(CONTACTS_TABLE).eq("id", id.as_str()).delete()
    }
}

fn connection_error(base_url: &str, error: reqwest::Error) -> anyhow::Error {
    anyhow!(
        "cannot reach {} -- check remote.url and your network ({})",
        base_url,
        error
    )
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<ErrorEnvelope>(body)
        && let Some(message) = parsed.message.filter(|message| !message.is_empty())
    {
        return match parsed.hint.filter(|hint| !hint.is_empty()) {
            Some(hint) => anyhow!("server error ({}): {message} -- {hint}", status.as_u16()),
            None => anyhow!("server error ({}): {message}", status.as_u16()),
        };
    }

    if body.len() < 100 && !body.contains('{') && !body.trim().is_empty() {
        return anyhow!("server error ({}): {}", status.as_u16(), body.trim());
    }

    anyhow!("server returned {}", status.as_u16())
}

#[derive(Debug, serde::Deserialize)]
struct ErrorEnvelope {
    message: Option<String>,
    hint: Option<String>,
}

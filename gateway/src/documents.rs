// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

//! Client for the documents API.

use std::sync::Arc;

use reqwest::{Method, Url};

use crate::error::GatewayError;
use crate::http::HttpClient;
use crate::request::{DocumentBody, EqualityQuery};
use crate::types::{Document, DocumentRaw};
use crate::value::{Fields, Value};

/// Client for collections of documents.
///
/// All requests carry the ID token of the signed-in user, if any. The
/// [`AuthClient`](crate::AuthClient) built by the same [`Gateway`](crate::Gateway)
/// shares the session with this client.
#[derive(Debug, Clone)]
pub struct DocumentClient {
    http: Arc<HttpClient>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListResponse {
    #[serde(default)]
    documents: Vec<DocumentRaw>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct QueryRow {
    #[serde(default)]
    document: Option<DocumentRaw>,
}

impl DocumentClient {
    pub(crate) const fn new(http: Arc<HttpClient>) -> Self {
        Self { http }
    }

    fn root_url(&self, suffix: &str) -> Result<Url, GatewayError> {
        let root = self.http.config().documents_root();
        Url::parse(&format!("{root}{suffix}"))
            .map_err(|e| GatewayError::Config(format!("invalid document store URL: {e}")))
    }

    /// Appends each segment percent-encoded, so `/`, `?` and `#` stay inside it.
    fn segments_url(&self, segments: &[&str]) -> Result<Url, GatewayError> {
        let mut url = self.root_url("")?;
        url.path_segments_mut()
            .map_err(|()| GatewayError::Config("document store URL has no path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn collection_url(&self, collection: &str) -> Result<Url, GatewayError> {
        self.segments_url(&[collection])
    }

    fn document_url(&self, collection: &str, id: &str) -> Result<Url, GatewayError> {
        check_document_id(id)?;
        self.segments_url(&[collection, id])
    }

    /// Lists every document of a collection, following page tokens.
    ///
    /// # Errors
    ///
    /// Returns an error if a request fails or the response is malformed.
    #[tracing::instrument(skip(self))]
    pub async fn list(&self, collection: &str) -> Result<Vec<Document>, GatewayError> {
        let url = self.collection_url(collection)?;
        let mut documents = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let resp = self
                .http
                .execute_as_user(Method::GET, url.clone(), |req| match &page_token {
                    Some(token) => req.query(&[("pageToken", token.as_str())]),
                    None => req,
                })
                .await?;
            let page: ListResponse = resp.json().await?;
            documents.extend(page.documents.into_iter().map(Document::from));

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        tracing::debug!(count = documents.len(), "listed documents");
        Ok(documents)
    }

    /// Lists documents of a collection whose `field` equals `value`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[tracing::instrument(skip(self, value))]
    pub async fn query_eq(
        &self,
        collection: &str,
        field: &str,
        value: Value,
    ) -> Result<Vec<Document>, GatewayError> {
        let url = self.root_url(":runQuery")?;
        let body = EqualityQuery::new(collection, field, value);
        let resp = self
            .http
            .execute_as_user(Method::POST, url, |req| req.json(&body))
            .await?;

        let rows: Vec<QueryRow> = resp.json().await?;
        Ok(rows
            .into_iter()
            .filter_map(|row| row.document.map(Document::from))
            .collect())
    }

    /// Fetches one document, returning `None` if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails for any reason other than a
    /// missing document.
    #[tracing::instrument(skip(self))]
    pub async fn get(&self, collection: &str, id: &str) -> Result<Option<Document>, GatewayError> {
        let url = self.document_url(collection, id)?;
        match self.http.execute_as_user(Method::GET, url, |req| req).await {
            Ok(resp) => {
                let raw: DocumentRaw = resp.json().await?;
                Ok(Some(raw.into()))
            }
            Err(GatewayError::NotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Adds a document with a server-generated id and returns that id.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response is malformed.
    #[tracing::instrument(skip(self, fields))]
    pub async fn add(&self, collection: &str, fields: &Fields) -> Result<String, GatewayError> {
        let url = self.collection_url(collection)?;
        let resp = self
            .http
            .execute_as_user(Method::POST, url, |req| req.json(&DocumentBody { fields }))
            .await?;

        let created: DocumentRaw = resp.json().await?;
        let doc = Document::from(created);
        if doc.id.is_empty() {
            return Err(GatewayError::InvalidResponse(
                "created document has no name".to_string(),
            ));
        }
        Ok(doc.id)
    }

    /// Writes a document under a known id, replacing all of its fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self, fields))]
    pub async fn set(&self, collection: &str, id: &str, fields: &Fields) -> Result<(), GatewayError> {
        let url = self.document_url(collection, id)?;
        self.http
            .execute_as_user(Method::PATCH, url, |req| req.json(&DocumentBody { fields }))
            .await?;
        Ok(())
    }

    /// Deletes a document.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[tracing::instrument(skip(self))]
    pub async fn delete(&self, collection: &str, id: &str) -> Result<(), GatewayError> {
        let url = self.document_url(collection, id)?;
        self.http.execute_as_user(Method::DELETE, url, |req| req).await?;
        Ok(())
    }
}

/// Ids are a single path segment, so they cannot be empty, contain `/`, or
/// be a dot segment.
fn check_document_id(id: &str) -> Result<(), GatewayError> {
    if id.is_empty() || id == "." || id == ".." || id.contains('/') {
        return Err(GatewayError::InvalidDocumentId(id.to_string()));
    }
    Ok(())
}

//! Structured-data details client.
//!
//! Enriches a batch of entity ids with hardware attributes via one SPARQL
//! query against the catalog's query service. The query binds every attribute
//! as OPTIONAL, so a sparsely described entity still comes back as a row with
//! absent fields rather than disappearing or failing.
//!
//! The query service gives no ordering promise, and it may emit several
//! binding rows for one entity when an attribute is multi-valued. Conversion
//! to [`DetailRow`]s therefore merges bindings by id (first value wins per
//! field) and leaves ordering to the canonical relevance order the
//! orchestrator carries separately.

use crate::client::{check_status, transport_error};
use crate::domain::error::Result;
use crate::domain::DetailRow;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

/// Service name used in error values and log fields.
const SERVICE: &str = "details query";

/// Awaitable port for batched attribute enrichment.
#[async_trait]
pub trait EntityDetails: Send + Sync {
    /// Fetches detail rows for the given entity ids.
    ///
    /// An empty `ids` batch returns an empty vector without issuing any
    /// request. Row order is unspecified; callers needing relevance order
    /// sort by their own canonical order.
    ///
    /// # Errors
    ///
    /// Rate limiting, timeout, and transport failures map onto the
    /// corresponding [`SpecScoutError`](crate::domain::SpecScoutError) kinds.
    /// Any failing chunk fails the whole call.
    async fn fetch_details(&self, ids: &[String]) -> Result<Vec<DetailRow>>;
}

/// Wire shape of a SPARQL JSON results envelope.
#[derive(Debug, Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Debug, Default, Deserialize)]
struct SparqlResults {
    #[serde(default)]
    bindings: Vec<DetailBinding>,
}

/// A single typed SPARQL term; only the lexical value matters here.
#[derive(Debug, Deserialize)]
struct SparqlValue {
    value: String,
}

/// One attribute-binding row as delivered by the query service.
#[derive(Debug, Deserialize)]
struct DetailBinding {
    item: SparqlValue,
    #[serde(rename = "itemLabel")]
    item_label: Option<SparqlValue>,
    #[serde(rename = "itemDescription")]
    item_description: Option<SparqlValue>,
    image: Option<SparqlValue>,
    #[serde(rename = "manufacturerLabel")]
    manufacturer_label: Option<SparqlValue>,
    #[serde(rename = "cpuLabel")]
    cpu_label: Option<SparqlValue>,
    cores: Option<SparqlValue>,
    threads: Option<SparqlValue>,
    ram: Option<SparqlValue>,
    inception: Option<SparqlValue>,
    #[serde(rename = "instanceOf")]
    instance_of: Option<SparqlValue>,
    #[serde(rename = "instanceOfLabel")]
    instance_of_label: Option<SparqlValue>,
}

/// Extracts the bare entity id from an entity URI.
///
/// The query service returns items as full URIs
/// (`http://www.wikidata.org/entity/Q2044`); everything downstream keys on
/// the trailing id.
fn entity_id(uri: &str) -> &str {
    uri.rsplit('/').next().unwrap_or(uri)
}

/// Builds the batched details query for a set of entity ids.
///
/// `label_languages` is the label-service preference list, primary first
/// (e.g. `"en,he"`). All attributes are OPTIONAL so sparse entities still
/// produce a row.
fn build_details_query(ids: &[String], label_languages: &str) -> String {
    let values = ids
        .iter()
        .map(|id| format!("wd:{id}"))
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "SELECT DISTINCT ?item ?itemLabel ?itemDescription ?image ?manufacturerLabel \
         ?cpuLabel ?cores ?threads ?ram ?inception ?instanceOf ?instanceOfLabel WHERE {{\n\
         VALUES ?item {{ {values} }}\n\
         OPTIONAL {{ ?item wdt:P176 ?manufacturer. }}\n\
         OPTIONAL {{ ?item wdt:P880 ?cpu. }}\n\
         OPTIONAL {{ ?item wdt:P1141 ?cores. }}\n\
         OPTIONAL {{ ?item wdt:P7443 ?threads. }}\n\
         OPTIONAL {{ ?item wdt:P13525 ?ram. }}\n\
         OPTIONAL {{ ?item wdt:P571 ?inception. }}\n\
         OPTIONAL {{ ?item wdt:P18 ?image. }}\n\
         OPTIONAL {{ ?item wdt:P31 ?instanceOf. }}\n\
         SERVICE wikibase:label {{ bd:serviceParam wikibase:language \"{label_languages}\". }}\n\
         }}"
    )
}

fn binding_to_row(binding: DetailBinding) -> DetailRow {
    let value = |v: Option<SparqlValue>| v.map(|v| v.value);

    DetailRow {
        id: entity_id(&binding.item.value).to_string(),
        label: value(binding.item_label),
        description: value(binding.item_description),
        image_url: value(binding.image),
        manufacturer: value(binding.manufacturer_label),
        cpu: value(binding.cpu_label),
        cores: binding.cores.and_then(|v| v.value.parse().ok()),
        threads: binding.threads.and_then(|v| v.value.parse().ok()),
        ram: value(binding.ram),
        inception: value(binding.inception),
        category_id: binding
            .instance_of
            .map(|v| entity_id(&v.value).to_string()),
        category_label: value(binding.instance_of_label),
    }
}

/// Splits an id batch into chunks and collects the per-chunk bindings.
///
/// Chunks are fetched sequentially through `fetch`; the first failing chunk
/// aborts the whole call, so a partial batch never escapes. Chunk order
/// follows id order, which keeps cross-chunk duplicate bindings mergeable by
/// [`merge_bindings`] exactly as within-chunk ones.
async fn fetch_chunked<F, Fut>(
    ids: &[String],
    chunk_size: usize,
    fetch: F,
) -> Result<Vec<DetailBinding>>
where
    F: Fn(Vec<String>) -> Fut,
    Fut: Future<Output = Result<Vec<DetailBinding>>>,
{
    let mut bindings = Vec::new();
    for chunk in ids.chunks(chunk_size.max(1)) {
        bindings.extend(fetch(chunk.to_vec()).await?);
    }
    Ok(bindings)
}

/// Merges binding rows into one [`DetailRow`] per entity id.
///
/// Input order is preserved for first occurrences; duplicate ids only fill
/// fields the earlier row left absent.
fn merge_bindings(bindings: Vec<DetailBinding>) -> Vec<DetailRow> {
    let mut rows: Vec<DetailRow> = Vec::new();
    let mut index_by_id: HashMap<String, usize> = HashMap::new();

    for binding in bindings {
        let row = binding_to_row(binding);
        match index_by_id.get(&row.id) {
            Some(&i) => rows[i].fill_missing_from(&row),
            None => {
                index_by_id.insert(row.id.clone(), rows.len());
                rows.push(row);
            }
        }
    }

    rows
}

/// Client for the Wikidata SPARQL query service.
///
/// Carries the longer of the two pipeline timeout budgets: the details query
/// joins several optional attributes and is noticeably heavier than the text
/// search. Batches above `chunk_size` ids are split into sequential requests
/// to stay under the query service's practical query-size ceiling.
pub struct WikidataDetailsClient {
    http: reqwest::Client,
    endpoint: String,
    label_languages: String,
    chunk_size: usize,
}

impl WikidataDetailsClient {
    /// Creates a client for the given SPARQL endpoint.
    ///
    /// `label_languages` is the label preference list, primary language
    /// first. `chunk_size` caps the ids per request; it must be non-zero.
    ///
    /// # Errors
    ///
    /// Returns a network error if the underlying HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        label_languages: impl Into<String>,
        chunk_size: usize,
        timeout: Duration,
    ) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| crate::domain::SpecScoutError::Network(format!("http client: {e}")))?;

        Ok(Self {
            http,
            endpoint: endpoint.into(),
            label_languages: label_languages.into(),
            chunk_size: chunk_size.max(1),
        })
    }

    async fn fetch_chunk(&self, ids: &[String]) -> Result<Vec<DetailBinding>> {
        let query = build_details_query(ids, &self.label_languages);

        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("query", query.as_str()), ("format", "json")])
            .header("Accept", "application/sparql-results+json")
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, &e))?;

        let response = check_status(SERVICE, response)?;

        let body: SparqlResponse = response
            .json()
            .await
            .map_err(|e| transport_error(SERVICE, &e))?;

        Ok(body.results.bindings)
    }
}

#[async_trait]
impl EntityDetails for WikidataDetailsClient {
    async fn fetch_details(&self, ids: &[String]) -> Result<Vec<DetailRow>> {
        // An empty VALUES clause is a malformed query; skip the wire entirely.
        if ids.is_empty() {
            tracing::debug!("empty id batch, skipping details request");
            return Ok(Vec::new());
        }

        tracing::debug!(
            ids = ids.len(),
            chunk_size = self.chunk_size,
            "fetching details"
        );

        let bindings = fetch_chunked(ids, self.chunk_size, |chunk| async move {
            self.fetch_chunk(&chunk).await
        })
        .await?;

        let rows = merge_bindings(bindings);
        tracing::debug!(rows = rows.len(), "details fetched");
        Ok(rows)
    }
}

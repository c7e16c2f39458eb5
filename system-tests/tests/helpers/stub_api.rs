// system-tests/tests/helpers/stub_api.rs
// ============================================================================
// Module: Products API Stub
// Description: In-process stand-in for the remote Products API.
// Purpose: Run the scenario suite offline against the same wire contract.
// Dependencies: tiny_http, products-contract, time, url
// ============================================================================

//! ## Overview
//! The stub serves the example catalog from `products-contract` over
//! `tiny_http` on an ephemeral loopback port. It reproduces the remote
//! contract the scenarios rely on: paging with `limit`/`skip`, `select`
//! projection, `sortBy`/`order`, search over title and description, category
//! filters, and simulated writes that validate their bodies but never persist.
//!
//! Identifiers are echoed in not-found messages exactly as received.

use std::cmp::Ordering;
use std::io::Cursor;
use std::io::Read;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use products_client::ProductId;
use products_contract::examples::catalog_example;
use products_contract::examples::categories_example;
use products_contract::examples::category_list_example;
use products_contract::schemas;
use products_contract::types::product_not_found_message;
use serde_json::Map;
use serde_json::Value;
use serde_json::json;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tiny_http::Header;
use tiny_http::Method;
use tiny_http::Request;
use tiny_http::Response;
use tiny_http::Server;
use url::Url;

/// Page size applied when `limit` is absent.
pub const DEFAULT_LIMIT: usize = 30;

/// Request line observed by the stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StubRequest {
    /// HTTP method.
    pub method: String,
    /// Raw request target (path and query).
    pub url: String,
}

/// Handle for a running stub; the server stops when the handle drops.
pub struct StubApiHandle {
    base_url: String,
    server: Arc<Server>,
    join: Option<thread::JoinHandle<()>>,
    requests: Arc<Mutex<Vec<StubRequest>>>,
}

impl StubApiHandle {
    /// Returns the stub base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns every request served so far.
    pub fn requests(&self) -> Vec<StubRequest> {
        self.requests.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }
}

impl Drop for StubApiHandle {
    fn drop(&mut self) {
        self.server.unblock();
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Starts a stub Products API on a free loopback port.
pub fn spawn_stub_api() -> Result<StubApiHandle, String> {
    let server =
        Server::http("127.0.0.1:0").map_err(|err| format!("stub api bind failed: {err}"))?;
    let addr = server
        .server_addr()
        .to_ip()
        .ok_or_else(|| "stub api is not bound to an IP address".to_string())?;
    let base_url = format!("http://{addr}");
    let server = Arc::new(server);
    let requests = Arc::new(Mutex::new(Vec::new()));

    let state = StubState {
        base_url: base_url.clone(),
        catalog: catalog_example()
            .iter()
            .filter_map(|product| match serde_json::to_value(product) {
                Ok(Value::Object(map)) => Some(map),
                _ => None,
            })
            .collect(),
    };
    let join = {
        let server = Arc::clone(&server);
        let requests = Arc::clone(&requests);
        thread::spawn(move || {
            while let Ok(request) = server.recv() {
                if let Ok(mut log) = requests.lock() {
                    log.push(StubRequest {
                        method: request.method().to_string(),
                        url: request.url().to_string(),
                    });
                }
                state.serve(request);
            }
        })
    };
    Ok(StubApiHandle {
        base_url,
        server,
        join: Some(join),
        requests,
    })
}

// ============================================================================
// SECTION: Routing
// ============================================================================

struct StubState {
    base_url: String,
    catalog: Vec<Map<String, Value>>,
}

type Reply = (u16, Value);

impl StubState {
    fn serve(&self, mut request: Request) {
        let mut body = Vec::new();
        let _ = request.as_reader().read_to_end(&mut body);
        let (status, payload) = match Url::parse(&format!("http://stub{}", request.url())) {
            Ok(url) => self.route(request.method(), &url, &body),
            Err(err) => error(400, &format!("malformed request target: {err}")),
        };
        let _ = request.respond(json_response(status, &payload));
    }

    fn route(&self, method: &Method, url: &Url, body: &[u8]) -> Reply {
        let segments: Vec<&str> =
            url.path_segments().map(Iterator::collect).unwrap_or_default();
        let query: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        match (method, segments.as_slice()) {
            (Method::Get, ["products"]) => self.page(self.catalog.clone(), &query),
            (Method::Get, ["products", "search"]) => {
                let needle = param(&query, "q").unwrap_or_default().to_lowercase();
                let hits = self
                    .catalog
                    .iter()
                    .filter(|product| {
                        ["title", "description"].iter().any(|field| {
                            product
                                .get(*field)
                                .and_then(Value::as_str)
                                .is_some_and(|text| text.to_lowercase().contains(&needle))
                        })
                    })
                    .cloned()
                    .collect();
                self.page(hits, &query)
            }
            (Method::Get, ["products", "categories"]) => {
                (200, json!(categories_example(&self.base_url)))
            }
            (Method::Get, ["products", "category-list"]) => (200, json!(category_list_example())),
            (Method::Get, ["products", "category", slug]) => {
                let hits = self
                    .catalog
                    .iter()
                    .filter(|product| {
                        product.get("category").and_then(Value::as_str) == Some(*slug)
                    })
                    .cloned()
                    .collect();
                self.page(hits, &query)
            }
            (Method::Get, ["products", id]) => match self.find(id) {
                Some(product) => (200, Value::Object(product.clone())),
                None => not_found(id),
            },
            (Method::Post, ["products", "add"]) => self.add(body),
            (Method::Put, ["products", id]) => self.update(id, body),
            (Method::Delete, ["products", id]) => self.delete(id),
            _ => error(404, &format!("route {} {} not found", method, url.path())),
        }
    }

    fn find(&self, id: &str) -> Option<&Map<String, Value>> {
        let id = ProductId::from(id).as_positive()?;
        self.catalog.iter().find(|product| product.get("id").and_then(Value::as_u64) == Some(id))
    }

    // ------------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------------

    fn page(&self, mut products: Vec<Map<String, Value>>, query: &[(String, String)]) -> Reply {
        let total = products.len();
        if let Some(field) = param(query, "sortBy") {
            products.sort_by(|a, b| compare(a.get(field), b.get(field)));
            if param(query, "order") == Some("desc") {
                products.reverse();
            }
        }
        let skip = param(query, "skip").and_then(|raw| raw.parse().ok()).unwrap_or(0);
        let limit = match param(query, "limit").and_then(|raw| raw.parse().ok()) {
            Some(0) => usize::MAX,
            Some(limit) => limit,
            None => DEFAULT_LIMIT,
        };
        let selected: Option<Vec<&str>> =
            param(query, "select").map(|raw| raw.split(',').map(str::trim).collect());
        let page: Vec<Value> = products
            .into_iter()
            .skip(skip)
            .take(limit)
            .map(|product| match &selected {
                Some(fields) => Value::Object(
                    product
                        .into_iter()
                        .filter(|(name, _)| name == "id" || fields.contains(&name.as_str()))
                        .collect(),
                ),
                None => Value::Object(product),
            })
            .collect();
        let returned = page.len();
        (200, json!({"products": page, "total": total, "skip": skip, "limit": returned}))
    }

    // ------------------------------------------------------------------------
    // Simulated Writes
    // ------------------------------------------------------------------------

    fn add(&self, body: &[u8]) -> Reply {
        let mut fields = match write_body(body) {
            Ok(fields) => fields,
            Err(reply) => return reply,
        };
        fields.insert("id".to_string(), json!(self.catalog.len() + 1));
        (201, Value::Object(fields))
    }

    fn update(&self, id: &str, body: &[u8]) -> Reply {
        let Some(existing) = self.find(id) else {
            return not_found(id);
        };
        let fields = match write_body(body) {
            Ok(fields) => fields,
            Err(reply) => return reply,
        };
        let mut merged = existing.clone();
        merged.extend(fields.into_iter().filter(|(name, _)| name != "id"));
        (200, Value::Object(merged))
    }

    fn delete(&self, id: &str) -> Reply {
        let Some(existing) = self.find(id) else {
            return not_found(id);
        };
        let mut deleted = existing.clone();
        deleted.insert("isDeleted".to_string(), Value::Bool(true));
        let now = OffsetDateTime::now_utc().format(&Rfc3339).unwrap_or_default();
        deleted.insert("deletedOn".to_string(), Value::String(now));
        (200, Value::Object(deleted))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses and type-checks a create or update body.
fn write_body(body: &[u8]) -> Result<Map<String, Value>, Reply> {
    let fields = match serde_json::from_slice(body) {
        Ok(Value::Object(fields)) => fields,
        Ok(_) => return Err(error(400, "request body must be a JSON object")),
        Err(err) => return Err(error(400, &format!("request body is not JSON: {err}"))),
    };
    let mut probe = fields.clone();
    probe.insert("id".to_string(), json!(1));
    match schemas::updated_product().violations(&Value::Object(probe)).first() {
        Some(violation) => Err(error(400, &format!("invalid field {violation}"))),
        None => Ok(fields),
    }
}

fn param<'a>(query: &'a [(String, String)], name: &str) -> Option<&'a str> {
    query.iter().find(|(key, _)| key == name).map(|(_, value)| value.as_str())
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(a)), Some(Value::Number(b))) => {
            a.as_f64().partial_cmp(&b.as_f64()).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(a)), Some(Value::String(b))) => a.cmp(b),
        _ => Ordering::Equal,
    }
}

fn not_found(id: &str) -> Reply {
    error(404, &product_not_found_message(id))
}

fn error(status: u16, message: &str) -> Reply {
    (status, json!({"message": message}))
}

fn json_response(status: u16, payload: &Value) -> Response<Cursor<Vec<u8>>> {
    let bytes = serde_json::to_vec(payload).unwrap_or_default();
    let response = Response::from_data(bytes).with_status_code(status);
    match Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]) {
        Ok(header) => response.with_header(header),
        Err(()) => response,
    }
}

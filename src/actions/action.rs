use crate::actions::{BULK_LIMIT, NEAREST_LIMIT, OUTCODE_RADIUS_M, QUERY_LIMIT, REVERSE_RADIUS_M};
use crate::api::{Request, segment};
use regex::Regex;
use serde_json::{Value, json};
use std::sync::LazyLock;

/// Bulk lookup entries are separated by newlines or commas.
static BULK_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n,]").expect("bulk separator regex"));

/// One user action with its raw (untrimmed) form inputs.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    LookupPostcode { postcode: String },
    ValidatePostcode { postcode: String },
    QueryPostcodes { query: String },
    BulkLookup { input: String },
    /// `outcode` is an optional filter; empty means any postcode.
    RandomPostcode { outcode: String },
    Autocomplete { partial: String },
    NearestPostcodes { postcode: String },
    ReverseGeocode { lat: String, lon: String },
    /// `input` is JSON text: an array of `{latitude, longitude, ...}` objects.
    BulkReverseGeocode { input: String },
    ReverseOutcode { lat: String, lon: String },
    LookupOutcode { outcode: String },
    NearestOutcodes { outcode: String },
    LookupPlace { code: String },
    QueryPlaces { query: String },
    RandomPlace,
    TerminatedPostcode { postcode: String },
    ScottishPostcode { postcode: String },
}

/// What to do before any request goes out.
#[derive(Debug, Clone, PartialEq)]
pub enum Prepared {
    /// A required input is empty: leave the results area alone.
    Skip,
    /// Input was rejected client-side: show this error, send nothing.
    Reject(String),
    Send(Request),
}

/// Trimmed input, or `None` when nothing is left.
pub(crate) fn required(raw: &str) -> Option<&str> {
    let s = raw.trim();
    if s.is_empty() { None } else { Some(s) }
}

fn send_if(raw: &str, build: impl FnOnce(&str) -> Request) -> Prepared {
    match required(raw) {
        Some(s) => Prepared::Send(build(s)),
        None => Prepared::Skip,
    }
}

fn send_if_both(a: &str, b: &str, build: impl FnOnce(&str, &str) -> Request) -> Prepared {
    match (required(a), required(b)) {
        (Some(a), Some(b)) => Prepared::Send(build(a, b)),
        _ => Prepared::Skip,
    }
}

/// Split bulk input into trimmed, non-empty postcodes.
pub fn split_bulk_input(input: &str) -> Vec<String> {
    BULK_SEPARATOR
        .split(input)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

impl Action {
    /// Short stable name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Action::LookupPostcode { .. } => "lookup",
            Action::ValidatePostcode { .. } => "validate",
            Action::QueryPostcodes { .. } => "query",
            Action::BulkLookup { .. } => "bulk",
            Action::RandomPostcode { .. } => "random",
            Action::Autocomplete { .. } => "autocomplete",
            Action::NearestPostcodes { .. } => "nearest",
            Action::ReverseGeocode { .. } => "reverse",
            Action::BulkReverseGeocode { .. } => "bulk-reverse",
            Action::ReverseOutcode { .. } => "reverse-outcode",
            Action::LookupOutcode { .. } => "outcode",
            Action::NearestOutcodes { .. } => "nearest-outcodes",
            Action::LookupPlace { .. } => "place",
            Action::QueryPlaces { .. } => "places",
            Action::RandomPlace => "random-place",
            Action::TerminatedPostcode { .. } => "terminated",
            Action::ScottishPostcode { .. } => "scotland",
        }
    }

    pub fn prepare(&self) -> Prepared {
        match self {
            Action::LookupPostcode { postcode } => {
                send_if(postcode, |p| Request::get(format!("/postcodes/{}", segment(p))))
            }
            Action::ValidatePostcode { postcode } => send_if(postcode, |p| {
                Request::get(format!("/postcodes/{}/validate", segment(p)))
            }),
            Action::QueryPostcodes { query } => send_if(query, |q| {
                Request::get("/postcodes")
                    .param("q", q)
                    .param("limit", QUERY_LIMIT.to_string())
            }),
            Action::BulkLookup { input } => {
                let postcodes = split_bulk_input(input);
                if postcodes.is_empty() {
                    Prepared::Skip
                } else if postcodes.len() > BULK_LIMIT {
                    Prepared::Reject(format!(
                        "Bulk lookup is limited to {} postcodes (got {})",
                        BULK_LIMIT,
                        postcodes.len()
                    ))
                } else {
                    Prepared::Send(Request::post("/postcodes", json!({ "postcodes": postcodes })))
                }
            }
            Action::RandomPostcode { outcode } => {
                let req = Request::get("/random/postcodes");
                Prepared::Send(match required(outcode) {
                    Some(o) => req.param("outcode", o),
                    None => req,
                })
            }
            Action::Autocomplete { partial } => send_if(partial, |p| {
                Request::get(format!("/postcodes/{}/autocomplete", segment(p)))
                    .param("limit", QUERY_LIMIT.to_string())
            }),
            Action::NearestPostcodes { postcode } => send_if(postcode, |p| {
                Request::get(format!("/postcodes/{}/nearest", segment(p)))
                    .param("limit", NEAREST_LIMIT.to_string())
            }),
            Action::ReverseGeocode { lat, lon } => send_if_both(lat, lon, |lat, lon| {
                Request::get("/postcodes")
                    .param("lat", lat)
                    .param("lon", lon)
                    .param("limit", NEAREST_LIMIT.to_string())
                    .param("radius", REVERSE_RADIUS_M.to_string())
            }),
            Action::BulkReverseGeocode { input } => {
                let Some(text) = required(input) else {
                    return Prepared::Skip;
                };
                match serde_json::from_str::<Value>(text) {
                    Err(e) => Prepared::Reject(format!("Invalid JSON for geolocations: {}", e)),
                    Ok(v @ Value::Array(_)) => {
                        Prepared::Send(Request::post("/postcodes", json!({ "geolocations": v })))
                    }
                    Ok(_) => Prepared::Reject("Geolocations must be a JSON array".to_string()),
                }
            }
            Action::ReverseOutcode { lat, lon } => send_if_both(lat, lon, |lat, lon| {
                Request::get("/outcodes")
                    .param("lat", lat)
                    .param("lon", lon)
                    .param("limit", NEAREST_LIMIT.to_string())
                    .param("radius", OUTCODE_RADIUS_M.to_string())
            }),
            Action::LookupOutcode { outcode } => {
                send_if(outcode, |o| Request::get(format!("/outcodes/{}", segment(o))))
            }
            Action::NearestOutcodes { outcode } => send_if(outcode, |o| {
                Request::get(format!("/outcodes/{}/nearest", segment(o)))
                    .param("limit", NEAREST_LIMIT.to_string())
            }),
            Action::LookupPlace { code } => {
                send_if(code, |c| Request::get(format!("/places/{}", segment(c))))
            }
            Action::QueryPlaces { query } => send_if(query, |q| {
                Request::get("/places")
                    .param("q", q)
                    .param("limit", QUERY_LIMIT.to_string())
            }),
            Action::RandomPlace => Prepared::Send(Request::get("/random/places")),
            Action::TerminatedPostcode { postcode } => send_if(postcode, |p| {
                Request::get(format!("/terminated_postcodes/{}", segment(p)))
            }),
            Action::ScottishPostcode { postcode } => send_if(postcode, |p| {
                Request::get(format!("/scotland/postcodes/{}", segment(p)))
            }),
        }
    }
}

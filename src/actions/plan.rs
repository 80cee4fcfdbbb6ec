use crate::actions::Action;
use crate::actions::action::required;
use crate::api::Envelope;
use crate::render::{Card, Renderable};
use serde_json::Value;

/// What a handler should put into the results area for one response.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderPlan {
    Cards(Vec<Card>),
    Error(String),
}

fn field<'a>(v: &'a Value, key: &str) -> Option<&'a str> {
    v.get(key).and_then(Value::as_str)
}

/// Trimmed input, uppercased for titles and messages.
fn upper(raw: &str) -> String {
    required(raw).unwrap_or_default().to_uppercase()
}

/// `r.key` uppercased, or the uppercased input when the result lacks it.
fn upper_field(r: &Value, key: &str, raw: &str) -> String {
    field(r, key)
        .map(str::to_uppercase)
        .unwrap_or_else(|| upper(raw))
}

/// `status == 200` with a non-null result: one card.
fn single(env: &Envelope, title: impl FnOnce(&Value) -> String, fallback: String) -> RenderPlan {
    match (&env.result, env.is_ok()) {
        (Some(result), true) => RenderPlan::Cards(vec![Card::new(title(result), result.into())]),
        _ => RenderPlan::Error(env.error_or(fallback)),
    }
}

/// `status == 200` with a non-empty array result: one card per item.
fn many(env: &Envelope, title: impl Fn(usize, &Value) -> String, fallback: String) -> RenderPlan {
    match env.items() {
        Some(items) if env.is_ok() => RenderPlan::Cards(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| Card::new(title(i + 1, item), item.into()))
                .collect(),
        ),
        _ => RenderPlan::Error(env.error_or(fallback)),
    }
}

/// `status == 200` with an array result, possibly empty.
fn every(env: &Envelope, title: impl Fn(usize, &Value) -> String, fallback: String) -> RenderPlan {
    match env.result.as_ref().and_then(Value::as_array) {
        Some(items) if env.is_ok() => RenderPlan::Cards(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| Card::new(title(i + 1, item), item.into()))
                .collect(),
        ),
        _ => RenderPlan::Error(env.error_or(fallback)),
    }
}

/// `"{prefix}: {item.key}"`, or `"Result N"` when the item has no such string.
fn titled_by<'a>(prefix: &'a str, key: &'a str) -> impl Fn(usize, &Value) -> String + 'a {
    move |n: usize, item: &Value| match field(item, key) {
        Some(v) => format!("{}: {}", prefix, v),
        None => format!("Result {}", n),
    }
}

impl Action {
    /// Interpret a parsed response body for this action.
    pub fn plan(&self, response: &Value) -> RenderPlan {
        let env = Envelope::from_value(response);
        match self {
            Action::LookupPostcode { postcode } => single(
                &env,
                |r| format!("Postcode: {}", upper_field(r, "postcode", postcode)),
                format!("Postcode {} not found", upper(postcode)),
            ),
            Action::ValidatePostcode { postcode } => {
                match env.result.as_ref().and_then(Value::as_bool) {
                    Some(valid) => RenderPlan::Cards(vec![Card::new(
                        format!("Validate: {}", upper(postcode)),
                        Renderable::Mapping(vec![
                            (
                                "postcode".to_string(),
                                Renderable::scalar(required(postcode).unwrap_or_default()),
                            ),
                            ("valid".to_string(), Renderable::boolean(valid)),
                        ]),
                    )]),
                    None => RenderPlan::Error(
                        env.error_or(format!("Could not validate postcode {}", upper(postcode))),
                    ),
                }
            }
            Action::QueryPostcodes { query } => many(
                &env,
                titled_by("Postcode", "postcode"),
                format!("No postcodes found for \"{}\"", required(query).unwrap_or_default()),
            ),
            Action::BulkLookup { .. } => every(
                &env,
                |n, item| match field(item, "query") {
                    Some(q) => format!("Bulk Lookup: {}", q),
                    None => format!("Bulk Lookup Result {}", n),
                },
                "Bulk lookup returned no results".to_string(),
            ),
            Action::RandomPostcode { outcode } => single(
                &env,
                |r| match field(r, "postcode") {
                    Some(p) => format!("Random Postcode: {}", p),
                    None => "Random Postcode".to_string(),
                },
                match required(outcode) {
                    Some(o) => format!("No random postcode found in outcode {}", o.to_uppercase()),
                    None => "No random postcode found".to_string(),
                },
            ),
            Action::Autocomplete { partial } => many(
                &env,
                |n, item| match item.as_str() {
                    Some(s) => format!("Suggestion {}: {}", n, s),
                    None => format!("Suggestion {}", n),
                },
                format!("No autocomplete suggestions for {}", upper(partial)),
            ),
            Action::NearestPostcodes { postcode } => many(
                &env,
                titled_by("Nearest", "postcode"),
                format!("No nearest postcodes found for {}", upper(postcode)),
            ),
            Action::ReverseGeocode { lat, lon } => many(
                &env,
                titled_by("Reverse", "postcode"),
                format!(
                    "No postcodes found near {}, {}",
                    required(lat).unwrap_or_default(),
                    required(lon).unwrap_or_default()
                ),
            ),
            // Each item carries its own `query`, but titles stay positional.
            Action::BulkReverseGeocode { .. } => every(
                &env,
                |n, _| format!("Bulk Reverse Result {}", n),
                "Bulk reverse geocode returned no results".to_string(),
            ),
            Action::ReverseOutcode { lat, lon } => many(
                &env,
                titled_by("Outcode", "outcode"),
                format!(
                    "No outcodes found near {}, {}",
                    required(lat).unwrap_or_default(),
                    required(lon).unwrap_or_default()
                ),
            ),
            Action::LookupOutcode { outcode } => single(
                &env,
                |r| format!("Outcode: {}", upper_field(r, "outcode", outcode)),
                format!("Outcode {} not found", upper(outcode)),
            ),
            Action::NearestOutcodes { outcode } => many(
                &env,
                titled_by("Nearest Outcode", "outcode"),
                format!("No nearest outcodes found for {}", upper(outcode)),
            ),
            Action::LookupPlace { code } => single(
                &env,
                |r| {
                    let name = field(r, "name_1").unwrap_or(required(code).unwrap_or_default());
                    format!("Place: {}", name)
                },
                format!("Place {} not found", required(code).unwrap_or_default()),
            ),
            Action::QueryPlaces { query } => many(
                &env,
                titled_by("Place", "name_1"),
                format!("No places found for \"{}\"", required(query).unwrap_or_default()),
            ),
            Action::RandomPlace => single(
                &env,
                |r| match field(r, "name_1") {
                    Some(name) => format!("Random Place: {}", name),
                    None => "Random Place".to_string(),
                },
                "No random place found".to_string(),
            ),
            Action::TerminatedPostcode { postcode } => single(
                &env,
                |r| format!("Terminated Postcode: {}", upper_field(r, "postcode", postcode)),
                format!("Terminated postcode {} not found", upper(postcode)),
            ),
            Action::ScottishPostcode { postcode } => single(
                &env,
                |r| format!("Scottish Postcode: {}", upper_field(r, "postcode", postcode)),
                format!("Scottish postcode {} not found", upper(postcode)),
            ),
        }
    }
}

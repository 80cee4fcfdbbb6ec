use crate::actions::{Action, Prepared, RenderPlan};
use crate::api::{Transport, dispatch};
use crate::render::ResultsArea;
use tracing::{debug, info};

/// Run one action end to end against `area`.
///
/// Never fails: transport errors, API errors and rejected input all end up
/// as a single error card. A skipped action leaves `area` untouched.
pub fn handle(action: &Action, transport: &dyn Transport, base: &str, area: &mut ResultsArea) {
    let request = match action.prepare() {
        Prepared::Skip => {
            debug!(action = action.name(), "required input empty, skipping");
            return;
        }
        Prepared::Reject(message) => {
            debug!(action = action.name(), %message, "input rejected");
            area.clear_results();
            area.render_error(message);
            return;
        }
        Prepared::Send(request) => request,
    };

    area.clear_results();
    match dispatch(transport, base, &request) {
        Ok(body) => match action.plan(&body) {
            RenderPlan::Cards(cards) => {
                info!(action = action.name(), cards = cards.len(), "rendering results");
                for card in cards {
                    area.render_card(card.title, card.value);
                }
            }
            RenderPlan::Error(message) => area.render_error(message),
        },
        Err(e) => area.render_error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::DispatchError;
    use pretty_assertions::assert_eq;
    use serde_json::{Value, json};
    use std::cell::RefCell;
    use std::collections::VecDeque;

    const BASE: &str = "http://api.test";

    /// Replays canned responses in order and records every call.
    #[derive(Default)]
    struct FakeTransport {
        responses: RefCell<VecDeque<Result<Value, DispatchError>>>,
        calls: RefCell<Vec<(String, Option<Value>)>>,
    }

    impl FakeTransport {
        fn with(responses: Vec<Result<Value, DispatchError>>) -> Self {
            Self {
                responses: RefCell::new(responses.into()),
                calls: RefCell::default(),
            }
        }

        fn next(&self) -> Result<Value, DispatchError> {
            self.responses
                .borrow_mut()
                .pop_front()
                .expect("unexpected request")
        }

        fn calls(&self) -> Vec<(String, Option<Value>)> {
            self.calls.borrow().clone()
        }
    }

    impl Transport for FakeTransport {
        fn get_json(&self, url: &str) -> Result<Value, DispatchError> {
            self.calls.borrow_mut().push((url.to_string(), None));
            self.next()
        }

        fn post_json(&self, url: &str, payload: &Value) -> Result<Value, DispatchError> {
            self.calls
                .borrow_mut()
                .push((url.to_string(), Some(payload.clone())));
            self.next()
        }
    }

    fn titles(area: &ResultsArea) -> Vec<&str> {
        area.cards().iter().map(|c| c.title.as_str()).collect()
    }

    #[test]
    fn lookup_success_renders_one_card() {
        let transport = FakeTransport::with(vec![Ok(json!({
            "status": 200,
            "result": {"postcode": "SW1A 1AA", "country": "England"}
        }))]);
        let mut area = ResultsArea::new();
        area.render_card("stale", crate::render::Renderable::Null);

        handle(
            &Action::LookupPostcode { postcode: "sw1a 1aa".into() },
            &transport,
            BASE,
            &mut area,
        );

        assert_eq!(titles(&area), vec!["Postcode: SW1A 1AA"]);
        assert!(
            area.to_markup()
                .contains(r#"<strong>country</strong>: <span class="value">England</span>"#)
        );
        assert_eq!(
            transport.calls(),
            vec![("http://api.test/postcodes/sw1a%201aa".to_string(), None)]
        );
    }

    #[test]
    fn api_error_renders_single_error_card_and_stops() {
        let transport =
            FakeTransport::with(vec![Ok(json!({"status": 404, "error": "Postcode not found"}))]);
        let mut area = ResultsArea::new();

        handle(
            &Action::LookupPostcode { postcode: "XX1 1XX".into() },
            &transport,
            BASE,
            &mut area,
        );

        assert_eq!(area.cards().len(), 1);
        assert_eq!(area.cards()[0].title, "Error");
        assert!(area.to_markup().contains("Postcode not found"));
        assert_eq!(transport.calls().len(), 1);
    }

    #[test]
    fn transport_failure_renders_its_message() {
        let transport = FakeTransport::with(vec![Err(DispatchError::Status {
            code: 500,
            text: "Internal Server Error".into(),
            api_error: None,
        })]);
        let mut area = ResultsArea::new();

        handle(&Action::RandomPlace, &transport, BASE, &mut area);

        assert_eq!(area.to_text(), "== Error\nerror: HTTP 500 Internal Server Error\n");
    }

    #[test]
    fn bulk_over_limit_makes_no_request() {
        let transport = FakeTransport::default();
        let mut area = ResultsArea::new();
        let input = (0..101).map(|i| format!("AB{} 1CD", i)).collect::<Vec<_>>().join("\n");

        handle(&Action::BulkLookup { input }, &transport, BASE, &mut area);

        assert_eq!(transport.calls().len(), 0);
        assert_eq!(area.cards().len(), 1);
        assert!(area.to_text().contains("limited to 100 postcodes"));
    }

    #[test]
    fn bulk_reverse_with_invalid_json_makes_no_request() {
        let transport = FakeTransport::default();
        let mut area = ResultsArea::new();

        handle(
            &Action::BulkReverseGeocode { input: "not json".into() },
            &transport,
            BASE,
            &mut area,
        );

        assert_eq!(transport.calls().len(), 0);
        assert_eq!(titles(&area), vec!["Error"]);
        assert!(area.to_text().contains("Invalid JSON"));
    }

    #[test]
    fn empty_input_leaves_area_untouched() {
        let transport = FakeTransport::default();
        let mut area = ResultsArea::new();
        area.render_card("previous", crate::render::Renderable::Null);

        handle(&Action::NearestPostcodes { postcode: "  ".into() }, &transport, BASE, &mut area);

        assert_eq!(titles(&area), vec!["previous"]);
        assert_eq!(transport.calls().len(), 0);
    }

    #[test]
    fn bulk_lookup_posts_payload_and_renders_each_item() {
        let transport = FakeTransport::with(vec![Ok(json!({
            "status": 200,
            "result": [
                {"query": "OX49 5NU", "result": {"postcode": "OX49 5NU"}},
                {"query": "NOPE", "result": null}
            ]
        }))]);
        let mut area = ResultsArea::new();

        handle(
            &Action::BulkLookup { input: "OX49 5NU,\nNOPE".into() },
            &transport,
            BASE,
            &mut area,
        );

        assert_eq!(titles(&area), vec!["Bulk Lookup: OX49 5NU", "Bulk Lookup: NOPE"]);
        assert_eq!(
            transport.calls(),
            vec![(
                "http://api.test/postcodes".to_string(),
                Some(json!({"postcodes": ["OX49 5NU", "NOPE"]}))
            )]
        );
    }

    #[test]
    fn back_to_back_actions_each_request_and_last_one_wins() {
        let transport = FakeTransport::with(vec![
            Ok(json!({"status": 200, "result": {"outcode": "SW1A"}})),
            Ok(json!({"status": 200, "result": [{"postcode": "E1 6AN"}, {"postcode": "E1 6AW"}]})),
        ]);
        let mut area = ResultsArea::new();

        handle(&Action::LookupOutcode { outcode: "sw1a".into() }, &transport, BASE, &mut area);
        let nearest = Action::NearestPostcodes { postcode: "E1 6AN".into() };
        handle(&nearest, &transport, BASE, &mut area);

        assert_eq!(transport.calls().len(), 2);
        assert_eq!(titles(&area), vec!["Nearest: E1 6AN", "Nearest: E1 6AW"]);
    }
}

use crate::render::{Renderable, escape, render, render_text};
use serde::Serialize;
use serde::ser::{SerializeStruct, Serializer};

pub const ERROR_TITLE: &str = "Error";

/// A titled display block holding one API result or one error.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub value: Renderable,
}

impl Card {
    pub fn new(title: impl Into<String>, value: Renderable) -> Self {
        Self {
            title: title.into(),
            value,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(
            ERROR_TITLE,
            Renderable::entry("error", Renderable::scalar(message)),
        )
    }

    pub fn to_markup(&self) -> String {
        format!(
            r#"<div class="card"><h3>{}</h3>{}</div>"#,
            escape(&self.title),
            render(&self.value)
        )
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("Card", 2)?;
        s.serialize_field("title", &self.title)?;
        s.serialize_field("value", &self.value.to_json())?;
        s.end()
    }
}

/// The visible results surface. Cards stay in the order they were added.
///
/// Handlers get it as `&mut`, so two handlers can never interleave their
/// clear/append sequences on the same area.
#[derive(Debug, Default)]
pub struct ResultsArea {
    cards: Vec<Card>,
}

impl ResultsArea {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render_card(&mut self, title: impl Into<String>, value: Renderable) {
        self.cards.push(Card::new(title, value));
    }

    pub fn render_error(&mut self, message: impl Into<String>) {
        self.cards.push(Card::error(message));
    }

    pub fn clear_results(&mut self) {
        self.cards.clear();
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn to_markup(&self) -> String {
        self.cards.iter().map(Card::to_markup).collect()
    }

    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            out.push_str("== ");
            out.push_str(&card.title);
            out.push('\n');
            out.push_str(&render_text(&card.value));
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.cards)
    }
}

// src/render.rs
//! Turns a [`SessionState`] into something drawable. Nothing here touches the
//! terminal; [`Frame::transcript_lines`] and [`InputBar::line`] produce plain
//! text that the front end writes out.

use crate::message::{Message, PropertyListing, Sender};
use crate::services::widget::SessionState;

pub const HEADER: &str = "🏡 Real Estate Assistant";
pub const GREETING: &str = "Hello! I'm your real estate assistant. How can I help you today?";
pub const EXAMPLE_PROMPTS: [&str; 3] = [
    "Find me a 3 bedroom house under $300,000",
    "Show me 2 bed apartments in New York",
    "What's the market like in Miami?",
];
pub const PLACEHOLDER: &str = "Type your message here...";
pub const SIZE_FALLBACK: &str = "Size not available";
pub const PRICE_FALLBACK: &str = "Price not available";

#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub header: &'static str,
    pub body: Body,
    pub typing: bool,
    pub input: InputBar,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Welcome,
    Transcript(Vec<MessageView>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MessageView {
    pub sender: Sender,
    pub text: String,
    pub cards: Vec<PropertyCard>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyCard {
    pub title: String,
    pub rooms: String,
    pub size: String,
    pub price: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputBar {
    pub text: String,
    pub placeholder: Option<&'static str>,
    pub input_enabled: bool,
    pub button_label: &'static str,
    pub button_enabled: bool,
}

pub fn render(state: &SessionState) -> Frame {
    let body = if state.messages.is_empty() {
        Body::Welcome
    } else {
        Body::Transcript(state.messages.iter().map(render_message).collect())
    };

    Frame {
        header: HEADER,
        body,
        typing: state.loading,
        input: InputBar {
            text: state.input.clone(),
            placeholder: state.input.is_empty().then_some(PLACEHOLDER),
            input_enabled: !state.loading,
            button_label: if state.loading { "Sending..." } else { "Send" },
            button_enabled: !state.loading && !state.input.trim().is_empty(),
        },
    }
}

pub fn render_message(message: &Message) -> MessageView {
    let cards = match message.sender {
        Sender::User => Vec::new(),
        Sender::Bot => message.properties().iter().map(PropertyCard::from).collect(),
    };
    MessageView { sender: message.sender, text: message.text.clone(), cards }
}

impl From<&PropertyListing> for PropertyCard {
    fn from(p: &PropertyListing) -> Self {
        Self {
            title: format!("{}, {}", p.city, p.state),
            rooms: format!("{} bed, {} bath", count(p.bed), count(p.bath)),
            size: match nonzero(p.house_size) {
                Some(size) => format!("{} sqft", format_number(size)),
                None => SIZE_FALLBACK.to_string(),
            },
            price: match nonzero(p.price) {
                Some(price) => format!("${}", format_number(price)),
                None => PRICE_FALLBACK.to_string(),
            },
        }
    }
}

fn nonzero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && v.is_finite())
}

fn count(value: Option<f64>) -> String {
    value.map_or_else(|| "?".to_string(), |v| v.to_string())
}

/// en-US style grouping: `,` every three digits, up to three decimals with
/// trailing zeros dropped.
pub fn format_number(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    let abs = rounded.abs();
    let whole = abs.trunc();

    let digits = format!("{whole:.0}");
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let fraction = format!("{:.3}", abs - whole);
    let fraction = fraction.trim_end_matches('0').trim_end_matches('.');
    if let Some(decimals) = fraction.strip_prefix('0') {
        grouped.push_str(decimals);
    }

    if rounded < 0.0 {
        grouped.insert(0, '-');
    }
    grouped
}

const TYPING_FRAMES: [&str; 3] = ["●∙∙", "∙●∙", "∙∙●"];

impl Frame {
    pub fn card_count(&self) -> usize {
        match &self.body {
            Body::Welcome => 0,
            Body::Transcript(views) => views.iter().map(|v| v.cards.len()).sum(),
        }
    }

    /// Everything above the input bar. `tick` animates the typing indicator.
    pub fn transcript_lines(&self, tick: usize) -> Vec<String> {
        let mut lines = vec![self.header.to_string(), "─".repeat(40)];

        match &self.body {
            Body::Welcome => {
                lines.push(GREETING.to_string());
                lines.push("Try asking:".to_string());
                lines.extend(EXAMPLE_PROMPTS.iter().map(|p| format!("  • \"{p}\"")));
            }
            Body::Transcript(views) => {
                for view in views {
                    view.push_lines(&mut lines);
                }
            }
        }

        if self.typing {
            lines.push(format!("Bot: {}", TYPING_FRAMES[tick % TYPING_FRAMES.len()]));
        }
        lines
    }
}

impl MessageView {
    fn push_lines(&self, lines: &mut Vec<String>) {
        let label = match self.sender {
            Sender::User => "You: ",
            Sender::Bot => "Bot: ",
        };
        let mut text = self.text.lines();
        lines.push(format!("{label}{}", text.next().unwrap_or_default()));
        lines.extend(text.map(|l| format!("     {l}")));

        for card in &self.cards {
            lines.push(format!("     ┌ {}", card.title));
            lines.push(format!("     │ 🏠 {}", card.rooms));
            lines.push(format!("     │ 📏 {}", card.size));
            lines.push(format!("     └ 💰 {}", card.price));
        }
    }
}

impl InputBar {
    pub fn line(&self) -> String {
        let shown = self.placeholder.unwrap_or(self.text.as_str());
        let button = if self.button_enabled {
            format!("[{}]", self.button_label)
        } else {
            format!("({})", self.button_label)
        };
        if self.input_enabled {
            format!("{shown}  {button}")
        } else {
            format!("{shown}  {button}  input disabled")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ResponseData;

    fn listing(size: Option<f64>, price: Option<f64>) -> PropertyListing {
        PropertyListing {
            city: "Denver".into(),
            state: "CO".into(),
            bed: Some(4.0),
            bath: Some(2.5),
            house_size: size,
            price,
        }
    }

    #[test]
    fn groups_thousands() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(999.0), "999");
        assert_eq!(format_number(1500.0), "1,500");
        assert_eq!(format_number(280000.0), "280,000");
        assert_eq!(format_number(1234567.0), "1,234,567");
        assert_eq!(format_number(1234.5), "1,234.5");
        assert_eq!(format_number(0.12345), "0.123");
        assert_eq!(format_number(-4200.0), "-4,200");
    }

    #[test]
    fn card_falls_back_for_missing_size_and_price() {
        let card = PropertyCard::from(&listing(None, Some(0.0)));
        assert_eq!(card.title, "Denver, CO");
        assert_eq!(card.rooms, "4 bed, 2.5 bath");
        assert_eq!(card.size, SIZE_FALLBACK);
        assert_eq!(card.price, PRICE_FALLBACK);
    }

    #[test]
    fn welcome_panel_when_empty() {
        let frame = render(&SessionState::default());
        assert_eq!(frame.body, Body::Welcome);
        let lines = frame.transcript_lines(0);
        assert!(lines.contains(&GREETING.to_string()));
        assert_eq!(lines.iter().filter(|l| l.starts_with("  • ")).count(), 3);
        assert_eq!(frame.input.placeholder, Some(PLACEHOLDER));
        assert!(!frame.input.button_enabled);
    }

    #[test]
    fn user_messages_never_get_cards() {
        let mut msg = Message::user("3 bed");
        msg.data = Some(ResponseData { properties: vec![listing(None, None)] });
        assert!(render_message(&msg).cards.is_empty());
    }

    #[test]
    fn typing_indicator_and_disabled_controls_while_loading() {
        let state = SessionState {
            messages: vec![Message::user("hi")],
            input: String::new(),
            loading: true,
        };
        let frame = render(&state);
        assert!(frame.typing);
        assert!(!frame.input.input_enabled);
        assert!(!frame.input.button_enabled);
        assert_eq!(frame.input.button_label, "Sending...");
        let lines = frame.transcript_lines(1);
        assert_eq!(lines.last().map(String::as_str), Some("Bot: ∙●∙"));
    }

    #[test]
    fn multiline_bot_text_is_indented() {
        let view = render_message(&Message::bot("Here:\n- one\n- two", None));
        let mut lines = Vec::new();
        view.push_lines(&mut lines);
        assert_eq!(lines, vec!["Bot: Here:", "     - one", "     - two"]);
    }
}

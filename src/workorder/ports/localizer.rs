//! Port for localizing the open/closed wording in order labels.

/// State token rendered inside a service-order label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStateToken {
    /// The order is open.
    Open,
    /// The order is closed.
    Close,
}

/// Supplies the human-readable wording for order state tokens.
pub trait Localizer: Send + Sync {
    /// Renders a state token in the target language.
    fn localize(&self, token: OrderStateToken) -> String;
}

/// English wording, the default for composed labels.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnglishLocalizer;

impl Localizer for EnglishLocalizer {
    fn localize(&self, token: OrderStateToken) -> String {
        match token {
            OrderStateToken::Open => "Open".to_owned(),
            OrderStateToken::Close => "Close".to_owned(),
        }
    }
}

// Detection model value objects

use serde::{Deserialize, Serialize};

/// One of the three backend detection algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelKind {
    Wash,
    Funding,
    Cooperative,
}

impl ModelKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModelKind::Wash => "wash",
            ModelKind::Funding => "funding",
            ModelKind::Cooperative => "cooperative",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "wash" => Some(ModelKind::Wash),
            "funding" => Some(ModelKind::Funding),
            "cooperative" => Some(ModelKind::Cooperative),
            _ => None,
        }
    }
}

/// Model selection for list queries and ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModelFilter {
    #[default]
    All,
    Only(ModelKind),
}

impl ModelFilter {
    pub fn matches(&self, model: ModelKind) -> bool {
        match self {
            ModelFilter::All => true,
            ModelFilter::Only(kind) => *kind == model,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        if value.eq_ignore_ascii_case("all") {
            return Some(ModelFilter::All);
        }
        ModelKind::parse(value).map(ModelFilter::Only)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_matches_all_or_one() {
        assert!(ModelFilter::All.matches(ModelKind::Wash));
        assert!(ModelFilter::Only(ModelKind::Funding).matches(ModelKind::Funding));
        assert!(!ModelFilter::Only(ModelKind::Funding).matches(ModelKind::Cooperative));
    }

    #[test]
    fn parses_wire_strings() {
        assert_eq!(ModelKind::parse("WASH"), Some(ModelKind::Wash));
        assert_eq!(ModelFilter::parse("all"), Some(ModelFilter::All));
        assert_eq!(
            ModelFilter::parse("cooperative"),
            Some(ModelFilter::Only(ModelKind::Cooperative))
        );
        assert_eq!(ModelFilter::parse("bogus"), None);
    }
}

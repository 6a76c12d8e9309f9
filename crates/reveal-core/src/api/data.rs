use serde::{Deserialize, Serialize};

/// External data bundle produced by the page-generation backend.
/// Supplied to the widget exactly once, before interaction is enabled;
/// immutable after load.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RevealData {
    /// Candidate names, used only for decorative reel filler.
    #[serde(default)]
    pub names: Vec<String>,
    /// The server-assigned name to reveal, when present.
    #[serde(default)]
    pub assigned: Option<String>,
}

impl RevealData {
    /// Parse the bundle from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_bundle() {
        let json = r#"{ "names": ["Ana", "Luis", "Marta"], "assigned": "Luis" }"#;
        let data = RevealData::from_json(json).unwrap();
        assert_eq!(data.names.len(), 3);
        assert_eq!(data.assigned.as_deref(), Some("Luis"));
    }

    #[test]
    fn parse_without_assignment() {
        let json = r#"{ "names": ["Ana"] }"#;
        let data = RevealData::from_json(json).unwrap();
        assert_eq!(data.names, vec!["Ana"]);
        assert_eq!(data.assigned, None);
    }

    #[test]
    fn parse_empty_object() {
        let data = RevealData::from_json("{}").unwrap();
        assert!(data.names.is_empty());
        assert!(data.assigned.is_none());
    }

    #[test]
    fn reject_malformed_json() {
        assert!(RevealData::from_json("not json").is_err());
    }
}

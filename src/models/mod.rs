//! Manifest and locale data structures

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Contents of a `_locales/<locale>/messages.json` file.
pub type LocaleMessages = HashMap<String, LocaleMessage>;

/// The subset of the extension manifest this tool reads. Everything else
/// rides along in `extra` untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_locale: Option<String>,

    // web_accessible_resources deliberately lives in `extra`: the
    // sanitizer edits it as text, and typing it here would reject the
    // MV3 object form this tool otherwise leaves untouched.
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocaleMessage {
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_fields_are_preserved() {
        let json = r#"{
            "name": "Test",
            "version": "1.0",
            "permissions": ["tabs"]
        }"#;

        let manifest: Manifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("Test"));
        assert!(manifest.extra.contains_key("permissions"));
    }

    #[test]
    fn test_mv3_resource_objects_parse() {
        let json = r#"{
            "name": "Test",
            "web_accessible_resources": [
                {"resources": ["a.html"], "matches": ["<all_urls>"]}
            ]
        }"#;

        let manifest: Manifest = serde_json::from_str(json).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("Test"));
        assert!(manifest.extra.contains_key("web_accessible_resources"));
    }

    #[test]
    fn test_locale_messages_parse() {
        let json = r#"{
            "extName": { "message": "My Extension", "description": "title" },
            "other": { "message": "x" }
        }"#;

        let messages: LocaleMessages = serde_json::from_str(json).unwrap();
        assert_eq!(messages["extName"].message, "My Extension");
        assert_eq!(messages["other"].description, None);
    }
}

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Manifest filename every installed game directory must contain.
pub const GAME_MANIFEST: &str = "game.json";

/// Entry-point identifier assumed when the manifest omits one.
pub const DEFAULT_ENTRY_POINT: &str = "main";

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("malformed manifest: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("missing required field: name")]
    MissingName,
}

/// Declarative descriptor shipped inside every game package.
///
/// `name` is the only mandatory field and doubles as the primary key
/// within the installed set; everything else is presentation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameManifest {
    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Identifier the host resolves to a registered game factory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_point: Option<String>,

    /// Icon path relative to the game directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
}

impl GameManifest {
    /// Parses and validates a raw manifest document.
    ///
    /// A document that is not well-formed JSON yields
    /// [`ManifestError::Malformed`]; a well-formed document without a
    /// non-empty `name` yields [`ManifestError::MissingName`].
    pub fn parse(bytes: &[u8]) -> Result<Self, ManifestError> {
        let manifest: Self = serde_json::from_slice(bytes)?;
        if manifest.name.trim().is_empty() {
            return Err(ManifestError::MissingName);
        }
        Ok(manifest)
    }

    pub fn entry_point(&self) -> &str {
        self.entry_point.as_deref().unwrap_or(DEFAULT_ENTRY_POINT)
    }

    /// Title shown to users, falling back to the machine name.
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.name)
    }

    /// Key used when ordering listings. Untitled games sort first.
    pub fn sort_title(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }
}

impl Display for GameManifest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.version {
            Some(version) => write!(f, "{} (v{})", self.name, version),
            None => write!(f, "{}", self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_manifest() {
        let raw = br#"{
            "name": "mygame",
            "title": "My Game",
            "description": "A tiny game",
            "version": "1.2.0",
            "author": "someone",
            "entry_point": "builtin:clicker",
            "icon": "assets/thumbnail.png"
        }"#;
        let manifest = GameManifest::parse(raw).unwrap();
        assert_eq!(manifest.name, "mygame");
        assert_eq!(manifest.title.as_deref(), Some("My Game"));
        assert_eq!(manifest.entry_point(), "builtin:clicker");
        assert_eq!(manifest.to_string(), "mygame (v1.2.0)");
    }

    #[test]
    fn name_round_trips() {
        let raw = br#"{"name":"mygame","title":"My Game"}"#;
        let manifest = GameManifest::parse(raw).unwrap();
        let serialized = serde_json::to_vec(&manifest).unwrap();
        let reparsed = GameManifest::parse(&serialized).unwrap();
        assert_eq!(reparsed.name, manifest.name);
        assert_eq!(reparsed, manifest);
    }

    #[test]
    fn missing_name_is_rejected() {
        let err = GameManifest::parse(br#"{"title":"Nameless"}"#).unwrap_err();
        assert!(matches!(err, ManifestError::MissingName));

        let err = GameManifest::parse(br#"{"name":"  "}"#).unwrap_err();
        assert!(matches!(err, ManifestError::MissingName));
    }

    #[test]
    fn malformed_document_is_rejected() {
        let err = GameManifest::parse(b"not json at all").unwrap_err();
        assert!(matches!(err, ManifestError::Malformed(_)));
    }

    #[test]
    fn entry_point_defaults_to_main() {
        let manifest = GameManifest::parse(br#"{"name":"mygame"}"#).unwrap();
        assert_eq!(manifest.entry_point(), "main");
    }
}

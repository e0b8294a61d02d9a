use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::components::vsimem::normalize_extension;

/// Options recognized by a read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReadOptions {
    /// Widen three classified bands to four components, the fourth left at the default alpha.
    pub map_rgb_to_rgba_hint: bool,
    /// Extension of buffer and stream sources, drives the backend's driver selection.
    pub extension_hint: Option<String>,
    /// Directories searched for relative paths that do not exist as given.
    pub paths: Vec<PathBuf>,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            map_rgb_to_rgba_hint: true,
            extension_hint: None,
            paths: Vec::new(),
        }
    }
}

impl ReadOptions {
    pub fn with_extension_hint(mut self, extension: impl AsRef<str>) -> Self {
        self.extension_hint = Some(normalize_extension(extension.as_ref()));
        self
    }

    pub fn with_rgb_to_rgba(mut self, map_rgb_to_rgba: bool) -> Self {
        self.map_rgb_to_rgba_hint = map_rgb_to_rgba;
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.paths.push(path.into());
        self
    }

    /// Extension hint with one leading dot, if any.
    pub fn extension(&self) -> Option<String> {
        self.extension_hint
            .as_deref()
            .filter(|extension| !extension.trim_start_matches('.').is_empty())
            .map(normalize_extension)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn promotion_is_on_by_default() {
        let options = ReadOptions::default();
        assert!(options.map_rgb_to_rgba_hint);
        assert!(options.extension().is_none());
    }

    #[rstest]
    fn missing_fields_take_defaults() {
        let options: ReadOptions = serde_json::from_str(r#"{"extension_hint": "tif"}"#).unwrap();
        assert!(options.map_rgb_to_rgba_hint);
        assert_eq!(options.extension().as_deref(), Some(".tif"));
    }

    #[rstest]
    fn promotion_can_be_disabled() {
        let options: ReadOptions =
            serde_json::from_str(r#"{"map_rgb_to_rgba_hint": false, "paths": ["/data"]}"#).unwrap();
        assert!(!options.map_rgb_to_rgba_hint);
        assert_eq!(options.paths, vec![PathBuf::from("/data")]);
    }

    #[rstest]
    #[case(".", None)]
    #[case("", None)]
    #[case("PNG", Some(".PNG"))]
    fn extension_hints(#[case] hint: &str, #[case] expected: Option<&str>) {
        let options = ReadOptions {
            extension_hint: Some(hint.into()),
            ..Default::default()
        };
        assert_eq!(options.extension().as_deref(), expected);
    }
}

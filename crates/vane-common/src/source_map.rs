//! Side-file source maps for raw-mode string-literal rewriting (spec.md §6).
//!
//! When the raw backend rewrites a string literal that names a
//! source-language file (`"build.vn"` → `"build.zig"`), it records the
//! rewrite site so the driver can emit a `.wmmap.json` next to the emitted
//! file. This is not a general source map for the whole module — only for
//! these specific string-literal rewrites.

use serde::{Deserialize, Serialize};

/// One rewritten string-literal site.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceMapping {
    /// 0-indexed line in the generated file.
    pub gen_line: u32,
    /// 0-indexed column in the generated file.
    pub gen_col: u32,
    /// Original source-language file the literal referred to.
    pub src_file: String,
    /// 0-indexed line in the original source.
    pub src_line: u32,
    /// 0-indexed column in the original source.
    pub src_col: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src_line_text: Option<String>,
}

/// The `.wmmap.json` document shape.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceMapFile {
    pub version: u32,
    pub file: String,
    pub mappings: Vec<SourceMapping>,
}

impl SourceMapFile {
    #[must_use]
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            version: 1,
            file: file.into(),
            mappings: Vec::new(),
        }
    }

    pub fn push(&mut self, mapping: SourceMapping) {
        self.mappings.push(mapping);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// Serialize to the `.wmmap.json` text written next to the emitted file.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
#[path = "../tests/source_map.rs"]
mod tests;

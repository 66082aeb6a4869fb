use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// A half-open source range. `startLine`/`endLine` are 1-based; columns are
/// 0-based, matching editor and LSP conventions rather than tree-sitter's
/// raw byte offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file_path: PathBuf,
    pub start_line: u32,
    pub start_column: u32,
    pub end_line: u32,
    pub end_column: u32,
}

impl SourceLocation {
    pub fn new(
        file_path: impl Into<PathBuf>,
        start_line: u32,
        start_column: u32,
        end_line: u32,
        end_column: u32,
    ) -> Self {
        debug_assert!(start_line >= 1, "start_line is 1-based");
        debug_assert!(end_line >= start_line, "ranges are never inverted");
        Self {
            file_path: file_path.into(),
            start_line,
            start_column,
            end_line,
            end_column,
        }
    }

    /// A zeroed location for synthetic symbols (stdlib providers).
    pub fn synthetic() -> Self {
        Self {
            file_path: PathBuf::from("<lang-stdlib>"),
            start_line: 0,
            start_column: 0,
            end_line: 0,
            end_column: 0,
        }
    }
}

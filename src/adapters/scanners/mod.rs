//! Filesystem detectors implementing the [`Scanner`] port.
//!
//! Each detector walks the tree for its extensions, reads files line by
//! line, and emits quest definitions in traversal order. The same type
//! re-inspects an accepted quest for verification.
//!
//! [`Scanner`]: crate::domain::ports::Scanner

pub mod missing_docs;
pub mod registry;
pub mod todo_hunter;

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::warn;

pub use missing_docs::MissingDocsScanner;
pub use missing_tests::MissingTestsScanner;
pub use registry::{ScannerFilter, ScannerRegistry};
pub use todo_hunter::TodoHunterScanner;

/// Exported function, class, or binding; group 1 is the symbol name.
pub(crate) static EXPORT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^export\s+(?:async\s+)?(?:function|class|const|let)\s+(\w+)")
        .expect("export pattern is valid")
});

/// Read `relative` under `root` and split it on `\n`.
///
/// Returns `None` (after logging) when the file cannot be read.
pub(crate) async fn read_lines(root: &Path, relative: &str) -> Option<Vec<String>> {
    let path = root.join(relative);
    match tokio::fs::read_to_string(&path).await {
        Ok(content) => Some(content.split('\n').map(str::to_string).collect()),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "skipping unreadable file");
            None
        }
    }
}

/// Whether the declaration at `index` has a non-empty `/** ... */` block above it.
///
/// Blank lines between the block and the declaration are allowed.
pub(crate) fn has_doc_block_above(lines: &[String], index: usize) -> bool {
    let Some(end) = lines[..index]
        .iter()
        .rposition(|line| !line.trim().is_empty())
    else {
        return false;
    };

    if !lines[end].trim().ends_with("*/") {
        return false;
    }

    lines[..=end]
        .iter()
        .rposition(|line| line.contains("/**"))
        .is_some_and(|start| doc_block_has_content(&lines[start..=end]))
}

fn doc_block_has_content(block: &[String]) -> bool {
    block.iter().any(|line| {
        let stripped = line.replace("/**", "").replace("*/", "");
        !stripped.trim().trim_start_matches('*').trim().is_empty()
    })
}

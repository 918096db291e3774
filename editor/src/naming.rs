//! Sibling key helpers

use std::path::Path;

/// Whether a proposed key should be ignored
pub fn is_blank(name: &str) -> bool {
    name.trim().is_empty()
}

/// First free key in the sequence `base`, `base1`, `base2`, ...
pub fn unique_key(base: &str, mut is_taken: impl FnMut(&str) -> bool) -> String {
    if !is_taken(base) {
        return base.to_string();
    }
    let mut suffix: u64 = 1;
    loop {
        let candidate = format!("{base}{suffix}");
        if !is_taken(&candidate) {
            return candidate;
        }
        suffix += 1;
    }
}

/// Default key for a node instantiated from the resource at `path`
pub fn key_for_resource(path: &str) -> String {
    Path::new(path)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !is_blank(stem))
        .unwrap_or_else(|| "Scene".to_string())
}

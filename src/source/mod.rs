use crate::error::Result;
use std::fs;
use std::path::Path;

/// Replace the first occurrence of `selection` in `file` with `reference`.
///
/// Returns `false` and leaves the file alone when the selection is not found.
pub fn replace_selection(file: &Path, selection: &str, reference: &str) -> Result<bool> {
    if selection.is_empty() {
        return Ok(false);
    }
    let content = fs::read_to_string(file)?;
    let Some(start) = content.find(selection) else {
        return Ok(false);
    };

    let mut updated = String::with_capacity(content.len() + reference.len());
    updated.push_str(&content[..start]);
    updated.push_str(reference);
    updated.push_str(&content[start + selection.len()..]);
    fs::write(file, updated)?;
    Ok(true)
}

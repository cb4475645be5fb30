//! Text conventions shared by both renderers

use doc_model::ListKind;

/// Bullet marker for unordered list items
pub const BULLET_PREFIX: &str = "• ";

/// Marker placed before a list item's text. `index` is 0-based.
pub fn list_prefix(kind: ListKind, index: usize) -> String {
    match kind {
        ListKind::Unordered => BULLET_PREFIX.to_string(),
        ListKind::Ordered => format!("{}. ", index + 1),
    }
}

/// Placeholder text drawn in place of an image
pub fn image_placeholder(alt: &str) -> String {
    format!("[Image: {}]", alt)
}

use std::path::PathBuf;

/// Split a drag-and-drop payload into paths.
///
/// Desktop drop targets hand over one string in which paths containing
/// spaces are wrapped in braces, e.g. `{C:/My Textures/frame.png} gear.png`.
/// Brace groups become one path each; everything else is split on
/// whitespace. An unterminated brace group runs to the end of the payload.
pub fn split_drop_payload(payload: &str) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut rest = payload.trim();

    while !rest.is_empty() {
        let (item, tail) = if let Some(inner) = rest.strip_prefix('{') {
            match inner.find('}') {
                Some(end) => (&inner[..end], &inner[end + 1..]),
                None => (inner, ""),
            }
        } else {
            match rest.find(char::is_whitespace) {
                Some(end) => (&rest[..end], &rest[end..]),
                None => (rest, ""),
            }
        };

        let item = item.trim();
        if !item.is_empty() {
            paths.push(PathBuf::from(item));
        }
        rest = tail.trim_start();
    }

    paths
}

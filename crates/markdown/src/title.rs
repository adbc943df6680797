/// Splits a leading `# Title` line off a card.
///
/// The title is the first non-blank line when it starts with `# ` and has
/// non-empty text; the returned body is everything after that line. Otherwise
/// the whole input is returned as the body.
pub fn split_title(raw: &str) -> (Option<&str>, &str) {
    let mut offset = 0;
    for line in raw.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        if content.trim().is_empty() {
            offset += line.len();
            continue;
        }
        if let Some(title) = content.trim_start().strip_prefix("# ") {
            let title = title.trim();
            if !title.is_empty() {
                return (Some(title), &raw[offset + line.len()..]);
            }
        }
        break;
    }
    (None, raw)
}

/// Heading line that separates a card's front from its back in a card file.
pub const BACK_SIDE_HEADING: &str = "## Back Side";

/// Splits a card file at its first `## Back Side` line.
///
/// Returns the front and, when the heading is present and followed by
/// non-blank text, the back. The heading line itself belongs to neither side.
pub fn split_back_side(raw: &str) -> (&str, Option<&str>) {
    let mut offset = 0;
    for line in raw.split_inclusive('\n') {
        if line.trim() == BACK_SIDE_HEADING {
            let front = &raw[..offset];
            let back = &raw[offset + line.len()..];
            return (front, (!back.trim().is_empty()).then_some(back));
        }
        offset += line.len();
    }
    (raw, None)
}

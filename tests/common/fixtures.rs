#![allow(dead_code)]

use cardify::CardifyConfig;

pub const CAVEMAN: &str =
    "**Caveman syndrome**: humans prefer *physical* texture. #psychology #evolution";

pub const SAMPLE_CARD: &str = "# Sample Card\n\n\
    A short note about **one** idea.\n\
    - first point\n\
    - second point\n\n\
    #zettelkasten #notes";

/// 3x2in cards on landscape Letter with half-inch margins: a 2x3 grid of
/// 240x270pt slots.
pub fn six_up_config() -> CardifyConfig {
    CardifyConfig::from_json_str(
        r#"{
            "cardWidth": "3in",
            "cardHeight": "2in",
            "pageSize": "letter",
            "pageOrientation": "landscape",
            "pageMargins": "0.5in",
            "gridRows": 2,
            "gridCols": 3,
            "mode": "batch-grid"
        }"#,
    )
    .expect("valid fixture config")
}

/// Numbered one-line cards.
pub fn numbered(n: usize) -> Vec<String> {
    (1..=n).map(|i| format!("Card number {}", i)).collect()
}

/// Text long enough to overflow a default 3x5 card.
pub fn overlong_text() -> String {
    (1..=20).map(|i| format!("Line {}", i)).collect::<Vec<_>>().join("\n")
}

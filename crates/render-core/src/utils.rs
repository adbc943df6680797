use cardify_layout::StandardFont;

/// Resource name under which each standard font is registered in a page's
/// font dictionary.
pub fn font_resource_name(font: StandardFont) -> &'static str {
    match font {
        StandardFont::Helvetica => "F1",
        StandardFont::HelveticaBold => "F2",
        StandardFont::HelveticaOblique => "F3",
        StandardFont::HelveticaBoldOblique => "F4",
    }
}

/// Convert layout Y coordinate to PDF Y coordinate (flip origin)
pub fn flip_y(y: f32, page_height: f32) -> f32 {
    page_height - y
}

//! Output formatting utilities

/// Format a byte count as kilobytes with one decimal, e.g. `12.5 KB`.
#[allow(clippy::cast_precision_loss)]
pub fn format_kib(bytes: u64) -> String {
    format!("{:.1} KB", bytes as f64 / 1024.0)
}

/// Convert a hyphen-case identifier into a display title.
///
/// `my-api-helper` becomes `My Api Helper`.
pub fn title_case(identifier: &str) -> String {
    identifier
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

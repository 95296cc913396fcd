use ammonia;

/// Clean HTML content using the ammonia library.
///
/// Quiz and event descriptions are authored by staff and may carry basic
/// markup; this strips dangerous tags (like <script>, <iframe>) and
/// attributes (like onclick) while preserving safe formatting tags.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

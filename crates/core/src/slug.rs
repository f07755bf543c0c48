//! URL slug generation for posts and tutorials.

/// Generate a URL-safe slug from a title.
///
/// Lowercases ASCII letters, folds every run of non-alphanumeric
/// characters into a single `-`, and trims leading/trailing dashes.
///
/// # Examples
///
/// ```
/// use devdocs_core::slug::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Async Rust -- a Primer!"), "async-rust-a-primer");
/// ```
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

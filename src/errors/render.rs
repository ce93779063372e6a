//! Formatting helpers shared by the plain and verbose renderings

use std::fmt::Display;

/// Render items as a bracketed, comma-separated list: `[a, b]`
pub fn bracketed<I, F, T>(items: I, render: F) -> String
where
    I: IntoIterator<Item = T>,
    F: Fn(T) -> String,
{
    let parts: Vec<String> = items.into_iter().map(render).collect();
    format!("[{}]", parts.join(", "))
}

/// Render strings as a bracketed list of double-quoted entries: `["a", "b"]`
pub fn quoted_list<T: Display>(items: &[T]) -> String {
    bracketed(items, |item| format!("\"{}\"", item))
}

/// Quoted list with the quotes removed again, as used by the plain form
pub fn unquoted_list<T: Display>(items: &[T]) -> String {
    quoted_list(items).replace('"', "")
}

//! Markup cleanup for TVMaze summaries
//!
//! TVMaze summaries are short HTML fragments. Only paragraph and bold tags
//! are removed; this is not an HTML parser and other markup is left as is.

/// Tags removed verbatim from summary text
const STRIPPED_TAGS: &[&str] = &["<p>", "</p>", "<b>", "</b>"];

/// Removes the paragraph and bold tags from `text`
///
/// Absent text stays absent.
///
/// # Examples
///
/// ```
/// use showinfo::strip_html;
///
/// assert_eq!(
///     strip_html(Some("<p><b>Dexter</b> is a forensics expert.</p>")),
///     Some("Dexter is a forensics expert.".to_string())
/// );
/// assert_eq!(strip_html(None), None);
/// ```
pub fn strip_html(text: Option<&str>) -> Option<String> {
    text.map(|text| {
        STRIPPED_TAGS
            .iter()
            .fold(text.to_string(), |acc, tag| acc.replace(tag, ""))
    })
}

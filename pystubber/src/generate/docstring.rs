use std::{borrow::Cow, fmt};

/// Write `doc` as a triple-quoted block whose value reads back verbatim.
///
/// Backslashes switch to a raw string; embedded triple quotes force escaping.
pub fn write_docstring(f: &mut impl fmt::Write, doc: &str, indent: &str) -> fmt::Result {
    let (prefix, body): (&str, Cow<str>) = if doc.contains(r#"""""#) {
        let escaped = doc.replace('\\', r"\\").replace(r#"""""#, r#"\"\"\""#);
        ("", Cow::Owned(escaped))
    } else if doc.contains('\\') {
        ("r", Cow::Borrowed(doc))
    } else {
        ("", Cow::Borrowed(doc))
    };
    writeln!(f, r#"{indent}{prefix}""""#)?;
    for line in body.lines() {
        if line.is_empty() {
            writeln!(f)?;
        } else {
            writeln!(f, "{indent}{line}")?;
        }
    }
    writeln!(f, r#"{indent}""""#)
}

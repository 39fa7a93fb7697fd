//! Docstring extraction from parsed Python statements.

use rustpython_parser::ast;

/// Docstring of a module, class or function body, cleaned up.
pub fn extract_docstring(body: &[ast::Stmt]) -> Option<String> {
    body.first().and_then(string_statement).and_then(clean_docstring)
}

/// Sphinx-style attribute docstring: a bare string right after an assignment.
pub fn attribute_docstring(next: Option<&ast::Stmt>) -> Option<String> {
    next.and_then(string_statement).and_then(clean_docstring)
}

fn string_statement(stmt: &ast::Stmt) -> Option<&str> {
    if let ast::Stmt::Expr(expr_stmt) = stmt {
        if let ast::Expr::Constant(constant) = &*expr_stmt.value {
            if let ast::Constant::Str(s) = &constant.value {
                return Some(s.as_str());
            }
        }
    }
    None
}

/// Normalize docstring indentation the way Python's `inspect.cleandoc` does.
///
/// Returns `None` when nothing but whitespace is left.
pub fn clean_docstring(doc: &str) -> Option<String> {
    let expanded: Vec<String> = doc.split('\n').map(expand_tabs).collect();

    let margin = expanded
        .iter()
        .skip(1)
        .filter(|line| !line.trim().is_empty())
        .map(|line| leading_whitespace(line))
        .min();

    let mut lines: Vec<&str> = Vec::with_capacity(expanded.len());
    for (i, line) in expanded.iter().enumerate() {
        if i == 0 {
            lines.push(line.trim_start());
        } else if line.trim().is_empty() {
            lines.push("");
        } else {
            lines.push(skip_chars(line, margin.unwrap_or(0)));
        }
    }

    while lines.last().is_some_and(|l| l.trim().is_empty()) {
        lines.pop();
    }
    let first = lines.iter().position(|l| !l.trim().is_empty())?;
    Some(lines[first..].join("\n"))
}

fn leading_whitespace(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

fn skip_chars(line: &str, n: usize) -> &str {
    line.char_indices().nth(n).map_or("", |(i, _)| &line[i..])
}

/// Tab stops every 8 columns, as `str.expandtabs()`.
fn expand_tabs(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut column = 0;
    for c in line.chars() {
        match c {
            '\t' => {
                let pad = 8 - column % 8;
                out.push_str(&" ".repeat(pad));
                column += pad;
            }
            '\r' => {
                out.push(c);
                column = 0;
            }
            _ => {
                out.push(c);
                column += 1;
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustpython_parser::Parse;

    #[test]
    fn test_cleandoc_keeps_inner_blank_lines() {
        let doc = "Summary line.\n\n        Details indented\n          more\n\n        done\n    ";
        assert_eq!(
            clean_docstring(doc).as_deref(),
            Some("Summary line.\n\nDetails indented\n  more\n\ndone")
        );
    }

    #[test]
    fn test_cleandoc_leading_blank_lines() {
        let doc = "\n\n    helper for pickle\n    ";
        assert_eq!(clean_docstring(doc).as_deref(), Some("helper for pickle"));
    }

    #[test]
    fn test_cleandoc_blank_is_none() {
        assert_eq!(clean_docstring("   \n\t\n"), None);
        assert_eq!(clean_docstring(""), None);
    }

    #[test]
    fn test_expand_tabs() {
        assert_eq!(expand_tabs("\tx"), "        x");
        assert_eq!(expand_tabs("ab\tc"), "ab      c");
    }

    #[test]
    fn test_extract_from_function() {
        let suite = ast::Suite::parse(
            "def f():\n    '''Return\n    the thing.\n    '''\n    return 1\n",
            "<test>",
        )
        .unwrap();
        let ast::Stmt::FunctionDef(def) = &suite[0] else {
            panic!("expected a function");
        };
        assert_eq!(
            extract_docstring(&def.body).as_deref(),
            Some("Return\nthe thing.")
        );
    }

    #[test]
    fn test_no_docstring_when_first_statement_is_code() {
        let suite = ast::Suite::parse("x = 1\n'not a docstring'\n", "<test>").unwrap();
        assert_eq!(extract_docstring(&suite), None);
        assert_eq!(
            attribute_docstring(suite.get(1)).as_deref(),
            Some("not a docstring")
        );
    }
}

//! Rendering of statically known Python values as they would appear in `repr`.

use rustpython_parser::{
    ast::{self, Ranged},
    lexer, Mode, Parse, Tok,
};

/// Literal rendering of `expr` when its value is statically derivable.
///
/// Floats and complex numbers keep their source spelling; other constants
/// and containers of constants render like Python's `repr`.
pub fn render_literal(expr: &ast::Expr, source: &str) -> Option<String> {
    match expr {
        ast::Expr::Constant(constant) => match &constant.value {
            ast::Constant::Float(_) | ast::Constant::Complex { .. } => source_text(expr, source),
            value => constant_repr(value),
        },
        ast::Expr::UnaryOp(unary) => {
            let sign = match unary.op {
                ast::UnaryOp::USub => "-",
                ast::UnaryOp::UAdd => "+",
                _ => return None,
            };
            match &*unary.operand {
                ast::Expr::Constant(constant)
                    if matches!(
                        constant.value,
                        ast::Constant::Int(_)
                            | ast::Constant::Float(_)
                            | ast::Constant::Complex { .. }
                    ) =>
                {
                    Some(format!("{sign}{}", render_literal(&unary.operand, source)?))
                }
                _ => None,
            }
        }
        ast::Expr::Tuple(tuple) => {
            let items = render_all(&tuple.elts, source)?;
            Some(match items.as_slice() {
                [single] => format!("({single},)"),
                _ => format!("({})", items.join(", ")),
            })
        }
        ast::Expr::List(list) => Some(format!("[{}]", render_all(&list.elts, source)?.join(", "))),
        ast::Expr::Set(set) => Some(format!("{{{}}}", render_all(&set.elts, source)?.join(", "))),
        ast::Expr::Dict(dict) => {
            let entries = dict
                .keys
                .iter()
                .zip(&dict.values)
                .map(|(key, value)| {
                    let key = render_literal(key.as_ref()?, source)?;
                    Some(format!("{key}: {}", render_literal(value, source)?))
                })
                .collect::<Option<Vec<_>>>()?;
            Some(format!("{{{}}}", entries.join(", ")))
        }
        _ => None,
    }
}

fn render_all(elts: &[ast::Expr], source: &str) -> Option<Vec<String>> {
    elts.iter().map(|e| render_literal(e, source)).collect()
}

fn constant_repr(value: &ast::Constant) -> Option<String> {
    Some(match value {
        ast::Constant::None => "None".to_string(),
        ast::Constant::Bool(true) => "True".to_string(),
        ast::Constant::Bool(false) => "False".to_string(),
        ast::Constant::Ellipsis => "Ellipsis".to_string(),
        ast::Constant::Int(i) => i.to_string(),
        ast::Constant::Str(s) => str_repr(s),
        ast::Constant::Bytes(b) => bytes_repr(b),
        ast::Constant::Tuple(items) => {
            let items = items.iter().map(constant_repr).collect::<Option<Vec<_>>>()?;
            match items.as_slice() {
                [single] => format!("({single},)"),
                _ => format!("({})", items.join(", ")),
            }
        }
        ast::Constant::Float(_) | ast::Constant::Complex { .. } => return None,
    })
}

/// Source spelling of `expr`, folded onto one line.
///
/// Multi-line spellings are rebuilt from their tokens, so comments and
/// backslash continuations drop out. `None` when the folded text is not a
/// valid expression.
pub fn source_text(expr: &ast::Expr, source: &str) -> Option<String> {
    let range = expr.range();
    let start = usize::from(range.start());
    let end = usize::from(range.end());
    let text = source.get(start..end)?;
    if !text.contains('\n') {
        return Some(text.to_string());
    }
    let folded = fold_tokens(text)?;
    ast::Expr::parse(&folded, "<expression>").ok()?;
    Some(folded)
}

fn fold_tokens(text: &str) -> Option<String> {
    let mut folded = String::with_capacity(text.len());
    let mut previous: Option<(Tok, usize)> = None;
    for token in lexer::lex(text, Mode::Expression) {
        let (tok, range) = token.ok()?;
        if matches!(tok, Tok::Newline | Tok::Indent | Tok::Dedent | Tok::EndOfFile) {
            continue;
        }
        let start = usize::from(range.start());
        let end = usize::from(range.end());
        if let Some((prev, prev_end)) = &previous {
            let opens = matches!(prev, Tok::Lpar | Tok::Lsqb | Tok::Lbrace);
            let closes = matches!(tok, Tok::Rpar | Tok::Rsqb | Tok::Rbrace | Tok::Comma);
            if start > *prev_end && !opens && !closes {
                folded.push(' ');
            }
        }
        folded.push_str(text.get(start..end)?);
        previous = Some((tok, end));
    }
    Some(folded)
}

/// Python `repr()` of a `str`.
pub fn str_repr(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&escape_code_point(c)),
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Python `repr()` of a `bytes` value.
pub fn bytes_repr(bytes: &[u8]) -> String {
    let quote = if bytes.contains(&b'\'') && !bytes.contains(&b'"') {
        b'"'
    } else {
        b'\''
    };
    let mut out = String::with_capacity(bytes.len() + 3);
    out.push('b');
    out.push(quote as char);
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            b if b == quote => {
                out.push('\\');
                out.push(b as char);
            }
            0x20..=0x7e => out.push(b as char),
            b => out.push_str(&format!("\\x{b:02x}")),
        }
    }
    out.push(quote as char);
    out
}

fn escape_code_point(c: char) -> String {
    let code = c as u32;
    if code <= 0xff {
        format!("\\x{code:02x}")
    } else if code <= 0xffff {
        format!("\\u{code:04x}")
    } else {
        format!("\\U{code:08x}")
    }
}

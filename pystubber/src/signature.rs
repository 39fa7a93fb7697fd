//! Reconstruction of call signatures and class headers.

use crate::{
    descriptor::*,
    literal::{render_literal, source_text},
};
use anyhow::{bail, Result};
use rustpython_parser::ast;
use std::collections::HashSet;

/// Ordered parameter list of a `def`, with defaults rendered as literals.
///
/// Positional-only parameters are folded into plain positional ones; the
/// `/` marker is not reproduced. `None` when a default cannot be written
/// back as a valid expression.
pub fn parameters_from_ast(
    args: &ast::Arguments,
    source: &str,
) -> Option<Vec<ParameterDescriptor>> {
    let mut parameters = Vec::new();
    for arg in args.posonlyargs.iter().chain(&args.args) {
        parameters.push(parameter_with_default(arg, ParameterKind::Positional, source)?);
    }
    if let Some(vararg) = &args.vararg {
        parameters.push(ParameterDescriptor::new(
            vararg.arg.as_str(),
            ParameterKind::VarPositional,
        ));
    }
    for arg in &args.kwonlyargs {
        parameters.push(parameter_with_default(arg, ParameterKind::KeywordOnly, source)?);
    }
    if let Some(kwarg) = &args.kwarg {
        parameters.push(ParameterDescriptor::new(
            kwarg.arg.as_str(),
            ParameterKind::VarKeyword,
        ));
    }
    Some(parameters)
}

fn parameter_with_default(
    arg: &ast::ArgWithDefault,
    kind: ParameterKind,
    source: &str,
) -> Option<ParameterDescriptor> {
    let parameter = ParameterDescriptor::new(arg.def.arg.as_str(), kind);
    Some(match &arg.default {
        Some(default) => parameter.with_default(render_default(default, source)?),
        None => parameter,
    })
}

/// Default value as text: a literal when derivable, else its source spelling.
///
/// The expression is never evaluated, so defaults built by calls render as
/// the call itself.
pub fn render_default(expr: &ast::Expr, source: &str) -> Option<String> {
    render_literal(expr, source).or_else(|| source_text(expr, source))
}

/// Header entries of a `class` statement: bases, then keywords.
pub fn base_classes_from_ast(class: &ast::StmtClassDef, source: &str) -> Option<Vec<String>> {
    let bases = class.bases.iter().map(|base| source_text(base, source));
    let keywords = class.keywords.iter().map(|keyword| {
        let value = source_text(&keyword.value, source)?;
        Some(match &keyword.arg {
            Some(name) => format!("{name}={value}"),
            None => format!("**{value}"),
        })
    });
    bases.chain(keywords).collect()
}

/// Signature of `function` once bound to an instance: the receiver is dropped.
pub fn bind_method(function: &FunctionDescriptor, name: &str) -> FunctionDescriptor {
    let parameters = function.parameters.as_ref().map(|parameters| {
        let takes_receiver = function.decorator != Some(MethodDecorator::StaticMethod)
            && parameters
                .first()
                .is_some_and(|p| p.kind == ParameterKind::Positional);
        parameters
            .iter()
            .skip(usize::from(takes_receiver))
            .cloned()
            .collect()
    });
    FunctionDescriptor {
        name: name.to_string(),
        docstring: function.docstring.clone(),
        parameters,
        is_method: false,
        is_async: function.is_async,
        decorator: None,
        best_effort: function.best_effort,
        inherited_from: None,
    }
}

/// Catch-all signature used when the real one cannot be derived.
pub fn fallback_parameters(
    is_method: bool,
    decorator: Option<MethodDecorator>,
) -> Vec<ParameterDescriptor> {
    let mut parameters = Vec::new();
    if is_method {
        match decorator {
            Some(MethodDecorator::StaticMethod) => {}
            Some(MethodDecorator::ClassMethod) => {
                parameters.push(ParameterDescriptor::new("cls", ParameterKind::Positional))
            }
            _ => parameters.push(ParameterDescriptor::new("self", ParameterKind::Positional)),
        }
    }
    parameters.push(ParameterDescriptor::new("args", ParameterKind::VarPositional));
    parameters.push(ParameterDescriptor::new("kwargs", ParameterKind::VarKeyword));
    parameters
}

/// Checks that `parameters` spell a valid Python signature.
pub fn validate_parameters(parameters: &[ParameterDescriptor]) -> Result<()> {
    let mut names = HashSet::new();
    let mut stage = 0;
    let mut seen_default = false;
    let mut seen_variadic = HashSet::new();
    for parameter in parameters {
        if !is_identifier(&parameter.name) {
            bail!("`{}` is not a valid parameter name", parameter.name);
        }
        if !names.insert(parameter.name.as_str()) {
            bail!("duplicate parameter `{}`", parameter.name);
        }
        let rank = match parameter.kind {
            ParameterKind::Positional => 0,
            ParameterKind::VarPositional => 1,
            ParameterKind::KeywordOnly => 2,
            ParameterKind::VarKeyword => 3,
        };
        if rank < stage {
            bail!("`{}` is out of order", parameter.name);
        }
        stage = rank;
        match parameter.kind {
            ParameterKind::Positional => {
                if parameter.default_repr.is_some() {
                    seen_default = true;
                } else if seen_default {
                    bail!(
                        "non-default parameter `{}` follows a default one",
                        parameter.name
                    );
                }
            }
            ParameterKind::VarPositional | ParameterKind::VarKeyword => {
                if !seen_variadic.insert(parameter.kind) {
                    bail!("more than one {:?} parameter", parameter.kind);
                }
                if parameter.default_repr.is_some() {
                    bail!("variadic parameter `{}` cannot have a default", parameter.name);
                }
            }
            ParameterKind::KeywordOnly => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustpython_parser::Parse;

    fn parse_def(source: &str) -> (ast::StmtFunctionDef, String) {
        let suite = ast::Suite::parse(source, "<test>").unwrap();
        match suite.into_iter().next() {
            Some(ast::Stmt::FunctionDef(def)) => (def, source.to_string()),
            other => panic!("expected a function, got {other:?}"),
        }
    }

    fn render(parameters: &[ParameterDescriptor]) -> Vec<String> {
        parameters
            .iter()
            .map(|p| {
                let prefix = match p.kind {
                    ParameterKind::VarPositional => "*",
                    ParameterKind::VarKeyword => "**",
                    ParameterKind::KeywordOnly => "kw:",
                    ParameterKind::Positional => "",
                };
                match &p.default_repr {
                    Some(default) => format!("{prefix}{}={default}", p.name),
                    None => format!("{prefix}{}", p.name),
                }
            })
            .collect()
    }

    #[test]
    fn test_seed_signature() {
        let (def, source) = parse_def("def seed(self, a=None, version=2):\n    pass\n");
        let parameters = parameters_from_ast(&def.args, &source).unwrap();
        assert_eq!(render(&parameters), ["self", "a=None", "version=2"]);
    }

    #[test]
    fn test_all_parameter_kinds() {
        let (def, source) = parse_def(
            "def f(a, b=-1, /, c=(), *args, d, e='x', **kwargs):\n    pass\n",
        );
        let parameters = parameters_from_ast(&def.args, &source).unwrap();
        assert_eq!(
            render(&parameters),
            ["a", "b=-1", "c=()", "*args", "kw:d", "kw:e='x'", "**kwargs"]
        );
        validate_parameters(&parameters).unwrap();
    }

    #[test]
    fn test_non_literal_default_keeps_source() {
        let (def, source) = parse_def("def f(x=_ONE, y=object()):\n    pass\n");
        let parameters = parameters_from_ast(&def.args, &source).unwrap();
        assert_eq!(render(&parameters), ["x=_ONE", "y=object()"]);
    }

    #[test]
    fn test_multi_line_default_drops_comments() {
        let (def, source) = parse_def(
            "def f(opts=dict(\n    a=1,  # first\n    b=2,\n)):\n    pass\n",
        );
        let parameters = parameters_from_ast(&def.args, &source).unwrap();
        assert_eq!(render(&parameters), ["opts=dict(a=1, b=2,)"]);
    }

    #[test]
    fn test_class_header() {
        let source = "class A(_random.Random, Mixin, metaclass=ABCMeta):\n    pass\n";
        let suite = ast::Suite::parse(source, "<test>").unwrap();
        let ast::Stmt::ClassDef(class) = &suite[0] else {
            panic!("expected a class");
        };
        assert_eq!(
            base_classes_from_ast(class, source).unwrap(),
            ["_random.Random", "Mixin", "metaclass=ABCMeta"]
        );
    }

    #[test]
    fn test_bind_method_drops_receiver() {
        let (def, source) = parse_def("def seed(self, a=None, version=2):\n    pass\n");
        let mut method = FunctionDescriptor::new(
            "seed",
            parameters_from_ast(&def.args, &source).unwrap(),
        );
        method.is_method = true;
        let bound = bind_method(&method, "seed");
        assert!(!bound.is_method);
        assert_eq!(render(bound.parameters.as_deref().unwrap()), ["a=None", "version=2"]);

        method.decorator = Some(MethodDecorator::StaticMethod);
        let bound = bind_method(&method, "seed");
        assert_eq!(bound.parameters.as_ref().map(Vec::len), Some(3));
    }

    #[test]
    fn test_fallback_parameters() {
        assert_eq!(
            render(&fallback_parameters(true, None)),
            ["self", "*args", "**kwargs"]
        );
        assert_eq!(
            render(&fallback_parameters(true, Some(MethodDecorator::ClassMethod))),
            ["cls", "*args", "**kwargs"]
        );
        assert_eq!(render(&fallback_parameters(false, None)), ["*args", "**kwargs"]);
    }

    #[test]
    fn test_invalid_signatures() {
        use ParameterKind::*;
        let cases = [
            vec![
                ParameterDescriptor::new("a", Positional).with_default("1"),
                ParameterDescriptor::new("b", Positional),
            ],
            vec![
                ParameterDescriptor::new("kwargs", VarKeyword),
                ParameterDescriptor::new("a", Positional),
            ],
            vec![
                ParameterDescriptor::new("args", VarPositional),
                ParameterDescriptor::new("more", VarPositional),
            ],
            vec![
                ParameterDescriptor::new("a", Positional),
                ParameterDescriptor::new("a", KeywordOnly),
            ],
            vec![ParameterDescriptor::new("not valid", Positional)],
        ];
        for parameters in cases {
            assert!(
                validate_parameters(&parameters).is_err(),
                "{parameters:?} should be rejected"
            );
        }
    }
}

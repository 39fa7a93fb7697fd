use crate::{
    descriptor::{FunctionDescriptor, MethodDecorator},
    docstring::clean_docstring,
    generate::{docstring::write_docstring, *},
    signature::{fallback_parameters, validate_parameters},
    WarningKind, Warnings,
};
use std::fmt;

/// Body written in place of every implementation.
pub const PLACEHOLDER_BODY: &str = "raise NotImplementedError()";

/// Definition of a Python function or method.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    pub name: String,
    pub parameters: Parameters,
    pub doc: Option<String>,
    pub is_async: bool,
    pub decorator: Option<MethodDecorator>,
}

impl FunctionDef {
    /// Render tree of `function`, falling back to a variadic signature when
    /// its own cannot be used.
    pub fn new(function: &FunctionDescriptor, scope: &str, warnings: &mut Warnings) -> Self {
        let subject = format!("{scope}.{}", function.name);
        let fallback = || fallback_parameters(function.is_method, function.decorator);
        let parameters = match &function.parameters {
            Some(parameters) => match validate_parameters(parameters) {
                Ok(()) => parameters.clone(),
                Err(err) => {
                    warnings.record(
                        WarningKind::SignatureUnavailable,
                        subject,
                        format!("{err}; using a variadic signature"),
                    );
                    fallback()
                }
            },
            None => {
                warnings.record(
                    WarningKind::SignatureUnavailable,
                    subject,
                    "no inspectable signature; using a variadic signature",
                );
                fallback()
            }
        };
        Self {
            name: function.name.clone(),
            parameters: Parameters::from_descriptors(&parameters),
            doc: function.docstring.as_deref().and_then(clean_docstring),
            is_async: function.is_async,
            decorator: function.decorator,
        }
    }
}

impl fmt::Display for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let indent = indent();
        if let Some(decorator) = self.decorator {
            writeln!(f, "@{}", decorator.as_str())?;
        }
        let async_ = if self.is_async { "async " } else { "" };
        writeln!(f, "{async_}def {}({}):", self.name, self.parameters)?;
        if let Some(doc) = &self.doc {
            write_docstring(f, doc, indent)?;
        }
        writeln!(f, "{indent}{PLACEHOLDER_BODY}")
    }
}

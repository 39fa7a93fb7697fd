use crate::descriptor::{ParameterDescriptor, ParameterKind};
use std::fmt;

/// A single parameter in a reconstructed signature.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub kind: ParameterKind,
    /// Default value rendered as source text
    pub default: Option<String>,
}

impl From<&ParameterDescriptor> for Parameter {
    fn from(descriptor: &ParameterDescriptor) -> Self {
        Self {
            name: descriptor.name.clone(),
            kind: descriptor.kind,
            default: descriptor.default_repr.clone(),
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ParameterKind::VarPositional => write!(f, "*{}", self.name),
            ParameterKind::VarKeyword => write!(f, "**{}", self.name),
            ParameterKind::Positional | ParameterKind::KeywordOnly => match &self.default {
                Some(default) => write!(f, "{}={default}", self.name),
                None => write!(f, "{}", self.name),
            },
        }
    }
}

/// Parameters of a signature, grouped the way Python spells them.
///
/// Positional-only parameters arrive folded into `positional`, so no `/`
/// delimiter is ever written.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parameters {
    pub positional: Vec<Parameter>,
    /// Variable positional parameter (`*args`)
    pub varargs: Option<Parameter>,
    /// Keyword-only parameters (after `*` or `*args`)
    pub keyword_only: Vec<Parameter>,
    /// Variable keyword parameter (`**kwargs`)
    pub varkw: Option<Parameter>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group an already validated descriptor list.
    pub fn from_descriptors(descriptors: &[ParameterDescriptor]) -> Self {
        let mut params = Self::new();
        for descriptor in descriptors {
            let param = Parameter::from(descriptor);
            match param.kind {
                ParameterKind::Positional => params.positional.push(param),
                ParameterKind::KeywordOnly => params.keyword_only.push(param),
                ParameterKind::VarPositional => params.varargs = Some(param),
                ParameterKind::VarKeyword => params.varkw = Some(param),
            }
        }
        params
    }

    /// Iterate over all parameters in signature order
    pub fn iter_entries(&self) -> impl Iterator<Item = &Parameter> {
        self.positional
            .iter()
            .chain(self.varargs.iter())
            .chain(self.keyword_only.iter())
            .chain(self.varkw.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.iter_entries().next().is_none()
    }
}

impl fmt::Display for Parameters {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut parts: Vec<String> = self.positional.iter().map(Parameter::to_string).collect();

        // Bare `*` marks keyword-only parameters when there is no `*args`
        if let Some(varargs) = &self.varargs {
            parts.push(varargs.to_string());
        } else if !self.keyword_only.is_empty() {
            parts.push("*".to_string());
        }

        parts.extend(self.keyword_only.iter().map(Parameter::to_string));
        if let Some(varkw) = &self.varkw {
            parts.push(varkw.to_string());
        }

        write!(f, "{}", parts.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param(name: &str, kind: ParameterKind, default: Option<&str>) -> ParameterDescriptor {
        let descriptor = ParameterDescriptor::new(name, kind);
        match default {
            Some(default) => descriptor.with_default(default),
            None => descriptor,
        }
    }

    #[test]
    fn test_positional_with_defaults() {
        let params = Parameters::from_descriptors(&[
            param("self", ParameterKind::Positional, None),
            param("a", ParameterKind::Positional, Some("None")),
            param("version", ParameterKind::Positional, Some("2")),
        ]);
        assert_eq!(params.to_string(), "self, a=None, version=2");
    }

    #[test]
    fn test_keyword_only_without_varargs() {
        let params = Parameters::from_descriptors(&[
            param("population", ParameterKind::Positional, None),
            param("k", ParameterKind::KeywordOnly, None),
            param("counts", ParameterKind::KeywordOnly, Some("None")),
        ]);
        assert_eq!(params.to_string(), "population, *, k, counts=None");
    }

    #[test]
    fn test_all_kinds() {
        let params = Parameters::from_descriptors(&[
            param("a", ParameterKind::Positional, None),
            param("args", ParameterKind::VarPositional, None),
            param("key", ParameterKind::KeywordOnly, Some("'x'")),
            param("kwargs", ParameterKind::VarKeyword, None),
        ]);
        assert_eq!(params.to_string(), "a, *args, key='x', **kwargs");
    }

    #[test]
    fn test_empty() {
        let params = Parameters::new();
        assert!(params.is_empty());
        assert_eq!(params.to_string(), "");
    }
}

//! Immutable descriptors of an introspected Python module.
//!
//! Descriptors are built once, either by [`ModuleDescriptor::parse`] from
//! source text or deserialized from a JSON dump produced by a live
//! introspection, and are only read afterwards.

use crate::StubError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    pub name: String,
    #[serde(default)]
    pub docstring: Option<String>,
    /// Value of `__all__`, verbatim, when the module declares one.
    #[serde(default)]
    pub export_list: Option<Vec<String>>,
    /// Top-level members in first-seen declaration order.
    #[serde(default)]
    pub members: Vec<MemberDescriptor>,
    #[serde(default)]
    pub metadata: ModuleMetadata,
}

/// Conventional module dunders reported at the end of the stub.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleMetadata {
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub credits: Option<String>,
}

impl ModuleMetadata {
    pub fn is_empty(&self) -> bool {
        self.entries().next().is_none()
    }

    /// `(label, value)` pairs in emission order.
    pub fn entries(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            ("VERSION", &self.version),
            ("DATE", &self.date),
            ("AUTHOR", &self.author),
            ("CREDITS", &self.credits),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_deref().map(|v| (label, v)))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MemberDescriptor {
    Function(FunctionDescriptor),
    Class(ClassDescriptor),
    Attribute(AttributeDescriptor),
}

impl MemberDescriptor {
    pub fn name(&self) -> &str {
        match self {
            MemberDescriptor::Function(f) => &f.name,
            MemberDescriptor::Class(c) => &c.name,
            MemberDescriptor::Attribute(a) => &a.name,
        }
    }

    pub fn docstring(&self) -> Option<&str> {
        match self {
            MemberDescriptor::Function(f) => f.docstring.as_deref(),
            MemberDescriptor::Class(c) => c.docstring.as_deref(),
            MemberDescriptor::Attribute(a) => a.docstring.as_deref(),
        }
    }

    pub fn is_public(&self) -> bool {
        is_public_name(self.name())
    }

    /// Name of the ancestor class this member was re-documented from.
    pub fn inherited_from(&self) -> Option<&str> {
        match self {
            MemberDescriptor::Function(f) => f.inherited_from.as_deref(),
            MemberDescriptor::Class(_) => None,
            MemberDescriptor::Attribute(a) => a.inherited_from.as_deref(),
        }
    }

    pub(crate) fn renamed(&self, name: &str) -> Self {
        let mut out = self.clone();
        match &mut out {
            MemberDescriptor::Function(f) => f.name = name.to_string(),
            MemberDescriptor::Class(c) => c.name = name.to_string(),
            MemberDescriptor::Attribute(a) => a.name = name.to_string(),
        }
        out
    }

    pub(crate) fn inherited(&self, ancestor: &str) -> Self {
        let mut out = self.clone();
        match &mut out {
            MemberDescriptor::Function(f) => f.inherited_from = Some(ancestor.to_string()),
            MemberDescriptor::Class(_) => {}
            MemberDescriptor::Attribute(a) => a.inherited_from = Some(ancestor.to_string()),
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDescriptor {
    pub name: String,
    #[serde(default)]
    pub docstring: Option<String>,
    /// `None` when the signature could not be inspected.
    #[serde(default)]
    pub parameters: Option<Vec<ParameterDescriptor>>,
    #[serde(default)]
    pub is_method: bool,
    #[serde(default)]
    pub is_async: bool,
    #[serde(default)]
    pub decorator: Option<MethodDecorator>,
    /// Backed by an opaque implementation; the signature is a generic guess.
    #[serde(default)]
    pub best_effort: bool,
    #[serde(default)]
    pub inherited_from: Option<String>,
}

impl FunctionDescriptor {
    pub fn new(name: impl Into<String>, parameters: Vec<ParameterDescriptor>) -> Self {
        Self {
            name: name.into(),
            docstring: None,
            parameters: Some(parameters),
            is_method: false,
            is_async: false,
            decorator: None,
            best_effort: false,
            inherited_from: None,
        }
    }

    /// A function whose implementation cannot be inspected.
    pub fn opaque(name: impl Into<String>, is_method: bool) -> Self {
        Self {
            parameters: None,
            is_method,
            best_effort: true,
            ..Self::new(name, Vec::new())
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodDecorator {
    StaticMethod,
    ClassMethod,
    Property,
}

impl MethodDecorator {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "staticmethod" => Some(Self::StaticMethod),
            "classmethod" => Some(Self::ClassMethod),
            "property" => Some(Self::Property),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::StaticMethod => "staticmethod",
            Self::ClassMethod => "classmethod",
            Self::Property => "property",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassDescriptor {
    pub name: String,
    #[serde(default)]
    pub docstring: Option<String>,
    /// Header entries as written, e.g. `["_random.Random", "metaclass=ABCMeta"]`.
    #[serde(default)]
    pub base_classes: Vec<String>,
    /// Own members first, then inherited ones grouped by ancestor.
    #[serde(default)]
    pub members: Vec<MemberDescriptor>,
    /// Linearized ancestry starting with the class itself; empty if trivial.
    #[serde(default)]
    pub mro: Vec<String>,
}

impl ClassDescriptor {
    pub fn find(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name() == name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeDescriptor {
    pub name: String,
    #[serde(default)]
    pub docstring: Option<String>,
    /// A literal rendering of the bound value, never a type.
    #[serde(default)]
    pub inferred_default_repr: Option<String>,
    #[serde(default)]
    pub inherited_from: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    pub name: String,
    pub kind: ParameterKind,
    #[serde(default)]
    pub default_repr: Option<String>,
}

impl ParameterDescriptor {
    pub fn new(name: impl Into<String>, kind: ParameterKind) -> Self {
        Self {
            name: name.into(),
            kind,
            default_repr: None,
        }
    }

    pub fn with_default(mut self, default_repr: impl Into<String>) -> Self {
        self.default_repr = Some(default_repr.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    Positional,
    KeywordOnly,
    VarPositional,
    VarKeyword,
}

pub fn is_public_name(name: &str) -> bool {
    !name.starts_with('_')
}

pub fn is_dunder(name: &str) -> bool {
    name.len() > 4 && name.starts_with("__") && name.ends_with("__")
}

/// Python identifier check, restricted to what a stub can spell.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c == '_' || c.is_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c == '_' || c.is_alphanumeric()) && !is_keyword(name)
}

fn is_keyword(name: &str) -> bool {
    matches!(
        name,
        "False" | "None" | "True" | "and" | "as" | "assert" | "async" | "await" | "break"
            | "class" | "continue" | "def" | "del" | "elif" | "else" | "except" | "finally"
            | "for" | "from" | "global" | "if" | "import" | "in" | "is" | "lambda"
            | "nonlocal" | "not" | "or" | "pass" | "raise" | "return" | "try" | "while"
            | "with" | "yield"
    )
}

impl ModuleDescriptor {
    /// Deserialize a descriptor dumped by an introspection collaborator.
    pub fn from_json(json: &str) -> Result<Self> {
        let module: Self = serde_json::from_str(json)
            .map_err(|e| StubError::InvalidInput(format!("malformed module descriptor: {e}")))?;
        module.validate()?;
        Ok(module)
    }

    /// Structural checks whose failure makes the whole invocation invalid.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() || !self.name.split('.').all(is_identifier) {
            return Err(StubError::InvalidInput(format!(
                "`{}` is not a valid module name",
                self.name
            ))
            .into());
        }
        validate_members(&self.name, &self.members)
    }

    pub fn find(&self, name: &str) -> Option<&MemberDescriptor> {
        self.members.iter().find(|m| m.name() == name)
    }
}

fn validate_members(scope: &str, members: &[MemberDescriptor]) -> Result<()> {
    let mut seen = HashSet::new();
    for member in members {
        if member.name().is_empty() {
            return Err(StubError::InvalidInput(format!("unnamed member in `{scope}`")).into());
        }
        if !seen.insert(member.name()) {
            return Err(StubError::InvalidInput(format!(
                "duplicate member `{}` in `{scope}`",
                member.name()
            ))
            .into());
        }
        if let MemberDescriptor::Class(class) = member {
            validate_members(&format!("{scope}.{}", class.name), &class.members)?;
        }
    }
    Ok(())
}

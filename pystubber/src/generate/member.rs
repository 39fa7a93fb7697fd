use crate::{
    descriptor::{is_identifier, MemberDescriptor},
    generate::*,
    StubConfig, WarningKind, Warnings,
};
use std::fmt;

/// One block of a module or class body.
#[derive(Debug, Clone, PartialEq)]
pub enum MemberDef {
    Function(FunctionDef),
    Class(ClassDef),
    Attribute(AttributeDef),
}

impl MemberDef {
    /// Render tree of `member`, or `None` when its name cannot be written as
    /// Python source.
    pub fn new(
        member: &MemberDescriptor,
        scope: &str,
        config: &StubConfig,
        warnings: &mut Warnings,
    ) -> Option<Self> {
        if !is_identifier(member.name()) {
            warnings.record(
                WarningKind::NotIntrospectable,
                format!("{scope}.{}", member.name()),
                "not a valid identifier; skipped",
            );
            return None;
        }
        Some(match member {
            MemberDescriptor::Function(function) => {
                MemberDef::Function(FunctionDef::new(function, scope, warnings))
            }
            MemberDescriptor::Class(class) => {
                MemberDef::Class(ClassDef::new(class, scope, config, warnings))
            }
            MemberDescriptor::Attribute(attribute) => MemberDef::Attribute(attribute.into()),
        })
    }
}

impl fmt::Display for MemberDef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MemberDef::Function(function) => function.fmt(f),
            MemberDef::Class(class) => class.fmt(f),
            MemberDef::Attribute(attribute) => attribute.fmt(f),
        }
    }
}

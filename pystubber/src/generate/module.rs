use crate::{
    descriptor::ModuleDescriptor,
    docstring::clean_docstring,
    export::order_exports,
    generate::{docstring::write_docstring, *},
    literal::str_repr,
    StubConfig, Warnings,
};
use itertools::Itertools;
use std::fmt;

/// Type info for a Python (sub-)module, ready to be written as a stub.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleDef {
    pub name: String,
    pub doc: Option<String>,
    /// `__all__` exactly as declared
    pub export_list: Option<Vec<String>>,
    pub members: Vec<MemberDef>,
    /// `(label, value)` pairs of the trailer
    pub metadata: Vec<(&'static str, String)>,
    pub line_width: usize,
}

impl ModuleDef {
    pub fn new(module: &ModuleDescriptor, config: &StubConfig, warnings: &mut Warnings) -> Self {
        let members = order_exports(module, warnings)
            .into_iter()
            .filter_map(|member| MemberDef::new(member, &module.name, config, warnings))
            .collect();
        let metadata = if config.metadata_trailer {
            module
                .metadata
                .entries()
                .map(|(label, value)| (label, value.to_string()))
                .collect()
        } else {
            Vec::new()
        };
        Self {
            name: module.name.clone(),
            doc: module.docstring.as_deref().and_then(clean_docstring),
            export_list: module.export_list.clone(),
            members,
            metadata,
            line_width: config.line_width,
        }
    }

    fn write_export_list(&self, f: &mut fmt::Formatter, names: &[String]) -> fmt::Result {
        let line = format!(
            "__all__ = [{}]",
            names.iter().map(|name| str_repr(name)).join(", ")
        );
        if line.chars().count() <= self.line_width || names.is_empty() {
            return writeln!(f, "{line}");
        }
        writeln!(f, "__all__ = [")?;
        for name in names {
            writeln!(f, "{}{},", indent(), str_repr(name))?;
        }
        writeln!(f, "]")
    }
}

impl fmt::Display for ModuleDef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "#!/usr/bin/env python  # [module {}] generated by pystubber",
            self.name
        )?;
        if let Some(doc) = &self.doc {
            write_docstring(f, doc, "")?;
        }
        if let Some(names) = &self.export_list {
            writeln!(f)?;
            self.write_export_list(f, names)?;
        }
        for member in &self.members {
            writeln!(f)?;
            writeln!(f)?;
            write!(f, "{member}")?;
        }
        if !self.metadata.is_empty() {
            writeln!(f)?;
            writeln!(f)?;
            for (label, value) in &self.metadata {
                let mut lines = value.lines();
                writeln!(f, "# {label}: {}", lines.next().unwrap_or_default())?;
                for line in lines {
                    writeln!(f, "#     {line}")?;
                }
            }
        }
        Ok(())
    }
}

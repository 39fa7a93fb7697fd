use crate::{
    descriptor::ClassDescriptor,
    docstring::clean_docstring,
    export::visible_in_class,
    generate::{docstring::write_docstring, *},
    StubConfig, Warnings,
};
use std::fmt;

/// Definition of a Python class.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassDef {
    pub name: String,
    pub doc: Option<String>,
    /// Header entries, keywords such as `metaclass=ABCMeta` included
    pub bases: Vec<String>,
    /// Listed as a comment when non-empty
    pub mro: Vec<String>,
    pub members: Vec<MemberDef>,
    pub inherited: Vec<InheritedGroup>,
}

/// Members re-documented from one ancestor class.
#[derive(Debug, Clone, PartialEq)]
pub struct InheritedGroup {
    pub ancestor: String,
    pub members: Vec<MemberDef>,
}

impl ClassDef {
    pub fn new(
        class: &ClassDescriptor,
        scope: &str,
        config: &StubConfig,
        warnings: &mut Warnings,
    ) -> Self {
        let qualified = format!("{scope}.{}", class.name);
        let mut members = Vec::new();
        let mut inherited: Vec<InheritedGroup> = Vec::new();
        for member in &class.members {
            if !visible_in_class(member.name(), config.include_private) {
                continue;
            }
            let ancestor = member.inherited_from();
            if ancestor.is_some() && !config.inherited_members {
                continue;
            }
            let Some(def) = MemberDef::new(member, &qualified, config, warnings) else {
                continue;
            };
            match ancestor {
                None => members.push(def),
                Some(ancestor) => match inherited.iter_mut().find(|g| g.ancestor == ancestor) {
                    Some(group) => group.members.push(def),
                    None => inherited.push(InheritedGroup {
                        ancestor: ancestor.to_string(),
                        members: vec![def],
                    }),
                },
            }
        }
        Self {
            name: class.name.clone(),
            doc: class.docstring.as_deref().and_then(clean_docstring),
            bases: class.base_classes.clone(),
            mro: if config.mro_comments {
                class.mro.clone()
            } else {
                Vec::new()
            },
            members,
            inherited,
        }
    }
}

impl fmt::Display for ClassDef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let bases = if self.bases.is_empty() {
            String::new()
        } else {
            format!("({})", self.bases.join(", "))
        };
        writeln!(f, "class {}{bases}:", self.name)?;

        let mut blocks = Vec::new();
        if let Some(doc) = &self.doc {
            let mut block = String::new();
            write_docstring(&mut block, doc, "")?;
            blocks.push(block);
        }
        if !self.mro.is_empty() {
            let mut block = "# Method resolution order:\n".to_string();
            for (i, class) in self.mro.iter().enumerate() {
                block.push_str(&format!("# {}) {class}\n", i + 1));
            }
            blocks.push(block);
        }
        blocks.extend(self.members.iter().map(MemberDef::to_string));
        for group in &self.inherited {
            let (data, methods): (Vec<&MemberDef>, Vec<&MemberDef>) = group
                .members
                .iter()
                .partition(|member| matches!(member, MemberDef::Attribute(_)));
            for (heading, members) in [("Methods", methods), ("Data and other attributes", data)] {
                if members.is_empty() {
                    continue;
                }
                blocks.push(format!("# {heading} inherited from {}:\n", group.ancestor));
                blocks.extend(members.into_iter().map(MemberDef::to_string));
            }
        }
        // Comments alone do not make a body.
        if self.doc.is_none() && self.members.is_empty() && self.inherited.is_empty() {
            blocks.push("pass\n".to_string());
        }

        for (i, block) in blocks.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write_indented(f, block)?;
        }
        Ok(())
    }
}

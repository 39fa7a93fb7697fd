use crate::{descriptor::AttributeDescriptor, docstring::clean_docstring};
use std::fmt;

/// Definition of a module or class level value.
///
/// Written as `name = value` with its documentation as comment lines below.
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeDef {
    pub name: String,
    /// Literal repr, `None` when nothing statically known
    pub value: Option<String>,
    pub doc: Option<String>,
}

impl From<&AttributeDescriptor> for AttributeDef {
    fn from(attribute: &AttributeDescriptor) -> Self {
        Self {
            name: attribute.name.clone(),
            value: attribute.inferred_default_repr.clone(),
            doc: attribute.docstring.as_deref().and_then(clean_docstring),
        }
    }
}

impl fmt::Display for AttributeDef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} = {}", self.name, self.value.as_deref().unwrap_or("None"))?;
        if let Some(doc) = &self.doc {
            for line in doc.lines() {
                if line.is_empty() {
                    writeln!(f, "#")?;
                } else {
                    writeln!(f, "# {line}")?;
                }
            }
        }
        Ok(())
    }
}

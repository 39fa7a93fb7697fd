//! Documentation stubs of Python modules.
//!
//! A stub keeps every signature and docstring of a module, reconstructs its
//! `__all__`, and replaces each body with `raise NotImplementedError()`.
//!
//! ```
//! use pystubber::{StubConfig, StubFile};
//!
//! let source = "def seed(a=None, version=2):\n    \"\"\"Initialize.\"\"\"\n";
//! let stub = StubFile::from_source("random", source, &StubConfig::default())?;
//! assert!(stub.text.contains("def seed(a=None, version=2):"));
//! # Ok::<(), anyhow::Error>(())
//! ```

mod descriptor;
mod docstring;
mod enumerator;
mod error;
mod export;
mod generate;
mod literal;
mod pyproject;
mod signature;

pub type Result<T> = anyhow::Result<T>;

pub use descriptor::*;
pub use error::{StubError, Warning, WarningKind, Warnings};
pub use generate::{
    AttributeDef, ClassDef, FunctionDef, InheritedGroup, MemberDef, ModuleDef, Parameter,
    Parameters, StubFile, PLACEHOLDER_BODY,
};
pub use pyproject::{PyProject, StubConfig, Tool};

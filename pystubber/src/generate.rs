//! Generate a documentation stub file of a Python module.

mod attribute;
mod class;
mod docstring;
mod function;
mod member;
mod module;
mod parameters;
mod stub_file;

pub use attribute::*;
pub use class::*;
pub use function::*;
pub use member::*;
pub use module::*;
pub use parameters::*;
pub use stub_file::*;

use std::fmt;

fn indent() -> &'static str {
    "    "
}

/// Write a rendered block one level deeper. Blank lines stay empty.
fn write_indented(f: &mut fmt::Formatter, block: &str) -> fmt::Result {
    let indent = indent();
    for line in block.lines() {
        if line.is_empty() {
            writeln!(f)?;
        } else {
            writeln!(f, "{indent}{line}")?;
        }
    }
    Ok(())
}

//! Selection and ordering of the members that make it into a stub.

use crate::{descriptor::*, Warnings, WarningKind};

/// Dunders that describe the module or class object itself rather than its
/// interface; never re-documented.
const HIDDEN_DUNDERS: &[&str] = &[
    "__author__",
    "__builtins__",
    "__cached__",
    "__credits__",
    "__date__",
    "__dict__",
    "__doc__",
    "__file__",
    "__loader__",
    "__module__",
    "__name__",
    "__package__",
    "__path__",
    "__qualname__",
    "__slots__",
    "__spec__",
    "__version__",
    "__weakref__",
];

/// Top-level members in emission order.
///
/// With an export list the list governs order and membership; names it
/// lists that are not defined are reported and skipped. Without one, public
/// members are kept in declaration order.
pub fn order_exports<'a>(
    module: &'a ModuleDescriptor,
    warnings: &mut Warnings,
) -> Vec<&'a MemberDescriptor> {
    let Some(export_list) = &module.export_list else {
        return module.members.iter().filter(|m| m.is_public()).collect();
    };

    let mut ordered: Vec<&MemberDescriptor> = Vec::with_capacity(export_list.len());
    for name in export_list {
        if ordered.iter().any(|m| m.name() == name) {
            log::debug!("`{name}` is listed twice in {}.__all__", module.name);
            continue;
        }
        match module.find(name) {
            Some(member) => ordered.push(member),
            None => warnings.record(
                WarningKind::ExportNotFound,
                format!("{}.{name}", module.name),
                "listed in __all__ but not defined in the module",
            ),
        }
    }
    let omitted = module
        .members
        .iter()
        .filter(|m| m.is_public() && !export_list.iter().any(|name| name == m.name()))
        .count();
    if omitted > 0 {
        log::debug!(
            "{omitted} public member(s) of {} are not listed in __all__",
            module.name
        );
    }
    ordered
}

/// Whether a class member is part of the documented interface.
///
/// Public names and dunders are shown; `_private` names only on request.
pub fn visible_in_class(name: &str, include_private: bool) -> bool {
    if HIDDEN_DUNDERS.contains(&name) {
        return false;
    }
    is_public_name(name) || is_dunder(name) || include_private
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn function(name: &str) -> MemberDescriptor {
        MemberDescriptor::Function(FunctionDescriptor::new(name, vec![]))
    }

    fn module(export_list: Option<&[&str]>, members: &[&str]) -> ModuleDescriptor {
        ModuleDescriptor {
            name: "random".to_string(),
            docstring: None,
            export_list: export_list.map(|l| l.iter().map(|s| s.to_string()).collect()),
            members: members.iter().map(|name| function(name)).collect(),
            metadata: ModuleMetadata::default(),
        }
    }

    fn names(members: &[&MemberDescriptor]) -> Vec<String> {
        members.iter().map(|m| m.name().to_string()).collect()
    }

    #[test]
    fn test_export_list_governs_order() {
        let module = module(Some(&["random", "seed"]), &["seed", "random", "extra"]);
        let mut warnings = Warnings::new();
        let ordered = order_exports(&module, &mut warnings);
        assert_eq!(names(&ordered), ["random", "seed"]);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_missing_export_is_warned_and_skipped() {
        let module = module(Some(&["seed", "random", "choice"]), &["seed", "random"]);
        let mut warnings = Warnings::new();
        let ordered = order_exports(&module, &mut warnings);
        assert_eq!(names(&ordered), ["seed", "random"]);
        let warnings = warnings.into_vec();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::ExportNotFound);
        assert_eq!(warnings[0].subject, "random.choice");
    }

    #[test]
    fn test_private_names_can_be_exported() {
        let module = module(Some(&["_helper"]), &["_helper", "public"]);
        let mut warnings = Warnings::new();
        assert_eq!(names(&order_exports(&module, &mut warnings)), ["_helper"]);
    }

    #[test]
    fn test_declaration_order_without_export_list() {
        let module = module(None, &["b", "_hidden", "a", "__dunder__"]);
        let mut warnings = Warnings::new();
        assert_eq!(names(&order_exports(&module, &mut warnings)), ["b", "a"]);
    }

    #[test_case("seed", false, true ; "public")]
    #[test_case("__init__", false, true ; "dunder")]
    #[test_case("__reduce__", false, true ; "pickle dunder")]
    #[test_case("_randbelow", false, false ; "private")]
    #[test_case("_randbelow", true, true ; "private on request")]
    #[test_case("__module__", true, false ; "hidden dunder")]
    #[test_case("__private", false, false ; "mangled")]
    fn test_visible_in_class(name: &str, include_private: bool, expected: bool) {
        assert_eq!(visible_in_class(name, include_private), expected);
    }
}

//! Member enumeration over a parsed Python module.
//!
//! Statements are walked in source order. A name keeps the position of its
//! first binding while the last binding decides what it describes, which is
//! what importing the module would leave behind.

mod mro;

use crate::{
    descriptor::*,
    docstring::{attribute_docstring, extract_docstring},
    literal::source_text,
    signature::*,
    StubError, WarningKind, Warnings,
};
use anyhow::Result;
use indexmap::IndexMap;
use rustpython_parser::{ast, Parse};
use std::collections::HashMap;

impl ModuleDescriptor {
    /// Parse `source` and enumerate the members of the module called `name`.
    ///
    /// Syntax errors abort; anything that merely cannot be enumerated is
    /// reported in the returned warnings.
    pub fn parse(name: &str, source: &str) -> Result<(Self, Warnings)> {
        let suite = ast::Suite::parse(source, name).map_err(|e| StubError::Parse {
            path: name.to_string(),
            message: e.to_string(),
        })?;
        let mut enumerator = ModuleEnumerator::new(name, source);
        enumerator.visit_module_body(&suite);
        let (module, warnings) = enumerator.finish(extract_docstring(&suite));
        module.validate()?;
        log::debug!(
            "enumerated {} top-level member(s) of {}",
            module.members.len(),
            module.name
        );
        Ok((module, warnings))
    }
}

#[derive(Debug)]
enum ExportList {
    Absent,
    Literal(Vec<String>),
    /// Built dynamically; visibility falls back to public names.
    Unknown,
}

struct ModuleEnumerator<'s> {
    name: String,
    source: &'s str,
    members: IndexMap<String, MemberDescriptor>,
    /// Module-level instances of module-level classes, e.g. `_inst = Random()`.
    instances: HashMap<String, String>,
    /// Names bound by imports, mapped to the module they come from.
    imports: HashMap<String, String>,
    export_list: ExportList,
    metadata: ModuleMetadata,
    warnings: Warnings,
}

/// The parts of `def` and `async def` statements enumeration cares about.
struct FunctionParts<'a> {
    name: &'a str,
    args: &'a ast::Arguments,
    body: &'a [ast::Stmt],
    decorators: &'a [ast::Expr],
    is_async: bool,
}

impl<'a> FunctionParts<'a> {
    fn from_def(def: &'a ast::StmtFunctionDef) -> Self {
        Self {
            name: def.name.as_str(),
            args: &def.args,
            body: &def.body,
            decorators: &def.decorator_list,
            is_async: false,
        }
    }

    fn from_async_def(def: &'a ast::StmtAsyncFunctionDef) -> Self {
        Self {
            name: def.name.as_str(),
            args: &def.args,
            body: &def.body,
            decorators: &def.decorator_list,
            is_async: true,
        }
    }

    fn build(&self, is_method: bool, source: &str) -> FunctionDescriptor {
        FunctionDescriptor {
            name: self.name.to_string(),
            docstring: extract_docstring(self.body),
            parameters: parameters_from_ast(self.args, source),
            is_method,
            is_async: self.is_async,
            decorator: if is_method {
                method_decorator(self.decorators)
            } else {
                None
            },
            best_effort: false,
            inherited_from: None,
        }
    }
}

impl<'s> ModuleEnumerator<'s> {
    fn new(name: &str, source: &'s str) -> Self {
        Self {
            name: name.to_string(),
            source,
            members: IndexMap::new(),
            instances: HashMap::new(),
            imports: HashMap::new(),
            export_list: ExportList::Absent,
            metadata: ModuleMetadata::default(),
            warnings: Warnings::new(),
        }
    }

    fn finish(mut self, docstring: Option<String>) -> (ModuleDescriptor, Warnings) {
        if let ExportList::Literal(names) = &self.export_list {
            for name in names {
                if self.members.contains_key(name) {
                    continue;
                }
                if let Some(origin) = self.imports.get(name) {
                    self.members.insert(
                        name.clone(),
                        MemberDescriptor::Attribute(AttributeDescriptor {
                            name: name.clone(),
                            docstring: Some(format!("Imported from `{origin}`.")),
                            inferred_default_repr: None,
                            inherited_from: None,
                        }),
                    );
                }
            }
        }
        let export_list = match self.export_list {
            ExportList::Literal(names) => Some(names),
            ExportList::Absent | ExportList::Unknown => None,
        };
        let module = ModuleDescriptor {
            name: self.name,
            docstring,
            export_list,
            members: self.members.into_values().collect(),
            metadata: self.metadata,
        };
        (module, self.warnings)
    }

    fn visit_module_body(&mut self, body: &[ast::Stmt]) {
        for (i, stmt) in body.iter().enumerate() {
            let next = body.get(i + 1);
            match stmt {
                ast::Stmt::FunctionDef(def) => {
                    let function = FunctionParts::from_def(def).build(false, self.source);
                    self.bind(MemberDescriptor::Function(function));
                }
                ast::Stmt::AsyncFunctionDef(def) => {
                    let function = FunctionParts::from_async_def(def).build(false, self.source);
                    self.bind(MemberDescriptor::Function(function));
                }
                ast::Stmt::ClassDef(def) => {
                    let scope = self.name.clone();
                    let class = self.class_from_def(def, &scope);
                    self.bind(MemberDescriptor::Class(class));
                }
                ast::Stmt::Assign(assign) => {
                    for target in &assign.targets {
                        self.assign(target, Some(&*assign.value), next);
                    }
                }
                ast::Stmt::AnnAssign(assign) => {
                    // A bare annotation binds nothing at module level.
                    if let Some(value) = assign.value.as_deref() {
                        self.assign(&assign.target, Some(value), next);
                    }
                }
                ast::Stmt::AugAssign(assign) => self.augment_export_list(assign),
                ast::Stmt::Expr(expr) => self.export_list_call(&expr.value),
                ast::Stmt::Delete(delete) => {
                    for target in &delete.targets {
                        if let ast::Expr::Name(name) = target {
                            self.unbind(name.id.as_str());
                        }
                    }
                }
                ast::Stmt::Import(import) => {
                    for alias in &import.names {
                        let (bound, origin) = match &alias.asname {
                            Some(asname) => (asname.as_str(), alias.name.as_str()),
                            None => {
                                let top = alias.name.as_str().split('.').next().unwrap_or_default();
                                (top, top)
                            }
                        };
                        self.import(bound, origin.to_string());
                    }
                }
                ast::Stmt::ImportFrom(import) => {
                    let level = import.level.as_ref().map_or(0, |level| level.to_usize());
                    let origin = format!(
                        "{}{}",
                        ".".repeat(level),
                        import.module.as_ref().map_or("", |module| module.as_str())
                    );
                    for alias in &import.names {
                        if alias.name.as_str() == "*" {
                            continue;
                        }
                        let bound = alias.asname.as_ref().unwrap_or(&alias.name);
                        self.import(bound.as_str(), origin.clone());
                    }
                }
                ast::Stmt::If(stmt) => {
                    if is_main_guard(&stmt.test) {
                        continue;
                    }
                    self.visit_module_body(&stmt.body);
                    self.visit_module_body(&stmt.orelse);
                }
                ast::Stmt::Try(stmt) => {
                    self.visit_module_body(&stmt.body);
                    for handler in &stmt.handlers {
                        let ast::ExceptHandler::ExceptHandler(handler) = handler;
                        self.visit_module_body(&handler.body);
                    }
                    self.visit_module_body(&stmt.orelse);
                    self.visit_module_body(&stmt.finalbody);
                }
                ast::Stmt::TryStar(stmt) => {
                    self.visit_module_body(&stmt.body);
                    for handler in &stmt.handlers {
                        let ast::ExceptHandler::ExceptHandler(handler) = handler;
                        self.visit_module_body(&handler.body);
                    }
                    self.visit_module_body(&stmt.orelse);
                    self.visit_module_body(&stmt.finalbody);
                }
                _ => {}
            }
        }
    }

    fn bind(&mut self, member: MemberDescriptor) {
        let name = member.name().to_string();
        if self.members.contains_key(&name) {
            log::debug!("`{}.{name}` is rebound; the last binding wins", self.name);
        }
        self.instances.remove(&name);
        self.imports.remove(&name);
        self.members.insert(name, member);
    }

    fn unbind(&mut self, name: &str) {
        if self.members.shift_remove(name).is_some() {
            log::debug!("`{}.{name}` is no longer defined by the module", self.name);
        }
        self.instances.remove(name);
        self.imports.remove(name);
    }

    /// Imported names are not members, but an export list may re-export them.
    fn import(&mut self, name: &str, origin: String) {
        self.unbind(name);
        self.imports.insert(name.to_string(), origin);
    }

    fn assign(&mut self, target: &ast::Expr, value: Option<&ast::Expr>, next: Option<&ast::Stmt>) {
        if let ast::Expr::Subscript(subscript) = target {
            if is_globals_call(&subscript.value) {
                self.warnings.record(
                    WarningKind::NotIntrospectable,
                    format!("{}.<globals()>", self.name),
                    "bindings made through globals() cannot be enumerated",
                );
            }
            return;
        }
        // Attribute docstrings only follow single-name assignments.
        let next = if matches!(target, ast::Expr::Name(_)) { next } else { None };
        for (name, value) in unpack_target(target, value) {
            self.assign_name(name, value, next);
        }
    }

    fn assign_name(&mut self, name: &str, value: Option<&ast::Expr>, next: Option<&ast::Stmt>) {
        match name {
            "__all__" => {
                match value.and_then(string_list) {
                    Some(names) => self.export_list = ExportList::Literal(names),
                    None => self.mark_export_list_dynamic(),
                }
                return;
            }
            "__version__" | "__date__" | "__author__" | "__credits__" => {
                if let Some(value) = value {
                    let text = match value {
                        ast::Expr::Constant(ast::ExprConstant {
                            value: ast::Constant::Str(s),
                            ..
                        }) => Some(s.clone()),
                        _ => self.render_value(&format!("{}.{name}", self.name), value),
                    };
                    if let Some(text) = text {
                        self.set_metadata(name, text);
                    }
                }
                return;
            }
            _ => {}
        }

        let docstring = attribute_docstring(next);
        let Some(value) = value else {
            self.bind(MemberDescriptor::Attribute(AttributeDescriptor {
                name: name.to_string(),
                docstring,
                inferred_default_repr: None,
                inherited_from: None,
            }));
            return;
        };
        let member = self.member_from_value(name, value, docstring);
        self.bind(member);
        if let Some(class) = self.instantiated_class(value) {
            log::debug!("`{}.{name}` is an instance of `{class}`", self.name);
            self.instances.insert(name.to_string(), class);
        }
    }

    fn member_from_value(
        &mut self,
        name: &str,
        value: &ast::Expr,
        docstring: Option<String>,
    ) -> MemberDescriptor {
        match value {
            ast::Expr::Name(alias) => {
                if let Some(function @ MemberDescriptor::Function(_)) =
                    self.members.get(alias.id.as_str())
                {
                    return function.renamed(name);
                }
            }
            ast::Expr::Attribute(attribute) => {
                if let ast::Expr::Name(receiver) = &*attribute.value {
                    if let Some(class) = self.instances.get(receiver.id.as_str()).cloned() {
                        if let Some(member) =
                            self.bound_method(name, &class, attribute.attr.as_str())
                        {
                            return member;
                        }
                    }
                }
            }
            ast::Expr::Lambda(lambda) => {
                return MemberDescriptor::Function(FunctionDescriptor {
                    docstring,
                    parameters: parameters_from_ast(&lambda.args, self.source),
                    ..FunctionDescriptor::new(name, Vec::new())
                });
            }
            _ => {}
        }
        MemberDescriptor::Attribute(AttributeDescriptor {
            name: name.to_string(),
            docstring,
            inferred_default_repr: self.render_value(&format!("{}.{name}", self.name), value),
            inherited_from: None,
        })
    }

    /// Value text of an attribute; `None` with a warning when it cannot be
    /// written back as a valid expression.
    fn render_value(&mut self, qualified: &str, value: &ast::Expr) -> Option<String> {
        let text = render_default(value, self.source);
        if text.is_none() {
            self.warnings.record(
                WarningKind::NotIntrospectable,
                qualified,
                "value cannot be written back as an expression; written as None",
            );
        }
        text
    }

    /// `name = instance.method`: the bound method becomes a module function.
    fn bound_method(&self, name: &str, class: &str, method: &str) -> Option<MemberDescriptor> {
        let Some(MemberDescriptor::Class(class_def)) = self.members.get(class) else {
            return None;
        };
        match class_def.find(method) {
            Some(MemberDescriptor::Function(function)) => {
                Some(MemberDescriptor::Function(bind_method(function, name)))
            }
            Some(_) => None,
            None if self.has_opaque_ancestry(class_def) => {
                log::debug!(
                    "`{}.{name}` is bound from `{class}.{method}`, implemented by an opaque base",
                    self.name
                );
                Some(MemberDescriptor::Function(FunctionDescriptor::opaque(
                    name, false,
                )))
            }
            None => None,
        }
    }

    fn has_opaque_ancestry(&self, class: &ClassDescriptor) -> bool {
        class
            .mro
            .iter()
            .skip(1)
            .any(|ancestor| !matches!(self.members.get(ancestor), Some(MemberDescriptor::Class(_))))
    }

    fn instantiated_class(&self, value: &ast::Expr) -> Option<String> {
        let ast::Expr::Call(call) = value else {
            return None;
        };
        let ast::Expr::Name(func) = &*call.func else {
            return None;
        };
        match self.members.get(func.id.as_str()) {
            Some(MemberDescriptor::Class(_)) => Some(func.id.as_str().to_string()),
            _ => None,
        }
    }

    fn set_metadata(&mut self, dunder: &str, text: String) {
        let slot = match dunder {
            "__version__" => &mut self.metadata.version,
            "__date__" => &mut self.metadata.date,
            "__author__" => &mut self.metadata.author,
            _ => &mut self.metadata.credits,
        };
        *slot = Some(text);
    }

    fn mark_export_list_dynamic(&mut self) {
        if matches!(self.export_list, ExportList::Unknown) {
            return;
        }
        self.warnings.record(
            WarningKind::ExportListNotLiteral,
            format!("{}.__all__", self.name),
            "not a literal sequence of strings; falling back to public names",
        );
        self.export_list = ExportList::Unknown;
    }

    fn extend_export_list(&mut self, names: Option<Vec<String>>) {
        let Some(names) = names else {
            self.mark_export_list_dynamic();
            return;
        };
        match &mut self.export_list {
            ExportList::Literal(list) => list.extend(names),
            ExportList::Absent => self.export_list = ExportList::Literal(names),
            ExportList::Unknown => {}
        }
    }

    /// `__all__ += [...]`
    fn augment_export_list(&mut self, assign: &ast::StmtAugAssign) {
        let ast::Expr::Name(target) = &*assign.target else {
            return;
        };
        if target.id.as_str() == "__all__" && matches!(assign.op, ast::Operator::Add) {
            self.extend_export_list(string_list(&assign.value));
        }
    }

    /// `__all__.extend([...])`, `__all__.append("x")` and `__all__.remove("x")`.
    fn export_list_call(&mut self, expr: &ast::Expr) {
        let ast::Expr::Call(call) = expr else {
            return;
        };
        let ast::Expr::Attribute(method) = &*call.func else {
            return;
        };
        if !matches!(&*method.value, ast::Expr::Name(name) if name.id.as_str() == "__all__") {
            return;
        }
        let argument = call.args.first();
        match method.attr.as_str() {
            "extend" => self.extend_export_list(argument.and_then(string_list)),
            "append" => self.extend_export_list(argument.and_then(string_constant).map(|s| vec![s])),
            "remove" => match argument.and_then(string_constant) {
                Some(name) => {
                    if let ExportList::Literal(list) = &mut self.export_list {
                        list.retain(|n| *n != name);
                    }
                }
                None => self.mark_export_list_dynamic(),
            },
            _ => {}
        }
    }

    fn class_from_def(&mut self, def: &ast::StmtClassDef, scope: &str) -> ClassDescriptor {
        let qualified = format!("{scope}.{}", def.name.as_str());
        let mut members = IndexMap::new();
        self.visit_class_body(&qualified, &def.body, &mut members);

        let mro = self.resolve_mro(&qualified, def);
        let base_classes = base_classes_from_ast(def, self.source).unwrap_or_else(|| {
            self.warnings.record(
                WarningKind::NotIntrospectable,
                qualified.as_str(),
                "class header cannot be written back; bases omitted",
            );
            Vec::new()
        });
        let mut class = ClassDescriptor {
            name: def.name.as_str().to_string(),
            docstring: extract_docstring(&def.body),
            base_classes,
            members: members.into_values().collect(),
            mro: if mro.len() > 1 { mro } else { Vec::new() },
        };
        self.add_inherited(&mut class);
        class
    }

    fn visit_class_body(
        &mut self,
        scope: &str,
        body: &[ast::Stmt],
        members: &mut IndexMap<String, MemberDescriptor>,
    ) {
        for (i, stmt) in body.iter().enumerate() {
            let next = body.get(i + 1);
            match stmt {
                ast::Stmt::FunctionDef(def) => {
                    self.add_method(scope, FunctionParts::from_def(def), members)
                }
                ast::Stmt::AsyncFunctionDef(def) => {
                    self.add_method(scope, FunctionParts::from_async_def(def), members)
                }
                ast::Stmt::ClassDef(def) => {
                    let nested = self.class_from_def(def, scope);
                    members.insert(nested.name.clone(), MemberDescriptor::Class(nested));
                }
                ast::Stmt::Assign(assign) => {
                    for target in &assign.targets {
                        self.class_assign(scope, target, Some(&*assign.value), next, members);
                    }
                }
                ast::Stmt::AnnAssign(assign) => {
                    self.class_assign(scope, &assign.target, assign.value.as_deref(), next, members)
                }
                ast::Stmt::If(stmt) => {
                    self.visit_class_body(scope, &stmt.body, members);
                    self.visit_class_body(scope, &stmt.orelse, members);
                }
                ast::Stmt::Try(stmt) => {
                    self.visit_class_body(scope, &stmt.body, members);
                    for handler in &stmt.handlers {
                        let ast::ExceptHandler::ExceptHandler(handler) = handler;
                        self.visit_class_body(scope, &handler.body, members);
                    }
                    self.visit_class_body(scope, &stmt.orelse, members);
                    self.visit_class_body(scope, &stmt.finalbody, members);
                }
                _ => {}
            }
        }
    }

    fn add_method(
        &mut self,
        scope: &str,
        parts: FunctionParts,
        members: &mut IndexMap<String, MemberDescriptor>,
    ) {
        if let Some(property) = property_accessor(parts.decorators) {
            if members.contains_key(property) {
                log::debug!("`{scope}.{}` merged into property `{property}`", parts.name);
                return;
            }
        }
        let method = parts.build(true, self.source);
        members.insert(method.name.clone(), MemberDescriptor::Function(method));
    }

    fn class_assign(
        &mut self,
        scope: &str,
        target: &ast::Expr,
        value: Option<&ast::Expr>,
        next: Option<&ast::Stmt>,
        members: &mut IndexMap<String, MemberDescriptor>,
    ) {
        let next = if matches!(target, ast::Expr::Name(_)) { next } else { None };
        for (name, value) in unpack_target(target, value) {
            let member = self.class_attribute(scope, name, value, next, members);
            members.insert(name.to_string(), member);
        }
    }

    fn class_attribute(
        &mut self,
        scope: &str,
        name: &str,
        value: Option<&ast::Expr>,
        next: Option<&ast::Stmt>,
        members: &IndexMap<String, MemberDescriptor>,
    ) -> MemberDescriptor {
        if let Some(ast::Expr::Name(alias)) = value {
            if let Some(function @ MemberDescriptor::Function(_)) = members.get(alias.id.as_str()) {
                return function.renamed(name);
            }
        }
        let qualified = format!("{scope}.{name}");
        MemberDescriptor::Attribute(AttributeDescriptor {
            name: name.to_string(),
            docstring: attribute_docstring(next),
            inferred_default_repr: value.and_then(|value| self.render_value(&qualified, value)),
            inherited_from: None,
        })
    }

    fn resolve_mro(&mut self, qualified: &str, def: &ast::StmtClassDef) -> Vec<String> {
        let bases: Vec<Vec<String>> = def
            .bases
            .iter()
            .filter_map(|base| source_text(base, self.source))
            .filter(|base| base != "object")
            .map(|base| match self.members.get(&base) {
                Some(MemberDescriptor::Class(local)) if !local.mro.is_empty() => local.mro.clone(),
                _ => vec![base],
            })
            .collect();
        mro::linearize(def.name.as_str(), &bases).unwrap_or_else(|err| {
            self.warnings.record(
                WarningKind::NotIntrospectable,
                qualified,
                format!("{err}; using depth-first order"),
            );
            mro::depth_first(def.name.as_str(), &bases)
        })
    }

    /// Append members of module-level ancestors that the class does not override.
    fn add_inherited(&self, class: &mut ClassDescriptor) {
        for ancestor in class.mro.iter().skip(1).cloned().collect::<Vec<_>>() {
            let Some(MemberDescriptor::Class(local)) = self.members.get(&ancestor) else {
                continue;
            };
            for member in &local.members {
                if member.inherited_from().is_some()
                    || matches!(member, MemberDescriptor::Class(_))
                    || class.find(member.name()).is_some()
                {
                    continue;
                }
                class.members.push(member.inherited(&ancestor));
            }
        }
    }
}

/// Names bound by an assignment target, each paired with its value when the
/// right-hand side unpacks element by element.
fn unpack_target<'a>(
    target: &'a ast::Expr,
    value: Option<&'a ast::Expr>,
) -> Vec<(&'a str, Option<&'a ast::Expr>)> {
    let mut bound = Vec::new();
    collect_bound(target, value, &mut bound);
    bound
}

fn collect_bound<'a>(
    target: &'a ast::Expr,
    value: Option<&'a ast::Expr>,
    bound: &mut Vec<(&'a str, Option<&'a ast::Expr>)>,
) {
    match target {
        ast::Expr::Name(name) => bound.push((name.id.as_str(), value)),
        ast::Expr::Tuple(ast::ExprTuple { elts, .. })
        | ast::Expr::List(ast::ExprList { elts, .. }) => {
            let values = value
                .and_then(|value| match value {
                    ast::Expr::Tuple(tuple) => Some(&tuple.elts),
                    ast::Expr::List(list) => Some(&list.elts),
                    _ => None,
                })
                .filter(|values| {
                    values.len() == elts.len()
                        && !values
                            .iter()
                            .chain(elts)
                            .any(|e| matches!(e, ast::Expr::Starred(_)))
                });
            for (i, elt) in elts.iter().enumerate() {
                collect_bound(elt, values.map(|values| &values[i]), bound);
            }
        }
        ast::Expr::Starred(starred) => collect_bound(&starred.value, None, bound),
        // Attributes and items of other objects are not members.
        _ => {}
    }
}

fn method_decorator(decorators: &[ast::Expr]) -> Option<MethodDecorator> {
    decorators.iter().find_map(|decorator| match decorator {
        ast::Expr::Name(name) => match name.id.as_str() {
            "cached_property" => Some(MethodDecorator::Property),
            other => MethodDecorator::from_name(other),
        },
        ast::Expr::Attribute(attribute) if attribute.attr.as_str() == "cached_property" => {
            Some(MethodDecorator::Property)
        }
        _ => None,
    })
}

/// `x` for a `@x.setter`, `@x.getter` or `@x.deleter` decorator.
fn property_accessor(decorators: &[ast::Expr]) -> Option<&str> {
    decorators.iter().find_map(|decorator| {
        let ast::Expr::Attribute(attribute) = decorator else {
            return None;
        };
        let ast::Expr::Name(property) = &*attribute.value else {
            return None;
        };
        matches!(attribute.attr.as_str(), "setter" | "getter" | "deleter")
            .then_some(property.id.as_str())
    })
}

fn string_constant(expr: &ast::Expr) -> Option<String> {
    match expr {
        ast::Expr::Constant(ast::ExprConstant {
            value: ast::Constant::Str(s),
            ..
        }) => Some(s.clone()),
        _ => None,
    }
}

/// Names of a literal `__all__`, following `+` concatenations.
fn string_list(expr: &ast::Expr) -> Option<Vec<String>> {
    match expr {
        ast::Expr::List(ast::ExprList { elts, .. }) | ast::Expr::Tuple(ast::ExprTuple { elts, .. }) => {
            elts.iter().map(string_constant).collect()
        }
        ast::Expr::BinOp(binop) if matches!(binop.op, ast::Operator::Add) => {
            let mut names = string_list(&binop.left)?;
            names.extend(string_list(&binop.right)?);
            Some(names)
        }
        _ => None,
    }
}

fn is_main_guard(test: &ast::Expr) -> bool {
    let ast::Expr::Compare(compare) = test else {
        return false;
    };
    let [right] = compare.comparators.as_slice() else {
        return false;
    };
    let is_name = |e: &ast::Expr| matches!(e, ast::Expr::Name(n) if n.id.as_str() == "__name__");
    let is_main = |e: &ast::Expr| string_constant(e).is_some_and(|s| s == "__main__");
    let left = &*compare.left;
    (is_name(left) && is_main(right)) || (is_main(left) && is_name(right))
}

fn is_globals_call(expr: &ast::Expr) -> bool {
    matches!(expr, ast::Expr::Call(call)
        if matches!(&*call.func, ast::Expr::Name(name) if name.id.as_str() == "globals"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> (ModuleDescriptor, Warnings) {
        ModuleDescriptor::parse("sample", source).unwrap()
    }

    fn names(members: &[MemberDescriptor]) -> Vec<&str> {
        members.iter().map(|m| m.name()).collect()
    }

    fn function<'a>(module: &'a ModuleDescriptor, name: &str) -> &'a FunctionDescriptor {
        match module.find(name) {
            Some(MemberDescriptor::Function(f)) => f,
            other => panic!("`{name}` is not a function: {other:?}"),
        }
    }

    fn class<'a>(module: &'a ModuleDescriptor, name: &str) -> &'a ClassDescriptor {
        match module.find(name) {
            Some(MemberDescriptor::Class(c)) => c,
            other => panic!("`{name}` is not a class: {other:?}"),
        }
    }

    #[test]
    fn test_declaration_order_and_docstrings() {
        let (module, warnings) = parse(
            r#"
"""Module doc."""

import os

def b():
    """B."""

class A:
    pass

_private = 1
VALUE = 3
"Doc of VALUE."
"#,
        );
        assert!(warnings.is_empty());
        assert_eq!(module.docstring.as_deref(), Some("Module doc."));
        assert_eq!(names(&module.members), ["b", "A", "_private", "VALUE"]);
        assert_eq!(function(&module, "b").docstring.as_deref(), Some("B."));
        let Some(MemberDescriptor::Attribute(value)) = module.find("VALUE") else {
            panic!("expected an attribute");
        };
        assert_eq!(value.inferred_default_repr.as_deref(), Some("3"));
        assert_eq!(value.docstring.as_deref(), Some("Doc of VALUE."));
    }

    #[test]
    fn test_last_binding_wins_in_first_position() {
        let (module, _) = parse(
            r#"
def seed(a=None):
    pass

def other():
    pass

seed = 42
"#,
        );
        assert_eq!(names(&module.members), ["seed", "other"]);
        assert!(matches!(module.find("seed"), Some(MemberDescriptor::Attribute(_))));
    }

    #[test]
    fn test_export_list_forms() {
        let (module, warnings) = parse(
            r#"
__all__ = ["a", "b"]
__all__ += ["c"]
__all__.extend(("d",))
__all__.append("e")
__all__.remove("b")
"#,
        );
        assert!(warnings.is_empty());
        assert_eq!(
            module.export_list,
            Some(vec!["a".into(), "c".into(), "d".into(), "e".into()])
        );
    }

    #[test]
    fn test_dynamic_export_list_is_warned() {
        let (module, warnings) = parse("__all__ = [name for name in dir()]\n");
        assert_eq!(module.export_list, None);
        let warnings = warnings.into_vec();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].kind, WarningKind::ExportListNotLiteral);
    }

    #[test]
    fn test_bound_methods_of_module_instance() {
        let (module, warnings) = parse(
            r#"
import _random

class Random(_random.Random):
    def seed(self, a=None, version=2):
        """Initialize internal state."""

_inst = Random()
seed = _inst.seed
getrandbits = _inst.getrandbits
"#,
        );
        let seed = function(&module, "seed");
        assert!(!seed.is_method);
        assert_eq!(
            seed.parameters,
            Some(vec![
                ParameterDescriptor::new("a", ParameterKind::Positional).with_default("None"),
                ParameterDescriptor::new("version", ParameterKind::Positional).with_default("2"),
            ])
        );
        assert_eq!(seed.docstring.as_deref(), Some("Initialize internal state."));

        let getrandbits = function(&module, "getrandbits");
        assert!(getrandbits.best_effort);
        assert_eq!(getrandbits.parameters, None);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_inherited_members_and_mro() {
        let (module, _) = parse(
            r#"
class Base:
    def __init__(self, x=None):
        """Base init."""
    def keep(self):
        pass

class Child(Base):
    def keep(self):
        """Overridden."""
"#,
        );
        let child = class(&module, "Child");
        assert_eq!(child.mro, ["Child", "Base"]);
        assert_eq!(names(&child.members), ["keep", "__init__"]);
        assert_eq!(child.members[1].inherited_from(), Some("Base"));
        assert_eq!(child.members[0].inherited_from(), None);
        assert!(class(&module, "Base").mro.is_empty());
    }

    #[test]
    fn test_property_accessors_merge() {
        let (module, _) = parse(
            r#"
class Box:
    @property
    def size(self):
        """Size."""
    @size.setter
    def size(self, value):
        pass
    @staticmethod
    def make():
        pass
"#,
        );
        let boxed = class(&module, "Box");
        let Some(MemberDescriptor::Function(size)) = boxed.find("size") else {
            panic!("expected a function");
        };
        assert_eq!(size.decorator, Some(MethodDecorator::Property));
        assert_eq!(size.docstring.as_deref(), Some("Size."));
        let Some(MemberDescriptor::Function(make)) = boxed.find("make") else {
            panic!("expected a function");
        };
        assert_eq!(make.decorator, Some(MethodDecorator::StaticMethod));
    }

    #[test]
    fn test_conditional_definitions_and_main_guard() {
        let (module, _) = parse(
            r#"
try:
    from _fast import accumulate
except ImportError:
    def accumulate(iterable):
        """Pure Python fallback."""

if __name__ == "__main__":
    def _test():
        pass
"#,
        );
        assert_eq!(names(&module.members), ["accumulate"]);
    }

    #[test]
    fn test_imports_and_del_unbind() {
        let (module, _) = parse(
            r#"
def log(x):
    pass

from math import log
tmp = 1
del tmp
"#,
        );
        assert!(module.members.is_empty());
    }

    fn attribute<'a>(members: &'a [MemberDescriptor], name: &str) -> &'a AttributeDescriptor {
        match members.iter().find(|m| m.name() == name) {
            Some(MemberDescriptor::Attribute(a)) => a,
            other => panic!("`{name}` is not an attribute: {other:?}"),
        }
    }

    #[test]
    fn test_imports_listed_in_export_list() {
        let (module, warnings) = parse(
            r#"
from .core import Engine, Session as _Session
import json as _json
import os.path

__all__ = ["Engine", "os", "run"]

def run():
    pass
"#,
        );
        assert!(warnings.is_empty());
        assert_eq!(names(&module.members), ["run", "Engine", "os"]);
        let engine = attribute(&module.members, "Engine");
        assert_eq!(engine.docstring.as_deref(), Some("Imported from `.core`."));
        assert_eq!(engine.inferred_default_repr, None);
        assert_eq!(
            attribute(&module.members, "os").docstring.as_deref(),
            Some("Imported from `os`.")
        );
    }

    #[test]
    fn test_rebound_import_is_a_member() {
        let (module, _) = parse(
            r#"
from math import pi
pi = 3.14
__all__ = ["pi"]
"#,
        );
        let pi = attribute(&module.members, "pi");
        assert_eq!(pi.inferred_default_repr.as_deref(), Some("3.14"));
        assert_eq!(pi.docstring, None);
    }

    #[test]
    fn test_class_unpacking_targets() {
        let (module, warnings) = parse(
            r#"
class Colors:
    RED, GREEN = 1, 2
    (ALPHA, *REST) = make()
    [LOW, HIGH] = ["l", "h"]
    A = B = 0
    self_ref.x = 5
"#,
        );
        assert!(warnings.is_empty());
        let colors = class(&module, "Colors");
        assert_eq!(
            names(&colors.members),
            ["RED", "GREEN", "ALPHA", "REST", "LOW", "HIGH", "A", "B"]
        );
        assert_eq!(attribute(&colors.members, "GREEN").inferred_default_repr.as_deref(), Some("2"));
        assert_eq!(attribute(&colors.members, "ALPHA").inferred_default_repr, None);
        assert_eq!(attribute(&colors.members, "HIGH").inferred_default_repr.as_deref(), Some("'h'"));
        assert_eq!(attribute(&colors.members, "B").inferred_default_repr.as_deref(), Some("0"));
    }

    #[test]
    fn test_multi_line_values_fold_without_comments() {
        let (module, warnings) = parse(
            "TABLE = make(\n 1,  # one\n 2,\n)\nLIMIT = 1 + \\\n    2 * N\n\ndef f(opts=dict(\n    a=1,  # first\n    b=2,\n)):\n    pass\n",
        );
        assert!(warnings.is_empty());
        assert_eq!(
            attribute(&module.members, "TABLE").inferred_default_repr.as_deref(),
            Some("make(1, 2,)")
        );
        assert_eq!(
            attribute(&module.members, "LIMIT").inferred_default_repr.as_deref(),
            Some("1 + 2 * N")
        );
        assert_eq!(
            function(&module, "f").parameters,
            Some(vec![ParameterDescriptor::new("opts", ParameterKind::Positional)
                .with_default("dict(a=1, b=2,)")])
        );
    }

    #[test]
    fn test_metadata_and_aliases() {
        let (module, _) = parse(
            r#"
__version__ = "1.2"
__author__ = "Someone"

def gauss(mu=0.0, sigma=1.0):
    """Gaussian distribution."""

normal = gauss
square = lambda x: x * x
"#,
        );
        assert_eq!(module.metadata.version.as_deref(), Some("1.2"));
        assert_eq!(module.metadata.author.as_deref(), Some("Someone"));
        assert_eq!(names(&module.members), ["gauss", "normal", "square"]);
        assert_eq!(
            function(&module, "normal").docstring.as_deref(),
            Some("Gaussian distribution.")
        );
        assert_eq!(
            function(&module, "square").parameters,
            Some(vec![ParameterDescriptor::new("x", ParameterKind::Positional)])
        );
    }

    #[test]
    fn test_syntax_error_is_fatal() {
        let err = ModuleDescriptor::parse("broken", "def f(:\n").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StubError>(),
            Some(StubError::Parse { .. })
        ));
    }
}

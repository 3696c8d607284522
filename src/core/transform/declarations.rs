//! Idempotent injection of imports and the accessor binding.

use swc_common::Spanned;
use swc_ecma_ast::{
    Callee, Decl, Expr, ImportDecl, ImportSpecifier, ModuleDecl, ModuleItem, ObjectPatProp, Pat,
    PropName, Stmt, VarDeclarator,
};
use tracing::debug;

use super::{
    ACCESSOR_HOOK, ACCESSOR_MODULE, REACTIVE_MEMBERS, REACTIVE_MODULE, TRANSLATE_FN,
    builders,
    error::TransformError,
    members::has_imported_member,
    report::{DeclarationChanges, ImportedMember},
};

/// A statement list element the injector can work on.
///
/// Implemented for top-level `ModuleItem`s and for `Stmt`s of a function body,
/// so the same injection code serves both reactive scope shapes.
pub trait ScopeItem: Spanned {
    /// The import declaration, if this item is one.
    fn import_decl(&self) -> Option<&ImportDecl>;

    /// The statement, if this item is one.
    fn statement(&self) -> Option<&Stmt>;

    fn from_stmt(stmt: Stmt) -> Self;

    fn is_import_decl(&self) -> bool {
        self.import_decl().is_some()
    }
}

impl ScopeItem for ModuleItem {
    fn import_decl(&self) -> Option<&ImportDecl> {
        match self {
            ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) => Some(decl),
            _ => None,
        }
    }

    fn statement(&self) -> Option<&Stmt> {
        match self {
            ModuleItem::Stmt(stmt) => Some(stmt),
            ModuleItem::ModuleDecl(_) => None,
        }
    }

    fn from_stmt(stmt: Stmt) -> Self {
        ModuleItem::Stmt(stmt)
    }
}

impl ScopeItem for Stmt {
    fn import_decl(&self) -> Option<&ImportDecl> {
        None
    }

    fn statement(&self) -> Option<&Stmt> {
        Some(self)
    }

    fn from_stmt(stmt: Stmt) -> Self {
        stmt
    }
}

/// Result of `ensure_declarations`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationOutcome {
    /// The program was empty and now holds only the canonical imports.
    Seeded,
    /// The program already had content; these imports were added or extended.
    Ensured(DeclarationChanges),
}

/// Ensure the `vue-i18n` and `vue` imports exist with every required member.
///
/// - An empty program is seeded with both canonical imports and nothing else.
/// - A missing declaration is prepended; `vue-i18n` first, then `vue`, so
///   `vue` ends up on top.
/// - An existing declaration missing a member gets the member appended;
///   other specifiers and their order are preserved.
///
/// Type-only declarations (`import type { Ref } from "vue"`) are not
/// considered. A namespace import of a governed module is rejected before
/// anything is modified.
pub fn ensure_declarations(
    items: &mut Vec<ModuleItem>,
) -> Result<DeclarationOutcome, TransformError> {
    if items.is_empty() {
        items.push(builders::import_decl(REACTIVE_MODULE, &REACTIVE_MEMBERS));
        items.push(builders::import_decl(ACCESSOR_MODULE, &[ACCESSOR_HOOK]));
        debug!("seeded empty program with canonical imports");
        return Ok(DeclarationOutcome::Seeded);
    }

    for module in [ACCESSOR_MODULE, REACTIVE_MODULE] {
        let is_namespace = find_governing_import(items, module).is_some_and(|decl| {
            decl.specifiers
                .iter()
                .any(|specifier| matches!(specifier, ImportSpecifier::Namespace(_)))
        });
        if is_namespace {
            return Err(TransformError::NamespaceImport {
                module: module.to_string(),
            });
        }
    }

    let mut changes = DeclarationChanges::default();
    ensure_import(items, ACCESSOR_MODULE, &[ACCESSOR_HOOK], &mut changes);
    ensure_import(items, REACTIVE_MODULE, &REACTIVE_MEMBERS, &mut changes);
    Ok(DeclarationOutcome::Ensured(changes))
}

/// Ensure `const { t } = useI18n()` exists in the statement list.
///
/// When no declarator destructures `t` from a `useI18n()` call, the canonical
/// binding is inserted before the first non-import statement (or at the end
/// when the list holds only imports). Existing bindings, including duplicates,
/// are left alone.
///
/// Returns whether a statement was inserted.
pub fn ensure_accessor_binding<T: ScopeItem>(items: &mut Vec<T>) -> bool {
    if items
        .iter()
        .filter_map(ScopeItem::statement)
        .any(declares_accessor)
    {
        return false;
    }

    let index = items
        .iter()
        .position(|item| !item.is_import_decl())
        .unwrap_or(items.len());
    items.insert(index, T::from_stmt(builders::accessor_binding()));
    debug!(index, "inserted accessor binding");
    true
}

fn is_governing(decl: &ImportDecl, module: &str) -> bool {
    !decl.type_only && decl.src.value.as_str() == Some(module)
}

fn find_governing_import<'a>(items: &'a [ModuleItem], module: &str) -> Option<&'a ImportDecl> {
    items
        .iter()
        .filter_map(ScopeItem::import_decl)
        .find(|decl| is_governing(decl, module))
}

fn find_governing_import_mut<'a>(
    items: &'a mut [ModuleItem],
    module: &str,
) -> Option<&'a mut ImportDecl> {
    items.iter_mut().find_map(|item| match item {
        ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) if is_governing(decl, module) => {
            Some(decl)
        }
        _ => None,
    })
}

fn ensure_import(
    items: &mut Vec<ModuleItem>,
    module: &str,
    members: &[&str],
    changes: &mut DeclarationChanges,
) {
    if let Some(decl) = find_governing_import_mut(items, module) {
        for member in members {
            if !has_imported_member(decl, member) {
                decl.specifiers.push(builders::named_specifier(member));
                debug!(module, member, "appended import member");
                changes.members_added.push(ImportedMember {
                    source: module.to_string(),
                    member: member.to_string(),
                });
            }
        }
        return;
    }

    items.insert(0, builders::import_decl(module, members));
    debug!(module, "prepended import declaration");
    changes.imports_added.push(module.to_string());
}

fn declares_accessor(stmt: &Stmt) -> bool {
    match stmt {
        Stmt::Decl(Decl::Var(var)) => var.decls.iter().any(is_accessor_declarator),
        _ => false,
    }
}

/// `{ t } = useI18n()`, `{ t: translate } = useI18n()`, `{ locale, t } = useI18n(...)`.
fn is_accessor_declarator(declarator: &VarDeclarator) -> bool {
    let Some(Expr::Call(call)) = declarator.init.as_deref() else {
        return false;
    };
    let Callee::Expr(callee) = &call.callee else {
        return false;
    };
    if !matches!(&**callee, Expr::Ident(ident) if ident.sym.as_str() == ACCESSOR_HOOK) {
        return false;
    }
    let Pat::Object(pattern) = &declarator.name else {
        return false;
    };
    pattern.props.iter().any(|prop| match prop {
        ObjectPatProp::Assign(assign) => assign.key.id.sym.as_str() == TRANSLATE_FN,
        ObjectPatProp::KeyValue(key_value) => {
            matches!(&key_value.key, PropName::Ident(key) if key.sym.as_str() == TRANSLATE_FN)
        }
        ObjectPatProp::Rest(_) => false,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use swc_ecma_ast::{Module, Prop, PropOrSpread};

    use super::*;
    use crate::core::parsers::script::{ScriptLang, parse_script};

    fn parse(code: &str) -> Module {
        parse_script(code.to_string(), "test.ts", ScriptLang::Ts)
            .unwrap()
            .module
    }

    fn imports(items: &[ModuleItem]) -> Vec<(String, Vec<String>)> {
        items
            .iter()
            .filter_map(ScopeItem::import_decl)
            .map(|decl| {
                let members = decl
                    .specifiers
                    .iter()
                    .filter_map(|specifier| match specifier {
                        ImportSpecifier::Named(named) => {
                            super::super::imported_name(named).map(str::to_string)
                        }
                        _ => None,
                    })
                    .collect();
                (
                    decl.src.value.as_str().unwrap_or_default().to_string(),
                    members,
                )
            })
            .collect()
    }

    fn count_bindings<T: ScopeItem>(items: &[T]) -> usize {
        items
            .iter()
            .filter_map(ScopeItem::statement)
            .filter(|stmt| declares_accessor(stmt))
            .count()
    }

    fn binding_index<T: ScopeItem>(items: &[T]) -> Option<usize> {
        items
            .iter()
            .position(|item| item.statement().is_some_and(declares_accessor))
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_seeds_empty_program() {
        let mut module = parse("");
        let outcome = ensure_declarations(&mut module.body).unwrap();

        assert_eq!(outcome, DeclarationOutcome::Seeded);
        assert_eq!(
            imports(&module.body),
            vec![
                ("vue".to_string(), strings(&["ref", "computed"])),
                ("vue-i18n".to_string(), strings(&["useI18n"])),
            ]
        );
        assert_eq!(module.body.len(), 2);
    }

    #[test]
    fn test_prepends_missing_imports_in_canonical_order() {
        let mut module = parse(r#"import { a } from "b";"#);
        let outcome = ensure_declarations(&mut module.body).unwrap();

        assert_eq!(
            imports(&module.body),
            vec![
                ("vue".to_string(), strings(&["ref", "computed"])),
                ("vue-i18n".to_string(), strings(&["useI18n"])),
                ("b".to_string(), strings(&["a"])),
            ]
        );
        assert_eq!(
            outcome,
            DeclarationOutcome::Ensured(DeclarationChanges {
                imports_added: strings(&["vue-i18n", "vue"]),
                members_added: Vec::new(),
            })
        );
    }

    #[test]
    fn test_appends_missing_ref() {
        let mut module = parse(
            r#"import { computed } from "vue";
import { useI18n } from "vue-i18n";"#,
        );
        ensure_declarations(&mut module.body).unwrap();

        assert_eq!(
            imports(&module.body),
            vec![
                ("vue".to_string(), strings(&["computed", "ref"])),
                ("vue-i18n".to_string(), strings(&["useI18n"])),
            ]
        );
    }

    #[test]
    fn test_appends_missing_computed() {
        let mut module = parse(
            r#"import { ref } from "vue";
import { useI18n } from "vue-i18n";"#,
        );
        ensure_declarations(&mut module.body).unwrap();

        assert_eq!(
            imports(&module.body)[0],
            ("vue".to_string(), strings(&["ref", "computed"]))
        );
    }

    #[test]
    fn test_appends_missing_use_i18n() {
        let mut module = parse(r#"import { ref, computed } from "vue"; import { other } from "vue-i18n""#);
        ensure_declarations(&mut module.body).unwrap();

        assert_eq!(
            imports(&module.body),
            vec![
                ("vue".to_string(), strings(&["ref", "computed"])),
                ("vue-i18n".to_string(), strings(&["other", "useI18n"])),
            ]
        );
    }

    #[test]
    fn test_member_present_in_every_combination() {
        let cases = [
            "const x = 1;",
            r#"import { reactive } from "vue";"#,
            r#"import { createI18n } from "vue-i18n";"#,
            r#"import { reactive } from "vue"; import { createI18n } from "vue-i18n";"#,
            r#"import { ref } from "vue";"#,
            r#"import { computed as c } from "vue"; import { useI18n } from "vue-i18n";"#,
        ];

        for code in cases {
            let mut module = parse(code);
            ensure_declarations(&mut module.body).unwrap();

            let all = imports(&module.body);
            for (module_name, member) in [("vue", "ref"), ("vue", "computed"), ("vue-i18n", "useI18n")]
            {
                let count = all
                    .iter()
                    .filter(|(source, _)| source == module_name)
                    .flat_map(|(_, members)| members)
                    .filter(|m| m.as_str() == member)
                    .count();
                assert_eq!(count, 1, "{} from {} in {:?}", member, module_name, code);
            }
            assert_eq!(
                all.iter().filter(|(source, _)| source == "vue").count(),
                1,
                "{:?}",
                code
            );
            assert_eq!(
                all.iter().filter(|(source, _)| source == "vue-i18n").count(),
                1,
                "{:?}",
                code
            );
        }
    }

    #[test]
    fn test_ensure_declarations_is_idempotent() {
        let mut once = parse(r#"import { computed } from "vue"; const a = 1;"#);
        ensure_declarations(&mut once.body).unwrap();
        let mut twice = once.clone();
        let outcome = ensure_declarations(&mut twice.body).unwrap();

        assert_eq!(once, twice);
        assert_eq!(
            outcome,
            DeclarationOutcome::Ensured(DeclarationChanges::default())
        );
    }

    #[test]
    fn test_type_only_import_is_not_governing() {
        let mut module = parse(r#"import type { Ref } from "vue"; const a = 1;"#);
        ensure_declarations(&mut module.body).unwrap();

        let all = imports(&module.body);
        assert_eq!(all[0], ("vue".to_string(), strings(&["ref", "computed"])));
        assert!(all.contains(&("vue".to_string(), strings(&["Ref"]))));
    }

    #[test]
    fn test_default_import_is_extended() {
        let mut module = parse(r#"import Vue from "vue"; const a = 1;"#);
        ensure_declarations(&mut module.body).unwrap();

        let decl = find_governing_import(&module.body, REACTIVE_MODULE).unwrap();
        assert_eq!(decl.specifiers.len(), 3);
        assert!(matches!(decl.specifiers[0], ImportSpecifier::Default(_)));
    }

    #[test]
    fn test_namespace_import_is_rejected_without_mutation() {
        let mut module = parse(r#"import * as Vue from "vue"; const a = 1;"#);
        let before = module.clone();
        let err = ensure_declarations(&mut module.body).unwrap_err();

        assert_eq!(
            err,
            TransformError::NamespaceImport {
                module: "vue".to_string()
            }
        );
        assert_eq!(module, before);
    }

    #[test]
    fn test_binding_inserted_after_imports() {
        let mut module = parse(
            r#"import { computed } from "vue";
import { useI18n } from "vue-i18n";
const a = 1;"#,
        );
        ensure_declarations(&mut module.body).unwrap();
        assert!(ensure_accessor_binding(&mut module.body));

        assert_eq!(binding_index(&module.body), Some(2));
        assert_eq!(count_bindings(&module.body), 1);
    }

    #[test]
    fn test_binding_appended_when_only_imports() {
        let mut module = parse(r#"import { a } from "b";"#);
        ensure_declarations(&mut module.body).unwrap();
        ensure_accessor_binding(&mut module.body);

        assert_eq!(module.body.len(), 4);
        assert_eq!(binding_index(&module.body), Some(3));
    }

    #[test]
    fn test_binding_lands_after_prepended_imports() {
        let mut module = parse("const a = 1;");
        ensure_declarations(&mut module.body).unwrap();
        ensure_accessor_binding(&mut module.body);

        assert_eq!(binding_index(&module.body), Some(2));
    }

    #[test]
    fn test_binding_is_idempotent() {
        let mut module = parse("const a = 1;");
        assert!(ensure_accessor_binding(&mut module.body));
        assert!(!ensure_accessor_binding(&mut module.body));
        assert_eq!(count_bindings(&module.body), 1);
    }

    #[test]
    fn test_existing_binding_forms_are_detected() {
        for code in [
            "const { t } = useI18n();",
            "const { t: translate } = useI18n();",
            "let { locale, t } = useI18n({ useScope: 'global' });",
            "const a = 1, { t } = useI18n();",
        ] {
            let mut module = parse(code);
            assert!(!ensure_accessor_binding(&mut module.body), "{}", code);
        }
    }

    #[test]
    fn test_binding_without_t_is_not_enough() {
        let mut module = parse("const { other } = useI18n();");
        assert!(ensure_accessor_binding(&mut module.body));

        assert_eq!(binding_index(&module.body), Some(0));
        assert_eq!(module.body.len(), 2);
    }

    #[test]
    fn test_duplicate_bindings_are_kept() {
        let mut module = parse("const { t } = useI18n();\nconst { t: t2 } = useI18n();");
        assert!(!ensure_accessor_binding(&mut module.body));
        assert_eq!(count_bindings(&module.body), 2);
    }

    #[test]
    fn test_binding_in_function_body() {
        let mut module = parse("export default { setup() { const a = 'xxx' } }");
        let ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(export)) = &mut module.body[0]
        else {
            panic!("expected default export");
        };
        let Expr::Object(object) = &mut *export.expr else {
            panic!("expected object literal");
        };
        let PropOrSpread::Prop(prop) = &mut object.props[0] else {
            panic!("expected property");
        };
        let Prop::Method(method) = &mut **prop else {
            panic!("expected method");
        };
        let body = method.function.body.as_mut().unwrap();

        assert!(ensure_accessor_binding(&mut body.stmts));
        assert!(!ensure_accessor_binding(&mut body.stmts));
        assert_eq!(body.stmts.len(), 2);
        assert_eq!(binding_index(&body.stmts), Some(0));
    }
}

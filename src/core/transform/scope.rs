//! Reactive scope detection and the transform entry point.

use swc_ecma_ast::{MethodProp, Module, ModuleDecl, ModuleItem, PropName};
use swc_ecma_visit::{VisitMut, VisitMutWith};
use tracing::debug;

use super::{
    SETUP_METHOD,
    declarations::{DeclarationOutcome, ScopeItem, ensure_accessor_binding, ensure_declarations},
    error::TransformError,
    literals::{LiteralRewriter, rewrite_literals},
    report::{ReactiveScope, TransformReport},
};
use crate::core::resolver::KeyResolver;

/// Transform a parsed script in place.
///
/// 1. Imports are ensured at top level.
/// 2. With a default export, every `setup() { ... }` method found inside it is
///    a reactive scope; otherwise the top-level statement list is.
/// 3. Each reactive scope gets the accessor binding once, then its literals
///    are rewritten.
///
/// An empty program is only seeded with the canonical imports.
pub fn transform_module<R: KeyResolver + ?Sized>(
    module: &mut Module,
    resolver: &R,
) -> Result<TransformReport, TransformError> {
    let mut report = TransformReport::default();

    match ensure_declarations(&mut module.body)? {
        DeclarationOutcome::Seeded => {
            report.seeded = true;
            return Ok(report);
        }
        DeclarationOutcome::Ensured(changes) => report.declarations = changes,
    }

    if module.body.iter().any(is_default_export) {
        let mut locator = SetupLocator {
            resolver,
            report: &mut report,
        };
        for item in module.body.iter_mut().filter(|item| is_default_export(item)) {
            item.visit_mut_with(&mut locator);
        }
        if report.scopes.is_empty() {
            debug!("default export has no setup method; no reactive scope");
        }
    } else {
        process_scope(&mut module.body, resolver, ReactiveScope::TopLevel, &mut report);
    }

    Ok(report)
}

fn is_default_export(item: &ModuleItem) -> bool {
    matches!(
        item,
        ModuleItem::ModuleDecl(ModuleDecl::ExportDefaultExpr(_) | ModuleDecl::ExportDefaultDecl(_))
    )
}

fn process_scope<'a, T, R>(
    items: &mut Vec<T>,
    resolver: &'a R,
    scope: ReactiveScope,
    report: &mut TransformReport,
) where
    T: ScopeItem,
    R: KeyResolver + ?Sized,
    Vec<T>: VisitMutWith<LiteralRewriter<'a, R>>,
{
    debug!(?scope, "processing reactive scope");
    if ensure_accessor_binding(items) {
        report.bindings_inserted += 1;
    }
    report.rewrites.extend(rewrite_literals(items, resolver));
    report.scopes.push(scope);
}

/// Finds `setup() { ... }` methods and processes each body as a reactive scope.
///
/// Only method syntax counts; `setup: function () {}` and `setup: () => {}`
/// are properties holding functions and are ignored.
struct SetupLocator<'a, 'r, R: KeyResolver + ?Sized> {
    resolver: &'a R,
    report: &'r mut TransformReport,
}

impl<R: KeyResolver + ?Sized> VisitMut for SetupLocator<'_, '_, R> {
    fn visit_mut_method_prop(&mut self, method: &mut MethodProp) {
        let is_setup = matches!(&method.key, PropName::Ident(key) if key.sym.as_str() == SETUP_METHOD);
        let span = method.function.span;
        if is_setup && let Some(body) = method.function.body.as_mut() {
            process_scope(
                &mut body.stmts,
                self.resolver,
                ReactiveScope::SetupMethod { span },
                self.report,
            );
            return;
        }
        method.visit_mut_children_with(self);
    }
}

//! String literal rewriting.
//!
//! Two rewrites, chosen by the literal's immediate parent:
//!
//! | Parent                         | Before              | After                               |
//! |--------------------------------|---------------------|-------------------------------------|
//! | argument of `ref(...)`         | `ref('hello world')`| `ref(t('message.hello'))`           |
//! | anything else                  | `'hi'`              | `computed(() => t('message.hi'))`   |
//!
//! The parent check is syntactic: any callee identifier named `ref` counts,
//! even a local function that shadows the `vue` import.

use swc_ecma_ast::{CallExpr, Callee, Expr, Lit};
use swc_ecma_visit::{VisitMut, VisitMutWith};
use tracing::debug;

use super::{
    REF_MEMBER, builders,
    report::{LiteralRewrite, RewriteCategory},
};
use crate::core::resolver::KeyResolver;

/// Visitor that replaces resolvable string literals in document order.
///
/// Only expression-position literals are candidates; import sources, string
/// property keys and type-level literals cannot hold a call and are skipped.
pub struct LiteralRewriter<'a, R: KeyResolver + ?Sized> {
    resolver: &'a R,
    rewrites: Vec<LiteralRewrite>,
}

impl<'a, R: KeyResolver + ?Sized> LiteralRewriter<'a, R> {
    pub fn new(resolver: &'a R) -> Self {
        Self {
            resolver,
            rewrites: Vec::new(),
        }
    }

    pub fn into_rewrites(self) -> Vec<LiteralRewrite> {
        self.rewrites
    }

    fn match_literal(&self, expr: &Expr, category: RewriteCategory) -> Option<LiteralRewrite> {
        let Expr::Lit(Lit::Str(literal)) = expr else {
            return None;
        };
        let text = literal.value.as_str()?;
        let key = self.resolver.resolve_key(text)?;
        Some(LiteralRewrite {
            text: text.to_string(),
            key,
            category,
            span: literal.span,
        })
    }

    fn record(&mut self, rewrite: LiteralRewrite) {
        debug!(
            text = %rewrite.text,
            key = %rewrite.key,
            category = ?rewrite.category,
            "rewrote literal"
        );
        self.rewrites.push(rewrite);
    }
}

fn is_ref_call(call: &CallExpr) -> bool {
    matches!(
        &call.callee,
        Callee::Expr(callee) if matches!(&**callee, Expr::Ident(ident) if ident.sym.as_str() == REF_MEMBER)
    )
}

/// `(('x'))` counts as a direct argument; the parentheses stay in place.
fn unparen_mut(expr: &mut Expr) -> &mut Expr {
    match expr {
        Expr::Paren(paren) => unparen_mut(&mut paren.expr),
        other => other,
    }
}

impl<R: KeyResolver + ?Sized> VisitMut for LiteralRewriter<'_, R> {
    fn visit_mut_call_expr(&mut self, call: &mut CallExpr) {
        if !is_ref_call(call) {
            call.visit_mut_children_with(self);
            return;
        }

        call.callee.visit_mut_with(self);
        for arg in &mut call.args {
            if arg.spread.is_none() {
                let target = unparen_mut(&mut arg.expr);
                if let Some(rewrite) = self.match_literal(target, RewriteCategory::RefArgument) {
                    *target = builders::translate_call(&rewrite.key, rewrite.span);
                    self.record(rewrite);
                    continue;
                }
            }
            arg.visit_mut_with(self);
        }
    }

    fn visit_mut_expr(&mut self, expr: &mut Expr) {
        if let Some(rewrite) = self.match_literal(expr, RewriteCategory::Computed) {
            // The replacement holds the key as a fresh literal; do not descend.
            *expr = builders::computed_call(&rewrite.key, rewrite.span);
            self.record(rewrite);
            return;
        }
        expr.visit_mut_children_with(self);
    }
}

/// Rewrite every resolvable string literal reachable from `scope`.
///
/// Returns the rewrites in document order.
pub fn rewrite_literals<'a, N, R>(scope: &mut N, resolver: &'a R) -> Vec<LiteralRewrite>
where
    N: VisitMutWith<LiteralRewriter<'a, R>> + ?Sized,
    R: KeyResolver + ?Sized,
{
    let mut rewriter = LiteralRewriter::new(resolver);
    scope.visit_mut_with(&mut rewriter);
    rewriter.into_rewrites()
}

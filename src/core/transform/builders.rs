//! Synthesized nodes.
//!
//! Everything built here uses `DUMMY_SP` except the outermost node of a
//! literal replacement, which takes the replaced literal's span.

use swc_common::{DUMMY_SP, Span, SyntaxContext};
use swc_ecma_ast::{
    ArrowExpr, AssignPatProp, BlockStmtOrExpr, CallExpr, Callee, Decl, Expr, ExprOrSpread, Ident,
    ImportDecl, ImportNamedSpecifier, ImportPhase, ImportSpecifier, Lit, ModuleDecl, ModuleItem,
    ObjectPat, ObjectPatProp, Pat, Stmt, Str, VarDecl, VarDeclKind, VarDeclarator,
};

use super::{ACCESSOR_HOOK, COMPUTED_MEMBER, TRANSLATE_FN};

fn ident(name: &str) -> Ident {
    Ident::new(name.into(), DUMMY_SP, SyntaxContext::empty())
}

fn arg(expr: Expr) -> ExprOrSpread {
    ExprOrSpread {
        spread: None,
        expr: Box::new(expr),
    }
}

fn call(callee: &str, args: Vec<ExprOrSpread>, span: Span) -> Expr {
    Expr::Call(CallExpr {
        span,
        ctxt: SyntaxContext::empty(),
        callee: Callee::Expr(Box::new(Expr::Ident(ident(callee)))),
        args,
        type_args: None,
    })
}

/// `{ member }`
pub(super) fn named_specifier(member: &str) -> ImportSpecifier {
    ImportSpecifier::Named(ImportNamedSpecifier {
        span: DUMMY_SP,
        local: ident(member),
        imported: None,
        is_type_only: false,
    })
}

/// `import { a, b } from "source"`
pub(super) fn import_decl(source: &str, members: &[&str]) -> ModuleItem {
    ModuleItem::ModuleDecl(ModuleDecl::Import(ImportDecl {
        span: DUMMY_SP,
        specifiers: members.iter().map(|member| named_specifier(member)).collect(),
        src: Box::new(Str::from(source)),
        type_only: false,
        with: None,
        phase: ImportPhase::Evaluation,
    }))
}

/// `const { t } = useI18n()`
pub(super) fn accessor_binding() -> Stmt {
    Stmt::Decl(Decl::Var(Box::new(VarDecl {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        kind: VarDeclKind::Const,
        declare: false,
        decls: vec![VarDeclarator {
            span: DUMMY_SP,
            name: Pat::Object(ObjectPat {
                span: DUMMY_SP,
                props: vec![ObjectPatProp::Assign(AssignPatProp {
                    span: DUMMY_SP,
                    key: ident(TRANSLATE_FN).into(),
                    value: None,
                })],
                optional: false,
                type_ann: None,
            }),
            init: Some(Box::new(call(ACCESSOR_HOOK, Vec::new(), DUMMY_SP))),
            definite: false,
        }],
    })))
}

/// `t('key')`, spanning `span`.
pub(super) fn translate_call(key: &str, span: Span) -> Expr {
    call(
        TRANSLATE_FN,
        vec![arg(Expr::Lit(Lit::Str(Str::from(key))))],
        span,
    )
}

/// `computed(() => t('key'))`, spanning `span`.
pub(super) fn computed_call(key: &str, span: Span) -> Expr {
    let getter = Expr::Arrow(ArrowExpr {
        span: DUMMY_SP,
        ctxt: SyntaxContext::empty(),
        params: Vec::new(),
        body: Box::new(BlockStmtOrExpr::Expr(Box::new(translate_call(
            key, DUMMY_SP,
        )))),
        is_async: false,
        is_generator: false,
        type_params: None,
        return_type: None,
    });
    call(COMPUTED_MEMBER, vec![arg(getter)], span)
}

//! Source-preserving printer for transformed scripts.
//!
//! Instead of regenerating the whole program, the printer copies the original
//! text and splices in only what the transform produced:
//!
//! - statements with a dummy span are rendered and inserted next to their
//!   nearest original neighbour, using that neighbour's indentation;
//! - import specifiers with a dummy span are appended after the last original
//!   specifier of their declaration;
//! - a call with a real span but a synthesized callee replaced a literal and is
//!   rendered over the literal's text.
//!
//! Rendering only covers the node shapes the transform synthesizes.

use std::ops::Range;

use swc_common::{BytePos, Span, Spanned};
use swc_ecma_ast::{
    BlockStmt, BlockStmtOrExpr, CallExpr, Callee, Decl, Expr, ImportDecl, ImportNamedSpecifier,
    ImportSpecifier, Lit, Module, ModuleDecl, ModuleExportName, ModuleItem, ObjectPatProp, Pat,
    PropName, Stmt, Str, VarDecl, VarDeclKind,
};
use swc_ecma_visit::{Visit, VisitWith};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PrintError {
    #[error("cannot print synthesized {0}")]
    Unsupported(&'static str),
    #[error("overlapping edits at byte {0}")]
    OverlappingEdits(usize),
}

type RenderResult = Result<String, PrintError>;

#[derive(Debug)]
struct Edit {
    range: Range<usize>,
    text: String,
}

/// Print `module`, whose real spans point into `source` starting at `start_pos`.
pub fn print_module(module: &Module, source: &str, start_pos: BytePos) -> RenderResult {
    let mut collector = EditCollector {
        source,
        start_pos,
        edits: Vec::new(),
        error: None,
    };
    module.visit_with(&mut collector);

    if let Some(error) = collector.error {
        return Err(error);
    }
    apply_edits(source, collector.edits)
}

fn apply_edits(source: &str, mut edits: Vec<Edit>) -> RenderResult {
    // Stable: insertions keep their collection order at equal offsets.
    edits.sort_by_key(|edit| edit.range.start);

    let mut output = String::with_capacity(source.len() + edits.len() * 32);
    let mut cursor = 0;
    for edit in edits {
        if edit.range.start < cursor {
            return Err(PrintError::OverlappingEdits(edit.range.start));
        }
        output.push_str(&source[cursor..edit.range.start]);
        output.push_str(&edit.text);
        cursor = edit.range.end;
    }
    output.push_str(&source[cursor..]);
    Ok(output)
}

struct EditCollector<'a> {
    source: &'a str,
    start_pos: BytePos,
    edits: Vec<Edit>,
    error: Option<PrintError>,
}

impl EditCollector<'_> {
    fn offset(&self, pos: BytePos) -> usize {
        (pos.0.saturating_sub(self.start_pos.0) as usize).min(self.source.len())
    }

    /// Leading whitespace of the line containing `offset`.
    fn line_indent(&self, offset: usize) -> &str {
        let line_start = self.source[..offset].rfind('\n').map_or(0, |i| i + 1);
        let width = self.source[line_start..]
            .bytes()
            .take_while(|b| *b == b' ' || *b == b'\t')
            .count();
        &self.source[line_start..line_start + width]
    }

    fn insert(&mut self, at: usize, text: String) {
        self.edits.push(Edit {
            range: at..at,
            text,
        });
    }

    fn replace(&mut self, range: Range<usize>, text: String) {
        self.edits.push(Edit { range, text });
    }

    fn fail(&mut self, error: PrintError) {
        self.error.get_or_insert(error);
    }

    /// Queue insertions for every run of synthesized items in a statement list.
    ///
    /// `block` is the enclosing `{ ... }` span, `None` for the module body.
    fn statement_list<T: Spanned>(
        &mut self,
        items: &[T],
        render: fn(&T) -> RenderResult,
        block: Option<Span>,
    ) {
        let mut index = 0;
        while index < items.len() {
            if !items[index].span().is_dummy() {
                index += 1;
                continue;
            }
            let run_start = index;
            while index < items.len() && items[index].span().is_dummy() {
                index += 1;
            }

            let rendered = match items[run_start..index]
                .iter()
                .map(render)
                .collect::<Result<Vec<_>, _>>()
            {
                Ok(rendered) => rendered,
                Err(error) => return self.fail(error),
            };

            if let Some(next) = items.get(index) {
                let at = self.offset(next.span().lo);
                let indent = self.line_indent(at).to_string();
                let text = rendered
                    .iter()
                    .map(|r| format!("{}\n{}", r, indent))
                    .collect();
                self.insert(at, text);
            } else if run_start > 0 {
                let previous = items[run_start - 1].span();
                let indent = self.line_indent(self.offset(previous.lo)).to_string();
                let text = rendered
                    .iter()
                    .map(|r| format!("\n{}{}", indent, r))
                    .collect();
                self.insert(self.offset(previous.hi), text);
            } else {
                self.fully_synthesized(&rendered, block);
            }
        }
    }

    fn fully_synthesized(&mut self, rendered: &[String], block: Option<Span>) {
        let Some(block) = block else {
            let text = rendered.iter().map(|r| format!("{}\n", r)).collect();
            self.insert(0, text);
            return;
        };

        let open = self.offset(block.lo) + 1;
        let close = self.offset(block.hi).saturating_sub(1).max(open);
        let outer = self.line_indent(open).to_string();
        let mut text: String = rendered
            .iter()
            .map(|r| format!("\n{}  {}", outer, r))
            .collect();

        if self.source[open..close].trim().is_empty() {
            text.push('\n');
            text.push_str(&outer);
            self.replace(open..close, text);
        } else {
            // Comment-only body: keep it after the new statements.
            self.insert(open, text);
        }
    }

    fn import_specifiers(&mut self, decl: &ImportDecl) {
        let (added, original): (Vec<&ImportSpecifier>, Vec<&ImportSpecifier>) = decl
            .specifiers
            .iter()
            .partition(|specifier| specifier.span().is_dummy());
        if added.is_empty() {
            return;
        }

        let names = match added
            .into_iter()
            .map(render_specifier)
            .collect::<Result<Vec<_>, _>>()
        {
            Ok(names) => names.join(", "),
            Err(error) => return self.fail(error),
        };

        match original.as_slice() {
            [] => {
                let lo = self.offset(decl.span.lo);
                let src_lo = self.offset(decl.src.span.lo);
                match self.source[lo..src_lo].find('{') {
                    // `import {} from "vue"`
                    Some(brace) => self.insert(lo + brace + 1, format!(" {} ", names)),
                    // `import "vue"`
                    None => self.insert(src_lo, format!("{{ {} }} from ", names)),
                }
            }
            [ImportSpecifier::Default(default)] => {
                let at = self.offset(default.span.hi);
                self.insert(at, format!(", {{ {} }}", names));
            }
            [.., last] => {
                let anchor = self.offset(last.span().hi);
                let rest = &self.source[anchor..];
                let trimmed = rest.trim_start();
                if trimmed.starts_with(',') {
                    let at = anchor + (rest.len() - trimmed.len()) + 1;
                    self.insert(at, format!(" {}", names));
                } else {
                    self.insert(anchor, format!(", {}", names));
                }
            }
        }
    }
}

impl Visit for EditCollector<'_> {
    fn visit_module(&mut self, module: &Module) {
        self.statement_list(&module.body, render_module_item, None);
        for item in module.body.iter().filter(|item| !item.span().is_dummy()) {
            item.visit_with(self);
        }
    }

    fn visit_block_stmt(&mut self, block: &BlockStmt) {
        self.statement_list(&block.stmts, render_stmt, Some(block.span));
        for stmt in block.stmts.iter().filter(|stmt| !stmt.span().is_dummy()) {
            stmt.visit_with(self);
        }
    }

    fn visit_import_decl(&mut self, decl: &ImportDecl) {
        self.import_specifiers(decl);
    }

    fn visit_call_expr(&mut self, call: &CallExpr) {
        if !call.span.is_dummy() && call.callee.span().is_dummy() {
            match render_call(call) {
                Ok(text) => {
                    let range = self.offset(call.span.lo)..self.offset(call.span.hi);
                    self.replace(range, text);
                }
                Err(error) => self.fail(error),
            }
            return;
        }
        call.visit_children_with(self);
    }
}

fn render_module_item(item: &ModuleItem) -> RenderResult {
    match item {
        ModuleItem::ModuleDecl(ModuleDecl::Import(decl)) => render_import(decl),
        ModuleItem::ModuleDecl(_) => Err(PrintError::Unsupported("module declaration")),
        ModuleItem::Stmt(stmt) => render_stmt(stmt),
    }
}

fn render_import(decl: &ImportDecl) -> RenderResult {
    let mut default = None;
    let mut named = Vec::new();
    for specifier in &decl.specifiers {
        match specifier {
            ImportSpecifier::Default(specifier) => default = Some(specifier.local.sym.as_str()),
            ImportSpecifier::Named(specifier) => named.push(render_named(specifier)?),
            ImportSpecifier::Namespace(_) => {
                return Err(PrintError::Unsupported("namespace import"));
            }
        }
    }

    let source = quote(&decl.src, '"')?;
    let clause = match (default, named.is_empty()) {
        (None, true) => return Ok(format!("import {};", source)),
        (None, false) => format!("{{ {} }}", named.join(", ")),
        (Some(default), true) => default.to_string(),
        (Some(default), false) => format!("{}, {{ {} }}", default, named.join(", ")),
    };
    Ok(format!("import {} from {};", clause, source))
}

fn render_specifier(specifier: &ImportSpecifier) -> RenderResult {
    match specifier {
        ImportSpecifier::Named(named) => render_named(named),
        ImportSpecifier::Default(_) | ImportSpecifier::Namespace(_) => {
            Err(PrintError::Unsupported("appended default or namespace specifier"))
        }
    }
}

fn render_named(specifier: &ImportNamedSpecifier) -> RenderResult {
    let local = specifier.local.sym.as_str();
    match &specifier.imported {
        None => Ok(local.to_string()),
        Some(ModuleExportName::Ident(imported)) => {
            Ok(format!("{} as {}", imported.sym.as_str(), local))
        }
        Some(ModuleExportName::Str(imported)) => {
            Ok(format!("{} as {}", quote(imported, '"')?, local))
        }
    }
}

fn render_stmt(stmt: &Stmt) -> RenderResult {
    match stmt {
        Stmt::Decl(Decl::Var(var)) => render_var_decl(var),
        Stmt::Expr(expr) => Ok(format!("{};", render_expr(&expr.expr)?)),
        _ => Err(PrintError::Unsupported("statement")),
    }
}

fn render_var_decl(var: &VarDecl) -> RenderResult {
    let kind = match var.kind {
        VarDeclKind::Const => "const",
        VarDeclKind::Let => "let",
        VarDeclKind::Var => "var",
    };
    let declarators = var
        .decls
        .iter()
        .map(|declarator| {
            let name = render_pat(&declarator.name)?;
            match &declarator.init {
                Some(init) => Ok(format!("{} = {}", name, render_expr(init)?)),
                None => Ok(name),
            }
        })
        .collect::<Result<Vec<_>, PrintError>>()?;
    Ok(format!("{} {};", kind, declarators.join(", ")))
}

fn render_pat(pat: &Pat) -> RenderResult {
    match pat {
        Pat::Ident(binding) => Ok(binding.id.sym.to_string()),
        Pat::Object(object) => {
            let props = object
                .props
                .iter()
                .map(|prop| match prop {
                    ObjectPatProp::Assign(assign) if assign.value.is_none() => {
                        Ok(assign.key.id.sym.to_string())
                    }
                    ObjectPatProp::KeyValue(key_value) => match &key_value.key {
                        PropName::Ident(key) => {
                            Ok(format!("{}: {}", key.sym.as_str(), render_pat(&key_value.value)?))
                        }
                        _ => Err(PrintError::Unsupported("computed pattern key")),
                    },
                    _ => Err(PrintError::Unsupported("pattern property")),
                })
                .collect::<Result<Vec<_>, PrintError>>()?;
            Ok(format!("{{ {} }}", props.join(", ")))
        }
        _ => Err(PrintError::Unsupported("pattern")),
    }
}

fn render_expr(expr: &Expr) -> RenderResult {
    match expr {
        Expr::Ident(ident) => Ok(ident.sym.to_string()),
        Expr::Lit(Lit::Str(literal)) => quote(literal, '\''),
        Expr::Call(call) => render_call(call),
        Expr::Arrow(arrow) if arrow.params.is_empty() && !arrow.is_async => match &*arrow.body {
            BlockStmtOrExpr::Expr(body) => Ok(format!("() => {}", render_expr(body)?)),
            BlockStmtOrExpr::BlockStmt(_) => Err(PrintError::Unsupported("arrow function body")),
        },
        _ => Err(PrintError::Unsupported("expression")),
    }
}

fn render_call(call: &CallExpr) -> RenderResult {
    let Callee::Expr(callee) = &call.callee else {
        return Err(PrintError::Unsupported("callee"));
    };
    if call.type_args.is_some() {
        return Err(PrintError::Unsupported("type arguments"));
    }
    let args = call
        .args
        .iter()
        .map(|arg| match arg.spread {
            Some(_) => Err(PrintError::Unsupported("spread argument")),
            None => render_expr(&arg.expr),
        })
        .collect::<Result<Vec<_>, PrintError>>()?;
    Ok(format!("{}({})", render_expr(callee)?, args.join(", ")))
}

fn quote(literal: &Str, quote: char) -> RenderResult {
    let value = literal
        .value
        .as_str()
        .ok_or(PrintError::Unsupported("non UTF-8 string"))?;
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push(quote);
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            c if c == quote => {
                quoted.push('\\');
                quoted.push(c);
            }
            c => quoted.push(c),
        }
    }
    quoted.push(quote);
    Ok(quoted)
}

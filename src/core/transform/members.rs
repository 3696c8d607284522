use swc_ecma_ast::{ImportDecl, ImportNamedSpecifier, ImportSpecifier, ModuleExportName};

/// Returns the name a named specifier imports from its module.
///
/// `import { a as b }` imports `a`; `import { a }` imports `a`.
/// Returns `None` for string names that are not valid UTF-8.
pub fn imported_name(specifier: &ImportNamedSpecifier) -> Option<&str> {
    match &specifier.imported {
        Some(ModuleExportName::Ident(ident)) => Some(ident.sym.as_str()),
        Some(ModuleExportName::Str(name)) => name.value.as_str(),
        None => Some(specifier.local.sym.as_str()),
    }
}

/// Check whether an import declaration already imports `member` by name.
///
/// The local alias is irrelevant: `import { ref as vueRef }` still binds `ref`.
/// Default and namespace specifiers never match.
pub fn has_imported_member(decl: &ImportDecl, member: &str) -> bool {
    decl.specifiers.iter().any(|specifier| match specifier {
        ImportSpecifier::Named(named) => imported_name(named) == Some(member),
        ImportSpecifier::Default(_) | ImportSpecifier::Namespace(_) => false,
    })
}

use swc_common::Span;

/// How a matched literal was rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RewriteCategory {
    /// Direct argument of `ref(...)`: the literal becomes `t('key')`.
    RefArgument,
    /// Any other position: the expression becomes `computed(() => t('key'))`.
    Computed,
}

impl RewriteCategory {
    /// Render the replacement the way it appears in source.
    pub fn replacement(self, key: &str) -> String {
        match self {
            RewriteCategory::RefArgument => format!("t('{}')", key),
            RewriteCategory::Computed => format!("computed(() => t('{}'))", key),
        }
    }
}

/// A single literal replaced by a translation lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LiteralRewrite {
    /// Original literal value.
    pub text: String,
    /// Translation key returned by the resolver.
    pub key: String,
    pub category: RewriteCategory,
    /// Span of the original literal.
    pub span: Span,
}

/// Statement list the accessor binding and rewrites were applied to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReactiveScope {
    /// Top-level statements (`<script setup>`).
    TopLevel,
    /// Body of a `setup()` method inside the default export.
    SetupMethod { span: Span },
}

/// A member appended to an existing import declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportedMember {
    pub source: String,
    pub member: String,
}

/// Import changes made by `ensure_declarations`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclarationChanges {
    /// Sources of import declarations prepended to the program, in insertion order.
    pub imports_added: Vec<String>,
    /// Members appended to existing declarations.
    pub members_added: Vec<ImportedMember>,
}

impl DeclarationChanges {
    pub fn is_empty(&self) -> bool {
        self.imports_added.is_empty() && self.members_added.is_empty()
    }
}

/// Summary of one `transform_module` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransformReport {
    /// The program was empty and received only the canonical imports.
    pub seeded: bool,
    pub declarations: DeclarationChanges,
    /// Reactive scopes found, in document order.
    pub scopes: Vec<ReactiveScope>,
    /// Number of `const { t } = useI18n()` statements inserted.
    pub bindings_inserted: usize,
    /// Rewritten literals, in document order.
    pub rewrites: Vec<LiteralRewrite>,
}

impl TransformReport {
    /// True when the tree was not modified.
    pub fn is_unchanged(&self) -> bool {
        !self.seeded
            && self.declarations.is_empty()
            && self.bindings_inserted == 0
            && self.rewrites.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replacement_text() {
        assert_eq!(
            RewriteCategory::RefArgument.replacement("message.hello"),
            "t('message.hello')"
        );
        assert_eq!(
            RewriteCategory::Computed.replacement("message.hi"),
            "computed(() => t('message.hi'))"
        );
    }

    #[test]
    fn test_default_report_is_unchanged() {
        let report = TransformReport::default();
        assert!(report.is_unchanged());

        let report = TransformReport {
            bindings_inserted: 1,
            ..Default::default()
        };
        assert!(!report.is_unchanged());
    }
}

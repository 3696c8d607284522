//! Script transformation engine.
//!
//! Rewrites a parsed `<script>` module so that hardcoded strings with known
//! translations go through `vue-i18n`:
//!
//! ```text
//! const title = ref('hello world')   →   const title = ref(t('message.hello'))
//! const label = 'hi'                 →   const label = computed(() => t('message.hi'))
//! ```
//!
//! and guarantees the supporting declarations exist exactly once:
//!
//! ```text
//! import { ref, computed } from "vue";
//! import { useI18n } from "vue-i18n";
//! const { t } = useI18n();
//! ```
//!
//! ## Module Structure
//!
//! - `members`: import specifier presence checks
//! - `declarations`: import and accessor-binding injection
//! - `scope`: reactive scope detection (`<script setup>` vs `export default { setup() }`)
//! - `literals`: string literal rewriting
//! - `builders`: synthesized AST nodes
//!
//! The engine mutates the tree in place. Synthesized nodes carry `DUMMY_SP`;
//! an expression that replaces a literal keeps the literal's span so the
//! printer can splice it back into the original text.

mod builders;
mod declarations;
mod error;
mod literals;
mod members;
mod report;
mod scope;

pub use declarations::{DeclarationOutcome, ScopeItem, ensure_accessor_binding, ensure_declarations};
pub use error::TransformError;
pub use literals::{LiteralRewriter, rewrite_literals};
pub use members::{has_imported_member, imported_name};
pub use report::{
    DeclarationChanges, ImportedMember, LiteralRewrite, ReactiveScope, RewriteCategory,
    TransformReport,
};
pub use scope::transform_module;

/// Module providing the reactive primitives.
pub const REACTIVE_MODULE: &str = "vue";
/// Plain reactive wrapper, `ref(value)`.
pub const REF_MEMBER: &str = "ref";
/// Derived value wrapper, `computed(getter)`.
pub const COMPUTED_MEMBER: &str = "computed";
/// Members that must be imported from [`REACTIVE_MODULE`], in insertion order.
pub const REACTIVE_MEMBERS: [&str; 2] = [REF_MEMBER, COMPUTED_MEMBER];

/// Module providing the translation hook.
pub const ACCESSOR_MODULE: &str = "vue-i18n";
/// Translation hook, `useI18n()`.
pub const ACCESSOR_HOOK: &str = "useI18n";
/// Translation function destructured from the hook's return value.
pub const TRANSLATE_FN: &str = "t";

/// Object method whose body is the reactive scope inside a default export.
pub const SETUP_METHOD: &str = "setup";

//! i18nify - migrate hardcoded text in Vue components to vue-i18n
//!
//! i18nify finds string literals and template text in `.vue` files whose
//! value matches a message in the project's locale files, and rewrites them to
//! translation lookups (`t('key')` inside `ref(...)`, `computed(() => t('key'))`
//! elsewhere, `{{ $t('key') }}` in templates). The required `vue` and
//! `vue-i18n` imports and the `const { t } = useI18n()` binding are added once.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Migration engine
//! - `utils`: Shared utility functions

pub mod cli;
pub mod config;
pub mod core;
pub mod utils;

//! Per-file migration: locate blocks, transform, print, splice.

use std::ops::Range;

use anyhow::{Context, Result};
use tracing::debug;

use crate::{
    core::{
        parsers::{script::parse_script, sfc::locate_blocks},
        printer::print_module,
        resolver::KeyResolver,
        template::rewrite_template,
        transform::{TransformReport, transform_module},
    },
    utils::{build_line_index, offset_to_line_col},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct MigrateOptions {
    /// Rewrite text nodes of the `<template>` block.
    pub rewrite_template: bool,
    /// Keep script changes even when no literal was rewritten.
    pub force_declarations: bool,
}

/// Where a replacement happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockSite {
    Script,
    Template,
}

/// One replaced string, positioned in the original file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub site: BlockSite,
    pub line: usize,
    pub col: usize,
    pub text: String,
    pub key: String,
    /// Code that took the string's place.
    pub replacement: String,
}

#[derive(Debug, Clone)]
pub struct FileMigration {
    pub file_path: String,
    /// Full file content after migration.
    pub output: String,
    pub changed: bool,
    /// Replacements in file order.
    pub replacements: Vec<Replacement>,
    /// Transform summary for the script block that was kept, if any.
    pub script_report: Option<TransformReport>,
}

/// Migrate one `.vue` file.
///
/// The script block (`<script setup>` when present) is transformed; its new
/// text is kept only when at least one literal was rewritten, or always with
/// `force_declarations`. Template text nodes are rewritten independently.
/// Everything outside the changed blocks is copied verbatim.
pub fn migrate_source<R: KeyResolver + ?Sized>(
    file_path: &str,
    source: &str,
    resolver: &R,
    options: MigrateOptions,
) -> Result<FileMigration> {
    let descriptor = locate_blocks(source)
        .with_context(|| format!("Failed to locate blocks in {}", file_path))?;

    let mut edits: Vec<(Range<usize>, String)> = Vec::new();
    let mut pending: Vec<(usize, Replacement)> = Vec::new();
    let mut script_report = None;

    if let Some(block) = descriptor.primary_script() {
        let lang = block
            .script_lang()
            .with_context(|| format!("Unsupported <script> block in {}", file_path))?;
        let mut parsed = parse_script(block.content(source).to_string(), file_path, lang)
            .with_context(|| format!("Failed to parse {}", file_path))?;
        let report = transform_module(&mut parsed.module, resolver)
            .with_context(|| format!("Failed to transform {}", file_path))?;

        let keep = !report.is_unchanged()
            && (!report.rewrites.is_empty() || options.force_declarations);
        if keep {
            let printed = print_module(&parsed.module, &parsed.source, parsed.start_pos)
                .with_context(|| format!("Failed to print {}", file_path))?;
            for rewrite in &report.rewrites {
                let offset = block.content.start + (rewrite.span.lo.0 - parsed.start_pos.0) as usize;
                pending.push((
                    offset,
                    Replacement {
                        site: BlockSite::Script,
                        line: 0,
                        col: 0,
                        text: rewrite.text.clone(),
                        key: rewrite.key.clone(),
                        replacement: rewrite.category.replacement(&rewrite.key),
                    },
                ));
            }
            edits.push((block.content.clone(), printed));
            script_report = Some(report);
        } else {
            debug!(file = file_path, "script has no rewrites; left untouched");
        }
    }

    if options.rewrite_template
        && let Some(block) = &descriptor.template
    {
        let output = rewrite_template(block.content(source), resolver);
        if !output.rewrites.is_empty() {
            for rewrite in &output.rewrites {
                pending.push((
                    block.content.start + rewrite.range.start,
                    Replacement {
                        site: BlockSite::Template,
                        line: 0,
                        col: 0,
                        text: rewrite.text.clone(),
                        key: rewrite.key.clone(),
                        replacement: rewrite.replacement(),
                    },
                ));
            }
            edits.push((block.content.clone(), output.content));
        }
    }

    edits.sort_by_key(|(range, _)| range.start);
    let mut output = String::with_capacity(source.len());
    let mut cursor = 0;
    for (range, text) in &edits {
        output.push_str(&source[cursor..range.start]);
        output.push_str(text);
        cursor = range.end;
    }
    output.push_str(&source[cursor..]);

    let line_index = build_line_index(source);
    pending.sort_by_key(|(offset, _)| *offset);
    let replacements = pending
        .into_iter()
        .map(|(offset, mut replacement)| {
            (replacement.line, replacement.col) = offset_to_line_col(source, &line_index, offset);
            replacement
        })
        .collect();

    Ok(FileMigration {
        file_path: file_path.to_string(),
        changed: output != source,
        output,
        replacements,
        script_report,
    })
}

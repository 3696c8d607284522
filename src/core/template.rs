//! Text-node rewriting for `<template>` blocks.
//!
//! `<div>hi</div>` becomes `<div>{{ $t('message.hi') }}</div>` when `"hi"`
//! resolves to `message.hi`. Only whole text nodes are matched, compared after
//! trimming surrounding whitespace; the whitespace itself is kept.

use std::ops::Range;

use tracing::debug;

use crate::core::{parsers::sfc::find_tag_end, resolver::KeyResolver};

/// Global translation helper available in every template.
pub const TEMPLATE_TRANSLATE_FN: &str = "$t";

/// A text node replaced by an interpolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateRewrite {
    pub text: String,
    pub key: String,
    /// Byte range of the trimmed text in the template content.
    pub range: Range<usize>,
}

impl TemplateRewrite {
    pub fn replacement(&self) -> String {
        interpolation(&self.key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateOutput {
    pub content: String,
    pub rewrites: Vec<TemplateRewrite>,
}

fn interpolation(key: &str) -> String {
    let escaped = key.replace('\\', "\\\\").replace('\'', "\\'");
    format!("{{{{ {}('{}') }}}}", TEMPLATE_TRANSLATE_FN, escaped)
}

/// Rewrite every resolvable text node of `content`.
///
/// Tags and their attributes, comments, and text that already contains an
/// interpolation (`{{ ... }}`) are never touched.
pub fn rewrite_template<R: KeyResolver + ?Sized>(content: &str, resolver: &R) -> TemplateOutput {
    let rewrites: Vec<TemplateRewrite> = text_nodes(content)
        .into_iter()
        .filter_map(|range| {
            let raw = &content[range.clone()];
            let text = raw.trim();
            if text.is_empty() || text.contains("{{") {
                return None;
            }
            let key = resolver.resolve_key(text)?;
            let start = range.start + (raw.len() - raw.trim_start().len());
            debug!(text, key = %key, "rewrote template text");
            Some(TemplateRewrite {
                text: text.to_string(),
                key,
                range: start..start + text.len(),
            })
        })
        .collect();

    let mut output = String::with_capacity(content.len());
    let mut cursor = 0;
    for rewrite in &rewrites {
        output.push_str(&content[cursor..rewrite.range.start]);
        output.push_str(&rewrite.replacement());
        cursor = rewrite.range.end;
    }
    output.push_str(&content[cursor..]);

    TemplateOutput {
        content: output,
        rewrites,
    }
}

/// Byte ranges of the text between tags, in document order.
fn text_nodes(content: &str) -> Vec<Range<usize>> {
    let bytes = content.as_bytes();
    let mut nodes = Vec::new();
    let mut pos = 0;

    while pos < content.len() {
        let Some(offset) = content[pos..].find('<') else {
            nodes.push(pos..content.len());
            break;
        };
        let tag_start = pos + offset;
        if tag_start > pos {
            nodes.push(pos..tag_start);
        }

        if content[tag_start..].starts_with("<!--") {
            match content[tag_start + 4..].find("-->") {
                Some(end) => pos = tag_start + 4 + end + 3,
                None => break,
            }
            continue;
        }

        let is_tag = bytes
            .get(tag_start + 1)
            .is_some_and(|b| b.is_ascii_alphabetic() || *b == b'/');
        if !is_tag {
            // A stray `<` is text; the node continues after it.
            if let Some(last) = nodes.last_mut().filter(|last| last.end == tag_start) {
                last.end = tag_start + 1;
            } else {
                nodes.push(tag_start..tag_start + 1);
            }
            pos = tag_start + 1;
            continue;
        }

        match find_tag_end(bytes, tag_start) {
            Some(end) => pos = end + 1,
            None => break,
        }
    }

    merge_adjacent(nodes)
}

fn merge_adjacent(nodes: Vec<Range<usize>>) -> Vec<Range<usize>> {
    let mut merged: Vec<Range<usize>> = Vec::with_capacity(nodes.len());
    for node in nodes {
        match merged.last_mut() {
            Some(last) if last.end == node.start => last.end = node.end,
            _ => merged.push(node),
        }
    }
    merged
}

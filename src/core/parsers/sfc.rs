//! Top-level block location for Vue single-file components.
//!
//! Only the block boundaries matter here: the script content goes to
//! `parse_script` and the template content to the text-node rewrite. Content
//! ranges are byte offsets into the original file so rewritten blocks can be
//! spliced back without touching anything around them.

use std::{ops::Range, sync::LazyLock};

use anyhow::{Result, bail};
use regex::Regex;

use super::script::ScriptLang;

static ATTRIBUTE_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s=/>]+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#).unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Template,
    Script,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SfcBlock {
    pub kind: BlockKind,
    pub lang: Option<String>,
    /// `<script setup>`
    pub setup: bool,
    /// Byte range of the content between the opening and closing tags.
    pub content: Range<usize>,
}

impl SfcBlock {
    pub fn content<'a>(&self, source: &'a str) -> &'a str {
        &source[self.content.clone()]
    }

    /// Script dialect from the `lang` attribute; plain JavaScript when absent.
    pub fn script_lang(&self) -> Result<ScriptLang> {
        match &self.lang {
            Some(lang) => lang.parse(),
            None => Ok(ScriptLang::Js),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SfcDescriptor {
    pub template: Option<SfcBlock>,
    pub script: Option<SfcBlock>,
    pub script_setup: Option<SfcBlock>,
}

impl SfcDescriptor {
    /// The script block migration works on: `<script setup>` when present,
    /// otherwise the plain `<script>`.
    pub fn primary_script(&self) -> Option<&SfcBlock> {
        self.script_setup.as_ref().or(self.script.as_ref())
    }
}

/// Locate the `<template>`, `<script>` and `<script setup>` blocks.
///
/// Top-level comments and `<style>`/custom blocks are skipped. Nested
/// `<template>` elements inside the root template are balanced. A duplicated
/// block is an error.
pub fn locate_blocks(source: &str) -> Result<SfcDescriptor> {
    // ASCII lowercasing keeps byte offsets identical.
    let lower = source.to_ascii_lowercase();
    let bytes = lower.as_bytes();
    let mut descriptor = SfcDescriptor::default();
    let mut pos = 0;

    while let Some(offset) = lower[pos..].find('<') {
        let start = pos + offset;

        if lower[start..].starts_with("<!--") {
            pos = match lower[start + 4..].find("-->") {
                Some(end) => start + 4 + end + 3,
                None => break,
            };
            continue;
        }

        let name_end = start
            + 1
            + bytes[start + 1..]
                .iter()
                .take_while(|b| b.is_ascii_alphanumeric() || **b == b'-')
                .count();
        if name_end == start + 1 {
            pos = start + 1;
            continue;
        }
        let name = &lower[start + 1..name_end];

        let Some(open_end) = find_tag_end(bytes, name_end) else {
            bail!("Unclosed <{}> tag", name);
        };
        let attrs = &source[name_end..open_end];
        if attrs.trim_end().ends_with('/') {
            pos = open_end + 1;
            continue;
        }

        let content_start = open_end + 1;
        let Some((content_end, close_end)) = find_block_end(&lower, name, content_start) else {
            bail!("Missing closing tag for <{}>", name);
        };
        pos = close_end;

        let kind = match name {
            "template" => BlockKind::Template,
            "script" => BlockKind::Script,
            _ => continue,
        };
        let (lang, setup) = parse_attributes(attrs);
        let block = SfcBlock {
            kind,
            lang,
            setup,
            content: content_start..content_end,
        };

        let slot = match (kind, setup) {
            (BlockKind::Template, _) => &mut descriptor.template,
            (BlockKind::Script, true) => &mut descriptor.script_setup,
            (BlockKind::Script, false) => &mut descriptor.script,
        };
        if slot.is_some() {
            let tag = if setup { "<script setup>" } else { name };
            bail!("SFC can only contain one {} block", display_tag(tag));
        }
        *slot = Some(block);
    }

    Ok(descriptor)
}

fn display_tag(tag: &str) -> String {
    if tag.starts_with('<') {
        tag.to_string()
    } else {
        format!("<{}>", tag)
    }
}

/// Index of the `>` closing an opening tag, skipping quoted attribute values.
pub(crate) fn find_tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote = None;
    for (index, &byte) in bytes.iter().enumerate().skip(from) {
        match (quote, byte) {
            (Some(q), b) if b == q => quote = None,
            (Some(_), _) => {}
            (None, b'"' | b'\'') => quote = Some(byte),
            (None, b'>') => return Some(index),
            (None, _) => {}
        }
    }
    None
}

/// Returns `(content_end, after_closing_tag)` for the block opened as `name`.
fn find_block_end(lower: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    let open = format!("<{}", name);
    let close = format!("</{}", name);
    let mut depth = 0usize;
    let mut pos = from;

    loop {
        let next_close = pos + lower[pos..].find(&close)?;
        // Only <template> nests; raw text blocks end at the first closing tag.
        let next_open = if name == "template" {
            lower[pos..next_close]
                .match_indices(&open)
                .map(|(index, _)| pos + index)
                .find(|&index| is_tag_boundary(lower, index + open.len()))
        } else {
            None
        };

        match next_open {
            Some(index) => {
                let tag_end = find_tag_end(lower.as_bytes(), index)?;
                if !lower[index..tag_end].trim_end().ends_with('/') {
                    depth += 1;
                }
                pos = tag_end + 1;
            }
            None if depth > 0 => {
                depth -= 1;
                pos = next_close + close.len();
            }
            None => {
                let end = find_tag_end(lower.as_bytes(), next_close)?;
                return Some((next_close, end + 1));
            }
        }
    }
}

fn is_tag_boundary(text: &str, index: usize) -> bool {
    text.as_bytes()
        .get(index)
        .is_none_or(|b| b.is_ascii_whitespace() || *b == b'>' || *b == b'/')
}

fn parse_attributes(attrs: &str) -> (Option<String>, bool) {
    let mut lang = None;
    let mut setup = false;
    for capture in ATTRIBUTE_REGEX.captures_iter(attrs) {
        let value = capture
            .get(2)
            .or_else(|| capture.get(3))
            .or_else(|| capture.get(4))
            .map(|m| m.as_str().to_string());
        match &capture[1] {
            "lang" => lang = value,
            "setup" => setup = true,
            _ => {}
        }
    }
    (lang, setup)
}

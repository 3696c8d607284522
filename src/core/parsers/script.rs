use std::{fmt, str::FromStr, sync::Arc};

use anyhow::{Result, anyhow, bail};
use swc_common::{BytePos, FileName, Globals, SourceMap, comments::SingleThreadedComments};
use swc_ecma_ast::Module;
use swc_ecma_parser::{EsSyntax, Parser, StringInput, Syntax, TsSyntax};

/// Script dialect, taken from the `lang` attribute of a `<script>` block.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScriptLang {
    #[default]
    Js,
    Jsx,
    Ts,
    Tsx,
}

impl ScriptLang {
    fn syntax(self) -> Syntax {
        match self {
            ScriptLang::Js | ScriptLang::Jsx => Syntax::Es(EsSyntax {
                jsx: self == ScriptLang::Jsx,
                ..Default::default()
            }),
            ScriptLang::Ts | ScriptLang::Tsx => Syntax::Typescript(TsSyntax {
                tsx: self == ScriptLang::Tsx,
                ..Default::default()
            }),
        }
    }
}

impl FromStr for ScriptLang {
    type Err = anyhow::Error;

    fn from_str(lang: &str) -> Result<Self> {
        match lang {
            "js" | "javascript" => Ok(ScriptLang::Js),
            "jsx" => Ok(ScriptLang::Jsx),
            "ts" | "typescript" => Ok(ScriptLang::Ts),
            "tsx" => Ok(ScriptLang::Tsx),
            other => bail!("Unsupported script lang \"{}\"", other),
        }
    }
}

impl fmt::Display for ScriptLang {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ScriptLang::Js => "js",
            ScriptLang::Jsx => "jsx",
            ScriptLang::Ts => "ts",
            ScriptLang::Tsx => "tsx",
        };
        f.write_str(name)
    }
}

/// A parsed script together with the text its spans point into.
#[derive(Debug)]
pub struct ParsedScript {
    pub module: Module,
    pub source: String,
    /// Position of the first byte of `source` in the source map.
    pub start_pos: BytePos,
}

/// Parse a script block into an AST.
///
/// Every call gets its own `SourceMap` and `Globals`, so parsing is safe from
/// rayon workers.
pub fn parse_script(code: String, file_path: &str, lang: ScriptLang) -> Result<ParsedScript> {
    use swc_common::GLOBALS;

    let source_map = Arc::new(SourceMap::default());
    let source = code.clone();

    GLOBALS.set(&Globals::new(), || {
        let source_file =
            source_map.new_source_file(FileName::Real(file_path.into()).into(), code);

        let comments = SingleThreadedComments::default();
        let mut parser = Parser::new(
            lang.syntax(),
            StringInput::from(&*source_file),
            Some(&comments),
        );

        let module = parser
            .parse_module()
            .map_err(|e| anyhow!("Failed to parse {} script: {:?}", lang, e.kind()))?;

        if let Some(error) = parser.take_errors().into_iter().next() {
            bail!("Failed to parse {} script: {:?}", lang, error.kind());
        }

        Ok(ParsedScript {
            module,
            source,
            start_pos: source_file.start_pos,
        })
    })
}

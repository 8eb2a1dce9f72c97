//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct, which runs the extraction stages
//! in order over one source text and assembles a [`SourceModel`].
//!
//! # Stage order
//!
//! ```text
//! strip comments → class → constructor → binding
//!                → object sites → entry point
//! ```
//!
//! Each stage either yields a usable (possibly partial) result or a terminal
//! [`ExtractError`]. Object discovery does not depend on the constructor: a
//! class without one still produces sites, and binding falls back to the
//! positional tier or stays empty.

use super::binding::bind_members;
use super::class::extract_class;
use super::constructor::extract_constructor;
use super::errors::ExtractError;
use super::model::{ClassModel, EntryPoint, SourceModel};
use super::objects::locate_objects;
use super::scanner::{line_of, strip_comments};
use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

static MAIN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bmain\s*\([^)]*\)\s*\{").expect("main pattern is valid")
});

/// Tunables for extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Fail with [`ExtractError::NoConstructorFound`] when the class has none
    pub require_constructor: bool,
    /// Lines after a declaration searched for a method call on the object
    pub follow_up_lines: usize,
    /// Bytes after `Class ident` searched by the loose object scan
    pub loose_lookahead: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            require_constructor: false,
            follow_up_lines: 4,
            loose_lookahead: 10,
        }
    }
}

/// Extraction pipeline over one comment-free source text
pub struct Parser {
    code: String,
    options: ParseOptions,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ExtractError> {
        Self::with_options(source, ParseOptions::default())
    }

    pub fn with_options(source: &str, options: ParseOptions) -> Result<Self, ExtractError> {
        if source.trim().is_empty() {
            return Err(ExtractError::EmptyInput);
        }
        Ok(Self {
            code: strip_comments(source),
            options,
        })
    }

    /// The source with comments removed; line indices match the input
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Run every stage and build the model
    pub fn parse_model(&self) -> Result<SourceModel, ExtractError> {
        let class = extract_class(&self.code)?;
        let constructor = extract_constructor(&self.code, &class.name)?;

        if constructor.is_none() && self.options.require_constructor {
            return Err(ExtractError::NoConstructorFound { class: class.name });
        }

        let (constructor_params, constructor_body, signature) = match constructor {
            Some(ctor) => (ctor.params, ctor.body, Some(ctor.signature)),
            None => (Vec::new(), String::new(), None),
        };

        let binding = bind_members(
            &class.name,
            &class.members,
            &constructor_params,
            &constructor_body,
        );

        let objects = locate_objects(&self.code, &class.name, &self.options)?;
        let entry_point = MAIN_RE.find(&self.code).map(|m| EntryPoint {
            line_index: line_of(&self.code, m.start()),
        });

        debug!(
            class = %class.name,
            members = class.members.len(),
            params = constructor_params.len(),
            objects = objects.len(),
            "parsed source"
        );

        Ok(SourceModel {
            class: ClassModel {
                name: class.name,
                line_index: class.line_index,
                members: class.members,
                constructor_params,
                constructor_body,
                constructor: signature,
                binding: binding.map,
                binding_tier: binding.tier,
            },
            objects,
            entry_point,
        })
    }
}

/// Parse `source` with the given options
pub fn parse_source(source: &str, options: &ParseOptions) -> Result<SourceModel, ExtractError> {
    Parser::with_options(source, options.clone())?.parse_model()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::model::BindingTier;

    #[test]
    fn test_empty_input() {
        assert!(matches!(Parser::new("  \n\t"), Err(ExtractError::EmptyInput)));
    }

    #[test]
    fn test_commented_out_class_is_ignored() {
        let source = "// class Ghost { int x; };\n/* Ghost g; */ int main() {}";
        let parser = Parser::new(source).unwrap();
        assert_eq!(parser.parse_model(), Err(ExtractError::NoClassFound));
    }

    #[test]
    fn test_required_constructor() {
        let source = "class Widget { int id; };\nWidget w;";
        let options = ParseOptions {
            require_constructor: true,
            ..ParseOptions::default()
        };

        assert_eq!(
            parse_source(source, &options),
            Err(ExtractError::NoConstructorFound {
                class: "Widget".to_string()
            })
        );
        assert!(parse_source(source, &ParseOptions::default()).is_ok());
    }

    #[test]
    fn test_missing_constructor_still_finds_objects() {
        let source = "class Widget { int id; int size; };\nWidget w;\nWidget v;";
        let model = parse_source(source, &ParseOptions::default()).unwrap();

        assert!(!model.class.has_constructor());
        assert_eq!(model.class.binding_tier, BindingTier::Unbound);
        assert_eq!(model.objects.len(), 2);
        assert_eq!(model.entry_point, None);
    }

    #[test]
    fn test_entry_point_line() {
        let source = "class A { int x; public: A(int v) { x = v; } };\n\nint main() {\n  A a(1);\n}";
        let model = parse_source(source, &ParseOptions::default()).unwrap();

        assert_eq!(model.entry_point, Some(EntryPoint { line_index: 2 }));
        assert_eq!(model.objects[0].line_index, Some(3));
        assert_eq!(model.class.constructor.as_ref().map(|c| c.line_index), Some(0));
    }
}

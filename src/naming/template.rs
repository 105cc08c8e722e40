//! Filename templates
//!
//! Templates use `{name}` placeholders, with `{{` and `}}` for literal
//! braces. Placeholders are collected when the template is parsed so they
//! can be checked against a context before anything is rendered.

use lazy_static::lazy_static;
use regex::Regex;

use super::context::TemplateContext;
use crate::errors::{TileError, TileResult};

lazy_static! {
    static ref TOKEN: Regex = Regex::new(r"\{\{|\}\}|\{([^{}]*)\}|[{}]").unwrap();
    static ref KEY_NAME: Regex = Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed filename template
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl FilenameTemplate {
    /// Parse a template string
    ///
    /// # Returns
    /// The template, or `TemplateSyntaxError` for unbalanced braces or a
    /// placeholder that is not a plain identifier (surrounding whitespace
    /// included)
    pub fn parse(template: &str) -> TileResult<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in TOKEN.captures_iter(template) {
            let token = caps.get(0).map_or("", |m| m.as_str());
            let start = caps.get(0).map_or(last, |m| m.start());
            literal.push_str(&template[last..start]);
            last = start + token.len();

            match (token, caps.get(1)) {
                ("{{", _) => literal.push('{'),
                ("}}", _) => literal.push('}'),
                (_, Some(name)) => {
                    let name = name.as_str();
                    if !KEY_NAME.is_match(name) {
                        return Err(TileError::TemplateSyntaxError(format!(
                            "invalid placeholder {:?} at offset {} in {:?}", token, start, template
                        )));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Placeholder(name.to_string()));
                }
                _ => {
                    return Err(TileError::TemplateSyntaxError(format!(
                        "unmatched {:?} at offset {} in {:?}", token, start, template
                    )));
                }
            }
        }
        literal.push_str(&template[last..]);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(FilenameTemplate { source: template.to_string(), segments })
    }

    /// The template as written
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Check every placeholder has a value in `context`
    ///
    /// # Returns
    /// `MissingAttributeError` naming the first missing key in template order
    pub fn validate(&self, context: &TemplateContext) -> TileResult<()> {
        for segment in &self.segments {
            if let Segment::Placeholder(name) = segment {
                if !context.contains(name) {
                    return Err(TileError::MissingAttributeError(name.clone()));
                }
            }
        }
        Ok(())
    }

    /// Substitute every placeholder from `context`
    pub fn render(&self, context: &TemplateContext) -> TileResult<String> {
        self.validate(context)?;
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    let value = context.get(name)
                        .ok_or_else(|| TileError::MissingAttributeError(name.clone()))?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context(pairs: &[(&str, &str)]) -> TemplateContext {
        let mut ctx = TemplateContext::new();
        for (k, v) in pairs {
            ctx.insert(k, v);
        }
        ctx
    }

    #[test]
    fn test_render() {
        let template = FilenameTemplate::parse("{x}_{y}.{extension}").unwrap();
        let ctx = context(&[("x", "5"), ("y", "1"), ("extension", "nc")]);
        assert_eq!(template.render(&ctx).unwrap(), "5_1.nc");
    }

    #[test]
    fn test_escaped_braces() {
        let template = FilenameTemplate::parse("{{raw}}_{x}").unwrap();
        assert_eq!(template.render(&context(&[("x", "7")])).unwrap(), "{raw}_7");
    }

    #[test]
    fn test_missing_key_reported_in_template_order() {
        let template = FilenameTemplate::parse("{x}_{sensor}_{year}").unwrap();
        let err = template.render(&context(&[("x", "1")])).unwrap_err();
        assert!(matches!(err, TileError::MissingAttributeError(ref key) if key == "sensor"));
    }

    #[test]
    fn test_syntax_errors() {
        for bad in ["{x", "x}", "{}", "{x:03d}", "{a b}", "{ x }", "{x }"] {
            assert!(
                matches!(FilenameTemplate::parse(bad), Err(TileError::TemplateSyntaxError(_))),
                "{:?} should be rejected", bad
            );
        }
    }
}

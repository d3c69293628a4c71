//! JSDoc comment parsing
//!
//! The oracle hands over raw `/** ... */` comment text; this module splits it
//! into free-text paragraphs and structured block tags.

use serde::{Deserialize, Serialize};

/// Tags whose first word (after an optional `{type}`) is a name argument
const TAGS_WITH_ARGUMENT: &[&str] = &[
    "param",
    "arg",
    "argument",
    "property",
    "prop",
    "template",
    "typeParam",
    "typedef",
    "callback",
];

/// Parsed documentation comment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsDoc {
    /// Free-text paragraphs preceding the first tag
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub comment: Vec<String>,
    /// Block tags in source order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<JsDocTag>,
}

/// A single `@tag`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsDocTag {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
}

impl JsDoc {
    /// Get the first tag with the given name
    pub fn tag(&self, name: &str) -> Option<&JsDocTag> {
        self.tags.iter().find(|t| t.name == name)
    }

    /// Whether the comment carries a `@deprecated` tag
    pub fn is_deprecated(&self) -> bool {
        self.tag("deprecated").is_some()
    }

    /// Get the `@param` tag documenting `param`
    pub fn param(&self, param: &str) -> Option<&JsDocTag> {
        self.tags.iter().find(|t| {
            matches!(t.name.as_str(), "param" | "arg" | "argument")
                && t.arg.as_deref() == Some(param)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.comment.is_empty() && self.tags.is_empty()
    }
}

/// Parse raw comment text into a [`JsDoc`]
///
/// Returns `None` when the comment has neither text nor tags.
pub fn parse(raw: &str) -> Option<JsDoc> {
    let lines = strip_delimiters(raw);

    let mut doc = JsDoc::default();
    let mut paragraph = String::new();
    let mut current_tag: Option<(String, String)> = None;
    let mut in_fence = false;

    for line in lines {
        let trimmed = line.trim();
        if trimmed.starts_with("```") {
            in_fence = !in_fence;
        }

        if !in_fence && trimmed.starts_with('@') {
            flush_paragraph(&mut doc, &mut paragraph);
            if let Some((name, body)) = current_tag.take() {
                doc.tags.push(build_tag(name, &body));
            }
            let rest = &trimmed[1..];
            let (name, body) = match rest.find(char::is_whitespace) {
                Some(pos) => (&rest[..pos], rest[pos..].trim_start()),
                None => (rest, ""),
            };
            current_tag = Some((name.to_string(), body.to_string()));
            continue;
        }

        match current_tag.as_mut() {
            Some((_, body)) => {
                if !body.is_empty() {
                    body.push('\n');
                }
                body.push_str(line.trim_end());
            }
            None if trimmed.is_empty() && !in_fence => flush_paragraph(&mut doc, &mut paragraph),
            None => {
                if !paragraph.is_empty() {
                    paragraph.push('\n');
                }
                paragraph.push_str(line.trim_end());
            }
        }
    }

    flush_paragraph(&mut doc, &mut paragraph);
    if let Some((name, body)) = current_tag.take() {
        doc.tags.push(build_tag(name, &body));
    }

    if doc.is_empty() {
        None
    } else {
        Some(doc)
    }
}

fn strip_delimiters(raw: &str) -> Vec<&str> {
    let body = raw.trim();
    let body = body.strip_prefix("/**").unwrap_or(body);
    let body = body.strip_suffix("*/").unwrap_or(body);

    body.lines()
        .map(|line| {
            let line = line.trim_start();
            match line.strip_prefix('*') {
                Some(rest) => rest.strip_prefix(' ').unwrap_or(rest),
                None => line,
            }
        })
        .collect()
}

fn flush_paragraph(doc: &mut JsDoc, paragraph: &mut String) {
    let text = paragraph.trim();
    if !text.is_empty() {
        doc.comment.push(text.to_string());
    }
    paragraph.clear();
}

fn build_tag(name: String, body: &str) -> JsDocTag {
    let mut rest = body.trim();
    let mut ty = None;

    if rest.starts_with('{') {
        if let Some(end) = matching_brace(rest) {
            ty = Some(rest[1..end].trim().to_string());
            rest = rest[end + 1..].trim_start();
        }
    }

    let mut arg = None;
    if TAGS_WITH_ARGUMENT.contains(&name.as_str()) && !rest.is_empty() {
        let (word, remaining) = match rest.find(char::is_whitespace) {
            Some(pos) => (&rest[..pos], &rest[pos..]),
            None => (rest, ""),
        };
        // `[name=default]` marks an optional parameter
        let word = word.trim_start_matches('[').trim_end_matches(']');
        let word = word.split('=').next().unwrap_or(word);
        arg = Some(word.to_string());
        rest = remaining.trim_start();
        rest = rest.strip_prefix('-').map(str::trim_start).unwrap_or(rest);
    }

    let comment = if rest.trim().is_empty() {
        None
    } else {
        Some(rest.trim_end().to_string())
    };

    JsDocTag {
        name,
        arg,
        comment,
        ty,
    }
}

fn matching_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (i, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return Some(i);
                }
            }
            _ => {}
        }
    }
    None
}

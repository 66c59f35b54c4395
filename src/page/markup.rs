//! Minimal, forgiving HTML scanning.
//!
//! Only what the catalog page needs: start tags with attributes, the inner
//! markup of an element, and readable text. Malformed input never errors,
//! unmatched pieces are simply skipped.

use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

static START_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"<([a-zA-Z][a-zA-Z0-9-]*)((?:\s+[^\s=>/"']+(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>"']+))?)*)\s*(/?)>"#,
    )
    .expect("start tag regex")
});

static ATTRIBUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^\s=>/"']+)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s>"']+)))?"#)
        .expect("attribute regex")
});

static ENTITY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&(#[xX][0-9a-fA-F]+|#[0-9]+|[a-zA-Z]+);").expect("entity regex"));

static SKIPPED_BLOCKS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?is)<!--.*?-->|<script\b.*?</script\s*>|<style\b.*?</style\s*>")
        .expect("skipped block regex")
});

static BLOCK_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</(p|div|li|h[1-6]|tr|section|article)\s*>")
        .expect("block break regex")
});

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag regex"));

/// A start tag found in a document.
#[derive(Debug, Clone)]
pub struct StartTag {
    pub name: String,
    pub attrs: HashMap<String, String>,
    /// Byte offset of `<`.
    pub start: usize,
    /// Byte offset just past `>`.
    pub end: usize,
    pub self_closing: bool,
}

impl StartTag {
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|list| list.split_whitespace().any(|c| c == class))
    }

    pub fn id(&self) -> Option<&str> {
        self.attr("id")
    }
}

/// Blank out comments, scripts and styles with spaces. Byte offsets into the
/// result match the input, so tags found in it can be sliced from either.
pub fn mask_skipped(html: &str) -> String {
    SKIPPED_BLOCKS
        .replace_all(html, |caps: &regex::Captures| " ".repeat(caps[0].len()))
        .into_owned()
}

/// Scan every start tag in document order. Comments and script bodies are
/// not excluded here; run `mask_skipped` first when they matter.
pub fn start_tags(html: &str) -> Vec<StartTag> {
    START_TAG
        .captures_iter(html)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1)?.as_str().to_ascii_lowercase();
            let attrs = caps.get(2).map(|m| parse_attributes(m.as_str())).unwrap_or_default();
            Some(StartTag {
                name,
                attrs,
                start: whole.start(),
                end: whole.end(),
                self_closing: caps.get(3).is_some_and(|m| !m.as_str().is_empty()),
            })
        })
        .collect()
}

fn parse_attributes(raw: &str) -> HashMap<String, String> {
    let mut attrs = HashMap::new();
    for caps in ATTRIBUTE.captures_iter(raw) {
        let Some(key) = caps.get(1) else { continue };
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .or_else(|| caps.get(4))
            .map(|m| decode_entities(m.as_str()))
            .unwrap_or_default();
        // First occurrence wins, like the browser.
        attrs.entry(key.as_str().to_ascii_lowercase()).or_insert(value);
    }
    attrs
}

/// Inner markup of `tag`, up to its matching close tag. Unclosed elements
/// run to the end of the document.
pub fn inner_html<'a>(html: &'a str, tag: &StartTag) -> &'a str {
    if tag.self_closing || tag.end > html.len() {
        return "";
    }
    let rest = &html[tag.end..];
    let pattern = format!(r"(?i)<(/?){}\b[^>]*>", regex::escape(&tag.name));
    let Ok(nested) = Regex::new(&pattern) else {
        return rest;
    };

    let mut depth = 1usize;
    for caps in nested.captures_iter(rest) {
        let Some(whole) = caps.get(0) else { continue };
        let closing = caps.get(1).is_some_and(|m| !m.as_str().is_empty());
        if closing {
            depth -= 1;
            if depth == 0 {
                return &rest[..whole.start()];
            }
        } else if !whole.as_str().ends_with("/>") {
            depth += 1;
        }
    }
    rest
}

/// Readable text of a markup fragment: tags stripped, entities decoded,
/// block elements turned into line breaks, runs of blank lines collapsed.
pub fn text_content(fragment: &str) -> String {
    let without_blocks = SKIPPED_BLOCKS.replace_all(fragment, "");
    let with_breaks = BLOCK_BREAK.replace_all(&without_blocks, "\n");
    let stripped = ANY_TAG.replace_all(&with_breaks, "");
    let decoded = decode_entities(&stripped);

    let mut out: Vec<String> = Vec::new();
    for line in decoded.lines() {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if line.is_empty() && out.last().is_none_or(|l| l.is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

/// Decode named and numeric character references. Unknown names are kept
/// verbatim.
pub fn decode_entities(s: &str) -> String {
    if !s.contains('&') {
        return s.to_string();
    }
    ENTITY
        .replace_all(s, |caps: &regex::Captures| {
            let body = &caps[1];
            let decoded = if let Some(hex) = body.strip_prefix("#x").or_else(|| body.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok().and_then(char::from_u32)
            } else if let Some(dec) = body.strip_prefix('#') {
                dec.parse::<u32>().ok().and_then(char::from_u32)
            } else {
                match body {
                    "amp" => Some('&'),
                    "lt" => Some('<'),
                    "gt" => Some('>'),
                    "quot" => Some('"'),
                    "apos" => Some('\''),
                    "nbsp" => Some('\u{a0}'),
                    "mdash" => Some('—'),
                    "ndash" => Some('–'),
                    "hellip" => Some('…'),
                    "copy" => Some('©'),
                    "times" => Some('×'),
                    _ => None,
                }
            };
            match decoded {
                Some(c) => c.to_string(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_skipped_keeps_offsets() {
        let html = "<p>a</p><!-- <div class=\"box\"> --><script>var x = '<div>';</script><p>é</p>";
        let masked = mask_skipped(html);
        assert_eq!(masked.len(), html.len());
        let names: Vec<String> = start_tags(&masked).into_iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["p", "p"]);
        assert!(masked.ends_with("<p>é</p>"));
    }

    #[test]
    fn test_start_tags_with_quoted_angle_bracket() {
        let html = r#"<div class="box big" data-info="a > b" data-name='Aloe'>x</div>"#;
        let tags = start_tags(html);
        assert_eq!(tags.len(), 1);
        let tag = &tags[0];
        assert_eq!(tag.name, "div");
        assert!(tag.has_class("box"));
        assert!(!tag.has_class("bo"));
        assert_eq!(tag.attr("data-info"), Some("a > b"));
        assert_eq!(tag.attr("data-name"), Some("Aloe"));
    }

    #[test]
    fn test_attribute_entities_and_bare_values() {
        let tags = start_tags(r#"<a href=/care data-x="Tom &amp; Jerry" hidden>"#);
        let tag = &tags[0];
        assert_eq!(tag.attr("href"), Some("/care"));
        assert_eq!(tag.attr("data-x"), Some("Tom & Jerry"));
        assert_eq!(tag.attr("hidden"), Some(""));
    }

    #[test]
    fn test_inner_html_handles_nesting() {
        let html = "<div id=\"outer\"><div>inner</div><p>tail</p></div><div>after</div>";
        let tags = start_tags(html);
        let outer = tags.iter().find(|t| t.id() == Some("outer")).unwrap();
        assert_eq!(inner_html(html, outer), "<div>inner</div><p>tail</p>");
    }

    #[test]
    fn test_inner_html_unclosed_runs_to_end() {
        let html = "<section>abc<p>def";
        let tags = start_tags(html);
        assert_eq!(inner_html(html, &tags[0]), "abc<p>def");
    }

    #[test]
    fn test_text_content() {
        let html = "<h2>About</h2>\n<p>We  grow <b>plants</b> &amp; herbs.</p><script>var x = 1;</script><p>Since 2001</p>";
        assert_eq!(text_content(html), "About\n\nWe grow plants & herbs.\nSince 2001");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_entities("caf&#233; &#x2764; &bogus;"), "café ❤ &bogus;");
    }
}

//! Step extraction from leveling guide pages.
//!
//! Guides list one crafting step per `<li>` inside the first
//! `<ul class="circle white">`. Plain-text guides (no such list) are read
//! one step per non-blank line.

use regex::Regex;
use std::sync::OnceLock;

fn ul_open_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)<ul\b[^>]*\bclass\s*=\s*["']([^"']*)["'][^>]*>"#).expect("valid regex")
    })
}

fn ul_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<(/?)ul\b[^>]*>").expect("valid regex"))
}

fn list_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<(/?)(li|ul|ol)\b[^>]*>").expect("valid regex"))
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)<!--.*?-->|<[^>]*>").expect("valid regex"))
}

fn entity_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);").expect("valid regex"))
}

/// Body of the first `<ul>` carrying both `circle` and `white` classes.
fn find_step_list(document: &str) -> Option<&str> {
    let open = ul_open_re().captures_iter(document).find(|caps| {
        let classes: Vec<&str> = caps[1].split_whitespace().collect();
        classes.contains(&"circle") && classes.contains(&"white")
    })?;
    let body_start = open.get(0)?.end();

    // Walk nested lists until the matching close tag.
    let mut depth = 1usize;
    for tag in ul_tag_re().captures_iter(&document[body_start..]) {
        let whole = tag.get(0)?;
        if tag[1].is_empty() {
            depth += 1;
        } else {
            depth -= 1;
            if depth == 0 {
                return Some(&document[body_start..body_start + whole.start()]);
            }
        }
    }
    // Unterminated list: take the rest of the document.
    Some(&document[body_start..])
}

fn decode_entity(entity: &str) -> Option<String> {
    let decoded = match entity {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        _ => {
            let code = if let Some(hex) = entity
                .strip_prefix("#x")
                .or_else(|| entity.strip_prefix("#X"))
            {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)?
        }
    };
    Some(decoded.to_string())
}

/// Visible text of an HTML fragment, whitespace collapsed to single spaces.
pub fn html_text(fragment: &str) -> String {
    let stripped = tag_re().replace_all(fragment, "");
    let decoded = entity_re().replace_all(&stripped, |caps: &regex::Captures<'_>| {
        decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Close every open item at or below list depth `depth`, ending it at `at`.
fn close_items(
    open: &mut Vec<(usize, usize)>,
    ranges: &mut [(usize, usize)],
    depth: usize,
    at: usize,
) {
    while let Some(&(index, item_depth)) = open.last() {
        if item_depth < depth {
            break;
        }
        ranges[index].1 = at;
        open.pop();
    }
}

/// Split a list body into the raw HTML of each `<li>`, in opening order.
///
/// An item runs to its matching `</li>`, so an outer item includes the
/// items of any list nested inside it. A missing `</li>` ends the item at
/// the next sibling `<li>` or at the end of its enclosing list.
fn list_items(body: &str) -> Vec<&str> {
    let mut ranges: Vec<(usize, usize)> = Vec::new();
    // (index into `ranges`, list depth the item was opened at)
    let mut open: Vec<(usize, usize)> = Vec::new();
    let mut depth = 0usize;

    for tag in list_tag_re().captures_iter(body) {
        let Some(whole) = tag.get(0) else {
            continue;
        };
        let closing = !tag[1].is_empty();
        let is_item = tag[2].eq_ignore_ascii_case("li");
        match (closing, is_item) {
            (false, true) => {
                close_items(&mut open, &mut ranges, depth, whole.start());
                ranges.push((whole.end(), body.len()));
                open.push((ranges.len() - 1, depth));
            }
            (true, true) => close_items(&mut open, &mut ranges, depth, whole.start()),
            (false, false) => depth += 1,
            (true, false) => {
                close_items(&mut open, &mut ranges, depth, whole.start());
                depth = depth.saturating_sub(1);
            }
        }
    }

    ranges.into_iter().map(|(start, end)| &body[start..end]).collect()
}

/// Extract the ordered step lines of a guide document.
pub fn extract_steps(document: &str) -> Vec<String> {
    if let Some(body) = find_step_list(document) {
        let steps: Vec<String> = list_items(body)
            .into_iter()
            .map(html_text)
            .filter(|s| !s.is_empty())
            .collect();
        tracing::debug!(steps = steps.len(), "extracted steps from guide list");
        return steps;
    }

    tracing::debug!("no step list found, reading guide as plain text");
    document
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
<ul class="menu"><li>Home</li><li>Guides</li></ul>
<p>Alchemy 1-600</p>
<ul class="circle white">
  <li>1-60: 66 x <a href="/item/1">[Minor Healing Potion]</a></li>
  <li>60-110 &ndash; 50 x [Lesser Healing Potion] &amp; more</li>
  <li>110-140: <strong>15 x</strong> [Elixir of Wisdom]</li>
</ul>
<ul class="circle white"><li>Should not be read</li></ul>
</body></html>"#;

    #[test]
    fn test_extract_steps_from_first_step_list() {
        let steps = extract_steps(PAGE);
        assert_eq!(
            steps,
            vec![
                "1-60: 66 x [Minor Healing Potion]",
                "60-110 &ndash; 50 x [Lesser Healing Potion] & more",
                "110-140: 15 x [Elixir of Wisdom]",
            ]
        );
    }

    #[test]
    fn test_class_order_and_extra_classes() {
        let page = r#"<ul id="g" class="white big circle"><li>[A]</li></ul>"#;
        assert_eq!(extract_steps(page), vec!["[A]"]);
    }

    #[test]
    fn test_nested_list_items_are_steps_too() {
        let page = r#"<ul class="circle white">
<li>Outer [A]<ul><li>Inner [B]</li></ul></li>
<li>Last [C]</li>
</ul><li>outside</li>"#;
        let steps = extract_steps(page);
        assert_eq!(steps, vec!["Outer [A]Inner [B]", "Inner [B]", "Last [C]"]);
    }

    #[test]
    fn test_unclosed_outer_item_keeps_nested_list() {
        let page = "<ul class='circle white'><li>Outer [A]<ol><li>[B]<li>[C]</ol><li>[D]</ul>";
        assert_eq!(
            extract_steps(page),
            vec!["Outer [A][B][C]", "[B]", "[C]", "[D]"]
        );
    }

    #[test]
    fn test_unclosed_items() {
        let page = "<ul class='circle white'><li>[A]<li>[B]</ul>";
        assert_eq!(extract_steps(page), vec!["[A]", "[B]"]);
    }

    #[test]
    fn test_plain_text_fallback() {
        let text = "5 x [Copper Bar]\n\n   [Rough Stone]  \n";
        assert_eq!(extract_steps(text), vec!["5 x [Copper Bar]", "[Rough Stone]"]);
    }

    #[test]
    fn test_html_text_decodes_entities() {
        assert_eq!(
            html_text("Kael&#39;thas&nbsp;&lt;3 &#x41; <!-- note -->&bogus;"),
            "Kael'thas <3 A &bogus;"
        );
    }
}

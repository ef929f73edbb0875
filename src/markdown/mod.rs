//! Markdown to email HTML.
//!
//! [`parse`] builds a comrak syntax tree of block nodes from the source,
//! [`render`] emits HTML from that tree and [`wrap`] places the result into
//! the branded email document.

mod template;

pub use template::wrap;

use comrak::nodes::AstNode;
use comrak::{Arena, Options, format_html, parse_document};

fn configure(options: &mut Options) {
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.tasklist = true;
    options.extension.autolink = true;
    // Raw HTML in the source shows up as text. Unsafe link schemes are
    // dropped because `render.unsafe_` stays off.
    options.render.escape = true;
}

pub fn parse<'a>(arena: &'a Arena<AstNode<'a>>, markdown: &str) -> &'a AstNode<'a> {
    let mut options = Options::default();
    configure(&mut options);
    parse_document(arena, &close_lists(markdown), &options)
}

pub fn render(markdown: &str) -> String {
    let arena = Arena::new();
    let root = parse(&arena, markdown);
    let mut options = Options::default();
    configure(&mut options);
    let mut html = Vec::new();
    if let Err(e) = format_html(root, &options, &mut html) {
        tracing::error!(error.message = %e, "Failed to format newsletter HTML");
    }
    String::from_utf8_lossy(&html).into_owned()
}

/// Put a blank line between a list and an unindented line right below it.
///
/// Without it the line would be folded into the last list item as a lazy
/// continuation. Lines inside fenced code are left alone.
fn close_lists(markdown: &str) -> String {
    let mut normalized = String::with_capacity(markdown.len() + 16);
    let mut fence: Option<(char, usize)> = None;
    let mut in_list = false;
    let mut previous_blank = true;
    for line in markdown.lines() {
        if let Some((marker, length)) = fence {
            if closes_fence(line, marker, length) {
                fence = None;
            }
            previous_blank = false;
        } else if line.trim().is_empty() {
            previous_blank = true;
        } else {
            let content = line.trim_start();
            let indent = line.len() - content.len();
            if indent <= 3 && is_list_marker(content) {
                in_list = true;
            } else if indent == 0 {
                if in_list && !previous_blank {
                    normalized.push('\n');
                }
                in_list = false;
            }
            fence = opening_fence(line);
            previous_blank = false;
        }
        normalized.push_str(line);
        normalized.push('\n');
    }
    normalized
}

fn is_list_marker(line: &str) -> bool {
    let rest = match line.chars().next() {
        Some('-' | '*' | '+') => &line[1..],
        Some(c) if c.is_ascii_digit() => {
            let digits = line.bytes().take_while(u8::is_ascii_digit).count();
            if digits > 9 {
                return false;
            }
            match line[digits..].strip_prefix(['.', ')']) {
                Some(rest) => rest,
                None => return false,
            }
        }
        _ => return false,
    };
    rest.is_empty() || rest.starts_with([' ', '\t'])
}

fn opening_fence(line: &str) -> Option<(char, usize)> {
    let trimmed = line.trim_start_matches(' ');
    if line.len() - trimmed.len() > 3 {
        return None;
    }
    let marker = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let length = trimmed.chars().take_while(|c| *c == marker).count();
    // A backtick fence may not carry backticks in its info string.
    let valid = length >= 3 && !(marker == '`' && trimmed[length..].contains('`'));
    valid.then_some((marker, length))
}

fn closes_fence(line: &str, marker: char, length: usize) -> bool {
    let trimmed = line.trim_start_matches(' ');
    line.len() - trimmed.len() <= 3
        && trimmed.chars().take_while(|c| *c == marker).count() >= length
        && trimmed.trim_start_matches(marker).trim().is_empty()
}

//! Light formatting for generated replies.
//!
//! Generated text arrives as loose Markdown. Only the handful of constructs
//! the replies actually use are recognised: `#` headings, `*`/`-`/`•`
//! bullets, blank-line paragraph breaks, `**bold**` and `*italic*`.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub text: String,
    pub bold: bool,
    pub italic: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading(Vec<Span>),
    Bullet(Vec<Span>),
    Paragraph(Vec<Span>),
}

impl Block {
    pub fn spans(&self) -> &[Span] {
        match self {
            Block::Heading(s) | Block::Bullet(s) | Block::Paragraph(s) => s,
        }
    }

    /// Text with markers removed.
    pub fn plain_text(&self) -> String {
        self.spans().iter().map(|s| s.text.as_str()).collect()
    }
}

fn flush(spans: &mut Vec<Span>, current: &mut String, bold: bool, italic: bool) {
    if !current.is_empty() {
        spans.push(Span {
            text: std::mem::take(current),
            bold,
            italic,
        });
    }
}

/// Split a line into styled spans on `**` and `*` markers.
pub fn parse_inline(text: &str) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut current = String::new();
    let mut bold = false;
    let mut italic = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '*' {
            let double = chars.peek() == Some(&'*');
            if double {
                chars.next();
            }
            flush(&mut spans, &mut current, bold, italic);
            if double {
                bold = !bold;
            } else {
                italic = !italic;
            }
        } else {
            current.push(c);
        }
    }
    flush(&mut spans, &mut current, bold, italic);
    spans
}

fn bullet_body(line: &str) -> Option<&str> {
    ["* ", "- ", "• "]
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
}

fn end_paragraph(paragraph: &mut Vec<&str>, blocks: &mut Vec<Block>) {
    if !paragraph.is_empty() {
        blocks.push(Block::Paragraph(parse_inline(&paragraph.join(" "))));
        paragraph.clear();
    }
}

/// Parse a reply into display blocks. Consecutive plain lines join into one paragraph.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();

    for raw in text.lines() {
        let line = raw.trim();
        if line.is_empty() {
            end_paragraph(&mut paragraph, &mut blocks);
        } else if line.starts_with('#') {
            end_paragraph(&mut paragraph, &mut blocks);
            let body = line.trim_start_matches('#').trim();
            blocks.push(Block::Heading(parse_inline(body)));
        } else if let Some(body) = bullet_body(line) {
            end_paragraph(&mut paragraph, &mut blocks);
            blocks.push(Block::Bullet(parse_inline(body.trim())));
        } else {
            paragraph.push(line);
        }
    }
    end_paragraph(&mut paragraph, &mut blocks);
    blocks
}

/// A single plain paragraph, used for inline status and error text.
pub fn plain(text: &str) -> Vec<Block> {
    vec![Block::Paragraph(vec![Span {
        text: text.to_string(),
        bold: false,
        italic: false,
    }])]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn span(text: &str, bold: bool, italic: bool) -> Span {
        Span {
            text: text.to_string(),
            bold,
            italic,
        }
    }

    #[test]
    fn inline_bold_and_italic() {
        assert_eq!(
            parse_inline("**Bees** are *busy*."),
            vec![
                span("Bees", true, false),
                span(" are ", false, false),
                span("busy", false, true),
                span(".", false, false),
            ]
        );
    }

    #[test]
    fn blocks_from_reply() {
        let reply = "## Why bees matter\n\nThey pollinate\nmost crops.\n\n* Honey\n- Wax\n\nThanks!";
        let blocks = parse_blocks(reply);
        assert_eq!(blocks.len(), 5);
        assert!(matches!(blocks[0], Block::Heading(_)));
        assert_eq!(blocks[0].plain_text(), "Why bees matter");
        assert_eq!(blocks[1].plain_text(), "They pollinate most crops.");
        assert_eq!(blocks[2], Block::Bullet(vec![span("Honey", false, false)]));
        assert_eq!(blocks[3].plain_text(), "Wax");
        assert!(matches!(blocks[4], Block::Paragraph(_)));
    }

    #[test]
    fn empty_reply_has_no_blocks() {
        assert!(parse_blocks("  \n\n ").is_empty());
    }
}

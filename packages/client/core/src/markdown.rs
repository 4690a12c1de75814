//! Minimal markdown for assistant replies: headings, bullet items, fenced
//! code blocks and paragraphs, with `inline code` and **bold** spans.

#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub text: String,
    pub code: bool,
    pub bold: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading { level: u8, spans: Vec<Span> },
    Bullet(Vec<Span>),
    Paragraph(Vec<Span>),
    Code { language: Option<String>, content: String },
}

pub fn parse(source: &str) -> Vec<Block> {
    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    let mut lines = source.lines();

    let flush = |paragraph: &mut Vec<&str>, blocks: &mut Vec<Block>| {
        if !paragraph.is_empty() {
            blocks.push(Block::Paragraph(spans(&paragraph.join(" "))));
            paragraph.clear();
        }
    };

    while let Some(line) = lines.next() {
        let trimmed = line.trim_start();

        if let Some(lang) = trimmed.strip_prefix("```") {
            flush(&mut paragraph, &mut blocks);
            let language = Some(lang.trim()).filter(|l| !l.is_empty()).map(str::to_string);
            let mut content = Vec::new();
            for code_line in lines.by_ref() {
                if code_line.trim_start().starts_with("```") {
                    break;
                }
                content.push(code_line);
            }
            blocks.push(Block::Code {
                language,
                content: content.join("\n"),
            });
            continue;
        }

        if trimmed.is_empty() {
            flush(&mut paragraph, &mut blocks);
            continue;
        }

        let hashes = trimmed.chars().take_while(|c| *c == '#').count();
        if (1..=6).contains(&hashes) && trimmed[hashes..].starts_with(' ') {
            flush(&mut paragraph, &mut blocks);
            blocks.push(Block::Heading {
                level: hashes as u8,
                spans: spans(trimmed[hashes..].trim()),
            });
            continue;
        }

        if let Some(item) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
            .or_else(|| trimmed.strip_prefix("• "))
        {
            flush(&mut paragraph, &mut blocks);
            blocks.push(Block::Bullet(spans(item.trim())));
            continue;
        }

        paragraph.push(trimmed.trim_end());
    }

    flush(&mut paragraph, &mut blocks);
    blocks
}

/// Splits a line into plain, `code` and **bold** runs. Unclosed markers are
/// kept as literal text.
pub fn spans(text: &str) -> Vec<Span> {
    let mut out = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let next_code = rest.find('`');
        let next_bold = rest.find("**");
        let (at, marker) = match (next_code, next_bold) {
            (Some(c), Some(b)) if b < c => (b, "**"),
            (Some(c), _) => (c, "`"),
            (None, Some(b)) => (b, "**"),
            (None, None) => break,
        };

        let after = &rest[at + marker.len()..];
        let Some(close) = after.find(marker) else {
            break;
        };

        push(&mut out, &rest[..at], false, false);
        push(&mut out, &after[..close], marker == "`", marker == "**");
        rest = &after[close + marker.len()..];
    }

    push(&mut out, rest, false, false);
    out
}

fn push(out: &mut Vec<Span>, text: &str, code: bool, bold: bool) {
    if !text.is_empty() {
        out.push(Span {
            text: text.to_string(),
            code,
            bold,
        });
    }
}

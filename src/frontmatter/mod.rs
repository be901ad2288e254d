//! Frontmatter micro-parser.
//!
//! Notes start with a `---` delimited block of flat `key: value` lines. This is
//! deliberately not YAML: values are kept as raw strings and it is up to the
//! caller to interpret booleans, lists or dates.

use crate::constants::FRONTMATTER_DELIMITER;

/// Ordered flat key/value metadata of a note.
///
/// Keys are unique. Inserting an existing key replaces its value but keeps the
/// position of the first occurrence.
///
/// # Examples
///
/// ```
/// use calnote::frontmatter::Frontmatter;
///
/// let mut fm = Frontmatter::new();
/// fm.insert("title", "Call");
/// fm.insert("date", "2025-07-21");
/// assert_eq!(fm.get("title"), Some("Call"));
/// assert_eq!(fm.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    entries: Vec<(String, String)>,
}

impl Frontmatter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the value only when it is present and not empty.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serializes the mapping back into a delimited block.
    ///
    /// The output ends with a newline after the closing delimiter, so a body
    /// can be appended directly.
    pub fn to_block(&self) -> String {
        let mut block = String::new();
        block.push_str(FRONTMATTER_DELIMITER);
        block.push('\n');
        for (key, value) in self.iter() {
            block.push_str(key);
            block.push_str(": ");
            block.push_str(value);
            block.push('\n');
        }
        block.push_str(FRONTMATTER_DELIMITER);
        block.push('\n');
        block
    }
}

/// A note split into metadata and body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedNote {
    pub frontmatter: Frontmatter,
    pub body: String,
}

/// Reports whether the text opens with a frontmatter delimiter.
///
/// Callers use this to tell event notes from unrelated markdown before parsing.
pub fn has_frontmatter(text: &str) -> bool {
    text.starts_with(FRONTMATTER_DELIMITER)
}

/// Splits note text into its frontmatter mapping and trimmed body.
///
/// The block runs from the opening `---` line to the next `\n---`. Lines
/// without a `:` are ignored. Input without a well-formed delimiter pair yields
/// an empty mapping and the untouched text as body; this never fails.
///
/// # Examples
///
/// ```
/// use calnote::frontmatter::parse;
///
/// let note = parse("---\ntitle: Call\ndate: 2025-07-21\n---\nFollowed up.\n");
/// assert_eq!(note.frontmatter.get("date"), Some("2025-07-21"));
/// assert_eq!(note.body, "Followed up.");
///
/// let plain = parse("just text");
/// assert!(plain.frontmatter.is_empty());
/// assert_eq!(plain.body, "just text");
/// ```
pub fn parse(text: &str) -> ParsedNote {
    match split_block(text) {
        Some((block, body)) => ParsedNote {
            frontmatter: parse_block(block),
            body: body.trim().to_string(),
        },
        None => ParsedNote {
            frontmatter: Frontmatter::new(),
            body: text.to_string(),
        },
    }
}

/// Locates the raw block and the remainder after the closing delimiter.
fn split_block(text: &str) -> Option<(&str, &str)> {
    let delimiter = FRONTMATTER_DELIMITER;
    let after_open = text.strip_prefix(delimiter)?;

    // The opening line may carry trailing whitespace and blank lines; the block
    // starts after the last newline of that whitespace run.
    let leading_ws = after_open.len() - after_open.trim_start().len();
    let newline = after_open[..leading_ws].rfind('\n')?;
    let block_start = delimiter.len() + newline + 1;

    // Searching from the opening newline allows an empty block.
    let search_from = block_start - 1;
    let closing = format!("\n{}", delimiter);
    let close = search_from + text[search_from..].find(&closing)?;

    let block = if close >= block_start {
        &text[block_start..close]
    } else {
        ""
    };
    Some((block, &text[close + closing.len()..]))
}

fn parse_block(block: &str) -> Frontmatter {
    let mut frontmatter = Frontmatter::new();
    for line in block.lines() {
        if let Some((key, value)) = line.split_once(':') {
            frontmatter.insert(key.trim(), value.trim());
        }
    }
    frontmatter
}

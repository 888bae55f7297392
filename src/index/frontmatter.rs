//! Front matter and preview extraction for crawled markdown files.

/// `key: value` pairs from a leading `---` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrontMatter {
    fields: Vec<(String, String)>,
}

impl FrontMatter {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .filter(|v| !v.is_empty())
    }
}

/// Splits a document into its front matter (if any) and the remaining body.
///
/// The block must open on the first line and be closed by a second `---`
/// line; an unterminated block is treated as ordinary content.
pub fn split_front_matter(content: &str) -> (Option<FrontMatter>, &str) {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut lines = content.split_inclusive('\n');

    match lines.next() {
        Some(first) if first.trim_end() == "---" => {}
        _ => return (None, content),
    }

    let mut consumed = content.len() - lines.clone().map(str::len).sum::<usize>();
    let mut fields = Vec::new();
    for line in lines {
        consumed += line.len();
        let trimmed = line.trim();
        if trimmed == "---" {
            return (Some(FrontMatter { fields }), &content[consumed..]);
        }
        if let Some((key, value)) = trimmed.split_once(':') {
            fields.push((key.trim().to_string(), unquote(value.trim()).to_string()));
        }
    }

    (None, content)
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = value
            .strip_prefix(quote)
            .and_then(|rest| rest.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// First non-empty line of a body, with heading markers removed.
pub fn first_content_line(body: &str) -> Option<&str> {
    body.lines()
        .map(|line| line.trim().trim_start_matches('#').trim())
        .find(|line| !line.is_empty())
}

/// Truncates to at most `max_chars` characters, appending `...` when cut.
pub fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", text[..cut].trim_end()),
        None => text.to_string(),
    }
}

/// `react-native` → `React Native`.
pub fn title_case(stem: &str) -> String {
    stem.split(['-', '_', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}

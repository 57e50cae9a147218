#[cfg(feature = "tracing_debug")]
use tracing::debug;

// We'll target 95% of the total width, to ensure the renderer doesn't literally use the full space.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

/// Renders rows of two columns: a fixed width left column, and a middle column which wraps.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    padding: usize,
    left: usize,
    middle: usize,
}

impl ColumnRenderer {
    /// Produce a renderer which fills (most of) the total width.
    /// The middle column never drops below `MINIMUM_MIDDLE_WIDTH`.
    pub(crate) fn guided(indent: usize, padding: usize, left: usize, total_width: usize) -> Self {
        let non_middle = indent + left + padding;
        let middle = std::cmp::max(
            target_width(total_width).saturating_sub(non_middle),
            MINIMUM_MIDDLE_WIDTH,
        );

        #[cfg(feature = "tracing_debug")]
        {
            debug!("Columns {non_middle} within the total {total_width}.  Selecting middle: {middle}.");
        }

        Self::new(padding, left, middle)
    }

    pub(crate) fn new(padding: usize, left: usize, middle: usize) -> Self {
        // middle must be at least 2 (so we can hyphenate)
        assert!(middle >= 2);
        Self {
            padding,
            left,
            middle,
        }
    }

    pub(crate) fn render(&self, indent: usize, left: &str, middle: &str) -> Vec<String> {
        let padding = " ".repeat(self.padding);
        let left_column_width = self.left;
        let middle_parts = chunk(middle, self.middle);

        if middle_parts.is_empty() {
            return vec![format!("{:indent$}{left}", "")];
        }

        middle_parts
            .into_iter()
            .enumerate()
            .map(|(i, part)| {
                let left = if i == 0 { left } else { "" };
                format!("{:indent$}{left:left_column_width$}{padding}{part}", "")
            })
            .collect()
    }
}

pub(crate) fn target_width(total_width: usize) -> usize {
    (total_width as f64 * TARGET_TOTAL_FACTOR) as usize
}

/// Break the paragraph into lines of at most `width` characters, hyphenating words which are too long.
pub(crate) fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split_whitespace() {
        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + word.chars().count() < width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let characters: Vec<char> = word.chars().collect();
    let increment = width - 1;
    let mut left = 0;

    while characters.len() - left > width {
        let piece: String = characters[left..left + increment].iter().collect();
        lines.push(format!("{piece}-"));
        left += increment;
    }

    current.extend(&characters[left..]);
}

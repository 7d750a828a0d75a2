use terminal_size::{terminal_size, Width};

use crate::interface::UserInterface;
use crate::registry::ArgumentRegistry;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
const MINIMUM_DOC_WIDTH: usize = 17;
const FALLBACK_TOTAL_WIDTH: usize = 80;
const MAIN_INDENT: usize = 1;
// ', --' plus trailing separation, matching the widest left column layout.
const LONG_NAME_PADDING: usize = 8;

/// A renderer for the registry's help document.
///
/// One row per declared argument, in declaration order: the `-s, --long` column padded via
/// the longest declared long name, then the doc text wrapped to the terminal width.
///
/// ### Example
/// ```
/// use rebag::{Argument, ArgumentRegistry, HelpDoc};
///
/// let mut registry = ArgumentRegistry::new();
/// registry
///     .define(Argument::new("h").long("help").doc("Show this help document."))
///     .unwrap();
///
/// let help = HelpDoc::terminal("demo", &registry);
/// assert!(help.render().starts_with("usage: demo"));
/// ```
pub struct HelpDoc<'r> {
    program: String,
    registry: &'r ArgumentRegistry,
    total_width: usize,
}

impl<'r> HelpDoc<'r> {
    /// Create a renderer sized to the current terminal (or a fixed fallback width when the
    /// terminal size cannot be probed).
    pub fn terminal(program: impl Into<String>, registry: &'r ArgumentRegistry) -> Self {
        let total_width = if let Some((Width(width), _)) = terminal_size() {
            width as usize
        } else {
            FALLBACK_TOTAL_WIDTH
        };

        Self {
            program: program.into(),
            registry,
            total_width,
        }
    }

    #[cfg(test)]
    fn fixed(program: impl Into<String>, registry: &'r ArgumentRegistry, width: usize) -> Self {
        Self {
            program: program.into(),
            registry,
            total_width: width,
        }
    }

    /// Render the help document.
    pub fn render(&self) -> String {
        let mut out = format!("usage: {program}", program = self.program);

        for spec in self.registry.specs() {
            if spec.options().value_expected() {
                out.push_str(&format!(" [-{short}=..]", short = spec.short_name()));
            } else {
                out.push_str(&format!(" [-{short}]", short = spec.short_name()));
            }
        }

        out.push('\n');

        if self.registry.is_empty() {
            return out;
        }

        out.push_str("arguments:\n");
        let max_long = self
            .registry
            .specs()
            .map(|spec| spec.long_name_length())
            .max()
            .unwrap_or(0)
            + LONG_NAME_PADDING;
        // The '-s' cell plus the padded long column, plus one space before the doc.
        let left_width = MAIN_INDENT + 2 + max_long;
        let doc_width = if left_width + 1 + MINIMUM_DOC_WIDTH <= self.total_width {
            self.total_width - left_width - 1
        } else {
            MINIMUM_DOC_WIDTH
        };

        for spec in self.registry.specs() {
            let long_column = if spec.long_name_length() > 0 {
                format!(", --{long}", long = spec.long_name())
            } else {
                String::default()
            };
            let left = format!(
                "{:indent$}-{short}{long_column:<max_long$}",
                "",
                indent = MAIN_INDENT,
                short = spec.short_name(),
                long_column = long_column,
                max_long = max_long,
            );

            let mut doc_lines = wrap(spec.doc(), doc_width).into_iter();

            match doc_lines.next() {
                Some(first) => out.push_str(&format!("{left} {first}\n")),
                None => out.push_str(&format!("{left}\n", left = left.trim_end())),
            }

            for line in doc_lines {
                out.push_str(&format!("{:left_width$} {line}\n", ""));
            }
        }

        out
    }

    /// Render and emit the help document through the given interface.
    pub fn print(&self, user_interface: &dyn UserInterface) {
        user_interface.print(self.render());
    }
}

fn wrap(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split_whitespace() {
        if current.is_empty() {
            hyphenate(word, width, &mut lines, &mut current);
        } else if current.len() + word.len() + 1 <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(word, width, &mut lines, &mut current);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(word: &str, width: usize, lines: &mut Vec<String>, current: &mut String) {
    let mut remainder = word;

    while remainder.chars().count() > width {
        // Split on a character boundary; a byte index would tear multi-byte text.
        let (split, _) = remainder
            .char_indices()
            .nth(width - 1)
            .expect("internal error - remainder must exceed the width");
        let (head, tail) = remainder.split_at(split);
        lines.push(format!("{head}-"));
        remainder = tail;
    }

    *current = remainder.to_string();
}

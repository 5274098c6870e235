use std::collections::HashMap;

use terminal_size::{terminal_size, Width};
use tracing::debug;

use crate::constant::*;
use crate::model::ValueKind;
use crate::ui::UserInterface;

/// What the help message needs to know about one registered parameter.
#[derive(Debug, Clone)]
pub(crate) struct ParameterSummary {
    pub(crate) name: String,
    pub(crate) short: Option<char>,
    pub(crate) kind: ValueKind,
    pub(crate) min_count: usize,
    pub(crate) positional: bool,
    pub(crate) help: Option<String>,
}

const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 1;

pub(crate) struct Printer {
    options: Vec<ParameterSummary>,
    positionals: Vec<ParameterSummary>,
    about: Option<String>,
    terminal_width: Option<usize>,
}

impl Printer {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self::new(Vec::default(), None, None)
    }

    pub(crate) fn terminal(summaries: Vec<ParameterSummary>, about: Option<String>) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(summaries, about, terminal_width)
    }

    pub(crate) fn new(
        summaries: Vec<ParameterSummary>,
        about: Option<String>,
        terminal_width: Option<usize>,
    ) -> Self {
        let (positionals, mut options): (Vec<_>, Vec<_>) = summaries
            .into_iter()
            .partition(|summary| summary.positional);
        options.sort_by(|a, b| a.name.cmp(&b.name));
        Self {
            options,
            positionals,
            about,
            terminal_width,
        }
    }

    pub(crate) fn print_help(
        &self,
        program: impl Into<String>,
        user_interface: &(impl UserInterface + ?Sized),
    ) {
        let help_flags = format!("-{HELP_SHORT}, --{HELP_NAME}");
        let mut summary = vec![format!("[-{HELP_SHORT}]")];
        let mut left_column_width = help_flags.len();
        let mut middle_column_width = HELP_MESSAGE.len() + MAIN_INDENT;
        let mut grammars: HashMap<String, String> = HashMap::default();

        for ParameterSummary {
            name,
            short,
            kind,
            min_count,
            help,
            ..
        } in &self.options
        {
            let name_example = name.to_ascii_uppercase().replace('-', "_");
            let grammar = match kind {
                ValueKind::Flag => "".to_string(),
                ValueKind::Scalar => format!(" {name_example}"),
                ValueKind::Sequence if *min_count == 0 => format!(" [{name_example} ...]"),
                ValueKind::Sequence => format!(" {name_example} [...]"),
            };
            grammars.insert(name.clone(), grammar.clone());

            match short {
                Some(s) => {
                    // The 6 accounts for "-S , --".
                    // Ex: "-l LIMIT, --limit LIMIT"
                    //      ^^      ^^^^
                    if left_column_width < name.len() + (grammar.len() * 2) + 6 {
                        left_column_width = name.len() + (grammar.len() * 2) + 6;
                    }

                    summary.push(format!("[-{s}{grammar}]"));
                }
                None => {
                    // The 2 accounts for "--".
                    // Ex: "--limit LIMIT"
                    //      ^^
                    if left_column_width < name.len() + grammar.len() + 2 {
                        left_column_width = name.len() + grammar.len() + 2;
                    }

                    summary.push(format!("[--{name}{grammar}]"));
                }
            };

            if let Some(help) = help {
                if middle_column_width < help.len() + MAIN_INDENT {
                    middle_column_width = help.len() + MAIN_INDENT;
                }
            }
        }

        for ParameterSummary {
            name,
            kind,
            min_count,
            help,
            ..
        } in &self.positionals
        {
            let name_example = name.to_ascii_uppercase().replace('-', "_");
            let grammar = match kind {
                ValueKind::Flag => {
                    unreachable!("internal error - flags cannot be positional")
                }
                ValueKind::Scalar => name_example,
                ValueKind::Sequence if *min_count == 0 => format!("[{name_example} ...]"),
                ValueKind::Sequence => format!("{name_example} [...]"),
            };
            grammars.insert(name.clone(), grammar.clone());

            if left_column_width < grammar.len() {
                left_column_width = grammar.len();
            }

            summary.push(grammar);

            if let Some(help) = help {
                if middle_column_width < help.len() + MAIN_INDENT {
                    middle_column_width = help.len() + MAIN_INDENT;
                }
            }
        }

        let column_renderer = match &self.terminal_width {
            Some(terminal_width) => ColumnRenderer::guided(
                PaddingWidth::new(PADDING_WIDTH).expect("internal error - invalid padding width"),
                LeftWidth::new(left_column_width).expect("internal error - invalid left width"),
                MiddleWidth::new(middle_column_width)
                    .expect("internal error - invalid middle width"),
                TotalWidth(*terminal_width),
            ),
            None => ColumnRenderer::new(
                PaddingWidth::new(PADDING_WIDTH).expect("internal error - invalid padding width"),
                LeftWidth::new(left_column_width).expect("internal error - invalid left width"),
                MiddleWidth::new(std::cmp::min(middle_column_width, MINIMUM_MIDDLE_WIDTH))
                    .expect("internal error - invalid middle width"),
            ),
        };

        user_interface.print(format!(
            "usage: {p} {s}",
            p = program.into(),
            s = summary.join(" ")
        ));

        if let Some(about) = &self.about {
            user_interface.print("".to_string());

            for line in chunk(about, column_renderer.text_width()) {
                user_interface.print(line);
            }
        }

        if !self.positionals.is_empty() {
            user_interface.print("".to_string());
            user_interface.print("positional arguments:".to_string());

            for ParameterSummary { name, help, .. } in &self.positionals {
                let grammar = grammars
                    .remove(name)
                    .expect("internal error - must have been set");
                let positional_help = match help {
                    Some(message) => message.clone(),
                    None => "".to_string(),
                };

                for line in column_renderer.render(MAIN_INDENT, &grammar, &positional_help) {
                    user_interface.print(line);
                }
            }
        }

        user_interface.print("".to_string());
        user_interface.print("options:".to_string());

        for line in column_renderer.render(MAIN_INDENT, &help_flags, HELP_MESSAGE) {
            user_interface.print(line);
        }

        for ParameterSummary {
            name, short, help, ..
        } in &self.options
        {
            let grammar = grammars
                .remove(name)
                .expect("internal error - must have been set");
            let option_flags = match short {
                Some(s) => format!("-{s}{grammar}, --{name}{grammar}"),
                None => format!("--{name}{grammar}"),
            };
            let option_help = match help {
                Some(message) => message.clone(),
                None => "".to_string(),
            };

            for line in column_renderer.render(MAIN_INDENT, &option_flags, &option_help) {
                user_interface.print(line);
            }
        }
    }
}

#[derive(Debug)]
pub(crate) struct PaddingWidth(usize);

impl PaddingWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // padding must be at least 1
        if width >= 1 {
            Ok(PaddingWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct LeftWidth(usize);

impl LeftWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // left must be at least 1
        if width >= 1 {
            Ok(LeftWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct MiddleWidth(usize);

impl MiddleWidth {
    pub(crate) fn new(width: usize) -> Result<Self, ()> {
        // middle must be at least 2 (so we can hyphenate)
        if width >= 2 {
            Ok(MiddleWidth(width))
        } else {
            Err(())
        }
    }
}

#[derive(Debug)]
pub(crate) struct TotalWidth(pub(crate) usize);

#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    padding: PaddingWidth,
    left: LeftWidth,
    middle: MiddleWidth,
}

// We'll target 95% of the total width, to ensure the renderer doesn't literally use the full space.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Let's assume the average word length is 5.
// Then 17 is a good minimum, because it allows precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

impl ColumnRenderer {
    /// Produce a renderer based off the provided widths.
    /// This renderer will use a heuristic to chose the middle width.
    pub(crate) fn guided(
        padding: PaddingWidth,
        left: LeftWidth,
        middle: MiddleWidth,
        total_width: TotalWidth,
    ) -> Self {
        // We always have a left and a middle (and a padding between them).
        let non_middle: usize = left.0 + padding.0;
        let target_total_width = (total_width.0 as f64 * TARGET_TOTAL_FACTOR) as usize;
        let guided_middle = std::cmp::max(middle.0, MINIMUM_MIDDLE_WIDTH);

        if guided_middle + non_middle <= target_total_width {
            debug!("columns {non_middle} and middle fit within the target total {target_total_width}; selecting middle {guided_middle}");
            Self::new(padding, left, MiddleWidth(guided_middle))
        } else if non_middle < total_width.0 {
            let calculated_middle = std::cmp::max(total_width.0 - non_middle, MINIMUM_MIDDLE_WIDTH);
            debug!("columns {non_middle} fit within the total {total}; selecting middle {calculated_middle}", total = total_width.0);
            Self::new(padding, left, MiddleWidth(calculated_middle))
        } else {
            debug!("columns {non_middle} do not fit within the total {total}; selecting middle {MINIMUM_MIDDLE_WIDTH}", total = total_width.0);
            Self::new(padding, left, MiddleWidth(MINIMUM_MIDDLE_WIDTH))
        }
    }

    /// Produce a renderer based off the provided widths.
    pub(crate) fn new(padding: PaddingWidth, left: LeftWidth, middle: MiddleWidth) -> Self {
        Self {
            padding,
            left,
            middle,
        }
    }

    fn text_width(&self) -> usize {
        self.left.0 + self.padding.0 + self.middle.0
    }

    pub(crate) fn render(&self, indent: usize, left: &str, middle: &str) -> Vec<String> {
        let padding = self.padding.0;
        let padding = format!("{:padding$}", "");
        let left_column_width = self.left.0;
        assert!(left.len() <= left_column_width);
        let middle_column_width = self.middle.0 - indent;
        let middle_parts = chunk(middle, middle_column_width);
        let mut out = Vec::default();

        for (i, part) in middle_parts.iter().enumerate() {
            if i == 0 {
                out.push(format!(
                    "{:indent$}{:left_column_width$}{padding}{}",
                    "", left, part
                ));
            } else {
                out.push(format!(
                    "{:indent$}{:left_column_width$}{padding}{}",
                    "", "", part
                ));
            }
        }

        if out.is_empty() {
            out.push(format!("{:indent$}{:left_column_width$}", "", left));
        }

        out
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split(' ') {
        if !word.is_empty() {
            if current.is_empty() {
                hyphenate(width, &mut lines, &mut current, word);
            } else if current.len() + word.len() + 1 <= width {
                current.push(' ');
                current.push_str(word);
            } else {
                lines.push(current);
                current = String::default();
                hyphenate(width, &mut lines, &mut current, word);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// Split a word too long for `width` across lines, breaking with a dash.
/// Whatever remains (possibly the whole word) lands in `current`.
fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let increment = width - 1;
    let mut left = 0;
    let mut right = increment;

    while right + 1 < word.len() {
        lines.push(format!("{}-", &word[left..right]));
        left += increment;
        right += increment;
    }

    current.push_str(&word[left..]);
}

/// A two-line snippet pointing a caret at the offending character of the
/// space-joined argument line.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct ErrorContext {
    offset: usize,
    tokens: Vec<String>,
}

impl ErrorContext {
    pub(crate) fn new(offset: usize, tokens: &[&str]) -> Self {
        Self {
            offset,
            tokens: tokens.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut tokens_length = 0;
        let mut projection = String::default();
        let mut projection_offset = 0;

        for (i, token) in self.tokens.iter().enumerate() {
            tokens_length += token.len();
            projection.push_str(token);

            if i + 1 < self.tokens.len() {
                projection.push_str(" ");

                if tokens_length <= self.offset {
                    projection_offset += 1;
                }
            }
        }

        write!(
            f,
            "{projection}\n{:width$}^",
            "",
            width = std::cmp::min(self.offset, tokens_length.saturating_sub(1)) + projection_offset
        )
    }
}

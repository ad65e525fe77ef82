use crate::model::{Block, Input, InputKind, InputOption};
use itertools::Itertools;
use std::ops::Deref;

/// Formats bundle blocks into a human-readable outline
pub struct SummaryFormatter;

impl SummaryFormatter {
    /// Format every block, separated by blank lines.
    pub fn format_blocks<B: Deref<Target = Block>>(blocks: &[B]) -> String {
        if blocks.is_empty() {
            return "No blocks configured".to_string();
        }
        blocks.iter().map(|b| Self::format_block(&**b)).join("\n\n")
    }

    /// Format a single block with its inputs and options.
    pub fn format_block(block: &Block) -> String {
        let mut lines = vec![format!(
            "Block #{} {} ({})",
            block.id(),
            Self::quoted(block.title()),
            Self::kind_counts(block.inputs())
        )];
        if !block.description().is_empty() {
            for line in block.description().lines() {
                lines.push(format!("  | {}", line));
            }
        }
        for input in block.inputs() {
            lines.push(Self::format_input(input));
            for option in input.options().unwrap_or_default() {
                lines.push(Self::format_option(option));
            }
        }
        lines.join("\n")
    }

    fn format_input(input: &Input) -> String {
        let options = match input.options() {
            Some(options) => format!(": {} options", options.len()),
            None => String::new(),
        };
        format!(
            "  - [{}] #{} {}{}",
            input.kind(),
            input.id(),
            Self::quoted(input.title()),
            options
        )
    }

    fn format_option(option: &InputOption) -> String {
        let price = option.price_adjustment();
        let sign = if price.cents() < 0 { "-" } else { "+" };
        let magnitude = price.to_string();
        let mut line = format!(
            "      * #{} {} {}${}",
            option.id(),
            Self::quoted(option.title()),
            sign,
            magnitude.trim_start_matches('-')
        );
        if let Some(quantity) = option.quantity() {
            line.push_str(&format!(" x{}", quantity));
        }
        line
    }

    /// "2 radio, 1 text" style breakdown, in the fixed kind order.
    fn kind_counts(inputs: &[Input]) -> String {
        if inputs.is_empty() {
            return "no inputs".to_string();
        }
        let counts = inputs.iter().counts_by(Input::kind);
        InputKind::ALL
            .iter()
            .filter_map(|kind| counts.get(kind).map(|n| format!("{} {}", n, kind)))
            .join(", ")
    }

    fn quoted(text: &str) -> String {
        if text.is_empty() {
            "(untitled)".to_string()
        } else {
            format!("\"{}\"", text)
        }
    }
}

use colored::{ColoredString, Colorize};

use flowmark_chain::{materialize, Chain, ChainEntry, StateNode};

/// A state label drawn on its own color.
pub fn chip(node: &StateNode) -> ColoredString {
    let text = format!(" {} ", node.label);
    match (node.color.rgb(), node.color.contrast_text().rgb()) {
        (Some((r, g, b)), Some((fr, fg, fb))) => text.truecolor(fr, fg, fb).on_truecolor(r, g, b),
        _ => text.bold(),
    }
}

pub fn entry(entry: &ChainEntry<'_>) -> String {
    match entry {
        ChainEntry::State(node) => chip(node).to_string(),
        ChainEntry::LoopBack(head) => format!("{} {}", "↻".dimmed(), head.label.dimmed()),
        ChainEntry::Checkbox(node) => format!("{} {}", "☐".cyan(), chip(node)),
    }
}

/// One line per chain: head token, then the states joined by arrows, with
/// the checkbox state set apart.
pub fn chain_line(chain: &Chain) -> String {
    let mut forward = Vec::new();
    let mut side = None;
    for item in materialize(chain) {
        match item {
            ChainEntry::Checkbox(_) => side = Some(entry(&item)),
            _ => forward.push(entry(&item)),
        }
    }
    let arrow = format!(" {} ", "→".dimmed());
    let mut line = format!(
        "{}  {}",
        format!("{:>6}", chain.head().token()).yellow(),
        forward.join(&arrow)
    );
    if let Some(side) = side {
        line.push_str(&format!("   {side}"));
    }
    line
}

use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::output::descriptions::{category_blurb, category_name};
use crate::scoring::{Category, Outcome, ScoreMap};

/// Radius floor of the profile chart: bars are scaled against at least this
/// score so a low-scoring profile doesn't fill the whole width.
const CHART_SCALE_FLOOR: u32 = 60;

/// Widest bar we draw when the terminal width is unknown (piped output).
const DEFAULT_BAR_WIDTH: usize = 40;

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Format the resolved outcome as a multi-line panel: dominant type with its
/// description, the wing, and the confidence on its 0-100 scale.
pub fn format_outcome(outcome: &Outcome, use_colors: bool) -> String {
    let dominant_line = format!(
        "Dominant type: {} - {}",
        outcome.dominant,
        category_name(outcome.dominant)
    );
    let wing_line = format!("Wing: {} - {}", outcome.wing, category_name(outcome.wing));
    let confidence_line = format!("Confidence: {}/100", outcome.confidence);

    if use_colors {
        format!(
            "{}\n  {}\n\n{}\n  {}\n\n{}",
            dominant_line.bold(),
            category_blurb(outcome.dominant),
            wing_line.cyan(),
            category_blurb(outcome.wing),
            confidence_line.dimmed()
        )
    } else {
        format!(
            "{}\n  {}\n\n{}\n  {}\n\n{}",
            dominant_line,
            category_blurb(outcome.dominant),
            wing_line,
            category_blurb(outcome.wing),
            confidence_line
        )
    }
}

/// Format the full score map as a per-category bar chart, the terminal
/// rendering of the web UI's radar plot. All nine axes are drawn; a
/// category nothing contributed to shows an empty bar.
pub fn format_profile_chart(scores: &ScoreMap, use_colors: bool) -> String {
    let chart_max = scores
        .values()
        .copied()
        .max()
        .unwrap_or(0)
        .max(CHART_SCALE_FLOOR);

    // Label column: "9 The Individualist " is the widest case.
    let label_width = Category::all()
        .map(|c| category_name(c).len())
        .max()
        .unwrap_or(0)
        + 2;

    let bar_width = match get_terminal_width() {
        // Leave room for label, score column and separators.
        Some(w) if w > label_width + 12 => (w - label_width - 8).min(DEFAULT_BAR_WIDTH * 2),
        Some(_) => 20,
        None => DEFAULT_BAR_WIDTH,
    };

    let mut lines = Vec::with_capacity(10);
    for category in Category::all() {
        let score = scores.get(&category).copied().unwrap_or(0);
        let filled = (score as usize * bar_width) / chart_max as usize;
        let bar: String = "█".repeat(filled);
        let rest: String = "░".repeat(bar_width - filled);
        let label = format!("{} {:<width$}", category, category_name(category), width = label_width - 2);

        if use_colors {
            lines.push(format!(
                "{} {}{} {:>3}",
                label.dimmed(),
                bar.magenta(),
                rest.dimmed(),
                score
            ));
        } else {
            lines.push(format!("{} {}{} {:>3}", label, bar, rest, score));
        }
    }

    lines.join("\n")
}

/// One-line progress bar for the questionnaire: percent of items answered.
pub fn format_progress(answered: usize, total: usize, use_colors: bool) -> String {
    let percent = if total == 0 {
        0
    } else {
        (answered * 100) / total
    };
    let width = 30;
    let filled = (percent * width) / 100;
    let bar = format!(
        "[{}{}] {}% ({}/{})",
        "=".repeat(filled),
        " ".repeat(width - filled),
        percent,
        answered,
        total
    );

    if use_colors {
        bar.green().to_string()
    } else {
        bar
    }
}

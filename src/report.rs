//! Terminal rendering helpers
//!
//! Styled banners, the advice box, and grade coloring shared by the CLI
//! commands. Pure string building where possible so the pieces stay
//! testable.

use crate::models::CarbonGrade;
use console::Style;

/// Widest the advice box body gets, in columns.
const BOX_MAX_WIDTH: usize = 80;

/// Print a feature banner: emoji, bold accent title, accent tagline.
pub fn banner(emoji: &str, title: &str, message: &str, accent: &Style) {
    println!("\n{} {}", emoji, accent.apply_to(title).bold());
    println!("   {}\n", accent.apply_to(message));
}

/// Frame advisory prose in a bordered box.
pub fn advice_box(title: &str, text: &str) -> String {
    // Widen to fit the title, then cap; over-long titles clip with the
    // body lines instead of breaking the frame.
    let lines: Vec<&str> = text.lines().collect();
    let width = lines
        .iter()
        .map(|l| l.chars().count())
        .max()
        .unwrap_or(0)
        .max(title.chars().count())
        .min(BOX_MAX_WIDTH);
    let heading: String = title.chars().take(width).collect();

    let mut out = String::new();
    out.push_str(&format!("\n┌{}┐\n", "─".repeat(width + 2)));
    out.push_str(&format!("│ {heading:^width$} │\n"));
    out.push_str(&format!("├{}┤\n", "─".repeat(width + 2)));
    for line in lines {
        let clipped: String = line.chars().take(width).collect();
        out.push_str(&format!("│ {clipped:<width$} │\n"));
    }
    out.push_str(&format!("└{}┘\n", "─".repeat(width + 2)));
    out
}

/// Grade colors for terminal output. E never comes out of the grader, but
/// journals may carry one and it still needs a face.
pub fn grade_style(grade: CarbonGrade) -> Style {
    match grade {
        CarbonGrade::A => Style::new().green().bold(),
        CarbonGrade::B => Style::new().green(),
        CarbonGrade::C => Style::new().yellow(),
        CarbonGrade::D => Style::new().magenta(),
        CarbonGrade::E => Style::new().red(),
        CarbonGrade::F => Style::new().red().bold(),
    }
}

/// Compact "3h 20m" / "12m" / "<1m" rendering for minute spans.
pub fn format_minutes(minutes: f64) -> String {
    if minutes < 1.0 {
        return "<1m".to_string();
    }
    let total = minutes.round() as u64;
    let hours = total / 60;
    let mins = total % 60;
    if hours > 0 {
        format!("{hours}h {mins}m")
    } else {
        format!("{mins}m")
    }
}

/// Trim a path string from the left so it fits a column.
pub fn shorten_path(path: &str, max_chars: usize) -> String {
    let count = path.chars().count();
    if count <= max_chars {
        return path.to_string();
    }
    let skip = count - max_chars.saturating_sub(3);
    format!("...{}", path.chars().skip(skip).collect::<String>())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advice_box_frames_text() {
        let boxed = advice_box("ADVICE", "line one\nlonger line two");
        assert!(boxed.contains("│ line one"));
        assert!(boxed.contains("longer line two"));
        assert!(boxed.starts_with("\n┌"));
        assert!(boxed.trim_end().ends_with('┘'));
    }

    #[test]
    fn test_advice_box_tolerates_long_titles() {
        let title = "T".repeat(120);
        let boxed = advice_box(&title, "short body");
        assert!(boxed.lines().all(|l| l.chars().count() <= BOX_MAX_WIDTH + 4));
    }

    #[test]
    fn test_advice_box_clips_very_long_lines() {
        let long = "x".repeat(200);
        let boxed = advice_box("T", &long);
        assert!(boxed.lines().all(|l| l.chars().count() <= BOX_MAX_WIDTH + 4));
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0.4), "<1m");
        assert_eq!(format_minutes(12.2), "12m");
        assert_eq!(format_minutes(200.0), "3h 20m");
    }

    #[test]
    fn test_shorten_path() {
        assert_eq!(shorten_path("short.txt", 20), "short.txt");
        let shortened = shorten_path("a/very/long/path/to/some/file.bin", 15);
        assert!(shortened.starts_with("..."));
        assert!(shortened.ends_with("file.bin"));
        assert_eq!(shortened.chars().count(), 15);
    }
}

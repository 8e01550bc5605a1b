//! Carbon grading heuristics
//!
//! Combines the bloat ranking with free-form complexity commentary into an
//! A-F grade. The commentary is opaque text from the advisor (or its canned
//! fallback); grading itself is a pure function and never shells out.

pub mod journal;

use crate::models::{BloatEntry, CarbonGrade};

/// Energy-heavy entry count at which bloat counts as major.
const MAJOR_HEAVY_COUNT: usize = 3;
/// Displayed-total threshold, in MB, for major bloat.
const MAJOR_TOTAL_MB: f64 = 200.0;
/// Single-entry threshold, in MB, for major bloat.
const MAJOR_SINGLE_MB: f64 = 200.0;

const QUADRATIC_CUES: &[&str] = &["quadratic", "o(n^2)", "o(n²)", "o(n*n)"];
const EFFICIENT_CUES: &[&str] = &[
    "o(1)",
    "o(log",
    "o(n)",
    "constant",
    "logarithmic",
    "linear",
];

/// Grade the workspace. First matching rule wins:
///
/// 1. nested loops in the commentary plus major bloat → F
/// 2. quadratic commentary, or two or more energy-heavy entries → C
/// 3. constant/logarithmic/linear commentary with no heavy entries → A
/// 4. nested loops, or any heavy entry → D
/// 5. otherwise → B
///
/// E never comes out of this table; see `CarbonGrade`.
pub fn grade(entries: &[BloatEntry], complexity_text: &str) -> CarbonGrade {
    let text = complexity_text.to_lowercase();
    let heavy: Vec<&BloatEntry> = entries.iter().filter(|e| e.is_energy_heavy()).collect();
    let displayed_total_mb: f64 = entries.iter().map(|e| e.size_mb).sum();

    let nested = text.contains("nested loop");
    let quadratic = QUADRATIC_CUES.iter().any(|cue| text.contains(cue));
    let efficient = EFFICIENT_CUES.iter().any(|cue| text.contains(cue));

    let major_bloat = heavy.len() >= MAJOR_HEAVY_COUNT
        || displayed_total_mb >= MAJOR_TOTAL_MB
        || heavy.iter().any(|e| e.size_mb >= MAJOR_SINGLE_MB);

    if nested && major_bloat {
        CarbonGrade::F
    } else if quadratic || heavy.len() >= 2 {
        CarbonGrade::C
    } else if efficient && heavy.is_empty() {
        CarbonGrade::A
    } else if nested || !heavy.is_empty() {
        CarbonGrade::D
    } else {
        CarbonGrade::B
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Impact;
    use std::path::PathBuf;

    fn entry(size_mb: f64, impact: Impact) -> BloatEntry {
        BloatEntry {
            path: PathBuf::from(format!("asset-{size_mb}.bin")),
            size_mb,
            impact,
        }
    }

    fn heavy(size_mb: f64) -> BloatEntry {
        entry(size_mb, Impact::EnergyHeavy)
    }

    fn light(size_mb: f64) -> BloatEntry {
        entry(size_mb, Impact::Ok)
    }

    #[test]
    fn test_linear_and_lean_is_a() {
        let entries = vec![light(1.0), light(0.5)];
        assert_eq!(grade(&entries, "The hot path is O(n) over the input."), CarbonGrade::A);
    }

    #[test]
    fn test_two_heavy_entries_is_c() {
        let entries = vec![heavy(60.0), heavy(55.0)];
        assert_eq!(grade(&entries, "Nothing notable."), CarbonGrade::C);
    }

    #[test]
    fn test_quadratic_commentary_is_c() {
        assert_eq!(grade(&[], "Looks quadratic in the worst case."), CarbonGrade::C);
        assert_eq!(grade(&[], "Roughly O(n^2) on large inputs."), CarbonGrade::C);
    }

    #[test]
    fn test_nested_loops_with_major_bloat_is_f() {
        let entries = vec![heavy(210.0), heavy(220.0), heavy(230.0)];
        assert_eq!(
            grade(&entries, "There are nested loops over the asset list."),
            CarbonGrade::F
        );
    }

    #[test]
    fn test_nested_loops_alone_is_d() {
        let entries = vec![heavy(60.0)];
        assert_eq!(grade(&entries, "A nested loop walks the tree."), CarbonGrade::D);
    }

    #[test]
    fn test_single_heavy_entry_is_d() {
        let entries = vec![heavy(60.0), light(1.0)];
        assert_eq!(grade(&entries, "No commentary."), CarbonGrade::D);
    }

    #[test]
    fn test_neutral_and_lean_is_b() {
        assert_eq!(grade(&[light(2.0)], "Nothing stands out."), CarbonGrade::B);
        assert_eq!(grade(&[], ""), CarbonGrade::B);
    }

    #[test]
    fn test_quadratic_wins_over_efficient_cues() {
        // Commentary mentioning both shapes still lands on C.
        assert_eq!(
            grade(&[], "Mostly linear, but one pass is quadratic."),
            CarbonGrade::C
        );
    }

    #[test]
    fn test_displayed_total_counts_toward_major_bloat() {
        let entries = vec![heavy(120.0), light(90.0)];
        assert_eq!(grade(&entries, "nested loops everywhere"), CarbonGrade::F);
    }
}

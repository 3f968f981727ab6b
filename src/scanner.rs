//! Eight-direction scan of a completed grid for incidental words.
//!
//! Every directional line is read forward (`"F"`) and backward (`"R"`).
//! Substrings of at least the configured minimum length are tested against
//! the prohibited-word lexicon and against the intended answer set:
//!
//! - a lexicon hit is recorded with `accepted: false` — unless it exactly
//!   coincides with an intentionally placed answer word and the caller opted
//!   into profane answers, in which case it is whitelisted;
//! - an answer word found in its expected position is recorded with
//!   `accepted: true`.
//!
//! The eight directions are evaluated independently, so the same cells can
//! legitimately appear in findings under several lines; a finding is unique
//! per (line, orientation, range). Cells covered by a rejected finding get
//! their `is_profane` flag set; cells covered by an accepted finding get the
//! line's axis-family flag.

use crate::grid::Grid;
use crate::lexicon::Lexicon;
use crate::placer::PlacedWord;
use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One incidental or answer occurrence discovered by the scanner.
///
/// Serializes to `{word, accepted, direction, word_range, coords}` — part of
/// the persisted puzzle contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoundProfanity {
    /// The discovered word, uppercase.
    pub word: String,
    /// True for intentionally placed or whitelisted occurrences; false for
    /// prohibited incidental hits.
    pub accepted: bool,
    /// Reading orientation within the line: `"F"` forward, `"R"` backward.
    pub direction: String,
    /// `[start, end)` offsets of the word within its (oriented) line.
    pub word_range: (usize, usize),
    /// Grid coordinates covered, as `[x, y]` pairs in reading order.
    pub coords: Vec<(usize, usize)>,
}

/// Scanner output: findings keyed by line label, in deterministic order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScanReport {
    pub findings: BTreeMap<String, Vec<FoundProfanity>>,
}

impl ScanReport {
    /// All `accepted: false` findings, flattened. Any non-empty result is a
    /// hard rejection of the attempt.
    #[must_use]
    pub fn rejected(&self) -> Vec<FoundProfanity> {
        self.findings
            .values()
            .flatten()
            .filter(|f| !f.accepted)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn has_rejections(&self) -> bool {
        self.findings.values().flatten().any(|f| !f.accepted)
    }
}

/// Scan the completed grid against the lexicon and the placed-word set,
/// updating cell flags and returning the findings per line.
pub fn scan_grid(
    grid: &mut Grid,
    placed: &[PlacedWord],
    lexicon: &Lexicon,
    min_len: usize,
    allow_profane_answers: bool,
) -> ScanReport {
    // Paths (and their reversals) of every intentionally placed word, for the
    // expected-position check.
    let mut intended_paths: HashSet<Vec<(usize, usize)>> = HashSet::new();
    let mut answer_words: HashSet<&str> = HashSet::new();
    let mut max_answer_len = 0;
    for p in placed {
        let mut reversed = p.cells.clone();
        reversed.reverse();
        intended_paths.insert(p.cells.clone());
        intended_paths.insert(reversed);
        answer_words.insert(p.word.as_str());
        max_answer_len = max_answer_len.max(p.word.len());
    }

    // Substrings longer than anything in the lexicon or the answer set
    // cannot match; cap the inner loop there.
    let max_interesting = lexicon.max_len().max(max_answer_len);

    let mut report = ScanReport::default();
    for line in grid.lines() {
        if line.coords.len() < min_len {
            continue;
        }
        let mut findings = Vec::new();
        for orientation in ["F", "R"] {
            let mut coords = line.coords.clone();
            if orientation == "R" {
                coords.reverse();
            }
            let chars: Vec<char> = coords
                .iter()
                .map(|&(x, y)| grid.get(x, y).expect("line coords are in bounds"))
                .collect();

            for i in 0..chars.len() {
                let j_max = chars.len().min(i + max_interesting);
                for j in (i + min_len)..=j_max {
                    let word: String = chars[i..j].iter().collect();
                    let intended = intended_paths.contains(&coords[i..j]);
                    let accepted = if lexicon.contains(&word) {
                        intended && allow_profane_answers
                    } else if intended && answer_words.contains(word.as_str()) {
                        true
                    } else {
                        continue;
                    };
                    findings.push(FoundProfanity {
                        word,
                        accepted,
                        direction: orientation.to_string(),
                        word_range: (i, j),
                        coords: coords[i..j].to_vec(),
                    });
                }
            }
        }

        for finding in &findings {
            if finding.accepted {
                for &(x, y) in &finding.coords {
                    grid.mark_direction(x, y, line.family);
                }
            } else {
                warn!(
                    "prohibited word \"{}\" found in {} ({})",
                    finding.word, line.label, finding.direction
                );
                for &(x, y) in &finding.coords {
                    grid.mark_profane(x, y);
                }
            }
        }
        if !findings.is_empty() {
            report.findings.insert(line.label, findings);
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;

    /// Lay `word` onto `grid` along `direction` starting at `(x, y)`,
    /// returning the PlacedWord bookkeeping the placer would produce.
    fn lay(grid: &mut Grid, word: &str, x: usize, y: usize, direction: Direction) -> PlacedWord {
        let (dx, dy) = direction.delta();
        let cells: Vec<(usize, usize)> = (0..word.len() as isize)
            .map(|i| ((x as isize + dx * i) as usize, (y as isize + dy * i) as usize))
            .collect();
        for (i, ch) in word.chars().enumerate() {
            let (cx, cy) = cells[i];
            grid.set_answer(cx, cy, ch, direction);
        }
        PlacedWord {
            word: word.to_string(),
            origin: (x, y),
            direction,
            reversed: false,
            cells,
        }
    }

    fn fill_with(grid: &mut Grid, ch: char) {
        for y in 0..grid.rows() {
            for x in 0..grid.columns() {
                if grid.get(x, y).unwrap() == crate::grid::EMPTY_CELL {
                    grid.set_filler(x, y, ch);
                }
            }
        }
    }

    #[test]
    fn test_incidental_lexicon_word_is_rejected() {
        let mut grid = Grid::new(4, 4);
        // RAT spelled by filler along row 1
        grid.set_filler(0, 1, 'R');
        grid.set_filler(1, 1, 'A');
        grid.set_filler(2, 1, 'T');
        fill_with(&mut grid, 'Q');
        let report = scan_grid(&mut grid, &[], &Lexicon::new(["rat"]), 3, false);

        assert!(report.has_rejections());
        let row1 = &report.findings["row1"];
        assert_eq!(row1.len(), 1);
        assert_eq!(row1[0].word, "RAT");
        assert!(!row1[0].accepted);
        assert_eq!(row1[0].direction, "F");
        assert_eq!(row1[0].word_range, (0, 3));
        assert_eq!(row1[0].coords, vec![(0, 1), (1, 1), (2, 1)]);
        assert!(grid.cell(0, 1).unwrap().is_profane);
        assert!(grid.cell(1, 1).unwrap().is_profane);
        assert!(!grid.cell(0, 0).unwrap().is_profane);
    }

    #[test]
    fn test_reversed_incidental_word_is_found() {
        let mut grid = Grid::new(1, 3);
        grid.set_filler(0, 0, 'T');
        grid.set_filler(1, 0, 'A');
        grid.set_filler(2, 0, 'R');
        let report = scan_grid(&mut grid, &[], &Lexicon::new(["rat"]), 3, false);
        let row0 = &report.findings["row0"];
        assert_eq!(row0.len(), 1);
        assert_eq!(row0[0].direction, "R");
        assert_eq!(row0[0].coords, vec![(2, 0), (1, 0), (0, 0)]);
    }

    #[test]
    fn test_answer_word_is_accepted() {
        let mut grid = Grid::new(5, 5);
        let placed = lay(&mut grid, "CAT", 1, 2, Direction::EW);
        fill_with(&mut grid, 'Q');
        let report = scan_grid(&mut grid, &[placed], &Lexicon::default(), 3, false);

        assert!(!report.has_rejections());
        let row2 = &report.findings["row2"];
        assert_eq!(row2.len(), 1);
        assert!(row2[0].accepted);
        assert_eq!(row2[0].word, "CAT");
    }

    #[test]
    fn test_answer_word_elsewhere_is_not_accepted_twice() {
        // CAT placed once; filler spells CAT again on another row. The copy
        // is not in the lexicon, so it is not a finding at all — only the
        // intended occurrence is reported.
        let mut grid = Grid::new(4, 4);
        let placed = lay(&mut grid, "CAT", 0, 0, Direction::EW);
        grid.set_filler(0, 2, 'C');
        grid.set_filler(1, 2, 'A');
        grid.set_filler(2, 2, 'T');
        fill_with(&mut grid, 'Q');
        let report = scan_grid(&mut grid, &[placed], &Lexicon::default(), 3, false);
        assert!(report.findings.contains_key("row0"));
        assert!(!report.findings.contains_key("row2"));
    }

    #[test]
    fn test_profane_answer_rejected_unless_whitelisted() {
        let mut grid = Grid::new(4, 4);
        let placed = lay(&mut grid, "RAT", 0, 0, Direction::EW);
        fill_with(&mut grid, 'Q');
        let lexicon = Lexicon::new(["rat"]);

        let report = scan_grid(&mut grid.clone(), &[placed.clone()], &lexicon, 3, false);
        assert!(report.has_rejections());

        let report = scan_grid(&mut grid, &[placed], &lexicon, 3, true);
        assert!(!report.has_rejections());
        assert!(report.findings["row0"][0].accepted);
    }

    #[test]
    fn test_diagonal_finding_is_independent_of_rows_and_columns() {
        let mut grid = Grid::new(3, 3);
        grid.set_filler(0, 0, 'R');
        grid.set_filler(1, 1, 'A');
        grid.set_filler(2, 2, 'T');
        fill_with(&mut grid, 'Q');
        let report = scan_grid(&mut grid, &[], &Lexicon::new(["rat"]), 3, false);

        assert_eq!(report.findings.len(), 1);
        assert!(report.findings.contains_key("nwse0-0"));
    }

    #[test]
    fn test_min_length_filters_short_hits() {
        let mut grid = Grid::new(1, 3);
        grid.set_filler(0, 0, 'N');
        grid.set_filler(1, 0, 'O');
        grid.set_filler(2, 0, 'Q');
        let lexicon = Lexicon::new(["no"]);
        let report = scan_grid(&mut grid.clone(), &[], &lexicon, 3, false);
        assert!(report.findings.is_empty());
        let report = scan_grid(&mut grid, &[], &lexicon, 2, false);
        assert!(report.has_rejections());
    }

    #[test]
    fn test_accepted_finding_sets_direction_flag() {
        let mut grid = Grid::new(4, 4);
        let placed = lay(&mut grid, "CAT", 0, 1, Direction::NS);
        fill_with(&mut grid, 'Q');
        scan_grid(&mut grid, &[placed], &Lexicon::default(), 3, false);
        assert!(grid.cell(0, 1).unwrap().direction.ns);
        assert!(grid.cell(0, 2).unwrap().direction.ns);
    }

    #[test]
    fn test_finding_serialization_shape() {
        let finding = FoundProfanity {
            word: "RAT".to_string(),
            accepted: false,
            direction: "F".to_string(),
            word_range: (2, 5),
            coords: vec![(2, 0), (3, 0), (4, 0)],
        };
        let json = serde_json::to_string(&finding).unwrap();
        assert_eq!(
            json,
            r#"{"word":"RAT","accepted":false,"direction":"F","word_range":[2,5],"coords":[[2,0],[3,0],[4,0]]}"#
        );
    }
}

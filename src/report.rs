//! Density computation and assembly of the final puzzle artifact.
//!
//! Pure functions of their inputs: nothing here retains state, and only a
//! successful attempt's grid and scan report are ever promoted into a
//! [`PuzzleData`].

use crate::grid::{Cell, Grid};
use crate::placer::PlacedWord;
use crate::scanner::{FoundProfanity, ScanReport};
use crate::wordlist::WordList;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The completed puzzle, ready for persistence or transmission.
///
/// The serialized shape (`cells` as rows of cell records, `profanity` keyed
/// by line label) is a persisted contract shared with external consumers and
/// must be preserved field-for-field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PuzzleData {
    /// Topic title from the word-list source.
    pub puzzle_title: String,
    /// Title shown to the solver; the topic title unless the word-list
    /// source supplied one.
    pub display_title: String,
    /// Short descriptive text, passed through unchanged.
    pub short_fact: String,
    /// Long descriptive text, passed through unchanged.
    pub long_fact: String,
    /// The words supplied for this puzzle, in their display form.
    pub input_word_list: Vec<String>,
    /// Grid height in cells.
    pub rows: usize,
    /// Grid width in cells.
    pub columns: usize,
    /// The completed grid, row by row.
    pub cells: Vec<Vec<Cell>>,
    /// The words a solver is asked to find: the placed answer set,
    /// normalized and sorted.
    pub puzzle_search_list: Vec<String>,
    /// Fraction of cells occupied by answer-word characters, in [0, 1].
    pub density: f64,
    /// Scanner findings keyed by line label.
    pub profanity: BTreeMap<String, Vec<FoundProfanity>>,
}

impl PuzzleData {
    /// Plain-text rendering of the grid, one row per line.
    #[must_use]
    pub fn render_grid(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|c| c.value.to_string())
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Exact occupancy ratio: answer cells over total cells. Zero for a zero-area
/// grid.
#[must_use]
pub fn calculate_density(rows: usize, columns: usize, answer_cells: usize) -> f64 {
    let total = rows * columns;
    if total == 0 {
        return 0.0;
    }
    answer_cells as f64 / total as f64
}

/// Combine the completed grid, the placed answer set and the scan report into
/// the final artifact.
#[must_use]
pub fn assemble(
    word_list: &WordList,
    grid: &Grid,
    placed: &[PlacedWord],
    report: ScanReport,
) -> PuzzleData {
    let mut puzzle_search_list: Vec<String> = placed.iter().map(|p| p.word.clone()).collect();
    puzzle_search_list.sort();

    let display_title = if word_list.display_title.is_empty() {
        word_list.title.clone()
    } else {
        word_list.display_title.clone()
    };

    PuzzleData {
        puzzle_title: word_list.title.clone(),
        display_title,
        short_fact: word_list.short_fact.clone(),
        long_fact: word_list.long_fact.clone(),
        input_word_list: word_list.words.clone(),
        rows: grid.rows(),
        columns: grid.columns(),
        cells: grid.to_cells(),
        puzzle_search_list,
        density: calculate_density(grid.rows(), grid.columns(), grid.answer_cell_count()),
        profanity: report.findings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Direction;

    #[test]
    fn test_density_exact() {
        assert_eq!(calculate_density(10, 10, 0), 0.0);
        assert_eq!(calculate_density(10, 10, 25), 0.25);
        assert_eq!(calculate_density(2, 3, 6), 1.0);
        assert_eq!(calculate_density(0, 5, 0), 0.0);
    }

    #[test]
    fn test_assemble_sorts_search_list() {
        let mut grid = Grid::new(4, 4);
        let mut placed = Vec::new();
        for (y, word) in ["DOG", "CAT"].iter().enumerate() {
            let cells: Vec<(usize, usize)> = (0..3).map(|x| (x, y)).collect();
            for (i, ch) in word.chars().enumerate() {
                grid.set_answer(i, y, ch, Direction::EW);
            }
            placed.push(PlacedWord {
                word: (*word).to_string(),
                origin: (0, y),
                direction: Direction::EW,
                reversed: false,
                cells,
            });
        }
        let list = WordList::new("pets", ["dog", "cat"]);
        let data = assemble(&list, &grid, &placed, ScanReport::default());
        assert_eq!(data.puzzle_search_list, vec!["CAT", "DOG"]);
        assert_eq!(data.input_word_list, vec!["dog", "cat"]);
        assert_eq!(data.density, 6.0 / 16.0);
        assert_eq!(data.rows, 4);
        assert_eq!(data.columns, 4);
    }

    #[test]
    fn test_puzzle_data_json_contract() {
        let list = WordList::new("t", Vec::<String>::new());
        let grid = Grid::new(1, 1);
        let data = assemble(&list, &grid, &[], ScanReport::default());
        let json = serde_json::to_value(&data).unwrap();
        for key in [
            "puzzle_title",
            "display_title",
            "short_fact",
            "long_fact",
            "input_word_list",
            "rows",
            "columns",
            "cells",
            "puzzle_search_list",
            "density",
            "profanity",
        ] {
            assert!(json.get(key).is_some(), "missing contract field {key}");
        }
        assert_eq!(json["density"], 0.0);
        assert_eq!(json["cells"][0][0]["value"], ".");
    }

    #[test]
    fn test_display_title_falls_back_to_title() {
        let grid = Grid::new(1, 1);
        let plain = WordList::new("Space", Vec::<String>::new());
        let data = assemble(&plain, &grid, &[], ScanReport::default());
        assert_eq!(data.display_title, "Space");

        let mut numbered = plain.clone();
        numbered.display_title = "3. Space".to_string();
        let data = assemble(&numbered, &grid, &[], ScanReport::default());
        assert_eq!(data.puzzle_title, "Space");
        assert_eq!(data.display_title, "3. Space");
    }
}

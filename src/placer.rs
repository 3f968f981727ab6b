//! Constrained backtracking placement of answer words, plus the random
//! filler pass that completes the grid.
//!
//! Words are processed longest-first (longer words have fewer valid slots, so
//! this cuts backtracking). For each word every fitting (start, direction,
//! reversed) candidate is enumerated, shuffled with the injected seeded RNG,
//! and reordered so candidates crossing an already-placed word come first.
//! The search runs over an explicit stack of decision frames rather than
//! recursion, which keeps the iteration count bounded and gives a natural
//! point for the cooperative cancellation check between steps.

use crate::grid::{Cell, Direction, Grid, EMPTY_CELL};
use crate::lexicon::Lexicon;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Upper bound on candidate attempts across the whole search. Pathological
/// inputs hit this and fail with `NoPlacement` instead of hanging.
const MAX_PLACEMENT_STEPS: usize = 200_000;

/// How many times the filler redraws a character that would complete a
/// prohibited word before keeping the last draw (the scanner still backstops).
const FILL_REDRAW_LIMIT: usize = 16;

/// Cooperative cancellation handle, shared between the caller and an
/// in-flight generation. Checked between backtracking steps, so a
/// long-running placement aborts promptly instead of finishing first.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of whatever generation holds a clone of this token.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Placement failures, surfaced to the orchestrator which decides whether to
/// retry the attempt or give up.
#[derive(Debug, thiserror::Error)]
pub enum PlacerError {
    /// No candidate validated for `word`, even after backtracking.
    #[error("no valid placement found for \"{word}\"")]
    NoPlacement { word: String },

    /// The cancel token fired mid-search.
    #[error("placement cancelled")]
    Cancelled,
}

/// An answer word fixed onto the grid.
///
/// `cells[i]` holds `word[i]`; for a reversed placement the cell path runs
/// against the family's forward reading direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedWord {
    /// The placed word, normalized (uppercase, letters only).
    pub word: String,
    /// Cell holding the word's first letter.
    pub origin: (usize, usize),
    /// Axis family the word lies on.
    pub direction: Direction,
    /// Whether the word reads against the family's forward direction.
    pub reversed: bool,
    /// Covered cells in word-letter order.
    pub cells: Vec<(usize, usize)>,
}

/// One enumerated placement option: start cell, family, orientation.
#[derive(Debug, Clone, Copy)]
struct Candidate {
    x: usize,
    y: usize,
    direction: Direction,
    reversed: bool,
}

impl Candidate {
    /// Covered cells in word-letter order. The start `(x, y)` anchors the
    /// family's forward walk; a reversed candidate flips the letter order.
    fn cells(&self, len: usize) -> Vec<(usize, usize)> {
        let (dx, dy) = self.direction.delta();
        let mut cells: Vec<(usize, usize)> = (0..len as isize)
            .map(|i| ((self.x as isize + dx * i) as usize, (self.y as isize + dy * i) as usize))
            .collect();
        if self.reversed {
            cells.reverse();
        }
        cells
    }
}

/// Whether a run of `len` cells starting at `(x, y)` stays inside the grid.
fn fits(grid: &Grid, x: usize, y: usize, direction: Direction, len: usize) -> bool {
    let (dx, dy) = direction.delta();
    let end_x = x as isize + dx * (len as isize - 1);
    let end_y = y as isize + dy * (len as isize - 1);
    end_x >= 0 && end_y >= 0 && grid.in_bounds(end_x as usize, end_y as usize)
}

/// Check a candidate against the current grid.
///
/// Valid iff every covered cell is empty or already holds the same character
/// via a word on a *different* family (colinear overlap on the same family is
/// rejected). Also reports whether the candidate crosses an existing answer.
fn validate(grid: &Grid, word: &[char], cells: &[(usize, usize)], direction: Direction) -> (bool, bool) {
    let mut crossing = false;
    for (i, &(x, y)) in cells.iter().enumerate() {
        let cell = grid.cell(x, y).expect("candidate cells are in bounds by construction");
        if cell.value == EMPTY_CELL {
            continue;
        }
        if cell.is_answer && cell.value == word[i] && !cell.direction.contains(direction) {
            crossing = true;
        } else {
            return (false, false);
        }
    }
    (true, crossing)
}

/// One decision frame of the explicit backtracking stack: the word being
/// placed at this depth, its shuffled candidate list, a cursor into it, and
/// the applied placement (with the cell snapshot needed to undo it).
struct Frame {
    word: String,
    chars: Vec<char>,
    candidates: Vec<Candidate>,
    next: usize,
    placed: Option<(PlacedWord, Vec<Cell>)>,
}

enum StepOutcome {
    Placed,
    Retry,
    Exhausted,
}

impl Frame {
    /// Enumerate, shuffle and order the candidates for `word` against the
    /// grid as it stands at this depth.
    fn new(grid: &Grid, word: &str, rng: &mut ChaCha8Rng) -> Frame {
        let chars: Vec<char> = word.chars().collect();
        let len = chars.len();
        let mut candidates = Vec::new();
        for direction in Direction::ALL {
            for reversed in [false, true] {
                for y in 0..grid.rows() {
                    for x in 0..grid.columns() {
                        if fits(grid, x, y, direction, len) {
                            candidates.push(Candidate { x, y, direction, reversed });
                        }
                    }
                }
            }
        }
        candidates.shuffle(rng);

        // Crossing candidates first; shuffled order preserved within groups.
        let (crossing, rest): (Vec<_>, Vec<_>) = candidates.into_iter().partition(|c| {
            c.cells(len)
                .iter()
                .any(|&(x, y)| grid.cell(x, y).is_ok_and(|cell| cell.is_answer))
        });
        let mut candidates = crossing;
        candidates.extend(rest);

        Frame { word: word.to_string(), chars, candidates, next: 0, placed: None }
    }

    /// Try the next untried candidate. At most one candidate is attempted per
    /// call so the caller can bound steps and poll cancellation in between.
    fn step(&mut self, grid: &mut Grid) -> StepOutcome {
        debug_assert!(self.placed.is_none(), "step called on a frame that already placed");
        let Some(&candidate) = self.candidates.get(self.next) else {
            return StepOutcome::Exhausted;
        };
        self.next += 1;

        let cells = candidate.cells(self.chars.len());
        let (valid, _) = validate(grid, &self.chars, &cells, candidate.direction);
        if !valid {
            return StepOutcome::Retry;
        }

        let saved = grid.snapshot(&cells);
        for (i, &(x, y)) in cells.iter().enumerate() {
            grid.set_answer(x, y, self.chars[i], candidate.direction);
        }
        let placed = PlacedWord {
            word: self.word.clone(),
            origin: cells[0],
            direction: candidate.direction,
            reversed: candidate.reversed,
            cells,
        };
        debug!(
            "placed {} at ({}, {}) {} reversed={}",
            placed.word, placed.origin.0, placed.origin.1, placed.direction, placed.reversed
        );
        self.placed = Some((placed, saved));
        StepOutcome::Placed
    }

    /// Undo this frame's placement, restoring the covered cells exactly.
    fn unplace(&mut self, grid: &mut Grid) {
        if let Some((placed, saved)) = self.placed.take() {
            debug!("unplacing {} to backtrack", placed.word);
            grid.restore(saved);
        }
    }
}

/// Place every word onto the grid.
///
/// Words are placed longest-first; on a dead end the most recently placed
/// word is unplaced and its next candidate tried. The total number of
/// candidate attempts is bounded, and the cancel token is polled between
/// attempts.
///
/// # Errors
/// [`PlacerError::NoPlacement`] when a word has no valid position (or the
/// step bound is hit), [`PlacerError::Cancelled`] when the token fires.
pub fn place_words(
    grid: &mut Grid,
    words: &[String],
    rng: &mut ChaCha8Rng,
    cancel: &CancelToken,
) -> Result<Vec<PlacedWord>, PlacerError> {
    let mut order: Vec<&String> = words.iter().collect();
    // Longest first; ties alphabetical so a fixed seed gives a fixed search.
    order.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));

    if order.is_empty() {
        return Ok(Vec::new());
    }

    let mut frames: Vec<Frame> = vec![Frame::new(grid, order[0], rng)];
    let mut steps: usize = 0;

    loop {
        if cancel.is_cancelled() {
            return Err(PlacerError::Cancelled);
        }
        steps += 1;
        if steps > MAX_PLACEMENT_STEPS {
            let word = frames.last().map(|f| f.word.clone()).unwrap_or_default();
            debug!("placement step bound hit after {steps} steps at word {word}");
            return Err(PlacerError::NoPlacement { word });
        }

        let depth = frames.len() - 1;
        let frame = frames.last_mut().expect("stack is non-empty inside the loop");
        match frame.step(grid) {
            StepOutcome::Retry => {}
            StepOutcome::Placed => {
                if depth + 1 == order.len() {
                    return Ok(frames
                        .into_iter()
                        .map(|f| f.placed.expect("every frame placed on success").0)
                        .collect());
                }
                let next_frame = Frame::new(grid, order[depth + 1], rng);
                frames.push(next_frame);
            }
            StepOutcome::Exhausted => {
                let failed = frames.pop().expect("stack is non-empty inside the loop");
                match frames.last_mut() {
                    Some(parent) => parent.unplace(grid),
                    None => return Err(PlacerError::NoPlacement { word: failed.word }),
                }
            }
        }
    }
}

/// Fill every remaining empty cell with a character drawn uniformly from
/// `alphabet`, redrawing (up to a bound) any draw that would complete a
/// prohibited word along a direction anchored by non-empty neighbors.
///
/// The guard is a cheap local check that reduces scanner rejections; it does
/// not replace the scan.
pub fn fill_empty_cells(
    grid: &mut Grid,
    alphabet: &[char],
    min_guard_len: usize,
    lexicon: &Lexicon,
    rng: &mut ChaCha8Rng,
) {
    debug_assert!(!alphabet.is_empty(), "config validation guarantees a non-empty alphabet");
    for y in 0..grid.rows() {
        for x in 0..grid.columns() {
            if grid.cell(x, y).map(|c| c.value) != Ok(EMPTY_CELL) {
                continue;
            }
            let mut ch = alphabet[rng.random_range(0..alphabet.len())];
            for _ in 0..FILL_REDRAW_LIMIT {
                if !completes_prohibited(grid, x, y, ch, min_guard_len, lexicon) {
                    break;
                }
                ch = alphabet[rng.random_range(0..alphabet.len())];
            }
            grid.set_filler(x, y, ch);
        }
    }
}

/// Would writing `ch` at `(x, y)` complete a prohibited word of at least
/// `min_len` letters, read in either direction, along any axis family
/// anchored by the non-empty neighbors?
fn completes_prohibited(
    grid: &Grid,
    x: usize,
    y: usize,
    ch: char,
    min_len: usize,
    lexicon: &Lexicon,
) -> bool {
    if lexicon.is_empty() {
        return false;
    }
    let reach = lexicon.max_len().saturating_sub(1);
    for direction in Direction::ALL {
        let (dx, dy) = direction.delta();
        let before = neighbor_run(grid, x, y, -dx, -dy, reach);
        let after = neighbor_run(grid, x, y, dx, dy, reach);

        let mut run: Vec<char> = before.iter().rev().copied().collect();
        let pos = run.len();
        run.push(ch);
        run.extend(&after);

        // Every substring through the new character, both readings.
        for i in 0..=pos {
            for j in (pos + 1)..=run.len() {
                let len = j - i;
                if len < min_len || !lexicon.could_contain_len(len) {
                    continue;
                }
                let forward: String = run[i..j].iter().collect();
                let backward: String = run[i..j].iter().rev().collect();
                if lexicon.contains(&forward) || lexicon.contains(&backward) {
                    return true;
                }
            }
        }
    }
    false
}

/// Contiguous non-empty cell values stepping `(dx, dy)` away from `(x, y)`,
/// nearest first, capped at `limit` cells.
fn neighbor_run(grid: &Grid, x: usize, y: usize, dx: isize, dy: isize, limit: usize) -> Vec<char> {
    let mut values = Vec::new();
    let (mut cx, mut cy) = (x as isize + dx, y as isize + dy);
    while values.len() < limit && cx >= 0 && cy >= 0 && grid.in_bounds(cx as usize, cy as usize) {
        match grid.get(cx as usize, cy as usize) {
            Ok(v) if v != EMPTY_CELL => values.push(v),
            _ => break,
        }
        cx += dx;
        cy += dy;
    }
    values
}

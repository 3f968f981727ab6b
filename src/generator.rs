//! The generation orchestrator: ties placement, filling and scanning into
//! one bounded retry loop, and fans independent puzzles out across worker
//! threads for batch callers.
//!
//! One attempt walks `Init -> Placing -> Scanning` and ends `Accepted`,
//! `Retrying` or `Failed`. A scanner rejection keeps the placed answer words
//! (they are the source of solvability) and retries only the filler with a
//! freshly derived seed; a placement failure restarts the whole attempt.
//! Only exhaustion of the attempt bound surfaces a [`GenerationError`]; no
//! partial puzzle ever escapes.

use crate::config::PuzzleConfig;
use crate::errors::GenerationError;
use crate::grid::Grid;
use crate::lexicon::Lexicon;
use crate::placer::{self, CancelToken, PlacedWord, PlacerError};
use crate::report::{self, PuzzleData};
use crate::scanner::{self, FoundProfanity};
use crate::wordlist::WordList;
use log::{debug, info};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

/// RNG stream selector so placement and filler draws of the same attempt
/// never share a seed.
const PLACE_STREAM: u64 = 0;
const FILL_STREAM: u64 = 1;

/// Seed for one attempt's RNG. Attempts and streams get distinct seeds from
/// the configured base, keeping every retry reproducible.
fn attempt_seed(base: u64, attempt: usize, stream: u64) -> u64 {
    base.wrapping_add(((attempt as u64) << 1) | stream)
}

/// Seed for one job of a batch. Derived from the job index, not the worker,
/// so batch output is independent of thread scheduling.
fn batch_seed(base: u64, job: usize) -> u64 {
    base ^ (job as u64 + 1).wrapping_mul(0x9E37_79B9_7F4A_7C15)
}

enum LastFailure {
    Placement(String),
    Profanity(Vec<FoundProfanity>),
}

/// Generate one puzzle. The sole entry point for single-puzzle callers.
///
/// # Errors
/// See [`GenerationError`]; every variant carries the attempt count where
/// relevant.
pub fn generate_puzzle(
    word_list: &WordList,
    config: &PuzzleConfig,
    lexicon: &Lexicon,
) -> Result<PuzzleData, GenerationError> {
    generate_puzzle_cancellable(word_list, config, lexicon, &CancelToken::new())
}

/// [`generate_puzzle`] with a caller-held cancel token, polled between
/// backtracking steps and between attempts.
///
/// # Errors
/// As [`generate_puzzle`], plus [`GenerationError::Cancelled`].
pub fn generate_puzzle_cancellable(
    word_list: &WordList,
    config: &PuzzleConfig,
    lexicon: &Lexicon,
    cancel: &CancelToken,
) -> Result<PuzzleData, GenerationError> {
    config.validate()?;
    word_list.validate()?;
    // Prohibited words named in the config join the supplied lexicon.
    let merged;
    let lexicon = if config.lexicon.is_empty() {
        lexicon
    } else {
        merged = lexicon.extended(&config.lexicon);
        &merged
    };
    let words = word_list.normalized_words();
    let alphabet = config.alphabet_chars();
    info!(
        "generating \"{}\": {} words on a {}x{} grid",
        word_list.title,
        words.len(),
        config.columns,
        config.rows
    );

    let mut last: Option<LastFailure> = None;
    let mut placed_state: Option<(Grid, Vec<PlacedWord>)> = None;
    let mut attempt = 0;

    while attempt < config.max_placement_attempts {
        attempt += 1;
        if cancel.is_cancelled() {
            return Err(GenerationError::Cancelled);
        }

        if placed_state.is_none() {
            debug!("attempt {attempt}: placing");
            let mut grid = Grid::new(config.rows, config.columns);
            let mut place_rng =
                ChaCha8Rng::seed_from_u64(attempt_seed(config.seed, attempt, PLACE_STREAM));
            match placer::place_words(&mut grid, &words, &mut place_rng, cancel) {
                Ok(placed) => placed_state = Some((grid, placed)),
                Err(PlacerError::Cancelled) => return Err(GenerationError::Cancelled),
                Err(PlacerError::NoPlacement { word }) => {
                    debug!("attempt {attempt}: no placement for \"{word}\", retrying");
                    last = Some(LastFailure::Placement(word));
                    continue;
                }
            }
        }

        let (grid, placed) = placed_state
            .as_mut()
            .expect("placed_state was just populated");
        debug!("attempt {attempt}: filling and scanning");
        let mut fill_rng =
            ChaCha8Rng::seed_from_u64(attempt_seed(config.seed, attempt, FILL_STREAM));
        placer::fill_empty_cells(grid, &alphabet, config.min_scan_length, lexicon, &mut fill_rng);
        let scan = scanner::scan_grid(
            grid,
            placed,
            lexicon,
            config.min_scan_length,
            config.allow_profane_answers,
        );

        if !scan.has_rejections() {
            let data = report::assemble(word_list, grid, placed, scan);
            info!(
                "accepted \"{}\" after {attempt} attempt(s): {} words, density {:.2}",
                data.puzzle_title,
                data.puzzle_search_list.len(),
                data.density
            );
            return Ok(data);
        }

        let rejected = scan.rejected();
        debug!(
            "attempt {attempt}: {} prohibited incidental word(s), retrying filler",
            rejected.len()
        );
        last = Some(LastFailure::Profanity(rejected));
        // Keep the answer placement; only the filler is the usual culprit.
        grid.clear_filler();
    }

    let attempts = attempt;
    Err(match last {
        Some(LastFailure::Placement(word)) => GenerationError::PlacementFailed { word, attempts },
        Some(LastFailure::Profanity(findings)) => {
            GenerationError::ProfanityRejected { findings, attempts }
        }
        None => unreachable!("config validation guarantees at least one attempt"),
    })
}

/// Generate many independent puzzles concurrently.
///
/// Workers pull jobs from a shared queue; each job runs with its own RNG
/// seeded from the job index and shares only the read-only lexicon. Results
/// come back in input order.
#[must_use]
pub fn generate_batch(
    word_lists: &[WordList],
    config: &PuzzleConfig,
    lexicon: &Arc<Lexicon>,
) -> Vec<Result<PuzzleData, GenerationError>> {
    if word_lists.is_empty() {
        return Vec::new();
    }
    let worker_count = thread::available_parallelism()
        .map(std::num::NonZeroUsize::get)
        .unwrap_or(1)
        .min(word_lists.len());

    let next = AtomicUsize::new(0);
    let slots: Vec<Mutex<Option<Result<PuzzleData, GenerationError>>>> =
        word_lists.iter().map(|_| Mutex::new(None)).collect();

    thread::scope(|s| {
        for _ in 0..worker_count {
            s.spawn(|| loop {
                let i = next.fetch_add(1, Ordering::Relaxed);
                if i >= word_lists.len() {
                    break;
                }
                let mut job_config = config.clone();
                job_config.seed = batch_seed(config.seed, i);
                let result = generate_puzzle(&word_lists[i], &job_config, lexicon);
                *slots[i].lock().expect("batch worker holding the slot lock never panics") =
                    Some(result);
            });
        }
    });

    slots
        .into_iter()
        .map(|slot| {
            slot.into_inner()
                .expect("batch worker holding the slot lock never panics")
                .expect("every job index below len is claimed by a worker")
        })
        .collect()
}

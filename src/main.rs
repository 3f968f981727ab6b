use clap::Parser;
use std::process::ExitCode;
use std::time::Instant;

use wordlattice::config::PuzzleConfig;
use wordlattice::errors::GenerationError;
use wordlattice::generator;
use wordlattice::lexicon::Lexicon;
use wordlattice::wordlist::WordList;

/// Word-search puzzle generator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the word-list JSON file ({"title", "short_fact", "long_fact", "words"})
    wordlist: String,

    /// Path to the prohibited-word lexicon file (one word per line)
    #[arg(short, long)]
    lexicon: Option<String>,

    /// Grid height in cells
    #[arg(short, long, default_value_t = 10)]
    rows: usize,

    /// Grid width in cells
    #[arg(short, long, default_value_t = 10)]
    columns: usize,

    /// Base seed for the generation RNG
    #[arg(short, long, default_value_t = 0)]
    seed: u64,

    /// Minimum length of incidental words the scanner reports
    #[arg(long, default_value_t = 3)]
    min_scan_length: usize,

    /// Total attempt bound across placement and filler retries
    #[arg(long, default_value_t = 8)]
    max_attempts: usize,

    /// Accept answer words that are also in the lexicon
    #[arg(long, default_value_t = false)]
    allow_profane_answers: bool,

    /// Write the puzzle JSON to this path instead of printing only the grid
    #[arg(short, long)]
    output: Option<String>,
}

/// Entry point of the puzzle generator CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them
/// in a user-friendly way before exiting with code 1.
fn main() -> ExitCode {
    // Set up logging
    let debug_enabled = std::env::var("WORDLATTICE_DEBUG").is_ok();
    wordlattice::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        // Print the error message to stderr, with detailed formatting if it's a GenerationError
        if let Some(gen_err) = e.downcast_ref::<GenerationError>() {
            eprintln!("Error: {}", gen_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        // Exit explicitly with a nonzero code so scripts can detect failure
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic for the generator CLI.
///
/// Steps:
/// 1. Parse CLI arguments with Clap.
/// 2. Load the word list and (optionally) the lexicon from disk.
/// 3. Generate the puzzle.
/// 4. Print the grid and search list on stdout; write JSON if requested.
/// 5. Print performance metrics (timings, density) on stderr.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let t_load = Instant::now();
    let word_list = WordList::load_from_path(&cli.wordlist)?;
    let lexicon = match &cli.lexicon {
        Some(path) => Lexicon::load_from_path(path)?,
        None => Lexicon::default(),
    };
    let load_secs = t_load.elapsed().as_secs_f64();

    let config = PuzzleConfig {
        rows: cli.rows,
        columns: cli.columns,
        min_scan_length: cli.min_scan_length,
        seed: cli.seed,
        max_placement_attempts: cli.max_attempts,
        allow_profane_answers: cli.allow_profane_answers,
        ..PuzzleConfig::default()
    };

    let t_generate = Instant::now();
    let data = generator::generate_puzzle(&word_list, &config, &lexicon)?;
    let generate_secs = t_generate.elapsed().as_secs_f64();

    println!("{}", data.render_grid());
    println!();
    println!("Find: {}", data.puzzle_search_list.join(", "));

    if let Some(path) = &cli.output {
        std::fs::write(path, serde_json::to_string_pretty(&data)?)?;
        eprintln!("Wrote puzzle data to {path}");
    }

    eprintln!(
        "Loaded inputs in {:.3}s; generated {}x{} grid (density {:.2}) in {:.3}s.",
        load_secs, data.columns, data.rows, data.density, generate_secs
    );

    Ok(())
}

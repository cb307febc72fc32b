use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;

use anagram::errors::QueryError;
use anagram::letters::LetterCounts;
use anagram::word_list::WordList;
use anagram::{frequency, matcher, pipeline, primes, query};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("GIT_HASH"), ")");

/// Find dictionary words constructible from a pool of letters.
///
/// Uppercase letters are required, lowercase letters are optional, and
/// digits give the number of blanks (e.g. "aDbEdF2"). Useful together with
/// grep: `anagram aeionrst | grep nor`.
#[derive(Parser, Debug)]
#[command(author, version = VERSION, about, long_about = None)]
struct Cli {
    /// Letter specification (e.g. "rates1" or "EInrst1")
    letters: String,

    /// Path to the word-list file (one word per line)
    #[arg(
        short,
        long,
        default_value = concat!(env!("CARGO_MANIFEST_DIR"), "/data/words.txt")
    )]
    dict: String,

    /// Minimum word length (default: the full letter budget)
    #[arg(long)]
    min: Option<usize>,

    /// Maximum word length, inclusive (default: the full letter budget)
    #[arg(long)]
    max: Option<usize>,

    /// Return all words of length 3 or more, not just full-length anagrams
    #[arg(short, long, default_value_t = false)]
    all: bool,

    /// Plain containment mode: words containing at least the given letters,
    /// any length (uses the prime-encoded filter)
    #[arg(short, long, default_value_t = false)]
    contains: bool,
}

/// Entry point of the anagram CLI.
///
/// Delegates to [`try_main`], catching any errors and printing them in a
/// user-friendly way before exiting with a nonzero code.
fn main() -> ExitCode {
    let debug_enabled = std::env::var("ANAGRAM_DEBUG").is_ok();
    anagram::log::init_logger(debug_enabled);

    if let Err(e) = try_main() {
        // Print the error to stderr, with detailed formatting if it's ours
        if let Some(query_err) = e.downcast_ref::<QueryError>() {
            eprintln!("Error: {}", query_err.display_detailed());
        } else {
            eprintln!("Error: {e}");
        }
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Core application logic.
///
/// Steps:
/// 1. Parse CLI arguments with Clap.
/// 2. Load and normalize the word list.
/// 3. Distill the letter specification into a query.
/// 4. Build the predicate pipeline (cheap filters first) and stream matches
///    to stdout.
/// 5. Print diagnostics (timings, counts) on stderr.
fn try_main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let table = frequency::default_table();

    let t_load = Instant::now();
    let word_list = WordList::load_from_path(&cli.dict)?;
    let load_secs = t_load.elapsed().as_secs_f64();

    let query = query::distill(&cli.letters);
    log::debug!("distilled query: {}", query.to_spec_string());

    let mut predicates = frequency::build_frequency_heuristics(table, &query);

    if cli.contains {
        // Containment ignores the required/optional split and length bounds.
        let mut pool = query.required.to_uppercase_string();
        pool.push_str(&query.optional.to_uppercase_string());
        // unbox so the top-level downcast in main() sees a bare QueryError
        let letters = LetterCounts::from_letters(&pool, "letters").map_err(|e| *e)?;
        predicates.push(primes::build_subset_filter(table, &letters).map_err(|e| *e)?);
    } else {
        // Saturating: a pathological spec can carry a huge blank count.
        let full_len = query
            .required
            .len()
            .saturating_add(query.optional.len())
            .saturating_add(query.blanks);
        let mut min = cli.min.unwrap_or(full_len);
        let max = cli.max.unwrap_or(full_len);
        if cli.all {
            min = 3;
        }
        if max < min {
            return Err(QueryError::ContradictoryBounds { min, max }.into());
        }

        // The word list is sorted by length, so the upper bound may halt the
        // scan early instead of rejecting word by word.
        predicates.push(pipeline::length_range(min, max.saturating_add(1), true));
        predicates.push(matcher::build_matcher(&query));
    }

    let accept = pipeline::compose(predicates);

    let t_scan = Instant::now();
    let mut num_matches = 0usize;
    for word in pipeline::apply(accept, word_list.iter()) {
        println!("{word}");
        num_matches += 1;
    }
    let scan_secs = t_scan.elapsed().as_secs_f64();

    eprintln!(
        "Loaded {} words in {:.3}s; scanned in {:.3}s ({} matches).",
        word_list.words.len(),
        load_secs,
        scan_secs,
        num_matches
    );

    Ok(())
}

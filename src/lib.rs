// Reusable library API — the letter-multiset query engine plus the thin
// word-list layer the CLI binary sits on.
pub mod errors;
pub mod frequency;
pub mod letters;
pub mod log;
pub mod matcher;
pub mod pipeline;
pub mod primes;
pub mod query;
pub mod word_list;

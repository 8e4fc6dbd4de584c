//! Language identity resolution.
//!
//! Converts arbitrary user-supplied strings (ISO codes, English names, native
//! names, names written in other languages, typos of any of these) into one
//! canonical [`LanguageIdentity`].
//!
//! # Architecture
//!
//! - `vector`: character-frequency vectors and the shared preprocessing
//! - `similarity`: cosine scoring, best match and ranked search
//! - `language`: the `LanguageIdentity` record and `Resolution` result
//! - `dataset`: decoded dataset records (languages, aliases, translators)
//! - `registry`: exact-match index and name vectors over all languages
//! - `memo`: bounded LRU of previous resolutions
//! - `metrics`: resolution counters
//! - `resolver`: the exact-then-fuzzy resolution pipeline
//!
//! # Example
//!
//! ```rust
//! use translatehub::i18n::{Dataset, LanguageRegistry, LanguageResolver};
//!
//! let dataset = Dataset::builtin().unwrap();
//! let resolver = LanguageResolver::new(LanguageRegistry::from_dataset(&dataset).unwrap());
//!
//! assert_eq!(resolver.resolve("Français").unwrap().id(), "fra");
//! assert_eq!(resolver.resolve("japanes").unwrap().id(), "jpn");
//! ```

mod dataset;
mod language;
mod memo;
mod metrics;
mod registry;
mod resolver;
mod similarity;
mod vector;

pub use dataset::{Dataset, TranslatorRecord};
pub use language::{LanguageExtra, LanguageIdentity, LanguageScope, LanguageType, Resolution};
pub use memo::{MemoEntry, ResolutionMemo, DEFAULT_MEMO_CAPACITY};
pub use metrics::{MetricsReport, ResolutionMetrics};
pub use registry::{normalize_key, LanguageRegistry};
pub use resolver::{LanguageResolver, DEFAULT_LANGUAGE_THRESHOLD};
pub use similarity::{best_match, ranked_search, similarity, SearchResult};
pub use vector::{is_broad_whitespace, preprocess, remove_whitespace, vectorize, NameVector};

//! Rules comparing languages after they compiled.
//!
//! Pure functions taking the definitions of every language and returning
//! warnings.
//!
//! - `missing_translation`: keys of the primary language missing elsewhere
//! - `orphan`: keys missing from the primary language

pub mod missing_translation;
pub mod orphan;

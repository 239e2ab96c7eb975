// Gauze: concept counting and misspelling sensitivity analysis for
// synthetic clinical notes
//
// This is the library root. Each module corresponds to a stage of the
// analysis pipeline.

pub mod concepts;
pub mod config;
pub mod corpus;
pub mod counts;
pub mod fuzzy;
pub mod normalize;
pub mod output;
pub mod pipeline;

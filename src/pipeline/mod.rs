// Pipeline orchestration.
//
// `analysis` wires the stages together: vocabulary validation, corpus
// normalization, concept counting, fuzzy scan. The stages themselves live
// in their own modules and stay independently callable.

pub mod analysis;

// Report rendering, split by destination: colored tables for the terminal,
// a markdown file for the run record.

pub mod markdown;
pub mod terminal;

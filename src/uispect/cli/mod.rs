//! Terminal presentation for the binary.

pub(crate) mod print;

//! Cross-crate scenarios: feed bytes in, classification out.

mod classification;
mod pipeline;

//! Input tokenization and segment classification
//!
//! This module turns free-form input text into the byte stream the
//! engine allocates:
//! - [`tokens`]: splits input on commas/whitespace/semicolons and
//!   expands each token into bytes (quoted strings, hex and decimal
//!   literals, raw character data).
//! - [`classify`]: maps a token to its target [`SegmentTag`] with an
//!   ordered, first-match-wins rule set.
//!
//! Classification is a total function: any string maps to some
//! segment, with DS as the fallback.
//!
//! [`SegmentTag`]: crate::memory::segment::SegmentTag

pub mod classify;
pub mod tokens;

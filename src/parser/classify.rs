//! Segment classification
//!
//! Maps an input token to the segment its bytes are allocated in.
//! The rules are ordered and the first match wins; by construction
//! no token matches two rules.  Classification never fails: anything
//! unrecognized lands in the data segment.

use crate::memory::segment::SegmentTag;

/// Instruction mnemonics that land in the code segment
const CODE_MNEMONICS: [&str; 10] = [
    "MOV", "CALL", "JMP", "ADD", "SUB", "MUL", "DIV", "RET", "INC", "DEC",
];

/// Classify a token into its target segment (case-insensitive)
pub fn classify(token: &str) -> SegmentTag {
    let token = token.to_ascii_uppercase();

    // 1. Explicit extra-segment references and string-move mnemonics
    if token.contains("ES:") || token.contains("DEST") || token.starts_with("MOVS") {
        return SegmentTag::Es;
    }

    // 2. Pure stack operations
    if token == "PUSH" || token == "POP" {
        return SegmentTag::Ss;
    }

    // 3. Instruction mnemonics
    if CODE_MNEMONICS.contains(&token.as_str()) {
        return SegmentTag::Cs;
    }

    // 4. Registers, data keywords, literals, and everything else
    SegmentTag::Ds
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_extra_segment_markers_win_first() {
        assert_eq!(classify("ES:DATA"), SegmentTag::Es);
        assert_eq!(classify("DEST"), SegmentTag::Es);
        assert_eq!(classify("movsb"), SegmentTag::Es);
    }

    #[test]
    fn movs_prefix_beats_the_mov_mnemonic() {
        assert_eq!(classify("MOVSW"), SegmentTag::Es);
        assert_eq!(classify("MOV"), SegmentTag::Cs);
    }

    #[test]
    fn stack_mnemonics_must_match_exactly() {
        assert_eq!(classify("PUSH"), SegmentTag::Ss);
        assert_eq!(classify("pop"), SegmentTag::Ss);
        assert_eq!(classify("PUSHA"), SegmentTag::Ds);
    }

    #[test]
    fn instruction_mnemonics_go_to_code() {
        for mnemonic in ["CALL", "jmp", "Add", "RET"] {
            assert_eq!(classify(mnemonic), SegmentTag::Cs);
        }
    }

    #[test]
    fn everything_else_defaults_to_data() {
        assert_eq!(classify("AX"), SegmentTag::Ds);
        assert_eq!(classify("WORD"), SegmentTag::Ds);
        assert_eq!(classify("1234"), SegmentTag::Ds);
        assert_eq!(classify("frobnicate"), SegmentTag::Ds);
        assert_eq!(classify(""), SegmentTag::Ds);
    }
}

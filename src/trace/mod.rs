// Observable trace output read by the presentation layer

use crate::memory::{fmt_off, fmt_phys, fmt_seg, PhysicalAddress};
use crate::memory::segment::SegmentTag;

/// Append-only log of the free-text lines the four trace phases emit
#[derive(Debug, Clone, Default)]
pub struct ExecutionLog {
    lines: Vec<String>,
}

impl ExecutionLog {
    pub fn new() -> Self {
        ExecutionLog { lines: Vec::new() }
    }

    /// Append one line
    pub fn log(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// All lines, in emission order
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop every line
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// One committed write, as shown in the memory-map display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WriteRecord {
    pub segment: SegmentTag,
    pub base: u16,
    pub offset: u16,
    pub physical: PhysicalAddress,
    pub value: u8,
}

impl WriteRecord {
    /// `3000H:0001H` column
    pub fn location_label(&self) -> String {
        format!("{}:{}", fmt_seg(self.base), fmt_off(self.offset))
    }

    /// `30001H` column
    pub fn physical_label(&self) -> String {
        fmt_phys(self.base, self.offset)
    }

    /// `41H` column
    pub fn value_label(&self) -> String {
        format!("{:02X}H", self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn write_record_labels() {
        let rec = WriteRecord {
            segment: SegmentTag::Ss,
            base: 0x3000,
            offset: 0x0001,
            physical: 0x30001,
            value: 0x41,
        };
        assert_eq!(rec.location_label(), "3000H:0001H");
        assert_eq!(rec.physical_label(), "30001H");
        assert_eq!(rec.value_label(), "41H");
    }
}

//! Flat buffer protocol for zero-copy WASM bridge
//!
//! Binary format for a print plan (sheet geometry, crop marks, card slots):
//!
//! ## u32 Buffer Layout:
//! ```text
//! Header:
//! [0]     MAGIC (0x43505348 = "CPSH" for validation)
//! [1]     SCHEMA_VERSION (protocol version, currently 1)
//! [2]     sheet_count
//! [3]     cards_per_sheet
//! [4]     columns
//! [5]     rows
//! [6]     crop_mark_count
//! [7]     slot_count (all sheets)
//! [8]     f32_crop_offset (index in f32_data where crop marks start)
//! [9]     f32_slot_offset (index in f32_data where slot origins start)
//! [10..]  sheet data...
//!
//! Per-sheet:
//!   sheet_index
//!   slot_count
//!   per-slot: [resource_lo, resource_hi, page_index, column, row]
//! ```
//!
//! ## f32 Buffer Layout:
//! ```text
//! [0..6]  paper_width, paper_height, padding_x, padding_y, card_width, card_height
//! At f32_crop_offset: per-mark [x1, y1, x2, y2] (crop_mark_count times)
//! At f32_slot_offset: per-slot [x, y] in the same order as the u32 slots
//! ```
//!
//! All lengths are inches.

use crate::print::{CropMark, PrintLayout, Sheet};

/// Magic number for format validation: "CPSH" (Card Print SHeet)
pub const MAGIC: u32 = 0x43505348;

/// Schema version for protocol compatibility checking
pub const SCHEMA_VERSION: u32 = 1;

/// Header size in u32 elements
pub const HEADER_SIZE: usize = 10;

/// Number of f32 values describing sheet geometry
pub const F32_GEOMETRY_SIZE: usize = 6;

/// Number of u32 values per card slot
/// [resource_lo, resource_hi, page_index, column, row]
pub const U32_PER_SLOT: usize = 5;

/// Number of f32 values per crop mark
pub const F32_PER_MARK: usize = 4; // x1, y1, x2, y2

/// Number of f32 values per card slot
pub const F32_PER_SLOT: usize = 2; // x, y

/// Print plan buffer for zero-copy WASM transfer
#[derive(Debug, Default)]
pub struct SheetBuffer {
    /// Integer data (counts, indices, ids)
    pub u32_data: Vec<u32>,
    /// Float data (positions, dimensions)
    pub f32_data: Vec<f32>,
}

impl SheetBuffer {
    pub fn new() -> Self {
        Self {
            u32_data: Vec::with_capacity(256),
            f32_data: Vec::with_capacity(256),
        }
    }

    pub fn clear(&mut self) {
        self.u32_data.clear();
        self.f32_data.clear();
    }

    /// Pre-allocate so JS-held pointers stay valid while the plan is written
    fn prepare(&mut self, sheets: &[Sheet], mark_count: usize) {
        let slot_count: usize = sheets.iter().map(|s| s.slots.len()).sum();
        let u32_needed = HEADER_SIZE + sheets.len() * 2 + slot_count * U32_PER_SLOT;
        let f32_needed =
            F32_GEOMETRY_SIZE + mark_count * F32_PER_MARK + slot_count * F32_PER_SLOT;

        self.clear();
        self.u32_data.reserve(u32_needed);
        self.f32_data.reserve(f32_needed);
    }

    /// Write the whole plan; replaces any previous contents
    pub fn write_plan(&mut self, layout: &PrintLayout, marks: &[CropMark], sheets: &[Sheet]) {
        self.prepare(sheets, marks.len());

        self.u32_data.push(MAGIC); // [0] magic number
        self.u32_data.push(SCHEMA_VERSION); // [1] schema version
        self.u32_data.push(sheets.len() as u32); // [2] sheet_count
        self.u32_data.push(layout.cards_per_sheet as u32); // [3] cards_per_sheet
        self.u32_data.push(layout.columns as u32); // [4] columns
        self.u32_data.push(layout.rows as u32); // [5] rows
        self.u32_data.push(marks.len() as u32); // [6] crop_mark_count
        self.u32_data.push(0); // [7] slot_count (placeholder)
        self.u32_data.push(0); // [8] f32_crop_offset (placeholder)
        self.u32_data.push(0); // [9] f32_slot_offset (placeholder)

        self.f32_data.extend_from_slice(&[
            layout.paper_width as f32,
            layout.paper_height as f32,
            layout.padding_x as f32,
            layout.padding_y as f32,
            layout.card.width as f32,
            layout.card.height as f32,
        ]);

        self.u32_data[8] = self.f32_data.len() as u32;
        for mark in marks {
            self.f32_data.extend_from_slice(&[
                mark.start.x as f32,
                mark.start.y as f32,
                mark.end.x as f32,
                mark.end.y as f32,
            ]);
        }

        self.u32_data[9] = self.f32_data.len() as u32;
        let mut slot_count = 0;
        for sheet in sheets {
            self.u32_data.push(sheet.index as u32);
            self.u32_data.push(sheet.slots.len() as u32);
            for slot in &sheet.slots {
                self.u32_data.push((slot.resource.0 & 0xFFFF_FFFF) as u32);
                self.u32_data.push((slot.resource.0 >> 32) as u32);
                self.u32_data.push(slot.page_index as u32);
                self.u32_data.push(slot.column as u32);
                self.u32_data.push(slot.row as u32);

                self.f32_data.push(slot.origin.x as f32);
                self.f32_data.push(slot.origin.y as f32);
                slot_count += 1;
            }
        }
        self.u32_data[7] = slot_count;
    }

    pub fn u32_ptr(&self) -> u32 {
        self.u32_data.as_ptr() as u32
    }

    pub fn u32_len(&self) -> u32 {
        self.u32_data.len() as u32
    }

    pub fn f32_ptr(&self) -> u32 {
        self.f32_data.as_ptr() as u32
    }

    pub fn f32_len(&self) -> u32 {
        self.f32_data.len() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::PageCount;
    use crate::print::{
        crop_marks, CardDimensions, Orientation, PageCountAggregator, PaperSpec, PaperType,
    };
    use crate::resource::ResourceId;

    fn plan(counts: &[(u64, usize)]) -> (PrintLayout, Vec<CropMark>, Vec<Sheet>) {
        let layout = PrintLayout::compute(
            PaperSpec::new(PaperType::A4, Orientation::Portrait),
            CardDimensions::default(),
        );
        let mut agg = PageCountAggregator::new(layout);
        for &(id, count) in counts {
            agg.report(ResourceId(id), PageCount::Known(count));
        }
        (layout, crop_marks(&layout, 0.125), agg.sheets())
    }

    #[test]
    fn test_header() {
        let (layout, marks, sheets) = plan(&[(1, 10)]);
        let mut buffer = SheetBuffer::new();
        buffer.write_plan(&layout, &marks, &sheets);

        assert_eq!(buffer.u32_data[0], MAGIC);
        assert_eq!(buffer.u32_data[1], SCHEMA_VERSION);
        assert_eq!(buffer.u32_data[2], 2);
        assert_eq!(buffer.u32_data[3], 9);
        assert_eq!(buffer.u32_data[4], 3);
        assert_eq!(buffer.u32_data[5], 3);
        assert_eq!(buffer.u32_data[6], 16);
        assert_eq!(buffer.u32_data[7], 10);
        assert_eq!(buffer.u32_data[8] as usize, F32_GEOMETRY_SIZE);
        assert_eq!(buffer.u32_data[9] as usize, F32_GEOMETRY_SIZE + 16 * F32_PER_MARK);
    }

    #[test]
    fn test_sizes_match_counts() {
        let (layout, marks, sheets) = plan(&[(1, 4), (2, 8)]);
        let mut buffer = SheetBuffer::new();
        buffer.write_plan(&layout, &marks, &sheets);

        assert_eq!(
            buffer.u32_data.len(),
            HEADER_SIZE + 2 * 2 + 12 * U32_PER_SLOT
        );
        assert_eq!(
            buffer.f32_data.len(),
            F32_GEOMETRY_SIZE + marks.len() * F32_PER_MARK + 12 * F32_PER_SLOT
        );
    }

    #[test]
    fn test_slot_records() {
        let (layout, marks, sheets) = plan(&[(1, 9), (0x1_0000_0002, 1)]);
        let mut buffer = SheetBuffer::new();
        buffer.write_plan(&layout, &marks, &sheets);

        // Second sheet starts after the first sheet's header and 9 slots
        let second = HEADER_SIZE + 2 + 9 * U32_PER_SLOT;
        assert_eq!(&buffer.u32_data[second..second + 2], &[1, 1]);
        assert_eq!(&buffer.u32_data[second + 2..second + 7], &[2, 1, 0, 0, 0]);

        let slot_origins = buffer.u32_data[9] as usize;
        let tenth = slot_origins + 9 * F32_PER_SLOT;
        assert!((buffer.f32_data[tenth] - layout.padding_x as f32).abs() < 1e-6);
        assert!((buffer.f32_data[tenth + 1] - layout.padding_y as f32).abs() < 1e-6);
    }

    #[test]
    fn test_rewrite_replaces_contents() {
        let (layout, marks, sheets) = plan(&[(1, 30)]);
        let mut buffer = SheetBuffer::new();
        buffer.write_plan(&layout, &marks, &sheets);
        buffer.write_plan(&layout, &marks, &[]);

        assert_eq!(buffer.u32_data.len(), HEADER_SIZE);
        assert_eq!(buffer.u32_data[2], 0);
        assert_eq!(buffer.u32_data[7], 0);
    }
}

//! Page-count aggregation across independently converging paginators

use crate::pagination::PageCount;
use crate::print::sheet::PrintLayout;
use crate::resource::ResourceId;
use crate::Point;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::ops::Range;

/// Vertical spacing a card needs so a flowed stream reads as separate sheets
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CardMargins {
    pub top: f64,
    pub bottom: f64,
}

/// One card page at its place in the flattened print stream
#[derive(Debug, Clone, Copy)]
struct StreamCard {
    resource: ResourceId,
    page_index: usize,
    position: usize,
}

/// A card placed in a sheet's grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardSlot {
    pub resource: ResourceId,
    pub page_index: usize,
    pub column: usize,
    pub row: usize,
    /// Top-left corner on the sheet, in inches
    pub origin: Point,
}

/// One physical sheet and the cards printed on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub index: usize,
    pub slots: SmallVec<[CardSlot; 9]>,
}

/// Collects page counts keyed by resource and derives sheet totals.
///
/// Resources enter the flattened stream in the order they first report.
/// Resources whose count is still unknown occupy no positions and add
/// nothing to the totals; positions are recomputed from the current
/// counts on every query.
#[derive(Debug, Clone)]
pub struct PageCountAggregator {
    layout: PrintLayout,
    counts: FxHashMap<ResourceId, PageCount>,
    order: Vec<ResourceId>,
}

impl PageCountAggregator {
    pub fn new(layout: PrintLayout) -> Self {
        Self {
            layout,
            counts: FxHashMap::default(),
            order: Vec::new(),
        }
    }

    pub fn layout(&self) -> &PrintLayout {
        &self.layout
    }

    /// Swap the sheet layout (paper or card change)
    pub fn set_layout(&mut self, layout: PrintLayout) {
        self.layout = layout;
    }

    /// Record a resource's latest count; the last report for an id wins
    pub fn report(&mut self, id: ResourceId, count: PageCount) {
        if self.counts.insert(id, count).is_none() {
            self.order.push(id);
        }
        log::debug!(
            "resource {} reported {:?}; {} pages known, {} sheets",
            id,
            count,
            self.known_total(),
            self.total_sheets()
        );
    }

    /// Drop a resource entirely, whatever state its paginator was in
    pub fn unregister(&mut self, id: ResourceId) -> Option<PageCount> {
        let removed = self.counts.remove(&id)?;
        self.order.retain(|&other| other != id);
        log::debug!("resource {} unregistered", id);
        Some(removed)
    }

    pub fn count(&self, id: ResourceId) -> Option<PageCount> {
        self.counts.get(&id).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Every registered resource has a final count
    pub fn is_settled(&self) -> bool {
        self.counts.values().all(|count| count.is_known())
    }

    /// Sum of all known page counts
    pub fn known_total(&self) -> usize {
        self.counts.values().filter_map(|count| count.known()).sum()
    }

    /// Sheets needed for the known pages; zero when no card fits a sheet
    pub fn total_sheets(&self) -> usize {
        match self.layout.cards_per_sheet {
            0 => 0,
            per_sheet => self.known_total().div_ceil(per_sheet),
        }
    }

    /// Known resources in stream order with their page counts
    fn known_in_order(&self) -> impl Iterator<Item = (ResourceId, usize)> + '_ {
        self.order
            .iter()
            .filter_map(|id| Some((*id, self.counts.get(id)?.known()?)))
    }

    /// Stream positions occupied by a resource's pages
    pub fn positions(&self, id: ResourceId) -> Option<Range<usize>> {
        let mut offset = 0;
        for (other, pages) in self.known_in_order() {
            if other == id {
                return Some(offset..offset + pages);
            }
            offset += pages;
        }
        None
    }

    /// Spacing for the card at `position` in the flattened stream.
    ///
    /// Cards in the first row of a sheet get a top margin and cards in the
    /// last row a bottom margin, both equal to the sheet's vertical padding.
    pub fn margins_at(&self, position: usize) -> CardMargins {
        let per_sheet = self.layout.cards_per_sheet;
        if per_sheet == 0 {
            return CardMargins::default();
        }

        let columns = self.layout.columns;
        let within = position % per_sheet;
        CardMargins {
            top: if within < columns {
                self.layout.padding_y
            } else {
                0.0
            },
            bottom: if within >= per_sheet - columns {
                self.layout.padding_y
            } else {
                0.0
            },
        }
    }

    /// Spacing for one page of one resource, if that page is in the stream
    pub fn margins_for(&self, id: ResourceId, page_index: usize) -> Option<CardMargins> {
        let range = self.positions(id)?;
        let position = range.start + page_index;
        range.contains(&position).then(|| self.margins_at(position))
    }

    /// The flattened card stream over all known resources
    fn stream(&self) -> Vec<StreamCard> {
        let mut cards = Vec::with_capacity(self.known_total());
        let mut position = 0;
        for (resource, pages) in self.known_in_order() {
            for page_index in 0..pages {
                cards.push(StreamCard {
                    resource,
                    page_index,
                    position,
                });
                position += 1;
            }
        }
        cards
    }

    /// Group the stream into explicit sheets
    pub fn sheets(&self) -> Vec<Sheet> {
        let mut sheets: Vec<Sheet> = Vec::with_capacity(self.total_sheets());
        for card in self.stream() {
            let Some((index, column, row)) = self.layout.slot_of(card.position) else {
                break;
            };
            if sheets.len() <= index {
                sheets.push(Sheet {
                    index,
                    slots: SmallVec::new(),
                });
            }
            sheets[index].slots.push(CardSlot {
                resource: card.resource,
                page_index: card.page_index,
                column,
                row,
                origin: self.layout.card_origin(column, row),
            });
        }
        sheets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::print::paper::{Orientation, PaperSpec, PaperType};
    use crate::print::sheet::CardDimensions;

    const A: ResourceId = ResourceId(1);
    const B: ResourceId = ResourceId(2);
    const C: ResourceId = ResourceId(3);
    const D: ResourceId = ResourceId(4);

    fn a4_layout(card: CardDimensions) -> PrintLayout {
        PrintLayout::compute(PaperSpec::new(PaperType::A4, Orientation::Portrait), card)
    }

    fn aggregator() -> PageCountAggregator {
        PageCountAggregator::new(a4_layout(CardDimensions::default()))
    }

    #[test]
    fn test_total_sheets_from_known_counts() {
        let mut agg = aggregator();
        agg.report(A, PageCount::Known(3));
        agg.report(B, PageCount::Known(4));
        agg.report(C, PageCount::Known(2));
        assert_eq!(agg.total_sheets(), 1);

        agg.report(D, PageCount::Known(3));
        assert_eq!(agg.total_sheets(), 2);
    }

    #[test]
    fn test_unknown_counts_are_excluded() {
        let mut agg = aggregator();
        agg.report(A, PageCount::Known(5));
        agg.report(B, PageCount::Unknown);
        agg.report(C, PageCount::Known(4));
        assert_eq!(agg.known_total(), 9);
        assert_eq!(agg.total_sheets(), 1);
        assert!(!agg.is_settled());
        assert_eq!(agg.positions(B), None);
        assert_eq!(agg.positions(C), Some(5..9));

        agg.report(B, PageCount::Known(1));
        assert!(agg.is_settled());
        assert_eq!(agg.total_sheets(), 2);
        // B keeps its place in the stream
        assert_eq!(agg.positions(B), Some(5..6));
        assert_eq!(agg.positions(C), Some(6..10));
    }

    #[test]
    fn test_degenerate_layout_has_no_sheets() {
        let card = CardDimensions::new(9.0, 9.0).unwrap();
        let mut agg = PageCountAggregator::new(a4_layout(card));
        agg.report(A, PageCount::Known(3));
        agg.report(B, PageCount::Known(40));
        assert_eq!(agg.total_sheets(), 0);
        assert_eq!(agg.margins_at(0), CardMargins::default());
        assert!(agg.sheets().is_empty());
    }

    #[test]
    fn test_unregister_removes_contribution() {
        let mut agg = aggregator();
        agg.report(A, PageCount::Known(6));
        agg.report(B, PageCount::Known(6));
        assert_eq!(agg.total_sheets(), 2);

        assert_eq!(agg.unregister(A), Some(PageCount::Known(6)));
        assert_eq!(agg.total_sheets(), 1);
        assert_eq!(agg.positions(B), Some(0..6));
        assert_eq!(agg.unregister(A), None);

        agg.report(C, PageCount::Unknown);
        assert_eq!(agg.unregister(C), Some(PageCount::Unknown));
        assert!(agg.is_settled());
    }

    #[test]
    fn test_margins_follow_sheet_rows() {
        let agg = aggregator();
        let padding = agg.layout().padding_y;

        for position in 0..3 {
            assert_eq!(agg.margins_at(position), CardMargins { top: padding, bottom: 0.0 });
        }
        assert_eq!(agg.margins_at(4), CardMargins::default());
        for position in 6..9 {
            assert_eq!(agg.margins_at(position), CardMargins { top: 0.0, bottom: padding });
        }
        assert_eq!(agg.margins_at(9).top, padding);
    }

    #[test]
    fn test_single_row_sheet_gets_both_margins() {
        let card = CardDimensions::new(2.5, 8.0).unwrap();
        let agg = PageCountAggregator::new(a4_layout(card));
        assert_eq!(agg.layout().rows, 1);
        let margins = agg.margins_at(1);
        assert!(margins.top > 0.0 && margins.bottom > 0.0);
    }

    #[test]
    fn test_margins_for_uses_cumulative_position() {
        let mut agg = aggregator();
        agg.report(A, PageCount::Known(5));
        agg.report(B, PageCount::Known(3));
        // B's pages sit at positions 5, 6, 7
        assert_eq!(agg.margins_for(B, 0).map(|m| m.top), Some(0.0));
        assert_eq!(agg.margins_for(B, 1).map(|m| m.bottom), Some(agg.layout().padding_y));
        assert_eq!(agg.margins_for(B, 3), None);
    }

    #[test]
    fn test_sheets_group_stream() {
        let mut agg = aggregator();
        agg.report(A, PageCount::Known(7));
        agg.report(B, PageCount::Known(4));
        let sheets = agg.sheets();
        assert_eq!(sheets.len(), agg.total_sheets());
        assert_eq!(sheets[0].slots.len(), 9);
        assert_eq!(sheets[1].slots.len(), 2);

        let first_of_b = sheets[0].slots[7];
        assert_eq!((first_of_b.resource, first_of_b.page_index), (B, 0));
        assert_eq!((first_of_b.column, first_of_b.row), (1, 2));
        assert_eq!(sheets[1].slots[0].origin, agg.layout().card_origin(0, 0));
    }

    #[test]
    fn test_sheets_agree_with_margins() {
        let mut agg = aggregator();
        agg.report(A, PageCount::Known(13));
        for sheet in agg.sheets() {
            for slot in &sheet.slots {
                let position = sheet.index * 9 + slot.row * 3 + slot.column;
                let margins = agg.margins_at(position);
                assert_eq!(margins.top > 0.0, slot.row == 0);
                assert_eq!(margins.bottom > 0.0, slot.row == 2);
            }
        }
    }
}

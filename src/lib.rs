//! Card-Pager: pagination and print layout for resource cards
//!
//! This crate provides the core that turns unbounded resource text into
//! fixed-size card pages and tiles those pages onto paper:
//! - Incremental pagination (measure, bisect at whitespace, commit)
//! - Print sheet layout (grid fitting, centering, crop marks)
//! - Sheet-count aggregation over independently converging paginators
//! - WASM bindings where the host page owns real text measurement

pub mod config;
pub mod error;
pub mod layout;
pub mod pagination;
pub mod print;
pub mod resource;
pub mod wasm;

// Re-export WASM types for direct use
pub use wasm::WasmPrintSession;

// Re-export primary types
pub use config::{PaginationConfig, PrintConfig};
pub use error::{CardPagerError, Result};
pub use layout::{ContentBox, FontMetrics, TextBoxMeasurer};
pub use pagination::{
    DriveOutcome, MeasurementPort, Page, PageCount, PageCountReporter, PaginationState, Paginator,
    Phase,
};
pub use print::{
    CardDimensions, CardMargins, CropMark, Orientation, PageCountAggregator, PaperSpec, PaperType,
    PrintLayout, Sheet,
};
pub use resource::{ResourceId, ResourceText};

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Sheet coordinates, in inches from the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Sheet rectangle
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
}

/// One print preview: every mounted card's paginator plus the sheet totals.
///
/// Owns all per-resource state, so independent sessions never share
/// counters or page counts.
pub struct PrintSession {
    config: PrintConfig,
    layout: PrintLayout,
    paginators: FxHashMap<ResourceId, Paginator>,
    aggregator: PageCountAggregator,
}

impl PrintSession {
    /// Create a session with the given configuration
    pub fn new(config: PrintConfig) -> Result<Self> {
        config.validate()?;
        let layout = PrintLayout::compute(config.paper, config.card);
        Ok(Self {
            config,
            layout,
            paginators: FxHashMap::default(),
            aggregator: PageCountAggregator::new(layout),
        })
    }

    pub fn config(&self) -> &PrintConfig {
        &self.config
    }

    pub fn layout(&self) -> &PrintLayout {
        &self.layout
    }

    pub fn aggregator(&self) -> &PageCountAggregator {
        &self.aggregator
    }

    /// Change paper; card grid, margins and sheet totals follow
    pub fn set_paper(&mut self, paper: PaperSpec) {
        self.config.paper = paper;
        self.layout = PrintLayout::compute(paper, self.config.card);
        self.aggregator.set_layout(self.layout);
    }

    /// Start paginating a card, or replace the text of a mounted one
    pub fn mount(&mut self, id: ResourceId, text: ResourceText) {
        if self.paginators.contains_key(&id) {
            self.set_text(id, text);
            return;
        }
        let aggregator = &mut self.aggregator;
        let mut reporter = |count: PageCount| aggregator.report(id, count);
        let paginator = Paginator::new(text, &self.config.pagination, &mut reporter);
        self.paginators.insert(id, paginator);
    }

    /// Replace a mounted card's text; unchanged text keeps its progress
    pub fn set_text(&mut self, id: ResourceId, text: ResourceText) -> bool {
        let Some(paginator) = self.paginators.get_mut(&id) else {
            return false;
        };
        let aggregator = &mut self.aggregator;
        paginator.set_text(text, &mut |count: PageCount| aggregator.report(id, count))
    }

    /// Remove a card, converged or not
    pub fn unmount(&mut self, id: ResourceId) -> bool {
        self.aggregator.unregister(id);
        self.paginators.remove(&id).is_some()
    }

    /// Drive one card for one rendering opportunity
    pub fn drive<P>(&mut self, id: ResourceId, port: &mut P) -> Option<DriveOutcome>
    where
        P: MeasurementPort + ?Sized,
    {
        let paginator = self.paginators.get_mut(&id)?;
        let aggregator = &mut self.aggregator;
        Some(paginator.drive(port, &mut |count: PageCount| aggregator.report(id, count)))
    }

    /// Drive every unfinished card once with the same port; returns how many converged
    pub fn drive_all<P>(&mut self, port: &mut P) -> usize
    where
        P: MeasurementPort + ?Sized,
    {
        let aggregator = &mut self.aggregator;
        let mut converged = 0;
        for (&id, paginator) in self.paginators.iter_mut() {
            if paginator.is_done() {
                continue;
            }
            let outcome = paginator.drive(port, &mut |count: PageCount| aggregator.report(id, count));
            if matches!(outcome, DriveOutcome::Converged(_)) {
                converged += 1;
            }
        }
        converged
    }

    /// Drive every card until all have converged
    pub fn run_all<P>(&mut self, port: &mut P)
    where
        P: MeasurementPort + ?Sized,
    {
        while !self.is_settled() {
            self.drive_all(port);
        }
    }

    pub fn paginator(&self, id: ResourceId) -> Option<&Paginator> {
        self.paginators.get(&id)
    }

    pub fn pages(&self, id: ResourceId) -> Option<&[Page]> {
        self.paginators.get(&id).map(Paginator::pages)
    }

    pub fn page_count(&self, id: ResourceId) -> PageCount {
        self.aggregator.count(id).unwrap_or_default()
    }

    pub fn mounted(&self) -> usize {
        self.paginators.len()
    }

    /// Every mounted card has converged
    pub fn is_settled(&self) -> bool {
        self.paginators.values().all(Paginator::is_done)
    }

    pub fn total_sheets(&self) -> usize {
        self.aggregator.total_sheets()
    }

    pub fn sheets(&self) -> Vec<Sheet> {
        self.aggregator.sheets()
    }

    pub fn margins_for(&self, id: ResourceId, page_index: usize) -> Option<CardMargins> {
        self.aggregator.margins_for(id, page_index)
    }

    pub fn crop_marks(&self) -> Vec<CropMark> {
        print::crop_marks(&self.layout, self.config.crop_mark_length)
    }
}

//! Incremental paginator: measure, bisect, commit until the text fits

use crate::config::PaginationConfig;
use crate::pagination::measure::{MeasurementPort, PageCount, PageCountReporter};
use crate::pagination::split::split_at_center;
use crate::resource::ResourceText;
use serde::{Deserialize, Serialize};

/// One card face worth of text
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page {
    /// Text already known to fit
    pub committed_text: String,
    /// Text placed on the page but not yet confirmed by a measurement
    pub pending_text: String,
}

impl Page {
    fn pending(text: String) -> Self {
        Self {
            committed_text: String::new(),
            pending_text: text,
        }
    }

    /// Everything currently placed in the page's content box
    pub fn content(&self) -> String {
        let mut content =
            String::with_capacity(self.committed_text.len() + self.pending_text.len());
        content.push_str(&self.committed_text);
        content.push_str(&self.pending_text);
        content
    }

    pub fn is_empty(&self) -> bool {
        self.committed_text.is_empty() && self.pending_text.is_empty()
    }
}

/// Per-resource pagination state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    pages: Vec<Page>,
    /// Text not yet placed on any page
    remainder: String,
    attempt_count: u32,
}

impl PaginationState {
    fn fresh(full_text: String) -> Self {
        Self {
            pages: vec![Page::default()],
            remainder: full_text,
            attempt_count: 0,
        }
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn remainder(&self) -> &str {
        &self.remainder
    }

    pub fn attempt_count(&self) -> u32 {
        self.attempt_count
    }

    /// All page text in order followed by the remainder.
    ///
    /// Equals the resource's full text at every point of a run.
    pub fn reassembled(&self) -> String {
        let mut text = String::new();
        for page in &self.pages {
            text.push_str(&page.committed_text);
            text.push_str(&page.pending_text);
        }
        text.push_str(&self.remainder);
        text
    }

    fn last_page_mut(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.pages.push(Page::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }
}

/// Where a paginator is in its convergence cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Fresh state installed (new text, or a deferred no-op replace)
    Resetting,
    /// Waiting for the last page to be measured
    Measuring,
    /// Last page overflowed and its pending text was cut or moved
    Splitting,
    /// Last page fit and pulled the remainder in
    Committing,
    /// Nothing overflows and nothing remains
    Done,
}

/// Result of driving a paginator for one rendering opportunity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveOutcome {
    /// Pagination finished with this many pages
    Converged(usize),
    /// The runaway guard deferred; drive again on the next opportunity
    Yielded,
}

/// Outcome of handling an overflowing last page
enum Overflow {
    Continue,
    /// Overflow accepted and no text remains
    Exhausted,
}

/// Splits one resource's text into card pages
#[derive(Debug, Clone)]
pub struct Paginator {
    text: ResourceText,
    state: PaginationState,
    phase: Phase,
    max_attempts: u32,
}

impl Paginator {
    /// Create a paginator and report its count as unknown
    pub fn new<R>(text: ResourceText, config: &PaginationConfig, reporter: &mut R) -> Self
    where
        R: PageCountReporter + ?Sized,
    {
        let mut paginator = Self {
            state: PaginationState::fresh(String::new()),
            text,
            phase: Phase::Resetting,
            max_attempts: config.max_attempts,
        };
        paginator.reset(reporter);
        paginator
    }

    /// Replace the text; returns false if it was unchanged
    pub fn set_text<R>(&mut self, text: ResourceText, reporter: &mut R) -> bool
    where
        R: PageCountReporter + ?Sized,
    {
        if text == self.text {
            return false;
        }
        self.text = text;
        self.reset(reporter);
        true
    }

    /// Throw away all progress and start over from the full text
    pub fn reset<R>(&mut self, reporter: &mut R)
    where
        R: PageCountReporter + ?Sized,
    {
        self.state = PaginationState::fresh(self.text.full_text());
        self.phase = Phase::Resetting;
        log::debug!(
            "pagination reset: {} paragraphs, {} bytes",
            self.text.paragraphs().len(),
            self.state.remainder.len()
        );
        reporter.report(PageCount::Unknown);
    }

    /// Run a single convergence cycle.
    ///
    /// Returns the phase the cycle went through. `Resetting` means the
    /// runaway guard fired and the cycle made no progress.
    pub fn step<P, R>(&mut self, port: &mut P, reporter: &mut R) -> Phase
    where
        P: MeasurementPort + ?Sized,
        R: PageCountReporter + ?Sized,
    {
        if self.phase == Phase::Done {
            return Phase::Done;
        }

        if self.state.attempt_count > self.max_attempts {
            log::warn!(
                "pagination exceeded {} attempts on page {}, deferring",
                self.max_attempts,
                self.state.pages.len()
            );
            self.state.attempt_count = 0;
            self.phase = Phase::Resetting;
            return Phase::Resetting;
        }
        self.state.attempt_count += 1;

        let content = self.state.last_page_mut().content();
        let overflow = port.overflows(&content);
        log::trace!(
            "cycle {}: page {} holds {} bytes, overflow={}",
            self.state.attempt_count,
            self.state.pages.len(),
            content.len(),
            overflow
        );

        let taken = if overflow {
            match self.handle_overflow() {
                Overflow::Continue => Phase::Splitting,
                Overflow::Exhausted => Phase::Done,
            }
        } else if !self.state.remainder.is_empty() {
            self.commit();
            Phase::Committing
        } else {
            let page = self.state.last_page_mut();
            let pending = std::mem::take(&mut page.pending_text);
            page.committed_text.push_str(&pending);
            Phase::Done
        };

        if taken == Phase::Done {
            self.phase = Phase::Done;
            log::debug!("pagination converged: {} pages", self.state.pages.len());
            reporter.report(PageCount::Known(self.state.pages.len()));
        } else {
            self.phase = Phase::Measuring;
        }
        taken
    }

    /// Step until converged or until the runaway guard asks to yield
    pub fn drive<P, R>(&mut self, port: &mut P, reporter: &mut R) -> DriveOutcome
    where
        P: MeasurementPort + ?Sized,
        R: PageCountReporter + ?Sized,
    {
        loop {
            match self.step(port, reporter) {
                Phase::Done => return DriveOutcome::Converged(self.state.pages.len()),
                Phase::Resetting => return DriveOutcome::Yielded,
                _ => {}
            }
        }
    }

    /// Drive through every deferral until converged; returns the page count
    pub fn run_to_completion<P, R>(&mut self, port: &mut P, reporter: &mut R) -> usize
    where
        P: MeasurementPort + ?Sized,
        R: PageCountReporter + ?Sized,
    {
        loop {
            if let DriveOutcome::Converged(count) = self.drive(port, reporter) {
                return count;
            }
        }
    }

    /// Last page fit: keep its pending text and try the remainder next
    fn commit(&mut self) {
        let remainder = std::mem::take(&mut self.state.remainder);
        let page = self.state.last_page_mut();
        let pending = std::mem::replace(&mut page.pending_text, remainder);
        page.committed_text.push_str(&pending);
    }

    /// Last page overflowed: bisect its pending text or push it to a new page
    fn handle_overflow(&mut self) -> Overflow {
        let PaginationState { pages, remainder, .. } = &mut self.state;
        if pages.is_empty() {
            pages.push(Page::default());
        }
        let last = pages.len() - 1;
        let page = &mut pages[last];
        let pending = std::mem::take(&mut page.pending_text);
        let split = split_at_center(&pending);
        debug_assert!(split.right.is_empty() || split.is_word_boundary());

        if split.right_len() > 1 {
            page.pending_text = split.left.to_string();
            remainder.insert_str(0, split.right);
            return Overflow::Continue;
        }

        if !page.committed_text.is_empty() {
            let mut carried = pending;
            carried.push_str(remainder);
            remainder.clear();
            if carried.is_empty() {
                return Overflow::Exhausted;
            }
            pages.push(Page::pending(carried));
            return Overflow::Continue;
        }

        if pending.is_empty() {
            // Empty page reported as overflowing; pull the remainder in
            if remainder.is_empty() {
                return Overflow::Exhausted;
            }
            page.pending_text = std::mem::take(remainder);
            return Overflow::Continue;
        }

        // Unsplittable fragment alone on its page: accept the overflow
        page.committed_text = pending;
        if remainder.is_empty() {
            return Overflow::Exhausted;
        }
        pages.push(Page::pending(std::mem::take(remainder)));
        Overflow::Continue
    }

    pub fn text(&self) -> &ResourceText {
        &self.text
    }

    pub fn state(&self) -> &PaginationState {
        &self.state
    }

    pub fn pages(&self) -> &[Page] {
        &self.state.pages
    }

    pub fn remainder(&self) -> &str {
        &self.state.remainder
    }

    pub fn attempt_count(&self) -> u32 {
        self.state.attempt_count
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_done(&self) -> bool {
        self.phase == Phase::Done
    }

    pub fn page_count(&self) -> PageCount {
        if self.is_done() {
            PageCount::Known(self.state.pages.len())
        } else {
            PageCount::Unknown
        }
    }
}

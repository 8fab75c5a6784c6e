//! Measurement port: the paginator's only view of rendered geometry

/// Reports whether a card's content box overflows once it holds `content`.
///
/// Called once per convergence cycle with the last page's committed plus
/// pending text. Implementations must reflect exactly the content given;
/// the paginator never caches answers.
pub trait MeasurementPort {
    fn overflows(&mut self, content: &str) -> bool;
}

impl<F> MeasurementPort for F
where
    F: FnMut(&str) -> bool,
{
    fn overflows(&mut self, content: &str) -> bool {
        self(content)
    }
}

/// Receives a paginator's page count: `Unknown` while converging, then final
pub trait PageCountReporter {
    fn report(&mut self, count: PageCount);
}

impl<F> PageCountReporter for F
where
    F: FnMut(PageCount),
{
    fn report(&mut self, count: PageCount) {
        self(count)
    }
}

/// Reporter that drops every report, for callers that poll instead
#[derive(Debug, Default, Clone, Copy)]
pub struct NoReport;

impl PageCountReporter for NoReport {
    fn report(&mut self, _count: PageCount) {}
}

/// A resource's page count as seen by consumers of pagination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum PageCount {
    /// Still converging; excluded from sheet totals
    #[default]
    Unknown,
    Known(usize),
}

impl PageCount {
    pub fn known(self) -> Option<usize> {
        match self {
            PageCount::Known(count) => Some(count),
            PageCount::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        matches!(self, PageCount::Known(_))
    }
}

impl From<Option<usize>> for PageCount {
    fn from(count: Option<usize>) -> Self {
        count.map_or(PageCount::Unknown, PageCount::Known)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_port() {
        let mut port = |content: &str| content.len() > 3;
        assert!(!port.overflows("abc"));
        assert!(port.overflows("abcd"));
    }

    #[test]
    fn test_closure_reporter_collects() {
        let mut seen = Vec::new();
        {
            let mut reporter = |count: PageCount| seen.push(count);
            reporter.report(PageCount::Unknown);
            reporter.report(PageCount::Known(2));
        }
        assert_eq!(seen, vec![PageCount::Unknown, PageCount::Known(2)]);
    }

    #[test]
    fn test_page_count_option_conversion() {
        assert_eq!(PageCount::from(None), PageCount::Unknown);
        assert_eq!(PageCount::from(Some(3)).known(), Some(3));
        assert!(!PageCount::Unknown.is_known());
    }
}

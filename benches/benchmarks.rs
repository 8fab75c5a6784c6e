//! Benchmarks for pagination and sheet layout

use card_pager::print::crop_marks;
use card_pager::{
    CardDimensions, ContentBox, FontMetrics, Orientation, PageCount, PageCountAggregator,
    PaginationConfig, Paginator, PaperSpec, PaperType, PrintLayout, ResourceId, ResourceText,
    TextBoxMeasurer,
};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn measurer() -> TextBoxMeasurer {
    TextBoxMeasurer::new(
        ContentBox::for_card(&CardDimensions::default(), 0.125),
        FontMetrics::monospace(9.0),
    )
}

fn long_text(paragraphs: usize) -> ResourceText {
    ResourceText::from_paragraphs((0..paragraphs).map(|i| {
        format!(
            "Paragraph {} describes a spell with enough rules text to wrap across several lines of a card. ",
            i
        )
    }))
}

fn bench_paginate_short(c: &mut Criterion) {
    c.bench_function("paginate_short_card", |b| {
        let mut port = measurer();
        let config = PaginationConfig::default();
        b.iter(|| {
            let text = ResourceText::from_raw("Fireball\nA bright streak flashes from your finger.");
            let mut paginator = Paginator::new(text, &config, &mut |_: PageCount| {});
            black_box(paginator.run_to_completion(&mut port, &mut |_: PageCount| {}));
        });
    });
}

fn bench_paginate_long(c: &mut Criterion) {
    c.bench_function("paginate_long_card", |b| {
        let mut port = measurer();
        let config = PaginationConfig::default();
        let text = long_text(40);
        b.iter(|| {
            let mut paginator = Paginator::new(text.clone(), &config, &mut |_: PageCount| {});
            black_box(paginator.run_to_completion(&mut port, &mut |_: PageCount| {}));
        });
    });
}

fn bench_layout_compute(c: &mut Criterion) {
    c.bench_function("layout_compute_all_papers", |b| {
        b.iter(|| {
            for paper in PaperType::ALL {
                for orientation in [Orientation::Portrait, Orientation::Landscape] {
                    let layout = PrintLayout::compute(
                        black_box(PaperSpec::new(paper, orientation)),
                        CardDimensions::default(),
                    );
                    black_box(crop_marks(&layout, 0.125));
                }
            }
        });
    });
}

fn bench_aggregate_sheets(c: &mut Criterion) {
    c.bench_function("aggregate_sheets_500_resources", |b| {
        let layout = PrintLayout::compute(PaperSpec::default(), CardDimensions::default());
        let mut aggregator = PageCountAggregator::new(layout);
        for id in 0..500u64 {
            aggregator.report(ResourceId(id), PageCount::Known((id % 4 + 1) as usize));
        }
        b.iter(|| {
            black_box(aggregator.total_sheets());
            black_box(aggregator.sheets());
        });
    });
}

criterion_group!(
    benches,
    bench_paginate_short,
    bench_paginate_long,
    bench_layout_compute,
    bench_aggregate_sheets,
);

criterion_main!(benches);

use criterion::{BatchSize, Criterion, criterion_group, criterion_main};
use memoir::Book;
use memoir::render::{HeadlessRenderer, ViewOptions};

const SAMPLE_BOOK: &str = include_str!("../../../fixtures/books/sample.json");

fn sample_book() -> Book {
    serde_json::from_str(SAMPLE_BOOK).expect("fixture book")
}

fn bench_layout_book(c: &mut Criterion) {
    let book = sample_book();
    let renderer = HeadlessRenderer::default().with_view(ViewOptions::auto(1440.0, 900.0));
    c.bench_function("layout_book", |b| b.iter(|| renderer.layout_book(&book)));
}

fn bench_render_book_svg(c: &mut Criterion) {
    let renderer = HeadlessRenderer::default();
    c.bench_function("render_book_svg_sync", |b| {
        b.iter_batched(
            sample_book,
            |book| renderer.render_book_svg_sync(&book),
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_layout_book, bench_render_book_svg);
criterion_main!(benches);

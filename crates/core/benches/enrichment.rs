use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use lustre_core::{enhance_inline_images, extract_og_metadata, extract_page_images, match_and_upgrade_url, resolve_highest};

fn lazy_content(images: usize) -> String {
    (0..images)
        .map(|i| {
            format!(
                r#"<p>Paragraph {i} with some text.</p><img data-src="https://cdn.example.com/{i}.jpg" srcset="https://cdn.example.com/{i}-320.jpg 320w, https://cdn.example.com/{i}-1280.jpg 1280w, https://cdn.example.com/{i}-2560.jpg 2560w" loading="lazy" alt="Image {i}">"#
            )
        })
        .collect()
}

fn bench_inline(c: &mut Criterion) {
    let mut group = c.benchmark_group("inline");

    for images in [1, 10, 100] {
        let html = lazy_content(images);
        group.bench_with_input(BenchmarkId::new("images", images), &html, |b, html| {
            b.iter(|| enhance_inline_images(black_box(html)))
        });
    }

    group.finish();
}

fn bench_srcset(c: &mut Criterion) {
    let srcset = "a.jpg 320w, b.jpg 640w, c.jpg 1280w, d.jpg 1x, e.jpg 2x, f.jpg";
    c.bench_function("resolve_highest", |b| b.iter(|| resolve_highest(black_box(srcset))));
}

fn bench_page(c: &mut Criterion) {
    let html = std::fs::read_to_string("../../tests/fixtures/article_page.html").unwrap();

    c.bench_function("extract_og_metadata", |b| b.iter(|| extract_og_metadata(black_box(&html))));

    let page = format!("<html><body>{}</body></html>", lazy_content(50).replace("data-src", "src"));
    let images = extract_page_images(&page);
    c.bench_function("match_and_upgrade_url", |b| {
        b.iter(|| match_and_upgrade_url(black_box("https://cdn.example.com/49-320.jpg"), black_box(&images)))
    });
}

criterion_group!(benches, bench_inline, bench_srcset, bench_page);
criterion_main!(benches);

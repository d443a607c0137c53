//! Benchmarks for redocx extraction and rewrite performance.
//!
//! Run with: cargo bench
//!
//! These benchmarks use a synthetic resume-shaped document; the paragraph
//! count is chosen well above any real resume.

use std::io::{Cursor, Write};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use redocx::{extract_bytes, rewrite_bytes, ReplacementSet};

/// Build a synthetic DOCX with `block_count` experience blocks of
/// `bullets_per_block` bullets each, preceded by a short summary.
fn create_test_docx(block_count: usize, bullets_per_block: usize) -> Vec<u8> {
    let mut body = String::new();

    let para = |text: &str| {
        format!(
            "<w:p><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
            text
        )
    };
    let bullet = |text: &str| {
        format!(
            "<w:p><w:pPr><w:numPr><w:ilvl w:val=\"0\"/><w:numId w:val=\"1\"/></w:numPr></w:pPr><w:r><w:t xml:space=\"preserve\">{}</w:t></w:r></w:p>",
            text
        )
    };

    body.push_str(&para("candidate@example.com | (555) 000-1111"));
    body.push_str(&para(
        "Engineer with broad experience across storage and infrastructure.",
    ));
    body.push_str("<w:p/>");
    for b in 0..block_count {
        body.push_str(&para(&format!("Company {} — Senior Engineer", b)));
        for i in 0..bullets_per_block {
            body.push_str(&bullet(&format!(
                "Accomplishment {} for block {} covering enough words to look real",
                i, b
            )));
        }
        body.push_str("<w:p/>");
    }

    let document = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<w:document xmlns:w=\"http://schemas.openxmlformats.org/wordprocessingml/2006/main\"><w:body>{}</w:body></w:document>",
        body
    );

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();
    writer.start_file("[Content_Types].xml", options).unwrap();
    writer.write_all(b"<Types/>").unwrap();
    writer.start_file("word/document.xml", options).unwrap();
    writer.write_all(document.as_bytes()).unwrap();
    writer.finish().unwrap().into_inner()
}

fn bench_extract(c: &mut Criterion) {
    let small = create_test_docx(4, 5);
    let large = create_test_docx(25, 8);

    c.bench_function("extract_small_resume", |b| {
        b.iter(|| extract_bytes(black_box(&small)).unwrap())
    });
    c.bench_function("extract_large_resume", |b| {
        b.iter(|| extract_bytes(black_box(&large)).unwrap())
    });
}

fn bench_rewrite(c: &mut Criterion) {
    let bytes = create_test_docx(10, 6);
    let model = extract_bytes(&bytes).unwrap();

    let mut replacements = ReplacementSet::new().with_summary("Rewritten summary text.");
    for i in 0..model.block_count() {
        let bullets: Vec<String> = (0..6).map(|j| format!("Rewritten bullet {j}")).collect();
        replacements = replacements.with_block(i, bullets);
    }

    c.bench_function("rewrite_all_blocks", |b| {
        b.iter(|| {
            rewrite_bytes(black_box(&bytes), black_box(&model), black_box(&replacements)).unwrap()
        })
    });
}

criterion_group!(benches, bench_extract, bench_rewrite);
criterion_main!(benches);

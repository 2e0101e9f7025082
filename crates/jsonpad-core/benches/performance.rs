use criterion::{Criterion, black_box, criterion_group, criterion_main};
use jsonpad_core::{JsonEditor, LineIndex, json, search};

fn large_json(entry_count: usize) -> String {
    let mut out = String::with_capacity(entry_count * 48);
    out.push_str("{\n");
    for i in 0..entry_count {
        out.push_str(&format!(
            "  \"node_{i:06}\": {{\"prompt\": \"value {i}\", \"seed\": {i}}},\n"
        ));
    }
    out.push_str("  \"version\": 1\n}");
    out
}

fn bench_line_index_build(c: &mut Criterion) {
    let text = large_json(20_000);
    c.bench_function("line_index_build/20k_entries", |b| {
        b.iter(|| {
            let index = LineIndex::from_text(black_box(&text));
            black_box(index.line_count());
        })
    });
}

fn bench_search_overlapping(c: &mut Criterion) {
    let text = large_json(20_000);
    c.bench_function("search/common_substring", |b| {
        b.iter(|| {
            let matches = search::find_matches(black_box(&text), "node_");
            black_box(matches.len());
        })
    });
}

fn bench_validate(c: &mut Criterion) {
    let text = large_json(20_000);
    c.bench_function("validate/20k_entries", |b| {
        b.iter(|| {
            let validity = json::validate(black_box(&text));
            black_box(validity.is_valid);
        })
    });
}

fn bench_value_swap(c: &mut Criterion) {
    let text = large_json(5_000);
    let alternate = large_json(5_001);
    c.bench_function("set_value/full_rederive", |b| {
        let mut editor = JsonEditor::new(&text);
        editor.set_query("seed");
        let mut flip = false;
        b.iter(|| {
            flip = !flip;
            editor.set_value(if flip { &alternate } else { &text });
            black_box(editor.search().matches().len());
        })
    });
}

criterion_group!(
    benches,
    bench_line_index_build,
    bench_search_overlapping,
    bench_validate,
    bench_value_swap
);
criterion_main!(benches);

//! Benchmark – the UTF-8 → UTF-16 hot loop.
#![allow(missing_docs)]

use codeunit::{utf8_to_utf16, utf8_to_utf16_len, ConvertFlags, Units};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Produce a deterministic payload of exactly `target_len` UTF-8 bytes
/// with the requested share of non-ASCII scalars, so every scenario
/// operates on the same amount of data.
fn make_payload(target_len: usize, multilingual: bool) -> String {
    let mut s = String::with_capacity(target_len + 4);
    let mut i = 0usize;
    while s.len() < target_len {
        if multilingual {
            // 1-, 2-, 3- and 4-byte scalars in rotation.
            match i % 4 {
                0 => s.push('a'),
                1 => s.push('é'),
                2 => s.push('あ'),
                _ => s.push('😀'),
            }
        } else {
            s.push((b'a' + (i % 26) as u8) as char);
        }
        i += 1;
    }
    while s.len() > target_len {
        s.pop();
    }
    while s.len() < target_len {
        s.push('a');
    }
    debug_assert_eq!(s.len(), target_len);
    s
}

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("utf8_to_utf16");
    for &(name, multilingual) in &[("ascii", false), ("multilingual", true)] {
        let payload = make_payload(64 * 1024, multilingual);
        let bytes = payload.as_bytes();
        let mut out = vec![0u16; bytes.len() + 1];

        group.bench_with_input(BenchmarkId::new("convert", name), &bytes, |b, bytes| {
            b.iter(|| {
                utf8_to_utf16(
                    Some(black_box(&mut out)),
                    Units::of(black_box(bytes)),
                    ConvertFlags::empty(),
                )
                .unwrap()
                .written
            });
        });

        group.bench_with_input(BenchmarkId::new("measure", name), &bytes, |b, bytes| {
            b.iter(|| {
                utf8_to_utf16_len(Units::of(black_box(bytes)), ConvertFlags::empty())
                    .unwrap()
                    .written
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_convert);
criterion_main!(benches);

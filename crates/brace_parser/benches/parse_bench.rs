use brace_parser::Parser;
use bumpalo::Bump;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

// A medium-size script with imports, declarations and operator chains
const SCRIPT_SOURCE: &str = r#"#!/usr/bin/env swift

import Foundation
import func Darwin.C.sqrt
import struct Geometry.Point

/*
 * Configuration
 */
let maxCount: Int = 100
let names: [String] = ["alpha", "beta", "gamma"]
let table: [String: Int] = ["alpha": 1, "beta": 2]
var cache: [Int: String]? = nil
var handler: (Int, label: String) throws -> Bool? = nil

// Arithmetic and comparisons
total = base + offset * scale - 1
ratio = (a + b) / (c - d) ?? 0
inRange = 0...maxCount ~= value && !disabled
flag = x > y ? x - y : y - x

// Casts and checks
text = value as? String ?? "default"
count = (object as! [Int]).count
isPoint = shape is Point || shape is Geometry.Point

// Calls, members and optional chains
result = try service.fetch(id: 42, retries: 3)?.payload[0]!.name
items = try? decoder.decode([Item].self, from: data)
point = .origin
values[index] += step++
label = names.first!.uppercased() + "\(count)"
"#;

fn bench_parse_script(c: &mut Criterion) {
    c.bench_function("parse_script_medium", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let parser = Parser::new(&arena, "bench.brace", black_box(SCRIPT_SOURCE));
            let unit = parser.parse_top_level_declaration();
            black_box(unit.is_ok());
        });
    });
}

fn bench_long_sequence(c: &mut Criterion) {
    let source = (0..500)
        .map(|i| format!("v{i}"))
        .collect::<Vec<_>>()
        .join(" + ");
    c.bench_function("parse_sequence_500", |b| {
        b.iter(|| {
            let arena = Bump::new();
            let parser = Parser::new(&arena, "bench.brace", black_box(&source));
            black_box(parser.parse_standalone_expression().is_ok());
        });
    });
}

criterion_group!(benches, bench_parse_script, bench_long_sequence);
criterion_main!(benches);

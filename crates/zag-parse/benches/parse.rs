use std::hint::black_box;

use codspeed_criterion_compat::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};

static SIMPLE: &str = r#"
package main

func main() {
    print("hello")
}
"#;

static MEDIUM: &str = r#"
package shapes

import "math"

type Point = Pair<float, float>
type Grid = map<string, []*Point>

func distance(a Point, b Point) float {
    var dx, dy = a.x - b.x, a.y - b.y
    return math.sqrt(dx * dx + dy * dy)
}

func walk(grid Grid) {
    mut total = 0
    for total < 100 {
        if total % 2 == 0 { total += 3 } else if total > 50 { total = total * 2 } else { total += 1 }
    }
}
"#;

static BROKEN: &str = r#"
func broken(a int, {
    var = 1 +
    x(1, 2
    }
}
type = ;
"#;

fn benchmark_parser(c: &mut Criterion) {
    let medium = MEDIUM.repeat(16);
    let inputs = [("simple", SIMPLE), ("medium", medium.as_str()), ("broken", BROKEN)];

    let mut group = c.benchmark_group("Parser Benchmark");

    for (name, code) in inputs {
        group.throughput(Throughput::Bytes(code.len() as u64));
        group.bench_with_input(BenchmarkId::new("parse_code", name), code, |b, code| {
            b.iter(|| black_box(zag_parse::parse(code)));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_parser);
criterion_main!(benches);

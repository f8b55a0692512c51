use codspeed_criterion_compat::{Criterion, Throughput, black_box, criterion_group, criterion_main};

static LINE: &str = "func add(a int, b int) int { return a + b * 3 <= 0x1f && x != 'c' } // tail\n";

static IDENTIFIERS: &str =
    "It was the year when they finally immanentized the Eschaton It was the year when they \
     finally immanentized the Eschaton It was the year when they finally immanentized the \
     Eschaton It was the year when they finally immanentized the Eschaton It was the year when \
     they finally immanentized the Eschaton It was the year when they finally immanentized the \
     Eschaton";

fn iterate(s: &str) {
    use zag_tokenizer::{SyntaxKind, Tokenizer};

    let mut tokenizer = Tokenizer::new(s);

    loop {
        let token = tokenizer.next_token();
        if token.kind == SyntaxKind::EOF {
            break;
        }

        black_box(token);
    }
}

fn bench_iterate(c: &mut Criterion) {
    let source = LINE.repeat(32);
    let candidates = [("identifiers", IDENTIFIERS), ("keywords_operators_and_punctators", &source)];

    let mut group = c.benchmark_group("iterate");

    for (name, source) in candidates {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(name, &source, |b, &s| b.iter(|| iterate(s)));
    }
}

criterion_group!(benches, bench_iterate);
criterion_main!(benches);

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use typedrill::session::attempt::AttemptState;
use typedrill::session::input::{KeyPress, process_char};
use typedrill::session::result::{AttemptResult, normalize};
use typedrill::store::schema::ProgressData;

fn make_target(words: usize) -> String {
    let pool = [
        "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dogs", "pack", "vexed",
    ];
    (0..words)
        .map(|i| pool[i % pool.len()])
        .collect::<Vec<_>>()
        .join(" ")
}

fn bench_keystroke_scoring(c: &mut Criterion) {
    let target = make_target(100);
    let typed: Vec<char> = target.chars().collect();

    c.bench_function("process_char (100-word line)", |b| {
        b.iter(|| {
            let mut attempt = AttemptState::new(black_box(&target));
            for &ch in &typed {
                process_char(&mut attempt, ch);
            }
            attempt
        })
    });
}

fn bench_normalize(c: &mut Criterion) {
    let messy = "  the   quick\tbrown  fox  ".repeat(50);

    c.bench_function("normalize (50x padded line)", |b| {
        b.iter(|| normalize(black_box(&messy)))
    });
}

fn bench_line_judgement(c: &mut Criterion) {
    let target = make_target(100);
    let mut attempt = AttemptState::new(&target);
    for ch in target.chars() {
        process_char(&mut attempt, ch);
    }

    c.bench_function("AttemptResult::from_attempt (100-word line)", |b| {
        b.iter(|| AttemptResult::from_attempt(black_box(&attempt)))
    });
}

fn bench_heatmap_replay(c: &mut Criterion) {
    // 500 lines of ~100 keystrokes each, ~9% error rate
    let lines: Vec<Vec<KeyPress>> = (0..500)
        .map(|i| {
            make_target(20)
                .chars()
                .enumerate()
                .map(|(j, ch)| KeyPress {
                    key: ch,
                    correct: (i + j) % 11 != 0,
                })
                .collect()
        })
        .collect();

    c.bench_function("heatmap replay (500 lines x 100 keystrokes)", |b| {
        b.iter(|| {
            let mut data = ProgressData::default();
            for line in &lines {
                for press in line {
                    data.record_key(black_box(press.key), black_box(press.correct));
                }
            }
            data
        })
    });
}

criterion_group!(
    benches,
    bench_keystroke_scoring,
    bench_normalize,
    bench_line_judgement,
    bench_heatmap_replay,
);
criterion_main!(benches);

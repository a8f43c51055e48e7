use arrival_picker::api::NavigationTuning;
use arrival_picker::core::TimeWindow;
use arrival_picker::interaction::{ClickSession, InputEvent, PointerButton, SessionKey};
use arrival_picker::model::{ClickTable, ComponentSet, EventId, PickTime, Side, StationCode, StationPick};
use arrival_picker::store::StoreMerger;
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn generated_table(events: usize, stations: usize, offset: f64) -> ClickTable {
    let components = ComponentSet::three_component();
    let mut table = ClickTable::new();
    for e in 0..events {
        for s in 0..stations {
            let mut pick = StationPick::unset(&components);
            let seconds = offset + (e * stations + s) as f64 * 0.013;
            pick.record(Side::Left, "u", PickTime::round(seconds).expect("finite"));
            pick.record(Side::Right, "e", PickTime::round(seconds + 1.5).expect("finite"));
            table.insert(
                EventId::new(format!("202506{:02}_0000_E{e}", e % 28 + 1)),
                StationCode::new(format!("v.s{s:02}")),
                pick,
            );
        }
    }
    table
}

fn bench_store_merge_500_pairs(c: &mut Criterion) {
    let dir = tempfile::tempdir().expect("tempdir");
    let summary = dir.path().join("click_table_summary.json");
    let raw = dir.path().join("clicked_times.json");
    let existing = generated_table(50, 10, 0.0);
    let text = existing.to_json_pretty().expect("serialize");
    std::fs::write(&summary, &text).expect("seed summary");
    std::fs::write(&raw, &text).expect("seed raw");

    let fresh = generated_table(5, 10, 100.0);
    let merger = StoreMerger::new();

    c.bench_function("store_merge_500_pairs", |b| {
        b.iter(|| {
            let _ = merger
                .save(black_box(&fresh), &[&summary, &raw])
                .expect("save should succeed");
        })
    });
}

fn bench_session_pointer_moves(c: &mut Criterion) {
    let components = ComponentSet::three_component();
    let mut session = ClickSession::with_window(
        SessionKey::new("20250601_0101_Sakurajima", "v.skd2"),
        &components,
        TimeWindow::new(0.0, 60.0).expect("window"),
        NavigationTuning::default(),
    )
    .expect("session");
    let mut pick = StationPick::unset(&components);

    c.bench_function("session_pointer_moves_1k", |b| {
        b.iter(|| {
            for i in 0..1_000 {
                let axis = i % 3;
                let effects = session.handle(
                    InputEvent::move_to(axis, f64::from(i as u32) * 0.05, 0.0),
                    &mut pick,
                );
                black_box(effects);
            }
            let _ = session.handle(
                InputEvent::click(0, PointerButton::Primary, 10.0, 0.0),
                &mut pick,
            );
        })
    });
}

criterion_group!(
    benches,
    bench_store_merge_500_pairs,
    bench_session_pointer_moves
);
criterion_main!(benches);

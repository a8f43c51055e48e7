use std::collections::HashSet;
use std::fs;

use arrival_picker::model::{ClickTable, ComponentSet, EventId, PickTime, Side, StationCode, StationPick};
use arrival_picker::store::{StoreMerger, try_load_store};
use proptest::prelude::*;

fn pick_strategy() -> impl Strategy<Value = StationPick> {
    (
        proptest::option::of(0.0f64..600.0),
        proptest::option::of(0.0f64..600.0),
    )
        .prop_map(|(left, right)| {
            let mut pick = StationPick::unset(&ComponentSet::three_component());
            if let Some(seconds) = left {
                pick.record(Side::Left, "u", PickTime::round(seconds).expect("finite"));
            }
            if let Some(seconds) = right {
                pick.record(Side::Right, "n", PickTime::round(seconds).expect("finite"));
            }
            pick
        })
}

fn table_strategy() -> impl Strategy<Value = ClickTable> {
    prop::collection::vec((0usize..4, 0usize..4, pick_strategy()), 0..10).prop_map(|entries| {
        let mut table = ClickTable::new();
        for (event, station, pick) in entries {
            table.insert(
                EventId::new(format!("2025060{event}_0000_E{event}")),
                StationCode::new(format!("v.s{station}")),
                pick,
            );
        }
        table
    })
}

fn pair_keys(table: &ClickTable) -> HashSet<(String, String)> {
    table
        .pairs()
        .map(|(event, station, _)| (event.to_string(), station.to_string()))
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn save_is_a_station_granularity_union(existing in table_strategy(), fresh in table_strategy()) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = dir.path().join("store.json");
        fs::write(&store, existing.to_json_pretty().expect("serialize")).expect("seed store");

        let report = StoreMerger::new().save(&fresh, &[&store]).expect("save");
        let merged = try_load_store(&store).expect("parse").expect("written");

        prop_assert_eq!(report.updated_count, fresh.pair_count());
        for (event, station, pick) in fresh.pairs() {
            prop_assert_eq!(merged.get(event.as_str(), station.as_str()), Some(pick));
        }
        for (event, station, pick) in existing.pairs() {
            if fresh.get(event.as_str(), station.as_str()).is_none() {
                prop_assert_eq!(merged.get(event.as_str(), station.as_str()), Some(pick));
            }
        }
        let expected: HashSet<_> = pair_keys(&existing).union(&pair_keys(&fresh)).cloned().collect();
        prop_assert_eq!(pair_keys(&merged), expected);
    }

    #[test]
    fn repeated_saves_write_identical_text(existing in table_strategy(), fresh in table_strategy()) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = dir.path().join("store.json");
        fs::write(&store, existing.to_json_pretty().expect("serialize")).expect("seed store");
        let merger = StoreMerger::new();

        merger.save(&fresh, &[&store]).expect("first save");
        let first = fs::read_to_string(&store).expect("read");
        merger.save(&fresh, &[&store]).expect("second save");

        prop_assert_eq!(fs::read_to_string(&store).expect("read"), first);
    }
}

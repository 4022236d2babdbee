mod common;

use cityworld::flush::flush_cycle_to_jsonl;
use cityworld::model::*;
use cityworld::sim::{AllowAll, CityStores, CycleConfig, CycleReport, DomainPresence, run_cycle};
use common::{read_lines, stressed_state};

fn busy_report() -> CycleReport {
    let config = CycleConfig::default();
    (0..200)
        .map(|seed| {
            let mut state = stressed_state(seed, 6);
            state.calendar.holiday = Holiday::OaklandPride;
            state.calendar.holiday_priority = HolidayPriority::Oakland;
            run_cycle(&state, &config, &mut CityStores::default(), &AllowAll, &[])
        })
        .find(|r| !r.crises.is_empty() && !r.spawned_arcs.is_empty())
        .expect("some seed produces a crisis with an arc")
}

#[test]
fn export_writes_all_files() {
    let report = busy_report();
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("cycle-6");

    flush_cycle_to_jsonl(&report, &out).unwrap();

    let events = read_lines(&out.join("events.jsonl"));
    let crises = read_lines(&out.join("crises.jsonl"));
    let arcs = read_lines(&out.join("arcs.jsonl"));
    let hooks = read_lines(&out.join("hooks.jsonl"));
    assert_eq!(events.len(), report.events.len());
    assert_eq!(crises.len(), report.crises.len());
    assert_eq!(arcs.len(), report.spawned_arcs.len());
    assert_eq!(hooks.len(), report.hooks.len());
    assert!(out.join("presence.json").exists());
}

#[test]
fn exported_records_use_canonical_tags() {
    let report = busy_report();
    let dir = tempfile::tempdir().unwrap();
    flush_cycle_to_jsonl(&report, dir.path()).unwrap();

    for line in read_lines(&dir.path().join("events.jsonl")) {
        let v: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert!(v["domain"].as_str().unwrap().chars().all(|c| c.is_ascii_uppercase()));
        assert!(["low", "medium", "high"].contains(&v["severity"].as_str().unwrap()));
        assert_eq!(v["holiday_context"], "OaklandPride");
    }

    let first_arc: serde_json::Value =
        serde_json::from_str(&read_lines(&dir.path().join("arcs.jsonl"))[0]).unwrap();
    assert_eq!(first_arc["phase"], "early");
    assert_eq!(first_arc["source"], "crisis-generator");

    let arcs: Vec<Arc> = read_lines(&dir.path().join("arcs.jsonl"))
        .iter()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(arcs, report.spawned_arcs);
}

#[test]
fn presence_file_reads_back() {
    let report = busy_report();
    let dir = tempfile::tempdir().unwrap();
    flush_cycle_to_jsonl(&report, dir.path()).unwrap();

    let text = std::fs::read_to_string(dir.path().join("presence.json")).unwrap();
    let presence: DomainPresence = serde_json::from_str(&text).unwrap();
    assert_eq!(presence, report.presence);
    assert!(presence.count(Domain::Holiday) >= 1);
    assert!(presence.count(Domain::Festival) >= 1);
}

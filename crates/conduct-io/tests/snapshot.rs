use std::fs;

use conduct_io::{decode::Snapshot, encode::SnapshotWriter};
use conduct_solver::{PlateConfig, Simulation};

fn run_short(path: &std::path::Path) -> Simulation {
    let config = PlateConfig::with_duration(950.0);
    let mut sim = Simulation::new(&config).unwrap();
    let mut writer = SnapshotWriter::new(path).unwrap();

    sim.run(&mut writer).unwrap();
    assert!(writer.is_written());

    sim
}

#[test]
fn snapshot_has_one_block_per_row() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("temp.dat");
    run_short(&path);

    let text = fs::read_to_string(&path).unwrap();
    let blocks: Vec<&str> = text.split_terminator("\n\n").collect();

    assert_eq!(blocks.len(), 121);
    for block in &blocks {
        assert_eq!(block.lines().count(), 121);
        assert!(block.lines().all(|l| l.split('\t').count() == 3));
    }
    assert!(text.ends_with("\n\n"));
    assert_eq!(text.lines().filter(|l| l.is_empty()).count(), 121);
}

#[test]
fn snapshot_reads_back_with_the_plate_layout() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("temp.dat");
    run_short(&path);

    let snapshot = Snapshot::open(&path).unwrap();

    assert_eq!(snapshot.dim(), (121, 121));
    assert!((snapshot.xs[20] - 0.1).abs() < 1e-12);
    assert!((snapshot.ys[120] - 0.6).abs() < 1e-12);
    assert_eq!(snapshot.temperature[(0, 20)], 15.0);
    assert_eq!(snapshot.temperature[(20, 60)], 45.0);
    assert!(snapshot.temperature[(10, 10)].is_nan());

    let summary = snapshot.summary();
    assert_eq!(summary.missing, 80 * 20);
    assert_eq!(summary.min, 15.0);
    assert_eq!(summary.max, 55.0);
}

#[test]
fn snapshot_matches_the_simulated_field() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("temp.dat");
    run_short(&path);

    let mut sim = Simulation::new(&PlateConfig::with_duration(950.0)).unwrap();
    while sim.iteration() < sim.schedule().snapshot_step {
        sim.step();
    }

    let snapshot = Snapshot::open(&path).unwrap();
    for (&read, &simulated) in snapshot.temperature.iter().zip(sim.temperature().iter()) {
        assert!(read.to_bits() == simulated.to_bits() || (read.is_nan() && simulated.is_nan()));
    }
}

#[test]
fn second_snapshot_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("temp.dat");
    let sim = Simulation::new(&PlateConfig::default()).unwrap();
    let mut writer = SnapshotWriter::new(&path).unwrap();

    writer.encode_snapshot(&sim).unwrap();
    assert!(writer.encode_snapshot(&sim).is_err());
}

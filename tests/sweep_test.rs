extern crate ising_mc;
extern crate rand;
use ising_mc::classical::*;
use ising_mc::IsingError;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

fn run_seeded(d: usize, l: usize, params: SimulationParams, seed: u64) -> Vec<ObservableRecord> {
    let rng = ChaCha8Rng::seed_from_u64(seed);
    let mut sim = Simulation::new_random(d, l, params, rng).unwrap();
    sim.run_collect()
}

/// Independent rendition of a 1D run using the same draw order.
fn chain_oracle(l: usize, coupling: f64, temperature: f64, sweeps: usize, seed: u64) -> (f64, f64) {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut spins: Vec<i8> = (0..l)
        .map(|_| if rng.gen::<f64>() < 0.5 { 1 } else { -1 })
        .collect();
    for _ in 0..sweeps * l {
        let i = rng.gen_range(0..l);
        let left = spins[(i + l - 1) % l];
        let right = spins[(i + 1) % l];
        let de = 2.0 * coupling * f64::from(spins[i]) * f64::from(left + right);
        if de <= 0.0 || rng.gen::<f64>() < (-de / temperature).exp() {
            spins[i] = -spins[i];
        }
    }
    let energy = -coupling
        * (0..l)
            .map(|i| f64::from(spins[i]) * f64::from(spins[(i + 1) % l]))
            .sum::<f64>();
    let magnetization = spins.iter().map(|s| f64::from(*s)).sum();
    (energy, magnetization)
}

#[test]
fn single_sweep_chain_matches_oracle() {
    let params = SimulationParams::new(1.0, 2.0, 0, 1, 1).unwrap();
    for seed in 0..20 {
        let records = run_seeded(1, 10, params, seed);
        assert_eq!(records.len(), 1);
        let (energy, magnetization) = chain_oracle(10, 1.0, 2.0, 1, seed);
        assert_eq!(
            records[0],
            ObservableRecord {
                sweep: 0,
                energy,
                magnetization
            }
        );
    }
}

#[test]
fn longer_chain_matches_oracle() {
    let params = SimulationParams::new(0.5, 1.3, 7, 1, 1).unwrap();
    let records = run_seeded(1, 33, params, 99);
    let (energy, magnetization) = chain_oracle(33, 0.5, 1.3, 8, 99);
    assert_eq!(records[0].energy, energy);
    assert_eq!(records[0].magnetization, magnetization);
}

#[test]
fn same_seed_same_records() {
    let params = SimulationParams::new(1.0, 2.269, 10, 50, 5).unwrap();
    for d in 1..=3 {
        let a = run_seeded(d, 6, params, 1234);
        let b = run_seeded(d, 6, params, 1234);
        assert_eq!(format!("{:?}", a), format!("{:?}", b));
        assert_eq!(a.len(), 10);
        assert!(a.windows(2).all(|w| w[0].sweep < w[1].sweep));
    }
}

#[test]
fn different_seeds_diverge() {
    let params = SimulationParams::new(1.0, 3.0, 0, 20, 1).unwrap();
    let a = run_seeded(2, 10, params, 1);
    let b = run_seeded(2, 10, params, 2);
    assert_ne!(a, b);
}

#[test]
fn records_are_within_bounds() {
    let params = SimulationParams::new(1.0, 2.0, 5, 30, 1).unwrap();
    let records = run_seeded(3, 4, params, 5);
    // 64 sites with 3 bonds each.
    assert!(records
        .iter()
        .all(|r| r.energy.abs() <= 192.0 && r.magnetization.abs() <= 64.0));
    // Parity of the magnetization follows the number of sites.
    assert!(records.iter().all(|r| r.magnetization as i64 % 2 == 0));
}

#[test]
fn stop_before_start() {
    let rng = ChaCha8Rng::seed_from_u64(3);
    let params = SimulationParams::new(1.0, 2.0, 2, 4, 1).unwrap();
    let mut sim = Simulation::new_random(2, 4, params, rng).unwrap();
    let before = sim.lattice().snapshot();
    let stop = AtomicBool::new(true);
    let mut records: Vec<ObservableRecord> = vec![];
    let res = sim.run_with_stop(&mut records, &stop);
    assert_eq!(res, Err(IsingError::Stopped { completed_sweeps: 0 }));
    assert!(records.is_empty());
    assert_eq!(sim.lattice().spins(), before.as_slice());
}

#[test]
fn stop_during_measurement_drops_records() {
    let rng = ChaCha8Rng::seed_from_u64(5);
    let eq = 2;
    let params = SimulationParams::new(1.0, 2.0, eq, 2_000_000, 1000).unwrap();
    let mut sim = Simulation::new_random(2, 4, params, rng).unwrap();
    let stop = AtomicBool::new(false);
    let mut records: Vec<ObservableRecord> = vec![];

    let res = thread::scope(|s| {
        s.spawn(|| {
            thread::sleep(Duration::from_millis(50));
            stop.store(true, Ordering::Relaxed);
        });
        sim.run_with_stop(&mut records, &stop)
    });

    match res {
        Err(IsingError::Stopped { completed_sweeps }) => {
            assert!(completed_sweeps > eq);
            assert_eq!(sim.attempted(), (completed_sweeps * 16) as u64);
        }
        other => panic!("expected a stop, got {:?}", other),
    }
    assert!(records.is_empty());
}

#[test]
fn stoppable_run_matches_plain_run() {
    let params = SimulationParams::new(1.0, 2.0, 3, 9, 2).unwrap();
    let plain = run_seeded(2, 5, params, 8);

    let rng = ChaCha8Rng::seed_from_u64(8);
    let mut sim = Simulation::new_random(2, 5, params, rng).unwrap();
    let stop = AtomicBool::new(false);
    let mut records: Vec<ObservableRecord> = vec![];
    sim.run_with_stop(&mut records, &stop).unwrap();
    assert_eq!(records, plain);
}

#[test]
fn supplied_initial_state_is_used() {
    let rng = ChaCha8Rng::seed_from_u64(4);
    let lattice = Lattice::all_up(2, 8).unwrap();
    // Zero measurement sweeps: nothing is emitted and the lattice is untouched.
    let params = SimulationParams::new(1.0, 2.0, 0, 0, 1).unwrap();
    let mut sim = Simulation::new(lattice, params, rng).unwrap();
    assert!(sim.run_collect().is_empty());
    assert_eq!(sim.observe(0).energy, -128.0);
    assert_eq!(sim.into_lattice().total_magnetization(), 64.0);
}

#[test]
fn summary_of_ordered_run() {
    let rng = ChaCha8Rng::seed_from_u64(6);
    let lattice = Lattice::all_up(2, 8).unwrap();
    let params = SimulationParams::new(1.0, 1.0, 50, 200, 1).unwrap();
    let mut sim = Simulation::new(lattice, params, rng)
        .unwrap()
        .with_magnetization_convention(MagnetizationConvention::PerSite);
    let records = sim.run_collect();
    let summary = sim.summarize(&records).unwrap();
    assert_eq!(summary.samples, 200);
    assert!(summary.mean_abs_magnetization > 0.9);
    assert!(summary.mean_energy / 64.0 < -1.8);
    assert!(summary.specific_heat >= 0.0);
}

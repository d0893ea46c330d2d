extern crate ising_mc;
extern crate rand;
use ising_mc::classical::*;
use rand::prelude::SmallRng;
use rand::SeedableRng;

#[test]
fn spins_stay_unit_after_every_step() {
    for (d, l, seed) in [(1, 17, 0), (2, 7, 1), (3, 4, 2), (4, 3, 3)] {
        let rng = SmallRng::seed_from_u64(seed);
        let params = SimulationParams::new(1.0, 2.5, 0, 1, 1).unwrap();
        let mut sim = Simulation::new_random(d, l, params, rng).unwrap();
        for _ in 0..5000 {
            sim.step();
            assert!(sim.lattice().spins().iter().all(|s| *s == 1 || *s == -1));
        }
    }
}

#[test]
fn cold_lattice_rejects_uphill() {
    // Every flip from the all up state costs 2 * J * 4 = 8.
    let rng = SmallRng::seed_from_u64(10);
    let lattice = Lattice::all_up(2, 4).unwrap();
    let params = SimulationParams::new(1.0, 1e-6, 0, 1, 1).unwrap();
    let mut sim = Simulation::new(lattice, params, rng).unwrap();
    for _ in 0..10_000 {
        assert_eq!(sim.step(), StepOutcome::Rejected { delta_energy: 8.0 });
    }
    assert_eq!(sim.accepted(), 0);
    assert_eq!(sim.lattice().total_magnetization(), 16.0);
}

#[test]
fn cold_lattice_accepts_downhill() {
    // Every flip out of a checkerboard lowers the energy.
    let mut rng = SmallRng::seed_from_u64(11);
    for _ in 0..1000 {
        let mut lattice = Lattice::checkerboard(2, 4).unwrap();
        let outcome = metropolis_step(&mut lattice, 1.0, 1e-6, &mut rng);
        assert!(outcome.is_accepted());
    }
}

#[test]
fn zero_delta_is_accepted() {
    let mut rng = SmallRng::seed_from_u64(12);
    // Next to the wall: three aligned neighbors and one anti-aligned.
    let lattice = Lattice::domain_wall(2, 4, 0).unwrap();
    assert_eq!(flip_delta_energy(&lattice, &[1, 2], 1.0), 4.0);
    // In 1D, a spin between an up and a down neighbor costs nothing to flip.
    let chain = Lattice::new_with_spins(1, 3, vec![1, 1, -1]).unwrap();
    assert_eq!(flip_delta_energy(&chain, &[1], 1.0), 0.0);
    for _ in 0..1000 {
        assert!(should_flip(&mut rng, 1e-6, 0.0));
    }
}

#[test]
fn hot_lattice_demagnetizes() {
    let rng = SmallRng::seed_from_u64(13);
    let lattice = Lattice::all_up(2, 32).unwrap();
    let params = SimulationParams::new(1.0, 1e12, 0, 1, 1).unwrap();
    let mut sim = Simulation::new(lattice, params, rng).unwrap();
    sim.sweeps(50);
    assert!(sim.acceptance_ratio() > 0.999);
    let m = sim.lattice().per_site_magnetization();
    assert!(m.abs() < 0.2, "magnetization per site {}", m);
}

#[test]
fn low_temperature_orders() {
    let rng = SmallRng::seed_from_u64(14);
    let lattice = Lattice::all_up(2, 8).unwrap();
    let params = SimulationParams::new(1.0, 1.0, 0, 1, 1).unwrap();
    let mut sim = Simulation::new(lattice, params, rng).unwrap();
    sim.sweeps(200);
    assert!(sim.lattice().per_site_magnetization().abs() > 0.8);
}

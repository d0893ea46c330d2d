#![cfg(feature = "serialize")]
extern crate ising_mc;
use ising_mc::classical::*;

#[test]
fn lattice_and_params_through_json() {
    let lattice = Lattice::domain_wall(3, 4, 2).unwrap();
    let s = serde_json::to_string(&lattice).unwrap();
    let back: Lattice = serde_json::from_str(&s).unwrap();
    assert_eq!(back, lattice);
    assert_eq!(back.neighbor_index(0, 2, Direction::Backward), 3);

    let params = SimulationParams::new(1.0, 2.0, 3, 4, 2).unwrap();
    let s = serde_json::to_string(&params).unwrap();
    let back: SimulationParams = serde_json::from_str(&s).unwrap();
    assert_eq!(back, params);
}

#[test]
fn record_field_order() {
    let record = ObservableRecord {
        sweep: 3,
        energy: -4.0,
        magnetization: 2.0,
    };
    let s = serde_json::to_string(&record).unwrap();
    assert_eq!(s, r#"{"sweep":3,"energy":-4.0,"magnetization":2.0}"#);
}

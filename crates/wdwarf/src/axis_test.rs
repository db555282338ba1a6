use approx::assert_relative_eq;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaChaRng;

use crate::axis::{Axis, OutOfBounds};
use crate::error::WdwarfError;
use crate::model::MassNodes;

#[test]
fn test_locate_interior_query() {
    let axis = Axis::new(vec![1.0, 2.0, 3.0]).unwrap();

    let index = axis.locate(2.5).unwrap();
    assert_eq!(index, 1);
    assert_relative_eq!(axis.fraction(index, 2.5), 0.5);
}

#[test]
fn test_locate_exact_nodes() {
    let axis = Axis::new(vec![1.0, 2.0, 3.0, 4.0]).unwrap();

    assert_eq!(axis.locate(1.0), Ok(0));
    assert_eq!(axis.locate(2.0), Ok(1));
    assert_eq!(axis.locate(3.0), Ok(2));
    // Last node keeps a valid upper neighbour
    assert_eq!(axis.locate(4.0), Ok(2));
    assert_relative_eq!(axis.fraction(2, 4.0), 1.0);
}

#[test]
fn test_locate_out_of_bounds() {
    let axis = Axis::new(vec![0.53, 0.54, 0.61]).unwrap();

    assert_eq!(axis.locate(0.5), Err(OutOfBounds::Low));
    assert_eq!(axis.locate(0.62), Err(OutOfBounds::High));
    assert_eq!(axis.locate(f64::NAN), Err(OutOfBounds::Low));
    assert_eq!(axis.locate(f64::INFINITY), Err(OutOfBounds::High));
}

#[test]
fn test_bracket_returns_index_and_offset() {
    let axis = Axis::new(vec![0.0, 10.0, 20.0, 40.0]).unwrap();

    let (index, offset) = axis.bracket(30.0).unwrap();
    assert_eq!(index, 2);
    assert_relative_eq!(offset, 0.5);

    assert_eq!(axis.bracket(-1.0), Err(OutOfBounds::Low));
}

#[test]
fn test_locate_brackets_random_queries() {
    let mut rng = ChaChaRng::seed_from_u64(42);

    for _ in 0..50 {
        // Random strictly increasing axis
        let len = rng.gen_range(2..12);
        let mut nodes = Vec::with_capacity(len);
        let mut x = rng.gen_range(-5.0..5.0);
        for _ in 0..len {
            nodes.push(x);
            x += rng.gen_range(0.01..3.0);
        }
        let axis = Axis::new(nodes.clone()).unwrap();

        for _ in 0..100 {
            let q = rng.gen_range(axis.first()..=axis.last());
            let i = axis.locate(q).unwrap();
            assert!(i + 1 < nodes.len());
            assert!(nodes[i] <= q && q <= nodes[i + 1]);

            let dx = axis.fraction(i, q);
            assert!((0.0..=1.0).contains(&dx));
        }
    }
}

#[test]
fn test_axis_rejects_bad_nodes() {
    assert!(matches!(
        Axis::new(vec![1.0]),
        Err(WdwarfError::InvalidAxis(_))
    ));
    assert!(matches!(
        Axis::new(vec![1.0, f64::NAN, 3.0]),
        Err(WdwarfError::InvalidAxis(_))
    ));
    assert!(matches!(
        Axis::new(vec![1.0, 2.0, 2.0]),
        Err(WdwarfError::InvalidAxis(_))
    ));
    assert!(matches!(
        Axis::new(vec![3.0, 2.0, 1.0]),
        Err(WdwarfError::InvalidAxis(_))
    ));
}

#[test]
fn test_standard_mass_axes_are_padded() {
    for shape in [
        MassNodes::Two,
        MassNodes::Three,
        MassNodes::Four,
        MassNodes::Seven,
    ] {
        let axis = Axis::for_masses(shape);
        assert_eq!(axis.len(), shape.tracks() + 2);
        // Validates as a regular axis
        assert!(Axis::new(axis.nodes().to_vec()).is_ok());
        assert_relative_eq!(axis.last(), 1.11);
    }
    assert_relative_eq!(Axis::for_masses(MassNodes::Seven).first(), 0.53);
}

#[test]
fn test_standard_age_axis() {
    let ages = Axis::standard_ages();

    assert_eq!(ages.len(), 500);
    assert_relative_eq!(ages.first(), 10f64.powf(6.1) / 1e9, max_relative = 1e-12);
    assert_relative_eq!(ages.last(), 10f64.powf(9.8) / 1e9, max_relative = 1e-12);
    assert!(Axis::new(ages.nodes().to_vec()).is_ok());
}

#[test]
fn test_axis_deserializes_with_validation() {
    let axis: Axis = serde_json::from_str("[0.1, 0.2, 0.4]").unwrap();
    assert_eq!(axis.len(), 3);

    let bad: Result<Axis, _> = serde_json::from_str("[0.4, 0.2]");
    assert!(bad.is_err());
}

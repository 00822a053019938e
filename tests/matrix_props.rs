use lamp_nn::{seeded_rng, Matrix, Network};
use proptest::prelude::*;

fn matrix() -> impl Strategy<Value = Matrix> {
    (1usize..7, 1usize..7).prop_flat_map(|(rows, cols)| {
        prop::collection::vec(-100.0f64..100.0, rows * cols)
            .prop_map(move |values| Matrix::from_flat(rows, cols, &values).unwrap())
    })
}

proptest! {
    #[test]
    fn storage_length_is_rows_times_cols(rows in 1usize..20, cols in 1usize..20) {
        let m = Matrix::zeros(rows, cols).unwrap();
        prop_assert_eq!(m.len(), rows * cols);
        prop_assert_eq!(m.transpose().len(), rows * cols);
    }

    #[test]
    fn transpose_is_an_involution(m in matrix()) {
        let t = m.transpose();
        prop_assert_eq!(t.rows(), m.cols());
        prop_assert_eq!(t.cols(), m.rows());
        prop_assert!(t.transpose().approx_eq(&m));
    }

    #[test]
    fn identity_is_left_neutral(m in matrix()) {
        let id = Matrix::identity(m.rows()).unwrap();
        prop_assert!(id.multiply(&m).unwrap().approx_eq(&m));
    }

    #[test]
    fn identity_is_right_neutral(m in matrix()) {
        let id = Matrix::identity(m.cols()).unwrap();
        prop_assert!(m.multiply(&id).unwrap().approx_eq(&m));
    }

    #[test]
    fn clone_is_equal_and_independent(m in matrix(), v in -5.0f64..5.0) {
        let original = m.as_slice().to_vec();
        let mut copy = m.clone();
        prop_assert!(copy.approx_eq(&m));
        copy.fill(v);
        prop_assert_eq!(m.as_slice(), &original[..]);
    }

    #[test]
    fn fill_gives_equal_matrices(rows in 1usize..8, cols in 1usize..8, v in -1e3f64..1e3) {
        let mut a = Matrix::zeros(rows, cols).unwrap();
        let mut b = Matrix::zeros(rows, cols).unwrap();
        a.fill(v);
        b.fill(v);
        prop_assert!(a.as_slice().iter().all(|&x| x == v));
        prop_assert!(a.approx_eq(&b));
    }

    #[test]
    fn mismatched_add_leaves_destination_untouched(a in matrix(), b in matrix()) {
        prop_assume!(!a.equal_dimensions(&b));
        let mut dst = a.clone();
        prop_assert!(dst.add(&b).is_err());
        prop_assert_eq!(dst.as_slice(), a.as_slice());
    }

    #[test]
    fn sum_with_self_doubles(m in matrix()) {
        let doubled = m.sum(&m).unwrap();
        let mut twice = m.clone();
        twice.apply(|x| 2.0 * x);
        prop_assert!(doubled.approx_eq(&twice));
    }

    #[test]
    fn loss_is_never_negative(
        seed in any::<u64>(),
        hidden in 1usize..5,
        targets in prop::collection::vec(0.0f64..1.0, 4),
    ) {
        let mut nn = Network::build(&[2, hidden, 1]).unwrap();
        nn.randomize(&mut seeded_rng(Some(seed)));
        let inputs = Matrix::from_flat(4, 2, &[0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 1.0, 1.0]).unwrap();
        let targets = Matrix::from_flat(4, 1, &targets).unwrap();
        prop_assert!(nn.loss(&inputs, &targets).unwrap() >= 0.0);
    }
}

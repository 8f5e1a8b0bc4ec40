#[cfg(test)]
mod integration_tests {
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_xoshiro::Xoshiro256PlusPlus;
    use std::collections::HashSet;
    use strip_fold::config::ReadOrder;
    use strip_fold::consts::MAX_FOLDS;
    use strip_fold::error::{FoldError, InvariantViolation, ValidationError};
    use strip_fold::formula::{FoldOrderIter, fold_position, fold_position_read, reverse_low_bits};
    use strip_fold::simulate::stack::FoldStack;
    use strip_fold::simulate::{
        ArrayFoldSimulator, FoldSimulator, LinkedFoldSimulator, Solver, cross_validate, simulate,
    };
    use strip_fold::strip::{FinalOrder, Folds, Label};
    use strip_fold::util::assertions;
    use test_case::test_case;

    const RNG_SEED: u64 = 0; // fix seed for reproducibility

    /// The array simulation is quadratic in the strip length, keep it to strips it finishes quickly
    const MAX_ARRAY_FOLDS: u32 = 14;

    const MAX_LINKED_FOLDS: u32 = 20;

    fn folds(k: u32) -> Folds {
        Folds::new(k).expect("fold count should be valid")
    }

    #[test_case(1, "1 2"; "one fold")]
    #[test_case(2, "1 4 3 2"; "two folds")]
    #[test_case(3, "1 8 5 4 3 6 7 2"; "three folds")]
    #[test_case(4, "1 16 9 8 5 12 13 4 3 14 11 6 7 10 15 2"; "four folds")]
    fn known_final_orders(k: u32, expected: &str) {
        for solver in [Solver::Array, Solver::Linked] {
            let order = solver.run(folds(k)).unwrap();
            assert_eq!(order.to_string(), expected, "{} solver", solver.name());
        }
        let closed_form = FoldOrderIter::new(folds(k)).unwrap().join(" ");
        assert_eq!(closed_form, expected);
    }

    #[test_case(1, 1, 1)]
    #[test_case(2, 1, 2)]
    #[test_case(1, 2, 1)]
    #[test_case(4, 2, 2)]
    #[test_case(3, 2, 3)]
    #[test_case(2, 2, 4)]
    #[test_case(7, 3, 7)]
    #[test_case(2, 3, 8)]
    fn known_positions(label: Label, k: u32, expected: u64) {
        assert_eq!(fold_position(label, folds(k)), Ok(expected));
    }

    #[test]
    fn top_down_reading() {
        let order = Solver::Linked.run(folds(1)).unwrap();
        assert_eq!(order.read(ReadOrder::TopDown).join(" "), "2 1");
        assert_eq!(fold_position_read(1, folds(1), ReadOrder::TopDown), Ok(2));
        assert_eq!(fold_position_read(2, folds(1), ReadOrder::TopDown), Ok(1));

        let order = Solver::Array.run(folds(2)).unwrap();
        assert_eq!(order.read(ReadOrder::TopDown).join(" "), "2 3 4 1");
        for label in 1..=4 {
            let expected = order.positions(ReadOrder::TopDown)[label as usize - 1];
            assert_eq!(fold_position_read(label, folds(2), ReadOrder::TopDown), Ok(expected));
        }
    }

    #[test]
    fn simulators_agree() {
        for k in 1..=MAX_ARRAY_FOLDS {
            let array = simulate::<ArrayFoldSimulator>(folds(k)).unwrap();
            let linked = simulate::<LinkedFoldSimulator>(folds(k)).unwrap();
            assert_eq!(array, linked, "simulators disagree for {} folds", k);
            assert_eq!(array.len(), 1 << k);
        }
    }

    #[test]
    #[ignore = "the array simulation is quadratic in the strip length, 20 folds take minutes"]
    fn simulators_agree_on_long_strips() {
        for k in MAX_ARRAY_FOLDS + 1..=MAX_LINKED_FOLDS {
            let array = simulate::<ArrayFoldSimulator>(folds(k)).unwrap();
            let linked = simulate::<LinkedFoldSimulator>(folds(k)).unwrap();
            assert_eq!(array, linked, "simulators disagree for {} folds", k);
        }
    }

    #[test]
    fn cross_validation_passes() {
        for k in 1..=12 {
            let order = cross_validate(folds(k)).unwrap();
            assert_eq!(order.labels()[0], 1);
        }
    }

    #[test]
    fn outputs_are_permutations() {
        for k in 1..=MAX_LINKED_FOLDS {
            let linked = simulate::<LinkedFoldSimulator>(folds(k)).unwrap();
            assert!(assertions::is_permutation(linked.labels()), "{} folds", k);
            assert_eq!(linked.len(), 1 << k);

            let mut sorted = linked.into_vec();
            sorted.sort_unstable();
            assert!(sorted.iter().copied().eq(1..=(1u64 << k)));
        }
        for k in 1..=MAX_ARRAY_FOLDS {
            let array = simulate::<ArrayFoldSimulator>(folds(k)).unwrap();
            assert!(assertions::is_permutation(array.labels()), "{} folds", k);
        }
    }

    #[test]
    fn formula_matches_simulation() {
        for k in 1..=MAX_LINKED_FOLDS {
            let order = simulate::<LinkedFoldSimulator>(folds(k)).unwrap();
            for (label, position) in (1..).zip(order.positions(ReadOrder::BottomUp)) {
                assert_eq!(
                    fold_position(label, folds(k)),
                    Ok(position),
                    "label {} after {} folds",
                    label,
                    k
                );
            }
        }
    }

    #[test]
    fn closed_form_matches_simulation() {
        for k in 1..=MAX_LINKED_FOLDS {
            let order = simulate::<LinkedFoldSimulator>(folds(k)).unwrap();
            let closed_form = FoldOrderIter::new(folds(k)).unwrap();
            assert_eq!(closed_form.len(), order.len());
            assert!(closed_form.eq(order.labels().iter().copied()), "{} folds", k);
        }
    }

    #[test]
    fn position_of_matches_positions() {
        let order = simulate::<LinkedFoldSimulator>(folds(5)).unwrap();
        let positions = order.positions(ReadOrder::BottomUp);
        for label in 1..=32 {
            assert_eq!(order.position_of(label), Some(positions[label as usize - 1]));
        }
        assert_eq!(order.position_of(33), None);
        assert_eq!(order.position_of(0), None);
    }

    #[test]
    fn sampled_positions_on_long_strips() {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(RNG_SEED);
        for k in [24, 32, 48, 63] {
            let strip_len = folds(k).strip_len().unwrap();
            assert_eq!(fold_position(1, folds(k)), Ok(1));
            assert_eq!(fold_position(2, folds(k)), Ok(strip_len));

            let mut seen = HashSet::new();
            for _ in 0..10_000 {
                let label = rng.random_range(1..=strip_len);
                let position = fold_position(label, folds(k)).unwrap();
                assert!((1..=strip_len).contains(&position));
                // labels keep their parity
                assert_eq!(label % 2, position % 2, "label {} after {} folds", label, k);
                seen.insert((label, position));
            }
            let labels = seen.iter().map(|(l, _)| l).unique().count();
            let positions = seen.iter().map(|(_, p)| p).unique().count();
            assert_eq!(labels, positions, "formula is not injective for {} folds", k);
        }
    }

    #[test]
    fn widest_strip() {
        let k = folds(MAX_FOLDS);
        assert_eq!(k.strip_len(), None);
        assert_eq!(k.label_mask(), Label::MAX);
        assert_eq!(fold_position(1, k), Ok(1));
        assert_eq!(fold_position(Label::MAX, k), Ok(Label::MAX));
        assert_eq!(
            fold_position(2, k),
            Err(FoldError::Validation(ValidationError::PositionUnrepresentable {
                label: 2,
                folds: MAX_FOLDS
            }))
        );
    }

    #[test]
    fn bit_reversal() {
        assert_eq!(reverse_low_bits(0b001, folds(3)), 0b100);
        assert_eq!(reverse_low_bits(0b110, folds(3)), 0b011);
        // bits above the fold count are discarded
        assert_eq!(reverse_low_bits(0b1_0001, folds(3)), 0b100);
        assert_eq!(reverse_low_bits(1, folds(64)), 1 << 63);
    }

    #[test_case(0; "no folds")]
    #[test_case(MAX_FOLDS + 1; "wider than a label")]
    #[test_case(u32::MAX; "max")]
    fn fold_count_rejected(k: u32) {
        let expected = Err(FoldError::Validation(ValidationError::FoldCountOutOfRange(k)));
        assert_eq!(Folds::new(k), expected);
        assert_eq!(Folds::try_from(k), expected);
    }

    #[test_case(0, 1; "label zero")]
    #[test_case(3, 1; "beyond two squares")]
    #[test_case(5, 2; "beyond four squares")]
    #[test_case(Label::MAX, 63; "beyond the longest representable strip")]
    fn label_rejected(label: Label, k: u32) {
        assert_eq!(
            fold_position(label, folds(k)),
            Err(FoldError::Validation(ValidationError::LabelOutOfRange {
                label,
                folds: k
            }))
        );
    }

    #[test_case(Solver::Array, 63)]
    #[test_case(Solver::Array, 64)]
    #[test_case(Solver::Linked, 63)]
    #[test_case(Solver::Linked, 64)]
    fn huge_strips_exhaust_resources(solver: Solver, k: u32) {
        match solver.run(folds(k)) {
            Err(FoldError::ResourceExhaustion { folds: n_folds, .. }) => assert_eq!(n_folds, k),
            other => panic!("expected resource exhaustion, got {:?}", other.map(|o| o.len())),
        }
    }

    #[test]
    fn closed_form_rejects_unindexable_strip() {
        assert!(matches!(
            FoldOrderIter::new(folds(64)),
            Err(FoldError::ResourceExhaustion { folds: 64, .. })
        ));
    }

    #[test]
    fn stack_overflow_and_underflow() {
        let mut stack = FoldStack::new(2).unwrap();
        assert_eq!(stack.pop(), Err(InvariantViolation::StackUnderflow));
        stack.push(1).unwrap();
        stack.push(2).unwrap();
        assert_eq!(
            stack.push(3),
            Err(InvariantViolation::StackOverflow { capacity: 2 })
        );
        assert_eq!(stack.iter_from_top().copied().collect_vec(), vec![2, 1]);
        assert_eq!(stack.pop(), Ok(2));
        assert_eq!(stack.pop(), Ok(1));
        assert_eq!(
            FoldError::from(stack.pop().unwrap_err()),
            FoldError::Invariant(InvariantViolation::StackUnderflow)
        );
    }

    #[test]
    fn array_state_after_each_fold() {
        let k = 6;
        let mut sim = ArrayFoldSimulator::new(folds(k)).unwrap();
        assert_eq!(sim.stack().capacity(), 32);
        assert!(sim.strip().iter().copied().eq(1..=64u64));
        for t in 1..=k {
            assert!(sim.fold_once().unwrap());
            assert_eq!(sim.folds_done(), t);
            assert!(sim.stack().is_empty());
            assert!(assertions::is_permutation(sim.strip()));
            assert_eq!(sim.strip()[0], 1);
        }
        assert!(!sim.fold_once().unwrap());
        assert_eq!(sim.folds_done(), k);
    }

    #[test]
    fn linked_columns_after_each_fold() {
        let k = 6;
        let mut sim = LinkedFoldSimulator::new(folds(k)).unwrap();
        for t in 1..=k {
            assert!(sim.fold_once().unwrap());
            assert_eq!(sim.n_columns(), 64 >> t);
            assert!(assertions::layers_are_linked(sim.layers()));

            let mut labels = vec![];
            for col in 1..=sim.n_columns() {
                let column = sim.column(col);
                assert_eq!(column.len(), 1 << t, "column {} after fold {}", col, t);
                assert_eq!(column[0], col as Label);
                labels.extend(column);
            }
            labels.sort_unstable();
            assert!(labels.iter().copied().eq(1..=64u64));
        }
        assert!(!sim.fold_once().unwrap());
        assert_eq!(sim.into_order().labels()[0], 1);
    }

    #[test]
    fn first_fold_pairs_mirror_columns() {
        let mut sim = LinkedFoldSimulator::new(folds(3)).unwrap();
        sim.fold_once().unwrap();
        assert_eq!(sim.column(1), vec![1, 8]);
        assert_eq!(sim.column(2), vec![2, 7]);
        assert_eq!(sim.column(4), vec![4, 5]);
        sim.fold_once().unwrap();
        // column 3 (6 on top of 3) lands upside down on column 2
        assert_eq!(sim.column(2), vec![2, 7, 6, 3]);
    }

    #[test]
    fn mismatch_is_located() {
        let a = FinalOrder::from_labels(vec![1, 4, 3, 2]).unwrap();
        let b = FinalOrder::from_labels(vec![1, 4, 2, 3]).unwrap();
        let c = FinalOrder::from_labels(vec![1, 2]).unwrap();
        assert_eq!(a.first_mismatch(&a), None);
        assert_eq!(a.first_mismatch(&b), Some(2));
        assert_eq!(c.first_mismatch(&a), Some(1));
    }

    #[test_case(vec![0, 1]; "label zero")]
    #[test_case(vec![1, 3]; "label beyond the strip")]
    #[test_case(vec![2, 2]; "duplicate label")]
    fn foreign_orders_must_be_permutations(labels: Vec<Label>) {
        let len = labels.len();
        assert_eq!(
            FinalOrder::from_labels(labels),
            Err(FoldError::Validation(ValidationError::NotAPermutation { len }))
        );
    }

    #[test]
    fn foreign_order_positions() {
        let order = FinalOrder::from_labels(vec![1, 4, 3, 2]).unwrap();
        assert_eq!(order.positions(ReadOrder::BottomUp), vec![1, 4, 3, 2]);
        assert_eq!(order.positions(ReadOrder::TopDown), vec![4, 1, 2, 3]);
    }

    #[test]
    fn label_position_table() {
        let order = Solver::Linked.run(folds(3)).unwrap();
        let table: Vec<(Label, u64)> = order.label_positions(ReadOrder::BottomUp).collect();
        assert_eq!(table.len(), 8);
        for (label, position) in table {
            assert_eq!(fold_position(label, folds(3)), Ok(position));
        }
        let last = order.label_positions(ReadOrder::TopDown).last().unwrap();
        assert_eq!(last, (8 as Label, 7));
    }
}

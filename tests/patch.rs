use quadpatch::prelude::*;
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Random loops with an even total, 3 to 6 sides
fn random_loops(count: usize) -> Vec<EdgeLoop> {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    (0..count)
        .map(|_| {
            let n = rng.random_range(3..=6);
            let mut values: Vec<usize> = (0..n).map(|_| rng.random_range(1..=7)).collect();
            if values.iter().sum::<usize>() % 2 == 1 {
                values[0] += 1;
            }
            EdgeLoop::try_new(values).unwrap()
        })
        .collect()
}

#[test]
fn permutations_restore_the_original_loop() {
    for edge_loop in random_loops(64) {
        let perms = permutations(&edge_loop);
        assert_eq!(perms.len(), 2 * edge_loop.arity());
        for p in perms {
            assert_eq!(p.restore(), edge_loop);
            for j in 0..edge_loop.arity() {
                assert_eq!(p.edge_loop()[j], edge_loop[p.original_index(j)]);
            }
        }
    }
}

#[test]
fn odd_totals_are_rejected() {
    for values in [vec![3, 3, 3], vec![2, 1, 1, 1], vec![1, 2, 2, 2, 2, 2]] {
        let patch = Patch::try_new(&values).unwrap();
        assert!(matches!(patch.validate(), Err(PatchError::InvalidLoop(_))));
        assert!(matches!(patch.solve(), Err(PatchError::InvalidLoop(_))));
    }
}

#[test]
fn every_reduction_step_shrinks_the_loop() {
    let options = ReductionOptions::default();
    for edge_loop in random_loops(64) {
        for strategy in [
            ReductionStrategy::MaxFirst,
            ReductionStrategy::MinFirst,
            ReductionStrategy::Padding,
        ] {
            let trace = reduce(&edge_loop, strategy, &options).unwrap();
            assert!(trace.iterations() <= options.max_iterations);

            let mut total = edge_loop.total();
            for step in trace.steps() {
                assert!(step.result.total() < total);
                assert!(step.result.iter().all(|&l| l >= 1));
                total = step.result.total();
            }

            if !trace.capped() {
                assert!(reducible(trace.reduced()).is_empty());
                // reducing a reduced loop changes nothing
                let again = reduce(trace.reduced(), strategy, &options).unwrap();
                assert_eq!(again.iterations(), 0);
                assert_eq!(again.reduced(), trace.reduced());
            }
        }
    }
}

#[test]
fn equilateral_triangle_classification() {
    let edge_loop = EdgeLoop::try_new(vec![4, 4, 4]).unwrap();
    let candidates = reducible(&edge_loop);
    assert_eq!(candidates.len(), 3);
    assert!(candidates.iter().all(|c| c.depth == 3));

    let c = classify(&edge_loop).unwrap();
    assert_ne!(c.pattern.index(), 0);
    assert_eq!(c.pattern.index(), 1);
    assert_eq!(c.x.map(|x| x.value()), Some(0.));
}

#[test]
fn solutions_respect_bounds_and_equalities() {
    for edge_loop in random_loops(24) {
        let patch = Patch::new(edge_loop);
        let solutions = match patch.solve() {
            Ok(solutions) => solutions,
            Err(e) => panic!("{} failed: {}", patch.edge_loop(), e),
        };
        for s in solutions {
            let l = s.permutation.edge_loop();
            for (k, &p) in s.solution.bridges().iter().enumerate() {
                assert!(p < l[l.prev(k)].min(l[l.next(k)]));
            }
            let system = ConstraintSystem::build(l, s.pattern).unwrap();
            assert!(system.is_satisfied_by(&s.solution));
            assert_eq!(
                s.solution.padding(),
                s.solution.bridges().iter().sum::<usize>()
            );
        }
    }
}

#[test]
fn square_grid_is_found() {
    // a 2x2 grid: pattern 0 on every orientation
    let solutions = Patch::try_new(&[2, 2, 2, 2]).unwrap().solve().unwrap();
    let grids = solutions
        .iter()
        .filter(|s| s.pattern.index() == 0)
        .collect::<Vec<_>>();
    assert_eq!(grids.len(), 8);
    assert!(grids.iter().all(|s| s.solution.padding() == 2));
}

#[test]
fn pentagon_solutions_start_on_the_long_side() {
    // every template needs at least two segments on side 0
    let solutions = Patch::try_new(&[1, 1, 2, 1, 1]).unwrap().solve().unwrap();
    assert!(!solutions.is_empty());
    assert!(solutions
        .iter()
        .all(|s| s.permutation.edge_loop()[0] == 2 && s.alpha_side() == 2));
}

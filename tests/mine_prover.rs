use minesweeper_sat::config::{Settings, Strategy};
use minesweeper_sat::minesweeper::{
    create_example_grids, grid_to_string, load_grid_from_file, parse_grid_from_string, save_grid_to_file,
};
use minesweeper_sat::sat::{Assignment, ConstraintEncoder, Evaluation, Successor};
use minesweeper_sat::{solve, solve_verified, CellState, Grid, MineFinder, SolveError, SolveOptions, Verdict};
use std::time::Duration;
use tempfile::tempdir;

fn grid(text: &str) -> Grid {
    parse_grid_from_string(text).unwrap()
}

/// Every strategy, with both successor models for best-first search
fn all_options(prove_safe: bool) -> Vec<SolveOptions> {
    let mut options = Vec::new();
    for strategy in [Strategy::Exhaustive, Strategy::Backtracking, Strategy::BestFirst, Strategy::Cadical] {
        let successors: &[Successor] = if strategy == Strategy::BestFirst {
            &[Successor::Extend, Successor::Flip]
        } else {
            &[Successor::Extend]
        };
        for &successor in successors {
            options.push(SolveOptions {
                strategy,
                successor,
                prove_safe,
                ..SolveOptions::default()
            });
        }
    }
    options
}

#[test]
fn test_saturated_center_flags_all_neighbors() {
    let solved = solve(&grid("_, _, _\n_, 8, _\n_, _, _\n")).unwrap();

    for row in 0..3 {
        for col in 0..3 {
            let expected = if (row, col) == (1, 1) {
                CellState::Revealed(8)
            } else {
                CellState::Flagged
            };
            assert_eq!(solved.get(row, col), Some(expected));
        }
    }
}

#[test]
fn test_revealed_zero_contributes_nothing() {
    let input = grid("0, _\n_, _\n");
    let mut encoder = ConstraintEncoder::for_grid(&input);
    let system = encoder.encode(&input);

    assert_eq!(system.clause_count(), 0);
    assert_eq!(system.variable_count(), 0);
    assert_eq!(solve(&input).unwrap(), input);
}

#[test]
fn test_single_mine_in_top_row() {
    let solved = solve(&grid("1, _, 1, 0\n1, 1, 1, 0\n0, 0, 0, 0\n")).unwrap();
    assert_eq!(solved.flagged_cells(), vec![(0, 1)]);
    assert_eq!(solved.unopened_count(), 0);
}

#[test]
fn test_strategies_agree_on_example_grids() {
    let cases = [
        "_, _, _\n_, 8, _\n_, _, _\n",
        "_, _, _\n1, 2, 1\n0, 0, 0\n",
        "_, _\n1, 1\n",
        "_, _, _, _\n1, 2, 2, 1\n0, 0, 0, 0\n",
        "_, _, _\nX, 2, _\n_, 1, _\n",
        "1, _, 1, _, 1\n",
    ];

    for case in cases {
        let input = grid(case);
        let reports: Vec<_> = all_options(true)
            .into_iter()
            .map(|options| MineFinder::new(options).analyze(&input).unwrap())
            .collect();

        for report in &reports[1..] {
            assert_eq!(report.verdicts, reports[0].verdicts, "strategy {} on {:?}", report.strategy, case);
            assert_eq!(report.grid, reports[0].grid);
        }
    }
}

#[test]
fn test_one_two_one_pattern() {
    let input = grid("_, _, _\n1, 2, 1\n0, 0, 0\n");
    for options in all_options(true) {
        let report = MineFinder::new(options).analyze(&input).unwrap();
        assert_eq!(report.mines(), vec![(0, 0), (0, 2)]);
        assert_eq!(report.safe_cells(), vec![(0, 1)]);
        // Safe cells stay unopened in the grid
        assert_eq!(report.grid.get(0, 1), Some(CellState::Unopened));
    }
}

#[test]
fn test_ambiguous_grid_proves_nothing() {
    let input = grid("_, _\n1, 1\n");
    let report = MineFinder::new(SolveOptions {
        prove_safe: true,
        ..SolveOptions::default()
    })
    .analyze(&input)
    .unwrap();

    assert_eq!(report.count(Verdict::Unknown), 2);
    assert_eq!(report.grid, input);
}

#[test]
fn test_resolving_is_idempotent() {
    for case in ["_, _, _\n1, 2, 1\n0, 0, 0\n", "_, _, _, _\n1, 2, 2, 1\n0, 0, 0, 0\n"] {
        let once = solve(&grid(case)).unwrap();
        let twice = solve(&once).unwrap();
        assert_eq!(once, twice);
    }
}

#[test]
fn test_infeasible_clue_is_unsatisfiable() {
    // Three flagged neighbours already exceed the clue
    let input = grid("X, X\nX, 2\n");
    assert_eq!(solve(&input).unwrap_err(), SolveError::UnsatisfiableGrid);
    assert_eq!(solve_verified(&input, true).unwrap_err(), SolveError::UnsatisfiableGrid);
}

#[test]
fn test_feasibility_check_every_strategy() {
    let input = grid("1, _, 1, _, 1\n");
    for options in all_options(false) {
        let options = SolveOptions {
            verify_feasible: true,
            ..options
        };
        let err = MineFinder::new(options).analyze(&input).unwrap_err();
        assert_eq!(err, SolveError::UnsatisfiableGrid);
        assert!(err.is_fatal());
    }
}

#[test]
fn test_expired_deadline_reports_timeouts() {
    let input = grid("_, _, _\n1, 2, 1\n0, 0, 0\n");
    for options in all_options(false) {
        let options = SolveOptions {
            timeout: Some(Duration::ZERO),
            ..options
        };
        let report = MineFinder::new(options).analyze(&input).unwrap();
        assert_eq!(report.count(Verdict::TimedOut), 3);
        assert!(report.warnings.contains(&SolveError::SearchTimeout { variable: Some(1) }));
        assert_eq!(report.grid, input);
    }
}

#[test]
fn test_undetermined_count_never_increases() {
    let input = grid("_, _, _, _\n1, 2, 2, 1\n0, 0, 0, 0\n");
    let system = ConstraintEncoder::for_grid(&input).encode(&input);

    // Extend along the only model, one variable at a time
    let model = [false, true, true, false];
    let mut assignment = Assignment::new();
    let mut previous = system.evaluate(&assignment).heuristic().unwrap();

    for (var, &value) in system.variables().iter().zip(model.iter()) {
        assignment.assign(var, value);
        let evaluation = system.evaluate(&assignment);
        let current = evaluation.heuristic().unwrap();
        assert!(current <= previous);
        previous = current;
    }
    assert_eq!(system.evaluate(&assignment), Evaluation::Satisfied);
}

#[test]
fn test_invalid_symbol_is_reported() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("bad.txt");
    std::fs::write(&path, "1, _\n?, 0\n").unwrap();

    let err = load_grid_from_file(&path).unwrap_err();
    assert_eq!(
        err.downcast_ref::<SolveError>(),
        Some(&SolveError::InvalidInputSymbol {
            symbol: "?".to_string(),
            row: 1,
            column: 0
        })
    );
}

#[test]
fn test_solve_example_files_end_to_end() {
    let temp_dir = tempdir().unwrap();
    create_example_grids(temp_dir.path()).unwrap();

    let mut settings = Settings::default();
    settings.input.grid_file = temp_dir.path().join("saturated.txt");
    settings.solver.strategy = Strategy::Cadical;
    settings.validate().unwrap();

    let report = minesweeper_sat::solve_with_settings(&settings).unwrap();
    assert_eq!(report.count(Verdict::Mine), 8);

    let output = temp_dir.path().join("solved.txt");
    save_grid_to_file(&report.grid, &output).unwrap();
    let reloaded = load_grid_from_file(&output).unwrap();
    assert_eq!(reloaded, report.grid);
    assert!(grid_to_string(&reloaded).contains('X'));
}

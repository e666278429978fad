use grid_search::algorithms::{
    AStar, Dfo, DfoConfig, Heuristic, PathfindingAlgorithm, SearchOutcome,
};
use grid_search::statistics::SearchStats;
use grid_search::{find_path, search, Grid, Position};
use pathfinding::prelude::bfs;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

fn make_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

fn random_walkable(grid: &Grid, rng: &mut ChaCha8Rng) -> Option<Position> {
    (0..100)
        .map(|_| {
            Position::new(
                rng.gen_range(0..grid.height() as i32),
                rng.gen_range(0..grid.width() as i32),
            )
        })
        .find(|&p| grid.is_walkable(p))
}

fn bfs_steps(grid: &Grid, start: Position, goal: Position) -> Option<usize> {
    bfs(&start, |p| grid.neighbors(*p).collect::<Vec<_>>(), |p| *p == goal).map(|p| p.len() - 1)
}

fn assert_valid_path(grid: &Grid, path: &[Position], start: Position, goal: Position) {
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&goal));
    for p in path {
        assert!(grid.is_walkable(*p), "{} on path is not walkable", p);
    }
    for w in path.windows(2) {
        assert!(w[0].is_adjacent(&w[1]), "{} -> {} is not a single step", w[0], w[1]);
    }
}

#[test]
fn test_a_star_paths_are_valid_on_random_grids() {
    let mut rng = make_rng(42);
    for _ in 0..200 {
        let grid = Grid::random(8, 8, 20, &[], &mut rng);
        let start = random_walkable(&grid, &mut rng);
        let goal = random_walkable(&grid, &mut rng);
        let (Some(start), Some(goal)) = (start, goal) else {
            continue;
        };

        for heuristic in [Heuristic::SquaredEuclidean, Heuristic::Chebyshev] {
            let found = AStar::with_heuristic(heuristic).search(&grid, start, goal);
            let reference = bfs_steps(&grid, start, goal);
            assert_eq!(found.is_some(), reference.is_some());
            if let Some(path) = found {
                assert_valid_path(&grid, &path, start, goal);
            }
        }
    }
}

#[test]
fn test_chebyshev_a_star_matches_bfs_step_count() {
    let mut rng = make_rng(7);
    for _ in 0..200 {
        let grid = Grid::random(7, 9, 18, &[], &mut rng);
        let start = random_walkable(&grid, &mut rng);
        let goal = random_walkable(&grid, &mut rng);
        let (Some(start), Some(goal)) = (start, goal) else {
            continue;
        };

        let steps = AStar::with_heuristic(Heuristic::Chebyshev)
            .search(&grid, start, goal)
            .map(|p| p.len() - 1);
        assert_eq!(steps, bfs_steps(&grid, start, goal));
    }
}

#[test]
fn test_demo_example_route() {
    let grid = Grid::demo();
    let start = Position::new(0, 0);
    let goal = Position::new(7, 6);

    let path = find_path(&grid, start, goal).unwrap();
    assert_valid_path(&grid, &path, start, goal);
    assert!(path
        .iter()
        .any(|p| *p == Position::new(5, 4) || *p == Position::new(9, 4)));
    assert!(path.iter().all(|p| grid.is_walkable(*p)));
}

#[test]
fn test_enclosed_goal_returns_none() {
    let grid: Grid = "\
......
.####.
.#..#.
.####.
......"
        .parse()
        .unwrap();
    assert_eq!(find_path(&grid, Position::new(0, 0), Position::new(2, 2)), None);
}

#[test]
fn test_start_equals_goal_is_single_element() {
    let grid = Grid::demo();
    let p = Position::new(9, 9);
    assert_eq!(find_path(&grid, p, p), Some(vec![p]));
}

#[test]
fn test_dfo_same_seed_same_outcome() {
    let grid = Grid::demo();
    let goal = Position::new(7, 6);
    let config = DfoConfig {
        max_iterations: 1000,
        ..DfoConfig::default()
    };

    for seed in 0..20 {
        let first = search(&grid, goal, &config, &mut make_rng(seed)).unwrap();
        let second = search(&grid, goal, &config, &mut make_rng(seed)).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_dfo_found_always_means_goal() {
    let grid = Grid::demo();
    let goal = Position::new(7, 6);
    let config = DfoConfig {
        disturbance_threshold: 0.2,
        max_iterations: 300,
        ..DfoConfig::default()
    };

    for seed in 0..30 {
        let mut dfo = Dfo::new(config.clone(), make_rng(seed)).unwrap();
        match dfo.search(&grid, goal) {
            SearchOutcome::Found(fly) => {
                assert_eq!(fly.position, goal);
                assert_eq!(fly.history.last(), Some(&goal));
                assert!(fly.history.iter().all(|p| grid.in_bounds(*p)));
            }
            SearchOutcome::NotFound => assert!(!dfo.stats().succeeded()),
        }
    }
}

#[test]
fn test_dfo_unreachable_goal_is_not_found() {
    let grid = Grid::demo();
    let mut dfo = Dfo::seeded(DfoConfig::default(), 3).unwrap();
    assert_eq!(dfo.search(&grid, Position::new(0, 4)), SearchOutcome::NotFound);
    assert_eq!(dfo.find_path(&grid, Position::new(0, 0), Position::new(-1, 3)), None);
}

#[test]
fn test_dfo_runs_out_of_iterations_on_large_grid() {
    let grid = Grid::open(60, 60);
    let goal = Position::new(59, 0);
    let config = DfoConfig {
        max_iterations: 50,
        ..DfoConfig::default()
    };

    let mut misses = 0;
    for seed in 0..50 {
        let mut dfo = Dfo::new(config.clone(), make_rng(seed)).unwrap();
        let outcome = dfo.search(&grid, goal);
        match (&outcome, dfo.stats()) {
            (SearchOutcome::NotFound, SearchStats::Dfo { iterations, found, .. }) => {
                assert_eq!(iterations, 50);
                assert!(!found);
                misses += 1;
            }
            (SearchOutcome::Found(fly), SearchStats::Dfo { iterations, found, .. }) => {
                assert_eq!(fly.position, goal);
                assert!(iterations <= 50);
                assert!(found);
            }
            (_, other) => panic!("unexpected stats {other:?}"),
        }
    }
    assert!(misses > 0);
}

#[test]
fn test_dfo_obstacle_retry_on_mostly_blocked_grid() {
    let grid: Grid = "###\n#.#\n###".parse().unwrap();
    let goal = Position::new(1, 1);

    // Generous budget: every committed position after the spawn is walkable.
    let generous = DfoConfig {
        retry_limit: 10_000,
        ..DfoConfig::default()
    };
    let mut total_redraws = 0;
    for seed in 0..40 {
        let mut dfo = Dfo::new(generous.clone(), make_rng(seed)).unwrap();
        let outcome = dfo.search(&grid, goal);
        let fly = outcome.fly().expect("the only free cell is the goal");
        assert!(fly.history[1..].iter().all(|p| grid.is_walkable(*p)));
        if let SearchStats::Dfo { redraws, .. } = dfo.stats() {
            total_redraws += redraws;
        }
    }
    assert!(total_redraws > 0);

    // No budget: flies may sit on blocked cells between moves.
    let none = DfoConfig {
        retry_limit: 0,
        disturbance_threshold: 1.0,
        max_iterations: 200,
        ..DfoConfig::default()
    };
    let mut kept_blocked = false;
    for seed in 0..40 {
        let mut dfo = Dfo::new(none.clone(), make_rng(seed)).unwrap();
        if let SearchOutcome::Found(fly) = dfo.search(&grid, goal) {
            assert_eq!(fly.history.last(), Some(&goal));
            kept_blocked |= fly.history[1..].iter().any(|p| !grid.is_walkable(*p));
        }
        assert!(matches!(dfo.stats(), SearchStats::Dfo { redraws: 0, .. }));
    }
    assert!(kept_blocked);
}

#[test]
fn test_engines_are_interchangeable() {
    let grid = Grid::open(1, 1);
    let p = Position::new(0, 0);
    let mut engines: Vec<Box<dyn PathfindingAlgorithm>> = vec![
        Box::new(AStar::new()),
        Box::new(Dfo::seeded(DfoConfig::default(), 0).unwrap()),
    ];
    for engine in engines.iter_mut() {
        assert_eq!(engine.find_path(&grid, p, p), Some(vec![p]), "{}", engine.name());
        assert!(engine.stats().succeeded());
    }
}

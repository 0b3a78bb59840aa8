use pathfinding_visualizer::{
    shortest_hops, Algorithm, CellState, ControllerState, Coord, Grid, Scenario, SearchController,
    SearchEvent, SearchReport, SearchResult,
};
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn controller_for(grid: Grid) -> (SearchController, Receiver<SearchEvent>) {
    let (tx, rx) = mpsc::channel();
    let controller = SearchController::new(Arc::new(grid), tx);
    controller.set_delay(Duration::ZERO);
    (controller, rx)
}

fn run_to_end(algorithm: Algorithm, grid: Grid) -> (SearchReport, Vec<SearchEvent>, Arc<Grid>) {
    let (mut controller, rx) = controller_for(grid);
    controller.start_search(algorithm).unwrap();
    let report = controller.wait().unwrap();
    let grid = Arc::clone(controller.grid());
    (report, rx.try_iter().collect(), grid)
}

fn open_grid(rows: usize, cols: usize) -> Grid {
    let grid = Grid::new(rows, cols);
    grid.set_state(0, 0, CellState::Start).unwrap();
    grid.set_state(rows - 1, cols - 1, CellState::End).unwrap();
    grid
}

fn checked_in(events: &[SearchEvent]) -> Vec<Coord> {
    events
        .iter()
        .filter_map(|event| match *event {
            SearchEvent::CellUpdated {
                coord,
                state: CellState::Checked,
            } => Some(coord),
            _ => None,
        })
        .collect()
}

fn path_of(report: &SearchReport) -> &[Coord] {
    match &report.result {
        SearchResult::PathFound(path) => path,
        other => panic!("{} ended with {:?}", report.algorithm, other),
    }
}

fn assert_walkable(grid: &Grid, path: &[Coord]) {
    let (start, end) = grid.find_start_and_end().unwrap();
    assert_eq!(path.first(), Some(&start));
    assert_eq!(path.last(), Some(&end));
    for pair in path.windows(2) {
        assert!(pair[0].is_adjacent(pair[1]), "{} -> {}", pair[0], pair[1]);
    }
    for &pos in path {
        assert_ne!(grid.state(pos), CellState::Obstacle);
    }
}

#[test]
fn optimal_searches_match_manhattan_distance_on_an_open_grid() {
    for algorithm in [
        Algorithm::BreadthFirst,
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::JumpPoint,
        Algorithm::Bidirectional,
    ] {
        let (report, _, grid) = run_to_end(algorithm, open_grid(6, 9));
        assert_eq!(report.hops(), Some(13), "{}", algorithm);
        assert_walkable(&grid, path_of(&report));
    }
}

#[test]
fn path_events_follow_the_route_from_start_to_end() {
    let (report, events, _) = run_to_end(Algorithm::AStar, open_grid(4, 4));
    let path = path_of(&report);
    let painted: Vec<Coord> = events
        .iter()
        .filter_map(|event| match *event {
            SearchEvent::CellUpdated {
                coord,
                state: CellState::Path,
            } => Some(coord),
            _ => None,
        })
        .collect();
    assert_eq!(painted, path[1..path.len() - 1].to_vec());
}

#[test]
fn optimal_searches_agree_with_reference_on_random_layouts() {
    for seed in 0..12 {
        let scenario = Scenario::generate(12, 20, 70, Some(seed)).unwrap();
        let expected = shortest_hops(&scenario.create_grid());
        for algorithm in Algorithm::ALL.into_iter().filter(|a| a.is_optimal()) {
            let (report, _, grid) = run_to_end(algorithm, scenario.create_grid());
            assert_eq!(report.hops(), expected, "{} on seed {}", algorithm, seed);
            if expected.is_some() {
                assert_walkable(&grid, path_of(&report));
            }
        }
    }
}

#[test]
fn non_optimal_searches_still_produce_walkable_routes() {
    for seed in 0..8 {
        let scenario = Scenario::generate(10, 14, 35, Some(seed)).unwrap();
        let reachable = shortest_hops(&scenario.create_grid());
        for algorithm in [
            Algorithm::DepthFirst,
            Algorithm::GreedyBestFirst,
            Algorithm::Bidirectional,
        ] {
            let (report, _, grid) = run_to_end(algorithm, scenario.create_grid());
            match reachable {
                Some(optimal) => {
                    let path = path_of(&report);
                    assert_walkable(&grid, path);
                    assert!(path.len() - 1 >= optimal);
                }
                None => assert_eq!(report.result, SearchResult::NoPath),
            }
        }
    }
}

#[test]
fn jump_point_checks_fewer_cells_than_breadth_first_on_open_ground() {
    let (bfs, bfs_events, _) = run_to_end(Algorithm::BreadthFirst, open_grid(12, 12));
    let (jps, jps_events, _) = run_to_end(Algorithm::JumpPoint, open_grid(12, 12));
    assert_eq!(bfs.hops(), jps.hops());
    assert!(jps.checked < bfs.checked);
    let bfs_checked = checked_in(&bfs_events);
    for cell in checked_in(&jps_events) {
        assert!(bfs_checked.contains(&cell), "{} not checked by bfs", cell);
    }
}

#[test]
fn enclosed_start_yields_no_path_for_every_algorithm() {
    let layout = "
        .....
        .###.
        .#S#.
        .###.
        ....E
    ";
    for algorithm in Algorithm::ALL {
        let (report, events, grid) = run_to_end(algorithm, Grid::from_ascii(layout).unwrap());
        assert_eq!(report.result, SearchResult::NoPath, "{}", algorithm);
        assert_eq!(events.last(), Some(&SearchEvent::NoPathFound));
        assert_eq!(
            events
                .iter()
                .filter(|e| **e == SearchEvent::NoPathFound)
                .count(),
            1
        );
        assert_eq!(grid.count(CellState::Path), 0, "{}", algorithm);
    }
}

#[test]
fn small_layouts_from_the_walkthrough() {
    let (report, _, _) = run_to_end(Algorithm::BreadthFirst, open_grid(5, 5));
    assert_eq!(report.hops(), Some(8));

    let walled = Grid::from_ascii("S..\n###\n..E").unwrap();
    let (report, events, _) = run_to_end(Algorithm::AStar, walled);
    assert_eq!(report.result, SearchResult::NoPath);
    assert_eq!(events.last(), Some(&SearchEvent::NoPathFound));

    let gap = Grid::from_ascii("S..\n#.#\n..E").unwrap();
    let (report, _, _) = run_to_end(Algorithm::Dijkstra, gap);
    assert_eq!(
        path_of(&report),
        [
            Coord::new(0, 0),
            Coord::new(0, 1),
            Coord::new(1, 1),
            Coord::new(2, 1),
            Coord::new(2, 2)
        ]
    );
}

#[test]
fn stopping_an_idle_controller_does_nothing() {
    let (mut controller, rx) = controller_for(open_grid(3, 3));
    assert!(controller.stop_search().is_none());
    assert_eq!(controller.state(), ControllerState::Idle);
    assert!(rx.try_recv().is_err());
}

#[test]
fn stop_is_prompt_and_silences_the_worker() {
    let (mut controller, rx) = controller_for(open_grid(40, 40));
    controller.set_delay(Duration::from_millis(5));
    controller.start_search(Algorithm::BreadthFirst).unwrap();
    thread::sleep(Duration::from_millis(40));

    let asked = Instant::now();
    let report = controller.stop_search().unwrap();
    assert!(asked.elapsed() < Duration::from_secs(1));
    assert_eq!(report.result, SearchResult::Cancelled);
    assert_eq!(controller.state(), ControllerState::Cancelled);

    let seen: Vec<_> = rx.try_iter().collect();
    assert!(!seen.contains(&SearchEvent::NoPathFound));
    thread::sleep(Duration::from_millis(20));
    assert!(rx.try_recv().is_err());
    assert_eq!(controller.grid().count(CellState::Path), 0);
}

#[test]
fn speed_changes_apply_to_a_running_search() {
    let (mut controller, rx) = controller_for(open_grid(30, 30));
    controller.set_delay(Duration::from_millis(200));
    controller.start_search(Algorithm::DepthFirst).unwrap();
    assert!(controller.is_running());

    controller.set_speed(1_000_000.0).unwrap();
    assert!(controller.set_speed(0.0).is_err());
    let started = Instant::now();
    let report = controller.wait().unwrap();
    // Hundreds of steps at the old 200 ms delay would take well over a minute.
    assert!(started.elapsed() < Duration::from_secs(5));
    assert!(report.hops().is_some());
    assert!(rx.try_iter().count() > 0);
    assert_eq!(controller.state(), ControllerState::Completed);
}

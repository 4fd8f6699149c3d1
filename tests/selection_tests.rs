//! Selection tests - chain building, backtracking and commit rules

use chain_pop::core::{GridConfig, GridModel, SelectionController, SelectionOutcome};
use chain_pop::events::{EventBus, GameEvent};
use chain_pop::types::{ElementColor, GridPos, Pointer};

fn checkered_grid() -> GridModel {
    // Alternating red/blue columns: horizontal neighbors always differ,
    // so same-color chains have to run vertically.
    let config = GridConfig::default();
    let mut colors = Vec::with_capacity(64);
    for _ in 0..8 {
        for x in 0..8 {
            colors.push(if x % 2 == 0 {
                ElementColor::Red
            } else {
                ElementColor::Blue
            });
        }
    }
    GridModel::with_colors(&config, &colors).unwrap()
}

fn diagonal_grid() -> GridModel {
    // Colors alternate by (x + y) parity: every orthogonal neighbor
    // differs, every diagonal neighbor matches.
    let config = GridConfig::default();
    let mut colors = Vec::with_capacity(64);
    for y in 0..8 {
        for x in 0..8 {
            colors.push(if (x + y) % 2 == 0 {
                ElementColor::Red
            } else {
                ElementColor::Blue
            });
        }
    }
    GridModel::with_colors(&config, &colors).unwrap()
}

fn uniform_grid() -> GridModel {
    let config = GridConfig::default();
    GridModel::with_colors(&config, &[ElementColor::Green; 64]).unwrap()
}

fn touch(grid: &GridModel, x: i32, y: i32) -> Pointer {
    Pointer::Down(grid.grid_to_world(GridPos::new(x, y)))
}

#[test]
fn test_chain_walks_and_commits_across_the_board() {
    let grid = uniform_grid();
    let mut events = EventBus::new();
    let mut sel = SelectionController::new();

    let path = [(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)];
    for &(x, y) in &path {
        sel.handle_pointer(touch(&grid, x, y), &grid, &mut events);
    }
    assert_eq!(sel.len(), 5);

    let outcome = sel.handle_pointer(Pointer::Up, &grid, &mut events);
    match outcome {
        SelectionOutcome::Committed(chain) => assert_eq!(chain.len(), 5),
        other => panic!("expected commit, got {:?}", other),
    }
    assert!(sel.is_empty());
}

#[test]
fn test_vertical_chain_on_checkered_board() {
    // Horizontal neighbors differ in color, so the only straight chains
    // run vertically.
    let grid = checkered_grid();
    let mut events = EventBus::new();
    let mut sel = SelectionController::new();

    sel.handle_pointer(touch(&grid, 2, 0), &grid, &mut events);
    sel.handle_pointer(touch(&grid, 3, 0), &grid, &mut events); // blue, rejected
    sel.handle_pointer(touch(&grid, 2, 1), &grid, &mut events);
    sel.handle_pointer(touch(&grid, 2, 2), &grid, &mut events);
    assert_eq!(sel.len(), 3);
    assert_eq!(sel.anchor(), Some(ElementColor::Red));
}

#[test]
fn test_diagonal_hops_stay_within_reach_and_color() {
    // On the parity board a chain can only grow diagonally: orthogonal
    // steps change color, and sqrt(2) is still inside the 1.5 reach.
    let grid = diagonal_grid();
    let mut events = EventBus::new();
    let mut sel = SelectionController::new();

    sel.handle_pointer(touch(&grid, 2, 2), &grid, &mut events);
    sel.handle_pointer(touch(&grid, 2, 3), &grid, &mut events); // blue, rejected
    sel.handle_pointer(touch(&grid, 3, 3), &grid, &mut events);
    sel.handle_pointer(touch(&grid, 4, 4), &grid, &mut events);
    assert_eq!(sel.len(), 3);
    assert_eq!(sel.anchor(), Some(ElementColor::Red));

    let outcome = sel.handle_pointer(Pointer::Up, &grid, &mut events);
    assert!(matches!(outcome, SelectionOutcome::Committed(_)));
}

#[test]
fn test_two_then_backtrack_leaves_one_and_still_selecting() {
    let grid = uniform_grid();
    let mut events = EventBus::new();
    let mut sel = SelectionController::new();

    sel.handle_pointer(touch(&grid, 4, 4), &grid, &mut events);
    sel.handle_pointer(touch(&grid, 5, 4), &grid, &mut events);
    assert_eq!(sel.len(), 2);

    // Re-touching the first element (the second-to-last) pops the head
    // and the chain stays open.
    let outcome = sel.handle_pointer(touch(&grid, 4, 4), &grid, &mut events);
    assert_eq!(outcome, SelectionOutcome::Pending);
    assert_eq!(sel.len(), 1);
    assert_eq!(sel.anchor(), Some(ElementColor::Green));

    // The chain can be rebuilt and committed after the backtrack.
    sel.handle_pointer(touch(&grid, 3, 4), &grid, &mut events);
    sel.handle_pointer(touch(&grid, 2, 4), &grid, &mut events);
    let outcome = sel.handle_pointer(Pointer::Up, &grid, &mut events);
    assert!(matches!(outcome, SelectionOutcome::Committed(_)));
}

#[test]
fn test_backtrack_chain_all_the_way_down() {
    let grid = uniform_grid();
    let mut events = EventBus::new();
    let mut sel = SelectionController::new();

    for x in 0..5 {
        sel.handle_pointer(touch(&grid, x, 0), &grid, &mut events);
    }
    assert_eq!(sel.len(), 5);

    // Walk backwards: each time, touch the current second-to-last.
    for expected in (1..5).rev() {
        let second_to_last = expected - 1;
        sel.handle_pointer(touch(&grid, second_to_last, 0), &grid, &mut events);
        assert_eq!(sel.len(), expected as usize);
    }
    // One element left; the backtrack rule can no longer trigger.
    sel.handle_pointer(touch(&grid, 0, 0), &grid, &mut events);
    assert_eq!(sel.len(), 1);
}

#[test]
fn test_selection_event_counts_trace_the_chain() {
    let grid = uniform_grid();
    let mut events = EventBus::new();
    let rx = events.subscribe();
    let mut sel = SelectionController::new();

    sel.handle_pointer(touch(&grid, 1, 1), &grid, &mut events);
    sel.handle_pointer(touch(&grid, 2, 1), &grid, &mut events);
    sel.handle_pointer(touch(&grid, 1, 1), &grid, &mut events); // pop
    sel.handle_pointer(touch(&grid, 2, 2), &grid, &mut events);
    sel.handle_pointer(touch(&grid, 3, 3), &grid, &mut events);
    sel.handle_pointer(Pointer::Up, &grid, &mut events); // commit, clears

    let counts: Vec<usize> = rx
        .try_iter()
        .map(|event| match event {
            GameEvent::SelectionChanged { count } => count,
            other => panic!("unexpected event {:?}", other),
        })
        .collect();
    assert_eq!(counts, vec![1, 2, 1, 2, 3, 0]);
}

#[test]
fn test_release_below_minimum_cancels() {
    let grid = uniform_grid();
    let mut events = EventBus::new();
    let mut sel = SelectionController::new();

    sel.handle_pointer(touch(&grid, 0, 7), &grid, &mut events);
    sel.handle_pointer(touch(&grid, 1, 7), &grid, &mut events);
    let outcome = sel.handle_pointer(Pointer::Up, &grid, &mut events);

    assert_eq!(outcome, SelectionOutcome::Cancelled);
    assert!(sel.is_empty());
    assert_eq!(sel.anchor(), None);
}

#[test]
fn test_touches_just_past_the_grid_edge_are_ignored() {
    let grid = uniform_grid();
    let mut events = EventBus::new();
    let mut sel = SelectionController::new();

    // Slightly beyond the last column's half-size box.
    let corner = grid.grid_to_world(GridPos::new(7, 7));
    let outside = chain_pop::types::Vec2::new(corner.x + 0.6, corner.y);

    sel.handle_pointer(Pointer::Down(outside), &grid, &mut events);
    assert!(sel.is_empty());
}

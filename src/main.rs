//! Self-playing session runner (default binary).
//!
//! Generates a seeded board, then plays greedy chains until the move
//! budget runs out, printing the outbound event stream along the way.
//! The same seed always replays the same session.

use anyhow::{Context, Result};

use chain_pop::config::{self, GameConfig, Tunables};
use chain_pop::core::{
    default_rules, EffectRegistry, GridConfig, GridModel, PowerUpResolver, TurnEngine,
};
use chain_pop::events::GameEvent;
use chain_pop::types::{GamePhase, GridPos, Pointer, TICK_SECONDS};
use chain_pop::{highscore, ConfigError, ElementColor};

fn main() -> Result<()> {
    let seed = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<u32>().context("seed must be an integer")?,
        None => 1,
    };

    let tunables = load_tunables()?;
    let game = GameConfig {
        moves_available: 20,
        power_ups_enabled: true,
    };
    let powerups = PowerUpResolver::new(default_rules(), &EffectRegistry::with_defaults())
        .context("power-up rule table failed to bind")?;
    let mut engine = TurnEngine::new(&GridConfig::default(), game, &tunables, powerups, seed);
    let events = engine.subscribe();

    println!("seed {}, {} moves", seed, engine.moves_available());
    print!("{}", render_grid(engine.grid()));

    let mut turn = 0u32;
    while !engine.is_over() {
        let Some(chain) = find_chain(engine.grid()) else {
            println!("no playable chain left");
            break;
        };
        turn += 1;
        println!(
            "turn {}: chain of {} starting at ({}, {})",
            turn,
            chain.len(),
            chain[0].x,
            chain[0].y
        );

        for pos in &chain {
            let world = engine.grid().grid_to_world(*pos);
            engine.advance(TICK_SECONDS, Pointer::Down(world));
        }
        engine.advance(TICK_SECONDS, Pointer::Up);
        run_to_rest(&mut engine);

        // Echo the landing report a score-popup collaborator would send;
        // try_iter picks the forwarded event up in the same drain.
        for event in events.try_iter() {
            println!("  {}", describe(&event));
            if matches!(event, GameEvent::ScoreAnimationRequested { .. }) {
                engine.report_score_reached_counter();
            }
        }
    }

    println!(
        "session over: score {}, moves left {}",
        engine.score(),
        engine.moves_available()
    );
    print!("{}", render_grid(engine.grid()));

    match highscore::record_highscore(engine.score()) {
        Ok(true) => println!("new high score: {}", engine.score()),
        Ok(false) => println!("high score remains {}", highscore::load_highscore()),
        Err(err) => eprintln!("could not save high score: {}", err),
    }
    Ok(())
}

/// Loads the tunables file, seeding it with defaults on first run.
fn load_tunables() -> Result<Tunables> {
    let path = config::config_path()?;
    match Tunables::try_load(&path) {
        Ok(tunables) => Ok(tunables),
        Err(ConfigError::Malformed(err)) => {
            eprintln!(
                "tunables at {} are malformed ({}); using defaults",
                path.display(),
                err
            );
            Ok(Tunables::default())
        }
        Err(_) => {
            let defaults = Tunables::default();
            if let Err(err) = defaults.save(&path) {
                eprintln!("could not write default tunables: {}", err);
            }
            Ok(defaults)
        }
    }
}

/// Ticks the engine with no input until the current turn has resolved.
fn run_to_rest(engine: &mut TurnEngine) {
    let mut guard = 0u32;
    while matches!(
        engine.phase(),
        GamePhase::Resolving | GamePhase::Cascading
    ) {
        engine.advance(TICK_SECONDS, Pointer::Up);
        guard += 1;
        if guard > 100_000 {
            eprintln!("turn did not settle, aborting");
            break;
        }
    }
}

/// Finds any valid chain of `match_minimum` same-colored reachable cells.
fn find_chain(grid: &GridModel) -> Option<Vec<GridPos>> {
    let want = grid.match_minimum();
    for y in 0..grid.rows() as i32 {
        for x in 0..grid.columns() as i32 {
            let Some(element) = grid.get(x, y) else {
                continue;
            };
            if !element.is_spawned() {
                continue;
            }
            let mut path = vec![GridPos::new(x, y)];
            if extend_chain(grid, element.color(), &mut path, want) {
                grow_chain(grid, element.color(), &mut path, want.max(6));
                return Some(path);
            }
        }
    }
    None
}

/// Depth-first path extension over the 8-neighborhood (all within reach).
fn extend_chain(grid: &GridModel, color: ElementColor, path: &mut Vec<GridPos>, want: usize) -> bool {
    if path.len() >= want {
        return true;
    }
    let Some(&last) = path.last() else {
        return false;
    };
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let next = GridPos::new(last.x + dx, last.y + dy);
            if path.contains(&next) {
                continue;
            }
            let Some(element) = grid.get(next.x, next.y) else {
                continue;
            };
            if !element.is_spawned() || element.color() != color {
                continue;
            }
            path.push(next);
            if extend_chain(grid, color, path, want) {
                return true;
            }
            path.pop();
        }
    }
    false
}

/// Greedily lengthens a found chain toward the power-up thresholds.
fn grow_chain(grid: &GridModel, color: ElementColor, path: &mut Vec<GridPos>, cap: usize) {
    'grow: while path.len() < cap {
        let Some(&last) = path.last() else {
            return;
        };
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let next = GridPos::new(last.x + dx, last.y + dy);
                if path.contains(&next) {
                    continue;
                }
                let Some(element) = grid.get(next.x, next.y) else {
                    continue;
                };
                if element.is_spawned() && element.color() == color {
                    path.push(next);
                    continue 'grow;
                }
            }
        }
        return;
    }
}

fn describe(event: &GameEvent) -> String {
    match event {
        GameEvent::SelectionChanged { count } => format!("selection size {}", count),
        GameEvent::ElementsDespawned { count } => format!("despawned {} elements", count),
        GameEvent::ScoreChanged { old, new } => format!("score {} -> {}", old, new),
        GameEvent::ScoreAnimationRequested { score, positions } => {
            format!("score popup +{} from {} cells", score, positions.len())
        }
        GameEvent::ScoreReachedCounter => "score popup landed".to_string(),
    }
}

/// Renders the board as one letter per element, top row first.
fn render_grid(grid: &GridModel) -> String {
    let mut out = String::new();
    for y in (0..grid.rows() as i32).rev() {
        for x in 0..grid.columns() as i32 {
            let letter = match grid.get(x, y) {
                Some(e) if e.is_spawned() => e
                    .color()
                    .as_str()
                    .chars()
                    .next()
                    .map(|c| c.to_ascii_uppercase())
                    .unwrap_or('?'),
                _ => '.',
            };
            out.push(letter);
            out.push(' ');
        }
        out.push('\n');
    }
    out
}

//! Per-turn orchestration: input, resolution, cascade, move budget.
//!
//! The engine advances one frame at a time. While resolving a committed
//! chain it works through a short queue of suspendable steps; each tick
//! advances the current step and at most one step transition happens per
//! tick. A normal match queues despawn then one cascade (stabilize,
//! respawn, stabilize); a power-up additionally stabilizes before the
//! cascade begins, since its effect owns the first gravity wait.

use arrayvec::ArrayVec;

use crate::config::{GameConfig, Tunables};
use crate::events::{EventBus, GameEvent};
use crate::types::{GamePhase, Pointer, Vec2};

use super::gravity::{has_falling_elements, GravityResolver};
use super::grid::{GridConfig, GridModel};
use super::powerup::PowerUpResolver;
use super::rng::SimpleRng;
use super::scoring::match_score;
use super::selection::{selection_origin, SelectionController, SelectionOutcome};
use super::spawning::{DespawnReceipt, SpawnController};

// Longest pipeline is seven steps (power-up path); the cascade re-check
// enqueues four more only after the queue has drained to itself.
const STEP_QUEUE_CAP: usize = 8;

/// Move budget and score for the running session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnState {
    pub moves_available: u32,
    pub score: u32,
}

#[derive(Debug)]
enum Step {
    /// Scale out the given slots, then report count, score and move spend.
    Despawn {
        slots: Vec<usize>,
        receipt: Option<DespawnReceipt>,
        timer: f32,
    },
    /// Run gravity passes and poll until the grid stabilizes.
    Settle { started: bool, poll_timer: f32 },
    /// Marks the transition from Resolving into Cascading.
    BeginCascade,
    /// Refill inactive cells; waits only when something was refilled.
    Respawn { waiting: bool, timer: f32 },
    /// Re-run the cascade while potential matches remain.
    CascadeCheck,
}

enum StepStatus {
    Running,
    Done,
}

/// Drives the whole resolution loop over an owned grid.
pub struct TurnEngine {
    grid: GridModel,
    selection: SelectionController,
    gravity: GravityResolver,
    spawner: SpawnController,
    powerups: PowerUpResolver,
    rng: SimpleRng,
    events: EventBus,
    phase: GamePhase,
    state: TurnState,
    queue: ArrayVec<Step, STEP_QUEUE_CAP>,
    respawn_delay: f32,
    despawn_delay: f32,
    power_ups_enabled: bool,
}

impl TurnEngine {
    /// Builds an engine over a freshly generated grid.
    pub fn new(
        grid_config: &GridConfig,
        game: GameConfig,
        tunables: &Tunables,
        powerups: PowerUpResolver,
        seed: u32,
    ) -> Self {
        let mut rng = SimpleRng::new(seed);
        let grid = GridModel::generate(grid_config, &mut rng);
        Self::with_grid(grid, game, tunables, powerups, rng)
    }

    /// Builds an engine over a caller-prepared grid.
    pub fn with_grid(
        grid: GridModel,
        game: GameConfig,
        tunables: &Tunables,
        powerups: PowerUpResolver,
        rng: SimpleRng,
    ) -> Self {
        let tunables = tunables.clamped();
        let phase = if game.moves_available == 0 {
            GamePhase::MovesExhausted
        } else {
            GamePhase::WaitingForInput
        };
        Self {
            grid,
            selection: SelectionController::new(),
            gravity: GravityResolver::new(&tunables),
            spawner: SpawnController::new(&tunables),
            powerups,
            rng,
            events: EventBus::new(),
            phase,
            state: TurnState {
                moves_available: game.moves_available,
                score: 0,
            },
            queue: ArrayVec::new(),
            respawn_delay: tunables.respawn_delay,
            despawn_delay: tunables.despawn_delay,
            power_ups_enabled: game.power_ups_enabled,
        }
    }

    pub fn grid(&self) -> &GridModel {
        &self.grid
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn moves_available(&self) -> u32 {
        self.state.moves_available
    }

    pub fn is_over(&self) -> bool {
        self.phase == GamePhase::MovesExhausted
    }

    /// Slots currently in the player's open chain.
    pub fn selection(&self) -> &[usize] {
        self.selection.selected()
    }

    /// Attaches an outbound notification channel.
    pub fn subscribe(&mut self) -> std::sync::mpsc::Receiver<GameEvent> {
        self.events.subscribe()
    }

    /// Forwards a collaborator's report that a score popup landed on the
    /// counter, so other subscribers (audio, counters) can react to it.
    pub fn report_score_reached_counter(&mut self) {
        self.events.publish(GameEvent::ScoreReachedCounter);
    }

    /// Advances the engine by one frame.
    ///
    /// `dt` is the frame duration in seconds; `pointer` is this frame's
    /// input sample, consulted only while waiting for input.
    pub fn advance(&mut self, dt: f32, pointer: Pointer) {
        self.grid.advance_animations(dt);
        match self.phase {
            GamePhase::WaitingForInput => {
                let outcome = self
                    .selection
                    .handle_pointer(pointer, &self.grid, &mut self.events);
                if let SelectionOutcome::Committed(chain) = outcome {
                    self.start_resolution(chain);
                }
            }
            GamePhase::Resolving | GamePhase::Cascading => self.advance_queue(dt),
            GamePhase::MovesExhausted => {}
        }
    }

    fn start_resolution(&mut self, chain: Vec<usize>) {
        self.phase = GamePhase::Resolving;
        self.queue.clear();

        if self.power_ups_enabled {
            if let Some(slots) = self.power_up_slots(&chain) {
                self.queue.push(Step::despawn(slots));
                self.queue.push(Step::settle());
                self.queue.push(Step::BeginCascade);
                self.queue.push(Step::settle());
                self.queue.push(Step::respawn());
                self.queue.push(Step::settle());
                self.queue.push(Step::CascadeCheck);
                return;
            }
        }

        self.queue.push(Step::despawn(chain));
        self.queue.push(Step::BeginCascade);
        self.queue.push(Step::settle());
        self.queue.push(Step::respawn());
        self.queue.push(Step::settle());
        self.queue.push(Step::CascadeCheck);
    }

    /// Expands the strongest applicable power-up into despawn slots.
    /// None when no rule qualifies, which falls back to ordinary removal.
    fn power_up_slots(&self, chain: &[usize]) -> Option<Vec<usize>> {
        let origin = selection_origin(&self.grid, chain)?;
        let cells = self.powerups.resolve(&self.grid, chain.len(), origin)?;
        Some(
            cells
                .iter()
                .filter_map(|&pos| self.grid.grid_to_index(pos))
                .collect(),
        )
    }

    fn advance_queue(&mut self, dt: f32) {
        if self.queue.is_empty() {
            self.finish_turn();
            return;
        }
        let mut step = self.queue.remove(0);
        match self.run_step(&mut step, dt) {
            StepStatus::Running => self.queue.insert(0, step),
            StepStatus::Done => {}
        }
    }

    fn run_step(&mut self, step: &mut Step, dt: f32) -> StepStatus {
        match step {
            Step::Despawn {
                slots,
                receipt,
                timer,
            } => match receipt {
                None => {
                    if slots.is_empty() {
                        return StepStatus::Done;
                    }
                    let started = self.spawner.begin_despawn(&mut self.grid, slots);
                    if started.is_empty() {
                        return StepStatus::Done;
                    }
                    *receipt = Some(started);
                    StepStatus::Running
                }
                Some(started) => {
                    *timer += dt;
                    if *timer < self.despawn_delay {
                        return StepStatus::Running;
                    }
                    let count = started.count();
                    let positions = started.positions.clone();
                    self.settle_despawn_books(count, positions);
                    StepStatus::Done
                }
            },
            Step::Settle {
                started,
                poll_timer,
            } => {
                if !*started {
                    *started = true;
                    *poll_timer = 0.0;
                    self.gravity.move_pass(&mut self.grid);
                    if self.grid.is_settled() && !has_falling_elements(&self.grid) {
                        return StepStatus::Done;
                    }
                    return StepStatus::Running;
                }
                *poll_timer += dt;
                if *poll_timer < self.gravity.check_interval() {
                    return StepStatus::Running;
                }
                *poll_timer = 0.0;
                if !self.grid.is_settled() {
                    return StepStatus::Running;
                }
                if has_falling_elements(&self.grid) {
                    self.gravity.move_pass(&mut self.grid);
                    return StepStatus::Running;
                }
                StepStatus::Done
            }
            Step::BeginCascade => {
                self.phase = GamePhase::Cascading;
                StepStatus::Done
            }
            Step::Respawn { waiting, timer } => {
                if !*waiting {
                    let refilled = self.spawner.respawn(&mut self.grid, &mut self.rng);
                    if !refilled {
                        return StepStatus::Done;
                    }
                    *waiting = true;
                    return StepStatus::Running;
                }
                *timer += dt;
                if *timer < self.respawn_delay {
                    return StepStatus::Running;
                }
                StepStatus::Done
            }
            Step::CascadeCheck => {
                if self.has_potential_matches() {
                    self.queue.push(Step::settle());
                    self.queue.push(Step::respawn());
                    self.queue.push(Step::settle());
                    self.queue.push(Step::CascadeCheck);
                }
                StepStatus::Done
            }
        }
    }

    /// Publishes the despawn bookkeeping and spends the move.
    fn settle_despawn_books(&mut self, count: usize, positions: Vec<Vec2>) {
        let delta = match_score(count);
        let old = self.state.score;
        let new = old.saturating_add(delta);
        self.state.score = new;
        self.state.moves_available = self.state.moves_available.saturating_sub(1);
        self.events.publish(GameEvent::ElementsDespawned { count });
        self.events.publish(GameEvent::ScoreChanged { old, new });
        self.events.publish(GameEvent::ScoreAnimationRequested {
            score: delta,
            positions,
        });
    }

    /// Chain-reaction hook. The stock policy never re-cascades: one
    /// stabilize-respawn-stabilize round per turn.
    fn has_potential_matches(&self) -> bool {
        false
    }

    fn finish_turn(&mut self) {
        self.phase = if self.state.moves_available == 0 {
            GamePhase::MovesExhausted
        } else {
            GamePhase::WaitingForInput
        };
    }
}

impl Step {
    fn despawn(slots: Vec<usize>) -> Self {
        Step::Despawn {
            slots,
            receipt: None,
            timer: 0.0,
        }
    }

    fn settle() -> Self {
        Step::Settle {
            started: false,
            poll_timer: 0.0,
        }
    }

    fn respawn() -> Self {
        Step::Respawn {
            waiting: false,
            timer: 0.0,
        }
    }
}

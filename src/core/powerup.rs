//! Rule-driven power-up effects for long chains.
//!
//! A rule table maps chain-length thresholds to effect kinds. Rules are
//! kept sorted descending by threshold, so the strongest satisfied rule
//! wins: with the default table a seven-chain triggers the area clear,
//! not the sweep, even though both thresholds are met. Effect kinds are
//! bound to implementations through a registry of factories at
//! configuration time, so an unknown kind fails construction instead of
//! surfacing mid-game.

use std::collections::HashMap;

use crate::config::ConfigError;
use crate::types::{EffectKind, GridPos};

use super::grid::GridModel;

/// Chain-length threshold paired with the effect it unlocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerUpRule {
    pub minimum_elements: usize,
    pub effect: EffectKind,
}

impl PowerUpRule {
    pub fn new(minimum_elements: usize, effect: EffectKind) -> Self {
        Self {
            minimum_elements,
            effect,
        }
    }
}

/// The stock rule table: sweeps from four elements, area clears from six.
pub fn default_rules() -> Vec<PowerUpRule> {
    vec![
        PowerUpRule::new(4, EffectKind::RowColumnSweep),
        PowerUpRule::new(6, EffectKind::AreaClear),
    ]
}

/// Expands an effect into the set of cells it clears.
pub trait PowerUpEffect {
    /// Cells cleared by this effect, anchored at the chain's first element.
    /// Out-of-bounds cells are dropped; an out-of-bounds origin yields none.
    fn affected_cells(&self, grid: &GridModel, origin: GridPos) -> Vec<GridPos>;
}

/// Clears the origin's full row plus its full column.
#[derive(Debug, Clone, Copy, Default)]
pub struct SweepEffect;

impl PowerUpEffect for SweepEffect {
    fn affected_cells(&self, grid: &GridModel, origin: GridPos) -> Vec<GridPos> {
        if grid.grid_to_index(origin).is_none() {
            return Vec::new();
        }
        let mut cells = Vec::with_capacity(grid.columns() + grid.rows() - 1);
        for x in 0..grid.columns() as i32 {
            cells.push(GridPos::new(x, origin.y));
        }
        // The column skips the origin's row; the row pass already added it.
        for y in 0..grid.rows() as i32 {
            if y != origin.y {
                cells.push(GridPos::new(origin.x, y));
            }
        }
        cells
    }
}

/// Clears the 3x3 neighborhood around the origin, clamped to the grid.
#[derive(Debug, Clone, Copy, Default)]
pub struct AreaClearEffect;

impl PowerUpEffect for AreaClearEffect {
    fn affected_cells(&self, grid: &GridModel, origin: GridPos) -> Vec<GridPos> {
        if grid.grid_to_index(origin).is_none() {
            return Vec::new();
        }
        let mut cells = Vec::with_capacity(9);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let pos = GridPos::new(origin.x + dx, origin.y + dy);
                if grid.grid_to_index(pos).is_some() {
                    cells.push(pos);
                }
            }
        }
        cells
    }
}

/// Builds a boxed effect for a kind.
pub type EffectFactory = fn() -> Box<dyn PowerUpEffect>;

/// Maps effect kinds to the factories that build them.
#[derive(Default)]
pub struct EffectRegistry {
    factories: HashMap<EffectKind, EffectFactory>,
}

impl EffectRegistry {
    /// An empty registry; every rule kind must be registered explicitly.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the two stock effects bound.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(EffectKind::RowColumnSweep, || Box::new(SweepEffect));
        registry.register(EffectKind::AreaClear, || Box::new(AreaClearEffect));
        registry
    }

    pub fn register(&mut self, kind: EffectKind, factory: EffectFactory) {
        self.factories.insert(kind, factory);
    }

    pub fn contains(&self, kind: EffectKind) -> bool {
        self.factories.contains_key(&kind)
    }

    /// Instantiates the effect for `kind`, or reports the unbound kind.
    pub fn build(&self, kind: EffectKind) -> Result<Box<dyn PowerUpEffect>, ConfigError> {
        self.factories
            .get(&kind)
            .map(|factory| factory())
            .ok_or(ConfigError::UnknownEffect(kind))
    }
}

/// Rule table with effects bound, sorted strongest-first.
pub struct PowerUpResolver {
    rules: Vec<(PowerUpRule, Box<dyn PowerUpEffect>)>,
}

impl PowerUpResolver {
    /// Binds each rule's effect through the registry.
    ///
    /// Fails with [`ConfigError::UnknownEffect`] when a rule names a kind
    /// the registry does not know, so misconfiguration is caught before
    /// the first turn runs.
    pub fn new(rules: Vec<PowerUpRule>, registry: &EffectRegistry) -> Result<Self, ConfigError> {
        let mut bound = Vec::with_capacity(rules.len());
        for rule in rules {
            let effect = registry.build(rule.effect)?;
            bound.push((rule, effect));
        }
        bound.sort_by(|a, b| b.0.minimum_elements.cmp(&a.0.minimum_elements));
        Ok(Self { rules: bound })
    }

    /// The stock table bound to the stock effects.
    pub fn with_defaults() -> Self {
        let rules: Vec<(PowerUpRule, Box<dyn PowerUpEffect>)> = vec![
            (
                PowerUpRule::new(6, EffectKind::AreaClear),
                Box::new(AreaClearEffect),
            ),
            (
                PowerUpRule::new(4, EffectKind::RowColumnSweep),
                Box::new(SweepEffect),
            ),
        ];
        Self { rules }
    }

    /// Rules in priority order (highest threshold first).
    pub fn rules(&self) -> impl Iterator<Item = &PowerUpRule> {
        self.rules.iter().map(|(rule, _)| rule)
    }

    /// The strongest rule whose threshold the chain meets, if any.
    pub fn applicable_rule(&self, chain_len: usize) -> Option<&PowerUpRule> {
        self.rules
            .iter()
            .map(|(rule, _)| rule)
            .find(|rule| rule.minimum_elements <= chain_len)
    }

    /// Expands the strongest applicable effect at `origin`.
    /// Returns None when no rule's threshold is met.
    pub fn resolve(
        &self,
        grid: &GridModel,
        chain_len: usize,
        origin: GridPos,
    ) -> Option<Vec<GridPos>> {
        let (_, effect) = self
            .rules
            .iter()
            .find(|(rule, _)| rule.minimum_elements <= chain_len)?;
        Some(effect.affected_cells(grid, origin))
    }
}

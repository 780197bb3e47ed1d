//! Strategy registry for name-based construction.
//!
//! The `StrategyRegistry` maps short names (the CLI flag names) to
//! constructors, so front ends can build rosters without knowing the
//! concrete strategy types.

use super::{
    AdvancedDummy, CounterDummy, CounterThreshold, Dummy, RandomStrategy, ShowOff, Strategy,
    Threshold, Tracking,
};

/// Builds a fresh strategy instance.
pub type StrategyFactory = fn() -> Box<dyn Strategy>;

/// Registry of strategy constructors, in registration order.
///
/// ## Example
///
/// ```
/// use maexchen::strategy::StrategyRegistry;
///
/// let registry = StrategyRegistry::with_builtins();
///
/// let player = registry.create("thres").unwrap();
/// assert_eq!(player.name(), "Threshold");
/// assert!(registry.create("nope").is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct StrategyRegistry {
    entries: Vec<(&'static str, StrategyFactory)>,
}

impl StrategyRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in strategy.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("dummy", || Box::new(Dummy::new()));
        registry.register("adv-dummy", || Box::new(AdvancedDummy::new()));
        registry.register("c-dummy", || Box::new(CounterDummy::new()));
        registry.register("show-off", || Box::new(ShowOff::new()));
        registry.register("random", || Box::new(RandomStrategy::new()));
        registry.register("thres", || Box::new(Threshold::new()));
        registry.register("threshold", || Box::new(Threshold::new()));
        registry.register("c-thres", || Box::new(CounterThreshold::new()));
        registry.register("tracking", || Box::new(Tracking::new()));
        registry
    }

    /// Register a constructor under `name`, replacing any previous one.
    pub fn register(&mut self, name: &'static str, factory: StrategyFactory) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = factory,
            None => self.entries.push((name, factory)),
        }
    }

    /// Build a new instance of the strategy registered as `name`.
    #[must_use]
    pub fn create(&self, name: &str) -> Option<Box<dyn Strategy>> {
        self.entries
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, factory)| factory())
    }

    /// Check if a name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| *n == name)
    }

    /// Registered names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(n, _)| *n)
    }

    /// Get the number of registered names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

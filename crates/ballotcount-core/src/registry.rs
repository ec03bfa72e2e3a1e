//! Tally factory and registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::parallel::ParallelTally;
use crate::sequential::SequentialTally;
use crate::tally::{Tally, TallyError};

/// Factory trait for creating tally strategies.
pub trait TallyFactory: Send + Sync {
    /// Get or create a strategy by name. `threads` only affects parallel strategies.
    fn get(&self, name: &str, threads: usize) -> Result<Arc<dyn Tally>, TallyError>;

    /// List all available strategy names, sequential first.
    fn available(&self) -> Vec<&str>;
}

/// Default factory with lazy creation and cache.
pub struct DefaultFactory {
    cache: RwLock<HashMap<(String, usize), Arc<dyn Tally>>>,
}

impl DefaultFactory {
    /// Create a new default factory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn create_tally(name: &str, threads: usize) -> Result<Arc<dyn Tally>, TallyError> {
        match name {
            "sequential" | "seq" => Ok(Arc::new(SequentialTally::new())),
            "parallel" | "par" => Ok(Arc::new(ParallelTally::new(threads))),
            _ => Err(TallyError::Config(format!("unknown strategy: {name}"))),
        }
    }

    /// Cache key. The sequential strategy ignores `threads`.
    fn key(name: &str, threads: usize) -> (String, usize) {
        match name {
            "sequential" | "seq" => ("sequential".to_string(), 1),
            _ => (name.to_string(), threads),
        }
    }
}

impl Default for DefaultFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl TallyFactory for DefaultFactory {
    fn get(&self, name: &str, threads: usize) -> Result<Arc<dyn Tally>, TallyError> {
        let key = Self::key(name, threads);
        if let Some(tally) = self.cache.read().get(&key) {
            return Ok(Arc::clone(tally));
        }

        let tally = Self::create_tally(name, threads)?;
        self.cache.write().insert(key, Arc::clone(&tally));
        Ok(tally)
    }

    fn available(&self) -> Vec<&str> {
        vec!["sequential", "parallel"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_creates_sequential() {
        let factory = DefaultFactory::new();
        let tally = factory.get("sequential", 4).unwrap();
        assert_eq!(tally.name(), "Sequential");
        assert_eq!(tally.threads(), 1);
    }

    #[test]
    fn factory_creates_parallel() {
        let factory = DefaultFactory::new();
        let tally = factory.get("parallel", 4).unwrap();
        assert_eq!(tally.name(), "Parallel");
        assert_eq!(tally.threads(), 4);
    }

    #[test]
    fn factory_accepts_short_names() {
        let factory = DefaultFactory::new();
        assert_eq!(factory.get("seq", 1).unwrap().name(), "Sequential");
        assert_eq!(factory.get("par", 2).unwrap().name(), "Parallel");
    }

    #[test]
    fn factory_caches_per_thread_count() {
        let factory = DefaultFactory::new();
        let a = factory.get("parallel", 4).unwrap();
        let b = factory.get("parallel", 4).unwrap();
        let c = factory.get("parallel", 2).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
        assert!(!Arc::ptr_eq(&a, &c));
    }

    #[test]
    fn factory_sequential_ignores_threads() {
        let factory = DefaultFactory::new();
        let a = factory.get("sequential", 1).unwrap();
        let b = factory.get("sequential", 8).unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn factory_unknown_name() {
        let factory = DefaultFactory::new();
        assert!(matches!(
            factory.get("quantum", 4),
            Err(TallyError::Config(_))
        ));
    }

    #[test]
    fn factory_available() {
        let factory = DefaultFactory::new();
        assert_eq!(factory.available(), vec!["sequential", "parallel"]);
    }
}

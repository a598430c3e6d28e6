use std::collections::{HashMap, VecDeque};

use super::RenderError;
use crate::dict::VoiceoverDictionary;

/// Per-key option pools drained front to back and refilled from the master
/// dictionary, which itself is never touched.
pub(crate) struct OptionPools<'d> {
    master: &'d VoiceoverDictionary,
    working: HashMap<String, VecDeque<String>>,
}

impl<'d> OptionPools<'d> {
    pub(crate) fn new(master: &'d VoiceoverDictionary) -> Self {
        let working = master
            .iter()
            .map(|(key, options)| (key.to_string(), options.iter().cloned().collect()))
            .collect();
        Self { master, working }
    }

    /// Whether `key` still has an unconsumed option.
    pub(crate) fn is_available(&self, key: &str) -> Result<bool, RenderError> {
        self.working
            .get(key)
            .map(|pool| !pool.is_empty())
            .ok_or_else(|| RenderError::UnknownKey(key.to_string()))
    }

    pub(crate) fn replenish_if_empty(&mut self, key: &str) -> Result<(), RenderError> {
        let master = self.master;
        let pool = self.pool_mut(key)?;
        if pool.is_empty() {
            pool.extend(master.options(key).unwrap_or_default().iter().cloned());
        }
        if pool.is_empty() {
            return Err(RenderError::NoOptions(key.to_string()));
        }
        Ok(())
    }

    /// Current head option, left in place.
    pub(crate) fn head(&mut self, key: &str) -> Result<String, RenderError> {
        self.replenish_if_empty(key)?;
        self.pool_mut(key)?
            .front()
            .cloned()
            .ok_or_else(|| RenderError::NoOptions(key.to_string()))
    }

    /// Take the head option, refilling first if the pool ran dry.
    pub(crate) fn pop(&mut self, key: &str) -> Result<String, RenderError> {
        self.replenish_if_empty(key)?;
        self.pool_mut(key)?
            .pop_front()
            .ok_or_else(|| RenderError::NoOptions(key.to_string()))
    }

    /// Drop the head option, if any.
    pub(crate) fn shift(&mut self, key: &str) {
        if let Some(pool) = self.working.get_mut(key) {
            pool.pop_front();
        }
    }

    fn pool_mut(&mut self, key: &str) -> Result<&mut VecDeque<String>, RenderError> {
        self.working
            .get_mut(key)
            .ok_or_else(|| RenderError::UnknownKey(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dict() -> VoiceoverDictionary {
        [("0", vec!["нуль", "ноль"]), ("empty", vec![])]
            .into_iter()
            .collect()
    }

    #[test]
    fn test_pop_drains_then_refills() {
        let dict = dict();
        let mut pools = OptionPools::new(&dict);
        assert_eq!(pools.pop("0").unwrap(), "нуль");
        assert_eq!(pools.pop("0").unwrap(), "ноль");
        assert!(!pools.is_available("0").unwrap());
        assert_eq!(pools.pop("0").unwrap(), "нуль");
        assert_eq!(dict.options("0").unwrap(), ["нуль", "ноль"]);
    }

    #[test]
    fn test_head_does_not_consume() {
        let dict = dict();
        let mut pools = OptionPools::new(&dict);
        assert_eq!(pools.head("0").unwrap(), "нуль");
        assert_eq!(pools.head("0").unwrap(), "нуль");
        pools.shift("0");
        assert_eq!(pools.head("0").unwrap(), "ноль");
    }

    #[test]
    fn test_unknown_and_empty_keys() {
        let dict = dict();
        let mut pools = OptionPools::new(&dict);
        assert_eq!(
            pools.is_available("7"),
            Err(RenderError::UnknownKey("7".into()))
        );
        assert_eq!(pools.pop("empty"), Err(RenderError::NoOptions("empty".into())));
    }
}

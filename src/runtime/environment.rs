use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Variable store for a single program execution.
///
/// One flat namespace: blocks and loop iterations do not introduce scopes, so
/// a variable assigned inside a loop body stays visible after the loop.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Environment {
    /// Variables defined so far, keyed by name including the `$`
    variables: HashMap<String, i32>,
}

impl Environment {
    /// Creates an empty environment
    pub fn new() -> Self {
        Environment {
            variables: HashMap::new(),
        }
    }

    /// Reads a variable, inserting it with value 0 if it was never set
    pub fn read(&mut self, name: &str) -> i32 {
        *self.variables.entry(name.to_string()).or_insert(0)
    }

    /// Sets a variable, overwriting any previous value
    pub fn set(&mut self, name: &str, value: i32) {
        self.variables.insert(name.to_string(), value);
    }

    /// Gets a variable without the insert-on-read behaviour
    pub fn get(&self, name: &str) -> Option<i32> {
        self.variables.get(name).copied()
    }

    /// Checks if a variable exists
    pub fn exists(&self, name: &str) -> bool {
        self.variables.contains_key(name)
    }

    /// Number of variables defined
    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Returns true if no variable has been read or written yet
    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Removes every variable
    pub fn clear(&mut self) {
        self.variables.clear();
    }

    /// Returns a name-ordered snapshot of all variables
    pub fn snapshot(&self) -> BTreeMap<String, i32> {
        self.variables
            .iter()
            .map(|(k, v)| (k.clone(), *v))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_inserts_default() {
        let mut env = Environment::new();
        assert!(!env.exists("$z"));
        assert_eq!(env.read("$z"), 0);
        assert!(env.exists("$z"));
        assert_eq!(env.get("$z"), Some(0));
        assert_eq!(env.read("$z"), 0);
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_set_overwrites() {
        let mut env = Environment::new();
        env.set("$x", 4);
        env.set("$x", -9);
        assert_eq!(env.read("$x"), -9);
        assert_eq!(env.len(), 1);
    }

    #[test]
    fn test_get_does_not_insert() {
        let env = Environment::new();
        assert_eq!(env.get("$missing"), None);
        assert!(env.is_empty());
    }

    #[test]
    fn test_snapshot_and_clear() {
        let mut env = Environment::new();
        env.set("$b", 2);
        env.set("$a", 1);
        let snapshot = env.snapshot();
        assert_eq!(
            snapshot.into_iter().collect::<Vec<_>>(),
            vec![("$a".to_string(), 1), ("$b".to_string(), 2)]
        );
        env.clear();
        assert!(env.is_empty());
    }
}

use std::collections::HashMap;
use std::sync::Arc;

use crate::operation::Operation;

/// Name to operation lookup.
///
/// Names and aliases are matched case-insensitively. Ids are assigned in
/// registration order and stay stable for the life of the registry.
#[derive(Default)]
pub struct OperationRegistry {
    by_id: Vec<Arc<dyn Operation>>,
    by_name: HashMap<String, usize>,
}

impl OperationRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an operation under its name and aliases, returning its id.
    /// A later registration shadows an earlier one with the same name.
    pub fn register(&mut self, op: impl Operation + 'static) -> usize {
        let op: Arc<dyn Operation> = Arc::new(op);
        let id = self.by_id.len();
        for name in std::iter::once(op.name()).chain(op.aliases().iter().copied()) {
            if let Some(old) = self.by_name.insert(name.to_lowercase(), id) {
                log::warn!(
                    "operation '{}' shadows '{}'",
                    name,
                    self.by_id[old].name()
                );
            }
        }
        self.by_id.push(op);
        id
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn Operation>> {
        self.fn_id_by_name(name).map(|id| &self.by_id[id])
    }

    pub fn fn_id_by_name(&self, name: &str) -> Option<usize> {
        self.by_name.get(&name.to_lowercase()).copied()
    }

    pub fn fn_name_by_id(&self, id: usize) -> Option<&'static str> {
        self.by_id.get(id).map(|op| op.name())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.fn_id_by_name(name).is_some()
    }

    /// Canonical names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.by_id.iter().map(|op| op.name())
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

impl std::fmt::Debug for OperationRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OperationRegistry")
            .field("operations", &self.by_id.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::Calculator;
    use rpn_core::CalcResult;

    struct Mock {
        name: &'static str,
        aliases: &'static [&'static str],
    }

    impl Operation for Mock {
        fn name(&self) -> &'static str {
            self.name
        }

        fn aliases(&self) -> &'static [&'static str] {
            self.aliases
        }

        fn num_args(&self) -> i32 {
            0
        }

        fn op(&self, _calc: &mut Calculator) -> CalcResult<()> {
            Ok(())
        }
    }

    #[test]
    fn ids_follow_registration_order() {
        let mut registry = OperationRegistry::new();
        let a = registry.register(Mock { name: "dup", aliases: &[] });
        let b = registry.register(Mock { name: "drop", aliases: &[] });
        assert_eq!((a, b), (0, 1));
        assert_eq!(registry.fn_name_by_id(1), Some("drop"));
        assert_eq!(registry.fn_id_by_name("dup"), Some(0));
        assert_eq!(registry.fn_name_by_id(7), None);
    }

    #[test]
    fn lookup_is_case_insensitive_and_covers_aliases() {
        let mut registry = OperationRegistry::new();
        registry.register(Mock { name: "fact", aliases: &["!"] });
        assert_eq!(registry.get("FACT").map(|op| op.name()), Some("fact"));
        assert_eq!(registry.get("!").map(|op| op.name()), Some("fact"));
        assert!(registry.get("nope").is_none());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn later_registration_shadows() {
        let mut registry = OperationRegistry::new();
        registry.register(Mock { name: "x", aliases: &[] });
        let id = registry.register(Mock { name: "X", aliases: &[] });
        assert_eq!(registry.fn_id_by_name("x"), Some(id));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["x", "X"]);
    }
}

//! Explicit registry of swappable capabilities.
//!
//! Callers register a factory per capability name (`Loading`, `ReduxForm`,
//! `ReduxFormField`, field types, ...) and pass the registry down to whoever
//! renders. Factories run lazily, on every lookup.

use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

type Factory<T> = Rc<dyn Fn() -> T>;

pub struct Registry<T> {
    factories: HashMap<String, Factory<T>>,
    context: Option<String>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            factories: HashMap::new(),
            context: None,
        }
    }
}

impl<T> Clone for Registry<T> {
    fn clone(&self) -> Self {
        Self {
            factories: self.factories.clone(),
            context: self.context.clone(),
        }
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&String> = self.factories.keys().collect();
        names.sort();
        f.debug_struct("Registry")
            .field("names", &names)
            .field("context", &self.context)
            .finish()
    }
}

impl<T> Registry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers (or replaces) the factory for `name`.
    pub fn register(&mut self, name: &str, factory: impl Fn() -> T + 'static) -> &mut Self {
        self.factories.insert(name.to_string(), Rc::new(factory));
        self
    }

    /// Registers a factory that only applies within `context`.
    pub fn register_in_context(
        &mut self,
        name: &str,
        context: &str,
        factory: impl Fn() -> T + 'static,
    ) -> &mut Self {
        self.factories
            .insert(format!("{}.{}", name, context), Rc::new(factory));
        self
    }

    /// A view of this registry that prefers registrations made for `context`.
    pub fn with_context(&self, context: &str) -> Self {
        Self {
            factories: self.factories.clone(),
            context: Some(context.to_string()),
        }
    }

    /// Resolves `name`, trying the contextual registration first.
    pub fn get(&self, name: &str) -> Option<T> {
        let contextual = self
            .context
            .as_ref()
            .and_then(|context| self.factories.get(&format!("{}.{}", name, context)));
        contextual
            .or_else(|| self.factories.get(name))
            .map(|factory| factory())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }
}

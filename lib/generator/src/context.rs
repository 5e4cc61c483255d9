use std::collections::HashMap;
use std::fmt::Display;

use indexmap::IndexMap;

use crate::schema::ArgumentDefinition;

pub type VariableMap<'s> = IndexMap<String, &'s ArgumentDefinition>;

/// A field entered from a parent field, the unit of cycle detection.
/// The root field of a document has no parent field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CrossReferenceKey<'s> {
    pub parent_field_name: Option<&'s str>,
    pub field_name: &'s str,
}

impl<'s> CrossReferenceKey<'s> {
    pub fn new(parent_field_name: Option<&'s str>, field_name: &'s str) -> Self {
        Self {
            parent_field_name,
            field_name,
        }
    }
}

impl Display for CrossReferenceKey<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.parent_field_name {
            Some(parent_field_name) => write!(f, "{}.{}", parent_field_name, self.field_name),
            None => write!(f, "{}", self.field_name),
        }
    }
}

/// State threaded through the synthesis of a single document.
///
/// `path` only ever holds the keys of the branch currently being built: entries are pushed
/// when a branch is entered and popped when it is left, so sibling subtrees never see each
/// other's visits.
#[derive(Debug, Default)]
pub struct TraversalContext<'s> {
    path: Vec<CrossReferenceKey<'s>>,
    variables: VariableMap<'s>,
    name_counters: HashMap<&'s str, usize>,
}

impl<'s> TraversalContext<'s> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(&self) -> &[CrossReferenceKey<'s>] {
        &self.path
    }

    pub fn is_open(&self, key: &CrossReferenceKey<'s>) -> bool {
        self.path.contains(key)
    }

    /// Runs `f` with `key` open on the path. The key is popped once `f` returns, whatever the outcome.
    pub fn within<T, E>(
        &mut self,
        key: CrossReferenceKey<'s>,
        f: impl FnOnce(&mut Self) -> Result<T, E>,
    ) -> Result<T, E> {
        self.path.push(key);
        let result = f(self);
        self.path.pop();

        result
    }

    pub fn variables(&self) -> &VariableMap<'s> {
        &self.variables
    }

    /// Allocates one variable per argument and records it for the document header.
    ///
    /// The argument name is used as is when free. Otherwise a numeric suffix is appended,
    /// continuing from the last suffix handed out for that name. Every occurrence gets its
    /// own variable, even when the very same argument was bound before.
    pub fn bind_variables<I>(&mut self, arguments: I) -> Vec<(String, &'s ArgumentDefinition)>
    where
        I: IntoIterator<Item = &'s ArgumentDefinition>,
    {
        let mut bindings = Vec::new();

        for argument in arguments {
            let variable_name = if self.variables.contains_key(&argument.name) {
                self.next_free_name(&argument.name)
            } else {
                argument.name.clone()
            };

            self.variables.insert(variable_name.clone(), argument);
            bindings.push((variable_name, argument));
        }

        bindings
    }

    fn next_free_name(&mut self, raw_name: &'s str) -> String {
        let counter = self.name_counters.entry(raw_name).or_insert(0);

        loop {
            *counter += 1;
            let candidate = format!("{}{}", raw_name, counter);

            if !self.variables.contains_key(&candidate) {
                return candidate;
            }
        }
    }
}

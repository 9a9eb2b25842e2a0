//! Named type environments.
//!
//! An [`Environment`] maps type names to the record, enum and fixed
//! definitions found in a root schema. It is built by a single traversal and
//! then used to resolve [`AvroSchema::Named`] references lazily while values
//! are parsed, which keeps recursive schemas finite.
//!
//! Namespace handling is mechanical: a definition with a namespace is bound
//! under `"{namespace}.{name}"` for its name and each alias, in addition to
//! the bare forms. Namespaces are not inherited from enclosing definitions, so
//! deeply nested namespaced schemas may not resolve the way the Avro naming
//! rules would.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::error::{AvroError, Result};
use crate::schema::{AvroSchema, TypeName};

/// Builds the error returned for names absent from an environment.
pub type MissingTypeHandler = fn(&TypeName) -> AvroError;

/// Immutable lookup from type name to definition.
///
/// Each definition is stored once; its name, aliases and qualified forms
/// share the same allocation. Safe to share across threads and reuse for any number of value parses
/// against the schema it was built from.
#[derive(Debug, Clone)]
pub struct Environment {
    named_types: HashMap<TypeName, Arc<AvroSchema>>,
    on_missing: MissingTypeHandler,
}

impl Environment {
    /// Build an environment from every named type reachable in `root`.
    ///
    /// Unresolvable names fail with [`AvroError::UnresolvedType`].
    pub fn build(root: &AvroSchema) -> Self {
        Self::build_with(root, AvroError::unresolved)
    }

    /// Build an environment with a custom failure for unresolvable names.
    pub fn build_with(root: &AvroSchema, on_missing: MissingTypeHandler) -> Self {
        let mut env = Self {
            named_types: HashMap::new(),
            on_missing,
        };
        env.extract_named_types(root);
        debug!(bindings = env.named_types.len(), "Built type environment");
        env
    }

    /// An environment with no bindings whose lookups fail with
    /// [`AvroError::UnsupportedDefault`].
    ///
    /// Used for field defaults inside a schema document, where named types
    /// are not available yet.
    pub fn unresolvable() -> Self {
        Self {
            named_types: HashMap::new(),
            on_missing: AvroError::unsupported_default,
        }
    }

    /// Get a named type from the environment.
    pub fn get(&self, name: &str) -> Option<&AvroSchema> {
        self.named_types.get(name).map(Arc::as_ref)
    }

    /// Check if a named type exists in the environment.
    pub fn contains(&self, name: &str) -> bool {
        self.named_types.contains_key(name)
    }

    /// Resolve a name, producing this environment's failure when absent.
    pub fn resolve(&self, name: &TypeName) -> Result<&AvroSchema> {
        match self.named_types.get(name) {
            Some(schema) => {
                trace!(name = %name, "Resolved named type");
                Ok(schema.as_ref())
            }
            None => Err((self.on_missing)(name)),
        }
    }

    /// Number of bindings, counting aliases and qualified forms separately.
    pub fn len(&self) -> usize {
        self.named_types.len()
    }

    /// Whether the environment has no bindings.
    pub fn is_empty(&self) -> bool {
        self.named_types.is_empty()
    }

    /// All bound names, in no particular order.
    pub fn names(&self) -> impl Iterator<Item = &TypeName> {
        self.named_types.keys()
    }

    fn extract_named_types(&mut self, schema: &AvroSchema) {
        match schema {
            AvroSchema::Record(record) => {
                self.bind(
                    &record.name,
                    &record.aliases,
                    record.namespace.as_deref(),
                    schema,
                );
                for field in &record.fields {
                    self.extract_named_types(&field.schema);
                }
            }
            AvroSchema::Enum(e) => {
                self.bind(&e.name, &e.aliases, e.namespace.as_deref(), schema);
            }
            AvroSchema::Fixed(f) => {
                self.bind(&f.name, &f.aliases, f.namespace.as_deref(), schema);
            }
            AvroSchema::Array(items) => self.extract_named_types(items),
            AvroSchema::Map(values) => self.extract_named_types(values),
            AvroSchema::Union(union) => {
                for option in union.options() {
                    self.extract_named_types(option);
                }
            }
            // Primitives and Named references don't contain named type definitions
            _ => {}
        }
    }

    fn bind(
        &mut self,
        name: &TypeName,
        aliases: &[TypeName],
        namespace: Option<&str>,
        schema: &AvroSchema,
    ) {
        let shared = Arc::new(schema.clone());
        for n in std::iter::once(name).chain(aliases) {
            self.insert(n.clone(), &shared);
            if let Some(ns) = namespace {
                self.insert(n.qualified(ns), &shared);
            }
        }
    }

    fn insert(&mut self, name: TypeName, schema: &Arc<AvroSchema>) {
        trace!(name = %name, "Registering named type");
        self.named_types.insert(name, Arc::clone(schema));
    }
}

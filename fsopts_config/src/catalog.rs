use std::collections::BTreeMap;

use fsopts::TypeRef;

/// Maps the type names used in profile files to [`TypeRef`]s.
///
/// Profiles can not name Rust types directly, so every type a profile may
/// reference with `{ class: <name> }` has to be registered here.
#[derive(Clone, Debug, Default)]
pub struct TypeCatalog {
    types: BTreeMap<String, TypeRef>,
}

impl TypeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a type. Replaces an existing entry with the same name.
    pub fn register(&mut self, name: impl Into<String>, ty: TypeRef) {
        self.types.insert(name.into(), ty);
    }

    pub fn with_type(mut self, name: impl Into<String>, ty: TypeRef) -> Self {
        self.register(name, ty);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TypeRef> {
        self.types.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.types.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_lookup() {
        let catalog = TypeCatalog::new()
            .with_type("text", TypeRef::of::<String>())
            .with_type("number", TypeRef::of::<u32>());

        assert!(catalog.get("text").unwrap().is::<String>());
        assert!(catalog.get("missing").is_none());
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["number", "text"]);
    }
}

//! Lookup of classification schemas by name

use crate::dimensions::BUILTIN;
use crate::error::FlowError;
use scholarlens_domain::ClassificationSchema;

/// Registered classification schemas in registration order
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: Vec<ClassificationSchema>,
}

impl SchemaRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in dimension
    pub fn builtin() -> Self {
        Self {
            schemas: BUILTIN.to_vec(),
        }
    }

    /// Add a schema, refusing names that collide with an existing one
    pub fn register(&mut self, schema: ClassificationSchema) -> Result<(), FlowError> {
        let key = normalize_name(schema.field);
        if self.schemas.iter().any(|s| normalize_name(s.field) == key) {
            return Err(FlowError::Config(format!(
                "dimension '{}' is already registered",
                schema.field
            )));
        }
        self.schemas.push(schema);
        Ok(())
    }

    /// Look up a schema by field name or alias
    ///
    /// Matching ignores case, `-`, `_` and spaces, so `participants-group`
    /// finds `participantsGroup`.
    pub fn get(&self, name: &str) -> Result<&ClassificationSchema, FlowError> {
        let key = normalize_name(name);
        self.schemas
            .iter()
            .find(|s| normalize_name(s.field) == key)
            .ok_or_else(|| FlowError::UnknownDimension(name.trim().to_string()))
    }

    /// All schemas in registration order
    pub fn iter(&self) -> impl Iterator<Item = &ClassificationSchema> {
        self.schemas.iter()
    }

    /// Number of registered schemas
    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }
}

fn normalize_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::PARTICIPANTS_GROUP;

    #[test]
    fn test_builtin_registry() {
        let registry = SchemaRegistry::builtin();
        assert_eq!(registry.len(), 19);
        assert_eq!(registry.iter().next().map(|s| s.field), Some("subjectLevel"));
    }

    #[test]
    fn test_lookup_aliases() {
        let registry = SchemaRegistry::builtin();
        for name in ["participantsGroup", "participants-group", "participants_group", "PARTICIPANTSGROUP"] {
            assert_eq!(registry.get(name).unwrap().field, "participantsGroup", "{}", name);
        }
    }

    #[test]
    fn test_unknown_dimension() {
        let registry = SchemaRegistry::builtin();
        assert_eq!(
            registry.get("favouriteColour").unwrap_err(),
            FlowError::UnknownDimension("favouriteColour".into())
        );
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = SchemaRegistry::builtin();
        let mut clash = PARTICIPANTS_GROUP;
        clash.field = "participants_group";
        assert!(registry.register(clash).is_err());
        assert_eq!(registry.len(), 19);
    }

    #[test]
    fn test_register_custom_schema() {
        let mut registry = SchemaRegistry::new();
        assert!(registry.is_empty());
        let mut custom = PARTICIPANTS_GROUP;
        custom.field = "reviewerGroup";
        registry.register(custom).unwrap();
        assert!(registry.get("reviewer-group").is_ok());
    }
}

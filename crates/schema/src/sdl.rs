//! GraphQL SDL generation for type definitions

use crate::definition::TypeDefinition;
use crate::schema::capitalize_first;

/// Render one `type` block per definition, separated by a blank line
pub fn types_to_sdl(types: &[TypeDefinition]) -> String {
    types
        .iter()
        .map(type_to_sdl)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn type_to_sdl(def: &TypeDefinition) -> String {
    let mut out = format!("type {} {{\n", capitalize_first(&def.name));
    for field in &def.fields {
        out.push_str(&format!("  {}: {}\n", field.name, field.ty.gql_type()));
    }
    out.push('}');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::definition::DefinitionTree;
    use pretty_assertions::assert_eq;
    use smallcrud_core::TypeDescriptor;

    #[test]
    fn test_sdl_for_two_types() {
        let mut tree = DefinitionTree::new();
        let friend = tree.add_type("friend");
        tree.add_field(friend, "name", TypeDescriptor::String).unwrap();
        tree.add_field(friend, "age", TypeDescriptor::Int).unwrap();
        let doc = tree.add_type("document");
        tree.add_field(doc, "db", TypeDescriptor::Database).unwrap();
        tree.add_field(doc, "published", TypeDescriptor::DateTime)
            .unwrap();

        assert_eq!(
            tree.to_sdl(),
            "type Friend {\n  _id: ID\n  name: String\n  age: Int\n}\n\n\
             type Document {\n  _id: ID\n  db: JSON\n  published: DateTime\n}"
        );
    }

    #[test]
    fn test_empty_tree_has_empty_sdl() {
        assert_eq!(types_to_sdl(&[]), "");
    }
}

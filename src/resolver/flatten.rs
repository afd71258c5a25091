use crate::document::{FieldKind, FormElement, FormTree};

/// The projection of a form field produced by document-order traversal.
///
/// `position` is the field's index in the flattened sequence; it is
/// stable and strictly increasing across a single flatten pass, which is
/// what makes FIFO matching deterministic.
#[derive(Debug, Clone)]
pub struct FlattenedField {
    pub position: usize,
    pub element_id: String,
    pub node_id: String,
    pub input_name: String,
    pub label: Option<String>,
    pub kind: FieldKind,
}

/// Flattens a form tree into its ordered sequence of addressable fields.
///
/// Pre-order traversal: containers contribute no entry themselves, their
/// children are visited in authored order, and only field leaves are
/// emitted. Pure function of the tree — flattening the same tree twice
/// yields an identical sequence.
pub fn flatten(form: &FormTree) -> Vec<FlattenedField> {
    let mut fields = Vec::new();
    visit(form, &form.root_id, &mut fields);
    fields
}

fn visit(form: &FormTree, element_id: &str, fields: &mut Vec<FlattenedField>) {
    // The tree was validated closed at load time; an unknown id here
    // would mean the document was mutated after loading.
    let Some(element) = form.elements.get(element_id) else {
        return;
    };
    match element {
        FormElement::Container(container) => {
            for child_id in &container.children {
                visit(form, child_id, fields);
            }
        }
        FormElement::Field(leaf) => {
            fields.push(FlattenedField {
                position: fields.len(),
                element_id: leaf.element_id.clone(),
                node_id: leaf.node_id.clone(),
                input_name: leaf.field_name.clone(),
                label: leaf.label.clone(),
                kind: leaf.kind.clone(),
            });
        }
        FormElement::Static { .. } => {}
    }
}

use crate::cell::render_value;
use crate::cell::resolve_cell;
use crate::descriptor::GridDescriptor;
use crate::response::Row;
use crate::view::Element;
use crate::view::Tag;

/// Builds one body row.
///
/// When `rowClassField` is set, the row's value for that field becomes the
/// row's CSS class.
pub fn body_row(descriptor: &GridDescriptor, row: &Row) -> Element {
    let mut tr = Element::new(Tag::Tr);

    if let Some(field) = &descriptor.row_class_field
        && let Some(class) = row.get(field).and_then(render_value)
    {
        tr.add_class(&class);
    }

    for column in &descriptor.columns {
        let td = Element::new(Tag::Td);
        tr.push(match resolve_cell(row, column) {
            Some(html) => td.html(html),
            None => td,
        });
    }
    tr
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::descriptor::ColumnSpec;
    use crate::descriptor::GridOptions;

    #[test]
    fn test_row_class_and_cells() {
        let descriptor = GridOptions::new("/items")
            .row_class_field("state")
            .columns(vec![ColumnSpec::field("Id", "id"), ColumnSpec::field("Note", "note")])
            .resolve()
            .unwrap();
        let row = json!({"id": 0, "state": "late", "note": null});

        let tr = body_row(&descriptor, row.as_object().unwrap());

        assert_eq!(tr.to_html(), "<tr class=\"late\"><td>0</td><td></td></tr>");
    }

    #[test]
    fn test_missing_row_class_value() {
        let descriptor = GridOptions::new("/items")
            .row_class_field("state")
            .columns(vec![ColumnSpec::field("Id", "id")])
            .resolve()
            .unwrap();
        let row = json!({"id": 1});

        assert!(body_row(&descriptor, row.as_object().unwrap()).classes.is_empty());
    }
}

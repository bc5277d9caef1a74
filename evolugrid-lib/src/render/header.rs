use crate::descriptor::Column;
use crate::descriptor::GridDescriptor;
use crate::query::SortOrder;
use crate::view::Action;
use crate::view::Element;
use crate::view::Tag;

/// Builds the header row, with sort triggers on sortable columns.
pub fn header_row(descriptor: &GridDescriptor) -> Element {
    let mut tr = Element::new(Tag::Tr);
    for column in &descriptor.columns {
        tr.push(header_cell(column));
    }
    tr
}

fn header_cell(column: &Column) -> Element {
    let th = Element::new(Tag::Th).html(column.title.clone());
    match column.sort_key() {
        Some(key) if column.sortable => th
            .text(" ")
            .child(sort_trigger(key, SortOrder::Asc, "up"))
            .text(" ")
            .child(sort_trigger(key, SortOrder::Desc, "down")),
        _ => th,
    }
}

fn sort_trigger(key: &str, order: SortOrder, label: &str) -> Element {
    Element::new(Tag::A)
        .with_class(&format!("sort sort-{}", order.as_str()))
        .on_activate(Action::Sort {
            key: key.to_string(),
            order,
        })
        .child(Element::new(Tag::I).text(label))
}

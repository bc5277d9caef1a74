//! Render pipeline: response payload to container content.

mod body;
mod header;
mod pager;

use crate::descriptor::GridDescriptor;
use crate::response::ResponsePayload;
use crate::response::Row;
use crate::view::Element;
use crate::view::Tag;

pub use body::body_row;
pub use header::header_row;
pub use pager::PagerModel;
pub use pager::pager_element;

/// Class of the pager element.
pub const PAGER_CLASS: &str = "pager";

/// Class of the "no more results" indicator.
pub const NO_RESULTS_CLASS: &str = "noResults";

/// Which navigation chrome a full render adds below the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Discrete paging: a pager for the given zero-based page.
    Paging {
        /// Page being rendered.
        page: u64,
    },
    /// Infinite scroll: a hidden "no more results" indicator.
    Scroll,
}

/// Clears the container and rebuilds the table, header included.
pub fn full_render(container: &mut Element, descriptor: &GridDescriptor, payload: &ResponsePayload, mode: RenderMode) {
    container.clear();

    let mut table = Element::new(Tag::Table);
    if let Some(classes) = &descriptor.table_classes {
        table.add_class(classes);
    }
    table.push(header_row(descriptor));
    for row in &payload.data {
        table.push(body_row(descriptor, row));
    }
    container.push(table);

    match mode {
        RenderMode::Paging { page } => {
            let model = PagerModel::new(page, payload.count, descriptor.limit, payload.len());
            container.push(pager_element(descriptor, &model));
        }
        RenderMode::Scroll => {
            container.push(
                Element::div()
                    .with_class(NO_RESULTS_CLASS)
                    .hidden()
                    .text("No more results"),
            );
        }
    }
}

/// Appends body rows to the existing table.
///
/// Returns `false`, leaving the container untouched, when there is no table to
/// append to.
pub fn append_render(container: &mut Element, descriptor: &GridDescriptor, rows: &[Row]) -> bool {
    let Some(table) = container.find_mut(&|e| e.tag == Tag::Table) else {
        return false;
    };
    for row in rows {
        table.push(body_row(descriptor, row));
    }
    true
}

/// Reveals the "no more results" indicator, if this container has one.
pub fn reveal_no_results(container: &mut Element) -> bool {
    match container.find_mut(&|e| e.has_class(NO_RESULTS_CLASS)) {
        Some(indicator) => {
            indicator.hidden = false;
            true
        }
        None => false,
    }
}

/// Number of body rows currently rendered.
pub fn body_row_count(container: &Element) -> usize {
    container
        .find_by_tag(Tag::Table)
        .map(|table| table.elements().filter(|e| e.tag == Tag::Tr).count().saturating_sub(1))
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::descriptor::ColumnSpec;
    use crate::descriptor::GridOptions;

    fn descriptor() -> GridDescriptor {
        GridOptions::new("/items")
            .limit(2)
            .table_classes("table striped")
            .columns(vec![ColumnSpec::field("Id", "id").sortable()])
            .resolve()
            .unwrap()
    }

    fn rows(ids: &[u64]) -> Vec<Row> {
        ids.iter()
            .map(|id| json!({"id": id}).as_object().unwrap().clone())
            .collect()
    }

    #[test]
    fn test_full_render_paging() {
        let mut container = Element::div();
        let payload = ResponsePayload::new(Some(5), rows(&[1, 2]));

        full_render(&mut container, &descriptor(), &payload, RenderMode::Paging { page: 0 });

        let table = container.find_by_tag(Tag::Table).unwrap();
        assert_eq!(table.classes, vec!["table", "striped"]);
        assert_eq!(body_row_count(&container), 2);
        assert!(container.find_by_class(PAGER_CLASS).is_some());
        assert!(container.find_by_class(NO_RESULTS_CLASS).is_none());
    }

    #[test]
    fn test_full_render_replaces_previous_content() {
        let mut container = Element::div();
        let d = descriptor();
        full_render(&mut container, &d, &ResponsePayload::new(Some(5), rows(&[1, 2])), RenderMode::Paging { page: 0 });
        full_render(&mut container, &d, &ResponsePayload::new(Some(5), rows(&[5])), RenderMode::Paging { page: 2 });

        assert_eq!(container.elements().count(), 2);
        assert_eq!(body_row_count(&container), 1);
    }

    #[test]
    fn test_scroll_render_then_append() {
        let mut container = Element::div();
        let d = descriptor();
        full_render(&mut container, &d, &ResponsePayload::new(Some(3), rows(&[1, 2])), RenderMode::Scroll);

        let indicator = container.find_by_class(NO_RESULTS_CLASS).unwrap();
        assert!(indicator.hidden);
        assert!(container.find_by_class(PAGER_CLASS).is_none());

        assert!(append_render(&mut container, &d, &rows(&[3])));
        assert_eq!(body_row_count(&container), 3);

        assert!(reveal_no_results(&mut container));
        assert!(!container.find_by_class(NO_RESULTS_CLASS).unwrap().hidden);
    }

    #[test]
    fn test_append_without_table() {
        let mut container = Element::div();
        assert!(!append_render(&mut container, &descriptor(), &rows(&[1])));
        assert!(container.children.is_empty());
    }
}

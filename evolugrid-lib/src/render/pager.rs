use super::PAGER_CLASS;
use crate::descriptor::GridDescriptor;
use crate::view::Action;
use crate::view::Element;
use crate::view::Tag;

/// Navigation state shown by the pager for one rendered page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagerModel {
    /// Zero-based page number.
    pub page: u64,
    /// `floor(count / limit)`, or `None` when the total is unknown.
    pub page_count: Option<u64>,
    /// Whether the "previous" trigger is shown.
    pub has_previous: bool,
    /// Whether the "next" trigger is shown.
    pub has_next: bool,
}

impl PagerModel {
    /// Computes the pager for `page` given the response's total and size.
    ///
    /// Without a total, a full page is the only hint that more rows exist.
    pub fn new(page: u64, count: Option<u64>, limit: u64, rows: usize) -> Self {
        let page_count = count.map(|count| count / limit);
        let has_next = match page_count {
            Some(page_count) => page < page_count,
            None => rows as u64 == limit,
        };
        Self {
            page,
            page_count,
            has_previous: page > 0,
            has_next,
        }
    }

    /// Returns the label, e.g. `Page 2 / 5`, or `Page 2` without a total.
    pub fn label(&self) -> String {
        match self.page_count {
            Some(page_count) => format!(
                "Page {} / {}",
                self.page.saturating_add(1),
                page_count.saturating_add(1)
            ),
            None => format!("Page {}", self.page.saturating_add(1)),
        }
    }
}

/// Builds the pager element.
pub fn pager_element(descriptor: &GridDescriptor, model: &PagerModel) -> Element {
    let mut pager = Element::div().with_class(PAGER_CLASS);
    if let Some(id) = &descriptor.pager_target_id {
        pager = pager.with_id(id.clone());
    }

    if descriptor.export_csv {
        pager.push(
            Element::new(Tag::Span)
                .with_class("export-csv")
                .on_activate(Action::ExportCsv)
                .child(Element::new(Tag::I).with_class("icon-file pointer"))
                .text("Export to CSV"),
        );
    }

    if model.has_previous {
        pager.push(
            Element::new(Tag::I)
                .with_class("icon-chevron-left pointer pager-cursor pager-previous")
                .on_activate(Action::Page(model.page - 1))
                .text("<"),
        );
    }

    pager.push(Element::new(Tag::Span).with_class("pager-label").text(model.label()));

    if model.has_next {
        pager.push(
            Element::new(Tag::I)
                .with_class("icon-chevron-right pointer pager-cursor pager-next")
                .on_activate(Action::Page(model.page.saturating_add(1)))
                .text(">"),
        );
    }

    pager
}

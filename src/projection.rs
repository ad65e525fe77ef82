use crate::model::{Input, InputKind};

/// One page of inputs of a single kind, as shown in the admin table.
#[derive(Debug, Clone, PartialEq)]
pub struct InputPage<'a> {
    /// The inputs on the requested page, in their original relative order.
    pub visible: Vec<&'a Input>,
    /// 1-based page number that was requested.
    pub page_number: usize,
    /// `ceil(matching / page_size)`; zero when nothing matches.
    pub total_pages: usize,
    /// Number of inputs of the selected kind across all pages.
    pub total_items: usize,
}

impl InputPage<'_> {
    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1 && self.page_number <= self.total_pages
    }

    pub fn has_next(&self) -> bool {
        self.page_number >= 1 && self.page_number < self.total_pages
    }
}

/// Filters `inputs` down to `kind` and returns page `page_number` (1-based).
///
/// Page numbers outside `1..=total_pages` produce an empty page rather than
/// an error, since the host may hold a stale page after switching kinds.
/// A `page_size` of zero yields no pages.
pub fn project(
    inputs: &[Input],
    kind: InputKind,
    page_size: usize,
    page_number: usize,
) -> InputPage<'_> {
    let matching: Vec<&Input> = inputs.iter().filter(|i| i.kind() == kind).collect();
    let total_items = matching.len();

    if page_size == 0 {
        return InputPage {
            visible: Vec::new(),
            page_number,
            total_pages: 0,
            total_items,
        };
    }

    let total_pages = total_items.div_ceil(page_size);
    let visible = match page_number.checked_sub(1) {
        Some(index) if page_number <= total_pages => matching
            .into_iter()
            .skip(index * page_size)
            .take(page_size)
            .collect(),
        _ => Vec::new(),
    };

    InputPage {
        visible,
        page_number,
        total_pages,
        total_items,
    }
}

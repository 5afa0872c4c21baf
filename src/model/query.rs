use super::report::{Category, Report};
use super::user::User;

/// Filter over a record type.
pub trait Query<T> {
    fn accepts(&self, record: &T) -> bool;
}

/// Case-insensitive substring test of `needle` against any of `haystacks`.
///
/// An empty (or whitespace-only) needle matches everything.
fn text_matches<'a>(needle: &str, haystacks: impl IntoIterator<Item = &'a str>) -> bool {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    haystacks
        .into_iter()
        .any(|h| h.to_lowercase().contains(&needle))
}

/// Search parameters for the report list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportQuery {
    pub text: String,
    pub include_deleted: bool,
    pub category: Option<Category>,
}

impl Query<Report> for ReportQuery {
    fn accepts(&self, report: &Report) -> bool {
        if report.deleted && !self.include_deleted {
            return false;
        }
        if let Some(category) = self.category
            && report.category != category
        {
            return false;
        }
        text_matches(
            &self.text,
            [
                report.caller_name.as_str(),
                report.caller_phone.as_str(),
                report.location.as_str(),
                report.summary.as_str(),
                report.narrative.as_str(),
            ],
        )
    }
}

/// Search parameters for the user list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    pub text: String,
    pub include_deleted: bool,
}

impl Query<User> for UserQuery {
    fn accepts(&self, user: &User) -> bool {
        if user.deleted && !self.include_deleted {
            return false;
        }
        text_matches(
            &self.text,
            [
                user.username.as_str(),
                user.full_name.as_str(),
                user.email.as_str(),
            ],
        )
    }
}

/// One page of results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Zero-based page number actually returned.
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page + 1 < self.page_count
    }

    pub fn has_prev(&self) -> bool {
        self.page > 0
    }
}

/// Slices `items` into the requested page.
///
/// Out-of-range page numbers clamp to the last page. An empty input yields a
/// single empty page. A `per_page` of zero is treated as one.
pub fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total = items.len();
    let page_count = total.div_ceil(per_page).max(1);
    let page = page.min(page_count - 1);
    let items = items
        .into_iter()
        .skip(page * per_page)
        .take(per_page)
        .collect();
    Page {
        items,
        page,
        page_count,
        total,
    }
}

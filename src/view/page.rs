use crate::config::ClientConfig;
use crate::pagination::PageInfo;
use crate::params::QueryParams;

/// List state owned by one page for as long as it is active. Changing the filter or the
/// search term returns to the first page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    pub page: u32,
    pub limit: u32,
    /// Query key the filter is sent under, e.g. `status` or `role`.
    pub filter_key: &'static str,
    pub filter: Option<String>,
    pub search: String,
}

impl PageState {
    pub fn new(filter_key: &'static str, limit: u32) -> Self {
        Self { page: 1, limit, filter_key, filter: None, search: String::new() }
    }

    /// First page at the configured page size.
    pub fn from_config(filter_key: &'static str, config: &ClientConfig) -> Self { Self::new(filter_key, config.page_limit) }

    /// Returns true when the state changed and the list should be reloaded.
    pub fn set_search(&mut self, term: &str) -> bool {
        let term = term.trim();
        if term == self.search { return false; }
        self.search = term.to_string();
        self.page = 1;
        true
    }

    pub fn set_filter(&mut self, value: Option<&str>) -> bool {
        let value = value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string);
        if value == self.filter { return false; }
        self.filter = value;
        self.page = 1;
        true
    }

    pub fn next_page(&mut self, info: &PageInfo) -> bool {
        if !info.has_next { return false; }
        self.page += 1;
        true
    }

    pub fn prev_page(&mut self) -> bool {
        if self.page <= 1 { return false; }
        self.page -= 1;
        true
    }

    pub fn to_params(&self) -> QueryParams {
        QueryParams::new()
            .page(self.page)
            .limit(self.limit)
            .with_opt(self.filter_key, self.filter.as_deref())
            .search(&self.search)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::DisplayRange;

    #[test]
    fn filter_and_search_reset_page() {
        let mut s = PageState::new("status", 10);
        s.page = 3;
        assert!(s.set_filter(Some("pending")));
        assert_eq!(s.page, 1);
        s.page = 2;
        assert!(s.set_search("  wifi "));
        assert_eq!(s.page, 1);
        assert!(!s.set_search("wifi"));
        assert_eq!(s.to_params().to_query_string(), "page=1&limit=10&status=pending&search=wifi");
    }

    #[test]
    fn clearing_filter_drops_param() {
        let mut s = PageState::new("role", 20);
        s.set_filter(Some("admin"));
        assert!(s.set_filter(Some("")));
        assert_eq!(s.to_params().to_query_string(), "page=1&limit=20");
    }

    #[test]
    fn paging_respects_bounds() {
        let mut s = PageState::new("status", 10);
        assert!(!s.prev_page());
        let info = PageInfo { range: DisplayRange::compute(1, 10, 25), has_prev: false, has_next: true };
        assert!(s.next_page(&info));
        assert_eq!(s.page, 2);
        let last = PageInfo { range: DisplayRange::compute(3, 10, 25), has_prev: true, has_next: false };
        assert!(!s.next_page(&last));
        assert!(s.prev_page());
        assert_eq!(s.page, 1);
    }

    #[test]
    fn configured_page_size_reaches_params() {
        let s = PageState::from_config("status", &ClientConfig::default().with_page_limit(15));
        assert_eq!(s.to_params().to_query_string(), "page=1&limit=15");
        assert_eq!(PageState::from_config("role", &ClientConfig::default()).limit, 10);
    }
}

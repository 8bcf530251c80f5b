//! Request query parameters.
//! Keys keep insertion order, a key set twice keeps only its last value, and absent or
//! empty values are never serialized.

use std::fmt::Display;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self { Self::default() }

    /// Set `key` to `value`; an empty value removes the key instead.
    pub fn set<V: Display>(&mut self, key: &str, value: V) -> &mut Self {
        let v = value.to_string();
        self.pairs.retain(|(k, _)| k != key);
        if !v.is_empty() { self.pairs.push((key.to_string(), v)); }
        self
    }

    /// `set` when `value` is present, otherwise remove the key.
    pub fn set_opt<V: Display>(&mut self, key: &str, value: Option<V>) -> &mut Self {
        match value {
            Some(v) => self.set(key, v),
            None => { self.pairs.retain(|(k, _)| k != key); self }
        }
    }

    pub fn with<V: Display>(mut self, key: &str, value: V) -> Self { self.set(key, value); self }

    pub fn with_opt<V: Display>(mut self, key: &str, value: Option<V>) -> Self { self.set_opt(key, value); self }

    pub fn page(self, page: u32) -> Self { self.with("page", page) }
    pub fn limit(self, limit: u32) -> Self { self.with("limit", limit) }
    pub fn search(self, search: &str) -> Self { self.with("search", search.trim()) }
    pub fn status(self, status: impl Display) -> Self { self.with("status", status) }
    pub fn role(self, role: impl Display) -> Self { self.with("role", role) }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    pub fn is_empty(&self) -> bool { self.pairs.is_empty() }
    pub fn len(&self) -> usize { self.pairs.len() }

    /// Percent-encoded `k=v&k=v` without a leading `?`.
    pub fn to_query_string(&self) -> String {
        self.pairs
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// `endpoint` with `?query` appended only when there is something to append.
    pub fn append_to(&self, endpoint: &str) -> String {
        if self.pairs.is_empty() { return endpoint.to_string(); }
        format!("{}?{}", endpoint, self.to_query_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_values_are_omitted() {
        let p = QueryParams::new()
            .page(1)
            .limit(10)
            .with("search", "")
            .with_opt::<&str>("status", None)
            .with_opt("role", Some("admin"));
        assert_eq!(p.to_query_string(), "page=1&limit=10&role=admin");
    }

    #[test]
    fn repeated_keys_appear_once() {
        let mut p = QueryParams::new().page(1);
        p.set("page", 3);
        p.set("search", "wifi");
        p.set("search", "wifi lab");
        assert_eq!(p.len(), 2);
        assert_eq!(p.to_query_string(), "page=3&search=wifi%20lab");
    }

    #[test]
    fn clearing_a_key_with_empty_value() {
        let mut p = QueryParams::new().status("pending");
        p.set("status", "");
        assert!(p.is_empty());
        assert_eq!(p.append_to("/complaints"), "/complaints");
    }

    #[test]
    fn special_characters_are_encoded() {
        let p = QueryParams::new().search("a&b=c");
        assert_eq!(p.append_to("/users"), "/users?search=a%26b%3Dc");
    }
}

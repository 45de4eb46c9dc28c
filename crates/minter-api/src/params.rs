//! Ordered query parameters for a single node request.
//!
//! Optional arguments are pushed only when present. Presence is decided by
//! `Option`, never by value, so `height = 0` is still sent.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pairs: Vec<(String, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((name.into(), value.to_string()));
        self
    }

    pub fn optional<V: ToString>(self, name: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.required(name, value),
            None => self,
        }
    }

    /// Push `name=true` when `enabled`; the node only checks for the literal.
    pub fn flag(self, name: impl Into<String>, enabled: bool) -> Self {
        if enabled {
            self.required(name, "true")
        } else {
            self
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn as_pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            pairs: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optional_none_is_omitted_and_zero_is_kept() {
        let params = QueryParams::new()
            .required("pub_key", "Mp01")
            .optional("height", None::<u64>)
            .optional("limit", Some(0u32));
        assert_eq!(params.get("height"), None);
        assert_eq!(params.get("limit"), Some("0"));
        assert_eq!(params.len(), 2);
    }

    #[test]
    fn flag_only_pushes_literal_true() {
        let on = QueryParams::new().flag("include_stakes", true);
        assert_eq!(on.as_pairs(), &[("include_stakes".to_owned(), "true".to_owned())]);

        let off = QueryParams::new().flag("include_stakes", false);
        assert!(off.is_empty());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let params = QueryParams::new()
            .required("coin_to_sell", "MNT")
            .required("value_to_sell", "1000")
            .required("coin_to_buy", "BELT")
            .optional("height", Some(7u64));
        let keys: Vec<&str> = params.as_pairs().iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["coin_to_sell", "value_to_sell", "coin_to_buy", "height"]);
    }

    #[test]
    fn collects_from_pairs() {
        let params: QueryParams = [("query", "tags.tx.from='Mx01'")].into_iter().collect();
        assert_eq!(params.get("query"), Some("tags.tx.from='Mx01'"));
    }
}

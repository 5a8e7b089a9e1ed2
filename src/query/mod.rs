use hashbrown::hash_map::Entry;
use std::sync::Arc;
use url::form_urlencoded;

use crate::location::LocationStore;
use crate::params::{ParamValue, ParamsMap};

/// Query-string view over the shared location store.
///
/// `data()` is always parsed from the current `search`, so it shares the
/// location epoch and can never lag behind a committed navigation.
#[derive(Debug, Clone)]
pub struct QueryStore {
    location: Arc<LocationStore>,
}

impl QueryStore {
    pub fn new(location: Arc<LocationStore>) -> Self {
        Self { location }
    }

    pub fn location(&self) -> &Arc<LocationStore> {
        &self.location
    }

    pub fn epoch(&self) -> u64 {
        self.location.epoch()
    }

    pub fn data(&self) -> ParamsMap {
        parse_query(&self.location.search())
    }

    pub fn get(&self, key: &str) -> Option<ParamValue> {
        self.data().remove(key)
    }

    /// Merge-writes `partial` over the current query data and commits the
    /// result with `replace`, preserving pathname and state.
    pub fn update(&self, partial: ParamsMap) {
        let snapshot = self.location.snapshot();
        let mut data = parse_query(&snapshot.search);
        for (key, value) in partial {
            data.insert(key, value);
        }
        let url = append_query(&snapshot.pathname, &serialize_query(&data));
        self.location.replace(&url, snapshot.state);
    }
}

/// Parses a search string; repeated keys accumulate into a `List` in
/// encounter order.
pub fn parse_query(search: &str) -> ParamsMap {
    let raw = search.trim_start_matches('?');
    let mut data = ParamsMap::new();
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        let key = key.into_owned();
        let value = value.into_owned();
        match data.entry(key) {
            Entry::Occupied(mut entry) => match entry.get_mut() {
                ParamValue::Single(existing) => {
                    let first = std::mem::take(existing);
                    entry.insert(ParamValue::List(vec![first, value]));
                }
                ParamValue::List(values) => {
                    values.push(value);
                }
            },
            Entry::Vacant(entry) => {
                entry.insert(ParamValue::Single(value));
            }
        }
    }
    data
}

/// Serializes query data with keys in lexicographic order, so the same data
/// always produces the same search string.
pub fn serialize_query(data: &ParamsMap) -> String {
    let mut keys: Vec<&String> = data.keys().collect();
    keys.sort();
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for key in keys {
        match &data[key] {
            ParamValue::Single(value) => {
                serializer.append_pair(key, value);
            }
            ParamValue::List(values) => {
                for value in values {
                    serializer.append_pair(key, value);
                }
            }
        }
    }
    serializer.finish()
}

pub fn append_query(pathname: &str, query: &str) -> String {
    if query.is_empty() {
        pathname.to_string()
    } else {
        format!("{pathname}?{query}")
    }
}

//! The query string codec.
//!
//! Queries are modelled as ordered maps from variable names to values,
//! where a value is either a string or another map.  Nested maps are written
//! with bracket notation (`user[name]=Bob`), and lists are maps with the
//! keys `0`, `1`, `2`, ...  Insertion order is always preserved.

use super::codec::{urldecode, urlencode};
use indexmap::IndexMap;
use std::borrow::Cow;

/// An ordered mapping of query variable names to their values.
pub type QueryMap = IndexMap<String, QueryValue>;

/// The value of a single query variable.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_::Serialize, serde_::Deserialize),
    serde(crate = "serde_", untagged)
)]
pub enum QueryValue {
    /// A plain, decoded value.
    String(String),

    /// A nested mapping, written as `name[key]=value`.
    Map(QueryMap),
}

impl QueryValue {
    /// Build a list value; its items are keyed `0`, `1`, `2`, ...
    ///
    /// ```rust
    /// use uriclean::{build_query, QueryMap, QueryValue};
    ///
    /// let mut query = QueryMap::new();
    /// query.insert("pastimes".into(), QueryValue::list(["golf", "opera"]));
    /// assert_eq!("pastimes%5B0%5D=golf&pastimes%5B1%5D=opera", build_query(&query));
    /// ```
    pub fn list<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<QueryValue>,
    {
        QueryValue::Map(
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| (i.to_string(), item.into()))
                .collect(),
        )
    }

    /// Borrow the value as a string, if it is one.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            QueryValue::String(value) => Some(value),
            QueryValue::Map(_) => None,
        }
    }

    /// Borrow the value as a nested mapping, if it is one.
    #[must_use]
    pub fn as_map(&self) -> Option<&QueryMap> {
        match self {
            QueryValue::String(_) => None,
            QueryValue::Map(map) => Some(map),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::String(value.to_owned())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::String(value)
    }
}

impl From<QueryMap> for QueryValue {
    fn from(map: QueryMap) -> Self {
        QueryValue::Map(map)
    }
}

macro_rules! query_value_from_integer {
    ($($t:ty),*) => {
        $(
            impl From<$t> for QueryValue {
                fn from(value: $t) -> Self {
                    QueryValue::String(value.to_string())
                }
            }
        )*
    };
}

query_value_from_integer!(i32, i64, u16, u32, u64, usize);

/// The query of a URL, either still encoded or decoded into a mapping.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde_::Serialize, serde_::Deserialize),
    serde(crate = "serde_", untagged)
)]
pub enum Query {
    /// The raw query string, without the leading `?`.
    Encoded(String),

    /// The decoded variables.
    Decoded(QueryMap),
}

impl Query {
    /// Borrow or decode the query variables.
    #[must_use]
    pub fn to_map(&self) -> Cow<'_, QueryMap> {
        match self {
            Query::Encoded(query) => Cow::Owned(parse_query(query)),
            Query::Decoded(map) => Cow::Borrowed(map),
        }
    }

    /// Whether there is nothing in the query.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Query::Encoded(query) => query.is_empty(),
            Query::Decoded(map) => map.is_empty(),
        }
    }
}

impl From<&str> for Query {
    fn from(query: &str) -> Self {
        Query::Encoded(query.to_owned())
    }
}

impl From<String> for Query {
    fn from(query: String) -> Self {
        Query::Encoded(query)
    }
}

impl From<QueryMap> for Query {
    fn from(map: QueryMap) -> Self {
        Query::Decoded(map)
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Query::Encoded(query) => f.write_str(query),
            Query::Decoded(map) => f.write_str(&build_query(map)),
        }
    }
}

/// Serialise query variables as `key=value&key2=value2`.
///
/// Names and values are form-encoded (a space becomes `+`, a `/` becomes
/// `%2F`), and nested mappings are written with encoded bracket notation.
///
/// ```rust
/// use uriclean::{build_query, QueryMap, QueryValue};
///
/// let mut user = QueryMap::new();
/// user.insert("name".into(), "Bob Smith".into());
/// user.insert("age".into(), 47.into());
/// let mut query = QueryMap::new();
/// query.insert("user".into(), QueryValue::Map(user));
/// assert_eq!("user%5Bname%5D=Bob+Smith&user%5Bage%5D=47", build_query(&query));
/// ```
#[must_use]
pub fn build_query(map: &QueryMap) -> String {
    let mut pairs = Vec::new();
    for (key, value) in map {
        append_pair(&mut pairs, urlencode(key), value);
    }
    pairs.join("&")
}

fn append_pair(pairs: &mut Vec<String>, key: String, value: &QueryValue) {
    match value {
        QueryValue::String(value) => pairs.push(format!("{}={}", key, urlencode(value))),
        QueryValue::Map(map) => {
            for (child, value) in map {
                append_pair(pairs, format!("{}%5B{}%5D", key, urlencode(child)), value);
            }
        }
    }
}

/// Decode a query string into its variables.
///
/// `+` decodes to a space and `%XX` triplets are decoded.  Bracketed names
/// rebuild nested mappings, and `name[]` appends to an implicit list.  A
/// repeated plain name overwrites the earlier value but keeps its position.
#[must_use]
pub fn parse_query(query: &str) -> QueryMap {
    let mut map = QueryMap::new();
    for pair in query.split('&').filter(|pair| !pair.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        let key = urldecode(key);
        let (base, path) = split_key(&key);
        if base.is_empty() {
            continue;
        }
        insert(&mut map, base.to_owned(), &path, urldecode(value));
    }
    map
}

/// Split `a[b][c]` into `a` and `["b", "c"]`.  A name with unbalanced
/// brackets is taken literally.
fn split_key(key: &str) -> (&str, Vec<&str>) {
    let Some(open) = key.find('[') else {
        return (key, vec![]);
    };
    let mut segments = vec![];
    let mut rest = &key[open..];
    while let Some(stripped) = rest.strip_prefix('[') {
        let Some(close) = stripped.find(']') else {
            break;
        };
        segments.push(&stripped[..close]);
        rest = &stripped[close + 1..];
    }
    if segments.is_empty() {
        (key, segments)
    } else {
        (&key[..open], segments)
    }
}

fn insert(map: &mut QueryMap, key: String, path: &[&str], value: String) {
    let Some((next, rest)) = path.split_first() else {
        map.insert(key, QueryValue::String(value));
        return;
    };
    let entry = map
        .entry(key)
        .or_insert_with(|| QueryValue::Map(QueryMap::new()));
    if let QueryValue::String(_) = entry {
        *entry = QueryValue::Map(QueryMap::new());
    }
    if let QueryValue::Map(child) = entry {
        let next = if next.is_empty() {
            next_index(child)
        } else {
            (*next).to_owned()
        };
        insert(child, next, rest, value);
    }
}

/// The key for an `a[]` value: one past the largest numeric key, or the
/// first unused number once `u64::MAX` is taken.
fn next_index(map: &QueryMap) -> String {
    let next = map
        .keys()
        .filter_map(|key| key.parse::<u64>().ok())
        .max()
        .map_or(Some(0), |max| max.checked_add(1));
    match next {
        Some(next) => next.to_string(),
        None => (0..)
            .map(|index: u64| index.to_string())
            .find(|key| !map.contains_key(key))
            .unwrap_or_default(),
    }
}

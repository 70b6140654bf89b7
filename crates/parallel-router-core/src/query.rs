//! Ordered query-string parameters.
//!
//! Parsing and serialization follow `application/x-www-form-urlencoded`
//! rules: `+` decodes to a space and every non-unreserved byte is
//! percent-encoded on output. Parameter order survives a round trip, so
//! rewriting one key never reorders the keys owned by the host page.

use std::borrow::Cow;
use std::fmt;

/// An ordered list of query-string key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
	pairs: Vec<(String, String)>,
}

impl QueryParams {
	/// Creates an empty parameter list.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses a query string, with or without the leading `?`.
	///
	/// Empty segments (`a=1&&b=2`) are skipped. A segment without `=` is
	/// read as a key with an empty value.
	pub fn parse(search: &str) -> Self {
		let search = search.strip_prefix('?').unwrap_or(search);
		let pairs = search
			.split('&')
			.filter(|segment| !segment.is_empty())
			.map(|segment| {
				let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
				(decode_component(key), decode_component(value))
			})
			.collect();

		Self { pairs }
	}

	/// Returns the first value for `name`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.pairs
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	/// Returns every value for `name`, in order.
	pub fn get_all(&self, name: &str) -> Vec<&str> {
		self.pairs
			.iter()
			.filter(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
			.collect()
	}

	/// Returns whether `name` is present.
	pub fn contains(&self, name: &str) -> bool {
		self.pairs.iter().any(|(key, _)| key == name)
	}

	/// Sets `name` to `value`.
	///
	/// The first existing occurrence is overwritten in place and any later
	/// duplicates are dropped; if the key is absent it is appended.
	pub fn set(&mut self, name: &str, value: impl Into<String>) {
		let value = value.into();
		match self.pairs.iter().position(|(key, _)| key == name) {
			Some(index) => {
				self.pairs[index].1 = value;
				let mut seen = 0usize;
				self.pairs.retain(|(key, _)| {
					if key != name {
						return true;
					}
					seen += 1;
					seen == 1
				});
			}
			None => self.pairs.push((name.to_string(), value)),
		}
	}

	/// Removes every occurrence of `name`.
	pub fn delete(&mut self, name: &str) {
		self.pairs.retain(|(key, _)| key != name);
	}

	/// Appends a pair without touching existing occurrences.
	pub fn append(&mut self, name: impl Into<String>, value: impl Into<String>) {
		self.pairs.push((name.into(), value.into()));
	}

	/// Returns the number of pairs.
	pub fn len(&self) -> usize {
		self.pairs.len()
	}

	/// Returns whether there are no pairs.
	pub fn is_empty(&self) -> bool {
		self.pairs.is_empty()
	}

	/// Iterates over the pairs in order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
	}

	/// Serializes without the leading `?`.
	pub fn to_query_string(&self) -> String {
		self.pairs
			.iter()
			.map(|(key, value)| {
				format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
			})
			.collect::<Vec<_>>()
			.join("&")
	}

	/// Serializes as a `search` component: `?a=1` or the empty string.
	pub fn to_search(&self) -> String {
		if self.pairs.is_empty() {
			String::new()
		} else {
			format!("?{}", self.to_query_string())
		}
	}
}

impl fmt::Display for QueryParams {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.to_query_string())
	}
}

impl<K, V> FromIterator<(K, V)> for QueryParams
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			pairs: iter
				.into_iter()
				.map(|(k, v)| (k.into(), v.into()))
				.collect(),
		}
	}
}

fn decode_component(raw: &str) -> String {
	let raw: Cow<'_, str> = if raw.contains('+') {
		Cow::Owned(raw.replace('+', " "))
	} else {
		Cow::Borrowed(raw)
	};

	match urlencoding::decode(&raw) {
		Ok(decoded) => decoded.into_owned(),
		// Percent-escapes that do not form UTF-8 degrade to replacement chars
		Err(_) => String::from_utf8_lossy(&urlencoding::decode_binary(raw.as_bytes())).into_owned(),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("", 0)]
	#[case("?", 0)]
	#[case("?a=1", 1)]
	#[case("a=1&b=2", 2)]
	#[case("?a=1&&b=2&", 2)]
	fn test_parse_counts(#[case] search: &str, #[case] expected: usize) {
		assert_eq!(QueryParams::parse(search).len(), expected);
	}

	#[rstest]
	fn test_parse_decodes_components() {
		let params = QueryParams::parse("?parallel=%2Fuser%2F123&q=hello+world&flag");

		assert_eq!(params.get("parallel"), Some("/user/123"));
		assert_eq!(params.get("q"), Some("hello world"));
		assert_eq!(params.get("flag"), Some(""));
		assert_eq!(params.get("missing"), None);
	}

	#[rstest]
	fn test_parse_invalid_utf8_is_lossy() {
		let params = QueryParams::parse("?x=%FF");
		assert_eq!(params.get("x"), Some("\u{FFFD}"));
	}

	#[rstest]
	fn test_set_appends_new_key() {
		// Arrange
		let mut params = QueryParams::parse("?tab=2&sort=asc");

		// Act
		params.set("parallel", "/settings");

		// Assert
		assert_eq!(
			params.iter().collect::<Vec<_>>(),
			vec![("tab", "2"), ("sort", "asc"), ("parallel", "/settings")]
		);
	}

	#[rstest]
	fn test_set_replaces_in_place_and_drops_duplicates() {
		// Arrange
		let mut params = QueryParams::parse("?a=1&parallel=/x&b=2&parallel=/y");

		// Act
		params.set("parallel", "/z");

		// Assert
		assert_eq!(
			params.iter().collect::<Vec<_>>(),
			vec![("a", "1"), ("parallel", "/z"), ("b", "2")]
		);
	}

	#[rstest]
	fn test_delete_removes_all_occurrences() {
		let mut params = QueryParams::parse("?parallel=/x&a=1&parallel=/y");

		params.delete("parallel");

		assert_eq!(params.iter().collect::<Vec<_>>(), vec![("a", "1")]);
	}

	#[rstest]
	fn test_delete_missing_is_noop() {
		let mut params = QueryParams::parse("?a=1");
		let before = params.clone();

		params.delete("parallel");

		assert_eq!(params, before);
	}

	#[rstest]
	fn test_to_search_encodes_path() {
		let mut params = QueryParams::new();
		params.set("parallel", "/user/123");

		assert_eq!(params.to_search(), "?parallel=%2Fuser%2F123");
	}

	#[rstest]
	fn test_to_search_empty() {
		assert_eq!(QueryParams::new().to_search(), "");
	}

	#[rstest]
	fn test_get_all() {
		let params = QueryParams::parse("?tag=a&tag=b&x=1");
		assert_eq!(params.get_all("tag"), vec!["a", "b"]);
	}
}

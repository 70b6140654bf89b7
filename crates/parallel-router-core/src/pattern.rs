//! Path pattern matching for sidebar routes.
//!
//! Supports patterns like:
//! - `/settings` - Exact match
//! - `/user/:id` - Single path parameter
//! - `/user/:user_id/posts/:post_id` - Multiple parameters
//! - `/files/*` - Splat matching the rest of the path, captured as `*`
//!
//! Static segments compare case-sensitively. A single trailing slash on the
//! matched path is tolerated.

use crate::error::{ParallelRouterError, Result};
use std::collections::HashMap;

/// Parameter name under which a trailing `*` is captured.
pub const SPLAT_PARAM: &str = "*";

/// Maximum allowed length for a pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled pattern regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
	Static(String),
	Param(String),
	Splat,
}

/// A compiled path pattern.
#[derive(Debug, Clone)]
pub struct PathPattern {
	/// The original pattern string.
	pattern: String,
	/// Parsed segments, used for reverse lookups.
	segments: Vec<Segment>,
	/// Compiled regex. Capture groups are positional (`p0`, `p1`, ...) so
	/// any parameter name is accepted.
	regex: regex::Regex,
	/// Parameter names in order, `*` last if present.
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compiles a pattern string.
	///
	/// # Errors
	///
	/// Returns [`ParallelRouterError::InvalidPattern`] if:
	/// - the pattern exceeds 1024 bytes or 32 segments
	/// - a `:` segment has no name, or a name repeats
	/// - `*` appears anywhere but the final segment
	pub fn new(pattern: &str) -> Result<Self> {
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(ParallelRouterError::invalid_pattern(
				pattern,
				format!(
					"length {} exceeds maximum allowed length of {} bytes",
					pattern.len(),
					MAX_PATTERN_LENGTH
				),
			));
		}

		let raw_segments: Vec<&str> = pattern.split('/').filter(|s| !s.is_empty()).collect();
		if raw_segments.len() > MAX_PATH_SEGMENTS {
			return Err(ParallelRouterError::invalid_pattern(
				pattern,
				format!(
					"{} path segments exceed maximum of {}",
					raw_segments.len(),
					MAX_PATH_SEGMENTS
				),
			));
		}

		let mut segments = Vec::with_capacity(raw_segments.len());
		let mut param_names: Vec<String> = Vec::new();
		let last = raw_segments.len().saturating_sub(1);

		for (i, raw) in raw_segments.iter().enumerate() {
			if *raw == SPLAT_PARAM {
				if i != last {
					return Err(ParallelRouterError::invalid_pattern(
						pattern,
						"`*` is only allowed as the final segment",
					));
				}
				param_names.push(SPLAT_PARAM.to_string());
				segments.push(Segment::Splat);
			} else if let Some(name) = raw.strip_prefix(':') {
				if name.is_empty() {
					return Err(ParallelRouterError::invalid_pattern(
						pattern,
						"empty parameter name",
					));
				}
				if param_names.iter().any(|n| n == name) {
					return Err(ParallelRouterError::invalid_pattern(
						pattern,
						format!("duplicate parameter '{}'", name),
					));
				}
				param_names.push(name.to_string());
				segments.push(Segment::Param(name.to_string()));
			} else {
				segments.push(Segment::Static((*raw).to_string()));
			}
		}

		let regex_str = Self::compile_segments(&segments);
		let regex = regex::RegexBuilder::new(&regex_str)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| ParallelRouterError::invalid_pattern(pattern, e.to_string()))?;

		Ok(Self {
			pattern: pattern.to_string(),
			segments,
			regex,
			param_names,
		})
	}

	fn compile_segments(segments: &[Segment]) -> String {
		let mut regex_str = String::from("^");
		let mut group = 0usize;
		let mut has_splat = false;

		for segment in segments {
			match segment {
				Segment::Static(text) => {
					regex_str.push('/');
					regex_str.push_str(&regex::escape(text));
				}
				Segment::Param(_) => {
					regex_str.push_str(&format!("/(?P<p{}>[^/]+)", group));
					group += 1;
				}
				Segment::Splat => {
					// Matches the bare prefix too: `/files/*` accepts `/files`
					regex_str.push_str("(?:/(?P<splat>.*))?");
					has_splat = true;
				}
			}
		}

		if !has_splat {
			regex_str.push_str("/?");
		}
		regex_str.push('$');
		regex_str
	}

	/// Returns the original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names in declaration order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Returns whether this pattern has no parameters.
	pub fn is_exact(&self) -> bool {
		self.param_names.is_empty()
	}

	/// Attempts to match `path`, returning the extracted parameters.
	///
	/// Parameter values are percent-decoded. A path without a leading `/`
	/// is treated as if it had one.
	pub fn matches(&self, path: &str) -> Option<HashMap<String, String>> {
		let path = normalize_path(path);
		let caps = self.regex.captures(&path)?;

		let mut params = HashMap::with_capacity(self.param_names.len());
		let mut group = 0usize;
		for segment in &self.segments {
			match segment {
				Segment::Param(name) => {
					let value = caps.name(&format!("p{}", group))?.as_str();
					params.insert(name.clone(), decode_param(value));
					group += 1;
				}
				Segment::Splat => {
					let value = caps.name("splat").map(|m| m.as_str()).unwrap_or("");
					params.insert(SPLAT_PARAM.to_string(), decode_param(value));
				}
				Segment::Static(_) => {}
			}
		}

		Some(params)
	}

	/// Checks if this pattern would match the given path.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(&normalize_path(path))
	}

	/// Generates a path from this pattern with the given parameters.
	///
	/// Returns `None` if a named parameter is missing. A missing splat value
	/// is rendered as the bare prefix.
	pub fn reverse(&self, params: &HashMap<String, String>) -> Option<String> {
		let mut parts: Vec<&str> = Vec::with_capacity(self.segments.len());
		for segment in &self.segments {
			match segment {
				Segment::Static(text) => parts.push(text),
				Segment::Param(name) => parts.push(params.get(name)?),
				Segment::Splat => {
					if let Some(rest) = params.get(SPLAT_PARAM).filter(|r| !r.is_empty()) {
						parts.push(rest.trim_start_matches('/'));
					}
				}
			}
		}
		Some(format!("/{}", parts.join("/")))
	}
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for PathPattern {}

impl std::fmt::Display for PathPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}

/// Joins a child pattern onto its parent.
///
/// Absolute children (leading `/`) are kept as-is; an empty child yields the
/// parent.
pub fn join_patterns(parent: &str, child: &str) -> String {
	if child.starts_with('/') {
		return child.to_string();
	}
	let parent = parent.trim_end_matches('/');
	if child.is_empty() {
		if parent.is_empty() {
			"/".to_string()
		} else {
			parent.to_string()
		}
	} else {
		format!("{}/{}", parent, child)
	}
}

fn normalize_path(path: &str) -> std::borrow::Cow<'_, str> {
	if path.starts_with('/') {
		std::borrow::Cow::Borrowed(path)
	} else {
		std::borrow::Cow::Owned(format!("/{}", path))
	}
}

fn decode_param(raw: &str) -> String {
	urlencoding::decode(raw)
		.map(|s| s.into_owned())
		.unwrap_or_else(|_| raw.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_exact_pattern() {
		let pattern = PathPattern::new("/settings").unwrap();
		assert!(pattern.is_exact());
		assert!(pattern.is_match("/settings"));
		assert!(pattern.is_match("/settings/"));
		assert!(!pattern.is_match("/settings/extra"));
		assert!(!pattern.is_match("/Settings"));
	}

	#[rstest]
	fn test_single_param() {
		let pattern = PathPattern::new("/user/:id").unwrap();
		assert!(!pattern.is_exact());

		let params = pattern.matches("/user/123").unwrap();
		assert_eq!(params.get("id"), Some(&"123".to_string()));
		assert!(pattern.matches("/user/").is_none());
		assert!(pattern.matches("/user").is_none());
		assert!(pattern.matches("/user/1/2").is_none());
	}

	#[rstest]
	fn test_multiple_params() {
		let pattern = PathPattern::new("/user/:user_id/posts/:post_id").unwrap();
		let params = pattern.matches("/user/42/posts/7").unwrap();

		assert_eq!(params.get("user_id"), Some(&"42".to_string()));
		assert_eq!(params.get("post_id"), Some(&"7".to_string()));
		assert_eq!(pattern.param_names(), &["user_id", "post_id"]);
	}

	#[rstest]
	fn test_param_names_need_not_be_identifiers() {
		let pattern = PathPattern::new("/item/:item-id").unwrap();
		let params = pattern.matches("/item/9").unwrap();
		assert_eq!(params.get("item-id"), Some(&"9".to_string()));
	}

	#[rstest]
	fn test_params_are_percent_decoded() {
		let pattern = PathPattern::new("/tag/:name").unwrap();
		let params = pattern.matches("/tag/hello%20world").unwrap();
		assert_eq!(params.get("name"), Some(&"hello world".to_string()));
	}

	#[rstest]
	#[case("/files/a/b/c.txt", "a/b/c.txt")]
	#[case("/files/", "")]
	#[case("/files", "")]
	fn test_splat(#[case] path: &str, #[case] expected: &str) {
		let pattern = PathPattern::new("/files/*").unwrap();
		let params = pattern.matches(path).unwrap();
		assert_eq!(params.get(SPLAT_PARAM).map(String::as_str), Some(expected));
	}

	#[rstest]
	fn test_root_pattern() {
		let pattern = PathPattern::new("/").unwrap();
		assert!(pattern.is_match("/"));
		assert!(pattern.is_match(""));
		assert!(!pattern.is_match("/x"));
	}

	#[rstest]
	fn test_path_without_leading_slash() {
		let pattern = PathPattern::new("/settings").unwrap();
		assert!(pattern.is_match("settings"));
	}

	#[rstest]
	fn test_special_chars_escaped() {
		let pattern = PathPattern::new("/api/v1.0").unwrap();
		assert!(pattern.is_match("/api/v1.0"));
		assert!(!pattern.is_match("/api/v1X0"));
	}

	#[rstest]
	#[case("/a/:", "empty parameter name")]
	#[case("/a/:x/:x", "duplicate parameter")]
	#[case("/a/*/b", "final segment")]
	fn test_invalid_patterns(#[case] pattern: &str, #[case] reason: &str) {
		let err = PathPattern::new(pattern).unwrap_err();
		assert!(err.to_string().contains(reason), "{}", err);
	}

	#[rstest]
	fn test_pattern_rejects_excessive_length() {
		// Arrange
		let long_pattern = "/".to_string() + &"a".repeat(1025);

		// Act
		let result = PathPattern::new(&long_pattern);

		// Assert
		assert!(matches!(
			result,
			Err(ParallelRouterError::InvalidPattern { .. })
		));
	}

	#[rstest]
	fn test_pattern_rejects_excessive_segments() {
		let segments: Vec<&str> = (0..35).map(|_| "seg").collect();
		let pattern = format!("/{}", segments.join("/"));

		assert!(PathPattern::new(&pattern).is_err());
	}

	#[rstest]
	fn test_reverse() {
		let pattern = PathPattern::new("/user/:id/posts/:post").unwrap();
		let mut params = HashMap::new();
		params.insert("id".to_string(), "42".to_string());
		params.insert("post".to_string(), "7".to_string());

		assert_eq!(pattern.reverse(&params), Some("/user/42/posts/7".to_string()));
	}

	#[rstest]
	fn test_reverse_missing_param() {
		let pattern = PathPattern::new("/user/:id").unwrap();
		assert_eq!(pattern.reverse(&HashMap::new()), None);
	}

	#[rstest]
	fn test_reverse_splat() {
		let pattern = PathPattern::new("/files/*").unwrap();
		let mut params = HashMap::new();
		assert_eq!(pattern.reverse(&params), Some("/files".to_string()));

		params.insert(SPLAT_PARAM.to_string(), "a/b".to_string());
		assert_eq!(pattern.reverse(&params), Some("/files/a/b".to_string()));
	}

	#[rstest]
	#[case("/users", "settings", "/users/settings")]
	#[case("/users/", ":id", "/users/:id")]
	#[case("/users", "/abs", "/abs")]
	#[case("/users", "", "/users")]
	#[case("/", "", "/")]
	#[case("", "a", "/a")]
	fn test_join_patterns(#[case] parent: &str, #[case] child: &str, #[case] expected: &str) {
		assert_eq!(join_patterns(parent, child), expected);
	}

	#[rstest]
	fn test_pattern_display_and_equality() {
		let p1 = PathPattern::new("/user/:id").unwrap();
		let p2 = PathPattern::new("/user/:id").unwrap();
		let p3 = PathPattern::new("/user/:uid").unwrap();

		assert_eq!(format!("{}", p1), "/user/:id");
		assert_eq!(p1, p2);
		assert_ne!(p1, p3);
	}
}

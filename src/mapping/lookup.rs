use super::MappingError;
use serde_yaml::Value;

/// Split a request path into lookup segments.
///
/// Leading and trailing slashes are ignored, so `/a/b/`, `/a/b` and `a/b` all
/// yield `["a", "b"]`. An empty path (or `/`) yields no segments.
pub fn split_path(path: &str) -> Vec<&str> {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        Vec::new()
    } else {
        trimmed.split('/').collect()
    }
}

/// Walk `root` along `path` and return the string leaf it ends on.
///
/// A segment that parses as an integer must index into a sequence; any other
/// segment must name a key in a mapping. Every mismatch (wrong node kind, index
/// out of range, missing key, path continuing past a leaf) is reported as
/// [`MappingError::NotFound`].
pub fn lookup<'a>(root: &'a Value, path: &str) -> Result<&'a str, MappingError> {
    let segments = split_path(path);
    if segments.is_empty() {
        return Err(MappingError::EmptyPath);
    }

    let mut node = root;
    for segment in segments {
        node = step(node, segment).ok_or_else(|| MappingError::NotFound {
            path: path.to_string(),
        })?;
    }

    node.as_str().ok_or_else(|| MappingError::NotAString {
        path: path.to_string(),
    })
}

fn step<'a>(node: &'a Value, segment: &str) -> Option<&'a Value> {
    match segment.parse::<i64>() {
        Ok(index) => {
            let sequence = node.as_sequence()?;
            usize::try_from(index).ok().and_then(|i| sequence.get(i))
        }
        Err(_) => node.as_mapping()?.get(segment),
    }
}

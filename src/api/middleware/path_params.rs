//! Path parameter extraction stage.

use std::collections::HashMap;

use crate::api::pipeline::{RequestContext, Stage};
use crate::error::AppError;

/// Matches the request path against a fixed pattern such as `/:short_id`.
///
/// Pattern and path are both trimmed of `/` and split into segments. Segments
/// starting with `:` capture the corresponding path segment under that name;
/// all others must match literally.
///
/// # Errors
///
/// Halts with `404 Not Found` on a segment-count or literal mismatch.
pub struct PathParams {
    segments: Vec<Segment>,
}

enum Segment {
    Literal(String),
    Param(String),
}

impl PathParams {
    pub fn new(pattern: &str) -> Self {
        let segments = split(pattern)
            .map(|part| match part.strip_prefix(':') {
                Some(name) => Segment::Param(name.to_string()),
                None => Segment::Literal(part.to_string()),
            })
            .collect();

        Self { segments }
    }

    fn extract(&self, path: &str) -> Option<HashMap<String, String>> {
        let parts: Vec<&str> = split(path).collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Param(name) => {
                    params.insert(name.clone(), part.to_string());
                }
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
            }
        }

        Some(params)
    }
}

fn split(path: &str) -> std::str::Split<'_, char> {
    path.trim_matches('/').split('/')
}

impl Stage for PathParams {
    fn name(&self) -> &'static str {
        "path_params"
    }

    fn intercept(&self, ctx: &mut RequestContext) -> Result<(), AppError> {
        let params = self.extract(ctx.path()).ok_or(AppError::NotFound)?;
        ctx.set_path_params(params);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Method;

    fn run(pattern: &str, path: &str) -> Result<RequestContext, AppError> {
        let mut ctx = RequestContext::new(Method::GET, path, None);
        PathParams::new(pattern).intercept(&mut ctx)?;
        Ok(ctx)
    }

    #[test]
    fn test_single_param() {
        let ctx = run("/:short_id", "/1a2b3c4d").unwrap();
        assert_eq!(ctx.path_param("short_id"), Some("1a2b3c4d"));
    }

    #[test]
    fn test_trailing_slash_is_ignored() {
        let ctx = run("/:short_id", "/1a2b3c4d/").unwrap();
        assert_eq!(ctx.path_param("short_id"), Some("1a2b3c4d"));
    }

    #[test]
    fn test_extra_segments_not_found() {
        assert!(matches!(
            run("/:short_id", "/1a2b3c4d/extra"),
            Err(AppError::NotFound)
        ));
    }

    #[test]
    fn test_literal_segments() {
        let ctx = run("/links/:code", "/links/abc").unwrap();
        assert_eq!(ctx.path_param("code"), Some("abc"));

        assert!(matches!(
            run("/links/:code", "/other/abc"),
            Err(AppError::NotFound)
        ));
    }

    #[test]
    fn test_root_yields_empty_param() {
        let ctx = run("/:short_id", "/").unwrap();
        assert_eq!(ctx.path_param("short_id"), Some(""));
    }
}

//! Auth gateway: bearer-token validation ahead of every domain handler.
//!
//! Two ordered rule chains are evaluated per request path - one for API
//! routes, one for view routes. Each chain is an explicit list of
//! `(PathMatcher, AuthPolicy)` rules checked top-to-bottom; the first match
//! wins within a chain, and a request must satisfy every chain that matches
//! it (API chain first, view chain second). A valid token resolves to a
//! [`CurrentMember`] in the request extensions, which is the sole mechanism
//! by which downstream services learn who is calling.

use std::sync::LazyLock;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{HeaderMap, header, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::error::AppError;
use crate::models::CurrentMember;
use crate::state::AppState;

/// What a matched rule demands of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthPolicy {
    /// No token needed.
    Public,
    /// A valid bearer token is required.
    RequireToken,
}

/// Matches request paths for gateway rules.
#[derive(Debug, Clone, Copy)]
pub enum PathMatcher {
    /// The path must equal the pattern exactly.
    Exact(&'static str),
    /// The path must be the pattern or a segment-aligned descendant of it
    /// (`/api` matches `/api` and `/api/wishes`, not `/apix`).
    Prefix(&'static str),
}

impl PathMatcher {
    /// Whether `path` satisfies this matcher.
    #[must_use]
    pub fn matches(&self, path: &str) -> bool {
        match self {
            Self::Exact(pattern) => path == *pattern,
            Self::Prefix(pattern) => path
                .strip_prefix(pattern)
                .is_some_and(|rest| rest.is_empty() || rest.starts_with('/')),
        }
    }
}

/// One ordered chain of `(matcher, policy)` rules.
#[derive(Debug)]
struct Chain {
    name: &'static str,
    rules: Vec<(PathMatcher, AuthPolicy)>,
}

impl Chain {
    /// The first matching rule's policy, if any rule matches.
    fn evaluate(&self, path: &str) -> Option<AuthPolicy> {
        self.rules
            .iter()
            .find(|(matcher, _)| matcher.matches(path))
            .map(|&(_, policy)| policy)
    }
}

/// The gateway: ordered chains evaluated per request.
#[derive(Debug)]
pub struct AuthGateway {
    chains: Vec<Chain>,
}

impl AuthGateway {
    /// Whether `path` needs a valid token: true when any chain's first
    /// matching rule demands one. Paths no chain matches are public.
    #[must_use]
    pub fn requires_token(&self, path: &str) -> bool {
        self.chains
            .iter()
            .filter_map(|chain| chain.evaluate(path))
            .any(|policy| policy == AuthPolicy::RequireToken)
    }

    /// The chain that decided a rejection, for logging.
    #[must_use]
    pub fn deciding_chain(&self, path: &str) -> Option<&'static str> {
        self.chains
            .iter()
            .find(|chain| chain.evaluate(path) == Some(AuthPolicy::RequireToken))
            .map(|chain| chain.name)
    }
}

/// The standard Giftwise gateway.
///
/// API chain (priority 1): registration, login, and the OAuth callback are
/// public; view paths are skipped; everything else under `/api` needs a
/// token. View chain (priority 2): API paths are skipped; the public product
/// listing, join, and login pages are open; everything else under `/view`
/// needs a token.
pub fn auth_gateway() -> &'static AuthGateway {
    static GATEWAY: LazyLock<AuthGateway> = LazyLock::new(|| AuthGateway {
        chains: vec![
            Chain {
                name: "api",
                rules: vec![
                    (PathMatcher::Prefix("/api/members"), AuthPolicy::Public),
                    (PathMatcher::Exact("/api/oauth2/kakao"), AuthPolicy::Public),
                    (PathMatcher::Prefix("/view"), AuthPolicy::Public),
                    (PathMatcher::Prefix("/api"), AuthPolicy::RequireToken),
                ],
            },
            Chain {
                name: "view",
                rules: vec![
                    (PathMatcher::Prefix("/api"), AuthPolicy::Public),
                    (PathMatcher::Exact("/view/products"), AuthPolicy::Public),
                    (PathMatcher::Exact("/view/join"), AuthPolicy::Public),
                    (PathMatcher::Exact("/view/login"), AuthPolicy::Public),
                    (PathMatcher::Prefix("/view"), AuthPolicy::RequireToken),
                ],
            },
        ],
    });
    &GATEWAY
}

/// Extract the bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if scheme.eq_ignore_ascii_case("bearer") && !token.is_empty() {
        Some(token)
    } else {
        None
    }
}

/// Gateway middleware: rejects token-gated paths before any handler runs and
/// injects the resolved [`CurrentMember`] for the rest.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` when a gated path carries no token or an
/// invalid/expired one.
pub async fn require_member(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let path = request.uri().path().to_owned();
    let gateway = auth_gateway();

    if gateway.requires_token(&path) {
        let token = bearer_token(request.headers()).ok_or_else(|| {
            tracing::debug!(path = %path, chain = ?gateway.deciding_chain(&path), "missing bearer token");
            AppError::Unauthorized("missing bearer token".to_owned())
        })?;

        let member = state
            .tokens()
            .verify(token)
            .map_err(|e| AppError::Unauthorized(e.to_string()))?;

        request.extensions_mut().insert(member);
    }

    Ok(next.run(request).await)
}

impl<S> FromRequestParts<S> for CurrentMember
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Self>()
            .cloned()
            .ok_or_else(|| AppError::Unauthorized("missing bearer token".to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_matcher_is_segment_aligned() {
        let matcher = PathMatcher::Prefix("/api");
        assert!(matcher.matches("/api"));
        assert!(matcher.matches("/api/wishes"));
        assert!(!matcher.matches("/apix"));
        assert!(!matcher.matches("/view/api"));
    }

    #[test]
    fn test_exact_matcher() {
        let matcher = PathMatcher::Exact("/view/login");
        assert!(matcher.matches("/view/login"));
        assert!(!matcher.matches("/view/login/extra"));
    }

    #[test]
    fn test_api_chain_exclusions_are_public() {
        let gateway = auth_gateway();
        assert!(!gateway.requires_token("/api/members/register"));
        assert!(!gateway.requires_token("/api/members/login"));
        assert!(!gateway.requires_token("/api/oauth2/kakao"));
    }

    #[test]
    fn test_api_routes_require_token() {
        let gateway = auth_gateway();
        assert!(gateway.requires_token("/api/wishes"));
        assert!(gateway.requires_token("/api/orders"));
        assert!(gateway.requires_token("/api/products"));
        assert_eq!(gateway.deciding_chain("/api/wishes"), Some("api"));
    }

    #[test]
    fn test_view_chain_exclusions_are_public() {
        let gateway = auth_gateway();
        assert!(!gateway.requires_token("/view/products"));
        assert!(!gateway.requires_token("/view/join"));
        assert!(!gateway.requires_token("/view/login"));
    }

    #[test]
    fn test_view_routes_require_token() {
        let gateway = auth_gateway();
        assert!(gateway.requires_token("/view/wishes"));
        assert_eq!(gateway.deciding_chain("/view/wishes"), Some("view"));
    }

    #[test]
    fn test_unmatched_paths_are_public() {
        let gateway = auth_gateway();
        assert!(!gateway.requires_token("/health"));
        assert!(!gateway.requires_token("/"));
    }

    #[test]
    fn test_first_match_wins_within_chain() {
        // "/api/members/anything" hits the public members rule before the
        // catch-all RequireToken rule.
        let gateway = auth_gateway();
        assert!(!gateway.requires_token("/api/members/whatever"));
    }

    #[test]
    fn test_bearer_token_parsing() {
        let mut headers = HeaderMap::new();
        assert!(bearer_token(&headers).is_none());

        headers.insert(header::AUTHORIZATION, "Bearer abc.def.ghi".parse().expect("header"));
        assert_eq!(bearer_token(&headers), Some("abc.def.ghi"));

        headers.insert(header::AUTHORIZATION, "bearer lower".parse().expect("header"));
        assert_eq!(bearer_token(&headers), Some("lower"));

        headers.insert(header::AUTHORIZATION, "Basic dXNlcg==".parse().expect("header"));
        assert!(bearer_token(&headers).is_none());
    }
}

//! Request dispatcher: request value → resolved wire request → typed result.
//!
//! [`resolve`] is pure. It fills the endpoint's path template from the
//! request's path parameters, collects query parameters and per-call headers,
//! and carries the encoded body. [`dispatch`] resolves, hands the result to a
//! [`Transport`], and decodes the answer with the request's
//! [`ResponseFormat`].

use std::collections::BTreeMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tracing::{debug, instrument, Span};

use crate::{
    decode, ApiError, Endpoint, HttpMethod, RequestId, RequestParameters, ResponseFormat,
    Transport,
};

/// Bytes escaped when a value is substituted into a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'\\')
    .add(b'^')
    .add(b'`')
    .add(b'{')
    .add(b'|')
    .add(b'}');

// ---------------------------------------------------------------------------
// Request contract
// ---------------------------------------------------------------------------

/// A request value bound to one endpoint and one response format.
///
/// Implementations register each descriptor field with
/// [`crate::Parameters`]; there is no reflection.
pub trait ApiRequest {
    /// The endpoint this request targets.
    const ENDPOINT: Endpoint;

    /// How the response body is decoded.
    type Response: ResponseFormat;

    /// The request's fields grouped by role.
    ///
    /// ## Errors
    ///
    /// Returns [`ApiError::BodyEncoding`] if the body cannot be serialised.
    fn parameters(&self) -> Result<RequestParameters, ApiError>;
}

/// Output type of dispatching `R`.
pub type ResponseOf<R> = <<R as ApiRequest>::Response as ResponseFormat>::Output;

// ---------------------------------------------------------------------------
// Resolved request
// ---------------------------------------------------------------------------

/// Everything a [`Transport`] needs apart from the shared configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Path with every placeholder substituted and escaped; starts with `/`.
    pub path: String,
    /// Per-call headers. These override shared headers of the same name.
    pub headers: BTreeMap<String, String>,
    /// Query parameters, unescaped.
    pub query: BTreeMap<String, String>,
    /// Encoded JSON body.
    pub body: Option<Vec<u8>>,
}

impl ResolvedRequest {
    /// A request with no headers, query, or body.
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: BTreeMap::new(),
            query: BTreeMap::new(),
            body: None,
        }
    }

    /// Adds a per-call header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Sets the body bytes.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Resolution
// ---------------------------------------------------------------------------

/// Resolves a request value against its endpoint.
///
/// ## Errors
///
/// - [`ApiError::UnresolvedPathParameter`] if a placeholder has no parameter.
/// - [`ApiError::UnusedPathParameter`] if a path parameter has no placeholder.
/// - [`ApiError::EmptyPathParameter`] if a placeholder's value is empty.
/// - [`ApiError::InvalidPathTemplate`] for unbalanced or empty braces.
/// - [`ApiError::DuplicateParameter`] if two query parameters or two headers
///   share a wire name.
/// - [`ApiError::BodyEncoding`] if the body cannot be serialised.
pub fn resolve<R: ApiRequest + ?Sized>(request: &R) -> Result<ResolvedRequest, ApiError> {
    resolve_parts(&R::ENDPOINT, request.parameters()?)
}

/// Resolves already-collected parameters against an endpoint.
///
/// ## Errors
///
/// Same path-template and duplicate-name errors as [`resolve`].
pub fn resolve_parts(
    endpoint: &Endpoint,
    parameters: RequestParameters,
) -> Result<ResolvedRequest, ApiError> {
    parameters.check_unique()?;
    let (path_params, query, headers, body) = parameters.into_parts();
    let path = fill_template(endpoint.path(), &path_params)?;

    Ok(ResolvedRequest {
        method: endpoint.method(),
        path,
        headers,
        query,
        body,
    })
}

fn fill_template(template: &str, params: &[(String, String)]) -> Result<String, ApiError> {
    let malformed = || ApiError::InvalidPathTemplate {
        template: template.to_string(),
    };

    let mut used = vec![false; params.len()];
    let mut resolved = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let literal = &rest[..open];
        if literal.contains('}') {
            return Err(malformed());
        }
        resolved.push_str(literal);

        let after = &rest[open + 1..];
        let close = after.find('}').ok_or_else(malformed)?;
        let placeholder = &after[..close];
        if placeholder.is_empty() || placeholder.contains('{') {
            return Err(malformed());
        }

        let index = params
            .iter()
            .position(|(name, _)| name == placeholder)
            .ok_or_else(|| ApiError::UnresolvedPathParameter {
                placeholder: placeholder.to_string(),
                template: template.to_string(),
            })?;
        used[index] = true;
        if params[index].1.is_empty() {
            return Err(ApiError::EmptyPathParameter {
                placeholder: placeholder.to_string(),
                template: template.to_string(),
            });
        }
        resolved.extend(utf8_percent_encode(&params[index].1, PATH_SEGMENT));

        rest = &after[close + 1..];
    }

    if rest.contains('}') {
        return Err(malformed());
    }
    resolved.push_str(rest);

    if let Some(((name, _), _)) = params.iter().zip(&used).find(|(_, used)| !**used) {
        return Err(ApiError::UnusedPathParameter {
            name: name.clone(),
            template: template.to_string(),
        });
    }

    Ok(resolved)
}

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// Resolves `request`, sends it through `transport`, and decodes the answer.
///
/// ## Errors
///
/// Any [`ApiError`] from resolution, the transport, or decoding. An upstream
/// error payload decoded through [`crate::EitherJson`] is a successful return.
#[instrument(
    name = "dispatch",
    skip_all,
    fields(
        request_id = %RequestId::new_random(),
        http.method = %R::ENDPOINT.method(),
        http.route = R::ENDPOINT.path(),
        http.status_code = tracing::field::Empty,
    )
)]
pub async fn dispatch<T, R>(transport: &T, request: &R) -> Result<ResponseOf<R>, ApiError>
where
    T: Transport + ?Sized,
    R: ApiRequest + ?Sized,
{
    let resolved = resolve(request)?;
    debug!(
        path = %resolved.path,
        query_keys = ?resolved.query.keys().collect::<Vec<_>>(),
        has_body = resolved.body.is_some(),
        "request resolved"
    );

    let raw = transport.execute(&resolved).await?;
    Span::current().record("http.status_code", raw.status);
    debug!(bytes = raw.body.len(), "response received");

    decode::<R::Response>(raw)
}

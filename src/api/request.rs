//! Outgoing recipe API requests.
//!
//! Zellij performs HTTP on the plugin's behalf: the plugin hands over a URL,
//! headers and an opaque string context, and gets the context back verbatim
//! with the response. The context is where the fetch generation and the trace
//! context ride across that boundary.

use crate::domain::ApiError;
use crate::query::FetchTicket;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Context key holding the fetch generation.
pub const GENERATION_KEY: &str = "generation";
const TRACE_ID_KEY: &str = "trace_id";
const PARENT_SPAN_ID_KEY: &str = "parent_span_id";

/// Distributed tracing context for spans that outlive a host round trip.
///
/// Captured when a request is built and restored when its response arrives,
/// so the response handling can be linked to the span that issued the fetch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span that issued the request.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the current tracing span.
    ///
    /// Returns `None` if the current span has no valid OpenTelemetry context,
    /// which is the case whenever tracing is not initialized.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Makes the captured span the remote parent of spans opened while the
    /// returned guard is held.
    ///
    /// Returns `None` if either ID is not valid hex.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{
            SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState,
        };

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;
        let span_context = SpanContext::new(
            trace_id,
            span_id,
            TraceFlags::SAMPLED,
            true,
            TraceState::default(),
        );

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }

    fn write_to(&self, context: &mut BTreeMap<String, String>) {
        context.insert(TRACE_ID_KEY.to_string(), self.trace_id.clone());
        context.insert(PARENT_SPAN_ID_KEY.to_string(), self.parent_span_id.clone());
    }

    fn read_from(context: &BTreeMap<String, String>) -> Option<Self> {
        Some(Self {
            trace_id: context.get(TRACE_ID_KEY)?.clone(),
            parent_span_id: context.get(PARENT_SPAN_ID_KEY)?.clone(),
        })
    }
}

/// A fully built GET request, ready for `zellij_tile::web_request`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebRequest {
    pub url: String,
    pub headers: BTreeMap<String, String>,
    /// Returned untouched by the host alongside the response.
    pub context: BTreeMap<String, String>,
}

/// What the host handed back in a response's context map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseContext {
    pub generation: u64,
    pub trace_context: Option<TraceContext>,
}

impl ResponseContext {
    /// Recovers the generation (and trace context, if any) from a response context.
    ///
    /// Returns `None` when the context was not produced by [`WebRequest`]
    /// building, e.g. a response to some other plugin request.
    #[must_use]
    pub fn parse(context: &BTreeMap<String, String>) -> Option<Self> {
        let generation = context.get(GENERATION_KEY)?.parse::<u64>().ok()?;
        Some(Self {
            generation,
            trace_context: TraceContext::read_from(context),
        })
    }
}

/// Encodes a ticket's query as `page=P&limit=L&field=value...`.
///
/// Page and limit come first; only active filters follow, in field-name order.
pub(crate) fn encode_query(ticket: &FetchTicket) -> Result<String, ApiError> {
    let query = &ticket.query;
    let mut pairs: Vec<(&str, String)> = vec![
        ("page", query.page.page.to_string()),
        ("limit", query.page.limit.to_string()),
    ];
    pairs.extend(
        query
            .filters
            .active()
            .map(|(field, value)| (field, value.to_string())),
    );

    serde_html_form::to_string(&pairs)
        .map_err(|e| ApiError::Transport(format!("failed to encode query: {e}")))
}

pub(crate) fn request_context(ticket: &FetchTicket) -> BTreeMap<String, String> {
    let mut context = BTreeMap::new();
    context.insert(GENERATION_KEY.to_string(), ticket.generation.to_string());
    if let Some(trace_context) = TraceContext::from_current() {
        trace_context.write_to(&mut context);
    }
    context
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FilterSet, PageRequest};
    use crate::query::RecipeQuery;

    fn ticket(filters: FilterSet, page: u32, limit: u32) -> FetchTicket {
        FetchTicket {
            generation: 7,
            query: RecipeQuery {
                filters,
                page: PageRequest { page, limit },
            },
        }
    }

    #[test]
    fn test_unset_filters_are_omitted() {
        let filters = FilterSet::new()
            .with("cuisine", "italian")
            .with("title", "")
            .with("ingredient", "basil");
        let query = encode_query(&ticket(filters, 2, 15)).unwrap();
        assert_eq!(query, "page=2&limit=15&cuisine=italian&ingredient=basil");
    }

    #[test]
    fn test_special_characters_are_escaped() {
        let filters = FilterSet::new().with("title", "mac & cheese=yum");
        let query = encode_query(&ticket(filters, 1, 10)).unwrap();
        assert_eq!(query, "page=1&limit=10&title=mac+%26+cheese%3Dyum");
    }

    #[test]
    fn test_context_round_trips_generation() {
        let context = request_context(&ticket(FilterSet::new(), 1, 15));
        let parsed = ResponseContext::parse(&context).unwrap();
        assert_eq!(parsed.generation, 7);
        assert_eq!(parsed.trace_context, None);
    }

    #[test]
    fn test_foreign_context_is_ignored() {
        let mut context = BTreeMap::new();
        context.insert("something".to_string(), "else".to_string());
        assert!(ResponseContext::parse(&context).is_none());

        context.insert(GENERATION_KEY.to_string(), "not-a-number".to_string());
        assert!(ResponseContext::parse(&context).is_none());
    }

    #[test]
    fn test_trace_context_read_back() {
        let mut context = BTreeMap::new();
        context.insert(GENERATION_KEY.to_string(), "3".to_string());
        TraceContext {
            trace_id: "a".repeat(32),
            parent_span_id: "b".repeat(16),
        }
        .write_to(&mut context);

        let parsed = ResponseContext::parse(&context).unwrap();
        let trace_context = parsed.trace_context.unwrap();
        assert_eq!(trace_context.parent_span_id, "b".repeat(16));
        assert!(trace_context.attach().is_some());
    }

    #[test]
    fn test_malformed_trace_ids_do_not_attach() {
        let trace_context = TraceContext {
            trace_id: "not hex".to_string(),
            parent_span_id: "b".repeat(16),
        };
        assert!(trace_context.attach().is_none());
    }
}

//! Request and response types exchanged with the directory worker.
//!
//! The UI loop never awaits the gateway itself. It emits a [`WorkerMessage`], the
//! worker runs the call on a tokio task and answers with a [`WorkerResponse`] once the
//! store has been updated. Messages carry the trace context of the span that created
//! them so the worker's spans join the same trace.

use crate::domain::{UserId, UserInput};

/// OpenTelemetry identifiers of the span that created a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// Trace ID as 32 hex digits.
    pub trace_id: String,

    /// Span ID of the creating span as 16 hex digits.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the context of the current span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the current span is
    /// not being recorded.
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
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

    /// Rebuilds a remote parent context from the captured identifiers.
    #[must_use]
    pub fn to_parent_context(&self) -> Option<opentelemetry::Context> {
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

        Some(opentelemetry::Context::new().with_remote_span_context(span_context))
    }
}

/// Generates `WorkerMessage` constructors that attach the current trace context.
macro_rules! worker_message_builders {
    (
        $(
            $builder_name:ident($variant:ident { $($field:ident: $ty:ty),* $(,)? })
        ),* $(,)?
    ) => {
        impl WorkerMessage {
            $(
                #[doc = concat!("Creates a `", stringify!($variant), "` message carrying the current trace context.")]
                #[must_use]
                pub fn $builder_name($($field: $ty),*) -> Self {
                    Self::$variant {
                        $($field,)*
                        trace_context: TraceContext::from_current(),
                    }
                }
            )*
        }
    };
}

worker_message_builders! {
    load_users(LoadUsers {}),
    refresh_user(RefreshUser { id: UserId }),
    create_user(CreateUser { input: UserInput }),
    update_user(UpdateUser { id: UserId, input: UserInput }),
    delete_user(DeleteUser { id: UserId }),
}

/// Gateway operations requested by the UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerMessage {
    /// Replace the collection with a fresh `list()`.
    LoadUsers {
        trace_context: Option<TraceContext>,
    },

    /// Re-fetch one user and patch it into the collection.
    RefreshUser {
        id: UserId,
        trace_context: Option<TraceContext>,
    },

    CreateUser {
        input: UserInput,
        trace_context: Option<TraceContext>,
    },

    UpdateUser {
        id: UserId,
        input: UserInput,
        trace_context: Option<TraceContext>,
    },

    DeleteUser {
        id: UserId,
        trace_context: Option<TraceContext>,
    },
}

impl WorkerMessage {
    /// Short name used as the `message_type` span field.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::LoadUsers { .. } => "load_users",
            Self::RefreshUser { .. } => "refresh_user",
            Self::CreateUser { .. } => "create_user",
            Self::UpdateUser { .. } => "update_user",
            Self::DeleteUser { .. } => "delete_user",
        }
    }

    #[must_use]
    pub const fn trace_context(&self) -> Option<&TraceContext> {
        match self {
            Self::LoadUsers { trace_context }
            | Self::RefreshUser { trace_context, .. }
            | Self::CreateUser { trace_context, .. }
            | Self::UpdateUser { trace_context, .. }
            | Self::DeleteUser { trace_context, .. } => trace_context.as_ref(),
        }
    }
}

/// Outcome of a worker message, sent once the store reflects it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkerResponse {
    UsersLoaded { count: usize },
    UserRefreshed { id: UserId },
    UserCreated { id: UserId },
    UserUpdated { id: UserId },
    UserDeleted { id: UserId },

    /// A load finished after a newer load or a local change; its result was dropped.
    StaleDiscarded,

    /// The gateway call failed and the store now holds the error.
    Failed {
        operation: String,
        message: String,
    },
}

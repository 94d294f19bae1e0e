//! In-process request dispatch.
//!
//! Every command or query type implements [`Request`] and is served by
//! exactly one [`RequestHandler`]. The [`Mediator`] keeps the handlers in a
//! registry keyed by the request's `TypeId` and erases their types behind a
//! boxed closure, so the HTTP layer only ever calls [`Mediator::send`].

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::AppResult;

/// A command or query routed through the [`Mediator`].
pub trait Request: Send + 'static {
    /// Value produced by the handler.
    type Response: Send + 'static;

    /// Stable name used in logs and dispatch errors.
    const NAME: &'static str;
}

/// Handles exactly one request type.
#[async_trait]
pub trait RequestHandler<R: Request>: Send + Sync {
    async fn handle(&self, request: R) -> AppResult<R::Response>;
}

/// Registration and dispatch failures.
#[derive(Debug, thiserror::Error)]
pub enum MediatorError {
    #[error("no handler registered for {0}")]
    HandlerNotFound(&'static str),

    #[error("a handler is already registered for {0}")]
    AlreadyRegistered(&'static str),

    #[error("type mismatch while dispatching: expected {expected}")]
    TypeMismatch { expected: &'static str },
}

type BoxAnySend = Box<dyn Any + Send>;

type HandlerFuture = Pin<Box<dyn Future<Output = AppResult<BoxAnySend>> + Send>>;

type HandlerFn = Arc<dyn Fn(BoxAnySend) -> HandlerFuture + Send + Sync>;

struct Registration {
    name: &'static str,
    call: HandlerFn,
}

/// Registry of request handlers, one per request type.
///
/// Built once at startup and shared read-only behind an `Arc`.
#[derive(Default)]
pub struct Mediator {
    handlers: HashMap<TypeId, Registration>,
}

impl Mediator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install `handler` as the single handler for `R`.
    pub fn register<R, H>(&mut self, handler: H) -> Result<(), MediatorError>
    where
        R: Request,
        H: RequestHandler<R> + 'static,
    {
        let key = TypeId::of::<R>();
        if self.handlers.contains_key(&key) {
            return Err(MediatorError::AlreadyRegistered(R::NAME));
        }

        let handler = Arc::new(handler);
        let call: HandlerFn = Arc::new(move |boxed: BoxAnySend| -> HandlerFuture {
            Box::pin(invoke::<R, H>(Arc::clone(&handler), boxed))
        });

        self.handlers.insert(key, Registration { name: R::NAME, call });
        Ok(())
    }

    /// Route `request` to its handler and await the typed response.
    pub async fn send<R: Request>(&self, request: R) -> AppResult<R::Response> {
        let registration = self
            .handlers
            .get(&TypeId::of::<R>())
            .ok_or(MediatorError::HandlerNotFound(R::NAME))?;
        let call = Arc::clone(&registration.call);

        tracing::debug!(request = registration.name, "Dispatching request");
        let output = call(Box::new(request)).await?;

        output.downcast::<R::Response>().map(|r| *r).map_err(|_| {
            MediatorError::TypeMismatch {
                expected: type_name::<R::Response>(),
            }
            .into()
        })
    }

    /// Names of every registered request, sorted.
    pub fn registered(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.values().map(|r| r.name).collect();
        names.sort_unstable();
        names
    }
}

/// Recover the concrete request, run the handler and erase the response.
async fn invoke<R, H>(handler: Arc<H>, boxed: BoxAnySend) -> AppResult<BoxAnySend>
where
    R: Request,
    H: RequestHandler<R> + 'static,
{
    let request = boxed
        .downcast::<R>()
        .map_err(|_| MediatorError::TypeMismatch { expected: R::NAME })?;
    let response = handler.handle(*request).await?;
    Ok(Box::new(response))
}

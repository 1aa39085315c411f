//! Deferred message loading for pairs with no local messages.

use std::future::Future;

use futures::future::BoxFuture;

use crate::error::BoxError;
use crate::store::MessageMap;

/// The pair a loader is asked to supply messages for.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LoadRequest {
    /// Requested locale.
    pub locale: String,
    /// Requested module.
    pub module: String,
}

/// Source of messages that are not known locally, e.g. a translation service.
///
/// Implemented for any `Fn(LoadRequest) -> impl Future<Output = Result<MessageMap, E>>`,
/// so an async closure is usually all an integrator needs.
pub trait RemoteLoader: Send + Sync {
    /// Fetch the messages for one `(locale, module)` pair.
    fn load(&self, request: LoadRequest) -> BoxFuture<'static, Result<MessageMap, BoxError>>;
}

impl<F, Fut, E> RemoteLoader for F
where
    F: Fn(LoadRequest) -> Fut + Send + Sync,
    Fut: Future<Output = Result<MessageMap, E>> + Send + 'static,
    E: Into<BoxError>,
{
    fn load(&self, request: LoadRequest) -> BoxFuture<'static, Result<MessageMap, BoxError>> {
        let fut = self(request);
        Box::pin(async move { fut.await.map_err(Into::into) })
    }
}

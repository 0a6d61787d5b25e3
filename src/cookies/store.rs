//! The cookie store collaborator.
//!
//! The browser engine owns the real cookie store; the crate only needs to
//! enumerate, delete and insert. Each operation returns a boxed future that
//! completes when the store has applied it.

use crate::cookies::record::CookieRecord;
use std::{future::Future, pin::Pin, sync::Arc};

/// Alias for the `Future` type returned by cookie store operations.
pub type StoreFuture<T> = Pin<Box<dyn Future<Output = T> + Send>>;

/// Trait for an asynchronous cookie store.
///
/// # Design Notes
///
/// - Operations never fail as a whole; a rejected insert reports `false`.
/// - Uses `&self` so many operations can be in flight at once.
/// - Returns boxed futures for trait object compatibility.
pub trait CookieStore: Send + Sync {
    /// Every cookie currently in the store.
    fn all_cookies(&self) -> StoreFuture<Vec<CookieRecord>>;

    /// Remove the cookie with the same domain, name and path.
    fn delete(&self, cookie: CookieRecord) -> StoreFuture<()>;

    /// Add or replace a cookie. Resolves to `false` if the store refused it.
    fn insert(&self, cookie: CookieRecord) -> StoreFuture<bool>;
}

/// Blanket implementation for Arc-wrapped stores.
impl<S: CookieStore + ?Sized> CookieStore for Arc<S> {
    fn all_cookies(&self) -> StoreFuture<Vec<CookieRecord>> {
        (**self).all_cookies()
    }

    fn delete(&self, cookie: CookieRecord) -> StoreFuture<()> {
        (**self).delete(cookie)
    }

    fn insert(&self, cookie: CookieRecord) -> StoreFuture<bool> {
        (**self).insert(cookie)
    }
}

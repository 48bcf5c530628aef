//! Concrete Future types for token operations.
//!
//! Work runs on a spawned task and reports back over a oneshot channel, so
//! callers see a plain named future instead of a boxed one.

use crate::{
    error::{JwtError, JwtResult},
    types::{JwtToken, VerifiedToken},
};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::sync::oneshot;

/// Future for token issuance.
pub struct IssueFuture {
    rx: oneshot::Receiver<JwtResult<JwtToken>>,
}

impl IssueFuture {
    pub(crate) fn new(rx: oneshot::Receiver<JwtResult<JwtToken>>) -> Self {
        Self { rx }
    }
}

impl Future for IssueFuture {
    type Output = JwtResult<JwtToken>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(JwtError::TaskFailed)),
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Future for token authentication.
pub struct AuthenticateFuture {
    rx: oneshot::Receiver<JwtResult<VerifiedToken>>,
}

impl AuthenticateFuture {
    pub(crate) fn new(rx: oneshot::Receiver<JwtResult<VerifiedToken>>) -> Self {
        Self { rx }
    }
}

impl Future for AuthenticateFuture {
    type Output = JwtResult<VerifiedToken>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.rx).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(JwtError::TaskFailed)),
            Poll::Pending => Poll::Pending,
        }
    }
}

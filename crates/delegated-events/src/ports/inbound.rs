//! Inbound Ports (Driving Ports)
//!
//! The API external code uses to subscribe to and dispatch events.

use serde_json::{Map, Value};

use crate::domain::Callback;
use crate::error::EventError;

/// Primary event API (Driving Port)
///
/// `event` arguments accept `type` or `type.namespace`.
pub trait EventApi<N> {
    /// Register `callback` for `event` on `target`
    fn subscribe(&self, target: &N, event: &str, callback: &Callback<N>) -> Result<(), EventError>;

    /// Remove subscriptions matching `event` and, if given, `callback`
    ///
    /// Delegated subscriptions on `target` match as well. Returns the number
    /// of records removed; zero is not an error.
    fn unsubscribe(
        &self,
        target: &N,
        event: &str,
        callback: Option<&Callback<N>>,
    ) -> Result<usize, EventError>;

    /// Register `callback` to run on the first matching event only
    ///
    /// Returns the wrapper actually registered, which can be passed to
    /// [`EventApi::unsubscribe`] to cancel before it fires.
    fn subscribe_once(
        &self,
        target: &N,
        event: &str,
        callback: &Callback<N>,
    ) -> Result<Callback<N>, EventError>;

    /// Run `callback` for events originating at descendants of `target`
    /// that match `selector`, evaluated when the event fires
    ///
    /// The callback's context argument is the matched descendant.
    fn delegate(
        &self,
        target: &N,
        selector: &str,
        event: &str,
        callback: &Callback<N>,
    ) -> Result<(), EventError>;

    /// Remove delegated subscriptions for `selector` matching `event` and,
    /// if given, `callback`
    fn undelegate(
        &self,
        target: &N,
        selector: &str,
        event: &str,
        callback: Option<&Callback<N>>,
    ) -> Result<usize, EventError>;

    /// Synthesize an event of `event_type` and dispatch it on `target`
    ///
    /// Every prop is copied onto the event except `bubbles`, which sets the
    /// bubbling flag. Returns `false` if a listener prevented the default.
    fn dispatch(
        &self,
        target: &N,
        event_type: &str,
        props: Option<Map<String, Value>>,
    ) -> Result<bool, EventError>;
}

//! Bookkeeping for the event subscriptions held with the host window system.
use crate::{
    host::{EventKind, SubscriptionId, WindowSystem},
    Result,
};
use tracing::{debug, error};

/// The event subscriptions currently held by the engine.
///
/// Every subscription acquired through this list is released by [Subscriptions::release_all].
/// Releasing is idempotent: once released the list is empty and releasing again does nothing.
#[derive(Debug, Default)]
pub struct Subscriptions {
    held: Vec<(EventKind, SubscriptionId)>,
}

impl Subscriptions {
    /// Subscribe to events of the given kind.
    pub fn acquire<X>(&mut self, kind: EventKind, x: &X) -> Result<SubscriptionId>
    where
        X: WindowSystem,
    {
        let id = x.subscribe(kind)?;
        debug!(%kind, id = id.0, "subscribed");
        self.held.push((kind, id));

        Ok(id)
    }

    /// Subscribe to each of the given kinds of event.
    ///
    /// If any subscription fails then those already acquired by this call are released
    /// before returning the error.
    pub fn acquire_all<X, I>(&mut self, kinds: I, x: &X) -> Result<()>
    where
        X: WindowSystem,
        I: IntoIterator<Item = EventKind>,
    {
        let n_held = self.held.len();
        for kind in kinds {
            if let Err(e) = self.acquire(kind, x) {
                for (kind, id) in self.held.split_off(n_held) {
                    release(kind, id, x);
                }

                return Err(e);
            }
        }

        Ok(())
    }

    /// Release all held subscriptions, returning how many were held.
    ///
    /// Failure to release a single subscription is logged and does not prevent the remaining
    /// subscriptions from being released.
    pub fn release_all<X: WindowSystem>(&mut self, x: &X) -> usize {
        let held = std::mem::take(&mut self.held);
        let n = held.len();
        for (kind, id) in held {
            release(kind, id, x);
        }

        n
    }

    /// Whether a subscription for `kind` is currently held
    pub fn is_subscribed(&self, kind: EventKind) -> bool {
        self.held.iter().any(|(k, _)| *k == kind)
    }

    /// The number of held subscriptions
    pub fn len(&self) -> usize {
        self.held.len()
    }

    /// Whether no subscriptions are held
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }
}

fn release<X: WindowSystem>(kind: EventKind, id: SubscriptionId, x: &X) {
    match x.unsubscribe(id) {
        Ok(()) => debug!(%kind, id = id.0, "unsubscribed"),
        Err(e) => error!(%e, %kind, id = id.0, "unable to release subscription"),
    }
}

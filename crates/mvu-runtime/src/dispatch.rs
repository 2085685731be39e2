//! The dispatch capability.
//!
//! [`Dispatch`] is the only way code outside the runtime can request a
//! transition. It holds a weak reference to the runtime's [`Mailbox`]; once the
//! runtime is torn down every send becomes a silent no-op.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

/// FIFO of messages waiting for the runtime loop.
///
/// Owned exclusively by the runtime; everything else reaches it through a
/// [`Dispatch`].
#[derive(Debug)]
pub struct Mailbox<M> {
    queue: VecDeque<M>,
}

impl<M> Default for Mailbox<M> {
    fn default() -> Self {
        Self {
            queue: VecDeque::new(),
        }
    }
}

impl<M> Mailbox<M> {
    /// Create an empty mailbox.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a message at the back of the queue.
    pub fn push(&mut self, message: M) {
        self.queue.push_back(message);
    }

    /// Take the oldest message.
    pub fn pop(&mut self) -> Option<M> {
        self.queue.pop_front()
    }

    /// Number of messages still waiting.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no messages are waiting.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

/// Capability to enqueue a message for the runtime loop.
///
/// Cheap to clone; event handlers capture their own copy.
pub struct Dispatch<M> {
    mailbox: Weak<RefCell<Mailbox<M>>>,
}

impl<M> Dispatch<M> {
    /// Create a dispatch handle bound to a mailbox.
    pub fn new(mailbox: &Rc<RefCell<Mailbox<M>>>) -> Self {
        Self {
            mailbox: Rc::downgrade(mailbox),
        }
    }

    /// A handle bound to nothing. Every send is dropped.
    ///
    /// Useful for rendering a view outside a running loop.
    pub fn detached() -> Self {
        Self {
            mailbox: Weak::new(),
        }
    }

    /// Enqueue a message.
    ///
    /// Returns `false` when the runtime has been torn down and the message was
    /// discarded.
    pub fn send(&self, message: M) -> bool {
        let Some(mailbox) = self.mailbox.upgrade() else {
            tracing::trace!("dispatch after teardown ignored");
            return false;
        };
        mailbox.borrow_mut().push(message);
        true
    }

    /// Whether the runtime behind this handle is still alive.
    pub fn is_connected(&self) -> bool {
        self.mailbox.strong_count() > 0
    }
}

impl<M> Clone for Dispatch<M> {
    fn clone(&self) -> Self {
        Self {
            mailbox: Weak::clone(&self.mailbox),
        }
    }
}

impl<M> fmt::Debug for Dispatch<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatch")
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn send_preserves_arrival_order() {
        let mailbox = Rc::new(RefCell::new(Mailbox::new()));
        let dispatch = Dispatch::new(&mailbox);
        let other = dispatch.clone();

        assert!(dispatch.send(1));
        assert!(other.send(2));
        assert!(dispatch.send(3));

        let mut mailbox = mailbox.borrow_mut();
        assert_eq!(mailbox.len(), 3);
        assert_eq!(mailbox.pop(), Some(1));
        assert_eq!(mailbox.pop(), Some(2));
        assert_eq!(mailbox.pop(), Some(3));
        assert!(mailbox.is_empty());
    }

    #[test]
    fn send_after_drop_is_noop() {
        let mailbox = Rc::new(RefCell::new(Mailbox::<u8>::new()));
        let dispatch = Dispatch::new(&mailbox);
        drop(mailbox);

        assert!(!dispatch.is_connected());
        assert!(!dispatch.send(1));
    }

    #[test]
    fn detached_handle_drops_everything() {
        let dispatch = Dispatch::<u8>::detached();
        assert!(!dispatch.send(7));
    }
}

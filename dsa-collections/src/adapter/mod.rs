//! Restricted views over [`LinkedList`](crate::LinkedList).
//!
//! Both adapters own a list and expose only the end they work on:
//!
//! ```text
//! Stack  push = push_front   pop = pop_front   (LIFO)
//! Queue  push = push_back    pop = pop_front   (FIFO)
//! ```
//!
//! Every operation is O(1) because both ends they touch are reachable
//! without a scan.
//!
//! # Example
//!
//! ```
//! use dsa_collections::{Queue, Stack};
//!
//! let mut stack = Stack::new();
//! stack.push(1);
//! stack.push(2);
//! assert_eq!(stack.pop(), Ok(2));
//!
//! let mut queue = Queue::new();
//! queue.enqueue(1);
//! queue.enqueue(2);
//! assert_eq!(queue.dequeue(), Ok(1));
//! ```

mod queue;
mod stack;

pub use queue::Queue;
pub use stack::Stack;

//! Hand-written collection primitives that manage their own memory.
//!
//! Each structure keeps its invariants across every mutation and reports
//! misuse through [`CollectionError`] instead of panicking. Lookups that
//! simply find nothing return `Option`/`bool`, never an error.
//!
//! # Data Structures
//!
//! | Structure | Backing | Key Operations |
//! |-----------|---------|----------------|
//! | [`DynamicArray`] | Raw contiguous allocation, doubling | O(1) amortized push, O(1) pop/index |
//! | [`LinkedList`] | Singly-linked nodes in a slab arena | O(1) push front/back, pop front |
//! | [`Stack`] / [`Queue`] | Views over [`LinkedList`] | O(1) push/pop |
//! | [`BinarySearchTree`] | Unbalanced BST in a slab arena | O(h) insert/search/remove |
//! | [`ChainedHashMap`] | Bucket vector with chaining | O(1) expected put/get/remove |
//! | [`Graph`] | Adjacency lists | O(degree) edge insert, BFS/DFS |
//!
//! # Node Arenas
//!
//! Linked structures store their nodes in a [`Storage`] and refer to them by
//! [`Key`] rather than by pointer:
//!
//! ```text
//! Storage (Slab)     - owns every node, hands out stable keys
//! List/Tree          - hold head/root keys, nodes link to each other by key
//! ```
//!
//! Each node therefore has exactly one owner (the arena), teardown and deep
//! copy are flat passes over the arena, and no operation recurses per node.
//!
//! # Quick Start
//!
//! ```
//! use dsa_collections::{BinarySearchTree, ChainedHashMap, DynamicArray, Graph, Queue};
//!
//! let mut array = DynamicArray::new();
//! array.push(1);
//! assert_eq!(array.at(0), Ok(&1));
//!
//! let mut queue = Queue::new();
//! queue.enqueue("job");
//! assert_eq!(queue.dequeue(), Ok("job"));
//!
//! let mut tree = BinarySearchTree::new();
//! tree.insert(3, "three");
//! assert_eq!(tree.get(&3), Some(&"three"));
//!
//! let mut map = ChainedHashMap::new();
//! map.put("k", 1);
//! assert_eq!(map.get("k"), Some(&1));
//!
//! let mut graph = Graph::new();
//! let a = graph.add_vertex(());
//! let b = graph.add_vertex(());
//! graph.add_edge(a, b)?;
//! assert_eq!(graph.bfs(a), vec![a, b]);
//! # Ok::<(), dsa_collections::CollectionError>(())
//! ```
//!
//! # Logging
//!
//! Growth, rehash and rejected-edge events are emitted through `tracing`.
//! The crate installs no subscriber; callers choose where events go.
//!
//! # Thread Safety
//!
//! Every structure is a plain owned value with no interior mutability.
//! Sharing one across threads needs external synchronization.

#![warn(missing_docs)]

pub mod adapter;
pub mod array;
pub mod error;
pub mod graph;
pub mod hash_map;
pub mod key;
pub mod list;
pub mod storage;
pub mod tree;

pub use adapter::{Queue, Stack};
pub use array::DynamicArray;
pub use error::CollectionError;
pub use graph::Graph;
pub use hash_map::{ChainedHashMap, HashMapBuilder};
pub use key::Key;
pub use list::LinkedList;
pub use storage::Storage;
pub use tree::BinarySearchTree;

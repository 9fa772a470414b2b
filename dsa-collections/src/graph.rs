//! Directed graph stored as adjacency lists.
//!
//! Vertices are numbered from zero in insertion order and keep their index
//! for the lifetime of the graph. Each vertex owns a value and an ordered
//! list of outgoing neighbor indices. Edges are directed and deduplicated:
//! adding `(a, b)` twice stores `b` once in `a`'s list, and never adds
//! `(b, a)`.
//!
//! Traversals return the visitation order as a vector of vertex indices.
//! Neighbors are explored in the order their edges were added, so the order
//! is fully determined by the construction sequence.
//!
//! # Example
//!
//! ```
//! use dsa_collections::Graph;
//!
//! let mut graph = Graph::new();
//! let a = graph.add_vertex("a");
//! let b = graph.add_vertex("b");
//! let c = graph.add_vertex("c");
//!
//! assert_eq!(graph.add_edge(a, b), Ok(true));
//! assert_eq!(graph.add_edge(a, c), Ok(true));
//! assert_eq!(graph.add_edge(a, b), Ok(false));
//!
//! assert_eq!(graph.bfs(a), vec![a, b, c]);
//! assert_eq!(graph.to_string(), "Vertex 0: -> 1 -> 2\nVertex 1:\nVertex 2:\n");
//! ```

use std::collections::VecDeque;
use std::fmt;

use tracing::debug;

use crate::CollectionError;

/// A directed graph with a value per vertex.
#[derive(Clone, Debug, Default)]
pub struct Graph<T> {
    values: Vec<T>,
    adjacency: Vec<Vec<usize>>,
    edge_count: usize,
}

impl<T> Graph<T> {
    /// Creates an empty graph.
    pub const fn new() -> Self {
        Self {
            values: Vec::new(),
            adjacency: Vec::new(),
            edge_count: 0,
        }
    }

    /// Creates an empty graph with room for `capacity` vertices.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            values: Vec::with_capacity(capacity),
            adjacency: Vec::with_capacity(capacity),
            edge_count: 0,
        }
    }

    /// Creates a graph with `count` vertices holding `T::default()` and
    /// no edges.
    pub fn with_vertices(count: usize) -> Self
    where
        T: Default,
    {
        let mut graph = Self::with_capacity(count);
        for _ in 0..count {
            graph.add_vertex(T::default());
        }
        graph
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.values.len()
    }

    /// Returns the number of distinct directed edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Returns `true` if the graph has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Adds a vertex and returns its index.
    ///
    /// Indices start at 0 and increase by one per call.
    pub fn add_vertex(&mut self, value: T) -> usize {
        let index = self.values.len();
        self.values.push(value);
        self.adjacency.push(Vec::new());
        index
    }

    /// Adds the directed edge `src -> dest`.
    ///
    /// Returns `Ok(false)` if the edge already exists. Fails with
    /// [`CollectionError::InvalidVertex`] if either endpoint is not a
    /// vertex; the graph is unchanged in both cases.
    ///
    /// O(out-degree of `src`).
    pub fn add_edge(&mut self, src: usize, dest: usize) -> Result<bool, CollectionError> {
        let vertex_count = self.vertex_count();
        for vertex in [src, dest] {
            if vertex >= vertex_count {
                debug!(src, dest, vertex_count, "rejected edge");
                return Err(CollectionError::InvalidVertex {
                    vertex,
                    vertex_count,
                });
            }
        }

        let neighbors = &mut self.adjacency[src];
        if neighbors.contains(&dest) {
            return Ok(false);
        }
        neighbors.push(dest);
        self.edge_count += 1;
        Ok(true)
    }

    /// Returns `true` if the edge `src -> dest` exists.
    pub fn has_edge(&self, src: usize, dest: usize) -> bool {
        self.adjacency
            .get(src)
            .is_some_and(|neighbors| neighbors.contains(&dest))
    }

    /// Returns the outgoing neighbors of `vertex` in insertion order.
    #[inline]
    pub fn neighbors(&self, vertex: usize) -> Option<&[usize]> {
        self.adjacency.get(vertex).map(Vec::as_slice)
    }

    /// Returns the value stored at `vertex`.
    #[inline]
    pub fn vertex(&self, vertex: usize) -> Option<&T> {
        self.values.get(vertex)
    }

    /// Returns a mutable reference to the value stored at `vertex`.
    #[inline]
    pub fn vertex_mut(&mut self, vertex: usize) -> Option<&mut T> {
        self.values.get_mut(vertex)
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    /// Breadth-first visitation order from `start`.
    ///
    /// Returns an empty vector if `start` is not a vertex.
    pub fn bfs(&self, start: usize) -> Vec<usize> {
        let mut order = Vec::new();
        if start >= self.vertex_count() {
            return order;
        }

        let mut visited = vec![false; self.vertex_count()];
        let mut queue = VecDeque::new();
        visited[start] = true;
        queue.push_back(start);

        while let Some(vertex) = queue.pop_front() {
            order.push(vertex);
            for &next in &self.adjacency[vertex] {
                if !visited[next] {
                    visited[next] = true;
                    queue.push_back(next);
                }
            }
        }
        order
    }

    /// Depth-first pre-order from `start`.
    ///
    /// Iterative; neighbors are pushed in reverse so the first neighbor is
    /// explored first, giving the same order as the recursive descent.
    /// Returns an empty vector if `start` is not a vertex.
    pub fn dfs(&self, start: usize) -> Vec<usize> {
        let mut order = Vec::new();
        if start >= self.vertex_count() {
            return order;
        }

        let mut visited = vec![false; self.vertex_count()];
        let mut stack = vec![start];

        while let Some(vertex) = stack.pop() {
            if visited[vertex] {
                continue;
            }
            visited[vertex] = true;
            order.push(vertex);

            for &next in self.adjacency[vertex].iter().rev() {
                if !visited[next] {
                    stack.push(next);
                }
            }
        }
        order
    }

    /// Writes one line per vertex: `Vertex i:` followed by ` -> n` for each
    /// neighbor.
    pub fn write_adjacency<W: fmt::Write>(&self, out: &mut W) -> fmt::Result {
        for (vertex, neighbors) in self.adjacency.iter().enumerate() {
            write!(out, "Vertex {vertex}:")?;
            for next in neighbors {
                write!(out, " -> {next}")?;
            }
            out.write_char('\n')?;
        }
        Ok(())
    }
}

impl<T> fmt::Display for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_adjacency(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Edges (0,1), (0,2), (1,2), (2,3) over four vertices.
    fn diamond() -> Graph<()> {
        let mut graph = Graph::with_vertices(4);
        for (src, dest) in [(0, 1), (0, 2), (1, 2), (2, 3)] {
            assert_eq!(graph.add_edge(src, dest), Ok(true));
        }
        graph
    }

    // =========================================================================
    // Vertices and edges
    // =========================================================================

    #[test]
    fn vertex_indices_start_at_zero() {
        let mut graph = Graph::new();
        for expected in 0..5 {
            assert_eq!(graph.add_vertex(expected * 10), expected);
        }
        assert_eq!(graph.vertex_count(), 5);
        assert_eq!(graph.vertex(3), Some(&30));
        assert_eq!(graph.vertex(5), None);
    }

    #[test]
    fn vertex_mut_updates_value() {
        let mut graph = Graph::new();
        let v = graph.add_vertex(String::from("a"));
        graph.vertex_mut(v).unwrap().push('b');
        assert_eq!(graph.vertex(v).map(String::as_str), Some("ab"));
    }

    #[test]
    fn duplicate_edge_stored_once() {
        let mut graph: Graph<()> = Graph::with_vertices(2);
        assert_eq!(graph.add_edge(0, 1), Ok(true));
        assert_eq!(graph.add_edge(0, 1), Ok(false));

        assert_eq!(graph.neighbors(0), Some(&[1][..]));
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn edges_are_directed() {
        let mut graph: Graph<()> = Graph::with_vertices(2);
        graph.add_edge(0, 1).unwrap();

        assert!(graph.has_edge(0, 1));
        assert!(!graph.has_edge(1, 0));
        assert_eq!(graph.neighbors(1), Some(&[][..]));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let mut graph = diamond();
        let before = graph.clone();

        assert_eq!(
            graph.add_edge(0, 4),
            Err(CollectionError::InvalidVertex {
                vertex: 4,
                vertex_count: 4
            })
        );
        assert_eq!(
            graph.add_edge(9, 0),
            Err(CollectionError::InvalidVertex {
                vertex: 9,
                vertex_count: 4
            })
        );

        assert_eq!(graph.edge_count(), before.edge_count());
        for v in 0..4 {
            assert_eq!(graph.neighbors(v), before.neighbors(v));
        }
    }

    #[test]
    fn self_loop_allowed() {
        let mut graph: Graph<()> = Graph::with_vertices(1);
        assert_eq!(graph.add_edge(0, 0), Ok(true));
        assert_eq!(graph.bfs(0), vec![0]);
        assert_eq!(graph.dfs(0), vec![0]);
    }

    // =========================================================================
    // Traversal
    // =========================================================================

    #[test]
    fn bfs_order() {
        assert_eq!(diamond().bfs(0), vec![0, 1, 2, 3]);
    }

    #[test]
    fn dfs_order() {
        assert_eq!(diamond().dfs(0), vec![0, 1, 2, 3]);
    }

    #[test]
    fn bfs_and_dfs_differ_on_wide_graph() {
        // 0 -> 1 -> 3, 0 -> 2
        let mut graph: Graph<()> = Graph::with_vertices(4);
        for (src, dest) in [(0, 1), (0, 2), (1, 3)] {
            graph.add_edge(src, dest).unwrap();
        }

        assert_eq!(graph.bfs(0), vec![0, 1, 2, 3]);
        assert_eq!(graph.dfs(0), vec![0, 1, 3, 2]);
    }

    #[test]
    fn traversal_only_reaches_reachable() {
        let graph = diamond();
        assert_eq!(graph.bfs(2), vec![2, 3]);
        assert_eq!(graph.dfs(3), vec![3]);
    }

    #[test]
    fn traversal_handles_cycles() {
        let mut graph: Graph<()> = Graph::with_vertices(3);
        for (src, dest) in [(0, 1), (1, 2), (2, 0)] {
            graph.add_edge(src, dest).unwrap();
        }
        assert_eq!(graph.bfs(1), vec![1, 2, 0]);
        assert_eq!(graph.dfs(1), vec![1, 2, 0]);
    }

    #[test]
    fn invalid_start_is_empty() {
        let graph = diamond();
        assert!(graph.bfs(4).is_empty());
        assert!(graph.dfs(100).is_empty());

        let empty: Graph<()> = Graph::new();
        assert!(empty.bfs(0).is_empty());
    }

    #[test]
    fn deep_chain_dfs() {
        const N: usize = 100_000;

        let mut graph: Graph<()> = Graph::with_vertices(N);
        for v in 0..N - 1 {
            graph.add_edge(v, v + 1).unwrap();
        }
        let order = graph.dfs(0);
        assert_eq!(order.len(), N);
        assert_eq!(order[N - 1], N - 1);
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    #[test]
    fn display_renders_adjacency() {
        let expected = "Vertex 0: -> 1 -> 2\nVertex 1: -> 2\nVertex 2: -> 3\nVertex 3:\n";
        assert_eq!(diamond().to_string(), expected);
    }

    #[test]
    fn clone_is_independent() {
        let original = diamond();
        let mut copy = original.clone();
        copy.add_edge(3, 0).unwrap();

        assert!(!original.has_edge(3, 0));
        assert_eq!(original.edge_count(), 4);
        assert_eq!(copy.edge_count(), 5);
    }
}

//! Breadth-first reachability oracle.

use std::collections::VecDeque;

/// For every start node, marks the nodes reachable by a walk of at least one
/// edge. Runs an independent BFS per start node.
pub(super) fn bfs_reachability(node_count: usize, edges: &[(usize, usize)]) -> Vec<Vec<bool>> {
    let mut neighbours = vec![Vec::new(); node_count];
    for &(left, right) in edges {
        neighbours[left].push(right);
        neighbours[right].push(left);
    }

    (0..node_count)
        .map(|start| {
            let mut reached = vec![false; node_count];
            let mut queue: VecDeque<usize> = neighbours[start].iter().copied().collect();
            while let Some(node) = queue.pop_front() {
                if reached[node] {
                    continue;
                }
                reached[node] = true;
                queue.extend(neighbours[node].iter().copied().filter(|next| !reached[*next]));
            }
            reached
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::bfs_reachability;

    #[test]
    fn oracle_excludes_start_without_round_trip() {
        let reach = bfs_reachability(3, &[(0, 1)]);

        assert_eq!(
            reach,
            vec![
                vec![true, true, false],
                vec![true, true, false],
                vec![false, false, false],
            ]
        );
    }

    #[test]
    fn oracle_honours_self_loops() {
        let reach = bfs_reachability(2, &[(1, 1)]);

        assert_eq!(reach, vec![vec![false, false], vec![false, true]]);
    }
}

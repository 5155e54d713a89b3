use super::*;
use crate::{distance, Point, PositionProvider};

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

/// Search bookkeeping for a single Node. `f` is always `g + h`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Score {
    pub g: Cost,
    pub h: Cost,
    pub pos: Point,
    pub came_from: Option<NodeKey>,
}

impl Score {
    pub fn f(&self) -> Cost {
        self.g + self.h
    }
}

/// Entry of the open set. Lowest `f` first, ties go to the entry that was pushed first.
#[derive(Debug)]
struct HeuristicElement {
    key: NodeKey,
    f: Cost,
    order: usize,
}
impl PartialEq for HeuristicElement {
    fn eq(&self, rhs: &Self) -> bool {
        self.cmp(rhs) == Ordering::Equal
    }
}
impl Eq for HeuristicElement {}
impl PartialOrd for HeuristicElement {
    fn partial_cmp(&self, rhs: &Self) -> Option<Ordering> {
        Some(self.cmp(rhs))
    }
}
impl Ord for HeuristicElement {
    fn cmp(&self, rhs: &Self) -> Ordering {
        rhs.f
            .total_cmp(&self.f)
            .then_with(|| rhs.order.cmp(&self.order))
    }
}

pub(crate) fn a_star_search<Id, P>(
    nodes: &NodeList<Id>,
    start: NodeKey,
    goal: NodeKey,
    positions: &P,
) -> Option<Path<Id>>
where
    Id: Copy + Eq + Hash,
    P: PositionProvider<Id> + ?Sized,
{
    let start_pos = positions.position(nodes[start].id)?;
    let goal_pos = positions.position(nodes[goal].id)?;

    if start == goal {
        return Some(Path::new(vec![nodes[start].id], 0.0));
    }

    let size_hint = nodes.len();
    let mut scores = NodeKeyMap::with_capacity_and_hasher(size_hint, Default::default());
    let mut closed = NodeKeySet::with_capacity_and_hasher(size_hint, Default::default());
    let mut open = BinaryHeap::with_capacity(size_hint / 2);
    let mut pushed = 0;

    let start_score = Score {
        g: 0.0,
        h: distance(start_pos, goal_pos),
        pos: start_pos,
        came_from: None,
    };
    open.push(HeuristicElement {
        key: start,
        f: start_score.f(),
        order: pushed,
    });
    scores.insert(start, start_score);

    while let Some(HeuristicElement { key: current, .. }) = open.pop() {
        // a Node is pushed again every time its score improves, the older entries are stale
        if !closed.insert(current) {
            continue;
        }
        if current == goal {
            return Some(reconstruct_path(nodes, start, goal, &scores));
        }

        let current_score = scores[&current];

        for edge in nodes[current].edges.iter() {
            let neighbor = edge.end;
            if closed.contains(&neighbor) {
                continue;
            }
            let neighbor_pos = match positions.position(nodes[neighbor].id) {
                Some(pos) => pos,
                None => {
                    debug_log!("skipping Node {} without a position", neighbor);
                    continue;
                }
            };

            let tentative_g = current_score.g + distance(current_score.pos, neighbor_pos);

            let improves = match scores.get(&neighbor) {
                Some(existing) => tentative_g < existing.g,
                None => true,
            };
            if !improves {
                continue;
            }

            let score = Score {
                g: tentative_g,
                h: distance(neighbor_pos, goal_pos),
                pos: neighbor_pos,
                came_from: Some(current),
            };
            pushed += 1;
            open.push(HeuristicElement {
                key: neighbor,
                f: score.f(),
                order: pushed,
            });
            scores.insert(neighbor, score);
        }
    }

    None
}

/// Follows the `came_from` links from `goal` back to `start`.
pub(crate) fn reconstruct_path<Id: Copy>(
    nodes: &NodeList<Id>,
    start: NodeKey,
    goal: NodeKey,
    scores: &NodeKeyMap<Score>,
) -> Path<Id> {
    let mut steps = vec![];
    let mut current = Some(goal);

    while let Some(key) = current {
        steps.push(nodes[key].id);
        if key == start {
            break;
        }
        current = scores.get(&key).and_then(|score| score.came_from);
    }
    steps.reverse();

    let cost = scores.get(&goal).map_or(0.0, |score| score.g);
    Path::new(steps, cost)
}

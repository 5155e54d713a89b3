use super::Cost;

use std::sync::Arc;

/// An ordered sequence of Waypoints, from the start to the goal (both inclusive), together with
/// the total length of the walk.
///
/// Paths are cheap to clone: the Waypoints are shared between all clones.
#[derive(Debug, Clone, PartialEq)]
pub struct Path<P> {
    path: Arc<[P]>,
    cost: Cost,
}

impl<P> Path<P> {
    /// Creates a Path from its Waypoints and total cost
    pub fn new(path: Vec<P>, cost: Cost) -> Path<P> {
        Path {
            path: path.into(),
            cost,
        }
    }

    /// The total length of the Path
    pub fn cost(&self) -> Cost {
        self.cost
    }

    /// The number of Waypoints, including start and goal
    pub fn len(&self) -> usize {
        self.path.len()
    }

    /// `true` if the Path has no Waypoints at all
    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// The first Waypoint of the Path
    pub fn start(&self) -> Option<&P> {
        self.path.first()
    }

    /// The last Waypoint of the Path
    pub fn goal(&self) -> Option<&P> {
        self.path.last()
    }

    /// The Waypoints as a slice
    pub fn as_slice(&self) -> &[P] {
        &self.path
    }

    /// Returns an Iterator over the Waypoints
    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.path.iter()
    }
}

use std::ops::Index;

impl<P> Index<usize> for Path<P> {
    type Output = P;
    #[track_caller]
    fn index(&self, index: usize) -> &P {
        &self.path[index]
    }
}

impl<'a, P> IntoIterator for &'a Path<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<P: PartialEq> PartialEq<Vec<P>> for Path<P> {
    fn eq(&self, rhs: &Vec<P>) -> bool {
        self.as_slice() == rhs.as_slice()
    }
}

impl<'a, P: PartialEq> PartialEq<&'a [P]> for Path<P> {
    fn eq(&self, rhs: &&'a [P]) -> bool {
        self.as_slice() == *rhs
    }
}

use std::cmp::Ordering;

/// Paths are ordered by their cost. Different Paths with the same cost are not comparable.
impl<P: PartialEq> PartialOrd for Path<P> {
    fn partial_cmp(&self, other: &Path<P>) -> Option<Ordering> {
        match self.cost.partial_cmp(&other.cost) {
            Some(Ordering::Equal) if self.path != other.path => None,
            ord => ord,
        }
    }
}

use std::fmt;
impl<P: fmt::Display> fmt::Display for Path<P> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "Path[Cost = {}]: ", self.cost)?;
        if self.path.is_empty() {
            write!(fmt, "<empty>")
        } else {
            write!(fmt, "{}", self.path[0])?;
            for p in self.path.iter().skip(1) {
                write!(fmt, " -> {}", p)?;
            }
            Ok(())
        }
    }
}

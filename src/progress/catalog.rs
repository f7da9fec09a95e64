//! Static course-dependency graph for the mandatory CS/Math track.
//!
//! The graph is immutable configuration: nodes and edges are compiled in and
//! loaded once into a `petgraph` digraph. Per-user completion state lives in
//! `tracker` and never touches this data.

use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;
use serde::Serialize;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

/// Identifier of a course node in the graph (`CS_111`, `MATH_141`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CourseId(&'static str);

impl CourseId {
    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Borrow<str> for CourseId {
    fn borrow(&self) -> &str {
        self.0
    }
}

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Cs,
    Math,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseNode {
    pub id: CourseId,
    pub display_name: &'static str,
    pub category: Category,
}

pub const COURSES: &[(&str, &str, Category)] = &[
    ("CS_111", "CS 111- Intro To Algorithmic Problem Solving", Category::Cs),
    ("CS_211", "CS 211- Object-Oriented-Programming (C++)", Category::Cs),
    ("CS_220", "CS 220- Discrete", Category::Cs),
    ("CS_320", "CS 320-Theory of Comp", Category::Cs),
    ("CS_212", "CS 212- Object-Oriented-Programming (JAVA)", Category::Cs),
    ("CS_313", "CS 313- Data Structures", Category::Cs),
    ("CS_323", "CS 323- Theory of Computation", Category::Cs),
    ("CS_343", "CS 343- Computer Networks", Category::Cs),
    ("CS_370", "CS 370- Operating Systems", Category::Cs),
    ("CS_316", "CS 316- Database Systems", Category::Cs),
    ("CS_340", "CS 340- Software Engineering", Category::Cs),
    ("CS_240", "CS 240-Comp org and assembly language", Category::Cs),
    ("CS_331", "CS 331- DataBase Systems", Category::Cs),
    ("MATH_122", "MATH 122- Precalculus", Category::Math),
    ("MATH_141", "MATH 141- Calculus 1", Category::Math),
    ("MATH_151", "MATH 151- Calculus 1", Category::Math),
    ("MATH_152", "MATH 152- Calculus 2", Category::Math),
    ("MATH_142", "MATH 142- Calculus 2", Category::Math),
    ("MATH_143", "MATH 143- Calculus 3", Category::Math),
    ("MATH_241", "MATH 241- Prob & Stat", Category::Math),
    ("MATH_120", "MATH 120- Discrete Math", Category::Math),
    ("MATH_231", "MATH 231- Linear Algebra", Category::Math),
];

/// `(prerequisite, dependent)` pairs.
pub const PREREQUISITES: &[(&str, &str)] = &[
    ("CS_111", "CS_211"),
    ("CS_111", "CS_212"),
    ("CS_111", "CS_240"),
    ("CS_111", "CS_220"),
    ("CS_211", "CS_313"),
    ("CS_212", "CS_313"),
    ("CS_220", "CS_320"),
    ("CS_313", "CS_323"),
    ("CS_313", "CS_331"),
    ("CS_313", "CS_370"),
    ("CS_313", "CS_316"),
    ("CS_320", "CS_316"),
    ("CS_240", "CS_316"),
    ("CS_313", "CS_340"),
    ("CS_240", "CS_340"),
    ("CS_240", "CS_343"),
    ("CS_320", "CS_343"),
    ("MATH_122", "MATH_141"),
    ("MATH_120", "CS_220"),
    ("MATH_122", "MATH_151"),
    ("MATH_122", "MATH_120"),
    ("MATH_141", "MATH_142"),
    ("MATH_141", "CS_220"),
    ("MATH_142", "MATH_143"),
    ("MATH_143", "MATH_241"),
    ("MATH_151", "CS_220"),
    ("MATH_151", "MATH_152"),
    ("MATH_152", "MATH_241"),
    ("MATH_120", "CS_211"),
    ("MATH_120", "CS_212"),
    ("MATH_141", "MATH_231"),
    ("MATH_151", "MATH_231"),
];

#[derive(Debug)]
pub struct Catalog {
    graph: DiGraph<CourseNode, ()>,
    index: HashMap<&'static str, NodeIndex>,
}

impl Catalog {
    /// Builds a catalog from static node and edge tables. Edges naming an
    /// unknown course are ignored; the graph is trusted and not checked
    /// for cycles.
    pub fn new(courses: &[(&'static str, &'static str, Category)], edges: &[(&'static str, &'static str)]) -> Catalog {
        let mut graph: DiGraph<CourseNode, ()> = DiGraph::new();
        let mut index: HashMap<&'static str, NodeIndex> = HashMap::new();

        for (id, name, category) in courses.iter().copied() {
            let idx = graph.add_node(CourseNode { id: CourseId(id), display_name: name, category });
            index.insert(id, idx);
        }
        for (from, to) in edges.iter() {
            if let (Some(&a), Some(&b)) = (index.get(from), index.get(to)) {
                if graph.find_edge(a, b).is_none() {
                    graph.add_edge(a, b, ());
                }
            }
        }
        Catalog { graph, index }
    }

    /// The mandatory-course graph, built on first use.
    pub fn standard() -> &'static Catalog {
        static CATALOG: OnceLock<Catalog> = OnceLock::new();
        CATALOG.get_or_init(|| Catalog::new(COURSES, PREREQUISITES))
    }

    /// Resolves a raw id to a course in this catalog.
    pub fn lookup(&self, id: &str) -> Option<CourseId> {
        self.index.get(id).map(|idx| self.graph[*idx].id)
    }

    pub fn node(&self, id: CourseId) -> Option<&CourseNode> {
        self.index.get(id.as_str()).map(|idx| &self.graph[*idx])
    }

    /// Courses in declaration order.
    pub fn courses(&self) -> impl Iterator<Item = &CourseNode> {
        self.graph.node_indices().map(move |idx| &self.graph[idx])
    }

    /// Direct prerequisites of `id`.
    pub fn prerequisites(&self, id: CourseId) -> Vec<CourseId> {
        self.neighbors(id, Direction::Incoming)
    }

    /// Courses that list `id` as a direct prerequisite.
    pub fn dependents(&self, id: CourseId) -> Vec<CourseId> {
        self.neighbors(id, Direction::Outgoing)
    }

    /// Courses without prerequisites.
    pub fn roots(&self) -> Vec<CourseId> {
        self.courses()
            .map(|n| n.id)
            .filter(|id| self.prerequisites(*id).is_empty())
            .collect()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    fn neighbors(&self, id: CourseId, dir: Direction) -> Vec<CourseId> {
        let Some(&idx) = self.index.get(id.as_str()) else {
            return Vec::new();
        };
        let mut out: Vec<CourseId> = self
            .graph
            .neighbors_directed(idx, dir)
            .map(|n| self.graph[n].id)
            .collect();
        out.sort();
        out
    }
}

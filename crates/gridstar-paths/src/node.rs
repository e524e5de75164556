use gridstar_core::{Cell, Dims};

/// Search bookkeeping for one cell.
///
/// `g` and `f` only change together through [`NodeState::update`], so they
/// can never disagree. `f` is meaningless while `g` is infinite.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NodeState {
    g: f64,
    h: f64,
    f: f64,
    parent: Option<Cell>,
}

impl NodeState {
    /// A node no path has reached yet: infinite `g`, no parent.
    pub const fn unreached() -> Self {
        Self {
            g: f64::INFINITY,
            h: f64::INFINITY,
            f: f64::INFINITY,
            parent: None,
        }
    }

    /// The search root: `g = 0`, no parent.
    pub fn root(h: f64) -> Self {
        Self {
            g: 0.0,
            h,
            f: h,
            parent: None,
        }
    }

    /// Best known cost from the start.
    #[inline]
    pub fn g(&self) -> f64 {
        self.g
    }

    /// `g` plus the heuristic estimate to the goal.
    #[inline]
    pub fn f(&self) -> f64 {
        self.f
    }

    /// The heuristic estimate recorded by the last update.
    #[inline]
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Predecessor on the best known path.
    #[inline]
    pub fn parent(&self) -> Option<Cell> {
        self.parent
    }

    #[inline]
    pub fn is_g_infinite(&self) -> bool {
        self.g.is_infinite()
    }

    /// Record a better path: new `g`, `f = g + h` and parent in one step.
    #[inline]
    pub fn update(&mut self, g: f64, h: f64, parent: Cell) {
        self.g = g;
        self.h = h;
        self.f = g + h;
        self.parent = Some(parent);
    }
}

impl Default for NodeState {
    fn default() -> Self {
        Self::unreached()
    }
}

/// Per-search arena of [`NodeState`]s indexed by cell.
///
/// Entries are created lazily the first time a cell is encountered and the
/// whole table is dropped with the search that owns it.
#[derive(Clone, Debug)]
pub struct NodeTable {
    dims: Dims,
    nodes: Vec<Option<NodeState>>,
    touched: usize,
}

impl NodeTable {
    pub fn new(dims: Dims) -> Self {
        Self {
            dims,
            nodes: vec![None; dims.len()],
            touched: 0,
        }
    }

    pub fn dims(&self) -> Dims {
        self.dims
    }

    /// State of `cell`, or `None` if the search has not met it yet.
    #[inline]
    pub fn get(&self, cell: Cell) -> Option<&NodeState> {
        self.dims.index(cell).and_then(|i| self.nodes[i].as_ref())
    }

    /// Mutable state of `cell`, creating an unreached entry on first
    /// access. Returns `None` only for cells outside the grid.
    #[inline]
    pub fn entry(&mut self, cell: Cell) -> Option<&mut NodeState> {
        let i = self.dims.index(cell)?;
        let slot = &mut self.nodes[i];
        if slot.is_none() {
            self.touched += 1;
        }
        Some(slot.get_or_insert_with(NodeState::unreached))
    }

    /// Replace the state of `cell` outright.
    pub fn insert(&mut self, cell: Cell, state: NodeState) -> Option<NodeState> {
        let i = self.dims.index(cell)?;
        let old = self.nodes[i].replace(state);
        if old.is_none() {
            self.touched += 1;
        }
        old
    }

    /// Number of cells the search has created state for.
    pub fn len(&self) -> usize {
        self.touched
    }

    pub fn is_empty(&self) -> bool {
        self.touched == 0
    }
}

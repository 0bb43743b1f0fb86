use grid_util::point::Point;

/// The classification of a [Cell]. Barriers block traversal, the remaining roles either mark
/// the endpoints placed by the user or record how far the search has progressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Role {
    #[default]
    Empty,
    Start,
    End,
    Barrier,
    Open,
    Closed,
    Path,
}

impl Role {
    pub fn is_barrier(self) -> bool {
        self == Role::Barrier
    }
    pub fn is_endpoint(self) -> bool {
        matches!(self, Role::Start | Role::End)
    }
    /// Roles that only a search assigns and that [Role::Empty] replaces on a fresh run.
    pub fn is_search_mark(self) -> bool {
        matches!(self, Role::Open | Role::Closed | Role::Path)
    }
    /// Glyph used when printing a grid to a terminal.
    pub fn symbol(self) -> char {
        match self {
            Role::Empty => '.',
            Role::Start => 'S',
            Role::End => 'E',
            Role::Barrier => '#',
            Role::Open => 'o',
            Role::Closed => 'x',
            Role::Path => '*',
        }
    }
    /// Fill colour for graphical renderers.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            Role::Empty => (230, 230, 240),
            Role::Start => (80, 180, 50),
            Role::End => (210, 65, 85),
            Role::Barrier => (20, 25, 30),
            Role::Open => (130, 140, 160),
            Role::Closed => (160, 170, 190),
            Role::Path => (100, 20, 240),
        }
    }
}

/// A single grid location. The position is fixed at construction, the role is set by
/// placement and by the search, and the scores and parent link are owned by the search.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pos: Point,
    pub(crate) role: Role,
    pub(crate) g_score: f64,
    pub(crate) f_score: f64,
    pub(crate) parent: Option<usize>,
    pub(crate) queued: bool,
}

impl Cell {
    pub(crate) fn new(row: usize, col: usize) -> Cell {
        Cell {
            pos: Point::new(col as i32, row as i32),
            role: Role::Empty,
            g_score: f64::INFINITY,
            f_score: f64::INFINITY,
            parent: None,
            queued: false,
        }
    }
    pub fn point(&self) -> Point {
        self.pos
    }
    pub fn row(&self) -> usize {
        self.pos.y as usize
    }
    pub fn col(&self) -> usize {
        self.pos.x as usize
    }
    pub fn role(&self) -> Role {
        self.role
    }
    pub fn is_barrier(&self) -> bool {
        self.role.is_barrier()
    }
    /// Best known cost from the start, [f64::INFINITY] if the cell has not been discovered.
    pub fn g_score(&self) -> f64 {
        self.g_score
    }
    pub fn f_score(&self) -> f64 {
        self.f_score
    }
    /// Flat index of the predecessor on the best known path.
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }
    /// Whether the cell is currently waiting in the frontier.
    pub fn is_queued(&self) -> bool {
        self.queued
    }

    pub(crate) fn reset_search_state(&mut self) {
        self.g_score = f64::INFINITY;
        self.f_score = f64::INFINITY;
        self.parent = None;
        self.queued = false;
    }
    /// Turns the cell back into an empty one, dropping both role and search state.
    pub(crate) fn reset(&mut self) {
        self.role = Role::Empty;
        self.reset_search_state();
    }
    /// Applies a search mark unless the cell holds an endpoint.
    pub(crate) fn mark(&mut self, role: Role) {
        if !self.role.is_endpoint() {
            self.role = role;
        }
    }
}

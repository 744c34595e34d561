//! Dense 2D storage with pluggable traversal order.
//!
//! Storage layout and visit order are decoupled: a [`Grid2`] implementation
//! decides where cells live in memory ([`RowMajorGrid`] keeps rows
//! contiguous, [`BlockedGrid`] keeps square tiles contiguous), while a
//! [`Traversal`] decides the order `(column, row)` positions are yielded in.
//! Out-of-range coordinates are a contract violation and panic.

/// The order a full-grid visit yields positions in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Traversal {
    RowMajor,
    ColMajor,
    /// Square tiles of the given side, visited row-major over tiles; cells
    /// within a tile are visited column-major (top-left, bottom-left,
    /// top-right, bottom-right for side 2).
    BlockMajor(usize),
}

impl Traversal {
    pub fn positions(self, width: usize, height: usize) -> Box<dyn Iterator<Item = (usize, usize)>> {
        match self {
            Traversal::RowMajor => {
                Box::new((0..height).flat_map(move |row| (0..width).map(move |col| (col, row))))
            }
            Traversal::ColMajor => {
                Box::new((0..width).flat_map(move |col| (0..height).map(move |row| (col, row))))
            }
            Traversal::BlockMajor(side) => {
                assert!(side > 0);
                Box::new((0..height.div_ceil(side)).flat_map(move |tile_row| {
                    (0..width.div_ceil(side)).flat_map(move |tile_col| {
                        (0..side).flat_map(move |dx| {
                            (0..side).filter_map(move |dy| {
                                let col = tile_col * side + dx;
                                let row = tile_row * side + dy;
                                (col < width && row < height).then_some((col, row))
                            })
                        })
                    })
                }))
            }
        }
    }
}

/// Capability set the codec depends on: dimensions, random access, and
/// ordered visits. Nothing here assumes a particular memory layout.
pub trait Grid2<T> {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn get(&self, col: usize, row: usize) -> &T;
    fn get_mut(&mut self, col: usize, row: usize) -> &mut T;

    /// Visits every cell as `(column, row, element)` in the given order.
    fn visit<'a>(&'a self, order: Traversal) -> Box<dyn Iterator<Item = (usize, usize, &'a T)> + 'a>
    where
        Self: Sized,
        T: 'a,
    {
        Box::new(
            order
                .positions(self.width(), self.height())
                .map(move |(col, row)| (col, row, self.get(col, row))),
        )
    }
}

/// Plain dense grid, rows contiguous in memory.
#[derive(Debug, Clone, PartialEq)]
pub struct RowMajorGrid<T> {
    width: usize,
    height: usize,
    cells: Vec<T>,
}

impl<T> RowMajorGrid<T> {
    pub fn from_fn(width: usize, height: usize, mut cell: impl FnMut(usize, usize) -> T) -> Self {
        let positions = Traversal::RowMajor.positions(width, height);
        Self {
            width,
            height,
            cells: positions.map(|(col, row)| cell(col, row)).collect(),
        }
    }

    fn index(&self, col: usize, row: usize) -> usize {
        assert!(col < self.width && row < self.height);
        row * self.width + col
    }
}

impl<T> Grid2<T> for RowMajorGrid<T> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get(&self, col: usize, row: usize) -> &T {
        &self.cells[self.index(col, row)]
    }

    fn get_mut(&mut self, col: usize, row: usize) -> &mut T {
        let index = self.index(col, row);
        &mut self.cells[index]
    }
}

/// Dense grid tiled into contiguous `side x side` blocks, cells within a
/// tile stored column-major. A visit of one tile touches one contiguous
/// slice, which is what the 2x2 codec stages want.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockedGrid<T> {
    width: usize,
    height: usize,
    side: usize,
    tiles_per_row: usize,
    cells: Vec<T>,
}

impl<T: Default> BlockedGrid<T> {
    pub fn from_fn(
        width: usize,
        height: usize,
        side: usize,
        mut cell: impl FnMut(usize, usize) -> T,
    ) -> Self {
        assert!(side > 0);

        let mut grid = Self::defaulted(width, height, side);
        for (col, row) in Traversal::BlockMajor(side).positions(width, height) {
            *grid.get_mut(col, row) = cell(col, row);
        }

        grid
    }

    /// All cells start as `T::default()`; ragged-edge padding cells stay
    /// that way and are never yielded by a visit.
    pub fn defaulted(width: usize, height: usize, side: usize) -> Self {
        assert!(side > 0);

        let tiles_per_row = width.div_ceil(side);
        let num_tiles = tiles_per_row * height.div_ceil(side);
        let mut cells = Vec::new();
        cells.resize_with(num_tiles * side * side, T::default);

        Self {
            width,
            height,
            side,
            tiles_per_row,
            cells,
        }
    }
}

impl<T> BlockedGrid<T> {
    fn index(&self, col: usize, row: usize) -> usize {
        assert!(col < self.width && row < self.height);

        let tile = (row / self.side) * self.tiles_per_row + col / self.side;
        let within = (col % self.side) * self.side + row % self.side;
        tile * self.side * self.side + within
    }

    /// The contiguous cell slice of each tile, row-major over tiles.
    pub fn tiles(&self) -> std::slice::ChunksExact<'_, T> {
        self.cells.chunks_exact(self.side * self.side)
    }

    pub fn tiles_mut(&mut self) -> std::slice::ChunksExactMut<'_, T> {
        self.cells.chunks_exact_mut(self.side * self.side)
    }
}

impl<T> Grid2<T> for BlockedGrid<T> {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn get(&self, col: usize, row: usize) -> &T {
        &self.cells[self.index(col, row)]
    }

    fn get_mut(&mut self, col: usize, row: usize) -> &mut T {
        let index = self.index(col, row);
        &mut self.cells[index]
    }
}

//! Bounds-checked access to a text surface.
//!
//! [`FrameBuffer`] is the only way the console touches cell memory. Every cell is
//! written with a single 16-bit store, so character and attribute never tear.

use konsoli_common::{Attribute, Cell};
use konsoli_hal::TextBuffer;

/// Bounds-checked adapter over a [`TextBuffer`].
pub struct FrameBuffer<B> {
    buffer: B,
}

impl<B: TextBuffer> FrameBuffer<B> {
    /// Wraps a surface.
    pub fn new(buffer: B) -> Self {
        FrameBuffer { buffer }
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.buffer.width()
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.buffer.height()
    }

    /// Writes one cell. Off-screen coordinates are discarded.
    pub fn put(&mut self, x: usize, y: usize, character: u8, attribute: Attribute) {
        if let Some(index) = self.index(x, y) {
            self.buffer.store(index, Cell::new(character, attribute).to_raw());
        }
    }

    /// Reads one cell, `None` when off screen.
    pub fn get(&self, x: usize, y: usize) -> Option<Cell> {
        self.index(x, y)
            .map(|index| Cell::from_raw(self.buffer.load(index)))
    }

    /// Fills a whole row with `cell`.
    pub fn fill_row(&mut self, y: usize, cell: Cell) {
        if y >= self.height() {
            return;
        }
        let start = y * self.width();
        for index in start..start + self.width() {
            self.buffer.store(index, cell.to_raw());
        }
    }

    /// Copies row `from` over row `to`.
    pub fn copy_row(&mut self, from: usize, to: usize) {
        let height = self.height();
        if from >= height || to >= height {
            return;
        }
        let width = self.width();
        for x in 0..width {
            let cell = self.buffer.load(from * width + x);
            self.buffer.store(to * width + x, cell);
        }
    }

    /// Forwards the cursor position to the surface's hardware cursor.
    pub fn move_cursor(&mut self, x: usize, y: usize) {
        self.buffer.move_cursor(x, y);
    }

    /// The wrapped surface.
    pub fn buffer(&self) -> &B {
        &self.buffer
    }

    fn index(&self, x: usize, y: usize) -> Option<usize> {
        if x < self.width() && y < self.height() {
            Some(y * self.width() + x)
        } else {
            None
        }
    }
}

/// Plain memory surface for hosted builds and tests.
#[derive(Clone)]
pub struct MemoryBuffer<const W: usize, const H: usize> {
    cells: [[u16; W]; H],
    cursor: (usize, usize),
}

impl<const W: usize, const H: usize> MemoryBuffer<W, H> {
    /// A zero-filled surface.
    pub const fn new() -> Self {
        MemoryBuffer {
            cells: [[0; W]; H],
            cursor: (0, 0),
        }
    }

    /// Cell at `(x, y)`. Panics when off screen.
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        Cell::from_raw(self.cells[y][x])
    }

    /// Characters of row `y`.
    pub fn row_chars(&self, y: usize) -> [u8; W] {
        let mut row = [0; W];
        for (x, raw) in self.cells[y].iter().enumerate() {
            row[x] = (*raw & 0xFF) as u8;
        }
        row
    }

    /// Last position reported through [`TextBuffer::move_cursor`].
    pub fn hardware_cursor(&self) -> (usize, usize) {
        self.cursor
    }
}

impl<const W: usize, const H: usize> Default for MemoryBuffer<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> TextBuffer for MemoryBuffer<W, H> {
    fn width(&self) -> usize {
        W
    }

    fn height(&self) -> usize {
        H
    }

    fn store(&mut self, index: usize, cell: u16) {
        if index < W * H {
            self.cells[index / W][index % W] = cell;
        }
    }

    fn load(&self, index: usize) -> u16 {
        if index < W * H {
            self.cells[index / W][index % W]
        } else {
            0
        }
    }

    fn move_cursor(&mut self, x: usize, y: usize) {
        self.cursor = (x, y);
    }
}

use super::error::{FramebufferError, Result};

/// Last-written ARGB frame, one cell per pixel in row-major order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadowFrame {
    cells: Vec<u32>,
}

impl ShadowFrame {
    /// Zero-initialized shadow for a `width` x `height` surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: vec![0; width as usize * height as usize],
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<u32> {
        self.cells.get(index).copied()
    }

    pub fn set(&mut self, index: usize, argb: u32) {
        if let Some(cell) = self.cells.get_mut(index) {
            *cell = argb;
        }
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.cells
    }

    /// Diff `frame` against the shadow and record every changed pixel.
    ///
    /// `on_change(index, argb)` runs once per differing pixel, in row-major
    /// order; its cell is updated only when it returns `Ok`. The first error
    /// stops the diff and is returned, leaving that pixel and the rest of the
    /// frame unapplied. Returns the number of changed pixels. A frame of the
    /// wrong length leaves the shadow untouched.
    pub fn apply<F>(&mut self, frame: &[u32], mut on_change: F) -> Result<usize>
    where
        F: FnMut(usize, u32) -> Result<()>,
    {
        if frame.len() != self.cells.len() {
            return Err(FramebufferError::LengthMismatch {
                expected: self.cells.len(),
                actual: frame.len(),
            });
        }

        let mut changed = 0;
        for (index, (cell, &argb)) in self.cells.iter_mut().zip(frame).enumerate() {
            if *cell == argb {
                continue;
            }
            on_change(index, argb)?;
            *cell = argb;
            changed += 1;
        }
        Ok(changed)
    }

    /// Drop all cells, used when the owning surface closes
    pub fn release(&mut self) {
        self.cells = Vec::new();
    }
}

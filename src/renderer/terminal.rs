//! Terminal renderer
//!
//! Draw calls land in a character grid the size of the terminal; `present`
//! writes the whole grid in one flush. The playfield is scaled to fit, so
//! sprites cover as many cells as their bounding box does.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};
use glam::Vec2;

use super::{Align, Backdrop, Renderer, Rgb, Sprite, TextSize};
use crate::normalize_degrees;
use crate::platform::PlatformError;
use crate::tuning::Tuning;

/// Ship glyphs by heading, clockwise from +x in 45° steps (screen y points down)
const SHIP_GLYPHS: [char; 8] = ['→', '↘', '↓', '↙', '←', '↖', '↑', '↗'];
/// Obstacle glyphs by variant
const OBSTACLE_GLYPHS: [char; 4] = ['@', 'O', '0', '%'];
const OBSTACLE_COLORS: [Rgb; 4] = [
    Rgb(120, 220, 90),
    Rgb(180, 120, 230),
    Rgb(90, 200, 220),
    Rgb(230, 150, 80),
];
const SHIP_COLOR: Rgb = Rgb(255, 255, 255);
const EXPLOSION_COLOR: Rgb = Rgb(255, 200, 40);
const BACKGROUND_STAR: Rgb = Rgb(70, 70, 90);

/// One character cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub color: Rgb,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        color: Rgb(255, 255, 255),
    };
}

/// [`super::Renderer`] drawing with crossterm
pub struct TerminalRenderer<W: Write> {
    out: W,
    field: Vec2,
    obstacle_size: f32,
    cols: u16,
    rows: u16,
    /// Follow the terminal size at every frame
    track_terminal: bool,
    cells: Vec<Cell>,
}

impl<W: Write> TerminalRenderer<W> {
    /// Renderer that resizes with the terminal
    pub fn new(out: W, tuning: &Tuning) -> Self {
        let (cols, rows) = terminal::size().unwrap_or((80, 24));
        let mut r = Self::with_size(out, tuning, cols, rows);
        r.track_terminal = true;
        r
    }

    /// Renderer with a fixed grid
    pub fn with_size(out: W, tuning: &Tuning, cols: u16, rows: u16) -> Self {
        Self {
            out,
            field: tuning.field_size(),
            obstacle_size: tuning.obstacle_size,
            cols: cols.max(1),
            rows: rows.max(1),
            track_terminal: false,
            cells: vec![Cell::BLANK; cols.max(1) as usize * rows.max(1) as usize],
        }
    }

    /// Cell at `(col, row)` of the frame being built
    pub fn cell(&self, col: u16, row: u16) -> Option<Cell> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        let i = row as usize * self.cols as usize + col as usize;
        Some(self.cells[i])
    }

    /// Playfield point to grid cell (None when outside the field)
    fn to_cell(&self, pos: Vec2) -> Option<(i32, i32)> {
        if !(pos.x >= 0.0 && pos.x <= self.field.x && pos.y >= 0.0 && pos.y <= self.field.y) {
            return None;
        }
        let col = ((pos.x / self.field.x) * self.cols as f32) as i32;
        let row = ((pos.y / self.field.y) * self.rows as f32) as i32;
        Some((
            col.min(self.cols as i32 - 1),
            row.min(self.rows as i32 - 1),
        ))
    }

    fn put(&mut self, col: i32, row: i32, ch: char, color: Rgb) {
        if col < 0 || row < 0 || col >= self.cols as i32 || row >= self.rows as i32 {
            return;
        }
        self.cells[row as usize * self.cols as usize + col as usize] = Cell { ch, color };
    }

    /// Fill the cells whose centres fall inside a `size` square centred on `pos`
    fn fill_box(&mut self, pos: Vec2, size: f32, ch: char, color: Rgb) {
        let half = size / 2.0;
        let sx = self.cols as f32 / self.field.x;
        let sy = self.rows as f32 / self.field.y;
        let mut c0 = ((pos.x - half) * sx - 0.5).ceil() as i32;
        let mut c1 = ((pos.x + half) * sx - 0.5).floor() as i32;
        let mut r0 = ((pos.y - half) * sy - 0.5).ceil() as i32;
        let mut r1 = ((pos.y + half) * sy - 0.5).floor() as i32;
        // Smaller than a cell: still show one
        if c1 < c0 {
            c0 = (pos.x * sx) as i32;
            c1 = c0;
        }
        if r1 < r0 {
            r0 = (pos.y * sy) as i32;
            r1 = r0;
        }
        // Only the visible part of the box
        let (c0, c1) = (c0.max(0), c1.min(self.cols as i32 - 1));
        let (r0, r1) = (r0.max(0), r1.min(self.rows as i32 - 1));
        for row in r0..=r1 {
            for col in c0..=c1 {
                self.put(col, row, ch, color);
            }
        }
    }

    fn resize(&mut self, cols: u16, rows: u16) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
        self.cells = vec![Cell::BLANK; self.cols as usize * self.rows as usize];
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn begin_frame(&mut self, backdrop: Backdrop) {
        if self.track_terminal {
            if let Ok((cols, rows)) = terminal::size() {
                if (cols, rows) != (self.cols, self.rows) {
                    self.resize(cols, rows);
                }
            }
        }
        self.cells.fill(Cell::BLANK);

        // Sparse fixed starfield on the playfield and title backgrounds
        if backdrop != Backdrop::Black {
            let star = if backdrop == Backdrop::Menu { '*' } else { '.' };
            let (cols, rows) = (self.cols as u32, self.rows as u32);
            for i in 0..(cols * rows / 40) {
                let n = i.wrapping_mul(7919);
                let col = n % cols;
                let row = (n / cols) % rows;
                self.put(col as i32, row as i32, star, BACKGROUND_STAR);
            }
        }
    }

    fn draw_sprite(&mut self, sprite: Sprite, pos: Vec2, rotation: f32) {
        match sprite {
            Sprite::Ship => {
                // Sprite rotation is the negated heading
                let heading = normalize_degrees(-rotation);
                let sector = ((heading + 22.5) / 45.0) as usize % SHIP_GLYPHS.len();
                if let Some((col, row)) = self.to_cell(pos) {
                    self.put(col, row, SHIP_GLYPHS[sector], SHIP_COLOR);
                }
            }
            Sprite::Obstacle(variant) => {
                let i = variant as usize % OBSTACLE_GLYPHS.len();
                self.fill_box(
                    pos,
                    self.obstacle_size,
                    OBSTACLE_GLYPHS[i],
                    OBSTACLE_COLORS[i],
                );
            }
            Sprite::Explosion => {
                self.fill_box(pos, self.obstacle_size, '*', EXPLOSION_COLOR);
            }
        }
    }

    fn draw_circle(&mut self, pos: Vec2, color: Rgb, _radius: f32) {
        if let Some((col, row)) = self.to_cell(pos) {
            self.put(col, row, '•', color);
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, align: Align, size: TextSize, color: Rgb) {
        let Some((col, row)) = self.to_cell(pos) else {
            return;
        };
        let text = match size {
            TextSize::Small => text.to_string(),
            // Letter-spaced for emphasis
            TextSize::Large => {
                let spaced: String = text.chars().map(|c| format!("{c} ")).collect();
                spaced.trim_end().to_string()
            }
        };
        let width = text.chars().count() as i32;
        let start = match align {
            Align::Left => col,
            Align::Center => col - width / 2,
        };
        for (i, ch) in text.chars().enumerate() {
            self.put(start + i as i32, row, ch, color);
        }
    }

    fn present(&mut self) -> Result<(), PlatformError> {
        let mut current: Option<Rgb> = None;
        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            for cell in &self.cells[start..start + self.cols as usize] {
                if current != Some(cell.color) {
                    let Rgb(r, g, b) = cell.color;
                    self.out
                        .queue(style::SetForegroundColor(Color::Rgb { r, g, b }))?;
                    current = Some(cell.color);
                }
                self.out.queue(Print(cell.ch))?;
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()?;
        Ok(())
    }
}

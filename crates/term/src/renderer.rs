//! Flushes a framebuffer to the real terminal.
//!
//! The first frame (and every frame after a resize or `invalidate`) is
//! painted in full; after that only runs of changed cells are rewritten.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::fb::{CellStyle, FrameBuffer, Rgb};

/// Horizontal run of changed cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
}

pub struct TerminalRenderer {
    out: io::Stdout,
    prev: Option<FrameBuffer>,
    scratch: Vec<u8>,
    frames: u64,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            out: io::stdout(),
            prev: None,
            scratch: Vec::with_capacity(16 * 1024),
            frames: 0,
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.scratch.clear();
        self.scratch.queue(terminal::EnterAlternateScreen)?;
        self.scratch.queue(cursor::Hide)?;
        self.scratch.queue(terminal::DisableLineWrap)?;
        self.flush()
    }

    /// Undo everything `enter` did. Safe to call after a failed frame.
    pub fn exit(&mut self) -> Result<()> {
        self.scratch.clear();
        self.scratch.queue(ResetColor)?;
        self.scratch.queue(SetAttribute(Attribute::Reset))?;
        self.scratch.queue(terminal::EnableLineWrap)?;
        self.scratch.queue(cursor::Show)?;
        self.scratch.queue(terminal::LeaveAlternateScreen)?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Next draw repaints everything (after a resize).
    pub fn invalidate(&mut self) {
        self.prev = None;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Draw `fb`, then swap it with the previous frame.
    ///
    /// On return `fb` holds stale contents the caller is expected to
    /// overwrite completely before the next call.
    pub fn draw_swap(&mut self, fb: &mut FrameBuffer) -> Result<()> {
        self.scratch.clear();
        let mut prev = match self.prev.take() {
            Some(prev) if prev.width() == fb.width() && prev.height() == fb.height() => {
                encode_diff_into(&prev, fb, &mut self.scratch)?;
                prev
            }
            _ => {
                encode_full_into(fb, &mut self.scratch)?;
                FrameBuffer::new(fb.width(), fb.height())
            }
        };
        self.flush()?;
        self.frames += 1;

        std::mem::swap(&mut prev, fb);
        self.prev = Some(prev);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.out.write_all(&self.scratch)?;
        self.out.flush()?;
        Ok(())
    }
}

/// Commands for a full repaint of `fb`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    let mut style = None;
    for y in 0..fb.height() {
        write_run(
            fb,
            Run {
                x: 0,
                y,
                len: fb.width(),
            },
            &mut style,
            out,
        )?;
    }
    finish(out)
}

/// Commands that turn a terminal showing `prev` into one showing `next`.
///
/// Both buffers must have the same dimensions; otherwise every row is
/// treated as changed.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut style = None;
    for run in changed_runs(prev, next) {
        write_run(next, run, &mut style, out)?;
    }
    finish(out)
}

fn write_run(
    fb: &FrameBuffer,
    run: Run,
    style: &mut Option<CellStyle>,
    out: &mut Vec<u8>,
) -> Result<()> {
    out.queue(cursor::MoveTo(run.x, run.y))?;
    for x in run.x..run.x + run.len {
        let cell = fb.get(x, run.y).unwrap_or_default();
        if *style != Some(cell.style) {
            set_style(out, cell.style)?;
            *style = Some(cell.style);
        }
        out.queue(Print(cell.ch))?;
    }
    Ok(())
}

fn finish(out: &mut Vec<u8>) -> Result<()> {
    out.queue(ResetColor)?;
    out.queue(SetAttribute(Attribute::Reset))?;
    Ok(())
}

fn set_style(out: &mut Vec<u8>, style: CellStyle) -> Result<()> {
    out.queue(SetAttribute(Attribute::Reset))?;
    out.queue(SetForegroundColor(color(style.fg)))?;
    out.queue(SetBackgroundColor(color(style.bg)))?;
    if style.bold {
        out.queue(SetAttribute(Attribute::Bold))?;
    }
    if style.dim {
        out.queue(SetAttribute(Attribute::Dim))?;
    }
    Ok(())
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

fn changed_runs(prev: &FrameBuffer, next: &FrameBuffer) -> Vec<Run> {
    let (w, h) = (next.width(), next.height());
    if prev.width() != w || prev.height() != h {
        return (0..h).map(|y| Run { x: 0, y, len: w }).collect();
    }

    let mut runs = Vec::new();
    let row_len = w as usize;
    for (y, (a, b)) in prev
        .cells()
        .chunks(row_len.max(1))
        .zip(next.cells().chunks(row_len.max(1)))
        .enumerate()
    {
        let mut x = 0;
        while x < row_len {
            if a[x] == b[x] {
                x += 1;
                continue;
            }
            let start = x;
            while x < row_len && a[x] != b[x] {
                x += 1;
            }
            runs.push(Run {
                x: start as u16,
                y: y as u16,
                len: (x - start) as u16,
            });
        }
    }
    runs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_changes_form_one_run() {
        let a = FrameBuffer::new(6, 2);
        let mut b = FrameBuffer::new(6, 2);
        for x in 1..=3 {
            b.put_char(x, 0, '█', CellStyle::lit());
        }
        b.put_char(5, 1, '·', CellStyle::unlit());

        assert_eq!(
            changed_runs(&a, &b),
            vec![Run { x: 1, y: 0, len: 3 }, Run { x: 5, y: 1, len: 1 }]
        );
    }

    #[test]
    fn style_only_change_is_a_change() {
        let mut a = FrameBuffer::new(2, 1);
        let mut b = FrameBuffer::new(2, 1);
        a.put_char(0, 0, '█', CellStyle::unlit());
        b.put_char(0, 0, '█', CellStyle::lit());
        assert_eq!(changed_runs(&a, &b), vec![Run { x: 0, y: 0, len: 1 }]);
    }

    #[test]
    fn identical_frames_encode_no_cells() {
        let a = FrameBuffer::new(4, 3);
        let b = a.clone();
        let mut out = Vec::new();
        encode_diff_into(&a, &b, &mut out).unwrap();

        let mut reset_only = Vec::new();
        finish(&mut reset_only).unwrap();
        assert_eq!(out, reset_only);
    }

    #[test]
    fn size_mismatch_marks_every_row() {
        let a = FrameBuffer::new(2, 1);
        let b = FrameBuffer::new(3, 2);
        assert_eq!(changed_runs(&a, &b).len(), 2);
    }

    #[test]
    fn full_encode_contains_every_char() {
        let mut fb = FrameBuffer::new(4, 1);
        fb.put_str(0, 0, "LOST", CellStyle::default());
        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        for ch in ['L', 'O', 'S', 'T'] {
            assert!(text.contains(ch));
        }
    }
}

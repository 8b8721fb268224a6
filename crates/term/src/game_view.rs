//! GameView: paints a `GameSnapshot` as a four-digit LED board.
//!
//! This module is pure (no I/O). It can be unit-tested.
//!
//! Display row 3 is drawn leftmost and row 0 (the player row) rightmost, so
//! obstacles travel left to right and the score reads in the usual order.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{GameMode, Glyph, DIGIT_COUNT};

const LIT: char = '█';
const UNLIT: char = '·';

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

pub struct GameView {
    /// Horizontal segment length in columns.
    seg_w: u16,
    /// Vertical segment length in rows.
    seg_h: u16,
    /// Columns between digits.
    gap: u16,
    anchor_y: AnchorY,
    show_unlit: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // Terminal cells are about twice as tall as wide.
        Self::new(4, 2)
    }
}

impl GameView {
    pub fn new(seg_w: u16, seg_h: u16) -> Self {
        Self {
            seg_w: seg_w.max(1),
            seg_h: seg_h.max(1),
            gap: 2,
            anchor_y: AnchorY::Center,
            show_unlit: true,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_unlit_segments(mut self, show: bool) -> Self {
        self.show_unlit = show;
        self
    }

    pub fn digit_width(&self) -> u16 {
        self.seg_w + 2
    }

    pub fn digit_height(&self) -> u16 {
        self.seg_h * 2 + 3
    }

    /// Width and height of the bordered board, status lines excluded.
    pub fn board_size(&self) -> (u16, u16) {
        let n = DIGIT_COUNT as u16;
        let inner_w = n * self.digit_width() + (n - 1) * self.gap + 2;
        let inner_h = self.digit_height() + 2;
        (inner_w + 2, inner_h + 2)
    }

    /// Render into an existing framebuffer (resized to the viewport).
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let (board_w, board_h) = self.board_size();
        let total_h = board_h + 2;
        let x0 = viewport.width.saturating_sub(board_w) / 2;
        let y0 = match self.anchor_y {
            AnchorY::Center => viewport.height.saturating_sub(total_h) / 2,
            AnchorY::Top => 0,
        };

        let panel = CellStyle::unlit().cell(' ');
        fb.fill_rect(x0 + 1, y0 + 1, board_w - 2, board_h - 2, panel.ch, panel.style);
        draw_border(fb, x0, y0, board_w, board_h);

        let digit_y = y0 + 2;
        for slot in 0..DIGIT_COUNT {
            let row = DIGIT_COUNT - 1 - slot;
            let digit_x = x0 + 2 + slot as u16 * (self.digit_width() + self.gap);
            self.draw_glyph(fb, digit_x, digit_y, snap.display[row]);
        }

        self.draw_status(fb, x0, y0 + board_h, snap);
    }

    /// Convenience wrapper that allocates a fresh framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_glyph(&self, fb: &mut FrameBuffer, x: u16, y: u16, glyph: Glyph) {
        let (w, h) = (self.seg_w, self.seg_h);
        let right = x + w + 1;
        let mid = y + h + 1;
        let bottom = y + 2 * h + 2;

        let mut seg = |segment: u8, horizontal: bool, sx: u16, sy: u16, len: u16| {
            let style = if glyph.is_lit(segment) {
                CellStyle::lit()
            } else if self.show_unlit {
                CellStyle::unlit()
            } else {
                return;
            };
            let ch = if glyph.is_lit(segment) { LIT } else { UNLIT };
            if horizontal {
                fb.hline(sx, sy, len, ch, style);
            } else {
                fb.vline(sx, sy, len, ch, style);
            }
        };

        seg(Glyph::SEG_A, true, x + 1, y, w);
        seg(Glyph::SEG_B, false, right, y + 1, h);
        seg(Glyph::SEG_C, false, right, mid + 1, h);
        seg(Glyph::SEG_D, true, x + 1, bottom, w);
        seg(Glyph::SEG_E, false, x, mid + 1, h);
        seg(Glyph::SEG_F, false, x, y + 1, h);
        seg(Glyph::SEG_G, true, x + 1, mid, w);
    }

    fn draw_status(&self, fb: &mut FrameBuffer, x: u16, y: u16, snap: &GameSnapshot) {
        let label = CellStyle::plain(Rgb::new(150, 150, 160));
        let value = CellStyle::plain(Rgb::new(240, 240, 240)).with_bold();

        let mut cx = fb.put_str(x, y, "MODE ", label);
        cx = fb.put_str(cx, y, mode_label(snap.mode), value);

        cx = fb.put_str(cx + 2, y, "SCORE ", label);
        for d in snap.score_digits.iter().rev() {
            cx = fb.put_u32(cx, y, *d as u32, value);
        }

        cx = fb.put_str(cx + 2, y, "ROUND ", label);
        fb.put_u32(cx, y, snap.round, value);

        fb.put_str(
            x,
            y + 1,
            "←/→ move  space start  r reset  q quit",
            label.with_dim(),
        );
    }
}

fn mode_label(mode: GameMode) -> &'static str {
    match mode {
        GameMode::ScoreIdle => "SCORE",
        GameMode::Countdown => "READY",
        GameMode::Play => "PLAY",
        GameMode::Lost => "LOST",
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16) {
    if w < 2 || h < 2 {
        return;
    }
    let style = CellStyle::plain(Rgb::new(200, 200, 200));
    fb.hline(x + 1, y, w - 2, '─', style);
    fb.hline(x + 1, y + h - 1, w - 2, '─', style);
    fb.vline(x, y + 1, h - 2, '│', style);
    fb.vline(x + w - 1, y + 1, h - 2, '│', style);
    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);
}

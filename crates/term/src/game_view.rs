//! GameView: lays a [`TermSurface`] out into a framebuffer.
//!
//! Pure (no I/O), so layouts can be unit-tested.

use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::surface::TermSurface;
use crate::types::{BoardState, GameMode, PieceKind, Tier, VisualTag, HIDDEN_ROWS};

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

const WELL_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_MIN_WIDTH: u16 = 14;

const BORDER: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const LABEL: CellStyle = CellStyle::fg(Rgb::new(220, 220, 220)).bold();
const VALUE: CellStyle = CellStyle::fg(Rgb::new(200, 200, 200));
const GHOST: CellStyle = CellStyle::fg(Rgb::new(140, 140, 140)).on(WELL_BG).dim();
const EMPTY: CellStyle = CellStyle::fg(Rgb::new(90, 90, 100)).on(WELL_BG).dim();
const OVERLAY: CellStyle = CellStyle::fg(Rgb::new(255, 255, 255)).bold();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameView {
    /// Board cell width in terminal columns
    cell_w: u16,
    /// Board cell height in terminal rows
    cell_h: u16,
    /// Leading grid rows that are never drawn
    hidden_rows: usize,
}

impl Default for GameView {
    fn default() -> Self {
        Self {
            cell_w: 2,
            cell_h: 1,
            hidden_rows: HIDDEN_ROWS,
        }
    }
}

/// Where the well frame landed in the viewport.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            ..Self::default()
        }
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, surface: &TermSurface, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear();

        let visible = surface.rows().saturating_sub(self.hidden_rows);
        let well_w = surface.cols() as u16 * self.cell_w;
        let well_h = visible as u16 * self.cell_h;
        let frame = Frame {
            x: viewport.width.saturating_sub(well_w + 2) / 2,
            y: viewport.height.saturating_sub(well_h + 2) / 2,
            w: well_w + 2,
            h: well_h + 2,
        };

        fb.fill_rect(frame.x + 1, frame.y + 1, well_w, well_h, ' ', VALUE.on(WELL_BG));
        draw_border(fb, frame.x, frame.y, frame.w, frame.h, BORDER);

        for vy in 0..visible {
            for col in 0..surface.cols() {
                let (ch, style) = match surface.tag(vy + self.hidden_rows, col) {
                    Some(VisualTag::Mino(kind)) => ('█', piece_style(kind)),
                    Some(VisualTag::Ghost) => ('░', GHOST),
                    None => ('·', EMPTY),
                };
                let px = frame.x + 1 + col as u16 * self.cell_w;
                let py = frame.y + 1 + vy as u16 * self.cell_h;
                fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
            }
        }

        self.draw_panel(fb, surface, viewport, frame);

        match surface.state() {
            BoardState::Paused if surface.statistics().is_none() => {
                draw_centered(fb, frame, "PAUSED")
            }
            BoardState::Dead => draw_centered(fb, frame, "GAME OVER"),
            _ => {}
        }
        if let Some(report) = surface.statistics() {
            draw_report(fb, viewport, report);
        }
    }

    /// Convenience wrapper that allocates a framebuffer.
    pub fn render(&self, surface: &TermSurface, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(surface, viewport, &mut fb);
        fb
    }

    fn draw_panel(&self, fb: &mut FrameBuffer, s: &TermSurface, viewport: Viewport, frame: Frame) {
        let x = frame.x.saturating_add(frame.w).saturating_add(2);
        if x >= viewport.width || viewport.width - x < PANEL_MIN_WIDTH {
            return;
        }
        let mut y = frame.y;

        fb.put_str(x, y, "SCORE", LABEL);
        fb.put_u64(x, y + 1, s.score, VALUE);
        y += 3;

        fb.put_str(x, y, "LEVEL", LABEL);
        fb.put_u64(x, y + 1, s.level.gravity as u64, VALUE);
        if s.level.mode == GameMode::Marathon {
            let end = fb.put_str(x + 4, y + 1, "next ", VALUE.dim());
            fb.put_u64(end, y + 1, s.level.left_lines.max(0) as u64, VALUE.dim());
        }
        y += 3;

        fb.put_str(x, y, "MODE", LABEL);
        fb.put_str(x, y + 1, s.level.mode.as_str(), VALUE);
        y += 3;

        fb.put_str(x, y, "HOLD", LABEL);
        let hold_style = if s.hold_available { VALUE } else { VALUE.dim() };
        match s.held {
            Some(kind) => {
                let style = piece_style(kind).on(Rgb::new(0, 0, 0));
                fb.put_char(x, y + 1, kind_letter(kind), style)
            }
            None => fb.put_char(x, y + 1, '-', hold_style),
        }
        if !s.hold_available {
            fb.put_str(x + 2, y + 1, "used", hold_style);
        }
        y += 3;

        fb.put_str(x, y, "NEXT", LABEL);
        for (i, &kind) in s.queue.iter().enumerate() {
            let style = piece_style(kind).on(Rgb::new(0, 0, 0));
            let style = if i == 0 { style.bold() } else { style };
            fb.put_char(x + 2 * i as u16, y + 1, kind_letter(kind), style);
        }
        y += 3;

        fb.put_str(x, y, "GHOST", LABEL);
        fb.put_str(x, y + 1, if s.ghost { "on" } else { "off" }, VALUE);
        y += 3;

        for entry in &s.feed {
            if y >= viewport.height {
                break;
            }
            fb.put_str(x, y, &entry.text, tier_style(entry.tier));
            y += 1;
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
    if w < 2 || h < 2 {
        return;
    }
    let (right, bottom) = (x + w - 1, y + h - 1);
    fb.put_char(x, y, '┌', style);
    fb.put_char(right, y, '┐', style);
    fb.put_char(x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, bottom, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(right, y + dy, '│', style);
    }
}

fn draw_centered(fb: &mut FrameBuffer, frame: Frame, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = frame.x + frame.w.saturating_sub(text_w) / 2;
    fb.put_str(x, frame.y + frame.h / 2, text, OVERLAY);
}

/// Boxed multi-line report centered in the viewport, clipped to fit.
fn draw_report(fb: &mut FrameBuffer, viewport: Viewport, report: &str) {
    let text_w = report.lines().map(|l| l.chars().count()).max().unwrap_or(0) as u16;
    let lines = report.lines().count() as u16;
    let w = (text_w + 4).min(viewport.width);
    let h = (lines + 2).min(viewport.height);
    let x = (viewport.width - w) / 2;
    let y = (viewport.height - h) / 2;

    let style = VALUE.on(Rgb::new(10, 10, 20));
    fb.fill_rect(x, y, w, h, ' ', style);
    draw_border(fb, x, y, w, h, BORDER.on(Rgb::new(10, 10, 20)));
    for (i, line) in report.lines().enumerate().take(h.saturating_sub(2) as usize) {
        let line_style = if line.starts_with('[') { style.bold() } else { style };
        fb.put_str(x + 2, y + 1 + i as u16, line, line_style);
    }
}

fn piece_style(kind: PieceKind) -> CellStyle {
    let fg = match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    };
    CellStyle::fg(fg).on(WELL_BG).bold()
}

fn tier_style(tier: Tier) -> CellStyle {
    match tier {
        Tier::Plain => VALUE,
        Tier::Silver => CellStyle::fg(Rgb::new(192, 192, 210)).bold(),
        Tier::Gold => CellStyle::fg(Rgb::new(255, 200, 60)).bold(),
        Tier::Aqua => CellStyle::fg(Rgb::new(80, 230, 230)).bold(),
    }
}

fn kind_letter(kind: PieceKind) -> char {
    kind.as_str().chars().next().map_or('?', |c| c.to_ascii_uppercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Presenter, RenderSurface};

    #[test]
    fn bottom_row_maps_below_border() {
        let mut surface = TermSurface::default();
        surface.paint(22, 0, Some(VisualTag::Mino(PieceKind::I)));
        let fb = GameView::default().render(&surface, Viewport::new(22, 22));

        assert_eq!(fb.get(0, 0).map(|c| c.ch), Some('┌'));
        assert_eq!(fb.get(1, 20).map(|c| c.ch), Some('█'));
        assert_eq!(fb.get(2, 20).map(|c| c.ch), Some('█'));
        assert_eq!(fb.get(3, 20).map(|c| c.ch), Some('·'));
    }

    #[test]
    fn hidden_rows_are_not_drawn() {
        let mut surface = TermSurface::default();
        for row in 0..HIDDEN_ROWS {
            surface.paint(row, 4, Some(VisualTag::Mino(PieceKind::T)));
        }
        let fb = GameView::default().render(&surface, Viewport::new(22, 22));
        assert!(fb.cells().iter().all(|c| c.ch != '█'));
    }

    #[test]
    fn panel_and_overlays() {
        let mut surface = TermSurface::default();
        surface.show_score(1234);
        surface.show_state(BoardState::Dead);
        let fb = GameView::default().render(&surface, Viewport::new(60, 24));
        let text: String = fb.cells().iter().map(|c| c.ch).collect();
        assert!(text.contains("SCORE"));
        assert!(text.contains("1234"));
        assert!(text.contains("GAME OVER"));
        assert!(text.contains("MARATHON"));
    }

    #[test]
    fn statistics_replace_paused_overlay() {
        let mut surface = TermSurface::default();
        surface.show_state(BoardState::Paused);
        let fb = GameView::default().render(&surface, Viewport::new(40, 24));
        let text: String = fb.cells().iter().map(|c| c.ch).collect();
        assert!(text.contains("PAUSED"));

        surface.show_statistics(Some("[ OTHER ]\n  * t-spin zero: 0"));
        let fb = GameView::default().render(&surface, Viewport::new(40, 24));
        let text: String = fb.cells().iter().map(|c| c.ch).collect();
        assert!(!text.contains("PAUSED"));
        assert!(text.contains("t-spin zero: 0"));
    }
}

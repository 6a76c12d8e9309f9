//! Canvas drawing for the confetti burst. The simulation lives in the
//! core crate; this only paints the current pieces.

use std::f64::consts::PI;

use reveal_core::ConfettiPiece;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Clear the canvas and draw every piece as a tilted ellipse.
pub fn draw(ctx: &CanvasRenderingContext2d, canvas: &HtmlCanvasElement, pieces: &[ConfettiPiece]) {
    ctx.clear_rect(0.0, 0.0, canvas.width() as f64, canvas.height() as f64);
    for p in pieces {
        ctx.begin_path();
        ctx.set_fill_style_str(&format!("hsl({},80%,60%)", p.hue));
        let _ = ctx.ellipse(
            p.pos.x as f64,
            p.pos.y as f64,
            p.radius as f64,
            p.radius as f64 * 0.6,
            p.tilt as f64,
            0.0,
            PI * 2.0,
        );
        ctx.fill();
    }
}

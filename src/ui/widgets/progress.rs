use crate::ui::core::geom::{Pos, Size};
use crate::ui::core::painter::Painter;
use crate::ui::core::style::{colors, Style};
use crate::ui::core::theme::roles;
use crate::ui::core::widget::{DrawCtx, Element, ThemeCtx, Updatable};
use std::any::Any;
use std::time::Duration;

const DEFAULT_SPEED: f32 = 1.0;

/// Horizontal bar that eases toward its target fraction on every update.
#[derive(Clone, Debug)]
pub struct ProgressBar {
    value: f32,
    target: f32,
    /// Fraction per second.
    speed: f32,
    fill: u8,
    track: u8,
}

impl ProgressBar {
    pub fn new() -> Self {
        Self {
            value: 0.0,
            target: 0.0,
            speed: DEFAULT_SPEED,
            fill: colors::GREEN,
            track: colors::GRAY,
        }
    }

    pub fn with_speed(mut self, per_second: f32) -> Self {
        self.speed = per_second.max(0.0);
        self
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// Animate toward `target`, clamped to `0.0..=1.0`.
    pub fn set_target(&mut self, target: f32) {
        self.target = clamp_fraction(target);
    }

    /// Jump straight to `value` without animating.
    pub fn set_value(&mut self, value: f32) {
        self.value = clamp_fraction(value);
        self.target = self.value;
    }

    fn filled_cells(&self, width: u16) -> u16 {
        (self.value * f32::from(width)).round().clamp(0.0, f32::from(width)) as u16
    }
}

fn clamp_fraction(v: f32) -> f32 {
    if v.is_nan() {
        0.0
    } else {
        v.clamp(0.0, 1.0)
    }
}

impl Default for ProgressBar {
    fn default() -> Self {
        Self::new()
    }
}

impl Element for ProgressBar {
    fn kind(&self) -> &'static str {
        "progress"
    }

    fn preferred_size(&self) -> Size {
        Size::new(20, 1)
    }

    fn apply_theme(&mut self, ctx: &ThemeCtx<'_>) {
        self.fill = ctx.role(roles::PROGRESS, colors::GREEN);
        self.track = ctx.role(roles::MUTED, colors::GRAY);
    }

    fn draw(&self, painter: &mut Painter, ctx: &DrawCtx) {
        let area = ctx.content;
        if area.is_empty() {
            return;
        }
        painter.fill_rect(ctx.inner(), ctx.style);
        let filled = self.filled_cells(area.w);
        for row in 0..area.h {
            let y = area.y + row;
            if filled > 0 {
                painter.hline(Pos::new(area.x, y), filled, '█', Style::new(self.fill, ctx.style.bg));
            }
            if filled < area.w {
                painter.hline(
                    Pos::new(area.x + filled, y),
                    area.w - filled,
                    '░',
                    Style::new(self.track, ctx.style.bg),
                );
            }
        }
    }

    fn as_updatable(&mut self) -> Option<&mut dyn Updatable> {
        Some(self)
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

impl Updatable for ProgressBar {
    fn update(&mut self, dt: Duration) -> bool {
        if self.value == self.target {
            return false;
        }
        let step = self.speed * dt.as_secs_f32();
        if step <= 0.0 {
            return false;
        }
        self.value = if self.value < self.target {
            (self.value + step).min(self.target)
        } else {
            (self.value - step).max(self.target)
        };
        true
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/widgets/progress.rs"]
mod tests;

use super::theme::ThemeColors;
use super::{FRAME_WIDTH, RING_WIDTH};
use crate::home::{CircleEntity, Home, Phase};
use cairo::Context;
use gdk_pixbuf::Pixbuf;
use gdk4::prelude::*;
use palette::Srgba;
use std::f64::consts::PI;

struct EntityRenderer<'a> {
    entity: &'a CircleEntity,
}

impl<'a> EntityRenderer<'a> {
    fn new(entity: &'a CircleEntity) -> Self {
        Self { entity }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        match &self.entity.image {
            Some(pixbuf) => self.draw_image(cr, pixbuf)?,
            None => self.draw_disk(cr, colors)?,
        }
        self.draw_ring(cr, colors)
    }

    fn draw_image(&self, cr: &Context, pixbuf: &Pixbuf) -> Result<(), cairo::Error> {
        let center = self.entity.center;
        let radius = self.entity.radius();

        cr.save()?;
        cr.arc(center.x, center.y, radius, 0.0, 2.0 * PI);
        cr.clip();
        // pixbuf is pre-scaled to the base diameter
        cr.set_source_pixbuf(pixbuf, center.x - radius, center.y - radius);
        cr.paint()?;
        cr.restore()
    }

    fn draw_disk(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        set_source(cr, colors.disk);
        self.circle_path(cr);
        cr.fill()
    }

    fn draw_ring(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        set_source(cr, colors.ring);
        cr.set_line_width(RING_WIDTH);
        self.circle_path(cr);
        cr.stroke()
    }

    fn circle_path(&self, cr: &Context) {
        let center = self.entity.center;
        cr.new_path();
        cr.arc(
            center.x,
            center.y,
            self.entity.rendered_radius(),
            0.0,
            2.0 * PI,
        );
    }
}

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

pub fn draw(
    cr: &Context,
    home: &Home,
    colors: &ThemeColors,
    (width, height): (f64, f64),
) -> Result<(), cairo::Error> {
    set_source(cr, colors.background);
    cr.paint()?;

    if !matches!(home.phase(), Phase::Running) {
        return Ok(());
    }

    draw_frame(cr, colors, width, height)?;

    home.entities()
        .iter()
        .filter(|e| e.is_drawn(home.ring_expanded()))
        .try_for_each(|e| EntityRenderer::new(e).draw(cr, colors))
}

fn draw_frame(
    cr: &Context,
    colors: &ThemeColors,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    set_source(cr, colors.frame);
    cr.set_line_width(FRAME_WIDTH);
    // stroke straddles the path, so inset by half the width
    let inset = FRAME_WIDTH / 2.0;
    cr.rectangle(inset, inset, width - FRAME_WIDTH, height - FRAME_WIDTH);
    cr.stroke()
}

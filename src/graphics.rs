//! Glyph authoring via embedded-graphics
//!
//! [`Glyph`] implements the [`DrawTarget`] and [`OriginDimensions`] traits
//! from the embedded-graphics ecosystem, so custom characters can be drawn
//! with primitives, images or tiny fonts instead of being typed in as row
//! bytes.
//!
//! ## Example
//!
//! ```rust
//! use embedded_graphics::{
//!     pixelcolor::BinaryColor,
//!     prelude::*,
//!     primitives::{Line, PrimitiveStyle, Rectangle},
//! };
//! use hd44780_pcf8574::Glyph;
//!
//! let mut glyph = Glyph::blank();
//!
//! // Battery outline with a terminal on top
//! let _ = Rectangle::new(Point::new(0, 1), Size::new(5, 7))
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!     .draw(&mut glyph);
//! let _ = Line::new(Point::new(1, 0), Point::new(3, 0))
//!     .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
//!     .draw(&mut glyph);
//!
//! assert_eq!(glyph.rows()[0], 0x0E);
//! assert_eq!(glyph.rows()[1], 0x1F);
//! assert_eq!(glyph.rows()[2], 0x11);
//! ```

use core::convert::Infallible;
use embedded_graphics_core::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Point, Size},
    pixelcolor::BinaryColor,
    prelude::Pixel,
};

use crate::glyph::{GLYPH_HEIGHT, GLYPH_WIDTH, Glyph};

impl DrawTarget for Glyph {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<Iter>(&mut self, pixels: Iter) -> Result<(), Self::Error>
    where
        Iter: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(Point { x, y }, color) in pixels {
            if x < 0 || y < 0 {
                continue;
            }
            // set_pixel drops anything right of or below the glyph
            let (Ok(x), Ok(y)) = (u8::try_from(x), u8::try_from(y)) else {
                continue;
            };
            self.set_pixel(x, y, color.is_on());
        }

        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        let row = if color.is_on() { 0x1F } else { 0x00 };
        *self = Glyph::from_rows([row; GLYPH_HEIGHT as usize]);
        Ok(())
    }
}

impl OriginDimensions for Glyph {
    fn size(&self) -> Size {
        Size::new(u32::from(GLYPH_WIDTH), u32::from(GLYPH_HEIGHT))
    }
}

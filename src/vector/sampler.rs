//! Pixel sampling.
//!
//! A [`Sampler`] reads canonical RGBA pixels out of an [`Image`]. The decoder
//! for the image's [`PixelFormat`] is chosen once, when the sampler is built,
//! so every pixel of one image is decoded the same way.

use std::cell::Cell;
use std::fmt;

use crate::types::{Colour, Image, Palette, PixelFormat};

/// A decoded pixel at an image coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub x: u32,
    pub y: u32,
    pub colour: Colour,
}

/// A colour decoding routine supplied by the host application.
///
/// The returned channels are trusted only when all four lie in `0..=255`;
/// otherwise the sampler falls back to decoding the raw value itself.
pub trait HostDecoder {
    /// Decode a raw pixel value into `[r, g, b, a]`, or `None` if unsupported.
    fn decode(&self, raw: u32) -> Option<[i32; 4]>;
}

type DecodeFn = fn(u32, &Palette) -> Option<[i32; 4]>;

/// Reads pixels from one image using one fixed decoder.
pub struct Sampler<'a> {
    image: &'a Image,
    palette: &'a Palette,
    decode: DecodeFn,
    host: Option<&'a dyn HostDecoder>,
    malformed: Cell<usize>,
    clamped: Cell<usize>,
}

impl<'a> Sampler<'a> {
    /// Create a sampler for an image. `palette` is only consulted for indexed images.
    pub fn new(image: &'a Image, palette: &'a Palette) -> Self {
        Self {
            image,
            palette,
            decode: decoder_for(image.format()),
            host: None,
            malformed: Cell::new(0),
            clamped: Cell::new(0),
        }
    }

    /// Prefer a host decoding routine when it yields in-range channels.
    pub fn with_host_decoder(mut self, host: &'a dyn HostDecoder) -> Self {
        self.host = Some(host);
        self
    }

    /// Sample the pixel at `(x, y)`.
    ///
    /// Returns `None` outside `[0, width) x [0, height)`.
    pub fn sample(&self, x: u32, y: u32) -> Option<Pixel> {
        let raw = self.image.raw(x, y)?;

        // Palette index 0 is transparent whatever the host says.
        if self.image.format() == PixelFormat::Indexed && raw == 0 {
            return Some(Pixel {
                x,
                y,
                colour: Colour::TRANSPARENT,
            });
        }

        let from_host = self.host.and_then(|host| host.decode(raw));
        let channels = match from_host {
            Some(channels) if channels.iter().all(|c| (0..=255).contains(c)) => channels,
            other => {
                if other.is_some() {
                    bump(&self.malformed);
                }
                (self.decode)(raw, self.palette).unwrap_or_else(|| {
                    bump(&self.malformed);
                    [0, 0, 0, 0]
                })
            }
        };

        let (colour, clamped) = Colour::from_channels_clamped(channels);
        if clamped {
            bump(&self.clamped);
        }

        Some(Pixel { x, y, colour })
    }

    /// Iterate every pixel with non-zero alpha, in row-major order.
    pub fn opaque_pixels(&self) -> impl Iterator<Item = Pixel> + '_ {
        let width = self.image.width();
        let height = self.image.height();
        (0..height)
            .flat_map(move |y| (0..width).map(move |x| (x, y)))
            .filter_map(|(x, y)| self.sample(x, y))
            .filter(|p| !p.colour.is_transparent())
    }

    /// Number of samples whose raw value could not be decoded as given:
    /// rejected host results and palette indices past the palette's end.
    pub fn malformed_count(&self) -> usize {
        self.malformed.get()
    }

    /// Number of samples that needed channel clamping.
    pub fn clamped_count(&self) -> usize {
        self.clamped.get()
    }
}

impl fmt::Debug for Sampler<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sampler")
            .field("format", &self.image.format())
            .field("width", &self.image.width())
            .field("height", &self.image.height())
            .field("host_decoder", &self.host.is_some())
            .finish()
    }
}

fn bump(counter: &Cell<usize>) {
    counter.set(counter.get() + 1);
}

fn decoder_for(format: PixelFormat) -> DecodeFn {
    match format {
        PixelFormat::Rgba => decode_rgba,
        PixelFormat::Argb => decode_argb,
        PixelFormat::GrayAlpha => decode_gray_alpha,
        PixelFormat::Indexed => decode_indexed,
    }
}

fn channel(raw: u32, shift: u32) -> i32 {
    ((raw >> shift) & 0xFF) as i32
}

fn decode_rgba(raw: u32, _: &Palette) -> Option<[i32; 4]> {
    Some([channel(raw, 0), channel(raw, 8), channel(raw, 16), channel(raw, 24)])
}

fn decode_argb(raw: u32, _: &Palette) -> Option<[i32; 4]> {
    Some([channel(raw, 16), channel(raw, 8), channel(raw, 0), channel(raw, 24)])
}

fn decode_gray_alpha(raw: u32, _: &Palette) -> Option<[i32; 4]> {
    let v = channel(raw, 0);
    Some([v, v, v, channel(raw, 8)])
}

fn decode_indexed(raw: u32, palette: &Palette) -> Option<[i32; 4]> {
    palette
        .resolve(raw)
        .map(|c| c.to_rgba().map(i32::from))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{pack_argb, pack_rgba};

    struct FixedDecoder([i32; 4]);

    impl HostDecoder for FixedDecoder {
        fn decode(&self, _raw: u32) -> Option<[i32; 4]> {
            Some(self.0)
        }
    }

    fn single(format: PixelFormat, raw: u32) -> Image {
        Image::new(1, 1, format, vec![raw]).unwrap()
    }

    #[test]
    fn test_sample_out_of_bounds() {
        let img = Image::filled(2, 2, PixelFormat::Rgba, 0);
        let palette = Palette::default();
        let sampler = Sampler::new(&img, &palette);
        assert!(sampler.sample(1, 1).is_some());
        assert!(sampler.sample(2, 0).is_none());
        assert!(sampler.sample(0, 2).is_none());
    }

    #[test]
    fn test_decode_rgba() {
        let c = Colour::new(10, 20, 30, 40);
        let img = single(PixelFormat::Rgba, pack_rgba(c));
        let palette = Palette::default();
        let pixel = Sampler::new(&img, &palette).sample(0, 0).unwrap();
        assert_eq!(pixel.colour, c);
    }

    #[test]
    fn test_decode_argb() {
        let c = Colour::new(10, 20, 30, 40);
        let img = single(PixelFormat::Argb, pack_argb(c));
        let palette = Palette::default();
        let pixel = Sampler::new(&img, &palette).sample(0, 0).unwrap();
        assert_eq!(pixel.colour, c);
    }

    #[test]
    fn test_decode_gray_alpha() {
        let img = single(PixelFormat::GrayAlpha, 0x80_40);
        let palette = Palette::default();
        let pixel = Sampler::new(&img, &palette).sample(0, 0).unwrap();
        assert_eq!(pixel.colour, Colour::new(0x40, 0x40, 0x40, 0x80));
    }

    #[test]
    fn test_decode_indexed() {
        let palette = Palette::new(vec![Colour::WHITE, Colour::rgb(255, 0, 0)]);
        let img = Image::new(3, 1, PixelFormat::Indexed, vec![0, 1, 9]).unwrap();
        let sampler = Sampler::new(&img, &palette);

        // Index 0 is transparent even though the entry is white.
        assert_eq!(sampler.sample(0, 0).unwrap().colour, Colour::TRANSPARENT);
        assert_eq!(sampler.sample(1, 0).unwrap().colour, Colour::rgb(255, 0, 0));
        // Past the end of the palette
        assert_eq!(sampler.sample(2, 0).unwrap().colour, Colour::TRANSPARENT);
        assert_eq!(sampler.malformed_count(), 1);
    }

    #[test]
    fn test_host_decoder_preferred_when_in_range() {
        let img = single(PixelFormat::Rgba, 0);
        let palette = Palette::default();
        let host = FixedDecoder([1, 2, 3, 255]);
        let sampler = Sampler::new(&img, &palette).with_host_decoder(&host);

        assert_eq!(sampler.sample(0, 0).unwrap().colour, Colour::rgb(1, 2, 3));
        assert_eq!(sampler.malformed_count(), 0);
    }

    #[test]
    fn test_indexed_zero_ignores_host_decoder() {
        let palette = Palette::new(vec![Colour::WHITE, Colour::rgb(255, 0, 0)]);
        let img = Image::new(2, 1, PixelFormat::Indexed, vec![0, 1]).unwrap();
        let host = FixedDecoder([0, 0, 0, 255]);
        let sampler = Sampler::new(&img, &palette).with_host_decoder(&host);

        assert_eq!(sampler.sample(0, 0).unwrap().colour, Colour::TRANSPARENT);
        assert_eq!(sampler.sample(1, 0).unwrap().colour, Colour::BLACK);
        assert_eq!(sampler.opaque_pixels().count(), 1);
    }

    #[test]
    fn test_host_decoder_out_of_range_falls_back() {
        let c = Colour::rgb(9, 8, 7);
        let img = single(PixelFormat::Rgba, pack_rgba(c));
        let palette = Palette::default();
        let host = FixedDecoder([300, 2, 3, 255]);
        let sampler = Sampler::new(&img, &palette).with_host_decoder(&host);

        assert_eq!(sampler.sample(0, 0).unwrap().colour, c);
        assert_eq!(sampler.malformed_count(), 1);
        assert_eq!(sampler.clamped_count(), 0);
    }

    #[test]
    fn test_opaque_pixels_row_major() {
        let red = Colour::rgb(255, 0, 0);
        let clear = Colour::TRANSPARENT;
        let img = Image::from_colours(&[vec![clear, red], vec![red, clear]]).unwrap();
        let palette = Palette::default();
        let sampler = Sampler::new(&img, &palette);

        let coords: Vec<_> = sampler.opaque_pixels().map(|p| (p.x, p.y)).collect();
        assert_eq!(coords, vec![(1, 0), (0, 1)]);
    }
}

//! PNG output encoder.
//!
//! Pure Rust PNG encoding using the `png` crate. The figure title travels in a
//! `tEXt` chunk because the raster itself carries no glyphs.

use crate::error::Result;
use crate::framebuffer::Framebuffer;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// PNG encoder for framebuffer output.
#[derive(Debug, Clone, Default)]
pub struct PngEncoder {
    title: Option<String>,
}

impl PngEncoder {
    /// Create an encoder without metadata.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a `Title` text chunk in the image.
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Write a framebuffer to a PNG file.
    ///
    /// # Errors
    ///
    /// Returns an error if file creation or PNG encoding fails.
    pub fn write_to_file<P: AsRef<Path>>(&self, fb: &Framebuffer, path: P) -> Result<()> {
        let file = File::create(path)?;
        self.encode(fb, BufWriter::new(file))
    }

    /// Encode a framebuffer to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG encoding fails.
    pub fn to_bytes(&self, fb: &Framebuffer) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        self.encode(fb, &mut buffer)?;
        Ok(buffer)
    }

    fn encode<W: Write>(&self, fb: &Framebuffer, sink: W) -> Result<()> {
        let mut encoder = png::Encoder::new(sink, fb.width(), fb.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        if let Some(title) = &self.title {
            // tEXt is Latin-1 only
            let latin1 = title.chars().map(|c| if u32::from(c) < 256 { c } else { '?' }).collect();
            encoder.add_text_chunk("Title".to_string(), latin1)?;
        }

        let mut writer = encoder.write_header()?;
        // Use compact pixels to handle stride padding
        writer.write_image_data(&fb.to_compact_pixels())?;
        writer.finish()?;
        Ok(())
    }
}

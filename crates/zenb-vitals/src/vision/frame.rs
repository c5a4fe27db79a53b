//! Raster frame wrapper
//!
//! Unified access to camera pixel data in RGB888 or RGBA8888 layout.

use crate::error::{Result, VitalsError};

/// Pixel layout of [`Frame::data`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
}

impl PixelFormat {
    #[inline]
    pub fn channels(self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
            PixelFormat::Rgba8 => 4,
        }
    }
}

/// Camera frame
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw pixel data (row-major)
    pub data: Vec<u8>,
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    pub format: PixelFormat,
    /// Capture timestamp in microseconds (monotonic)
    pub timestamp_us: i64,
}

impl Frame {
    /// Create a frame from raw pixel data, checking the buffer length
    pub fn new(
        data: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
        timestamp_us: i64,
    ) -> Result<Self> {
        let expected = width as usize * height as usize * format.channels();
        if data.len() != expected {
            return Err(VitalsError::InvalidFrame(format!(
                "{}x{} {:?} needs {} bytes, got {}",
                width,
                height,
                format,
                expected,
                data.len()
            )));
        }
        Ok(Self {
            data,
            width,
            height,
            format,
            timestamp_us,
        })
    }

    /// Create a uniformly colored RGB frame
    pub fn filled(width: u32, height: u32, rgb: [u8; 3], timestamp_us: i64) -> Self {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 3)
            .collect();
        Self {
            data,
            width,
            height,
            format: PixelFormat::Rgb8,
            timestamp_us,
        }
    }

    /// Get pixel at (x, y) as [R, G, B]; alpha is dropped
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        if x >= self.width || y >= self.height {
            return [0, 0, 0];
        }
        let ch = self.format.channels();
        let idx = (y as usize * self.width as usize + x as usize) * ch;
        match self.data.get(idx..idx + 3) {
            Some(px) => [px[0], px[1], px[2]],
            // struct-literal frames can carry short data
            None => [0, 0, 0],
        }
    }

    /// Set pixel at (x, y); alpha (if any) is left untouched
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, rgb: [u8; 3]) {
        if x >= self.width || y >= self.height {
            return;
        }
        let ch = self.format.channels();
        let idx = (y as usize * self.width as usize + x as usize) * ch;
        if let Some(px) = self.data.get_mut(idx..idx + 3) {
            px.copy_from_slice(&rgb);
        }
    }

    #[inline]
    pub fn area(&self) -> f32 {
        self.width as f32 * self.height as f32
    }
}

//! Ball texture generator
//!
//! Draws a single anti-aliased ball with an outline ring and a highlight.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use std::fs;
use std::path::Path;

/// Where the windowed app loads the ball sprite from
pub const BALL_TEXTURE_FILE: &str = "assets/textures/ball.png";

// Colors
const FILL: [u8; 4] = [224, 86, 52, 255]; // Orange-red
const HIGHLIGHT: [u8; 4] = [246, 162, 128, 255];
const BLACK: [u8; 4] = [20, 20, 20, 255]; // Outline

#[derive(Debug, Clone)]
pub struct BallTextureConfig {
    /// Texture edge length in pixels
    pub size: u32,
    /// Outline ring width in pixels
    pub border: f32,
    pub fill: [u8; 4],
    pub highlight: [u8; 4],
}

impl Default for BallTextureConfig {
    fn default() -> Self {
        Self {
            size: 128,
            border: 4.0,
            fill: FILL,
            highlight: HIGHLIGHT,
        }
    }
}

/// Render the ball into a transparent square image
pub fn render_ball(config: &BallTextureConfig) -> RgbaImage {
    let size = config.size;
    let center = size as f32 / 2.0;
    let radius = center - config.border;
    let outer_radius = center - 1.0;

    let mut img = RgbaImage::from_pixel(size, size, Rgba([0, 0, 0, 0]));

    // Interior with a soft 2px edge
    for y in 0..size {
        for x in 0..size {
            let fx = x as f32 + 0.5 - center;
            let fy = y as f32 + 0.5 - center;
            let dist = (fx * fx + fy * fy).sqrt();
            if dist <= radius {
                let edge_dist = radius - dist;
                let alpha = if edge_dist < 2.0 {
                    ((edge_dist / 2.0) * 255.0) as u8
                } else {
                    255
                };
                let [r, g, b, _] = config.fill;
                img.put_pixel(x, y, Rgba([r, g, b, alpha]));
            }
        }
    }

    // Highlight up and to the left, well inside the interior
    let spot_radius = (radius * 0.22).max(1.0) as i32;
    let offset = (radius * 0.4) as i32;
    let spot_center = (center as i32 - offset, center as i32 - offset);
    draw_filled_circle_mut(&mut img, spot_center, spot_radius, Rgba(config.highlight));

    // Border ring
    for y in 0..size {
        for x in 0..size {
            let fx = x as f32 + 0.5 - center;
            let fy = y as f32 + 0.5 - center;
            let dist = (fx * fx + fy * fy).sqrt();
            if dist > radius && dist <= outer_radius {
                let edge_dist = outer_radius - dist;
                let alpha = if edge_dist < 1.5 {
                    ((edge_dist / 1.5) * 255.0) as u8
                } else {
                    255
                };
                img.put_pixel(x, y, Rgba([BLACK[0], BLACK[1], BLACK[2], alpha]));
            }
        }
    }

    img
}

/// Render with `config` and write a PNG to `path`, creating parent directories
pub fn run(path: &str, config: &BallTextureConfig) -> Result<(), String> {
    if let Some(parent) = Path::new(path).parent() {
        fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
    }

    let img = render_ball(config);
    img.save(path)
        .map_err(|e| format!("Failed to save {}: {}", path, e))?;
    println!("  Created: {} ({}x{})", path, config.size, config.size);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corners_transparent_center_filled() {
        let config = BallTextureConfig::default();
        let img = render_ball(&config);
        assert_eq!(img.dimensions(), (128, 128));
        assert_eq!(img.get_pixel(0, 0)[3], 0);
        assert_eq!(img.get_pixel(127, 127)[3], 0);
        assert_eq!(*img.get_pixel(64, 64), Rgba(FILL));
    }

    #[test]
    fn test_outline_on_edge() {
        let img = render_ball(&BallTextureConfig::default());
        // Midway through the ring on the right-hand side
        let pixel = img.get_pixel(125, 64);
        assert_eq!(&pixel.0[..3], &BLACK[..3]);
        assert!(pixel[3] > 0);
    }

    #[test]
    fn test_writes_png() {
        let dir = std::env::temp_dir().join(format!("ballthrow_gen_{}", std::process::id()));
        let path = dir.join("textures/ball.png");
        let config = BallTextureConfig {
            size: 32,
            ..Default::default()
        };
        run(path.to_str().unwrap(), &config).unwrap();
        let loaded = image::open(&path).unwrap();
        assert_eq!(loaded.width(), 32);
    }
}

//! Region-of-interest brightness reduction for raw RGBA frames.
//!
//! A camera-backed source reduces each frame to one scalar: the mean of
//! the red channel over a small patch centered in the frame. Blood-volume
//! changes modulate red reflectance most strongly, so the red channel
//! carries the pulse signal.

/// A rectangular pixel region within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionOfInterest {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl RegionOfInterest {
    /// A `size`×`size` region centered in a frame of the given
    /// dimensions, clamped to the frame bounds.
    pub fn centered(frame_width: u32, frame_height: u32, size: u32) -> Self {
        let width = size.min(frame_width);
        let height = size.min(frame_height);
        Self {
            x: (frame_width - width) / 2,
            y: (frame_height - height) / 2,
            width,
            height,
        }
    }
}

/// Mean red-channel value over the region of a tightly-packed RGBA frame.
///
/// Returns `None` when the buffer is too small for the stated dimensions
/// or the region is empty, so a truncated frame is skipped rather than
/// misread.
pub fn mean_red_brightness(
    rgba: &[u8],
    frame_width: u32,
    frame_height: u32,
    roi: RegionOfInterest,
) -> Option<f64> {
    if roi.width == 0 || roi.height == 0 {
        return None;
    }
    if roi.x + roi.width > frame_width || roi.y + roi.height > frame_height {
        return None;
    }
    if rgba.len() < frame_width as usize * frame_height as usize * 4 {
        return None;
    }

    let mut sum: u64 = 0;
    for row in roi.y..roi.y + roi.height {
        let row_start = (row as usize * frame_width as usize + roi.x as usize) * 4;
        for col in 0..roi.width as usize {
            sum += rgba[row_start + col * 4] as u64;
        }
    }

    Some(sum as f64 / (roi.width as f64 * roi.height as f64))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_frame(width: u32, height: u32, r: u8) -> Vec<u8> {
        let mut frame = Vec::with_capacity((width * height * 4) as usize);
        for _ in 0..width * height {
            frame.extend_from_slice(&[r, 0, 255, 255]);
        }
        frame
    }

    #[test]
    fn test_centered_region() {
        let roi = RegionOfInterest::centered(640, 480, 50);
        assert_eq!(roi, RegionOfInterest { x: 295, y: 215, width: 50, height: 50 });
    }

    #[test]
    fn test_centered_region_clamps_to_frame() {
        let roi = RegionOfInterest::centered(40, 30, 50);
        assert_eq!(roi.width, 40);
        assert_eq!(roi.height, 30);
        assert_eq!(roi.x, 0);
        assert_eq!(roi.y, 0);
    }

    #[test]
    fn test_mean_uses_red_channel_only() {
        let frame = solid_frame(100, 100, 37);
        let roi = RegionOfInterest::centered(100, 100, 50);
        let mean = mean_red_brightness(&frame, 100, 100, roi).unwrap();
        // Green/blue/alpha are ignored regardless of their values.
        assert!((mean - 37.0).abs() < 1e-9);
    }

    #[test]
    fn test_mean_over_mixed_region() {
        // Left half red=0, right half red=200, centered region straddles.
        let width = 10u32;
        let height = 4u32;
        let mut frame = vec![];
        for _row in 0..height {
            for col in 0..width {
                let r = if col < width / 2 { 0 } else { 200 };
                frame.extend_from_slice(&[r, 0, 0, 255]);
            }
        }
        let roi = RegionOfInterest { x: 0, y: 0, width, height };
        let mean = mean_red_brightness(&frame, width, height, roi).unwrap();
        assert!((mean - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_truncated_frame_is_rejected() {
        let frame = solid_frame(10, 10, 50);
        let roi = RegionOfInterest::centered(10, 10, 5);
        assert!(mean_red_brightness(&frame[..10], 10, 10, roi).is_none());
    }

    #[test]
    fn test_out_of_bounds_region_is_rejected() {
        let frame = solid_frame(10, 10, 50);
        let roi = RegionOfInterest { x: 8, y: 8, width: 5, height: 5 };
        assert!(mean_red_brightness(&frame, 10, 10, roi).is_none());
    }
}

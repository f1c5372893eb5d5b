use image::{
    imageops::{ self, FilterType },
    RgbaImage,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RegionPolicy{
    /// corner region sized as a fraction of each image's own dimensions
    Fraction(f32),
    /// corner region of a fixed pixel size, clamped to the image
    FixedPx(u32, u32),
}

impl Default for RegionPolicy{
    fn default() -> Self{
        RegionPolicy::Fraction(0.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region{
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Region{
    pub fn is_empty(&self) -> bool{
        self.w == 0 || self.h == 0
    }
}

// Bottom-right anchored region, never larger than the image itself.
pub fn corner_region(w: u32, h: u32, policy: RegionPolicy) -> Region{
    let (rw, rh) = match policy{
        RegionPolicy::Fraction(f) => {
            let f = f.clamp(0.0, 1.0);
            (
                ((w as f32 * f).floor() as u32).min(w),
                ((h as f32 * f).floor() as u32).min(h),
            )
        },
        RegionPolicy::FixedPx(fw, fh) => (fw.min(w), fh.min(h)),
    };
    Region{ x: w - rw, y: h - rh, w: rw, h: rh }
}

pub fn composite(dest: &mut RgbaImage, source: &RgbaImage, policy: RegionPolicy){
    let src = corner_region(source.width(), source.height(), policy);
    let dst = corner_region(dest.width(), dest.height(), policy);
    if src.is_empty() || dst.is_empty(){
        return;
    }
    let block = imageops::crop_imm(source, src.x, src.y, src.w, src.h).to_image();
    let block = if (src.w, src.h) == (dst.w, dst.h){
        // same size on both sides: pixel-exact copy, no resampling
        block
    } else {
        imageops::resize(&block, dst.w, dst.h, FilterType::Triangle)
    };
    imageops::replace(dest, &block, i64::from(dst.x), i64::from(dst.y));
}

#[cfg(test)]
mod tests{

    use super::*;
    use image::Rgba;

    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    #[test]
    fn test_corner_region_fraction(){
        let r = corner_region(1000, 500, RegionPolicy::Fraction(0.2));
        assert_eq!(r, Region{ x: 800, y: 400, w: 200, h: 100 });

        let r = corner_region(800, 600, RegionPolicy::Fraction(0.2));
        assert_eq!(r, Region{ x: 640, y: 480, w: 160, h: 120 });

        // fraction above 1 clamps to the whole image
        let r = corner_region(100, 50, RegionPolicy::Fraction(1.5));
        assert_eq!(r, Region{ x: 0, y: 0, w: 100, h: 50 });

        // fraction below 0 clamps to an empty region
        let r = corner_region(100, 50, RegionPolicy::Fraction(-0.5));
        assert!(r.is_empty());

        // small images floor down to empty
        let r = corner_region(3, 2, RegionPolicy::Fraction(0.2));
        assert!(r.is_empty());
    }

    #[test]
    fn test_corner_region_fixed(){
        let r = corner_region(1000, 500, RegionPolicy::FixedPx(140, 50));
        assert_eq!(r, Region{ x: 860, y: 450, w: 140, h: 50 });

        // fixed size clamps to images smaller than the region
        let r = corner_region(100, 30, RegionPolicy::FixedPx(140, 50));
        assert_eq!(r, Region{ x: 0, y: 0, w: 100, h: 30 });
    }

    #[test]
    fn test_corner_region_anchors_bottom_right(){
        for (w, h) in [(1, 1), (7, 13), (640, 480), (1536, 864)]{
            let r = corner_region(w, h, RegionPolicy::Fraction(0.2));
            if !r.is_empty(){
                assert_eq!(r.x + r.w, w);
                assert_eq!(r.y + r.h, h);
            }
        }
    }

    #[test]
    fn test_composite_scales_into_corner(){
        // 800x600 blue reference canvas, 1000x500 red source, 20% regions:
        // 200x100 red block resampled into the 160x120 corner of the canvas.
        let mut dest = RgbaImage::from_pixel(800, 600, BLUE);
        let source = RgbaImage::from_pixel(1000, 500, RED);
        composite(&mut dest, &source, RegionPolicy::Fraction(0.2));

        assert_eq!((dest.width(), dest.height()), (800, 600));
        for (x, y, px) in dest.enumerate_pixels(){
            if x >= 640 && y >= 480{
                assert_eq!(*px, RED, "inside corner at ({x}, {y})");
            } else {
                assert_eq!(*px, BLUE, "outside corner at ({x}, {y})");
            }
        }
    }

    #[test]
    fn test_composite_equal_regions_copy_exactly(){
        // equal dimensions mean equal regions, so the corner block must be
        // copied bit for bit
        let mut dest = RgbaImage::from_pixel(50, 40, BLUE);
        let source = RgbaImage::from_fn(50, 40, |x, y| {
            Rgba([x as u8, y as u8, (x + y) as u8, 255])
        });
        composite(&mut dest, &source, RegionPolicy::Fraction(0.2));

        let r = corner_region(50, 40, RegionPolicy::Fraction(0.2));
        for (x, y, px) in dest.enumerate_pixels(){
            if x >= r.x && y >= r.y{
                assert_eq!(px, source.get_pixel(x, y));
            } else {
                assert_eq!(*px, BLUE);
            }
        }
    }

    #[test]
    fn test_composite_degenerate_is_noop(){
        let mut dest = RgbaImage::from_pixel(10, 10, BLUE);
        let before = dest.clone();

        composite(&mut dest, &RgbaImage::new(0, 0), RegionPolicy::Fraction(0.2));
        assert_eq!(dest.as_raw(), before.as_raw());

        // 20% of a 4x4 source floors to an empty region
        composite(&mut dest, &RgbaImage::from_pixel(4, 4, RED), RegionPolicy::Fraction(0.2));
        assert_eq!(dest.as_raw(), before.as_raw());
    }
}

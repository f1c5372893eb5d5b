use crate::{
    draw,
    merge::{ self, RegionPolicy },
    save,
};

use image::RgbaImage;

pub const DEFAULT_W: u32 = 1536;
pub const DEFAULT_H: u32 = 864;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intake{
    Empty,
    HasReference,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accepted{
    Reference,
    Merged,
    Ignored,
}

// Owns the working canvas. The first accepted image reseeds the canvas and
// becomes the reference, the second is merged into its corner, any further
// image is ignored until reset.
pub struct Merger{
    state: Intake,
    canvas: RgbaImage,
    policy: RegionPolicy,
}

impl Merger{
    pub fn new(policy: RegionPolicy) -> Self{
        Self{
            state: Intake::Empty,
            canvas: draw::placeholder_canvas(DEFAULT_W, DEFAULT_H),
            policy,
        }
    }

    pub fn state(&self) -> Intake{
        self.state
    }

    pub fn canvas(&self) -> &RgbaImage{
        &self.canvas
    }

    pub fn accept(&mut self, raster: RgbaImage) -> Accepted{
        match self.state{
            Intake::Empty => {
                self.canvas = raster;
                self.state = Intake::HasReference;
                Accepted::Reference
            },
            Intake::HasReference => {
                merge::composite(&mut self.canvas, &raster, self.policy);
                self.state = Intake::Complete;
                Accepted::Merged
            },
            Intake::Complete => Accepted::Ignored,
        }
    }

    pub fn reset(&mut self){
        self.canvas = draw::placeholder_canvas(DEFAULT_W, DEFAULT_H);
        self.state = Intake::Empty;
    }

    // None when nothing has been accepted yet: there is nothing to export.
    pub fn export_png(&self) -> Result<Option<Vec<u8>>, String>{
        if self.state == Intake::Empty{
            return Ok(None);
        }
        save::encode_png(&self.canvas).map(Some)
    }
}

#[cfg(test)]
mod tests{

    use super::*;
    use image::Rgba;

    const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const YELLOW: Rgba<u8> = Rgba([255, 255, 0, 255]);

    fn pair_merged() -> Merger{
        let mut m = Merger::new(RegionPolicy::Fraction(0.2));
        assert_eq!(m.accept(RgbaImage::from_pixel(800, 600, BLUE)), Accepted::Reference);
        assert_eq!(m.accept(RgbaImage::from_pixel(1000, 500, RED)), Accepted::Merged);
        m
    }

    #[test]
    fn test_single_accept_never_composites(){
        let mut m = Merger::new(RegionPolicy::Fraction(0.2));
        let reference = RgbaImage::from_fn(50, 40, |x, y| {
            Rgba([x as u8, y as u8, 0, 255])
        });
        assert_eq!(m.accept(reference.clone()), Accepted::Reference);
        assert_eq!(m.state(), Intake::HasReference);
        assert_eq!(m.canvas().as_raw(), reference.as_raw());
    }

    #[test]
    fn test_pair_merges_into_corner(){
        let m = pair_merged();
        assert_eq!(m.state(), Intake::Complete);
        assert_eq!((m.canvas().width(), m.canvas().height()), (800, 600));
        assert_eq!(*m.canvas().get_pixel(640, 480), RED);
        assert_eq!(*m.canvas().get_pixel(799, 599), RED);
        assert_eq!(*m.canvas().get_pixel(639, 480), BLUE);
        assert_eq!(*m.canvas().get_pixel(640, 479), BLUE);
        assert_eq!(*m.canvas().get_pixel(0, 0), BLUE);
    }

    #[test]
    fn test_third_accept_ignored(){
        let mut m = pair_merged();
        let before = m.canvas().as_raw().clone();
        assert_eq!(m.accept(RgbaImage::from_pixel(300, 300, YELLOW)), Accepted::Ignored);
        assert_eq!(m.state(), Intake::Complete);
        assert_eq!(m.canvas().as_raw(), &before);
    }

    #[test]
    fn test_reset_restores_placeholder(){
        let fresh = Merger::new(RegionPolicy::Fraction(0.2));
        let mut m = pair_merged();
        m.reset();
        assert_eq!(m.state(), Intake::Empty);
        assert_eq!((m.canvas().width(), m.canvas().height()), (DEFAULT_W, DEFAULT_H));
        assert_eq!(m.canvas().as_raw(), fresh.canvas().as_raw());
    }

    #[test]
    fn test_export_empty_is_nothing(){
        let m = Merger::new(RegionPolicy::default());
        assert_eq!(m.export_png().unwrap(), None);
    }

    #[test]
    fn test_export_after_reference(){
        let mut m = Merger::new(RegionPolicy::default());
        m.accept(RgbaImage::from_pixel(8, 8, BLUE));
        let bytes = m.export_png().unwrap().unwrap();
        assert_eq!(&bytes[..4], &[0x89, b'P', b'N', b'G']);
    }
}

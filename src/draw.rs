// Software drawing for the reset-state canvas: flat background fill plus a
// centered hint line rendered with a tiny 5x7 bitmap font.

use image::{ Rgba, RgbaImage };

pub const BACKGROUND: Rgba<u8> = Rgba([0xf9, 0xfa, 0xfb, 0xff]);
pub const HINT_COLOR: Rgba<u8> = Rgba([0x9c, 0xa3, 0xaf, 0xff]);

const HINT: &str = "DROP IMAGES HERE. REFERENCE FIRST";
const HINT_SCALE: u32 = 3;

pub fn placeholder_canvas(w: u32, h: u32) -> RgbaImage{
    let mut img = RgbaImage::from_pixel(w, h, BACKGROUND);
    let tw = text_width(HINT, HINT_SCALE);
    let th = 7 * HINT_SCALE;
    let x = w.saturating_sub(tw) / 2;
    let y = h.saturating_sub(th) / 2;
    draw_text_5x7(&mut img, x as i32, y as i32, HINT, HINT_SCALE, HINT_COLOR);
    img
}

fn put_pixel(img: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>){
    if x < 0 || y < 0{
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= img.width() || y >= img.height(){
        return;
    }
    img.put_pixel(x, y, color);
}

// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
// Only the characters of the hint line are present.
fn glyph5x7(ch: char) -> Option<[u8; 7]>{
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch {
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),

        _ => None,
    }
}

fn draw_char_5x7(img: &mut RgbaImage, x: i32, y: i32, ch: char, scale: u32, color: Rgba<u8>){
    if let Some(rows) = glyph5x7(ch){
        for (ry, rowbits) in rows.iter().enumerate(){
            for rx in 0..5u32{
                if (rowbits & (1 << (4 - rx))) != 0{
                    for sy in 0..scale{
                        for sx in 0..scale{
                            put_pixel(
                                img,
                                x + (rx * scale + sx) as i32,
                                y + (ry as u32 * scale + sy) as i32,
                                color,
                            );
                        }
                    }
                }
            }
        }
    }
}

fn draw_text_5x7(img: &mut RgbaImage, mut x: i32, y: i32, text: &str, scale: u32, color: Rgba<u8>){
    for ch in text.chars(){
        draw_char_5x7(img, x, y, ch, scale, color);
        x += (6 * scale) as i32; // 5 pixels glyph width + 1 pixel spacing
    }
}

fn text_width(text: &str, scale: u32) -> u32{
    let n = text.chars().count() as u32;
    if n == 0{
        0
    } else {
        n * 6 * scale - scale
    }
}

#[cfg(test)]
mod tests{

    use super::*;

    #[test]
    fn test_placeholder_canvas(){
        let img = placeholder_canvas(1536, 864);
        assert_eq!((img.width(), img.height()), (1536, 864));
        assert_eq!(*img.get_pixel(0, 0), BACKGROUND);
        assert_eq!(*img.get_pixel(1535, 863), BACKGROUND);
        assert!(img.pixels().any(|px| *px == HINT_COLOR));
    }

    #[test]
    fn test_placeholder_canvas_smaller_than_hint(){
        // hint does not fit: drawing must stay clipped to the canvas
        let img = placeholder_canvas(16, 8);
        assert_eq!((img.width(), img.height()), (16, 8));
    }
}

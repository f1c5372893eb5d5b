use image::{ ImageFormat, RgbaImage };

use std::io::Cursor;

pub const DEFAULT_NAME: &str = "merged-image";

// Whatever the user typed, the written file is <name>.png.
pub fn export_filename(name: &str) -> String{
    let name = name.trim();
    let mut name = if name.is_empty(){
        DEFAULT_NAME.to_string()
    } else {
        name.to_string()
    };
    if !name.to_lowercase().ends_with(".png"){
        name.push_str(".png");
    }
    name
}

pub fn encode_png(canvas: &RgbaImage) -> Result<Vec<u8>, String>{
    let mut buf = Cursor::new(Vec::new());
    canvas
        .write_to(&mut buf, ImageFormat::Png)
        .map_err(|e| e.to_string())?;
    Ok(buf.into_inner())
}

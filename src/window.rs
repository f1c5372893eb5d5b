use sdl2::{
    EventPump,
    video::{ Window, WindowContext },
    render::{ Canvas, TextureCreator, Texture },
    pixels::PixelFormatEnum,
    rect::Rect,
};

use image::RgbaImage;

pub struct MIWindow{
    pub canvas: Canvas<Window>,
    pub texture_creator: TextureCreator<WindowContext>,
    pub texture: Option<(Texture, u32, u32)>,
    winw: u32,
    winh: u32,
}

impl MIWindow{
    pub fn create() -> Result<(Self, EventPump), String>{
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;

        let window = video_subsystem
            .window("mergeimg", 768, 432)
            .resizable()
            .opengl()
            .build()
            .map_err(|e| e.to_string())?;
        let (winw, winh) = window.size();

        let canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context.event_pump()?;

        Ok((
            Self{
                canvas,
                texture_creator,
                texture: None,
                winw,
                winh,
            },
            event_pump
        ))
    }

    pub fn set_canvas(&mut self, img: &RgbaImage) -> Result<(), String>{
        let imgw = img.width();
        let imgh = img.height();

        let mut texture = self
            .texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA32, imgw, imgh)
            .map_err(|e| e.to_string())?;
        texture.update(None, img, 4 * imgw as usize).map_err(|e| e.to_string())?;
        self.texture = Some((texture, imgw, imgh));

        Ok(())
    }

    pub fn redraw(&mut self) -> Result<(), String>{
        self.draw_texture()?;
        self.canvas.present();
        Ok(())
    }

    pub fn resize_redraw(&mut self, winw: u32, winh: u32) -> Result<(), String>{
        self.winw = winw;
        self.winh = winh;
        self.redraw()
    }

    fn draw_texture(&mut self) -> Result<(), String>{
        self.canvas.clear();
        if let Some((texture, imgw, imgh)) = &self.texture{
            let (x, y, w, h) = resize_dims(*imgw, *imgh, self.winw, self.winh);
            self.canvas.copy(texture, None, Some(Rect::new(x, y, w, h)))?;
            Ok(())
        } else {
            Err("Mergeimg error: window redraw with no valid texture available.".to_string())
        }
    }
}

fn resize_dims(imgw: u32, imgh: u32, winw: u32, winh: u32) -> (i32, i32, u32, u32){
    let wfac = winw as f32 / imgw as f32;
    let hfac = winh as f32 / imgh as f32;
    let fac = wfac.min(hfac);
    let w = (imgw as f32 * fac) as u32;
    let h = (imgh as f32 * fac) as u32;
    let x = if w < winw - 2 { (winw - w) / 2 } else { 0 } as i32;
    let y = if h < winh - 2 { (winh - h) / 2 } else { 0 } as i32;
    (x, y, w, h)
}

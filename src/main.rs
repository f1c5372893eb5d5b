mod window;
mod timer;
mod scripting;
mod merge;
mod intake;
mod draw;
mod save;

use crate::{
    window::MIWindow,
    timer::Timer,
    scripting::*,
    intake::{ Accepted, Merger },
    merge::RegionPolicy,
};

use sdl2::{
    event::{ Event, WindowEvent },
    keyboard::Keycode,
};

use simpleio as sio;

use image::{ ImageReader, RgbaImage };

use clap::Parser;

use std::{
    collections::VecDeque,
    path::{ Path, PathBuf },
    sync::mpsc,
};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// reference image, accepted first
    first: Option<PathBuf>,
    /// source image, merged into the corner
    second: Option<PathBuf>,
    /// rhai script in ~/.config/mergeimg/ driving the merge
    #[clap(short, long)]
    script: Option<String>,
    /// filename for exports triggered with the S key
    #[clap(short, long, default_value = "")]
    output: String,
    /// corner size as a fraction of each image's own dimensions
    #[clap(short, long, default_value_t = 0.2)]
    fraction: f32,
    /// corner size as a fixed pixel rectangle instead of a fraction
    #[clap(short, long, num_args = 2, value_names = ["W", "H"])]
    pixels: Option<Vec<u32>>,
}

pub fn main() -> Result<(), String> {
    let args = Args::parse();

    let (
        host_portals,
        RhaiPortals {
            from_rhai, first_to_rhai, second_to_rhai, save_to_rhai,
        },
    ) = create_channels();
    let (to_host, from_thread) = mpsc::channel();

    if let Some(name) = args.script {
        let mut spath = sio::get_home().vital("Mergeimg: could not get home directory");
        spath.push(".config/mergeimg");
        spath.push(name);
        spath.set_extension("rhai.rs");
        println!("{:?}", spath);
        let run_code = sio::read_file_into_string(&spath).vital("Mergeimg: could not load script");

        std::thread::spawn(move || {
            let engine = construct_rhai_engine(host_portals);
            match engine.compile(&run_code) {
                Ok(ast) => {
                    to_host.send(None).expect("Mergeimg: compilation verification send error");
                    engine.run_ast(&ast).expect("Mergeimg: rhai run error");
                },
                Err(e) => {
                    to_host.send(Some(e.to_string()))
                        .expect("Mergeimg: compilation verification send error");
                },
            }
        });

        if let Some(e) = from_thread.recv().vital("Mergeimg: compilation verification receive error") {
            println!("Rhai compile error: {}", e);
            return Err("Mergeimg: could not compile, aborting".to_string());
        }
    }

    println!("Starting main loop...");

    let mut timer = Timer::new();
    let (mut window, mut event_pump) = MIWindow::create()?;
    println!("Window: {:?}ms", timer.lap());

    let policy = match args.pixels {
        Some(px) => RegionPolicy::FixedPx(px[0], px[1]),
        None => RegionPolicy::Fraction(args.fraction),
    };
    let mut merger = Merger::new(policy);
    window.set_canvas(merger.canvas())?;
    window.redraw()?;
    println!("Canvas: {:?}ms", timer.lap());

    for path in [args.first, args.second].into_iter().flatten() {
        if accept_file(&mut merger, &mut window, &mut timer, &path)? {
            window.redraw()?;
        }
    }

    let mut polls = VecDeque::new();

    loop {
        let mut redraw = false;
        let mut die = false;

        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown { keycode: Some(Keycode::Escape), .. } => {
                    die = true;
                    break;
                },
                Event::Window{ win_event: WindowEvent::Resized(winw, winh), .. } => {
                    let winw = winw.max(0).unsigned_abs();
                    let winh = winh.max(0).unsigned_abs();
                    window.resize_redraw(winw, winh)?;
                },
                Event::KeyDown { keycode: Some(Keycode::S), .. } => {
                    export(&merger, &args.output)?;
                },
                Event::KeyDown { keycode: Some(Keycode::C), .. } => {
                    merger.reset();
                    window.set_canvas(merger.canvas())?;
                    redraw = true;
                    println!("Mergeimg: cleared");
                },
                Event::DropFile { filename, .. } => {
                    if accept_file(&mut merger, &mut window, &mut timer, Path::new(&filename))? {
                        redraw = true;
                    }
                },
                _ => {}
            }
        }

        for rhai_call in from_rhai.try_iter() {
            polls.push_back(rhai_call);
        }

        if let Some(msg) = polls.pop_front() {
            use HostMsg::*;
            match msg {
                Kill => {
                    die = true;
                },
                LoadFirst(path) => {
                    let ok = accept_file(&mut merger, &mut window, &mut timer, Path::new(&path))?;
                    redraw |= ok;
                    first_to_rhai.send(ok).map_err(|_| "Mergeimg: cannot push load result")?;
                },
                LoadSecond(path) => {
                    let ok = accept_file(&mut merger, &mut window, &mut timer, Path::new(&path))?;
                    redraw |= ok;
                    second_to_rhai.send(ok).map_err(|_| "Mergeimg: cannot push load result")?;
                },
                Save(name) => {
                    let ok = export(&merger, &name)?;
                    save_to_rhai.send(ok).map_err(|_| "Mergeimg: cannot push save result")?;
                },
                Reset => {
                    merger.reset();
                    window.set_canvas(merger.canvas())?;
                    redraw = true;
                    println!("Mergeimg: cleared");
                },
            }
        }

        if die {
            break;
        }

        if redraw {
            window.redraw()?;
        }
    }

    println!("Mergeimg: finished.");
    Ok(())
}

// True when the canvas changed and the window should re-upload it.
fn accept_file(
    merger: &mut Merger,
    window: &mut MIWindow,
    timer: &mut Timer,
    path: &Path,
) -> Result<bool, String> {
    timer.lap();
    let img = match decode(path) {
        Ok(img) => img,
        Err(e) => {
            println!("Mergeimg: could not decode {:?}: {}", path, e);
            return Ok(false);
        },
    };
    println!("Image: {:?}ms", timer.lap());

    match merger.accept(img) {
        Accepted::Reference => {
            println!("Mergeimg: reference image loaded");
        },
        Accepted::Merged => {
            println!("Mergeimg: corner merged, {:?}ms", timer.lap());
        },
        Accepted::Ignored => {
            println!("Mergeimg: already merged two images, press C to start over");
            return Ok(false);
        },
    }
    window.set_canvas(merger.canvas())?;
    Ok(true)
}

fn decode(path: &Path) -> Result<RgbaImage, String> {
    Ok(ImageReader::open(path)
        .map_err(|e| e.to_string())?
        .decode()
        .map_err(|e| e.to_string())?
        .into_rgba8())
}

// True when a file was written.
fn export(merger: &Merger, name: &str) -> Result<bool, String> {
    match merger.export_png()? {
        None => {
            println!("Mergeimg: nothing to export");
            Ok(false)
        },
        Some(bytes) => {
            let filename = save::export_filename(name);
            std::fs::write(&filename, bytes).map_err(|e| e.to_string())?;
            println!("Mergeimg: saved {}", filename);
            Ok(true)
        },
    }
}

trait Vital<T> {
    fn vital(self, msg: &str) -> T;
}

impl<T, U: std::fmt::Display> Vital<T> for Result<T, U> {
    fn vital(self, msg: &str) -> T {
        match self {
            Ok(res) => res,
            Err(err) => {
                println!("{msg}: {err}");
                std::process::exit(-1);
            },
        }
    }
}

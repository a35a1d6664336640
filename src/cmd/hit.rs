use clap::Args;
use softkeys::config::Settings;
use softkeys::error::SkResult;
use softkeys::geometry::{key_at, key_at_px, resolve};
use softkeys::layouts::LayoutSet;

#[derive(Args, Debug, Clone)]
pub struct HitArgs {
    #[command(flatten)]
    pub settings: Settings,

    #[arg(allow_negative_numbers = true)]
    pub x: f32,

    #[arg(allow_negative_numbers = true)]
    pub y: f32,

    /// Treat x/y as pixels in a view of this width (needs --view-height).
    #[arg(long, requires = "view_height")]
    pub view_width: Option<f32>,

    #[arg(long, requires = "view_width")]
    pub view_height: Option<f32>,
}

pub fn run(args: HitArgs, settings: &Settings, layouts: &LayoutSet) -> SkResult<()> {
    let layout = resolve(layouts.active(), &settings.layout)?;

    let key = match (args.view_width, args.view_height) {
        (Some(w), Some(h)) => key_at_px(&layout, args.x, args.y, w, h),
        _ => key_at(&layout, args.x, args.y),
    };

    match key {
        Some(k) => println!(
            "key {} row {} label {:?} code {} at ({}, {}) size {}x{}",
            k.id,
            k.row,
            k.label,
            k.code.map_or("-".to_string(), |c| c.to_string()),
            k.x,
            k.y,
            k.width,
            k.height
        ),
        None => println!("no key at ({}, {})", args.x, args.y),
    }
    Ok(())
}

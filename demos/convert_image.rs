//! Convert an image file into a 16-bit signed distance field PNG.
//!
//! `cargo run --example convert_image --features piston_image -- in.png out.png [spread] [downscale]`

use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    use bruteforce_sdf::prelude::*;

    let _logger = flexi_logger::Logger::try_with_env_or_str("info")?.start()?;

    let mut arguments = std::env::args().skip(1);
    let input = arguments.next().unwrap_or_else(|| "in.png".to_string());
    let output = arguments.next().unwrap_or_else(|| "out.png".to_string());

    let defaults = FieldParams::default();
    let spread = match arguments.next() { Some(spread) => spread.parse()?, None => defaults.spread };
    let downscale = match arguments.next() { Some(downscale) => downscale.parse()?, None => defaults.downscale };

    log::info!("input file: {}", input);
    let source = image::open(&input)?;

    let field = image_to_sdf(&source, &FieldParams::new(spread, downscale))?;
    if field.is_empty() {
        log::warn!("{} is too small for a downscale of {}, nothing written", input, downscale);
        return Ok(());
    }

    field.to_gray_u16_image().save(&output)?;
    log::info!("wrote {}", output);

    Ok(())
}

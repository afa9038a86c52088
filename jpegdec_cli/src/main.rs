// Copyright (c) the jpegdec Project Authors. All rights reserved.
//
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr, eyre};
use jpegdec::decode::decode_to_image;
use jpegdec_cli::enc::encode_for_path;

#[derive(Parser)]
#[command(about = "Decodes baseline JPEG images")]
struct Opt {
    /// Input JPEG file
    input: PathBuf,

    /// Output image file, should end in .png or .ppm
    #[clap(required_unless_present = "info")]
    output: Option<PathBuf>,

    /// If specified, writes the JPEG comment of the decoded image
    #[clap(long)]
    comment_out: Option<PathBuf>,

    /// Only prints the image size and comment
    #[clap(long)]
    info: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    #[cfg(feature = "tracing-subscriber")]
    {
        use tracing_subscriber::{EnvFilter, fmt, prelude::*};
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(EnvFilter::from_default_env())
            .init();
    }

    let opt = Opt::parse();
    let data = std::fs::read(&opt.input)
        .wrap_err_with(|| format!("Cannot read {}", opt.input.display()))?;
    let image = decode_to_image(&data)
        .map_err(|e| eyre!("Failed to decode {}: {e}", opt.input.display()))?;

    if opt.info {
        println!("{}x{}", image.width(), image.height());
        if let Some(comment) = image.comment() {
            println!("Comment: {comment}");
        }
        return Ok(());
    }

    if let Some(output) = opt.output {
        let bytes = encode_for_path(&image, &output)?;
        std::fs::write(&output, bytes)
            .wrap_err_with(|| format!("Cannot write {}", output.display()))?;
    }

    if let Some(comment_out) = opt.comment_out {
        let comment = image
            .comment()
            .ok_or_else(|| eyre!("Image has no comment"))?;
        std::fs::write(&comment_out, comment)
            .wrap_err_with(|| format!("Cannot write {}", comment_out.display()))?;
    }
    Ok(())
}

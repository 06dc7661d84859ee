//! Convert command: base + gain map to an encoded HDR PNG.

use crate::ConvertArgs;
use crate::image_io;
use anyhow::{Context, Result, bail};
use gainhdr_color::{AppleHdrTags, ConversionConfig, GainMapMetadata, HdrOutput, HdrPipeline};
use std::time::Instant;
use tracing::{debug, info, warn};

pub fn run(args: ConvertArgs) -> Result<()> {
    let config = build_config(&args)?;
    let metadata = resolve_metadata(&args);

    let base = image_io::read_base(&args.base, args.base_primaries, args.base_transfer)?;
    let gain = match &args.gainmap {
        Some(path) => Some(image_io::read_gain_map(path, args.gain_transfer)?),
        None => None,
    };
    debug!(
        base = %args.base.display(),
        width = base.width(),
        height = base.height(),
        has_gain_map = gain.is_some(),
        "loaded inputs"
    );

    let start = Instant::now();
    let output = HdrPipeline::new(config)
        .run(base, gain, metadata.as_ref())
        .context("Conversion failed")?;

    let image = match output {
        HdrOutput::Quantized(q) => q,
        HdrOutput::Float(_) => bail!("PNG output needs an integer bit depth (--depth 8 or 16)"),
    };
    image_io::write_png(&args.output, &image)?;

    info!(
        output = %args.output.display(),
        primaries = %image.primaries(),
        transfer = %image.transfer(),
        bits = image.bit_depth().bits(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "wrote HDR image"
    );
    Ok(())
}

/// Config file (or defaults) with command-line overrides applied.
fn build_config(args: &ConvertArgs) -> Result<ConversionConfig> {
    let mut config = match &args.config {
        Some(path) => ConversionConfig::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => ConversionConfig::default(),
    };
    if let Some(prims) = args.target_primaries {
        config = config.with_primaries(prims);
    }
    if let Some(tf) = args.transfer {
        config = config.with_transfer(tf);
    }
    if let Some(bits) = args.depth {
        config = config.with_bit_depth(Some(bits));
    }
    if let Some(nits) = args.white_nits {
        config = config.with_reference_white(nits);
    }
    if args.dither {
        config = config.with_dither(true);
    }
    if let Some(interp) = args.interpolation {
        config = config.with_interpolation(interp);
    }
    Ok(config)
}

/// Apple tags win over an explicit headroom, which wins over a stop range.
fn resolve_metadata(args: &ConvertArgs) -> Option<GainMapMetadata> {
    let meta = match (args.apple_headroom_tag, args.apple_gain_tag) {
        (Some(tag), Some(gain)) => match AppleHdrTags::new(tag, gain).to_metadata() {
            Ok(meta) => Some(meta),
            Err(err) => {
                warn!(error = %err, "unusable Apple HDR tags");
                None
            }
        },
        _ => match (args.headroom, args.min_stops, args.max_stops) {
            (Some(headroom), _, _) => Some(GainMapMetadata::from_headroom(headroom)),
            (None, Some(min), Some(max)) => Some(GainMapMetadata::new(min, max)),
            (None, None, None) => None,
            _ => {
                warn!("--min-stops and --max-stops must be given together; ignoring gain range");
                None
            }
        },
    };
    match (meta, args.gamma) {
        (Some(meta), Some(gamma)) => Some(meta.with_gamma(gamma)),
        (meta, _) => meta,
    }
}

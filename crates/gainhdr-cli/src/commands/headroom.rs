//! Apple maker-note headroom.

use crate::HeadroomArgs;
use anyhow::Result;
use gainhdr_color::AppleHdrTags;

/// Prints the headroom and the equivalent gain range.
pub fn run(args: HeadroomArgs) -> Result<()> {
    let tags = AppleHdrTags::new(args.headroom_tag, args.gain_tag);
    let headroom = tags.headroom()?;
    println!("Headroom:   {:.4}x", headroom);
    println!("Stops:      {:.4}", headroom.log2());
    println!("Peak (nits): {:.1}", headroom * gainhdr_color::DEFAULT_REFERENCE_WHITE_NITS);
    Ok(())
}

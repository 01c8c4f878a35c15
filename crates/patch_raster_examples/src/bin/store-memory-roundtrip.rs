use patch_raster::prelude::*;
use patch_raster_examples::{init_tracing, summarize};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // A 1 km x 1 km domain at 1 m resolution, 100x100-sample patches.
    let config = StoreConfig::new(
        BoundingBox::new(0.0, 1000.0, 0.0, 1000.0),
        1.0,
        100,
        BackendKind::Memory,
    );
    let mut raster = config.open()?;

    // A 250x150 gradient block starting at (20, 30) spans several patches;
    // the insert splits it along every patch boundary it crosses.
    let block = Block::from_fn(250, 150, |ix, iy| (ix + iy) as f64);
    raster.insert(20.0, 30.0, &block)?;

    // Pull the exact block back out.
    let exact = raster.extract(&BoundingBox::new(19.5, 270.0, 29.5, 180.0))?;
    println!("{}", summarize("exact window", &exact));

    // A wider window pads the unwritten fringe with NaN.
    let padded = raster.extract(&BoundingBox::new(0.0, 280.0, 0.0, 190.0))?;
    println!("{}", summarize("padded window", &padded));

    // Outside the outer box the store refuses before touching a patch.
    match raster.extract(&BoundingBox::new(-50.0, 10.0, 0.0, 10.0)) {
        Err(Error::OutOfBounds { .. }) => println!("out-of-bounds window rejected"),
        other => anyhow::bail!("expected an out-of-bounds error, got {other:?}"),
    }

    Ok(())
}

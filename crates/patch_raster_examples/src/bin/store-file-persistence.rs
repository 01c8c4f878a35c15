use patch_raster::prelude::*;
use patch_raster_examples::{init_tracing, summarize};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let dir = tempfile::TempDir::new()?;
    let config = StoreConfig::new(
        BoundingBox::new(0.0, 10000.0, 0.0, 10000.0),
        10.0,
        100,
        BackendKind::File {
            directory: dir.path().to_path_buf(),
        },
    );

    // Write through one store instance, then drop it.
    {
        let mut raster = config.open()?;
        let block = Block::from_fn(4, 5, |ix, iy| (ix * 5 + iy) as f64);
        raster.insert(20.0, 20.0, &block)?;
    }

    let files: Vec<_> = std::fs::read_dir(dir.path())?
        .filter_map(|entry| Some(entry.ok()?.file_name().into_string().ok()?))
        .collect();
    println!("patch files on disk: {files:?}");

    // Reopen the same directory and read the data back.
    let raster = config.open()?;
    let out = raster.extract(&BoundingBox::new(19.0, 61.0, 19.0, 71.0))?;
    println!("{}", summarize("reloaded window", &out));

    Ok(())
}

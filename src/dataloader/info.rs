use super::dataloader::ImageDataLoader;

pub fn print_loader_info(dl: &ImageDataLoader) {
    let config = dl.config();

    println!("Loader Information:");
    println!("-------------------");
    println!("Manifest entries: {}", dl.len());
    println!("Batch size: {}", config.batch_size);
    println!("Batches per pass: {}", dl.batches_per_pass());
    println!("Label dimension: {}", config.dim_label);
    match config.resize_target() {
        Some((height, width)) => println!("Resize target: {}x{}", height, width),
        None => println!("Resize target: none (native sizes)"),
    }
    println!("Shuffle: {}", config.shuffle);
    println!("Seed: {:?}", config.shuffle_seed);
}

//! Chunk a file (or generated data) and print one record per chunk.
//!
//! Usage:
//!     cargo run --example chunk_file [file-path]
//!
//! With no argument, 256 KiB of seeded pseudo-random data is chunked so the
//! demo works standalone. Each chunk prints as `<digest_hex>,<length>`.

use std::io::Cursor;

use cdchunk::{chunk, ConfigFile};
use rand::{rngs::StdRng, Rng, SeedableRng};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = ConfigFile::parse(
        "# demo parameters\n\
         chunking_algo=rabins\n\
         hashing_algo=sha256\n\
         rabinc_window_size=48\n\
         rabinc_min_block_size=2048\n\
         rabinc_avg_block_size=4096\n\
         rabinc_max_block_size=8192\n",
    )?;

    let chunks = match std::env::args().nth(1) {
        Some(path) => {
            let data = std::fs::read(&path)?;
            println!("Chunking {} ({} bytes)...\n", path, data.len());
            chunk(&config, Cursor::new(data))?
        }
        None => {
            let mut rng = StdRng::seed_from_u64(42);
            let mut data = vec![0u8; 256 * 1024];
            rng.fill(data.as_mut_slice());
            println!("Chunking {} bytes of generated data...\n", data.len());
            chunk(&config, Cursor::new(data))?
        }
    };

    for record in &chunks {
        println!("{}", record);
    }

    let total: usize = chunks.iter().map(|c| c.len()).sum();
    println!("\nTotal: {} chunks, {} bytes", chunks.len(), total);
    if !chunks.is_empty() {
        println!("Average chunk size: {} bytes", total / chunks.len());
    }

    Ok(())
}

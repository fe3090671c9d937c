//! Replicate a file in memory and time a far seek-and-read.
//!
//! Usage:
//!     cargo run --example ram_probe -- <file-path> <multiplier>
//!
//! The file is repeated `multiplier` times into one in-memory buffer. The
//! first byte is read to pull the buffer's head into RAM, then the time to
//! seek to the last byte and read it is measured. On machines where the
//! buffer exceeds physical memory this makes paging costs visible.

use std::io::{Read, Seek, SeekFrom};
use std::process::ExitCode;
use std::time::Instant;

fn read_file_to_buffer(path: &str, multiplier: u32) -> std::io::Result<std::io::Cursor<Vec<u8>>> {
    let data = std::fs::read(path)?;
    let final_length = data.len() as u64 * multiplier as u64;
    println!(
        "Test file has {} bytes, will repeat it {} times to get a buffer of size {} GB",
        data.len(),
        multiplier,
        final_length as f64 / 1e9
    );

    let mut buffer = Vec::with_capacity(final_length as usize);
    for _ in 0..multiplier {
        buffer.extend_from_slice(&data);
    }
    println!("Done reading file");
    Ok(std::io::Cursor::new(buffer))
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: ram_probe <file-path> <multiplier>");
        return ExitCode::FAILURE;
    }
    let multiplier: u32 = match args[2].parse() {
        Ok(m) => m,
        Err(_) => {
            eprintln!("Usage: ram_probe <file-path> <multiplier>");
            return ExitCode::FAILURE;
        }
    };

    let mut stream = match read_file_to_buffer(&args[1], multiplier) {
        Ok(stream) => stream,
        Err(e) => {
            eprintln!("ram_probe: {}: {}", args[1], e);
            return ExitCode::FAILURE;
        }
    };

    // Read the first byte to bring the page with the beginning of the buffer
    // into RAM and try to evict the page containing the end of the buffer.
    let mut byte = [0u8; 1];
    if stream.read_exact(&mut byte).is_err() {
        eprintln!("ram_probe: buffer is empty");
        return ExitCode::FAILURE;
    }
    println!("First byte (hex value): {:02x}", byte[0]);

    let begin = Instant::now();
    stream.seek(SeekFrom::End(-1)).expect("seek to last byte");
    stream.read_exact(&mut byte).expect("read last byte");
    let elapsed = begin.elapsed();

    println!("Last byte (hex value): {:02x}", byte[0]);
    println!(
        "Time taken (microseconds): {:.3}",
        elapsed.as_secs_f64() * 1e6
    );
    ExitCode::SUCCESS
}

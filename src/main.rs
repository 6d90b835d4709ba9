use {
    huffman_archive::{compress_file, decompress_file, Error, Stats},
    std::{env, fs, path::PathBuf, process},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Mode {
    Compress,
    Decompress,
}

#[derive(Debug, PartialEq, Eq)]
struct Command {
    mode: Mode,
    input: PathBuf,
    output: PathBuf,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let command = match parse_args(env::args().skip(1)) {
        Ok(command) => command,
        Err(message) => {
            log::error!("{}", message);
            print_usage();
        }
    };
    log::debug!("{:?}", command);

    let result = match command.mode {
        Mode::Compress => compress_file(&command.input, &command.output),
        Mode::Decompress => decompress_file(&command.input, &command.output),
    };

    match result {
        Ok(stats) => {
            for line in &report(command.mode, stats) {
                println!("{}", line);
            }
        }
        Err(err) => {
            log::error!("{}", err);
            // The output is only created once the input has been read.
            let output_touched = !matches!(&err, Error::File { path, .. } if *path == command.input);
            if output_touched && command.output.exists() {
                if let Err(err) = fs::remove_file(&command.output) {
                    log::warn!("could not remove {}: {}", command.output.display(), err);
                }
            }
            process::exit(1);
        }
    }
}

fn print_usage() -> ! {
    println!("Usage:");
    println!("  huffman-archive -c -f <input> -o <output>    Compress <input> into <output>");
    println!("  huffman-archive -u -f <input> -o <output>    Decompress <input> into <output>");
    println!();
    println!("  -f may be spelled --file, -o may be spelled --output; flags may come in any order.");
    println!("Prints the original, compressed and metadata sizes in bytes.");
    process::exit(1)
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command, String> {
    let args: Vec<String> = args.into_iter().collect();
    if args.len() != 5 {
        return Err(format!("expected 5 arguments, got {}", args.len()));
    }

    let mut mode = None;
    let mut input = None;
    let mut output = None;
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match &*arg {
            "-c" | "-u" => {
                let this = if arg == "-c" { Mode::Compress } else { Mode::Decompress };
                if mode.replace(this).is_some() {
                    return Err("-c and -u may only be given once".to_string());
                }
            }
            "-f" | "--file" | "-o" | "--output" => {
                let path = args
                    .next()
                    .map(PathBuf::from)
                    .ok_or_else(|| format!("{} needs a path", arg))?;
                let slot = if arg == "-f" || arg == "--file" {
                    &mut input
                } else {
                    &mut output
                };
                if slot.replace(path).is_some() {
                    return Err(format!("{} given twice", arg));
                }
            }
            _ => return Err(format!("unknown argument {:?}", arg)),
        }
    }

    Ok(Command {
        mode: mode.ok_or("missing -c or -u")?,
        input: input.ok_or("missing input path")?,
        output: output.ok_or("missing output path")?,
    })
}

/// The three sizes in the order the mode reports them.
fn report(mode: Mode, stats: Stats) -> [u64; 3] {
    match mode {
        Mode::Compress => [stats.original_size, stats.compressed_size, stats.extra_size],
        Mode::Decompress => [stats.compressed_size, stats.original_size, stats.extra_size],
    }
}

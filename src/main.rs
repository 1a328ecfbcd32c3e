use std::fs::{self, File};
use std::io::{self, Write};

use chrono::Local;
use env_logger::{Env, Target};
use lapwing::{configuration::get_configuration, startup::run};

/// Duplicates log output into a per-run file next to the console stream.
struct TeeWriter {
    file: File,
}

impl Write for TeeWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.write_all(buf)?;
        io::stderr().write_all(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.flush()?;
        io::stderr().flush()
    }
}

fn init_logging() -> io::Result<()> {
    fs::create_dir_all("logs")?;
    let path = format!("logs/scraper_{}.log", Local::now().format("%Y%m%d_%H%M%S"));
    let file = File::create(path)?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(TeeWriter { file })))
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let configuration = get_configuration().expect("Failed to read configuration.");

    match run(configuration).await {
        Ok(_) => Ok(()),
        Err(e) => {
            log::error!("Script failed: {:?}", e);
            Err(e.into())
        }
    }
}
